/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::ops::Range;

/// Splits `0..len` into contiguous ranges of equal size (except possibly the
/// last one), one per worker.
///
/// The number of workers is `available_threads`, capped so that each worker
/// gets about `granularity` items; there is always at least one worker when
/// `len` is positive.
///
/// # Arguments
/// * `len`: the number of work items.
/// * `available_threads`: the maximum number of workers.
/// * `granularity`: the number of items below which adding a worker does
///   not pay off.
pub fn partition(len: usize, available_threads: usize, granularity: usize) -> Vec<Range<usize>> {
    if len == 0 {
        return Vec::new();
    }
    let workers = available_threads
        .min(len.div_ceil(granularity.max(1)))
        .max(1);
    let load = len.div_ceil(workers);
    (0..len)
        .step_by(load)
        .map(|start| start..(start + load).min(len))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_inputs_use_one_worker() {
        assert_eq!(partition(7, 8, 10), vec![0..7]);
        assert_eq!(partition(10, 8, 10), vec![0..10]);
    }

    #[test]
    fn test_ranges_cover_input() {
        let ranges = partition(95, 4, 10);
        assert_eq!(ranges.len(), 4);
        assert_eq!(ranges[0], 0..24);
        assert_eq!(ranges[3], 72..95);
        let mut next = 0;
        for range in ranges {
            assert_eq!(range.start, next);
            next = range.end;
        }
        assert_eq!(next, 95);
    }

    #[test]
    fn test_capped_by_granularity() {
        assert_eq!(partition(21, 16, 10).len(), 3);
        assert_eq!(partition(21, 2, 10).len(), 2);
    }

    #[test]
    fn test_empty() {
        assert!(partition(0, 4, 10).is_empty());
        assert_eq!(partition(3, 0, 0), vec![0..3]);
    }
}
