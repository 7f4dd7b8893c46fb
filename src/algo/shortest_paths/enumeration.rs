/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{DistanceTable, ShortestPaths, SourceSearch};
use crate::graph::VertexId;
use crate::utils::{partition, CancellationToken, Interrupted, Threads};
use dsi_progress_logger::ProgressLog;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::mpsc;

/// Shortest paths between designated vertices, keyed by target.
///
/// Each path lists vertices from its target back to, and including, its
/// pivot. Paths with the same target are kept in pivot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathCollection {
    paths: BTreeMap<VertexId, Vec<Vec<VertexId>>>,
}

impl PathCollection {
    /// Returns the total number of paths.
    pub fn len(&self) -> usize {
        self.paths.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Returns the targets of the paths, in increasing order.
    pub fn targets(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.paths.keys().copied()
    }

    /// Returns the paths ending at `target`.
    pub fn paths_to(&self, target: VertexId) -> &[Vec<VertexId>] {
        self.paths.get(&target).map_or(&[], |paths| paths.as_slice())
    }

    /// Returns all the paths, each as a target-to-pivot sequence.
    pub fn iter(&self) -> impl Iterator<Item = &[VertexId]> + '_ {
        self.paths.values().flatten().map(Vec::as_slice)
    }

    /// Returns the paths between `from` and `to`, oriented from `from` to
    /// `to`, whichever of the two acted as pivot.
    pub fn paths_between(&self, from: VertexId, to: VertexId) -> Vec<Vec<VertexId>> {
        let forward = self
            .paths_to(to)
            .iter()
            .filter(|path| path.last() == Some(&from))
            .map(|path| path.iter().rev().copied().collect());
        let backward = self
            .paths_to(from)
            .iter()
            .filter(|path| path.last() == Some(&to))
            .cloned();
        forward.chain(backward).collect()
    }

    /// Returns the set of vertices lying on some path.
    pub fn vertices(&self) -> BTreeSet<VertexId> {
        self.iter().flatten().copied().collect()
    }

    fn push(&mut self, target: VertexId, paths: Vec<Vec<VertexId>>) {
        if !paths.is_empty() {
            self.paths.entry(target).or_default().extend(paths);
        }
    }
}

/// The targets a pivot enumerates paths to, with their distance.
struct PivotJob<'a> {
    pivot: VertexId,
    search: &'a SourceSearch,
    targets: Vec<(VertexId, usize)>,
}

impl ShortestPaths<'_> {
    /// Enumerates every shortest path between pairs of designated vertices.
    ///
    /// Unordered pairs are claimed in pivot order before any worker starts,
    /// so each pair is enumerated once, from the earliest pivot that
    /// reaches the other vertex, and the result does not depend on the
    /// number of workers. Pivots are then split among workers as in
    /// [`distances`](ShortestPaths::distances); each worker backtracks
    /// through the predecessors of its pivots using its own path buffer.
    ///
    /// # Arguments
    /// * `table`: the distances computed by
    ///   [`distances`](ShortestPaths::distances).
    /// * `token`: a cancellation token, checked at each recursive step.
    /// * `pl`: a progress logger.
    pub fn paths(
        &self,
        table: &DistanceTable,
        token: &CancellationToken,
        pl: &mut impl ProgressLog,
    ) -> Result<PathCollection, Interrupted> {
        let jobs = self.claim_pairs(table);
        let num_pairs: usize = jobs.iter().map(|job| job.targets.len()).sum();
        pl.item_name("pair");
        pl.expected_updates(Some(num_pairs));
        pl.start("Enumerating shortest paths...");

        let ranges = partition(jobs.len(), self.threads.num_threads(), self.granularity);
        if ranges.is_empty() {
            pl.done();
            return Ok(PathCollection::default());
        }
        let load = ranges[0].len();
        log::debug!(
            "Path phase: {} pivots, {} pairs, {} workers",
            jobs.len(),
            num_pairs,
            ranges.len()
        );

        let mut slots: Vec<Vec<(VertexId, Vec<Vec<VertexId>>)>> = vec![Vec::new(); jobs.len()];
        let mut outcomes: Vec<Result<(), Interrupted>> = vec![Ok(()); ranges.len()];
        let thread_pool = Threads::NumThreads(ranges.len()).build("path");

        let (done_tx, done_rx) = mpsc::channel::<()>();
        thread_pool.in_place_scope(|scope| {
            for ((pivots, slots), outcome) in jobs
                .chunks(load)
                .zip(slots.chunks_mut(load))
                .zip(outcomes.iter_mut())
            {
                let done_tx = done_tx.clone();
                scope.spawn(move |_| {
                    *outcome = pivots.iter().zip(slots.iter_mut()).try_for_each(|(job, slot)| {
                        self.enumerate_pivot(job, slot, &done_tx, token)
                    });
                });
            }
            drop(done_tx);
            for () in done_rx {
                pl.light_update();
            }
        });
        outcomes.into_iter().collect::<Result<(), Interrupted>>()?;

        let mut paths = PathCollection::default();
        for (target, found) in slots.into_iter().flatten() {
            paths.push(target, found);
        }
        pl.done();
        Ok(paths)
    }

    /// Assigns each unordered pair of designated vertices to the first pivot
    /// reaching the other vertex.
    fn claim_pairs<'t>(&self, table: &'t DistanceTable) -> Vec<PivotJob<'t>> {
        let directed_source = self.directed_source();
        let mut claimed = HashSet::new();
        let mut jobs = Vec::new();

        for (pivot, search) in table.entries() {
            let pivot = *pivot;
            if directed_source.is_some_and(|source| source != pivot) {
                continue;
            }
            let mut targets = Vec::new();
            for &target in &self.designated {
                if target == pivot {
                    continue;
                }
                let Some(distance) = search.distance(target) else {
                    continue;
                };
                if !claimed.insert((pivot.min(target), pivot.max(target))) {
                    continue;
                }
                if distance > 0 {
                    targets.push((target, distance));
                }
            }
            if !targets.is_empty() {
                jobs.push(PivotJob {
                    pivot,
                    search,
                    targets,
                });
            }
        }
        jobs
    }

    fn enumerate_pivot(
        &self,
        job: &PivotJob,
        slot: &mut Vec<(VertexId, Vec<Vec<VertexId>>)>,
        done_tx: &mpsc::Sender<()>,
        token: &CancellationToken,
    ) -> Result<(), Interrupted> {
        let mut path = Vec::new();
        for &(target, distance) in &job.targets {
            let mut found = Vec::new();
            path.clear();
            path.push(target);
            self.backtrack(job, target, distance, &mut path, &mut found, token)?;
            slot.push((target, found));
            // One update per pair
            let _ = done_tx.send(());
        }
        Ok(())
    }

    /// Extends `path`, which ends at `current`, towards the pivot through
    /// all predecessors of `current` that are `remaining` minus the edge
    /// cost away from it.
    fn backtrack(
        &self,
        job: &PivotJob,
        current: VertexId,
        remaining: usize,
        path: &mut Vec<VertexId>,
        found: &mut Vec<Vec<VertexId>>,
        token: &CancellationToken,
    ) -> Result<(), Interrupted> {
        token.check()?;
        if current == job.pivot {
            found.push(path.clone());
            return Ok(());
        }
        for &predecessor in job.search.predecessors(current) {
            let cost = self.edge_cost(predecessor, current);
            let Some(rest) = remaining.checked_sub(cost) else {
                continue;
            };
            if job.search.distance(predecessor) != Some(rest) {
                continue;
            }
            path.push(predecessor);
            let result = self.backtrack(job, predecessor, rest, path, found, token);
            path.pop();
            result?;
        }
        Ok(())
    }
}
