/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use std::ops::Index;

const BITS: usize = usize::BITS as usize;

macro_rules! panic_if_out_of_bounds {
    ($index: expr, $len: expr) => {
        if $index >= $len {
            panic!("Bit index out of bounds: {} >= {}", $index, $len)
        }
    };
}

/// A set of vertex positions packed in words.
///
/// Besides single-bit access, this set supports the word-level set algebra
/// needed by message-passing floods: in-place union, difference and
/// enumeration of the positions it contains.
///
/// Words are allocated only up to the largest position in the set, so sets
/// containing few small positions are cheap even when the capacity is large.
/// Trailing zero words are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionSet {
    data: Vec<usize>,
    len: usize,
}

impl PositionSet {
    /// Creates an empty set able to hold positions in `0..len`.
    pub fn new(len: usize) -> Self {
        Self {
            data: Vec::new(),
            len,
        }
    }

    /// Returns the capacity of the set, i.e., one more than the largest
    /// position it can hold.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn get(&self, index: usize) -> bool {
        panic_if_out_of_bounds!(index, self.len);
        self.data
            .get(index / BITS)
            .is_some_and(|word| (word >> (index % BITS)) & 1 != 0)
    }

    pub fn set(&mut self, index: usize, value: bool) {
        panic_if_out_of_bounds!(index, self.len);
        let word_index = index / BITS;
        if value {
            if word_index >= self.data.len() {
                self.data.resize(word_index + 1, 0);
            }
            self.data[word_index] |= 1 << (index % BITS);
        } else if word_index < self.data.len() {
            self.data[word_index] &= !(1 << (index % BITS));
            self.trim();
        }
    }

    /// Removes all positions.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Returns true if the set contains no position.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of positions in the set.
    pub fn count_ones(&self) -> usize {
        self.data.iter().map(|word| word.count_ones() as usize).sum()
    }

    /// Adds all positions of `other` to this set.
    pub fn union_with(&mut self, other: &PositionSet) {
        debug_assert_eq!(self.len, other.len);
        if other.data.len() > self.data.len() {
            self.data.resize(other.data.len(), 0);
        }
        for (word, other) in self.data.iter_mut().zip(&other.data) {
            *word |= other;
        }
    }

    /// Returns the positions of this set that are not in `other`.
    pub fn difference(&self, other: &PositionSet) -> PositionSet {
        debug_assert_eq!(self.len, other.len);
        let mut result = PositionSet {
            data: self
                .data
                .iter()
                .enumerate()
                .map(|(i, word)| word & !other.data.get(i).copied().unwrap_or(0))
                .collect(),
            len: self.len,
        };
        result.trim();
        result
    }

    /// Returns an iterator over the positions in the set, in increasing order.
    pub fn iter_ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.data
            .iter()
            .enumerate()
            .flat_map(|(word_index, &word)| {
                let mut word = word;
                std::iter::from_fn(move || {
                    if word == 0 {
                        return None;
                    }
                    let bit = word.trailing_zeros() as usize;
                    word &= word - 1;
                    Some(word_index * BITS + bit)
                })
            })
    }

    fn trim(&mut self) {
        while self.data.last() == Some(&0) {
            self.data.pop();
        }
    }
}

impl Index<usize> for PositionSet {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        match self.get(index) {
            false => &false,
            true => &true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get() {
        let mut set = PositionSet::new(130);
        set.set(0, true);
        set.set(64, true);
        set.set(129, true);
        assert!(set[0] && set[64] && set[129]);
        assert!(!set[1] && !set[128]);
        set.set(64, false);
        assert!(!set[64]);
        assert_eq!(set.count_ones(), 2);
    }

    #[test]
    fn test_algebra() {
        let mut a = PositionSet::new(100);
        let mut b = PositionSet::new(100);
        for i in [1, 5, 70, 99] {
            a.set(i, true);
        }
        for i in [5, 70, 80] {
            b.set(i, true);
        }
        let diff = a.difference(&b);
        assert_eq!(diff.iter_ones().collect::<Vec<_>>(), vec![1, 99]);

        b.union_with(&a);
        assert_eq!(b.iter_ones().collect::<Vec<_>>(), vec![1, 5, 70, 80, 99]);
        assert!(a.difference(&b).is_empty());

        let mut c = PositionSet::new(100);
        c.set(99, true);
        c.set(99, false);
        assert_eq!(c, PositionSet::new(100));

        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.len(), 100);
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds() {
        PositionSet::new(10).get(10);
    }
}
