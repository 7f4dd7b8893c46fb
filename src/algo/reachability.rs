/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Reachability by bulk-synchronous flooding.
//!
//! Every vertex keeps the set of positions it has heard of. In each round,
//! active vertices merge the messages they received into their own set,
//! then send to each neighbour only what the neighbour does not know yet,
//! activating it for the next round. The flood stops when a round produces
//! no message.
//!
//! Since messages travel along transactions of any direction, the resulting
//! relation is symmetric: it is the relation of being in the same weakly
//! connected component, restricted to the components touched by the initial
//! active vertices.

use crate::graph::GraphRead;
use crate::utils::{CancellationToken, Interrupted, PositionSet};
use dsi_progress_logger::ProgressLog;
use rand::{rngs::StdRng, SeedableRng};
use sux::bits::BitVec;

/// The outcome of a flood: for each vertex position, the set of positions it
/// has received messages from.
#[derive(Debug, Clone)]
pub struct Reachability {
    sets: Vec<PositionSet>,
    num_rounds: usize,
}

impl Reachability {
    /// Returns whether the vertex at position `u` heard of the vertex at
    /// position `v`.
    ///
    /// A vertex that took part in the flood always reaches itself; a vertex
    /// the flood did not touch reaches nothing.
    pub fn reaches(&self, u: usize, v: usize) -> bool {
        self.sets[u].get(v)
    }

    /// Returns the positions reached by the vertex at position `u`.
    pub fn set(&self, u: usize) -> &PositionSet {
        &self.sets[u]
    }

    /// Returns the number of rounds the flood took.
    pub fn num_rounds(&self) -> usize {
        self.num_rounds
    }

    /// Returns the number of vertex positions.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Computes [`Reachability`] by flooding.
///
/// On graphs with more than [sample threshold](Self::with_sample_threshold)
/// vertices, [`flood`](Self::flood) starts only from a random sample of
/// vertices, so components containing no sampled vertex are not flooded.
#[derive(Debug, Clone)]
pub struct ReachabilityFlooder {
    sample_threshold: usize,
    sample_size: usize,
    seed: u64,
}

impl Default for ReachabilityFlooder {
    fn default() -> Self {
        Self::new()
    }
}

impl ReachabilityFlooder {
    /// The default number of vertices above which the flood is sampled.
    pub const DEFAULT_SAMPLE_THRESHOLD: usize = 100_000;
    /// The default maximum number of initially active vertices of a sampled
    /// flood.
    pub const DEFAULT_SAMPLE_SIZE: usize = 1_000;

    /// Creates a new flooder with default parameters.
    pub fn new() -> Self {
        Self {
            sample_threshold: Self::DEFAULT_SAMPLE_THRESHOLD,
            sample_size: Self::DEFAULT_SAMPLE_SIZE,
            seed: 0,
        }
    }

    /// Sets the number of vertices above which the flood is sampled.
    pub fn with_sample_threshold(mut self, sample_threshold: usize) -> Self {
        self.sample_threshold = sample_threshold;
        self
    }

    /// Sets the maximum number of initially active vertices of a sampled
    /// flood.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.sample_size = sample_size;
        self
    }

    /// Sets the seed of the sampling pseudorandom number generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Floods from every vertex having neighbours, or from a sample of them
    /// if the graph is large.
    pub fn flood(
        &self,
        graph: &impl GraphRead,
        token: &CancellationToken,
        pl: &mut impl ProgressLog,
    ) -> Result<Reachability, Interrupted> {
        let candidates: Vec<usize> = (0..graph.vertex_count())
            .filter(|&position| graph.neighbour_count(graph.vertex(position)) > 0)
            .collect();
        self.flood_within(graph, &candidates, token, pl)
    }

    /// Floods from the given vertex positions, or from a sample of them if
    /// the graph is large.
    ///
    /// The sample is drawn only if the graph has more vertices than the
    /// sample threshold and there are more candidates than the sample size.
    pub fn flood_within(
        &self,
        graph: &impl GraphRead,
        candidates: &[usize],
        token: &CancellationToken,
        pl: &mut impl ProgressLog,
    ) -> Result<Reachability, Interrupted> {
        if graph.vertex_count() <= self.sample_threshold || candidates.len() <= self.sample_size {
            return self.flood_from(graph, candidates, token, pl);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut sample: Vec<usize> =
            rand::seq::index::sample(&mut rng, candidates.len(), self.sample_size)
                .into_iter()
                .map(|i| candidates[i])
                .collect();
        sample.sort_unstable();
        pl.info(format_args!(
            "Sampling {} of {} candidate vertices",
            sample.len(),
            candidates.len()
        ));
        self.flood_from(graph, &sample, token, pl)
    }

    /// Floods from the given vertex positions.
    ///
    /// # Arguments
    /// * `graph`: the graph.
    /// * `roots`: the positions of the initially active vertices.
    /// * `token`: a cancellation token, checked once per round.
    /// * `pl`: a progress logger, updated once per round.
    pub fn flood_from(
        &self,
        graph: &impl GraphRead,
        roots: &[usize],
        token: &CancellationToken,
        pl: &mut impl ProgressLog,
    ) -> Result<Reachability, Interrupted> {
        let num_vertices = graph.vertex_count();
        pl.item_name("round");
        pl.expected_updates(None);
        pl.start(format!(
            "Flooding from {} of {} vertices...",
            roots.len(),
            num_vertices
        ));

        let mut sets = vec![PositionSet::new(num_vertices); num_vertices];
        let mut inbox: Vec<Option<PositionSet>> = vec![None; num_vertices];
        let mut is_active = BitVec::new(num_vertices);
        let mut active = Vec::with_capacity(roots.len());
        for &root in roots {
            if !is_active[root] {
                is_active.set(root, true);
                active.push(root);
            }
        }

        let mut num_rounds = 0;
        let mut num_messages = 0_usize;
        let mut next = Vec::new();
        while !active.is_empty() {
            token.check()?;
            num_rounds += 1;

            for &u in &active {
                if let Some(message) = inbox[u].take() {
                    sets[u].union_with(&message);
                }
                sets[u].set(u, true);
                is_active.set(u, false);
            }

            for &u in &active {
                for neighbour in graph.neighbours(graph.vertex(u)) {
                    let v = graph.vertex_position(neighbour);
                    let delta = sets[u].difference(&sets[v]);
                    if delta.is_empty() {
                        continue;
                    }
                    inbox[v]
                        .get_or_insert_with(|| PositionSet::new(num_vertices))
                        .union_with(&delta);
                    num_messages += 1;
                    if !is_active[v] {
                        is_active.set(v, true);
                        next.push(v);
                    }
                }
            }

            std::mem::swap(&mut active, &mut next);
            next.clear();
            pl.update();
        }

        log::debug!(
            "Flood completed in {} rounds with {} messages",
            num_rounds,
            num_messages
        );
        pl.done();
        Ok(Reachability { sets, num_rounds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::StoreGraph;
    use dsi_progress_logger::no_logging;

    #[test]
    fn test_path_takes_diameter_rounds() -> Result<(), Interrupted> {
        let graph = StoreGraph::from_transactions(4, [(0, 1), (1, 2), (2, 3)], true);
        let reachability = ReachabilityFlooder::new().flood_from(
            &graph,
            &[0],
            &CancellationToken::new(),
            no_logging![],
        )?;
        for u in 0..4 {
            assert_eq!(reachability.set(u).count_ones(), 4);
        }
        // 0 reaches 3 in three rounds, 3 is heard back by 0 three rounds later
        assert_eq!(reachability.num_rounds(), 7);
        Ok(())
    }

    #[test]
    fn test_sampling() -> Result<(), Interrupted> {
        // Ten disjoint transactions
        let graph = StoreGraph::from_transactions(20, (0..10).map(|i| (2 * i, 2 * i + 1)), false);
        let reachability = ReachabilityFlooder::new()
            .with_sample_threshold(10)
            .with_sample_size(3)
            .with_seed(42)
            .flood(&graph, &CancellationToken::new(), no_logging![])?;
        let flooded = (0..20).filter(|&u| !reachability.set(u).is_empty()).count();
        // Each sampled vertex floods its own component
        assert!((3..=6).contains(&flooded));
        assert_eq!(flooded % 2, 0);
        Ok(())
    }
}
