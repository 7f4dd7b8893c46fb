/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Shortest paths between designated vertices.
//!
//! The computation has two parallel phases separated by a rendezvous: first
//! a Dijkstra search is run from every designated vertex
//! ([`ShortestPaths::distances`]), recording distances and *all* tied
//! predecessors; then every shortest path between pairs of designated
//! vertices is reconstructed ([`ShortestPaths::paths`]). Finally, the
//! vertices and transactions on the paths are
//! [selected](crate::algo::selection::apply_selection) on the graph.
//!
//! Selection flags are touched only after both phases completed, so an
//! interrupted run leaves the graph unchanged.

mod distances;
pub use distances::*;

mod enumeration;
pub use enumeration::*;

use crate::algo::selection::apply_selection;
use crate::graph::{GraphWrite, VertexId};
use crate::utils::{CancellationToken, Interrupted, Threads};
use dsi_progress_logger::ProgressLog;

type EdgeCost<'a> = Box<dyn Fn(VertexId, VertexId) -> usize + Sync + 'a>;

/// Builder for [`ShortestPaths`].
///
/// Create a builder with [`ShortestPathsBuilder::new`], edit parameters with
/// its methods, then call [`ShortestPathsBuilder::build`] on it.
pub struct ShortestPathsBuilder<'a> {
    designated: Vec<VertexId>,
    follow_direction: bool,
    clear_selection: bool,
    threads: Threads,
    granularity: usize,
    edge_cost: Option<EdgeCost<'a>>,
}

impl<'a> ShortestPathsBuilder<'a> {
    /// The default number of designated vertices handled by each worker
    /// before another worker is added.
    pub const DEFAULT_GRANULARITY: usize = 10;

    /// Creates a new builder with default parameters.
    ///
    /// # Arguments
    /// * `designated`: the vertices between which paths are computed. The
    ///   order matters only when following directions, in which case the
    ///   first vertex is the source of all paths. Repeated vertices are
    ///   ignored.
    pub fn new(designated: &[VertexId]) -> Self {
        let mut unique = Vec::with_capacity(designated.len());
        for &vertex in designated {
            if !unique.contains(&vertex) {
                unique.push(vertex);
            }
        }
        Self {
            designated: unique,
            follow_direction: false,
            clear_selection: false,
            threads: Threads::Default,
            granularity: Self::DEFAULT_GRANULARITY,
            edge_cost: None,
        }
    }

    /// Sets whether transactions must be followed in their direction.
    ///
    /// If true, only paths starting from the first designated vertex are
    /// reported.
    pub fn with_follow_direction(mut self, follow_direction: bool) -> Self {
        self.follow_direction = follow_direction;
        self
    }

    /// Sets whether the existing selection is cleared before selecting the
    /// paths in [`ShortestPaths::run`].
    pub fn with_clear_selection(mut self, clear_selection: bool) -> Self {
        self.clear_selection = clear_selection;
        self
    }

    /// Sets the maximum number of worker threads of each phase.
    pub fn with_threads(mut self, threads: Threads) -> Self {
        self.threads = threads;
        self
    }

    /// Sets the number of work items below which adding a worker does not
    /// pay off.
    pub fn with_granularity(mut self, granularity: usize) -> Self {
        self.granularity = granularity.max(1);
        self
    }

    /// Sets the cost of moving from a vertex to an adjacent one.
    ///
    /// Without a cost function every transaction has unit cost, which is the
    /// only setting in which distances are hop counts.
    pub fn with_edge_cost(
        mut self,
        edge_cost: impl Fn(VertexId, VertexId) -> usize + Sync + 'a,
    ) -> Self {
        self.edge_cost = Some(Box::new(edge_cost));
        self
    }

    pub fn build(self) -> ShortestPaths<'a> {
        ShortestPaths {
            designated: self.designated,
            follow_direction: self.follow_direction,
            clear_selection: self.clear_selection,
            threads: self.threads,
            granularity: self.granularity,
            edge_cost: self.edge_cost,
        }
    }
}

/// Shortest paths between designated vertices, built with
/// [`ShortestPathsBuilder`].
pub struct ShortestPaths<'a> {
    designated: Vec<VertexId>,
    follow_direction: bool,
    clear_selection: bool,
    threads: Threads,
    granularity: usize,
    edge_cost: Option<EdgeCost<'a>>,
}

impl ShortestPaths<'_> {
    /// Returns the designated vertices, without repetitions.
    pub fn designated(&self) -> &[VertexId] {
        &self.designated
    }

    /// Computes distances, enumerates paths and selects them on the graph.
    ///
    /// Returns the enumerated paths, or [`Interrupted`] if `token` was
    /// cancelled, in which case the graph has not been modified.
    pub fn run<G: GraphWrite + Sync>(
        &self,
        graph: &mut G,
        token: &CancellationToken,
        pl: &mut impl ProgressLog,
    ) -> Result<PathCollection, Interrupted> {
        let table = self.distances(&*graph, token, pl)?;
        let paths = self.paths(&table, token, pl)?;
        apply_selection(graph, &paths, self.clear_selection);
        Ok(paths)
    }

    #[inline(always)]
    fn edge_cost(&self, from: VertexId, to: VertexId) -> usize {
        self.edge_cost.as_ref().map_or(1, |cost| cost(from, to))
    }

    /// Returns the first designated vertex if paths must be computed only
    /// from it.
    fn directed_source(&self) -> Option<VertexId> {
        if self.follow_direction {
            self.designated.first().copied()
        } else {
            None
        }
    }
}

/// Selects on `graph` all vertices and transactions lying on a shortest path
/// between two designated vertices.
///
/// This is a convenience wrapper around [`ShortestPaths`] with default
/// parameters.
///
/// # Arguments
/// * `graph`: the graph.
/// * `designated`: the designated vertices; if `follow_direction` is true,
///   the first one is the source of all paths.
/// * `follow_direction`: whether transactions must be followed in their
///   direction.
/// * `clear_existing_selection`: whether to deselect everything first.
/// * `token`: a cancellation token.
/// * `pl`: a progress logger.
pub fn compute_and_apply_paths<G: GraphWrite + Sync>(
    graph: &mut G,
    designated: &[VertexId],
    follow_direction: bool,
    clear_existing_selection: bool,
    token: &CancellationToken,
    pl: &mut impl ProgressLog,
) -> Result<PathCollection, Interrupted> {
    ShortestPathsBuilder::new(designated)
        .with_follow_direction(follow_direction)
        .with_clear_selection(clear_existing_selection)
        .build()
        .run(graph, token, pl)
}
