/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Random graphs for tests and benchmarks.

use super::{ElementType, GraphRead, StoreGraph, VertexId};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Returns a random Erdős–Rényi graph with `num_vertices` vertices in which
/// each ordered pair of distinct vertices is connected by a transaction with
/// probability `p`.
///
/// Vertex and transaction selection attributes are created, with nothing
/// selected.
///
/// # Arguments
/// * `num_vertices`: the number of vertices.
/// * `p`: the probability of each transaction.
/// * `directed`: whether transactions are directed.
/// * `seed`: the seed of the pseudorandom number generator.
pub fn erdos_renyi(num_vertices: usize, p: f64, directed: bool, seed: u64) -> StoreGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut graph = StoreGraph::with_vertices(num_vertices);
    graph.ensure_selection(ElementType::Vertex);
    graph.ensure_selection(ElementType::Transaction);
    for source in 0..num_vertices {
        for destination in 0..num_vertices {
            if source != destination && rng.random_bool(p) {
                graph.add_transaction(source, destination, directed);
            }
        }
    }
    graph
}

/// Returns `k` distinct vertices of `graph` chosen uniformly at random, in
/// random order.
pub fn sample_vertices(graph: &impl GraphRead, k: usize, seed: u64) -> Vec<VertexId> {
    let mut rng = StdRng::seed_from_u64(seed);
    let num_vertices = graph.vertex_count();
    rand::seq::index::sample(&mut rng, num_vertices, k.min(num_vertices))
        .into_iter()
        .map(|position| graph.vertex(position))
        .collect()
}
