/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::Result;
use dsi_progress_logger::prelude::*;
use graph_path_select::algo::reachability::*;
use graph_path_select::graph::random::erdos_renyi;
use graph_path_select::graph::*;
use graph_path_select::utils::{CancellationToken, Interrupted};

/// Labels each vertex with the smallest vertex of its weakly connected
/// component.
fn components(graph: &impl GraphRead) -> Vec<usize> {
    let n = graph.vertex_count();
    let mut label = vec![usize::MAX; n];
    for root in 0..n {
        if label[root] != usize::MAX {
            continue;
        }
        label[root] = root;
        let mut stack = vec![root];
        while let Some(curr) = stack.pop() {
            for succ in graph.neighbours(curr) {
                if label[succ] == usize::MAX {
                    label[succ] = root;
                    stack.push(succ);
                }
            }
        }
    }
    label
}

#[test]
fn test_symmetric_on_random_graphs() -> Result<()> {
    for (seed, directed) in [(0, false), (1, true), (2, true)] {
        let graph = erdos_renyi(120, 0.008, directed, seed);
        let reachability =
            ReachabilityFlooder::new().flood(&graph, &CancellationToken::new(), no_logging![])?;
        let label = components(&graph);

        for u in 0..graph.vertex_count() {
            if graph.neighbour_count(u) == 0 {
                assert!(reachability.set(u).is_empty());
                continue;
            }
            for v in 0..graph.vertex_count() {
                assert_eq!(reachability.reaches(u, v), reachability.reaches(v, u));
                let connected = label[u] == label[v];
                assert_eq!(reachability.reaches(u, v), connected, "{} {}", u, v);
            }
        }
    }
    Ok(())
}

#[test]
fn test_direction_is_ignored() -> Result<()> {
    // Two components: 0 -> 1 <- 2 and 3 -> 4
    let graph = StoreGraph::from_transactions(6, [(0, 1), (2, 1), (3, 4)], true);
    let reachability =
        ReachabilityFlooder::new().flood(&graph, &CancellationToken::new(), no_logging![])?;

    assert!(reachability.reaches(0, 2));
    assert!(reachability.reaches(2, 0));
    assert!(reachability.reaches(4, 3));
    assert!(!reachability.reaches(0, 3));
    assert_eq!(reachability.set(1).iter_ones().collect::<Vec<_>>(), vec![0, 1, 2]);
    // Isolated vertices are not flooded from
    assert!(reachability.set(5).is_empty());
    Ok(())
}

#[test]
fn test_flood_from_roots() -> Result<()> {
    let graph = StoreGraph::from_transactions(5, [(0, 1), (1, 2), (3, 4)], false);
    let reachability = ReachabilityFlooder::new().flood_from(
        &graph,
        &[1],
        &CancellationToken::new(),
        no_logging![],
    )?;
    for u in 0..3 {
        assert_eq!(reachability.set(u).count_ones(), 3);
    }
    assert!(reachability.set(3).is_empty());
    assert!(reachability.set(4).is_empty());
    Ok(())
}

#[test]
fn test_empty_graph() -> Result<()> {
    let graph = StoreGraph::new();
    let reachability =
        ReachabilityFlooder::new().flood(&graph, &CancellationToken::new(), no_logging![])?;
    assert!(reachability.is_empty());
    assert_eq!(reachability.num_rounds(), 0);
    Ok(())
}

#[test]
fn test_cancelled() {
    let graph = StoreGraph::from_transactions(3, [(0, 1), (1, 2)], false);
    let token = CancellationToken::new();
    token.cancel();
    let result = ReachabilityFlooder::new().flood(&graph, &token, no_logging![]);
    assert!(matches!(result, Err(Interrupted)));
}
