/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Application of computed paths to the selection flags of a graph.

use crate::algo::shortest_paths::PathCollection;
use crate::graph::{ElementType, GraphWrite, VertexId};

/// Deselects every element whose type carries a selection attribute.
pub fn clear_selection(graph: &mut impl GraphWrite) {
    for element in ElementType::ALL {
        if !graph.has_selection(element) {
            continue;
        }
        for position in 0..graph.element_count(element) {
            let id = graph.element(element, position);
            graph.set_selected(element, id, false);
        }
    }
}

/// Selects all vertices of `paths` and the transactions of the links
/// between consecutive vertices.
///
/// If `clear` is true, the existing selection is cleared first; otherwise
/// selection only grows. A missing link between consecutive vertices is
/// logged and skipped.
pub fn apply_selection(graph: &mut impl GraphWrite, paths: &PathCollection, clear: bool) {
    if clear {
        clear_selection(graph);
    }
    let select_vertices = graph.has_selection(ElementType::Vertex);
    let mut missing = 0;

    for path in paths.iter() {
        if select_vertices {
            for &vertex in path {
                graph.set_selected(ElementType::Vertex, vertex, true);
            }
        }
        for pair in path.windows(2) {
            if !select_link(graph, pair[0], pair[1]) {
                missing += 1;
            }
        }
    }

    log::debug!(
        "Selected {} paths ({} missing links)",
        paths.len(),
        missing
    );
}

/// Selects the transactions of the link between `a` and `b`, if the graph
/// has a transaction selection attribute.
///
/// Returns false, after logging the fault, if there is no such link.
pub(crate) fn select_link(graph: &mut impl GraphWrite, a: VertexId, b: VertexId) -> bool {
    let Some(link) = graph.link(a, b) else {
        log::error!("No link between path-adjacent vertices {} and {}", a, b);
        return false;
    };
    if graph.has_selection(ElementType::Transaction) {
        let transactions: Vec<_> = graph.link_transactions(link).collect();
        for transaction in transactions {
            graph.set_selected(ElementType::Transaction, transaction, true);
        }
    }
    true
}
