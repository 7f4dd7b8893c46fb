/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::{ElementType, GraphRead, GraphWrite, LinkId, TransactionId, VertexId};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy)]
struct Transaction {
    source: VertexId,
    destination: VertexId,
    directed: bool,
}

#[derive(Debug, Clone)]
struct Link {
    transactions: Vec<TransactionId>,
}

/// An in-memory graph.
///
/// Identifiers of all elements coincide with their positions, as elements
/// cannot be removed. Selection attributes are absent until created with
/// [`ensure_selection`](StoreGraph::ensure_selection).
///
/// # Examples
///
/// ```
/// use graph_path_select::graph::{ElementType, GraphRead, StoreGraph};
///
/// let mut graph = StoreGraph::with_vertices(3);
/// graph.add_transaction(0, 1, true);
/// graph.add_transaction(2, 1, false);
/// graph.ensure_selection(ElementType::Vertex);
///
/// assert_eq!(graph.neighbours(1).collect::<Vec<_>>(), vec![0, 2]);
/// assert_eq!(graph.successors(1).collect::<Vec<_>>(), vec![2]);
/// assert!(graph.has_selection(ElementType::Vertex));
/// assert!(!graph.has_selection(ElementType::Transaction));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StoreGraph {
    neighbours: Vec<Vec<VertexId>>,
    successors: Vec<Vec<VertexId>>,
    transactions: Vec<Transaction>,
    links: Vec<Link>,
    link_index: HashMap<(VertexId, VertexId), LinkId>,
    edge_index: HashMap<(VertexId, VertexId, bool), usize>,
    selection: [Option<Vec<bool>>; 4],
}

impl StoreGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a graph with `num_vertices` vertices and no transactions.
    pub fn with_vertices(num_vertices: usize) -> Self {
        let mut graph = Self::new();
        for _ in 0..num_vertices {
            graph.add_vertex();
        }
        graph
    }

    /// Creates a graph with `num_vertices` vertices and a transaction for
    /// each pair in `transactions`.
    pub fn from_transactions(
        num_vertices: usize,
        transactions: impl IntoIterator<Item = (VertexId, VertexId)>,
        directed: bool,
    ) -> Self {
        let mut graph = Self::with_vertices(num_vertices);
        for (source, destination) in transactions {
            graph.add_transaction(source, destination, directed);
        }
        graph
    }

    /// Adds a vertex and returns its identifier.
    pub fn add_vertex(&mut self) -> VertexId {
        let vertex = self.neighbours.len();
        self.neighbours.push(Vec::new());
        self.successors.push(Vec::new());
        self.grow_selection(ElementType::Vertex);
        vertex
    }

    /// Adds a transaction and returns its identifier.
    ///
    /// # Panics
    ///
    /// If one of the endpoints is not a vertex of the graph.
    pub fn add_transaction(
        &mut self,
        source: VertexId,
        destination: VertexId,
        directed: bool,
    ) -> TransactionId {
        let num_vertices = self.neighbours.len();
        assert!(
            source < num_vertices && destination < num_vertices,
            "Transaction ({}, {}) refers to a missing vertex (vertex count: {})",
            source,
            destination,
            num_vertices
        );

        let transaction = self.transactions.len();
        self.transactions.push(Transaction {
            source,
            destination,
            directed,
        });
        self.grow_selection(ElementType::Transaction);

        let key = (source.min(destination), source.max(destination));
        match self.link_index.get(&key) {
            Some(&link) => self.links[link].transactions.push(transaction),
            None => {
                self.link_index.insert(key, self.links.len());
                self.links.push(Link {
                    transactions: vec![transaction],
                });
                self.grow_selection(ElementType::Link);
            }
        }

        let edge_key = if directed {
            (source, destination, true)
        } else {
            (key.0, key.1, false)
        };
        if !self.edge_index.contains_key(&edge_key) {
            self.edge_index.insert(edge_key, self.edge_index.len());
            self.grow_selection(ElementType::Edge);
        }

        if source != destination {
            if !self.neighbours[source].contains(&destination) {
                self.neighbours[source].push(destination);
                self.neighbours[destination].push(source);
            }
            if !self.successors[source].contains(&destination) {
                self.successors[source].push(destination);
            }
            if !directed && !self.successors[destination].contains(&source) {
                self.successors[destination].push(source);
            }
        }

        transaction
    }

    /// Returns the source, destination and directedness of a transaction.
    pub fn transaction(&self, transaction: TransactionId) -> (VertexId, VertexId, bool) {
        let t = self.transactions[transaction];
        (t.source, t.destination, t.directed)
    }

    /// Adds a selection attribute to the elements of the given type, with all
    /// elements deselected. Does nothing if the attribute already exists.
    pub fn ensure_selection(&mut self, element: ElementType) {
        if self.selection[element as usize].is_none() {
            self.selection[element as usize] = Some(vec![false; self.element_count(element)]);
        }
    }

    /// Returns the identifiers of the selected elements of the given type, in
    /// increasing order.
    pub fn selected(&self, element: ElementType) -> Vec<usize> {
        match &self.selection[element as usize] {
            Some(flags) => flags
                .iter()
                .enumerate()
                .filter_map(|(id, &selected)| selected.then_some(id))
                .collect(),
            None => Vec::new(),
        }
    }

    fn grow_selection(&mut self, element: ElementType) {
        let count = self.element_count(element);
        if let Some(flags) = &mut self.selection[element as usize] {
            flags.resize(count, false);
        }
    }
}

impl GraphRead for StoreGraph {
    fn vertex_count(&self) -> usize {
        self.neighbours.len()
    }

    fn vertex(&self, position: usize) -> VertexId {
        position
    }

    fn vertex_position(&self, vertex: VertexId) -> usize {
        vertex
    }

    fn element_count(&self, element: ElementType) -> usize {
        match element {
            ElementType::Vertex => self.neighbours.len(),
            ElementType::Transaction => self.transactions.len(),
            ElementType::Edge => self.edge_index.len(),
            ElementType::Link => self.links.len(),
        }
    }

    fn element(&self, _element: ElementType, position: usize) -> usize {
        position
    }

    fn neighbours(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.neighbours[vertex].iter().copied()
    }

    fn successors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.successors[vertex].iter().copied()
    }

    fn neighbour_count(&self, vertex: VertexId) -> usize {
        self.neighbours[vertex].len()
    }

    fn link(&self, a: VertexId, b: VertexId) -> Option<LinkId> {
        self.link_index.get(&(a.min(b), a.max(b))).copied()
    }

    fn link_transactions(&self, link: LinkId) -> impl Iterator<Item = TransactionId> + '_ {
        self.links[link].transactions.iter().copied()
    }

    fn has_selection(&self, element: ElementType) -> bool {
        self.selection[element as usize].is_some()
    }

    fn is_selected(&self, element: ElementType, id: usize) -> bool {
        self.selection[element as usize]
            .as_ref()
            .is_some_and(|flags| flags[id])
    }
}

impl GraphWrite for StoreGraph {
    fn set_selected(&mut self, element: ElementType, id: usize, value: bool) {
        if let Some(flags) = &mut self.selection[element as usize] {
            flags[id] = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_group_transactions() {
        let mut graph = StoreGraph::with_vertices(3);
        let t0 = graph.add_transaction(0, 1, true);
        let t1 = graph.add_transaction(1, 0, true);
        let t2 = graph.add_transaction(1, 2, false);
        let _ = graph.add_transaction(1, 0, true);

        assert_eq!(graph.element_count(ElementType::Transaction), 4);
        assert_eq!(graph.element_count(ElementType::Link), 2);
        // 0->1, 1->0, 1-2
        assert_eq!(graph.element_count(ElementType::Edge), 3);

        let link = graph.link(1, 0).unwrap();
        assert_eq!(graph.link(0, 1), Some(link));
        assert_eq!(graph.link_transactions(link).take(2).collect::<Vec<_>>(), vec![t0, t1]);
        assert_eq!(graph.link(0, 2), None);
        assert_eq!(graph.transaction(t2), (1, 2, false));
    }

    #[test]
    fn test_neighbours_and_successors() {
        let mut graph = StoreGraph::with_vertices(4);
        graph.add_transaction(0, 1, true);
        graph.add_transaction(0, 1, true);
        graph.add_transaction(2, 0, true);
        graph.add_transaction(3, 3, true);

        assert_eq!(graph.neighbours(0).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(graph.successors(0).collect::<Vec<_>>(), vec![1]);
        assert_eq!(graph.successors(2).collect::<Vec<_>>(), vec![0]);
        assert_eq!(graph.neighbour_count(3), 0);
    }

    #[test]
    fn test_selection_grows_with_graph() {
        let mut graph = StoreGraph::with_vertices(2);
        graph.ensure_selection(ElementType::Vertex);
        graph.ensure_selection(ElementType::Transaction);
        let v = graph.add_vertex();
        let t = graph.add_transaction(0, v, false);
        graph.set_selected(ElementType::Vertex, v, true);
        graph.set_selected(ElementType::Transaction, t, true);
        graph.set_selected(ElementType::Link, 0, true);

        assert_eq!(graph.selected(ElementType::Vertex), vec![v]);
        assert_eq!(graph.selected(ElementType::Transaction), vec![t]);
        assert!(!graph.has_selection(ElementType::Link));
        assert!(!graph.is_selected(ElementType::Link, 0));
    }
}
