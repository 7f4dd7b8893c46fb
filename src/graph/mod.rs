/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! The graph collaborator.
//!
//! The algorithms of this crate do not own a graph: they work on a
//! read/write session over a graph that is already locked by the caller,
//! accessed through [`GraphRead`] and [`GraphWrite`]. [`StoreGraph`] is an
//! in-memory implementation.
//!
//! A graph has four kinds of elements. Vertices are connected by
//! *transactions*, which may be directed or undirected; transactions with the
//! same endpoints and the same direction form an *edge*, and all transactions
//! between two vertices, irrespective of direction, form a *link*.

mod store;
pub use store::StoreGraph;

pub mod random;

/// The identifier of a vertex, stable for the duration of a session.
///
/// Identifiers are distinct from positions, which are dense indices in
/// `0..vertex_count()`.
pub type VertexId = usize;
/// The identifier of a link.
pub type LinkId = usize;
/// The identifier of a transaction.
pub type TransactionId = usize;

/// The kinds of graph elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    Vertex = 0,
    Transaction = 1,
    Edge = 2,
    Link = 3,
}

impl ElementType {
    /// All element types.
    pub const ALL: [ElementType; 4] = [
        ElementType::Vertex,
        ElementType::Transaction,
        ElementType::Edge,
        ElementType::Link,
    ];
}

/// Read access to a graph.
pub trait GraphRead {
    /// Returns the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Returns the identifier of the vertex at the given position.
    fn vertex(&self, position: usize) -> VertexId;

    /// Returns the position of the given vertex.
    fn vertex_position(&self, vertex: VertexId) -> usize;

    /// Returns the number of elements of the given type.
    fn element_count(&self, element: ElementType) -> usize;

    /// Returns the identifier of the element of the given type at the given
    /// position.
    fn element(&self, element: ElementType, position: usize) -> usize;

    /// Returns the vertices adjacent to `vertex` through a transaction of any
    /// direction, each one once. Self-loops are not reported.
    fn neighbours(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_;

    /// Returns the vertices that can be reached from `vertex` by following a
    /// single transaction in its direction, each one once. Undirected
    /// transactions can be followed both ways. Self-loops are not reported.
    fn successors(&self, vertex: VertexId) -> impl Iterator<Item = VertexId> + '_;

    /// Returns the number of [neighbours](GraphRead::neighbours) of `vertex`.
    fn neighbour_count(&self, vertex: VertexId) -> usize {
        self.neighbours(vertex).count()
    }

    /// Returns the link between two vertices, if any.
    fn link(&self, a: VertexId, b: VertexId) -> Option<LinkId>;

    /// Returns the transactions forming a link.
    fn link_transactions(&self, link: LinkId) -> impl Iterator<Item = TransactionId> + '_;

    /// Returns whether elements of the given type carry a selection
    /// attribute.
    ///
    /// A missing attribute means that the feature is not present: reads
    /// return false, and writes are skipped by the algorithms.
    fn has_selection(&self, element: ElementType) -> bool;

    /// Returns whether the given element is selected.
    fn is_selected(&self, element: ElementType, id: usize) -> bool;
}

/// Write access to a graph.
pub trait GraphWrite: GraphRead {
    /// Sets the selection flag of an element.
    ///
    /// The caller must check [`has_selection`](GraphRead::has_selection)
    /// first.
    fn set_selected(&mut self, element: ElementType, id: usize, value: bool);
}
