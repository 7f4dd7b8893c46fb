/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

pub mod algo;
pub mod graph;
pub mod utils;

/// Module exposing all traits in a single level.
pub mod traits {
    pub use crate::graph::{GraphRead, GraphWrite};
}

/// Use `use graph_path_select::prelude::*;` to import common utilities,
/// modules and all traits.
pub mod prelude {
    use super::*;
    pub use algo::betweenness_paths::{
        compute_and_apply_betweenness_paths, BetweennessPathsBuilder, MarkSet, PairwisePathMarker,
    };
    pub use algo::reachability::{Reachability, ReachabilityFlooder};
    pub use algo::selection::{apply_selection, clear_selection};
    pub use algo::shortest_paths::{
        compute_and_apply_paths, DistanceTable, PathCollection, ShortestPaths, ShortestPathsBuilder,
    };
    pub use graph::{ElementType, StoreGraph, VertexId};
    pub use traits::*;
    pub use utils::{CancellationToken, Interrupted, Threads};
}
