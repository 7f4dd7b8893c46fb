/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

//! Shortest paths between pairs of selected seeds.
//!
//! The selected vertices of the graph are the seeds. After a
//! [reachability flood](crate::algo::reachability) from the seeds, a
//! bulk-synchronous breadth-first search is run between each pair of
//! mutually reachable seeds; every vertex that sent information towards the
//! second seed along a shortest path is then marked, together with the link
//! it sent it through.
//!
//! A selected vertex with a single neighbour lies on a shortest path only
//! through that neighbour, so the neighbour takes its place as seed and the
//! leaf is marked directly once the neighbour is known to be on a path.

use crate::algo::reachability::ReachabilityFlooder;
use crate::algo::selection::select_link;
use crate::graph::{ElementType, GraphRead, GraphWrite, VertexId};
use crate::utils::{CancellationToken, Interrupted};
use dsi_progress_logger::ProgressLog;
use nonmax::NonMaxUsize;
use std::collections::{BTreeSet, HashMap, HashSet};
use sux::bits::BitVec;

/// The vertices and links to be selected, as computed by
/// [`PairwisePathMarker::mark`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkSet {
    vertices: BTreeSet<VertexId>,
    links: BTreeSet<(VertexId, VertexId)>,
}

impl MarkSet {
    /// Returns the marked vertices.
    pub fn vertices(&self) -> &BTreeSet<VertexId> {
        &self.vertices
    }

    /// Returns the marked links, each as a pair of endpoints with the
    /// smaller one first.
    pub fn links(&self) -> &BTreeSet<(VertexId, VertexId)> {
        &self.links
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.links.is_empty()
    }

    /// Selects the marked vertices and the transactions of the marked
    /// links. Nothing is ever deselected.
    ///
    /// Returns the number of marked links missing from `graph`, which are
    /// logged and skipped.
    pub fn apply(&self, graph: &mut impl GraphWrite) -> usize {
        if graph.has_selection(ElementType::Vertex) {
            for &vertex in &self.vertices {
                graph.set_selected(ElementType::Vertex, vertex, true);
            }
        }
        let missing = self
            .links
            .iter()
            .filter(|&&(a, b)| !select_link(graph, a, b))
            .count();
        log::debug!(
            "Applied {} marked vertices and {} marked links ({} missing)",
            self.vertices.len(),
            self.links.len(),
            missing
        );
        missing
    }

    fn mark_link(&mut self, a: VertexId, b: VertexId) {
        self.vertices.insert(a);
        self.vertices.insert(b);
        self.links.insert((a.min(b), a.max(b)));
    }
}

/// Builder for [`PairwisePathMarker`].
///
/// The parameters control the reachability flood run before the pairwise
/// searches; see [`ReachabilityFlooder`].
#[derive(Debug, Clone, Default)]
pub struct BetweennessPathsBuilder {
    flooder: ReachabilityFlooder,
}

impl BetweennessPathsBuilder {
    /// Creates a new builder with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of vertices above which only a sample of the seeds
    /// is flooded from.
    pub fn with_sample_threshold(mut self, sample_threshold: usize) -> Self {
        self.flooder = self.flooder.with_sample_threshold(sample_threshold);
        self
    }

    /// Sets the maximum number of seeds flooded from on large graphs.
    pub fn with_sample_size(mut self, sample_size: usize) -> Self {
        self.flooder = self.flooder.with_sample_size(sample_size);
        self
    }

    /// Sets the seed of the sampling pseudorandom number generator.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.flooder = self.flooder.with_seed(seed);
        self
    }

    pub fn build(self) -> PairwisePathMarker {
        PairwisePathMarker {
            flooder: self.flooder,
        }
    }
}

/// Marks the shortest paths between pairs of selected seeds, built with
/// [`BetweennessPathsBuilder`].
#[derive(Debug, Clone)]
pub struct PairwisePathMarker {
    flooder: ReachabilityFlooder,
}

/// A selected vertex with a single neighbour.
#[derive(Debug, Clone, Copy)]
struct Leaf {
    vertex: VertexId,
    neighbour: usize,
}

/// Per-pair search state, indexed by position.
struct SearchState {
    eccentricities: Vec<Option<NonMaxUsize>>,
    senders: Vec<Vec<usize>>,
    touched: Vec<usize>,
}

impl SearchState {
    fn new(num_vertices: usize) -> Self {
        Self {
            eccentricities: vec![None; num_vertices],
            senders: vec![Vec::new(); num_vertices],
            touched: Vec::new(),
        }
    }

    #[inline(always)]
    fn eccentricity(&self, position: usize) -> Option<usize> {
        self.eccentricities[position].map(|e| e.get())
    }

    fn visit(&mut self, position: usize, eccentricity: usize) {
        self.eccentricities[position] = Some(
            NonMaxUsize::new(eccentricity).expect("eccentricity should never be usize::MAX"),
        );
        self.touched.push(position);
    }

    fn reset(&mut self) {
        for &position in &self.touched {
            self.eccentricities[position] = None;
            self.senders[position].clear();
        }
        self.touched.clear();
    }
}

impl PairwisePathMarker {
    /// Computes the marks for the current vertex selection of `graph`.
    ///
    /// The graph is not modified; see [`run`](Self::run) to also apply the
    /// marks.
    ///
    /// # Arguments
    /// * `graph`: the graph; its selected vertices are the seeds.
    /// * `token`: a cancellation token, checked once per search round.
    /// * `pl`: a progress logger.
    pub fn mark(
        &self,
        graph: &impl GraphRead,
        token: &CancellationToken,
        pl: &mut impl ProgressLog,
    ) -> Result<MarkSet, Interrupted> {
        let mut marks = MarkSet::default();
        if !graph.has_selection(ElementType::Vertex) {
            log::debug!("No vertex selection attribute: nothing to mark");
            return Ok(marks);
        }

        let num_vertices = graph.vertex_count();
        let mut seeds = BTreeSet::new();
        let mut leaves = Vec::new();
        // How many selected vertices each seed stands for
        let mut represented: HashMap<usize, usize> = HashMap::new();
        for position in 0..num_vertices {
            let vertex = graph.vertex(position);
            if !graph.is_selected(ElementType::Vertex, vertex) {
                continue;
            }
            let mut neighbours = graph.neighbours(vertex);
            let seed = match (neighbours.next(), neighbours.next()) {
                (None, _) => continue,
                (Some(neighbour), None) => {
                    let neighbour = graph.vertex_position(neighbour);
                    leaves.push(Leaf { vertex, neighbour });
                    neighbour
                }
                (Some(_), Some(_)) => position,
            };
            seeds.insert(seed);
            *represented.entry(seed).or_default() += 1;
        }
        let seeds: Vec<usize> = seeds.into_iter().collect();
        log::debug!("{} seeds, {} leaves", seeds.len(), leaves.len());

        let reachability = self.flooder.flood_within(graph, &seeds, token, pl)?;
        let mut pairs = Vec::new();
        for (i, &one) in seeds.iter().enumerate() {
            for &two in &seeds[i + 1..] {
                if reachability.reaches(one, two) && reachability.reaches(two, one) {
                    pairs.push((one, two));
                }
            }
        }

        pl.item_name("pair");
        pl.expected_updates(Some(pairs.len()));
        pl.start("Searching shortest paths between seeds...");

        let mut state = SearchState::new(num_vertices);
        let mut on_path = HashSet::new();
        for &(one, two) in &pairs {
            if self.search(graph, one, two, &mut state, &mut marks, token)? {
                on_path.insert(one);
                on_path.insert(two);
            }
            state.reset();
            pl.light_update();
        }
        pl.done();

        for leaf in leaves {
            if on_path.contains(&leaf.neighbour) || represented[&leaf.neighbour] >= 2 {
                marks.mark_link(leaf.vertex, graph.vertex(leaf.neighbour));
            }
        }

        Ok(marks)
    }

    /// Computes the marks with [`mark`](Self::mark) and applies them to
    /// `graph`.
    ///
    /// If `token` is cancelled, the graph is not modified.
    pub fn run<G: GraphWrite>(
        &self,
        graph: &mut G,
        token: &CancellationToken,
        pl: &mut impl ProgressLog,
    ) -> Result<MarkSet, Interrupted> {
        let marks = self.mark(&*graph, token, pl)?;
        marks.apply(graph);
        Ok(marks)
    }

    /// Runs a bulk-synchronous breadth-first search from `one` until `two`
    /// is reached, then marks all shortest paths between them.
    ///
    /// Returns whether `two` was reached.
    fn search(
        &self,
        graph: &impl GraphRead,
        one: usize,
        two: usize,
        state: &mut SearchState,
        marks: &mut MarkSet,
        token: &CancellationToken,
    ) -> Result<bool, Interrupted> {
        state.visit(one, 0);
        let mut frontier = vec![one];
        let mut next = Vec::new();
        let mut round = 0;

        while state.eccentricity(two).is_none() {
            token.check()?;
            for &u in &frontier {
                for neighbour in graph.neighbours(graph.vertex(u)) {
                    let v = graph.vertex_position(neighbour);
                    match state.eccentricity(v) {
                        None => {
                            state.visit(v, round + 1);
                            state.senders[v].push(u);
                            next.push(v);
                        }
                        Some(eccentricity) if eccentricity == round + 1 => {
                            state.senders[v].push(u);
                        }
                        Some(_) => {}
                    }
                }
            }
            if next.is_empty() {
                log::warn!(
                    "Abandoning search from {} to {}: no vertex left to discover",
                    graph.vertex(one),
                    graph.vertex(two)
                );
                return Ok(false);
            }
            std::mem::swap(&mut frontier, &mut next);
            next.clear();
            round += 1;
        }

        // Walk back from the goal through the senders
        let mut walked = BitVec::new(graph.vertex_count());
        let mut stack = vec![two];
        walked.set(two, true);
        while let Some(u) = stack.pop() {
            let Some(eccentricity) = state.eccentricity(u) else {
                continue;
            };
            for &s in &state.senders[u] {
                if state.eccentricity(s).map(|e| e + 1) != Some(eccentricity) {
                    continue;
                }
                marks.mark_link(graph.vertex(u), graph.vertex(s));
                if !walked[s] {
                    walked.set(s, true);
                    stack.push(s);
                }
            }
        }
        Ok(true)
    }
}

/// Selects on `graph` all vertices and transactions lying on a shortest path
/// between two mutually reachable selected vertices.
///
/// This is a convenience wrapper around [`PairwisePathMarker`] with default
/// parameters. The existing selection is kept.
pub fn compute_and_apply_betweenness_paths<G: GraphWrite>(
    graph: &mut G,
    token: &CancellationToken,
    pl: &mut impl ProgressLog,
) -> Result<MarkSet, Interrupted> {
    BetweennessPathsBuilder::new().build().run(graph, token, pl)
}
