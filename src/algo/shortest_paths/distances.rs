/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use super::ShortestPaths;
use crate::algo::fibonacci_heap::{EntryHandle, FibonacciHeap};
use crate::graph::{GraphRead, VertexId};
use crate::utils::{partition, CancellationToken, Interrupted, Threads};
use dsi_progress_logger::ProgressLog;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::sync::mpsc;
use sux::bits::BitVec;

/// The tentative distance of vertices not reached yet.
pub const UNREACHABLE: usize = usize::MAX;

/// The outcome of a Dijkstra search from a single source.
#[derive(Debug, Clone, Default)]
pub struct SourceSearch {
    distances: HashMap<VertexId, usize>,
    /// For each reached vertex other than the source, all the vertices
    /// through which it is reached at minimum distance, in order of
    /// discovery.
    predecessors: HashMap<VertexId, Vec<VertexId>>,
}

impl SourceSearch {
    /// Returns the distance of `vertex` from the source, or `None` if the
    /// vertex was not reached.
    pub fn distance(&self, vertex: VertexId) -> Option<usize> {
        self.distances.get(&vertex).copied()
    }

    /// Returns the predecessors of `vertex` on shortest paths from the
    /// source.
    pub fn predecessors(&self, vertex: VertexId) -> &[VertexId] {
        self.predecessors
            .get(&vertex)
            .map_or(&[], |predecessors| predecessors.as_slice())
    }

    /// Returns the number of vertices reached, including the source.
    pub fn num_reached(&self) -> usize {
        self.distances.len()
    }
}

/// The distances from each designated vertex that reaches at least another
/// designated vertex.
///
/// Sources are kept in designated order.
#[derive(Debug, Clone, Default)]
pub struct DistanceTable {
    entries: Vec<(VertexId, SourceSearch)>,
    index: HashMap<VertexId, usize>,
}

impl DistanceTable {
    fn from_slots(designated: &[VertexId], slots: Vec<Option<SourceSearch>>) -> Self {
        let entries: Vec<_> = designated
            .iter()
            .zip(slots)
            .filter_map(|(&source, slot)| slot.map(|search| (source, search)))
            .collect();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, (source, _))| (*source, i))
            .collect();
        Self { entries, index }
    }

    /// Returns the number of sources in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the sources in the table, in designated order.
    pub fn sources(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.entries.iter().map(|(source, _)| *source)
    }

    /// Returns the search from `source`, if `source` is in the table.
    pub fn search(&self, source: VertexId) -> Option<&SourceSearch> {
        self.index.get(&source).map(|&i| &self.entries[i].1)
    }

    /// Returns the distance from `source` to `target`.
    pub fn distance(&self, source: VertexId, target: VertexId) -> Option<usize> {
        self.search(source)?.distance(target)
    }

    pub(super) fn entries(&self) -> &[(VertexId, SourceSearch)] {
        &self.entries
    }
}

impl ShortestPaths<'_> {
    /// Runs a Dijkstra search from each designated vertex.
    ///
    /// Designated vertices are split in contiguous ranges among
    /// `min(threads, ⌈n / granularity⌉)` workers. Each worker is the only
    /// writer of the results of its range, and the method returns only after
    /// all workers completed.
    ///
    /// # Arguments
    /// * `graph`: the graph.
    /// * `token`: a cancellation token, checked before each extraction from
    ///   the priority queue.
    /// * `pl`: a progress logger.
    pub fn distances<G: GraphRead + Sync>(
        &self,
        graph: &G,
        token: &CancellationToken,
        pl: &mut impl ProgressLog,
    ) -> Result<DistanceTable, Interrupted> {
        let designated = self.designated.as_slice();
        let num_sources = designated.len();
        pl.item_name("source");
        pl.expected_updates(Some(num_sources));
        pl.start("Computing distances from designated vertices...");

        let ranges = partition(num_sources, self.threads.num_threads(), self.granularity);
        if ranges.is_empty() {
            pl.done();
            return Ok(DistanceTable::default());
        }
        let load = ranges[0].len();
        log::debug!(
            "Distance phase: {} sources, {} workers",
            num_sources,
            ranges.len()
        );

        let targets: HashSet<VertexId> = designated.iter().copied().collect();
        let mut slots: Vec<Option<SourceSearch>> = vec![None; num_sources];
        let mut outcomes: Vec<Result<(), Interrupted>> = vec![Ok(()); ranges.len()];
        let thread_pool = Threads::NumThreads(ranges.len()).build("distance");

        let (done_tx, done_rx) = mpsc::channel::<()>();
        thread_pool.in_place_scope(|scope| {
            for ((sources, slots), outcome) in designated
                .chunks(load)
                .zip(slots.chunks_mut(load))
                .zip(outcomes.iter_mut())
            {
                let targets = &targets;
                let done_tx = done_tx.clone();
                scope.spawn(move |_| {
                    *outcome = sources
                        .iter()
                        .zip(slots.iter_mut())
                        .try_for_each(|(&source, slot)| {
                            *slot = self.search_from(graph, source, targets, token)?;
                            let _ = done_tx.send(());
                            Ok(())
                        });
                });
            }
            drop(done_tx);
            // Ends when every worker has returned
            for () in done_rx {
                pl.light_update();
            }
        });
        outcomes.into_iter().collect::<Result<(), Interrupted>>()?;

        let table = DistanceTable::from_slots(designated, slots);
        log::debug!(
            "{} of {} sources reach another designated vertex, {} vertices reached overall",
            table.len(),
            num_sources,
            table
                .entries()
                .iter()
                .map(|(_, search)| search.num_reached())
                .sum::<usize>()
        );
        pl.done();
        Ok(table)
    }

    /// Dijkstra search from `source`.
    ///
    /// Returns `None` if no designated vertex other than `source` is reached.
    fn search_from(
        &self,
        graph: &impl GraphRead,
        source: VertexId,
        targets: &HashSet<VertexId>,
        token: &CancellationToken,
    ) -> Result<Option<SourceSearch>, Interrupted> {
        let num_vertices = graph.vertex_count();
        let mut queue = FibonacciHeap::with_capacity(num_vertices);
        let entries: Vec<EntryHandle> = (0..num_vertices)
            .map(|position| queue.insert(graph.vertex(position), UNREACHABLE))
            .collect();
        queue
            .decrease_key(entries[graph.vertex_position(source)], 0)
            .expect("a fresh entry can always be decreased to zero");

        let mut finalized = BitVec::new(num_vertices);
        let mut search = SourceSearch::default();
        let mut neighbours = Vec::new();

        loop {
            token.check()?;
            let Some((vertex, distance)) = queue.extract_min() else {
                break;
            };
            if distance == UNREACHABLE {
                // All remaining vertices are in other components
                break;
            }
            finalized.set(graph.vertex_position(vertex), true);
            search.distances.insert(vertex, distance);

            neighbours.clear();
            if self.follow_direction {
                neighbours.extend(graph.successors(vertex));
            } else {
                neighbours.extend(graph.neighbours(vertex));
            }

            for &neighbour in &neighbours {
                let position = graph.vertex_position(neighbour);
                if neighbour == source || finalized[position] {
                    continue;
                }
                let candidate = distance.saturating_add(self.edge_cost(vertex, neighbour));
                let entry = entries[position];
                let Some(current) = queue.priority(entry) else {
                    continue;
                };
                if candidate == UNREACHABLE {
                    continue;
                }
                match candidate.cmp(&current) {
                    Ordering::Less => {
                        queue
                            .decrease_key(entry, candidate)
                            .expect("the candidate distance is smaller than the current one");
                        search.predecessors.insert(neighbour, vec![vertex]);
                    }
                    Ordering::Equal => {
                        search.predecessors.entry(neighbour).or_default().push(vertex);
                    }
                    Ordering::Greater => {}
                }
            }
        }

        let reached = targets
            .iter()
            .filter(|&&target| target != source && search.distances.contains_key(&target))
            .count();
        Ok((reached > 0).then_some(search))
    }
}
