/*
 * SPDX-FileCopyrightText: 2024 Matteo Dell'Acqua
 * SPDX-FileCopyrightText: 2025 Sebastiano Vigna
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */

use anyhow::{bail, Context, Result};
use dsi_progress_logger::prelude::*;
use graph_path_select::graph::random::{erdos_renyi, sample_vertices};
use graph_path_select::prelude::*;

fn arg<T: std::str::FromStr>(index: usize, name: &str) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    std::env::args()
        .nth(index)
        .with_context(|| format!("No {} provided", name))?
        .parse()
        .with_context(|| format!("Cannot parse {}", name))
}

fn main() -> Result<()> {
    stderrlog::new()
        .verbosity(2)
        .timestamp(stderrlog::Timestamp::Second)
        .init()?;
    let operation: String = arg(1, "operation")?;
    let num_vertices: usize = arg(2, "number of vertices")?;
    let p: f64 = arg(3, "transaction probability")?;
    let seed: u64 = arg(4, "seed")?;
    let k: usize = arg(5, "number of designated vertices")?;

    let mut main_pl = progress_logger![display_memory = true];
    main_pl.info(format_args!(
        "Generating a random graph with {} vertices...",
        num_vertices
    ));
    let mut graph = erdos_renyi(num_vertices, p, false, seed);
    let designated = sample_vertices(&graph, k, seed.wrapping_add(1));
    let token = CancellationToken::new();

    match operation.as_str() {
        "paths" => {
            let paths =
                compute_and_apply_paths(&mut graph, &designated, false, true, &token, &mut main_pl)?;
            main_pl.info(format_args!(
                "Found {} shortest paths to {} targets",
                paths.len(),
                paths.targets().count()
            ));
        }
        "betweenness" => {
            for &vertex in &designated {
                graph.set_selected(ElementType::Vertex, vertex, true);
            }
            let marks = compute_and_apply_betweenness_paths(&mut graph, &token, &mut main_pl)?;
            main_pl.info(format_args!(
                "Marked {} vertices and {} links",
                marks.vertices().len(),
                marks.links().len()
            ));
        }
        other => bail!("Unknown operation {}: expected paths or betweenness", other),
    }

    main_pl.info(format_args!(
        "{} vertices and {} transactions selected",
        graph.selected(ElementType::Vertex).len(),
        graph.selected(ElementType::Transaction).len()
    ));
    Ok(())
}
