// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders a stock-price CSV as a trellis of area charts.
//!
//! ```text
//! trellis_demo trellis_demo/data/stock_prices.csv -o trellis.svg
//! ```
//!
//! Set `RUST_LOG=trellis_charts=trace` to follow the layout panel by panel.

mod config;
mod loader;
mod svg;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use trellis_charts::assemble_trellis;

use crate::config::Config;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// CSV file with `company`, `date` and `price` columns.
    data: PathBuf,
    /// TOML file overriding the layout, colors and labels.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Where to write the SVG.
    #[arg(short, long, default_value = "trellis.svg")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    let spec = config.to_spec().context("invalid config")?;

    let dataset = loader::load_path(&cli.data)
        .with_context(|| format!("loading {}", cli.data.display()))?;

    let trellis = assemble_trellis(&dataset, &spec).context("laying out the trellis")?;
    let marks = trellis.marks();
    let svg = svg::to_svg_string(&marks, trellis.view.surface);

    std::fs::write(&cli.output, svg)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    tracing::info!(
        panels = trellis.panels.len(),
        marks = marks.len(),
        output = %cli.output.display(),
        "wrote trellis"
    );
    Ok(())
}
