//! extract-stats — aggregate disk mass and particle counts across runs.
//!
//! Reads a newline-delimited list of run directories from stdin, extracts
//! one time series per run (in parallel if requested), reduces them into
//! cross-run quantile tables, and persists everything to a single keyed
//! container.
//!
//! ```text
//! extract-stats -j 8 --output ./summary < dirlist
//! ```
//!
//! where `dirlist` looks like:
//!
//! ```text
//! /path/to/run_01
//! /path/to/run_02
//! ...
//! ```

use std::io::{IsTerminal, Read};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;

use gp_core::StatsConfig;
use gp_output::{CsvStore, ParquetStore, SqliteStore, persist_bundle};
use gp_stats::run_pipeline;

#[derive(Parser)]
#[command(name = "extract-stats")]
#[command(about = "Cross-run disk mass and particle count statistics", long_about = None)]
struct Args {
    /// Number of worker threads for per-run extraction.
    #[arg(short = 'j', long, default_value_t = 1)]
    workers: usize,

    /// Directory the container is written into.
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Persistence backend.
    #[arg(long, value_enum, default_value = "sqlite")]
    format: Format,
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
enum Format {
    Sqlite,
    Csv,
    Parquet,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();

    // ── Directory list from stdin ─────────────────────────────────────────
    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        bail!("no directory list on stdin (pipe in one run directory per line)");
    }

    let mut input = String::new();
    stdin
        .lock()
        .read_to_string(&mut input)
        .context("reading directory list from stdin")?;

    let dirs: Vec<PathBuf> = input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect();

    // ── Extract and reduce ────────────────────────────────────────────────
    let config = StatsConfig::default();
    let bundle = run_pipeline(&dirs, &config, args.workers)?;

    // ── Persist ───────────────────────────────────────────────────────────
    info!(dir = %args.output.display(), format = ?args.format, "saving");
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating output directory {}", args.output.display()))?;

    match args.format {
        Format::Sqlite => {
            let mut store = SqliteStore::create(&args.output)?;
            persist_bundle(&mut store, &bundle)?;
        }
        Format::Csv => {
            let mut store = CsvStore::create(&args.output)?;
            persist_bundle(&mut store, &bundle)?;
        }
        Format::Parquet => {
            let mut store = ParquetStore::create(&args.output)?;
            persist_bundle(&mut store, &bundle)?;
        }
    }

    info!(
        runs = bundle.collection.len(),
        steps = bundle.collection.steps().len(),
        "done"
    );
    Ok(())
}
