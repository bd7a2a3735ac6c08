//! End-to-end pipeline orchestration.
//!
//! 1. Scan every run directory up front, recovering run names and per-run
//!    step lists.  A directory with no snapshots, or a run name appearing
//!    twice, aborts the batch — only *per-step* failures are tolerated.
//! 2. The directory with the most snapshots defines the global step list;
//!    every series gets exactly that length, missing steps included.
//! 3. Dispatch extraction (sequential or pooled) and assemble the
//!    [`RunCollection`] keyed by run name in input order.
//! 4. Reduce into the seven quantile tables.
//!
//! The `time` column is quantile-reduced like every other field.  That is
//! meaningful only because all runs of one batch share the same output
//! cadence, so step index N maps to essentially the same simulation time
//! everywhere; the pipeline preserves this legacy behavior rather than
//! verifying it.

use std::path::PathBuf;

use rustc_hash::FxHashSet;
use tracing::info;

use gp_core::{StatsConfig, StepNumber};
use gp_io::scan_run_dir;

use crate::dispatch::{RunTask, dispatch};
use crate::error::{StatsError, StatsResult};
use crate::quantile::{QuantileTable, reduce};
use crate::series::RunCollection;

/// Everything one invocation produces: the full per-run collection plus the
/// seven cross-run quantile tables, ready for the persistence writer.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsBundle {
    pub collection: RunCollection,
    pub tables:     Vec<QuantileTable>,
}

/// Run the whole aggregation pipeline over `dirs` with `workers` threads.
pub fn run_pipeline(
    dirs:    &[PathBuf],
    config:  &StatsConfig,
    workers: usize,
) -> StatsResult<StatsBundle> {
    if dirs.is_empty() {
        return Err(StatsError::NoInput);
    }
    info!(n = dirs.len(), "reading run directories");

    // ── Scan all directories, derive tasks and the global step list ──────
    let mut tasks: Vec<RunTask> = Vec::with_capacity(dirs.len());
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut steps: Vec<StepNumber> = Vec::new();

    for dir in dirs {
        let scan = scan_run_dir(dir).map_err(|source| StatsError::Scan {
            dir: dir.clone(),
            source,
        })?;

        if !seen.insert(scan.run_name.clone()) {
            return Err(StatsError::DuplicateRun(scan.run_name));
        }

        // Longest step list wins; first wins ties.
        if scan.steps.len() > steps.len() {
            steps = scan.steps.clone();
        }

        tasks.push(RunTask {
            dir: dir.clone(),
            run: scan.run_name,
        });
    }
    info!(n = steps.len(), "global step list fixed");

    // ── Extract and assemble ──────────────────────────────────────────────
    let runs = dispatch(&tasks, &steps, config, workers)?;
    let collection = RunCollection::new(steps, runs);

    // ── Reduce ────────────────────────────────────────────────────────────
    info!("computing quantiles");
    let tables = reduce(&collection);

    Ok(StatsBundle { collection, tables })
}
