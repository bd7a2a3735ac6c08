//! Run-level work dispatch.
//!
//! Extraction is embarrassingly parallel: one task per run directory, no
//! shared mutable state, results keyed by run name.  With `workers == 1`
//! the runs are processed strictly sequentially in input order (useful for
//! deterministic debugging); with more workers a fixed-size rayon pool is
//! used.  Either way the output order is the input order, so scheduling
//! never affects the final collection.

use std::path::PathBuf;

use rayon::prelude::*;

use gp_core::{StatsConfig, StepNumber};

use crate::error::{StatsError, StatsResult};
use crate::extract::extract_run;
use crate::series::RunSeries;

/// One unit of work: a run directory and the run name scanned from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunTask {
    pub dir: PathBuf,
    pub run: String,
}

/// Extract every run, returning `(run name, series)` pairs in input order.
pub fn dispatch(
    tasks:   &[RunTask],
    steps:   &[StepNumber],
    config:  &StatsConfig,
    workers: usize,
) -> StatsResult<Vec<(String, RunSeries)>> {
    if workers <= 1 {
        return Ok(tasks
            .iter()
            .map(|t| (t.run.clone(), extract_run(&t.dir, &t.run, steps, config)))
            .collect());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| StatsError::WorkerPool(e.to_string()))?;

    // par_iter + collect preserves input order regardless of completion order.
    Ok(pool.install(|| {
        tasks
            .par_iter()
            .map(|t| (t.run.clone(), extract_run(&t.dir, &t.run, steps, config)))
            .collect()
    }))
}
