//! The `StatsWriter` trait implemented by all backend stores.

use gp_core::StepNumber;
use gp_stats::{QuantileTable, RunSeries, StatsBundle};

use crate::OutputResult;

/// Trait implemented by the SQLite, CSV, and Parquet stores.
///
/// `steps` carries the global step-number list; `series.len()` and
/// `table.records.len()` always equal `steps.len()`.
pub trait StatsWriter {
    /// Write one run's full series under its run name.
    fn write_run_series(
        &mut self,
        run:    &str,
        steps:  &[StepNumber],
        series: &RunSeries,
    ) -> OutputResult<()>;

    /// Write one quantile table under its level key.
    fn write_quantile_table(
        &mut self,
        steps: &[StepNumber],
        table: &QuantileTable,
    ) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

/// Persist a whole pipeline result: every run series, all seven quantile
/// tables, then `finish()`.
pub fn persist_bundle<W: StatsWriter>(writer: &mut W, bundle: &StatsBundle) -> OutputResult<()> {
    let steps = bundle.collection.steps();

    for (run, series) in bundle.collection.iter() {
        writer.write_run_series(run, steps, series)?;
    }
    for table in &bundle.tables {
        writer.write_quantile_table(steps, table)?;
    }
    writer.finish()
}
