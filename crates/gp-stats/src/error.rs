//! Aggregator error type.
//!
//! Per-step load failures never appear here — those are absorbed by the
//! extractor's sentinel policy.  Everything in this enum is a batch-level
//! failure that aborts the whole invocation.

use std::path::PathBuf;

use thiserror::Error;

use gp_io::ReadError;

/// Errors produced by the statistics pipeline.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("no run directories given")]
    NoInput,

    #[error("scanning {dir}: {source}")]
    Scan {
        dir:    PathBuf,
        #[source]
        source: ReadError,
    },

    #[error("duplicate run name {0:?} across input directories")]
    DuplicateRun(String),

    #[error("worker pool: {0}")]
    WorkerPool(String),
}

pub type StatsResult<T> = Result<T, StatsError>;
