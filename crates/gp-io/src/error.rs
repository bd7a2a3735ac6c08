//! Ingestion error type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while scanning run directories or loading snapshots.
///
/// `Malformed`, `Empty`, and `Io` are the per-step recoverable kinds: the
/// extractor maps them to a sentinel record and moves on.  `NoSnapshots`
/// and `BadFilename` surface from directory scanning and abort the batch.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("{path}:{line}: {msg}")]
    Malformed {
        path: PathBuf,
        line: usize,
        msg:  String,
    },

    #[error("snapshot {0} contains no bodies")]
    Empty(PathBuf),

    #[error("no snapshot files found in {0}")]
    NoSnapshots(PathBuf),

    #[error("unrecognized snapshot filename: {0:?}")]
    BadFilename(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ReadResult<T> = Result<T, ReadError>;
