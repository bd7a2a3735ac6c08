//! Snapshot filename convention and run-directory scanning.
//!
//! # Convention
//!
//! ```text
//! Out_<run_name>_<step:012>.dat
//! ```
//!
//! e.g. `Out_run_03_000057000000.dat` → run name `run_03`, step 57 000 000.
//! The run name itself may contain underscores; the step segment is always
//! the final underscore-separated field and is always 12 digits.

use std::path::{Path, PathBuf};

use gp_core::StepNumber;

use crate::error::{ReadError, ReadResult};

const PREFIX: &str = "Out_";
const EXT: &str = ".dat";
const STEP_DIGITS: usize = 12;

// ── Filename construction ─────────────────────────────────────────────────────

/// Build the snapshot filename for `run` at `step`.
pub fn snapshot_filename(run: &str, step: StepNumber) -> String {
    format!("{PREFIX}{run}_{step}{EXT}")
}

/// Full path of the snapshot for `run` at `step` inside `dir`.
pub fn snapshot_path(dir: &Path, run: &str, step: StepNumber) -> PathBuf {
    dir.join(snapshot_filename(run, step))
}

// ── Filename parsing ──────────────────────────────────────────────────────────

/// Split a snapshot filename into its run name and step number.
///
/// Returns `BadFilename` for anything that does not match the convention,
/// including a step segment that is not exactly 12 digits.
pub fn parse_snapshot_filename(name: &str) -> ReadResult<(String, StepNumber)> {
    let bad = || ReadError::BadFilename(name.to_owned());

    let stem = name
        .strip_prefix(PREFIX)
        .and_then(|s| s.strip_suffix(EXT))
        .ok_or_else(bad)?;

    let (run, step) = stem.rsplit_once('_').ok_or_else(bad)?;
    if run.is_empty() || step.len() != STEP_DIGITS {
        return Err(bad());
    }

    let n: u64 = step.parse().map_err(|_| bad())?;
    Ok((run.to_owned(), StepNumber(n)))
}

// ── Directory scanning ────────────────────────────────────────────────────────

/// Result of scanning one run directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunScan {
    /// Run name embedded in the snapshot filenames.  Taken from the
    /// lexicographically first snapshot, matching the original tooling.
    pub run_name: String,
    /// Available step numbers, sorted ascending, deduplicated.
    pub steps: Vec<StepNumber>,
}

/// Scan `dir` for snapshot files and recover the run name and step list.
///
/// Files that do not match the naming convention are ignored; a directory
/// with no matching files at all is an error (`NoSnapshots`), which the
/// dispatcher propagates to abort the whole batch.
pub fn scan_run_dir(dir: &Path) -> ReadResult<RunScan> {
    let mut names: Vec<String> = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if let Some(name) = entry.file_name().to_str() {
            if name.starts_with(PREFIX) && name.ends_with(EXT) {
                names.push(name.to_owned());
            }
        }
    }
    names.sort();

    let mut run_name: Option<String> = None;
    let mut steps: Vec<StepNumber> = Vec::new();

    for name in &names {
        let Ok((run, step)) = parse_snapshot_filename(name) else {
            continue;
        };
        run_name.get_or_insert(run);
        steps.push(step);
    }

    let Some(run_name) = run_name else {
        return Err(ReadError::NoSnapshots(dir.to_path_buf()));
    };

    steps.sort();
    steps.dedup();

    Ok(RunScan { run_name, steps })
}
