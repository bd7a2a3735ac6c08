//! Per-run statistics extraction.
//!
//! For each step number in the global list, load the run's snapshot and
//! aggregate it into one [`StepStats`].  A step whose file is missing or
//! malformed yields `None` and processing continues — the silent-skip
//! policy of the original tooling, made explicit as an `Option` instead of
//! a NaN-filled row.

use std::path::Path;

use tracing::{info, trace};

use gp_core::{StatsConfig, StepNumber};
use gp_io::snapshot::Snapshot;
use gp_io::{naming, read_snapshot};

use crate::series::{RunSeries, StepStats};

/// Extract one run's series, one record per entry of `steps`.
///
/// Infallible by design: only per-step load/parse failures can occur here,
/// and each is absorbed into a `None` record.  Directory-level problems
/// (no snapshots at all) are caught earlier, during scanning.
pub fn extract_run(
    dir:    &Path,
    run:    &str,
    steps:  &[StepNumber],
    config: &StatsConfig,
) -> RunSeries {
    info!(dir = %dir.display(), run, "processing run");

    let records = steps
        .iter()
        .map(|&step| {
            let path = naming::snapshot_path(dir, run, step);
            match read_snapshot(&path) {
                Ok(snapshot) => Some(aggregate(&snapshot, config)),
                Err(err) => {
                    trace!(step = %step, %err, "skipping step");
                    None
                }
            }
        })
        .collect();

    RunSeries::new(records)
}

/// Aggregate one snapshot into its per-step statistics.
///
/// Bodies heavier than the ceiling (central star, escapee sentinels) are
/// excluded before anything else; the remainder is partitioned at the mass
/// cutoff, with `mass >= cutoff` counting as "above".
fn aggregate(snapshot: &Snapshot, config: &StatsConfig) -> StepStats {
    let mut stats = StepStats {
        time:            snapshot.time,
        disk_mass:       0.0,
        disk_mass_above: 0.0,
        disk_mass_below: 0.0,
        npart:           0,
        npart_above:     0,
        npart_below:     0,
    };

    for body in &snapshot.bodies {
        if body.mass > config.mass_ceiling {
            continue;
        }

        stats.disk_mass += body.mass;
        stats.npart += 1;

        if body.mass >= config.mass_cutoff {
            stats.disk_mass_above += body.mass;
            stats.npart_above += 1;
        } else {
            stats.disk_mass_below += body.mass;
            stats.npart_below += 1;
        }
    }

    stats
}
