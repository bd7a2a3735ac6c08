//! Snapshot file format.
//!
//! # File layout
//!
//! One body per line, ASCII, whitespace-delimited:
//!
//! ```text
//! time  id  mass  radius  x  y  z  vx  vy  vz  [extra columns ignored]
//! ```
//!
//! Units: time in years, mass in Earth masses, positions heliocentric in AU,
//! velocities in Genga units (Earth ≈ 1).  Every row of one file carries the
//! same `time`; the snapshot-level time is taken from the first row.  Blank
//! lines are skipped.  Any malformed row fails the whole file — the caller
//! decides whether that is fatal (it is not, inside the extractor).

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ReadError, ReadResult};
use crate::kepler::OrbitalElements;

// ── Body ──────────────────────────────────────────────────────────────────────

/// One simulated body as read from a snapshot row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id:       u32,
    /// Mass in Earth masses.
    pub mass:     f64,
    /// Physical radius in AU (as written by the integrator).
    pub radius:   f64,
    /// Heliocentric position, AU.
    pub position: [f64; 3],
    /// Heliocentric velocity, Genga units.
    pub velocity: [f64; 3],
}

impl Body {
    /// Derive osculating orbital elements for this body around a central
    /// mass with gravitational parameter `gm` (Genga units: 1.0).
    pub fn elements(&self, gm: f64) -> OrbitalElements {
        OrbitalElements::from_state(gm, self.position, self.velocity)
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// One complete state dump: all bodies of one run at one output step.
///
/// Immutable once read; the extractor drops it after computing that step's
/// aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Simulation time in years, shared by all rows of the file.
    pub time:   f64,
    pub bodies: Vec<Body>,
}

impl Snapshot {
    #[inline]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────────

/// Load one snapshot file.
pub fn read_snapshot(path: &Path) -> ReadResult<Snapshot> {
    let file = File::open(path)?;
    read_snapshot_from(file, path)
}

/// Like [`read_snapshot`] but accepts any `Read` source.
///
/// `path` is used only for error messages (pass the real path, or a label
/// when reading from a `std::io::Cursor` in tests).
pub fn read_snapshot_from<R: Read>(reader: R, path: &Path) -> ReadResult<Snapshot> {
    let mut bodies = Vec::new();
    let mut time = f64::NAN;

    for (lineno, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (row_time, body) = parse_row(trimmed).map_err(|msg| ReadError::Malformed {
            path: path.to_path_buf(),
            line: lineno + 1,
            msg,
        })?;

        if bodies.is_empty() {
            time = row_time;
        }
        bodies.push(body);
    }

    if bodies.is_empty() {
        return Err(ReadError::Empty(path.to_path_buf()));
    }

    Ok(Snapshot { time, bodies })
}

/// Parse one `time id mass radius x y z vx vy vz …` row.
fn parse_row(line: &str) -> Result<(f64, Body), String> {
    let mut fields = line.split_whitespace();

    let mut next_f64 = |name: &str| -> Result<f64, String> {
        fields
            .next()
            .ok_or_else(|| format!("missing column {name:?}"))?
            .parse::<f64>()
            .map_err(|e| format!("column {name:?}: {e}"))
    };

    let time = next_f64("time")?;

    let id = next_f64("id")?;
    if id < 0.0 || id.fract() != 0.0 || id > u32::MAX as f64 {
        return Err(format!("column \"id\": {id} is not a valid body id"));
    }

    let mass   = next_f64("mass")?;
    let radius = next_f64("radius")?;
    let x      = next_f64("x")?;
    let y      = next_f64("y")?;
    let z      = next_f64("z")?;
    let vx     = next_f64("vx")?;
    let vy     = next_f64("vy")?;
    let vz     = next_f64("vz")?;

    Ok((
        time,
        Body {
            id: id as u32,
            mass,
            radius,
            position: [x, y, z],
            velocity: [vx, vy, vz],
        },
    ))
}
