//! `gp-io` — simulation output ingestion for the `genga-post` pipeline.
//!
//! The integrator writes one state dump ("snapshot") per output step into
//! the run directory, named `Out_<run>_<step:012>.dat`.  This crate owns
//! everything about that on-disk format:
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`snapshot`] | `Body`, `Snapshot`, whitespace-delimited file parser    |
//! | [`kepler`]   | Orbital elements from heliocentric state vectors        |
//! | [`naming`]   | Filename convention, run-directory scanning             |
//! | [`error`]    | `ReadError`, `ReadResult`                               |

pub mod error;
pub mod kepler;
pub mod naming;
pub mod snapshot;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{ReadError, ReadResult};
pub use kepler::OrbitalElements;
pub use naming::{RunScan, parse_snapshot_filename, scan_run_dir, snapshot_filename, snapshot_path};
pub use snapshot::{Body, Snapshot, read_snapshot, read_snapshot_from};
