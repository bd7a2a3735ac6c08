//! `gp-core` — foundational types for the `genga-post` analysis pipeline.
//!
//! This crate is a dependency of every other `gp-*` crate.  It intentionally
//! has no `gp-*` dependencies and only `serde` as an external one.  Error
//! enums live with the subsystems that produce them (`gp_io::ReadError`,
//! `gp_stats::StatsError`, `gp_output::OutputError`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`units`]  | Physical constants and Genga unit conversions         |
//! | [`config`] | `StatsConfig` — immutable per-invocation parameters   |
//! | [`step`]   | `StepNumber` — the simulation's own output counter    |

pub mod config;
pub mod step;
pub mod units;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::StatsConfig;
pub use step::StepNumber;
