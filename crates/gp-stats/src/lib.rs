//! `gp-stats` — the run statistics aggregator.
//!
//! For a set of simulation run directories this crate computes per-run time
//! series of disk mass and particle counts (split at the planetesimal/embryo
//! mass cutoff), then reduces them into cross-run quantile summaries.
//!
//! # Pipeline
//!
//! ```text
//! scan dirs ─▶ global step list ─▶ extract (per run, parallel) ─▶ reduce
//! ```
//!
//! Each stage fully consumes the previous one; there is no shared mutable
//! state between per-run extractions.
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`series`]   | `Field`, `StepStats`, `RunSeries`, `RunCollection`     |
//! | [`extract`]  | Per-run extractor with the per-step sentinel policy    |
//! | [`dispatch`] | Sequential or rayon-pooled extraction over runs        |
//! | [`quantile`] | `QuantileLevel`, linear-interpolation reducer          |
//! | [`pipeline`] | End-to-end orchestration, `StatsBundle`                |
//! | [`error`]    | `StatsError`, `StatsResult`                            |

pub mod dispatch;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod quantile;
pub mod series;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use dispatch::dispatch;
pub use error::{StatsError, StatsResult};
pub use extract::extract_run;
pub use pipeline::{StatsBundle, run_pipeline};
pub use quantile::{QuantileLevel, QuantileRecord, QuantileTable, quantile, reduce};
pub use series::{Field, RunCollection, RunSeries, StepStats};
