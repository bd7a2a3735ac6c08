//! Per-invocation analysis parameters.
//!
//! The original post-processing scripts kept these as module-level globals;
//! here they are an explicit immutable value passed by reference into the
//! extractor and reducer, so two invocations with different cutoffs cannot
//! interfere.

use serde::{Deserialize, Serialize};

use crate::units;

/// Immutable parameters for one statistics-extraction invocation.
///
/// All masses are in Earth masses, matching the snapshot mass column.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StatsConfig {
    /// Planetesimal/embryo partition threshold.  Bodies with
    /// `mass >= mass_cutoff` count as "above" (embryos/planets),
    /// the rest as "below" (planetesimals).
    pub mass_cutoff: f64,

    /// Hard ceiling above which a body is treated as non-physical
    /// (central star, escapee sentinel) and excluded from every statistic.
    pub mass_ceiling: f64,

    /// Gravitational parameter of the central body, in snapshot units.
    /// Used only for orbital-element derivation.
    pub gm: f64,
}

impl StatsConfig {
    /// The cutoff used throughout the formation analysis: 2 × 10²³ kg.
    pub const CUTOFF_KG: f64 = 2.0e23;

    /// Ceiling in Earth masses; anything heavier is not a disk body.
    pub const CEILING_MEARTH: f64 = 12.0;
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            mass_cutoff:  units::kg_to_mearth(Self::CUTOFF_KG),
            mass_ceiling: Self::CEILING_MEARTH,
            gm:           units::GM_GENGA,
        }
    }
}
