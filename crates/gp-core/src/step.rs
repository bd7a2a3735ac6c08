//! Simulation output step numbering.
//!
//! The integrator labels each state dump with its own (possibly sparse)
//! integer counter — the *step number* embedded in the filename.  The
//! position of a step number within the globally ordered, deduplicated
//! list is the *step index*; series and quantile tables are indexed by
//! step index, never by step number.

use std::fmt;

/// A simulation output step number, as embedded in snapshot filenames.
///
/// Stored as `u64`: filenames carry 12 decimal digits, which exceeds `u32`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StepNumber(pub u64);

impl StepNumber {
    pub const ZERO: StepNumber = StepNumber(0);

    /// Render with the fixed 12-digit zero padding used in filenames.
    pub fn padded(self) -> String {
        format!("{:012}", self.0)
    }
}

impl fmt::Display for StepNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:012}", self.0)
    }
}

impl From<u64> for StepNumber {
    #[inline]
    fn from(n: u64) -> StepNumber {
        StepNumber(n)
    }
}
