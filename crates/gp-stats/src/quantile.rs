//! Cross-run quantile reduction.
//!
//! For every field and step index, the reducer gathers that field's value
//! across all runs, drops missing entries, and computes the seven summary
//! levels from the sorted sample.  Min, median, and max go through the same
//! interpolation code path as the percentiles (p = 0, 0.5, 1).
//!
//! A step index where *every* run is missing yields a missing quantile
//! value, never a fabricated zero.

use serde::{Deserialize, Serialize};

use crate::series::{Field, RunCollection};

// ── QuantileLevel ─────────────────────────────────────────────────────────────

/// The seven summary levels produced per invocation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum QuantileLevel {
    Min,
    Q10,
    Q25,
    Q50,
    Q75,
    Q90,
    Max,
}

impl QuantileLevel {
    pub const ALL: [QuantileLevel; 7] = [
        QuantileLevel::Min,
        QuantileLevel::Q10,
        QuantileLevel::Q25,
        QuantileLevel::Q50,
        QuantileLevel::Q75,
        QuantileLevel::Q90,
        QuantileLevel::Max,
    ];

    /// Quantile level in [0, 1].
    pub fn p(self) -> f64 {
        match self {
            QuantileLevel::Min => 0.0,
            QuantileLevel::Q10 => 0.10,
            QuantileLevel::Q25 => 0.25,
            QuantileLevel::Q50 => 0.50,
            QuantileLevel::Q75 => 0.75,
            QuantileLevel::Q90 => 0.90,
            QuantileLevel::Max => 1.0,
        }
    }

    /// Stable key used to name the table in every output backend.
    pub fn key(self) -> &'static str {
        match self {
            QuantileLevel::Min => "min",
            QuantileLevel::Q10 => "q10",
            QuantileLevel::Q25 => "q25",
            QuantileLevel::Q50 => "q50",
            QuantileLevel::Q75 => "q75",
            QuantileLevel::Q90 => "q90",
            QuantileLevel::Max => "max",
        }
    }
}

// ── Records and tables ────────────────────────────────────────────────────────

/// One quantile-reduced row: the same field set as `StepStats`, each value
/// optional (missing when no run had data at that step index).  Counts are
/// real-valued here — interpolation between integer samples is fractional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuantileRecord {
    values: [Option<f64>; Field::COUNT],
}

impl QuantileRecord {
    pub const MISSING: QuantileRecord = QuantileRecord { values: [None; Field::COUNT] };

    #[inline]
    pub fn get(&self, field: Field) -> Option<f64> {
        self.values[field.index()]
    }

    #[inline]
    fn set(&mut self, field: Field, value: Option<f64>) {
        self.values[field.index()] = value;
    }
}

/// One summary level's table: one [`QuantileRecord`] per step index.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileTable {
    pub level:   QuantileLevel,
    pub records: Vec<QuantileRecord>,
}

// ── Reduction ─────────────────────────────────────────────────────────────────

/// Linear-interpolation quantile over an already sorted sample.
///
/// For level `p` over `n` samples the fractional rank is `p · (n − 1)`,
/// interpolated between the two bracketing order statistics.  Returns
/// `None` for an empty sample.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let rank = p * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let w = rank - lo as f64;
    Some(sorted[lo] * (1.0 - w) + sorted[hi] * w)
}

/// Reduce a run collection into the seven quantile tables.
///
/// `time` is reduced like any other field; see the pipeline docs for the
/// step-to-time alignment assumption this inherits.
pub fn reduce(collection: &RunCollection) -> Vec<QuantileTable> {
    let n_steps = collection.steps().len();

    let mut tables: Vec<QuantileTable> = QuantileLevel::ALL
        .iter()
        .map(|&level| QuantileTable {
            level,
            records: vec![QuantileRecord::MISSING; n_steps],
        })
        .collect();

    let mut sample: Vec<f64> = Vec::with_capacity(collection.len());

    for step_index in 0..n_steps {
        for field in Field::ALL {
            sample.clear();
            sample.extend(
                collection
                    .iter()
                    .filter_map(|(_, series)| series.get(step_index))
                    .map(|stats| stats.field(field)),
            );
            // Sort once, then read all seven levels off the same sample.
            sample.sort_by(f64::total_cmp);

            for table in &mut tables {
                let value = quantile(&sample, table.level.p());
                table.records[step_index].set(field, value);
            }
        }
    }

    tables
}
