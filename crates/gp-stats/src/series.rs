//! Per-run time series and the cross-run collection.
//!
//! A [`RunSeries`] holds one `Option<StepStats>` per *step index* — the
//! position within the globally ordered step-number list, not the sparse
//! step number itself.  A step the run never wrote (or whose file failed to
//! load) is `None`; the series length never varies between runs.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use gp_core::StepNumber;

// ── Field ─────────────────────────────────────────────────────────────────────

/// The tracked per-step quantities, in canonical column order.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Field {
    Time,
    DiskMass,
    DiskMassAbove,
    DiskMassBelow,
    Npart,
    NpartAbove,
    NpartBelow,
}

impl Field {
    pub const COUNT: usize = 7;

    /// All fields in canonical column order.
    pub const ALL: [Field; Self::COUNT] = [
        Field::Time,
        Field::DiskMass,
        Field::DiskMassAbove,
        Field::DiskMassBelow,
        Field::Npart,
        Field::NpartAbove,
        Field::NpartBelow,
    ];

    /// Column name used by every output backend.
    pub fn name(self) -> &'static str {
        match self {
            Field::Time          => "time",
            Field::DiskMass      => "disk_mass",
            Field::DiskMassAbove => "disk_mass_above",
            Field::DiskMassBelow => "disk_mass_below",
            Field::Npart         => "npart",
            Field::NpartAbove    => "npart_above",
            Field::NpartBelow    => "npart_below",
        }
    }

    /// Position in the canonical column order.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

// ── StepStats ─────────────────────────────────────────────────────────────────

/// Aggregates for one successfully loaded snapshot.
///
/// Masses in Earth masses, time in years.  "Above"/"below" refer to the
/// planetesimal/embryo mass cutoff; the partition is exhaustive and
/// disjoint, so `npart_above + npart_below == npart`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepStats {
    pub time:            f64,
    pub disk_mass:       f64,
    pub disk_mass_above: f64,
    pub disk_mass_below: f64,
    pub npart:           u32,
    pub npart_above:     u32,
    pub npart_below:     u32,
}

impl StepStats {
    /// Read one field as `f64` (counts are widened losslessly).
    pub fn field(&self, field: Field) -> f64 {
        match field {
            Field::Time          => self.time,
            Field::DiskMass      => self.disk_mass,
            Field::DiskMassAbove => self.disk_mass_above,
            Field::DiskMassBelow => self.disk_mass_below,
            Field::Npart         => f64::from(self.npart),
            Field::NpartAbove    => f64::from(self.npart_above),
            Field::NpartBelow    => f64::from(self.npart_below),
        }
    }
}

// ── RunSeries ─────────────────────────────────────────────────────────────────

/// One run's time series, indexed by step index.
///
/// Immutable once built; `None` marks a step whose snapshot was missing or
/// failed to load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSeries {
    records: Vec<Option<StepStats>>,
}

impl RunSeries {
    pub fn new(records: Vec<Option<StepStats>>) -> Self {
        Self { records }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The record at `step_index`, or `None` past the end.
    #[inline]
    pub fn get(&self, step_index: usize) -> Option<&StepStats> {
        self.records.get(step_index).and_then(Option::as_ref)
    }

    pub fn records(&self) -> &[Option<StepStats>] {
        &self.records
    }
}

// ── RunCollection ─────────────────────────────────────────────────────────────

/// All runs' series, keyed by run name, aligned on one global step list.
///
/// Iteration order is the original input order of the run directories, so
/// downstream output is deterministic regardless of extraction scheduling.
#[derive(Debug, Clone, PartialEq)]
pub struct RunCollection {
    steps: Vec<StepNumber>,
    runs:  Vec<(String, RunSeries)>,
    index: FxHashMap<String, usize>,
}

impl RunCollection {
    /// Assemble a collection.  Every series must already have
    /// `steps.len()` records — the extractor guarantees this.
    pub fn new(steps: Vec<StepNumber>, runs: Vec<(String, RunSeries)>) -> Self {
        debug_assert!(runs.iter().all(|(_, s)| s.len() == steps.len()));

        let index = runs
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();

        Self { steps, runs, index }
    }

    /// The global ordered step-number list shared by every series.
    pub fn steps(&self) -> &[StepNumber] {
        &self.steps
    }

    /// Number of runs.
    #[inline]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Look up one run's series by name.
    pub fn get(&self, run: &str) -> Option<&RunSeries> {
        self.index.get(run).map(|&i| &self.runs[i].1)
    }

    /// Iterate `(run name, series)` in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RunSeries)> {
        self.runs.iter().map(|(name, series)| (name.as_str(), series))
    }
}
