//! Physical constants and unit conversions.
//!
//! # Genga units
//!
//! Snapshot files use the integrator's internal units:
//!
//!   length   AU
//!   mass     Earth masses (rescaled from solar masses at output time)
//!   time     years
//!   velocity Earth orbital speeds (1 ≈ 29.78 km/s)
//!
//! With those choices the solar gravitational parameter is unity, so
//! two-body element conversion needs no extra scaling ([`GM_GENGA`]).

// ── Masses (kg) ───────────────────────────────────────────────────────────────

pub const MSUN_KG:     f64 = 1.98844e30;
pub const MMERCURY_KG: f64 = 3.28500e23;
pub const MVENUS_KG:   f64 = 4.86700e24;
pub const MEARTH_KG:   f64 = 5.97219e24;
pub const MMARS_KG:    f64 = 6.39000e23;
pub const MJUPITER_KG: f64 = 1.89813e27;
pub const MMOON_KG:    f64 = 7.34767e22;

// ── Distances ─────────────────────────────────────────────────────────────────

/// One astronomical unit in kilometres.
pub const AU_KM: f64 = 149_597_871.0;

// ── Genga unit conversions ────────────────────────────────────────────────────

/// Genga velocity unit in km/s.  Test case: Earth = 1 (Genga) ≈ 29.78 km/s.
pub const GENGA_TO_KMS: f64 =
    (2.0 * std::f64::consts::PI / 365.25) * AU_KM / 24.0 / 3600.0;

/// km/s in Genga velocity units.
pub const KMS_TO_GENGA: f64 = 1.0 / GENGA_TO_KMS;

/// Central-body gravitational parameter in Genga units (AU, Earth-speed
/// velocities).  A circular orbit at 1 AU has speed 1, so GM = 1.
pub const GM_GENGA: f64 = 1.0;

// ── Mass conversions ──────────────────────────────────────────────────────────

/// Convert a mass in kilograms to Earth masses (the snapshot mass unit).
#[inline]
pub fn kg_to_mearth(kg: f64) -> f64 {
    kg / MEARTH_KG
}

/// Convert a mass in Earth masses to solar masses.
#[inline]
pub fn mearth_to_msun(mearth: f64) -> f64 {
    mearth * MEARTH_KG / MSUN_KG
}
