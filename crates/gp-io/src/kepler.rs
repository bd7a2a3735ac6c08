//! Osculating orbital elements from heliocentric state vectors.
//!
//! Standard two-body conversion: specific orbital energy gives the
//! semi-major axis, the eccentricity vector gives e, and the angular
//! momentum vector gives the inclination.  In Genga units (AU positions,
//! Earth-orbital-speed velocities) the solar gravitational parameter is 1,
//! so callers normally pass `gm = 1.0`.

use serde::{Deserialize, Serialize};

/// Semi-major axis, eccentricity, and inclination of an osculating orbit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Semi-major axis, AU.  Negative for hyperbolic orbits.
    pub a:   f64,
    /// Eccentricity.
    pub e:   f64,
    /// Inclination to the reference plane, radians, in [0, π].
    pub inc: f64,
}

impl OrbitalElements {
    /// Convert a heliocentric state vector to orbital elements.
    pub fn from_state(gm: f64, position: [f64; 3], velocity: [f64; 3]) -> Self {
        let r = norm(position);
        let v2 = dot(velocity, velocity);

        // Vis-viva: E = v²/2 − GM/r, a = −GM/2E.
        let energy = 0.5 * v2 - gm / r;
        let a = -gm / (2.0 * energy);

        // Eccentricity vector: e = (v × h)/GM − r̂.
        let h = cross(position, velocity);
        let vxh = cross(velocity, h);
        let e_vec = [
            vxh[0] / gm - position[0] / r,
            vxh[1] / gm - position[1] / r,
            vxh[2] / gm - position[2] / r,
        ];
        let e = norm(e_vec);

        let inc = (h[2] / norm(h)).clamp(-1.0, 1.0).acos();

        Self { a, e, inc }
    }

    /// Pericentre distance q = a(1 − e), AU.
    #[inline]
    pub fn pericentre(&self) -> f64 {
        self.a * (1.0 - self.e)
    }

    /// Apocentre distance Q = a(1 + e), AU.
    #[inline]
    pub fn apocentre(&self) -> f64 {
        self.a * (1.0 + self.e)
    }
}

// ── Small vector helpers ──────────────────────────────────────────────────────

#[inline]
fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}
