//! Spherical sampling helpers for star placement
//!
//! Azimuth is drawn inside a category sector, the polar angle is drawn so
//! that points are uniform over the sphere's area rather than uniform in
//! angle (which would cluster them at the poles).

use glam::{DVec3, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// How a sector crossing the 0/2π seam is sampled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapStrategy {
    /// Split into `[min, 2π)` and `[0, max)`, pick by length
    #[default]
    SplitRange,
    /// Lift `max` by 2π and reduce the draw modulo 2π
    ExtendMax,
}

impl WrapStrategy {
    pub const ALL: &'static [WrapStrategy] = &[WrapStrategy::SplitRange, WrapStrategy::ExtendMax];

    pub fn label(&self) -> &'static str {
        match self {
            WrapStrategy::SplitRange => "Split range",
            WrapStrategy::ExtendMax => "Extend max",
        }
    }
}

impl std::fmt::Display for WrapStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Wrap an angle into `[0, 2π)`.
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(TAU);
    // rem_euclid of a tiny negative value rounds up to exactly 2π
    if a >= TAU {
        0.0
    } else {
        a
    }
}

/// Azimuth slice assigned to one category, before normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub min: f64,
    pub max: f64,
}

impl Sector {
    /// Sector of `category` when `[0, 2π)` is cut into `category_count`
    /// equal slices, each widened by `overlap` slice-widths on both sides.
    pub fn for_category(category: u32, category_count: u32, overlap: f64) -> Self {
        debug_assert!(category_count > 0, "category_count must be positive");
        debug_assert!(category < category_count, "category out of range");
        let width = TAU / category_count as f64;
        let epsilon = width * overlap;
        Self {
            min: category as f64 * width - epsilon,
            max: (category + 1) as f64 * width + epsilon,
        }
    }

    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Whether `phi` falls in the sector modulo 2π, with `tolerance` slack
    /// on the upper edge.
    pub fn contains(&self, phi: f64, tolerance: f64) -> bool {
        if self.span() >= TAU {
            return true;
        }
        let offset = (phi - self.min).rem_euclid(TAU);
        offset <= self.span() + tolerance || TAU - offset <= tolerance
    }

    /// Draw an azimuth uniformly within the sector, result in `[0, 2π)`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, strategy: WrapStrategy) -> f64 {
        if self.span() >= TAU {
            return normalize_angle(rng.gen_range(0.0..TAU));
        }

        let lo = normalize_angle(self.min);
        let phi = match strategy {
            WrapStrategy::SplitRange => {
                let hi = normalize_angle(self.max);
                if lo < hi {
                    rng.gen_range(lo..hi)
                } else {
                    let head = TAU - lo;
                    let tail = hi;
                    let r = rng.gen::<f64>() * (head + tail);
                    if r < head {
                        lo + r
                    } else {
                        r - head
                    }
                }
            }
            WrapStrategy::ExtendMax => {
                let mut hi = normalize_angle(self.max);
                if hi <= lo {
                    hi += TAU;
                }
                rng.gen_range(lo..hi)
            }
        };
        normalize_angle(phi)
    }
}

/// Polar angle in `[0, π]` with uniform area density: `acos(u)`, `u ∈ [-1, 1)`.
pub fn sample_polar<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u = rng.gen::<f64>() * 2.0 - 1.0;
    u.clamp(-1.0, 1.0).acos()
}

/// Spherical `(phi, theta, radius)` to Cartesian, z as the pole axis.
#[inline]
pub fn spherical_to_cartesian(phi: f64, theta: f64, radius: f64) -> DVec3 {
    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();
    DVec3::new(
        radius * sin_theta * cos_phi,
        radius * sin_theta * sin_phi,
        radius * cos_theta,
    )
}

/// Rotate -90° about X so the sampling equator faces the camera:
/// `(x, y, z) -> (x, z, -y)`.
#[inline]
pub fn rotate_to_view(v: DVec3) -> Vec3 {
    DVec3::new(v.x, v.z, -v.y).as_vec3()
}
