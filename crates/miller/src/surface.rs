//! Miller flux-surface geometry.
//!
//! Model
//! - Minor radius `r = R0 / A`. For each poloidal angle θ:
//!   `R(θ) = R0 + r cos(θ + asin(δ) sin θ)` and `Z(θ) = κ r sin θ`.
//! - The curve starts on the outboard midplane (θ = 0, R = R0 + r, Z = 0) and
//!   R decreases along the first half-turn.
//!
//! References
//! - Code cross-refs: `ShapeParams::validate`, `AngularGrid`, `area::enclosed_area`

use nalgebra::DVector;

use crate::area::trapezoid;
use crate::error::{MillerError, MillerResult};
use crate::grid::AngularGrid;
use crate::shape::ShapeParams;

/// Axis-aligned extent of a boundary curve.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub r_min: f64,
    pub r_max: f64,
    pub z_min: f64,
    pub z_max: f64,
}

/// Sampled boundary: `r[i]`, `z[i]` belong to the i-th grid angle.
///
/// Invariant: `r.len() == z.len()`.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundaryCurve {
    r: DVector<f64>,
    z: DVector<f64>,
}

impl BoundaryCurve {
    /// Pair two coordinate sequences; fails on a length mismatch.
    pub fn new(r: Vec<f64>, z: Vec<f64>) -> MillerResult<Self> {
        if r.len() != z.len() {
            return Err(MillerError::LengthMismatch {
                r: r.len(),
                z: z.len(),
            });
        }
        Ok(Self {
            r: DVector::from_vec(r),
            z: DVector::from_vec(z),
        })
    }

    #[inline]
    pub fn r(&self) -> &[f64] {
        self.r.as_slice()
    }

    #[inline]
    pub fn z(&self) -> &[f64] {
        self.z.as_slice()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.r.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.r.iter().copied().zip(self.z.iter().copied())
    }

    /// Same points, opposite traversal direction.
    pub fn reversed(&self) -> Self {
        let mut r = self.r.clone();
        let mut z = self.z.clone();
        r.as_mut_slice().reverse();
        z.as_mut_slice().reverse();
        Self { r, z }
    }

    /// Enclosed area `|∫ Z dR|` by the trapezoidal rule; 0 for fewer than two points.
    pub fn area(&self) -> f64 {
        trapezoid(self.z(), self.r()).abs()
    }

    /// Bounding box, `None` for an empty curve.
    pub fn bounds(&self) -> Option<Bounds> {
        if self.is_empty() {
            return None;
        }
        Some(Bounds {
            r_min: self.r.min(),
            r_max: self.r.max(),
            z_min: self.z.min(),
            z_max: self.z.max(),
        })
    }
}

/// Evaluate the Miller boundary for `shape` on `grid`.
///
/// Domain errors (`|δ| > 1`, `A == 0`, non-finite parameters or scales that
/// overflow) are raised before any evaluation.
pub fn flux_surface(shape: &ShapeParams, grid: &AngularGrid) -> MillerResult<BoundaryCurve> {
    shape.validate()?;
    let r0 = shape.major_radius;
    let minor = shape.minor_radius();
    let skew = shape.triangularity.asin();
    let theta = grid.theta();
    let r = theta.map(|t| r0 + minor * (t + skew * t.sin()).cos());
    let z = theta.map(|t| shape.elongation * minor * t.sin());
    Ok(BoundaryCurve { r, z })
}

/// [`flux_surface`] on the default 50-sample grid.
pub fn flux_surface_default(shape: &ShapeParams) -> MillerResult<BoundaryCurve> {
    flux_surface(shape, &AngularGrid::default())
}
