//! Triangularity sweep: area as a function of delta.
//!
//! Purpose
//! - Evaluate the boundary and its area for each delta in an ordered list,
//!   holding `A`, `kappa` and `R0` fixed.
//!
//! Failure policy
//! - Abort on the first failing sample. The error names the sample index and
//!   delta; no partial result is returned.

use serde::Serialize;
use std::f64::consts::PI;

use crate::error::{MillerError, MillerResult};
use crate::grid::AngularGrid;
use crate::shape::ShapeParams;
use crate::surface::flux_surface;

/// Default sweep: 100 samples over `[0, 1]`.
pub const DEFAULT_SWEEP_SAMPLES: usize = 100;

/// Parallel `(delta, area)` arrays, input order preserved.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SweepResult {
    pub delta: Vec<f64>,
    pub area: Vec<f64>,
}

impl SweepResult {
    #[inline]
    pub fn len(&self) -> usize {
        self.delta.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.delta.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.delta.iter().copied().zip(self.area.iter().copied())
    }

    /// Areas relative to the `delta = 0` ellipse `π κ r²`.
    pub fn circle_ratio(&self, minor_radius: f64, elongation: f64) -> Vec<f64> {
        let ellipse = PI * elongation * minor_radius * minor_radius;
        self.area.iter().map(|a| a / ellipse).collect()
    }

    fn steps(&self) -> impl Iterator<Item = f64> + '_ {
        self.area.windows(2).map(|w| (w[1] - w[0]).abs())
    }

    /// Largest absolute step between neighbouring samples; 0 below two samples.
    pub fn max_step(&self) -> f64 {
        self.steps().fold(0.0, f64::max)
    }

    /// Mean absolute step between neighbouring samples; 0 below two samples.
    pub fn mean_step(&self) -> f64 {
        let n = self.len().saturating_sub(1);
        if n == 0 {
            return 0.0;
        }
        self.steps().sum::<f64>() / n as f64
    }
}

/// Area of the Miller boundary for each delta in `deltas`.
///
/// `base.triangularity` is ignored; every other field is held fixed.
pub fn sweep_area(
    deltas: &[f64],
    base: &ShapeParams,
    grid: &AngularGrid,
) -> MillerResult<SweepResult> {
    let mut out = SweepResult {
        delta: Vec::with_capacity(deltas.len()),
        area: Vec::with_capacity(deltas.len()),
    };
    for (index, &delta) in deltas.iter().enumerate() {
        let curve = flux_surface(&base.with_triangularity(delta), grid).map_err(|source| {
            MillerError::SweepSample {
                index,
                delta,
                source: Box::new(source),
            }
        })?;
        out.delta.push(delta);
        out.area.push(curve.area());
    }
    Ok(out)
}
