//! Angular sampling grids and `linspace`.
//!
//! Purpose
//! - Own the poloidal angle samples the boundary is evaluated on. The grid is
//!   built once by the caller and passed to every evaluation.
//!
//! Conventions
//! - `uniform(n)` includes both endpoints, so `theta[0] = 0` and
//!   `theta[n-1] = 2π`; the sampled curve is closed.
//! - Grids must be non-decreasing. Fewer than two points is allowed and
//!   integrates to zero area.

use nalgebra::DVector;
use std::f64::consts::TAU;

use crate::error::{MillerError, MillerResult};

/// Default number of angle samples.
pub const DEFAULT_POINTS: usize = 50;

/// `n` evenly spaced values over `[start, stop]`, endpoints included.
///
/// `n == 0` gives an empty vector, `n == 1` gives `[start]`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            // pin the endpoint against accumulated rounding
            out[n - 1] = stop;
            out
        }
    }
}

/// Ordered poloidal angle samples (radians).
#[derive(Clone, Debug, PartialEq)]
pub struct AngularGrid {
    theta: DVector<f64>,
}

impl AngularGrid {
    /// `n` samples uniformly spaced over `[0, 2π]`.
    pub fn uniform(n: usize) -> Self {
        Self {
            theta: DVector::from_vec(linspace(0.0, TAU, n)),
        }
    }

    /// Caller-provided samples; must be finite and non-decreasing.
    pub fn from_samples(theta: Vec<f64>) -> MillerResult<Self> {
        if let Some(index) = theta.iter().position(|t| !t.is_finite()) {
            return Err(MillerError::NonFiniteGrid { index });
        }
        if let Some(index) = theta.windows(2).position(|w| w[1] < w[0]) {
            return Err(MillerError::NonMonotonicGrid { index: index + 1 });
        }
        Ok(Self {
            theta: DVector::from_vec(theta),
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.theta.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    #[inline]
    pub fn theta(&self) -> &DVector<f64> {
        &self.theta
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        self.theta.as_slice()
    }
}

impl Default for AngularGrid {
    fn default() -> Self {
        Self::uniform(DEFAULT_POINTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linspace_matches_endpoints_and_step() {
        let xs = linspace(0.0, 1.0, 100);
        assert_eq!(xs.len(), 100);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[99], 1.0);
        assert!((xs[1] - 1.0 / 99.0).abs() < 1e-15);
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.3, 1.0, 1), vec![0.3]);
    }

    #[test]
    fn default_grid_spans_full_turn() {
        let g = AngularGrid::default();
        assert_eq!(g.len(), DEFAULT_POINTS);
        assert_eq!(g.as_slice()[0], 0.0);
        assert_eq!(g.as_slice()[DEFAULT_POINTS - 1], TAU);
    }

    #[test]
    fn from_samples_rejects_decreasing() {
        let err = AngularGrid::from_samples(vec![0.0, 1.0, 0.5]).unwrap_err();
        assert_eq!(err, MillerError::NonMonotonicGrid { index: 2 });
        // repeated angles are fine
        assert!(AngularGrid::from_samples(vec![0.0, 1.0, 1.0, 2.0]).is_ok());
    }

    #[test]
    fn from_samples_rejects_nan() {
        let err = AngularGrid::from_samples(vec![0.0, f64::NAN, 1.0]).unwrap_err();
        assert_eq!(err, MillerError::NonFiniteGrid { index: 1 });
        assert_eq!(err.kind(), crate::error::ErrorKind::InvalidInput);
    }
}
