//! Miller shape parameters.
//!
//! Serialized field names follow the `[miller]` config table (`A`, `kappa`,
//! `delta`, `R0`) so reports and config files read the same.

use serde::{Deserialize, Serialize};

use crate::error::{MillerError, MillerResult};

/// One instance of the analytic boundary shape.
///
/// Fields are plain data; [`ShapeParams::validate`] is run by every
/// evaluation entry point, so constructing an out-of-domain value is allowed
/// but evaluating it is not.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeParams {
    /// `A = R0 / r`.
    #[serde(rename = "A")]
    pub aspect_ratio: f64,
    #[serde(rename = "kappa")]
    pub elongation: f64,
    /// Must lie in `[-1, 1]`.
    #[serde(rename = "delta")]
    pub triangularity: f64,
    #[serde(rename = "R0")]
    pub major_radius: f64,
}

impl ShapeParams {
    #[inline]
    pub fn new(aspect_ratio: f64, elongation: f64, triangularity: f64, major_radius: f64) -> Self {
        Self {
            aspect_ratio,
            elongation,
            triangularity,
            major_radius,
        }
    }

    /// Minor radius `r = R0 / A`. Infinite for `A == 0`; call `validate` first.
    #[inline]
    pub fn minor_radius(&self) -> f64 {
        self.major_radius / self.aspect_ratio
    }

    /// Copy with `delta` replaced (used by the triangularity sweep).
    #[inline]
    pub fn with_triangularity(self, triangularity: f64) -> Self {
        Self {
            triangularity,
            ..self
        }
    }

    /// Check the preconditions of the Miller formula.
    ///
    /// Finiteness is checked first so a NaN delta reports as non-finite rather
    /// than slipping past the `|delta| <= 1` comparison. The derived scales
    /// `r`, `kappa r` and `R0 + |r|` must be finite too, so a valid shape always
    /// evaluates to real coordinates.
    pub fn validate(&self) -> MillerResult<()> {
        for (name, value) in [
            ("A", self.aspect_ratio),
            ("kappa", self.elongation),
            ("delta", self.triangularity),
            ("R0", self.major_radius),
        ] {
            if !value.is_finite() {
                return Err(MillerError::NonFinite { name, value });
            }
        }
        if self.aspect_ratio == 0.0 {
            return Err(MillerError::ZeroAspectRatio);
        }
        if self.triangularity.abs() > 1.0 {
            return Err(MillerError::TriangularityOutOfRange(self.triangularity));
        }
        // finite inputs can still overflow once combined
        let minor = self.minor_radius();
        for (quantity, value) in [
            ("r = R0 / A", minor),
            ("kappa * r", self.elongation * minor),
            ("R0 + |r|", self.major_radius + minor.abs()),
        ] {
            if !value.is_finite() {
                return Err(MillerError::Overflow { quantity, value });
            }
        }
        Ok(())
    }
}
