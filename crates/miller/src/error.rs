//! Error taxonomy for the core numerics.
//!
//! - Domain: the inputs are mathematically invalid (`|delta| > 1`, `A == 0`,
//!   non-finite parameters, a scale that overflows). Raised before any
//!   numeric work.
//! - InvalidInput: the inputs are structurally invalid (mismatched sequence
//!   lengths, unsorted or non-finite grids, missing configuration keys).

use thiserror::Error;

/// Coarse classification of a [`MillerError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Domain,
    InvalidInput,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MillerError {
    #[error("triangularity {0} is outside [-1, 1]; asin(delta) would not be real")]
    TriangularityOutOfRange(f64),

    #[error("aspect ratio must be non-zero (minor radius is R0 / A)")]
    ZeroAspectRatio,

    #[error("shape parameter {name} is not finite: {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("{quantity} overflows to {value}; shape parameters are out of floating-point range")]
    Overflow { quantity: &'static str, value: f64 },

    #[error("sweep sample {index} (delta = {delta}) failed")]
    SweepSample {
        index: usize,
        delta: f64,
        #[source]
        source: Box<MillerError>,
    },

    #[error("R and Z must have equal length (got {r} and {z})")]
    LengthMismatch { r: usize, z: usize },

    #[error("angular grid sample {index} is not finite")]
    NonFiniteGrid { index: usize },

    #[error("angular grid decreases at index {index}")]
    NonMonotonicGrid { index: usize },

    #[error("missing required shape parameter `{0}`")]
    MissingParameter(&'static str),
}

impl MillerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            MillerError::TriangularityOutOfRange(_)
            | MillerError::ZeroAspectRatio
            | MillerError::NonFinite { .. }
            | MillerError::Overflow { .. } => ErrorKind::Domain,
            MillerError::SweepSample { source, .. } => source.kind(),
            MillerError::LengthMismatch { .. }
            | MillerError::NonFiniteGrid { .. }
            | MillerError::NonMonotonicGrid { .. }
            | MillerError::MissingParameter(_) => ErrorKind::InvalidInput,
        }
    }

    #[inline]
    pub fn is_domain(&self) -> bool {
        self.kind() == ErrorKind::Domain
    }
}

pub type MillerResult<T> = Result<T, MillerError>;
