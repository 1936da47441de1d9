//! Miller flux-surface geometry and cross-sectional area.
//!
//! Layout
//! - `shape`: the four shape parameters (A, kappa, delta, R0) and their domain checks.
//! - `grid`: poloidal angle grids and `linspace`.
//! - `surface`: the Miller boundary `R(θ), Z(θ)`.
//! - `area`: trapezoidal integration of the enclosed area.
//! - `sweep`: area as a function of triangularity.
//!
//! API Policy
//! - The library is pure and does not log; the `cli` crate owns logging,
//!   configuration and rendering.

pub mod area;
pub mod error;
pub mod grid;
pub mod shape;
pub mod surface;
pub mod sweep;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use area::enclosed_area;
pub use error::{ErrorKind, MillerError, MillerResult};
pub use grid::{linspace, AngularGrid, DEFAULT_POINTS};
pub use shape::ShapeParams;
pub use surface::{flux_surface, flux_surface_default, BoundaryCurve, Bounds};
pub use sweep::{sweep_area, SweepResult, DEFAULT_SWEEP_SAMPLES};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::{
        enclosed_area, flux_surface, linspace, sweep_area, AngularGrid, BoundaryCurve,
        MillerError, ShapeParams, SweepResult,
    };
}
