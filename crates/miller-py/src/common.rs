use miller::{AngularGrid, MillerError, ShapeParams};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

pub fn map_miller_err(err: MillerError) -> PyErr {
    PyValueError::new_err(err.to_string())
}

/// Explicit angles when given, otherwise `points` uniform samples over [0, 2π].
pub fn grid_from_py(theta: Option<Vec<f64>>, points: usize) -> PyResult<AngularGrid> {
    match theta {
        Some(samples) => AngularGrid::from_samples(samples).map_err(map_miller_err),
        None => Ok(AngularGrid::uniform(points)),
    }
}

pub fn shape(a: f64, kappa: f64, delta: f64, r0: f64) -> ShapeParams {
    ShapeParams::new(a, kappa, delta, r0)
}
