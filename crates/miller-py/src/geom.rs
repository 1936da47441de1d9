//! Boundary, area and sweep bindings.

use crate::common::{grid_from_py, map_miller_err, shape};
use miller::{enclosed_area, flux_surface, sweep_area, DEFAULT_POINTS};
use pyo3::prelude::*;

/// Miller boundary `(R, Z)` for the given shape.
#[pyfunction]
#[pyo3(signature = (a, kappa, delta, r0, theta=None, points=DEFAULT_POINTS))]
pub fn flux_surface_rz(
    a: f64,
    kappa: f64,
    delta: f64,
    r0: f64,
    theta: Option<Vec<f64>>,
    points: usize,
) -> PyResult<(Vec<f64>, Vec<f64>)> {
    let grid = grid_from_py(theta, points)?;
    let curve = flux_surface(&shape(a, kappa, delta, r0), &grid).map_err(map_miller_err)?;
    Ok((curve.r().to_vec(), curve.z().to_vec()))
}

/// Enclosed area of the curve `(r, z)`.
#[pyfunction]
pub fn area(r: Vec<f64>, z: Vec<f64>) -> PyResult<f64> {
    enclosed_area(&r, &z).map_err(map_miller_err)
}

/// Areas for each triangularity in `deltas` with A, kappa, R0 fixed.
#[pyfunction]
#[pyo3(signature = (deltas, a, kappa, r0, points=DEFAULT_POINTS))]
pub fn area_vs_delta(
    deltas: Vec<f64>,
    a: f64,
    kappa: f64,
    r0: f64,
    points: usize,
) -> PyResult<Vec<f64>> {
    let grid = grid_from_py(None, points)?;
    sweep_area(&deltas, &shape(a, kappa, 0.0, r0), &grid)
        .map(|res| res.area)
        .map_err(map_miller_err)
}

pub fn register(m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(flux_surface_rz, m)?)?;
    m.add_function(wrap_pyfunction!(area, m)?)?;
    m.add_function(wrap_pyfunction!(area_vs_delta, m)?)?;
    Ok(())
}
