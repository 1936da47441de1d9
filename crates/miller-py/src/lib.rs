//! PyO3 bindings for the `miller` crate.
//!
//! Notes
//! - Bindings take and return plain lists/tuples; NumPy conversion is left to
//!   the Python side.
//! - Every `MillerError` maps to `ValueError` carrying the Rust message.

use pyo3::prelude::*;

mod common;
mod geom;

#[pymodule]
fn miller_native(_py: Python, m: &PyModule) -> PyResult<()> {
    geom::register(m)?;
    Ok(())
}
