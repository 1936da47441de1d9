//! Trapezoidal area convergence check.
//!
//! Purpose
//! - Show how the integrated area of the reference shape (A=2.2, kappa=1.5,
//!   delta=0.3, R0=2.5) settles as the angular grid is refined, and confirm the
//!   second-order error on the circular case where the exact area is π r².

use miller::{flux_surface, AngularGrid, ShapeParams};
use std::f64::consts::PI;

fn main() {
    let shape = ShapeParams::new(2.2, 1.5, 0.3, 2.5);
    let circle = ShapeParams::new(1.0, 1.0, 0.0, 1.0);
    let mut prev_err: Option<f64> = None;
    for n in [25usize, 50, 100, 200, 400, 800, 1600] {
        let grid = AngularGrid::uniform(n);
        let area = flux_surface(&shape, &grid).expect("valid shape").area();
        let err = (PI - flux_surface(&circle, &grid).expect("valid shape").area()).abs();
        let order = prev_err.map(|p| (p / err).log2()).unwrap_or(f64::NAN);
        println!("points={n:5} area={area:.9} circle_err={err:.3e} observed_order={order:.2}");
        prev_err = Some(err);
    }
}
