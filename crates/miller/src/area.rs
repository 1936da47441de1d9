//! Cross-sectional area by the trapezoidal rule.
//!
//! The signed integral `∫ Z dR` taken around the closed boundary equals the
//! shoelace area of the sampled polygon; its sign only reflects the traversal
//! direction (the Miller curve starts on the outboard midplane with R
//! decreasing), so callers get the absolute value.

use crate::error::{MillerError, MillerResult};

/// `∫ y dx` over the sample sequence, trapezoidal rule.
///
/// Both slices must have the same length; [`enclosed_area`] checks this for
/// external callers.
pub(crate) fn trapezoid(y: &[f64], x: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.windows(2)
        .zip(y.windows(2))
        .map(|(xs, ys)| 0.5 * (xs[1] - xs[0]) * (ys[0] + ys[1]))
        .sum()
}

/// Area enclosed by the curve `(r[i], z[i])`.
///
/// Fewer than two samples enclose nothing and give `Ok(0.0)`.
pub fn enclosed_area(r: &[f64], z: &[f64]) -> MillerResult<f64> {
    if r.len() != z.len() {
        return Err(MillerError::LengthMismatch {
            r: r.len(),
            z: z.len(),
        });
    }
    Ok(trapezoid(z, r).abs())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::grid::AngularGrid;
    use crate::shape::ShapeParams;
    use crate::surface::flux_surface;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::f64::consts::PI;

    #[test]
    fn trapezoid_linear_is_exact() {
        // ∫_0^2 (3x + 1) dx = 8
        let x = [0.0, 0.5, 1.25, 2.0];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v + 1.0).collect();
        assert!((trapezoid(&y, &x) - 8.0).abs() < 1e-12);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic]
    fn trapezoid_requires_equal_lengths() {
        trapezoid(&[0.0, 1.0, 2.0], &[0.0, 1.0]);
    }

    #[test]
    fn unit_circle_within_discretization_error() {
        let shape = ShapeParams::new(1.0, 1.0, 0.0, 1.0);
        let curve = flux_surface(&shape, &AngularGrid::default()).unwrap();
        let area = enclosed_area(curve.r(), curve.z()).unwrap();
        assert!((area - PI).abs() < 1e-2, "area = {area}");
        // inscribed polygon: never above the true area
        assert!(area < PI);
    }

    #[test]
    fn second_order_convergence() {
        let shape = ShapeParams::new(1.0, 1.0, 0.0, 1.0);
        let err = |n: usize| {
            let c = flux_surface(&shape, &AngularGrid::uniform(n)).unwrap();
            (PI - c.area()).abs()
        };
        let (e1, e2) = (err(201), err(801));
        // step shrinks 4x -> error shrinks ~16x
        let ratio = e1 / e2;
        assert!(ratio > 12.0 && ratio < 20.0, "ratio = {ratio}");
    }

    #[test]
    fn reversal_keeps_area_randomized_seeded() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..16 {
            let shape = ShapeParams::new(
                rng.gen_range(1.2..5.0),
                rng.gen_range(0.5..2.5),
                rng.gen_range(-1.0..=1.0),
                rng.gen_range(0.5..8.0),
            );
            let curve = flux_surface(&shape, &AngularGrid::uniform(64)).unwrap();
            let back = curve.reversed();
            let a = enclosed_area(curve.r(), curve.z()).unwrap();
            let b = enclosed_area(back.r(), back.z()).unwrap();
            assert!(a > 0.0);
            assert!((a - b).abs() < 1e-12 * a.max(1.0));
        }
    }

    #[test]
    fn length_mismatch_is_invalid_input() {
        let err = enclosed_area(&[1.0, 2.0, 3.0, 4.0, 5.0], &[0.0, 1.0, 0.0, -1.0]).unwrap_err();
        assert_eq!(err, MillerError::LengthMismatch { r: 5, z: 4 });
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn degenerate_sequences_enclose_nothing() {
        assert_eq!(enclosed_area(&[], &[]).unwrap(), 0.0);
        assert_eq!(enclosed_area(&[3.0], &[1.0]).unwrap(), 0.0);
    }
}
