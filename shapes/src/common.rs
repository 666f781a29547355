//! Common

use rtcore::pbrt::*;

/// Solves the quadratic equation `a t² + b t + c = 0` and returns the two
/// roots in increasing order. The discriminant is computed in double
/// precision. Returns `None` if there are no real roots.
///
/// * `a` - Quadratic coefficient.
/// * `b` - Linear coefficient.
/// * `c` - Constant term.
pub fn solve_quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    let (a, b, c) = (a as f64, b as f64, c as f64);
    if a == 0.0 {
        return None;
    }

    let discrim = b * b - 4.0 * a * c;
    if discrim < 0.0 {
        return None;
    }
    let root_discrim = discrim.sqrt();

    // Avoid cancellation when b and the root have the same magnitude.
    let q = if b < 0.0 {
        -0.5 * (b - root_discrim)
    } else {
        -0.5 * (b + root_discrim)
    };
    let (t0, t1) = if q == 0.0 {
        (0.0, 0.0)
    } else {
        (q / a, c / q)
    };
    if t0 > t1 {
        Some((t1 as Float, t0 as Float))
    } else {
        Some((t0 as Float, t1 as Float))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn two_roots_in_order() {
        let (t0, t1) = solve_quadratic(1.0, -3.0, 2.0).unwrap();
        assert!(approx_eq!(f32, t0, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, t1, 2.0, epsilon = 1e-6));
    }

    #[test]
    fn no_real_roots() {
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_none());
        assert!(solve_quadratic(0.0, 1.0, 1.0).is_none());
    }
}
