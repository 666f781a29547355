//! Common sampling functions.

use crate::geometry::*;
use crate::pbrt::*;

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction from a sphere.
#[inline]
pub fn uniform_sphere_pdf() -> Float {
    INV_FOUR_PI
}

/// Sample a point on a unit disk by mapping from a unit square to the unit
/// circle. The concentric mapping takes points in [-1, 1]^2 to unit disk by
/// uniformly mapping concentric squares to concentric circles.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to [-1,1]^2.
    let ox = 2.0 * u[0] - 1.0;
    let oy = 2.0 * u[1] - 1.0;

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return Point2f::new(0.0, 0.0);
    }

    // Apply concentric mapping to point.
    let (r, theta) = if abs(ox) > abs(oy) {
        (ox, PI_OVER_FOUR * (oy / ox))
    } else {
        (oy, PI_OVER_TWO - PI_OVER_FOUR * (ox / oy))
    };

    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Sample a direction on the +z hemisphere using cosine-weighted sampling
/// (Malley's method).
///
/// * `u` - The random sample point.
#[inline]
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d.x * d.x - d.y * d.y).sqrt();
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for cosine-weighted sampling a direction from a hemisphere.
///
/// * `cos_theta` - Cosine of the angle to the hemisphere axis.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    cos_theta * INV_PI
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    prop_range!(unit_f32, f32, 0.0..1.0f32);
    prop_point2!(unit_point2, f32, unit_f32(), unit_f32());

    #[test]
    fn concentric_disk_center() {
        let p = concentric_sample_disk(&Point2f::new(0.5, 0.5));
        assert_eq!(p, Point2f::new(0.0, 0.0));
    }

    proptest! {
        #[test]
        fn concentric_disk_inside_unit_circle(u in unit_point2()) {
            let p = concentric_sample_disk(&u);
            prop_assert!(p.x * p.x + p.y * p.y <= 1.0 + 1e-5);
        }

        #[test]
        fn cosine_hemisphere_is_unit_and_upper(u in unit_point2()) {
            let w = cosine_sample_hemisphere(&u);
            prop_assert!(w.z >= 0.0);
            prop_assert!(approx_eq!(f32, w.length(), 1.0, epsilon = 1e-4));
        }

        #[test]
        fn uniform_sphere_is_unit(u in unit_point2()) {
            let w = uniform_sample_sphere(&u);
            prop_assert!(approx_eq!(f32, w.length(), 1.0, epsilon = 1e-4));
        }
    }
}
