//! Trowbridge-Reitz (GGX) Distribution

use super::*;

/// Implements the isotropic Trowbridge-Reitz (GGX) distribution.
#[derive(Copy, Clone, Debug)]
pub struct TrowbridgeReitzDistribution {
    /// Indicates whether or not the visible area is sampled.
    sample_visible_area: bool,

    /// Width of the distribution of slopes.
    alpha: Float,
}

impl TrowbridgeReitzDistribution {
    /// Smallest alpha allowed; keeps `d()` finite for mirror-like surfaces.
    pub const MIN_ALPHA: Float = 0.001;

    /// Create a new `TrowbridgeReitzDistribution`.
    ///
    /// * `alpha`               - Width of the distribution of slopes.
    /// * `sample_visible_area` - Indicates whether or not the visible area is
    ///                           sampled.
    pub fn new(alpha: Float, sample_visible_area: bool) -> Self {
        Self {
            sample_visible_area,
            alpha: max(Self::MIN_ALPHA, alpha),
        }
    }

    /// Create a distribution from a perceptual roughness in [0, 1]; alpha is
    /// the square of roughness.
    ///
    /// * `roughness`           - Roughness parameter value.
    /// * `sample_visible_area` - Indicates whether or not the visible area is
    ///                           sampled.
    pub fn from_roughness(roughness: Float, sample_visible_area: bool) -> Self {
        Self::new(Self::roughness_to_alpha(roughness), sample_visible_area)
    }

    /// Maps scalar roughness parameter in [0, 1] to alpha.
    ///
    /// * `roughness` - Roughness parameter value.
    pub fn roughness_to_alpha(roughness: Float) -> Float {
        let r = clamp(roughness, 0.0, 1.0);
        r * r
    }

    /// Returns the alpha value.
    pub fn alpha(&self) -> Float {
        self.alpha
    }
}

impl MicrofacetDistribution for TrowbridgeReitzDistribution {
    fn get_sample_visible_area(&self) -> bool {
        self.sample_visible_area
    }

    #[rustfmt::skip]
    fn d(&self, wh: &Vector3f) -> Float {
        let tan2_theta = tan_2_theta(wh);
        if tan2_theta.is_infinite() || tan2_theta.is_nan() {
            0.0
        } else {
            let cos4_theta = cos_2_theta(wh) * cos_2_theta(wh);
            let a2 = self.alpha * self.alpha;
            let e = 1.0 + tan2_theta / a2;
            1.0 / (PI * a2 * cos4_theta * e * e)
        }
    }

    fn lambda(&self, w: &Vector3f) -> Float {
        let abs_tan_theta = abs(tan_theta(w));
        if abs_tan_theta.is_infinite() || abs_tan_theta.is_nan() {
            0.0
        } else {
            let alpha2_tan2_theta = (self.alpha * abs_tan_theta) * (self.alpha * abs_tan_theta);
            (-1.0 + (1.0 + alpha2_tan2_theta).sqrt()) / 2.0
        }
    }

    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f {
        if !self.sample_visible_area {
            let phi = TWO_PI * u[1];
            let tan_theta2 = self.alpha * self.alpha * u[0] / (1.0 - u[0]);
            let cos_theta = 1.0 / (1.0 + tan_theta2).sqrt();
            let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
            let wh = spherical_direction(sin_theta, cos_theta, phi);
            if !same_hemisphere(wo, &wh) {
                -wh
            } else {
                wh
            }
        } else {
            let flip = wo.z < 0.0;
            let wo_up = if flip { -(*wo) } else { *wo };
            let wh = sample_visible_normal(&wo_up, self.alpha, u[0], u[1]);
            if flip {
                -wh
            } else {
                wh
            }
        }
    }
}

/// Samples the slopes of the unit-roughness distribution of visible normals
/// for a direction at angle θ to the normal.
///
/// * `cos_theta` - Cosine of the angle θ measured from the direction to the
///                 z-axis.
/// * `u1`        - The uniform random value.
/// * `u2`        - The uniform random value.
fn sample_unit_slopes(cos_theta: Float, u1: Float, u2: Float) -> (Float, Float) {
    // Normal incidence.
    if cos_theta > 0.9999 {
        let r = (u1 / (1.0 - u1)).sqrt();
        let phi = TWO_PI * u2;
        return (r * phi.cos(), r * phi.sin());
    }

    let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
    let tan_theta = sin_theta / cos_theta;
    let a = 1.0 / tan_theta;
    let g1 = 2.0 / (1.0 + (1.0 + 1.0 / (a * a)).sqrt());

    // Sample slope_x.
    let a = 2.0 * u1 / g1 - 1.0;
    let tmp = min(1.0 / (a * a - 1.0), 1e10);
    let b = tan_theta;
    let d = max(b * b * tmp * tmp - (a * a - b * b) * tmp, 0.0).sqrt();
    let slope_x_1 = b * tmp - d;
    let slope_x_2 = b * tmp + d;
    let slope_x = if a < 0.0 || slope_x_2 > 1.0 / tan_theta {
        slope_x_1
    } else {
        slope_x_2
    };

    // Sample slope_y.
    let (s, u2) = if u2 > 0.5 {
        (1.0, 2.0 * (u2 - 0.5))
    } else {
        (-1.0, 2.0 * (0.5 - u2))
    };
    let z = (u2 * (u2 * (u2 * 0.27385 - 0.73369) + 0.46341))
        / (u2 * (u2 * (u2 * 0.093073 + 0.309420) - 1.000000) + 0.597999);
    let slope_y = s * z * (1.0 + slope_x * slope_x).sqrt();

    (slope_x, slope_y)
}

/// Samples a microfacet normal visible from `w`, which must be in the upper
/// hemisphere.
///
/// * `w`     - Direction in the +z hemisphere.
/// * `alpha` - Width of the distribution of slopes.
/// * `u1`    - The uniform random value.
/// * `u2`    - The uniform random value.
fn sample_visible_normal(w: &Vector3f, alpha: Float, u1: Float, u2: Float) -> Vector3f {
    // Stretch.
    let w_stretched = Vector3f::new(alpha * w.x, alpha * w.y, w.z).normalize();

    let (slope_x, slope_y) = sample_unit_slopes(cos_theta(&w_stretched), u1, u2);

    // Rotate, then unstretch.
    let (cos_p, sin_p) = (cos_phi(&w_stretched), sin_phi(&w_stretched));
    let slope_x_r = cos_p * slope_x - sin_p * slope_y;
    let slope_y_r = sin_p * slope_x + cos_p * slope_y;

    Vector3f::new(-alpha * slope_x_r, -alpha * slope_y_r, 1.0).normalize()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
