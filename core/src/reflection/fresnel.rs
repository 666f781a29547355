//! Fresnel Reflectance

use super::*;

/// Returns the Schlick approximation of the Fresnel reflectance for a
/// dielectric interface.
///
/// When light travels from the denser medium the transmitted angle is used in
/// place of the incident angle, and total internal reflection returns 1.
///
/// * `cos_theta_i` - Cosine of the incident angle to the interface normal.
/// * `eta_i`       - Index of refraction on the incident side.
/// * `eta_t`       - Index of refraction on the transmitted side.
pub fn fr_schlick(cos_theta_i: Float, eta_i: Float, eta_t: Float) -> Float {
    let r0 = (eta_i - eta_t) / (eta_i + eta_t);
    let r0 = r0 * r0;

    let cos_i = clamp(abs(cos_theta_i), 0.0, 1.0);
    let cos = if eta_i > eta_t {
        let eta = eta_i / eta_t;
        let sin_2_theta_t = eta * eta * max(0.0, 1.0 - cos_i * cos_i);
        if sin_2_theta_t >= 1.0 {
            return 1.0;
        }
        (1.0 - sin_2_theta_t).sqrt()
    } else {
        cos_i
    };

    let x = 1.0 - cos;
    r0 + (1.0 - r0) * x * x * x * x * x
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn normal_incidence_gives_r0() {
        let f = fr_schlick(1.0, 1.0, 1.5);
        assert!(approx_eq!(f32, f, 0.04, epsilon = 1e-6));
    }

    #[test]
    fn grazing_incidence_reflects_everything() {
        let f = fr_schlick(0.0, 1.0, 1.5);
        assert!(approx_eq!(f32, f, 1.0, epsilon = 1e-6));
    }

    #[test]
    fn matched_media_never_reflect() {
        assert_eq!(fr_schlick(0.3, 1.33, 1.33), 0.0);
    }

    #[test]
    fn total_internal_reflection() {
        assert_eq!(fr_schlick(0.1, 1.5, 1.0), 1.0);
    }

    #[test]
    fn symmetric_at_normal_incidence() {
        let a = fr_schlick(1.0, 1.0, 1.5);
        let b = fr_schlick(1.0, 1.5, 1.0);
        assert!(approx_eq!(f32, a, b, epsilon = 1e-6));
    }
}
