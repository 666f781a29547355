//! Specular Transmission

use super::*;

/// BSDF for a smooth dielectric boundary. Each sample either reflects or
/// refracts, chosen with probability equal to the Schlick Fresnel
/// reflectance. Total internal reflection always reflects.
#[derive(Copy, Clone, Debug)]
pub struct SpecularTransmission {
    /// Spectrum used to scale the scattered colour.
    t: Spectrum,

    /// Index of refraction above the surface (same side as surface normal).
    eta_a: Float,

    /// Index of refraction below the surface (opposite side as surface normal).
    eta_b: Float,
}

impl SpecularTransmission {
    /// Creates a new instance of `SpecularTransmission`.
    ///
    /// * `t`     - Spectrum used to scale the scattered colour.
    /// * `eta_a` - Index of refraction above the surface.
    /// * `eta_b` - Index of refraction below the surface.
    pub fn new(t: Spectrum, eta_a: Float, eta_b: Float) -> Self {
        Self { t, eta_a, eta_b }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::REFLECTION | BxDFType::TRANSMISSION | BxDFType::SPECULAR
    }

    /// No scattering is returned for arbitrary direction pairs.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    /// Sample either the mirror or the refracted direction.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values; `u[0]` picks the event.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        // Figure out which eta is incident and which is transmitted.
        let entering = cos_theta(wo) > 0.0;
        let (eta_i, eta_t) = if entering {
            (self.eta_a, self.eta_b)
        } else {
            (self.eta_b, self.eta_a)
        };

        let n = Vector3f::new(0.0, 0.0, 1.0).face_forward(wo);
        let (wi, sampled_type) = match refract(wo, &n, eta_i / eta_t) {
            Some(wt) if u[0] >= fr_schlick(cos_theta(wo), eta_i, eta_t) => {
                (wt, BxDFType::TRANSMISSION | BxDFType::SPECULAR)
            }
            _ => (
                Vector3f::new(-wo.x, -wo.y, wo.z),
                BxDFType::REFLECTION | BxDFType::SPECULAR,
            ),
        };

        let cos = abs_cos_theta(&wi);
        if cos == 0.0 {
            BxDFSample::from(sampled_type)
        } else {
            BxDFSample::new(self.t / cos, 1.0, wi, sampled_type)
        }
    }

    /// Always zero; the directions are only reachable by sampling.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}
