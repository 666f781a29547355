//! Microfacet Reflection

use super::*;
use crate::microfacet::*;

/// BRDF for modeling glossy reflection from rough surfaces using the
/// Torrance-Sparrow model with a GGX distribution, separable Smith masking and
/// a Schlick Fresnel term.
#[derive(Copy, Clone, Debug)]
pub struct MicrofacetReflection {
    /// Reflectance spectrum which gives the fraction of incident light that
    /// is scattered.
    r: Spectrum,

    /// Microfacet distribution.
    distribution: TrowbridgeReitzDistribution,

    /// Index of refraction on the outside of the surface.
    eta_i: Float,

    /// Index of refraction of the surface.
    eta_t: Float,
}

impl MicrofacetReflection {
    /// Create a new instance of `MicrofacetReflection`.
    ///
    /// * `r`            - Reflectance spectrum.
    /// * `distribution` - Microfacet distribution.
    /// * `eta_i`        - Index of refraction on the outside of the surface.
    /// * `eta_t`        - Index of refraction of the surface.
    pub fn new(
        r: Spectrum,
        distribution: TrowbridgeReitzDistribution,
        eta_i: Float,
        eta_t: Float,
    ) -> Self {
        Self {
            r,
            distribution,
            eta_i,
            eta_t,
        }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::REFLECTION | BxDFType::GLOSSY
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        if !same_hemisphere(wo, wi) {
            return Spectrum::ZERO;
        }

        let cos_theta_o = abs_cos_theta(wo);
        let cos_theta_i = abs_cos_theta(wi);
        let wh = *wi + *wo;

        // Handle degenerate cases for microfacet reflection.
        if cos_theta_i == 0.0 || cos_theta_o == 0.0 {
            return Spectrum::ZERO;
        }
        if wh.x == 0.0 && wh.y == 0.0 && wh.z == 0.0 {
            return Spectrum::ZERO;
        }

        let wh = wh.normalize();
        let f = fr_schlick(wi.dot(&wh), self.eta_i, self.eta_t);
        let d = self.distribution.d(&wh);
        let g = self.distribution.g(wo, wi);
        self.r * (d * g * f / (4.0 * cos_theta_i * cos_theta_o))
    }

    /// Samples a microfacet normal and reflects `wo` about it.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        if wo.z == 0.0 {
            return BxDFSample::from(self.get_type());
        }

        let wh = self.distribution.sample_wh(wo, u);
        if wo.dot(&wh) < 0.0 {
            // Should be rare.
            return BxDFSample::from(self.get_type());
        }

        let wi = reflect(wo, &wh);
        if !same_hemisphere(wo, &wi) {
            return BxDFSample::from(self.get_type());
        }

        let wi_dot_wh = wi.dot(&wh);
        if wi_dot_wh <= 0.0 {
            return BxDFSample::from(self.get_type());
        }

        // Compute PDF of `wi` for microfacet reflection.
        let pdf = self.distribution.pdf(wo, &wh) / (4.0 * wi_dot_wh);
        let f = self.f(wo, &wi);
        if pdf == 0.0 || !pdf.is_finite() {
            BxDFSample::from(self.get_type())
        } else {
            BxDFSample::new(f, pdf, wi, self.get_type())
        }
    }

    /// Evaluates the PDF of `sample_f()`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !same_hemisphere(wo, wi) {
            return 0.0;
        }

        let wh = *wo + *wi;
        if wh.x == 0.0 && wh.y == 0.0 && wh.z == 0.0 {
            return 0.0;
        }
        let wh = wh.normalize();
        let wi_dot_wh = wi.abs_dot(&wh);
        if wi_dot_wh == 0.0 {
            0.0
        } else {
            self.distribution.pdf(wo, &wh) / (4.0 * wi_dot_wh)
        }
    }
}
