//! Specular Reflection

use super::*;

/// BRDF for perfect mirror reflection.
///
/// The delta distribution is reported with a PDF of 1 by convention. That is
/// not a density; it only keeps the `f / pdf` ratio finite downstream.
#[derive(Copy, Clone, Debug)]
pub struct SpecularReflection {
    /// Spectrum used to scale the reflected colour.
    r: Spectrum,
}

impl SpecularReflection {
    /// Create a new instance of `SpecularReflection`.
    ///
    /// * `r` - Spectrum used to scale the reflected colour.
    pub fn new(r: Spectrum) -> Self {
        Self { r }
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        BxDFType::REFLECTION | BxDFType::SPECULAR
    }

    /// No scattering is returned for arbitrary direction pairs.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    /// Mirror `wo` about the shading normal.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values (unused).
    pub fn sample_f(&self, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        let wi = Vector3f::new(-wo.x, -wo.y, wo.z);
        let cos = abs_cos_theta(&wi);
        if cos == 0.0 {
            BxDFSample::from(self.get_type())
        } else {
            BxDFSample::new(self.r / cos, 1.0, wi, self.get_type())
        }
    }

    /// Always zero; the direction is only reachable by sampling.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}
