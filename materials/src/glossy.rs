//! Glossy Material

use rtcore::interaction::*;
use rtcore::material::*;
use rtcore::memory::*;
use rtcore::microfacet::*;
use rtcore::paramset::*;
use rtcore::pbrt::*;
use rtcore::reflection::*;
use rtcore::spectrum::*;

/// Implements a rough conductor-like reflector using the GGX microfacet model
/// with a Schlick Fresnel term.
#[derive(Clone, Debug)]
pub struct GlossyMaterial {
    /// Spectral specular reflection.
    pub ks: Spectrum,

    /// Perceptual roughness in [0, 1].
    pub roughness: Float,

    /// Index of refraction used for the Fresnel term.
    pub eta: Float,

    /// Sample only the visible microfacet normals.
    pub sample_visible_area: bool,
}

impl GlossyMaterial {
    /// Create a new `GlossyMaterial`.
    ///
    /// * `ks`                  - Spectral specular reflection.
    /// * `roughness`           - Perceptual roughness in [0, 1].
    /// * `eta`                 - Index of refraction used for the Fresnel term.
    /// * `sample_visible_area` - Sample only the visible microfacet normals.
    pub fn new(ks: Spectrum, roughness: Float, eta: Float, sample_visible_area: bool) -> Self {
        Self {
            ks: ks.clamp(0.0, 1.0),
            roughness: clamp(roughness, 0.0, 1.0),
            eta,
            sample_visible_area,
        }
    }
}

impl Material for GlossyMaterial {
    /// Builds a microfacet reflection BRDF.
    ///
    /// * `_si`   - The surface interaction at the intersection.
    /// * `arena` - The arena for memory allocations.
    fn compute_bsdf<'arena>(
        &self,
        _si: &SurfaceInteraction,
        arena: &'arena TransientArena,
    ) -> Result<Option<&'arena BxDF<'arena>>, ArenaError> {
        if self.ks.is_black() {
            return Ok(None);
        }
        let distribution =
            TrowbridgeReitzDistribution::from_roughness(self.roughness, self.sample_visible_area);
        BxDF::from(MicrofacetReflection::new(self.ks, distribution, 1.0, self.eta))
            .alloc(arena)
            .map(Some)
    }
}

impl From<&ParamSet> for GlossyMaterial {
    /// Create a glossy material from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let ks = params.find_one_spectrum("Ks", Spectrum::ONE);
        let roughness = params.find_one_float("roughness", 0.3);
        let eta = params.find_one_float("eta", 1.5);
        let sample_visible_area = params.find_one_bool("samplevisiblearea", false);
        Self::new(ks, roughness, eta, sample_visible_area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtcore::geometry::*;

    #[test]
    fn builds_microfacet_reflection() {
        let arena = TransientArena::default();
        let mut ps = ParamSet::new();
        ps.add_float("roughness", &[0.5]);
        ps.add_bool("samplevisiblearea", &[true]);
        let m = GlossyMaterial::from(&ps);
        assert!(m.sample_visible_area);

        let bxdf = m
            .compute_bsdf(&SurfaceInteraction::default(), &arena)
            .unwrap()
            .unwrap();
        assert_eq!(bxdf.get_type(), BxDFType::REFLECTION | BxDFType::GLOSSY);

        let w = Vector3f::new(0.0, 0.0, 1.0);
        assert!(bxdf.f(&w, &w).y() > 0.0);
        assert!(bxdf.pdf(&w, &w) > 0.0);
    }
}
