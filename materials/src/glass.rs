//! Glass Material

use rtcore::interaction::*;
use rtcore::material::*;
use rtcore::memory::*;
use rtcore::paramset::*;
use rtcore::pbrt::*;
use rtcore::reflection::*;
use rtcore::spectrum::*;

/// Implements a smooth dielectric that reflects or refracts according to
/// Fresnel.
#[derive(Clone, Debug)]
pub struct GlassMaterial {
    /// Spectral transmittance.
    pub kt: Spectrum,

    /// Index of refraction inside the surface.
    pub eta: Float,
}

impl GlassMaterial {
    /// Create a new `GlassMaterial`.
    ///
    /// * `kt`  - Spectral transmittance. Clamped to [0, 1].
    /// * `eta` - Index of refraction inside the surface.
    pub fn new(kt: Spectrum, eta: Float) -> Self {
        Self {
            kt: kt.clamp(0.0, 1.0),
            eta,
        }
    }
}

impl Material for GlassMaterial {
    /// Builds a specular transmission BTDF with vacuum outside.
    ///
    /// * `_si`   - The surface interaction at the intersection.
    /// * `arena` - The arena for memory allocations.
    fn compute_bsdf<'arena>(
        &self,
        _si: &SurfaceInteraction,
        arena: &'arena TransientArena,
    ) -> Result<Option<&'arena BxDF<'arena>>, ArenaError> {
        if self.kt.is_black() {
            return Ok(None);
        }
        BxDF::from(SpecularTransmission::new(self.kt, 1.0, self.eta))
            .alloc(arena)
            .map(Some)
    }
}

impl From<&ParamSet> for GlassMaterial {
    /// Create a glass material from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let kt = params.find_one_spectrum("Kt", Spectrum::ONE);
        let mut eta = params.find_one_float("eta", 1.5);
        if eta <= 0.0 {
            warn!("Glass eta {} is not positive. Using 1.5.", eta);
            eta = 1.5;
        }
        Self::new(kt, eta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_specular_transmission() {
        let arena = TransientArena::default();
        let mut ps = ParamSet::new();
        ps.add_float("eta", &[1.33]);
        let m = GlassMaterial::from(&ps);
        assert_eq!(m.eta, 1.33);

        let bxdf = m
            .compute_bsdf(&SurfaceInteraction::default(), &arena)
            .unwrap()
            .unwrap();
        let t = bxdf.get_type();
        assert!(t.is_specular());
        assert!(t.matches(BxDFType::TRANSMISSION));
        assert!(t.matches(BxDFType::REFLECTION));
    }

    #[test]
    fn invalid_eta_falls_back() {
        let mut ps = ParamSet::new();
        ps.add_float("eta", &[0.0]);
        assert_eq!(GlassMaterial::from(&ps).eta, 1.5);
    }
}
