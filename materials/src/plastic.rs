//! Plastic Material

use rtcore::interaction::*;
use rtcore::material::*;
use rtcore::memory::*;
use rtcore::microfacet::*;
use rtcore::paramset::*;
use rtcore::pbrt::*;
use rtcore::reflection::*;
use rtcore::spectrum::*;

/// Implements plastic material as a mixture of a diffuse and glossy scattering
/// function with parameters controlling the particular colors and specular
/// highlight size.
#[derive(Clone, Debug)]
pub struct PlasticMaterial {
    /// Spectral diffuse reflection.
    pub kd: Spectrum,

    /// Spectral specular reflection.
    pub ks: Spectrum,

    /// Perceptual roughness in [0, 1].
    pub roughness: Float,

    /// Index of refraction of the coating.
    pub eta: Float,
}

impl PlasticMaterial {
    /// Create a new `PlasticMaterial`.
    ///
    /// * `kd`        - Spectral diffuse reflection.
    /// * `ks`        - Spectral specular reflection.
    /// * `roughness` - Perceptual roughness in [0, 1].
    /// * `eta`       - Index of refraction of the coating.
    pub fn new(kd: Spectrum, ks: Spectrum, roughness: Float, eta: Float) -> Self {
        Self {
            kd: kd.clamp(0.0, 1.0),
            ks: ks.clamp(0.0, 1.0),
            roughness: clamp(roughness, 0.0, 1.0),
            eta,
        }
    }
}

impl Material for PlasticMaterial {
    /// Builds a hybrid of a Lambertian base and a microfacet coat. When only
    /// one of them has a non-black colour it is returned on its own.
    ///
    /// * `_si`   - The surface interaction at the intersection.
    /// * `arena` - The arena for memory allocations.
    fn compute_bsdf<'arena>(
        &self,
        _si: &SurfaceInteraction,
        arena: &'arena TransientArena,
    ) -> Result<Option<&'arena BxDF<'arena>>, ArenaError> {
        let mut hybrid = HybridBxDF::new();

        // Initialize diffuse component of plastic material.
        if !self.kd.is_black() {
            hybrid.add(BxDF::from(LambertianReflection::new(self.kd)).alloc(arena)?);
        }

        // Initialize specular component of plastic material.
        if !self.ks.is_black() {
            let distrib = TrowbridgeReitzDistribution::from_roughness(self.roughness, false);
            hybrid.add(
                BxDF::from(MicrofacetReflection::new(self.ks, distrib, 1.0, self.eta))
                    .alloc(arena)?,
            );
        }

        match hybrid.len() {
            0 => Ok(None),
            1 => Ok(hybrid.iter().next()),
            _ => BxDF::Hybrid(hybrid).alloc(arena).map(Some),
        }
    }
}

impl From<&ParamSet> for PlasticMaterial {
    /// Create a plastic material from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let kd = params.find_one_spectrum("Kd", Spectrum::new(0.25));
        let ks = params.find_one_spectrum("Ks", Spectrum::new(0.25));
        let roughness = params.find_one_float("roughness", 0.1);
        let eta = params.find_one_float("eta", 1.5);
        Self::new(kd, ks, roughness, eta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_hybrid_of_diffuse_and_glossy() {
        let arena = TransientArena::default();
        let m = PlasticMaterial::from(&ParamSet::new());
        let bxdf = m
            .compute_bsdf(&SurfaceInteraction::default(), &arena)
            .unwrap()
            .unwrap();
        assert!(matches!(bxdf, BxDF::Hybrid(_)));
        assert_eq!(
            bxdf.get_type(),
            BxDFType::REFLECTION | BxDFType::DIFFUSE | BxDFType::GLOSSY
        );
        assert_eq!(bxdf.num_components(BxDFType::all()), 2);
    }

    #[test]
    fn single_lobe_is_not_wrapped() {
        let arena = TransientArena::default();
        let m = PlasticMaterial::new(Spectrum::new(0.5), Spectrum::ZERO, 0.1, 1.5);
        let bxdf = m
            .compute_bsdf(&SurfaceInteraction::default(), &arena)
            .unwrap()
            .unwrap();
        assert!(matches!(bxdf, BxDF::LambertianReflection(_)));

        let m = PlasticMaterial::new(Spectrum::ZERO, Spectrum::ZERO, 0.1, 1.5);
        assert!(m
            .compute_bsdf(&SurfaceInteraction::default(), &arena)
            .unwrap()
            .is_none());
    }
}
