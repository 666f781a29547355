//! Matte Material

use rtcore::interaction::*;
use rtcore::material::*;
use rtcore::memory::*;
use rtcore::paramset::*;
use rtcore::reflection::*;
use rtcore::spectrum::*;

/// Implements purely diffuse surfaces.
#[derive(Clone, Debug)]
pub struct MatteMaterial {
    /// Spectral diffuse reflection.
    pub kd: Spectrum,
}

impl MatteMaterial {
    /// Create a new `MatteMaterial`.
    ///
    /// * `kd` - Spectral diffuse reflection. Clamped to [0, 1].
    pub fn new(kd: Spectrum) -> Self {
        Self {
            kd: kd.clamp(0.0, 1.0),
        }
    }
}

impl Material for MatteMaterial {
    /// Builds a Lambertian BRDF. A black albedo absorbs everything and yields
    /// no BSDF.
    ///
    /// * `_si`   - The surface interaction at the intersection.
    /// * `arena` - The arena for memory allocations.
    fn compute_bsdf<'arena>(
        &self,
        _si: &SurfaceInteraction,
        arena: &'arena TransientArena,
    ) -> Result<Option<&'arena BxDF<'arena>>, ArenaError> {
        if self.kd.is_black() {
            return Ok(None);
        }
        BxDF::from(LambertianReflection::new(self.kd))
            .alloc(arena)
            .map(Some)
    }
}

impl From<&ParamSet> for MatteMaterial {
    /// Create a matte material from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let kd = params.find_one_spectrum("Kd", Spectrum::new(0.5));
        Self::new(kd)
    }
}
