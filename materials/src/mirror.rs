//! Mirror Material

use rtcore::interaction::*;
use rtcore::material::*;
use rtcore::memory::*;
use rtcore::paramset::*;
use rtcore::reflection::*;
use rtcore::spectrum::*;

/// Implements a perfect mirror.
#[derive(Clone, Debug)]
pub struct MirrorMaterial {
    /// Spectral reflectance.
    pub kr: Spectrum,
}

impl MirrorMaterial {
    /// Create a new `MirrorMaterial`.
    ///
    /// * `kr` - Spectral reflectance. Clamped to [0, 1].
    pub fn new(kr: Spectrum) -> Self {
        Self {
            kr: kr.clamp(0.0, 1.0),
        }
    }
}

impl Material for MirrorMaterial {
    /// Builds a specular reflection BRDF.
    ///
    /// * `_si`   - The surface interaction at the intersection.
    /// * `arena` - The arena for memory allocations.
    fn compute_bsdf<'arena>(
        &self,
        _si: &SurfaceInteraction,
        arena: &'arena TransientArena,
    ) -> Result<Option<&'arena BxDF<'arena>>, ArenaError> {
        if self.kr.is_black() {
            return Ok(None);
        }
        BxDF::from(SpecularReflection::new(self.kr))
            .alloc(arena)
            .map(Some)
    }
}

impl From<&ParamSet> for MirrorMaterial {
    /// Create a mirror material from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let kr = params.find_one_spectrum("Kr", Spectrum::new(0.9));
        Self::new(kr)
    }
}
