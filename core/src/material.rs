//! Material

use crate::interaction::*;
use crate::memory::*;
use crate::reflection::*;
use std::sync::Arc;

/// Material trait provides common behavior.
pub trait Material {
    /// Builds the scattering function at the intersection point into the
    /// arena. Returns `Ok(None)` when the surface does not scatter light at all
    /// and an error when the arena cannot hold the result.
    ///
    /// * `si`    - The surface interaction at the intersection.
    /// * `arena` - The arena for memory allocations.
    fn compute_bsdf<'arena>(
        &self,
        si: &SurfaceInteraction,
        arena: &'arena TransientArena,
    ) -> Result<Option<&'arena BxDF<'arena>>, ArenaError>;
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<dyn Material + Send + Sync>;
