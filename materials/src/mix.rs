//! Mix Material

use rtcore::interaction::*;
use rtcore::material::*;
use rtcore::memory::*;
use rtcore::reflection::*;
use std::sync::Arc;

/// Combines the scattering functions of two materials into one hybrid with
/// equal weights.
pub struct MixMaterial {
    /// First material.
    m1: ArcMaterial,

    /// Second material.
    m2: ArcMaterial,
}

impl MixMaterial {
    /// Create a new `MixMaterial`.
    ///
    /// * `m1` - First material.
    /// * `m2` - Second material.
    pub fn new(m1: ArcMaterial, m2: ArcMaterial) -> Self {
        Self {
            m1: Arc::clone(&m1),
            m2: Arc::clone(&m2),
        }
    }
}

/// Add `bxdf` to `hybrid`, flattening nested hybrids into their leaves.
/// Leaves beyond the hybrid's capacity are dropped with a warning.
fn add_leaves<'arena>(hybrid: &mut HybridBxDF<'arena>, bxdf: &'arena BxDF<'arena>) {
    match bxdf {
        BxDF::Hybrid(inner) => {
            for child in inner.iter() {
                add_leaves(hybrid, child);
            }
        }
        _ if hybrid.len() < MAX_BXDFS => hybrid.add(bxdf),
        _ => warn!("Mix material exceeds {} BxDFs. Dropping one.", MAX_BXDFS),
    }
}

impl Material for MixMaterial {
    /// Builds both materials' scattering functions into the arena and averages
    /// their leaves in a single hybrid.
    ///
    /// * `si`    - The surface interaction at the intersection.
    /// * `arena` - The arena for memory allocations.
    fn compute_bsdf<'arena>(
        &self,
        si: &SurfaceInteraction,
        arena: &'arena TransientArena,
    ) -> Result<Option<&'arena BxDF<'arena>>, ArenaError> {
        let b1 = self.m1.compute_bsdf(si, arena)?;
        let b2 = self.m2.compute_bsdf(si, arena)?;

        let (b1, b2) = match (b1, b2) {
            (None, None) => return Ok(None),
            (Some(b), None) | (None, Some(b)) => return Ok(Some(b)),
            (Some(b1), Some(b2)) => (b1, b2),
        };

        let mut hybrid = HybridBxDF::new();
        add_leaves(&mut hybrid, b1);
        add_leaves(&mut hybrid, b2);
        BxDF::Hybrid(hybrid).alloc(arena).map(Some)
    }
}
