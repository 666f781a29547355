//! Visibility Tester

use crate::interaction::*;
use crate::pbrt::*;
use crate::primitives::*;
use crate::scene::*;

/// Relative tolerance for a shadow ray to count as reaching its target.
const TARGET_TOLERANCE: Float = 1e-3;

/// VisibilityTester allows lights to return a radiance value under the
/// assumption that the reference point and light source are mutually
/// visible.
#[derive(Copy, Clone, Debug)]
pub struct VisibilityTester {
    /// One endpoint of shadow ray (the shading point).
    pub p0: Hit,

    /// Second endpoint of shadow ray (the sampled light point).
    pub p1: Hit,

    /// The primitive the shadow ray is expected to terminate on. `None` means
    /// the segment only has to be free of occluders.
    pub target: Option<PrimitiveId>,
}

impl VisibilityTester {
    /// Create a new `VisibilityTester` for given endpoints of a shadow ray.
    ///
    /// * `p0`     - One endpoint of shadow ray.
    /// * `p1`     - Second endpoint of shadow ray.
    /// * `target` - Primitive expected at `p1`, if any.
    pub fn new(p0: Hit, p1: Hit, target: Option<PrimitiveId>) -> Self {
        Self { p0, p1, target }
    }

    /// Traces a shadow ray between `p0` and `p1` through the scene and returns
    /// true if the points are visible to each other. With a target, the
    /// nearest hit must be the target primitive at `p1`.
    ///
    /// * `scene` - The scene.
    pub fn unoccluded(&self, scene: &Scene) -> bool {
        let d = self.p1.p - self.p0.p;
        let dist = d.length();
        if dist == 0.0 {
            return false;
        }
        let ray = self.p0.spawn_ray(&(d / dist));
        let t_min = scene.ray_epsilon;

        match self.target {
            None => !scene.intersect_p(&ray, t_min, dist * (1.0 - SHADOW_EPSILON)),
            Some(target) => match scene.intersect(&ray, t_min, dist * (1.0 + SHADOW_EPSILON)) {
                Some(isect) => {
                    isect.primitive_id() == target
                        && abs(dist - isect.t()) <= TARGET_TOLERANCE * dist
                }
                None => false,
            },
        }
    }
}
