//! Power Light Distribution.

use super::LightDistribution;
use crate::geometry::*;
use crate::sampling::*;
use crate::scene::*;
use std::sync::Arc;

/// PowerLightDistribution returns a distribution with sampling probability
/// proportional to the total emitted power for each area light. It ignores
/// the shading point. When no light reports any power, the choice is uniform.
pub struct PowerLightDistribution {
    distrib: Arc<Distribution1D>,
}

impl PowerLightDistribution {
    /// Create a new instance of `PowerLightDistribution`.
    ///
    /// * `scene` - The scene; must contain at least one area light.
    pub fn new(scene: &Scene) -> Self {
        let power: Vec<_> = scene
            .area_lights
            .iter()
            .map(|light| {
                let p = light.power();
                if p.is_finite() && p > 0.0 {
                    p
                } else {
                    0.0
                }
            })
            .collect();
        debug!("Light power distribution {:?}", power);
        Self {
            distrib: Arc::new(Distribution1D::new(power)),
        }
    }
}

impl LightDistribution for PowerLightDistribution {
    fn lookup(&self, _p: &Point3f) -> Option<Arc<Distribution1D>> {
        Some(Arc::clone(&self.distrib))
    }
}
