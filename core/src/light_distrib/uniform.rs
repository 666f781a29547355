//! Uniform Light Distribution.

use super::LightDistribution;
use crate::geometry::*;
use crate::sampling::*;
use crate::scene::*;
use std::sync::Arc;

/// The simplest possible implementation of `LightDistribution`: this returns
/// a uniform distribution over all area lights, ignoring the provided point.
pub struct UniformLightDistribution {
    distrib: Arc<Distribution1D>,
}

impl UniformLightDistribution {
    /// Create a new instance of `UniformLightDistribution`.
    ///
    /// * `scene` - The scene; must contain at least one area light.
    pub fn new(scene: &Scene) -> Self {
        let prob = vec![1.0; scene.area_lights.len()];
        Self {
            distrib: Arc::new(Distribution1D::new(prob)),
        }
    }
}

impl LightDistribution for UniformLightDistribution {
    fn lookup(&self, _p: &Point3f) -> Option<Arc<Distribution1D>> {
        Some(Arc::clone(&self.distrib))
    }
}
