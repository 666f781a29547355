//! Integrator

mod common;
mod context;

use crate::geometry::*;
use crate::sampler::*;
use crate::scene::Scene;
use crate::spectrum::*;

// Re-export.
pub use common::*;
pub use context::*;

/// Integrator interface.
pub trait Integrator {
    /// Prepare per-scene state once the scene is committed and before any
    /// call to `li()`.
    ///
    /// * `scene` - The scene
    fn preprocess(&mut self, _scene: &Scene) {}

    /// Returns the incident radiance at the origin of a given ray.
    ///
    /// Safe to call from many threads at once as long as each thread passes
    /// its own `ctx` and `sampler`.
    ///
    /// * `ctx`     - Per-thread rendering context.
    /// * `sampler` - The sampler.
    /// * `scene`   - The scene.
    /// * `ray`     - The camera ray.
    fn li(
        &self,
        ctx: &mut RenderContext,
        sampler: &mut dyn Sampler,
        scene: &Scene,
        ray: &Ray,
    ) -> Spectrum;
}
