//! Sampler

use crate::geometry::*;
use crate::pbrt::*;

/// Source of uniform sample values in [0, 1) consumed by the integrator and
/// the scattering functions. Every rendering thread owns its own sampler.
pub trait Sampler {
    /// Returns the sample value for the next dimension of the current sample
    /// vector.
    fn get_1d(&mut self) -> Float;

    /// Returns the sample value for the next two dimensions of the current
    /// sample vector.
    fn get_2d(&mut self) -> Point2f;

    /// Generates a new, independent instance for use by another rendering
    /// thread.
    ///
    /// * `seed` - The seed for the new instance.
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler + Send>;
}
