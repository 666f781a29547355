//! Microfacet Distribution Models

use crate::geometry::*;
use crate::pbrt::*;
use crate::reflection::*;

mod trowbridge_reitz;

// Re-exports
pub use trowbridge_reitz::*;

/// Interface for microfacet distribution models.
pub trait MicrofacetDistribution {
    /// Returns whether or not the visible area is sampled.
    fn get_sample_visible_area(&self) -> bool;

    /// Return the differential area of microfacets oriented with the surface
    /// normal `wh`.
    ///
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn d(&self, wh: &Vector3f) -> Float;

    /// Returns the invisible masked microfacet area per visible microfacet area.
    ///
    /// * `w` - The direction from camera/viewer.
    fn lambda(&self, w: &Vector3f) -> Float;

    /// Evaluates Smith's masking function which gives the fraction of
    /// microfacets that are visible from a given direction.
    ///
    /// * `w` - The direction from camera/viewer.
    fn g1(&self, w: &Vector3f) -> Float {
        1.0 / (1.0 + self.lambda(w))
    }

    /// Returns the fraction of microfacets in a differential area that are
    /// visible from both directions `wo` and `wi`, as the separable product of
    /// the per-direction masking terms.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    fn g(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        self.g1(wo) * self.g1(wi)
    }

    /// Returns a sample from the distribution of normal vectors. The result is
    /// in the same hemisphere as `wo`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    fn sample_wh(&self, wo: &Vector3f, u: &Point2f) -> Vector3f;

    /// Evaluates the PDF of `sample_wh()` for the given outgoing direction and
    /// sampled surface normal.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wh` - A sample normal from the distrubition of normal vectors.
    fn pdf(&self, wo: &Vector3f, wh: &Vector3f) -> Float {
        if self.get_sample_visible_area() {
            let cos_o = abs_cos_theta(wo);
            if cos_o == 0.0 {
                0.0
            } else {
                self.d(wh) * self.g1(wo) * wo.abs_dot(wh) / cos_o
            }
        } else {
            self.d(wh) * abs_cos_theta(wh)
        }
    }
}
