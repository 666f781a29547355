//! Primitives

use crate::geometry::*;
use crate::interaction::*;
use crate::pbrt::*;
use std::sync::Arc;

mod geometric_primitive;
mod list;

// Re-export
pub use geometric_primitive::*;
pub use list::*;

/// Identifies a primitive for shadow ray target checks. Derived from the
/// address of the primitive's shape.
pub type PrimitiveId = usize;

/// Returns the identity of the primitive built from `shape`.
///
/// * `shape` - The shape.
pub fn primitive_id(shape: &ArcShape) -> PrimitiveId {
    Arc::as_ptr(shape) as *const () as usize
}

/// Primitive is the bridge between the geometry processing and shading
/// subsystems.
pub trait Primitive {
    /// Returns a bounding box in the world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns the nearest intersection with the ray within `[t_min, t_max]`.
    ///
    /// * `r`     - The ray.
    /// * `t_min` - Minimum parametric distance.
    /// * `t_max` - Maximum parametric distance.
    fn intersect(&self, r: &Ray, t_min: Float, t_max: Float) -> Option<Intersection<'_>>;

    /// Returns `true` if the ray intersects the primitive within
    /// `[t_min, t_max]`.
    ///
    /// * `r`     - The ray.
    /// * `t_min` - Minimum parametric distance.
    /// * `t_max` - Maximum parametric distance.
    fn intersect_p(&self, r: &Ray, t_min: Float, t_max: Float) -> bool {
        self.intersect(r, t_min, t_max).is_some()
    }
}

/// Atomic reference counted `Primitive`.
pub type ArcPrimitive = Arc<dyn Primitive + Send + Sync>;
