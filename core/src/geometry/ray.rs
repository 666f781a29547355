//! Rays

use super::{Point3f, Vector3f};
use crate::pbrt::Float;

/// A semi-infinite line specified by its origin and direction.
#[derive(Copy, Clone, Debug, Default)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,
}

impl Ray {
    /// Returns a new ray.
    ///
    /// * `o` - Origin.
    /// * `d` - Direction.
    pub fn new(o: Point3f, d: Vector3f) -> Self {
        Self { o, d }
    }

    /// Returns the position along the ray at a given parameter.
    ///
    /// * `t` - The parameter.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }
}
