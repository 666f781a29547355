//! Shading Frame

use super::common::*;
use super::{Normal3f, Vector3f};
use crate::pbrt::abs;

/// Create a new coordinate system from a single unit vector and return
/// the two other vectors.
///
/// A second vector is constructed from the first by zeroing one of the
/// coordinates, swapping the remaining 2 and negating one of them. That is the
/// cross product of `v1` with whichever of the x or y axes is less parallel to
/// it. The third vector is the cross product of the first two.
///
/// * `v1` - The first unit vector to form part of the coordinate system.
pub fn coordinate_system(v1: &Vector3f) -> (Vector3f, Vector3f) {
    let v2 = if abs(v1.x) > abs(v1.y) {
        Vector3f::new(-v1.z, 0.0, v1.x) / (v1.x * v1.x + v1.z * v1.z).sqrt()
    } else {
        Vector3f::new(0.0, v1.z, -v1.y) / (v1.y * v1.y + v1.z * v1.z).sqrt()
    };
    let v3 = v1.cross(&v2);
    (v2, v3)
}

/// An orthonormal basis where the shading normal is the local +Z axis.
///
/// All scattering functions operate in this local space; the frame maps
/// directions (never points) between it and world space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Frame {
    /// First tangent (local +X).
    pub s: Vector3f,

    /// Second tangent (local +Y).
    pub t: Vector3f,

    /// Normal (local +Z).
    pub n: Vector3f,
}

impl Frame {
    /// Builds a frame around a normal.
    ///
    /// * `n` - The normal. Must not be zero length.
    pub fn from_normal(n: &Normal3f) -> Self {
        let n = Vector3f::from(*n);
        assert!(
            n.length_squared() > 0.0,
            "Frame::from_normal() requires a non-zero normal"
        );
        let n = n.normalize();
        let (s, t) = coordinate_system(&n);
        Self { s, t, n }
    }

    /// Transforms a direction from world space to local space.
    ///
    /// * `v` - The direction.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.s), v.dot(&self.t), v.dot(&self.n))
    }

    /// Transforms a direction from local space to world space.
    ///
    /// * `v` - The direction.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(
            self.s.x * v.x + self.t.x * v.y + self.n.x * v.z,
            self.s.y * v.x + self.t.y * v.y + self.n.y * v.z,
            self.s.z * v.x + self.t.z * v.y + self.n.z * v.z,
        )
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
