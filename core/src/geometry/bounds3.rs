//! 3-D Axis Aligned Bounding Boxes.

use super::{Point3, Point3f};
use crate::pbrt::{Float, INFINITY};
use num_traits::Num;

/// 3-D Axis Aligned Bounding Box.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds3<T> {
    /// Minimum bounds.
    pub p_min: Point3<T>,

    /// Maximum bounds.
    pub p_max: Point3<T>,
}

/// 3-D bounding box containing `Float` points.
pub type Bounds3f = Bounds3<Float>;

impl Bounds3f {
    /// An empty box; the union of it with anything is that thing.
    pub const EMPTY: Self = Self {
        p_min: Point3 {
            x: INFINITY,
            y: INFINITY,
            z: INFINITY,
        },
        p_max: Point3 {
            x: -INFINITY,
            y: -INFINITY,
            z: -INFINITY,
        },
    };

    /// Returns true if the box does not contain any point.
    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    /// Returns the center and radius of a sphere that bounds the box. An
    /// empty box is bounded by the unit sphere at the origin.
    pub fn bounding_sphere(&self) -> (Point3f, Float) {
        if self.is_empty() {
            return (Point3f::ZERO, 1.0);
        }
        let center = 0.5 * (self.p_min + self.p_max);
        let radius = center.distance(self.p_max);
        (center, radius)
    }
}

impl<T: Num + PartialOrd + Copy> Bounds3<T> {
    /// Creates a new bounding box from 2 opposite corners.
    ///
    /// * `p1` - First corner.
    /// * `p2` - Second corner.
    pub fn new(p1: Point3<T>, p2: Point3<T>) -> Self {
        Self {
            p_min: p1.min(&p2),
            p_max: p1.max(&p2),
        }
    }

    /// Returns the box grown to include a point.
    ///
    /// * `p` - The point.
    pub fn union_point(&self, p: &Point3<T>) -> Self {
        Self {
            p_min: self.p_min.min(p),
            p_max: self.p_max.max(p),
        }
    }

    /// Returns the box grown to include another box.
    ///
    /// * `other` - The other box.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            p_min: self.p_min.min(&other.p_min),
            p_max: self.p_max.max(&other.p_max),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_union() {
        let b = Bounds3f::new(Point3f::new(-1.0, -1.0, -1.0), Point3f::new(1.0, 1.0, 1.0));
        assert!(Bounds3f::EMPTY.is_empty());
        assert!(Bounds3f::EMPTY.union(&b) == b);
    }

    #[test]
    fn bounding_sphere_of_cube() {
        let b = Bounds3f::new(Point3f::new(1.0, 1.0, 1.0), Point3f::new(-1.0, -1.0, -1.0));
        let (c, r) = b.bounding_sphere();
        assert!(c == Point3f::ZERO);
        assert!((r - Float::sqrt(3.0)).abs() < 1e-6);
    }
}
