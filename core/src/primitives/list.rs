//! Primitive List

use super::*;

/// Linear aggregate that tests every primitive. Suitable for small scenes;
/// it stands in for an acceleration structure.
pub struct PrimitiveList {
    /// The primitives.
    primitives: Vec<Arc<GeometricPrimitive>>,

    /// Union of the primitives' bounds.
    bounds: Bounds3f,
}

impl PrimitiveList {
    /// Create a new `PrimitiveList`.
    ///
    /// * `primitives` - The primitives.
    pub fn new(primitives: Vec<Arc<GeometricPrimitive>>) -> Self {
        let bounds = primitives
            .iter()
            .fold(Bounds3f::EMPTY, |b, p| b.union(&p.world_bound()));
        info!("Primitive list created with {} primitives", primitives.len());
        Self { primitives, bounds }
    }

    /// Returns the number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns true if the list has no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

impl Primitive for PrimitiveList {
    fn world_bound(&self) -> Bounds3f {
        self.bounds
    }

    fn intersect(&self, r: &Ray, t_min: Float, t_max: Float) -> Option<Intersection<'_>> {
        let mut closest = t_max;
        let mut result = None;
        for p in self.primitives.iter() {
            if let Some(isect) = p.intersect(r, t_min, closest) {
                closest = isect.t();
                result = Some(isect);
            }
        }
        result
    }

    fn intersect_p(&self, r: &Ray, t_min: Float, t_max: Float) -> bool {
        self.primitives.iter().any(|p| p.intersect_p(r, t_min, t_max))
    }
}
