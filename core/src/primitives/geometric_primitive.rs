//! Geometric Primitives

use super::*;
use crate::light::*;
use crate::material::*;

/// GeometricPrimitive represents a single shape in a scene.
#[derive(Clone)]
pub struct GeometricPrimitive {
    /// The shape.
    pub shape: ArcShape,

    /// The material. Primitives without one absorb everything that reaches
    /// them.
    pub material: Option<ArcMaterial>,

    /// Optional area light that describes emission characteristics if it
    /// emits light.
    pub area_light: Option<ArcLight>,
}

impl GeometricPrimitive {
    /// Create a new geometric primitive.
    ///
    /// * `shape`      - The shape.
    /// * `material`   - The material.
    /// * `area_light` - Optional area light that describes emission
    ///                  characteristics if it emits light.
    pub fn new(
        shape: ArcShape,
        material: Option<ArcMaterial>,
        area_light: Option<ArcLight>,
    ) -> Self {
        Self {
            shape,
            material,
            area_light,
        }
    }

    /// Returns the identity used by shadow rays targeting this primitive.
    pub fn id(&self) -> PrimitiveId {
        primitive_id(&self.shape)
    }
}

impl Primitive for GeometricPrimitive {
    fn world_bound(&self) -> Bounds3f {
        self.shape.world_bound()
    }

    fn intersect(&self, r: &Ray, t_min: Float, t_max: Float) -> Option<Intersection<'_>> {
        let isect = self.shape.intersect(r, t_min, t_max)?;
        debug_assert!(isect.hit.n.dot(&isect.shading_n) > 0.0);
        Some(Intersection::new(isect, self))
    }

    fn intersect_p(&self, r: &Ray, t_min: Float, t_max: Float) -> bool {
        self.shape.intersect_p(r, t_min, t_max)
    }
}
