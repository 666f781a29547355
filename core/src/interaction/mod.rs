//! Interactions

use crate::geometry::*;
use crate::light::*;
use crate::material::*;
use crate::pbrt::*;
use crate::primitives::*;
use crate::spectrum::*;

/// Hit provides the geometry of a single point on a surface: the sampled
/// point on a light, the reference point of a shadow ray, or the point a
/// camera ray hit.
#[derive(Copy, Clone, Debug, Default)]
pub struct Hit {
    /// Point of interaction.
    pub p: Point3f,

    /// Geometric surface normal at the point `p`.
    pub n: Normal3f,
}

impl Hit {
    /// Create a new hit.
    ///
    /// * `p` - Point of interaction.
    /// * `n` - Geometric surface normal.
    pub fn new(p: Point3f, n: Normal3f) -> Self {
        Self { p, n }
    }

    /// Returns a ray leaving the hit point in the given direction.
    ///
    /// * `d` - The direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        Ray::new(self.p, *d)
    }
}

/// The result of a ray-shape intersection.
#[derive(Copy, Clone, Debug, Default)]
pub struct SurfaceInteraction {
    /// Common geometry of the hit point.
    pub hit: Hit,

    /// Parametric distance along the ray to the hit.
    pub t: Float,

    /// Shading normal, possibly interpolated or perturbed. Faces the same side
    /// as the geometric normal.
    pub shading_n: Normal3f,

    /// Surface (u, v) parameterization at the hit point.
    pub uv: Point2f,

    /// The negative ray direction (outgoing direction used when computing
    /// lighting at points).
    pub wo: Vector3f,
}

impl SurfaceInteraction {
    /// Create a new surface interaction where the shading normal is the
    /// geometric normal.
    ///
    /// * `p`  - Point of interaction.
    /// * `n`  - Geometric surface normal.
    /// * `t`  - Parametric distance along the ray.
    /// * `uv` - Surface (u, v) parameterization.
    /// * `wo` - Outgoing direction.
    pub fn new(p: Point3f, n: Normal3f, t: Float, uv: Point2f, wo: Vector3f) -> Self {
        Self {
            hit: Hit::new(p, n),
            t,
            shading_n: n,
            uv,
            wo,
        }
    }
}

/// Intersection record returned by the scene for the nearest hit. It is only
/// valid for the bounce that produced it.
#[derive(Copy, Clone)]
pub struct Intersection<'scene> {
    /// Geometry of the hit.
    pub isect: SurfaceInteraction,

    /// The primitive that was hit.
    pub primitive: &'scene GeometricPrimitive,
}

impl<'scene> Intersection<'scene> {
    /// Create a new intersection record.
    ///
    /// * `isect`     - Geometry of the hit.
    /// * `primitive` - The primitive that was hit.
    pub fn new(isect: SurfaceInteraction, primitive: &'scene GeometricPrimitive) -> Self {
        Self { isect, primitive }
    }

    /// Returns the parametric hit distance.
    pub fn t(&self) -> Float {
        self.isect.t
    }

    /// Returns the identity of the primitive that was hit.
    pub fn primitive_id(&self) -> PrimitiveId {
        self.primitive.id()
    }

    /// Returns the material bound to the hit primitive, if any.
    pub fn material(&self) -> Option<&'scene ArcMaterial> {
        self.primitive.material.as_ref()
    }

    /// Returns the area light bound to the hit primitive, if any.
    pub fn area_light(&self) -> Option<&'scene ArcLight> {
        self.primitive.area_light.as_ref()
    }

    /// Returns the radiance emitted from the hit point in direction `w`, or
    /// black if the primitive does not emit.
    ///
    /// * `w` - Outgoing direction.
    pub fn le(&self, w: &Vector3f) -> Spectrum {
        self.area_light()
            .map_or(Spectrum::ZERO, |light| light.l(&self.isect.hit, w))
    }
}
