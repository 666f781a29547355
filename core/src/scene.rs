//! Scene

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::pbrt::*;
use crate::primitives::*;
use std::sync::Arc;

/// Default minimum ray distance used to avoid self-intersection.
pub const DEFAULT_RAY_EPSILON: Float = 1e-4;

/// Scene.
///
/// Constructing a scene is the commit boundary: lights are preprocessed and
/// classified once here, and the scene is read-only while rendering.
pub struct Scene {
    /// An aggregate of all primitives in the scene.
    pub aggregate: ArcPrimitive,

    /// All light sources in the scene.
    pub lights: Vec<ArcLight>,

    /// Environment and distant lights; always sampled for direct lighting and
    /// consulted when a ray escapes.
    pub global_lights: Vec<ArcLight>,

    /// Lights bound to primitives.
    pub area_lights: Vec<ArcLight>,

    /// The bounding box of the scene geometry.
    pub world_bound: Bounds3f,

    /// Minimum parametric distance for rays leaving a surface.
    pub ray_epsilon: Float,
}

impl Scene {
    /// Creates a new `Scene`.
    ///
    /// * `aggregate` - An aggregate of all primitives in the scene.
    /// * `lights`    - All light sources in the scene.
    pub fn new(aggregate: ArcPrimitive, lights: Vec<ArcLight>) -> Self {
        Self::with_ray_epsilon(aggregate, lights, DEFAULT_RAY_EPSILON)
    }

    /// Creates a new `Scene` with a specific self-intersection epsilon.
    ///
    /// * `aggregate`   - An aggregate of all primitives in the scene.
    /// * `lights`      - All light sources in the scene.
    /// * `ray_epsilon` - Minimum parametric distance for rays leaving a surface.
    pub fn with_ray_epsilon(
        aggregate: ArcPrimitive,
        lights: Vec<ArcLight>,
        ray_epsilon: Float,
    ) -> Self {
        let global_lights: Vec<ArcLight> = lights
            .iter()
            .filter(|l| l.get_type().is_global())
            .map(Arc::clone)
            .collect();
        let area_lights: Vec<ArcLight> = lights
            .iter()
            .filter(|l| l.get_type().matches(LightType::AREA_LIGHT))
            .map(Arc::clone)
            .collect();

        let scene = Self {
            world_bound: aggregate.world_bound(),
            aggregate,
            lights,
            global_lights,
            area_lights,
            ray_epsilon,
        };

        for light in scene.lights.iter() {
            light.preprocess(&scene);
        }

        info!(
            "Scene committed: {} lights ({} global, {} area)",
            scene.lights.len(),
            scene.global_lights.len(),
            scene.area_lights.len()
        );

        scene
    }

    /// Traces the ray into the scene and returns the nearest intersection
    /// within `[t_min, t_max]`.
    ///
    /// * `ray`   - The ray to trace.
    /// * `t_min` - Minimum parametric distance.
    /// * `t_max` - Maximum parametric distance.
    pub fn intersect(&self, ray: &Ray, t_min: Float, t_max: Float) -> Option<Intersection<'_>> {
        self.aggregate.intersect(ray, t_min, t_max)
    }

    /// Traces the ray into the scene and returns whether or not an intersection
    /// occurred within `[t_min, t_max]`.
    ///
    /// * `ray`   - The ray to trace.
    /// * `t_min` - Minimum parametric distance.
    /// * `t_max` - Maximum parametric distance.
    pub fn intersect_p(&self, ray: &Ray, t_min: Float, t_max: Float) -> bool {
        self.aggregate.intersect_p(ray, t_min, t_max)
    }
}
