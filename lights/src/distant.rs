//! Distant Source

use rtcore::geometry::*;
use rtcore::interaction::*;
use rtcore::light::*;
use rtcore::paramset::*;
use rtcore::pbrt::*;
use rtcore::scene::*;
use rtcore::spectrum::*;
use std::sync::{PoisonError, RwLock};

/// Implements a directional light source that deposits illumination from the
/// same direction at every point in space.
pub struct DistantLight {
    /// The emitted radiance `L`.
    pub emitted_radiance: Spectrum,

    /// Direction towards the light.
    pub w_light: Vector3f,

    /// Radius of the spherical world bounds. Set in `preprocess()`.
    world_radius: RwLock<Float>,
}

impl DistantLight {
    /// Returns a new `DistantLight`.
    ///
    /// * `emitted_radiance` - The emitted radiance.
    /// * `w_light`          - Direction towards the light.
    pub fn new(emitted_radiance: Spectrum, w_light: Vector3f) -> Self {
        assert!(
            w_light.length_squared() > 0.0,
            "DistantLight direction must not be zero"
        );
        Self {
            emitted_radiance,
            w_light: w_light.normalize(),
            world_radius: RwLock::new(1.0),
        }
    }

    /// Returns the radius of the world bounds.
    pub fn world_radius(&self) -> Float {
        *self
            .world_radius
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Light for DistantLight {
    /// Initialize the light source before rendering begins.
    ///
    /// * `scene` - The scene.
    fn preprocess(&self, scene: &Scene) {
        let (_world_center, world_radius) = scene.world_bound.bounding_sphere();
        debug!("Distant light world radius = {}", world_radius);
        *self
            .world_radius
            .write()
            .unwrap_or_else(PoisonError::into_inner) = world_radius;
    }

    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        LightType::DELTA_DIRECTION_LIGHT
    }

    /// Return the radiance arriving at an interaction point.
    ///
    /// * `hit` - The interaction hit point.
    /// * `_u`  - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, _u: &Point2f) -> Li {
        let p_outside = hit.p + self.w_light * (2.0 * self.world_radius());
        let vis = VisibilityTester::new(*hit, Hit::new(p_outside, Normal3f::default()), None);
        Li::new(self.w_light, 1.0, Some(vis), self.emitted_radiance)
    }

    /// Returns the probability density with respect to solid angle for the light’s
    /// `sample_li()`.
    ///
    /// * `_hit` - The interaction hit point.
    /// * `_wi`  - The incident direction.
    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        0.0
    }

    /// Return the total emitted power.
    fn power(&self) -> Float {
        let world_radius = self.world_radius();
        self.emitted_radiance.y() * PI * world_radius * world_radius
    }
}

impl From<&ParamSet> for DistantLight {
    /// Create a `DistantLight` from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let emitted_radiance = params.find_one_spectrum("L", Spectrum::ONE);
        let sc = params.find_one_spectrum("scale", Spectrum::ONE);
        let from = params.find_one_point3f("from", Point3f::new(0.0, 0.0, 0.0));
        let to = params.find_one_point3f("to", Point3f::new(0.0, 0.0, 1.0));
        let mut dir = from - to;
        if dir.length_squared() == 0.0 {
            warn!("Distant light 'from' and 'to' coincide. Using +Z.");
            dir = Vector3f::new(0.0, 0.0, 1.0);
        }
        Self::new(emitted_radiance * sc, dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    #[test]
    fn sample_is_delta() {
        let light = DistantLight::new(Spectrum::new(2.0), Vector3f::new(0.0, 0.0, 3.0));
        let hit = Hit::new(Point3f::ZERO, Normal3f::new(0.0, 0.0, 1.0));
        let li = light.sample_li(&hit, &Point2f::new(0.3, 0.7));
        assert_eq!(li.pdf, 1.0);
        assert_eq!(li.wi, Vector3f::new(0.0, 0.0, 1.0));
        assert_eq!(li.value, Spectrum::new(2.0));
        assert_eq!(light.pdf_li(&hit, &li.wi), 0.0);

        let vis = li.visibility.unwrap();
        assert!(vis.target.is_none());
        assert!(approx_eq!(f32, vis.p1.p.z, 2.0 * light.world_radius(), epsilon = 1e-6));
        assert!(light.is_delta_light());
    }

    #[test]
    fn direction_points_from_to() {
        let mut ps = ParamSet::new();
        ps.add_point3f("from", &[Point3f::new(0.0, 0.0, 0.0)]);
        ps.add_point3f("to", &[Point3f::new(0.0, -1.0, 0.0)]);
        let light = DistantLight::from(&ps);
        assert!(approx_eq!(f32, light.w_light.y, 1.0, epsilon = 1e-6));
        assert!(approx_eq!(f32, light.power(), PI, epsilon = 1e-5));
    }
}
