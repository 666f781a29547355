//! Skybox Light

use rtcore::geometry::*;
use rtcore::interaction::*;
use rtcore::light::*;
use rtcore::paramset::*;
use rtcore::pbrt::*;
use rtcore::sampling::*;
use rtcore::scene::*;
use rtcore::spectrum::*;
use std::sync::{PoisonError, RwLock};

/// Implements an infinitely far away environment that surrounds the scene.
/// Radiance blends from the horizon colour to the zenith colour with the
/// elevation above the horizon; directions below the horizon see the horizon
/// colour.
pub struct SkyboxLight {
    /// Radiance straight up.
    pub zenith: Spectrum,

    /// Radiance at and below the horizon.
    pub horizon: Spectrum,

    /// Unit vector pointing to the zenith.
    pub up: Vector3f,

    /// Radius of the spherical world bounds. Set in `preprocess()`.
    world_radius: RwLock<Float>,
}

impl SkyboxLight {
    /// Returns a new `SkyboxLight`.
    ///
    /// * `zenith`  - Radiance straight up.
    /// * `horizon` - Radiance at and below the horizon.
    /// * `up`      - Direction of the zenith.
    pub fn new(zenith: Spectrum, horizon: Spectrum, up: Vector3f) -> Self {
        assert!(up.length_squared() > 0.0, "SkyboxLight up must not be zero");
        Self {
            zenith,
            horizon,
            up: up.normalize(),
            world_radius: RwLock::new(1.0),
        }
    }

    /// Returns the sky radiance seen along direction `w`.
    ///
    /// * `w` - Unit direction leaving the scene.
    pub fn radiance(&self, w: &Vector3f) -> Spectrum {
        let t = clamp(w.dot(&self.up), 0.0, 1.0);
        lerp(t, self.horizon, self.zenith)
    }

    /// Returns the radius of the world bounds.
    pub fn world_radius(&self) -> Float {
        *self
            .world_radius
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Light for SkyboxLight {
    /// Initialize the light source before rendering begins.
    ///
    /// * `scene` - The scene.
    fn preprocess(&self, scene: &Scene) {
        let (_world_center, world_radius) = scene.world_bound.bounding_sphere();
        debug!("Skybox world radius = {}", world_radius);
        *self
            .world_radius
            .write()
            .unwrap_or_else(PoisonError::into_inner) = world_radius;
    }

    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        LightType::INFINITE_LIGHT
    }

    /// Samples a direction uniformly over the sphere.
    ///
    /// * `hit` - The interaction hit point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li {
        let wi = uniform_sample_sphere(u);
        let p_outside = hit.p + wi * (2.0 * self.world_radius());
        let vis = VisibilityTester::new(*hit, Hit::new(p_outside, Normal3f::default()), None);
        Li::new(wi, uniform_sphere_pdf(), Some(vis), self.radiance(&wi))
    }

    /// Returns the probability density with respect to solid angle for the light’s
    /// `sample_li()`.
    ///
    /// * `_hit` - The interaction hit point.
    /// * `_wi`  - The incident direction.
    fn pdf_li(&self, _hit: &Hit, _wi: &Vector3f) -> Float {
        uniform_sphere_pdf()
    }

    /// Return the total emitted power.
    fn power(&self) -> Float {
        // Mean radiance over the sphere: the lower half sees the horizon and
        // the upper half blends linearly in cos(theta).
        let mean = self.horizon * 0.75 + self.zenith * 0.25;
        let world_radius = self.world_radius();
        PI * world_radius * world_radius * mean.y()
    }

    /// Returns the sky radiance along a ray that escaped the scene.
    ///
    /// * `ray` - The ray.
    fn le(&self, ray: &Ray) -> Spectrum {
        let len = ray.d.length();
        if len == 0.0 {
            Spectrum::ZERO
        } else {
            self.radiance(&(ray.d / len))
        }
    }
}

impl From<&ParamSet> for SkyboxLight {
    /// Create a `SkyboxLight` from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let zenith = params.find_one_spectrum("zenith", Spectrum::ONE);
        let horizon = params.find_one_spectrum("horizon", Spectrum::ONE);
        let sc = params.find_one_spectrum("scale", Spectrum::ONE);
        let mut up = params.find_one_vector3f("up", Vector3f::new(0.0, 0.0, 1.0));
        if up.length_squared() == 0.0 {
            warn!("Skybox 'up' has zero length. Using +Z.");
            up = Vector3f::new(0.0, 0.0, 1.0);
        }
        Self::new(zenith * sc, horizon * sc, up)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    fn sky() -> SkyboxLight {
        SkyboxLight::new(
            Spectrum::from_rgb(0.2, 0.4, 1.0),
            Spectrum::from_rgb(1.0, 1.0, 1.0),
            Vector3f::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn gradient_from_horizon_to_zenith() {
        let s = sky();
        assert_eq!(s.radiance(&Vector3f::new(0.0, 1.0, 0.0)), s.zenith);
        assert_eq!(s.radiance(&Vector3f::new(1.0, 0.0, 0.0)), s.horizon);
        assert_eq!(s.radiance(&Vector3f::new(0.0, -1.0, 0.0)), s.horizon);

        let ray = Ray::new(Point3f::ZERO, Vector3f::new(0.0, 5.0, 0.0));
        assert_eq!(s.le(&ray), s.zenith);
        assert!(s.get_type().is_global());
    }

    #[test]
    fn constant_sky_power() {
        let s = SkyboxLight::from(&ParamSet::new());
        assert!(approx_eq!(f32, s.power(), PI, epsilon = 1e-5));
    }

    proptest! {
        #[test]
        fn samples_cover_sphere(u0 in 0.0f32..1.0, u1 in 0.0f32..1.0) {
            let s = sky();
            let hit = Hit::new(Point3f::ZERO, Normal3f::new(0.0, 1.0, 0.0));
            let li = s.sample_li(&hit, &Point2f::new(u0, u1));
            prop_assert!(approx_eq!(f32, li.pdf, 1.0 / (4.0 * PI), epsilon = 1e-6));
            prop_assert!(approx_eq!(f32, li.wi.length(), 1.0, epsilon = 1e-5));
            prop_assert_eq!(li.value, s.radiance(&li.wi));
            prop_assert_eq!(s.pdf_li(&hit, &li.wi), li.pdf);
        }
    }
}
