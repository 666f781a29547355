//! Diffuse Area Light Source

use rtcore::geometry::*;
use rtcore::interaction::*;
use rtcore::light::*;
use rtcore::paramset::*;
use rtcore::pbrt::*;
use rtcore::primitives::*;
use rtcore::spectrum::*;
use std::sync::Arc;

/// Implements a basic area light source with uniform spatial and directional
/// radiance distribution.
#[derive(Clone)]
pub struct DiffuseAreaLight {
    /// Emitted radiance.
    pub l_emit: Spectrum,

    /// Shape describing surface of the light source.
    pub shape: ArcShape,

    /// Surface area of the shape.
    pub area: Float,

    /// Indicates whether light source 2-sided.
    pub two_sided: bool,

    /// Identity of the primitive the light is bound to; shadow rays must end
    /// on it.
    pub target: PrimitiveId,
}

impl DiffuseAreaLight {
    /// Returns a new `DiffuseAreaLight`.
    ///
    /// * `l_emit`    - Emitted radiance.
    /// * `shape`     - Shape describing surface of the light source. The same
    ///                 shape must be bound to the emitting primitive.
    /// * `two_sided` - Indicates whether light source 2-sided.
    pub fn new(l_emit: Spectrum, shape: ArcShape, two_sided: bool) -> Self {
        let area = shape.area();
        let target = primitive_id(&shape);
        Self {
            l_emit,
            shape,
            area,
            two_sided,
            target,
        }
    }
}

impl Light for DiffuseAreaLight {
    /// Returns the type of light.
    fn get_type(&self) -> LightType {
        LightType::AREA_LIGHT
    }

    /// Return the radiance arriving at an interaction point.
    ///
    /// * `hit` - The interaction hit point.
    /// * `u`   - Sample value for Monte Carlo integration.
    fn sample_li(&self, hit: &Hit, u: &Point2f) -> Li {
        let (p_shape_hit, pdf) = self.shape.sample_solid_angle(hit, u);

        let wi = p_shape_hit.p - hit.p;
        if pdf == 0.0 || wi.length_squared() == 0.0 {
            Li::zero()
        } else {
            let wi = wi.normalize();
            let visibility = Some(VisibilityTester::new(*hit, p_shape_hit, Some(self.target)));
            let value = self.l(&p_shape_hit, &(-wi));
            Li::new(wi, pdf, visibility, value)
        }
    }

    /// Returns the probability density with respect to solid angle for the light’s
    /// `sample_li()`.
    ///
    /// * `hit` - The interaction hit point.
    /// * `wi`  - The incident direction.
    fn pdf_li(&self, hit: &Hit, wi: &Vector3f) -> Float {
        self.shape.pdf_solid_angle(hit, wi)
    }

    /// Return the total emitted power.
    fn power(&self) -> Float {
        let p = self.l_emit.y() * self.area * PI;
        if self.two_sided {
            2.0 * p
        } else {
            p
        }
    }

    /// Returns emitted radiance based on `two_sided` flag.
    ///
    /// * `hit` - Point on the light surface.
    /// * `w`   - Outgoing direction.
    fn l(&self, hit: &Hit, w: &Vector3f) -> Spectrum {
        if self.two_sided || hit.n.dot(w) > 0.0 {
            self.l_emit
        } else {
            Spectrum::ZERO
        }
    }
}

impl From<(&ParamSet, ArcShape)> for DiffuseAreaLight {
    /// Create a `DiffuseAreaLight` from given parameter set and shape.
    ///
    /// * `p` - A tuple containing the parameter set and shape.
    fn from(p: (&ParamSet, ArcShape)) -> Self {
        let (params, shape) = p;

        let l = params.find_one_spectrum("L", Spectrum::ONE);
        let sc = params.find_one_spectrum("scale", Spectrum::ONE);
        let two_sided = params.find_one_bool("twosided", false);
        debug!(
            "Area light on {} with L = {}, two sided = {}",
            shape.get_type(),
            l * sc,
            two_sided
        );

        Self::new(l * sc, Arc::clone(&shape), two_sided)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use proptest::prelude::*;
    use shapes::*;

    fn ceiling_light(two_sided: bool) -> DiffuseAreaLight {
        let disk: ArcShape = Arc::new(Disk::new(
            Point3f::new(0.0, 0.0, 2.0),
            Normal3f::new(0.0, 0.0, -1.0),
            0.5,
            false,
        ));
        DiffuseAreaLight::new(Spectrum::new(3.0), disk, two_sided)
    }

    fn floor() -> Hit {
        Hit::new(Point3f::ZERO, Normal3f::new(0.0, 0.0, 1.0))
    }

    #[test]
    fn power_scales_with_area_and_sides() {
        let one = ceiling_light(false);
        let two = ceiling_light(true);
        let expected = 3.0 * PI * 0.25 * PI;
        assert!(approx_eq!(f32, one.power(), expected, epsilon = 1e-4));
        assert!(approx_eq!(f32, two.power(), 2.0 * expected, epsilon = 1e-4));
        assert_eq!(one.get_type(), LightType::AREA_LIGHT);
    }

    #[test]
    fn one_sided_emits_from_front_only() {
        let light = ceiling_light(false);
        let p = Hit::new(Point3f::new(0.0, 0.0, 2.0), Normal3f::new(0.0, 0.0, -1.0));
        assert_eq!(light.l(&p, &Vector3f::new(0.0, 0.0, -1.0)), Spectrum::new(3.0));
        assert!(light.l(&p, &Vector3f::new(0.0, 0.0, 1.0)).is_black());

        let light = ceiling_light(true);
        assert_eq!(light.l(&p, &Vector3f::new(0.0, 0.0, 1.0)), Spectrum::new(3.0));
    }

    #[test]
    fn from_params_applies_scale() {
        let disk: ArcShape = Arc::new(Disk::from((&ParamSet::new(), false)));
        let mut ps = ParamSet::new();
        ps.add_rgb_spectrum("L", &[1.0, 2.0, 3.0]);
        ps.add_rgb_spectrum("scale", &[2.0, 2.0, 2.0]);
        ps.add_bool("twosided", &[true]);
        let light = DiffuseAreaLight::from((&ps, disk));
        assert_eq!(light.l_emit, Spectrum::from_rgb(2.0, 4.0, 6.0));
        assert!(light.two_sided);
    }

    proptest! {
        #[test]
        fn sample_matches_pdf(u0 in 0.0f32..1.0, u1 in 0.0f32..1.0) {
            let light = ceiling_light(false);
            let hit = floor();
            let li = light.sample_li(&hit, &Point2f::new(u0, u1));
            prop_assert!(li.pdf > 0.0);
            prop_assert_eq!(li.value, Spectrum::new(3.0));
            prop_assert!(approx_eq!(f32, li.wi.length(), 1.0, epsilon = 1e-5));
            prop_assert!(li.wi.z > 0.0);

            let pdf = light.pdf_li(&hit, &li.wi);
            prop_assert!((pdf - li.pdf).abs() <= 1e-3 * li.pdf);

            let vis = li.visibility.unwrap();
            prop_assert_eq!(vis.target, Some(light.target));
        }
    }
}
