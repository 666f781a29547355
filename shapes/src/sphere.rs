//! Spheres

use crate::common::*;
use rtcore::geometry::*;
use rtcore::interaction::*;
use rtcore::paramset::*;
use rtcore::pbrt::*;
use rtcore::sampling::*;

/// A full sphere defined in world space.
#[derive(Clone, Debug)]
pub struct Sphere {
    /// Center of the sphere.
    pub center: Point3f,

    /// Radius of sphere.
    pub radius: Float,

    /// Indicates whether the surface normal points inwards.
    pub reverse_orientation: bool,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// * `center`              - Center of the sphere.
    /// * `radius`              - Radius of sphere.
    /// * `reverse_orientation` - Indicates whether their surface normal directions
    ///                           should be reversed from the default
    pub fn new(center: Point3f, radius: Float, reverse_orientation: bool) -> Self {
        assert!(radius > 0.0, "Sphere radius must be positive");
        Self {
            center,
            radius,
            reverse_orientation,
        }
    }

    /// Returns the oriented surface normal at a point on the sphere.
    fn normal_at(&self, p: &Point3f) -> Normal3f {
        let n = Normal3f::from((*p - self.center) / self.radius);
        if self.reverse_orientation {
            -n
        } else {
            n
        }
    }

    /// Reproject a point onto the surface.
    fn refine(&self, p: Point3f) -> Point3f {
        let d = p - self.center;
        let len = d.length();
        if len == 0.0 {
            p
        } else {
            self.center + d * (self.radius / len)
        }
    }

    /// Returns the nearest root of the ray-sphere quadratic within
    /// `(t_min, t_max)`.
    fn nearest_hit(&self, r: &Ray, t_min: Float, t_max: Float) -> Option<Float> {
        let oc = r.o - self.center;
        let a = r.d.length_squared();
        let b = 2.0 * r.d.dot(&oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let (t0, t1) = solve_quadratic(a, b, c)?;
        if t0 > t_min && t0 < t_max {
            Some(t0)
        } else if t1 > t_min && t1 < t_max {
            Some(t1)
        } else {
            None
        }
    }
}

impl Shape for Sphere {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str {
        "sphere"
    }

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f {
        let r = Vector3f::new(self.radius, self.radius, self.radius);
        Bounds3f::new(self.center - r, self.center + r)
    }

    /// Returns geometric details if a ray intersects the sphere.
    ///
    /// * `r`     - The ray.
    /// * `t_min` - Minimum parametric distance.
    /// * `t_max` - Maximum parametric distance.
    fn intersect(&self, r: &Ray, t_min: Float, t_max: Float) -> Option<SurfaceInteraction> {
        let t = self.nearest_hit(r, t_min, t_max)?;
        let p = self.refine(r.at(t));

        // Find parametric representation of sphere hit.
        let d = (p - self.center) / self.radius;
        let mut phi = d.y.atan2(d.x);
        if phi < 0.0 {
            phi += TWO_PI;
        }
        let theta = clamp(d.z, -1.0, 1.0).acos();
        let uv = Point2f::new(phi * INV_TWO_PI, theta * INV_PI);

        Some(SurfaceInteraction::new(p, self.normal_at(&p), t, uv, -r.d))
    }

    /// Returns `true` if a ray-sphere intersection succeeds; otherwise `false`.
    ///
    /// * `r`     - The ray.
    /// * `t_min` - Minimum parametric distance.
    /// * `t_max` - Maximum parametric distance.
    fn intersect_p(&self, r: &Ray, t_min: Float, t_max: Float) -> bool {
        self.nearest_hit(r, t_min, t_max).is_some()
    }

    /// Returns the surface area of the sphere.
    fn area(&self) -> Float {
        FOUR_PI * self.radius * self.radius
    }

    /// Sample a point uniformly on the surface and return the PDF with respect
    /// to area on the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float) {
        let p = self.refine(self.center + self.radius * uniform_sample_sphere(u));
        (Hit::new(p, self.normal_at(&p)), 1.0 / self.area())
    }
}

impl From<(&ParamSet, bool)> for Sphere {
    /// Create a `Sphere` from given parameter set and whether or not surface
    /// normal orientation is reversed by the enclosing scene description.
    ///
    /// * `p` - A tuple containing the parameter set and orientation flag.
    fn from(p: (&ParamSet, bool)) -> Self {
        let (params, reverse_orientation) = p;

        let center = params.find_one_point3f("center", Point3f::ZERO);
        let mut radius = params.find_one_float("radius", 1.0);
        if radius <= 0.0 {
            warn!("Sphere radius {} is not positive. Using 1.", radius);
            radius = 1.0;
        }
        let reverse_orientation =
            params.find_one_bool("reverseorientation", false) ^ reverse_orientation;

        Self::new(center, radius, reverse_orientation)
    }
}
