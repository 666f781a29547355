//! Shapes

use super::*;
use crate::interaction::*;
use crate::pbrt::*;
use std::sync::Arc;

/// Shape common functions.
///
/// Shapes are defined directly in world space. They provide the geometric
/// queries the scene needs (ray intersection) and the uniform-area point
/// sampling that area lights are built on.
pub trait Shape {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str;

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f;

    /// Returns geometric details if a ray intersects the shape within
    /// `[t_min, t_max]`. If there is no intersection, `None` is returned.
    ///
    /// * `r`     - The ray.
    /// * `t_min` - Minimum parametric distance.
    /// * `t_max` - Maximum parametric distance.
    fn intersect(&self, r: &Ray, t_min: Float, t_max: Float) -> Option<SurfaceInteraction>;

    /// Returns `true` if a ray-shape intersection succeeds; otherwise `false`.
    ///
    /// * `r`     - The ray.
    /// * `t_min` - Minimum parametric distance.
    /// * `t_max` - Maximum parametric distance.
    fn intersect_p(&self, r: &Ray, t_min: Float, t_max: Float) -> bool {
        self.intersect(r, t_min, t_max).is_some()
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float;

    /// Sample a point uniformly by area on the surface and return the PDF with
    /// respect to area on the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float);

    /// Sample a point on the shape given a reference point and return the PDF
    /// with respect to the solid angle from the reference point.
    ///
    /// * `hit` - Reference point.
    /// * `u`   - Sample value to use.
    fn sample_solid_angle(&self, hit: &Hit, u: &Point2f) -> (Hit, Float) {
        let (intr, mut pdf) = self.sample_area(u);
        let wi = intr.p - hit.p;

        if wi.length_squared() == 0.0 {
            pdf = 0.0;
        } else {
            let wi = wi.normalize();
            // Convert from area measure, as returned by the sample_area() call
            // above, to solid angle measure.
            let cos_theta = intr.n.abs_dot(&(-wi));
            pdf = if cos_theta == 0.0 {
                0.0
            } else {
                pdf * hit.p.distance_squared(intr.p) / cos_theta
            };
            if pdf.is_infinite() {
                pdf = 0.0;
            }
        }

        (intr, pdf)
    }

    /// Returns the PDF with respect to solid angle of sampling direction `wi`
    /// from the reference point with `sample_solid_angle()`.
    ///
    /// * `hit` - The reference point.
    /// * `wi`  - The incident direction.
    fn pdf_solid_angle(&self, hit: &Hit, wi: &Vector3f) -> Float {
        let ray = Ray::new(hit.p, *wi);
        match self.intersect(&ray, SHADOW_EPSILON, INFINITY) {
            Some(isect) => {
                let cos_theta = isect.hit.n.abs_dot(&(-*wi));
                if cos_theta == 0.0 {
                    0.0
                } else {
                    let pdf = hit.p.distance_squared(isect.hit.p) / (cos_theta * self.area());
                    if pdf.is_infinite() {
                        0.0
                    } else {
                        pdf
                    }
                }
            }
            None => 0.0,
        }
    }
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape + Send + Sync>;
