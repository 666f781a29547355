//! Disks

use rtcore::geometry::*;
use rtcore::interaction::*;
use rtcore::paramset::*;
use rtcore::pbrt::*;
use rtcore::sampling::concentric_sample_disk;

/// A one-sided flat disk defined in world space by its center and normal.
#[derive(Clone, Debug)]
pub struct Disk {
    /// Center of the disk.
    pub center: Point3f,

    /// Radius of disk.
    pub radius: Float,

    /// Orthonormal basis with the unreversed surface normal as +Z.
    frame: Frame,

    /// Indicates whether the surface normal is flipped.
    pub reverse_orientation: bool,
}

impl Disk {
    /// Create a new disk.
    ///
    /// * `center`              - Center of the disk.
    /// * `normal`              - Normal of the plane containing the disk.
    /// * `radius`              - Radius of disk.
    /// * `reverse_orientation` - Indicates whether their surface normal directions
    ///                           should be reversed from the default
    pub fn new(center: Point3f, normal: Normal3f, radius: Float, reverse_orientation: bool) -> Self {
        assert!(radius > 0.0, "Disk radius must be positive");
        Self {
            center,
            radius,
            frame: Frame::from_normal(&normal),
            reverse_orientation,
        }
    }

    /// Returns the oriented surface normal.
    pub fn normal(&self) -> Normal3f {
        let n = Normal3f::from(self.frame.n);
        if self.reverse_orientation {
            -n
        } else {
            n
        }
    }

    /// Returns the ray parameter and hit point of the plane intersection
    /// within the disk radius.
    fn plane_hit(&self, r: &Ray, t_min: Float, t_max: Float) -> Option<(Float, Point3f)> {
        // Reject disk intersections for rays parallel to the disk's plane.
        let denom = r.d.dot(&self.frame.n);
        if denom == 0.0 {
            return None;
        }
        let t = (self.center - r.o).dot(&self.frame.n) / denom;
        if t <= t_min || t >= t_max {
            return None;
        }

        let p = r.at(t);
        if p.distance_squared(self.center) > self.radius * self.radius {
            return None;
        }
        Some((t, p))
    }
}

impl Shape for Disk {
    /// Returns the shape type. Usually these are behind ArcShape and harder to
    /// debug. So this will be helpful.
    fn get_type(&self) -> &'static str {
        "disk"
    }

    /// Returns a bounding box in world space.
    fn world_bound(&self) -> Bounds3f {
        // Extent of a disk along each axis is r * sqrt(1 - n_i²).
        let n = self.frame.n;
        let e = Vector3f::new(
            self.radius * max(0.0, 1.0 - n.x * n.x).sqrt(),
            self.radius * max(0.0, 1.0 - n.y * n.y).sqrt(),
            self.radius * max(0.0, 1.0 - n.z * n.z).sqrt(),
        );
        Bounds3f::new(self.center - e, self.center + e)
    }

    /// Returns geometric details if a ray intersects the disk.
    ///
    /// * `r`     - The ray.
    /// * `t_min` - Minimum parametric distance.
    /// * `t_max` - Maximum parametric distance.
    fn intersect(&self, r: &Ray, t_min: Float, t_max: Float) -> Option<SurfaceInteraction> {
        let (t, p) = self.plane_hit(r, t_min, t_max)?;

        // Find parametric representation of disk hit.
        let local = self.frame.world_to_local(&(p - self.center));
        let mut phi = local.y.atan2(local.x);
        if phi < 0.0 {
            phi += TWO_PI;
        }
        let r_hit = (local.x * local.x + local.y * local.y).sqrt();
        let uv = Point2f::new(phi * INV_TWO_PI, (self.radius - r_hit) / self.radius);

        Some(SurfaceInteraction::new(p, self.normal(), t, uv, -r.d))
    }

    /// Returns `true` if a ray-disk intersection succeeds; otherwise `false`.
    ///
    /// * `r`     - The ray.
    /// * `t_min` - Minimum parametric distance.
    /// * `t_max` - Maximum parametric distance.
    fn intersect_p(&self, r: &Ray, t_min: Float, t_max: Float) -> bool {
        self.plane_hit(r, t_min, t_max).is_some()
    }

    /// Returns the surface area of the disk.
    fn area(&self) -> Float {
        PI * self.radius * self.radius
    }

    /// Sample a point uniformly on the surface and return the PDF with respect
    /// to area on the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Hit, Float) {
        let pd = concentric_sample_disk(u);
        let offset = self
            .frame
            .local_to_world(&Vector3f::new(pd.x * self.radius, pd.y * self.radius, 0.0));
        (Hit::new(self.center + offset, self.normal()), 1.0 / self.area())
    }
}

impl From<(&ParamSet, bool)> for Disk {
    /// Create a `Disk` from given parameter set and whether or not surface
    /// normal orientation is reversed by the enclosing scene description.
    ///
    /// * `p` - A tuple containing the parameter set and orientation flag.
    fn from(p: (&ParamSet, bool)) -> Self {
        let (params, reverse_orientation) = p;

        let center = params.find_one_point3f("center", Point3f::ZERO);
        let mut normal = params.find_one_normal3f("normal", Normal3f::new(0.0, 0.0, 1.0));
        if normal.length_squared() == 0.0 {
            warn!("Disk normal has zero length. Using +Z.");
            normal = Normal3f::new(0.0, 0.0, 1.0);
        }
        let mut radius = params.find_one_float("radius", 1.0);
        if radius <= 0.0 {
            warn!("Disk radius {} is not positive. Using 1.", radius);
            radius = 1.0;
        }
        let reverse_orientation =
            params.find_one_bool("reverseorientation", false) ^ reverse_orientation;

        Self::new(center, normal, radius, reverse_orientation)
    }
}
