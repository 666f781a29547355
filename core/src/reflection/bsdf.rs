//! BSDF

use super::*;
use crate::interaction::SurfaceInteraction;

/// Binds an arena-allocated `BxDF` to the shading frame at a surface point
/// and evaluates it with world-space directions.
#[derive(Copy, Clone, Debug)]
pub struct BSDF<'arena> {
    /// Shading frame; the shading normal is the local +z axis.
    pub frame: Frame,

    /// The geometric normal defined by surface geometry.
    pub ng: Normal3f,

    /// The scattering function in local space.
    pub bxdf: &'arena BxDF<'arena>,
}

impl<'arena> BSDF<'arena> {
    /// Creates a new `BSDF`.
    ///
    /// * `si`   - The surface interaction at the intersection.
    /// * `bxdf` - The scattering function in local space.
    pub fn new(si: &SurfaceInteraction, bxdf: &'arena BxDF<'arena>) -> Self {
        Self {
            frame: Frame::from_normal(&si.shading_n),
            ng: si.hit.n,
            bxdf,
        }
    }

    /// Returns the type of the scattering function. For a hybrid this is the
    /// union of its children's types.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf.get_type()
    }

    /// Returns the number of `BxDF` components that match the given type.
    ///
    /// * `flags` - The `BxDFType` to match.
    pub fn num_components(&self, flags: BxDFType) -> usize {
        self.bxdf.num_components(flags)
    }

    /// Transforms a vector from world space to local space.
    ///
    /// * `v` - The vector to transform.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        self.frame.world_to_local(v)
    }

    /// Transforms a vector from local space to world space.
    ///
    /// * `v` - The vector to transform.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        self.frame.local_to_world(v)
    }

    /// Returns the BSDF evaluated for a pair of directions. Pairs whose side
    /// of the geometric surface the `BxDF` does not scatter to are black.
    ///
    /// * `wo_w` - Outgoing direction in world-space.
    /// * `wi_w` - Incident direction in world-space.
    pub fn f(&self, wo_w: &Vector3f, wi_w: &Vector3f) -> Spectrum {
        let wi = self.world_to_local(wi_w);
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return Spectrum::ZERO;
        }

        let reflect = wi_w.dot(&self.ng) * wo_w.dot(&self.ng) > 0.0;
        let side = if reflect {
            BxDFType::REFLECTION
        } else {
            BxDFType::TRANSMISSION
        };
        if self.bxdf.get_type().matches(side) {
            self.bxdf.f(&wo, &wi)
        } else {
            Spectrum::ZERO
        }
    }

    /// Samples an incident direction and returns it in world space.
    ///
    /// * `wo_w` - Outgoing direction in world-space.
    /// * `u`    - The 2D uniform random values.
    pub fn sample_f(&self, wo_w: &Vector3f, u: &Point2f) -> BxDFSample {
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return BxDFSample::from(self.bxdf.get_type());
        }

        let sample = self.bxdf.sample_f(&wo, u);
        if sample.pdf == 0.0 {
            return BxDFSample::from(sample.bxdf_type);
        }

        let wi_w = self.local_to_world(&sample.wi);
        BxDFSample::new(sample.f, sample.pdf, wi_w, sample.bxdf_type)
    }

    /// Evaluates the sampling PDF for a pair of world-space directions.
    ///
    /// * `wo_w` - Outgoing direction in world-space.
    /// * `wi_w` - Incident direction in world-space.
    pub fn pdf(&self, wo_w: &Vector3f, wi_w: &Vector3f) -> Float {
        let wo = self.world_to_local(wo_w);
        if wo.z == 0.0 {
            return 0.0;
        }
        let wi = self.world_to_local(wi_w);
        self.bxdf.pdf(&wo, &wi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;

    fn interaction(n: Normal3f) -> SurfaceInteraction {
        SurfaceInteraction::new(
            Point3f::ZERO,
            n,
            1.0,
            Point2f::new(0.0, 0.0),
            Vector3f::from(n),
        )
    }

    #[test]
    fn diffuse_is_black_through_surface() {
        let arena = TransientArena::new(256);
        let bxdf = BxDF::from(LambertianReflection::new(Spectrum::ONE))
            .alloc(&arena)
            .unwrap();
        let bsdf = BSDF::new(&interaction(Normal3f::new(0.0, 1.0, 0.0)), bxdf);

        let wo = Vector3f::new(0.0, 1.0, 0.0);
        let above = Vector3f::new(0.6, 0.8, 0.0);
        let below = Vector3f::new(0.6, -0.8, 0.0);
        assert!(approx_eq!(f32, bsdf.f(&wo, &above)[0], INV_PI, epsilon = 1e-6));
        assert!(bsdf.f(&wo, &below).is_black());
    }

    #[test]
    fn sample_is_returned_in_world_space() {
        let arena = TransientArena::new(256);
        let bxdf = BxDF::from(SpecularReflection::new(Spectrum::ONE))
            .alloc(&arena)
            .unwrap();
        let bsdf = BSDF::new(&interaction(Normal3f::new(1.0, 0.0, 0.0)), bxdf);

        let wo = Vector3f::new(0.8, 0.6, 0.0);
        let s = bsdf.sample_f(&wo, &Point2f::new(0.5, 0.5));
        assert!(approx_eq!(f32, s.wi.x, 0.8, epsilon = 1e-5));
        assert!(approx_eq!(f32, s.wi.y, -0.6, epsilon = 1e-5));
        assert!(approx_eq!(f32, s.wi.z, 0.0, epsilon = 1e-5));
        assert_eq!(bsdf.pdf(&wo, &s.wi), 0.0);
    }
}
