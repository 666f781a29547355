//! Reflection and surface scattering models

use crate::geometry::*;
use crate::memory::*;
use crate::pbrt::*;
use crate::rng::ONE_MINUS_EPSILON;
use crate::sampling::*;
use crate::spectrum::*;

mod bsdf;
mod bxdf_sample;
mod bxdf_type;
mod common;
mod fresnel;
mod hybrid;
mod lambertian_reflection;
mod microfacet_reflection;
mod specular_reflection;
mod specular_transmission;

// Re-export
pub use bsdf::*;
pub use bxdf_sample::*;
pub use bxdf_type::*;
pub use common::*;
pub use fresnel::*;
pub use hybrid::*;
pub use lambertian_reflection::*;
pub use microfacet_reflection::*;
pub use specular_reflection::*;
pub use specular_transmission::*;

/// BxDF for BRDFs and BTDFs, evaluated in the local shading frame where the
/// shading normal is +z.
///
/// Instances are plain data allocated in a `TransientArena` for the duration
/// of one bounce. The hybrid variant refers to other arena-allocated BxDFs.
#[derive(Copy, Clone, Debug)]
pub enum BxDF<'arena> {
    LambertianReflection(LambertianReflection),
    SpecularReflection(SpecularReflection),
    SpecularTransmission(SpecularTransmission),
    MicrofacetReflection(MicrofacetReflection),
    Hybrid(HybridBxDF<'arena>),
}

impl<'arena> BxDF<'arena> {
    /// Allocate into the arena.
    ///
    /// * `arena` - The arena for memory allocations.
    pub fn alloc(self, arena: &'arena TransientArena) -> Result<&'arena BxDF<'arena>, ArenaError> {
        arena.alloc(self).map(|b| &*b)
    }

    /// Returns the BxDF type.
    pub fn get_type(&self) -> BxDFType {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.get_type(),
            BxDF::SpecularReflection(bxdf) => bxdf.get_type(),
            BxDF::SpecularTransmission(bxdf) => bxdf.get_type(),
            BxDF::MicrofacetReflection(bxdf) => bxdf.get_type(),
            BxDF::Hybrid(bxdf) => bxdf.get_type(),
        }
    }

    /// Returns true if the reflection models match.
    ///
    /// * `t` - The reflection model to compare.
    pub fn matches_flags(&self, t: BxDFType) -> bool {
        self.get_type().matches_flags(t)
    }

    /// Returns the number of leaf components whose type matches `flags`.
    ///
    /// * `flags` - The `BxDFType` to match.
    pub fn num_components(&self, flags: BxDFType) -> usize {
        match self {
            BxDF::Hybrid(bxdf) => bxdf.num_components(flags),
            _ => usize::from(self.matches_flags(flags)),
        }
    }

    /// Returns the value of the distribution function for the given pair of
    /// directions. Specular lobes always return black.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::SpecularTransmission(bxdf) => bxdf.f(wo, wi),
            BxDF::MicrofacetReflection(bxdf) => bxdf.f(wo, wi),
            BxDF::Hybrid(bxdf) => bxdf.f(wo, wi),
        }
    }

    /// Samples an incident direction for the outgoing direction. A zero PDF
    /// always comes with a black value.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::SpecularTransmission(bxdf) => bxdf.sample_f(wo, u),
            BxDF::MicrofacetReflection(bxdf) => bxdf.sample_f(wo, u),
            BxDF::Hybrid(bxdf) => bxdf.sample_f(wo, u),
        }
    }

    /// Evaluates the PDF of `sample_f()`. Specular lobes always return 0.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        match self {
            BxDF::LambertianReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::SpecularTransmission(bxdf) => bxdf.pdf(wo, wi),
            BxDF::MicrofacetReflection(bxdf) => bxdf.pdf(wo, wi),
            BxDF::Hybrid(bxdf) => bxdf.pdf(wo, wi),
        }
    }
}

impl From<LambertianReflection> for BxDF<'_> {
    fn from(bxdf: LambertianReflection) -> Self {
        Self::LambertianReflection(bxdf)
    }
}

impl From<SpecularReflection> for BxDF<'_> {
    fn from(bxdf: SpecularReflection) -> Self {
        Self::SpecularReflection(bxdf)
    }
}

impl From<SpecularTransmission> for BxDF<'_> {
    fn from(bxdf: SpecularTransmission) -> Self {
        Self::SpecularTransmission(bxdf)
    }
}

impl From<MicrofacetReflection> for BxDF<'_> {
    fn from(bxdf: MicrofacetReflection) -> Self {
        Self::MicrofacetReflection(bxdf)
    }
}

impl<'arena> From<HybridBxDF<'arena>> for BxDF<'arena> {
    fn from(bxdf: HybridBxDF<'arena>) -> Self {
        Self::Hybrid(bxdf)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::microfacet::TrowbridgeReitzDistribution;
    use crate::rng::RNG;
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    prop_range!(unit_f32, f32, 0.0..1.0f32);
    prop_point2!(unit_point2, f32, unit_f32(), unit_f32());
    prop_unit_vector3!(any_vector3);
    prop_unit_vector3!(upper_vector3, upper);

    fn diffuse(r: Float) -> BxDF<'static> {
        LambertianReflection::new(Spectrum::new(r)).into()
    }

    fn glossy(roughness: Float) -> BxDF<'static> {
        glossy_with(roughness, false)
    }

    fn glossy_with(roughness: Float, sample_visible_area: bool) -> BxDF<'static> {
        MicrofacetReflection::new(
            Spectrum::new(0.8),
            TrowbridgeReitzDistribution::from_roughness(roughness, sample_visible_area),
            1.0,
            1.5,
        )
        .into()
    }

    fn mirror() -> BxDF<'static> {
        SpecularReflection::new(Spectrum::new(0.9)).into()
    }

    fn glass() -> BxDF<'static> {
        SpecularTransmission::new(Spectrum::ONE, 1.0, 1.5).into()
    }

    fn spectrum_eq(a: Spectrum, b: Spectrum, eps: Float) -> bool {
        (0..3).all(|i| approx_eq!(f32, a[i], b[i], epsilon = eps))
    }

    #[test]
    fn diffuse_reflectance_integrates_to_albedo() {
        let albedo = Spectrum::from_rgb(0.2, 0.5, 0.8);
        let bxdf: BxDF = LambertianReflection::new(albedo).into();
        let wo = Vector3f::new(0.3, 0.1, 0.9).normalize();

        let mut rng = RNG::new(7);
        let n = 20000;
        let mut sum = Spectrum::ZERO;
        for _ in 0..n {
            let s = bxdf.sample_f(&wo, &rng.uniform_point2());
            if s.pdf > 0.0 {
                sum += s.f * abs_cos_theta(&s.wi) / s.pdf;
            }
        }
        let estimate = sum / n as Float;
        assert!(spectrum_eq(estimate, albedo, 0.01), "estimate = {}", estimate);
    }

    #[test]
    fn glossy_reflectance_does_not_exceed_one() {
        let bxdf = glossy(0.5);
        let wo = Vector3f::new(0.0, 0.6, 0.8);
        let mut rng = RNG::new(11);
        let n = 20000;
        let mut sum = 0.0;
        for _ in 0..n {
            let s = bxdf.sample_f(&wo, &rng.uniform_point2());
            if s.pdf > 0.0 {
                sum += s.f.y() * abs_cos_theta(&s.wi) / s.pdf;
            }
        }
        let estimate = sum / n as Float;
        assert!(estimate > 0.0 && estimate < 1.0, "estimate = {}", estimate);
    }

    #[test]
    fn specular_reflection_mirrors_and_compensates_cosine() {
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let s = mirror().sample_f(&wo, &Point2f::new(0.5, 0.5));
        assert_eq!(s.pdf, 1.0);
        assert!(approx_eq!(f32, s.wi.x, -0.6, epsilon = 1e-6));
        assert!(approx_eq!(f32, s.wi.z, 0.8, epsilon = 1e-6));
        assert!(spectrum_eq(s.f, Spectrum::new(0.9 / 0.8), 1e-5));
        assert!(s.bxdf_type.is_specular());
    }

    #[test]
    fn glass_refracts_or_reflects_by_fresnel() {
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        // Fresnel reflectance at normal incidence is 0.04.
        let t = glass().sample_f(&wo, &Point2f::new(0.5, 0.5));
        assert!(t.bxdf_type.contains(BxDFType::TRANSMISSION));
        assert!(t.wi.z < 0.0);
        assert_eq!(t.pdf, 1.0);

        let r = glass().sample_f(&wo, &Point2f::new(0.01, 0.5));
        assert!(r.bxdf_type.contains(BxDFType::REFLECTION));
        assert!(r.wi.z > 0.0);
    }

    #[test]
    fn glass_total_internal_reflection_always_reflects() {
        // Leaving the dense medium at a grazing angle.
        let wo = Vector3f::new(0.9, 0.0, -(1.0f32 - 0.81).sqrt());
        for i in 0..10 {
            let s = glass().sample_f(&wo, &Point2f::new(i as Float / 10.0, 0.5));
            assert!(s.bxdf_type.contains(BxDFType::REFLECTION));
            assert!(s.wi.z < 0.0);
        }
    }

    #[test]
    fn hybrid_of_two_diffuse_averages() {
        let arena = TransientArena::new(1024);
        let a = diffuse(0.2).alloc(&arena).unwrap();
        let b = diffuse(0.6).alloc(&arena).unwrap();
        let mut h = HybridBxDF::new();
        h.add(a);
        h.add(b);
        let bxdf = BxDF::from(h);

        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let wi = Vector3f::new(0.6, 0.0, 0.8);
        let expected = (Spectrum::new(0.2) * INV_PI + Spectrum::new(0.6) * INV_PI) / 2.0;
        assert!(spectrum_eq(bxdf.f(&wo, &wi), expected, 1e-6));
        assert_eq!(bxdf.num_components(BxDFType::all()), 2);
        assert_eq!(
            bxdf.get_type(),
            BxDFType::REFLECTION | BxDFType::DIFFUSE
        );
    }

    #[test]
    fn empty_hybrid_is_black() {
        let bxdf = BxDF::from(HybridBxDF::new());
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let s = bxdf.sample_f(&wo, &Point2f::new(0.3, 0.3));
        assert_eq!(s.pdf, 0.0);
        assert!(s.f.is_black());
        assert!(bxdf.f(&wo, &wo).is_black());
        assert_eq!(bxdf.pdf(&wo, &wo), 0.0);
    }

    #[test]
    #[should_panic]
    fn hybrid_capacity_is_fixed() {
        let arena = TransientArena::new(4096);
        let d = diffuse(0.5).alloc(&arena).unwrap();
        let mut h = HybridBxDF::new();
        for _ in 0..=MAX_BXDFS {
            h.add(d);
        }
    }

    #[test]
    fn hybrid_with_specular_child_scales_sample() {
        let arena = TransientArena::new(1024);
        let mut h = HybridBxDF::new();
        h.add(diffuse(0.5).alloc(&arena).unwrap());
        h.add(mirror().alloc(&arena).unwrap());
        let bxdf = BxDF::from(h);
        assert_eq!(bxdf.num_components(BxDFType::non_specular()), 1);

        let wo = Vector3f::new(0.6, 0.0, 0.8);
        // u[0] in the upper half selects the mirror.
        let s = bxdf.sample_f(&wo, &Point2f::new(0.75, 0.5));
        assert!(s.bxdf_type.is_specular());
        assert!(approx_eq!(f32, s.pdf, 0.5, epsilon = 1e-6));
        assert!(spectrum_eq(s.f, Spectrum::new(0.9 / 0.8 / 2.0), 1e-5));
    }

    proptest! {
        #[test]
        fn diffuse_value_is_constant(wo in upper_vector3(), wi in upper_vector3()) {
            let f = diffuse(0.7).f(&wo, &wi);
            prop_assert!(spectrum_eq(f, Spectrum::new(0.7 * INV_PI), 1e-6));
        }

        #[test]
        fn sampled_pdf_matches_pdf(wo in any_vector3(), u in unit_point2()) {
            let arena = TransientArena::new(1024);
            let mut h = HybridBxDF::new();
            h.add(diffuse(0.5).alloc(&arena).unwrap());
            h.add(glossy(0.4).alloc(&arena).unwrap());
            let plastic = BxDF::from(h);

            for bxdf in [
                diffuse(0.5),
                glossy(0.3),
                glossy(0.8),
                glossy_with(0.3, true),
                glossy_with(0.8, true),
                plastic,
            ] {
                let s = bxdf.sample_f(&wo, &u);
                if s.pdf > 0.0 {
                    let pdf = bxdf.pdf(&wo, &s.wi);
                    prop_assert!(
                        abs(pdf - s.pdf) <= 1e-2 * max(1.0, s.pdf),
                        "{:?}: pdf {} != sampled {}", bxdf.get_type(), pdf, s.pdf
                    );
                }
            }
        }

        #[test]
        fn zero_pdf_implies_black(wo in any_vector3(), u in unit_point2()) {
            let arena = TransientArena::new(1024);
            let mut h = HybridBxDF::new();
            h.add(diffuse(0.5).alloc(&arena).unwrap());
            h.add(glass().alloc(&arena).unwrap());
            h.add(glossy(0.2).alloc(&arena).unwrap());
            let mixed = BxDF::from(h);

            for bxdf in [diffuse(0.5), glossy(0.05), mirror(), glass(), mixed] {
                let s = bxdf.sample_f(&wo, &u);
                if s.pdf == 0.0 {
                    prop_assert!(s.f.is_black());
                }
            }
        }

        #[test]
        fn specular_pdf_is_zero(wo in any_vector3(), wi in any_vector3()) {
            prop_assert_eq!(mirror().pdf(&wo, &wi), 0.0);
            prop_assert_eq!(glass().pdf(&wo, &wi), 0.0);
            prop_assert!(mirror().f(&wo, &wi).is_black());
            prop_assert!(glass().f(&wo, &wi).is_black());
        }

        #[test]
        fn glossy_is_black_across_surface(wo in upper_vector3(), wi in upper_vector3()) {
            let below = Vector3f::new(wi.x, wi.y, -wi.z);
            prop_assert!(glossy(0.5).f(&wo, &below).is_black());
            prop_assert_eq!(glossy(0.5).pdf(&wo, &below), 0.0);
        }
    }
}
