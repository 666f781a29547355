//! Common

use crate::geometry::*;
use crate::interaction::*;
use crate::light::*;
use crate::reflection::*;
use crate::sampler::*;
use crate::sampling::*;
use crate::scene::*;
use crate::spectrum::*;

/// Sample every light in `lights` once and sum their direct lighting.
///
/// * `si`      - The surface interaction.
/// * `bsdf`    - The BSDF at the surface.
/// * `lights`  - The lights to sample.
/// * `scene`   - The scene.
/// * `sampler` - The sampler.
pub fn uniform_sample_all_lights(
    si: &SurfaceInteraction,
    bsdf: &BSDF,
    lights: &[ArcLight],
    scene: &Scene,
    sampler: &mut dyn Sampler,
) -> Spectrum {
    let mut l = Spectrum::ZERO;
    for light in lights.iter() {
        let u_light = sampler.get_2d();
        l += estimate_direct(si, bsdf, light, &u_light, scene);
    }
    l
}

/// Sample one light chosen from `light_distrib` and divide its contribution
/// by the probability of choosing it.
///
/// * `si`            - The surface interaction.
/// * `bsdf`          - The BSDF at the surface.
/// * `lights`        - The lights to choose from.
/// * `light_distrib` - Distribution over `lights`.
/// * `scene`         - The scene.
/// * `sampler`       - The sampler.
pub fn uniform_sample_one_light(
    si: &SurfaceInteraction,
    bsdf: &BSDF,
    lights: &[ArcLight],
    light_distrib: &Distribution1D,
    scene: &Scene,
    sampler: &mut dyn Sampler,
) -> Spectrum {
    if lights.is_empty() {
        return Spectrum::ZERO;
    }

    let (light_num, light_pmf, _) = light_distrib.sample_discrete(sampler.get_1d());
    let u_light = sampler.get_2d();
    if light_pmf == 0.0 || light_num >= lights.len() {
        return Spectrum::ZERO;
    }

    estimate_direct(si, bsdf, &lights[light_num], &u_light, scene) / light_pmf
}

/// Compute a direct lighting estimate from a single light sample.
///
/// * `si`      - The surface interaction.
/// * `bsdf`    - The BSDF at the surface.
/// * `light`   - The light.
/// * `u_light` - Light sample.
/// * `scene`   - The scene.
pub fn estimate_direct(
    si: &SurfaceInteraction,
    bsdf: &BSDF,
    light: &ArcLight,
    u_light: &Point2f,
    scene: &Scene,
) -> Spectrum {
    let Li {
        wi,
        pdf: light_pdf,
        visibility,
        value: li,
    } = light.sample_li(&si.hit, u_light);
    if light_pdf == 0.0 || li.is_black() {
        return Spectrum::ZERO;
    }

    let f = bsdf.f(&si.wo, &wi) * wi.abs_dot(&si.shading_n);
    if f.is_black() {
        return Spectrum::ZERO;
    }

    if let Some(vis) = visibility {
        if !vis.unoccluded(scene) {
            trace!("shadow ray blocked");
            return Spectrum::ZERO;
        }
    }

    f * li / light_pdf
}

/// Returns true if every channel of the radiance is finite and non-negative.
///
/// * `l` - The radiance.
pub fn is_valid_radiance(l: &Spectrum) -> bool {
    !(l.has_nans() || l.has_infs() || l.has_negatives())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pbrt::*;

    #[test]
    fn radiance_validity() {
        assert!(is_valid_radiance(&Spectrum::ZERO));
        assert!(is_valid_radiance(&Spectrum::from_rgb(0.1, 2.0, 30.0)));
        assert!(!is_valid_radiance(&Spectrum::from_rgb(0.1, -0.5, 0.0)));
        assert!(!is_valid_radiance(&Spectrum::from_rgb(Float::NAN, 0.0, 0.0)));
        assert!(!is_valid_radiance(&Spectrum::new(INFINITY)));
    }
}
