//! Path Integrator

use rtcore::geometry::*;
use rtcore::integrator::*;
use rtcore::interaction::*;
use rtcore::light_distrib::*;
use rtcore::paramset::*;
use rtcore::pbrt::*;
use rtcore::reflection::*;
use rtcore::sampler::*;
use rtcore::scene::*;
use rtcore::spectrum::*;

/// Implements path tracing algorithm.
pub struct PathIntegrator {
    /// Maximum number of bounces.
    max_depth: usize,

    /// Bounce count at which Russian roulette starts.
    rr_min_depth: usize,

    /// Whether paths may be terminated by Russian roulette.
    russian_roulette: bool,

    /// Light sampling strategy.
    light_sample_strategy: LightSampleStrategy,

    /// Light distribution. Set in `preprocess()`.
    light_distribution: Option<ArcLightDistribution>,
}

impl PathIntegrator {
    /// Create a new `PathIntegrator`.
    ///
    /// * `max_depth`             - Maximum number of bounces.
    /// * `rr_min_depth`          - Bounce count at which Russian roulette
    ///                             starts.
    /// * `russian_roulette`      - Whether paths may be terminated by Russian
    ///                             roulette.
    /// * `light_sample_strategy` - Light sampling strategy for area lights.
    pub fn new(
        max_depth: usize,
        rr_min_depth: usize,
        russian_roulette: bool,
        light_sample_strategy: LightSampleStrategy,
    ) -> Self {
        Self {
            max_depth,
            rr_min_depth,
            russian_roulette,
            light_sample_strategy,
            light_distribution: None, // Will be set in Integrator::preprocess()
        }
    }

    /// Returns the maximum number of bounces.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the bounce count at which Russian roulette starts.
    pub fn rr_min_depth(&self) -> usize {
        self.rr_min_depth
    }

    /// Returns whether Russian roulette is enabled.
    pub fn russian_roulette(&self) -> bool {
        self.russian_roulette
    }

    /// Returns the light sampling strategy.
    pub fn light_sample_strategy(&self) -> LightSampleStrategy {
        self.light_sample_strategy
    }

    /// Direct lighting at a non-specular hit: every global light once, then the
    /// area lights according to the sampling strategy.
    ///
    /// * `si`      - The surface interaction.
    /// * `bsdf`    - The BSDF at the surface.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    fn sample_lights(
        &self,
        si: &SurfaceInteraction,
        bsdf: &BSDF,
        scene: &Scene,
        sampler: &mut dyn Sampler,
    ) -> Spectrum {
        let mut ld = uniform_sample_all_lights(si, bsdf, &scene.global_lights, scene, sampler);

        let distrib = self
            .light_distribution
            .as_ref()
            .and_then(|d| d.lookup(&si.hit.p));
        ld += match distrib {
            Some(distrib) => uniform_sample_one_light(
                si,
                bsdf,
                &scene.area_lights,
                &distrib,
                scene,
                sampler,
            ),
            None => uniform_sample_all_lights(si, bsdf, &scene.area_lights, scene, sampler),
        };
        ld
    }
}

impl Integrator for PathIntegrator {
    /// Preprocess the scene.
    ///
    /// * `scene` - The scene
    fn preprocess(&mut self, scene: &Scene) {
        self.light_distribution =
            create_light_sample_distribution(self.light_sample_strategy, scene);
        info!(
            "Path integrator: max depth {}, Russian roulette {} from bounce {}, '{}' light sampling",
            self.max_depth,
            if self.russian_roulette { "on" } else { "off" },
            self.rr_min_depth,
            self.light_sample_strategy
        );
    }

    /// Returns the incident radiance at the origin of a given ray.
    ///
    /// * `ctx`     - Per-thread rendering context.
    /// * `sampler` - The sampler.
    /// * `scene`   - The scene.
    /// * `ray`     - The camera ray.
    fn li(
        &self,
        ctx: &mut RenderContext,
        sampler: &mut dyn Sampler,
        scene: &Scene,
        ray: &Ray,
    ) -> Spectrum {
        ctx.stats.samples += 1;

        let mut l = Spectrum::ZERO;
        let mut beta = Spectrum::ONE;
        let mut ray = *ray;
        let mut specular_bounce = true;

        let mut bounces = 0_usize;
        while bounces < self.max_depth {
            debug!("Path tracer bounce {bounces}, current L = {l}, beta = {beta}");

            // Everything allocated for this bounce is released at the end of
            // the iteration.
            let arena = ctx.arena.scope();

            // Find closest ray intersection or add environment radiance.
            let isect = match scene.intersect(&ray, scene.ray_epsilon, INFINITY) {
                Some(isect) => isect,
                None => {
                    // Global lights are sampled directly at every non-specular
                    // vertex, so escaping radiance is only added after the
                    // camera or a specular bounce.
                    if specular_bounce {
                        for light in scene.global_lights.iter() {
                            l += beta * light.le(&ray);
                        }
                        debug!("Added global lights -> L = {l}");
                    }
                    break;
                }
            };

            // Emission seen from the camera or through a specular chain ends
            // the walk. After any other bounce direct lighting has already
            // counted it and the path scatters off the surface's material.
            if specular_bounce && isect.area_light().is_some() {
                l += beta * isect.le(&-ray.d);
                debug!("Added Le -> L = {l}");
                break;
            }

            let material = match isect.material() {
                Some(material) => material,
                None => break,
            };

            let si = isect.isect;
            let bxdf = match material.compute_bsdf(&si, &arena) {
                Ok(Some(bxdf)) => bxdf,
                Ok(None) => {
                    debug!("Terminating at non-scattering surface");
                    break;
                }
                Err(err) => {
                    warn!("Path abandoned at bounce {bounces}: {err}");
                    ctx.stats.arena_exhaustions += 1;
                    break;
                }
            };
            let bsdf = BSDF::new(&si, bxdf);
            let specular = bsdf.get_type().is_specular();

            // Sample illumination from lights to find path contribution. (But
            // skip this for BSDFs with a specular lobe).
            if !specular {
                let ld = beta * self.sample_lights(&si, &bsdf, scene, sampler);
                debug!("Sampled direct lighting Ld = {ld}");
                l += ld;
            }

            // Sample BSDF to get new path direction.
            let u = sampler.get_2d();
            let BxDFSample { f, pdf, wi, .. } = bsdf.sample_f(&si.wo, &u);
            debug!("Sampled BSDF, f = {f}, pdf = {pdf}");

            specular_bounce = specular;
            if pdf == 0.0 || f.is_black() {
                break;
            }
            beta *= f * wi.abs_dot(&si.shading_n) / pdf;
            debug!("Updated beta = {beta}");
            ray = si.hit.spawn_ray(&wi);

            // Possibly terminate the path with Russian roulette.
            if self.russian_roulette && bounces >= self.rr_min_depth {
                let p = min(1.0, beta.max_component_value());
                if p <= 0.0 || sampler.get_1d() > p {
                    break;
                }
                beta /= p;
            }

            bounces += 1;
        }

        if !is_valid_radiance(&l) {
            warn!("Corrupt radiance {l} for ray {ray:?}");
            ctx.stats.corrupt_samples += 1;
        }
        l
    }
}

impl From<&ParamSet> for PathIntegrator {
    /// Create a `PathIntegrator` from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let max_depth = params.find_one_int("maxdepth", 5);
        let rr_min_depth = params.find_one_int("rrmindepth", 3);
        let russian_roulette = params.find_one_bool("russianroulette", true);
        let lss = params.find_one_string("lightsamplestrategy", "all".to_owned());
        let light_sample_strategy = LightSampleStrategy::from(lss.as_ref());

        if max_depth < 0 || rr_min_depth < 0 {
            error!("Negative 'maxdepth' {max_depth} or 'rrmindepth' {rr_min_depth}. Using 0.");
        }

        Self::new(
            max(0, max_depth) as usize,
            max(0, rr_min_depth) as usize,
            russian_roulette,
            light_sample_strategy,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::approx_eq;
    use lights::*;
    use materials::*;
    use rtcore::light::*;
    use rtcore::material::*;
    use rtcore::primitives::*;
    use samplers::*;
    use shapes::*;
    use std::sync::Arc;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn build_scene(primitives: Vec<Arc<GeometricPrimitive>>, lights: Vec<ArcLight>) -> Scene {
        Scene::new(Arc::new(PrimitiveList::new(primitives)), lights)
    }

    fn surface(shape: ArcShape, material: ArcMaterial) -> Arc<GeometricPrimitive> {
        Arc::new(GeometricPrimitive::new(shape, Some(material), None))
    }

    fn emitter(shape: ArcShape, l: Spectrum) -> (Arc<GeometricPrimitive>, ArcLight) {
        reflective_emitter(shape, l, None)
    }

    fn reflective_emitter(
        shape: ArcShape,
        l: Spectrum,
        material: Option<ArcMaterial>,
    ) -> (Arc<GeometricPrimitive>, ArcLight) {
        let light: ArcLight = Arc::new(DiffuseAreaLight::new(l, Arc::clone(&shape), false));
        let prim = Arc::new(GeometricPrimitive::new(shape, material, Some(Arc::clone(&light))));
        (prim, light)
    }

    fn camera_rays(n: usize) -> impl Iterator<Item = Ray> {
        (0..n).map(move |i| {
            let x = (i as Float / n as Float - 0.5) * 0.2;
            Ray::new(Point3f::new(x, 0.0, -5.0), Vector3f::new(0.0, 0.0, 1.0))
        })
    }

    #[test]
    fn from_params_defaults() {
        let integrator = PathIntegrator::from(&ParamSet::new());
        assert_eq!(integrator.max_depth(), 5);
        assert_eq!(integrator.rr_min_depth(), 3);
        assert!(integrator.russian_roulette());
        assert_eq!(integrator.light_sample_strategy(), LightSampleStrategy::All);

        let mut ps = ParamSet::new();
        ps.add_int("maxdepth", &[12]);
        ps.add_bool("russianroulette", &[false]);
        ps.add_string("lightsamplestrategy", &["power".to_owned()]);
        let integrator = PathIntegrator::from(&ps);
        assert_eq!(integrator.max_depth(), 12);
        assert!(!integrator.russian_roulette());
        assert_eq!(integrator.light_sample_strategy(), LightSampleStrategy::Power);
    }

    #[test]
    fn absorbing_surface_without_lights_is_black() {
        init_logging();
        let sphere: ArcShape = Arc::new(Sphere::new(Point3f::ZERO, 1.0, false));
        let scene = build_scene(
            vec![surface(sphere, Arc::new(MatteMaterial::new(Spectrum::ZERO)))],
            vec![],
        );

        let mut integrator = PathIntegrator::from(&ParamSet::new());
        integrator.preprocess(&scene);
        let mut ctx = RenderContext::default();
        let mut sampler = RandomSampler::new(0);
        for ray in camera_rays(64) {
            let l = integrator.li(&mut ctx, &mut sampler, &scene, &ray);
            assert_eq!(l, Spectrum::ZERO);
        }
        assert_eq!(ctx.stats.samples, 64);
        assert_eq!(ctx.stats.corrupt_samples, 0);
        assert_eq!(ctx.arena.used(), 0);
    }

    #[test]
    fn reflective_surface_without_lights_is_black() {
        init_logging();
        let sphere: ArcShape = Arc::new(Sphere::new(Point3f::ZERO, 1.0, false));
        let scene = build_scene(
            vec![surface(sphere, Arc::new(MatteMaterial::new(Spectrum::new(0.8))))],
            vec![],
        );

        let integrator = PathIntegrator::from(&ParamSet::new());
        let mut ctx = RenderContext::default();
        let mut sampler = RandomSampler::new(1);
        for ray in camera_rays(64) {
            assert!(integrator.li(&mut ctx, &mut sampler, &scene, &ray).is_black());
        }
    }

    #[test]
    fn escaping_camera_ray_sees_sky() {
        let sky = Arc::new(SkyboxLight::new(
            Spectrum::from_rgb(0.1, 0.2, 0.9),
            Spectrum::ONE,
            Vector3f::new(0.0, 0.0, 1.0),
        ));
        let scene = build_scene(vec![], vec![Arc::clone(&sky) as ArcLight]);

        let integrator = PathIntegrator::from(&ParamSet::new());
        let mut ctx = RenderContext::default();
        let mut sampler = RandomSampler::new(2);
        let ray = Ray::new(Point3f::ZERO, Vector3f::new(0.0, 0.0, 1.0));
        let l = integrator.li(&mut ctx, &mut sampler, &scene, &ray);
        assert_eq!(l, sky.zenith);
    }

    #[test]
    fn camera_sees_emitter_directly() {
        let sphere: ArcShape = Arc::new(Sphere::new(Point3f::ZERO, 1.0, false));
        let (prim, light) = emitter(sphere, Spectrum::new(4.0));
        let scene = build_scene(vec![prim], vec![light]);

        let mut integrator = PathIntegrator::from(&ParamSet::new());
        integrator.preprocess(&scene);
        let mut ctx = RenderContext::default();
        let mut sampler = RandomSampler::new(3);
        for ray in camera_rays(16) {
            let l = integrator.li(&mut ctx, &mut sampler, &scene, &ray);
            assert_eq!(l, Spectrum::new(4.0));
        }
    }

    #[test]
    fn mirror_reflects_emitter() {
        let mirror: ArcShape = Arc::new(Disk::new(
            Point3f::ZERO,
            Normal3f::new(0.0, 0.0, 1.0),
            10.0,
            false,
        ));
        let ball: ArcShape = Arc::new(Sphere::new(Point3f::new(0.0, 0.0, 3.0), 0.5, false));
        let (prim, light) = emitter(ball, Spectrum::new(2.0));
        let scene = build_scene(
            vec![surface(mirror, Arc::new(MirrorMaterial::new(Spectrum::new(0.5)))), prim],
            vec![light],
        );

        let integrator = PathIntegrator::from(&ParamSet::new());
        let mut ctx = RenderContext::default();
        let mut sampler = RandomSampler::new(4);
        let ray = Ray::new(Point3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, -1.0));
        let l = integrator.li(&mut ctx, &mut sampler, &scene, &ray);
        assert!(approx_eq!(f32, l[0], 1.0, epsilon = 1e-5));
    }

    #[test]
    fn arena_exhaustion_aborts_the_sample() {
        let sphere: ArcShape = Arc::new(Sphere::new(Point3f::ZERO, 1.0, false));
        let scene = build_scene(
            vec![surface(sphere, Arc::new(MatteMaterial::new(Spectrum::new(0.5))))],
            vec![],
        );

        let integrator = PathIntegrator::from(&ParamSet::new());
        let mut ctx = RenderContext::new(1);
        let mut sampler = RandomSampler::new(5);
        let ray = Ray::new(Point3f::new(0.0, 0.0, -5.0), Vector3f::new(0.0, 0.0, 1.0));
        let l = integrator.li(&mut ctx, &mut sampler, &scene, &ray);
        assert!(l.is_black());
        assert_eq!(ctx.stats.arena_exhaustions, 1);
    }

    #[test]
    fn power_strategy_builds_distribution() {
        let sphere: ArcShape = Arc::new(Sphere::new(Point3f::ZERO, 1.0, false));
        let (prim, light) = emitter(sphere, Spectrum::ONE);
        let scene = build_scene(vec![prim], vec![light]);

        let mut integrator = PathIntegrator::new(5, 3, true, LightSampleStrategy::Power);
        assert!(integrator.light_distribution.is_none());
        integrator.preprocess(&scene);
        assert!(integrator.light_distribution.is_some());

        let mut integrator = PathIntegrator::new(5, 3, true, LightSampleStrategy::All);
        integrator.preprocess(&scene);
        assert!(integrator.light_distribution.is_none());
    }

    /// Closed-form radiance inside a diffuse spherical enclosure of radius
    /// `big_r` and albedo `rho` lit by a concentric spherical emitter of
    /// radius `r`, radiance `le` and diffuse albedo `rho_ball`. A point on the
    /// enclosure sees the emitter over a projected solid angle of `pi * k` with
    /// `k = (r / big_r)²`, and the rest of the enclosure over `pi * (1 - k)`.
    /// The emitter only sees the enclosure, so it reflects `rho_ball` times the
    /// enclosure radiance.
    fn enclosure_radiance(rho: f64, rho_ball: f64, le: f64, r: f64, big_r: f64) -> f64 {
        let k = (r / big_r) * (r / big_r);
        rho * le * k / (1.0 - rho * (1.0 - k) - rho * k * rho_ball)
    }

    fn render_enclosure(strategy: LightSampleStrategy, russian_roulette: bool, seed: u64) -> (f64, f64) {
        render_enclosure_with_ball(None, strategy, russian_roulette, seed)
    }

    fn render_enclosure_with_ball(
        ball_material: Option<ArcMaterial>,
        strategy: LightSampleStrategy,
        russian_roulette: bool,
        seed: u64,
    ) -> (f64, f64) {
        let wall: ArcShape = Arc::new(Sphere::new(Point3f::ZERO, 2.0, true));
        let ball: ArcShape = Arc::new(Sphere::new(Point3f::ZERO, 0.5, false));
        let (prim, light) = reflective_emitter(ball, Spectrum::ONE, ball_material);
        let scene = build_scene(
            vec![surface(wall, Arc::new(MatteMaterial::new(Spectrum::new(0.5)))), prim],
            vec![light],
        );

        let mut integrator = PathIntegrator::new(64, 2, russian_roulette, strategy);
        integrator.preprocess(&scene);
        let mut ctx = RenderContext::default();
        let mut sampler = RandomSampler::new(seed);

        // Looks along the wall without seeing the emitter.
        let ray = Ray::new(Point3f::new(0.0, 1.0, 0.0), Vector3f::new(1.0, 0.0, 0.0));

        let n = 100_000;
        let (mut sum, mut sum_sq) = (0.0_f64, 0.0_f64);
        for _ in 0..n {
            let l = integrator.li(&mut ctx, &mut sampler, &scene, &ray)[0] as f64;
            sum += l;
            sum_sq += l * l;
        }
        assert_eq!(ctx.stats.corrupt_samples, 0);

        let mean = sum / n as f64;
        let variance = max(0.0, sum_sq / n as f64 - mean * mean);
        (mean, (variance / n as f64).sqrt())
    }

    #[test]
    fn enclosure_converges_without_russian_roulette() {
        init_logging();
        let expected = enclosure_radiance(0.5, 0.0, 1.0, 0.5, 2.0);
        let (mean, std_err) = render_enclosure(LightSampleStrategy::All, false, 11);
        assert!(
            (mean - expected).abs() <= 3.0 * std_err,
            "mean {mean} expected {expected} std err {std_err}"
        );
    }

    #[test]
    fn enclosure_converges_with_russian_roulette() {
        init_logging();
        let expected = enclosure_radiance(0.5, 0.0, 1.0, 0.5, 2.0);
        let (mean, std_err) = render_enclosure(LightSampleStrategy::All, true, 12);
        assert!(
            (mean - expected).abs() <= 3.0 * std_err,
            "mean {mean} expected {expected} std err {std_err}"
        );
    }

    #[test]
    fn enclosure_converges_with_power_light_selection() {
        let expected = enclosure_radiance(0.5, 0.0, 1.0, 0.5, 2.0);
        let (mean, std_err) = render_enclosure(LightSampleStrategy::Power, true, 13);
        assert!(
            (mean - expected).abs() <= 3.0 * std_err,
            "mean {mean} expected {expected} std err {std_err}"
        );
    }

    #[test]
    fn emitter_with_material_keeps_scattering() {
        init_logging();
        let material: ArcMaterial = Arc::new(MatteMaterial::new(Spectrum::new(0.8)));
        let expected = enclosure_radiance(0.5, 0.8, 1.0, 0.5, 2.0);
        let absorbing = enclosure_radiance(0.5, 0.0, 1.0, 0.5, 2.0);
        let (mean, std_err) =
            render_enclosure_with_ball(Some(material), LightSampleStrategy::All, false, 14);
        assert!(
            (mean - expected).abs() <= 3.0 * std_err,
            "mean {mean} expected {expected} std err {std_err}"
        );
        assert!(
            mean - absorbing > 3.0 * std_err,
            "light reflected by the emitter is missing: mean {mean}"
        );
    }

    #[test]
    fn specular_lobe_in_hybrid_defers_to_emission() {
        init_logging();
        let floor: ArcShape = Arc::new(Disk::new(
            Point3f::ZERO,
            Normal3f::new(0.0, 0.0, 1.0),
            10.0,
            false,
        ));
        let mix: ArcMaterial = Arc::new(MixMaterial::new(
            Arc::new(MirrorMaterial::new(Spectrum::new(0.5))),
            Arc::new(MatteMaterial::new(Spectrum::new(0.3))),
        ));
        let sky: ArcLight = Arc::new(SkyboxLight::new(
            Spectrum::ONE,
            Spectrum::ONE,
            Vector3f::new(0.0, 0.0, 1.0),
        ));
        let scene = build_scene(vec![surface(floor, mix)], vec![sky]);

        let integrator = PathIntegrator::from(&ParamSet::new());
        let mut ctx = RenderContext::default();
        let mut sampler = RandomSampler::new(15);
        let ray = Ray::new(Point3f::new(0.0, 0.0, 1.0), Vector3f::new(0.0, 0.0, -1.0));

        // The BSDF has a specular lobe, so the sky is not sampled at the floor
        // and each path picks up exactly one lobe's albedo on escape.
        let (mut mirrored, mut diffused) = (0, 0);
        for _ in 0..1000 {
            let l = integrator.li(&mut ctx, &mut sampler, &scene, &ray)[0];
            if approx_eq!(f32, l, 0.5, epsilon = 1e-4) {
                mirrored += 1;
            } else if approx_eq!(f32, l, 0.3, epsilon = 1e-4) {
                diffused += 1;
            } else {
                panic!("unexpected radiance {l}");
            }
        }
        assert!(mirrored > 0 && diffused > 0);
    }
}
