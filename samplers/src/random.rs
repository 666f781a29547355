//! Random Sampler.

use rtcore::geometry::*;
use rtcore::paramset::*;
use rtcore::pbrt::*;
use rtcore::rng::*;
use rtcore::sampler::*;

/// Implements a sampler that uses a PRNG to generate uniformly random samples.
#[derive(Clone, Debug)]
pub struct RandomSampler {
    /// The random number generator.
    pub rng: RNG,
}

impl RandomSampler {
    /// Create a new `RandomSampler`.
    ///
    /// * `seed` - Seed for the random number generator. Samplers with
    ///            different seeds produce independent streams.
    pub fn new(seed: u64) -> Self {
        Self { rng: RNG::new(seed) }
    }
}

impl Default for RandomSampler {
    fn default() -> Self {
        Self { rng: RNG::default() }
    }
}

impl Sampler for RandomSampler {
    /// Returns the sample value for the next dimension of the current sample vector.
    fn get_1d(&mut self) -> Float {
        self.rng.uniform_float()
    }

    /// Returns the sample value for the next two dimensions of the current sample vector.
    fn get_2d(&mut self) -> Point2f {
        self.rng.uniform_point2()
    }

    /// Generates a new instance of the sampler for use by a rendering thread.
    ///
    /// * `seed` - The seed for the random number generator.
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler + Send> {
        Box::new(Self::new(seed))
    }
}

impl From<&ParamSet> for RandomSampler {
    /// Create a `RandomSampler` from given parameter set.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let seed = params.find_one_int("seed", 0);
        if seed < 0 {
            warn!("Negative sampler seed {}. Using its magnitude.", seed);
        }
        Self::new(seed.unsigned_abs() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_in_unit_interval() {
        let mut sampler = RandomSampler::new(7);
        for _ in 0..10000 {
            let u = sampler.get_1d();
            assert!((0.0..1.0).contains(&u));
            let p = sampler.get_2d();
            assert!((0.0..1.0).contains(&p.x));
            assert!((0.0..1.0).contains(&p.y));
        }
    }

    #[test]
    fn same_seed_repeats_stream() {
        let mut a = RandomSampler::new(42);
        let mut b = RandomSampler::new(42);
        for _ in 0..100 {
            assert_eq!(a.get_1d(), b.get_1d());
        }
    }

    #[test]
    fn cloned_samplers_are_independent() {
        let base = RandomSampler::new(0);
        let mut a = base.clone_sampler(1);
        let mut b = base.clone_sampler(2);
        let same = (0..100).filter(|_| a.get_1d() == b.get_1d()).count();
        assert!(same < 5);
    }

    #[test]
    fn mean_is_one_half() {
        let mut sampler = RandomSampler::from(&ParamSet::new());
        let n = 100_000;
        let sum: f64 = (0..n).map(|_| sampler.get_1d() as f64).sum();
        let mean = sum / n as f64;
        assert!(float_cmp::approx_eq!(f64, mean, 0.5, epsilon = 0.01));
    }
}
