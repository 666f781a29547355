//! Light Distribution.

mod power;
mod uniform;

pub use power::*;
pub use uniform::*;

use crate::geometry::*;
use crate::sampling::*;
use crate::scene::*;
use std::fmt;
use std::sync::Arc;

/// Strategy for sampling area lights during direct lighting.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LightSampleStrategy {
    /// Take one sample of every area light and sum them.
    All,

    /// Sample one area light chosen uniformly.
    Uniform,

    /// Sample one area light chosen proportionally to its emitted power.
    Power,
}

impl From<&str> for LightSampleStrategy {
    /// Returns a `LightSampleStrategy` given a string name.
    fn from(name: &str) -> Self {
        match name {
            "all" => Self::All,
            "uniform" => Self::Uniform,
            "power" => Self::Power,
            _ => {
                error!(
                    "Light sample strategy '{}' unknown. Using 'all'.",
                    name
                );
                Self::All
            }
        }
    }
}

impl fmt::Display for LightSampleStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Uniform => write!(f, "uniform"),
            Self::Power => write!(f, "power"),
        }
    }
}

/// Interface of light distribution implementations that provide probability
/// distributions for choosing one of the scene's area lights.
pub trait LightDistribution {
    /// Returns the sampling distribution over `Scene::area_lights` to use at
    /// point `p`.
    ///
    /// * `p` - The shading point.
    fn lookup(&self, p: &Point3f) -> Option<Arc<Distribution1D>>;
}

/// Atomic reference counted `LightDistribution `.
pub type ArcLightDistribution = Arc<dyn LightDistribution + Send + Sync>;

/// Returns a new `LightDistribution` for the strategy, or `None` when every
/// area light is sampled or there are none to choose from.
///
/// * `strategy` - The strategy to use for light sampling.
/// * `scene`    - The scene.
pub fn create_light_sample_distribution(
    strategy: LightSampleStrategy,
    scene: &Scene,
) -> Option<ArcLightDistribution> {
    if scene.area_lights.is_empty() {
        return None;
    }
    match strategy {
        LightSampleStrategy::All => None,
        LightSampleStrategy::Uniform => Some(Arc::new(UniformLightDistribution::new(scene))),
        LightSampleStrategy::Power => Some(Arc::new(PowerLightDistribution::new(scene))),
    }
}
