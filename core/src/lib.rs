//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

#[macro_use]
pub mod geometry;

// Re-export.
pub mod integrator;
pub mod interaction;
pub mod light;
pub mod light_distrib;
pub mod material;
pub mod memory;
pub mod microfacet;
pub mod paramset;
pub mod pbrt;
pub mod primitives;
pub mod reflection;
pub mod rng;
pub mod sampler;
pub mod sampling;
pub mod scene;
pub mod spectrum;
