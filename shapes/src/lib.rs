//! Geometry

#[macro_use]
extern crate log;

mod common;
mod disk;
mod sphere;

// Re-export
pub use common::*;
pub use disk::*;
pub use sphere::*;
