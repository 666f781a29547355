//! Materials

#[macro_use]
extern crate log;

mod glass;
mod glossy;
mod matte;
mod mirror;
mod mix;
mod plastic;

// Re-export
pub use glass::*;
pub use glossy::*;
pub use matte::*;
pub use mirror::*;
pub use mix::*;
pub use plastic::*;
