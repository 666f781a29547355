//! Lights

#[macro_use]
extern crate log;

mod diffuse;
mod distant;
mod skybox;

// Re-export.
pub use diffuse::*;
pub use distant::*;
pub use skybox::*;
