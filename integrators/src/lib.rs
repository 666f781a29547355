//! Integrators

#[macro_use]
extern crate log;

mod path;

// Re-export.
pub use path::*;
