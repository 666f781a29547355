//! Common numeric types, constants and helpers.

mod common;

// Re-export
pub use common::*;
