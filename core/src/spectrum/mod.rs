//! Spectrum

mod rgb_spectrum;

// Re-export
pub use rgb_spectrum::*;

/// Rendering uses 3-channel tristimulus colour throughout.
pub type Spectrum = RGBSpectrum;
