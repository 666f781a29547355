//! BxDF Sample

use super::*;

/// Stores evaluation of BxDF samples.
#[derive(Copy, Clone, Debug)]
pub struct BxDFSample {
    /// The sample value.
    pub f: Spectrum,

    /// The value of the PDF.
    pub pdf: Float,

    /// The sampled inbound direction.
    pub wi: Vector3f,

    /// The type of the lobe that was sampled.
    pub bxdf_type: BxDFType,
}

impl BxDFSample {
    /// Create a new `BxDFSample`.
    ///
    /// * `f`         - The sample value.
    /// * `pdf`       - The value of the PDF.
    /// * `wi`        - The sampled inbound direction.
    /// * `bxdf_type` - The type of the lobe that was sampled.
    pub fn new(f: Spectrum, pdf: Float, wi: Vector3f, bxdf_type: BxDFType) -> Self {
        Self {
            f,
            pdf,
            wi,
            bxdf_type,
        }
    }
}

impl From<BxDFType> for BxDFSample {
    /// Create a failed sample carrying just the BxDF type. The value is black
    /// and the PDF is zero.
    ///
    /// * `bxdf_type` - The type of BxDF.
    fn from(bxdf_type: BxDFType) -> Self {
        Self::new(Spectrum::ZERO, 0.0, Vector3f::ZERO, bxdf_type)
    }
}
