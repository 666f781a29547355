//! Hybrid BxDF

use super::*;

/// Maximum number of BxDFs that can be stored in a `HybridBxDF`.
pub const MAX_BXDFS: usize = 8;

/// Combines up to `MAX_BXDFS` arena-allocated BxDFs into one.
///
/// Evaluation is the unweighted average of the children that match the
/// reflection or transmission side of the direction pair. Sampling picks a
/// child uniformly and reports the unweighted average PDF of all children.
#[derive(Copy, Clone, Debug)]
pub struct HybridBxDF<'arena> {
    /// The children; the first `count` slots are filled.
    bxdfs: [Option<&'arena BxDF<'arena>>; MAX_BXDFS],

    /// Number of children.
    count: usize,

    /// Bitwise OR of the children's types.
    bxdf_type: BxDFType,
}

impl<'arena> Default for HybridBxDF<'arena> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'arena> HybridBxDF<'arena> {
    /// Create an empty `HybridBxDF`.
    pub fn new() -> Self {
        Self {
            bxdfs: [None; MAX_BXDFS],
            count: 0,
            bxdf_type: BxDFType::empty(),
        }
    }

    /// Add a child.
    ///
    /// * `bxdf` - The child BxDF.
    pub fn add(&mut self, bxdf: &'arena BxDF<'arena>) {
        assert!(
            self.count < MAX_BXDFS,
            "Cannot add BxDF. Hybrid maximum limit {} reached.",
            MAX_BXDFS
        );
        self.bxdfs[self.count] = Some(bxdf);
        self.count += 1;
        self.bxdf_type |= bxdf.get_type();
    }

    /// Returns the number of children.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns true if there are no children.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Returns an iterator over the children.
    pub fn iter(&self) -> impl Iterator<Item = &'arena BxDF<'arena>> + '_ {
        self.bxdfs[..self.count].iter().flatten().copied()
    }

    /// Returns the combined BxDF type.
    pub fn get_type(&self) -> BxDFType {
        self.bxdf_type
    }

    /// Returns the number of children whose type matches `flags`.
    ///
    /// * `flags` - The `BxDFType` to match.
    pub fn num_components(&self, flags: BxDFType) -> usize {
        self.iter().map(|b| b.num_components(flags)).sum()
    }

    /// Returns the average value of the children on the side of the surface
    /// implied by the direction pair.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn f(&self, wo: &Vector3f, wi: &Vector3f) -> Spectrum {
        let side = if same_hemisphere(wo, wi) {
            BxDFType::REFLECTION
        } else {
            BxDFType::TRANSMISSION
        };

        let mut matching = 0;
        let mut l = Spectrum::ZERO;
        for bxdf in self.iter().filter(|b| b.get_type().matches(side)) {
            matching += 1;
            l += bxdf.f(wo, wi);
        }

        if matching > 0 {
            l / matching as Float
        } else {
            Spectrum::ZERO
        }
    }

    /// Samples one child chosen uniformly with `u[0]`.
    ///
    /// * `wo` - Outgoing direction.
    /// * `u`  - The 2D uniform random values.
    pub fn sample_f(&self, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let n = self.count;
        if n == 0 {
            return BxDFSample::from(self.bxdf_type);
        }

        // Choose which child to sample and remap `u[0]` to [0, 1).
        let comp = min((u[0] * n as Float).floor() as usize, n - 1);
        let u_remapped = Point2f::new(
            min(u[0] * n as Float - comp as Float, ONE_MINUS_EPSILON),
            u[1],
        );

        let bxdf = match self.bxdfs[comp] {
            Some(b) => b,
            None => return BxDFSample::from(self.bxdf_type),
        };

        let sample = bxdf.sample_f(wo, &u_remapped);
        if sample.pdf == 0.0 {
            return BxDFSample::from(sample.bxdf_type);
        }

        let inv_n = 1.0 / n as Float;
        if bxdf.get_type().is_specular() {
            return BxDFSample::new(
                sample.f * inv_n,
                sample.pdf * inv_n,
                sample.wi,
                sample.bxdf_type,
            );
        }

        // Fold in every child at the sampled direction.
        let pdf = self.pdf(wo, &sample.wi);
        if pdf == 0.0 {
            return BxDFSample::from(sample.bxdf_type);
        }
        let f = self.f(wo, &sample.wi);
        BxDFSample::new(f, pdf, sample.wi, sample.bxdf_type)
    }

    /// Returns the unweighted average of the children's PDFs.
    ///
    /// * `wo` - Outgoing direction.
    /// * `wi` - Incident direction.
    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if self.count == 0 {
            return 0.0;
        }
        let sum: Float = self.iter().map(|b| b.pdf(wo, wi)).sum();
        sum / self.count as Float
    }
}
