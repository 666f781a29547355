//! 1D Distribution.

use crate::pbrt::*;

/// Represents a piecewise-constant 1D function's PDF and CDF and provides
/// methods to sample it, either as a continuous variable or as a discrete
/// choice among its entries.
#[derive(Clone, Debug)]
pub struct Distribution1D {
    /// Piecewise-constant function.
    pub func: Vec<Float>,

    /// CDF for `func`; one entry longer than `func`.
    pub cdf: Vec<Float>,

    /// Integral of `func`.
    pub func_int: Float,
}

impl Distribution1D {
    /// Returns a new `Distribution1D` for given piecewise-constant function.
    /// A function that integrates to zero is sampled uniformly.
    ///
    /// - `f` - Piecewise-constant 1D function; must not be empty.
    pub fn new(f: Vec<Float>) -> Self {
        assert!(!f.is_empty(), "Distribution1D requires at least one value");
        let n = f.len();

        // Compute integral of step function at `x_i`.
        let mut cdf: Vec<Float> = Vec::with_capacity(n + 1);
        cdf.push(0.0);
        for i in 1..n + 1 {
            cdf.push(cdf[i - 1] + f[i - 1] / n as Float);
        }

        // Transform step function integral into CDF.
        let func_int = cdf[n];
        if func_int == 0.0 {
            for (i, v) in cdf.iter_mut().enumerate().skip(1) {
                *v = i as Float / n as Float;
            }
        } else {
            for v in cdf.iter_mut().skip(1) {
                *v /= func_int;
            }
        }

        Self {
            func: f,
            cdf,
            func_int,
        }
    }

    /// Returns the number of entries of the piecewise-constant function.
    pub fn count(&self) -> usize {
        self.func.len()
    }

    /// Return an index sampled from the discrete distribution, its probability
    /// and the random sample remapped to [0, 1) within the chosen segment.
    ///
    /// - `u` - The random sample.
    pub fn sample_discrete(&self, u: Float) -> (usize, Float, Float) {
        let offset = find_interval(self.cdf.len(), |index| self.cdf[index] <= u);
        let pdf = self.discrete_pdf(offset);
        let width = self.cdf[offset + 1] - self.cdf[offset];
        let u_remapped = if width > 0.0 {
            clamp((u - self.cdf[offset]) / width, 0.0, 1.0)
        } else {
            0.0
        };
        (offset, pdf, u_remapped)
    }

    /// Return the probability of sampling a given index with
    /// `sample_discrete()`.
    ///
    /// * `index` - Sample index.
    pub fn discrete_pdf(&self, index: usize) -> Float {
        assert!(index < self.count());
        if self.func_int > 0.0 {
            self.func[index] / (self.func_int * self.count() as Float)
        } else {
            1.0 / self.count() as Float
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
