//! RGB Spectrum.

use crate::pbrt::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub};

/// Number of samples to use for `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// RGBSpectrum represents a colour as a weighted sum of red, green and blue
/// components.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    /// The sampled spectral values.
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Black.
    pub const ZERO: Self = Self { c: [0.0; 3] };

    /// White.
    pub const ONE: Self = Self { c: [1.0; 3] };

    /// Create a new `RGBSpectrum` with a constant value across all channels.
    ///
    /// * `v` - Constant value.
    pub fn new(v: Float) -> Self {
        Self { c: [v; RGB_SAMPLES] }
    }

    /// Create a new `RGBSpectrum` from red, green and blue values.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub fn from_rgb(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Returns the red, green and blue values.
    pub fn to_rgb(&self) -> [Float; 3] {
        self.c
    }

    /// Returns true if any channel is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }

    /// Returns true if any channel is infinite.
    pub fn has_infs(&self) -> bool {
        self.c.iter().any(|v| v.is_infinite())
    }

    /// Returns true if any channel is less than zero.
    pub fn has_negatives(&self) -> bool {
        self.c.iter().any(|v| *v < 0.0)
    }

    /// Returns true if the values are zero everywhere.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|v| *v == 0.0)
    }

    /// Returns the maximum channel value.
    pub fn max_component_value(&self) -> Float {
        max(self.c[0], max(self.c[1], self.c[2]))
    }

    /// Returns the y-coefficient of XYZ colour (luminance).
    pub fn y(&self) -> Float {
        0.212671 * self.c[0] + 0.715160 * self.c[1] + 0.072169 * self.c[2]
    }

    /// Returns the average of the channels.
    pub fn average(&self) -> Float {
        (self.c[0] + self.c[1] + self.c[2]) / RGB_SAMPLES as Float
    }

    /// Clamps the channels to `[low, high]`.
    ///
    /// * `low`  - Lower bound.
    /// * `high` - Upper bound.
    pub fn clamp(&self, low: Float, high: Float) -> Self {
        Self {
            c: [
                clamp(self.c[0], low, high),
                clamp(self.c[1], low, high),
                clamp(self.c[2], low, high),
            ],
        }
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.c[0], self.c[1], self.c[2])
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] + other.c[0],
                self.c[1] + other.c[1],
                self.c[2] + other.c[2],
            ],
        }
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, other: Self) {
        for i in 0..RGB_SAMPLES {
            self.c[i] += other.c[i];
        }
    }
}

impl Sub for RGBSpectrum {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] - other.c[0],
                self.c[1] - other.c[1],
                self.c[2] - other.c[2],
            ],
        }
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        Self {
            c: [
                self.c[0] * other.c[0],
                self.c[1] * other.c[1],
                self.c[2] * other.c[2],
            ],
        }
    }
}

impl MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, other: Self) {
        for i in 0..RGB_SAMPLES {
            self.c[i] *= other.c[i];
        }
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self {
            c: [self.c[0] * f, self.c[1] * f, self.c[2] * f],
        }
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl MulAssign<Float> for RGBSpectrum {
    fn mul_assign(&mut self, f: Float) {
        for v in self.c.iter_mut() {
            *v *= f;
        }
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        self * inv
    }
}

impl DivAssign<Float> for RGBSpectrum {
    fn div_assign(&mut self, f: Float) {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        *self *= inv;
    }
}

impl Neg for RGBSpectrum {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            c: [-self.c[0], -self.c[1], -self.c[2]],
        }
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl IndexMut<usize> for RGBSpectrum {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        &mut self.c[i]
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
