//! Random Number Generator.

use crate::geometry::Point2f;
use crate::pbrt::*;

/// 1 - epsilon for 32-bit precision: the largest `f32` below 1.
pub const ONE_MINUS_EPSILON: Float = hexf32!("0x1.fffffep-1"); // 0.99999994

/// 2^-32, maps a `u32` into [0, 1).
const U32_TO_UNIT: Float = hexf32!("0x1.0p-32");

const PCG32_DEFAULT_STATE: u64 = 0x853c49e6748fea9b;
const PCG32_DEFAULT_STREAM: u64 = 0xda3e39cb94b95bdb;
const PCG32_MULT: u64 = 0x5851f42d4c957f2d;

/// PCG32 pseudo-random number generator. Each rendering thread owns its own
/// instance; two generators created with different sequence indices produce
/// independent streams.
#[derive(Clone, Debug)]
pub struct RNG {
    state: u64,
    inc: u64,
}

impl Default for RNG {
    /// Return a new instance of `RNG` with default state and stream.
    fn default() -> Self {
        Self {
            state: PCG32_DEFAULT_STATE,
            inc: PCG32_DEFAULT_STREAM,
        }
    }
}

impl RNG {
    /// Create a new `RNG` seeded with the given sequence index.
    ///
    /// * `sequence_index` - The stream to select.
    pub fn new(sequence_index: u64) -> Self {
        let mut rng = Self { state: 0, inc: 0 };
        rng.set_sequence(sequence_index);
        rng
    }

    /// Restart the generator on the given stream.
    ///
    /// * `init_seq` - The stream to select.
    pub fn set_sequence(&mut self, init_seq: u64) {
        self.state = 0;
        self.inc = init_seq.wrapping_shl(1) | 1;
        self.uniform_u32();
        self.state = self.state.wrapping_add(PCG32_DEFAULT_STATE);
        self.uniform_u32();
    }

    /// Returns a uniformly distributed u32 value.
    pub fn uniform_u32(&mut self) -> u32 {
        let old_state = self.state;
        self.state = old_state.wrapping_mul(PCG32_MULT).wrapping_add(self.inc);

        let xor_shifted = (((old_state >> 18) ^ old_state) >> 27) as u32;
        let rot = (old_state >> 59) as u32;
        xor_shifted.rotate_right(rot)
    }

    /// Returns a uniformly distributed value over the half open interval [0.0, 1.0).
    pub fn uniform_float(&mut self) -> Float {
        min(self.uniform_u32() as Float * U32_TO_UNIT, ONE_MINUS_EPSILON)
    }

    /// Returns a point uniformly distributed over [0, 1)^2.
    pub fn uniform_point2(&mut self) -> Point2f {
        let x = self.uniform_float();
        let y = self.uniform_float();
        Point2f::new(x, y)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
