//! Rendering Context

use crate::memory::*;
use crate::paramset::*;
use std::fmt;
use std::ops::AddAssign;

/// Counters collected by one rendering thread.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Radiance samples computed.
    pub samples: u64,

    /// Samples whose radiance had NaN, infinite or negative channels.
    pub corrupt_samples: u64,

    /// Paths cut short because the arena could not hold a BSDF.
    pub arena_exhaustions: u64,
}

impl AddAssign for RenderStats {
    fn add_assign(&mut self, other: Self) {
        self.samples += other.samples;
        self.corrupt_samples += other.corrupt_samples;
        self.arena_exhaustions += other.arena_exhaustions;
    }
}

impl fmt::Display for RenderStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "samples: {}, corrupt samples: {}, arena exhaustions: {}",
            self.samples, self.corrupt_samples, self.arena_exhaustions
        )
    }
}

/// State owned by one rendering thread: the transient arena for per-bounce
/// allocations and the statistics counters.
pub struct RenderContext {
    /// Scratch memory cleared once per bounce.
    pub arena: TransientArena,

    /// Counters for this thread.
    pub stats: RenderStats,
}

impl RenderContext {
    /// Create a new `RenderContext`.
    ///
    /// * `arena_bytes` - Budget of the transient arena.
    pub fn new(arena_bytes: usize) -> Self {
        Self {
            arena: TransientArena::new(arena_bytes),
            stats: RenderStats::default(),
        }
    }
}

impl Default for RenderContext {
    fn default() -> Self {
        Self::new(TransientArena::DEFAULT_BUDGET)
    }
}

impl From<&ParamSet> for RenderContext {
    /// Create a rendering context from the `arenabytes` parameter.
    ///
    /// * `params` - Parameter set.
    fn from(params: &ParamSet) -> Self {
        let bytes = params.find_one_int("arenabytes", TransientArena::DEFAULT_BUDGET as i32);
        let bytes = if bytes > 0 {
            bytes as usize
        } else {
            warn!(
                "Invalid arenabytes {}. Using {}.",
                bytes,
                TransientArena::DEFAULT_BUDGET
            );
            TransientArena::DEFAULT_BUDGET
        };
        Self::new(bytes)
    }
}
