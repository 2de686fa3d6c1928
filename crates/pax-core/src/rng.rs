//! Deterministic kernel RNG wrapper.
//!
//! # Determinism strategy
//!
//! The kernel draws randomness for exactly two things: hold-room tie-breaks
//! at construction and optional per-spawn sub-minute jitter.  Both go through
//! a single `SimRng` seeded from the run configuration, and the kernel defines
//! a fixed draw order (tie-breaks in flight-roster order, then jitter in
//! spawn order), so a seeded run is byte-for-byte reproducible.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Seedable simulation-level RNG.
///
/// Used only in single-threaded contexts; the kernel never shares it.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
