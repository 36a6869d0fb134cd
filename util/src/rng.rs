use std::hash::{Hash, Hasher};

use rand::prelude::*;
use rand_xorshift::XorShiftRng;

/// Construct a throwaway random number generator seeded by a noise value.
///
/// Good for short-term use in immutable contexts given a varying source of
/// noise like map position coordinates, and for turning user-given seed
/// strings into reproducible generators.
pub fn srng(seed: &(impl Hash + ?Sized)) -> XorShiftRng {
    let mut h = crate::FastHasher::default();
    seed.hash(&mut h);
    XorShiftRng::seed_from_u64(h.finish())
}

pub trait RngExt {
    /// Uniform integer in `[0, n)`.
    ///
    /// Returns 0 for an empty range instead of panicking.
    fn rand_below(&mut self, n: usize) -> usize;
}

impl<T: Rng + ?Sized> RngExt for T {
    fn rand_below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.random_range(0..n)
    }
}
