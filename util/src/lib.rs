//! Unopinionated standalone utilities.

mod geom;
pub use geom::{grid_distance, VecExt, DIR_4, DIR_8};

mod rng;
pub use rng::{srng, RngExt};

pub type FastHasher = rustc_hash::FxHasher;

/// Set with an efficient hash function.
pub use rustc_hash::FxHashSet as HashSet;

/// Good default concrete rng.
pub type GameRng = rand_xorshift::XorShiftRng;
