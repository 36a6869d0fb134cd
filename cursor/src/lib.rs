//! Cursors that walk the cells of a bounded 2D grid.
//!
//! Every cursor is a plain lazy [`Iterator`] over [`glam::IVec2`] cell
//! positions that borrows the [`Bounds`] it is clipped against. Randomized
//! cursors borrow their rng, so the same seed always gives the same
//! traversal.

mod adjacent;
pub use adjacent::{
    AdjacentIterator, FairAdjacentIterator, OrthAdjacentIterator,
};

mod bounds;
pub use bounds::{Bounds, BoundsConfig, Rect};

mod distance;
pub use distance::DistanceIterator;

mod radius;
pub use radius::{CircleType, RadiusIterator};

mod rectangle;
pub use rectangle::{RandomRectangleIterator, RectangleIterator};

mod sight;
pub use sight::{Sight, Viewer};

mod vision;
pub use vision::VisionIterator;
