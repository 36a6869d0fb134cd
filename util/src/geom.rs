use glam::IVec2;

/// 8 directions, clock face order.
pub const DIR_8: [IVec2; 8] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([1, 1]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 1]),
    IVec2::from_array([-1, 0]),
    IVec2::from_array([-1, -1]),
];

/// 4 directions, clock face order.
pub const DIR_4: [IVec2; 4] = [
    IVec2::from_array([0, -1]),
    IVec2::from_array([1, 0]),
    IVec2::from_array([0, 1]),
    IVec2::from_array([-1, 0]),
];

/// Grid metrics for integer vectors.
///
/// The squared Euclidean length and the component-wise sign are already
/// provided by glam as `length_squared` and `signum`.
pub trait VecExt: Sized + Default {
    /// Absolute size of vector in the Chebyshev metric.
    ///
    /// This is the number of 8-directional steps needed to travel the
    /// vector.
    fn rdist(&self) -> i32;

    /// Vec points to one of the 8 cells surrounding the origin.
    fn is_adjacent(&self) -> bool {
        self.rdist() == 1
    }

    /// Vec is nonzero and lies on a coordinate axis.
    fn is_axial(&self) -> bool;

    /// Vec is nonzero and lies on a 45 degree diagonal.
    fn is_diagonal(&self) -> bool;
}

impl VecExt for IVec2 {
    fn rdist(&self) -> i32 {
        self[0].abs().max(self[1].abs())
    }

    fn is_axial(&self) -> bool {
        (self.x == 0) != (self.y == 0)
    }

    fn is_diagonal(&self) -> bool {
        self.x != 0 && self.x.abs() == self.y.abs()
    }
}

/// Number of 8-directional steps between two points.
pub fn grid_distance(a: IVec2, b: IVec2) -> i32 {
    (a - b).rdist()
}
