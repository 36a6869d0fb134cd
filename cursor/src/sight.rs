use glam::IVec2;

/// Line-of-sight oracle.
///
/// The cursors never compute occlusion themselves, they only ask.
pub trait Sight {
    /// Whether `to` is visible from `from`.
    fn sees(&self, from: IVec2, to: IVec2) -> bool;

    /// Range of unobstructed vision.
    fn los_radius(&self) -> i32;
}

impl<T: Sight + ?Sized> Sight for &T {
    fn sees(&self, from: IVec2, to: IVec2) -> bool {
        (**self).sees(from, to)
    }

    fn los_radius(&self) -> i32 {
        (**self).los_radius()
    }
}

/// Something that can tell whether it sees a given cell.
///
/// The viewer need not stand at the center of the area being filtered.
pub trait Viewer {
    fn sees_cell(&self, pos: IVec2) -> bool;
}

impl<F: Fn(IVec2) -> bool> Viewer for F {
    fn sees_cell(&self, pos: IVec2) -> bool {
        self(pos)
    }
}
