use std::iter::FusedIterator;

use glam::{ivec2, IVec2};
use rand::Rng;
use util::RngExt;

use crate::{Bounds, Rect};

/// Square with the given half side around `center`, optionally clipped to
/// the map bounds.
fn centered_area(
    bounds: &Bounds,
    center: IVec2,
    halfside: i32,
    clip_to_map: bool,
) -> Rect {
    let area = Rect::new(
        center - IVec2::splat(halfside),
        center + IVec2::splat(halfside),
    );
    if clip_to_map {
        area.intersection(&bounds.map())
    } else {
        area
    }
}

/// Storage area shrunk by border distances. A negative `y_border_dist`
/// means use `x_border_dist` for both axes.
fn inset_area(bounds: &Bounds, x_border_dist: i32, y_border_dist: i32) -> Rect {
    let y_border_dist = if y_border_dist < 0 {
        x_border_dist
    } else {
        y_border_dist
    };

    Rect::new(
        ivec2(x_border_dist, y_border_dist),
        ivec2(
            bounds.width() - x_border_dist - 1,
            bounds.height() - y_border_dist - 1,
        ),
    )
}

/// Row-major walk over every cell of a rectangle.
#[derive(Clone, Debug)]
pub struct RectangleIterator {
    area: Rect,
    current: IVec2,
    done: bool,
}

impl RectangleIterator {
    /// Iterate the rectangle spanned by two opposite corners, both
    /// inclusive.
    pub fn new(corner1: IVec2, corner2: IVec2) -> Self {
        Self::over(Rect::from_corners(corner1, corner2))
    }

    pub fn centered(
        bounds: &Bounds,
        center: IVec2,
        halfside: i32,
        clip_to_map: bool,
    ) -> Self {
        Self::over(centered_area(bounds, center, halfside, clip_to_map))
    }

    pub fn inset(
        bounds: &Bounds,
        x_border_dist: i32,
        y_border_dist: i32,
    ) -> Self {
        Self::over(inset_area(bounds, x_border_dist, y_border_dist))
    }

    /// The area map generators are allowed to touch.
    pub fn mapgen_area(bounds: &Bounds) -> Self {
        let border = bounds.mapgen_border();
        Self::inset(bounds, border, border)
    }

    pub fn over(area: Rect) -> Self {
        RectangleIterator {
            area,
            current: area.min(),
            done: area.is_empty(),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    fn remaining(&self) -> usize {
        if self.done {
            return 0;
        }
        let (min, max) = (self.area.min(), self.area.max());
        let full_rows = (i64::from(max.y) - i64::from(self.current.y)) as u64;
        let width = (i64::from(max.x) - i64::from(min.x) + 1) as u64;
        let rest = (i64::from(max.x) - i64::from(self.current.x) + 1) as u64;
        let n = full_rows.saturating_mul(width).saturating_add(rest);
        usize::try_from(n).unwrap_or(usize::MAX)
    }
}

impl Iterator for RectangleIterator {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let ret = self.current;
        let max = self.area.max();
        if ret == max {
            self.done = true;
        } else if ret.x >= max.x {
            self.current.x = self.area.min().x;
            self.current.y += 1;
        } else {
            self.current.x += 1;
        }
        Some(ret)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining();
        (n, Some(n))
    }
}

impl ExactSizeIterator for RectangleIterator {}

impl FusedIterator for RectangleIterator {}

/// Every cell of a rectangle exactly once, in random order.
///
/// The cells are collected up front and drawn out without replacement, each
/// remaining cell being equally likely to come next.
pub struct RandomRectangleIterator<'a, R: ?Sized> {
    remaining: Vec<IVec2>,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> RandomRectangleIterator<'a, R> {
    pub fn new(corner1: IVec2, corner2: IVec2, rng: &'a mut R) -> Self {
        Self::over(Rect::from_corners(corner1, corner2), rng)
    }

    pub fn centered(
        bounds: &Bounds,
        center: IVec2,
        halfside: i32,
        clip_to_map: bool,
        rng: &'a mut R,
    ) -> Self {
        Self::over(centered_area(bounds, center, halfside, clip_to_map), rng)
    }

    pub fn inset(
        bounds: &Bounds,
        x_border_dist: i32,
        y_border_dist: i32,
        rng: &'a mut R,
    ) -> Self {
        Self::over(inset_area(bounds, x_border_dist, y_border_dist), rng)
    }

    pub fn mapgen_area(bounds: &Bounds, rng: &'a mut R) -> Self {
        let border = bounds.mapgen_border();
        Self::inset(bounds, border, border, rng)
    }

    pub fn over(area: Rect, rng: &'a mut R) -> Self {
        let remaining: Vec<IVec2> = RectangleIterator::over(area).collect();
        log::trace!(
            "random rectangle over {area:?}: {} cells",
            remaining.len()
        );
        RandomRectangleIterator { remaining, rng }
    }
}

impl<R: Rng + ?Sized> Iterator for RandomRectangleIterator<'_, R> {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        // The last remaining cell moves into the vacated slot.
        let i = self.rng.rand_below(self.remaining.len());
        Some(self.remaining.swap_remove(i))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining.len(), Some(self.remaining.len()))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for RandomRectangleIterator<'_, R> {}

impl<R: Rng + ?Sized> FusedIterator for RandomRectangleIterator<'_, R> {}
