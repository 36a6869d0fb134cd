use std::iter::FusedIterator;

use glam::{ivec2, IVec2};
use rand::Rng;
use util::{GameRng, RngExt, VecExt};

use crate::Bounds;

/// Spiral traversal outwards from a center, one Chebyshev ring at a time.
///
/// Cells come out in non-decreasing distance from the center. There is no
/// visited set. Every yielded offset proposes only the neighbours directly
/// outwards from it, which makes each ring's offsets a spanning tree of
/// the previous one and keeps the buffers free of duplicates.
///
/// Out-of-bounds cells are neither yielded nor expanded. The interior is a
/// rectangle, so nothing inside it is cut off by this.
///
/// With fairness on, each ring starts at a random point of its buffer and
/// wraps around. That is a random rotation, not a random permutation of
/// the ring.
pub struct DistanceIterator<'a, R: ?Sized = GameRng> {
    bounds: &'a Bounds,
    center: IVec2,
    max_radius: i32,
    rng: Option<&'a mut R>,

    // Offsets of the ring being walked and the ones found for the next
    // rings.
    cur: Vec<IVec2>,
    near: Vec<IVec2>,
    far: Vec<IVec2>,

    icur: usize,
    // Offsets of the current ring not yet visited.
    remaining: usize,
    r: i32,
    threshold: i32,

    pending_center: bool,
    radius: i32,
    done: bool,
}

impl<'a> DistanceIterator<'a, GameRng> {
    pub fn new(
        bounds: &'a Bounds,
        center: IVec2,
        exclude_center: bool,
        max_radius: i32,
    ) -> Self {
        DistanceIterator::build(
            bounds,
            center,
            exclude_center,
            max_radius,
            None,
        )
    }
}

impl<'a, R: Rng + ?Sized> DistanceIterator<'a, R> {
    /// Spiral where each ring starts from a randomly chosen cell.
    pub fn fair(
        bounds: &'a Bounds,
        center: IVec2,
        exclude_center: bool,
        max_radius: i32,
        rng: &'a mut R,
    ) -> Self {
        DistanceIterator::build(
            bounds,
            center,
            exclude_center,
            max_radius,
            Some(rng),
        )
    }

    fn build(
        bounds: &'a Bounds,
        center: IVec2,
        exclude_center: bool,
        max_radius: i32,
        rng: Option<&'a mut R>,
    ) -> Self {
        assert!(
            bounds.map_bounds(center),
            "spiral center {center} outside map bounds"
        );

        let mut near = Vec::with_capacity(8);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx != 0 || dy != 0 {
                    near.push(ivec2(dx, dy));
                }
            }
        }

        DistanceIterator {
            bounds,
            center,
            max_radius,
            rng,
            cur: Vec::new(),
            near,
            far: Vec::new(),
            icur: 0,
            remaining: 0,
            r: 0,
            threshold: 1,
            pending_center: !exclude_center && max_radius >= 0,
            radius: 0,
            done: false,
        }
    }

    pub fn center(&self) -> IVec2 {
        self.center
    }

    /// Ring of the most recently yielded cell.
    pub fn radius(&self) -> i32 {
        self.radius
    }

    /// Whether rings start at random points.
    pub fn is_fair(&self) -> bool {
        self.rng.is_some()
    }

    /// Promote the next ring to current. Return false when the traversal
    /// is over.
    fn next_ring(&mut self) -> bool {
        if self.done {
            return false;
        }

        std::mem::swap(&mut self.cur, &mut self.near);
        std::mem::swap(&mut self.near, &mut self.far);
        self.far.clear();
        self.r += 1;

        if self.cur.is_empty() || self.r > self.max_radius {
            self.done = true;
            self.cur.clear();
            self.near.clear();
            return false;
        }

        self.threshold = self.r + 1;
        self.remaining = self.cur.len();
        self.icur = match self.rng.as_mut() {
            Some(rng) => rng.rand_below(self.cur.len()),
            None => 0,
        };

        log::trace!(
            "spiral around {} entering ring {} with {} offsets",
            self.center,
            self.r,
            self.cur.len()
        );
        true
    }

    /// Queue the offsets directly outwards from `d`.
    fn expand(&mut self, d: IVec2) {
        let s = d.signum();

        if d.is_axial() {
            self.propose(d + s);
        } else if d.is_diagonal() {
            self.propose(d + ivec2(s.x, 0));
            self.propose(d + ivec2(0, s.y));
            self.propose(d + s);
        } else if d.x.abs() > d.y.abs() {
            self.propose(d + ivec2(s.x, 0));
        } else {
            self.propose(d + ivec2(0, s.y));
        }
    }

    fn propose(&mut self, d: IVec2) {
        if d.rdist() <= self.threshold {
            self.near.push(d);
        } else {
            self.far.push(d);
        }
    }
}

impl<R: Rng + ?Sized> Iterator for DistanceIterator<'_, R> {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pending_center {
            self.pending_center = false;
            self.radius = 0;
            return Some(self.center);
        }

        loop {
            if self.remaining == 0 && !self.next_ring() {
                return None;
            }

            let d = self.cur[self.icur];
            self.icur = (self.icur + 1) % self.cur.len();
            self.remaining -= 1;

            let p = self.center + d;
            if !self.bounds.in_bounds(p) {
                continue;
            }

            self.expand(d);
            self.radius = self.r;
            return Some(p);
        }
    }
}

impl<R: Rng + ?Sized> FusedIterator for DistanceIterator<'_, R> {}
