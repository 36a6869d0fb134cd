use std::iter::FusedIterator;

use glam::{ivec2, IVec2};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Bounds, Sight};

/// Shape family of a radius area.
///
/// The curved shapes differ in how the radius maps to a squared distance
/// bound, `Square` is the Chebyshev ball.
#[derive(
    Copy,
    Clone,
    Default,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum CircleType {
    /// Radius is already a squared distance, `x² + y² <= r`.
    Circle,
    /// `x² + y² <= r²`, sharp tips on the axes.
    Pointy,
    /// `x² + y² <= r² + 1`, the usual roguelike disc.
    #[default]
    Round,
    /// `max(|x|, |y|) <= r`.
    Square,
}

impl CircleType {
    /// Initial credit for a radius, negative for a negative radius.
    ///
    /// Saturates at `i32::MAX` instead of overflowing.
    fn budget(self, r: i32) -> i32 {
        if r < 0 {
            return -1;
        }

        let r = i64::from(r);
        let budget = match self {
            CircleType::Circle | CircleType::Square => r,
            CircleType::Pointy => r * r,
            CircleType::Round => r * r + 1,
        };
        budget.min(i64::from(i32::MAX)) as i32
    }

    fn inc_cost(self) -> i32 {
        match self {
            CircleType::Square => 0,
            _ => 2,
        }
    }

    /// Whether offset `d` falls inside the shape of radius `r`.
    pub fn contains(self, r: i32, d: IVec2) -> bool {
        if r < 0 {
            return false;
        }

        let (x, y) = (i64::from(d.x).abs(), i64::from(d.y).abs());
        match self {
            CircleType::Square => x.max(y) <= i64::from(r),
            _ => x * x + y * y <= i64::from(self.budget(r)),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum State {
    Start,
    /// Emitting the quadrant reflections of the current `(x, y)`.
    Emitting(u8),
    Done,
}

/// Cells within a radius of a center, optionally restricted to those the
/// center can see.
///
/// Distances are never computed directly. Each row and column spends a
/// credit that starts at the shape's budget. The curved shapes pay an
/// odd-number cost sequence, so the running credit after `x` steps is the
/// budget minus `x²`. `Square` pays a flat 1 per step, leaving the budget
/// minus `x`. Every `(x, y)` in the first quadrant is emitted as its up to four
/// reflections, SE, NE, SW, NW, without repeating the ones that coincide
/// on the axes.
#[derive(Clone)]
pub struct RadiusIterator<'a> {
    bounds: &'a Bounds,
    sight: Option<&'a dyn Sight>,
    center: IVec2,
    exclude_center: bool,
    circle_type: CircleType,
    budget: i32,
    // Largest offsets along each axis that can still land in storage.
    reach: IVec2,

    x: i32,
    y: i32,
    credit_x: i32,
    cost_x: i32,
    credit_y: i32,
    cost_y: i32,
    state: State,
}

impl<'a> RadiusIterator<'a> {
    pub fn new(
        bounds: &'a Bounds,
        center: IVec2,
        r: i32,
        circle_type: CircleType,
        exclude_center: bool,
    ) -> Self {
        RadiusIterator::build(
            bounds,
            center,
            r,
            circle_type,
            None,
            exclude_center,
        )
    }

    /// Radius area filtered by line of sight from the center.
    pub fn with_sight(
        bounds: &'a Bounds,
        center: IVec2,
        r: i32,
        circle_type: CircleType,
        sight: &'a dyn Sight,
        exclude_center: bool,
    ) -> Self {
        RadiusIterator::build(
            bounds,
            center,
            r,
            circle_type,
            Some(sight),
            exclude_center,
        )
    }

    /// Everything the center can see within its line-of-sight radius.
    pub fn los(
        bounds: &'a Bounds,
        center: IVec2,
        sight: &'a dyn Sight,
        exclude_center: bool,
    ) -> Self {
        RadiusIterator::with_sight(
            bounds,
            center,
            sight.los_radius(),
            CircleType::Round,
            sight,
            exclude_center,
        )
    }

    fn build(
        bounds: &'a Bounds,
        center: IVec2,
        r: i32,
        circle_type: CircleType,
        sight: Option<&'a dyn Sight>,
        exclude_center: bool,
    ) -> Self {
        assert!(
            bounds.map_bounds(center),
            "radius center {center} outside map bounds"
        );

        let storage = bounds.storage();
        let reach = (center - storage.min()).max(storage.max() - center);
        let budget = circle_type.budget(r);

        RadiusIterator {
            bounds,
            sight,
            center,
            exclude_center,
            circle_type,
            budget,
            reach,
            x: 0,
            y: 0,
            credit_x: budget,
            cost_x: 1,
            credit_y: budget,
            cost_y: 1,
            state: State::Start,
        }
    }

    pub fn center(&self) -> IVec2 {
        self.center
    }

    pub fn circle_type(&self) -> CircleType {
        self.circle_type
    }

    /// Move to the next first-quadrant offset or finish.
    fn step(&mut self) {
        let inc = self.circle_type.inc_cost();

        self.credit_x -= self.cost_x;
        self.cost_x += inc;
        self.x += 1;

        if self.credit_x < 0 || self.x > self.reach.x {
            self.credit_y -= self.cost_y;
            self.cost_y += inc;
            self.y += 1;

            if self.credit_y < 0 || self.y > self.reach.y {
                self.state = State::Done;
                return;
            }

            self.x = 0;
            self.cost_x = 1;
            self.credit_x = if self.circle_type == CircleType::Square {
                self.budget
            } else {
                self.credit_y
            };
        }

        self.state = State::Emitting(0);
    }

    /// Reflection `q` of the current offset, if it is a new valid cell.
    fn candidate(&self, q: u8) -> Option<IVec2> {
        let (x, y) = (self.x, self.y);
        let d = match q {
            0 => ivec2(x, y),
            1 if y != 0 => ivec2(x, -y),
            2 if x != 0 => ivec2(-x, y),
            3 if x != 0 && y != 0 => ivec2(-x, -y),
            _ => return None,
        };

        if self.exclude_center && d == IVec2::ZERO {
            return None;
        }

        let p = self.center + d;
        if !self.bounds.in_storage(p) {
            return None;
        }
        if let Some(sight) = self.sight {
            if !sight.sees(self.center, p) {
                return None;
            }
        }
        Some(p)
    }
}

impl Iterator for RadiusIterator<'_> {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.state {
                State::Done => return None,
                State::Start => {
                    self.state = if self.budget < 0 {
                        State::Done
                    } else {
                        State::Emitting(0)
                    };
                }
                State::Emitting(4) => self.step(),
                State::Emitting(q) => {
                    self.state = State::Emitting(q + 1);
                    if let Some(p) = self.candidate(q) {
                        return Some(p);
                    }
                }
            }
        }
    }
}

impl FusedIterator for RadiusIterator<'_> {}
