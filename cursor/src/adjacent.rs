use std::iter::FusedIterator;

use glam::{ivec2, IVec2};
use rand::Rng;
use util::RngExt;

use crate::Bounds;

/// Neighbour offsets, center last. The iterators walk the table backwards
/// so the center comes out first when it is included.
const COMPASS: [IVec2; 9] = [
    ivec2(1, 0),
    ivec2(1, 1),
    ivec2(0, 1),
    ivec2(-1, 1),
    ivec2(-1, 0),
    ivec2(-1, -1),
    ivec2(0, -1),
    ivec2(1, -1),
    ivec2(0, 0),
];

const ORTH_COMPASS: [IVec2; 5] = [
    ivec2(1, 0),
    ivec2(0, 1),
    ivec2(-1, 0),
    ivec2(0, -1),
    ivec2(0, 0),
];

/// The in-bounds cells among the 8 surrounding a center, and optionally the
/// center itself, in a fixed order.
#[derive(Clone, Debug)]
pub struct AdjacentIterator<'a> {
    bounds: &'a Bounds,
    center: IVec2,
    // Index one past the next compass entry to try.
    i: usize,
}

impl<'a> AdjacentIterator<'a> {
    pub fn new(
        bounds: &'a Bounds,
        center: IVec2,
        exclude_center: bool,
    ) -> Self {
        AdjacentIterator {
            bounds,
            center,
            i: if exclude_center { 8 } else { 9 },
        }
    }
}

impl Iterator for AdjacentIterator<'_> {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.i > 0 {
            self.i -= 1;
            let p = self.center + COMPASS[self.i];
            if self.bounds.in_bounds(p) {
                return Some(p);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.i))
    }
}

impl FusedIterator for AdjacentIterator<'_> {}

/// Like [`AdjacentIterator`], but only the 4 orthogonal neighbours.
#[derive(Clone, Debug)]
pub struct OrthAdjacentIterator<'a> {
    bounds: &'a Bounds,
    center: IVec2,
    i: usize,
}

impl<'a> OrthAdjacentIterator<'a> {
    pub fn new(
        bounds: &'a Bounds,
        center: IVec2,
        exclude_center: bool,
    ) -> Self {
        OrthAdjacentIterator {
            bounds,
            center,
            i: if exclude_center { 4 } else { 5 },
        }
    }
}

impl Iterator for OrthAdjacentIterator<'_> {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        while self.i > 0 {
            self.i -= 1;
            let p = self.center + ORTH_COMPASS[self.i];
            if self.bounds.in_bounds(p) {
                return Some(p);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.i))
    }
}

impl FusedIterator for OrthAdjacentIterator<'_> {}

/// The in-bounds neighbours of a cell in uniformly random order.
///
/// Each step draws one of the not yet visited neighbours with equal
/// probability. Nothing is allocated, the at most 8 candidates live in a
/// fixed array.
pub struct FairAdjacentIterator<'a, R: ?Sized> {
    cells: [IVec2; 8],
    len: usize,
    rng: &'a mut R,
}

impl<'a, R: Rng + ?Sized> FairAdjacentIterator<'a, R> {
    pub fn new(bounds: &Bounds, center: IVec2, rng: &'a mut R) -> Self {
        let mut cells = [IVec2::ZERO; 8];
        let mut len = 0;
        for d in &COMPASS[..8] {
            let p = center + *d;
            if bounds.in_bounds(p) {
                cells[len] = p;
                len += 1;
            }
        }

        FairAdjacentIterator { cells, len, rng }
    }
}

impl<R: Rng + ?Sized> Iterator for FairAdjacentIterator<'_, R> {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let i = self.rng.rand_below(self.len);
        let ret = self.cells[i];
        self.len -= 1;
        self.cells[i] = self.cells[self.len];
        Some(ret)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<R: Rng + ?Sized> ExactSizeIterator for FairAdjacentIterator<'_, R> {}

impl<R: Rng + ?Sized> FusedIterator for FairAdjacentIterator<'_, R> {}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use quickcheck_macros::quickcheck;
    use util::{srng, HashSet, VecExt, DIR_4, DIR_8};

    use super::*;
    use crate::BoundsConfig;

    fn small_bounds() -> Bounds {
        Bounds::with_size(12, 9).unwrap()
    }

    #[test]
    fn compass_tables() {
        let offsets: HashSet<IVec2> = COMPASS[..8].iter().copied().collect();
        assert_eq!(offsets, DIR_8.iter().copied().collect::<HashSet<_>>());
        assert_eq!(COMPASS[8], IVec2::ZERO);

        let offsets: HashSet<IVec2> =
            ORTH_COMPASS[..4].iter().copied().collect();
        assert_eq!(offsets, DIR_4.iter().copied().collect::<HashSet<_>>());
        assert_eq!(ORTH_COMPASS[4], IVec2::ZERO);
    }

    #[test]
    fn fixed_order() {
        let bounds = Bounds::default();
        let c = ivec2(10, 10);
        let cells: Vec<IVec2> = AdjacentIterator::new(&bounds, c, false)
            .map(|p| p - c)
            .collect();
        assert_eq!(
            cells,
            vec![
                ivec2(0, 0),
                ivec2(1, -1),
                ivec2(0, -1),
                ivec2(-1, -1),
                ivec2(-1, 0),
                ivec2(-1, 1),
                ivec2(0, 1),
                ivec2(1, 1),
                ivec2(1, 0),
            ]
        );

        let cells: Vec<IVec2> = OrthAdjacentIterator::new(&bounds, c, false)
            .map(|p| p - c)
            .collect();
        assert_eq!(
            cells,
            vec![
                ivec2(0, 0),
                ivec2(0, -1),
                ivec2(-1, 0),
                ivec2(0, 1),
                ivec2(1, 0),
            ]
        );
    }

    #[test]
    fn interior_neighbourhood() {
        let bounds = Bounds::default();
        let c = ivec2(30, 20);

        let cells: Vec<IVec2> =
            AdjacentIterator::new(&bounds, c, true).collect();
        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|&p| (p - c).is_adjacent()));

        assert_eq!(AdjacentIterator::new(&bounds, c, false).count(), 9);
        assert_eq!(OrthAdjacentIterator::new(&bounds, c, true).count(), 4);
        assert_eq!(OrthAdjacentIterator::new(&bounds, c, false).count(), 5);
    }

    #[test]
    fn clipped_at_corners() {
        let bounds = Bounds::default();

        // Top-left corner of the interior.
        let c = ivec2(1, 1);
        let mut cells: Vec<IVec2> =
            AdjacentIterator::new(&bounds, c, false).collect();
        cells.sort_by_key(|p| (p.y, p.x));
        assert_eq!(
            cells,
            vec![ivec2(1, 1), ivec2(2, 1), ivec2(1, 2), ivec2(2, 2)]
        );
        assert_eq!(AdjacentIterator::new(&bounds, c, true).count(), 3);
        assert_eq!(OrthAdjacentIterator::new(&bounds, c, true).count(), 2);

        // Bottom edge.
        assert_eq!(
            AdjacentIterator::new(&bounds, ivec2(40, 68), true).count(),
            5
        );

        // Center on the map rim is not in bounds itself.
        let cells: Vec<IVec2> =
            AdjacentIterator::new(&bounds, ivec2(0, 0), false).collect();
        assert_eq!(cells, vec![ivec2(1, 1)]);

        // Far outside, nothing.
        assert_eq!(
            AdjacentIterator::new(&bounds, ivec2(-10, -10), false).count(),
            0
        );
    }

    #[test]
    fn borderless_origin_corner() {
        let bounds = Bounds::new(BoundsConfig {
            width: 10,
            height: 10,
            boundary_border: 0,
            mapgen_border: 0,
        })
        .unwrap();

        let cells: HashSet<IVec2> =
            AdjacentIterator::new(&bounds, ivec2(0, 0), false).collect();
        assert_eq!(
            cells,
            [ivec2(0, 0), ivec2(1, 0), ivec2(0, 1), ivec2(1, 1)]
                .into_iter()
                .collect::<HashSet<_>>()
        );
    }

    #[test]
    fn fair_is_a_permutation() {
        let bounds = Bounds::default();
        let mut rng = srng(&"fair");
        for c in [ivec2(10, 10), ivec2(1, 1), ivec2(78, 30), ivec2(0, 0)] {
            let fixed: HashSet<IVec2> =
                AdjacentIterator::new(&bounds, c, true).collect();
            let iter = FairAdjacentIterator::new(&bounds, c, &mut rng);
            assert_eq!(iter.len(), fixed.len());
            let fair: Vec<IVec2> = iter.collect();
            assert_eq!(fair.len(), fixed.len());
            assert_eq!(fair.into_iter().collect::<HashSet<_>>(), fixed);
        }
    }

    #[test]
    fn fair_without_candidates() {
        let bounds = Bounds::with_size(3, 3).unwrap();
        let mut rng = srng(&0);
        let mut iter =
            FairAdjacentIterator::new(&bounds, ivec2(1, 1), &mut rng);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn fair_first_pick_is_unbiased() {
        let bounds = Bounds::default();
        let c = ivec2(5, 5);
        let mut rng = srng(&"first");
        let mut counts = [0; 8];
        for _ in 0..8000 {
            let p = FairAdjacentIterator::new(&bounds, c, &mut rng)
                .next()
                .unwrap();
            let i = DIR_8.iter().position(|&d| d == p - c).unwrap();
            counts[i] += 1;
        }
        // Expected 1000 each.
        for n in counts {
            assert!((800..1200).contains(&n), "skewed counts {counts:?}");
        }
    }

    #[quickcheck]
    fn fair_matches_fixed(seed: u64, x: u8, y: u8) -> bool {
        let bounds = small_bounds();
        let c = ivec2((x % 12) as i32, (y % 9) as i32);
        let mut rng = srng(&seed);

        let fixed: Vec<IVec2> =
            AdjacentIterator::new(&bounds, c, true).collect();
        let fair: Vec<IVec2> =
            FairAdjacentIterator::new(&bounds, c, &mut rng).collect();
        let fixed_set: HashSet<IVec2> = fixed.iter().copied().collect();
        let fair_set: HashSet<IVec2> = fair.iter().copied().collect();

        fixed.len() == fixed_set.len()
            && fair.len() == fair_set.len()
            && fixed_set == fair_set
    }

    #[quickcheck]
    fn adjacent_are_in_bounds_neighbours(x: u8, y: u8, exclude: bool) -> bool {
        let bounds = small_bounds();
        let c = ivec2((x % 12) as i32, (y % 9) as i32);

        let cells: Vec<IVec2> =
            AdjacentIterator::new(&bounds, c, exclude).collect();
        let expected: HashSet<IVec2> = DIR_8
            .iter()
            .map(|&d| c + d)
            .chain((!exclude).then_some(c))
            .filter(|&p| bounds.in_bounds(p))
            .collect();

        cells.len() == expected.len()
            && cells.into_iter().collect::<HashSet<_>>() == expected
    }
}
