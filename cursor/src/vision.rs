use std::iter::FusedIterator;

use glam::IVec2;

use crate::{RadiusIterator, Viewer};

/// Cells of a radius area that a viewer sees.
///
/// The viewer is independent of the area's center, so this can answer
/// things like "which cells of the blast does the player see".
#[derive(Clone)]
pub struct VisionIterator<'a, V> {
    base: RadiusIterator<'a>,
    viewer: V,
}

impl<'a, V: Viewer> VisionIterator<'a, V> {
    pub fn new(base: RadiusIterator<'a>, viewer: V) -> Self {
        VisionIterator { base, viewer }
    }
}

impl<V: Viewer> Iterator for VisionIterator<'_, V> {
    type Item = IVec2;

    fn next(&mut self) -> Option<Self::Item> {
        let viewer = &self.viewer;
        self.base.find(|&p| viewer.sees_cell(p))
    }
}

impl<V: Viewer> FusedIterator for VisionIterator<'_, V> {}
