//! Grid extents that every traversal is clipped against.

use std::path::Path;

use anyhow::{bail, Context};
use glam::{ivec2, IVec2};
use serde::{Deserialize, Serialize};

/// Inclusive axis-aligned rectangle of grid cells.
///
/// A rectangle whose max corner is below its min corner on either axis is
/// empty.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Rect {
    min: IVec2,
    max: IVec2,
}

impl Rect {
    /// Build a rectangle from its inclusive min and max corners without
    /// reordering them.
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Rect { min, max }
    }

    /// Build a rectangle from any two opposite corners.
    pub fn from_corners(a: IVec2, b: IVec2) -> Self {
        Rect {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> IVec2 {
        self.min
    }

    pub fn max(&self) -> IVec2 {
        self.max
    }

    pub fn is_empty(&self) -> bool {
        self.max.x < self.min.x || self.max.y < self.min.y
    }

    /// Number of cells in the rectangle, saturating at `usize::MAX`.
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            let w = (i64::from(self.max.x) - i64::from(self.min.x) + 1) as u64;
            let h = (i64::from(self.max.y) - i64::from(self.min.y) + 1) as u64;
            usize::try_from(w.saturating_mul(h)).unwrap_or(usize::MAX)
        }
    }

    pub fn contains(&self, p: IVec2) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    pub fn intersection(&self, other: &Rect) -> Rect {
        Rect {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }
}

/// Configuration for the extents of the backing grid.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct BoundsConfig {
    /// Storage width, number of columns.
    pub width: i32,
    /// Storage height, number of rows.
    pub height: i32,
    /// Thickness of the permanent outer wall that is never in bounds.
    pub boundary_border: i32,
    /// Margin left untouched by map generation.
    pub mapgen_border: i32,
}

impl Default for BoundsConfig {
    fn default() -> Self {
        BoundsConfig {
            width: 80,
            height: 70,
            boundary_border: 1,
            mapgen_border: 2,
        }
    }
}

impl BoundsConfig {
    /// Read a configuration from an IDM file.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        idm::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))
    }
}

/// The three nested rectangles of the grid.
///
/// From the outside in:
///
/// * storage, every cell that has backing storage, `[0, width) x [0,
///   height)`
/// * map bounds, the area that may be occupied, which is the interior plus
///   a one cell rim
/// * interior, the cells that are "in bounds" for neighbourhood searches
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Bounds {
    config: BoundsConfig,
    storage: Rect,
    map: Rect,
    interior: Rect,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::build(BoundsConfig::default())
    }
}

impl Bounds {
    pub fn new(config: BoundsConfig) -> anyhow::Result<Self> {
        let BoundsConfig {
            width,
            height,
            boundary_border,
            mapgen_border,
        } = config;

        if width <= 0 || height <= 0 {
            bail!("grid dimensions must be positive, got {width}x{height}");
        }
        if boundary_border < 0 {
            bail!("negative boundary border {boundary_border}");
        }
        if mapgen_border < 0 {
            bail!("negative mapgen border {mapgen_border}");
        }
        if width <= 2 * boundary_border || height <= 2 * boundary_border {
            bail!(
                "boundary border {boundary_border} leaves no interior \
                 in a {width}x{height} grid"
            );
        }

        let ret = Bounds::build(config);
        log::debug!(
            "grid bounds: storage {:?}, map {:?}, interior {:?}",
            ret.storage,
            ret.map,
            ret.interior
        );
        Ok(ret)
    }

    /// Bounds with the default borders for a grid of the given size.
    pub fn with_size(width: i32, height: i32) -> anyhow::Result<Self> {
        Bounds::new(BoundsConfig {
            width,
            height,
            ..Default::default()
        })
    }

    fn build(config: BoundsConfig) -> Self {
        let b = config.boundary_border;
        let storage =
            Rect::new(IVec2::ZERO, ivec2(config.width - 1, config.height - 1));
        let interior = Rect::new(
            ivec2(b, b),
            ivec2(config.width - 1 - b, config.height - 1 - b),
        );
        let map = Rect::new(
            interior.min() - IVec2::ONE,
            interior.max() + IVec2::ONE,
        )
        .intersection(&storage);

        Bounds {
            config,
            storage,
            map,
            interior,
        }
    }

    pub fn config(&self) -> &BoundsConfig {
        &self.config
    }

    pub fn width(&self) -> i32 {
        self.config.width
    }

    pub fn height(&self) -> i32 {
        self.config.height
    }

    pub fn mapgen_border(&self) -> i32 {
        self.config.mapgen_border
    }

    pub fn storage(&self) -> Rect {
        self.storage
    }

    pub fn map(&self) -> Rect {
        self.map
    }

    pub fn interior(&self) -> Rect {
        self.interior
    }

    /// Point has backing storage.
    pub fn in_storage(&self, p: IVec2) -> bool {
        self.storage.contains(p)
    }

    /// Point is inside the playable map area, including its outer rim.
    pub fn map_bounds(&self, p: IVec2) -> bool {
        self.map.contains(p)
    }

    /// Point is in the strict interior of the map.
    pub fn in_bounds(&self, p: IVec2) -> bool {
        self.interior.contains(p)
    }
}
