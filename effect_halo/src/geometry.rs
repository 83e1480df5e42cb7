// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring geometry for badge placement.
//!
//! Badges are placed on concentric rings around the token. The angular and
//! radial offset of the Nth badge depend only on its index and the token's
//! [`SizeCategory`], which makes them safe to memoize forever in an
//! [`OffsetCache`]. Converting such an offset into token-local pixels also
//! needs the token footprint and the live grid cell size.

use core::f64::consts::{PI, TAU};

use hashbrown::HashMap;

use crate::kurbo::{Point, Vec2};
use crate::math::FloatExt;
use crate::size::{Footprint, SizeCategory};

#[cfg(feature = "libm")]
#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Grid cell size that corresponds to a badge scale of 1.
pub const REFERENCE_CELL_SIZE: f64 = 100.0;

/// Smallest normalized ring radius, so badges never collapse onto the token center.
const MIN_NORMALIZED_OFFSET: f64 = 0.1;

/// Polar placement of a badge relative to the token center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BadgeOffset {
    /// Ring radius in units of the token's half extent.
    pub radial: f64,
    /// Angle in radians.
    pub angle: f64,
}

/// Computes the ring offset of the badge at `index`.
///
/// Rings hold [`SizeCategory::row_capacity`] badges each. Odd rings are rotated by
/// an extra step so that the seams of neighbouring rings do not line up.
pub fn offset_for(index: u32, category: SizeCategory) -> BadgeOffset {
    let capacity = category.row_capacity();
    let row = index / capacity;
    let step = 1.0 / f64::from(capacity);
    let ratio = f64::from(index % capacity) * step;

    let gap_offset = step * f64::from(1 + row % 2) * PI;
    let initial_rotation = (0.5 + step * PI) * PI;

    BadgeOffset {
        radial: category.row_offset_base() + f64::from(row) * category.row_spacing(),
        angle: ratio * TAU + initial_rotation + gap_offset,
    }
}

/// Pixel dimensions of one grid cell in the host scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMetrics {
    /// Width of a cell in pixels.
    pub cell_width: f64,
    /// Height of a cell in pixels.
    pub cell_height: f64,
}

impl GridMetrics {
    /// A square grid.
    pub const fn square(size: f64) -> Self {
        Self {
            cell_width: size,
            cell_height: size,
        }
    }

    /// A grid with distinct cell width and height, like hexagonal grids.
    pub const fn new(cell_width: f64, cell_height: f64) -> Self {
        Self {
            cell_width,
            cell_height,
        }
    }

    /// The shorter cell side, used as the ring's pixel unit.
    #[inline]
    pub fn cell_side(&self) -> f64 {
        self.cell_width.min(self.cell_height)
    }

    /// Scale that keeps badges visually consistent across grid sizes.
    #[inline]
    pub fn scale_factor(&self) -> f64 {
        self.cell_side() / REFERENCE_CELL_SIZE
    }

    /// Whether cells are not square.
    #[inline]
    pub fn is_skewed(&self) -> bool {
        !(self.cell_width - self.cell_height).is_nearly_zero()
    }

    /// The correction that recenters a circular ring on non-square cells.
    pub fn hex_nudge(&self, footprint: Footprint) -> Vec2 {
        if !self.is_skewed() {
            return Vec2::ZERO;
        }
        let side = self.cell_side();
        Vec2::new(
            footprint.width * (self.cell_width - side) / 2.0,
            footprint.height * (self.cell_height - side) / 2.0,
        )
    }

    /// Whether both cell dimensions are usable.
    pub fn is_valid(&self) -> bool {
        self.cell_width.is_positive_finite() && self.cell_height.is_positive_finite()
    }
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self::square(REFERENCE_CELL_SIZE)
    }
}

/// Maps a polar badge offset into token-local pixel coordinates.
///
/// The returned point is the badge center, with the origin at the top left of
/// the token's bounding box.
pub fn project(
    offset: BadgeOffset,
    footprint: Footprint,
    grid: GridMetrics,
    offset_scale: f64,
) -> Point {
    let direction = Vec2::new(offset.angle.cos(), offset.angle.sin());

    let scaled = offset.radial * offset_scale;
    let size_factor = footprint.max_extent().max(1.0);
    let normalized = (1.0 + (scaled - 1.0) / size_factor).max(MIN_NORMALIZED_OFFSET);

    let side = grid.cell_side();
    let extent = Vec2::new(footprint.width * side, footprint.height * side);
    let nudge = grid.hex_nudge(footprint);

    Point::new(
        nudge.x + (direction.x * normalized + 1.0) / 2.0 * extent.x,
        nudge.y + (direction.y * normalized + 1.0) / 2.0 * extent.y,
    )
}

/// Computes the token-local center of the badge at `index`.
pub fn position_for(
    index: u32,
    category: SizeCategory,
    footprint: Footprint,
    grid: GridMetrics,
    offset_scale: f64,
) -> Point {
    project(offset_for(index, category), footprint, grid, offset_scale)
}

/// Memoized [`offset_for`] results, keyed by size category and badge index.
///
/// Entries are pure functions of their key and are never invalidated.
#[derive(Clone, Debug, Default)]
pub struct OffsetCache {
    offsets: HashMap<(SizeCategory, u32), BadgeOffset>,
}

impl OffsetCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the offset for `index` in `category`, computing it on first use.
    pub fn offset(&mut self, index: u32, category: SizeCategory) -> BadgeOffset {
        *self
            .offsets
            .entry((category, index))
            .or_insert_with(|| offset_for(index, category))
    }

    /// Same as [`position_for`], backed by this cache.
    pub fn position(
        &mut self,
        index: u32,
        category: SizeCategory,
        footprint: Footprint,
        grid: GridMetrics,
        offset_scale: f64,
    ) -> Point {
        project(self.offset(index, category), footprint, grid, offset_scale)
    }

    /// Number of memoized offsets.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether nothing has been memoized yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < 1e-9, "{a} != {b}");
    }

    #[test]
    fn offset_is_deterministic() {
        for category in SizeCategory::ALL {
            for index in [0, 1, 7, 31, 200] {
                assert_eq!(offset_for(index, category), offset_for(index, category));
            }
        }
    }

    #[test]
    fn first_badge_on_medium_ring() {
        let offset = offset_for(0, SizeCategory::Medium);
        let step = 1.0 / 16.0;
        assert_close(offset.radial, 1.2);
        assert_close(offset.angle, (0.5 + step * PI) * PI + step * PI);
    }

    #[test]
    fn wrapped_badges_move_one_ring_out() {
        let inner = offset_for(0, SizeCategory::Medium);
        let outer = offset_for(16, SizeCategory::Medium);
        assert_close(outer.radial - inner.radial, SizeCategory::Medium.row_spacing());
        // Odd rings are rotated by one extra step to hide the seam.
        assert_close(outer.angle - inner.angle, PI / 16.0);
    }

    #[test]
    fn even_rings_share_angles() {
        let first = offset_for(3, SizeCategory::Large);
        let third = offset_for(43, SizeCategory::Large);
        assert_close(first.angle, third.angle);
        assert_close(third.radial - first.radial, 2.0 * SizeCategory::Large.row_spacing());
    }

    #[test]
    fn indices_beyond_many_rings_keep_growing() {
        let far = offset_for(10_000, SizeCategory::Tiny);
        assert_close(far.radial, 1.4 + 1000.0 * 0.6);
    }

    #[test]
    fn square_grid_has_no_nudge() {
        let grid = GridMetrics::square(100.0);
        assert!(!grid.is_skewed(), "square grid");
        assert_eq!(grid.hex_nudge(Footprint::new(2.0, 2.0)), Vec2::ZERO);
    }

    #[test]
    fn hex_grid_recenters_ring() {
        let grid = GridMetrics::new(116.0, 100.0);
        let footprint = Footprint::new(1.0, 1.0);
        let nudge = grid.hex_nudge(footprint);
        assert_close(nudge.x, 8.0);
        assert_close(nudge.y, 0.0);

        // Badges at opposite ends of a ring stay symmetric around the cell center.
        let offset = BadgeOffset {
            radial: 1.0,
            angle: 0.0,
        };
        let opposite = BadgeOffset {
            radial: 1.0,
            angle: PI,
        };
        let a = project(offset, footprint, grid, 1.0);
        let b = project(opposite, footprint, grid, 1.0);
        assert_close((a.x + b.x) / 2.0, 58.0);
        assert_close((a.y + b.y) / 2.0, 50.0);
    }

    #[test]
    fn larger_tokens_do_not_push_badges_proportionally() {
        let grid = GridMetrics::square(100.0);
        let offset = BadgeOffset {
            radial: 1.5,
            angle: 0.0,
        };
        let small = project(offset, Footprint::new(1.0, 1.0), grid, 1.0);
        let large = project(offset, Footprint::new(4.0, 4.0), grid, 1.0);
        // 1x1: normalized 1.5, reaching 25px past the right edge.
        assert_close(small.x, 125.0);
        // 4x4: normalized 1.125, reaching 25px past the right edge as well.
        assert_close(large.x, 425.0);
    }

    #[test]
    fn normalized_offset_has_floor() {
        let grid = GridMetrics::square(100.0);
        let offset = BadgeOffset {
            radial: 0.0,
            angle: 0.0,
        };
        let p = project(offset, Footprint::new(1.0, 1.0), grid, 1.0);
        assert_close(p.x, 55.0);
        assert_close(p.y, 50.0);
    }

    #[test]
    fn cache_matches_uncached() {
        let mut cache = OffsetCache::new();
        let grid = GridMetrics::square(80.0);
        let footprint = Footprint::new(2.0, 2.0);
        for index in 0..40 {
            let cached = cache.position(index, SizeCategory::Medium, footprint, grid, 1.1);
            let direct = position_for(index, SizeCategory::Medium, footprint, grid, 1.1);
            assert_eq!(cached, direct);
        }
        assert_eq!(cache.len(), 40);
        cache.offset(0, SizeCategory::Medium);
        assert_eq!(cache.len(), 40);
    }
}
