// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Atlas slot data structures.

use crate::kurbo::Rect;

/// Location of a rendered badge within the atlas.
///
/// Slots are cheap to copy and are what badges hold on to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AtlasSlot {
    /// Which backing surface contains this badge.
    pub surface_index: u32,

    /// Index of the slot within its surface, in row-major order.
    pub slot_index: u32,

    /// X position in the surface (pixels).
    pub x: u16,

    /// Y position in the surface (pixels).
    pub y: u16,

    /// Edge length of the slot (pixels).
    pub size: u16,
}

impl AtlasSlot {
    /// The slot's rectangle in surface pixels.
    pub fn rect(&self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.x) + f64::from(self.size),
            f64::from(self.y) + f64::from(self.size),
        )
    }

    /// The slot's rectangle in normalized texture coordinates of a surface of `surface_size`.
    pub fn uv_rect(&self, surface_size: u16) -> Rect {
        let scale = 1.0 / f64::from(surface_size.max(1));
        self.rect().scale_from_origin(scale)
    }
}
