// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed grid slot allocation on a backing surface.

use crate::config::AtlasConfig;

use super::region::AtlasSlot;

/// One backing surface, subdivided into a square grid of equal slots.
///
/// Slots are handed out in row-major order and are never returned.
#[derive(Clone, Debug)]
pub struct BackingSurface {
    index: u32,
    slot_size: u16,
    slots_per_row: u16,
    used: u32,
}

impl BackingSurface {
    /// Creates an empty surface laid out according to `config`.
    pub fn new(index: u32, config: &AtlasConfig) -> Self {
        Self {
            index,
            slot_size: config.effective_slot_size(),
            slots_per_row: config.slots_per_row(),
            used: 0,
        }
    }

    /// Position of this surface in the atlas.
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Number of slots on this surface.
    #[inline]
    pub fn capacity(&self) -> u32 {
        u32::from(self.slots_per_row) * u32::from(self.slots_per_row)
    }

    /// Number of slots handed out.
    #[inline]
    pub fn len(&self) -> u32 {
        self.used
    }

    /// Whether no slot has been handed out yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Whether every slot has been handed out.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.used >= self.capacity()
    }

    /// Hands out the next free slot, or `None` if the surface is full.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "column and row are below slots_per_row, so offsets stay within the u16 surface size"
    )]
    pub fn allocate(&mut self) -> Option<AtlasSlot> {
        if self.is_full() {
            return None;
        }
        let slot_index = self.used;
        self.used += 1;

        let per_row = u32::from(self.slots_per_row);
        let size = u32::from(self.slot_size);
        Some(AtlasSlot {
            surface_index: self.index,
            slot_index,
            x: ((slot_index % per_row) * size) as u16,
            y: ((slot_index / per_row) * size) as u16,
            size: self.slot_size,
        })
    }
}
