// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Runtime configuration.

use alloc::string::String;

use crate::color::{AlphaColor, Srgb};
use crate::error::Error;
use crate::geometry::GridMetrics;
use crate::math::FloatExt;
use crate::size::SizeCategory;

/// Icon size that corresponds to an offset scale of 1.
const REFERENCE_ICON_SIZE: f64 = 14.0;

/// Lower bound for the ring offset scale.
const MIN_OFFSET_SCALE: f64 = 0.25;

/// Settings read on every positioning pass.
///
/// Persisting these is up to the host; the adapter only receives updates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HaloConfig {
    enabled: bool,
    icon_base_size: f64,
    spacing_scale: f64,
}

impl HaloConfig {
    /// Default icon size in pixels, before category and grid scaling.
    pub const DEFAULT_ICON_BASE_SIZE: f64 = 18.0;

    /// Default ring spacing multiplier.
    pub const DEFAULT_SPACING_SCALE: f64 = 0.85;

    /// Creates a configuration, validating the numeric settings.
    pub fn new(enabled: bool, icon_base_size: f64, spacing_scale: f64) -> Result<Self, Error> {
        let mut config = Self {
            enabled,
            ..Self::default()
        };
        config.set_icon_base_size(icon_base_size)?;
        config.set_spacing_scale(spacing_scale)?;
        Ok(config)
    }

    /// Whether halo badges are enabled.
    #[inline]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Base icon size in pixels.
    #[inline]
    pub fn icon_base_size(&self) -> f64 {
        self.icon_base_size
    }

    /// Ring spacing multiplier.
    #[inline]
    pub fn spacing_scale(&self) -> f64 {
        self.spacing_scale
    }

    /// Enables or disables halo badges.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Sets the base icon size. Rejects values that are not finite and positive.
    pub fn set_icon_base_size(&mut self, size: f64) -> Result<(), Error> {
        if !size.is_positive_finite() {
            return Err(Error::invalid_configuration("icon_base_size"));
        }
        self.icon_base_size = size;
        Ok(())
    }

    /// Sets the spacing multiplier. Rejects values that are not finite and positive.
    pub fn set_spacing_scale(&mut self, scale: f64) -> Result<(), Error> {
        if !scale.is_positive_finite() {
            return Err(Error::invalid_configuration("spacing_scale"));
        }
        self.spacing_scale = scale;
        Ok(())
    }

    /// Displayed badge size for tokens of `category` on `grid`.
    pub fn icon_pixel_size(&self, category: SizeCategory, grid: GridMetrics) -> f64 {
        self.icon_base_size * category.icon_scale() * grid.scale_factor()
    }

    /// Ring radius multiplier for tokens of `category`.
    pub fn offset_scale(&self, category: SizeCategory) -> f64 {
        (self.icon_base_size / REFERENCE_ICON_SIZE * category.icon_scale() * self.spacing_scale)
            .max(MIN_OFFSET_SCALE)
    }
}

impl Default for HaloConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            icon_base_size: Self::DEFAULT_ICON_BASE_SIZE,
            spacing_scale: Self::DEFAULT_SPACING_SCALE,
        }
    }
}

/// Appearance of a rounded badge in the atlas.
#[derive(Clone, Copy, Debug)]
pub struct BadgeStyle {
    /// Fill behind the icon.
    pub background: AlphaColor<Srgb>,
    /// Ring color.
    pub border: AlphaColor<Srgb>,
    /// Ring width in atlas pixels.
    pub border_width: f64,
    /// Gap between the disc and the slot edges, in atlas pixels.
    pub inset: f64,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            background: AlphaColor::from_rgba8(20, 20, 24, 220),
            border: AlphaColor::from_rgba8(230, 225, 210, 255),
            border_width: 6.0,
            inset: 1.0,
        }
    }
}

/// Layout and appearance of the badge atlas.
#[derive(Clone, Debug)]
pub struct AtlasConfig {
    /// Edge length of one backing surface, in atlas pixels.
    pub surface_size: u16,
    /// Edge length of one slot, in atlas pixels.
    pub slot_size: u16,
    /// How rounded badges are drawn.
    pub style: BadgeStyle,
    /// Image drawn in place of sources that fail to load.
    pub fallback_source: String,
}

impl AtlasConfig {
    /// Default image substituted for sources that fail to load.
    pub const DEFAULT_FALLBACK_SOURCE: &'static str = "icons/svg/hazard.svg";

    /// Slot edge length, clamped to `1..=surface_size`.
    #[inline]
    pub fn effective_slot_size(&self) -> u16 {
        self.slot_size.clamp(1, self.surface_size.max(1))
    }

    /// Slots along one edge of a surface.
    #[inline]
    pub fn slots_per_row(&self) -> u16 {
        (self.surface_size / self.effective_slot_size()).max(1)
    }

    /// Slots on one surface.
    #[inline]
    pub fn capacity(&self) -> u32 {
        let per_row = u32::from(self.slots_per_row());
        per_row * per_row
    }
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            surface_size: 2048,
            slot_size: 96,
            style: BadgeStyle::default(),
            fallback_source: String::from(Self::DEFAULT_FALLBACK_SOURCE),
        }
    }
}
