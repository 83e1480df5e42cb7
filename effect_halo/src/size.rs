// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Token size classification.

use crate::math::FloatExt;

/// The footprint of a token, in grid cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    /// Width in grid cells.
    pub width: f64,
    /// Height in grid cells.
    pub height: f64,
}

impl Footprint {
    /// Creates a new footprint.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The larger of the two dimensions.
    #[inline]
    pub fn max_extent(&self) -> f64 {
        self.width.max(self.height)
    }

    /// Whether both dimensions are finite and strictly positive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width.is_positive_finite() && self.height.is_positive_finite()
    }

    /// Classifies this footprint, see [`SizeCategory::classify`].
    #[inline]
    pub fn category(&self) -> SizeCategory {
        SizeCategory::classify(self.width, self.height)
    }
}

impl Default for Footprint {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// A discrete size bucket controlling ring layout constants.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SizeCategory {
    /// Up to 0.75 cells.
    Tiny,
    /// Up to 1.25 cells.
    Small,
    /// Up to 2.25 cells.
    Medium,
    /// Up to 3.5 cells.
    Large,
    /// Up to 4.5 cells.
    Huge,
    /// Anything larger.
    Gigantic,
}

impl SizeCategory {
    /// All categories, smallest first.
    pub const ALL: [Self; 6] = [
        Self::Tiny,
        Self::Small,
        Self::Medium,
        Self::Large,
        Self::Huge,
        Self::Gigantic,
    ];

    /// Maps a footprint in grid cells to a size category.
    ///
    /// Only the larger of the two dimensions is considered. Boundaries are
    /// inclusive on the upper end, so a 0.75 cell token is still `Tiny`.
    pub fn classify(width: f64, height: f64) -> Self {
        let extent = width.max(height);
        if extent <= 0.75 {
            Self::Tiny
        } else if extent <= 1.25 {
            Self::Small
        } else if extent <= 2.25 {
            Self::Medium
        } else if extent <= 3.5 {
            Self::Large
        } else if extent <= 4.5 {
            Self::Huge
        } else {
            Self::Gigantic
        }
    }

    /// Radial offset of the innermost ring, in units of the token's half extent.
    pub const fn row_offset_base(self) -> f64 {
        match self {
            Self::Tiny => 1.4,
            Self::Small => 1.0,
            Self::Medium => 1.2,
            Self::Large | Self::Huge | Self::Gigantic => 0.925,
        }
    }

    /// Number of badges on one ring before wrapping to the next.
    pub const fn row_capacity(self) -> u32 {
        match self {
            Self::Tiny => 10,
            Self::Small => 14,
            Self::Medium => 16,
            Self::Large => 20,
            Self::Huge => 24,
            Self::Gigantic => 28,
        }
    }

    /// Additional radial offset for each wrapped ring.
    pub const fn row_spacing(self) -> f64 {
        match self {
            Self::Tiny => 0.6,
            Self::Small | Self::Medium => 0.3,
            Self::Large | Self::Huge | Self::Gigantic => 0.1,
        }
    }

    /// Badge scale relative to the configured base icon size.
    pub const fn icon_scale(self) -> f64 {
        match self {
            Self::Tiny | Self::Small | Self::Medium => 0.85,
            Self::Large => 1.1,
            Self::Huge | Self::Gigantic => 1.3,
        }
    }
}
