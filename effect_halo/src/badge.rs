// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effect badges attached to tokens.

use alloc::string::String;

use crate::atlas::AtlasSlot;
use crate::color::{AlphaColor, Srgb};
use crate::kurbo::{Point, Size};

/// Color multiplied into a badge image.
pub type Tint = AlphaColor<Srgb>;

/// Position, size and anchor of a badge as the host drew it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NativeGeometry {
    /// Position in token-local pixels.
    pub position: Point,
    /// Displayed size in pixels.
    pub size: Size,
    /// Anchor, normalized to the badge size.
    pub anchor: Point,
}

/// How a badge is currently drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BadgeRepr {
    /// Host-drawn and untouched.
    Native,
    /// Backed by an atlas slot and positioned on a ring.
    Halo {
        /// The atlas slot holding the rounded badge.
        slot: AtlasSlot,
        /// Geometry to restore when the badge reverts to [`BadgeRepr::Native`].
        native: NativeGeometry,
    },
}

/// A status effect icon attached to a token.
#[derive(Clone, Debug)]
pub struct EffectBadge {
    /// Identifier of the source image.
    pub source: String,
    /// Optional tint.
    pub tint: Option<Tint>,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f32,
    /// Position in token-local pixels.
    pub position: Point,
    /// Displayed size in pixels.
    pub size: Size,
    /// Anchor, normalized to the badge size.
    pub anchor: Point,
    repr: BadgeRepr,
}

impl EffectBadge {
    /// Creates a native badge with default geometry.
    pub fn native(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            tint: None,
            opacity: 1.0,
            position: Point::ZERO,
            size: Size::ZERO,
            anchor: Point::ZERO,
            repr: BadgeRepr::Native,
        }
    }

    /// Sets the tint.
    pub fn with_tint(mut self, tint: Tint) -> Self {
        self.tint = Some(tint);
        self
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets position and size.
    pub fn with_geometry(mut self, position: Point, size: Size) -> Self {
        self.position = position;
        self.size = size;
        self
    }

    /// The current representation.
    #[inline]
    pub fn repr(&self) -> BadgeRepr {
        self.repr
    }

    /// Whether the badge is atlas-backed.
    #[inline]
    pub fn is_halo(&self) -> bool {
        matches!(self.repr, BadgeRepr::Halo { .. })
    }

    /// The atlas slot, for halo badges.
    pub fn slot(&self) -> Option<AtlasSlot> {
        match self.repr {
            BadgeRepr::Halo { slot, .. } => Some(slot),
            BadgeRepr::Native => None,
        }
    }

    /// The current position, size and anchor.
    pub fn geometry(&self) -> NativeGeometry {
        NativeGeometry {
            position: self.position,
            size: self.size,
            anchor: self.anchor,
        }
    }

    /// Builds the halo counterpart of this badge, keeping its source, tint and opacity.
    ///
    /// A halo badge is returned unchanged apart from the slot.
    pub(crate) fn to_halo(&self, slot: AtlasSlot) -> Self {
        let native = match self.repr {
            BadgeRepr::Native => self.geometry(),
            BadgeRepr::Halo { native, .. } => native,
        };
        Self {
            source: self.source.clone(),
            tint: self.tint,
            opacity: self.opacity,
            position: self.position,
            size: self.size,
            anchor: self.anchor,
            repr: BadgeRepr::Halo { slot, native },
        }
    }

    /// Turns a halo badge back into a native one with its original geometry.
    pub(crate) fn revert(&mut self) {
        if let BadgeRepr::Halo { native, .. } = self.repr {
            self.position = native.position;
            self.size = native.size;
            self.anchor = native.anchor;
            self.repr = BadgeRepr::Native;
        }
    }
}
