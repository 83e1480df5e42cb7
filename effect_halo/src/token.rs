// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tokens and their effect layer.

use alloc::vec::Vec;

use crate::badge::EffectBadge;
use crate::size::Footprint;

/// Host identifier of a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(pub u64);

impl core::fmt::Display for TokenId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "token#{}", self.0)
    }
}

/// A decoration drawn as part of a token's effect layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decoration {
    /// Whether the decoration is drawn.
    pub visible: bool,
}

impl Default for Decoration {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// A child of the effect layer.
#[derive(Clone, Debug)]
pub enum LayerChild {
    /// A status effect badge.
    Badge(EffectBadge),
    /// An overlay decoration, such as a large "defeated" marker.
    Overlay(Decoration),
}

impl LayerChild {
    /// The badge, if this child is one.
    pub fn as_badge(&self) -> Option<&EffectBadge> {
        match self {
            Self::Badge(badge) => Some(badge),
            Self::Overlay(_) => None,
        }
    }

    /// The badge, if this child is one.
    pub fn as_badge_mut(&mut self) -> Option<&mut EffectBadge> {
        match self {
            Self::Badge(badge) => Some(badge),
            Self::Overlay(_) => None,
        }
    }
}

/// A token on the scene, as seen by the effect layer.
///
/// Tokens are owned by the host. The crate only ever mutates the effect layer's
/// children and the background decoration's visibility.
#[derive(Clone, Debug)]
pub struct Token {
    id: TokenId,
    footprint: Footprint,
    attached: bool,
    background: Decoration,
    children: Vec<LayerChild>,
}

impl Token {
    /// Creates an attached token with no effects.
    pub fn new(id: TokenId, footprint: Footprint) -> Self {
        Self {
            id,
            footprint,
            attached: true,
            background: Decoration::default(),
            children: Vec::new(),
        }
    }

    /// The token's id.
    #[inline]
    pub fn id(&self) -> TokenId {
        self.id
    }

    /// The footprint in grid cells.
    #[inline]
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    /// Changes the footprint.
    pub fn set_footprint(&mut self, footprint: Footprint) {
        self.footprint = footprint;
    }

    /// Whether the token is still part of the scene.
    #[inline]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Marks the token as removed from the scene.
    pub fn detach(&mut self) {
        self.attached = false;
    }

    /// The background decoration drawn behind the badges.
    #[inline]
    pub fn background(&self) -> Decoration {
        self.background
    }

    /// Shows or hides the background decoration.
    pub fn set_background_visible(&mut self, visible: bool) {
        self.background.visible = visible;
    }

    /// All effect layer children, in z-order.
    #[inline]
    pub fn children(&self) -> &[LayerChild] {
        &self.children
    }

    /// Mutable access to the child at `index`.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut LayerChild> {
        self.children.get_mut(index)
    }

    /// Appends a badge on top.
    pub fn push_badge(&mut self, badge: EffectBadge) {
        self.children.push(LayerChild::Badge(badge));
    }

    /// Appends an overlay decoration on top.
    pub fn push_overlay(&mut self, overlay: Decoration) {
        self.children.push(LayerChild::Overlay(overlay));
    }

    /// Inserts a child at `index`, clamped to the number of children.
    pub fn insert_child(&mut self, index: usize, child: LayerChild) {
        let index = index.min(self.children.len());
        self.children.insert(index, child);
    }

    /// Removes the child at `index`.
    pub fn remove_child(&mut self, index: usize) -> Option<LayerChild> {
        (index < self.children.len()).then(|| self.children.remove(index))
    }

    /// Moves the child at `from` to `to`.
    pub fn move_child(&mut self, from: usize, to: usize) {
        if let Some(child) = self.remove_child(from) {
            self.insert_child(to, child);
        }
    }

    /// Removes all badges, keeping decorations.
    pub fn clear_badges(&mut self) {
        self.children
            .retain(|child| matches!(child, LayerChild::Overlay(_)));
    }

    /// All badges, in z-order.
    pub fn badges(&self) -> impl Iterator<Item = &EffectBadge> + '_ {
        self.children.iter().filter_map(LayerChild::as_badge)
    }

    /// All badges, in z-order.
    pub fn badges_mut(&mut self) -> impl Iterator<Item = &mut EffectBadge> + '_ {
        self.children.iter_mut().filter_map(LayerChild::as_badge_mut)
    }

    /// Number of badges of either representation.
    pub fn badge_count(&self) -> usize {
        self.badges().count()
    }

    /// Number of atlas-backed badges.
    pub fn halo_count(&self) -> usize {
        self.badges().filter(|badge| badge.is_halo()).count()
    }

    /// Number of host-drawn badges.
    pub fn native_count(&self) -> usize {
        self.badges().filter(|badge| !badge.is_halo()).count()
    }
}
