// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Native and halo implementations of the host's badge drawing operations.
//!
//! The host exposes two operations: drawing one badge from a source image, and
//! refreshing all badges of a token. Its own implementations are kept in
//! [`HostHooks`] and stay reachable through [`NativeStrategy`] at all times;
//! [`HaloStrategy`] layers the atlas on top of them.

use alloc::boxed::Box;

use crate::atlas::SlotRequest;
use crate::badge::{EffectBadge, Tint};
use crate::controller::{BadgeLayoutController, Conversion};
use crate::error::Error;
use crate::geometry::GridMetrics;
use crate::token::Token;

/// The host's "draw one badge" operation. It adds a native badge to the token.
pub type DrawBadgeFn = Box<dyn FnMut(&mut Token, &str, Option<Tint>)>;

/// The host's "refresh all badges" operation.
pub type RefreshBadgesFn = Box<dyn FnMut(&mut Token)>;

/// The host's original badge drawing operations.
#[derive(Default)]
pub struct HostHooks {
    draw_badge: Option<DrawBadgeFn>,
    refresh_badges: Option<RefreshBadgesFn>,
}

impl HostHooks {
    /// Name of the "draw one badge" operation, as reported in errors.
    pub const DRAW_BADGE: &'static str = "draw_badge";

    /// Name of the "refresh all badges" operation, as reported in errors.
    pub const REFRESH_BADGES: &'static str = "refresh_badges";

    /// Creates an empty set of hooks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the host's "draw one badge" operation.
    pub fn with_draw_badge(
        mut self,
        f: impl FnMut(&mut Token, &str, Option<Tint>) + 'static,
    ) -> Self {
        self.draw_badge = Some(Box::new(f));
        self
    }

    /// Sets the host's "refresh all badges" operation.
    pub fn with_refresh_badges(mut self, f: impl FnMut(&mut Token) + 'static) -> Self {
        self.refresh_badges = Some(Box::new(f));
        self
    }

    /// The first operation that was not provided, if any.
    pub fn missing(&self) -> Option<&'static str> {
        if self.draw_badge.is_none() {
            Some(Self::DRAW_BADGE)
        } else if self.refresh_badges.is_none() {
            Some(Self::REFRESH_BADGES)
        } else {
            None
        }
    }

    /// Runs the host's "draw one badge" operation, if provided.
    pub fn draw_badge(&mut self, token: &mut Token, source: &str, tint: Option<Tint>) {
        if let Some(draw) = self.draw_badge.as_mut() {
            draw(token, source, tint);
        }
    }

    /// Runs the host's "refresh all badges" operation, if provided.
    pub fn refresh_badges(&mut self, token: &mut Token) {
        if let Some(refresh) = self.refresh_badges.as_mut() {
            refresh(token);
        }
    }
}

impl core::fmt::Debug for HostHooks {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("HostHooks")
            .field("draw_badge", &self.draw_badge.is_some())
            .field("refresh_badges", &self.refresh_badges.is_some())
            .finish()
    }
}

/// The two badge operations a host routes through this crate.
pub trait BadgeStrategy {
    /// Draws one badge for `source` onto `token`.
    fn draw_badge(&mut self, token: &mut Token, source: &str, tint: Option<Tint>);

    /// Redraws all badges of `token`.
    fn refresh_badges(&mut self, token: &mut Token, grid: GridMetrics) -> Result<(), Error>;
}

/// Passes both operations to the host unchanged, after tearing down halo badges.
#[derive(Debug)]
pub struct NativeStrategy<'a> {
    hooks: &'a mut HostHooks,
    controller: &'a mut BadgeLayoutController,
}

impl<'a> NativeStrategy<'a> {
    /// Creates a native strategy.
    pub fn new(hooks: &'a mut HostHooks, controller: &'a mut BadgeLayoutController) -> Self {
        Self { hooks, controller }
    }
}

impl BadgeStrategy for NativeStrategy<'_> {
    fn draw_badge(&mut self, token: &mut Token, source: &str, tint: Option<Tint>) {
        self.hooks.draw_badge(token, source, tint);
    }

    fn refresh_badges(&mut self, token: &mut Token, _grid: GridMetrics) -> Result<(), Error> {
        if token.halo_count() > 0 {
            self.controller.revert(token);
        }
        self.hooks.refresh_badges(token);
        Ok(())
    }
}

/// Draws badges from the atlas and keeps them on rings.
#[derive(Debug)]
pub struct HaloStrategy<'a> {
    hooks: &'a mut HostHooks,
    controller: &'a mut BadgeLayoutController,
}

impl<'a> HaloStrategy<'a> {
    /// Creates a halo strategy.
    pub fn new(hooks: &'a mut HostHooks, controller: &'a mut BadgeLayoutController) -> Self {
        Self { hooks, controller }
    }
}

impl BadgeStrategy for HaloStrategy<'_> {
    fn draw_badge(&mut self, token: &mut Token, source: &str, tint: Option<Tint>) {
        match self.controller.atlas_mut().request(source) {
            SlotRequest::Ready(slot) => {
                let mut badge = EffectBadge::native(source);
                badge.tint = tint;
                token.push_badge(badge.to_halo(slot));
            }
            SlotRequest::Pending => {
                // Drawn natively until the image is in the atlas.
                self.hooks.draw_badge(token, source, tint);
                self.controller.wait_for(source, token.id());
            }
        }
    }

    fn refresh_badges(&mut self, token: &mut Token, grid: GridMetrics) -> Result<(), Error> {
        self.hooks.refresh_badges(token);
        match self.controller.refresh(token, grid)? {
            Conversion::Complete => {}
            Conversion::Waiting(count) => {
                log::debug!("{} badges of {} wait for images", count, token.id());
            }
        }
        Ok(())
    }
}

/// The strategy selected for the current configuration.
#[derive(Debug)]
pub enum ActiveStrategy<'a> {
    /// Halo badges are off or could not be installed.
    Native(NativeStrategy<'a>),
    /// Halo badges are on.
    Halo(HaloStrategy<'a>),
}

impl BadgeStrategy for ActiveStrategy<'_> {
    fn draw_badge(&mut self, token: &mut Token, source: &str, tint: Option<Tint>) {
        match self {
            Self::Native(strategy) => strategy.draw_badge(token, source, tint),
            Self::Halo(strategy) => strategy.draw_badge(token, source, tint),
        }
    }

    fn refresh_badges(&mut self, token: &mut Token, grid: GridMetrics) -> Result<(), Error> {
        match self {
            Self::Native(strategy) => strategy.refresh_badges(token, grid),
            Self::Halo(strategy) => strategy.refresh_badges(token, grid),
        }
    }
}
