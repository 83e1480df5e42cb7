// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host lifecycle integration.

use alloc::string::String;
use alloc::vec::Vec;

use crate::atlas::{AtlasCommandRecorder, ImageSurface, LoadError};
use crate::badge::Tint;
use crate::config::{AtlasConfig, HaloConfig};
use crate::controller::{BadgeLayoutController, BulkReport};
use crate::error::Error;
use crate::geometry::GridMetrics;
use crate::scene::Scene;
use crate::strategy::{ActiveStrategy, BadgeStrategy, HaloStrategy, HostHooks, NativeStrategy};
use crate::token::{Token, TokenId};

/// What changed in a token update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TokenChanges {
    /// Width or height in grid cells changed.
    pub footprint: bool,
    /// Position on the scene changed.
    pub position: bool,
}

/// What changed in an actor update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActorChanges {
    /// The list of active effects changed.
    pub effects: bool,
}

/// A lifecycle event reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenEvent {
    /// The token was added to the scene.
    Created,
    /// The token was drawn for the first time.
    Rendered,
    /// The host refreshed the token's visuals.
    Refreshed,
    /// Token properties changed.
    Updated(TokenChanges),
    /// The token's actor changed.
    ActorUpdated(ActorChanges),
    /// The token was removed from the scene.
    Removed,
}

impl TokenEvent {
    fn needs_layout(self) -> bool {
        match self {
            Self::Created | Self::Rendered | Self::Refreshed => true,
            Self::Updated(changes) => changes.footprint,
            Self::ActorUpdated(changes) => changes.effects,
            Self::Removed => false,
        }
    }
}

/// Whether the host's badge operations have been intercepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstallState {
    /// [`HaloAdapter::install`] has not been called.
    NotInstalled,
    /// Both operations are routed through the adapter.
    Installed,
    /// An operation was missing; badges stay native.
    Failed(&'static str),
}

/// Connects a host scene to the badge layout.
///
/// The host forwards lifecycle events and calls [`draw_badge`](Self::draw_badge)
/// and [`refresh_badges`](Self::refresh_badges) wherever it would run its own
/// implementations. Positioning passes requested by events are queued and run
/// on [`flush`](Self::flush), so several events for one token in the same frame
/// cost a single pass.
#[derive(Debug)]
pub struct HaloAdapter {
    controller: BadgeLayoutController,
    hooks: HostHooks,
    install: InstallState,
    /// Tokens waiting for a positioning pass, in arrival order.
    scheduled: Vec<TokenId>,
}

impl HaloAdapter {
    /// Creates an adapter. Nothing is intercepted until [`install`](Self::install).
    pub fn new(config: HaloConfig, atlas_config: AtlasConfig) -> Self {
        Self::with_controller(BadgeLayoutController::new(config, atlas_config))
    }

    /// Creates an adapter around an existing controller.
    pub fn with_controller(controller: BadgeLayoutController) -> Self {
        Self {
            controller,
            hooks: HostHooks::new(),
            install: InstallState::NotInstalled,
            scheduled: Vec::new(),
        }
    }

    /// Takes over the host's badge operations.
    ///
    /// Installing again once installed keeps the first hooks. If an operation
    /// is missing the hooks that were provided are still used for native
    /// drawing, but halo badges stay off.
    pub fn install(&mut self, hooks: HostHooks) -> Result<(), Error> {
        if self.install == InstallState::Installed {
            log::debug!("badge hooks already installed");
            return Ok(());
        }
        let missing = hooks.missing();
        self.hooks = hooks;
        match missing {
            None => {
                self.install = InstallState::Installed;
                Ok(())
            }
            Some(operation) => {
                if self.install == InstallState::NotInstalled {
                    log::warn!(
                        "cannot intercept host operation `{operation}`; halo badges disabled"
                    );
                } else {
                    log::debug!("host operation `{operation}` still missing");
                }
                self.install = InstallState::Failed(operation);
                Err(Error::missing_host_operation(operation))
            }
        }
    }

    /// Current installation state.
    #[inline]
    pub fn install_state(&self) -> InstallState {
        self.install
    }

    /// Whether halo badges are both enabled and installed.
    pub fn is_active(&self) -> bool {
        self.install == InstallState::Installed && self.controller.config().enabled()
    }

    /// Current configuration.
    #[inline]
    pub fn config(&self) -> &HaloConfig {
        self.controller.config()
    }

    /// The layout controller.
    #[inline]
    pub fn controller(&self) -> &BadgeLayoutController {
        &self.controller
    }

    /// The layout controller.
    #[inline]
    pub fn controller_mut(&mut self) -> &mut BadgeLayoutController {
        &mut self.controller
    }

    /// The strategy for the current configuration.
    pub fn strategy(&mut self) -> ActiveStrategy<'_> {
        if self.is_active() {
            ActiveStrategy::Halo(HaloStrategy::new(&mut self.hooks, &mut self.controller))
        } else {
            ActiveStrategy::Native(NativeStrategy::new(&mut self.hooks, &mut self.controller))
        }
    }

    /// Replacement for the host's "draw one badge" operation.
    pub fn draw_badge(&mut self, token: &mut Token, source: &str, tint: Option<Tint>) {
        self.strategy().draw_badge(token, source, tint);
    }

    /// Replacement for the host's "refresh all badges" operation.
    ///
    /// Failures are logged and leave the token's badges as they are.
    pub fn refresh_badges(&mut self, token: &mut Token, grid: GridMetrics) {
        if let Err(err) = self.strategy().refresh_badges(token, grid) {
            log::warn!("refreshing badges of {} failed: {err}", token.id());
        }
    }

    /// Enables or disables halo badges on every visible token.
    pub fn set_enabled(&mut self, scene: &mut dyn Scene, enabled: bool) -> BulkReport {
        self.controller.config_mut().set_enabled(enabled);
        self.scheduled.clear();
        if enabled {
            self.relayout_all(scene)
        } else {
            self.revert_all(scene)
        }
    }

    /// Changes the base icon size and lays out every visible token again.
    pub fn set_icon_base_size(
        &mut self,
        scene: &mut dyn Scene,
        size: f64,
    ) -> Result<BulkReport, Error> {
        self.controller.config_mut().set_icon_base_size(size)?;
        Ok(self.relayout_all(scene))
    }

    /// Changes the spacing scale and lays out every visible token again.
    pub fn set_spacing_scale(
        &mut self,
        scene: &mut dyn Scene,
        scale: f64,
    ) -> Result<BulkReport, Error> {
        self.controller.config_mut().set_spacing_scale(scale)?;
        Ok(self.relayout_all(scene))
    }

    /// Handles a lifecycle event for one token.
    ///
    /// Relevant events queue a positioning pass for the next [`flush`](Self::flush).
    pub fn on_token_event(&mut self, token: TokenId, event: TokenEvent) {
        if event == TokenEvent::Removed {
            self.scheduled.retain(|id| *id != token);
            self.controller.forget_token(token);
            return;
        }
        if !self.is_active() || !event.needs_layout() {
            return;
        }
        if !self.scheduled.contains(&token) {
            log::debug!("scheduling halo layout for {token} after {event:?}");
            self.scheduled.push(token);
        }
    }

    /// Tokens with a queued positioning pass.
    #[inline]
    pub fn scheduled(&self) -> &[TokenId] {
        &self.scheduled
    }

    /// Runs the queued positioning passes in arrival order.
    pub fn flush(&mut self, scene: &mut dyn Scene) -> BulkReport {
        let scheduled = core::mem::take(&mut self.scheduled);
        let mut report = BulkReport::default();
        if !self.is_active() {
            return report;
        }
        let grid = scene.grid();
        for id in scheduled {
            match scene.token_mut(id) {
                Some(token) if token.is_attached() => {
                    let result = self.controller.refresh(token, grid).map(|_| ());
                    report.record(id, result);
                }
                _ => report.stale.push(id),
            }
        }
        report
    }

    /// Lays out every visible token of a newly activated scene.
    pub fn on_scene_ready(&mut self, scene: &mut dyn Scene) -> BulkReport {
        self.scheduled.clear();
        self.relayout_all(scene)
    }

    /// Records the outcome of a load the host started for an identifier from
    /// [`take_pending_loads`](Self::take_pending_loads).
    pub fn on_image_loaded(
        &mut self,
        scene: &mut dyn Scene,
        source_id: &str,
        outcome: Result<ImageSurface, LoadError>,
    ) -> BulkReport {
        self.on_images_loaded(scene, [(source_id, outcome)])
    }

    /// Records a batch of load outcomes.
    ///
    /// A token waiting on several of the images gets a single positioning pass.
    pub fn on_images_loaded<S: AsRef<str>>(
        &mut self,
        scene: &mut dyn Scene,
        outcomes: impl IntoIterator<Item = (S, Result<ImageSurface, LoadError>)>,
    ) -> BulkReport {
        if !self.is_active() {
            // Keep the atlas consistent; tokens are laid out on the next enable.
            for (source_id, outcome) in outcomes {
                self.controller
                    .atlas_mut()
                    .complete_load(source_id.as_ref(), outcome);
            }
            return BulkReport::default();
        }
        self.controller.complete_loads(scene, outcomes)
    }

    /// Identifiers the host has to load.
    ///
    /// See [`BadgeAtlas::take_pending_loads`](crate::BadgeAtlas::take_pending_loads).
    pub fn take_pending_loads(&mut self) -> Vec<String> {
        self.controller.atlas_mut().take_pending_loads()
    }

    /// Atlas draw commands the host has to replay.
    pub fn take_pending_atlas_commands(&mut self) -> Vec<AtlasCommandRecorder> {
        self.controller.atlas_mut().take_pending_atlas_commands()
    }

    fn relayout_all(&mut self, scene: &mut dyn Scene) -> BulkReport {
        if !self.is_active() {
            return BulkReport::default();
        }
        self.controller.refresh_all(scene)
    }

    fn revert_all(&mut self, scene: &mut dyn Scene) -> BulkReport {
        let mut report = BulkReport::default();
        for id in scene.visible_tokens() {
            match scene.token_mut(id) {
                Some(token) if token.is_attached() => {
                    self.controller.revert(token);
                    self.hooks.refresh_badges(token);
                    report.processed.push(id);
                }
                _ => report.stale.push(id),
            }
        }
        report
    }
}

impl Default for HaloAdapter {
    fn default() -> Self {
        Self::new(HaloConfig::default(), AtlasConfig::default())
    }
}
