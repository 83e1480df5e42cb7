// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-token conversion and positioning of halo badges.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::atlas::{AtlasSlot, BadgeAtlas, ImageSurface, LoadError, SlotRequest};
use crate::badge::EffectBadge;
use crate::config::{AtlasConfig, HaloConfig};
use crate::error::Error;
use crate::geometry::{GridMetrics, OffsetCache};
use crate::kurbo::{Point, Size};
use crate::scene::Scene;
use crate::token::{LayerChild, Token, TokenId};

/// Outcome of converting a token's native badges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Conversion {
    /// Every badge is atlas-backed.
    Complete,
    /// This many badges stay native until their images finish loading.
    Waiting(usize),
}

/// Result of processing several tokens.
#[derive(Clone, Debug, Default)]
pub struct BulkReport {
    /// Tokens that were laid out.
    pub processed: Vec<TokenId>,
    /// Tokens whose layout failed, with the reason.
    pub failed: Vec<(TokenId, Error)>,
    /// Tokens that were skipped because they are no longer part of the scene.
    pub stale: Vec<TokenId>,
}

impl BulkReport {
    /// Whether no token failed.
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    pub(crate) fn record(&mut self, id: TokenId, result: Result<(), Error>) {
        match result {
            Ok(()) => self.processed.push(id),
            Err(err) => {
                log::warn!("halo layout failed for {id}: {err}");
                self.failed.push((id, err));
            }
        }
    }
}

/// Converts and positions a token's badges.
///
/// Tokens move between two states. *Native* tokens show the host's badges
/// untouched. *Halo* tokens have their badges replaced by atlas-backed copies
/// arranged on rings, with the background decoration hidden.
#[derive(Debug)]
pub struct BadgeLayoutController {
    config: HaloConfig,
    atlas: BadgeAtlas,
    offsets: OffsetCache,
    /// Tokens with native badges waiting for a source image to load.
    waiters: HashMap<String, SmallVec<[TokenId; 4]>>,
}

impl BadgeLayoutController {
    /// Creates a controller with an empty atlas.
    pub fn new(config: HaloConfig, atlas_config: AtlasConfig) -> Self {
        Self::with_atlas(config, BadgeAtlas::new(atlas_config))
    }

    /// Creates a controller around an existing atlas.
    pub fn with_atlas(config: HaloConfig, atlas: BadgeAtlas) -> Self {
        Self {
            config,
            atlas,
            offsets: OffsetCache::new(),
            waiters: HashMap::new(),
        }
    }

    /// Current configuration.
    #[inline]
    pub fn config(&self) -> &HaloConfig {
        &self.config
    }

    /// Mutable configuration. Changes apply from the next pass.
    #[inline]
    pub fn config_mut(&mut self) -> &mut HaloConfig {
        &mut self.config
    }

    /// The badge atlas.
    #[inline]
    pub fn atlas(&self) -> &BadgeAtlas {
        &self.atlas
    }

    /// The badge atlas.
    #[inline]
    pub fn atlas_mut(&mut self) -> &mut BadgeAtlas {
        &mut self.atlas
    }

    /// Whether halo badges apply to `token`.
    pub fn is_active_for(&self, token: &Token) -> bool {
        self.config.enabled() && token.is_attached()
    }

    /// Whether `token` is waiting for any image to load.
    pub fn is_waiting(&self, token: TokenId) -> bool {
        self.waiters.values().any(|tokens| tokens.contains(&token))
    }

    /// Replaces every native badge whose image is in the atlas by its halo copy.
    ///
    /// Each replacement keeps the badge's z-order, tint and opacity. Badges
    /// whose image is still loading stay native and the token is revisited
    /// once the load completes.
    pub fn convert(&mut self, token: &mut Token) -> Conversion {
        let mut waiting = 0;
        for index in 0..token.children().len() {
            let source = match token.children().get(index) {
                Some(LayerChild::Badge(badge)) if !badge.is_halo() => badge.source.clone(),
                _ => continue,
            };
            match self.atlas.request(&source) {
                SlotRequest::Ready(slot) => replace_with_halo(token, index, slot),
                SlotRequest::Pending => {
                    waiting += 1;
                    self.wait_for(&source, token.id());
                }
            }
        }
        if waiting == 0 {
            Conversion::Complete
        } else {
            Conversion::Waiting(waiting)
        }
    }

    /// Sizes and positions every halo badge of `token` on its rings.
    pub fn relayout(&mut self, token: &mut Token, grid: GridMetrics) -> Result<(), Error> {
        let footprint = token.footprint();
        if !footprint.is_valid() {
            return Err(Error::invalid_footprint(token.id()));
        }
        if !grid.is_valid() {
            return Err(Error::invalid_grid(token.id()));
        }

        let category = footprint.category();
        let icon_size = self.config.icon_pixel_size(category, grid);
        let offset_scale = self.config.offset_scale(category);

        let mut index: u32 = 0;
        for badge in token.badges_mut().filter(|badge| badge.is_halo()) {
            badge.size = Size::new(icon_size, icon_size);
            badge.anchor = Point::new(0.5, 0.5);
            badge.position = self
                .offsets
                .position(index, category, footprint, grid, offset_scale);
            index = index.saturating_add(1);
        }
        token.set_background_visible(index == 0);
        Ok(())
    }

    /// Brings `token` up to date: converts native badges, then repositions.
    ///
    /// Tokens that are already halo only get repositioned. When the feature
    /// is disabled the token is reverted instead. A token that cannot be laid
    /// out is reverted to its native badges before the error is returned.
    pub fn refresh(&mut self, token: &mut Token, grid: GridMetrics) -> Result<Conversion, Error> {
        if !self.is_active_for(token) {
            self.revert(token);
            return Ok(Conversion::Complete);
        }
        if !token.footprint().is_valid() {
            self.revert(token);
            return Err(Error::invalid_footprint(token.id()));
        }
        let conversion = self.convert(token);
        if let Err(err) = self.relayout(token, grid) {
            self.revert(token);
            return Err(err);
        }
        Ok(conversion)
    }

    /// Turns every halo badge back into a native one and shows the background again.
    pub fn revert(&mut self, token: &mut Token) {
        for badge in token.badges_mut() {
            badge.revert();
        }
        token.set_background_visible(true);
        self.forget_token(token.id());
    }

    /// Runs [`refresh`](Self::refresh) on every visible token.
    ///
    /// A failing token is logged and reported; the others are still processed.
    pub fn refresh_all(&mut self, scene: &mut dyn Scene) -> BulkReport {
        let grid = scene.grid();
        let mut report = BulkReport::default();
        for id in scene.visible_tokens() {
            match scene.token_mut(id) {
                Some(token) if token.is_attached() => {
                    let result = self.refresh(token, grid).map(|_| ());
                    report.record(id, result);
                }
                _ => report.stale.push(id),
            }
        }
        report
    }

    /// Records the outcome of an image load and revisits the tokens waiting on it.
    ///
    /// Tokens that left the scene in the meantime are skipped silently.
    pub fn complete_load(
        &mut self,
        scene: &mut dyn Scene,
        source_id: &str,
        outcome: Result<ImageSurface, LoadError>,
    ) -> BulkReport {
        self.complete_loads(scene, [(source_id, outcome)])
    }

    /// Records several load outcomes, then revisits each waiting token once.
    pub fn complete_loads<S: AsRef<str>>(
        &mut self,
        scene: &mut dyn Scene,
        outcomes: impl IntoIterator<Item = (S, Result<ImageSurface, LoadError>)>,
    ) -> BulkReport {
        let mut tokens: SmallVec<[TokenId; 4]> = SmallVec::new();
        for (source_id, outcome) in outcomes {
            for (id, _) in self.atlas.complete_load(source_id.as_ref(), outcome) {
                for token in self.waiters.remove(id.as_str()).unwrap_or_default() {
                    if !tokens.contains(&token) {
                        tokens.push(token);
                    }
                }
            }
        }

        let grid = scene.grid();
        let mut report = BulkReport::default();
        for id in tokens {
            match scene.token_mut(id) {
                Some(token) if token.is_attached() => {
                    let result = self.refresh(token, grid).map(|_| ());
                    report.record(id, result);
                }
                _ => {
                    log::debug!("discarding load completion for removed {id}");
                    report.stale.push(id);
                }
            }
        }
        report
    }

    /// Drops every load waiter registered for `token`.
    pub fn forget_token(&mut self, token: TokenId) {
        self.waiters.retain(|_, tokens| {
            tokens.retain(|t| *t != token);
            !tokens.is_empty()
        });
    }

    pub(crate) fn wait_for(&mut self, source_id: &str, token: TokenId) {
        let tokens = self.waiters.entry(String::from(source_id)).or_default();
        if !tokens.contains(&token) {
            tokens.push(token);
        }
    }
}

impl Default for BadgeLayoutController {
    fn default() -> Self {
        Self::new(HaloConfig::default(), AtlasConfig::default())
    }
}

/// Swaps the native badge at `index` for its halo copy in place.
fn replace_with_halo(token: &mut Token, index: usize, slot: AtlasSlot) {
    let Some(LayerChild::Badge(native)) = token.remove_child(index) else {
        return;
    };
    let halo: EffectBadge = native.to_halo(slot);
    token.insert_child(index, LayerChild::Badge(halo));
}
