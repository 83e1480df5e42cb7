// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Badge cache with atlas storage.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{Debug, Formatter};
use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::config::AtlasConfig;

use super::commands::AtlasCommandRecorder;
use super::image::{ImageSurface, LoadError};
use super::region::AtlasSlot;
use super::rounded::record_rounded_badge;
use super::surface::BackingSurface;

/// Result of requesting a badge slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotRequest {
    /// The badge is in the atlas.
    Ready(AtlasSlot),
    /// The source image is being loaded; the slot becomes available once the
    /// host calls [`BadgeAtlas::complete_load`].
    Pending,
}

impl SlotRequest {
    /// The slot, if the badge is ready.
    pub fn ready(self) -> Option<AtlasSlot> {
        match self {
            Self::Ready(slot) => Some(slot),
            Self::Pending => None,
        }
    }
}

/// Counters describing the atlas.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AtlasStats {
    /// Source identifiers with a slot, including aliases of the fallback badge.
    pub entries: usize,
    /// Backing surfaces allocated.
    pub surfaces: usize,
    /// Badges rendered into a slot.
    pub renders: u64,
    /// Requests answered from the atlas since the last `clear_stats()`.
    pub hits: u64,
    /// Requests that had to wait for a load since the last `clear_stats()`.
    pub misses: u64,
}

/// Badge atlas keyed by source image identifier.
///
/// Every identifier maps to at most one slot and is rendered at most once.
/// Identifiers whose image fails to load share the fallback image's slot.
/// Entries are never evicted; the atlas only grows, one [`BackingSurface`] at
/// a time.
///
/// Loading images is up to the host: [`request`](Self::request) queues unseen
/// identifiers, [`take_pending_loads`](Self::take_pending_loads) hands them to
/// the host, and [`complete_load`](Self::complete_load) renders the result.
pub struct BadgeAtlas {
    config: AtlasConfig,
    /// Slot for every resolved source identifier.
    entries: HashMap<String, AtlasSlot>,
    /// Identifiers handed out for loading and not completed yet.
    in_flight: HashSet<String>,
    /// Identifiers queued for loading, in request order.
    pending_loads: Vec<String>,
    /// Identifiers that failed to load and wait for the fallback image.
    awaiting_fallback: Vec<String>,
    surfaces: Vec<BackingSurface>,
    /// Badge draw commands awaiting replay, indexed by surface.
    /// Uses `SmallVec` with inline capacity of 1 because most sessions fit on
    /// a single surface.
    pending_atlas_commands: SmallVec<[Option<AtlasCommandRecorder>; 1]>,
    renders: u64,
    hits: u64,
    misses: u64,
}

impl BadgeAtlas {
    /// Creates an empty atlas.
    pub fn new(config: AtlasConfig) -> Self {
        Self {
            config,
            entries: HashMap::new(),
            in_flight: HashSet::new(),
            pending_loads: Vec::new(),
            awaiting_fallback: Vec::new(),
            surfaces: Vec::new(),
            pending_atlas_commands: SmallVec::new(),
            renders: 0,
            hits: 0,
            misses: 0,
        }
    }

    /// The atlas configuration.
    #[inline]
    pub fn config(&self) -> &AtlasConfig {
        &self.config
    }

    /// Looks up the slot for `source_id` without queueing a load.
    pub fn get(&self, source_id: &str) -> Option<AtlasSlot> {
        self.entries.get(source_id).copied()
    }

    /// Whether `source_id` is queued, loading, or waiting for the fallback.
    pub fn is_pending(&self, source_id: &str) -> bool {
        self.in_flight.contains(source_id)
            || self.awaiting_fallback.iter().any(|id| id == source_id)
    }

    /// Returns the slot for `source_id`, queueing a load if it has not been seen.
    ///
    /// Requests for an identifier that is already loading are coalesced into
    /// the load in flight.
    pub fn request(&mut self, source_id: &str) -> SlotRequest {
        if let Some(slot) = self.entries.get(source_id) {
            self.hits += 1;
            return SlotRequest::Ready(*slot);
        }
        self.misses += 1;
        if self.is_pending(source_id) {
            log::debug!("coalescing request for `{source_id}` into the load in flight");
        } else {
            self.queue_load(source_id);
        }
        SlotRequest::Pending
    }

    /// Takes the identifiers the host has to load, leaving the queue empty.
    pub fn take_pending_loads(&mut self) -> Vec<String> {
        core::mem::take(&mut self.pending_loads)
    }

    /// Whether any load is queued or in flight.
    pub fn has_pending_loads(&self) -> bool {
        !self.in_flight.is_empty() || !self.awaiting_fallback.is_empty()
    }

    /// Records the outcome of loading `source_id`.
    ///
    /// Returns every identifier whose slot is available as a result, which
    /// includes identifiers that were waiting on the fallback image.
    ///
    /// A completion for an identifier that already has a slot, for example one
    /// resolved by [`get_or_create`](Self::get_or_create) while the host was
    /// loading it, draws nothing. It still reports the existing slot, together
    /// with every identifier aliased to it when `source_id` is the fallback.
    pub fn complete_load(
        &mut self,
        source_id: &str,
        outcome: Result<ImageSurface, LoadError>,
    ) -> Vec<(String, AtlasSlot)> {
        self.in_flight.remove(source_id);
        self.resolve(source_id, outcome)
    }

    fn resolve(
        &mut self,
        source_id: &str,
        outcome: Result<ImageSurface, LoadError>,
    ) -> Vec<(String, AtlasSlot)> {
        let mut resolved = Vec::new();
        if let Some(slot) = self.entries.get(source_id).copied() {
            log::debug!("`{source_id}` already has a slot; completion draws nothing");
            resolved.push((String::from(source_id), slot));
            if source_id == self.config.fallback_source {
                let mut aliases: Vec<_> = self
                    .entries
                    .iter()
                    .filter(|(id, aliased)| **aliased == slot && id.as_str() != source_id)
                    .map(|(id, aliased)| (id.clone(), *aliased))
                    .collect();
                aliases.sort_unstable_by(|a, b| a.0.cmp(&b.0));
                resolved.extend(aliases);
            }
            return resolved;
        }

        let is_fallback = source_id == self.config.fallback_source;
        match outcome {
            Ok(image) => {
                let slot = self.render(Some(&image));
                self.entries.insert(String::from(source_id), slot);
                resolved.push((String::from(source_id), slot));
            }
            Err(err) if is_fallback => {
                log::warn!("failed to load fallback badge image `{source_id}`: {err}");
                let slot = self.render(None);
                self.entries.insert(String::from(source_id), slot);
                resolved.push((String::from(source_id), slot));
            }
            Err(err) => {
                let fallback = self.config.fallback_source.clone();
                log::warn!("failed to load badge image `{source_id}`: {err}; using `{fallback}`");
                match self.entries.get(fallback.as_str()).copied() {
                    Some(slot) => {
                        self.entries.insert(String::from(source_id), slot);
                        resolved.push((String::from(source_id), slot));
                    }
                    None => {
                        if !self.awaiting_fallback.iter().any(|id| id == source_id) {
                            self.awaiting_fallback.push(String::from(source_id));
                        }
                        if !self.is_pending(&fallback) {
                            self.queue_load(&fallback);
                        }
                    }
                }
            }
        }

        if is_fallback {
            if let Some(slot) = self.entries.get(source_id).copied() {
                for id in core::mem::take(&mut self.awaiting_fallback) {
                    self.entries.insert(id.clone(), slot);
                    resolved.push((id, slot));
                }
            }
        }
        resolved
    }

    /// Returns the slot for `source_id`, loading it synchronously with `load`
    /// if needed.
    ///
    /// Only `source_id` and, if it fails, the fallback image are loaded. Loads
    /// already handed to the host stay in flight: their completion draws
    /// nothing and only reports the slot, so tokens waiting on them are still
    /// revisited.
    pub fn get_or_create(
        &mut self,
        source_id: &str,
        mut load: impl FnMut(&str) -> Result<ImageSurface, LoadError>,
    ) -> AtlasSlot {
        if let Some(slot) = self.entries.get(source_id) {
            self.hits += 1;
            return *slot;
        }
        self.misses += 1;

        let fallback = self.config.fallback_source.clone();
        let fallback_was_pending = self.in_flight.contains(fallback.as_str());

        if !self.awaiting_fallback.iter().any(|id| id == source_id) {
            let outcome = load(source_id);
            self.resolve(source_id, outcome);
            if let Some(slot) = self.entries.get(source_id) {
                return *slot;
            }
        }

        if !fallback_was_pending {
            // Queued by the failure above; nobody else has seen it yet.
            self.in_flight.remove(fallback.as_str());
            self.pending_loads.retain(|id| *id != fallback);
        }
        let outcome = load(&fallback);
        self.resolve(&fallback, outcome);
        self.entries
            .get(source_id)
            .copied()
            .unwrap_or_else(|| self.render_blank(source_id))
    }

    /// Takes all pending atlas command recorders, leaving the internal collection empty.
    pub fn take_pending_atlas_commands(&mut self) -> Vec<AtlasCommandRecorder> {
        core::mem::take(&mut self.pending_atlas_commands)
            .into_iter()
            .flatten()
            .collect()
    }

    /// The backing surfaces allocated so far.
    #[inline]
    pub fn surfaces(&self) -> &[BackingSurface] {
        &self.surfaces
    }

    /// Number of source identifiers with a slot.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no source identifier has a slot.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current counters.
    pub fn stats(&self) -> AtlasStats {
        AtlasStats {
            entries: self.entries.len(),
            surfaces: self.surfaces.len(),
            renders: self.renders,
            hits: self.hits,
            misses: self.misses,
        }
    }

    /// Clear hit/miss statistics without clearing the atlas itself.
    pub fn clear_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Drops every entry, surface, queued load and pending command.
    ///
    /// Loads completed after this are rendered into the fresh atlas.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.in_flight.clear();
        self.pending_loads.clear();
        self.awaiting_fallback.clear();
        self.surfaces.clear();
        self.pending_atlas_commands.clear();
        self.renders = 0;
        self.hits = 0;
        self.misses = 0;
    }

    fn queue_load(&mut self, source_id: &str) {
        self.in_flight.insert(String::from(source_id));
        self.pending_loads.push(String::from(source_id));
    }

    fn render_blank(&mut self, source_id: &str) -> AtlasSlot {
        let slot = self.render(None);
        self.entries.insert(String::from(source_id), slot);
        slot
    }

    /// Allocates a slot and records a rounded badge into it.
    fn render(&mut self, image: Option<&ImageSurface>) -> AtlasSlot {
        let slot = self.allocate_slot();
        let style = self.config.style;
        let recorder = self.recorder_for_surface(slot.surface_index);
        record_rounded_badge(recorder, slot, image, &style);
        self.renders += 1;
        slot
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "surface count is bounded by distinct identifiers seen in a session"
    )]
    fn allocate_slot(&mut self) -> AtlasSlot {
        // Every surface has at least one slot, so a fresh surface always succeeds.
        loop {
            if let Some(slot) = self.surfaces.last_mut().and_then(BackingSurface::allocate) {
                return slot;
            }
            let index = self.surfaces.len() as u32;
            log::debug!("allocating badge atlas surface {index}");
            self.surfaces.push(BackingSurface::new(index, &self.config));
        }
    }

    /// Get (or create) the command recorder for the given surface.
    fn recorder_for_surface(&mut self, surface_index: u32) -> &mut AtlasCommandRecorder {
        let size = self.config.surface_size;
        let idx = surface_index as usize;
        if self.pending_atlas_commands.len() <= idx {
            self.pending_atlas_commands.resize_with(idx + 1, || None);
        }
        self.pending_atlas_commands[idx]
            .get_or_insert_with(|| AtlasCommandRecorder::new(surface_index, size, size))
    }
}

impl Default for BadgeAtlas {
    fn default() -> Self {
        Self::new(AtlasConfig::default())
    }
}

impl Debug for BadgeAtlas {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BadgeAtlas")
            .field("entries", &self.entries.len())
            .field("surfaces", &self.surfaces.len())
            .field("in_flight", &self.in_flight.len())
            .field("renders", &self.renders)
            .finish_non_exhaustive()
    }
}
