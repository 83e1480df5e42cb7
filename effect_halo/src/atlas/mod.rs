// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Badge atlas for drawing each effect image once.
//!
//! This module provides a badge atlas that:
//! - Renders every distinct source image once, as a circular masked and bordered disc
//! - Packs the discs into fixed size slots on shared backing surfaces
//! - Grows by whole surfaces and never evicts
//! - Coalesces concurrent requests for an image that is still loading
//! - Substitutes a fallback image for sources that fail to load
//!
//! Rendering is deferred: drawing a badge records [`AtlasCommand`]s per backing
//! surface, which the host drains with [`BadgeAtlas::take_pending_atlas_commands`]
//! and replays into its own renderer with [`replay_atlas_commands`].

mod cache;
pub mod commands;
mod image;
mod region;
mod rounded;
mod surface;

pub use cache::{AtlasStats, BadgeAtlas, SlotRequest};
pub use commands::{AtlasCommand, AtlasCommandRecorder, AtlasReplayTarget, replay_atlas_commands};
pub use image::{ImageHandle, ImageSurface, LoadError};
pub use region::AtlasSlot;
pub use surface::BackingSurface;
