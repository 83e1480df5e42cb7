// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Effect Halo arranges status effect badges in rings around scene tokens.
//!
//! Each distinct badge image is rendered once, as a circular masked and bordered
//! disc, into a slot of a shared [`BadgeAtlas`]. Tokens then reference those slots
//! and the [`BadgeLayoutController`] positions them on concentric rings whose
//! radius and capacity depend on the token's [`SizeCategory`].
//!
//! The [`HaloAdapter`] is the integration point for a host scene: it receives
//! lifecycle events, schedules positioning passes and routes the host's two badge
//! drawing operations through either the native or the halo [`BadgeStrategy`].
//!
//! ## Features
//!
//! - `std` (enabled by default): Get floating point functions from the standard library
//!   (likely using your target's libc).
//! - `libm`: Use floating point implementations from [libm].
//!
//! At least one of `std` and `libm` is required; `std` overrides `libm`.
//!
//! [libm]: https://crates.io/crates/libm

// LINEBENDER LINT SET - lib.rs - v3
// See https://linebender.org/wiki/canonical-lints/
// These lints shouldn't apply to examples or tests.
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
// These lints shouldn't apply to examples.
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("effect_halo requires either the `std` or `libm` feature to be enabled");

// Suppress the unused_crate_dependencies lint when both std and libm are specified.
#[cfg(all(feature = "std", feature = "libm"))]
use core_maths as _;

extern crate alloc;

pub use peniko::{color, kurbo};

pub mod atlas;

mod adapter;
mod badge;
mod config;
mod controller;
mod error;
mod geometry;
mod math;
mod scene;
mod size;
mod strategy;
mod token;

pub use adapter::{ActorChanges, HaloAdapter, InstallState, TokenChanges, TokenEvent};
pub use atlas::{AtlasSlot, BadgeAtlas, ImageHandle, ImageSurface, LoadError, SlotRequest};
pub use badge::{BadgeRepr, EffectBadge, NativeGeometry, Tint};
pub use config::{AtlasConfig, BadgeStyle, HaloConfig};
pub use controller::{BadgeLayoutController, BulkReport, Conversion};
pub use error::{Error, ErrorKind};
pub use geometry::{BadgeOffset, GridMetrics, OffsetCache, offset_for, position_for};
pub use scene::Scene;
pub use size::{Footprint, SizeCategory};
pub use strategy::{
    ActiveStrategy, BadgeStrategy, DrawBadgeFn, HaloStrategy, HostHooks, NativeStrategy,
    RefreshBadgesFn,
};
pub use token::{Decoration, LayerChild, Token, TokenId};
