// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! This crate contains the integration test suite for `effect_halo`.
//!
//! - The `util` module contains a test scene, a recording host and a recording
//!   atlas replay target shared by the test modules.
//! - We do not use the default Rust test harness, but instead use this `mod.rs` file as the
//!   entry point to run all other tests, which keeps the shared utilities in one place.
//! - For test naming, put the "topic" of the test at the start of the name
//!   (`atlas_`, `layout_`, `lifecycle_`).

#![allow(missing_docs, reason = "we don't need docs for testing")]
#![allow(clippy::cast_possible_truncation, reason = "not critical for testing")]

mod layout;
mod util;
