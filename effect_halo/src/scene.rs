// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::geometry::GridMetrics;
use crate::token::{Token, TokenId};

/// Host access to the active scene.
///
/// The scene owns its tokens; the layout code only borrows them for the
/// duration of a single pass.
pub trait Scene {
    /// Current grid cell dimensions.
    fn grid(&self) -> GridMetrics;

    /// Tokens currently visible, in the order they should be processed.
    fn visible_tokens(&self) -> Vec<TokenId>;

    /// Mutable access to a token, or `None` if it no longer exists.
    fn token_mut(&mut self, id: TokenId) -> Option<&mut Token>;
}
