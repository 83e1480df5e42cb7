// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::BTreeMap;

use effect_halo::{EffectBadge, Footprint, GridMetrics, Scene, Token, TokenId};

/// An in-memory scene with tokens kept in id order.
pub(crate) struct TestScene {
    pub(crate) grid: GridMetrics,
    tokens: BTreeMap<TokenId, Token>,
}

impl TestScene {
    pub(crate) fn new() -> Self {
        Self {
            grid: GridMetrics::square(100.0),
            tokens: BTreeMap::new(),
        }
    }

    /// Adds a token carrying native badges for `sources`.
    pub(crate) fn add_token(&mut self, id: u64, footprint: Footprint, sources: &[&str]) -> TokenId {
        let id = TokenId(id);
        let mut token = Token::new(id, footprint);
        for (i, source) in sources.iter().enumerate() {
            token.push_badge(native_badge(source, i));
        }
        self.tokens.insert(id, token);
        id
    }

    /// Removes a token the way the host does: detached, then dropped.
    pub(crate) fn remove_token(&mut self, id: TokenId) -> Option<Token> {
        let mut token = self.tokens.remove(&id)?;
        token.detach();
        Some(token)
    }

    pub(crate) fn token(&self, id: TokenId) -> &Token {
        self.tokens.get(&id).expect("token exists in scene")
    }

    pub(crate) fn token_mut_ref(&mut self, id: TokenId) -> &mut Token {
        self.tokens.get_mut(&id).expect("token exists in scene")
    }
}

impl Scene for TestScene {
    fn grid(&self) -> GridMetrics {
        self.grid
    }

    fn visible_tokens(&self) -> Vec<TokenId> {
        self.tokens.keys().copied().collect()
    }

    fn token_mut(&mut self, id: TokenId) -> Option<&mut Token> {
        self.tokens.get_mut(&id)
    }
}

/// A native badge laid out the way the host's default row does.
pub(crate) fn native_badge(source: &str, index: usize) -> EffectBadge {
    use effect_halo::kurbo::{Point, Size};
    EffectBadge::native(source).with_geometry(
        Point::new(index as f64 * 20.0, 0.0),
        Size::new(20.0, 20.0),
    )
}
