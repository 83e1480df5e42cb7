// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use effect_halo::{
    BulkReport, HaloAdapter, HostHooks, ImageHandle, ImageSurface, LoadError, TokenId,
};

use super::scene::{TestScene, native_badge};

/// Calls the host's original operations received.
#[derive(Default)]
pub(crate) struct HostLog {
    pub(crate) draws: Vec<String>,
    pub(crate) refreshes: Vec<TokenId>,
}

/// A host whose badge operations record every call.
#[derive(Clone, Default)]
pub(crate) struct TestHost {
    log: Rc<RefCell<HostLog>>,
}

impl TestHost {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Both host operations.
    pub(crate) fn hooks(&self) -> HostHooks {
        let draw_log = Rc::clone(&self.log);
        let refresh_log = Rc::clone(&self.log);
        HostHooks::new()
            .with_draw_badge(move |token, source, tint| {
                draw_log.borrow_mut().draws.push(source.to_owned());
                let mut badge = native_badge(source, token.badge_count());
                badge.tint = tint;
                token.push_badge(badge);
            })
            .with_refresh_badges(move |token| {
                refresh_log.borrow_mut().refreshes.push(token.id());
            })
    }

    /// Only the draw operation, as if refreshing could not be intercepted.
    pub(crate) fn draw_only_hooks(&self) -> HostHooks {
        let draw_log = Rc::clone(&self.log);
        HostHooks::new().with_draw_badge(move |token, source, _| {
            draw_log.borrow_mut().draws.push(source.to_owned());
            token.push_badge(native_badge(source, token.badge_count()));
        })
    }

    pub(crate) fn draw_count(&self) -> usize {
        self.log.borrow().draws.len()
    }

    pub(crate) fn refreshes(&self) -> Vec<TokenId> {
        self.log.borrow().refreshes.clone()
    }
}

/// Decoded images by source identifier, counting every load.
#[derive(Default)]
pub(crate) struct ImageLibrary {
    images: HashMap<String, ImageSurface>,
    pub(crate) loads: Vec<String>,
}

impl ImageLibrary {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A library containing `sources` and the default fallback image.
    pub(crate) fn with(sources: &[&str]) -> Self {
        let mut library = Self::new();
        library.insert(effect_halo::AtlasConfig::DEFAULT_FALLBACK_SOURCE, 1000);
        for (i, source) in sources.iter().enumerate() {
            library.insert(source, i as u64 + 1);
        }
        library
    }

    pub(crate) fn insert(&mut self, source: &str, handle: u64) {
        self.images.insert(
            source.to_owned(),
            ImageSurface::new(ImageHandle(handle), 64, 64),
        );
    }

    pub(crate) fn load(&mut self, source: &str) -> Result<ImageSurface, LoadError> {
        self.loads.push(source.to_owned());
        self.images.get(source).copied().ok_or(LoadError::NotFound)
    }
}

/// Completes queued loads one batch at a time until none are left, merging
/// the reports.
pub(crate) fn pump_loads(
    adapter: &mut HaloAdapter,
    scene: &mut TestScene,
    library: &mut ImageLibrary,
) -> BulkReport {
    let mut merged = BulkReport::default();
    loop {
        let queued = adapter.take_pending_loads();
        if queued.is_empty() {
            return merged;
        }
        let outcomes: Vec<_> = queued
            .into_iter()
            .map(|source| {
                let outcome = library.load(&source);
                (source, outcome)
            })
            .collect();
        let report = adapter.on_images_loaded(scene, outcomes);
        merged.processed.extend(report.processed);
        merged.failed.extend(report.failed);
        merged.stale.extend(report.stale);
    }
}
