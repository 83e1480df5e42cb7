// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use effect_halo::atlas::AtlasReplayTarget;
use effect_halo::color::{AlphaColor, Srgb};
use effect_halo::kurbo::{Affine, BezPath, Size};
use effect_halo::ImageHandle;

/// Replay target that records what would have been drawn.
#[derive(Default)]
pub(crate) struct RecordingTarget {
    pub(crate) images: Vec<(ImageHandle, Affine)>,
    pub(crate) fills: usize,
    pub(crate) strokes: usize,
    pub(crate) clip_depth: usize,
    pub(crate) max_clip_depth: usize,
    transform: Affine,
}

impl AtlasReplayTarget for RecordingTarget {
    fn set_transform(&mut self, t: Affine) {
        self.transform = t;
    }

    fn set_paint(&mut self, _color: AlphaColor<Srgb>) {}

    fn fill_path(&mut self, _path: &BezPath) {
        self.fills += 1;
    }

    fn stroke_path(&mut self, _path: &BezPath, _width: f64) {
        self.strokes += 1;
    }

    fn draw_image(&mut self, image: ImageHandle, _size: Size) {
        assert!(self.clip_depth > 0, "images are drawn inside the disc clip");
        self.images.push((image, self.transform));
    }

    fn push_clip_layer(&mut self, _clip: &BezPath) {
        self.clip_depth += 1;
        self.max_clip_depth = self.max_clip_depth.max(self.clip_depth);
    }

    fn pop_layer(&mut self) {
        self.clip_depth -= 1;
    }
}
