// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred atlas rendering commands.
//!
//! Rendering a badge into the atlas records draw commands into an
//! [`AtlasCommandRecorder`] rather than executing them immediately. The host
//! drains the pending recorders (one per backing surface) and replays them into
//! its renderer through [`AtlasReplayTarget`].

use alloc::vec::Vec;

use crate::color::{AlphaColor, Srgb};
use crate::kurbo::{Affine, BezPath, Size};

use super::image::ImageHandle;

/// A single draw command recorded for deferred atlas rendering.
///
/// The variants correspond 1:1 to the methods on [`AtlasReplayTarget`].
#[derive(Clone, Debug)]
pub enum AtlasCommand {
    /// Set the current transform.
    SetTransform(Affine),
    /// Set the current paint to a solid colour.
    SetPaint(AlphaColor<Srgb>),
    /// Fill a path with the current paint and transform.
    FillPath(BezPath),
    /// Stroke a path with the current paint and transform.
    StrokePath {
        /// The path to stroke.
        path: BezPath,
        /// Stroke width in atlas pixels.
        width: f64,
    },
    /// Draw an image covering `(0, 0)..size` under the current transform.
    DrawImage {
        /// The host image to draw.
        image: ImageHandle,
        /// The image's own pixel size.
        size: Size,
    },
    /// Push a clip layer defined by a path.
    PushClipLayer(BezPath),
    /// Pop the most recent clip layer.
    PopLayer,
}

/// Records atlas draw commands for a single backing surface.
pub struct AtlasCommandRecorder {
    /// Which backing surface these commands target.
    pub surface_index: u32,
    /// The recorded commands.
    pub commands: Vec<AtlasCommand>,
    /// Width of the surface (pixels).
    width: u16,
    /// Height of the surface (pixels).
    height: u16,
}

impl AtlasCommandRecorder {
    /// Create a new recorder for the given backing surface.
    pub fn new(surface_index: u32, width: u16, height: u16) -> Self {
        Self {
            surface_index,
            commands: Vec::new(),
            width,
            height,
        }
    }

    /// Width of the surface in pixels.
    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Height of the surface in pixels.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Set the current transform.
    pub fn set_transform(&mut self, t: Affine) {
        self.commands.push(AtlasCommand::SetTransform(t));
    }

    /// Set the current paint.
    pub fn set_paint(&mut self, color: AlphaColor<Srgb>) {
        self.commands.push(AtlasCommand::SetPaint(color));
    }

    /// Fill a path with the current paint and transform.
    pub fn fill_path(&mut self, path: &BezPath) {
        self.commands.push(AtlasCommand::FillPath(path.clone()));
    }

    /// Stroke a path with the current paint and transform.
    pub fn stroke_path(&mut self, path: &BezPath, width: f64) {
        self.commands.push(AtlasCommand::StrokePath {
            path: path.clone(),
            width,
        });
    }

    /// Draw an image under the current transform.
    pub fn draw_image(&mut self, image: ImageHandle, size: Size) {
        self.commands.push(AtlasCommand::DrawImage { image, size });
    }

    /// Push a clip layer defined by a path.
    pub fn push_clip_layer(&mut self, clip: &BezPath) {
        self.commands.push(AtlasCommand::PushClipLayer(clip.clone()));
    }

    /// Pop the most recent clip layer.
    pub fn pop_layer(&mut self) {
        self.commands.push(AtlasCommand::PopLayer);
    }
}

impl core::fmt::Debug for AtlasCommandRecorder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AtlasCommandRecorder")
            .field("surface_index", &self.surface_index)
            .field("commands", &self.commands.len())
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// Trait for renderers that can execute atlas draw commands.
pub trait AtlasReplayTarget {
    /// Set the current transform.
    fn set_transform(&mut self, t: Affine);
    /// Set the current paint to a solid colour.
    fn set_paint(&mut self, color: AlphaColor<Srgb>);
    /// Fill a path with the current paint and transform.
    fn fill_path(&mut self, path: &BezPath);
    /// Stroke a path with the current paint and transform.
    fn stroke_path(&mut self, path: &BezPath, width: f64);
    /// Draw an image covering `(0, 0)..size` under the current transform.
    fn draw_image(&mut self, image: ImageHandle, size: Size);
    /// Push a clip layer defined by a path.
    fn push_clip_layer(&mut self, clip: &BezPath);
    /// Pop the most recent clip layer.
    fn pop_layer(&mut self);
}

/// Replay recorded atlas commands into a target that implements [`AtlasReplayTarget`].
pub fn replay_atlas_commands(commands: &[AtlasCommand], target: &mut impl AtlasReplayTarget) {
    for cmd in commands {
        match cmd {
            AtlasCommand::SetTransform(t) => target.set_transform(*t),
            AtlasCommand::SetPaint(c) => target.set_paint(*c),
            AtlasCommand::FillPath(p) => target.fill_path(p),
            AtlasCommand::StrokePath { path, width } => target.stroke_path(path, *width),
            AtlasCommand::DrawImage { image, size } => target.draw_image(*image, *size),
            AtlasCommand::PushClipLayer(c) => target.push_clip_layer(c),
            AtlasCommand::PopLayer => target.pop_layer(),
        }
    }
}
