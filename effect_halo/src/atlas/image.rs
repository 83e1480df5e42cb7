// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host image handles.

/// Opaque host handle to a decoded image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// A decoded image the host can draw into the atlas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSurface {
    /// Host handle passed back in [`AtlasCommand::DrawImage`](super::AtlasCommand::DrawImage).
    pub handle: ImageHandle,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSurface {
    /// Creates a new image surface.
    pub const fn new(handle: ImageHandle, width: u32, height: u32) -> Self {
        Self {
            handle,
            width,
            height,
        }
    }

    /// Whether the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Why the host could not load an image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LoadError {
    /// No image exists for the identifier.
    NotFound,
    /// The image data could not be decoded.
    Decode,
    /// The image format is not supported.
    Unsupported,
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "image not found"),
            Self::Decode => write!(f, "image could not be decoded"),
            Self::Unsupported => write!(f, "unsupported image format"),
        }
    }
}

impl core::error::Error for LoadError {}
