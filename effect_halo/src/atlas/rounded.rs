// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rounded badge rendering.

use crate::config::BadgeStyle;
use crate::kurbo::{Affine, Circle, Shape, Size, Vec2};

use super::commands::AtlasCommandRecorder;
use super::image::ImageSurface;
use super::region::AtlasSlot;

/// Flattening tolerance for the disc and ring paths, in atlas pixels.
const PATH_TOLERANCE: f64 = 0.1;

/// Records a rounded badge into `slot`.
///
/// The badge is a filled disc with a ring border and the image scaled
/// uniformly to fit inside the ring, all clipped to the disc. Without an
/// image only the disc and ring are drawn.
pub(crate) fn record_rounded_badge(
    recorder: &mut AtlasCommandRecorder,
    slot: AtlasSlot,
    image: Option<&ImageSurface>,
    style: &BadgeStyle,
) {
    let center = slot.rect().center();
    let radius = (f64::from(slot.size) / 2.0 - style.inset).max(0.0);
    let border_width = style.border_width.clamp(0.0, radius);
    let disc = Circle::new(center, radius).to_path(PATH_TOLERANCE);

    recorder.set_transform(Affine::IDENTITY);
    recorder.push_clip_layer(&disc);

    recorder.set_paint(style.background);
    recorder.fill_path(&disc);

    if border_width > 0.0 {
        let ring = Circle::new(center, radius - border_width / 2.0).to_path(PATH_TOLERANCE);
        recorder.set_paint(style.border);
        recorder.stroke_path(&ring, border_width);
    }

    if let Some(image) = image.filter(|image| !image.is_empty()) {
        let size = Size::new(f64::from(image.width), f64::from(image.height));
        let scale = 2.0 * (radius - border_width) / size.width.max(size.height);
        let origin = center - Vec2::new(size.width * scale, size.height * scale) / 2.0;

        recorder.set_transform(Affine::translate(origin.to_vec2()) * Affine::scale(scale));
        recorder.draw_image(image.handle, size);
        recorder.set_transform(Affine::IDENTITY);
    }

    recorder.pop_layer();
}
