// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Utility functions and types shared across tests.

mod host;
mod replay;
mod scene;

pub(crate) use host::{ImageLibrary, TestHost, pump_loads};
pub(crate) use replay::RecordingTarget;
pub(crate) use scene::TestScene;

use effect_halo::kurbo::Point;

/// Smallest distance between any two of `points`.
pub(crate) fn min_distance(points: &[Point]) -> f64 {
    let mut min = f64::INFINITY;
    for (i, a) in points.iter().enumerate() {
        for b in &points[i + 1..] {
            min = min.min(a.distance(*b));
        }
    }
    min
}

/// Asserts two floats are equal up to rounding.
pub(crate) fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "{what}: expected {expected}, got {actual}"
    );
}
