// Copyright 2026 the Effect Halo Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mathematical helper functions.

use core::ops::Sub;

#[cfg(feature = "libm")]
#[allow(unused_imports)]
use core_maths::CoreFloat;

// From <https://github.com/linebender/tiny-skia/blob/68b198a7210a6bbf752b43d6bc4db62445730313/path/src/scalar.rs#L12>
const SCALAR_NEARLY_ZERO: f64 = 1.0 / (1 << 12) as f64;

/// A number of useful methods for f64 numbers.
pub(crate) trait FloatExt: Sized + Sub<f64, Output = f64> {
    /// Whether the number is approximately 0.
    fn is_nearly_zero(&self) -> bool {
        self.is_nearly_zero_within_tolerance(SCALAR_NEARLY_ZERO)
    }

    /// Whether the number is approximately 0, with a given tolerance.
    fn is_nearly_zero_within_tolerance(&self, tolerance: f64) -> bool;

    /// Whether the number is finite and strictly greater than zero.
    fn is_positive_finite(&self) -> bool;
}

impl FloatExt for f64 {
    #[inline(always)]
    fn is_nearly_zero_within_tolerance(&self, tolerance: f64) -> bool {
        debug_assert!(tolerance >= 0.0, "tolerance must be positive");

        self.abs() <= tolerance
    }

    #[inline(always)]
    fn is_positive_finite(&self) -> bool {
        self.is_finite() && *self > 0.0
    }
}
