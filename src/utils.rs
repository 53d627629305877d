// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Chunk Arithmetic and Validation Helpers*
//!
//! Helpers shared by the SIMD and scalar kernel paths.

use core::ops::Range;

use crate::errors::{KernelError, log_length_mismatch};

/// Splits `len` elements into a whole-chunk body and a tail for chunk width `width`.
///
/// Returns `(body, tail)` as index ranges, where `body.len()` is a multiple of
/// `width` and `tail.len() == len % width`.
///
/// Panics if `width == 0`.
#[inline(always)]
pub fn chunk_split(len: usize, width: usize) -> (Range<usize>, Range<usize>) {
    assert!(width > 0, "chunk_split: width must be non-zero");
    let body_end = len - len % width;
    (0..body_end, body_end..len)
}

/// SIMD Alignment check. Returns true if the slice is properly
/// 64-byte aligned for SIMD operations, false otherwise.
#[inline(always)]
pub fn is_simd_aligned<T>(slice: &[T]) -> bool {
    if slice.is_empty() {
        true
    } else {
        (slice.as_ptr() as usize) % 64 == 0
    }
}

/// True if `x` carries the sign bit and compares equal to zero.
#[inline(always)]
pub fn is_negative_zero(x: f64) -> bool {
    x == 0.0 && x.is_sign_negative()
}

/// Validates that two lengths are equal.
#[inline(always)]
pub fn confirm_equal_len(label: &str, a: usize, b: usize) -> Result<(), KernelError> {
    if a != b {
        return Err(KernelError::LengthMismatch(log_length_mismatch(label, a, b)));
    }
    Ok(())
}

/// Validates a half-open sampling range `[low, high)`.
#[inline(always)]
pub fn confirm_range(label: &str, low: f64, high: f64) -> Result<(), KernelError> {
    if !(low < high) || !low.is_finite() || !high.is_finite() {
        return Err(KernelError::InvalidArguments(format!(
            "{}: low must be < high and both finite (got [{}, {}))",
            label, low, high
        )));
    }
    Ok(())
}
