// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Uniform Distribution Scalar Implementations**
//!
//! Scalar word-to-uniform conversion.

use super::uniform_from_bits;

/// Word-to-uniform conversion (zero-allocation variant).
///
/// Expects `bits.len() == output.len()`.
#[inline(always)]
pub fn uniform_from_bits_std_to(
    bits: &[u64],
    low: f64,
    step: f64,
    ceiling: f64,
    output: &mut [f64],
) {
    for (o, &w) in output.iter_mut().zip(bits) {
        *o = uniform_from_bits(w, low, step, ceiling);
    }
}
