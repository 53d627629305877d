// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Uniform Distribution Module** - *Raw Words to Uniform Doubles*
//!
//! Maps raw 64-bit generator output onto a half-open interval `[low, high)` at
//! 53-bit resolution: the top 53 bits of each word become an integer `k`, and the
//! sample is `low + k * ((high - low) * 2^-53)`, clamped below `high`.
//!
//! ## Usage Examples
//! ```rust,ignore
//! use summary_kernels::kernels::distributions::uniform::*;
//!
//! let bits = [0u64, u64::MAX, 1 << 63];
//! let mut out = [0.0; 3];
//! uniform_from_bits_to(&bits, 0.0, 1.0, &mut out).unwrap();
//! assert_eq!(out[2], 0.5);
//! ```
#[cfg(feature = "simd")]
mod simd;
mod std;

use crate::errors::KernelError;
use crate::utils::{confirm_equal_len, confirm_range};
#[cfg(feature = "simd")]
use crate::utils::is_simd_aligned;

/// Bits discarded from each raw word to leave 53 significant bits.
pub const DISCARD_BITS: u64 = 11;

/// 2^-53, the spacing of the unit-interval grid.
pub const UNIT_53: f64 = 1.0 / 9_007_199_254_740_992.0;

/// Step between adjacent representable samples on `[low, high)`.
#[inline(always)]
pub fn uniform_step(low: f64, high: f64) -> f64 {
    (high - low) * UNIT_53
}

/// Maps one raw word onto the grid starting at `low` with spacing `step`.
///
/// `low + k * step` can round up to `high` when `low != 0`, so the result is
/// clamped to `ceiling`, the largest double below `high`.
#[inline(always)]
pub fn uniform_from_bits(bits: u64, low: f64, step: f64, ceiling: f64) -> f64 {
    (low + (bits >> DISCARD_BITS) as f64 * step).min(ceiling)
}

/// Validated sampling grid for `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformGrid {
    low: f64,
    step: f64,
    ceiling: f64,
}

impl UniformGrid {
    /// The range must be finite with `low < high`.
    pub fn new(low: f64, high: f64) -> Result<Self, KernelError> {
        confirm_range("UniformGrid", low, high)?;
        Ok(UniformGrid {
            low,
            step: uniform_step(low, high),
            ceiling: high.next_down(),
        })
    }

    #[inline]
    pub fn low(&self) -> f64 {
        self.low
    }

    /// Largest sample the grid can produce.
    #[inline]
    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    #[inline(always)]
    pub fn sample(&self, bits: u64) -> f64 {
        uniform_from_bits(bits, self.low, self.step, self.ceiling)
    }

    /// Converts `bits` into `output`, using SIMD when `output` is 64-byte aligned.
    #[inline(always)]
    pub fn fill_to(&self, bits: &[u64], output: &mut [f64]) -> Result<(), KernelError> {
        confirm_equal_len("UniformGrid::fill_to", bits.len(), output.len())?;
        if bits.is_empty() {
            return Ok(());
        }

        #[cfg(feature = "simd")]
        {
            if is_simd_aligned(output) {
                simd::uniform_from_bits_simd_to(bits, self.low, self.step, self.ceiling, output);
                return Ok(());
            }
        }
        std::uniform_from_bits_std_to(bits, self.low, self.step, self.ceiling, output);
        Ok(())
    }
}

/// Uniform samples from raw words (zero-allocation variant).
///
/// Writes directly to caller-provided output buffer.
#[inline(always)]
pub fn uniform_from_bits_to(
    bits: &[u64],
    low: f64,
    high: f64,
    output: &mut [f64],
) -> Result<(), KernelError> {
    UniformGrid::new(low, high)?.fill_to(bits, output)
}
