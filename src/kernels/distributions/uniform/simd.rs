// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Uniform Distribution SIMD Implementations**
//!
//! Converts whole lanes of raw words at once.

include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

use std::simd::Simd;
use std::simd::num::{SimdFloat, SimdUint};

use super::{DISCARD_BITS, uniform_from_bits};
use crate::utils::chunk_split;

/// SIMD-accelerated word-to-uniform conversion (zero-allocation variant).
///
/// Expects `bits.len() == output.len()`.
#[inline(always)]
pub fn uniform_from_bits_simd_to(
    bits: &[u64],
    low: f64,
    step: f64,
    ceiling: f64,
    output: &mut [f64],
) {
    const N: usize = W64;
    let (body, tail) = chunk_split(bits.len(), N);

    let low_v = Simd::<f64, N>::splat(low);
    let step_v = Simd::<f64, N>::splat(step);
    let ceil_v = Simd::<f64, N>::splat(ceiling);
    let shift = Simd::<u64, N>::splat(DISCARD_BITS);

    for (w, o) in bits[body.clone()]
        .chunks_exact(N)
        .zip(output[body].chunks_exact_mut(N))
    {
        let k = Simd::<u64, N>::from_slice(w) >> shift;
        (low_v + k.cast::<f64>() * step_v)
            .simd_min(ceil_v)
            .copy_to_slice(o);
    }
    for i in tail {
        output[i] = uniform_from_bits(bits[i], low, step, ceiling);
    }
}
