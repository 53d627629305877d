// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Aggregation SIMD Implementations**
//!
//! Lane-parallel sum over 64-byte aligned input.

include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

use std::simd::Simd;

use crate::utils::chunk_split;

/// SIMD chunked sum.
///
/// Accumulates one `Simd<f64, W64>` across all whole chunks, then folds the lanes
/// in lane order and adds the tail, so results match the lane-array path bit for bit.
#[inline(always)]
pub fn sum_chunked_simd(data: &[f64]) -> f64 {
    const N: usize = W64;
    let (body, tail) = chunk_split(data.len(), N);

    let mut acc = Simd::<f64, N>::splat(-0.0);
    for chunk in data[body].chunks_exact(N) {
        acc += Simd::<f64, N>::from_slice(chunk);
    }

    let mut sum = -0.0;
    for &lane in acc.as_array() {
        sum += lane;
    }
    // Tail caused by `len % N != 0`; scalar fallback.
    for &x in &data[tail] {
        sum += x;
    }
    sum
}
