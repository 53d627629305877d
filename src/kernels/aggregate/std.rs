// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Aggregation Scalar Implementations**
//!
//! Lane-array versions of the chunked reductions, used without the `simd` feature
//! and for unaligned input.

include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

use crate::utils::chunk_split;

/// Chunked sum with `W64` independent partial sums held in a plain array.
#[inline(always)]
pub fn sum_chunked_std(data: &[f64]) -> f64 {
    let (body, tail) = chunk_split(data.len(), W64);

    let mut lanes = [-0.0_f64; W64];
    for chunk in data[body].chunks_exact(W64) {
        for (lane, &x) in lanes.iter_mut().zip(chunk) {
            *lane += x;
        }
    }

    let mut sum = -0.0;
    for lane in lanes {
        sum += lane;
    }
    for &x in &data[tail] {
        sum += x;
    }
    sum
}
