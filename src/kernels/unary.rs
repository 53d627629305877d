// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Unary Operations Kernels Module** - *Element-Wise Transforms*
//!
//! In-place, order-independent per-element transforms. Each element is rewritten
//! from its own value only, so the parallel path splits the buffer into disjoint
//! chunks and joins before returning.

include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

use rayon::prelude::*;

use crate::config::PARALLEL_TRANSFORM_GRAIN;
use crate::enums::Execution;
#[cfg(feature = "simd")]
use crate::utils::is_simd_aligned;

// SIMD helpers

#[cfg(feature = "simd")]
mod simd_impl {
    use std::simd::{Simd, num::SimdFloat};

    use super::W64;
    use crate::utils::chunk_split;

    /// `x = |x - center|` over whole lanes, scalar tail.
    #[inline(always)]
    pub fn abs_deviation_dense(data: &mut [f64], center: f64) {
        const N: usize = W64;
        let (body, tail) = chunk_split(data.len(), N);
        let c = Simd::<f64, N>::splat(center);
        for chunk in data[body].chunks_exact_mut(N) {
            let v = Simd::<f64, N>::from_slice(chunk);
            (v - c).abs().copy_to_slice(chunk);
        }
        // Tail often caused by `n % N != 0`; uses scalar fallback.
        for x in &mut data[tail] {
            *x = (*x - center).abs();
        }
    }
}

#[inline(always)]
fn abs_deviation_scalar(data: &mut [f64], center: f64) {
    for x in data.iter_mut() {
        *x = (*x - center).abs();
    }
}

#[inline(always)]
fn abs_deviation_dense(data: &mut [f64], center: f64) {
    #[cfg(feature = "simd")]
    {
        if is_simd_aligned(data) {
            simd_impl::abs_deviation_dense(data, center);
            return;
        }
    }
    abs_deviation_scalar(data, center);
}

/// Rewrites every element to `|x - center|`, in place.
///
/// `Execution::Parallel` splits the buffer into chunks of
/// [`PARALLEL_TRANSFORM_GRAIN`] elements, which keeps each chunk on a 64-byte
/// boundary when the buffer itself is aligned.
pub fn abs_deviation_in_place(data: &mut [f64], center: f64, execution: Execution) {
    match execution {
        Execution::Sequential => abs_deviation_dense(data, center),
        Execution::Parallel => data
            .par_chunks_mut(PARALLEL_TRANSFORM_GRAIN)
            .for_each(|chunk| abs_deviation_dense(chunk, center)),
    }
}

/// Absolute deviations of `data` from `center` into `out` (zero-allocation variant).
///
/// Panics if `out.len() != data.len()`.
pub fn abs_deviation_to(data: &[f64], center: f64, out: &mut [f64], execution: Execution) {
    assert_eq!(
        data.len(),
        out.len(),
        "abs_deviation_to: input/output length mismatch"
    );
    out.copy_from_slice(data);
    abs_deviation_in_place(out, center, execution);
}

const _: () = assert!(PARALLEL_TRANSFORM_GRAIN % W64 == 0);
