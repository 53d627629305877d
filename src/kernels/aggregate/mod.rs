// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Aggregation Kernels Module** - *Sum, Mean and Order Statistics*
//!
//! Reductions behind the summary engine.
//!
//! ## Core Operations
//! - **Sum**: scalar left-to-right accumulation, or chunked accumulation into `W64`
//!   independent lane sums that are folded in lane order before the `N mod W64` tail
//!   is added. The two agree up to last-bit rounding.
//! - **Mean**: `sum / count`.
//! - **Median**: O(1) indexing into an already sorted slice.
//! - **Median absolute deviation**: in-place `|x - median|`, sort, median.
//! - **Quantiles**: linear interpolation over a sorted slice.
//!
//! ## Empty input
//! Every reduction over zero elements returns negative zero, so "no data" stays
//! distinguishable from a computed zero while remaining safe in later arithmetic.
#[cfg(feature = "simd")]
mod simd;
mod std;

use log::trace;
use minarrow::Vec64;
use num_traits::Float;

use crate::enums::{Execution, ReduceStrategy};
use crate::errors::KernelError;
use crate::kernels::sort::sort_float_with;
use crate::kernels::unary::abs_deviation_in_place;
use crate::utils::confirm_equal_len;
#[cfg(feature = "simd")]
use crate::utils::is_simd_aligned;

/// Result of any reduction over an empty input.
pub const EMPTY_SENTINEL: f64 = -0.0;

/// Sequential sum in buffer order. Empty input yields `-0.0`.
#[inline]
pub fn sum_scalar(data: &[f64]) -> f64 {
    let mut acc = EMPTY_SENTINEL;
    for &x in data {
        acc += x;
    }
    acc
}

/// Chunked sum over `W64` lanes. Empty input yields `-0.0`.
///
/// Uses SIMD where available; unaligned input takes the lane-array path, which
/// accumulates in the same order.
#[inline]
pub fn sum_chunked(data: &[f64]) -> f64 {
    #[cfg(feature = "simd")]
    {
        if is_simd_aligned(data) {
            return simd::sum_chunked_simd(data);
        }
    }
    std::sum_chunked_std(data)
}

/// Sums `data` with the requested strategy.
#[inline]
pub fn reduce_sum(data: &[f64], strategy: ReduceStrategy) -> f64 {
    match strategy {
        ReduceStrategy::Scalar => sum_scalar(data),
        ReduceStrategy::Chunked => sum_chunked(data),
    }
}

/// Arithmetic mean from a precomputed sum. `count == 0` yields `-0.0`.
#[inline]
pub fn mean<T: Float>(sum: T, count: usize) -> T {
    if count == 0 {
        return T::neg_zero();
    }
    sum / T::from(count).unwrap_or_else(T::nan)
}

/// Median of a slice already sorted in non-decreasing order.
///
/// Even lengths average the two elements adjacent to the midpoint; odd lengths
/// take the element counted `len / 2 + 1` from the end. Empty input yields `-0.0`.
#[inline]
pub fn median_sorted<T: Float>(sorted: &[T]) -> T {
    let len = sorted.len();
    match len {
        0 => T::neg_zero(),
        1 => sorted[0],
        _ => {
            let a = len - (len / 2 + 1);
            if len % 2 == 0 {
                (sorted[a] + sorted[a + 1]) / (T::one() + T::one())
            } else {
                sorted[a]
            }
        }
    }
}

/// Median absolute deviation around `median`.
///
/// Consumes `data`: it is left holding the sorted absolute deviations.
pub fn median_abs_deviation(
    data: &mut [f64],
    median: f64,
    sort: Execution,
    transform: Execution,
) -> f64 {
    trace!(
        "median_abs_deviation: {} elements, sort={}, transform={}",
        data.len(),
        sort,
        transform
    );
    abs_deviation_in_place(data, median, transform);
    sort_float_with(data, sort);
    median_sorted(data)
}

/// `n` evenly spaced values from `start` to `end`, both inclusive.
///
/// `n == 1` yields `[start]`.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec64<f64> {
    let mut out = Vec64::with_capacity(n);
    match n {
        0 => {}
        1 => out.push(start),
        _ => {
            let step = (end - start) / (n - 1) as f64;
            for i in 0..n - 1 {
                out.push(start + step * i as f64);
            }
            out.push(end);
        }
    }
    out
}

/// Quantile `p` of a sorted slice, interpolating linearly at `h = 1 + (n - 1)p`.
///
/// `p` must lie in `[0, 1]`. Empty input yields `-0.0`.
#[inline]
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Result<f64, KernelError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(KernelError::InvalidArguments(format!(
            "quantile_sorted: probability must lie in [0, 1] (got {})",
            p
        )));
    }
    let n = sorted.len();
    if n == 0 {
        return Ok(EMPTY_SENTINEL);
    }

    let h = 1.0 + (n as f64 - 1.0) * p;
    let hf = h.floor();
    let idx_lo = (hf as usize).saturating_sub(1).min(n - 1);
    let idx_hi = (h.ceil() as usize).saturating_sub(1).min(n - 1);

    if idx_lo == idx_hi {
        return Ok(sorted[idx_lo]);
    }
    let (v_lo, v_hi) = (sorted[idx_lo], sorted[idx_hi]);
    Ok(v_lo + (v_hi - v_lo) * (h - hf))
}

/// Quantiles of a sorted slice for each probability in `probs` (zero-allocation variant).
///
/// Writes directly to caller-provided output buffer.
pub fn quantiles_sorted_to(
    sorted: &[f64],
    probs: &[f64],
    out: &mut [f64],
) -> Result<(), KernelError> {
    confirm_equal_len("quantiles_sorted_to", probs.len(), out.len())?;
    for (slot, &p) in out.iter_mut().zip(probs) {
        *slot = quantile_sorted(sorted, p)?;
    }
    Ok(())
}

/// Quantiles of a sorted slice for each probability in `probs`.
pub fn quantiles_sorted(sorted: &[f64], probs: &[f64]) -> Result<Vec64<f64>, KernelError> {
    let mut out = Vec64::with_capacity(probs.len());
    out.resize(probs.len(), 0.0);
    quantiles_sorted_to(sorted, probs, &mut out[..])?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use minarrow::vec64;

    use super::*;
    use crate::utils::is_negative_zero;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn test_sum_scalar_basic() {
        assert_eq!(sum_scalar(&[1.0, 2.0, 3.0, 4.0]), 10.0);
    }

    #[test]
    fn test_sum_empty_is_negative_zero() {
        assert!(is_negative_zero(sum_scalar(&[])));
        assert!(is_negative_zero(sum_chunked(&[])));
        assert!(is_negative_zero(reduce_sum(&[], ReduceStrategy::Chunked)));
    }

    #[test]
    fn test_sum_of_positive_zero_is_positive_zero() {
        assert!(!is_negative_zero(sum_scalar(&[0.0])));
        assert!(!is_negative_zero(sum_chunked(&[0.0; 9])));
    }

    #[test]
    fn test_sum_chunked_with_tail() {
        // 67 is not a multiple of any supported lane width.
        let data: Vec<f64> = (1..=67).map(|i| i as f64).collect();
        assert_eq!(sum_chunked(&data), 67.0 * 68.0 / 2.0);
    }

    #[test]
    fn test_sum_chunked_aligned_and_unaligned_agree() {
        let aligned = vec64![0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1];
        // Offsetting by one element breaks 64-byte alignment.
        let padded = vec64![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8, 0.9, 1.0, 1.1];
        let a = sum_chunked(&aligned[..]);
        let b = sum_chunked(&padded[1..]);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_reduce_strategies_agree() {
        let data: Vec<f64> = (0..10_001).map(|i| (i as f64 * 0.37).sin() + 2.0).collect();
        let s = reduce_sum(&data, ReduceStrategy::Scalar);
        let c = reduce_sum(&data, ReduceStrategy::Chunked);
        assert!(approx_eq(s, c, 1e-9 * s.abs()));
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(10.0, 4), 2.5);
        assert!(is_negative_zero(mean(0.0, 0)));
        assert!(is_negative_zero(mean(123.0, 0)));
        assert_eq!(mean(3.0f32, 2), 1.5f32);
    }

    #[test]
    fn test_median_sorted_empty_and_single() {
        assert!(is_negative_zero(median_sorted::<f64>(&[])));
        assert_eq!(median_sorted(&[5.0]), 5.0);
    }

    #[test]
    fn test_median_sorted_even_and_odd() {
        assert_eq!(median_sorted(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(median_sorted(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(median_sorted(&[-3.0, -1.0]), -2.0);
        assert_eq!(median_sorted(&[1.0, 2.0, 3.0, 4.0, 100.0]), 3.0);
    }

    #[test]
    fn test_median_sorted_idempotent() {
        let v = [0.5f64, 0.5, 1.5, 1.5];
        let a = median_sorted(&v);
        let b = median_sorted(&v);
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_mad_even() {
        let mut v = vec![1.0, 2.0, 3.0, 4.0];
        let mad = median_abs_deviation(&mut v, 2.5, Execution::Sequential, Execution::Sequential);
        assert_eq!(mad, 1.0);
        assert_eq!(v, vec![0.5, 0.5, 1.5, 1.5]);
    }

    #[test]
    fn test_mad_odd_parallel() {
        let mut v = vec![1.0, 2.0, 3.0];
        let mad = median_abs_deviation(&mut v, 2.0, Execution::Parallel, Execution::Parallel);
        assert_eq!(mad, 1.0);
    }

    #[test]
    fn test_mad_empty() {
        let mut v: Vec<f64> = vec![];
        let mad = median_abs_deviation(&mut v, -0.0, Execution::Parallel, Execution::Sequential);
        assert!(is_negative_zero(mad));
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(&linspace(2.0, 5.0, 1)[..], &[2.0]);
        let q = linspace(0.0, 1.0, 9);
        assert_eq!(q.len(), 9);
        assert_eq!(q[0], 0.0);
        assert_eq!(q[4], 0.5);
        assert_eq!(q[8], 1.0);
    }

    #[test]
    fn test_quantile_sorted_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile_sorted(&v, 0.0).unwrap(), 1.0);
        assert_eq!(quantile_sorted(&v, 1.0).unwrap(), 4.0);
        assert_eq!(quantile_sorted(&v, 0.5).unwrap(), 2.5);
        assert!(approx_eq(quantile_sorted(&v, 0.25).unwrap(), 1.75, 1e-12));
    }

    #[test]
    fn test_quantile_sorted_rejects_out_of_range() {
        assert!(quantile_sorted(&[1.0], 1.5).is_err());
        assert!(quantile_sorted(&[1.0], f64::NAN).is_err());
        assert!(is_negative_zero(quantile_sorted(&[], 0.3).unwrap()));
    }

    #[test]
    fn test_quantiles_sorted_matches_median() {
        let v: Vec<f64> = (0..11).map(|i| i as f64).collect();
        let probs = linspace(0.0, 1.0, 5);
        let q = quantiles_sorted(&v, &probs).unwrap();
        assert_eq!(&q[..], &[0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(q[2], median_sorted(&v));
    }

    #[test]
    fn test_quantiles_sorted_to_length_mismatch() {
        let mut out = [0.0; 2];
        let err = quantiles_sorted_to(&[1.0, 2.0], &[0.5], &mut out).unwrap_err();
        assert!(matches!(err, KernelError::LengthMismatch(_)));
    }
}
