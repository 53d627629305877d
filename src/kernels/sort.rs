// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Sorting Kernels Module** - *In-Place Float Ordering*
//!
//! Sort capability for the summary pipeline. Sorts alter the actual data, in
//! ascending IEEE-754 total order, either sequentially or across the rayon pool.
//!
//! Stability is irrelevant here since keys are compared by value only, so both
//! paths use unstable sorts.

use std::cmp::Ordering;

use log::trace;
use rayon::prelude::*;

use crate::enums::Execution;

/// Total ordering for f64 as per IEEE 754
///
/// - NaN sorts greater than all numbers, including +inf (negative NaN below -inf).
/// - -0.0 sorts before +0.0.
#[inline(always)]
pub fn total_cmp_f(a: &f64, b: &f64) -> Ordering {
    a.total_cmp(b)
}

/// Sequential in-place ascending sort.
#[inline]
pub fn sort_float(slice: &mut [f64]) {
    slice.sort_unstable_by(total_cmp_f);
}

/// Parallel in-place ascending sort. Returns once every worker has joined.
#[inline]
pub fn par_sort_float(slice: &mut [f64]) {
    slice.par_sort_unstable_by(total_cmp_f);
}

/// Sorts `slice` ascending with the requested execution mode.
#[inline]
pub fn sort_float_with(slice: &mut [f64], execution: Execution) {
    trace!("sort_float_with: {} elements, {}", slice.len(), execution);
    match execution {
        Execution::Sequential => sort_float(slice),
        Execution::Parallel => par_sort_float(slice),
    }
}

/// Returns a sorted copy, leaving `data` untouched.
pub fn sorted_float(data: &[f64], execution: Execution) -> Vec<f64> {
    let mut v = data.to_vec();
    sort_float_with(&mut v, execution);
    v
}

/// True if `data` is non-decreasing under [`total_cmp_f`].
pub fn is_sorted_float(data: &[f64]) -> bool {
    data.windows(2)
        .all(|w| total_cmp_f(&w[0], &w[1]) != Ordering::Greater)
}
