// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Trial and Kernel Parameters*
//!
//! Compile-time constants controlling trial sizing, sampler seeding and the
//! parallel grain of the element-wise kernels. The SIMD lane width lives in the
//! build-generated `simd_lanes.rs`.

/// Base element count of trial 0. Trial `n` holds `round(TRIAL_SCALE_BASE * 2^n)` doubles.
pub const TRIAL_SCALE_BASE: f64 = 1e6;

/// Number of trials run by a default suite.
pub const DEFAULT_TRIALS: usize = 3;

/// Prime key words used to seed per-trial generators.
pub const SEED_KEY: [u32; 9] = [37, 41, 43, 47, 53, 59, 61, 67, 71];

/// Trial `k` seeds from the first `k % SEED_KEY_CYCLE` words of [`SEED_KEY`].
///
/// Must not exceed `SEED_KEY.len() + 1`.
pub const SEED_KEY_CYCLE: usize = 10;

/// Minimum elements per rayon task for the parallel element-wise transform.
pub const PARALLEL_TRANSFORM_GRAIN: usize = 1 << 14;

const _: () = assert!(SEED_KEY_CYCLE <= SEED_KEY.len() + 1);
