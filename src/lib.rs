// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

// At the time of writing this unlocks std::simd, which the developers
// intend on stabilising but haven't yet.
#![cfg_attr(feature = "simd", feature(portable_simd))]

// compile with RUSTFLAGS="-C target-cpu=native" cargo +nightly build --release

//! # **summary-kernels** - *Summary Statistics over Large Uniform Samples*
//!
//! Numeric kernels for sum, mean, median and median absolute deviation over
//! 64-byte aligned sample buffers, pluggable uniform random sources, and a timed
//! trial driver that exercises the whole pipeline.
//!
//! - [`kernels::summary`]: the summary statistics engine.
//! - [`kernels::aggregate`]: scalar and lane-chunked sums, mean, median, MAD, quantiles.
//! - [`kernels::sort`] and [`kernels::unary`]: sort and per-element transform stages.
//! - [`kernels::distributions`]: uniform sampling with an explicit generation status.
//! - [`trial`]: stage timing, trial suites and text reports.

pub mod kernels {
    pub mod aggregate;
    pub mod distributions;
    pub mod sort;
    pub mod summary;
    pub mod unary;
}

pub mod buffer;
pub mod config;
pub mod enums;
pub mod errors;
pub mod trial;
pub mod utils;

pub use buffer::SampleBuffer;
pub use errors::KernelError;
pub use kernels::summary::{SummaryEngine, SummaryResult, SummaryStrategy, summarize};
