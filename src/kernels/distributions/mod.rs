// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Distributions** - *Random Sample Generation*
//!
//! - [`uniform`]: raw 64-bit words to uniform doubles at 53-bit resolution.
//! - [`sampler`]: random sources built on `rand` generators, with an explicit
//!   generation status.

pub mod sampler;
pub mod uniform;

pub use sampler::{GenerationStatus, UniformSampler, UniformSource, trial_seed};
