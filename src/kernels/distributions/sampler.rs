// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Uniform Sampling** - *Pluggable Random Sources*
//!
//! Random sources that fill sample buffers with uniform doubles and report a
//! [`GenerationStatus`] alongside, rather than storing it anywhere. A buffer whose
//! fill reported `Failed` must not be summarised.

use core::fmt;

use log::warn;
use rand::rngs::{OsRng, StdRng, ThreadRng};
use rand::{SeedableRng, TryRngCore, rng};

include!(concat!(env!("OUT_DIR"), "/simd_lanes.rs"));

use crate::config::{SEED_KEY, SEED_KEY_CYCLE};
use crate::errors::KernelError;
use crate::kernels::distributions::uniform::UniformGrid;
use crate::utils::chunk_split;

/// Outcome of filling a buffer from a random source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationStatus {
    Ok,
    /// The source failed part-way; the buffer contents are unspecified.
    Failed(String),
}

impl GenerationStatus {
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, GenerationStatus::Ok)
    }

    /// `Ok(())`, or `KernelError::Generation` carrying the failure reason.
    pub fn check(&self) -> Result<(), KernelError> {
        match self {
            GenerationStatus::Ok => Ok(()),
            GenerationStatus::Failed(reason) => Err(KernelError::Generation(reason.clone())),
        }
    }
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStatus::Ok => f.write_str("ok"),
            GenerationStatus::Failed(reason) => write!(f, "failed ({})", reason),
        }
    }
}

/// Source of uniformly distributed doubles on `[low, high)`.
pub trait UniformSource {
    /// The half-open interval samples are drawn from.
    fn bounds(&self) -> (f64, f64);

    /// Draws a single sample.
    fn try_uniform(&mut self) -> Result<f64, KernelError>;

    /// Fills `out` completely, or stops at the first failure.
    fn fill_uniform(&mut self, out: &mut [f64]) -> GenerationStatus {
        for slot in out.iter_mut() {
            match self.try_uniform() {
                Ok(x) => *slot = x,
                Err(e) => return failed(e),
            }
        }
        GenerationStatus::Ok
    }

    /// Fills `out` one scalar draw at a time and sums the draws in the same loop.
    ///
    /// The sum starts from `-0.0`, so an empty fill yields the empty sentinel.
    fn fill_fused(&mut self, out: &mut [f64]) -> (GenerationStatus, f64) {
        let mut sum = -0.0;
        for slot in out.iter_mut() {
            match self.try_uniform() {
                Ok(x) => {
                    *slot = x;
                    sum += x;
                }
                Err(e) => return (failed(e), sum),
            }
        }
        (GenerationStatus::Ok, sum)
    }
}

#[inline]
fn failed(e: KernelError) -> GenerationStatus {
    warn!("uniform source failed: {}", e);
    match e {
        KernelError::Generation(reason) => GenerationStatus::Failed(reason),
        other => GenerationStatus::Failed(other.to_string()),
    }
}

/// Words drawn per block fill. A whole number of 64-byte lines, so blocks cut from
/// an aligned buffer stay aligned.
const FILL_BLOCK: usize = if W64 > 8 { W64 } else { 8 };

/// Uniform sampler over any (possibly fallible) generator, at 53-bit resolution.
pub struct UniformSampler<R> {
    rng: R,
    high: f64,
    grid: UniformGrid,
}

impl<R: TryRngCore> UniformSampler<R> {
    /// Creates a sampler on `[low, high)`. The range must be finite with `low < high`.
    pub fn new(rng: R, low: f64, high: f64) -> Result<Self, KernelError> {
        Ok(UniformSampler {
            rng,
            high,
            grid: UniformGrid::new(low, high)?,
        })
    }

    #[inline]
    fn next_bits(&mut self) -> Result<u64, KernelError> {
        self.rng
            .try_next_u64()
            .map_err(|e| KernelError::Generation(format!("random source: {}", e)))
    }
}

impl UniformSampler<StdRng> {
    /// Deterministic sampler from a 32-byte seed.
    pub fn seeded(seed: [u8; 32], low: f64, high: f64) -> Result<Self, KernelError> {
        Self::new(StdRng::from_seed(seed), low, high)
    }

    /// Deterministic sampler for trial `k`; see [`trial_seed`].
    pub fn for_trial(k: usize, low: f64, high: f64) -> Result<Self, KernelError> {
        Self::seeded(trial_seed(k), low, high)
    }
}

impl UniformSampler<OsRng> {
    /// Sampler drawing directly from operating-system entropy.
    pub fn from_os(low: f64, high: f64) -> Result<Self, KernelError> {
        Self::new(OsRng, low, high)
    }
}

impl UniformSampler<ThreadRng> {
    /// Sampler backed by the thread-local generator.
    pub fn thread_local(low: f64, high: f64) -> Result<Self, KernelError> {
        Self::new(rng(), low, high)
    }
}

impl<R: TryRngCore> UniformSource for UniformSampler<R> {
    fn bounds(&self) -> (f64, f64) {
        (self.grid.low(), self.high)
    }

    #[inline]
    fn try_uniform(&mut self) -> Result<f64, KernelError> {
        let bits = self.next_bits()?;
        Ok(self.grid.sample(bits))
    }

    /// Block fill: draws `FILL_BLOCK` raw words, converts the block in one pass, then
    /// fills the `len % FILL_BLOCK` remainder one draw at a time.
    ///
    /// `FILL_BLOCK` is the f64 lane count, raised to 8 on narrow targets.
    ///
    /// Draw order matches [`UniformSource::try_uniform`], so a block fill and a fused
    /// fill from identically seeded samplers produce the same buffer.
    fn fill_uniform(&mut self, out: &mut [f64]) -> GenerationStatus {
        let (body, tail) = chunk_split(out.len(), FILL_BLOCK);
        let mut words = [0u64; FILL_BLOCK];

        for block in out[body].chunks_exact_mut(FILL_BLOCK) {
            for w in words.iter_mut() {
                match self.next_bits() {
                    Ok(bits) => *w = bits,
                    Err(e) => return failed(e),
                }
            }
            if let Err(e) = self.grid.fill_to(&words, block) {
                return failed(e);
            }
        }
        for slot in out[tail].iter_mut() {
            match self.try_uniform() {
                Ok(x) => *slot = x,
                Err(e) => return failed(e),
            }
        }
        GenerationStatus::Ok
    }
}

/// 32-byte seed for trial `k`, built from the first `k % SEED_KEY_CYCLE` key words.
///
/// Key bytes are laid out little-endian and folded into the seed with XOR.
pub fn trial_seed(k: usize) -> [u8; 32] {
    let mut seed = [0u8; 32];
    let words = &SEED_KEY[..k % SEED_KEY_CYCLE];
    for (i, b) in words.iter().flat_map(|w| w.to_le_bytes()).enumerate() {
        seed[i % 32] ^= b;
    }
    seed
}
