// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Trial Driver** - *Timed Summary Pipeline Runs*
//!
//! A trial generates `round(scale_base * 2^n)` uniform samples on
//! `[0, scale_base * 2^n)`, summarises them and records the wall-clock time of each
//! stage. A suite runs trials `0..T`, concurrently unless told otherwise, and
//! collects their reports. A failed trial does not stop the others.

use log::{debug, trace, warn};
use rayon::prelude::*;

use crate::buffer::SampleBuffer;
use crate::config::{DEFAULT_TRIALS, TRIAL_SCALE_BASE};
use crate::enums::{Entropy, Execution, Fusion};
use crate::errors::KernelError;
use crate::kernels::aggregate::{linspace, quantiles_sorted};
use crate::kernels::distributions::{UniformSampler, UniformSource};
use crate::kernels::sort::sort_float_with;
use crate::kernels::summary::{Stage, StageSink, SummaryEngine, SummaryResult, SummaryStrategy};
use crate::trial::clock::{StageClock, TickQueue};

/// Settings shared by every trial of a suite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrialConfig {
    /// Trial `n` uses `scale_base * 2^n` as both sample count and upper bound.
    pub scale_base: f64,
    pub fusion: Fusion,
    pub strategy: SummaryStrategy,
    pub entropy: Entropy,
    /// Number of equidistant quantile probabilities on `[0, 1]`; `0` disables.
    pub quantiles: usize,
}

impl Default for TrialConfig {
    fn default() -> Self {
        TrialConfig {
            scale_base: TRIAL_SCALE_BASE,
            fusion: Fusion::default(),
            strategy: SummaryStrategy::default(),
            entropy: Entropy::default(),
            quantiles: 0,
        }
    }
}

impl TrialConfig {
    pub fn validate(&self) -> Result<(), KernelError> {
        if !(self.scale_base.is_finite() && self.scale_base > 0.0) {
            return Err(KernelError::InvalidArguments(format!(
                "trial scale must be finite and positive (got {})",
                self.scale_base
            )));
        }
        Ok(())
    }

    /// Upper bound of the sampling range for trial `n`.
    #[inline]
    pub fn trial_scale(&self, n: usize) -> f64 {
        trial_scale(self.scale_base, n)
    }
}

/// `base * 2^n`.
#[inline]
pub fn trial_scale(base: f64, n: usize) -> f64 {
    base * 2f64.powi(n as i32)
}

/// Sample count for trial `n`: `base * 2^n` rounded to nearest, ties to even.
#[inline]
pub fn trial_size(base: f64, n: usize) -> usize {
    trial_scale(base, n).round_ties_even() as usize
}

/// Outcome of one successful trial.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialReport {
    pub index: usize,
    pub size: usize,
    pub fusion: Fusion,
    /// Seconds per stage, in execution order.
    pub timings: Vec<(Stage, f64)>,
    pub summary: SummaryResult,
    /// `(probability, quantile)` pairs of the generated samples.
    pub quantiles: Vec<(f64, f64)>,
}

/// A trial that could not be summarised.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialFailure {
    pub index: usize,
    pub error: KernelError,
}

/// Outcome of a suite of trials.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteReport {
    /// Successful trials, ordered by index.
    pub trials: Vec<TrialReport>,
    pub failures: Vec<TrialFailure>,
    /// Total samples summarised across successful trials.
    pub compound_size: usize,
    /// Wall-clock seconds for the whole suite.
    pub elapsed: f64,
}

impl SuiteReport {
    #[inline]
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs trial `index` with the configured entropy source.
pub fn run_trial(index: usize, config: &TrialConfig) -> Result<TrialReport, KernelError> {
    config.validate()?;
    let high = config.trial_scale(index);
    match config.entropy {
        Entropy::Seeded => {
            let mut source = UniformSampler::for_trial(index, 0.0, high)?;
            run_trial_with(index, config, &mut source)
        }
        Entropy::Os => {
            let mut source = UniformSampler::from_os(0.0, high)?;
            run_trial_with(index, config, &mut source)
        }
    }
}

/// Runs trial `index` drawing from `source`.
///
/// Returns `KernelError::Generation` if the source fails and
/// `KernelError::Allocation` if the sample buffer cannot be allocated; nothing is
/// summarised in either case.
pub fn run_trial_with<U: UniformSource + ?Sized>(
    index: usize,
    config: &TrialConfig,
    source: &mut U,
) -> Result<TrialReport, KernelError> {
    let size = trial_size(config.scale_base, index);
    trace!("trial {}: {} samples, {:?}", index, size, source.bounds());

    let engine = SummaryEngine::new(config.strategy);
    let mut clock = StageClock::new();
    let mut buffer = SampleBuffer::try_zeroed(size)?;

    let fused_sum = match config.fusion {
        Fusion::Fused => {
            clock.begin(Stage::FusedGenerateReduce);
            let (status, sum) = source.fill_fused(&mut buffer);
            clock.end(Stage::FusedGenerateReduce);
            status.check()?;
            Some(sum)
        }
        Fusion::Separate => {
            clock.begin(Stage::Generate);
            let status = source.fill_uniform(&mut buffer);
            clock.end(Stage::Generate);
            status.check()?;
            None
        }
    };

    let mut sorted = (config.quantiles > 0).then(|| buffer.snapshot());

    let summary = match fused_sum {
        Some(sum) => engine.summarize_reduced(&mut buffer, sum, &mut clock),
        None => engine.summarize_with(&mut buffer, &mut clock),
    };

    let quantiles = match sorted.as_mut() {
        Some(samples) => {
            let probs = linspace(0.0, 1.0, config.quantiles);
            clock.begin(Stage::Quantile);
            sort_float_with(samples, config.strategy.sort);
            let values = quantiles_sorted(samples, &probs);
            clock.end(Stage::Quantile);
            let values = values?;
            probs.iter().copied().zip(values.iter().copied()).collect()
        }
        None => Vec::new(),
    };

    debug!("trial {} done: {:?}", index, summary);
    Ok(TrialReport {
        index,
        size,
        fusion: config.fusion,
        timings: clock.finish(),
        summary,
        quantiles,
    })
}

/// Runs trials `0..trials`.
///
/// `Execution::Parallel` runs the trials concurrently on the rayon pool, each with
/// its own buffer and source.
pub fn run_suite(
    config: &TrialConfig,
    trials: usize,
    execution: Execution,
) -> Result<SuiteReport, KernelError> {
    config.validate()?;
    debug!("suite: {} trials, {}, {:?}", trials, execution, config);

    let clock = TickQueue::new();
    clock.tick();
    let outcomes: Vec<Result<TrialReport, TrialFailure>> = match execution {
        Execution::Sequential => (0..trials).map(|n| run_recorded(n, config)).collect(),
        Execution::Parallel => (0..trials)
            .into_par_iter()
            .map(|n| run_recorded(n, config))
            .collect(),
    };
    clock.tick();

    let mut report = SuiteReport {
        trials: Vec::with_capacity(trials),
        failures: Vec::new(),
        compound_size: 0,
        elapsed: clock.span(),
    };
    for outcome in outcomes {
        match outcome {
            Ok(trial) => {
                report.compound_size += trial.size;
                report.trials.push(trial);
            }
            Err(failure) => report.failures.push(failure),
        }
    }
    Ok(report)
}

/// Runs the default number of trials concurrently with `config`.
pub fn run_default_suite(config: &TrialConfig) -> Result<SuiteReport, KernelError> {
    run_suite(config, DEFAULT_TRIALS, Execution::Parallel)
}

fn run_recorded(index: usize, config: &TrialConfig) -> Result<TrialReport, TrialFailure> {
    run_trial(index, config).map_err(|error| {
        warn!("trial {} failed: {}", index, error);
        TrialFailure { index, error }
    })
}
