// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Summary Statistics Engine** - *Sum, Mean, Median and MAD*
//!
//! Runs the fixed summary pipeline over a sample buffer:
//!
//! 1. reduce the sum with the configured [`ReduceStrategy`]
//! 2. mean from the sum and count
//! 3. sort ascending, take the median
//! 4. rewrite to `|x - median|`, sort ascending, take the median again (MAD)
//!
//! The buffer is reordered and overwritten in the process; the returned
//! [`SummaryResult`] is an independent value.
//!
//! Stage boundaries are reported to a [`StageSink`], which never influences the
//! computation.

use core::fmt;

use log::debug;

use crate::enums::{Execution, ReduceStrategy};
use crate::errors::KernelError;
use crate::kernels::aggregate::{mean, median_sorted, reduce_sum};
use crate::kernels::distributions::GenerationStatus;
use crate::kernels::sort::sort_float_with;
use crate::kernels::unary::abs_deviation_in_place;

/// Summary of one buffer. `sum` and `mean` are `-0.0` when `count == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryResult {
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub mad: f64,
    pub count: usize,
}

/// Strategy for each configurable stage of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryStrategy {
    pub reduce: ReduceStrategy,
    pub sort: Execution,
    pub transform: Execution,
}

impl SummaryStrategy {
    /// Scalar sum with sequential sort and transform.
    pub fn sequential() -> Self {
        SummaryStrategy {
            reduce: ReduceStrategy::Scalar,
            sort: Execution::Sequential,
            transform: Execution::Sequential,
        }
    }
}

impl fmt::Display for SummaryStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "reduce={} sort={} transform={}",
            self.reduce, self.sort, self.transform
        )
    }
}

/// Timed stages of a trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Generate,
    FusedGenerateReduce,
    Reduce,
    Sort,
    Transform,
    SortDeviations,
    Quantile,
}

impl Stage {
    /// Report label.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Generate => "1) for generate",
            Stage::FusedGenerateReduce => "1&2) for generate [fused reduce]",
            Stage::Reduce => "2) for reduce",
            Stage::Sort => "3) sort",
            Stage::Transform => "4) transform",
            Stage::SortDeviations => "5) sort",
            Stage::Quantile => "q) quantile",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Receives stage begin/end notifications.
pub trait StageSink {
    fn begin(&mut self, stage: Stage);
    fn end(&mut self, stage: Stage);
}

/// Sink that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl StageSink for NoopSink {
    #[inline(always)]
    fn begin(&mut self, _stage: Stage) {}
    #[inline(always)]
    fn end(&mut self, _stage: Stage) {}
}

#[inline]
fn timed<S: StageSink + ?Sized, T>(sink: &mut S, stage: Stage, f: impl FnOnce() -> T) -> T {
    sink.begin(stage);
    let out = f();
    sink.end(stage);
    out
}

/// Summary statistics engine bound to a [`SummaryStrategy`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryEngine {
    strategy: SummaryStrategy,
}

impl SummaryEngine {
    pub fn new(strategy: SummaryStrategy) -> Self {
        SummaryEngine { strategy }
    }

    #[inline]
    pub fn strategy(&self) -> SummaryStrategy {
        self.strategy
    }

    /// Sum of `data` with the engine's reduction strategy. Empty input yields `-0.0`.
    #[inline]
    pub fn reduce_sum(&self, data: &[f64]) -> f64 {
        reduce_sum(data, self.strategy.reduce)
    }

    /// Runs the full pipeline. `data` is left holding the sorted absolute deviations.
    pub fn summarize(&self, data: &mut [f64]) -> SummaryResult {
        self.summarize_with(data, &mut NoopSink)
    }

    /// [`summarize`](Self::summarize), reporting each stage to `sink`.
    pub fn summarize_with<S: StageSink + ?Sized>(&self, data: &mut [f64], sink: &mut S) -> SummaryResult {
        let sum = timed(sink, Stage::Reduce, || self.reduce_sum(data));
        self.summarize_reduced(data, sum, sink)
    }

    /// Completes the pipeline for a buffer whose sum is already known, as produced
    /// by fused generation.
    pub fn summarize_reduced<S: StageSink + ?Sized>(
        &self,
        data: &mut [f64],
        sum: f64,
        sink: &mut S,
    ) -> SummaryResult {
        let count = data.len();
        debug!("summarize: {} elements, {}", count, self.strategy);
        let mean = mean(sum, count);

        timed(sink, Stage::Sort, || sort_float_with(data, self.strategy.sort));
        let median = median_sorted(data);

        timed(sink, Stage::Transform, || {
            abs_deviation_in_place(data, median, self.strategy.transform)
        });
        timed(sink, Stage::SortDeviations, || {
            sort_float_with(data, self.strategy.sort)
        });
        let mad = median_sorted(data);

        SummaryResult {
            sum,
            mean,
            median,
            mad,
            count,
        }
    }

    /// Summarises `data` only if its generation succeeded.
    pub fn summarize_checked(
        &self,
        data: &mut [f64],
        status: &GenerationStatus,
    ) -> Result<SummaryResult, KernelError> {
        status.check()?;
        Ok(self.summarize(data))
    }
}

/// Summarises `data` with the default strategy.
pub fn summarize(data: &mut [f64]) -> SummaryResult {
    SummaryEngine::default().summarize(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::SampleBuffer;
    use crate::utils::is_negative_zero;

    fn all_strategies() -> Vec<SummaryStrategy> {
        let mut out = Vec::new();
        for reduce in [ReduceStrategy::Scalar, ReduceStrategy::Chunked] {
            for sort in [Execution::Sequential, Execution::Parallel] {
                for transform in [Execution::Sequential, Execution::Parallel] {
                    out.push(SummaryStrategy {
                        reduce,
                        sort,
                        transform,
                    });
                }
            }
        }
        out
    }

    #[test]
    fn test_empty_buffer_sentinels() {
        for s in all_strategies() {
            let mut buf = SampleBuffer::zeroed(0);
            let r = SummaryEngine::new(s).summarize(&mut buf);
            assert_eq!(r.count, 0);
            assert!(is_negative_zero(r.sum));
            assert!(is_negative_zero(r.mean));
            assert!(is_negative_zero(r.median));
            assert!(is_negative_zero(r.mad));
        }
    }

    #[test]
    fn test_single_value() {
        let mut buf = SampleBuffer::from_slice(&[5.0]);
        let r = summarize(&mut buf);
        assert_eq!((r.sum, r.mean, r.median, r.mad, r.count), (5.0, 5.0, 5.0, 0.0, 1));
        assert!(r.mad.is_sign_positive());
    }

    #[test]
    fn test_four_values() {
        for s in all_strategies() {
            let mut buf = SampleBuffer::from_slice(&[4.0, 1.0, 3.0, 2.0]);
            let r = SummaryEngine::new(s).summarize(&mut buf);
            assert_eq!(r.sum, 10.0);
            assert_eq!(r.mean, 2.5);
            assert_eq!(r.median, 2.5);
            assert_eq!(r.mad, 1.0);
            assert_eq!(r.count, 4);
        }
    }

    #[test]
    fn test_three_values() {
        let mut buf = SampleBuffer::from_slice(&[3.0, 1.0, 2.0]);
        let r = summarize(&mut buf);
        assert_eq!(r.median, 2.0);
        assert_eq!(r.mad, 1.0);
    }

    #[test]
    fn test_buffer_left_with_sorted_deviations() {
        let mut buf = SampleBuffer::from_slice(&[10.0, 1.0, 2.0, 3.0, 4.0]);
        let r = summarize(&mut buf);
        assert_eq!(r.median, 3.0);
        assert_eq!(buf.as_slice(), &[0.0, 1.0, 1.0, 2.0, 7.0]);
        assert_eq!(r.mad, 1.0);
    }

    #[test]
    fn test_result_independent_of_buffer() {
        let mut buf = SampleBuffer::from_slice(&[1.0, 2.0]);
        let r = summarize(&mut buf);
        buf.as_mut_slice().fill(100.0);
        assert_eq!(r.median, 1.5);
    }

    struct Recorder(Vec<(bool, Stage)>);

    impl StageSink for Recorder {
        fn begin(&mut self, stage: Stage) {
            self.0.push((true, stage));
        }
        fn end(&mut self, stage: Stage) {
            self.0.push((false, stage));
        }
    }

    #[test]
    fn test_sink_sees_stages_in_order() {
        let mut rec = Recorder(Vec::new());
        let mut buf = SampleBuffer::from_slice(&[1.0, 2.0, 3.0]);
        SummaryEngine::default().summarize_with(&mut buf, &mut rec);
        let begins: Vec<Stage> = rec.0.iter().filter(|(b, _)| *b).map(|(_, s)| *s).collect();
        assert_eq!(
            begins,
            vec![Stage::Reduce, Stage::Sort, Stage::Transform, Stage::SortDeviations]
        );
        assert_eq!(rec.0.len(), 8);
    }

    #[test]
    fn test_summarize_reduced_skips_reduce_stage() {
        let mut rec = Recorder(Vec::new());
        let mut buf = SampleBuffer::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let r = SummaryEngine::default().summarize_reduced(&mut buf, 10.0, &mut rec);
        assert_eq!(r.mean, 2.5);
        assert!(rec.0.iter().all(|(_, s)| *s != Stage::Reduce));
    }

    #[test]
    fn test_summarize_checked_refuses_failed_generation() {
        let mut buf = SampleBuffer::from_slice(&[1.0]);
        let engine = SummaryEngine::default();
        let failed = GenerationStatus::Failed("os entropy unavailable".into());
        assert!(matches!(
            engine.summarize_checked(&mut buf, &failed),
            Err(KernelError::Generation(_))
        ));
        assert_eq!(buf[0], 1.0);
        let r = engine.summarize_checked(&mut buf, &GenerationStatus::Ok).unwrap();
        assert_eq!(r.sum, 1.0);
    }

    #[test]
    fn test_nan_and_inf_are_not_filtered() {
        let mut buf = SampleBuffer::from_slice(&[1.0, f64::INFINITY, 2.0]);
        let r = summarize(&mut buf);
        assert_eq!(r.sum, f64::INFINITY);
        assert_eq!(r.median, 2.0);

        let mut buf = SampleBuffer::from_slice(&[f64::NAN, 1.0]);
        let r = summarize(&mut buf);
        assert!(r.sum.is_nan());
        assert!(r.median.is_nan());
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(Stage::FusedGenerateReduce.to_string(), "1&2) for generate [fused reduce]");
        assert_eq!(Stage::SortDeviations.label(), "5) sort");
    }
}
