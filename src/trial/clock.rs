// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Stage Clock** - *Tick Queue and Stage Timing Sink*
//!
//! [`TickQueue`] is a concurrent FIFO of instants: every span is a pair of pushes,
//! read back with [`TickQueue::span`]. Any clone may push; spans are read by a
//! single consumer. [`StageClock`] drives it from the summary
//! engine's stage notifications.

use std::time::Instant;

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::trace;

use crate::kernels::summary::{Stage, StageSink};

/// Unbounded multi-producer, single-consumer queue of timestamps.
///
/// Clones share one channel. Only one holder should call [`TickQueue::span`];
/// two concurrent consumers can split a pair.
#[derive(Debug, Clone)]
pub struct TickQueue {
    tx: Sender<Instant>,
    rx: Receiver<Instant>,
}

impl Default for TickQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl TickQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        TickQueue { tx, rx }
    }

    /// Pushes the current instant.
    #[inline]
    pub fn tick(&self) {
        // Both ends live in `self`, so the channel cannot be disconnected here.
        let _ = self.tx.send(Instant::now());
    }

    /// Number of queued ticks.
    #[inline]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Pops two ticks and returns the seconds between them.
    ///
    /// Returns `-0.0` and leaves the queue untouched if fewer than two ticks are
    /// queued.
    pub fn span(&self) -> f64 {
        if self.rx.len() < 2 {
            return -0.0;
        }
        match (self.rx.try_recv(), self.rx.try_recv()) {
            (Ok(start), Ok(end)) => end.saturating_duration_since(start).as_secs_f64(),
            _ => -0.0,
        }
    }
}

/// [`StageSink`] recording wall-clock seconds per stage, in stage order.
#[derive(Debug, Default)]
pub struct StageClock {
    ticks: TickQueue,
    order: Vec<Stage>,
}

impl StageClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drains the recorded spans as `(stage, seconds)` pairs.
    pub fn finish(self) -> Vec<(Stage, f64)> {
        self.order
            .into_iter()
            .map(|stage| (stage, self.ticks.span()))
            .collect()
    }
}

impl StageSink for StageClock {
    fn begin(&mut self, stage: Stage) {
        trace!("stage begin: {}", stage);
        self.order.push(stage);
        self.ticks.tick();
    }

    fn end(&mut self, stage: Stage) {
        self.ticks.tick();
        trace!("stage end: {}", stage);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::utils::is_negative_zero;

    #[test]
    fn test_span_requires_two_ticks() {
        let q = TickQueue::new();
        assert!(is_negative_zero(q.span()));
        q.tick();
        assert!(is_negative_zero(q.span()));
        assert_eq!(q.len(), 1);
        q.tick();
        assert!(q.span() >= 0.0);
        assert!(q.is_empty());
    }

    #[test]
    fn test_lone_tick_keeps_its_place() {
        let q = TickQueue::new();
        q.tick();
        thread::sleep(Duration::from_millis(10));
        q.tick();
        q.tick();
        let first = q.span();
        assert!(first >= 0.010);
        assert_eq!(q.len(), 1);
        assert!(is_negative_zero(q.span()));
        assert_eq!(q.len(), 1);
        thread::sleep(Duration::from_millis(10));
        q.tick();
        assert!(q.span() >= 0.010);
        assert!(q.is_empty());
    }

    #[test]
    fn test_span_measures_elapsed() {
        let q = TickQueue::new();
        q.tick();
        thread::sleep(Duration::from_millis(5));
        q.tick();
        assert!(q.span() >= 0.005);
    }

    #[test]
    fn test_ticks_from_other_threads() {
        let q = TickQueue::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let q = q.clone();
                thread::spawn(move || q.tick())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(q.len(), 4);
    }

    #[test]
    fn test_stage_clock_orders_stages() {
        let mut clock = StageClock::new();
        for stage in [Stage::Generate, Stage::Reduce, Stage::Sort] {
            clock.begin(stage);
            clock.end(stage);
        }
        let spans = clock.finish();
        let stages: Vec<Stage> = spans.iter().map(|(s, _)| *s).collect();
        assert_eq!(stages, vec![Stage::Generate, Stage::Reduce, Stage::Sort]);
        assert!(spans.iter().all(|(_, t)| *t >= 0.0));
    }
}
