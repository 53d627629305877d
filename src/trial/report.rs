// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Trial Reports** - *Plain-Text Rendering*
//!
//! Fixed-column text output for trial and suite reports. Labels are left-aligned
//! to [`LABEL_WIDTH`] columns.

use core::fmt;

use crate::errors::KernelError;
use crate::kernels::summary::Stage;
use crate::trial::driver::{SuiteReport, TrialFailure, TrialReport};

/// Column at which values start.
pub const LABEL_WIDTH: usize = 38;

fn line(f: &mut fmt::Formatter<'_>, label: &str, value: fmt::Arguments<'_>) -> fmt::Result {
    writeln!(f, "{:<width$}{}", label, value, width = LABEL_WIDTH)
}

impl fmt::Display for TrialReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        line(
            f,
            &format!("{}) trial size:", self.index),
            format_args!("{} doubles", self.size),
        )?;
        for (stage, secs) in &self.timings {
            if *stage == Stage::Quantile {
                continue;
            }
            line(f, stage.label(), format_args!("{:.6}s", secs))?;
        }

        let s = &self.summary;
        line(f, "1) sum: sum(v)", format_args!("{:.23e}", s.sum))?;
        line(f, "2) mean: sum/size(v)", format_args!("{:.17e}", s.mean))?;
        line(f, "3) median: sort(v)[med]", format_args!("{:.17e}", s.median))?;
        line(f, "4) mad: sort(v-median)[med]", format_args!("{:.17e}", s.mad))?;

        if !self.quantiles.is_empty() {
            if let Some((_, secs)) = self.timings.iter().find(|(s, _)| *s == Stage::Quantile) {
                line(f, Stage::Quantile.label(), format_args!("{:.6}s", secs))?;
            }
            for (p, q) in &self.quantiles {
                line(f, &format!("q) quantile({:.4}):", p), format_args!("{:.17e}", q))?;
            }
        }

        line(f, "a) Machine epsilon (f):", format_args!("{:e}", f32::EPSILON))?;
        line(f, "b) Machine epsilon (ff):", format_args!("{:e}", f64::EPSILON))?;
        line(f, "c) Loop fusion:", format_args!("{}", self.fusion))?;
        writeln!(f)
    }
}

impl fmt::Display for TrialFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            KernelError::Generation(reason) => {
                writeln!(f, "APP FAILED: status rng: {} | trial: {}", reason, self.index)
            }
            other => writeln!(f, "APP FAILED: trial {}: {}", self.index, other),
        }
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for trial in &self.trials {
            write!(f, "{}", trial)?;
        }
        for failure in &self.failures {
            write!(f, "{}", failure)?;
        }
        line(f, "a) trial failures:", format_args!("{}", self.failures.len()))?;
        line(f, "b) compound test size:", format_args!("{}", self.compound_size))?;
        line(f, "c) compound test time:", format_args!("{:.6}s", self.elapsed))
    }
}
