// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Trials** - *Timed Benchmark Runs of the Summary Pipeline*

pub mod clock;
pub mod driver;
pub mod report;

pub use clock::{StageClock, TickQueue};
pub use driver::{
    SuiteReport, TrialConfig, TrialFailure, TrialReport, run_default_suite, run_suite, run_trial,
    run_trial_with, trial_size,
};
