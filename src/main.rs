// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

mod cli;

use clap::Parser;
use log::{LevelFilter, error, info};

use cli::TrialArgs;
use summary_kernels::errors::KernelError;
use summary_kernels::trial::run_suite;

fn main() {
    let args = TrialArgs::parse();

    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(&args) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &TrialArgs) -> Result<(), KernelError> {
    let config = args.trial_config();
    info!(
        "running {} trials ({}), scale {}, {:?}",
        args.trials,
        args.execution(),
        args.scale,
        config
    );

    let suite = run_suite(&config, args.trials, args.execution())?;
    print!("{}", suite);

    if !suite.is_success() {
        return Err(KernelError::Trial(format!(
            "{} of {} trials failed",
            suite.failures.len(),
            args.trials
        )));
    }
    Ok(())
}
