// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use clap::Parser;

use summary_kernels::config::{DEFAULT_TRIALS, TRIAL_SCALE_BASE};
use summary_kernels::enums::{Entropy, Execution, Fusion, ReduceStrategy};
use summary_kernels::kernels::summary::SummaryStrategy;
use summary_kernels::trial::TrialConfig;

/// Times generation, reduction, sorting and MAD over growing uniform samples
#[derive(Parser, Debug)]
#[command(name = "trial-bench", version, about)]
pub struct TrialArgs {
    /// Number of trials; trial n summarises scale * 2^n samples
    #[arg(long, default_value_t = DEFAULT_TRIALS)]
    pub trials: usize,

    /// Sample count (and upper bound of the sampling range) for trial 0
    #[arg(long, default_value_t = TRIAL_SCALE_BASE)]
    pub scale: f64,

    /// Generation mode: fused (generate and sum in one pass) or separate
    #[arg(long, default_value = "separate")]
    pub fusion: Fusion,

    /// Sum reduction: scalar or chunked
    #[arg(long, default_value = "chunked")]
    pub reduce: ReduceStrategy,

    /// Sort execution: sequential or parallel
    #[arg(long, default_value = "parallel")]
    pub sort: Execution,

    /// Absolute-deviation transform execution: sequential or parallel
    #[arg(long, default_value = "parallel")]
    pub transform: Execution,

    /// Entropy source: seeded (reproducible) or os
    #[arg(long, default_value = "seeded")]
    pub entropy: Entropy,

    /// Number of equidistant quantiles to report per trial (0 disables)
    #[arg(long, default_value_t = 0)]
    pub quantiles: usize,

    /// Run trials one after another instead of concurrently
    #[arg(long)]
    pub serial: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl TrialArgs {
    pub fn trial_config(&self) -> TrialConfig {
        TrialConfig {
            scale_base: self.scale,
            fusion: self.fusion,
            strategy: SummaryStrategy {
                reduce: self.reduce,
                sort: self.sort,
                transform: self.transform,
            },
            entropy: self.entropy,
            quantiles: self.quantiles,
        }
    }

    pub fn execution(&self) -> Execution {
        if self.serial {
            Execution::Sequential
        } else {
            Execution::Parallel
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = TrialArgs::parse_from(["trial-bench"]);
        assert_eq!(args.trials, DEFAULT_TRIALS);
        assert_eq!(args.trial_config(), TrialConfig::default());
        assert_eq!(args.execution(), Execution::Parallel);
    }

    #[test]
    fn test_strategy_flags() {
        let args = TrialArgs::parse_from([
            "trial-bench",
            "--fusion",
            "fused",
            "--reduce",
            "scalar",
            "--sort",
            "sequential",
            "--entropy",
            "os",
            "--quantiles",
            "9",
            "--serial",
        ]);
        let config = args.trial_config();
        assert_eq!(config.fusion, Fusion::Fused);
        assert_eq!(config.strategy.reduce, ReduceStrategy::Scalar);
        assert_eq!(config.strategy.sort, Execution::Sequential);
        assert_eq!(config.strategy.transform, Execution::Parallel);
        assert_eq!(config.entropy, Entropy::Os);
        assert_eq!(config.quantiles, 9);
        assert_eq!(args.execution(), Execution::Sequential);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        assert!(TrialArgs::try_parse_from(["trial-bench", "--reduce", "simd"]).is_err());
    }
}
