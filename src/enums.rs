// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Strategy Enums** - *Explicit Pipeline Choices*
//!
//! Each stage of the summary pipeline takes its strategy as a value resolved at the
//! call site. All enums parse from their lowercase names so they can be taken
//! straight from the command line.

use core::fmt;
use core::str::FromStr;

use crate::errors::KernelError;

/// Reduction strategy for the sum stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ReduceStrategy {
    /// Sequential accumulation in buffer order.
    Scalar,
    /// `W64` independent lane sums over whole chunks, folded, then the tail.
    #[default]
    Chunked,
}

/// Sequential or data-parallel execution of an element-wise or sort stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Execution {
    Sequential,
    /// rayon-backed; joins before returning.
    #[default]
    Parallel,
}

/// Whether generation and the sum run as one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Fusion {
    /// Draw scalar values and accumulate the sum in the same loop.
    Fused,
    /// Block-fill the buffer, then reduce with the configured [`ReduceStrategy`].
    #[default]
    Separate,
}

/// Entropy source backing the uniform sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Entropy {
    /// Deterministic `StdRng` seeded from the trial index.
    #[default]
    Seeded,
    /// Operating-system entropy; the only source that can fail at run time.
    Os,
}

macro_rules! impl_name_parsing {
    ($ty:ident, $label:expr, { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Lowercase name, as accepted by `from_str`.
            pub fn name(&self) -> &'static str {
                match self {
                    $($ty::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        }

        impl FromStr for $ty {
            type Err = KernelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($name => Ok($ty::$variant),)+
                    other => Err(KernelError::InvalidArguments(format!(
                        "unknown {} '{}' (expected one of: {})",
                        $label,
                        other,
                        [$($name),+].join(", ")
                    ))),
                }
            }
        }
    };
}

impl_name_parsing!(ReduceStrategy, "reduce strategy", {
    Scalar => "scalar",
    Chunked => "chunked",
});

impl_name_parsing!(Execution, "execution mode", {
    Sequential => "sequential",
    Parallel => "parallel",
});

impl_name_parsing!(Fusion, "fusion mode", {
    Fused => "fused",
    Separate => "separate",
});

impl_name_parsing!(Entropy, "entropy source", {
    Seeded => "seeded",
    Os => "os",
});
