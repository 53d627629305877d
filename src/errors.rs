// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Kernel and Trial Error Handling*
//!
//! The numeric pipeline itself never fails on well-formed input. Errors arise at
//! its boundaries: invalid sampling parameters, a random source that reports a
//! failure, mismatched buffers, oversized allocations and trial orchestration.

use core::fmt;
use std::error::Error;

/// Error type for kernel and trial operations.
///
/// Each variant carries a contextual message.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Invalid arguments provided to a kernel or sampler.
    InvalidArguments(String),

    /// The random source reported a failure status; the buffer is not usable.
    Generation(String),

    /// Buffer length mismatch between operands.
    LengthMismatch(String),

    /// A sample buffer of the requested length could not be allocated.
    Allocation(String),

    /// A trial could not be run or joined.
    Trial(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
            KernelError::Generation(msg) => write!(f, "Generation failed: {}", msg),
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::Allocation(msg) => write!(f, "Allocation failed: {}", msg),
            KernelError::Trial(msg) => write!(f, "Trial error: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for length mismatches between left-hand side (LHS)
/// and right-hand side (RHS) buffers.
pub fn log_length_mismatch(fname: &str, lhs: usize, rhs: usize) -> String {
    format!("{} => Length mismatch: LHS {} RHS {}", fname, lhs, rhs)
}
