// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Sample Buffer** - *Owned, Aligned Sample Storage*
//!
//! A fixed-length, 64-byte aligned container of `f64` samples. Kernels borrow it as a
//! slice; they may reorder or transform the contents but never resize it.

use core::fmt;
use core::ops::{Deref, DerefMut, Range};

use minarrow::Vec64;

use crate::errors::KernelError;
use crate::utils::chunk_split;

/// Contiguous `f64` samples backed by a 64-byte aligned [`Vec64`].
///
/// The length is fixed at construction.
pub struct SampleBuffer {
    data: Vec64<f64>,
}

impl fmt::Debug for SampleBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SampleBuffer").field("len", &self.len()).finish()
    }
}

impl SampleBuffer {
    /// Allocates `len` zero-initialised samples.
    pub fn zeroed(len: usize) -> Self {
        let mut data = Vec64::with_capacity(len);
        data.resize(len, 0.0);
        SampleBuffer { data }
    }

    /// Allocates `len` zero-initialised samples, or returns `KernelError::Allocation`
    /// if the length overflows the address space or the allocator refuses it.
    pub fn try_zeroed(len: usize) -> Result<Self, KernelError> {
        if len > isize::MAX as usize / size_of::<f64>() {
            return Err(KernelError::Allocation(format!(
                "{} samples exceed the addressable size",
                len
            )));
        }
        let mut data = Vec64::with_capacity(0);
        data.try_reserve_exact(len)
            .map_err(|e| KernelError::Allocation(format!("{} samples: {}", len, e)))?;
        data.resize(len, 0.0);
        Ok(SampleBuffer { data })
    }

    /// Copies `values` into a new aligned buffer.
    pub fn from_slice(values: &[f64]) -> Self {
        SampleBuffer {
            data: Vec64::from_slice(values),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data[..]
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data[..]
    }

    /// Whole-chunk body and remainder tail for chunk width `width`.
    #[inline]
    pub fn chunk_bounds(&self, width: usize) -> (Range<usize>, Range<usize>) {
        chunk_split(self.len(), width)
    }

    /// Aligned copy of the current contents.
    pub fn snapshot(&self) -> SampleBuffer {
        SampleBuffer::from_slice(self.as_slice())
    }
}

impl Deref for SampleBuffer {
    type Target = [f64];

    #[inline]
    fn deref(&self) -> &[f64] {
        self.as_slice()
    }
}

impl DerefMut for SampleBuffer {
    #[inline]
    fn deref_mut(&mut self) -> &mut [f64] {
        self.as_mut_slice()
    }
}
