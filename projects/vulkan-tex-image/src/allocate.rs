//! Aligned buffer allocation.
//!
//! Pixel buffers and serialized blobs are 16-byte aligned because some
//! downstream consumers use aligned loads over them. Requested sizes are
//! rounded up to the next alignment multiple and the rounded size is the
//! size the buffer reports.

use core::alloc::{Layout, LayoutError};
use safe_allocator_api::allocator_api::AllocError;
use safe_allocator_api::RawAlloc;
use thiserror::Error;

/// Alignment of every pixel and blob allocation, in bytes.
pub const BUFFER_ALIGNMENT: usize = 16;

/// An error that happened in memory allocation within the library.
#[derive(Debug, Error)]
pub enum AllocateError {
    #[error("invalid layout, likely a byte count larger than isize::MAX: {0}")]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    AllocationFailed(#[from] AllocError),
}

/// Allocates `num_bytes` (rounded up to the alignment) with 16-byte alignment.
pub fn allocate_align_16(num_bytes: usize) -> Result<RawAlloc, AllocateError> {
    let padded = round_up(num_bytes);
    let layout = Layout::from_size_align(padded, BUFFER_ALIGNMENT)?;
    Ok(RawAlloc::new(layout)?)
}

#[inline]
pub(crate) const fn round_up(num_bytes: usize) -> usize {
    let remainder = num_bytes % BUFFER_ALIGNMENT;
    if remainder != 0 {
        num_bytes + (BUFFER_ALIGNMENT - remainder)
    } else {
        num_bytes
    }
}

/// An owned, 16-byte aligned, fixed-size byte buffer.
///
/// Move-only by construction; the backing allocation is released on drop.
pub struct AlignedBuffer {
    alloc: RawAlloc,
    len: usize,
}

impl AlignedBuffer {
    /// Allocates a zero-initialized buffer of at least `num_bytes` bytes.
    ///
    /// The actual (and reported) length is `num_bytes` rounded up to the
    /// buffer alignment.
    pub fn zeroed(num_bytes: usize) -> Result<Self, AllocateError> {
        let len = round_up(num_bytes);
        let mut alloc = allocate_align_16(len)?;
        // RawAlloc hands back uninitialized memory.
        unsafe { core::ptr::write_bytes(alloc.as_mut_ptr(), 0, len) };
        Ok(Self { alloc, len })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        // SAFETY: the allocation is live for `len` bytes and only reachable
        // through this owner.
        unsafe { core::slice::from_raw_parts(self.alloc.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        // SAFETY: as above, with exclusive access through &mut self.
        unsafe { core::slice::from_raw_parts_mut(self.alloc.as_mut_ptr(), self.len) }
    }
}

impl core::fmt::Debug for AlignedBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AlignedBuffer").field("len", &self.len).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_round_up_to_the_alignment() {
        assert_eq!(round_up(0), 0);
        assert_eq!(round_up(1), 16);
        assert_eq!(round_up(16), 16);
        assert_eq!(round_up(17), 32);
    }

    #[test]
    fn buffers_are_aligned_and_zeroed() {
        let buf = AlignedBuffer::zeroed(100).unwrap();
        assert_eq!(buf.len(), 112);
        assert_eq!(buf.as_slice().as_ptr() as usize % BUFFER_ALIGNMENT, 0);
        assert!(buf.as_slice().iter().all(|&b| b == 0));
    }
}
