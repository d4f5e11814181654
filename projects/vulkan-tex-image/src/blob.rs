//! Aligned byte buffer for serialized file data.

use crate::allocate::AlignedBuffer;
use crate::error::{TexError, TexResult};

/// An owned, 16-byte aligned byte buffer used as a sink or source for
/// serialized container data.
///
/// Move-only: the backing allocation has a single owner and is released when
/// the blob drops or is re-initialized.
#[derive(Debug, Default)]
pub struct Blob {
    buffer: Option<AlignedBuffer>,
    size: usize,
}

impl Blob {
    /// An empty blob with no allocation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a buffer of `size` bytes, rounded up to the alignment.
    ///
    /// The reported size is the rounded value.
    pub fn initialize(size: usize) -> TexResult<Self> {
        if size == 0 {
            return Err(TexError::InvalidSize);
        }

        let buffer = AlignedBuffer::zeroed(size)?;
        let size = buffer.len();
        Ok(Self {
            buffer: Some(buffer),
            size,
        })
    }

    /// Releases the buffer and returns to the empty state.
    pub fn release(&mut self) {
        self.buffer = None;
        self.size = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        match &self.buffer {
            Some(buffer) => &buffer.as_slice()[..self.size],
            None => &[],
        }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match &mut self.buffer {
            Some(buffer) => &mut buffer.as_mut_slice()[..self.size],
            None => &mut [],
        }
    }

    /// Reallocates to `size` bytes, preserving `min(old, new)` bytes.
    pub fn resize(&mut self, size: usize) -> TexResult<()> {
        if size == 0 {
            return Err(TexError::InvalidSize);
        }
        if self.buffer.is_none() || self.size == 0 {
            return Err(TexError::Empty);
        }

        let mut buffer = AlignedBuffer::zeroed(size)?;
        let keep = self.size.min(buffer.len());
        buffer.as_mut_slice()[..keep].copy_from_slice(&self.as_slice()[..keep]);

        self.size = buffer.len();
        self.buffer = Some(buffer);
        Ok(())
    }

    /// Shortens the reported length without reallocating.
    pub fn trim(&mut self, size: usize) -> TexResult<()> {
        if size == 0 {
            return Err(TexError::InvalidSize);
        }
        if self.buffer.is_none() {
            return Err(TexError::Empty);
        }
        if size > self.size {
            return Err(TexError::InvalidSize);
        }

        self.size = size;
        Ok(())
    }
}
