//! Error types for container and layout operations.

use crate::allocate::AllocateError;
use thiserror::Error;
use vulkan_tex_format::{Format, FormatError};

/// Result type for container and layout operations.
pub type TexResult<T> = Result<T, TexError>;

/// Errors produced by the layout engine, containers, and scanline primitives.
#[derive(Debug, Error)]
pub enum TexError {
    /// The texture description violates a dimension invariant (zero extents,
    /// non-unit depth on 2D, arrays of volumes, cubemap array size not a
    /// multiple of 6, palettized canonical format, …).
    #[error("invalid texture description: {0}")]
    InvalidMetadata(&'static str),

    /// Pitch or mip-chain computation failed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Aligned allocation failed.
    #[error(transparent)]
    Allocate(#[from] AllocateError),

    /// The subresource table would run past the end of the pixel buffer.
    #[error("subresources need {required} bytes but the buffer holds {actual}")]
    BufferTooSmall { required: usize, actual: usize },

    /// A scanline transform has no implementation for this format pair.
    #[error("no scanline expansion from {from:?} to {to:?}")]
    UnsupportedConversion { from: Format, to: Format },

    /// Caller passed images that disagree on format or extents.
    #[error("all images must share one format, width, and height")]
    MismatchedImages,

    /// An operation on an empty container.
    #[error("container holds no pixel data")]
    Empty,

    /// Blob resize/trim argument out of range.
    #[error("invalid buffer size request")]
    InvalidSize,
}
