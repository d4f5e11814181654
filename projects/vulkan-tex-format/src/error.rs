//! Error types for format and layout queries.

use crate::Format;
use thiserror::Error;

/// Result type for format and layout operations.
pub type FormatResult<T> = Result<T, FormatError>;

/// Errors produced by pitch, scanline, and mip-chain computations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The format has no defined byte layout (undefined, or a format with no
    /// known bits-per-pixel).
    #[error("format {0:?} has no computable pitch")]
    UnsupportedFormat(Format),

    /// Planar 4:2:0 formats require an even height.
    #[error("planar 4:2:0 format requires an even height, got {0}")]
    OddPlanarHeight(usize),

    /// A row or slice pitch exceeded the 32-bit addressing ceiling.
    #[error("row or slice pitch exceeds the 4 GiB limit")]
    ArithmeticOverflow,

    /// A caller-requested mip count is longer than the full chain.
    #[error("mip count {requested} exceeds the full chain of {max}")]
    MipLevelsOutOfRange { requested: usize, max: usize },
}
