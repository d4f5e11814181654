//! Error types for the DDS codec.

use thiserror::Error;
use vulkan_tex_format::FormatError;
use vulkan_tex_image::TexError;

/// Result type for DDS operations.
pub type DdsResult<T> = Result<T, DdsError>;

/// Errors produced while reading or writing DDS containers.
#[derive(Debug, Error)]
pub enum DdsError {
    /// Input does not start with the 'DDS ' magic value.
    #[error("not a DDS file (bad magic value)")]
    BadMagic,

    /// Header or pixel-format structure sizes do not match the format.
    #[error("malformed DDS header: {0}")]
    MalformedHeader(&'static str),

    /// The input ended before the structure or payload being read.
    #[error("input too short: need {required} bytes, have {actual}")]
    InputTooShort { required: usize, actual: usize },

    /// No known format matches the legacy pixel-format descriptor, or the
    /// DX10 format code is unknown or unusable.
    #[error("unsupported or unrecognized pixel format")]
    UnsupportedFormat,

    /// The texture layout cannot be expressed (legacy header limits,
    /// dimensions past hardware requirements, …).
    #[error("unsupported DDS configuration: {0}")]
    UnsupportedConfiguration(&'static str),

    /// The destination buffer cannot hold the encoded header.
    #[error("output buffer too small: required {required} bytes, got {actual}")]
    OutputBufferTooSmall { required: usize, actual: usize },

    /// Pitch or layout math failed.
    #[error(transparent)]
    Format(#[from] FormatError),

    /// Container allocation or scanline transform failed.
    #[error(transparent)]
    Tex(#[from] TexError),

    /// File I/O failed.
    #[cfg(feature = "file-io")]
    #[error("I/O operation failed: {0}")]
    Io(#[from] crate::file_io::FileIoError),
}
