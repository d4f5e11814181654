//! Error types for the TGA codec.

use thiserror::Error;
use vulkan_tex_format::FormatError;
use vulkan_tex_image::TexError;

/// Result type for TGA operations.
pub type TgaResult<T> = Result<T, TgaError>;

/// Errors produced while reading or writing TGA containers.
#[derive(Debug, Error)]
pub enum TgaError {
    /// Zero extents, zero bit depth, or inconsistent header fields.
    #[error("malformed TGA header: {0}")]
    MalformedHeader(&'static str),

    /// A valid header describes a pixel layout this library does not read
    /// (interleaved images, colormap RLE, unusual bit depths).
    #[error("unsupported TGA configuration: {0}")]
    UnsupportedConfiguration(&'static str),

    /// The input ended before the structure or payload being read.
    #[error("input too short: need {required} bytes, have {actual}")]
    InputTooShort { required: usize, actual: usize },

    /// An RLE packet ran past the end of the input or of its row.
    #[error("RLE data overruns the image bounds")]
    RleOverrun,

    /// The image is too large for a TGA container.
    #[error("extent {0} exceeds the 16-bit TGA limit")]
    ExtentTooLarge(usize),

    /// Writer options that need a texture description were used without one.
    #[error("gamma overrides require a texture description")]
    MissingMetadata,

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
