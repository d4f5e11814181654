//! Truevision TARGA container codec.
//!
//! Reads TGA 1.0 and 2.0 files: paletted, truecolor, and grayscale images,
//! with or without RLE compression, honoring the X/Y inversion bits and the
//! 2.0 footer/extension area (gamma-based sRGB detection and the alpha-mode
//! attribute). Writes top-down truecolor/grayscale files with an optional
//! 2.0 extension area and footer.
//!
//! Decoded images land in a
//! [`ScratchImage`](vulkan_tex_image::ScratchImage) as a single 2D
//! subresource; TGA has no concept of arrays, volumes, or mip chains.

pub mod clock;
mod decode;
mod encode;
pub mod error;
pub mod extension;
pub mod flags;
pub mod header;

#[cfg(feature = "file-io")]
pub mod file_io;

pub use clock::{FixedClock, SystemClock, TgaClock, TgaTimestamp};
pub use decode::{load_from_tga_memory, tga_metadata_from_memory};
pub use encode::{save_to_tga_memory, save_to_tga_memory_with_clock};
pub use error::{TgaError, TgaResult};
pub use extension::TgaExtension;
pub use flags::TgaFlags;

#[cfg(feature = "file-io")]
pub use file_io::{load_from_tga_file, save_to_tga_file, save_to_tga_file_with_clock,
    tga_metadata_from_file};
