//! DDS container codec.
//!
//! Reads and writes DirectDraw Surface files, covering both the legacy DX9
//! header vocabulary (fourCC codes and channel-mask descriptors, including
//! the common writer quirks) and the modern `DX10` extension header. Legacy
//! pixel layouts that no longer exist as first-class formats are expanded to
//! their modern equivalents at load time; everything else is carried
//! bit-for-bit.
//!
//! Decoded textures land in a
//! [`ScratchImage`](vulkan_tex_image::ScratchImage); the header's identity
//! round-trips through [`TexMetadata`](vulkan_tex_image::TexMetadata).

pub mod constants;
mod convert;
pub mod dxgi;
pub mod error;
pub mod flags;
pub mod header;
mod legacy;
pub mod load;
pub mod save;

#[cfg(feature = "file-io")]
pub mod file_io;

#[cfg(test)]
pub(crate) mod test_prelude;

pub use constants::DdsPixelFormat;
pub use error::{DdsError, DdsResult};
pub use flags::DdsFlags;
pub use header::{decode_dds_header, encode_dds_header, DecodedDdsHeader};
pub use load::{dds_metadata_from_memory, dds_metadata_from_memory_ex, load_from_dds_memory,
    load_from_dds_memory_ex};
pub use save::{save_to_dds_memory, save_to_dds_memory_single};

#[cfg(feature = "file-io")]
pub use file_io::{dds_metadata_from_file, dds_metadata_from_file_ex, load_from_dds_file,
    load_from_dds_file_ex, save_to_dds_file, save_to_dds_file_single};
