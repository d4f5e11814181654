//! Owned texture containers and the subresource layout engine.
//!
//! [`TexMetadata`] is the canonical identity of a texture (extents, array
//! size, mip count, format, dimension). [`ScratchImage`] owns a 16-byte
//! aligned pixel buffer holding every `(mip, item, slice)` subresource in a
//! fixed traversal order, addressable through borrowed [`ImageView`]s.
//! [`Blob`] is the aligned byte sink the codecs serialize into.
//!
//! The traversal order is normative: items outer / mips inner for 1D and 2D
//! textures, mips outer / slices inner (slices of one mip contiguous) for
//! volumes. Subresource indices, on-disk payload order, and buffer order all
//! agree on it.

pub mod allocate;
pub mod blob;
pub mod error;
pub mod image;
pub mod layout;
pub mod metadata;
pub mod scanline;
pub mod scratch;

pub use vulkan_tex_format::{CpFlags, Format};

pub use allocate::{allocate_align_16, AlignedBuffer, AllocateError};
pub use blob::Blob;
pub use error::{TexError, TexResult};
pub use image::{ImageDesc, ImageView, ImageViewMut};
pub use layout::{determine_image_array, setup_image_array};
pub use metadata::{AlphaMode, TexDimension, TexMetadata, TexMiscFlags};
pub use scanline::{
    copy_scanline, expand_scanline, set_alpha_scanline, swizzle_scanline,
    swizzle_scanline_in_place, ScanlineFlags,
};
pub use scratch::ScratchImage;
