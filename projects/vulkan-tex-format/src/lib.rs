//! Format taxonomy and layout math for Vulkan-format texture containers.
//!
//! This crate answers classification queries over [`Format`] (compressed,
//! packed, planar, sRGB, …) and computes the byte layout of a subresource:
//! row pitch, slice pitch, scanline count, and mip-chain length. It carries
//! no pixel data of its own; the container and codec crates build on it.
//!
//! All classification sets are closed enumerations. Load/save dispatch in the
//! codec crates depends on exact membership, so the sets must not be
//! "improved" by adding formats that look similar.

pub mod classify;
pub mod error;
pub mod flags;
pub mod mips;
pub mod pitch;
pub mod srgb;

/// The format code space used throughout the workspace.
pub use ash::vk::Format;

pub use classify::{
    bits_per_color, bits_per_pixel, bytes_per_block, has_alpha, is_bgr, is_compressed,
    is_depth_stencil, is_packed, is_palettized, is_planar, is_srgb, is_valid, is_video,
};
pub use error::{FormatError, FormatResult};
pub use flags::CpFlags;
pub use mips::{calculate_mip_levels, calculate_mip_levels_3d, count_mips, count_mips_3d};
pub use pitch::{compute_pitch, compute_scanlines, Pitch};
pub use srgb::make_srgb;
