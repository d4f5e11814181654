//! sRGB promotion.

use crate::Format;

/// Maps a UNORM format to its sRGB sibling, if one exists.
///
/// Formats without an sRGB variant are returned unchanged, which lets
/// callers apply file metadata (NVTT signatures, TGA 2.0 gamma) without
/// special-casing.
pub fn make_srgb(fmt: Format) -> Format {
    match fmt {
        Format::R8G8B8A8_UNORM => Format::R8G8B8A8_SRGB,
        Format::BC1_RGB_UNORM_BLOCK => Format::BC1_RGB_SRGB_BLOCK,
        Format::BC1_RGBA_UNORM_BLOCK => Format::BC1_RGBA_SRGB_BLOCK,
        Format::BC2_UNORM_BLOCK => Format::BC2_SRGB_BLOCK,
        Format::BC3_UNORM_BLOCK => Format::BC3_SRGB_BLOCK,
        Format::B8G8R8A8_UNORM => Format::B8G8R8A8_SRGB,
        Format::B8G8R8_UNORM => Format::B8G8R8_SRGB,
        Format::BC7_UNORM_BLOCK => Format::BC7_SRGB_BLOCK,
        _ => fmt,
    }
}
