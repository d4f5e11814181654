//! Scanline-level pixel transforms.
//!
//! The codecs run these over one row at a time while moving pixels between
//! a container payload and a [`ScratchImage`](crate::ScratchImage). Sizes
//! are taken from the shorter of the two buffers; trailing partial pixels
//! are not touched.

use crate::error::{TexError, TexResult};
use bitflags::bitflags;
use vulkan_tex_format::Format;

bitflags! {
    /// Per-scanline transform options.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ScanlineFlags: u32 {
        /// Set the alpha channel to a known opaque value.
        const SET_ALPHA = 0x1;
        /// Enables specific legacy format conversion cases.
        const LEGACY = 0x2;
    }
}

#[inline]
fn for_each_u32(dst: &mut [u8], src: &[u8], f: impl Fn(u32) -> u32) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let t = u32::from_le_bytes([s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&f(t).to_le_bytes());
    }
}

#[inline]
fn for_each_u32_in_place(scan: &mut [u8], f: impl Fn(u32) -> u32) {
    for d in scan.chunks_exact_mut(4) {
        let t = u32::from_le_bytes([d[0], d[1], d[2], d[3]]);
        d.copy_from_slice(&f(t).to_le_bytes());
    }
}

#[inline]
fn for_each_u16_in_place(scan: &mut [u8], f: impl Fn(u16) -> u16) {
    for d in scan.chunks_exact_mut(2) {
        let t = u16::from_le_bytes([d[0], d[1]]);
        d.copy_from_slice(&f(t).to_le_bytes());
    }
}

/// Opaque-alpha bit patterns per format class.
mod alpha {
    use vulkan_tex_format::Format;

    pub fn rgba32(format: Format) -> u32 {
        match format {
            Format::R32G32B32A32_SFLOAT => 0x3f80_0000, // 1.0f
            Format::R32G32B32A32_SINT => 0x7fff_ffff,
            _ => 0xffff_ffff,
        }
    }

    pub fn rgba16(format: Format) -> u16 {
        match format {
            Format::R16G16B16A16_SFLOAT => 0x3c00, // 1.0 half
            Format::R16G16B16A16_SNORM | Format::R16G16B16A16_SINT => 0x7fff,
            _ => 0xffff,
        }
    }

    pub fn rgba8(format: Format) -> u32 {
        match format {
            Format::R8G8B8A8_SNORM | Format::R8G8B8A8_SINT => 0x7f00_0000,
            _ => 0xff00_0000,
        }
    }

    pub fn packed16(format: Format) -> u16 {
        match format {
            Format::A4R4G4B4_UNORM_PACK16 => 0xf000,
            Format::R4G4B4A4_UNORM_PACK16 => 0x000f,
            _ => 0x8000, // A1R5G5B5
        }
    }
}

/// Copies a row, optionally forcing the alpha channel to opaque.
///
/// Without [`ScanlineFlags::SET_ALPHA`] (or for formats with no handled
/// alpha layout) this is a plain copy of `min(dst.len(), src.len())` bytes.
pub fn copy_scanline(dst: &mut [u8], src: &[u8], format: Format, flags: ScanlineFlags) {
    if flags.contains(ScanlineFlags::SET_ALPHA) {
        match format {
            Format::R32G32B32A32_SFLOAT | Format::R32G32B32A32_UINT | Format::R32G32B32A32_SINT => {
                let alpha = alpha::rgba32(format).to_le_bytes();
                for (d, s) in dst.chunks_exact_mut(16).zip(src.chunks_exact(16)) {
                    d[..12].copy_from_slice(&s[..12]);
                    d[12..].copy_from_slice(&alpha);
                }
                return;
            }

            Format::R16G16B16A16_SFLOAT
            | Format::R16G16B16A16_UNORM
            | Format::R16G16B16A16_UINT
            | Format::R16G16B16A16_SNORM
            | Format::R16G16B16A16_SINT => {
                let alpha = alpha::rgba16(format).to_le_bytes();
                for (d, s) in dst.chunks_exact_mut(8).zip(src.chunks_exact(8)) {
                    d[..6].copy_from_slice(&s[..6]);
                    d[6..].copy_from_slice(&alpha);
                }
                return;
            }

            Format::A2B10G10R10_UNORM_PACK32 | Format::A2B10G10R10_UINT_PACK32 => {
                for_each_u32(dst, src, |t| t | 0xC000_0000);
                return;
            }

            Format::R8G8B8A8_UNORM
            | Format::R8G8B8A8_SRGB
            | Format::R8G8B8A8_UINT
            | Format::R8G8B8A8_SNORM
            | Format::R8G8B8A8_SINT
            | Format::B8G8R8A8_UNORM
            | Format::B8G8R8A8_SRGB => {
                let alpha = alpha::rgba8(format);
                for_each_u32(dst, src, |t| (t & 0x00ff_ffff) | alpha);
                return;
            }

            Format::A1R5G5B5_UNORM_PACK16
            | Format::A4R4G4B4_UNORM_PACK16
            | Format::R4G4B4A4_UNORM_PACK16 => {
                let alpha = alpha::packed16(format);
                for (d, s) in dst.chunks_exact_mut(2).zip(src.chunks_exact(2)) {
                    let t = u16::from_le_bytes([s[0], s[1]]) | alpha;
                    d.copy_from_slice(&t.to_le_bytes());
                }
                return;
            }

            Format::A8_UNORM_KHR => {
                dst.fill(0xff);
                return;
            }

            _ => {}
        }
    }

    let size = dst.len().min(src.len());
    dst[..size].copy_from_slice(&src[..size]);
}

/// In-place variant of the [`ScanlineFlags::SET_ALPHA`] rewrite.
pub fn set_alpha_scanline(scan: &mut [u8], format: Format) {
    match format {
        Format::R32G32B32A32_SFLOAT | Format::R32G32B32A32_UINT | Format::R32G32B32A32_SINT => {
            let alpha = alpha::rgba32(format).to_le_bytes();
            for d in scan.chunks_exact_mut(16) {
                d[12..].copy_from_slice(&alpha);
            }
        }

        Format::R16G16B16A16_SFLOAT
        | Format::R16G16B16A16_UNORM
        | Format::R16G16B16A16_UINT
        | Format::R16G16B16A16_SNORM
        | Format::R16G16B16A16_SINT => {
            let alpha = alpha::rgba16(format).to_le_bytes();
            for d in scan.chunks_exact_mut(8) {
                d[6..].copy_from_slice(&alpha);
            }
        }

        Format::A2B10G10R10_UNORM_PACK32 | Format::A2B10G10R10_UINT_PACK32 => {
            for_each_u32_in_place(scan, |t| t | 0xC000_0000);
        }

        Format::R8G8B8A8_UNORM
        | Format::R8G8B8A8_SRGB
        | Format::R8G8B8A8_UINT
        | Format::R8G8B8A8_SNORM
        | Format::R8G8B8A8_SINT
        | Format::B8G8R8A8_UNORM
        | Format::B8G8R8A8_SRGB => {
            let alpha = alpha::rgba8(format);
            for_each_u32_in_place(scan, |t| (t & 0x00ff_ffff) | alpha);
        }

        Format::A1R5G5B5_UNORM_PACK16
        | Format::A4R4G4B4_UNORM_PACK16
        | Format::R4G4B4A4_UNORM_PACK16 => {
            let alpha = alpha::packed16(format);
            for_each_u16_in_place(scan, |t| t | alpha);
        }

        Format::A8_UNORM_KHR => scan.fill(0xff),

        _ => {}
    }
}

fn swizzle_word(format: Format, flags: ScanlineFlags) -> Option<fn(u32, bool) -> u32> {
    match format {
        // 10:10:10:2 — exchange the 10-bit R and B fields. Only meaningful
        // for legacy D3DX-ordered data.
        Format::A2R10G10B10_UNORM_PACK32
        | Format::A2R10G10B10_UINT_PACK32
        | Format::A2R10G10B10_SNORM_PACK32
        | Format::A2R10G10B10_SINT_PACK32
        | Format::A2B10G10R10_UNORM_PACK32
        | Format::A2B10G10R10_UINT_PACK32
        | Format::A2B10G10R10_SNORM_PACK32
        | Format::A2B10G10R10_SINT_PACK32
            if flags.contains(ScanlineFlags::LEGACY) =>
        {
            Some(|t, set_alpha| {
                let t1 = (t & 0x3ff0_0000) >> 20;
                let t2 = (t & 0x0000_03ff) << 20;
                let t3 = t & 0x000f_fc00;
                let ta = if set_alpha { 0xC000_0000 } else { t & 0xC000_0000 };
                t1 | t2 | t3 | ta
            })
        }

        // 8:8:8:8 — exchange the R and B bytes.
        Format::R8G8B8A8_UNORM
        | Format::R8G8B8A8_SRGB
        | Format::R8G8B8A8_UINT
        | Format::R8G8B8A8_SNORM
        | Format::R8G8B8A8_SINT
        | Format::B8G8R8A8_UNORM
        | Format::B8G8R8A8_SRGB => Some(|t, set_alpha| {
            let t1 = (t & 0x00ff_0000) >> 16;
            let t2 = (t & 0x0000_00ff) << 16;
            let t3 = t & 0x0000_ff00;
            let ta = if set_alpha { 0xff00_0000 } else { t & 0xff00_0000 };
            t1 | t2 | t3 | ta
        }),

        // Packed 4:2:2 — swap adjacent bytes to move between the YUY2 and
        // UYVY component orders.
        Format::G8B8G8R8_422_UNORM | Format::B8G8R8G8_422_UNORM
            if flags.contains(ScanlineFlags::LEGACY) =>
        {
            Some(|t, _| ((t & 0xff00_ff00) >> 8) | ((t & 0x00ff_00ff) << 8))
        }

        _ => None,
    }
}

/// Copies a row while exchanging the R and B channels.
///
/// Formats without a handled swizzle layout are copied unmodified.
pub fn swizzle_scanline(dst: &mut [u8], src: &[u8], format: Format, flags: ScanlineFlags) {
    match swizzle_word(format, flags) {
        Some(f) => {
            let set_alpha = flags.contains(ScanlineFlags::SET_ALPHA);
            for_each_u32(dst, src, |t| f(t, set_alpha));
        }
        None => copy_scanline(dst, src, format, flags),
    }
}

/// In-place variant of [`swizzle_scanline`].
pub fn swizzle_scanline_in_place(scan: &mut [u8], format: Format, flags: ScanlineFlags) {
    match swizzle_word(format, flags) {
        Some(f) => {
            let set_alpha = flags.contains(ScanlineFlags::SET_ALPHA);
            for_each_u32_in_place(scan, |t| f(t, set_alpha));
        }
        None => {
            if flags.contains(ScanlineFlags::SET_ALPHA) {
                set_alpha_scanline(scan, format);
            }
        }
    }
}

/// Expands a row of 16-bit packed pixels into `R8G8B8A8_UNORM`.
///
/// Supported sources: `B5G6R5`, `B5G5R5A1`, `B4G4R4A4`, and `A4B4G4R4`.
/// Other pairs fail with [`TexError::UnsupportedConversion`].
pub fn expand_scanline(
    dst: &mut [u8],
    out_format: Format,
    src: &[u8],
    in_format: Format,
    flags: ScanlineFlags,
) -> TexResult<()> {
    if out_format != Format::R8G8B8A8_UNORM {
        return Err(TexError::UnsupportedConversion {
            from: in_format,
            to: out_format,
        });
    }
    if src.len() < 2 || dst.len() < 4 {
        return Err(TexError::BufferTooSmall {
            required: 4,
            actual: dst.len().min(src.len() * 2),
        });
    }

    let set_alpha = flags.contains(ScanlineFlags::SET_ALPHA);

    let expand: fn(u16, bool) -> u32 = match in_format {
        Format::B5G6R5_UNORM_PACK16 => |t, _| {
            let t = t as u32;
            let t1 = ((t & 0xf800) >> 8) | ((t & 0xe000) >> 13);
            let t2 = ((t & 0x07e0) << 5) | ((t & 0x0600) >> 1);
            let t3 = ((t & 0x001f) << 19) | ((t & 0x001c) << 14);
            t1 | t2 | t3 | 0xff00_0000
        },

        Format::B5G5R5A1_UNORM_PACK16 => |t, set_alpha| {
            let t = t as u32;
            let t1 = ((t & 0x7c00) >> 7) | ((t & 0x7000) >> 12);
            let t2 = ((t & 0x03e0) << 6) | ((t & 0x0380) << 1);
            let t3 = ((t & 0x001f) << 19) | ((t & 0x001c) << 14);
            let ta = if set_alpha || (t & 0x8000) != 0 {
                0xff00_0000
            } else {
                0
            };
            t1 | t2 | t3 | ta
        },

        Format::B4G4R4A4_UNORM_PACK16 => |t, set_alpha| {
            let t = t as u32;
            let t1 = ((t & 0x0f00) >> 4) | ((t & 0x0f00) >> 8);
            let t2 = ((t & 0x00f0) << 8) | ((t & 0x00f0) << 4);
            let t3 = ((t & 0x000f) << 20) | ((t & 0x000f) << 16);
            let ta = if set_alpha {
                0xff00_0000
            } else {
                ((t & 0xf000) << 16) | ((t & 0xf000) << 12)
            };
            t1 | t2 | t3 | ta
        },

        Format::A4B4G4R4_UNORM_PACK16 => |t, set_alpha| {
            let t = t as u32;
            let t1 = ((t & 0x000f) << 4) | (t & 0x000f);
            let t2 = ((t & 0x00f0) << 8) | ((t & 0x00f0) << 4);
            let t3 = ((t & 0x0f00) << 12) | ((t & 0x0f00) << 8);
            let ta = if set_alpha {
                0xff00_0000
            } else {
                ((t & 0xf000) << 16) | ((t & 0xf000) << 12)
            };
            t1 | t2 | t3 | ta
        },

        _ => {
            return Err(TexError::UnsupportedConversion {
                from: in_format,
                to: out_format,
            })
        }
    };

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(2)) {
        let t = u16::from_le_bytes([s[0], s[1]]);
        d.copy_from_slice(&expand(t, set_alpha).to_le_bytes());
    }

    Ok(())
}
