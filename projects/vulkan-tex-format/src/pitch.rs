//! Row and slice pitch computation.

use crate::classify::bits_per_pixel;
use crate::error::{FormatError, FormatResult};
use crate::flags::CpFlags;
use crate::Format;

/// Byte layout of one subresource plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pitch {
    /// Bytes per scanline (per row of blocks for compressed formats).
    pub row: usize,
    /// Bytes per 2D plane, including any chroma plane rows.
    pub slice: usize,
}

/// Computes the row pitch and slice pitch for one subresource.
///
/// Dispatches on the format class: 64-bit and 128-bit block compression,
/// packed 4:2:2, planar 4:2:0, and plain per-pixel formats with an optional
/// row alignment unit selected by `flags`. The `BPP8`/`BPP16`/`BPP24`
/// overrides substitute a legacy on-disk pixel size.
///
/// # Errors
///
/// - [`FormatError::UnsupportedFormat`] for undefined formats or formats
///   without a known pixel width.
/// - [`FormatError::OddPlanarHeight`] for planar 4:2:0 with odd height.
/// - [`FormatError::ArithmeticOverflow`] when a pitch crosses the 4 GiB
///   ceiling on a 32-bit host or with [`CpFlags::LIMIT_4GB`].
pub fn compute_pitch(fmt: Format, width: usize, height: usize, flags: CpFlags) -> FormatResult<Pitch> {
    let (pitch, slice): (u64, u64) = match fmt {
        Format::UNDEFINED => return Err(FormatError::UnsupportedFormat(fmt)),

        // 64-bit blocks
        Format::BC1_RGB_UNORM_BLOCK
        | Format::BC1_RGB_SRGB_BLOCK
        | Format::BC4_UNORM_BLOCK
        | Format::BC4_SNORM_BLOCK => block_pitch(width, height, 8, flags),

        // 128-bit blocks
        Format::BC2_UNORM_BLOCK
        | Format::BC2_SRGB_BLOCK
        | Format::BC3_UNORM_BLOCK
        | Format::BC3_SRGB_BLOCK
        | Format::BC5_UNORM_BLOCK
        | Format::BC5_SNORM_BLOCK
        | Format::BC6H_UFLOAT_BLOCK
        | Format::BC6H_SFLOAT_BLOCK
        | Format::BC7_UNORM_BLOCK
        | Format::BC7_SRGB_BLOCK => block_pitch(width, height, 16, flags),

        // Packed 4:2:2, 8-bit components
        Format::B8G8R8G8_422_UNORM | Format::G8B8G8R8_422_UNORM => {
            let pitch = ((width as u64 + 1) >> 1) * 4;
            (pitch, pitch * height as u64)
        }

        // Packed 4:2:2, 10/16-bit components
        Format::G10X6B10X6G10X6R10X6_422_UNORM_4PACK16 | Format::G16B16G16R16_422_UNORM => {
            let pitch = ((width as u64 + 1) >> 1) * 8;
            (pitch, pitch * height as u64)
        }

        // Planar 4:2:0, 8-bit
        Format::G8_B8R8_2PLANE_420_UNORM => {
            if height % 2 != 0 {
                return Err(FormatError::OddPlanarHeight(height));
            }
            let pitch = ((width as u64 + 1) >> 1) * 2;
            (pitch, pitch * (height as u64 + ((height as u64 + 1) >> 1)))
        }

        // Planar 4:2:0, 10/16-bit — and the two formats sharing its layout
        Format::G10X6_B10X6R10X6_2PLANE_420_UNORM_3PACK16 | Format::G16_B16R16_2PLANE_420_UNORM => {
            if height % 2 != 0 {
                return Err(FormatError::OddPlanarHeight(height));
            }
            double_height_pitch(width, height)
        }
        Format::D16_UNORM_S8_UINT | Format::R16_UNORM => double_height_pitch(width, height),

        _ => {
            let bpp = if flags.contains(CpFlags::BPP24) {
                24
            } else if flags.contains(CpFlags::BPP16) {
                16
            } else if flags.contains(CpFlags::BPP8) {
                8
            } else {
                bits_per_pixel(fmt) as u64
            };

            if bpp == 0 {
                return Err(FormatError::UnsupportedFormat(fmt));
            }

            let bits = width as u64 * bpp;
            let pitch = if flags.contains(CpFlags::PAGE4K) {
                bits.div_ceil(32768) * 4096
            } else if flags.contains(CpFlags::ZMM) {
                bits.div_ceil(512) * 64
            } else if flags.contains(CpFlags::YMM) {
                bits.div_ceil(256) * 32
            } else if flags.contains(CpFlags::PARAGRAPH) {
                bits.div_ceil(128) * 16
            } else if flags.contains(CpFlags::LEGACY_DWORD) {
                // Matches legacy DirectDraw assumptions about pitch alignment
                bits.div_ceil(32) * 4
            } else {
                bits.div_ceil(8)
            };

            (pitch, pitch * height as u64)
        }
    };

    if cfg!(target_pointer_width = "32") || flags.contains(CpFlags::LIMIT_4GB) {
        if pitch > u32::MAX as u64 || slice > u32::MAX as u64 {
            return Err(FormatError::ArithmeticOverflow);
        }
    }

    Ok(Pitch {
        row: pitch as usize,
        slice: slice as usize,
    })
}

fn block_pitch(width: usize, height: usize, block_bytes: u64, flags: CpFlags) -> (u64, u64) {
    if flags.contains(CpFlags::BAD_DXTN_TAILS) {
        // Malformed writers truncate instead of rounding up; tail mips
        // degenerate to zero blocks and are clamped to one byte.
        let nbw = (width >> 2) as u64;
        let nbh = (height >> 2) as u64;
        let pitch = (nbw * block_bytes).max(1);
        (pitch, (pitch * nbh).max(1))
    } else {
        let nbw = ((width as u64 + 3) / 4).max(1);
        let nbh = ((height as u64 + 3) / 4).max(1);
        (nbw * block_bytes, nbw * block_bytes * nbh)
    }
}

fn double_height_pitch(width: usize, height: usize) -> (u64, u64) {
    let pitch = ((width as u64 + 1) >> 1) * 4;
    (pitch, pitch * (height as u64 + ((height as u64 + 1) >> 1)))
}

/// Number of scanlines a codec must copy to cover one slice.
///
/// Block-compressed families count block rows; planar 4:2:0 counts luma plus
/// chroma rows; everything else counts pixel rows.
pub fn compute_scanlines(fmt: Format, height: usize) -> usize {
    match fmt {
        Format::UNDEFINED => 0,

        Format::BC1_RGB_UNORM_BLOCK
        | Format::BC1_RGB_SRGB_BLOCK
        | Format::BC1_RGBA_UNORM_BLOCK
        | Format::BC1_RGBA_SRGB_BLOCK
        | Format::BC2_UNORM_BLOCK
        | Format::BC2_SRGB_BLOCK
        | Format::BC3_UNORM_BLOCK
        | Format::BC3_SRGB_BLOCK
        | Format::BC4_UNORM_BLOCK
        | Format::BC4_SNORM_BLOCK
        | Format::BC5_UNORM_BLOCK
        | Format::BC5_SNORM_BLOCK
        | Format::BC6H_UFLOAT_BLOCK
        | Format::BC6H_SFLOAT_BLOCK
        | Format::BC7_UNORM_BLOCK
        | Format::BC7_SRGB_BLOCK
        | Format::ETC2_R8G8B8_UNORM_BLOCK
        | Format::ETC2_R8G8B8_SRGB_BLOCK
        | Format::ETC2_R8G8B8A1_UNORM_BLOCK
        | Format::ETC2_R8G8B8A1_SRGB_BLOCK
        | Format::ETC2_R8G8B8A8_UNORM_BLOCK
        | Format::ETC2_R8G8B8A8_SRGB_BLOCK
        | Format::EAC_R11_UNORM_BLOCK
        | Format::EAC_R11_SNORM_BLOCK
        | Format::EAC_R11G11_UNORM_BLOCK
        | Format::EAC_R11G11_SNORM_BLOCK => ((height + 3) / 4).max(1),

        Format::G8_B8R8_2PLANE_420_UNORM
        | Format::G10X6_B10X6R10X6_2PLANE_420_UNORM_3PACK16
        | Format::G16_B16R16_2PLANE_420_UNORM
        | Format::D16_UNORM_S8_UINT => height + ((height + 1) >> 1),

        _ => height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1, 8, 8)] // single partial block
    #[case(4, 4, 8, 8)]
    #[case(7, 7, 16, 32)] // 2x2 block rows
    #[case(256, 256, 512, 32768)]
    fn bc1_pitches(#[case] w: usize, #[case] h: usize, #[case] row: usize, #[case] slice: usize) {
        let p = compute_pitch(Format::BC1_RGB_UNORM_BLOCK, w, h, CpFlags::empty()).unwrap();
        assert_eq!(p.row, row);
        assert_eq!(p.slice, slice);
    }

    #[test]
    fn bc7_uses_16_byte_blocks() {
        let p = compute_pitch(Format::BC7_UNORM_BLOCK, 7, 7, CpFlags::empty()).unwrap();
        assert_eq!(p.row, 32);
        assert_eq!(p.slice, 64);
    }

    #[test]
    fn bad_dxtn_tails_truncates_blocks() {
        // 2x2 tail mip: width >> 2 == 0 blocks, clamped to one byte
        let p = compute_pitch(Format::BC1_RGB_UNORM_BLOCK, 2, 2, CpFlags::BAD_DXTN_TAILS).unwrap();
        assert_eq!(p.row, 1);
        assert_eq!(p.slice, 1);

        let p = compute_pitch(Format::BC1_RGB_UNORM_BLOCK, 8, 8, CpFlags::BAD_DXTN_TAILS).unwrap();
        assert_eq!(p.row, 16);
        assert_eq!(p.slice, 32);
    }

    #[test]
    fn packed_422_rounds_width_up_to_pairs() {
        let p = compute_pitch(Format::G8B8G8R8_422_UNORM, 3, 2, CpFlags::empty()).unwrap();
        assert_eq!(p.row, 8);
        assert_eq!(p.slice, 16);

        let p = compute_pitch(Format::G16B16G16R16_422_UNORM, 3, 2, CpFlags::empty()).unwrap();
        assert_eq!(p.row, 16);
    }

    #[test]
    fn planar_420_requires_even_height() {
        assert_eq!(
            compute_pitch(Format::G8_B8R8_2PLANE_420_UNORM, 4, 3, CpFlags::empty()),
            Err(FormatError::OddPlanarHeight(3))
        );

        let p = compute_pitch(Format::G8_B8R8_2PLANE_420_UNORM, 4, 4, CpFlags::empty()).unwrap();
        assert_eq!(p.row, 4);
        assert_eq!(p.slice, 4 * 6); // 4 luma rows + 2 chroma rows
    }

    #[rstest]
    #[case(CpFlags::empty(), 3)]
    #[case(CpFlags::LEGACY_DWORD, 4)]
    #[case(CpFlags::PARAGRAPH, 16)]
    #[case(CpFlags::YMM, 32)]
    #[case(CpFlags::ZMM, 64)]
    #[case(CpFlags::PAGE4K, 4096)]
    fn alignment_units_round_the_row(#[case] flags: CpFlags, #[case] expected: usize) {
        // 1 pixel of 24bpp data occupies one alignment unit
        let p = compute_pitch(Format::R8G8B8_UNORM, 1, 1, flags).unwrap();
        assert_eq!(p.row, expected);
    }

    #[test]
    fn bpp_overrides_replace_the_format_width() {
        let p = compute_pitch(Format::R8G8B8A8_UNORM, 2, 1, CpFlags::BPP24).unwrap();
        assert_eq!(p.row, 6);
        let p = compute_pitch(Format::R8G8B8A8_UNORM, 2, 1, CpFlags::BPP16).unwrap();
        assert_eq!(p.row, 4);
        let p = compute_pitch(Format::R8G8B8A8_UNORM, 2, 1, CpFlags::BPP8).unwrap();
        assert_eq!(p.row, 2);
    }

    #[test]
    fn limit_4gb_rejects_oversized_slices() {
        let result = compute_pitch(
            Format::R32G32B32A32_SFLOAT,
            70_000,
            70_000,
            CpFlags::LIMIT_4GB,
        );
        assert_eq!(result, Err(FormatError::ArithmeticOverflow));

        // Without the cap the same computation succeeds on 64-bit hosts.
        #[cfg(target_pointer_width = "64")]
        assert!(compute_pitch(Format::R32G32B32A32_SFLOAT, 70_000, 70_000, CpFlags::empty()).is_ok());
    }

    #[test]
    fn undefined_has_no_pitch() {
        assert!(compute_pitch(Format::UNDEFINED, 4, 4, CpFlags::empty()).is_err());
    }

    #[rstest]
    #[case(Format::BC1_RGB_UNORM_BLOCK, 7, 2)]
    #[case(Format::ETC2_R8G8B8_UNORM_BLOCK, 8, 2)]
    #[case(Format::G8_B8R8_2PLANE_420_UNORM, 4, 6)]
    #[case(Format::D16_UNORM_S8_UINT, 5, 8)]
    #[case(Format::R8G8B8A8_UNORM, 9, 9)]
    #[case(Format::UNDEFINED, 9, 0)]
    fn scanline_counts(#[case] fmt: Format, #[case] h: usize, #[case] expected: usize) {
        assert_eq!(compute_scanlines(fmt, h), expected);
    }
}
