//! Load-time conversion flags and the legacy scanline transforms.
//!
//! A legacy header match produces a [`ConvFlags`] word describing what has
//! to happen to the payload on its way into the canonical layout. The flags
//! are computed once per file; the per-scanline dispatch switches on them.

use bitflags::bitflags;
use vulkan_tex_image::{ScanlineFlags, TexError, TexResult};
use vulkan_tex_format::Format;

bitflags! {
    /// What a legacy payload needs on load.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct ConvFlags: u32 {
        /// Conversion requires expanded pixel size.
        const EXPAND = 0x1;
        /// Conversion requires setting alpha to a known value.
        const NOALPHA = 0x2;
        /// BGR/RGB order swizzling required.
        const SWIZZLE = 0x4;
        /// Has an 8-bit palette.
        const PAL8 = 0x8;
        /// Source is an 8:8:8 (24bpp) format.
        const P888 = 0x10;
        /// Source is a 5:6:5 (16bpp) format.
        const P565 = 0x20;
        /// Source is a 5:5:5:1 (16bpp) format.
        const P5551 = 0x40;
        /// Source is a 4:4:4:4 (16bpp) format.
        const P4444 = 0x80;
        /// Source is a 4:4 (8bpp) format.
        const P44 = 0x100;
        /// Source is a 3:3:2 (8bpp) format.
        const P332 = 0x200;
        /// Source is an 8:3:3:2 (16bpp) format.
        const P8332 = 0x400;
        /// Has an 8-bit palette with an alpha channel.
        const A8P8 = 0x800;
        /// D3D11on12 variant of the 4:4:4:4 layout.
        const ON_11ON12 = 0x1000;
        /// Has the 'DX10' extension header.
        const DX10 = 0x10000;
        /// Contains premultiplied alpha data.
        const PMALPHA = 0x20000;
        /// Source is an 8-bit luminance format.
        const L8 = 0x40000;
        /// Source is a 16-bit luminance format.
        const L16 = 0x80000;
        /// Source is an 8:8 luminance format.
        const A8L8 = 0x100000;
        /// Source is a 6:5:5 bump-luminance format.
        const L6V5U5 = 0x200000;
        /// Source is an x:8:8:8 bump-luminance format.
        const L8U8V8 = 0x400000;
        /// Source is a 2:10:10:10 bump format.
        const WUV10 = 0x800000;
    }
}

/// Legacy Direct3D 9 pixel layouts that need bespoke expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LegacyFormat {
    Unknown,
    R8G8B8,
    R3G3B2,
    A8R3G3B2,
    P8,
    A8P8,
    A4L4,
    B4G4R4A4,
    L8,
    L16,
    A8L8,
    L6V5U5,
    X8L8V8U8,
    A2W10V10U10,
}

pub(crate) fn find_legacy_format(flags: ConvFlags) -> LegacyFormat {
    if flags.contains(ConvFlags::PAL8) {
        if flags.contains(ConvFlags::A8P8) {
            LegacyFormat::A8P8
        } else {
            LegacyFormat::P8
        }
    } else if flags.contains(ConvFlags::P888) {
        LegacyFormat::R8G8B8
    } else if flags.contains(ConvFlags::P332) {
        LegacyFormat::R3G3B2
    } else if flags.contains(ConvFlags::P8332) {
        LegacyFormat::A8R3G3B2
    } else if flags.contains(ConvFlags::P44) {
        LegacyFormat::A4L4
    } else if flags.contains(ConvFlags::P4444) {
        LegacyFormat::B4G4R4A4
    } else if flags.contains(ConvFlags::L8) {
        LegacyFormat::L8
    } else if flags.contains(ConvFlags::L16) {
        LegacyFormat::L16
    } else if flags.contains(ConvFlags::A8L8) {
        LegacyFormat::A8L8
    } else if flags.contains(ConvFlags::L6V5U5) {
        LegacyFormat::L6V5U5
    } else if flags.contains(ConvFlags::L8U8V8) {
        LegacyFormat::X8L8V8U8
    } else if flags.contains(ConvFlags::WUV10) {
        LegacyFormat::A2W10V10U10
    } else {
        LegacyFormat::Unknown
    }
}

fn unsupported(out_format: Format) -> TexError {
    TexError::UnsupportedConversion {
        from: Format::UNDEFINED,
        to: out_format,
    }
}

#[inline]
fn write_u32s(dst: &mut [u8], src_stride: usize, src: &[u8], f: impl Fn(&[u8]) -> u32) {
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(src_stride)) {
        d.copy_from_slice(&f(s).to_le_bytes());
    }
}

/// Expands one scanline of a D3D9-era layout into a modern format.
///
/// `pal8` supplies the 256-entry RGBA palette for the paletted layouts.
pub(crate) fn legacy_expand_scanline(
    dst: &mut [u8],
    out_format: Format,
    src: &[u8],
    in_format: LegacyFormat,
    pal8: Option<&[u32; 256]>,
    tflags: ScanlineFlags,
) -> TexResult<()> {
    let set_alpha = tflags.contains(ScanlineFlags::SET_ALPHA);

    match in_format {
        LegacyFormat::R8G8B8 => {
            if out_format != Format::R8G8B8A8_UNORM || src.len() < 3 || dst.len() < 4 {
                return Err(unsupported(out_format));
            }

            // 24bpp Direct3D 9 files are actually BGR, so swizzle as well.
            write_u32s(dst, 3, src, |s| {
                let t1 = (s[0] as u32) << 16;
                let t2 = (s[1] as u32) << 8;
                let t3 = s[2] as u32;
                t1 | t2 | t3 | 0xff00_0000
            });
            Ok(())
        }

        LegacyFormat::R3G3B2 => match out_format {
            Format::R8G8B8A8_UNORM => {
                if src.is_empty() || dst.len() < 4 {
                    return Err(unsupported(out_format));
                }

                write_u32s(dst, 1, src, |s| {
                    let t = s[0] as u32;
                    let t1 = (t & 0xe0) | ((t & 0xe0) >> 3) | ((t & 0xc0) >> 6);
                    let t2 = ((t & 0x1c) << 11) | ((t & 0x1c) << 8) | ((t & 0x18) << 5);
                    let t3 = ((t & 0x03) << 22) | ((t & 0x03) << 20) | ((t & 0x03) << 18) | ((t & 0x03) << 16);
                    t1 | t2 | t3 | 0xff00_0000
                });
                Ok(())
            }

            Format::B5G6R5_UNORM_PACK16 => {
                if src.is_empty() || dst.len() < 2 {
                    return Err(unsupported(out_format));
                }

                for (d, s) in dst.chunks_exact_mut(2).zip(src.iter()) {
                    let t = *s as u32;
                    let t1 = ((t & 0xe0) << 8) | ((t & 0xc0) << 5);
                    let t2 = ((t & 0x1c) << 6) | ((t & 0x1c) << 3);
                    let t3 = ((t & 0x03) << 3) | ((t & 0x03) << 1) | ((t & 0x02) >> 1);
                    d.copy_from_slice(&((t1 | t2 | t3) as u16).to_le_bytes());
                }
                Ok(())
            }

            _ => Err(unsupported(out_format)),
        },

        LegacyFormat::A8R3G3B2 => {
            if out_format != Format::R8G8B8A8_UNORM || src.len() < 2 || dst.len() < 4 {
                return Err(unsupported(out_format));
            }

            write_u32s(dst, 2, src, |s| {
                let t = u16::from_le_bytes([s[0], s[1]]) as u32;
                let t1 = (t & 0x00e0) | ((t & 0x00e0) >> 3) | ((t & 0x00c0) >> 6);
                let t2 = ((t & 0x001c) << 11) | ((t & 0x001c) << 8) | ((t & 0x0018) << 5);
                let t3 = ((t & 0x0003) << 22) | ((t & 0x0003) << 20) | ((t & 0x0003) << 18) | ((t & 0x0003) << 16);
                let ta = if set_alpha { 0xff00_0000 } else { (t & 0xff00) << 16 };
                t1 | t2 | t3 | ta
            });
            Ok(())
        }

        LegacyFormat::P8 => {
            let pal8 = pal8.ok_or_else(|| unsupported(out_format))?;
            if out_format != Format::R8G8B8A8_UNORM || src.is_empty() || dst.len() < 4 {
                return Err(unsupported(out_format));
            }

            write_u32s(dst, 1, src, |s| pal8[s[0] as usize]);
            Ok(())
        }

        LegacyFormat::A8P8 => {
            let pal8 = pal8.ok_or_else(|| unsupported(out_format))?;
            if out_format != Format::R8G8B8A8_UNORM || src.len() < 2 || dst.len() < 4 {
                return Err(unsupported(out_format));
            }

            write_u32s(dst, 2, src, |s| {
                let t = u16::from_le_bytes([s[0], s[1]]) as u32;
                let t1 = pal8[(t & 0xff) as usize];
                let ta = if set_alpha { 0xff00_0000 } else { (t & 0xff00) << 16 };
                t1 | ta
            });
            Ok(())
        }

        LegacyFormat::A4L4 => match out_format {
            Format::B4G4R4A4_UNORM_PACK16 => {
                if src.is_empty() || dst.len() < 2 {
                    return Err(unsupported(out_format));
                }

                for (d, s) in dst.chunks_exact_mut(2).zip(src.iter()) {
                    let t = *s as u32;
                    let t1 = t & 0x0f;
                    let ta = if set_alpha { 0xf000 } else { (t & 0xf0) << 8 };
                    d.copy_from_slice(&((t1 | (t1 << 4) | (t1 << 8) | ta) as u16).to_le_bytes());
                }
                Ok(())
            }

            Format::R8G8B8A8_UNORM => {
                if src.is_empty() || dst.len() < 4 {
                    return Err(unsupported(out_format));
                }

                write_u32s(dst, 1, src, |s| {
                    let t = s[0] as u32;
                    let t1 = ((t & 0x0f) << 4) | (t & 0x0f);
                    let ta = if set_alpha {
                        0xff00_0000
                    } else {
                        ((t & 0xf0) << 24) | ((t & 0xf0) << 20)
                    };
                    t1 | (t1 << 8) | (t1 << 16) | ta
                });
                Ok(())
            }

            _ => Err(unsupported(out_format)),
        },

        LegacyFormat::B4G4R4A4 => {
            if out_format != Format::R8G8B8A8_UNORM || src.len() < 2 || dst.len() < 4 {
                return Err(unsupported(out_format));
            }

            write_u32s(dst, 2, src, |s| {
                let t = u16::from_le_bytes([s[0], s[1]]) as u32;
                let t1 = ((t & 0x0f00) >> 4) | ((t & 0x0f00) >> 8);
                let t2 = ((t & 0x00f0) << 8) | ((t & 0x00f0) << 4);
                let t3 = ((t & 0x000f) << 20) | ((t & 0x000f) << 16);
                let ta = if set_alpha {
                    0xff00_0000
                } else {
                    ((t & 0xf000) << 16) | ((t & 0xf000) << 12)
                };
                t1 | t2 | t3 | ta
            });
            Ok(())
        }

        LegacyFormat::L8 => {
            if out_format != Format::R8G8B8A8_UNORM || src.is_empty() || dst.len() < 4 {
                return Err(unsupported(out_format));
            }

            write_u32s(dst, 1, src, |s| {
                let t1 = s[0] as u32;
                t1 | (t1 << 8) | (t1 << 16) | 0xff00_0000
            });
            Ok(())
        }

        LegacyFormat::L16 => {
            if out_format != Format::R16G16B16A16_UNORM || src.len() < 2 || dst.len() < 8 {
                return Err(unsupported(out_format));
            }

            for (d, s) in dst.chunks_exact_mut(8).zip(src.chunks_exact(2)) {
                let t = u16::from_le_bytes([s[0], s[1]]) as u64;
                let out = t | (t << 16) | (t << 32) | 0xffff_0000_0000_0000;
                d.copy_from_slice(&out.to_le_bytes());
            }
            Ok(())
        }

        LegacyFormat::A8L8 => {
            if out_format != Format::R8G8B8A8_UNORM || src.len() < 2 || dst.len() < 4 {
                return Err(unsupported(out_format));
            }

            write_u32s(dst, 2, src, |s| {
                let t = u16::from_le_bytes([s[0], s[1]]) as u32;
                let t1 = t & 0xff;
                let ta = if set_alpha { 0xff00_0000 } else { (t & 0xff00) << 16 };
                t1 | (t1 << 8) | (t1 << 16) | ta
            });
            Ok(())
        }

        LegacyFormat::L6V5U5 => {
            if out_format != Format::R8G8B8A8_UNORM || src.len() < 2 || dst.len() < 4 {
                return Err(unsupported(out_format));
            }

            // Unsigned 6-bit luminance with two signed 5-bit bump channels;
            // the signed channels shift their zero point to the floor.
            write_u32s(dst, 2, src, |s| {
                let t = u16::from_le_bytes([s[0], s[1]]) as u32;
                let t1 = ((t & 0xFC00) >> 8) | ((t & 0xC000) >> 14);

                const M: i32 = 1 << 4;
                let v = (((((t >> 5) & 0x1f) as i32) ^ M) - M) + 16;
                let u = ((((t & 0x1f) as i32) ^ M) - M) + 16;

                let t2 = ((u << 3) | (u >> 2)) as u32;
                let t3 = ((v << 3) | (v >> 2)) as u32;

                t1 | (t2 << 8) | (t3 << 16) | 0xff00_0000
            });
            Ok(())
        }

        LegacyFormat::Unknown | LegacyFormat::X8L8V8U8 | LegacyFormat::A2W10V10U10 => {
            Err(unsupported(out_format))
        }
    }
}

/// Converts one scanline of a signed bump layout into its unsigned modern
/// equivalent.
pub(crate) fn legacy_convert_scanline(
    dst: &mut [u8],
    out_format: Format,
    src: &[u8],
    in_format: LegacyFormat,
    tflags: ScanlineFlags,
) -> TexResult<()> {
    let set_alpha = tflags.contains(ScanlineFlags::SET_ALPHA);

    match in_format {
        LegacyFormat::X8L8V8U8 => {
            if out_format != Format::R8G8B8A8_UNORM || src.len() < 4 || dst.len() < 4 {
                return Err(unsupported(out_format));
            }

            write_u32s(dst, 4, src, |s| {
                let t = u32::from_le_bytes([s[0], s[1], s[2], s[3]]);

                let t1 = (t >> 16) & 0xff;
                const M: i32 = 1 << 7;
                let v = ((((((t >> 8) & 0xff) as i32) ^ M) - M) + 128) as u32;
                let u = (((((t & 0xff) as i32) ^ M) - M) + 128) as u32;

                t1 | (u << 8) | (v << 16) | 0xff00_0000
            });
            Ok(())
        }

        LegacyFormat::A2W10V10U10 => {
            if out_format != Format::A2R10G10B10_UNORM_PACK32 || src.len() < 4 || dst.len() < 4 {
                return Err(unsupported(out_format));
            }

            write_u32s(dst, 4, src, |s| {
                let t = u32::from_le_bytes([s[0], s[1], s[2], s[3]]);

                const M: i32 = 1 << 9;
                let w = ((((((t >> 20) & 0x3ff) as i32) ^ M) - M) + 512) as u32;
                let v = ((((((t >> 10) & 0x3ff) as i32) ^ M) - M) + 512) as u32;
                let u = (((((t & 0x3ff) as i32) ^ M) - M) + 512) as u32;

                let ta = if set_alpha { 0xC000_0000 } else { t & 0xC000_0000 };
                u | (v << 10) | (w << 20) | ta
            });
            Ok(())
        }

        _ => Err(unsupported(out_format)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r8g8b8_expands_bgr_to_rgba() {
        let src = [0x10u8, 0x20, 0x30]; // B G R on disk
        let mut dst = [0u8; 4];
        legacy_expand_scanline(
            &mut dst,
            Format::R8G8B8A8_UNORM,
            &src,
            LegacyFormat::R8G8B8,
            None,
            ScanlineFlags::empty(),
        )
        .unwrap();
        assert_eq!(u32::from_le_bytes(dst), 0xff10_2030);
    }

    #[test]
    fn l8_replicates_into_all_channels() {
        let src = [0x5Au8];
        let mut dst = [0u8; 4];
        legacy_expand_scanline(
            &mut dst,
            Format::R8G8B8A8_UNORM,
            &src,
            LegacyFormat::L8,
            None,
            ScanlineFlags::empty(),
        )
        .unwrap();
        assert_eq!(dst, [0x5A, 0x5A, 0x5A, 0xFF]);
    }

    #[test]
    fn l16_replicates_into_wide_channels() {
        let src = 0xBEEFu16.to_le_bytes();
        let mut dst = [0u8; 8];
        legacy_expand_scanline(
            &mut dst,
            Format::R16G16B16A16_UNORM,
            &src,
            LegacyFormat::L16,
            None,
            ScanlineFlags::empty(),
        )
        .unwrap();
        assert_eq!(u64::from_le_bytes(dst), 0xffff_beef_beef_beef);
    }

    #[test]
    fn p8_goes_through_the_palette() {
        let mut pal = [0u32; 256];
        pal[3] = 0xAABB_CCDD;
        let src = [3u8];
        let mut dst = [0u8; 4];
        legacy_expand_scanline(
            &mut dst,
            Format::R8G8B8A8_UNORM,
            &src,
            LegacyFormat::P8,
            Some(&pal),
            ScanlineFlags::empty(),
        )
        .unwrap();
        assert_eq!(u32::from_le_bytes(dst), 0xAABB_CCDD);

        // Without a palette the expansion is unsupported.
        assert!(legacy_expand_scanline(
            &mut dst,
            Format::R8G8B8A8_UNORM,
            &src,
            LegacyFormat::P8,
            None,
            ScanlineFlags::empty(),
        )
        .is_err());
    }

    #[test]
    fn x8l8v8u8_rebiasses_signed_channels() {
        // u = -128 (0x80) maps to 0, v = 127 (0x7f) maps to 255
        let src = 0x0000_7f80u32.to_le_bytes();
        let mut dst = [0u8; 4];
        legacy_convert_scanline(
            &mut dst,
            Format::R8G8B8A8_UNORM,
            &src,
            LegacyFormat::X8L8V8U8,
            ScanlineFlags::empty(),
        )
        .unwrap();
        let out = u32::from_le_bytes(dst);
        assert_eq!(out & 0xff, 0); // luminance byte
        assert_eq!((out >> 8) & 0xff, 0); // u rebiased to floor
        assert_eq!((out >> 16) & 0xff, 255); // v rebiased to ceiling
        assert_eq!(out >> 24, 0xff);
    }

    #[test]
    fn a2w10v10u10_recenters_ten_bit_channels() {
        // u = -512 -> 0, v = 0 -> 512, w = 511 -> 1023; alpha preserved
        let t: u32 = 0b10_0111111111_0000000000_1000000000;
        let src = t.to_le_bytes();
        let mut dst = [0u8; 4];
        legacy_convert_scanline(
            &mut dst,
            Format::A2R10G10B10_UNORM_PACK32,
            &src,
            LegacyFormat::A2W10V10U10,
            ScanlineFlags::empty(),
        )
        .unwrap();
        let out = u32::from_le_bytes(dst);
        assert_eq!(out & 0x3ff, 0);
        assert_eq!((out >> 10) & 0x3ff, 512);
        assert_eq!((out >> 20) & 0x3ff, 1023);
        assert_eq!(out >> 30, 0b10);
    }

    #[test]
    fn conv_flag_priority_selects_one_layout() {
        assert_eq!(
            find_legacy_format(ConvFlags::PAL8 | ConvFlags::A8P8),
            LegacyFormat::A8P8
        );
        assert_eq!(find_legacy_format(ConvFlags::P888), LegacyFormat::R8G8B8);
        assert_eq!(find_legacy_format(ConvFlags::WUV10), LegacyFormat::A2W10V10U10);
        assert_eq!(find_legacy_format(ConvFlags::empty()), LegacyFormat::Unknown);
    }
}
