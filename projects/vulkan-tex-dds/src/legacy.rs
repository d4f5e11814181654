//! Legacy (pre-DX10) pixel-format mapping.
//!
//! DDS files without a 'DX10' extension describe their pixels with a fourCC
//! or a flags/bit-count/mask tuple. The table below maps every descriptor
//! this library understands to a modern format plus the conversion work the
//! loader must do. Several descriptors appear more than once with different
//! conversion flags; the first match wins, and the order is part of the
//! contract.

use crate::constants::{ddspf, make_four_cc, DdsPixelFormat, PixelFormatFlags, FOURCC_NVTT};
use crate::convert::ConvFlags;
use crate::flags::DdsFlags;
use vulkan_tex_format::{make_srgb, Format};

struct LegacyDds {
    format: Format,
    conv_flags: ConvFlags,
    ddpf: DdsPixelFormat,
}

const fn entry(format: Format, conv_flags: ConvFlags, ddpf: DdsPixelFormat) -> LegacyDds {
    LegacyDds {
        format,
        conv_flags,
        ddpf,
    }
}

#[rustfmt::skip]
static LEGACY_DDS_MAP: &[LegacyDds] = &[
    entry(Format::BC1_RGB_UNORM_BLOCK, ConvFlags::empty(), ddspf::DXT1), // D3DFMT_DXT1
    entry(Format::BC2_UNORM_BLOCK,     ConvFlags::empty(), ddspf::DXT3), // D3DFMT_DXT3
    entry(Format::BC3_UNORM_BLOCK,     ConvFlags::empty(), ddspf::DXT5), // D3DFMT_DXT5

    entry(Format::BC2_UNORM_BLOCK,     ConvFlags::PMALPHA, ddspf::DXT2), // D3DFMT_DXT2
    entry(Format::BC3_UNORM_BLOCK,     ConvFlags::PMALPHA, ddspf::DXT4), // D3DFMT_DXT4

    // DXT5 variants with swizzled channels. They are returned 'as is' to the
    // client as BC3.
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'A', b'2', b'D', b'5'))),
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'x', b'G', b'B', b'R'))),
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'R', b'x', b'B', b'G'))),
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'R', b'B', b'x', b'G'))),
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'x', b'R', b'B', b'G'))),
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'R', b'G', b'x', b'B'))),
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'x', b'G', b'x', b'R'))),
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'G', b'X', b'R', b'B'))),
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'G', b'R', b'X', b'B'))),
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'R', b'X', b'G', b'B'))),
    entry(Format::BC3_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'B', b'R', b'G', b'X'))),

    entry(Format::BC4_UNORM_BLOCK, ConvFlags::empty(), ddspf::BC4_UNORM),
    entry(Format::BC4_SNORM_BLOCK, ConvFlags::empty(), ddspf::BC4_SNORM),
    entry(Format::BC5_UNORM_BLOCK, ConvFlags::empty(), ddspf::BC5_UNORM),
    entry(Format::BC5_SNORM_BLOCK, ConvFlags::empty(), ddspf::BC5_SNORM),

    entry(Format::BC4_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'A', b'T', b'I', b'1'))),
    entry(Format::BC5_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'A', b'T', b'I', b'2'))),
    entry(Format::BC5_UNORM_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'A', b'2', b'X', b'Y'))),

    entry(Format::BC6H_UFLOAT_BLOCK, ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'B', b'C', b'6', b'H'))),
    entry(Format::BC7_UNORM_BLOCK,   ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'B', b'C', b'7', b'L'))),
    entry(Format::BC7_UNORM_BLOCK,   ConvFlags::empty(), DdsPixelFormat::from_four_cc(make_four_cc(b'B', b'C', b'7', b'\0'))),

    entry(Format::B8G8R8A8_UNORM, ConvFlags::empty(),  ddspf::A8R8G8B8), // D3DFMT_A8R8G8B8
    entry(Format::B8G8R8A8_UNORM, ConvFlags::empty(),  ddspf::X8R8G8B8), // D3DFMT_X8R8G8B8
    entry(Format::R8G8B8A8_UNORM, ConvFlags::empty(),  ddspf::A8B8G8R8), // D3DFMT_A8B8G8R8
    entry(Format::R8G8B8A8_UNORM, ConvFlags::NOALPHA,  ddspf::X8B8G8R8), // D3DFMT_X8B8G8R8
    entry(Format::R16G16_UNORM,   ConvFlags::empty(),  ddspf::G16R16),   // D3DFMT_G16R16

    entry(Format::A2R10G10B10_UNORM_PACK32, ConvFlags::SWIZZLE, ddspf::A2R10G10B10), // D3DX reversal issue
    entry(Format::A2R10G10B10_UNORM_PACK32, ConvFlags::empty(), ddspf::A2B10G10R10), // D3DX reversal issue

    entry(Format::R8G8B8A8_UNORM, ConvFlags::EXPAND.union(ConvFlags::NOALPHA).union(ConvFlags::P888), ddspf::R8G8B8), // D3DFMT_R8G8B8

    entry(Format::B5G6R5_UNORM_PACK16,   ConvFlags::P565,  ddspf::R5G6B5),   // D3DFMT_R5G6B5
    entry(Format::B5G5R5A1_UNORM_PACK16, ConvFlags::P5551, ddspf::A1R5G5B5), // D3DFMT_A1R5G5B5
    entry(Format::B5G5R5A1_UNORM_PACK16, ConvFlags::P5551.union(ConvFlags::NOALPHA), ddspf::X1R5G5B5), // D3DFMT_X1R5G5B5

    entry(Format::R8G8B8A8_UNORM,      ConvFlags::EXPAND.union(ConvFlags::P8332), ddspf::A8R3G3B2), // D3DFMT_A8R3G3B2
    entry(Format::B5G6R5_UNORM_PACK16, ConvFlags::EXPAND.union(ConvFlags::P332),  ddspf::R3G3B2),   // D3DFMT_R3G3B2

    entry(Format::R8_UNORM,   ConvFlags::empty(), ddspf::L8),       // D3DFMT_L8
    entry(Format::R16_UNORM,  ConvFlags::empty(), ddspf::L16),      // D3DFMT_L16
    entry(Format::R8G8_UNORM, ConvFlags::empty(), ddspf::A8L8),     // D3DFMT_A8L8
    entry(Format::R8G8_UNORM, ConvFlags::empty(), ddspf::A8L8_ALT), // D3DFMT_A8L8 (alternative bitcount)

    // NVTT v1 wrote these with RGB instead of LUMINANCE.
    entry(Format::R8_UNORM,   ConvFlags::empty(), ddspf::L8_NVTT1),
    entry(Format::R16_UNORM,  ConvFlags::empty(), ddspf::L16_NVTT1),
    entry(Format::R8G8_UNORM, ConvFlags::empty(), ddspf::A8L8_NVTT1),

    entry(Format::A8_UNORM_KHR, ConvFlags::empty(), ddspf::A8), // D3DFMT_A8

    // Legacy D3DX formats using the D3DFMT enum value as a fourCC.
    entry(Format::R16G16B16A16_UNORM,  ConvFlags::empty(), DdsPixelFormat::from_four_cc(36)),  // D3DFMT_A16B16G16R16
    entry(Format::R16G16B16A16_SNORM,  ConvFlags::empty(), DdsPixelFormat::from_four_cc(110)), // D3DFMT_Q16W16V16U16
    entry(Format::R16_SFLOAT,          ConvFlags::empty(), DdsPixelFormat::from_four_cc(111)), // D3DFMT_R16F
    entry(Format::R16G16_SFLOAT,       ConvFlags::empty(), DdsPixelFormat::from_four_cc(112)), // D3DFMT_G16R16F
    entry(Format::R16G16B16A16_SFLOAT, ConvFlags::empty(), DdsPixelFormat::from_four_cc(113)), // D3DFMT_A16B16G16R16F
    entry(Format::R32_SFLOAT,          ConvFlags::empty(), DdsPixelFormat::from_four_cc(114)), // D3DFMT_R32F
    entry(Format::R32G32_SFLOAT,       ConvFlags::empty(), DdsPixelFormat::from_four_cc(115)), // D3DFMT_G32R32F
    entry(Format::R32G32B32A32_SFLOAT, ConvFlags::empty(), DdsPixelFormat::from_four_cc(116)), // D3DFMT_A32B32G32R32F

    entry(Format::R32_SFLOAT, ConvFlags::empty(),
        DdsPixelFormat::masks(PixelFormatFlags::RGB, 32, 0xffffffff, 0, 0, 0)), // D3DFMT_R32F (D3DX uses FourCC 114 instead)

    entry(Format::ETC2_R8G8B8A8_UNORM_BLOCK, ConvFlags::EXPAND.union(ConvFlags::PAL8).union(ConvFlags::A8P8), ddspf::A8P8), // D3DFMT_A8P8
    entry(Format::ETC2_R8G8B8A8_UNORM_BLOCK, ConvFlags::EXPAND.union(ConvFlags::PAL8),                        ddspf::P8),   // D3DFMT_P8

    entry(Format::B4G4R4A4_UNORM_PACK16, ConvFlags::P4444, ddspf::A4R4G4B4), // D3DFMT_A4R4G4B4
    entry(Format::B4G4R4A4_UNORM_PACK16, ConvFlags::NOALPHA.union(ConvFlags::P4444), ddspf::X4R4G4B4), // D3DFMT_X4R4G4B4
    entry(Format::B4G4R4A4_UNORM_PACK16, ConvFlags::EXPAND.union(ConvFlags::P44), ddspf::A4L4), // D3DFMT_A4L4

    entry(Format::G8B8G8R8_422_UNORM, ConvFlags::empty(), ddspf::YUY2), // D3DFMT_YUY2
    entry(Format::G8B8G8R8_422_UNORM, ConvFlags::SWIZZLE, ddspf::UYVY), // D3DFMT_UYVY

    entry(Format::R8G8_SNORM,     ConvFlags::empty(), ddspf::V8U8),     // D3DFMT_V8U8
    entry(Format::R8G8B8A8_SNORM, ConvFlags::empty(), ddspf::Q8W8V8U8), // D3DFMT_Q8W8V8U8
    entry(Format::R16G16_SNORM,   ConvFlags::empty(), ddspf::V16U16),   // D3DFMT_V16U16

    entry(Format::R8G8B8A8_UNORM,           ConvFlags::L6V5U5.union(ConvFlags::EXPAND), ddspf::L6V5U5),   // D3DFMT_L6V5U5
    entry(Format::R8G8B8A8_UNORM,           ConvFlags::L8U8V8, ddspf::X8L8V8U8),    // D3DFMT_X8L8V8U8
    entry(Format::A2R10G10B10_UNORM_PACK32, ConvFlags::WUV10,  ddspf::A2W10V10U10), // D3DFMT_A2W10V10U10
];

// We do not support the following legacy Direct3D 9 formats:
//   D3DFMT_D16_LOCKABLE (DDPF_ZBUFFER), FourCC 82 D3DFMT_D32F_LOCKABLE,
//   FourCC 117 D3DFMT_CxV8U8
// nor these known fourCC codes:
//   CTX1 (Xbox 360 only), EAR/EARG/ET2/ET2A (Ericsson), MET1 (D3DFMT_MULTI2_ARGB8)

/// Resolves a legacy pixel-format descriptor against the mapping table.
///
/// `nvtt_reserved` is `reserved1[9]` from the header; NVTT tags it with its
/// own fourCC and stores non-standard sRGB/normal bits in the descriptor
/// flags, which are masked off for matching and honored afterwards.
pub(crate) fn format_from_legacy_ddpf(
    ddpf: &DdsPixelFormat,
    nvtt_reserved: u32,
    mut flags: DdsFlags,
    conv_flags: &mut ConvFlags,
) -> Option<Format> {
    let mut ddpf_flags = ddpf.flags;

    if nvtt_reserved == FOURCC_NVTT {
        // Clear out non-standard nVidia DDS flags
        ddpf_flags &= !(PixelFormatFlags::NVTT_NORMAL | PixelFormatFlags::NVTT_SRGB).bits();
    }

    const FOURCC: u32 = PixelFormatFlags::FOURCC.bits();
    const ALPHAPIXELS: u32 = PixelFormatFlags::ALPHAPIXELS.bits();

    let matched = if ddpf.size == 0 && ddpf.flags == 0 && ddpf.four_cc != 0 {
        // Handle some DDS files where the DDPF_PIXELFORMAT is mostly zero
        LEGACY_DDS_MAP.iter().find(|legacy| {
            legacy.ddpf.flags & FOURCC != 0 && legacy.ddpf.four_cc == ddpf.four_cc
        })
    } else {
        LEGACY_DDS_MAP.iter().find(|legacy| {
            if (ddpf_flags & FOURCC != 0) && (legacy.ddpf.flags & FOURCC != 0) {
                // In case of fourCC codes, ignore any other bits in the flags
                return legacy.ddpf.four_cc == ddpf.four_cc;
            }

            if ddpf_flags != legacy.ddpf.flags || ddpf.rgb_bit_count != legacy.ddpf.rgb_bit_count {
                return false;
            }

            let entry_flags = PixelFormatFlags::from_bits_retain(legacy.ddpf.flags);
            if entry_flags.contains(PixelFormatFlags::PAL8) {
                true
            } else if entry_flags.contains(PixelFormatFlags::ALPHA) {
                ddpf.a_bit_mask == legacy.ddpf.a_bit_mask
            } else if entry_flags.contains(PixelFormatFlags::LUMINANCE) {
                if legacy.ddpf.flags & ALPHAPIXELS != 0 {
                    ddpf.r_bit_mask == legacy.ddpf.r_bit_mask
                        && ddpf.a_bit_mask == legacy.ddpf.a_bit_mask
                } else {
                    ddpf.r_bit_mask == legacy.ddpf.r_bit_mask
                }
            } else if entry_flags.contains(PixelFormatFlags::BUMPDUDV) {
                if legacy.ddpf.flags & ALPHAPIXELS != 0 {
                    ddpf.r_bit_mask == legacy.ddpf.r_bit_mask
                        && ddpf.a_bit_mask == legacy.ddpf.a_bit_mask
                } else {
                    ddpf.r_bit_mask == legacy.ddpf.r_bit_mask
                }
            } else if legacy.ddpf.flags & ALPHAPIXELS != 0 {
                // RGBA
                ddpf.r_bit_mask == legacy.ddpf.r_bit_mask
                    && ddpf.g_bit_mask == legacy.ddpf.g_bit_mask
                    && ddpf.b_bit_mask == legacy.ddpf.b_bit_mask
                    && ddpf.a_bit_mask == legacy.ddpf.a_bit_mask
            } else {
                // RGB
                ddpf.r_bit_mask == legacy.ddpf.r_bit_mask
                    && ddpf.g_bit_mask == legacy.ddpf.g_bit_mask
                    && ddpf.b_bit_mask == legacy.ddpf.b_bit_mask
            }
        })
    };

    let matched = matched?;

    // A bump-du/dv-with-alpha match is authoritative about channel order, so
    // the D3DX mask-reversal workaround no longer applies.
    let entry_flags = PixelFormatFlags::from_bits_retain(matched.ddpf.flags);
    if entry_flags.contains(PixelFormatFlags::BUMPDUDV) && matched.ddpf.flags & ALPHAPIXELS != 0 {
        flags.remove(DdsFlags::NO_R10B10G10A2_FIXUP);
    }

    let mut cflags = matched.conv_flags;
    let mut format = matched.format;

    if cflags.contains(ConvFlags::EXPAND) && flags.contains(DdsFlags::NO_LEGACY_EXPANSION) {
        return None;
    }

    if format == Format::A2R10G10B10_UNORM_PACK32 && flags.contains(DdsFlags::NO_R10B10G10A2_FIXUP) {
        cflags.toggle(ConvFlags::SWIZZLE);
    }

    if nvtt_reserved == FOURCC_NVTT && ddpf.flags & PixelFormatFlags::NVTT_SRGB.bits() != 0 {
        format = make_srgb(format);
    }

    *conv_flags = cflags;
    Some(format)
}
