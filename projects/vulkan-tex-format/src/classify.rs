//! Classification predicates and per-format size queries.
//!
//! Each predicate is a closed set of format codes. The codec crates dispatch
//! on exact membership, so these sets are load-bearing data, not heuristics.

use crate::Format;

/// Whether `fmt` is a known format code.
///
/// The valid range spans the core codes plus the registered extension blocks
/// (multi-planar, ASTC HDR, PVRTC, A8).
#[inline]
pub fn is_valid(fmt: Format) -> bool {
    (1..=1_000_609_013).contains(&fmt.as_raw())
}

/// Whether `fmt` stores fixed-size blocks of texels rather than individual
/// pixels (BC, ETC2/EAC, ASTC, PVRTC).
pub fn is_compressed(fmt: Format) -> bool {
    matches!(
        fmt,
        // BC (block compression)
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
            // ETC2 / EAC
            | Format::ETC2_R8G8B8_UNORM_BLOCK
            | Format::ETC2_R8G8B8_SRGB_BLOCK
            | Format::ETC2_R8G8B8A1_UNORM_BLOCK
            | Format::ETC2_R8G8B8A1_SRGB_BLOCK
            | Format::ETC2_R8G8B8A8_UNORM_BLOCK
            | Format::ETC2_R8G8B8A8_SRGB_BLOCK
            | Format::EAC_R11_UNORM_BLOCK
            | Format::EAC_R11_SNORM_BLOCK
            | Format::EAC_R11G11_UNORM_BLOCK
            | Format::EAC_R11G11_SNORM_BLOCK
            // ASTC LDR
            | Format::ASTC_4X4_UNORM_BLOCK
            | Format::ASTC_4X4_SRGB_BLOCK
            | Format::ASTC_5X4_UNORM_BLOCK
            | Format::ASTC_5X4_SRGB_BLOCK
            | Format::ASTC_5X5_UNORM_BLOCK
            | Format::ASTC_5X5_SRGB_BLOCK
            | Format::ASTC_6X5_UNORM_BLOCK
            | Format::ASTC_6X5_SRGB_BLOCK
            | Format::ASTC_6X6_UNORM_BLOCK
            | Format::ASTC_6X6_SRGB_BLOCK
            | Format::ASTC_8X5_UNORM_BLOCK
            | Format::ASTC_8X5_SRGB_BLOCK
            | Format::ASTC_8X6_UNORM_BLOCK
            | Format::ASTC_8X6_SRGB_BLOCK
            | Format::ASTC_8X8_UNORM_BLOCK
            | Format::ASTC_8X8_SRGB_BLOCK
            | Format::ASTC_10X5_UNORM_BLOCK
            | Format::ASTC_10X5_SRGB_BLOCK
            | Format::ASTC_10X6_UNORM_BLOCK
            | Format::ASTC_10X6_SRGB_BLOCK
            | Format::ASTC_10X8_UNORM_BLOCK
            | Format::ASTC_10X8_SRGB_BLOCK
            | Format::ASTC_10X10_UNORM_BLOCK
            | Format::ASTC_10X10_SRGB_BLOCK
            | Format::ASTC_12X10_UNORM_BLOCK
            | Format::ASTC_12X10_SRGB_BLOCK
            | Format::ASTC_12X12_UNORM_BLOCK
            | Format::ASTC_12X12_SRGB_BLOCK
            // ASTC HDR
            | Format::ASTC_4X4_SFLOAT_BLOCK
            | Format::ASTC_5X4_SFLOAT_BLOCK
            | Format::ASTC_5X5_SFLOAT_BLOCK
            | Format::ASTC_6X5_SFLOAT_BLOCK
            | Format::ASTC_6X6_SFLOAT_BLOCK
            | Format::ASTC_8X5_SFLOAT_BLOCK
            | Format::ASTC_8X6_SFLOAT_BLOCK
            | Format::ASTC_8X8_SFLOAT_BLOCK
            | Format::ASTC_10X5_SFLOAT_BLOCK
            | Format::ASTC_10X6_SFLOAT_BLOCK
            | Format::ASTC_10X8_SFLOAT_BLOCK
            | Format::ASTC_10X10_SFLOAT_BLOCK
            | Format::ASTC_12X10_SFLOAT_BLOCK
            | Format::ASTC_12X12_SFLOAT_BLOCK
            // PVRTC (PowerVR)
            | Format::PVRTC1_2BPP_UNORM_BLOCK_IMG
            | Format::PVRTC1_4BPP_UNORM_BLOCK_IMG
            | Format::PVRTC1_2BPP_SRGB_BLOCK_IMG
            | Format::PVRTC1_4BPP_SRGB_BLOCK_IMG
            | Format::PVRTC2_2BPP_UNORM_BLOCK_IMG
            | Format::PVRTC2_4BPP_UNORM_BLOCK_IMG
            | Format::PVRTC2_2BPP_SRGB_BLOCK_IMG
            | Format::PVRTC2_4BPP_SRGB_BLOCK_IMG
    )
}

/// Whether `fmt` coalesces multiple components into a unit wider than one
/// byte (packed composites and single-plane 4:2:2 layouts).
pub fn is_packed(fmt: Format) -> bool {
    matches!(
        fmt,
        Format::R4G4_UNORM_PACK8
            | Format::R4G4B4A4_UNORM_PACK16
            | Format::B4G4R4A4_UNORM_PACK16
            | Format::R5G6B5_UNORM_PACK16
            | Format::B5G6R5_UNORM_PACK16
            | Format::R5G5B5A1_UNORM_PACK16
            | Format::B5G5R5A1_UNORM_PACK16
            | Format::A1R5G5B5_UNORM_PACK16
            | Format::A8B8G8R8_UNORM_PACK32
            | Format::A8B8G8R8_SNORM_PACK32
            | Format::A8B8G8R8_USCALED_PACK32
            | Format::A8B8G8R8_SSCALED_PACK32
            | Format::A8B8G8R8_UINT_PACK32
            | Format::A8B8G8R8_SINT_PACK32
            | Format::A8B8G8R8_SRGB_PACK32
            | Format::A2R10G10B10_UNORM_PACK32
            | Format::A2R10G10B10_SNORM_PACK32
            | Format::A2R10G10B10_USCALED_PACK32
            | Format::A2R10G10B10_SSCALED_PACK32
            | Format::A2R10G10B10_UINT_PACK32
            | Format::A2R10G10B10_SINT_PACK32
            | Format::A2B10G10R10_UNORM_PACK32
            | Format::A2B10G10R10_SNORM_PACK32
            | Format::A2B10G10R10_USCALED_PACK32
            | Format::A2B10G10R10_SSCALED_PACK32
            | Format::A2B10G10R10_UINT_PACK32
            | Format::A2B10G10R10_SINT_PACK32
            | Format::B10G11R11_UFLOAT_PACK32
            | Format::E5B9G9R9_UFLOAT_PACK32
            | Format::X8_D24_UNORM_PACK32
            | Format::B8G8R8G8_422_UNORM
            | Format::G8B8G8R8_422_UNORM
            | Format::G10X6B10X6G10X6R10X6_422_UNORM_4PACK16
            | Format::G16B16G16R16_422_UNORM
    )
}

/// Whether `fmt` is a YCbCr video format (packed or planar, any bit depth).
pub fn is_video(fmt: Format) -> bool {
    matches!(
        fmt,
        // 8-bit
        Format::G8B8G8R8_422_UNORM
            | Format::B8G8R8G8_422_UNORM
            | Format::G8_B8_R8_3PLANE_420_UNORM
            | Format::G8_B8R8_2PLANE_420_UNORM
            | Format::G8_B8_R8_3PLANE_422_UNORM
            | Format::G8_B8R8_2PLANE_422_UNORM
            | Format::G8_B8_R8_3PLANE_444_UNORM
            // 10-bit
            | Format::G10X6B10X6G10X6R10X6_422_UNORM_4PACK16
            | Format::B10X6G10X6R10X6G10X6_422_UNORM_4PACK16
            | Format::G10X6_B10X6_R10X6_3PLANE_420_UNORM_3PACK16
            | Format::G10X6_B10X6R10X6_2PLANE_420_UNORM_3PACK16
            | Format::G10X6_B10X6_R10X6_3PLANE_422_UNORM_3PACK16
            | Format::G10X6_B10X6R10X6_2PLANE_422_UNORM_3PACK16
            | Format::G10X6_B10X6_R10X6_3PLANE_444_UNORM_3PACK16
            // 12-bit
            | Format::G12X4B12X4G12X4R12X4_422_UNORM_4PACK16
            | Format::B12X4G12X4R12X4G12X4_422_UNORM_4PACK16
            | Format::G12X4_B12X4_R12X4_3PLANE_420_UNORM_3PACK16
            | Format::G12X4_B12X4R12X4_2PLANE_420_UNORM_3PACK16
            | Format::G12X4_B12X4_R12X4_3PLANE_422_UNORM_3PACK16
            | Format::G12X4_B12X4R12X4_2PLANE_422_UNORM_3PACK16
            | Format::G12X4_B12X4_R12X4_3PLANE_444_UNORM_3PACK16
            // 16-bit
            | Format::G16B16G16R16_422_UNORM
            | Format::B16G16R16G16_422_UNORM
            | Format::G16_B16_R16_3PLANE_420_UNORM
            | Format::G16_B16R16_2PLANE_420_UNORM
            | Format::G16_B16_R16_3PLANE_422_UNORM
            | Format::G16_B16R16_2PLANE_422_UNORM
            | Format::G16_B16_R16_3PLANE_444_UNORM
    )
}

/// Whether `fmt` stores its components in separate memory planes.
///
/// The two combined depth/stencil formats are planar under the Direct3D 12
/// layout convention but not the Direct3D 11 one; `d3d12` selects which
/// convention the caller wants.
pub fn is_planar(fmt: Format, d3d12: bool) -> bool {
    match fmt {
        Format::G8_B8R8_2PLANE_420_UNORM
        | Format::G8_B8_R8_3PLANE_420_UNORM
        | Format::G8_B8R8_2PLANE_422_UNORM
        | Format::G8_B8_R8_3PLANE_422_UNORM
        | Format::G8_B8_R8_3PLANE_444_UNORM
        | Format::G10X6_B10X6_R10X6_3PLANE_420_UNORM_3PACK16
        | Format::G10X6_B10X6R10X6_2PLANE_420_UNORM_3PACK16
        | Format::G10X6_B10X6_R10X6_3PLANE_422_UNORM_3PACK16
        | Format::G10X6_B10X6R10X6_2PLANE_422_UNORM_3PACK16
        | Format::G10X6_B10X6_R10X6_3PLANE_444_UNORM_3PACK16
        | Format::G12X4_B12X4_R12X4_3PLANE_420_UNORM_3PACK16
        | Format::G12X4_B12X4R12X4_2PLANE_420_UNORM_3PACK16
        | Format::G12X4_B12X4_R12X4_3PLANE_422_UNORM_3PACK16
        | Format::G12X4_B12X4R12X4_2PLANE_422_UNORM_3PACK16
        | Format::G12X4_B12X4_R12X4_3PLANE_444_UNORM_3PACK16
        | Format::G16_B16R16_2PLANE_420_UNORM
        | Format::G16_B16_R16_3PLANE_420_UNORM
        | Format::G16_B16R16_2PLANE_422_UNORM
        | Format::G16_B16_R16_3PLANE_422_UNORM
        | Format::G16_B16_R16_3PLANE_444_UNORM => true,

        // Direct3D 12 considers these planar, Direct3D 11 does not.
        Format::D32_SFLOAT_S8_UINT | Format::D24_UNORM_S8_UINT => d3d12,

        _ => false,
    }
}

/// Palettes are expanded at load time and never appear as a canonical format.
#[inline]
pub fn is_palettized(_fmt: Format) -> bool {
    false
}

/// Whether `fmt` carries depth and/or stencil samples.
pub fn is_depth_stencil(fmt: Format) -> bool {
    matches!(
        fmt,
        Format::D16_UNORM
            | Format::X8_D24_UNORM_PACK32
            | Format::D32_SFLOAT
            | Format::S8_UINT
            | Format::D16_UNORM_S8_UINT
            | Format::D24_UNORM_S8_UINT
            | Format::D32_SFLOAT_S8_UINT
    )
}

/// Whether `fmt` is explicitly sRGB-encoded.
pub fn is_srgb(fmt: Format) -> bool {
    matches!(
        fmt,
        Format::R8G8B8A8_SRGB
            | Format::BC1_RGB_SRGB_BLOCK
            | Format::BC2_SRGB_BLOCK
            | Format::BC3_SRGB_BLOCK
            | Format::BC7_SRGB_BLOCK
            | Format::B8G8R8A8_SRGB
            | Format::B8G8R8_SRGB
            | Format::R8_SRGB
            | Format::R8G8_SRGB
            | Format::R8G8B8_SRGB
            | Format::A8B8G8R8_SRGB_PACK32
            | Format::ASTC_4X4_SRGB_BLOCK
            | Format::ASTC_5X4_SRGB_BLOCK
            | Format::ASTC_5X5_SRGB_BLOCK
            | Format::ASTC_6X5_SRGB_BLOCK
            | Format::ASTC_6X6_SRGB_BLOCK
            | Format::ASTC_8X5_SRGB_BLOCK
            | Format::ASTC_8X6_SRGB_BLOCK
            | Format::ASTC_8X8_SRGB_BLOCK
            | Format::ASTC_10X5_SRGB_BLOCK
            | Format::ASTC_10X6_SRGB_BLOCK
            | Format::ASTC_10X8_SRGB_BLOCK
            | Format::ASTC_10X10_SRGB_BLOCK
            | Format::ASTC_12X10_SRGB_BLOCK
            | Format::ASTC_12X12_SRGB_BLOCK
            | Format::PVRTC1_2BPP_SRGB_BLOCK_IMG
            | Format::PVRTC1_4BPP_SRGB_BLOCK_IMG
            | Format::PVRTC2_2BPP_SRGB_BLOCK_IMG
            | Format::PVRTC2_4BPP_SRGB_BLOCK_IMG
    )
}

/// Whether the blue component is stored first.
pub fn is_bgr(fmt: Format) -> bool {
    matches!(
        fmt,
        Format::B5G6R5_UNORM_PACK16
            | Format::B5G5R5A1_UNORM_PACK16
            | Format::B4G4R4A4_UNORM_PACK16
            | Format::B8G8R8_UNORM
            | Format::B8G8R8_SNORM
            | Format::B8G8R8_USCALED
            | Format::B8G8R8_SSCALED
            | Format::B8G8R8_UINT
            | Format::B8G8R8_SINT
            | Format::B8G8R8_SRGB
            | Format::B8G8R8A8_UNORM
            | Format::B8G8R8A8_SNORM
            | Format::B8G8R8A8_USCALED
            | Format::B8G8R8A8_SSCALED
            | Format::B8G8R8A8_UINT
            | Format::B8G8R8A8_SINT
            | Format::B8G8R8A8_SRGB
            | Format::B10G11R11_UFLOAT_PACK32
            | Format::B8G8R8G8_422_UNORM
    )
}

/// Whether `fmt` has an alpha channel.
pub fn has_alpha(fmt: Format) -> bool {
    matches!(
        fmt,
        // 1/4/5-bit alpha
        Format::R4G4B4A4_UNORM_PACK16
            | Format::B4G4R4A4_UNORM_PACK16
            | Format::R5G5B5A1_UNORM_PACK16
            | Format::B5G5R5A1_UNORM_PACK16
            | Format::A1R5G5B5_UNORM_PACK16
            // 8-bit alpha
            | Format::R8G8B8A8_UNORM
            | Format::R8G8B8A8_SNORM
            | Format::R8G8B8A8_USCALED
            | Format::R8G8B8A8_SSCALED
            | Format::R8G8B8A8_UINT
            | Format::R8G8B8A8_SINT
            | Format::R8G8B8A8_SRGB
            | Format::B8G8R8A8_UNORM
            | Format::B8G8R8A8_SNORM
            | Format::B8G8R8A8_USCALED
            | Format::B8G8R8A8_SSCALED
            | Format::B8G8R8A8_UINT
            | Format::B8G8R8A8_SINT
            | Format::B8G8R8A8_SRGB
            | Format::A8B8G8R8_UNORM_PACK32
            | Format::A8B8G8R8_SNORM_PACK32
            | Format::A8B8G8R8_USCALED_PACK32
            | Format::A8B8G8R8_SSCALED_PACK32
            | Format::A8B8G8R8_UINT_PACK32
            | Format::A8B8G8R8_SINT_PACK32
            | Format::A8B8G8R8_SRGB_PACK32
            // 2-bit alpha (10-10-10-2)
            | Format::A2R10G10B10_UNORM_PACK32
            | Format::A2R10G10B10_SNORM_PACK32
            | Format::A2R10G10B10_USCALED_PACK32
            | Format::A2R10G10B10_SSCALED_PACK32
            | Format::A2R10G10B10_UINT_PACK32
            | Format::A2R10G10B10_SINT_PACK32
            | Format::A2B10G10R10_UNORM_PACK32
            | Format::A2B10G10R10_SNORM_PACK32
            | Format::A2B10G10R10_USCALED_PACK32
            | Format::A2B10G10R10_SSCALED_PACK32
            | Format::A2B10G10R10_UINT_PACK32
            | Format::A2B10G10R10_SINT_PACK32
            // 16 bits per channel
            | Format::R16G16B16A16_UNORM
            | Format::R16G16B16A16_SNORM
            | Format::R16G16B16A16_USCALED
            | Format::R16G16B16A16_SSCALED
            | Format::R16G16B16A16_UINT
            | Format::R16G16B16A16_SINT
            | Format::R16G16B16A16_SFLOAT
            // 32 bits per channel
            | Format::R32G32B32A32_UINT
            | Format::R32G32B32A32_SINT
            | Format::R32G32B32A32_SFLOAT
            // 64 bits per channel
            | Format::R64G64B64A64_UINT
            | Format::R64G64B64A64_SINT
            | Format::R64G64B64A64_SFLOAT
            // BC1 (DXT1) with 1-bit alpha
            | Format::BC1_RGBA_UNORM_BLOCK
            | Format::BC1_RGBA_SRGB_BLOCK
            // BC2 (DXT3) explicit alpha
            | Format::BC2_UNORM_BLOCK
            | Format::BC2_SRGB_BLOCK
            // BC3 (DXT5) interpolated alpha
            | Format::BC3_UNORM_BLOCK
            | Format::BC3_SRGB_BLOCK
            // BC7
            | Format::BC7_UNORM_BLOCK
            | Format::BC7_SRGB_BLOCK
            // ETC2 variants with alpha
            | Format::ETC2_R8G8B8A1_UNORM_BLOCK
            | Format::ETC2_R8G8B8A1_SRGB_BLOCK
            | Format::ETC2_R8G8B8A8_UNORM_BLOCK
            | Format::ETC2_R8G8B8A8_SRGB_BLOCK
            // ASTC (always RGBA)
            | Format::ASTC_4X4_UNORM_BLOCK
            | Format::ASTC_4X4_SRGB_BLOCK
            | Format::ASTC_4X4_SFLOAT_BLOCK
            | Format::ASTC_5X4_UNORM_BLOCK
            | Format::ASTC_5X4_SRGB_BLOCK
            | Format::ASTC_5X4_SFLOAT_BLOCK
            | Format::ASTC_5X5_UNORM_BLOCK
            | Format::ASTC_5X5_SRGB_BLOCK
            | Format::ASTC_5X5_SFLOAT_BLOCK
            | Format::ASTC_6X5_UNORM_BLOCK
            | Format::ASTC_6X5_SRGB_BLOCK
            | Format::ASTC_6X5_SFLOAT_BLOCK
            | Format::ASTC_6X6_UNORM_BLOCK
            | Format::ASTC_6X6_SRGB_BLOCK
            | Format::ASTC_6X6_SFLOAT_BLOCK
            | Format::ASTC_8X5_UNORM_BLOCK
            | Format::ASTC_8X5_SRGB_BLOCK
            | Format::ASTC_8X5_SFLOAT_BLOCK
            | Format::ASTC_8X6_UNORM_BLOCK
            | Format::ASTC_8X6_SRGB_BLOCK
            | Format::ASTC_8X6_SFLOAT_BLOCK
            | Format::ASTC_8X8_UNORM_BLOCK
            | Format::ASTC_8X8_SRGB_BLOCK
            | Format::ASTC_8X8_SFLOAT_BLOCK
            | Format::ASTC_10X5_UNORM_BLOCK
            | Format::ASTC_10X5_SRGB_BLOCK
            | Format::ASTC_10X5_SFLOAT_BLOCK
            | Format::ASTC_10X6_UNORM_BLOCK
            | Format::ASTC_10X6_SRGB_BLOCK
            | Format::ASTC_10X6_SFLOAT_BLOCK
            | Format::ASTC_10X8_UNORM_BLOCK
            | Format::ASTC_10X8_SRGB_BLOCK
            | Format::ASTC_10X8_SFLOAT_BLOCK
            | Format::ASTC_10X10_UNORM_BLOCK
            | Format::ASTC_10X10_SRGB_BLOCK
            | Format::ASTC_10X10_SFLOAT_BLOCK
            | Format::ASTC_12X10_UNORM_BLOCK
            | Format::ASTC_12X10_SRGB_BLOCK
            | Format::ASTC_12X10_SFLOAT_BLOCK
            | Format::ASTC_12X12_UNORM_BLOCK
            | Format::ASTC_12X12_SRGB_BLOCK
            | Format::ASTC_12X12_SFLOAT_BLOCK
            // PVRTC
            | Format::PVRTC1_2BPP_UNORM_BLOCK_IMG
            | Format::PVRTC1_4BPP_UNORM_BLOCK_IMG
            | Format::PVRTC2_2BPP_UNORM_BLOCK_IMG
            | Format::PVRTC2_4BPP_UNORM_BLOCK_IMG
            | Format::PVRTC1_2BPP_SRGB_BLOCK_IMG
            | Format::PVRTC1_4BPP_SRGB_BLOCK_IMG
            | Format::PVRTC2_2BPP_SRGB_BLOCK_IMG
            | Format::PVRTC2_4BPP_SRGB_BLOCK_IMG
            // VK_KHR_maintenance5
            | Format::A8_UNORM_KHR
    )
}

/// Effective bits per pixel, including padding bits.
///
/// Block-compressed formats report their amortized per-texel width (e.g. 4
/// for BC1's 64-bit 4x4 blocks); formats with no defined width report 0.
pub fn bits_per_pixel(fmt: Format) -> usize {
    match fmt {
        // 8-bit (1 byte)
        Format::R8_UNORM
        | Format::R8_SNORM
        | Format::R8_USCALED
        | Format::R8_SSCALED
        | Format::R8_UINT
        | Format::R8_SINT
        | Format::R8_SRGB
        | Format::S8_UINT
        | Format::R4G4_UNORM_PACK8 => 8,

        // 16-bit (2 bytes)
        Format::R8G8_UNORM
        | Format::R8G8_SNORM
        | Format::R8G8_USCALED
        | Format::R8G8_SSCALED
        | Format::R8G8_UINT
        | Format::R8G8_SINT
        | Format::R8G8_SRGB
        | Format::R16_UNORM
        | Format::R16_SNORM
        | Format::R16_USCALED
        | Format::R16_SSCALED
        | Format::R16_UINT
        | Format::R16_SINT
        | Format::R16_SFLOAT
        | Format::D16_UNORM
        | Format::R4G4B4A4_UNORM_PACK16
        | Format::B4G4R4A4_UNORM_PACK16
        | Format::R5G6B5_UNORM_PACK16
        | Format::B5G6R5_UNORM_PACK16
        | Format::R5G5B5A1_UNORM_PACK16
        | Format::B5G5R5A1_UNORM_PACK16
        | Format::A1R5G5B5_UNORM_PACK16
        | Format::R10X6_UNORM_PACK16
        | Format::R12X4_UNORM_PACK16 => 16,

        // 24-bit (3 bytes)
        Format::R8G8B8_UNORM
        | Format::R8G8B8_SNORM
        | Format::R8G8B8_USCALED
        | Format::R8G8B8_SSCALED
        | Format::R8G8B8_UINT
        | Format::R8G8B8_SINT
        | Format::R8G8B8_SRGB
        | Format::B8G8R8_UNORM
        | Format::B8G8R8_SNORM
        | Format::B8G8R8_USCALED
        | Format::B8G8R8_SSCALED
        | Format::B8G8R8_UINT
        | Format::B8G8R8_SINT
        | Format::B8G8R8_SRGB
        | Format::D16_UNORM_S8_UINT => 24,

        // 32-bit (4 bytes)
        Format::R8G8B8A8_UNORM
        | Format::R8G8B8A8_SNORM
        | Format::R8G8B8A8_USCALED
        | Format::R8G8B8A8_SSCALED
        | Format::R8G8B8A8_UINT
        | Format::R8G8B8A8_SINT
        | Format::R8G8B8A8_SRGB
        | Format::B8G8R8A8_UNORM
        | Format::B8G8R8A8_SNORM
        | Format::B8G8R8A8_USCALED
        | Format::B8G8R8A8_SSCALED
        | Format::B8G8R8A8_UINT
        | Format::B8G8R8A8_SINT
        | Format::B8G8R8A8_SRGB
        | Format::A8B8G8R8_UNORM_PACK32
        | Format::A8B8G8R8_SNORM_PACK32
        | Format::A8B8G8R8_USCALED_PACK32
        | Format::A8B8G8R8_SSCALED_PACK32
        | Format::A8B8G8R8_UINT_PACK32
        | Format::A8B8G8R8_SINT_PACK32
        | Format::A8B8G8R8_SRGB_PACK32
        | Format::A2R10G10B10_UNORM_PACK32
        | Format::A2R10G10B10_SNORM_PACK32
        | Format::A2R10G10B10_USCALED_PACK32
        | Format::A2R10G10B10_SSCALED_PACK32
        | Format::A2R10G10B10_UINT_PACK32
        | Format::A2R10G10B10_SINT_PACK32
        | Format::A2B10G10R10_UNORM_PACK32
        | Format::A2B10G10R10_SNORM_PACK32
        | Format::A2B10G10R10_USCALED_PACK32
        | Format::A2B10G10R10_SSCALED_PACK32
        | Format::A2B10G10R10_UINT_PACK32
        | Format::A2B10G10R10_SINT_PACK32
        | Format::B10G11R11_UFLOAT_PACK32
        | Format::E5B9G9R9_UFLOAT_PACK32
        | Format::R16G16_UNORM
        | Format::R16G16_SNORM
        | Format::R16G16_USCALED
        | Format::R16G16_SSCALED
        | Format::R16G16_UINT
        | Format::R16G16_SINT
        | Format::R16G16_SFLOAT
        | Format::R32_UINT
        | Format::R32_SINT
        | Format::R32_SFLOAT
        | Format::D32_SFLOAT
        | Format::D24_UNORM_S8_UINT
        | Format::X8_D24_UNORM_PACK32
        | Format::R10X6G10X6_UNORM_2PACK16
        | Format::R12X4G12X4_UNORM_2PACK16 => 32,

        // 48-bit (6 bytes)
        Format::R16G16B16_UNORM
        | Format::R16G16B16_SNORM
        | Format::R16G16B16_USCALED
        | Format::R16G16B16_SSCALED
        | Format::R16G16B16_UINT
        | Format::R16G16B16_SINT
        | Format::R16G16B16_SFLOAT => 48,

        // 64-bit (8 bytes)
        Format::R16G16B16A16_UNORM
        | Format::R16G16B16A16_SNORM
        | Format::R16G16B16A16_USCALED
        | Format::R16G16B16A16_SSCALED
        | Format::R16G16B16A16_UINT
        | Format::R16G16B16A16_SINT
        | Format::R16G16B16A16_SFLOAT
        | Format::R32G32_UINT
        | Format::R32G32_SINT
        | Format::R32G32_SFLOAT
        | Format::R64_UINT
        | Format::R64_SINT
        | Format::R64_SFLOAT => 64,

        // 96-bit (12 bytes)
        Format::R32G32B32_UINT | Format::R32G32B32_SINT | Format::R32G32B32_SFLOAT => 96,

        // 128-bit (16 bytes)
        Format::R32G32B32A32_UINT
        | Format::R32G32B32A32_SINT
        | Format::R32G32B32A32_SFLOAT
        | Format::R64G64_UINT
        | Format::R64G64_SINT
        | Format::R64G64_SFLOAT => 128,

        // 192-bit (24 bytes)
        Format::R64G64B64_UINT | Format::R64G64B64_SINT | Format::R64G64B64_SFLOAT => 192,

        // 256-bit (32 bytes)
        Format::R64G64B64A64_UINT | Format::R64G64B64A64_SINT | Format::R64G64B64A64_SFLOAT => 256,

        // BC1/BC4: 64 bits per 4x4 block
        Format::BC1_RGB_UNORM_BLOCK
        | Format::BC1_RGB_SRGB_BLOCK
        | Format::BC1_RGBA_UNORM_BLOCK
        | Format::BC1_RGBA_SRGB_BLOCK
        | Format::BC4_UNORM_BLOCK
        | Format::BC4_SNORM_BLOCK => 4,

        // BC2/3/5/6/7: 128 bits per 4x4 block
        Format::BC2_UNORM_BLOCK
        | Format::BC2_SRGB_BLOCK
        | Format::BC3_UNORM_BLOCK
        | Format::BC3_SRGB_BLOCK
        | Format::BC5_UNORM_BLOCK
        | Format::BC5_SNORM_BLOCK
        | Format::BC6H_UFLOAT_BLOCK
        | Format::BC6H_SFLOAT_BLOCK
        | Format::BC7_UNORM_BLOCK
        | Format::BC7_SRGB_BLOCK => 8,

        // ETC2 RGB / EAC R11: 64 bits per 4x4 block
        Format::ETC2_R8G8B8_UNORM_BLOCK
        | Format::ETC2_R8G8B8_SRGB_BLOCK
        | Format::ETC2_R8G8B8A1_UNORM_BLOCK
        | Format::ETC2_R8G8B8A1_SRGB_BLOCK
        | Format::EAC_R11_UNORM_BLOCK
        | Format::EAC_R11_SNORM_BLOCK => 4,

        // ETC2 RGBA / EAC RG11: 128 bits per 4x4 block
        Format::ETC2_R8G8B8A8_UNORM_BLOCK
        | Format::ETC2_R8G8B8A8_SRGB_BLOCK
        | Format::EAC_R11G11_UNORM_BLOCK
        | Format::EAC_R11G11_SNORM_BLOCK => 8,

        Format::PVRTC1_2BPP_UNORM_BLOCK_IMG
        | Format::PVRTC1_2BPP_SRGB_BLOCK_IMG
        | Format::PVRTC2_2BPP_UNORM_BLOCK_IMG
        | Format::PVRTC2_2BPP_SRGB_BLOCK_IMG => 2,

        Format::PVRTC1_4BPP_UNORM_BLOCK_IMG
        | Format::PVRTC1_4BPP_SRGB_BLOCK_IMG
        | Format::PVRTC2_4BPP_UNORM_BLOCK_IMG
        | Format::PVRTC2_4BPP_SRGB_BLOCK_IMG => 4,

        // ASTC 4x4: 128 bits per 16 texels
        Format::ASTC_4X4_UNORM_BLOCK | Format::ASTC_4X4_SRGB_BLOCK | Format::ASTC_4X4_SFLOAT_BLOCK => 8,

        _ => 0,
    }
}

/// Dominant per-component bit depth.
///
/// Special values: 9 for the RGB9E5 shared-exponent mantissa, 11 for the
/// 11-11-10 float format. Compressed formats have no single per-color width
/// and report 0.
pub fn bits_per_color(fmt: Format) -> usize {
    match fmt {
        // 4-bit channels
        Format::R4G4_UNORM_PACK8 | Format::R4G4B4A4_UNORM_PACK16 | Format::B4G4R4A4_UNORM_PACK16 => 4,

        // 5/6-bit mixed
        Format::R5G6B5_UNORM_PACK16 | Format::B5G6R5_UNORM_PACK16 => 6,

        Format::R5G5B5A1_UNORM_PACK16
        | Format::B5G5R5A1_UNORM_PACK16
        | Format::A1R5G5B5_UNORM_PACK16 => 5,

        // 8-bit channels
        Format::R8_UNORM
        | Format::R8_SNORM
        | Format::R8_USCALED
        | Format::R8_SSCALED
        | Format::R8_UINT
        | Format::R8_SINT
        | Format::R8_SRGB
        | Format::R8G8_UNORM
        | Format::R8G8_SNORM
        | Format::R8G8_USCALED
        | Format::R8G8_SSCALED
        | Format::R8G8_UINT
        | Format::R8G8_SINT
        | Format::R8G8_SRGB
        | Format::R8G8B8_UNORM
        | Format::R8G8B8_SNORM
        | Format::R8G8B8_USCALED
        | Format::R8G8B8_SSCALED
        | Format::R8G8B8_UINT
        | Format::R8G8B8_SINT
        | Format::R8G8B8_SRGB
        | Format::B8G8R8_UNORM
        | Format::B8G8R8_SNORM
        | Format::B8G8R8_USCALED
        | Format::B8G8R8_SSCALED
        | Format::B8G8R8_UINT
        | Format::B8G8R8_SINT
        | Format::B8G8R8_SRGB
        | Format::R8G8B8A8_UNORM
        | Format::R8G8B8A8_SNORM
        | Format::R8G8B8A8_USCALED
        | Format::R8G8B8A8_SSCALED
        | Format::R8G8B8A8_UINT
        | Format::R8G8B8A8_SINT
        | Format::R8G8B8A8_SRGB
        | Format::B8G8R8A8_UNORM
        | Format::B8G8R8A8_SNORM
        | Format::B8G8R8A8_USCALED
        | Format::B8G8R8A8_SSCALED
        | Format::B8G8R8A8_UINT
        | Format::B8G8R8A8_SINT
        | Format::B8G8R8A8_SRGB
        | Format::A8B8G8R8_UNORM_PACK32
        | Format::A8B8G8R8_SNORM_PACK32
        | Format::A8B8G8R8_USCALED_PACK32
        | Format::A8B8G8R8_SSCALED_PACK32
        | Format::A8B8G8R8_UINT_PACK32
        | Format::A8B8G8R8_SINT_PACK32
        | Format::A8B8G8R8_SRGB_PACK32
        | Format::S8_UINT
        | Format::A8_UNORM_KHR => 8,

        // 10-bit channels
        Format::A2R10G10B10_UNORM_PACK32
        | Format::A2R10G10B10_SNORM_PACK32
        | Format::A2R10G10B10_USCALED_PACK32
        | Format::A2R10G10B10_SSCALED_PACK32
        | Format::A2R10G10B10_UINT_PACK32
        | Format::A2R10G10B10_SINT_PACK32
        | Format::A2B10G10R10_UNORM_PACK32
        | Format::A2B10G10R10_SNORM_PACK32
        | Format::A2B10G10R10_USCALED_PACK32
        | Format::A2B10G10R10_SSCALED_PACK32
        | Format::A2B10G10R10_UINT_PACK32
        | Format::A2B10G10R10_SINT_PACK32
        | Format::R10X6_UNORM_PACK16
        | Format::R10X6G10X6_UNORM_2PACK16 => 10,

        // 11-bit float
        Format::B10G11R11_UFLOAT_PACK32 => 11,

        // 12-bit channels
        Format::R12X4_UNORM_PACK16 | Format::R12X4G12X4_UNORM_2PACK16 => 12,

        // 16-bit channels
        Format::R16_UNORM
        | Format::R16_SNORM
        | Format::R16_USCALED
        | Format::R16_SSCALED
        | Format::R16_UINT
        | Format::R16_SINT
        | Format::R16_SFLOAT
        | Format::R16G16_UNORM
        | Format::R16G16_SNORM
        | Format::R16G16_USCALED
        | Format::R16G16_SSCALED
        | Format::R16G16_UINT
        | Format::R16G16_SINT
        | Format::R16G16_SFLOAT
        | Format::R16G16B16_UNORM
        | Format::R16G16B16_SNORM
        | Format::R16G16B16_USCALED
        | Format::R16G16B16_SSCALED
        | Format::R16G16B16_UINT
        | Format::R16G16B16_SINT
        | Format::R16G16B16_SFLOAT
        | Format::R16G16B16A16_UNORM
        | Format::R16G16B16A16_SNORM
        | Format::R16G16B16A16_USCALED
        | Format::R16G16B16A16_SSCALED
        | Format::R16G16B16A16_UINT
        | Format::R16G16B16A16_SINT
        | Format::R16G16B16A16_SFLOAT
        | Format::D16_UNORM
        | Format::D16_UNORM_S8_UINT => 16,

        // 24-bit (depth only)
        Format::D24_UNORM_S8_UINT | Format::X8_D24_UNORM_PACK32 => 24,

        // 32-bit channels
        Format::R32_UINT
        | Format::R32_SINT
        | Format::R32_SFLOAT
        | Format::R32G32_UINT
        | Format::R32G32_SINT
        | Format::R32G32_SFLOAT
        | Format::R32G32B32_UINT
        | Format::R32G32B32_SINT
        | Format::R32G32B32_SFLOAT
        | Format::R32G32B32A32_UINT
        | Format::R32G32B32A32_SINT
        | Format::R32G32B32A32_SFLOAT
        | Format::D32_SFLOAT
        | Format::D32_SFLOAT_S8_UINT => 32,

        // 64-bit channels
        Format::R64_UINT
        | Format::R64_SINT
        | Format::R64_SFLOAT
        | Format::R64G64_UINT
        | Format::R64G64_SINT
        | Format::R64G64_SFLOAT
        | Format::R64G64B64_UINT
        | Format::R64G64B64_SINT
        | Format::R64G64B64_SFLOAT
        | Format::R64G64B64A64_UINT
        | Format::R64G64B64A64_SINT
        | Format::R64G64B64A64_SFLOAT => 64,

        // Shared exponent, 9-bit mantissa
        Format::E5B9G9R9_UFLOAT_PACK32 => 9,

        _ => 0,
    }
}

/// Byte size of one compression block; 0 for non-block formats.
pub fn bytes_per_block(fmt: Format) -> usize {
    match fmt {
        // 8 bytes (64 bits) per block
        Format::BC1_RGB_UNORM_BLOCK
        | Format::BC1_RGB_SRGB_BLOCK
        | Format::BC1_RGBA_UNORM_BLOCK
        | Format::BC1_RGBA_SRGB_BLOCK
        | Format::BC4_UNORM_BLOCK
        | Format::BC4_SNORM_BLOCK
        | Format::ETC2_R8G8B8_UNORM_BLOCK
        | Format::ETC2_R8G8B8_SRGB_BLOCK
        | Format::ETC2_R8G8B8A1_UNORM_BLOCK
        | Format::ETC2_R8G8B8A1_SRGB_BLOCK
        | Format::EAC_R11_UNORM_BLOCK
        | Format::EAC_R11_SNORM_BLOCK
        | Format::PVRTC1_2BPP_UNORM_BLOCK_IMG
        | Format::PVRTC1_4BPP_UNORM_BLOCK_IMG
        | Format::PVRTC2_2BPP_UNORM_BLOCK_IMG
        | Format::PVRTC2_4BPP_UNORM_BLOCK_IMG
        | Format::PVRTC1_2BPP_SRGB_BLOCK_IMG
        | Format::PVRTC1_4BPP_SRGB_BLOCK_IMG
        | Format::PVRTC2_2BPP_SRGB_BLOCK_IMG
        | Format::PVRTC2_4BPP_SRGB_BLOCK_IMG => 8,

        // 16 bytes (128 bits) per block
        Format::BC2_UNORM_BLOCK
        | Format::BC2_SRGB_BLOCK
        | Format::BC3_UNORM_BLOCK
        | Format::BC3_SRGB_BLOCK
        | Format::BC5_UNORM_BLOCK
        | Format::BC5_SNORM_BLOCK
        | Format::BC6H_UFLOAT_BLOCK
        | Format::BC6H_SFLOAT_BLOCK
        | Format::BC7_UNORM_BLOCK
        | Format::BC7_SRGB_BLOCK
        | Format::ETC2_R8G8B8A8_UNORM_BLOCK
        | Format::ETC2_R8G8B8A8_SRGB_BLOCK
        | Format::EAC_R11G11_UNORM_BLOCK
        | Format::EAC_R11G11_SNORM_BLOCK
        | Format::ASTC_4X4_UNORM_BLOCK
        | Format::ASTC_4X4_SRGB_BLOCK
        | Format::ASTC_4X4_SFLOAT_BLOCK
        | Format::ASTC_5X4_UNORM_BLOCK
        | Format::ASTC_5X4_SRGB_BLOCK
        | Format::ASTC_5X4_SFLOAT_BLOCK
        | Format::ASTC_5X5_UNORM_BLOCK
        | Format::ASTC_5X5_SRGB_BLOCK
        | Format::ASTC_5X5_SFLOAT_BLOCK
        | Format::ASTC_6X5_UNORM_BLOCK
        | Format::ASTC_6X5_SRGB_BLOCK
        | Format::ASTC_6X5_SFLOAT_BLOCK
        | Format::ASTC_6X6_UNORM_BLOCK
        | Format::ASTC_6X6_SRGB_BLOCK
        | Format::ASTC_6X6_SFLOAT_BLOCK
        | Format::ASTC_8X5_UNORM_BLOCK
        | Format::ASTC_8X5_SRGB_BLOCK
        | Format::ASTC_8X5_SFLOAT_BLOCK
        | Format::ASTC_8X6_UNORM_BLOCK
        | Format::ASTC_8X6_SRGB_BLOCK
        | Format::ASTC_8X6_SFLOAT_BLOCK
        | Format::ASTC_8X8_UNORM_BLOCK
        | Format::ASTC_8X8_SRGB_BLOCK
        | Format::ASTC_8X8_SFLOAT_BLOCK
        | Format::ASTC_10X5_UNORM_BLOCK
        | Format::ASTC_10X5_SRGB_BLOCK
        | Format::ASTC_10X5_SFLOAT_BLOCK
        | Format::ASTC_10X6_UNORM_BLOCK
        | Format::ASTC_10X6_SRGB_BLOCK
        | Format::ASTC_10X6_SFLOAT_BLOCK
        | Format::ASTC_10X8_UNORM_BLOCK
        | Format::ASTC_10X8_SRGB_BLOCK
        | Format::ASTC_10X8_SFLOAT_BLOCK
        | Format::ASTC_10X10_UNORM_BLOCK
        | Format::ASTC_10X10_SRGB_BLOCK
        | Format::ASTC_10X10_SFLOAT_BLOCK
        | Format::ASTC_12X10_UNORM_BLOCK
        | Format::ASTC_12X10_SRGB_BLOCK
        | Format::ASTC_12X10_SFLOAT_BLOCK
        | Format::ASTC_12X12_UNORM_BLOCK
        | Format::ASTC_12X12_SRGB_BLOCK
        | Format::ASTC_12X12_SFLOAT_BLOCK => 16,

        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn undefined_is_not_valid() {
        assert!(!is_valid(Format::UNDEFINED));
        assert!(is_valid(Format::R8G8B8A8_UNORM));
        assert!(is_valid(Format::A8_UNORM_KHR));
    }

    #[rstest]
    #[case(Format::BC1_RGB_UNORM_BLOCK, 8)]
    #[case(Format::BC3_UNORM_BLOCK, 16)]
    #[case(Format::BC7_SRGB_BLOCK, 16)]
    #[case(Format::ETC2_R8G8B8_UNORM_BLOCK, 8)]
    #[case(Format::EAC_R11G11_SNORM_BLOCK, 16)]
    #[case(Format::ASTC_12X12_SFLOAT_BLOCK, 16)]
    #[case(Format::R8G8B8A8_UNORM, 0)]
    fn block_sizes(#[case] fmt: Format, #[case] expected: usize) {
        assert_eq!(bytes_per_block(fmt), expected);
        assert_eq!(is_compressed(fmt), expected != 0);
    }

    #[rstest]
    #[case(Format::R8G8B8A8_UNORM, 32)]
    #[case(Format::B5G6R5_UNORM_PACK16, 16)]
    #[case(Format::R32G32B32A32_SFLOAT, 128)]
    #[case(Format::R64G64B64A64_SFLOAT, 256)]
    #[case(Format::D16_UNORM_S8_UINT, 24)]
    #[case(Format::BC1_RGB_UNORM_BLOCK, 4)]
    #[case(Format::PVRTC1_2BPP_UNORM_BLOCK_IMG, 2)]
    fn pixel_widths(#[case] fmt: Format, #[case] expected: usize) {
        assert_eq!(bits_per_pixel(fmt), expected);
    }

    #[rstest]
    #[case(Format::E5B9G9R9_UFLOAT_PACK32, 9)]
    #[case(Format::B10G11R11_UFLOAT_PACK32, 11)]
    #[case(Format::A2B10G10R10_UNORM_PACK32, 10)]
    #[case(Format::B5G6R5_UNORM_PACK16, 6)]
    #[case(Format::B5G5R5A1_UNORM_PACK16, 5)]
    #[case(Format::BC7_UNORM_BLOCK, 0)]
    fn color_depths(#[case] fmt: Format, #[case] expected: usize) {
        assert_eq!(bits_per_color(fmt), expected);
    }

    #[test]
    fn depth_stencil_planarity_depends_on_convention() {
        assert!(is_planar(Format::D24_UNORM_S8_UINT, true));
        assert!(!is_planar(Format::D24_UNORM_S8_UINT, false));
        assert!(is_planar(Format::D32_SFLOAT_S8_UINT, true));
        assert!(!is_planar(Format::D32_SFLOAT_S8_UINT, false));
        // True planes are planar under either convention.
        assert!(is_planar(Format::G8_B8R8_2PLANE_420_UNORM, false));
    }

    #[test]
    fn packed_422_formats_are_both_packed_and_video() {
        for fmt in [
            Format::G8B8G8R8_422_UNORM,
            Format::B8G8R8G8_422_UNORM,
            Format::G16B16G16R16_422_UNORM,
        ] {
            assert!(is_packed(fmt));
            assert!(is_video(fmt));
        }
    }

    #[test]
    fn palettized_is_always_false() {
        assert!(!is_palettized(Format::R8_UNORM));
        assert!(!is_palettized(Format::UNDEFINED));
    }
}
