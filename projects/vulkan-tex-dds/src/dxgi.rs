//! DXGI format code translation.
//!
//! The DX10 header extension stores DXGI format codes on disk; in memory the
//! library speaks Vulkan formats. The table below is ordered: the first row
//! matching a Vulkan format supplies the canonical DXGI code, and the first
//! row matching a DXGI code supplies the canonical Vulkan format (some DXGI
//! codes are aliases of one Vulkan layout and vice versa).

use vulkan_tex_format::Format;

#[rustfmt::skip]
const DXGI_MAP: &[(Format, u32)] = &[
    (Format::R32G32B32A32_SFLOAT, 2),   // DXGI_FORMAT_R32G32B32A32_FLOAT
    (Format::R32G32B32A32_UINT, 3),
    (Format::R32G32B32A32_SINT, 4),
    (Format::R32G32B32_SFLOAT, 6),
    (Format::R32G32B32_UINT, 7),
    (Format::R32G32B32_SINT, 8),
    (Format::R16G16B16A16_SFLOAT, 10),
    (Format::R16G16B16A16_UNORM, 11),
    (Format::R16G16B16A16_UINT, 12),
    (Format::R16G16B16A16_SNORM, 13),
    (Format::R16G16B16A16_SINT, 14),
    (Format::R32G32_SFLOAT, 16),
    (Format::R32G32_UINT, 17),
    (Format::R32G32_SINT, 18),
    (Format::D32_SFLOAT_S8_UINT, 20),   // DXGI_FORMAT_D32_FLOAT_S8X24_UINT
    (Format::A2B10G10R10_UNORM_PACK32, 24), // DXGI_FORMAT_R10G10B10A2_UNORM
    (Format::A2B10G10R10_UINT_PACK32, 25),
    (Format::B10G11R11_UFLOAT_PACK32, 26),  // DXGI_FORMAT_R11G11B10_FLOAT
    (Format::R8G8B8A8_UNORM, 28),
    (Format::R8G8B8A8_SRGB, 29),
    (Format::R8G8B8A8_UINT, 30),
    (Format::R8G8B8A8_SNORM, 31),
    (Format::R8G8B8A8_SINT, 32),
    (Format::R16G16_SFLOAT, 34),
    (Format::R16G16_UNORM, 35),
    (Format::R16G16_UINT, 36),
    (Format::R16G16_SNORM, 37),
    (Format::R16G16_SINT, 38),
    (Format::D32_SFLOAT, 40),
    (Format::R32_SFLOAT, 41),
    (Format::R32_UINT, 42),
    (Format::R32_SINT, 43),
    (Format::D24_UNORM_S8_UINT, 45),
    (Format::X8_D24_UNORM_PACK32, 46),  // DXGI_FORMAT_R24_UNORM_X8_TYPELESS
    (Format::R8G8_UNORM, 49),
    (Format::R8G8_UINT, 50),
    (Format::R8G8_SNORM, 51),
    (Format::R8G8_SINT, 52),
    (Format::R16_SFLOAT, 54),
    (Format::D16_UNORM, 55),
    (Format::R16_UNORM, 56),
    (Format::R16_UINT, 57),
    (Format::R16_SNORM, 58),
    (Format::R16_SINT, 59),
    (Format::R8_UNORM, 61),
    (Format::R8_UINT, 62),
    (Format::R8_SNORM, 63),
    (Format::R8_SINT, 64),
    (Format::A8_UNORM_KHR, 65),         // DXGI_FORMAT_A8_UNORM
    (Format::E5B9G9R9_UFLOAT_PACK32, 67), // DXGI_FORMAT_R9G9B9E5_SHAREDEXP
    (Format::B8G8R8G8_422_UNORM, 68),   // DXGI_FORMAT_R8G8_B8G8_UNORM
    (Format::G8B8G8R8_422_UNORM, 69),   // DXGI_FORMAT_G8R8_G8B8_UNORM
    (Format::BC1_RGB_UNORM_BLOCK, 71),  // DXGI_FORMAT_BC1_UNORM
    (Format::BC1_RGBA_UNORM_BLOCK, 71),
    (Format::BC1_RGB_SRGB_BLOCK, 72),
    (Format::BC1_RGBA_SRGB_BLOCK, 72),
    (Format::BC2_UNORM_BLOCK, 74),
    (Format::BC2_SRGB_BLOCK, 75),
    (Format::BC3_UNORM_BLOCK, 77),
    (Format::BC3_SRGB_BLOCK, 78),
    (Format::BC4_UNORM_BLOCK, 80),
    (Format::BC4_SNORM_BLOCK, 81),
    (Format::BC5_UNORM_BLOCK, 83),
    (Format::BC5_SNORM_BLOCK, 84),
    (Format::B5G6R5_UNORM_PACK16, 85),
    (Format::B5G5R5A1_UNORM_PACK16, 86),
    (Format::B8G8R8A8_UNORM, 87),
    (Format::B8G8R8A8_SRGB, 91),
    (Format::BC6H_UFLOAT_BLOCK, 95),    // DXGI_FORMAT_BC6H_UF16
    (Format::BC6H_SFLOAT_BLOCK, 96),    // DXGI_FORMAT_BC6H_SF16
    (Format::BC7_UNORM_BLOCK, 98),
    (Format::BC7_SRGB_BLOCK, 99),
    (Format::G8_B8R8_2PLANE_420_UNORM, 103), // DXGI_FORMAT_NV12
    (Format::G10X6_B10X6R10X6_2PLANE_420_UNORM_3PACK16, 104), // DXGI_FORMAT_P010
    (Format::G16_B16R16_2PLANE_420_UNORM, 105), // DXGI_FORMAT_P016
    (Format::G8B8G8R8_422_UNORM, 107),  // DXGI_FORMAT_YUY2 (alias of 69)
    (Format::G10X6B10X6G10X6R10X6_422_UNORM_4PACK16, 108), // DXGI_FORMAT_Y210
    (Format::G16B16G16R16_422_UNORM, 109), // DXGI_FORMAT_Y216
    (Format::B4G4R4A4_UNORM_PACK16, 115),
    (Format::A4B4G4R4_UNORM_PACK16, 191), // DXGI_FORMAT_A4B4G4R4_UNORM
];

/// Vulkan format for a DX10 header's `dxgiFormat` value.
pub fn dxgi_to_format(dxgi: u32) -> Option<Format> {
    DXGI_MAP
        .iter()
        .find(|(_, code)| *code == dxgi)
        .map(|(fmt, _)| *fmt)
}

/// Canonical `dxgiFormat` value for a Vulkan format, if one exists.
pub fn format_to_dxgi(fmt: Format) -> Option<u32> {
    DXGI_MAP
        .iter()
        .find(|(entry, _)| *entry == fmt)
        .map(|(_, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Format::R8G8B8A8_UNORM, 28)]
    #[case(Format::R16G16B16A16_SFLOAT, 10)]
    #[case(Format::R32G32B32A32_SFLOAT, 2)]
    #[case(Format::B8G8R8A8_UNORM, 87)]
    #[case(Format::A2B10G10R10_UNORM_PACK32, 24)]
    #[case(Format::B10G11R11_UFLOAT_PACK32, 26)]
    #[case(Format::BC7_SRGB_BLOCK, 99)]
    fn round_trips(#[case] fmt: Format, #[case] dxgi: u32) {
        assert_eq!(format_to_dxgi(fmt), Some(dxgi));
        assert_eq!(dxgi_to_format(dxgi), Some(fmt));
    }

    #[test]
    fn aliases_resolve_to_the_first_row() {
        // Both BC1 layouts write DXGI 71; DXGI 71 reads back as the RGB form.
        assert_eq!(format_to_dxgi(Format::BC1_RGBA_UNORM_BLOCK), Some(71));
        assert_eq!(dxgi_to_format(71), Some(Format::BC1_RGB_UNORM_BLOCK));

        // YUY2 (107) and G8R8_G8B8 (69) are the same Vulkan layout; writes
        // pick 69, reads accept both.
        assert_eq!(format_to_dxgi(Format::G8B8G8R8_422_UNORM), Some(69));
        assert_eq!(dxgi_to_format(107), Some(Format::G8B8G8R8_422_UNORM));
    }

    #[test]
    fn unknown_codes_are_none() {
        assert_eq!(dxgi_to_format(0), None);
        assert_eq!(dxgi_to_format(0x1234_5678), None);
        assert_eq!(format_to_dxgi(Format::R4G4_UNORM_PACK8), None);
    }
}
