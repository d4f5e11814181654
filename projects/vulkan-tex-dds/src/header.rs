//! DDS header decode and encode.

use crate::constants::*;
use crate::convert::ConvFlags;
use crate::dxgi::{dxgi_to_format, format_to_dxgi};
use crate::error::{DdsError, DdsResult};
use crate::flags::DdsFlags;
use crate::legacy::format_from_legacy_ddpf;
use vulkan_tex_format::{
    compute_pitch, count_mips, count_mips_3d, is_compressed, is_palettized, is_valid, CpFlags,
    Format,
};
use vulkan_tex_image::{AlphaMode, TexDimension, TexMetadata, TexMiscFlags};

/// Everything the loader needs from a parsed header.
#[derive(Debug, Clone)]
pub struct DecodedDdsHeader {
    /// The canonical texture identity.
    pub metadata: TexMetadata,
    /// The raw legacy pixel-format descriptor, for callers that care about
    /// the original encoding.
    pub pixel_format: DdsPixelFormat,
    /// Load-time conversion work derived from the descriptor.
    pub(crate) conv_flags: ConvFlags,
    /// Byte offset of the pixel payload (or palette, if one is present).
    pub data_offset: usize,
}

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

fn write_u32(bytes: &mut [u8], offset: usize, value: u32) {
    bytes[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

// Field offsets within the file (magic included).
const OFF_HEADER_SIZE: usize = 4;
const OFF_FLAGS: usize = 8;
const OFF_HEIGHT: usize = 12;
const OFF_WIDTH: usize = 16;
const OFF_PITCH_OR_LINEAR_SIZE: usize = 20;
const OFF_DEPTH: usize = 24;
const OFF_MIP_MAP_COUNT: usize = 28;
const OFF_RESERVED1_9: usize = 32 + 9 * 4;
const OFF_DDSPF: usize = 76;
const OFF_CAPS: usize = 108;
const OFF_CAPS2: usize = 112;
const OFF_DX10: usize = DDS_MIN_HEADER_SIZE;

/// Decodes the header (and DX10 extension, if present) of a DDS file.
///
/// On success the returned [`DecodedDdsHeader`] carries the texture
/// identity, the raw pixel-format descriptor, and the offset of the payload.
pub fn decode_dds_header(source: &[u8], flags: DdsFlags) -> DdsResult<DecodedDdsHeader> {
    if source.len() < DDS_MIN_HEADER_SIZE {
        return Err(DdsError::InputTooShort {
            required: DDS_MIN_HEADER_SIZE,
            actual: source.len(),
        });
    }

    if read_u32(source, 0) != DDS_MAGIC {
        return Err(DdsError::BadMagic);
    }

    let header_size = read_u32(source, OFF_HEADER_SIZE);
    let header_flags = HeaderFlags::from_bits_retain(read_u32(source, OFF_FLAGS));
    let height = read_u32(source, OFF_HEIGHT) as usize;
    let width = read_u32(source, OFF_WIDTH) as usize;
    let depth = read_u32(source, OFF_DEPTH) as usize;
    let mip_map_count = read_u32(source, OFF_MIP_MAP_COUNT) as usize;
    let nvtt_reserved = read_u32(source, OFF_RESERVED1_9);
    let caps2 = Caps2::from_bits_retain(read_u32(source, OFF_CAPS2));

    let mut ddpf_bytes = [0u8; 32];
    ddpf_bytes.copy_from_slice(&source[OFF_DDSPF..OFF_DDSPF + 32]);
    let ddpf = DdsPixelFormat::read(&ddpf_bytes);

    // Some legacy writers store a known-bad value in the size fields.
    if flags.contains(DdsFlags::PERMISSIVE) {
        if header_size != DDS_KNOWN_VARIANT_SIZE && header_size != DDS_HEADER_SIZE as u32 {
            return Err(DdsError::MalformedHeader("unexpected header size"));
        }
        if ddpf.size != 0
            && ddpf.size != DDS_KNOWN_VARIANT_SIZE
            && ddpf.size != DDS_PIXELFORMAT_SIZE
        {
            return Err(DdsError::MalformedHeader("unexpected pixel format size"));
        }
    } else {
        if header_size != DDS_HEADER_SIZE as u32 {
            return Err(DdsError::MalformedHeader("unexpected header size"));
        }
        if ddpf.size != DDS_PIXELFORMAT_SIZE {
            return Err(DdsError::MalformedHeader("unexpected pixel format size"));
        }
    }

    let mut metadata = TexMetadata {
        mip_levels: mip_map_count.max(1),
        ..TexMetadata::default()
    };
    let mut conv_flags = ConvFlags::empty();
    let mut data_offset = DDS_MIN_HEADER_SIZE;

    if ddpf.flags & PixelFormatFlags::FOURCC.bits() != 0 && ddpf.is_dx10() {
        // Legacy 'known variant' sizes are not accepted for DX10 files.
        if header_size != DDS_HEADER_SIZE as u32 || ddpf.size != DDS_PIXELFORMAT_SIZE {
            return Err(DdsError::MalformedHeader("bad sizes on a DX10 header"));
        }

        if source.len() < DDS_DX10_HEADER_SIZE {
            return Err(DdsError::InputTooShort {
                required: DDS_DX10_HEADER_SIZE,
                actual: source.len(),
            });
        }

        let dxgi_format = read_u32(source, OFF_DX10);
        let resource_dimension = read_u32(source, OFF_DX10 + 4);
        let misc_flag = read_u32(source, OFF_DX10 + 8);
        let array_size = read_u32(source, OFF_DX10 + 12) as usize;
        let misc_flags2 = read_u32(source, OFF_DX10 + 16);

        conv_flags |= ConvFlags::DX10;
        data_offset = DDS_DX10_HEADER_SIZE;

        metadata.array_size = array_size.max(1);

        let format = dxgi_to_format(dxgi_format).ok_or(DdsError::UnsupportedFormat)?;
        if !is_valid(format) || is_palettized(format) {
            return Err(DdsError::UnsupportedFormat);
        }
        metadata.format = format;

        metadata.misc_flags =
            TexMiscFlags::from_bits_retain(misc_flag & !DDS_RESOURCE_MISC_TEXTURECUBE);

        match TexDimension::from_u32(resource_dimension) {
            Some(TexDimension::Texture1D) => {
                // D3DX writes 1D textures with a fixed height of 1
                if header_flags.contains(HeaderFlags::HEIGHT) && height != 1 {
                    return Err(DdsError::MalformedHeader("1D texture with height != 1"));
                }

                metadata.width = width;
                metadata.height = 1;
                metadata.depth = 1;
                metadata.dimension = TexDimension::Texture1D;
            }

            Some(TexDimension::Texture2D) => {
                if misc_flag & DDS_RESOURCE_MISC_TEXTURECUBE != 0 {
                    metadata.misc_flags |= TexMiscFlags::TEXTURECUBE;
                    metadata.array_size *= 6;
                }

                metadata.width = width;
                metadata.height = height;
                metadata.depth = 1;
                metadata.dimension = TexDimension::Texture2D;
            }

            Some(TexDimension::Texture3D) => {
                if !header_flags.contains(HeaderFlags::VOLUME) {
                    return Err(DdsError::MalformedHeader("3D texture without the volume flag"));
                }
                if metadata.array_size > 1 {
                    return Err(DdsError::UnsupportedConfiguration("arrays of volumes"));
                }

                metadata.width = width;
                metadata.height = height;
                metadata.depth = depth;
                metadata.dimension = TexDimension::Texture3D;
            }

            None => return Err(DdsError::MalformedHeader("unknown resource dimension")),
        }

        metadata.misc_flags2 = misc_flags2;
    } else {
        metadata.array_size = 1;

        if header_flags.contains(HeaderFlags::VOLUME) {
            metadata.width = width;
            metadata.height = height;
            metadata.depth = depth;
            metadata.dimension = TexDimension::Texture3D;

            if flags.contains(DdsFlags::PERMISSIVE) {
                // Allow cases where the mip count was computed incorrectly
                metadata.mip_levels = metadata
                    .mip_levels
                    .min(count_mips_3d(width, height, depth));
            }
        } else {
            if caps2.contains(Caps2::CUBEMAP) {
                // We require all six faces to be defined
                if !caps2.contains(Caps2::CUBEMAP_ALLFACES) {
                    return Err(DdsError::UnsupportedConfiguration("partial cubemap"));
                }

                metadata.array_size = 6;
                metadata.misc_flags |= TexMiscFlags::TEXTURECUBE;
            }

            metadata.width = width;
            metadata.height = height;
            metadata.depth = 1;
            metadata.dimension = TexDimension::Texture2D;

            // Note there's no way for a legacy Direct3D 9 DDS to express a
            // '1D' texture

            if flags.contains(DdsFlags::PERMISSIVE) {
                metadata.mip_levels = metadata.mip_levels.min(count_mips(width, height));
            }
        }

        metadata.format = format_from_legacy_ddpf(&ddpf, nvtt_reserved, flags, &mut conv_flags)
            .ok_or(DdsError::UnsupportedFormat)?;

        // Special flag for handling LUMINANCE legacy formats
        if flags.contains(DdsFlags::EXPAND_LUMINANCE) {
            match metadata.format {
                Format::R8_UNORM => {
                    metadata.format = Format::R8G8B8A8_UNORM;
                    conv_flags |= ConvFlags::L8 | ConvFlags::EXPAND;
                }
                Format::R8G8_UNORM => {
                    metadata.format = Format::R8G8B8A8_UNORM;
                    conv_flags |= ConvFlags::A8L8 | ConvFlags::EXPAND;
                }
                Format::R16_UNORM => {
                    metadata.format = Format::R16G16B16A16_UNORM;
                    conv_flags |= ConvFlags::L16 | ConvFlags::EXPAND;
                }
                _ => {}
            }
        }
    }

    // Special flag for handling BGR DXGI 1.1 formats
    if flags.contains(DdsFlags::FORCE_RGB) {
        match metadata.format {
            Format::B8G8R8A8_UNORM => {
                metadata.format = Format::R8G8B8A8_UNORM;
                conv_flags |= ConvFlags::SWIZZLE;
            }
            Format::B8G8R8_UNORM => {
                metadata.format = Format::R8G8B8A8_UNORM;
                conv_flags |= ConvFlags::SWIZZLE | ConvFlags::NOALPHA;
            }
            Format::B8G8R8A8_SRGB => {
                metadata.format = Format::R8G8B8A8_SRGB;
                conv_flags |= ConvFlags::SWIZZLE;
            }
            Format::B8G8R8_SRGB => {
                metadata.format = Format::R8G8B8A8_SRGB;
                conv_flags |= ConvFlags::SWIZZLE | ConvFlags::NOALPHA;
            }
            _ => {}
        }
    }

    // Special flag for handling 16bpp formats
    if flags.contains(DdsFlags::NO_16BPP) {
        match metadata.format {
            Format::B5G6R5_UNORM_PACK16
            | Format::B5G5R5A1_UNORM_PACK16
            | Format::B4G4R4A4_UNORM_PACK16
            | Format::A4B4G4R4_UNORM_PACK16 => {
                if metadata.format == Format::B5G6R5_UNORM_PACK16 {
                    conv_flags |= ConvFlags::NOALPHA;
                }
                if metadata.format == Format::A4B4G4R4_UNORM_PACK16 {
                    conv_flags |= ConvFlags::P4444 | ConvFlags::ON_11ON12;
                }
                metadata.format = Format::R8G8B8A8_UNORM;
                conv_flags |= ConvFlags::EXPAND;
            }
            _ => {}
        }
    }

    // Implicit alpha mode
    if conv_flags.contains(ConvFlags::NOALPHA) {
        metadata.set_alpha_mode(AlphaMode::Opaque);
    } else if conv_flags.contains(ConvFlags::PMALPHA) {
        metadata.set_alpha_mode(AlphaMode::Premultiplied);
    }

    // Check for files that exceed known hardware support
    if !flags.contains(DdsFlags::ALLOW_LARGE_FILES) {
        // 16k is the maximum required resource size supported by Direct3D
        if metadata.width > 16384 || metadata.height > 16384 || metadata.mip_levels > 15 {
            return Err(DdsError::UnsupportedConfiguration(
                "dimensions exceed known hardware requirements",
            ));
        }

        // 2048 is the maximum required depth/array size supported by Direct3D
        if metadata.array_size > 2048 || metadata.depth > 2048 {
            return Err(DdsError::UnsupportedConfiguration(
                "array size or depth exceeds known hardware requirements",
            ));
        }
    }

    // Special-handling flag for ignoring mipchains on simple DDS files
    if flags.contains(DdsFlags::IGNORE_MIPS) && metadata.array_size == 1 {
        metadata.mip_levels = 1;
    }

    Ok(DecodedDdsHeader {
        metadata,
        pixel_format: ddpf,
        conv_flags,
        data_offset,
    })
}

/// Selects a legacy pixel-format descriptor for the writer, if one applies.
fn legacy_ddpf_for(
    metadata: &TexMetadata,
    flags: DdsFlags,
    pitch_flags: &mut CpFlags,
) -> DdsPixelFormat {
    let pm_alpha = metadata.is_pm_alpha();

    match metadata.format {
        Format::R8G8B8A8_UNORM => ddspf::A8B8G8R8,
        Format::R16G16_UNORM => ddspf::G16R16,
        Format::R8G8_UNORM => ddspf::A8L8,
        Format::R16_UNORM => ddspf::L16,
        Format::R8_UNORM => ddspf::L8,
        Format::A8_UNORM_KHR => ddspf::A8,
        Format::B8G8R8G8_422_UNORM => ddspf::R8G8_B8G8,
        Format::G8B8G8R8_422_UNORM => ddspf::G8R8_G8B8,
        Format::BC1_RGB_UNORM_BLOCK => ddspf::DXT1,
        Format::BC2_UNORM_BLOCK => {
            if pm_alpha {
                ddspf::DXT2
            } else {
                ddspf::DXT3
            }
        }
        Format::BC4_SNORM_BLOCK => ddspf::BC4_SNORM,
        Format::BC5_SNORM_BLOCK => ddspf::BC5_SNORM,
        Format::B5G6R5_UNORM_PACK16 => ddspf::R5G6B5,
        Format::B5G5R5A1_UNORM_PACK16 => ddspf::A1R5G5B5,
        Format::R8G8_SNORM => ddspf::V8U8,
        Format::R8G8B8A8_SNORM => ddspf::Q8W8V8U8,
        Format::R16G16_SNORM => ddspf::V16U16,
        Format::B8G8R8A8_UNORM => ddspf::A8R8G8B8, // DXGI 1.1
        Format::B8G8R8_UNORM => {
            if flags.contains(DdsFlags::FORCE_24BPP_RGB) {
                // No DXGI equivalent
                *pitch_flags |= CpFlags::BPP24;
                ddspf::R8G8B8
            } else {
                ddspf::X8R8G8B8 // DXGI 1.1
            }
        }
        Format::B4G4R4A4_UNORM_PACK16 => ddspf::A4R4G4B4, // DXGI 1.2

        Format::BC3_UNORM_BLOCK => {
            let mut ddpf = if pm_alpha { ddspf::DXT4 } else { ddspf::DXT5 };
            if flags.contains(DdsFlags::FORCE_DXT5_RXGB) {
                ddpf.four_cc = make_four_cc(b'R', b'X', b'G', b'B');
            }
            ddpf
        }

        // Legacy D3DX formats using the D3DFMT enum value as a fourCC
        Format::R32G32B32A32_SFLOAT => DdsPixelFormat::from_four_cc(116), // D3DFMT_A32B32G32R32F
        Format::R16G16B16A16_SFLOAT => DdsPixelFormat::from_four_cc(113), // D3DFMT_A16B16G16R16F
        Format::R16G16B16A16_UNORM => DdsPixelFormat::from_four_cc(36),   // D3DFMT_A16B16G16R16
        Format::R16G16B16A16_SNORM => DdsPixelFormat::from_four_cc(110),  // D3DFMT_Q16W16V16U16
        Format::R32G32_SFLOAT => DdsPixelFormat::from_four_cc(115),       // D3DFMT_G32R32F
        Format::R16G16_SFLOAT => DdsPixelFormat::from_four_cc(112),       // D3DFMT_G16R16F
        Format::R32_SFLOAT => DdsPixelFormat::from_four_cc(114),          // D3DFMT_R32F
        Format::R16_SFLOAT => DdsPixelFormat::from_four_cc(111),          // D3DFMT_R16F

        // sRGB and a few BC variants only have a legacy spelling when the
        // caller forces a DX9 header.
        Format::A2R10G10B10_UNORM_PACK32 if flags.contains(DdsFlags::FORCE_DX9_LEGACY) => {
            // Write using the 'incorrect' mask version to match the D3DX bug
            ddspf::A2B10G10R10
        }
        Format::R8G8B8A8_SRGB if flags.contains(DdsFlags::FORCE_DX9_LEGACY) => ddspf::A8B8G8R8,
        Format::BC1_RGB_SRGB_BLOCK if flags.contains(DdsFlags::FORCE_DX9_LEGACY) => ddspf::DXT1,
        Format::BC2_SRGB_BLOCK if flags.contains(DdsFlags::FORCE_DX9_LEGACY) => {
            if pm_alpha {
                ddspf::DXT2
            } else {
                ddspf::DXT3
            }
        }
        Format::BC3_SRGB_BLOCK if flags.contains(DdsFlags::FORCE_DX9_LEGACY) => {
            if pm_alpha {
                ddspf::DXT4
            } else {
                ddspf::DXT5
            }
        }
        Format::B8G8R8A8_SRGB if flags.contains(DdsFlags::FORCE_DX9_LEGACY) => ddspf::A8R8G8B8,
        Format::B8G8R8_SRGB if flags.contains(DdsFlags::FORCE_DX9_LEGACY) => ddspf::X8R8G8B8,

        Format::BC4_UNORM_BLOCK => {
            let mut ddpf = ddspf::BC4_UNORM;
            if flags.contains(DdsFlags::FORCE_DX9_LEGACY) {
                ddpf.four_cc = make_four_cc(b'A', b'T', b'I', b'1');
            }
            ddpf
        }
        Format::BC5_UNORM_BLOCK => {
            let mut ddpf = ddspf::BC5_UNORM;
            if flags.contains(DdsFlags::FORCE_DX9_LEGACY) {
                ddpf.four_cc = make_four_cc(b'A', b'T', b'I', b'2');
            }
            ddpf
        }

        _ => DdsPixelFormat::default(),
    }
}

/// Encodes the DDS file header (magic value, header, optional DX10
/// extension).
///
/// With `destination` of `None` only the required byte count is computed.
/// Legacy DX9 headers are preferred when the format and layout allow one;
/// array textures (other than single legacy cubemaps) and formats with no
/// DX9 spelling use the DX10 extension.
pub fn encode_dds_header(
    metadata: &TexMetadata,
    mut flags: DdsFlags,
    destination: Option<&mut [u8]>,
) -> DdsResult<usize> {
    if !is_valid(metadata.format) {
        return Err(DdsError::UnsupportedFormat);
    }

    if metadata.array_size > 1
        && (metadata.array_size != 6
            || metadata.dimension != TexDimension::Texture2D
            || !metadata.is_cubemap())
    {
        // Texture1D arrays, Texture2D arrays, and cubemap arrays must be
        // stored using the 'DX10' extended header
        if flags.contains(DdsFlags::FORCE_DX9_LEGACY) {
            return Err(DdsError::UnsupportedConfiguration(
                "array textures require the DX10 extension",
            ));
        }

        flags |= DdsFlags::FORCE_DX10_EXT;
    }

    if flags.contains(DdsFlags::FORCE_DX10_EXT_MISC2) {
        flags |= DdsFlags::FORCE_DX10_EXT;
    }

    let mut pitch_flags = CpFlags::empty();
    let ddpf = if flags.contains(DdsFlags::FORCE_DX10_EXT) {
        DdsPixelFormat::default()
    } else {
        legacy_ddpf_for(metadata, flags, &mut pitch_flags)
    };

    let mut required = DDS_MIN_HEADER_SIZE;
    if ddpf.size == 0 {
        if flags.contains(DdsFlags::FORCE_DX9_LEGACY) {
            return Err(DdsError::UnsupportedConfiguration(
                "format has no legacy DX9 representation",
            ));
        }
        required += DX10_HEADER_SIZE;
    }

    let Some(dest) = destination else {
        return Ok(required);
    };

    if dest.len() < required {
        return Err(DdsError::OutputBufferTooSmall {
            required,
            actual: dest.len(),
        });
    }

    dest[..required].fill(0);
    write_u32(dest, 0, DDS_MAGIC);
    write_u32(dest, OFF_HEADER_SIZE, DDS_HEADER_SIZE as u32);

    let mut header_flags = HeaderFlags::TEXTURE;
    let mut caps = Caps::SURFACE_TEXTURE;
    let mut caps2 = Caps2::empty();

    if metadata.mip_levels > 0 {
        header_flags |= HeaderFlags::MIPMAP;

        if metadata.mip_levels > u16::MAX as usize {
            return Err(DdsError::UnsupportedConfiguration("mip count out of range"));
        }
        write_u32(dest, OFF_MIP_MAP_COUNT, metadata.mip_levels as u32);

        if metadata.mip_levels > 1 {
            caps |= Caps::SURFACE_MIPMAP;
        }
    }

    match metadata.dimension {
        TexDimension::Texture1D => {
            if metadata.width > u32::MAX as usize {
                return Err(DdsError::UnsupportedConfiguration("width out of range"));
            }

            write_u32(dest, OFF_WIDTH, metadata.width as u32);
            write_u32(dest, OFF_HEIGHT, 1);
            write_u32(dest, OFF_DEPTH, 1);
        }

        TexDimension::Texture2D => {
            if metadata.width > u32::MAX as usize || metadata.height > u32::MAX as usize {
                return Err(DdsError::UnsupportedConfiguration("extents out of range"));
            }

            write_u32(dest, OFF_WIDTH, metadata.width as u32);
            write_u32(dest, OFF_HEIGHT, metadata.height as u32);
            write_u32(dest, OFF_DEPTH, 1);

            if metadata.is_cubemap() {
                caps |= Caps::SURFACE_CUBEMAP;
                caps2 |= Caps2::CUBEMAP_ALLFACES;
            }
        }

        TexDimension::Texture3D => {
            if metadata.width > u32::MAX as usize
                || metadata.height > u32::MAX as usize
                || metadata.depth > u16::MAX as usize
            {
                return Err(DdsError::UnsupportedConfiguration("extents out of range"));
            }

            header_flags |= HeaderFlags::VOLUME;
            caps2 |= Caps2::VOLUME;
            write_u32(dest, OFF_WIDTH, metadata.width as u32);
            write_u32(dest, OFF_HEIGHT, metadata.height as u32);
            write_u32(dest, OFF_DEPTH, metadata.depth as u32);
        }
    }

    let pitch = compute_pitch(metadata.format, metadata.width, metadata.height, pitch_flags)?;
    if pitch.row > u32::MAX as usize || pitch.slice > u32::MAX as usize {
        return Err(DdsError::UnsupportedConfiguration("pitch out of range"));
    }

    if is_compressed(metadata.format) {
        header_flags |= HeaderFlags::LINEARSIZE;
        write_u32(dest, OFF_PITCH_OR_LINEAR_SIZE, pitch.slice as u32);
    } else {
        header_flags |= HeaderFlags::PITCH;
        write_u32(dest, OFF_PITCH_OR_LINEAR_SIZE, pitch.row as u32);
    }

    write_u32(dest, OFF_FLAGS, header_flags.bits());
    write_u32(dest, OFF_CAPS, caps.bits());
    write_u32(dest, OFF_CAPS2, caps2.bits());

    if ddpf.size == 0 {
        ddspf::DX10.write(&mut dest[OFF_DDSPF..OFF_DDSPF + 32]);

        let dxgi = format_to_dxgi(metadata.format).ok_or(DdsError::UnsupportedFormat)?;

        if metadata.array_size > u16::MAX as usize {
            return Err(DdsError::UnsupportedConfiguration("array size out of range"));
        }

        let mut misc_flag = metadata.misc_flags.bits() & !DDS_RESOURCE_MISC_TEXTURECUBE;
        let array_size = if metadata.is_cubemap() {
            misc_flag |= DDS_RESOURCE_MISC_TEXTURECUBE;

            if metadata.array_size % 6 != 0 {
                return Err(DdsError::UnsupportedConfiguration(
                    "cubemap array size must be a multiple of 6",
                ));
            }
            metadata.array_size / 6
        } else {
            metadata.array_size
        };

        write_u32(dest, OFF_DX10, dxgi);
        write_u32(dest, OFF_DX10 + 4, metadata.dimension as u32);
        write_u32(dest, OFF_DX10 + 8, misc_flag);
        write_u32(dest, OFF_DX10 + 12, array_size as u32);

        // This was formerly 'reserved'. D3DX10 and D3DX11 fail when it is
        // anything other than 0.
        if flags.contains(DdsFlags::FORCE_DX10_EXT_MISC2) {
            write_u32(dest, OFF_DX10 + 16, metadata.misc_flags2);
        }
    } else {
        ddpf.write(&mut dest[OFF_DDSPF..OFF_DDSPF + 32]);
    }

    Ok(required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_prelude::*;

    #[test]
    fn dx10_rgba8_1x1_encodes_to_148_bytes() {
        let metadata = TexMetadata {
            width: 1,
            height: 1,
            depth: 1,
            array_size: 1,
            mip_levels: 1,
            format: Format::R8G8B8A8_UNORM,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        };

        let required = encode_dds_header(&metadata, DdsFlags::empty(), None).unwrap();
        assert_eq!(required, 148);

        let mut buffer = vec![0u8; required];
        encode_dds_header(&metadata, DdsFlags::empty(), Some(&mut buffer)).unwrap();

        assert_eq!(&buffer[0..4], &[0x44, 0x44, 0x53, 0x20]); // 'DDS '
        assert_eq!(read_u32(&buffer, OFF_HEADER_SIZE), 124);
        assert_eq!(
            read_u32(&buffer, OFF_FLAGS),
            (HeaderFlags::TEXTURE | HeaderFlags::MIPMAP | HeaderFlags::PITCH).bits()
        );
        assert_eq!(read_u32(&buffer, OFF_WIDTH), 1);
        assert_eq!(read_u32(&buffer, OFF_HEIGHT), 1);
        assert_eq!(read_u32(&buffer, OFF_PITCH_OR_LINEAR_SIZE), 4); // one RGBA8 row
        assert_eq!(read_u32(&buffer, OFF_DDSPF + 8), FOURCC_DX10);
        assert_eq!(read_u32(&buffer, OFF_CAPS), 0x1000);

        assert_eq!(read_u32(&buffer, OFF_DX10), 28); // DXGI_FORMAT_R8G8B8A8_UNORM
        assert_eq!(read_u32(&buffer, OFF_DX10 + 4), 3); // TEXTURE2D
        assert_eq!(read_u32(&buffer, OFF_DX10 + 8), 0);
        assert_eq!(read_u32(&buffer, OFF_DX10 + 12), 1);
        assert_eq!(read_u32(&buffer, OFF_DX10 + 16), 0);
    }

    #[test]
    fn legacy_bc1_4x4_encodes_to_128_bytes() {
        let metadata = TexMetadata {
            width: 4,
            height: 4,
            depth: 1,
            array_size: 1,
            mip_levels: 1,
            format: Format::BC1_RGB_UNORM_BLOCK,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        };

        let required = encode_dds_header(&metadata, DdsFlags::FORCE_DX9_LEGACY, None).unwrap();
        assert_eq!(required, 128);

        let mut buffer = vec![0u8; required];
        encode_dds_header(&metadata, DdsFlags::FORCE_DX9_LEGACY, Some(&mut buffer)).unwrap();

        assert_eq!(read_u32(&buffer, OFF_DDSPF + 8), FOURCC_DXT1);
        assert_eq!(read_u32(&buffer, OFF_PITCH_OR_LINEAR_SIZE), 8); // top-mip linear size
        assert!(HeaderFlags::from_bits_retain(read_u32(&buffer, OFF_FLAGS))
            .contains(HeaderFlags::LINEARSIZE));
    }

    #[test]
    fn single_legacy_cubemap_avoids_the_dx10_extension() {
        let metadata = TexMetadata {
            width: 64,
            height: 64,
            depth: 1,
            array_size: 6,
            mip_levels: 1,
            misc_flags: TexMiscFlags::TEXTURECUBE,
            format: Format::BC3_UNORM_BLOCK,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        };

        let required = encode_dds_header(&metadata, DdsFlags::empty(), None).unwrap();
        assert_eq!(required, 128);

        let mut buffer = vec![0u8; required];
        encode_dds_header(&metadata, DdsFlags::empty(), Some(&mut buffer)).unwrap();

        assert_eq!(read_u32(&buffer, OFF_DDSPF + 8), FOURCC_DXT5);
        let caps2 = Caps2::from_bits_retain(read_u32(&buffer, OFF_CAPS2));
        assert!(caps2.contains(Caps2::CUBEMAP_ALLFACES));
    }

    #[test]
    fn array_textures_require_dx10() {
        let metadata = TexMetadata {
            width: 16,
            height: 16,
            depth: 1,
            array_size: 4,
            mip_levels: 1,
            format: Format::R8G8B8A8_UNORM,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        };

        assert_eq!(encode_dds_header(&metadata, DdsFlags::empty(), None).unwrap(), 148);
        assert!(encode_dds_header(&metadata, DdsFlags::FORCE_DX9_LEGACY, None).is_err());
    }

    #[test]
    fn headers_round_trip_through_the_decoder() {
        for metadata in [
            TexMetadata {
                width: 32,
                height: 16,
                depth: 1,
                array_size: 1,
                mip_levels: 5,
                format: Format::BC2_UNORM_BLOCK,
                dimension: TexDimension::Texture2D,
                ..TexMetadata::default()
            },
            TexMetadata {
                width: 8,
                height: 8,
                depth: 1,
                array_size: 12,
                mip_levels: 1,
                misc_flags: TexMiscFlags::TEXTURECUBE,
                format: Format::R16G16B16A16_SFLOAT,
                dimension: TexDimension::Texture2D,
                ..TexMetadata::default()
            },
            TexMetadata {
                width: 16,
                height: 16,
                depth: 8,
                array_size: 1,
                mip_levels: 1,
                format: Format::R32_SFLOAT,
                dimension: TexDimension::Texture3D,
                ..TexMetadata::default()
            },
        ] {
            let flags = DdsFlags::FORCE_DX10_EXT;
            let mut buffer = vec![0u8; 148];
            let required = encode_dds_header(&metadata, flags, Some(&mut buffer)).unwrap();
            buffer.truncate(required);

            let decoded = decode_dds_header(&buffer, DdsFlags::empty()).unwrap();
            assert_eq!(decoded.metadata, metadata);
        }
    }

    #[test]
    fn legacy_headers_round_trip_too() {
        let metadata = TexMetadata {
            width: 16,
            height: 8,
            depth: 1,
            array_size: 1,
            mip_levels: 1,
            format: Format::B5G6R5_UNORM_PACK16,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        };

        let mut buffer = vec![0u8; 128];
        encode_dds_header(&metadata, DdsFlags::empty(), Some(&mut buffer)).unwrap();

        let decoded = decode_dds_header(&buffer, DdsFlags::empty()).unwrap();
        assert_eq!(decoded.metadata.format, Format::B5G6R5_UNORM_PACK16);
        assert_eq!(decoded.metadata.width, 16);
        assert_eq!(decoded.metadata.height, 8);
        assert_eq!(decoded.data_offset, 128);
    }

    #[test]
    fn decoder_rejects_truncated_and_corrupt_headers() {
        assert!(matches!(
            decode_dds_header(&[0u8; 64], DdsFlags::empty()),
            Err(DdsError::InputTooShort { .. })
        ));

        let mut bytes = create_valid_bc1_dds_with_dimensions(4, 4, 1);
        bytes[0] = 0xFF;
        assert!(matches!(
            decode_dds_header(&bytes, DdsFlags::empty()),
            Err(DdsError::BadMagic)
        ));

        let mut bytes = create_valid_bc1_dds_with_dimensions(4, 4, 1);
        write_u32(&mut bytes, OFF_HEADER_SIZE, 100);
        assert!(decode_dds_header(&bytes, DdsFlags::empty()).is_err());
    }

    #[test]
    fn oversized_textures_need_the_large_files_flag() {
        let metadata = TexMetadata {
            width: 32768,
            height: 1,
            depth: 1,
            array_size: 1,
            mip_levels: 1,
            format: Format::R8_UNORM,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        };

        let mut buffer = vec![0u8; 148];
        let required =
            encode_dds_header(&metadata, DdsFlags::FORCE_DX10_EXT, Some(&mut buffer)).unwrap();
        buffer.truncate(required);

        assert!(decode_dds_header(&buffer, DdsFlags::empty()).is_err());
        assert!(decode_dds_header(&buffer, DdsFlags::ALLOW_LARGE_FILES).is_ok());
    }

    #[test]
    fn ignore_mips_drops_the_chain() {
        let bytes = create_valid_bc1_dds_with_dimensions(16, 16, 5);
        let decoded = decode_dds_header(&bytes, DdsFlags::IGNORE_MIPS).unwrap();
        assert_eq!(decoded.metadata.mip_levels, 1);
    }
}
