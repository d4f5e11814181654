//! DDS load pipeline.

use crate::convert::{
    find_legacy_format, legacy_convert_scanline, legacy_expand_scanline, ConvFlags,
};
use crate::error::{DdsError, DdsResult};
use crate::flags::DdsFlags;
use crate::header::{decode_dds_header, DecodedDdsHeader};
use vulkan_tex_format::{compute_scanlines, is_compressed, is_planar, CpFlags, Format};
use vulkan_tex_image::{
    copy_scanline, determine_image_array, expand_scanline, setup_image_array, swizzle_scanline,
    swizzle_scanline_in_place, ScanlineFlags, ScratchImage, TexDimension, TexMetadata,
};

/// Reads the texture identity out of a DDS file in memory.
pub fn dds_metadata_from_memory(source: &[u8], flags: DdsFlags) -> DdsResult<TexMetadata> {
    Ok(decode_dds_header(source, flags)?.metadata)
}

/// As [`dds_metadata_from_memory`], also exposing the raw legacy
/// pixel-format descriptor.
pub fn dds_metadata_from_memory_ex(source: &[u8], flags: DdsFlags) -> DdsResult<DecodedDdsHeader> {
    decode_dds_header(source, flags)
}

/// Loads a DDS file from memory into a [`ScratchImage`].
pub fn load_from_dds_memory(source: &[u8], flags: DdsFlags) -> DdsResult<ScratchImage> {
    load_from_dds_memory_ex(source, flags).map(|(_, image)| image)
}

/// As [`load_from_dds_memory`], also returning the decoded header.
pub fn load_from_dds_memory_ex(
    source: &[u8],
    flags: DdsFlags,
) -> DdsResult<(DecodedDdsHeader, ScratchImage)> {
    let decoded = decode_dds_header(source, flags)?;
    let conv_flags = decoded.conv_flags;
    let mut metadata = decoded.metadata;

    let mut offset = decoded.data_offset;

    // An 8-bit palette sits between the header and the pixels.
    let mut pal8 = None;
    if conv_flags.contains(ConvFlags::PAL8) {
        let palette_end = offset + 256 * 4;
        if source.len() < palette_end {
            return Err(DdsError::InputTooShort {
                required: palette_end,
                actual: source.len(),
            });
        }

        let mut palette = [0u32; 256];
        for (entry, bytes) in palette.iter_mut().zip(source[offset..palette_end].chunks_exact(4)) {
            *entry = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        }
        pal8 = Some(palette);
        offset = palette_end;
    }

    let remaining = source.len() - offset;
    if remaining == 0 {
        return Err(DdsError::InputTooShort {
            required: offset + 1,
            actual: source.len(),
        });
    }

    let mut image = ScratchImage::initialize(&metadata, CpFlags::empty())?;

    if flags.contains(DdsFlags::PERMISSIVE)
        && metadata.is_cubemap()
        && conv_flags.contains(ConvFlags::DX10)
        && image.packed_size() > remaining
        && metadata.array_size % 6 == 0
    {
        // DDS_HEADER_DXT10.arraySize is supposed to be the number of cubes.
        // Handle files that wrote the original 6*numCubes value instead.
        metadata.array_size /= 6;
        image = ScratchImage::initialize(&metadata, CpFlags::empty())?;

        if image.packed_size() > remaining {
            return Err(DdsError::InputTooShort {
                required: offset + image.packed_size(),
                actual: source.len(),
            });
        }
    }

    let mut cp_flags = CpFlags::empty();
    if flags.contains(DdsFlags::LEGACY_DWORD) {
        cp_flags |= CpFlags::LEGACY_DWORD;
    }
    if flags.contains(DdsFlags::BAD_DXTN_TAILS) {
        cp_flags |= CpFlags::BAD_DXTN_TAILS;
    }

    let pixels = &source[offset..];

    if conv_flags.contains(ConvFlags::EXPAND) || !cp_flags.is_empty() {
        copy_image(pixels, &metadata, cp_flags, conv_flags, pal8.as_ref(), &mut image)?;
    } else {
        // Fast path: the payload is already in the canonical layout.
        let payload = image.packed_size();
        if remaining < payload {
            return Err(DdsError::InputTooShort {
                required: offset + payload,
                actual: source.len(),
            });
        }

        image.pixels_mut()[..payload].copy_from_slice(&pixels[..payload]);

        if conv_flags.intersects(
            ConvFlags::SWIZZLE | ConvFlags::NOALPHA | ConvFlags::L8U8V8 | ConvFlags::WUV10,
        ) {
            copy_image_in_place(conv_flags, &mut image)?;
        }
    }

    Ok((
        DecodedDdsHeader {
            metadata,
            ..decoded
        },
        image,
    ))
}

fn scanline_flags_for(conv_flags: ConvFlags) -> ScanlineFlags {
    let mut tflags = ScanlineFlags::empty();
    if conv_flags.contains(ConvFlags::NOALPHA) {
        tflags |= ScanlineFlags::SET_ALPHA;
    }
    if conv_flags.contains(ConvFlags::SWIZZLE) {
        tflags |= ScanlineFlags::LEGACY;
    }
    tflags
}

/// Converts or copies the raw payload into the canonical image array.
///
/// The source subresources are mapped with the *file's* pitch options (the
/// legacy bpp overrides and alignment quirks) and each is moved across with
/// the transform the conversion flags selected.
fn copy_image(
    pixels: &[u8],
    metadata: &TexMetadata,
    mut cp_flags: CpFlags,
    conv_flags: ConvFlags,
    pal8: Option<&[u32; 256]>,
    image: &mut ScratchImage,
) -> DdsResult<()> {
    if pixels.is_empty() {
        return Err(DdsError::InputTooShort {
            required: 1,
            actual: 0,
        });
    }

    if conv_flags.contains(ConvFlags::EXPAND) {
        if conv_flags.contains(ConvFlags::P888) {
            cp_flags |= CpFlags::BPP24;
        } else if conv_flags.intersects(
            ConvFlags::P565
                | ConvFlags::P5551
                | ConvFlags::P4444
                | ConvFlags::P8332
                | ConvFlags::A8P8
                | ConvFlags::L16
                | ConvFlags::A8L8
                | ConvFlags::L6V5U5,
        ) {
            cp_flags |= CpFlags::BPP16;
        } else if conv_flags.intersects(
            ConvFlags::P44 | ConvFlags::P332 | ConvFlags::PAL8 | ConvFlags::L8,
        ) {
            cp_flags |= CpFlags::BPP8;
        }
    }

    let (nimages, pixel_size) = determine_image_array(metadata, cp_flags)?;
    if nimages == 0 || nimages != image.image_count() {
        return Err(DdsError::MalformedHeader("subresource count mismatch"));
    }
    if pixel_size > pixels.len() {
        return Err(DdsError::InputTooShort {
            required: pixel_size,
            actual: pixels.len(),
        });
    }

    // Source-side subresource map over the raw payload.
    let timages = setup_image_array(metadata, cp_flags, pixel_size, nimages)?;

    let tflags = scanline_flags_for(conv_flags);

    let copy_one = |index: usize,
                    lastgood: usize,
                    image: &mut ScratchImage|
     -> DdsResult<()> {
        let src_desc = &timages[index];
        let mut dst = image
            .image_at_mut(index)
            .ok_or(DdsError::MalformedHeader("subresource count mismatch"))?;

        if dst.height != src_desc.height {
            return Err(DdsError::MalformedHeader("subresource height mismatch"));
        }

        let src = &pixels[src_desc.offset..src_desc.offset + src_desc.slice_pitch];

        if is_compressed(metadata.format) {
            let csize = dst.pixels.len().min(src.len());
            dst.pixels[..csize].copy_from_slice(&src[..csize]);

            if cp_flags.contains(CpFlags::BAD_DXTN_TAILS) && (dst.width < 4 || dst.height < 4) {
                // Replace a malformed tail mip with the last full block mip.
                let good = &timages[lastgood];
                let good_src = &pixels[good.offset..good.offset + good.slice_pitch];
                let csize = dst.pixels.len().min(good_src.len());
                dst.pixels[..csize].copy_from_slice(&good_src[..csize]);
            }
            return Ok(());
        }

        if is_planar(metadata.format, false) {
            if metadata.dimension == TexDimension::Texture3D {
                // Direct3D does not support any planar formats for Texture3D
                return Err(DdsError::UnsupportedConfiguration("planar volume texture"));
            }

            let count = compute_scanlines(metadata.format, dst.height);
            if count == 0 {
                return Err(DdsError::MalformedHeader("no scanlines"));
            }

            let csize = dst.row_pitch.min(src_desc.row_pitch);
            for h in 0..count {
                let s = &src[h * src_desc.row_pitch..h * src_desc.row_pitch + csize];
                dst.pixels[h * dst.row_pitch..h * dst.row_pitch + csize].copy_from_slice(s);
            }
            return Ok(());
        }

        for h in 0..dst.height {
            let s = &src[h * src_desc.row_pitch..(h + 1) * src_desc.row_pitch];
            let d = &mut dst.pixels[h * dst.row_pitch..(h + 1) * dst.row_pitch];

            if conv_flags.contains(ConvFlags::EXPAND) {
                if conv_flags.contains(ConvFlags::P4444) {
                    let in_format = if conv_flags.contains(ConvFlags::ON_11ON12) {
                        Format::A4B4G4R4_UNORM_PACK16
                    } else {
                        Format::B4G4R4A4_UNORM_PACK16
                    };
                    expand_scanline(d, Format::R8G8B8A8_UNORM, s, in_format, tflags)?;
                } else if conv_flags.intersects(ConvFlags::P565 | ConvFlags::P5551) {
                    let in_format = if conv_flags.contains(ConvFlags::P565) {
                        Format::B5G6R5_UNORM_PACK16
                    } else {
                        Format::B5G5R5A1_UNORM_PACK16
                    };
                    expand_scanline(d, Format::R8G8B8A8_UNORM, s, in_format, tflags)?;
                } else {
                    let lformat = find_legacy_format(conv_flags);
                    legacy_expand_scanline(d, metadata.format, s, lformat, pal8, tflags)?;
                }
            } else if conv_flags.contains(ConvFlags::SWIZZLE) {
                swizzle_scanline(d, s, metadata.format, tflags);
            } else if conv_flags.intersects(ConvFlags::L8U8V8 | ConvFlags::WUV10) {
                let lformat = find_legacy_format(conv_flags);
                legacy_convert_scanline(d, metadata.format, s, lformat, tflags)?;
            } else {
                copy_scanline(d, s, metadata.format, tflags);
            }
        }

        Ok(())
    };

    match metadata.dimension {
        TexDimension::Texture1D | TexDimension::Texture2D => {
            let mut index = 0;
            for _item in 0..metadata.array_size {
                let mut lastgood = 0;
                for _level in 0..metadata.mip_levels {
                    if index >= nimages {
                        return Err(DdsError::MalformedHeader("subresource count mismatch"));
                    }

                    copy_one(index, lastgood, image)?;

                    let desc = &timages[index];
                    if desc.width >= 4 && desc.height >= 4 {
                        lastgood = index;
                    }
                    index += 1;
                }
            }
        }

        TexDimension::Texture3D => {
            let mut index = 0;
            let mut d = metadata.depth;
            let mut lastgood = 0;

            for _level in 0..metadata.mip_levels {
                for slice in 0..d {
                    if index >= nimages {
                        return Err(DdsError::MalformedHeader("subresource count mismatch"));
                    }

                    let desc = &timages[index];
                    let degenerate = desc.width < 4 || desc.height < 4;
                    copy_one(index, lastgood + slice, image)?;

                    if !degenerate && slice == 0 {
                        lastgood = index;
                    }
                    index += 1;
                }

                if d > 1 {
                    d >>= 1;
                }
            }
        }
    }

    Ok(())
}

/// Applies the in-place fixups (swizzle, alpha force, bump conversion) after
/// a fast-path copy.
fn copy_image_in_place(conv_flags: ConvFlags, image: &mut ScratchImage) -> DdsResult<()> {
    let format = image.metadata().format;
    if is_planar(format, false) {
        return Err(DdsError::UnsupportedConfiguration("planar in-place conversion"));
    }

    let tflags = scanline_flags_for(conv_flags);
    let lformat = find_legacy_format(conv_flags);
    let needs_convert = conv_flags.intersects(ConvFlags::L8U8V8 | ConvFlags::WUV10);

    let mut row = Vec::new();
    for index in 0..image.image_count() {
        let mut img = image
            .image_at_mut(index)
            .ok_or(DdsError::MalformedHeader("subresource count mismatch"))?;
        let row_pitch = img.row_pitch;

        for h in 0..img.height {
            let scan = &mut img.pixels[h * row_pitch..(h + 1) * row_pitch];

            if conv_flags.contains(ConvFlags::SWIZZLE) {
                swizzle_scanline_in_place(scan, format, tflags);
            } else if needs_convert {
                row.clear();
                row.extend_from_slice(scan);
                legacy_convert_scanline(scan, format, &row, lformat, tflags)?;
            } else {
                copy_scanline_in_place(scan, format, tflags);
            }
        }
    }

    Ok(())
}

fn copy_scanline_in_place(scan: &mut [u8], format: Format, tflags: ScanlineFlags) {
    if tflags.contains(ScanlineFlags::SET_ALPHA) {
        vulkan_tex_image::set_alpha_scanline(scan, format);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ddspf, DdsPixelFormat, FOURCC_DXT1};
    use crate::save::save_to_dds_memory;
    use crate::test_prelude::*;
    use endian_writer::{EndianWriter, LittleEndianWriter};
    use vulkan_tex_image::AlphaMode;

    #[test]
    fn bc1_payload_is_stored_verbatim() {
        let mut file = create_valid_bc1_dds_with_dimensions(8, 8, 1);
        // Four 8-byte blocks with recognizable content.
        for (i, b) in file[128..].iter_mut().enumerate() {
            *b = i as u8;
        }

        let image = load_from_dds_memory(&file, DdsFlags::empty()).unwrap();
        assert_eq!(image.metadata().format, Format::BC1_RGB_UNORM_BLOCK);
        let top = image.image(0, 0, 0).unwrap();
        assert_eq!(top.row_pitch, 16);
        assert_eq!(top.slice_pitch, 32);
        assert!(top.pixels.iter().enumerate().all(|(i, &b)| b == i as u8));
    }

    #[test]
    fn truncated_payloads_are_rejected() {
        let mut file = create_valid_bc1_dds_with_dimensions(64, 64, 1);
        file.truncate(file.len() - 100);
        assert!(matches!(
            load_from_dds_memory(&file, DdsFlags::empty()),
            Err(DdsError::InputTooShort { .. })
        ));
    }

    #[test]
    fn legacy_r8g8b8_expands_to_rgba8() {
        // 2x1, 24bpp BGR payload
        let file = create_legacy_dds(&ddspf::R8G8B8, 2, 1, &[0x10, 0x20, 0x30, 0x40, 0x50, 0x60]);

        let image = load_from_dds_memory(&file, DdsFlags::empty()).unwrap();
        assert_eq!(image.metadata().format, Format::R8G8B8A8_UNORM);
        assert_eq!(image.metadata().alpha_mode(), AlphaMode::Opaque);

        let top = image.image(0, 0, 0).unwrap();
        assert_eq!(&top.pixels[..8], &[0x30, 0x20, 0x10, 0xFF, 0x60, 0x50, 0x40, 0xFF]);
    }

    #[test]
    fn legacy_565_expands_under_no_16bpp() {
        // One pure-green 565 pixel
        let file = create_legacy_dds(&ddspf::R5G6B5, 1, 1, &0x07E0u16.to_le_bytes());

        // Without the option the packed format is kept.
        let image = load_from_dds_memory(&file, DdsFlags::empty()).unwrap();
        assert_eq!(image.metadata().format, Format::B5G6R5_UNORM_PACK16);

        let image = load_from_dds_memory(&file, DdsFlags::NO_16BPP).unwrap();
        assert_eq!(image.metadata().format, Format::R8G8B8A8_UNORM);
        let top = image.image(0, 0, 0).unwrap();
        assert_eq!(u32::from_le_bytes(top.pixels[..4].try_into().unwrap()), 0xff00_ff00);
    }

    #[test]
    fn legacy_l8_stays_packed_unless_expansion_is_requested() {
        let file = create_legacy_dds(&ddspf::L8, 2, 1, &[0x11, 0x99]);

        let image = load_from_dds_memory(&file, DdsFlags::empty()).unwrap();
        assert_eq!(image.metadata().format, Format::R8_UNORM);
        assert_eq!(&image.image(0, 0, 0).unwrap().pixels[..2], &[0x11, 0x99]);

        let image = load_from_dds_memory(&file, DdsFlags::EXPAND_LUMINANCE).unwrap();
        assert_eq!(image.metadata().format, Format::R8G8B8A8_UNORM);
        let top = image.image(0, 0, 0).unwrap();
        assert_eq!(&top.pixels[..4], &[0x11, 0x11, 0x11, 0xFF]);
    }

    #[test]
    fn bgra8_swizzles_under_force_rgb() {
        // One B G R A pixel
        let file = create_legacy_dds(&ddspf::A8R8G8B8, 1, 1, &[0x10, 0x20, 0x30, 0x40]);

        let image = load_from_dds_memory(&file, DdsFlags::FORCE_RGB).unwrap();
        assert_eq!(image.metadata().format, Format::R8G8B8A8_UNORM);
        let top = image.image(0, 0, 0).unwrap();
        assert_eq!(&top.pixels[..4], &[0x30, 0x20, 0x10, 0x40]);
    }

    #[test]
    fn x8b8g8r8_forces_opaque_alpha() {
        let file = create_legacy_dds(&ddspf::X8B8G8R8, 1, 1, &[0x10, 0x20, 0x30, 0x00]);

        let image = load_from_dds_memory(&file, DdsFlags::empty()).unwrap();
        assert_eq!(image.metadata().alpha_mode(), AlphaMode::Opaque);
        let top = image.image(0, 0, 0).unwrap();
        assert_eq!(&top.pixels[..4], &[0x10, 0x20, 0x30, 0xFF]);
    }

    #[test]
    fn dxt2_implies_premultiplied_alpha() {
        let mut file = create_valid_bc1_dds_with_dimensions(4, 4, 1);
        // Rewrite the fourCC to DXT2 (BC2 premultiplied); BC2 blocks are
        // twice the size, so rebuild the payload.
        let mut writer = unsafe { LittleEndianWriter::new(file.as_mut_ptr()) };
        unsafe { writer.write_u32_at(crate::constants::FOURCC_DXT2, 0x54) };
        file.resize(128 + 16, 0);

        let image = load_from_dds_memory(&file, DdsFlags::empty()).unwrap();
        assert_eq!(image.metadata().format, Format::BC2_UNORM_BLOCK);
        assert_eq!(image.metadata().alpha_mode(), AlphaMode::Premultiplied);
    }

    #[test]
    fn unknown_fourcc_is_unsupported() {
        let mut file = create_valid_bc1_dds_with_dimensions(4, 4, 1);
        let mut writer = unsafe { LittleEndianWriter::new(file.as_mut_ptr()) };
        unsafe { writer.write_u32_at(0x3154_5845, 0x54) }; // 'EXT1'
        assert!(matches!(
            load_from_dds_memory(&file, DdsFlags::empty()),
            Err(DdsError::UnsupportedFormat)
        ));
    }

    #[test]
    fn bad_dxtn_tails_reuses_the_last_full_mip() {
        // 8x8 BC1 with 4 mips: 8x8 (32 bytes), 4x4 (8), 2x2, 1x1. With the
        // tails quirk the 2x2/1x1 levels are truncated in the file.
        let header_meta = TexMetadata {
            width: 8,
            height: 8,
            depth: 1,
            array_size: 1,
            mip_levels: 4,
            format: Format::BC1_RGB_UNORM_BLOCK,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        };
        let mut file = Vec::new();
        let mut header = vec![0u8; 128];
        crate::header::encode_dds_header(&header_meta, DdsFlags::empty(), Some(&mut header)).unwrap();
        file.extend_from_slice(&header);

        // Payload under the truncating pitch: 32 + 8 + 1 + 1 bytes.
        file.extend(std::iter::repeat(0xAA).take(32));
        file.extend(std::iter::repeat(0xBB).take(8));
        file.extend([0xCC, 0xDD]);

        let image = load_from_dds_memory(&file, DdsFlags::BAD_DXTN_TAILS).unwrap();

        // The tail mips carry the last good (4x4) mip's bytes.
        let tail = image.image(2, 0, 0).unwrap();
        assert_eq!(tail.pixels[0], 0xBB);
        let tail = image.image(3, 0, 0).unwrap();
        assert_eq!(tail.pixels[0], 0xBB);
    }

    #[test]
    fn save_then_load_round_trips_pixels() {
        let mut original =
            ScratchImage::initialize_2d(Format::R8G8B8A8_UNORM, 8, 4, 2, 3, CpFlags::empty())
                .unwrap();
        for (i, b) in original.pixels_mut().iter_mut().enumerate() {
            *b = (i * 7) as u8;
        }

        let views = original.image_views();
        let blob = save_to_dds_memory(&views, original.metadata(), DdsFlags::empty()).unwrap();

        let reloaded = load_from_dds_memory(blob.as_slice(), DdsFlags::empty()).unwrap();
        assert_eq!(reloaded.metadata(), original.metadata());
        assert_eq!(
            &reloaded.pixels()[..reloaded.packed_size()],
            &original.pixels()[..original.packed_size()]
        );
    }

    #[test]
    fn volume_round_trip_keeps_slice_order() {
        let mut original =
            ScratchImage::initialize_3d(Format::R8_UNORM, 4, 4, 4, 2, CpFlags::empty()).unwrap();
        for (i, b) in original.pixels_mut().iter_mut().enumerate() {
            *b = i as u8;
        }

        let views = original.image_views();
        let blob = save_to_dds_memory(&views, original.metadata(), DdsFlags::empty()).unwrap();
        let reloaded = load_from_dds_memory(blob.as_slice(), DdsFlags::empty()).unwrap();

        assert_eq!(reloaded.metadata(), original.metadata());
        for index in 0..original.image_count() {
            assert_eq!(
                reloaded.image_at(index).unwrap().pixels,
                original.image_at(index).unwrap().pixels
            );
        }
    }

    #[test]
    fn permissive_cubemap_retry_halves_the_array() {
        // A DX10 cubemap that wrote arraySize=6 (faces) instead of 1 (cubes):
        // decode multiplies by six, so the payload only covers a sixth.
        let metadata = TexMetadata {
            width: 4,
            height: 4,
            depth: 1,
            array_size: 6,
            mip_levels: 1,
            misc_flags: vulkan_tex_image::TexMiscFlags::TEXTURECUBE,
            format: Format::R8G8B8A8_UNORM,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        };

        let mut header = vec![0u8; 148];
        crate::header::encode_dds_header(&metadata, DdsFlags::FORCE_DX10_EXT, Some(&mut header))
            .unwrap();
        // Corrupt arraySize from 1 cube to 6 "cubes".
        header[140..144].copy_from_slice(&6u32.to_le_bytes());

        let mut file = header;
        file.extend(std::iter::repeat(0u8).take(6 * 64)); // six faces only

        assert!(load_from_dds_memory(&file, DdsFlags::empty()).is_err());

        let image = load_from_dds_memory(&file, DdsFlags::PERMISSIVE).unwrap();
        assert_eq!(image.metadata().array_size, 6);
        assert!(image.metadata().is_cubemap());
    }

    #[test]
    fn zero_sized_ddpf_with_fourcc_still_matches() {
        let mut file = create_valid_bc1_dds_with_dimensions(4, 4, 1);
        // Zero the pixel-format size and flags, leaving only the fourCC, as
        // some broken writers do. PERMISSIVE accepts the size-0 descriptor.
        file[76..84].fill(0);
        let mut writer = unsafe { LittleEndianWriter::new(file.as_mut_ptr()) };
        unsafe { writer.write_u32_at(FOURCC_DXT1, 0x54) };

        let decoded = dds_metadata_from_memory(&file, DdsFlags::PERMISSIVE).unwrap();
        assert_eq!(decoded.format, Format::BC1_RGB_UNORM_BLOCK);

        assert!(dds_metadata_from_memory(&file, DdsFlags::empty()).is_err());
    }

    #[test]
    fn raw_descriptor_is_reported_by_the_ex_form() {
        let file = create_legacy_dds(&ddspf::A8R8G8B8, 1, 1, &[0; 4]);
        let decoded = dds_metadata_from_memory_ex(&file, DdsFlags::empty()).unwrap();
        assert_eq!(decoded.pixel_format, ddspf::A8R8G8B8);
        let _: DdsPixelFormat = decoded.pixel_format;
    }
}
