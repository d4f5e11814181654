//! TGA save pipeline.

use crate::clock::{SystemClock, TgaClock};
use crate::error::{TgaError, TgaResult};
use crate::extension::{TgaExtension, TgaFooter, TGA_EXTENSION_LEN, TGA_FOOTER_LEN};
use crate::flags::TgaFlags;
use crate::header::{encode_tga_header, ConvFlags, TgaHeader, TGA_HEADER_LEN};
use vulkan_tex_format::{compute_pitch, CpFlags, Pitch};
use vulkan_tex_image::{copy_scanline, swizzle_scanline, Blob, ImageView, ScanlineFlags, TexMetadata};

pub(crate) struct EncodePlan {
    pub header: TgaHeader,
    pub conv_flags: ConvFlags,
    pub pitch: Pitch,
    /// Total output byte count: header + pixels (+ extension) + footer.
    pub total: usize,
    pub with_extension: bool,
}

pub(crate) fn plan_encode(
    image: &ImageView<'_>,
    flags: TgaFlags,
    metadata: Option<&TexMetadata>,
) -> TgaResult<EncodePlan> {
    if flags.intersects(TgaFlags::FORCE_LINEAR | TgaFlags::FORCE_SRGB) && metadata.is_none() {
        return Err(TgaError::MissingMetadata);
    }

    let (header, conv_flags) = encode_tga_header(image)?;

    let pitch_flags = if conv_flags.contains(ConvFlags::P888) {
        CpFlags::BPP24
    } else {
        CpFlags::empty()
    };
    let pitch = compute_pitch(image.format, image.width, image.height, pitch_flags)?;

    let with_extension = metadata.is_some();
    let total = TGA_HEADER_LEN
        + pitch.slice
        + if with_extension { TGA_EXTENSION_LEN } else { 0 }
        + TGA_FOOTER_LEN;

    Ok(EncodePlan {
        header,
        conv_flags,
        pitch,
        total,
        with_extension,
    })
}

/// Writes one output row from the canonical storage.
pub(crate) fn encode_row(dst: &mut [u8], image: &ImageView<'_>, y: usize, conv_flags: ConvFlags) {
    let src = &image.pixels[y * image.row_pitch..];
    let src = &src[..image.row_pitch.min(src.len())];

    if conv_flags.contains(ConvFlags::P888) {
        if image.row_pitch >= image.width * 4 {
            // BGRX storage: drop every fourth byte.
            for x in 0..image.width {
                dst[x * 3..x * 3 + 3].copy_from_slice(&src[x * 4..x * 4 + 3]);
            }
        } else {
            // Already packed 24bpp rows.
            let size = dst.len().min(src.len());
            dst[..size].copy_from_slice(&src[..size]);
        }
    } else if conv_flags.contains(ConvFlags::SWIZZLE) {
        swizzle_scanline(dst, src, image.format, ScanlineFlags::empty());
    } else {
        copy_scanline(dst, src, image.format, ScanlineFlags::empty());
    }
}

/// Fills `out` (sized by [`EncodePlan::total`]) with the complete file.
pub(crate) fn encode_into(
    out: &mut [u8],
    image: &ImageView<'_>,
    plan: &EncodePlan,
    flags: TgaFlags,
    metadata: Option<&TexMetadata>,
    clock: &dyn TgaClock,
) {
    plan.header.write(out);

    let mut offset = TGA_HEADER_LEN;
    for y in 0..image.height {
        encode_row(&mut out[offset..offset + plan.pitch.row], image, y, plan.conv_flags);
        offset += plan.pitch.row;
    }

    let mut extension_offset = 0u32;
    if let (true, Some(metadata)) = (plan.with_extension, metadata) {
        extension_offset = offset as u32;
        TgaExtension::for_save(flags, metadata, clock).write(&mut out[offset..]);
        offset += TGA_EXTENSION_LEN;
    }

    TgaFooter {
        extension_offset,
        developer_offset: 0,
    }
    .write(&mut out[offset..]);
}

/// Serializes an image as a TGA 2.0 file in memory.
///
/// When `metadata` is supplied a 2.0 extension area is written (gamma,
/// alpha mode, timestamp); the footer is emitted either way. Storage is
/// top-down, with R8G8B8A8 sources swizzled to the file's BGRA order.
pub fn save_to_tga_memory(
    image: ImageView<'_>,
    flags: TgaFlags,
    metadata: Option<&TexMetadata>,
) -> TgaResult<Blob> {
    save_to_tga_memory_with_clock(image, flags, metadata, &SystemClock)
}

/// As [`save_to_tga_memory`] with an explicit timestamp source.
pub fn save_to_tga_memory_with_clock(
    image: ImageView<'_>,
    flags: TgaFlags,
    metadata: Option<&TexMetadata>,
    clock: &dyn TgaClock,
) -> TgaResult<Blob> {
    let plan = plan_encode(&image, flags, metadata)?;

    let mut blob = Blob::initialize(plan.total)?;
    encode_into(blob.as_mut_slice(), &image, &plan, flags, metadata, clock);
    blob.trim(plan.total)?;

    Ok(blob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{FixedClock, TgaTimestamp};
    use crate::decode::{load_from_tga_memory, tga_metadata_from_memory};
    use vulkan_tex_format::Format;
    use vulkan_tex_image::{AlphaMode, ScratchImage};

    fn fixed_clock() -> FixedClock {
        FixedClock(TgaTimestamp {
            month: 2,
            day: 29,
            year: 2024,
            hour: 23,
            minute: 59,
            second: 58,
        })
    }

    fn rgba_image(width: usize, height: usize, seed: u8) -> ScratchImage {
        let mut image =
            ScratchImage::initialize_2d(Format::R8G8B8A8_UNORM, width, height, 1, 1, CpFlags::empty())
                .unwrap();
        for (i, b) in image.pixels_mut().iter_mut().enumerate() {
            *b = seed.wrapping_add(i as u8) | 1; // keep alpha non-zero
        }
        image
    }

    #[test]
    fn header_and_footer_frame_the_pixels() {
        let image = rgba_image(2, 2, 3);
        let blob = save_to_tga_memory(image.image_at(0).unwrap(), TgaFlags::empty(), None).unwrap();

        let bytes = blob.as_slice();
        assert_eq!(bytes.len(), 18 + 16 + 26);
        assert_eq!(bytes[2], 2); // truecolor
        assert_eq!(bytes[16], 32);
        assert_eq!(bytes[17], 0x20 | 8); // top-down, 8 attribute bits
        assert_eq!(&bytes[bytes.len() - 18..], b"TRUEVISION-XFILE.\0");
        // No extension: offset field is zero.
        assert_eq!(&bytes[bytes.len() - 26..bytes.len() - 22], &[0, 0, 0, 0]);
    }

    #[test]
    fn rgba_round_trips_through_the_file_order() {
        let image = rgba_image(4, 3, 11);
        let blob = save_to_tga_memory(image.image_at(0).unwrap(), TgaFlags::empty(), None).unwrap();

        let reloaded = load_from_tga_memory(blob.as_slice(), TgaFlags::empty()).unwrap();
        assert_eq!(reloaded.metadata().format, Format::R8G8B8A8_UNORM);
        assert_eq!(
            reloaded.image_at(0).unwrap().pixels,
            image.image_at(0).unwrap().pixels
        );
    }

    #[test]
    fn grayscale_round_trips() {
        let mut image =
            ScratchImage::initialize_2d(Format::R8_UNORM, 5, 4, 1, 1, CpFlags::empty()).unwrap();
        for (i, b) in image.pixels_mut().iter_mut().enumerate() {
            *b = i as u8;
        }

        let blob = save_to_tga_memory(image.image_at(0).unwrap(), TgaFlags::empty(), None).unwrap();
        let reloaded = load_from_tga_memory(blob.as_slice(), TgaFlags::empty()).unwrap();
        assert_eq!(
            reloaded.image_at(0).unwrap().pixels,
            image.image_at(0).unwrap().pixels
        );
    }

    #[test]
    fn extension_carries_the_injected_timestamp() {
        let image = rgba_image(2, 2, 0);
        let mut metadata = *image.metadata();
        metadata.set_alpha_mode(AlphaMode::Straight);

        let blob = save_to_tga_memory_with_clock(
            image.image_at(0).unwrap(),
            TgaFlags::empty(),
            Some(&metadata),
            &fixed_clock(),
        )
        .unwrap();

        let bytes = blob.as_slice();
        assert_eq!(bytes.len(), 18 + 16 + 495 + 26);

        let ext_offset =
            u32::from_le_bytes(bytes[bytes.len() - 26..bytes.len() - 22].try_into().unwrap());
        assert_eq!(ext_offset, 18 + 16);

        let ext = TgaExtension::read(&bytes[ext_offset as usize..]).unwrap();
        assert_eq!(ext.stamp_year, 2024);
        assert_eq!(ext.stamp_month, 2);
        assert_eq!(ext.stamp_day, 29);
        assert_eq!(ext.stamp_second, 58);
        assert_eq!(ext.attributes_type, 3);

        // And the reader adopts the stored alpha mode.
        let reloaded = tga_metadata_from_memory(bytes, TgaFlags::empty()).unwrap();
        assert_eq!(reloaded.alpha_mode(), AlphaMode::Straight);
    }

    #[test]
    fn force_srgb_writes_gamma_metadata() {
        let image = rgba_image(2, 2, 0);
        let metadata = *image.metadata();

        let blob = save_to_tga_memory_with_clock(
            image.image_at(0).unwrap(),
            TgaFlags::FORCE_SRGB,
            Some(&metadata),
            &fixed_clock(),
        )
        .unwrap();

        let reloaded = tga_metadata_from_memory(blob.as_slice(), TgaFlags::empty()).unwrap();
        assert_eq!(reloaded.format, Format::R8G8B8A8_SRGB);

        // The override is meaningless without a description to read it from.
        assert!(save_to_tga_memory(image.image_at(0).unwrap(), TgaFlags::FORCE_SRGB, None).is_err());
    }

    #[test]
    fn unsupported_formats_are_rejected() {
        let image =
            ScratchImage::initialize_2d(Format::BC1_RGB_UNORM_BLOCK, 4, 4, 1, 1, CpFlags::empty())
                .unwrap();
        assert!(matches!(
            save_to_tga_memory(image.image_at(0).unwrap(), TgaFlags::empty(), None),
            Err(TgaError::UnsupportedConfiguration(_))
        ));
    }
}
