//! TGA load pipeline: palette expansion, RLE/literal pixel decode, the
//! all-zero-alpha heuristic, and 2.0 metadata integration.

use crate::error::{TgaError, TgaResult};
use crate::extension::{srgb_format_from_extension, TgaExtension, TgaFooter, TGA_EXTENSION_LEN};
use crate::flags::TgaFlags;
use crate::header::{decode_tga_header, ConvFlags, TgaHeader, TGA_HEADER_LEN};
use vulkan_tex_format::{CpFlags, Format};
use vulkan_tex_image::{set_alpha_scanline, AlphaMode, ImageViewMut, ScratchImage, TexMetadata};

/// Reads the texture identity out of a TGA file in memory, including the
/// 2.0 alpha mode and gamma metadata.
pub fn tga_metadata_from_memory(source: &[u8], flags: TgaFlags) -> TgaResult<TexMetadata> {
    let decoded = decode_tga_header(source, flags)?;
    let mut metadata = decoded.metadata;

    let ext = read_extension(source);
    if let Some(ext) = &ext {
        metadata.set_alpha_mode(ext.alpha_mode());
    }

    if !flags.contains(TgaFlags::IGNORE_SRGB) {
        metadata.format = srgb_format_from_extension(ext.as_ref(), metadata.format, flags);
    }

    Ok(metadata)
}

/// Loads a TGA file from memory into a single-subresource
/// [`ScratchImage`].
pub fn load_from_tga_memory(source: &[u8], flags: TgaFlags) -> TgaResult<ScratchImage> {
    let decoded = decode_tga_header(source, flags)?;
    let conv_flags = decoded.conv_flags;
    let metadata = decoded.metadata;

    if decoded.offset > source.len() {
        return Err(TgaError::InputTooShort {
            required: decoded.offset,
            actual: source.len(),
        });
    }

    let mut offset = decoded.offset;

    let mut palette = [0u8; 256 * 4];
    if conv_flags.contains(ConvFlags::PALETTED) {
        let header = TgaHeader::read(source).ok_or(TgaError::InputTooShort {
            required: TGA_HEADER_LEN,
            actual: source.len(),
        })?;
        let colormap_len = read_palette(&header, &source[offset..], flags, &mut palette)?;
        offset += colormap_len;
    }

    if offset >= source.len() {
        return Err(TgaError::InputTooShort {
            required: offset + 1,
            actual: source.len(),
        });
    }
    let pixels = &source[offset..];

    let mut image = ScratchImage::initialize_2d(
        metadata.format,
        metadata.width,
        metadata.height,
        1,
        1,
        CpFlags::LIMIT_4GB,
    )?;

    let opaque_alpha = {
        let mut view = image.image_at_mut(0).ok_or(TgaError::MalformedHeader("no subresource"))?;
        if conv_flags.contains(ConvFlags::RLE) {
            uncompress_pixels(pixels, flags, &mut view, conv_flags)?
        } else {
            copy_pixels(pixels, flags, &mut view, conv_flags, &palette)?
        }
    };

    // Optional TGA 2.0 footer & extension area
    let ext = read_extension(source);

    if !flags.contains(TgaFlags::IGNORE_SRGB) {
        let format = srgb_format_from_extension(ext.as_ref(), image.metadata().format, flags);
        if format != image.metadata().format {
            image.override_format(format)?;
        }
    }

    // The header's implicit alpha mode is refined by the pixel scan and the
    // extension area, in that order of authority.
    if metadata.alpha_mode() != AlphaMode::Unknown {
        image.set_alpha_mode(metadata.alpha_mode());
    }
    if opaque_alpha {
        image.set_alpha_mode(AlphaMode::Opaque);
    } else if let Some(ext) = &ext {
        image.set_alpha_mode(ext.alpha_mode());
    }

    Ok(image)
}

fn read_extension(source: &[u8]) -> Option<TgaExtension> {
    let footer = TgaFooter::read(source)?;
    let start = footer.extension_offset as usize;
    if start == 0 || start + TGA_EXTENSION_LEN > source.len() {
        return None;
    }
    TgaExtension::read(&source[start..])
}

/// Expands the color map into a 256-entry RGBA (or BGRX) table.
///
/// Returns the byte length of the on-disk color map.
fn read_palette(
    header: &TgaHeader,
    source: &[u8],
    flags: TgaFlags,
    palette: &mut [u8; 256 * 4],
) -> TgaResult<usize> {
    if header.color_map_type != 1
        || header.color_map_length == 0
        || header.color_map_length > 256
        || header.color_map_size != 24
    {
        return Err(TgaError::MalformedHeader("inconsistent colormap fields"));
    }

    let first = header.color_map_first as usize;
    let count = header.color_map_length as usize;
    if first + count > 256 {
        return Err(TgaError::MalformedHeader("colormap range past 256 entries"));
    }

    let colormap_len = count * ((header.color_map_size as usize + 7) >> 3);
    if colormap_len > source.len() {
        return Err(TgaError::InputTooShort {
            required: colormap_len,
            actual: source.len(),
        });
    }

    for (i, bytes) in (first..first + count).zip(source.chunks_exact(3)) {
        // Entries are B, G, R on disk.
        if flags.contains(TgaFlags::BGR) {
            palette[i * 4] = bytes[0];
            palette[i * 4 + 2] = bytes[2];
        } else {
            palette[i * 4] = bytes[2];
            palette[i * 4 + 2] = bytes[0];
        }
        palette[i * 4 + 1] = bytes[1];
        palette[i * 4 + 3] = 255;
    }

    Ok(colormap_len)
}

/// Forces every alpha sample in the image to opaque.
fn set_alpha_channel_to_opaque(image: &mut ImageViewMut<'_>) {
    let row_pitch = image.row_pitch;
    for y in 0..image.height {
        set_alpha_scanline(&mut image.pixels[y * row_pitch..(y + 1) * row_pitch], image.format);
    }
}

/// Byte size of one decoded pixel for the destination format.
fn dest_pixel_size(format: Format) -> usize {
    match format {
        Format::R8_UNORM => 1,
        Format::B5G5R5A1_UNORM_PACK16 => 2,
        Format::B8G8R8_UNORM => 3,
        _ => 4,
    }
}

/// Destination placement for decoded rows: TGA rows run bottom-up unless
/// `INVERT_Y`, and right-to-left under `INVERT_X`.
struct DestCursor {
    row_pitch: usize,
    width: usize,
    height: usize,
    px: usize,
    invert_x: bool,
    invert_y: bool,
}

impl DestCursor {
    fn new(image: &ImageViewMut<'_>, conv_flags: ConvFlags) -> Self {
        Self {
            row_pitch: image.row_pitch,
            width: image.width,
            height: image.height,
            px: dest_pixel_size(image.format),
            invert_x: conv_flags.contains(ConvFlags::INVERT_X),
            invert_y: conv_flags.contains(ConvFlags::INVERT_Y),
        }
    }

    /// Byte offset of pixel `(x, y)` in file order.
    fn offset(&self, x: usize, y: usize) -> usize {
        let row = if self.invert_y { y } else { self.height - y - 1 };
        let col = if self.invert_x { self.width - x - 1 } else { x };
        row * self.row_pitch + col * self.px
    }
}

/// Tracks the alpha range seen while decoding, for the all-zero heuristic.
struct AlphaRange {
    min: u32,
    max: u32,
}

impl AlphaRange {
    fn new() -> Self {
        Self { min: 255, max: 0 }
    }

    #[inline]
    fn sample(&mut self, alpha: u32) {
        self.min = self.min.min(alpha);
        self.max = self.max.max(alpha);
    }

    /// Applies the heuristic; returns whether the image is known opaque.
    fn resolve(&self, flags: TgaFlags, image: &mut ImageViewMut<'_>) -> bool {
        if self.max == 0 && !flags.contains(TgaFlags::ALLOW_ALL_ZERO_ALPHA) {
            // No non-zero alpha anywhere: assume the channel is unused and
            // force it opaque.
            set_alpha_channel_to_opaque(image);
            true
        } else {
            self.min == 255
        }
    }
}

/// One decoded source pixel in destination layout, plus its alpha sample.
struct DecodedPixel {
    bytes: [u8; 4],
    alpha: Option<u32>,
}

/// Reads one source pixel for `format`, advancing `*pos`.
fn read_pixel(
    source: &[u8],
    pos: &mut usize,
    format: Format,
    expand: bool,
) -> TgaResult<DecodedPixel> {
    let need = match format {
        Format::R8_UNORM => 1,
        Format::B5G5R5A1_UNORM_PACK16 => 2,
        Format::B8G8R8_UNORM => 3,
        _ if expand => 3,
        _ => 4,
    };

    if *pos + need > source.len() {
        return Err(TgaError::RleOverrun);
    }
    let s = &source[*pos..*pos + need];
    *pos += need;

    let decoded = match format {
        Format::R8_UNORM => DecodedPixel {
            bytes: [s[0], 0, 0, 0],
            alpha: None,
        },

        Format::B5G5R5A1_UNORM_PACK16 => {
            let t = u16::from_le_bytes([s[0], s[1]]);
            DecodedPixel {
                bytes: [s[0], s[1], 0, 0],
                alpha: Some(if t & 0x8000 != 0 { 255 } else { 0 }),
            }
        }

        // Kept in file order: B, G, R.
        Format::B8G8R8_UNORM => DecodedPixel {
            bytes: [s[0], s[1], s[2], 0],
            alpha: None,
        },

        // BGRA (or BGR) to RGBA.
        Format::R8G8B8A8_UNORM => {
            if expand {
                DecodedPixel {
                    bytes: [s[2], s[1], s[0], 0xFF],
                    alpha: Some(255),
                }
            } else {
                DecodedPixel {
                    bytes: [s[2], s[1], s[0], s[3]],
                    alpha: Some(s[3] as u32),
                }
            }
        }

        // BGRA kept as-is.
        Format::B8G8R8A8_UNORM => DecodedPixel {
            bytes: [s[0], s[1], s[2], s[3]],
            alpha: Some(s[3] as u32),
        },

        _ => return Err(TgaError::UnsupportedConfiguration("undecodable format")),
    };

    Ok(decoded)
}

/// Decodes an RLE-compressed pixel stream into the image.
///
/// Returns whether the image turned out to be fully opaque (either every
/// alpha sample was 255, or the all-zero heuristic rewrote the channel).
fn uncompress_pixels(
    source: &[u8],
    flags: TgaFlags,
    image: &mut ImageViewMut<'_>,
    conv_flags: ConvFlags,
) -> TgaResult<bool> {
    let cursor = DestCursor::new(image, conv_flags);
    let expand = conv_flags.contains(ConvFlags::EXPAND);
    let format = image.format;
    let px = cursor.px;

    let mut alpha = AlphaRange::new();
    let mut pos = 0usize;

    for y in 0..cursor.height {
        let mut x = 0usize;
        while x < cursor.width {
            let control = *source.get(pos).ok_or(TgaError::RleOverrun)?;
            pos += 1;
            let run = (control & 0x7F) as usize + 1;

            if control & 0x80 != 0 {
                // Repeat packet: one pixel, replicated.
                let pixel = read_pixel(source, &mut pos, format, expand)?;
                if let Some(a) = pixel.alpha {
                    alpha.sample(a);
                }

                for _ in 0..run {
                    if x >= cursor.width {
                        return Err(TgaError::RleOverrun);
                    }
                    let at = cursor.offset(x, y);
                    image.pixels[at..at + px].copy_from_slice(&pixel.bytes[..px]);
                    x += 1;
                }
            } else {
                // Literal packet.
                for _ in 0..run {
                    if x >= cursor.width {
                        return Err(TgaError::RleOverrun);
                    }
                    let pixel = read_pixel(source, &mut pos, format, expand)?;
                    if let Some(a) = pixel.alpha {
                        alpha.sample(a);
                    }

                    let at = cursor.offset(x, y);
                    image.pixels[at..at + px].copy_from_slice(&pixel.bytes[..px]);
                    x += 1;
                }
            }
        }
    }

    // Formats without alpha never trigger the heuristic.
    if matches!(format, Format::R8_UNORM | Format::B8G8R8_UNORM) {
        return Ok(false);
    }

    Ok(alpha.resolve(flags, image))
}

/// Decodes an uncompressed pixel stream (or palette indices) into the image.
fn copy_pixels(
    source: &[u8],
    flags: TgaFlags,
    image: &mut ImageViewMut<'_>,
    conv_flags: ConvFlags,
    palette: &[u8; 256 * 4],
) -> TgaResult<bool> {
    let cursor = DestCursor::new(image, conv_flags);
    let expand = conv_flags.contains(ConvFlags::EXPAND);
    let format = image.format;
    let px = cursor.px;

    if conv_flags.contains(ConvFlags::PALETTED) {
        let mut pos = 0usize;
        for y in 0..cursor.height {
            for x in 0..cursor.width {
                let index = *source.get(pos).ok_or(TgaError::InputTooShort {
                    required: pos + 1,
                    actual: source.len(),
                })? as usize;
                pos += 1;

                let at = cursor.offset(x, y);
                image.pixels[at..at + px].copy_from_slice(&palette[index * 4..index * 4 + px]);
            }
        }
        return Ok(false);
    }

    let mut alpha = AlphaRange::new();
    let mut pos = 0usize;

    for y in 0..cursor.height {
        for x in 0..cursor.width {
            let pixel = read_pixel(source, &mut pos, format, expand).map_err(|e| match e {
                TgaError::RleOverrun => TgaError::InputTooShort {
                    required: pos + 1,
                    actual: source.len(),
                },
                other => other,
            })?;
            if let Some(a) = pixel.alpha {
                alpha.sample(a);
            }

            let at = cursor.offset(x, y);
            image.pixels[at..at + px].copy_from_slice(&pixel.bytes[..px]);
        }
    }

    if matches!(format, Format::R8_UNORM | Format::B8G8R8_UNORM) {
        return Ok(false);
    }

    Ok(alpha.resolve(flags, image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::image_type;
    use rstest::rstest;

    pub(crate) fn tga_file(
        ty: u8,
        width: u16,
        height: u16,
        bpp: u8,
        descriptor: u8,
        body: &[u8],
    ) -> Vec<u8> {
        let mut file = vec![0u8; TGA_HEADER_LEN];
        let header = TgaHeader {
            image_type: ty,
            width,
            height,
            bits_per_pixel: bpp,
            descriptor,
            ..TgaHeader::default()
        };
        header.write(&mut file);
        file.extend_from_slice(body);
        file
    }

    #[test]
    fn truecolor_rle_run_decodes_and_swizzles() {
        // Repeat run of length 2 carrying BGR (0x10, 0x20, 0x30), top-down.
        let file = tga_file(image_type::TRUECOLOR_RLE, 2, 1, 24, 0x20, &[0x81, 0x10, 0x20, 0x30]);

        let image = load_from_tga_memory(&file, TgaFlags::empty()).unwrap();
        assert_eq!(image.metadata().format, Format::R8G8B8A8_UNORM);
        let top = image.image(0, 0, 0).unwrap();
        assert_eq!(&top.pixels[..8], &[0x30, 0x20, 0x10, 0xFF, 0x30, 0x20, 0x10, 0xFF]);
        assert_eq!(image.metadata().alpha_mode(), AlphaMode::Opaque);
    }

    #[test]
    fn rle_run_crossing_the_end_of_input_fails() {
        let file = tga_file(image_type::TRUECOLOR_RLE, 2, 1, 24, 0x20, &[0x81, 0x10, 0x20]);
        assert!(matches!(
            load_from_tga_memory(&file, TgaFlags::empty()),
            Err(TgaError::RleOverrun)
        ));
    }

    #[test]
    fn rle_run_crossing_the_row_fails() {
        // Run of 3 on a 2-wide image.
        let file = tga_file(image_type::TRUECOLOR_RLE, 2, 2, 24, 0x20, &[0x82, 1, 2, 3]);
        assert!(matches!(
            load_from_tga_memory(&file, TgaFlags::empty()),
            Err(TgaError::RleOverrun)
        ));
    }

    #[test]
    fn bottom_up_storage_is_flipped_into_place() {
        // 1x2, uncompressed grayscale, no INVERT_Y: the first file row is
        // the bottom of the image.
        let file = tga_file(image_type::BLACK_AND_WHITE, 1, 2, 8, 0, &[0xAA, 0xBB]);

        let image = load_from_tga_memory(&file, TgaFlags::empty()).unwrap();
        let px = image.image(0, 0, 0).unwrap();
        assert_eq!(px.pixels[0], 0xBB); // top row came last in the file
        assert_eq!(px.pixels[4], 0xAA);
    }

    #[test]
    fn invert_x_reverses_each_row() {
        let file = tga_file(image_type::BLACK_AND_WHITE, 2, 1, 8, 0x10 | 0x20, &[1, 2]);

        let image = load_from_tga_memory(&file, TgaFlags::empty()).unwrap();
        let px = image.image(0, 0, 0).unwrap();
        assert_eq!(&px.pixels[..2], &[2, 1]);
    }

    #[test]
    fn all_zero_alpha_is_forced_opaque() {
        // Two 32bpp pixels, alpha zero everywhere.
        let body = [0x10, 0x20, 0x30, 0x00, 0x40, 0x50, 0x60, 0x00];
        let file = tga_file(image_type::TRUECOLOR, 2, 1, 32, 0x20, &body);

        let image = load_from_tga_memory(&file, TgaFlags::empty()).unwrap();
        let px = image.image(0, 0, 0).unwrap();
        assert_eq!(px.pixels[3], 0xFF);
        assert_eq!(px.pixels[7], 0xFF);
        assert_eq!(image.metadata().alpha_mode(), AlphaMode::Opaque);

        // The flag leaves the channel alone.
        let image = load_from_tga_memory(&file, TgaFlags::ALLOW_ALL_ZERO_ALPHA).unwrap();
        let px = image.image(0, 0, 0).unwrap();
        assert_eq!(px.pixels[3], 0x00);
        assert_ne!(image.metadata().alpha_mode(), AlphaMode::Opaque);
    }

    #[test]
    fn uniformly_opaque_alpha_sets_the_mode_without_rewrites() {
        let body = [0x10, 0x20, 0x30, 0xFF];
        let file = tga_file(image_type::TRUECOLOR, 1, 1, 32, 0x20, &body);

        let image = load_from_tga_memory(&file, TgaFlags::empty()).unwrap();
        assert_eq!(image.metadata().alpha_mode(), AlphaMode::Opaque);
    }

    #[test]
    fn bgr_option_skips_the_swizzle() {
        let body = [0x10, 0x20, 0x30, 0x80];
        let file = tga_file(image_type::TRUECOLOR, 1, 1, 32, 0x20, &body);

        let image = load_from_tga_memory(&file, TgaFlags::BGR).unwrap();
        assert_eq!(image.metadata().format, Format::B8G8R8A8_UNORM);
        assert_eq!(&image.image(0, 0, 0).unwrap().pixels[..4], &body);
    }

    #[test]
    fn paletted_images_expand_through_the_colormap() {
        let mut file = vec![0u8; TGA_HEADER_LEN];
        TgaHeader {
            image_type: image_type::COLOR_MAPPED,
            color_map_type: 1,
            color_map_length: 2,
            color_map_size: 24,
            width: 2,
            height: 1,
            bits_per_pixel: 8,
            descriptor: 0x20,
            ..TgaHeader::default()
        }
        .write(&mut file);

        // Two B,G,R palette entries, then two indices.
        file.extend_from_slice(&[0x10, 0x20, 0x30, 0x40, 0x50, 0x60]);
        file.extend_from_slice(&[1, 0]);

        let image = load_from_tga_memory(&file, TgaFlags::empty()).unwrap();
        assert_eq!(image.metadata().format, Format::R8G8B8A8_UNORM);
        assert_eq!(image.metadata().alpha_mode(), AlphaMode::Opaque);
        let px = image.image(0, 0, 0).unwrap();
        assert_eq!(&px.pixels[..8], &[0x60, 0x50, 0x40, 0xFF, 0x30, 0x20, 0x10, 0xFF]);
    }

    #[test]
    fn grayscale_rle_decodes_literal_packets() {
        // Literal packet of 2, then a repeat of 2.
        let file = tga_file(
            image_type::BLACK_AND_WHITE_RLE,
            4,
            1,
            8,
            0x20,
            &[0x01, 0xAA, 0xBB, 0x81, 0xCC],
        );
        let image = load_from_tga_memory(&file, TgaFlags::empty()).unwrap();
        assert_eq!(&image.image(0, 0, 0).unwrap().pixels[..4], &[0xAA, 0xBB, 0xCC, 0xCC]);
    }

    #[rstest]
    #[case(22, 10)] // gamma 2.2
    #[case(24, 10)] // gamma 2.4
    fn gamma_metadata_promotes_to_srgb(#[case] numerator: u16, #[case] denominator: u16) {
        let body = [0x10, 0x20, 0x30];
        let mut file = tga_file(image_type::TRUECOLOR, 1, 1, 24, 0x20, &body);

        let ext_offset = file.len() as u32;
        let ext = TgaExtension {
            size: TGA_EXTENSION_LEN as u16,
            gamma_numerator: numerator,
            gamma_denominator: denominator,
            ..TgaExtension::default()
        };
        let mut ext_bytes = [0u8; TGA_EXTENSION_LEN];
        ext.write(&mut ext_bytes);
        file.extend_from_slice(&ext_bytes);

        let mut footer = [0u8; crate::extension::TGA_FOOTER_LEN];
        TgaFooter {
            extension_offset: ext_offset,
            developer_offset: 0,
        }
        .write(&mut footer);
        file.extend_from_slice(&footer);

        // BGR keeps B8G8R8_UNORM, which the gamma promotes to sRGB.
        let image = load_from_tga_memory(&file, TgaFlags::BGR).unwrap();
        assert_eq!(image.metadata().format, Format::B8G8R8_SRGB);

        let metadata = tga_metadata_from_memory(&file, TgaFlags::BGR).unwrap();
        assert_eq!(metadata.format, Format::B8G8R8_SRGB);

        // The opt-out leaves the format linear.
        let image = load_from_tga_memory(&file, TgaFlags::BGR | TgaFlags::IGNORE_SRGB).unwrap();
        assert_eq!(image.metadata().format, Format::B8G8R8_UNORM);
    }

    #[test]
    fn extension_alpha_mode_is_adopted() {
        let body = [0x10, 0x20, 0x30, 0x80]; // mixed alpha, no heuristic hit
        let mut file = tga_file(image_type::TRUECOLOR, 1, 1, 32, 0x20, &body);

        let ext_offset = file.len() as u32;
        let ext = TgaExtension {
            size: TGA_EXTENSION_LEN as u16,
            attributes_type: 4, // premultiplied
            ..TgaExtension::default()
        };
        let mut ext_bytes = [0u8; TGA_EXTENSION_LEN];
        ext.write(&mut ext_bytes);
        file.extend_from_slice(&ext_bytes);

        let mut footer = [0u8; crate::extension::TGA_FOOTER_LEN];
        TgaFooter {
            extension_offset: ext_offset,
            developer_offset: 0,
        }
        .write(&mut footer);
        file.extend_from_slice(&footer);

        let image = load_from_tga_memory(&file, TgaFlags::empty()).unwrap();
        assert_eq!(image.metadata().alpha_mode(), AlphaMode::Premultiplied);
    }

    #[test]
    fn truncated_pixel_streams_are_rejected() {
        let file = tga_file(image_type::TRUECOLOR, 2, 2, 32, 0x20, &[0u8; 7]);
        assert!(load_from_tga_memory(&file, TgaFlags::empty()).is_err());
    }
}
