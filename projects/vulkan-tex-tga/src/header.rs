//! The 18-byte TGA header.

use crate::error::{TgaError, TgaResult};
use crate::flags::TgaFlags;
use bitflags::bitflags;
use vulkan_tex_format::Format;
use vulkan_tex_image::{AlphaMode, ImageView, TexMetadata};

/// Byte length of the fixed header.
pub const TGA_HEADER_LEN: usize = 18;

/// `image_type` values.
pub(crate) mod image_type {
    pub const NO_IMAGE: u8 = 0;
    pub const COLOR_MAPPED: u8 = 1;
    pub const TRUECOLOR: u8 = 2;
    pub const BLACK_AND_WHITE: u8 = 3;
    pub const COLOR_MAPPED_RLE: u8 = 9;
    pub const TRUECOLOR_RLE: u8 = 10;
    pub const BLACK_AND_WHITE_RLE: u8 = 11;
}

bitflags! {
    /// `descriptor` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct Descriptor: u8 {
        /// Low four bits: attribute (alpha) depth.
        const ATTRIBUTE_BITS = 0x0f;
        /// Scanlines run right-to-left.
        const INVERT_X = 0x10;
        /// Scanlines run top-to-bottom.
        const INVERT_Y = 0x20;
        // Interleaved layouts are deprecated and rejected.
        const INTERLEAVED_2WAY = 0x40;
        const INTERLEAVED_4WAY = 0x80;
    }
}

bitflags! {
    /// What a payload needs on its way into the canonical layout.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub(crate) struct ConvFlags: u32 {
        /// Conversion requires expanded pixel size (24bpp source).
        const EXPAND = 0x1;
        /// Scanlines are right-to-left.
        const INVERT_X = 0x2;
        /// Scanlines are top-to-bottom.
        const INVERT_Y = 0x4;
        /// Source data is RLE compressed.
        const RLE = 0x8;
        /// Source data is paletted.
        const PALETTED = 0x10;
        /// Swizzle BGR<->RGB data on the way out.
        const SWIZZLE = 0x10000;
        /// 24bpp output format.
        const P888 = 0x20000;
    }
}

/// The raw header fields.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TgaHeader {
    pub id_length: u8,
    pub color_map_type: u8,
    pub image_type: u8,
    pub color_map_first: u16,
    pub color_map_length: u16,
    pub color_map_size: u8,
    pub x_origin: u16,
    pub y_origin: u16,
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub descriptor: u8,
}

impl TgaHeader {
    pub fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < TGA_HEADER_LEN {
            return None;
        }
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        Some(Self {
            id_length: bytes[0],
            color_map_type: bytes[1],
            image_type: bytes[2],
            color_map_first: u16_at(3),
            color_map_length: u16_at(5),
            color_map_size: bytes[7],
            x_origin: u16_at(8),
            y_origin: u16_at(10),
            width: u16_at(12),
            height: u16_at(14),
            bits_per_pixel: bytes[16],
            descriptor: bytes[17],
        })
    }

    pub fn write(&self, out: &mut [u8]) {
        out[..TGA_HEADER_LEN].fill(0);
        out[0] = self.id_length;
        out[1] = self.color_map_type;
        out[2] = self.image_type;
        out[3..5].copy_from_slice(&self.color_map_first.to_le_bytes());
        out[5..7].copy_from_slice(&self.color_map_length.to_le_bytes());
        out[7] = self.color_map_size;
        out[8..10].copy_from_slice(&self.x_origin.to_le_bytes());
        out[10..12].copy_from_slice(&self.y_origin.to_le_bytes());
        out[12..14].copy_from_slice(&self.width.to_le_bytes());
        out[14..16].copy_from_slice(&self.height.to_le_bytes());
        out[16] = self.bits_per_pixel;
        out[17] = self.descriptor;
    }
}

/// The result of decoding a TGA header.
#[derive(Debug, Clone)]
pub(crate) struct DecodedTgaHeader {
    pub metadata: TexMetadata,
    pub conv_flags: ConvFlags,
    /// Offset of the palette (if any) or pixel stream.
    pub offset: usize,
}

/// Decodes the fixed header, picking the canonical output format from the
/// image type and bit depth.
pub(crate) fn decode_tga_header(
    source: &[u8],
    flags: TgaFlags,
) -> TgaResult<DecodedTgaHeader> {
    if source.len() < TGA_HEADER_LEN {
        return Err(TgaError::InputTooShort {
            required: TGA_HEADER_LEN,
            actual: source.len(),
        });
    }

    let header = TgaHeader::read(source).ok_or(TgaError::InputTooShort {
        required: TGA_HEADER_LEN,
        actual: source.len(),
    })?;

    let descriptor = Descriptor::from_bits_retain(header.descriptor);
    if descriptor.intersects(Descriptor::INTERLEAVED_2WAY | Descriptor::INTERLEAVED_4WAY) {
        return Err(TgaError::UnsupportedConfiguration("interleaved image"));
    }

    if header.width == 0 || header.height == 0 {
        return Err(TgaError::MalformedHeader("zero extent"));
    }

    let mut metadata = TexMetadata::texture_2d(Format::UNDEFINED, header.width as usize, header.height as usize);
    let mut conv_flags = ConvFlags::empty();

    match header.image_type {
        image_type::NO_IMAGE | image_type::COLOR_MAPPED_RLE => {
            return Err(TgaError::UnsupportedConfiguration("image type not readable"));
        }

        image_type::COLOR_MAPPED => {
            if header.color_map_type != 1 || header.color_map_length == 0 || header.bits_per_pixel != 8 {
                return Err(TgaError::MalformedHeader("inconsistent colormap fields"));
            }

            match header.color_map_size {
                24 => {
                    if flags.contains(TgaFlags::BGR) {
                        metadata.format = Format::B8G8R8_UNORM;
                    } else {
                        metadata.format = Format::R8G8B8A8_UNORM;
                        metadata.set_alpha_mode(AlphaMode::Opaque);
                    }
                }
                // 15, 16, and 32-bit palettes are not supported.
                _ => return Err(TgaError::UnsupportedConfiguration("colormap entry size")),
            }

            conv_flags |= ConvFlags::PALETTED;
        }

        image_type::TRUECOLOR | image_type::TRUECOLOR_RLE => {
            if header.color_map_type != 0 || header.color_map_length != 0 {
                return Err(TgaError::MalformedHeader("truecolor image with a colormap"));
            }

            match header.bits_per_pixel {
                16 => metadata.format = Format::B5G5R5A1_UNORM_PACK16,
                24 => {
                    if flags.contains(TgaFlags::BGR) {
                        metadata.format = Format::B8G8R8_UNORM;
                    } else {
                        metadata.format = Format::R8G8B8A8_UNORM;
                        metadata.set_alpha_mode(AlphaMode::Opaque);
                    }
                    conv_flags |= ConvFlags::EXPAND;
                }
                32 => {
                    metadata.format = if flags.contains(TgaFlags::BGR) {
                        Format::B8G8R8A8_UNORM
                    } else {
                        Format::R8G8B8A8_UNORM
                    };
                }
                _ => return Err(TgaError::UnsupportedConfiguration("truecolor bit depth")),
            }

            if header.image_type == image_type::TRUECOLOR_RLE {
                conv_flags |= ConvFlags::RLE;
            }
        }

        image_type::BLACK_AND_WHITE | image_type::BLACK_AND_WHITE_RLE => {
            if header.color_map_type != 0 || header.color_map_length != 0 {
                return Err(TgaError::MalformedHeader("grayscale image with a colormap"));
            }

            match header.bits_per_pixel {
                8 => metadata.format = Format::R8_UNORM,
                _ => return Err(TgaError::UnsupportedConfiguration("grayscale bit depth")),
            }

            if header.image_type == image_type::BLACK_AND_WHITE_RLE {
                conv_flags |= ConvFlags::RLE;
            }
        }

        _ => return Err(TgaError::UnsupportedConfiguration("unknown image type")),
    }

    let size_bytes = header.width as u64 * header.height as u64 * header.bits_per_pixel as u64 / 8;
    if size_bytes > u32::MAX as u64 {
        return Err(TgaError::ExtentTooLarge(size_bytes as usize));
    }

    if descriptor.contains(Descriptor::INVERT_X) {
        conv_flags |= ConvFlags::INVERT_X;
    }
    if descriptor.contains(Descriptor::INVERT_Y) {
        conv_flags |= ConvFlags::INVERT_Y;
    }

    let mut offset = TGA_HEADER_LEN;
    if header.id_length != 0 {
        offset += header.id_length as usize;
    }

    Ok(DecodedTgaHeader {
        metadata,
        conv_flags,
        offset,
    })
}

/// Picks the header fields (and output conversion) for an image being
/// written. Storage is always top-down.
pub(crate) fn encode_tga_header(image: &ImageView<'_>) -> TgaResult<(TgaHeader, ConvFlags)> {
    if image.width > u16::MAX as usize {
        return Err(TgaError::ExtentTooLarge(image.width));
    }
    if image.height > u16::MAX as usize {
        return Err(TgaError::ExtentTooLarge(image.height));
    }

    let mut header = TgaHeader {
        width: image.width as u16,
        height: image.height as u16,
        ..TgaHeader::default()
    };
    let mut conv_flags = ConvFlags::empty();

    match image.format {
        Format::R8G8B8A8_UNORM | Format::R8G8B8A8_SRGB => {
            header.image_type = image_type::TRUECOLOR;
            header.bits_per_pixel = 32;
            header.descriptor = Descriptor::INVERT_Y.bits() | 8;
            conv_flags |= ConvFlags::SWIZZLE;
        }

        Format::B8G8R8A8_UNORM | Format::B8G8R8A8_SRGB => {
            header.image_type = image_type::TRUECOLOR;
            header.bits_per_pixel = 32;
            header.descriptor = Descriptor::INVERT_Y.bits() | 8;
        }

        Format::B8G8R8_UNORM | Format::B8G8R8_SRGB => {
            header.image_type = image_type::TRUECOLOR;
            header.bits_per_pixel = 24;
            header.descriptor = Descriptor::INVERT_Y.bits();
            conv_flags |= ConvFlags::P888;
        }

        Format::R8_UNORM | Format::A8_UNORM_KHR => {
            header.image_type = image_type::BLACK_AND_WHITE;
            header.bits_per_pixel = 8;
            header.descriptor = Descriptor::INVERT_Y.bits();
        }

        Format::B5G5R5A1_UNORM_PACK16 => {
            header.image_type = image_type::TRUECOLOR;
            header.bits_per_pixel = 16;
            header.descriptor = Descriptor::INVERT_Y.bits() | 1;
        }

        _ => return Err(TgaError::UnsupportedConfiguration("format has no TGA encoding")),
    }

    Ok((header, conv_flags))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn raw_header(image_type: u8, bpp: u8, descriptor: u8) -> [u8; 18] {
        let mut h = [0u8; 18];
        h[2] = image_type;
        h[12..14].copy_from_slice(&4u16.to_le_bytes());
        h[14..16].copy_from_slice(&2u16.to_le_bytes());
        h[16] = bpp;
        h[17] = descriptor;
        h
    }

    #[rstest]
    #[case(image_type::TRUECOLOR, 16, Format::B5G5R5A1_UNORM_PACK16)]
    #[case(image_type::TRUECOLOR, 24, Format::R8G8B8A8_UNORM)]
    #[case(image_type::TRUECOLOR, 32, Format::R8G8B8A8_UNORM)]
    #[case(image_type::BLACK_AND_WHITE, 8, Format::R8_UNORM)]
    fn formats_follow_type_and_depth(#[case] ty: u8, #[case] bpp: u8, #[case] expected: Format) {
        let decoded = decode_tga_header(&raw_header(ty, bpp, 0), TgaFlags::empty()).unwrap();
        assert_eq!(decoded.metadata.format, expected);
        assert_eq!(decoded.metadata.width, 4);
        assert_eq!(decoded.metadata.height, 2);
    }

    #[test]
    fn bgr_option_keeps_blue_first_layouts() {
        let decoded =
            decode_tga_header(&raw_header(image_type::TRUECOLOR, 32, 0), TgaFlags::BGR).unwrap();
        assert_eq!(decoded.metadata.format, Format::B8G8R8A8_UNORM);

        let decoded =
            decode_tga_header(&raw_header(image_type::TRUECOLOR, 24, 0), TgaFlags::BGR).unwrap();
        assert_eq!(decoded.metadata.format, Format::B8G8R8_UNORM);
    }

    #[test]
    fn inversion_bits_become_conv_flags() {
        let decoded =
            decode_tga_header(&raw_header(image_type::TRUECOLOR, 32, 0x30), TgaFlags::empty())
                .unwrap();
        assert!(decoded.conv_flags.contains(ConvFlags::INVERT_X | ConvFlags::INVERT_Y));
    }

    #[rstest]
    #[case(image_type::NO_IMAGE, 32)]
    #[case(image_type::COLOR_MAPPED_RLE, 8)]
    #[case(image_type::TRUECOLOR, 8)]
    #[case(image_type::BLACK_AND_WHITE, 16)]
    fn unreadable_layouts_are_rejected(#[case] ty: u8, #[case] bpp: u8) {
        assert!(decode_tga_header(&raw_header(ty, bpp, 0), TgaFlags::empty()).is_err());
    }

    #[test]
    fn interleaved_and_empty_images_are_rejected() {
        assert!(decode_tga_header(&raw_header(image_type::TRUECOLOR, 32, 0x40), TgaFlags::empty()).is_err());

        let mut zero = raw_header(image_type::TRUECOLOR, 32, 0);
        zero[12..14].fill(0);
        assert!(decode_tga_header(&zero, TgaFlags::empty()).is_err());
    }

    #[test]
    fn id_field_moves_the_payload() {
        let mut h = raw_header(image_type::TRUECOLOR, 32, 0);
        h[0] = 7;
        let decoded = decode_tga_header(&h, TgaFlags::empty()).unwrap();
        assert_eq!(decoded.offset, 25);
    }

    #[test]
    fn writer_prescribes_swizzle_for_rgba() {
        let pixels = [0u8; 16];
        let view = ImageView {
            width: 2,
            height: 2,
            format: Format::R8G8B8A8_UNORM,
            row_pitch: 8,
            slice_pitch: 16,
            pixels: &pixels,
        };
        let (header, conv) = encode_tga_header(&view).unwrap();
        assert_eq!(header.bits_per_pixel, 32);
        assert_eq!(header.descriptor, 0x20 | 8);
        assert!(conv.contains(ConvFlags::SWIZZLE));

        let view = ImageView {
            format: Format::B5G5R5A1_UNORM_PACK16,
            row_pitch: 4,
            slice_pitch: 8,
            ..view
        };
        let (header, conv) = encode_tga_header(&view).unwrap();
        assert_eq!(header.bits_per_pixel, 16);
        assert_eq!(header.descriptor, 0x20 | 1);
        assert!(conv.is_empty());
    }
}
