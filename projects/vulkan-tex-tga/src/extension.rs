//! TGA 2.0 footer and extension area.

use crate::clock::TgaClock;
use crate::flags::TgaFlags;
use vulkan_tex_format::{has_alpha, is_srgb, make_srgb, Format};
use vulkan_tex_image::{AlphaMode, TexMetadata};

/// Byte length of the 2.0 footer.
pub const TGA_FOOTER_LEN: usize = 26;
/// Byte length of the 2.0 extension area.
pub const TGA_EXTENSION_LEN: usize = 495;

/// The official footer signature, including the terminating NUL.
pub const TGA_SIGNATURE: &[u8; 18] = b"TRUEVISION-XFILE.\0";

/// Tolerance when matching a stored gamma against 2.2 / 2.4.
const GAMMA_EPSILON: f32 = 0.01;

/// Library identifier written into the extension's software id field.
const SOFTWARE_ID: &[u8] = b"TexBackendVK";
/// Library version written into the extension.
const SOFTWARE_VERSION: u16 = 209;

/// `attributesType` values.
mod attribute {
    /// No alpha data included.
    pub const NONE: u8 = 0;
    /// Undefined data, can be ignored.
    pub const IGNORED: u8 = 1;
    /// Undefined data, should be retained.
    pub const UNDEFINED: u8 = 2;
    /// Useful alpha channel data.
    pub const ALPHA: u8 = 3;
    /// Pre-multiplied alpha.
    pub const PREMULTIPLIED: u8 = 4;
}

/// The 2.0 footer at the very end of the file.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TgaFooter {
    pub extension_offset: u32,
    pub developer_offset: u32,
}

impl TgaFooter {
    /// Reads a footer, returning `None` when the signature is absent.
    pub fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < TGA_FOOTER_LEN {
            return None;
        }
        let footer = &bytes[bytes.len() - TGA_FOOTER_LEN..];
        if &footer[8..26] != TGA_SIGNATURE {
            return None;
        }
        Some(Self {
            extension_offset: u32::from_le_bytes([footer[0], footer[1], footer[2], footer[3]]),
            developer_offset: u32::from_le_bytes([footer[4], footer[5], footer[6], footer[7]]),
        })
    }

    pub fn write(&self, out: &mut [u8]) {
        out[0..4].copy_from_slice(&self.extension_offset.to_le_bytes());
        out[4..8].copy_from_slice(&self.developer_offset.to_le_bytes());
        out[8..26].copy_from_slice(TGA_SIGNATURE);
    }
}

/// The fields of the 495-byte extension area this library consumes and
/// produces. Unreferenced fields (author, comments, job time, …) stay zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TgaExtension {
    pub size: u16,
    pub stamp_month: u16,
    pub stamp_day: u16,
    pub stamp_year: u16,
    pub stamp_hour: u16,
    pub stamp_minute: u16,
    pub stamp_second: u16,
    pub version_number: u16,
    pub version_letter: u8,
    pub gamma_numerator: u16,
    pub gamma_denominator: u16,
    pub attributes_type: u8,
}

// Byte offsets within the extension area.
const OFF_STAMP: usize = 2 + 41 + 324;
const OFF_SOFTWARE_ID: usize = OFF_STAMP + 12 + 41 + 6;
const OFF_VERSION: usize = OFF_SOFTWARE_ID + 41;
const OFF_GAMMA: usize = OFF_VERSION + 3 + 4 + 4;
const OFF_ATTRIBUTES: usize = TGA_EXTENSION_LEN - 1;

impl TgaExtension {
    /// Reads the fields of interest; `None` if the area is truncated.
    pub(crate) fn read(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < TGA_EXTENSION_LEN {
            return None;
        }
        let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
        Some(Self {
            size: u16_at(0),
            stamp_month: u16_at(OFF_STAMP),
            stamp_day: u16_at(OFF_STAMP + 2),
            stamp_year: u16_at(OFF_STAMP + 4),
            stamp_hour: u16_at(OFF_STAMP + 6),
            stamp_minute: u16_at(OFF_STAMP + 8),
            stamp_second: u16_at(OFF_STAMP + 10),
            version_number: u16_at(OFF_VERSION),
            version_letter: bytes[OFF_VERSION + 2],
            gamma_numerator: u16_at(OFF_GAMMA),
            gamma_denominator: u16_at(OFF_GAMMA + 2),
            attributes_type: bytes[OFF_ATTRIBUTES],
        })
    }

    /// Serializes into a zeroed 495-byte area, filling the software id.
    pub(crate) fn write(&self, out: &mut [u8]) {
        let area = &mut out[..TGA_EXTENSION_LEN];
        area.fill(0);

        area[0..2].copy_from_slice(&self.size.to_le_bytes());
        area[OFF_STAMP..OFF_STAMP + 2].copy_from_slice(&self.stamp_month.to_le_bytes());
        area[OFF_STAMP + 2..OFF_STAMP + 4].copy_from_slice(&self.stamp_day.to_le_bytes());
        area[OFF_STAMP + 4..OFF_STAMP + 6].copy_from_slice(&self.stamp_year.to_le_bytes());
        area[OFF_STAMP + 6..OFF_STAMP + 8].copy_from_slice(&self.stamp_hour.to_le_bytes());
        area[OFF_STAMP + 8..OFF_STAMP + 10].copy_from_slice(&self.stamp_minute.to_le_bytes());
        area[OFF_STAMP + 10..OFF_STAMP + 12].copy_from_slice(&self.stamp_second.to_le_bytes());
        area[OFF_SOFTWARE_ID..OFF_SOFTWARE_ID + SOFTWARE_ID.len()].copy_from_slice(SOFTWARE_ID);
        area[OFF_VERSION..OFF_VERSION + 2].copy_from_slice(&self.version_number.to_le_bytes());
        area[OFF_VERSION + 2] = self.version_letter;
        area[OFF_GAMMA..OFF_GAMMA + 2].copy_from_slice(&self.gamma_numerator.to_le_bytes());
        area[OFF_GAMMA + 2..OFF_GAMMA + 4].copy_from_slice(&self.gamma_denominator.to_le_bytes());
        area[OFF_ATTRIBUTES] = self.attributes_type;
    }

    /// Builds the extension a writer emits for `metadata`.
    pub(crate) fn for_save(
        flags: TgaFlags,
        metadata: &TexMetadata,
        clock: &dyn TgaClock,
    ) -> Self {
        let mut ext = Self {
            size: TGA_EXTENSION_LEN as u16,
            version_number: SOFTWARE_VERSION,
            version_letter: b' ',
            ..Self::default()
        };

        let srgb = !flags.contains(TgaFlags::FORCE_LINEAR)
            && (flags.contains(TgaFlags::FORCE_SRGB) || is_srgb(metadata.format));
        if srgb {
            ext.gamma_numerator = 22;
            ext.gamma_denominator = 10;
        } else if flags.contains(TgaFlags::FORCE_LINEAR) {
            ext.gamma_numerator = 1;
            ext.gamma_denominator = 1;
        }

        ext.attributes_type = match metadata.alpha_mode() {
            AlphaMode::Unknown => {
                if has_alpha(metadata.format) {
                    attribute::UNDEFINED
                } else {
                    attribute::NONE
                }
            }
            AlphaMode::Straight => attribute::ALPHA,
            AlphaMode::Premultiplied => attribute::PREMULTIPLIED,
            AlphaMode::Opaque => attribute::IGNORED,
            AlphaMode::Custom => attribute::UNDEFINED,
        };

        let stamp = clock.utc_now();
        ext.stamp_month = stamp.month;
        ext.stamp_day = stamp.day;
        ext.stamp_year = stamp.year;
        ext.stamp_hour = stamp.hour;
        ext.stamp_minute = stamp.minute;
        ext.stamp_second = stamp.second;

        ext
    }

    /// The alpha interpretation the attributes field declares.
    pub(crate) fn alpha_mode(&self) -> AlphaMode {
        if self.size != TGA_EXTENSION_LEN as u16 {
            return AlphaMode::Unknown;
        }
        match self.attributes_type {
            attribute::IGNORED => AlphaMode::Opaque,
            attribute::UNDEFINED => AlphaMode::Custom,
            attribute::ALPHA => AlphaMode::Straight,
            attribute::PREMULTIPLIED => AlphaMode::Premultiplied,
            _ => AlphaMode::Unknown,
        }
    }
}

/// Applies sRGB promotion from the extension's gamma, or the caller's
/// default when the file carries no colorspace.
pub(crate) fn srgb_format_from_extension(
    ext: Option<&TgaExtension>,
    format: Format,
    flags: TgaFlags,
) -> Format {
    let srgb = match ext {
        Some(ext) if ext.size == TGA_EXTENSION_LEN as u16 && ext.gamma_denominator != 0 => {
            let gamma = ext.gamma_numerator as f32 / ext.gamma_denominator as f32;
            (gamma - 2.2).abs() < GAMMA_EPSILON || (gamma - 2.4).abs() < GAMMA_EPSILON
        }
        _ => flags.contains(TgaFlags::DEFAULT_SRGB),
    };

    if srgb {
        make_srgb(format)
    } else {
        format
    }
}
