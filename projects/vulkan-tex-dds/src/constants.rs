//! DDS wire-format constants and the pixel-format descriptor.

use bitflags::bitflags;

/// Magic header for DDS files ('DDS ' in little-endian).
pub const DDS_MAGIC: u32 = 0x2053_4444;

/// Magic plus the 124-byte `DDS_HEADER`.
pub const DDS_MIN_HEADER_SIZE: usize = 4 + DDS_HEADER_SIZE;
/// The `DDS_HEADER` structure itself.
pub const DDS_HEADER_SIZE: usize = 124;
/// The optional `DDS_HEADER_DXT10` extension.
pub const DX10_HEADER_SIZE: usize = 20;
/// Magic plus both headers.
pub const DDS_DX10_HEADER_SIZE: usize = DDS_MIN_HEADER_SIZE + DX10_HEADER_SIZE;

/// Byte size of the on-disk `DDS_PIXELFORMAT` structure.
pub const DDS_PIXELFORMAT_SIZE: u32 = 32;

/// Known variant value some legacy writers store in the size fields.
pub const DDS_KNOWN_VARIANT_SIZE: u32 = 24;

pub const fn make_four_cc(a: u8, b: u8, c: u8, d: u8) -> u32 {
    (a as u32) | ((b as u32) << 8) | ((c as u32) << 16) | ((d as u32) << 24)
}

pub const FOURCC_DXT1: u32 = make_four_cc(b'D', b'X', b'T', b'1');
pub const FOURCC_DXT2: u32 = make_four_cc(b'D', b'X', b'T', b'2');
pub const FOURCC_DXT3: u32 = make_four_cc(b'D', b'X', b'T', b'3');
pub const FOURCC_DXT4: u32 = make_four_cc(b'D', b'X', b'T', b'4');
pub const FOURCC_DXT5: u32 = make_four_cc(b'D', b'X', b'T', b'5');
pub const FOURCC_DX10: u32 = make_four_cc(b'D', b'X', b'1', b'0');
pub const FOURCC_NVTT: u32 = make_four_cc(b'N', b'V', b'T', b'T');

bitflags! {
    /// `DDS_PIXELFORMAT.dwFlags` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct PixelFormatFlags: u32 {
        const ALPHAPIXELS = 0x1;
        const ALPHA = 0x2;
        const FOURCC = 0x4;
        const PAL8 = 0x20;
        const RGB = 0x40;
        const YUV = 0x200;
        const LUMINANCE = 0x20000;
        const BUMPLUMINANCE = 0x40000;
        const BUMPDUDV = 0x80000;
        // Non-standard bits written by nVidia's NVTT exporter.
        const NVTT_NORMAL = 0x8000_0000;
        const NVTT_SRGB = 0x4000_0000;
    }
}

impl PixelFormatFlags {
    pub const RGBA: Self = Self::RGB.union(Self::ALPHAPIXELS);
    pub const LUMINANCEA: Self = Self::LUMINANCE.union(Self::ALPHAPIXELS);
    pub const PAL8A: Self = Self::PAL8.union(Self::ALPHAPIXELS);
    pub const BUMPDUDVA: Self = Self::BUMPDUDV.union(Self::ALPHAPIXELS);
}

bitflags! {
    /// `DDS_HEADER.dwFlags` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct HeaderFlags: u32 {
        const CAPS = 0x1;
        const HEIGHT = 0x2;
        const WIDTH = 0x4;
        const PITCH = 0x8;
        const PIXELFORMAT = 0x1000;
        const MIPMAP = 0x20000;
        const LINEARSIZE = 0x80000;
        const VOLUME = 0x800000;
    }
}

impl HeaderFlags {
    /// The baseline every writer emits: CAPS | HEIGHT | WIDTH | PIXELFORMAT.
    pub const TEXTURE: Self = Self::CAPS
        .union(Self::HEIGHT)
        .union(Self::WIDTH)
        .union(Self::PIXELFORMAT);
}

bitflags! {
    /// `DDS_HEADER.dwCaps` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Caps: u32 {
        const COMPLEX = 0x8;
        const TEXTURE = 0x1000;
        const MIPMAP = 0x400000;
    }
}

impl Caps {
    pub const SURFACE_TEXTURE: Self = Self::TEXTURE;
    pub const SURFACE_MIPMAP: Self = Self::COMPLEX.union(Self::MIPMAP);
    pub const SURFACE_CUBEMAP: Self = Self::COMPLEX;
}

bitflags! {
    /// `DDS_HEADER.dwCaps2` bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Caps2: u32 {
        const CUBEMAP = 0x200;
        const CUBEMAP_POSITIVEX = 0x400;
        const CUBEMAP_NEGATIVEX = 0x800;
        const CUBEMAP_POSITIVEY = 0x1000;
        const CUBEMAP_NEGATIVEY = 0x2000;
        const CUBEMAP_POSITIVEZ = 0x4000;
        const CUBEMAP_NEGATIVEZ = 0x8000;
        const VOLUME = 0x200000;
    }
}

impl Caps2 {
    /// Cubemap bit plus all six face bits; the reader requires every face.
    pub const CUBEMAP_ALLFACES: Self = Self::CUBEMAP
        .union(Self::CUBEMAP_POSITIVEX)
        .union(Self::CUBEMAP_NEGATIVEX)
        .union(Self::CUBEMAP_POSITIVEY)
        .union(Self::CUBEMAP_NEGATIVEY)
        .union(Self::CUBEMAP_POSITIVEZ)
        .union(Self::CUBEMAP_NEGATIVEZ);
}

/// `DDS_HEADER_DXT10.miscFlag` cube bit (matches the texture misc flag).
pub const DDS_RESOURCE_MISC_TEXTURECUBE: u32 = 0x4;

/// The 32-byte `DDS_PIXELFORMAT` descriptor.
///
/// Mask-field meanings shift with the flag bits (RGB masks, luminance mask,
/// bump du/dv masks, …); the legacy mapping table interprets them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DdsPixelFormat {
    pub size: u32,
    pub flags: u32,
    pub four_cc: u32,
    pub rgb_bit_count: u32,
    pub r_bit_mask: u32,
    pub g_bit_mask: u32,
    pub b_bit_mask: u32,
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// A fourCC-only descriptor.
    pub const fn from_four_cc(code: u32) -> Self {
        Self {
            size: DDS_PIXELFORMAT_SIZE,
            flags: PixelFormatFlags::FOURCC.bits(),
            four_cc: code,
            rgb_bit_count: 0,
            r_bit_mask: 0,
            g_bit_mask: 0,
            b_bit_mask: 0,
            a_bit_mask: 0,
        }
    }

    /// A mask-style descriptor.
    pub const fn masks(flags: PixelFormatFlags, bit_count: u32, r: u32, g: u32, b: u32, a: u32) -> Self {
        Self {
            size: DDS_PIXELFORMAT_SIZE,
            flags: flags.bits(),
            four_cc: 0,
            rgb_bit_count: bit_count,
            r_bit_mask: r,
            g_bit_mask: g,
            b_bit_mask: b,
            a_bit_mask: a,
        }
    }

    pub fn is_dx10(&self) -> bool {
        self.four_cc == FOURCC_DX10
    }

    pub(crate) fn read(bytes: &[u8; 32]) -> Self {
        let word = |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);
        Self {
            size: word(0),
            flags: word(4),
            four_cc: word(8),
            rgb_bit_count: word(12),
            r_bit_mask: word(16),
            g_bit_mask: word(20),
            b_bit_mask: word(24),
            a_bit_mask: word(28),
        }
    }

    pub(crate) fn write(&self, out: &mut [u8]) {
        for (i, word) in [
            self.size,
            self.flags,
            self.four_cc,
            self.rgb_bit_count,
            self.r_bit_mask,
            self.g_bit_mask,
            self.b_bit_mask,
            self.a_bit_mask,
        ]
        .into_iter()
        .enumerate()
        {
            out[i * 4..i * 4 + 4].copy_from_slice(&word.to_le_bytes());
        }
    }
}

// Pixel-format descriptor templates, per the DirectDraw documentation and
// the behavior of common writers.
pub(crate) mod ddspf {
    use super::{make_four_cc, DdsPixelFormat, PixelFormatFlags as PF};

    pub const DXT1: DdsPixelFormat = DdsPixelFormat::from_four_cc(super::FOURCC_DXT1);
    pub const DXT2: DdsPixelFormat = DdsPixelFormat::from_four_cc(super::FOURCC_DXT2);
    pub const DXT3: DdsPixelFormat = DdsPixelFormat::from_four_cc(super::FOURCC_DXT3);
    pub const DXT4: DdsPixelFormat = DdsPixelFormat::from_four_cc(super::FOURCC_DXT4);
    pub const DXT5: DdsPixelFormat = DdsPixelFormat::from_four_cc(super::FOURCC_DXT5);
    pub const DX10: DdsPixelFormat = DdsPixelFormat::from_four_cc(super::FOURCC_DX10);

    pub const BC4_UNORM: DdsPixelFormat = DdsPixelFormat::from_four_cc(make_four_cc(b'B', b'C', b'4', b'U'));
    pub const BC4_SNORM: DdsPixelFormat = DdsPixelFormat::from_four_cc(make_four_cc(b'B', b'C', b'4', b'S'));
    pub const BC5_UNORM: DdsPixelFormat = DdsPixelFormat::from_four_cc(make_four_cc(b'B', b'C', b'5', b'U'));
    pub const BC5_SNORM: DdsPixelFormat = DdsPixelFormat::from_four_cc(make_four_cc(b'B', b'C', b'5', b'S'));

    pub const R8G8_B8G8: DdsPixelFormat = DdsPixelFormat::from_four_cc(make_four_cc(b'R', b'G', b'B', b'G'));
    pub const G8R8_G8B8: DdsPixelFormat = DdsPixelFormat::from_four_cc(make_four_cc(b'G', b'R', b'G', b'B'));
    pub const YUY2: DdsPixelFormat = DdsPixelFormat::from_four_cc(make_four_cc(b'Y', b'U', b'Y', b'2'));
    pub const UYVY: DdsPixelFormat = DdsPixelFormat::from_four_cc(make_four_cc(b'U', b'Y', b'V', b'Y'));

    pub const A8R8G8B8: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGBA, 32, 0x00ff0000, 0x0000ff00, 0x000000ff, 0xff000000);
    pub const X8R8G8B8: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGB, 32, 0x00ff0000, 0x0000ff00, 0x000000ff, 0);
    pub const A8B8G8R8: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGBA, 32, 0x000000ff, 0x0000ff00, 0x00ff0000, 0xff000000);
    pub const X8B8G8R8: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGB, 32, 0x000000ff, 0x0000ff00, 0x00ff0000, 0);
    pub const G16R16: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGB, 32, 0x0000ffff, 0xffff0000, 0, 0);

    pub const R5G6B5: DdsPixelFormat = DdsPixelFormat::masks(PF::RGB, 16, 0xf800, 0x07e0, 0x001f, 0);
    pub const A1R5G5B5: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGBA, 16, 0x7c00, 0x03e0, 0x001f, 0x8000);
    pub const X1R5G5B5: DdsPixelFormat = DdsPixelFormat::masks(PF::RGB, 16, 0x7c00, 0x03e0, 0x001f, 0);
    pub const A4R4G4B4: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGBA, 16, 0x0f00, 0x00f0, 0x000f, 0xf000);
    pub const X4R4G4B4: DdsPixelFormat = DdsPixelFormat::masks(PF::RGB, 16, 0x0f00, 0x00f0, 0x000f, 0);

    pub const R8G8B8: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGB, 24, 0x00ff0000, 0x0000ff00, 0x000000ff, 0);
    pub const A8R3G3B2: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGBA, 16, 0x00e0, 0x001c, 0x0003, 0xff00);
    pub const R3G3B2: DdsPixelFormat = DdsPixelFormat::masks(PF::RGB, 8, 0xe0, 0x1c, 0x03, 0);

    pub const L8: DdsPixelFormat = DdsPixelFormat::masks(PF::LUMINANCE, 8, 0xff, 0, 0, 0);
    pub const L16: DdsPixelFormat = DdsPixelFormat::masks(PF::LUMINANCE, 16, 0xffff, 0, 0, 0);
    pub const A8L8: DdsPixelFormat = DdsPixelFormat::masks(PF::LUMINANCEA, 16, 0x00ff, 0, 0, 0xff00);
    pub const A8L8_ALT: DdsPixelFormat = DdsPixelFormat::masks(PF::LUMINANCEA, 8, 0x00ff, 0, 0, 0xff00);
    pub const A4L4: DdsPixelFormat = DdsPixelFormat::masks(PF::LUMINANCEA, 8, 0x0f, 0, 0, 0xf0);

    // NVTT v1 wrote luminance data with RGB flags.
    pub const L8_NVTT1: DdsPixelFormat = DdsPixelFormat::masks(PF::RGB, 8, 0xff, 0, 0, 0);
    pub const L16_NVTT1: DdsPixelFormat = DdsPixelFormat::masks(PF::RGB, 16, 0xffff, 0, 0, 0);
    pub const A8L8_NVTT1: DdsPixelFormat = DdsPixelFormat::masks(PF::RGBA, 16, 0x00ff, 0, 0, 0xff00);

    pub const A8: DdsPixelFormat = DdsPixelFormat::masks(PF::ALPHA, 8, 0, 0, 0, 0xff);

    pub const V8U8: DdsPixelFormat = DdsPixelFormat::masks(PF::BUMPDUDV, 16, 0x00ff, 0xff00, 0, 0);
    pub const Q8W8V8U8: DdsPixelFormat =
        DdsPixelFormat::masks(PF::BUMPDUDV, 32, 0x000000ff, 0x0000ff00, 0x00ff0000, 0xff000000);
    pub const V16U16: DdsPixelFormat =
        DdsPixelFormat::masks(PF::BUMPDUDV, 32, 0x0000ffff, 0xffff0000, 0, 0);

    // Many legacy writers (D3DX included) swap the red/blue masks for
    // 10:10:10:2 data; both spellings appear in the wild.
    pub const A2R10G10B10: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGBA, 32, 0x000003ff, 0x000ffc00, 0x3ff00000, 0xc0000000);
    pub const A2B10G10R10: DdsPixelFormat =
        DdsPixelFormat::masks(PF::RGBA, 32, 0x3ff00000, 0x000ffc00, 0x000003ff, 0xc0000000);

    pub const L6V5U5: DdsPixelFormat =
        DdsPixelFormat::masks(PF::BUMPLUMINANCE, 16, 0x001f, 0x03e0, 0xfc00, 0);
    pub const X8L8V8U8: DdsPixelFormat =
        DdsPixelFormat::masks(PF::BUMPLUMINANCE, 32, 0x000000ff, 0x0000ff00, 0x00ff0000, 0);
    pub const A2W10V10U10: DdsPixelFormat =
        DdsPixelFormat::masks(PF::BUMPDUDVA, 32, 0x3ff00000, 0x000ffc00, 0x000003ff, 0xc0000000);

    pub const P8: DdsPixelFormat = DdsPixelFormat::masks(PF::PAL8, 8, 0, 0, 0, 0);
    pub const A8P8: DdsPixelFormat = DdsPixelFormat::masks(PF::PAL8A, 16, 0, 0, 0, 0xff00);
}
