//! Texture metadata and subresource indexing.

use bitflags::bitflags;
use vulkan_tex_format::Format;

/// Resource dimensionality.
///
/// The discriminants match the DDS DX10 `resourceDimension` field so header
/// encode/decode is a cast, not a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TexDimension {
    Texture1D = 2,
    Texture2D = 3,
    Texture3D = 4,
}

impl TexDimension {
    /// Maps a DX10 `resourceDimension` value.
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            2 => Some(Self::Texture1D),
            3 => Some(Self::Texture2D),
            4 => Some(Self::Texture3D),
            _ => None,
        }
    }
}

/// How alpha samples should be interpreted.
///
/// Stored in the low 3 bits of `misc_flags2` so it round-trips through the
/// DX10 header's `miscFlags2` field unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u32)]
pub enum AlphaMode {
    #[default]
    Unknown = 0,
    Straight = 1,
    Premultiplied = 2,
    Opaque = 3,
    Custom = 4,
}

impl AlphaMode {
    pub fn from_u32(value: u32) -> Self {
        match value & TexMetadata::ALPHA_MODE_MASK {
            1 => Self::Straight,
            2 => Self::Premultiplied,
            3 => Self::Opaque,
            4 => Self::Custom,
            _ => Self::Unknown,
        }
    }
}

bitflags! {
    /// Resource option flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TexMiscFlags: u32 {
        /// 2D array texture whose items are cube faces, six per cube.
        const TEXTURECUBE = 0x4;
    }
}

/// The canonical identity of a texture, invariant across load and save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexMetadata {
    pub width: usize,
    /// Should be 1 for 1D textures.
    pub height: usize,
    /// Should be 1 for 1D or 2D textures.
    pub depth: usize,
    /// For cubemaps, a multiple of 6.
    pub array_size: usize,
    pub mip_levels: usize,
    pub misc_flags: TexMiscFlags,
    /// Alpha mode in the low 3 bits; other bits reserved.
    pub misc_flags2: u32,
    pub format: Format,
    pub dimension: TexDimension,
}

impl Default for TexMetadata {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            depth: 0,
            array_size: 0,
            mip_levels: 0,
            misc_flags: TexMiscFlags::empty(),
            misc_flags2: 0,
            format: Format::UNDEFINED,
            dimension: TexDimension::Texture2D,
        }
    }
}

impl TexMetadata {
    pub const ALPHA_MODE_MASK: u32 = 0x7;

    /// A single-subresource 2D description, the shape most codec entry
    /// points synthesize for one image.
    pub fn texture_2d(format: Format, width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            depth: 1,
            array_size: 1,
            mip_levels: 1,
            format,
            dimension: TexDimension::Texture2D,
            ..Self::default()
        }
    }

    #[inline]
    pub fn is_cubemap(&self) -> bool {
        self.misc_flags.contains(TexMiscFlags::TEXTURECUBE)
    }

    #[inline]
    pub fn is_volumemap(&self) -> bool {
        self.dimension == TexDimension::Texture3D
    }

    #[inline]
    pub fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::from_u32(self.misc_flags2)
    }

    pub fn set_alpha_mode(&mut self, mode: AlphaMode) {
        self.misc_flags2 = (self.misc_flags2 & !Self::ALPHA_MODE_MASK) | mode as u32;
    }

    #[inline]
    pub fn is_pm_alpha(&self) -> bool {
        self.alpha_mode() == AlphaMode::Premultiplied
    }

    /// Position of `(mip, item, slice)` in the subresource sequence.
    ///
    /// Must agree with the traversal order of
    /// [`setup_image_array`](crate::setup_image_array): `item * mip_levels +
    /// mip` for 1D/2D, and for volumes the sum of per-level depths before
    /// `mip` plus `slice`. Out-of-range tuples return `None`.
    pub fn compute_index(&self, mip: usize, item: usize, slice: usize) -> Option<usize> {
        if mip >= self.mip_levels {
            return None;
        }

        match self.dimension {
            TexDimension::Texture1D | TexDimension::Texture2D => {
                if slice > 0 || item >= self.array_size {
                    return None;
                }
                Some(item * self.mip_levels + mip)
            }
            TexDimension::Texture3D => {
                // No support for arrays of volumes
                if item > 0 {
                    return None;
                }

                let mut index = 0;
                let mut d = self.depth;
                for _ in 0..mip {
                    index += d;
                    if d > 1 {
                        d >>= 1;
                    }
                }

                if slice >= d {
                    return None;
                }
                Some(index + slice)
            }
        }
    }

    /// Direct3D 11 style subresource number: `mip + item * mip_levels`.
    pub fn calculate_subresource(&self, mip: usize, item: usize) -> Option<u32> {
        if mip >= self.mip_levels {
            return None;
        }

        match self.dimension {
            TexDimension::Texture1D | TexDimension::Texture2D => {
                (item < self.array_size).then(|| (mip + item * self.mip_levels) as u32)
            }
            // No support for arrays of volumes
            TexDimension::Texture3D => (item == 0).then_some(mip as u32),
        }
    }

    /// Direct3D 12 style subresource number with a plane index:
    /// `mip + item * mip_levels + plane * mip_levels * array_size`.
    pub fn calculate_subresource_plane(&self, mip: usize, item: usize, plane: usize) -> Option<u32> {
        if mip >= self.mip_levels {
            return None;
        }

        match self.dimension {
            TexDimension::Texture1D | TexDimension::Texture2D => (item < self.array_size)
                .then(|| (mip + item * self.mip_levels + plane * self.mip_levels * self.array_size) as u32),
            TexDimension::Texture3D => {
                (item == 0).then(|| (mip + plane * self.mip_levels) as u32)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn array_2d() -> TexMetadata {
        TexMetadata {
            width: 16,
            height: 16,
            depth: 1,
            array_size: 3,
            mip_levels: 5,
            format: Format::R8G8B8A8_UNORM,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        }
    }

    fn volume() -> TexMetadata {
        TexMetadata {
            width: 8,
            height: 8,
            depth: 4,
            array_size: 1,
            mip_levels: 4,
            format: Format::R8G8B8A8_UNORM,
            dimension: TexDimension::Texture3D,
            ..TexMetadata::default()
        }
    }

    #[test]
    fn index_is_item_major_for_2d() {
        let m = array_2d();
        assert_eq!(m.compute_index(0, 0, 0), Some(0));
        assert_eq!(m.compute_index(4, 0, 0), Some(4));
        assert_eq!(m.compute_index(0, 1, 0), Some(5));
        assert_eq!(m.compute_index(2, 2, 0), Some(12));

        assert_eq!(m.compute_index(5, 0, 0), None);
        assert_eq!(m.compute_index(0, 3, 0), None);
        assert_eq!(m.compute_index(0, 0, 1), None);
    }

    #[test]
    fn index_accumulates_slices_for_3d() {
        let m = volume();
        // level 0: slices 0..4, level 1: 4..6, level 2: 6, level 3: 7
        assert_eq!(m.compute_index(0, 0, 3), Some(3));
        assert_eq!(m.compute_index(1, 0, 0), Some(4));
        assert_eq!(m.compute_index(1, 0, 1), Some(5));
        assert_eq!(m.compute_index(2, 0, 0), Some(6));
        assert_eq!(m.compute_index(3, 0, 0), Some(7));

        assert_eq!(m.compute_index(1, 0, 2), None); // depth halved to 2
        assert_eq!(m.compute_index(0, 1, 0), None); // no volume arrays
    }

    #[test]
    fn compute_index_is_a_bijection() {
        let m = array_2d();
        let mut seen = vec![false; m.array_size * m.mip_levels];
        for item in 0..m.array_size {
            for mip in 0..m.mip_levels {
                let index = m.compute_index(mip, item, 0).unwrap();
                assert!(!seen[index]);
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn alpha_mode_lives_in_the_low_bits() {
        let mut m = array_2d();
        m.misc_flags2 = 0xf8; // reserved bits stay put
        m.set_alpha_mode(AlphaMode::Premultiplied);
        assert_eq!(m.misc_flags2, 0xf8 | 2);
        assert!(m.is_pm_alpha());
        m.set_alpha_mode(AlphaMode::Opaque);
        assert_eq!(m.alpha_mode(), AlphaMode::Opaque);
        assert_eq!(m.misc_flags2 & 0xf8, 0xf8);
    }

    #[test]
    fn d3d12_subresource_numbers_include_planes() {
        let m = array_2d();
        assert_eq!(m.calculate_subresource_plane(1, 2, 1), Some((1 + 2 * 5 + 15) as u32));
        assert_eq!(m.calculate_subresource(1, 2), Some(11));
        assert_eq!(m.calculate_subresource(5, 0), None);
    }
}
