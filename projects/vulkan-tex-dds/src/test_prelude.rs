//! Shared helpers for the codec tests: synthesize valid DDS buffers.

use crate::constants::DdsPixelFormat;
use crate::flags::DdsFlags;
use crate::header::encode_dds_header;
use vulkan_tex_format::{CpFlags, Format};
use vulkan_tex_image::{determine_image_array, TexDimension, TexMetadata};

/// A legacy BC1 file with a zeroed payload of the correct size.
pub fn create_valid_bc1_dds_with_dimensions(width: usize, height: usize, mips: usize) -> Vec<u8> {
    let metadata = TexMetadata {
        width,
        height,
        depth: 1,
        array_size: 1,
        mip_levels: mips,
        format: Format::BC1_RGB_UNORM_BLOCK,
        dimension: TexDimension::Texture2D,
        ..TexMetadata::default()
    };

    let mut file = vec![0u8; 128];
    encode_dds_header(&metadata, DdsFlags::empty(), Some(&mut file)).unwrap();

    let (_, payload) = determine_image_array(&metadata, CpFlags::empty()).unwrap();
    file.resize(128 + payload, 0);
    file
}

/// A legacy single-mip 2D file for an arbitrary pixel-format descriptor,
/// with the given payload appended verbatim.
pub fn create_legacy_dds(ddpf: &DdsPixelFormat, width: usize, height: usize, payload: &[u8]) -> Vec<u8> {
    let mut file = vec![0u8; 128];

    file[0..4].copy_from_slice(&crate::constants::DDS_MAGIC.to_le_bytes());
    file[4..8].copy_from_slice(&124u32.to_le_bytes());
    file[8..12].copy_from_slice(&0x1007u32.to_le_bytes()); // CAPS|HEIGHT|WIDTH|PIXELFORMAT
    file[12..16].copy_from_slice(&(height as u32).to_le_bytes());
    file[16..20].copy_from_slice(&(width as u32).to_le_bytes());
    ddpf.write(&mut file[76..108]);
    file[108..112].copy_from_slice(&0x1000u32.to_le_bytes()); // DDSCAPS_TEXTURE

    file.extend_from_slice(payload);
    file
}
