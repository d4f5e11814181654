//! DDS save pipeline.

use crate::error::{DdsError, DdsResult};
use crate::flags::DdsFlags;
use crate::header::encode_dds_header;
use vulkan_tex_format::{compute_pitch, compute_scanlines, CpFlags, Format};
use vulkan_tex_image::{Blob, ImageView, TexDimension, TexMetadata};

fn wants_24bpp(metadata: &TexMetadata, flags: DdsFlags) -> bool {
    metadata.format == Format::B8G8R8_UNORM
        && flags.contains(DdsFlags::FORCE_24BPP_RGB)
        && !flags.intersects(DdsFlags::FORCE_DX10_EXT | DdsFlags::FORCE_DX10_EXT_MISC2)
}

/// Serializes a single image as a one-subresource 2D texture.
pub fn save_to_dds_memory_single(image: ImageView<'_>, flags: DdsFlags) -> DdsResult<Blob> {
    let metadata = TexMetadata::texture_2d(image.format, image.width, image.height);
    save_to_dds_memory(&[image], &metadata, flags)
}

/// Serializes a full image array into a DDS file in memory.
///
/// `images` must be the complete subresource sequence for `metadata`, in
/// traversal order. Pixels are written back to back after the header; rows
/// are repacked when the in-memory pitch differs from the file pitch.
pub fn save_to_dds_memory(
    images: &[ImageView<'_>],
    metadata: &TexMetadata,
    flags: DdsFlags,
) -> DdsResult<Blob> {
    if images.is_empty() {
        return Err(DdsError::UnsupportedConfiguration("no images to save"));
    }

    // Determine memory required
    let header_size = encode_dds_header(metadata, flags, None)?;
    let mut required = header_size;

    let use_24bpp = wants_24bpp(metadata, flags);
    let pitch_flags = if use_24bpp { CpFlags::BPP24 } else { CpFlags::empty() };

    let mut fast_path = true;
    for image in images {
        if image.format != metadata.format {
            return Err(DdsError::UnsupportedConfiguration(
                "image format differs from the description",
            ));
        }

        let pitch = compute_pitch(metadata.format, image.width, image.height, pitch_flags)?;

        if image.row_pitch != pitch.row || image.slice_pitch != pitch.slice {
            fast_path = false;
        }

        required += pitch.slice;
    }

    let mut blob = Blob::initialize(required)?;

    encode_dds_header(metadata, flags, Some(blob.as_mut_slice()))?;

    let mut offset = header_size;

    let mut write_image = |image: &ImageView<'_>, blob: &mut Blob| -> DdsResult<()> {
        let out = blob.as_mut_slice();

        if fast_path {
            let end = offset + image.slice_pitch;
            if end > out.len() {
                return Err(DdsError::OutputBufferTooSmall {
                    required: end,
                    actual: out.len(),
                });
            }
            out[offset..end].copy_from_slice(&image.pixels[..image.slice_pitch]);
            offset = end;
            return Ok(());
        }

        let pitch = compute_pitch(metadata.format, image.width, image.height, pitch_flags)?;
        let end = offset + pitch.slice;
        if end > out.len() {
            return Err(DdsError::OutputBufferTooSmall {
                required: end,
                actual: out.len(),
            });
        }

        if use_24bpp {
            // Emit BGR by dropping every fourth byte of the BGRX storage.
            for y in 0..image.height {
                let src = &image.pixels[y * image.row_pitch..];
                let dst = &mut out[offset + y * pitch.row..offset + y * pitch.row + pitch.row];
                copy_24bpp_scanline(dst, src, image.width);
            }
        } else {
            let lines = compute_scanlines(metadata.format, image.height);
            let csize = image.row_pitch.min(pitch.row);
            for y in 0..lines {
                let src = &image.pixels[y * image.row_pitch..y * image.row_pitch + csize];
                out[offset + y * pitch.row..offset + y * pitch.row + csize].copy_from_slice(src);
            }
        }

        offset = end;
        Ok(())
    };

    match metadata.dimension {
        TexDimension::Texture1D | TexDimension::Texture2D => {
            let mut index = 0;
            for _item in 0..metadata.array_size {
                for _level in 0..metadata.mip_levels {
                    let image = images.get(index).ok_or(DdsError::UnsupportedConfiguration(
                        "too few images for the description",
                    ))?;
                    write_image(image, &mut blob)?;
                    index += 1;
                }
            }
        }

        TexDimension::Texture3D => {
            if metadata.array_size != 1 {
                return Err(DdsError::UnsupportedConfiguration("arrays of volumes"));
            }

            let mut index = 0;
            let mut d = metadata.depth;
            for _level in 0..metadata.mip_levels {
                for _slice in 0..d {
                    let image = images.get(index).ok_or(DdsError::UnsupportedConfiguration(
                        "too few images for the description",
                    ))?;
                    write_image(image, &mut blob)?;
                    index += 1;
                }

                if d > 1 {
                    d >>= 1;
                }
            }
        }
    }

    // Drop the allocator's alignment padding so the blob length is the
    // exact file length.
    blob.trim(required)?;

    Ok(blob)
}

/// Packs BGRX storage down to 24-bpp BGR rows.
fn copy_24bpp_scanline(dst: &mut [u8], src: &[u8], width: usize) {
    for x in 0..width {
        let s = &src[x * 4..x * 4 + 3];
        let d = &mut dst[x * 3..x * 3 + 3];
        d.copy_from_slice(s); // B, G, R
    }
}
