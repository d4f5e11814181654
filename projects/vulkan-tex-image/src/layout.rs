//! The subresource layout engine.
//!
//! Walks every `(item, mip)` (or `(mip, slice)` for volumes) of a texture
//! description, sizing each subresource with the pitch calculator and packing
//! them back to back. The walk order here defines the subresource index
//! space and the byte order of every container payload.

use crate::error::{TexError, TexResult};
use crate::image::ImageDesc;
use crate::metadata::{TexDimension, TexMetadata};
use vulkan_tex_format::{compute_pitch, CpFlags};

/// Counts subresources and sums their byte total.
///
/// The total is exact; no padding is inserted between subresources. Fails on
/// any pitch error and, under [`CpFlags::LIMIT_4GB`] (or a 32-bit host), on
/// totals past 4 GiB.
pub fn determine_image_array(
    metadata: &TexMetadata,
    cp_flags: CpFlags,
) -> TexResult<(usize, usize)> {
    debug_assert!(metadata.width > 0 && metadata.height > 0 && metadata.depth > 0);
    debug_assert!(metadata.array_size > 0);
    debug_assert!(metadata.mip_levels > 0);

    let mut total_pixel_size = 0u64;
    let mut nimages = 0usize;

    match metadata.dimension {
        TexDimension::Texture1D | TexDimension::Texture2D => {
            for _item in 0..metadata.array_size {
                let mut w = metadata.width;
                let mut h = metadata.height;

                for _level in 0..metadata.mip_levels {
                    let pitch = compute_pitch(metadata.format, w, h, cp_flags)?;

                    total_pixel_size += pitch.slice as u64;
                    nimages += 1;

                    if h > 1 {
                        h >>= 1;
                    }
                    if w > 1 {
                        w >>= 1;
                    }
                }
            }
        }

        TexDimension::Texture3D => {
            let mut w = metadata.width;
            let mut h = metadata.height;
            let mut d = metadata.depth;

            for _level in 0..metadata.mip_levels {
                let pitch = compute_pitch(metadata.format, w, h, cp_flags)?;

                total_pixel_size += pitch.slice as u64 * d as u64;
                nimages += d;

                if h > 1 {
                    h >>= 1;
                }
                if w > 1 {
                    w >>= 1;
                }
                if d > 1 {
                    d >>= 1;
                }
            }
        }
    }

    if (cfg!(target_pointer_width = "32") || cp_flags.contains(CpFlags::LIMIT_4GB))
        && total_pixel_size > u32::MAX as u64
    {
        return Err(TexError::Format(
            vulkan_tex_format::FormatError::ArithmeticOverflow,
        ));
    }

    Ok((nimages, total_pixel_size as usize))
}

/// Builds the subresource table for a buffer of `pixel_size` bytes.
///
/// Produces records in the same traversal order [`determine_image_array`]
/// counts them; for volumes all slices of a given mip are contiguous. Fails
/// if the running offset would pass `pixel_size` or the record count would
/// pass `nimages`.
pub fn setup_image_array(
    metadata: &TexMetadata,
    cp_flags: CpFlags,
    pixel_size: usize,
    nimages: usize,
) -> TexResult<Vec<ImageDesc>> {
    if nimages == 0 {
        return Err(TexError::InvalidMetadata("no subresources to lay out"));
    }

    let mut images = Vec::with_capacity(nimages);
    let mut offset = 0usize;

    let mut push = |w: usize, h: usize, offset: &mut usize| -> TexResult<()> {
        if images.len() >= nimages {
            return Err(TexError::InvalidMetadata("subresource count mismatch"));
        }

        let pitch = compute_pitch(metadata.format, w, h, cp_flags)?;
        let end = offset
            .checked_add(pitch.slice)
            .ok_or(TexError::BufferTooSmall {
                required: usize::MAX,
                actual: pixel_size,
            })?;
        if end > pixel_size {
            return Err(TexError::BufferTooSmall {
                required: end,
                actual: pixel_size,
            });
        }

        images.push(ImageDesc {
            width: w,
            height: h,
            format: metadata.format,
            row_pitch: pitch.row,
            slice_pitch: pitch.slice,
            offset: *offset,
        });
        *offset = end;
        Ok(())
    };

    match metadata.dimension {
        TexDimension::Texture1D | TexDimension::Texture2D => {
            if metadata.array_size == 0 || metadata.mip_levels == 0 {
                return Err(TexError::InvalidMetadata("empty array or mip chain"));
            }

            for _item in 0..metadata.array_size {
                let mut w = metadata.width;
                let mut h = metadata.height;

                for _level in 0..metadata.mip_levels {
                    push(w, h, &mut offset)?;

                    if h > 1 {
                        h >>= 1;
                    }
                    if w > 1 {
                        w >>= 1;
                    }
                }
            }
        }

        TexDimension::Texture3D => {
            if metadata.mip_levels == 0 || metadata.depth == 0 {
                return Err(TexError::InvalidMetadata("empty volume or mip chain"));
            }

            let mut w = metadata.width;
            let mut h = metadata.height;
            let mut d = metadata.depth;

            for _level in 0..metadata.mip_levels {
                for _slice in 0..d {
                    push(w, h, &mut offset)?;
                }

                if h > 1 {
                    h >>= 1;
                }
                if w > 1 {
                    w >>= 1;
                }
                if d > 1 {
                    d >>= 1;
                }
            }
        }
    }

    Ok(images)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vulkan_tex_format::{compute_scanlines, Format};

    fn meta_2d(w: usize, h: usize, array: usize, mips: usize, format: Format) -> TexMetadata {
        TexMetadata {
            width: w,
            height: h,
            depth: 1,
            array_size: array,
            mip_levels: mips,
            format,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        }
    }

    #[test]
    fn rgba8_mip_chain_totals() {
        let m = meta_2d(4, 4, 1, 3, Format::R8G8B8A8_UNORM);
        let (n, total) = determine_image_array(&m, CpFlags::empty()).unwrap();
        assert_eq!(n, 3);
        assert_eq!(total, 64 + 16 + 4);
    }

    #[test]
    fn bc1_mip_chain_totals() {
        let m = meta_2d(256, 256, 1, 9, Format::BC1_RGB_UNORM_BLOCK);
        let (n, total) = determine_image_array(&m, CpFlags::empty()).unwrap();
        assert_eq!(n, 9);
        // Tail mips below 4x4 still occupy one full block.
        assert_eq!(total, 32768 + 8192 + 2048 + 512 + 128 + 32 + 8 + 8 + 8);
    }

    #[test]
    fn volume_slices_count_per_level() {
        let m = TexMetadata {
            width: 8,
            height: 8,
            depth: 4,
            array_size: 1,
            mip_levels: 4,
            format: Format::R8_UNORM,
            dimension: TexDimension::Texture3D,
            ..TexMetadata::default()
        };
        let (n, total) = determine_image_array(&m, CpFlags::empty()).unwrap();
        assert_eq!(n, 4 + 2 + 1 + 1);
        assert_eq!(total, 64 * 4 + 16 * 2 + 4 + 1);
    }

    #[test]
    fn setup_matches_determine() {
        let m = meta_2d(16, 8, 2, 4, Format::R8G8B8A8_UNORM);
        let (n, total) = determine_image_array(&m, CpFlags::empty()).unwrap();
        let descs = setup_image_array(&m, CpFlags::empty(), total, n).unwrap();

        assert_eq!(descs.len(), n);
        assert_eq!(descs.iter().map(|d| d.slice_pitch).sum::<usize>(), total);

        // Contiguous, in order, no padding.
        let mut offset = 0;
        for d in &descs {
            assert_eq!(d.offset, offset);
            offset += d.slice_pitch;

            // Rows cover the slice exactly for non-planar, non-compressed data.
            let lines = compute_scanlines(d.format, d.height);
            assert!(d.row_pitch * lines <= d.slice_pitch);
            assert_eq!(d.row_pitch * lines, d.slice_pitch);
        }

        // Second item starts after the first full chain.
        let chain: usize = descs[..4].iter().map(|d| d.slice_pitch).sum();
        assert_eq!(descs[4].offset, chain);
        assert_eq!(descs[4].width, 16);
    }

    #[test]
    fn planar_slices_cover_luma_and_chroma_rows() {
        let m = meta_2d(6, 4, 1, 1, Format::G8_B8R8_2PLANE_420_UNORM);
        let (n, total) = determine_image_array(&m, CpFlags::empty()).unwrap();
        assert_eq!(n, 1);

        let descs = setup_image_array(&m, CpFlags::empty(), total, n).unwrap();
        let d = &descs[0];
        let lines = compute_scanlines(d.format, d.height);
        assert_eq!(lines, 6); // 4 luma + 2 chroma rows
        assert!(d.row_pitch * lines <= d.slice_pitch);
        assert_eq!(d.slice_pitch, total);
    }

    #[test]
    fn setup_rejects_short_buffers() {
        let m = meta_2d(16, 16, 1, 1, Format::R8G8B8A8_UNORM);
        let err = setup_image_array(&m, CpFlags::empty(), 100, 1).unwrap_err();
        assert!(matches!(err, TexError::BufferTooSmall { required: 1024, actual: 100 }));
    }

    #[test]
    fn limit_4gb_caps_the_total() {
        let m = meta_2d(16384, 16384, 8, 1, Format::R32G32B32A32_SFLOAT);
        assert!(determine_image_array(&m, CpFlags::LIMIT_4GB).is_err());
        #[cfg(target_pointer_width = "64")]
        assert!(determine_image_array(&m, CpFlags::empty()).is_ok());
    }
}
