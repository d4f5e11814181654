//! The owned pixel container.

use crate::allocate::AlignedBuffer;
use crate::error::{TexError, TexResult};
use crate::image::{ImageDesc, ImageView, ImageViewMut};
use crate::layout::{determine_image_array, setup_image_array};
use crate::metadata::{TexDimension, TexMetadata, TexMiscFlags};
use vulkan_tex_format::{
    calculate_mip_levels, calculate_mip_levels_3d, compute_scanlines, is_palettized, is_planar,
    is_valid, CpFlags, Format,
};

/// Owns the contiguous pixel buffer for a full texture plus the subresource
/// table addressing into it.
///
/// Construction allocates and zeroes the buffer and lays out every
/// subresource; the two are only ever created and dropped together.
/// Move-only: the buffer has exactly one owner.
#[derive(Debug)]
pub struct ScratchImage {
    metadata: TexMetadata,
    images: Vec<ImageDesc>,
    buffer: AlignedBuffer,
}

impl ScratchImage {
    /// Allocates a container for `metadata`.
    ///
    /// A `mip_levels` of 0 selects the full chain. The description is
    /// validated against the dimension invariants before anything is
    /// allocated.
    pub fn initialize(metadata: &TexMetadata, cp_flags: CpFlags) -> TexResult<Self> {
        if !is_valid(metadata.format) {
            return Err(TexError::InvalidMetadata("format is not a known code"));
        }
        if is_palettized(metadata.format) {
            return Err(TexError::InvalidMetadata("palettized formats are not canonical"));
        }

        let mip_levels = match metadata.dimension {
            TexDimension::Texture1D => {
                if metadata.width == 0 || metadata.height != 1 || metadata.depth != 1
                    || metadata.array_size == 0
                {
                    return Err(TexError::InvalidMetadata("1D texture requires height=1, depth=1"));
                }
                calculate_mip_levels(metadata.width, 1, metadata.mip_levels)?
            }
            TexDimension::Texture2D => {
                if metadata.width == 0 || metadata.height == 0 || metadata.depth != 1
                    || metadata.array_size == 0
                {
                    return Err(TexError::InvalidMetadata("2D texture requires depth=1"));
                }
                if metadata.is_cubemap() && metadata.array_size % 6 != 0 {
                    return Err(TexError::InvalidMetadata("cubemap array size must be a multiple of 6"));
                }
                calculate_mip_levels(metadata.width, metadata.height, metadata.mip_levels)?
            }
            TexDimension::Texture3D => {
                if metadata.width == 0 || metadata.height == 0 || metadata.depth == 0
                    || metadata.array_size != 1
                {
                    return Err(TexError::InvalidMetadata("3D texture requires array_size=1"));
                }
                if metadata.depth > i16::MAX as usize {
                    return Err(TexError::InvalidMetadata("3D depth out of range"));
                }
                calculate_mip_levels_3d(metadata.width, metadata.height, metadata.depth, metadata.mip_levels)?
            }
        };

        let metadata = TexMetadata {
            mip_levels,
            ..*metadata
        };

        let (nimages, pixel_size) = determine_image_array(&metadata, cp_flags)?;
        let buffer = AlignedBuffer::zeroed(pixel_size)?;
        let images = setup_image_array(&metadata, cp_flags, pixel_size, nimages)?;

        Ok(Self {
            metadata,
            images,
            buffer,
        })
    }

    /// 1D texture; a special case of the 2D layout.
    pub fn initialize_1d(
        format: Format,
        length: usize,
        array_size: usize,
        mip_levels: usize,
        cp_flags: CpFlags,
    ) -> TexResult<Self> {
        let mut this = Self::initialize_2d(format, length, 1, array_size, mip_levels, cp_flags)?;
        this.metadata.dimension = TexDimension::Texture1D;
        Ok(this)
    }

    pub fn initialize_2d(
        format: Format,
        width: usize,
        height: usize,
        array_size: usize,
        mip_levels: usize,
        cp_flags: CpFlags,
    ) -> TexResult<Self> {
        let metadata = TexMetadata {
            width,
            height,
            depth: 1,
            array_size,
            mip_levels,
            format,
            dimension: TexDimension::Texture2D,
            ..TexMetadata::default()
        };
        Self::initialize(&metadata, cp_flags)
    }

    pub fn initialize_3d(
        format: Format,
        width: usize,
        height: usize,
        depth: usize,
        mip_levels: usize,
        cp_flags: CpFlags,
    ) -> TexResult<Self> {
        let metadata = TexMetadata {
            width,
            height,
            depth,
            array_size: 1,
            mip_levels,
            format,
            dimension: TexDimension::Texture3D,
            ..TexMetadata::default()
        };
        Self::initialize(&metadata, cp_flags)
    }

    /// Cubemap: a 2D array with six faces per cube.
    pub fn initialize_cube(
        format: Format,
        width: usize,
        height: usize,
        cubes: usize,
        mip_levels: usize,
        cp_flags: CpFlags,
    ) -> TexResult<Self> {
        if cubes == 0 {
            return Err(TexError::InvalidMetadata("cube count must be non-zero"));
        }
        let mut this = Self::initialize_2d(format, width, height, cubes * 6, mip_levels, cp_flags)?;
        this.metadata.misc_flags |= TexMiscFlags::TEXTURECUBE;
        Ok(this)
    }

    /// Copies one source image into a fresh single-subresource container.
    pub fn initialize_from_image(
        src: ImageView<'_>,
        allow_1d: bool,
        cp_flags: CpFlags,
    ) -> TexResult<Self> {
        Self::initialize_array_from_images(&[src], allow_1d, cp_flags)
    }

    /// Copies `images` into a fresh 2D-array (or 1D-array) container.
    ///
    /// Every image must agree on format, width, and height.
    pub fn initialize_array_from_images(
        images: &[ImageView<'_>],
        allow_1d: bool,
        cp_flags: CpFlags,
    ) -> TexResult<Self> {
        let first = images.first().ok_or(TexError::InvalidMetadata("no images"))?;

        for image in images {
            if image.format != first.format
                || image.width != first.width
                || image.height != first.height
            {
                return Err(TexError::MismatchedImages);
            }
        }

        let mut this = if first.height > 1 || !allow_1d {
            Self::initialize_2d(first.format, first.width, first.height, images.len(), 1, cp_flags)?
        } else {
            Self::initialize_1d(first.format, first.width, images.len(), 1, cp_flags)?
        };

        let row_count = compute_scanlines(first.format, first.height);
        if row_count == 0 {
            return Err(TexError::InvalidMetadata("no scanlines to copy"));
        }

        for (index, src) in images.iter().enumerate() {
            this.copy_rows_into(index, src, row_count)?;
        }

        Ok(this)
    }

    /// Cubemap variant of [`Self::initialize_array_from_images`];
    /// `images.len()` must be a multiple of 6.
    pub fn initialize_cube_from_images(
        images: &[ImageView<'_>],
        cp_flags: CpFlags,
    ) -> TexResult<Self> {
        if images.is_empty() || images.len() % 6 != 0 {
            return Err(TexError::InvalidMetadata("cubemaps require a multiple of six faces"));
        }

        let mut this = Self::initialize_array_from_images(images, false, cp_flags)?;
        this.metadata.misc_flags |= TexMiscFlags::TEXTURECUBE;
        Ok(this)
    }

    /// Copies `images` as the slices of a single-mip volume.
    pub fn initialize_3d_from_images(
        images: &[ImageView<'_>],
        cp_flags: CpFlags,
    ) -> TexResult<Self> {
        let first = images.first().ok_or(TexError::InvalidMetadata("no images"))?;
        if images.len() > i16::MAX as usize {
            return Err(TexError::InvalidMetadata("3D depth out of range"));
        }

        for image in images {
            if image.format != first.format
                || image.width != first.width
                || image.height != first.height
            {
                return Err(TexError::MismatchedImages);
            }
        }

        let mut this = Self::initialize_3d(
            first.format,
            first.width,
            first.height,
            images.len(),
            1,
            cp_flags,
        )?;

        let row_count = compute_scanlines(first.format, first.height);
        if row_count == 0 {
            return Err(TexError::InvalidMetadata("no scanlines to copy"));
        }

        for (slice, src) in images.iter().enumerate() {
            this.copy_rows_into(slice, src, row_count)?;
        }

        Ok(this)
    }

    fn copy_rows_into(
        &mut self,
        index: usize,
        src: &ImageView<'_>,
        row_count: usize,
    ) -> TexResult<()> {
        let desc = self.images[index];
        let dst = &mut self.buffer.as_mut_slice()[desc.offset..desc.offset + desc.slice_pitch];

        let size = desc.row_pitch.min(src.row_pitch);
        for y in 0..row_count {
            let s = &src.pixels[y * src.row_pitch..y * src.row_pitch + size];
            dst[y * desc.row_pitch..y * desc.row_pitch + size].copy_from_slice(s);
        }
        Ok(())
    }

    /// Rewrites the format code without touching pixel bytes.
    ///
    /// Used for metadata-driven reinterpretation such as sRGB promotion.
    /// Planar and palettized formats are rejected.
    pub fn override_format(&mut self, format: Format) -> TexResult<()> {
        if !is_valid(format) || is_planar(format, false) || is_palettized(format) {
            return Err(TexError::InvalidMetadata("format cannot replace the current one"));
        }

        for image in &mut self.images {
            image.format = format;
        }
        self.metadata.format = format;
        Ok(())
    }

    #[inline]
    pub fn metadata(&self) -> &TexMetadata {
        &self.metadata
    }

    /// Records how the alpha channel should be interpreted.
    ///
    /// Codecs call this after inspecting file metadata or pixel contents.
    pub fn set_alpha_mode(&mut self, mode: crate::metadata::AlphaMode) {
        self.metadata.set_alpha_mode(mode);
    }

    #[inline]
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// The subresource table, in traversal order.
    #[inline]
    pub fn image_descs(&self) -> &[ImageDesc] {
        &self.images
    }

    /// Borrowed view of the subresource at `(mip, item, slice)`.
    pub fn image(&self, mip: usize, item: usize, slice: usize) -> Option<ImageView<'_>> {
        let index = self.metadata.compute_index(mip, item, slice)?;
        self.image_at(index)
    }

    /// Writable view of the subresource at `(mip, item, slice)`.
    pub fn image_mut(&mut self, mip: usize, item: usize, slice: usize) -> Option<ImageViewMut<'_>> {
        let index = self.metadata.compute_index(mip, item, slice)?;
        self.image_at_mut(index)
    }

    /// Borrowed view of the subresource at a flat index.
    pub fn image_at(&self, index: usize) -> Option<ImageView<'_>> {
        let desc = self.images.get(index)?;
        Some(ImageView::new(desc, self.buffer.as_slice()))
    }

    /// Writable view of the subresource at a flat index.
    pub fn image_at_mut(&mut self, index: usize) -> Option<ImageViewMut<'_>> {
        let desc = *self.images.get(index)?;
        Some(ImageViewMut::new(&desc, self.buffer.as_mut_slice()))
    }

    /// All subresource views, in traversal order.
    pub fn image_views(&self) -> Vec<ImageView<'_>> {
        self.images
            .iter()
            .map(|desc| ImageView::new(desc, self.buffer.as_slice()))
            .collect()
    }

    /// The whole pixel buffer (length includes alignment padding).
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut_slice()
    }

    /// Reported buffer size in bytes.
    #[inline]
    pub fn pixels_size(&self) -> usize {
        self.buffer.len()
    }

    /// Exact byte length of the packed subresources, excluding alignment
    /// padding.
    pub fn packed_size(&self) -> usize {
        self.images
            .last()
            .map(|desc| desc.offset + desc.slice_pitch)
            .unwrap_or(0)
    }
}
