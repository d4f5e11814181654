//! Subresource records and borrowed pixel views.

use vulkan_tex_format::Format;

/// One subresource's placement inside an owned pixel buffer.
///
/// The record carries the mip extents, the pitches the pitch calculator
/// produced for them, and the byte offset of the subresource's first pixel.
/// Views hand out slices; offsets never leave the crate as pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDesc {
    pub width: usize,
    pub height: usize,
    pub format: Format,
    pub row_pitch: usize,
    pub slice_pitch: usize,
    /// Byte offset of this subresource in the owning buffer.
    pub offset: usize,
}

/// A borrowed, read-only subresource.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub format: Format,
    pub row_pitch: usize,
    pub slice_pitch: usize,
    pub pixels: &'a [u8],
}

/// A borrowed, writable subresource.
#[derive(Debug)]
pub struct ImageViewMut<'a> {
    pub width: usize,
    pub height: usize,
    pub format: Format,
    pub row_pitch: usize,
    pub slice_pitch: usize,
    pub pixels: &'a mut [u8],
}

impl<'a> ImageView<'a> {
    /// Binds a descriptor to the buffer that owns it.
    pub(crate) fn new(desc: &ImageDesc, buffer: &'a [u8]) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            row_pitch: desc.row_pitch,
            slice_pitch: desc.slice_pitch,
            pixels: &buffer[desc.offset..desc.offset + desc.slice_pitch],
        }
    }
}

impl<'a> ImageViewMut<'a> {
    pub(crate) fn new(desc: &ImageDesc, buffer: &'a mut [u8]) -> Self {
        Self {
            width: desc.width,
            height: desc.height,
            format: desc.format,
            row_pitch: desc.row_pitch,
            slice_pitch: desc.slice_pitch,
            pixels: &mut buffer[desc.offset..desc.offset + desc.slice_pitch],
        }
    }

    /// Reborrows as a read-only view.
    pub fn as_view(&self) -> ImageView<'_> {
        ImageView {
            width: self.width,
            height: self.height,
            format: self.format,
            row_pitch: self.row_pitch,
            slice_pitch: self.slice_pitch,
            pixels: self.pixels,
        }
    }
}
