//! Loader/writer options.

use bitflags::bitflags;

bitflags! {
    /// Options accepted by the TGA codec entry points.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TgaFlags: u32 {
        /// 24bpp files are returned as BGR; 32bpp files are returned as
        /// BGRA (instead of the RGBA default).
        const BGR = 0x1;
        /// Normally an image with an all-zero alpha channel is assumed to
        /// be opaque; this flag leaves the channel alone.
        const ALLOW_ALL_ZERO_ALPHA = 0x2;
        /// Ignore sRGB metadata in the TGA 2.0 extension area.
        const IGNORE_SRGB = 0x10;
        /// Write sRGB gamma metadata regardless of format (TGA 2.0 only).
        const FORCE_SRGB = 0x20;
        /// Write linear gamma metadata regardless of format (TGA 2.0 only).
        const FORCE_LINEAR = 0x40;
        /// Assume sRGB when the file carries no colorspace metadata.
        const DEFAULT_SRGB = 0x80;
    }
}
