//! Loader/writer options.

use bitflags::bitflags;

bitflags! {
    /// Options accepted by the DDS codec entry points.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct DdsFlags: u32 {
        /// Assume pitch is DWORD aligned instead of byte aligned (used by
        /// some legacy DDS files).
        const LEGACY_DWORD = 0x1;
        /// Do not implicitly convert legacy formats that result in larger
        /// pixel sizes (24 bpp, 3:3:2, A8L8, A4L4, P8, A8P8).
        const NO_LEGACY_EXPANSION = 0x2;
        /// Do not use the work-around for the long-standing D3DX issue that
        /// reversed the 10:10:10:2 color order masks.
        const NO_R10B10G10A2_FIXUP = 0x4;
        /// Convert BGR formats to R8G8B8A8_UNORM to avoid the optional
        /// WDDM 1.1 formats.
        const FORCE_RGB = 0x8;
        /// Expand 565, 5551, and 4444 to 8888 to avoid the optional
        /// WDDM 1.2 formats.
        const NO_16BPP = 0x10;
        /// Expand legacy luminance formats (L8, L16, A8L8) by replicating
        /// color channels rather than leaving them packed.
        const EXPAND_LUMINANCE = 0x20;
        /// Some older DXTn DDS files incorrectly handle mipchain tails for
        /// blocks smaller than 4x4.
        const BAD_DXTN_TAILS = 0x40;
        /// Allow header variants caused by common bugs in legacy writers.
        const PERMISSIVE = 0x80;
        /// Read only the top-level mip of files with broken mip counts.
        const IGNORE_MIPS = 0x100;
        /// Always write the 'DX10' header extension.
        const FORCE_DX10_EXT = 0x10000;
        /// As FORCE_DX10_EXT, and also emit miscFlags2 (the result may not
        /// be compatible with D3DX10/D3DX11).
        const FORCE_DX10_EXT_MISC2 = 0x20000;
        /// Force a legacy DX9 header for the writer; fails if impossible.
        const FORCE_DX9_LEGACY = 0x40000;
        /// Write 'RXGB' instead of 'DXT5' for BC3 data.
        const FORCE_DXT5_RXGB = 0x80000;
        /// Write B8G8R8_UNORM data as the 24bpp legacy 'RGB' format.
        const FORCE_24BPP_RGB = 0x100000;
        /// Permit dimensions past known hardware requirements.
        const ALLOW_LARGE_FILES = 0x1000000;
    }
}
