//! Pitch-computation options.

use bitflags::bitflags;

bitflags! {
    /// Options for [`compute_pitch`](crate::compute_pitch) and the layout
    /// engine built on top of it.
    ///
    /// The alignment flags select the unit a row is rounded up to; the
    /// `*_BPP` overrides substitute a legacy on-disk pixel size for the
    /// format's own, which the DDS loader uses to walk legacy payloads.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CpFlags: u32 {
        /// Assume pitch is DWORD aligned instead of byte aligned.
        const LEGACY_DWORD = 0x1;
        /// Assume pitch is 16-byte aligned instead of byte aligned.
        const PARAGRAPH = 0x2;
        /// Assume pitch is 32-byte aligned instead of byte aligned.
        const YMM = 0x4;
        /// Assume pitch is 64-byte aligned instead of byte aligned.
        const ZMM = 0x8;
        /// Assume pitch is 4096-byte aligned instead of byte aligned.
        const PAGE4K = 0x200;
        /// BC formats with malformed mipchain blocks smaller than 4x4.
        const BAD_DXTN_TAILS = 0x1000;
        /// Override with a legacy 24 bits-per-pixel format size.
        const BPP24 = 0x10000;
        /// Override with a legacy 16 bits-per-pixel format size.
        const BPP16 = 0x20000;
        /// Override with a legacy 8 bits-per-pixel format size.
        const BPP8 = 0x40000;
        /// Don't allow pixel allocations in excess of 4GB.
        const LIMIT_4GB = 0x10000000;
    }
}
