//! Mip-chain length calculators.

use crate::error::{FormatError, FormatResult};

/// Length of the full mip chain for a 1D/2D texture.
pub const fn count_mips(mut width: usize, mut height: usize) -> usize {
    let mut mip_levels = 1;

    while height > 1 || width > 1 {
        if height > 1 {
            height >>= 1;
        }
        if width > 1 {
            width >>= 1;
        }
        mip_levels += 1;
    }

    mip_levels
}

/// Length of the full mip chain for a volume texture.
pub const fn count_mips_3d(mut width: usize, mut height: usize, mut depth: usize) -> usize {
    let mut mip_levels = 1;

    while height > 1 || width > 1 || depth > 1 {
        if height > 1 {
            height >>= 1;
        }
        if width > 1 {
            width >>= 1;
        }
        if depth > 1 {
            depth >>= 1;
        }
        mip_levels += 1;
    }

    mip_levels
}

/// Resolves a requested mip count against the full chain.
///
/// `0` selects the full chain, `1` stays at one level, and anything larger is
/// validated against the chain length.
pub fn calculate_mip_levels(width: usize, height: usize, mip_levels: usize) -> FormatResult<usize> {
    match mip_levels {
        0 => Ok(count_mips(width, height)),
        1 => Ok(1),
        requested => {
            let max = count_mips(width, height);
            if requested > max {
                Err(FormatError::MipLevelsOutOfRange { requested, max })
            } else {
                Ok(requested)
            }
        }
    }
}

/// Volume-texture variant of [`calculate_mip_levels`].
pub fn calculate_mip_levels_3d(
    width: usize,
    height: usize,
    depth: usize,
    mip_levels: usize,
) -> FormatResult<usize> {
    match mip_levels {
        0 => Ok(count_mips_3d(width, height, depth)),
        1 => Ok(1),
        requested => {
            let max = count_mips_3d(width, height, depth);
            if requested > max {
                Err(FormatError::MipLevelsOutOfRange { requested, max })
            } else {
                Ok(requested)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 1, 1)]
    #[case(2, 1, 2)]
    #[case(64, 64, 7)]
    #[case(256, 64, 9)]
    #[case(100, 100, 7)] // non-pow2 still shifts down to 1
    fn full_chain_length(#[case] w: usize, #[case] h: usize, #[case] expected: usize) {
        assert_eq!(count_mips(w, h), expected);
    }

    #[test]
    fn depth_extends_the_chain() {
        assert_eq!(count_mips_3d(4, 4, 32), 6);
        assert_eq!(count_mips_3d(4, 4, 1), 3);
    }

    #[test]
    fn requested_counts_resolve() {
        assert_eq!(calculate_mip_levels(64, 64, 0).unwrap(), 7);
        assert_eq!(calculate_mip_levels(64, 64, 1).unwrap(), 1);
        assert_eq!(calculate_mip_levels(64, 64, 5).unwrap(), 5);
        assert_eq!(
            calculate_mip_levels(64, 64, 8),
            Err(FormatError::MipLevelsOutOfRange { requested: 8, max: 7 })
        );
    }
}
