//! How lanes are physically stored inside a [`KeccakState`](crate::KeccakState).
//!
//! The encoding is a private performance strategy: every accessor on the state translates
//! between stored and logical lanes, so callers observe identical values under either encoding.
//! The stored form and the round function that works on it are not reachable from outside the
//! crate.

use core::fmt::Debug;

use crate::permutation::{keccak_f1600_complemented, keccak_f1600_plain};
use crate::LANES;

pub(crate) use self::sealed::Sealed;

mod sealed {
    use crate::LANES;

    pub trait Sealed {
        /// XOR mask between each lane's stored and logical value.
        const MASK: [u64; LANES];

        /// Applies Keccak-f\[1600\] to lanes held in this encoding.
        fn permute(lanes: &mut [u64; LANES]);
    }
}

/// A physical representation of the Keccak-f\[1600\] lanes, paired with the round function that
/// understands it. Implemented only by [`Plain`] and [`Complemented`].
///
/// Neither the stored form nor its round function can be reached from outside the crate:
///
/// ```compile_fail
/// use keccak_fbwl::{Complemented, LaneEncoding};
///
/// let mut lanes = [0u64; 25];
/// Complemented::permute(&mut lanes);
/// ```
pub trait LaneEncoding: Sealed + Copy + Debug + Default + Eq + 'static {}

impl LaneEncoding for Plain {}
impl LaneEncoding for Complemented {}

/// Every lane is stored as its logical value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Plain;

impl Sealed for Plain {
    const MASK: [u64; LANES] = [0; LANES];

    #[inline(always)]
    fn permute(lanes: &mut [u64; LANES]) {
        keccak_f1600_plain(lanes);
    }
}

/// Lanes 1, 2, 8, 12, 17, and 20 are stored bitwise-inverted, trading the NOTs of χ for ANDs and
/// ORs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Complemented;

/// The lanes [`Complemented`] stores inverted.
pub const COMPLEMENTED_LANES: [usize; 6] = [1, 2, 8, 12, 17, 20];

impl Sealed for Complemented {
    const MASK: [u64; LANES] = {
        let mut mask = [0u64; LANES];
        let mut i = 0;
        while i < COMPLEMENTED_LANES.len() {
            mask[COMPLEMENTED_LANES[i]] = u64::MAX;
            i += 1;
        }
        mask
    };

    #[inline(always)]
    fn permute(lanes: &mut [u64; LANES]) {
        keccak_f1600_complemented(lanes);
    }
}

/// The encoding selected by the `lane-complementing` feature.
#[cfg(feature = "lane-complementing")]
pub type DefaultEncoding = Complemented;

/// The encoding selected by the `lane-complementing` feature.
#[cfg(not(feature = "lane-complementing"))]
pub type DefaultEncoding = Plain;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complemented_mask() {
        for (i, &m) in Complemented::MASK.iter().enumerate() {
            let expected = if COMPLEMENTED_LANES.contains(&i) { u64::MAX } else { 0 };
            assert_eq!(expected, m, "lane {}", i);
        }
    }

    #[test]
    fn plain_mask() {
        assert!(Plain::MASK.iter().all(|&m| m == 0));
    }
}
