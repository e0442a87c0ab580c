//! The Keccak-f\[1600\] round function.
//!
//! Each round body is fully unrolled over the 25 lanes and the driver loop runs two rounds per
//! iteration, alternating between two register files (`a -> e -> a`). There are two round bodies:
//! `round_plain` for lanes stored as-is, and `round_complemented` for the lane-complementing
//! representation, in which χ is rewritten via De Morgan's law so that lanes 1, 2, 8, 12, 17, and
//! 20 stay inverted across every round while spending 8 NOTs per round instead of 25.

use crate::LANES;

/// The number of rounds in Keccak-f\[1600\].
pub const ROUNDS: usize = 24;

/// The ι round constants, in round order.
#[allow(clippy::unreadable_literal)]
pub(crate) const RC: [u64; ROUNDS] = [
    0x0000000000000001,
    0x0000000000008082,
    0x800000000000808a,
    0x8000000080008000,
    0x000000000000808b,
    0x0000000080000001,
    0x8000000080008081,
    0x8000000000008009,
    0x000000000000008a,
    0x0000000000000088,
    0x0000000080008009,
    0x000000008000000a,
    0x000000008000808b,
    0x800000000000008b,
    0x8000000000008089,
    0x8000000000008003,
    0x8000000000008002,
    0x8000000000000080,
    0x000000000000800a,
    0x800000008000000a,
    0x8000000080008081,
    0x8000000000008080,
    0x0000000080000001,
    0x8000000080008008,
];

/// The ρ rotation offsets, indexed by lane position `x + 5y`.
pub(crate) const RHO: [u32; LANES] = [
    0, 1, 62, 28, 27, 36, 44, 6, 55, 20, 3, 10, 43, 25, 39, 41, 45, 15, 21, 8, 18, 2, 61, 56, 14,
];

/// Permutes lanes stored as their logical values.
#[inline]
pub(crate) fn keccak_f1600_plain(a: &mut [u64; LANES]) {
    let mut e = [0u64; LANES];
    for rc in RC.chunks_exact(2) {
        round_plain(a, &mut e, rc[0]);
        round_plain(&e, a, rc[1]);
    }
}

/// Permutes lanes stored in the lane-complementing representation.
#[inline]
pub(crate) fn keccak_f1600_complemented(a: &mut [u64; LANES]) {
    let mut e = [0u64; LANES];
    for rc in RC.chunks_exact(2) {
        round_complemented(a, &mut e, rc[0]);
        round_complemented(&e, a, rc[1]);
    }
}

#[inline(always)]
fn round_plain(a: &[u64; LANES], e: &mut [u64; LANES], rc: u64) {
    // θ
    let c0 = a[0] ^ a[5] ^ a[10] ^ a[15] ^ a[20];
    let c1 = a[1] ^ a[6] ^ a[11] ^ a[16] ^ a[21];
    let c2 = a[2] ^ a[7] ^ a[12] ^ a[17] ^ a[22];
    let c3 = a[3] ^ a[8] ^ a[13] ^ a[18] ^ a[23];
    let c4 = a[4] ^ a[9] ^ a[14] ^ a[19] ^ a[24];
    let d0 = c4 ^ c1.rotate_left(1);
    let d1 = c0 ^ c2.rotate_left(1);
    let d2 = c1 ^ c3.rotate_left(1);
    let d3 = c2 ^ c4.rotate_left(1);
    let d4 = c3 ^ c0.rotate_left(1);

    {
        // ρ and π
        let b0 = a[0] ^ d0;
        let b1 = (a[6] ^ d1).rotate_left(RHO[6]);
        let b2 = (a[12] ^ d2).rotate_left(RHO[12]);
        let b3 = (a[18] ^ d3).rotate_left(RHO[18]);
        let b4 = (a[24] ^ d4).rotate_left(RHO[24]);
        // χ and ι
        e[0] = b0 ^ (!b1 & b2) ^ rc;
        e[1] = b1 ^ (!b2 & b3);
        e[2] = b2 ^ (!b3 & b4);
        e[3] = b3 ^ (!b4 & b0);
        e[4] = b4 ^ (!b0 & b1);
    }

    {
        let b0 = (a[3] ^ d3).rotate_left(RHO[3]);
        let b1 = (a[9] ^ d4).rotate_left(RHO[9]);
        let b2 = (a[10] ^ d0).rotate_left(RHO[10]);
        let b3 = (a[16] ^ d1).rotate_left(RHO[16]);
        let b4 = (a[22] ^ d2).rotate_left(RHO[22]);
        e[5] = b0 ^ (!b1 & b2);
        e[6] = b1 ^ (!b2 & b3);
        e[7] = b2 ^ (!b3 & b4);
        e[8] = b3 ^ (!b4 & b0);
        e[9] = b4 ^ (!b0 & b1);
    }

    {
        let b0 = (a[1] ^ d1).rotate_left(RHO[1]);
        let b1 = (a[7] ^ d2).rotate_left(RHO[7]);
        let b2 = (a[13] ^ d3).rotate_left(RHO[13]);
        let b3 = (a[19] ^ d4).rotate_left(RHO[19]);
        let b4 = (a[20] ^ d0).rotate_left(RHO[20]);
        e[10] = b0 ^ (!b1 & b2);
        e[11] = b1 ^ (!b2 & b3);
        e[12] = b2 ^ (!b3 & b4);
        e[13] = b3 ^ (!b4 & b0);
        e[14] = b4 ^ (!b0 & b1);
    }

    {
        let b0 = (a[4] ^ d4).rotate_left(RHO[4]);
        let b1 = (a[5] ^ d0).rotate_left(RHO[5]);
        let b2 = (a[11] ^ d1).rotate_left(RHO[11]);
        let b3 = (a[17] ^ d2).rotate_left(RHO[17]);
        let b4 = (a[23] ^ d3).rotate_left(RHO[23]);
        e[15] = b0 ^ (!b1 & b2);
        e[16] = b1 ^ (!b2 & b3);
        e[17] = b2 ^ (!b3 & b4);
        e[18] = b3 ^ (!b4 & b0);
        e[19] = b4 ^ (!b0 & b1);
    }

    {
        let b0 = (a[2] ^ d2).rotate_left(RHO[2]);
        let b1 = (a[8] ^ d3).rotate_left(RHO[8]);
        let b2 = (a[14] ^ d4).rotate_left(RHO[14]);
        let b3 = (a[15] ^ d0).rotate_left(RHO[15]);
        let b4 = (a[21] ^ d1).rotate_left(RHO[21]);
        e[20] = b0 ^ (!b1 & b2);
        e[21] = b1 ^ (!b2 & b3);
        e[22] = b2 ^ (!b3 & b4);
        e[23] = b3 ^ (!b4 & b0);
        e[24] = b4 ^ (!b0 & b1);
    }
}

// The inputs to χ arrive with a fixed pattern of inverted lanes (θ propagates the inversions of
// the odd-parity columns), so each row gets its own mix of AND, OR, and NOT which lands every
// output lane back in the complemented set.
#[inline(always)]
fn round_complemented(a: &[u64; LANES], e: &mut [u64; LANES], rc: u64) {
    // θ
    let c0 = a[0] ^ a[5] ^ a[10] ^ a[15] ^ a[20];
    let c1 = a[1] ^ a[6] ^ a[11] ^ a[16] ^ a[21];
    let c2 = a[2] ^ a[7] ^ a[12] ^ a[17] ^ a[22];
    let c3 = a[3] ^ a[8] ^ a[13] ^ a[18] ^ a[23];
    let c4 = a[4] ^ a[9] ^ a[14] ^ a[19] ^ a[24];
    let d0 = c4 ^ c1.rotate_left(1);
    let d1 = c0 ^ c2.rotate_left(1);
    let d2 = c1 ^ c3.rotate_left(1);
    let d3 = c2 ^ c4.rotate_left(1);
    let d4 = c3 ^ c0.rotate_left(1);

    {
        // ρ and π
        let b0 = a[0] ^ d0;
        let b1 = (a[6] ^ d1).rotate_left(RHO[6]);
        let b2 = (a[12] ^ d2).rotate_left(RHO[12]);
        let b3 = (a[18] ^ d3).rotate_left(RHO[18]);
        let b4 = (a[24] ^ d4).rotate_left(RHO[24]);
        // χ and ι
        e[0] = b0 ^ (b1 | b2) ^ rc;
        e[1] = b1 ^ (!b2 | b3);
        e[2] = b2 ^ (b3 & b4);
        e[3] = b3 ^ (b4 | b0);
        e[4] = b4 ^ (b0 & b1);
    }

    {
        let b0 = (a[3] ^ d3).rotate_left(RHO[3]);
        let b1 = (a[9] ^ d4).rotate_left(RHO[9]);
        let b2 = (a[10] ^ d0).rotate_left(RHO[10]);
        let b3 = (a[16] ^ d1).rotate_left(RHO[16]);
        let b4 = (a[22] ^ d2).rotate_left(RHO[22]);
        e[5] = b0 ^ (b1 | b2);
        e[6] = b1 ^ (b2 & b3);
        e[7] = b2 ^ (b3 | !b4);
        e[8] = b3 ^ (b4 | b0);
        e[9] = b4 ^ (b0 & b1);
    }

    {
        let b0 = (a[1] ^ d1).rotate_left(RHO[1]);
        let b1 = (a[7] ^ d2).rotate_left(RHO[7]);
        let b2 = (a[13] ^ d3).rotate_left(RHO[13]);
        let b3 = (a[19] ^ d4).rotate_left(RHO[19]);
        let b4 = (a[20] ^ d0).rotate_left(RHO[20]);
        e[10] = b0 ^ (b1 | b2);
        e[11] = b1 ^ (b2 & b3);
        e[12] = b2 ^ (!b3 & b4);
        e[13] = !b3 ^ (b4 | b0);
        e[14] = b4 ^ (b0 & b1);
    }

    {
        let b0 = (a[4] ^ d4).rotate_left(RHO[4]);
        let b1 = (a[5] ^ d0).rotate_left(RHO[5]);
        let b2 = (a[11] ^ d1).rotate_left(RHO[11]);
        let b3 = (a[17] ^ d2).rotate_left(RHO[17]);
        let b4 = (a[23] ^ d3).rotate_left(RHO[23]);
        e[15] = b0 ^ (b1 & b2);
        e[16] = b1 ^ (b2 | b3);
        e[17] = b2 ^ (!b3 | b4);
        e[18] = !b3 ^ (b4 & b0);
        e[19] = b4 ^ (b0 | b1);
    }

    {
        let b0 = (a[2] ^ d2).rotate_left(RHO[2]);
        let b1 = (a[8] ^ d3).rotate_left(RHO[8]);
        let b2 = (a[14] ^ d4).rotate_left(RHO[14]);
        let b3 = (a[15] ^ d0).rotate_left(RHO[15]);
        let b4 = (a[21] ^ d1).rotate_left(RHO[21]);
        e[20] = b0 ^ (!b1 & b2);
        e[21] = !b1 ^ (b2 | b3);
        e[22] = b2 ^ (b3 & b4);
        e[23] = b3 ^ (b4 | b0);
        e[24] = b4 ^ (b0 & b1);
    }
}
