//! The full-block, whole-lane (FBWL) sponge and duplex driver.
//!
//! Every operation here works on blocks of `lane_count` whole lanes and stops as soon as fewer
//! than `lane_count * 8` bytes remain, returning the number of bytes it handled. Finishing a
//! trailing partial block (and any padding) is up to the caller, using the byte-granular lane
//! accessors on [`KeccakState`] and a final [`KeccakState::permute`].
//!
//! For absorb-like operations, the caller's `trailing_bits` byte is XORed into byte 0 of lane
//! `lane_count` after each block, i.e. right after the last byte of input. With a full-width rate
//! of 25 lanes there is no such byte and the trailing bits are dropped.

use crate::encoding::LaneEncoding;
use crate::lanes;
use crate::state::{extract_into, KeccakState};
use crate::{LANES, LANE_BYTES};

/// The number of lanes in a 1344-bit rate, as used by SHAKE128 and KangarooTwelve.
pub const RATE_1344_LANES: usize = 1344 / 64;

impl<E: LaneEncoding> KeccakState<E> {
    /// Absorbs every whole block of `lane_count` lanes in `data`, XORing `trailing_bits` after
    /// each block and permuting. Returns the number of bytes absorbed.
    #[inline]
    pub fn absorb(&mut self, lane_count: usize, data: &[u8], trailing_bits: u8) -> usize {
        #[cfg(feature = "fast-1344")]
        if lane_count == RATE_1344_LANES {
            return self.absorb_1344(data, trailing_bits);
        }
        self.absorb_generic(lane_count, data, trailing_bits)
    }

    /// Fills every whole block of `lane_count` lanes in `out` by permuting and then extracting
    /// the leading lanes of the state. Returns the number of bytes squeezed.
    #[inline]
    pub fn squeeze(&mut self, lane_count: usize, out: &mut [u8]) -> usize {
        #[cfg(feature = "fast-1344")]
        if lane_count == RATE_1344_LANES {
            return self.squeeze_1344(out);
        }
        self.squeeze_generic(lane_count, out)
    }

    /// Duplexes every whole block of `input` into `output`: each input block is XORed into the
    /// state, the resulting lanes are written to `output`, `trailing_bits` is added, and the
    /// state is permuted. Returns the number of bytes wrapped.
    ///
    /// Processing stops at the last block that fits in both `input` and `output`, so a shorter
    /// `output` caps the count.
    pub fn wrap(
        &mut self,
        lane_count: usize,
        input: &[u8],
        output: &mut [u8],
        trailing_bits: u8,
    ) -> usize {
        self.duplex(lane_count, input, output, trailing_bits, wrap_lane)
    }

    /// Reverses [`KeccakState::wrap`]: each block of `input` is XORed with the state to recover
    /// the original block into `output`, the state is updated exactly as `wrap` updated it, and
    /// then permuted. Returns the number of bytes unwrapped.
    ///
    /// As with `wrap`, processing stops at the last block that fits in both buffers.
    pub fn unwrap(
        &mut self,
        lane_count: usize,
        input: &[u8],
        output: &mut [u8],
        trailing_bits: u8,
    ) -> usize {
        self.duplex(lane_count, input, output, trailing_bits, unwrap_lane)
    }

    /// [`KeccakState::wrap`], reading from and writing to the same buffer.
    pub fn wrap_in_place(
        &mut self,
        lane_count: usize,
        data: &mut [u8],
        trailing_bits: u8,
    ) -> usize {
        self.duplex_in_place(lane_count, data, trailing_bits, wrap_lane)
    }

    /// [`KeccakState::unwrap`], reading from and writing to the same buffer.
    pub fn unwrap_in_place(
        &mut self,
        lane_count: usize,
        data: &mut [u8],
        trailing_bits: u8,
    ) -> usize {
        self.duplex_in_place(lane_count, data, trailing_bits, unwrap_lane)
    }

    /// [`KeccakState::absorb`] with the rate fixed at 1344 bits.
    pub fn absorb_1344(&mut self, data: &[u8], trailing_bits: u8) -> usize {
        let mut st = self.lanes;
        let n = absorb_fixed::<E, RATE_1344_LANES>(&mut st, data, trailing_bits);
        self.lanes = st;
        n
    }

    /// [`KeccakState::squeeze`] with the rate fixed at 1344 bits.
    pub fn squeeze_1344(&mut self, out: &mut [u8]) -> usize {
        let mut st = self.lanes;
        let n = squeeze_fixed::<E, RATE_1344_LANES>(&mut st, out);
        self.lanes = st;
        n
    }

    pub(crate) fn absorb_generic(
        &mut self,
        lane_count: usize,
        data: &[u8],
        trailing_bits: u8,
    ) -> usize {
        debug_assert_lane_count(lane_count);
        let block_len = lane_count * LANE_BYTES;
        let mut st = self.lanes;
        for block in data.chunks_exact(block_len) {
            lanes::xor_into(&mut st[..lane_count], block);
            add_trailing_bits(&mut st, lane_count, trailing_bits);
            E::permute(&mut st);
        }
        self.lanes = st;
        data.len() - data.len() % block_len
    }

    pub(crate) fn squeeze_generic(&mut self, lane_count: usize, out: &mut [u8]) -> usize {
        debug_assert_lane_count(lane_count);
        let block_len = lane_count * LANE_BYTES;
        let mut st = self.lanes;
        let mut n = 0;
        for block in out.chunks_exact_mut(block_len) {
            E::permute(&mut st);
            extract_into::<E>(&st, block);
            n += block_len;
        }
        self.lanes = st;
        n
    }

    #[inline(always)]
    fn duplex(
        &mut self,
        lane_count: usize,
        input: &[u8],
        output: &mut [u8],
        trailing_bits: u8,
        f: impl Fn(&mut u64, u64, u64) -> u64,
    ) -> usize {
        debug_assert_lane_count(lane_count);
        let block_len = lane_count * LANE_BYTES;
        let mut st = self.lanes;
        let mut n = 0;
        let blocks = input.chunks_exact(block_len).zip(output.chunks_exact_mut(block_len));
        for (in_block, out_block) in blocks {
            for (((lane, mask), src), dst) in st[..lane_count]
                .iter_mut()
                .zip(&E::MASK)
                .zip(in_block.chunks_exact(LANE_BYTES))
                .zip(out_block.chunks_exact_mut(LANE_BYTES))
            {
                lanes::store(f(lane, *mask, lanes::load(src)), dst);
            }
            add_trailing_bits(&mut st, lane_count, trailing_bits);
            E::permute(&mut st);
            n += block_len;
        }
        self.lanes = st;
        n
    }

    #[inline(always)]
    fn duplex_in_place(
        &mut self,
        lane_count: usize,
        data: &mut [u8],
        trailing_bits: u8,
        f: impl Fn(&mut u64, u64, u64) -> u64,
    ) -> usize {
        debug_assert_lane_count(lane_count);
        let block_len = lane_count * LANE_BYTES;
        let mut st = self.lanes;
        let mut n = 0;
        for block in data.chunks_exact_mut(block_len) {
            for ((lane, mask), chunk) in st[..lane_count]
                .iter_mut()
                .zip(&E::MASK)
                .zip(block.chunks_exact_mut(LANE_BYTES))
            {
                let value = f(lane, *mask, lanes::load(chunk));
                lanes::store(value, chunk);
            }
            add_trailing_bits(&mut st, lane_count, trailing_bits);
            E::permute(&mut st);
            n += block_len;
        }
        self.lanes = st;
        n
    }
}

/// Adds an input lane to a stored lane and returns the logical result.
#[inline(always)]
fn wrap_lane(lane: &mut u64, mask: u64, input: u64) -> u64 {
    *lane ^= input;
    *lane ^ mask
}

/// Recovers the input lane that `wrap_lane` consumed and leaves the stored lane as `wrap_lane`
/// left it.
#[inline(always)]
fn unwrap_lane(lane: &mut u64, mask: u64, input: u64) -> u64 {
    let output = input ^ *lane ^ mask;
    *lane ^= output;
    output
}

#[inline(always)]
fn add_trailing_bits(st: &mut [u64; LANES], lane_count: usize, trailing_bits: u8) {
    if lane_count < LANES {
        st[lane_count] ^= u64::from(trailing_bits);
    }
}

#[inline(always)]
fn debug_assert_lane_count(lane_count: usize) {
    debug_assert!((1..=LANES).contains(&lane_count), "invalid lane count: {}", lane_count);
}

#[inline(always)]
pub(crate) fn absorb_fixed<E: LaneEncoding, const N: usize>(
    st: &mut [u64; LANES],
    data: &[u8],
    trailing_bits: u8,
) -> usize {
    let mut n = 0;
    for block in data.chunks_exact(N * LANE_BYTES) {
        for (lane, chunk) in st[..N].iter_mut().zip(block.chunks_exact(LANE_BYTES)) {
            *lane ^= lanes::load(chunk);
        }
        if N < LANES {
            st[N] ^= u64::from(trailing_bits);
        }
        E::permute(st);
        n += N * LANE_BYTES;
    }
    n
}

#[inline(always)]
pub(crate) fn squeeze_fixed<E: LaneEncoding, const N: usize>(
    st: &mut [u64; LANES],
    out: &mut [u8],
) -> usize {
    let mut n = 0;
    for block in out.chunks_exact_mut(N * LANE_BYTES) {
        E::permute(st);
        for ((chunk, lane), mask) in block
            .chunks_exact_mut(LANE_BYTES)
            .zip(&st[..N])
            .zip(&E::MASK)
        {
            lanes::store(lane ^ mask, chunk);
        }
        n += N * LANE_BYTES;
    }
    n
}
