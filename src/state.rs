use core::fmt;
use core::marker::PhantomData;

use crate::encoding::{DefaultEncoding, LaneEncoding};
#[cfg(feature = "fast-1344")]
use crate::fbwl::{absorb_fixed, squeeze_fixed, RATE_1344_LANES};
use crate::lanes;
use crate::{LANES, LANE_BYTES, STATE_BYTES};

/// A Keccak-f\[1600\] state of 25 64-bit lanes, held in the lane encoding `E`.
///
/// The state is only reachable through its lane accessors, which always read and write logical
/// lane values regardless of `E` or the host's byte order. To persist a state, use
/// [`KeccakState::extract_lanes`] and [`KeccakState::overwrite_lanes`].
#[derive(Clone, PartialEq, Eq)]
#[repr(align(8))]
pub struct KeccakState<E: LaneEncoding = DefaultEncoding> {
    pub(crate) lanes: [u64; LANES],
    encoding: PhantomData<E>,
}

impl<E: LaneEncoding> Default for KeccakState<E> {
    fn default() -> Self {
        KeccakState::new()
    }
}

impl<E: LaneEncoding> fmt::Debug for KeccakState<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeccakState").finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl<E: LaneEncoding> zeroize::Zeroize for KeccakState<E> {
    fn zeroize(&mut self) {
        use zeroize::Zeroize;

        self.lanes.zeroize();
        self.initialize();
    }
}

impl<E: LaneEncoding> KeccakState<E> {
    /// Returns a state whose lanes are all logically zero.
    pub const fn new() -> Self {
        KeccakState {
            lanes: E::MASK,
            encoding: PhantomData,
        }
    }

    /// Resets every lane to logical zero.
    #[inline]
    pub fn initialize(&mut self) {
        self.lanes = E::MASK;
    }

    /// Applies the Keccak-f\[1600\] permutation.
    #[inline]
    pub fn permute(&mut self) {
        let mut st = self.lanes;
        E::permute(&mut st);
        self.lanes = st;
    }

    /// XORs `data` into lane `lane`, starting at byte `offset` of the lane.
    #[inline]
    pub fn xor_bytes_in_lane(&mut self, lane: usize, data: &[u8], offset: usize) {
        debug_assert!(lane < LANES);
        if data.is_empty() {
            return;
        }
        self.lanes[lane] ^= lanes::load_partial(data, offset);
    }

    /// XORs the first `lane_count` lanes of `data` into the first `lane_count` lanes of the state.
    #[inline]
    pub fn xor_lanes(&mut self, data: &[u8], lane_count: usize) {
        debug_assert!(lane_count <= LANES);
        debug_assert!(data.len() >= lane_count * LANE_BYTES);
        lanes::xor_into(&mut self.lanes[..lane_count], &data[..lane_count * LANE_BYTES]);
    }

    /// Overwrites bytes `offset..offset + data.len()` of lane `lane` with `data`.
    pub fn overwrite_bytes_in_lane(&mut self, lane: usize, data: &[u8], offset: usize) {
        debug_assert!(lane < LANES);
        let mask = lanes::byte_mask(offset, data.len());
        let value = lanes::load_partial(data, offset) ^ (E::MASK[lane] & mask);
        self.lanes[lane] = (self.lanes[lane] & !mask) | value;
    }

    /// Overwrites the first `lane_count` lanes of the state with the first `lane_count` lanes of
    /// `data`.
    pub fn overwrite_lanes(&mut self, data: &[u8], lane_count: usize) {
        debug_assert!(lane_count <= LANES);
        debug_assert!(data.len() >= lane_count * LANE_BYTES);
        for ((lane, chunk), mask) in self.lanes[..lane_count]
            .iter_mut()
            .zip(data.chunks_exact(LANE_BYTES))
            .zip(&E::MASK)
        {
            *lane = lanes::load(chunk) ^ mask;
        }
    }

    /// Sets the first `byte_count` bytes of the state to logical zero. `byte_count` need not fall
    /// on a lane boundary.
    pub fn overwrite_with_zeroes(&mut self, byte_count: usize) {
        debug_assert!(byte_count <= STATE_BYTES);
        let full = byte_count / LANE_BYTES;
        self.lanes[..full].copy_from_slice(&E::MASK[..full]);

        let partial = byte_count % LANE_BYTES;
        if partial != 0 {
            let mask = lanes::byte_mask(0, partial);
            self.lanes[full] = (self.lanes[full] & !mask) | (E::MASK[full] & mask);
        }
    }

    /// Flips bit `position % 64` of lane `position / 64`.
    #[inline]
    pub fn complement_bit(&mut self, position: usize) {
        debug_assert!(position < STATE_BYTES * 8);
        self.lanes[position / 64] ^= 1u64 << (position % 64);
    }

    /// Copies bytes `offset..offset + out.len()` of lane `lane` into `out`.
    #[inline]
    pub fn extract_bytes_in_lane(&self, lane: usize, out: &mut [u8], offset: usize) {
        debug_assert!(lane < LANES);
        lanes::store_partial(self.lane(lane), out, offset);
    }

    /// Copies the first `lane_count` lanes of the state into `out`.
    pub fn extract_lanes(&self, out: &mut [u8], lane_count: usize) {
        debug_assert!(lane_count <= LANES);
        debug_assert!(out.len() >= lane_count * LANE_BYTES);
        extract_into::<E>(&self.lanes, &mut out[..lane_count * LANE_BYTES]);
    }

    /// XORs bytes `offset..offset + data.len()` of lane `lane` into `data`.
    pub fn extract_and_xor_bytes_in_lane(&self, lane: usize, data: &mut [u8], offset: usize) {
        debug_assert!(lane < LANES);
        debug_assert!(offset + data.len() <= LANE_BYTES);
        let mut buf = [0u8; LANE_BYTES];
        lanes::store(self.lane(lane), &mut buf);
        for (b, s) in data.iter_mut().zip(&buf[offset..]) {
            *b ^= s;
        }
    }

    /// XORs the first `lane_count` lanes of the state into `data`.
    pub fn extract_and_xor_lanes(&self, data: &mut [u8], lane_count: usize) {
        debug_assert!(lane_count <= LANES);
        debug_assert!(data.len() >= lane_count * LANE_BYTES);
        for ((chunk, lane), mask) in data[..lane_count * LANE_BYTES]
            .chunks_exact_mut(LANE_BYTES)
            .zip(&self.lanes)
            .zip(&E::MASK)
        {
            let value = lanes::load(chunk) ^ lane ^ mask;
            lanes::store(value, chunk);
        }
    }

    /// XORs `in_lane_count` lanes of `input` into the state, permutes it, and then copies
    /// `out_lane_count` lanes of the state into `output`. Either count may be zero.
    pub fn xor_permute_extract(
        &mut self,
        input: &[u8],
        in_lane_count: usize,
        output: &mut [u8],
        out_lane_count: usize,
    ) {
        debug_assert!(in_lane_count <= LANES && out_lane_count <= LANES);
        debug_assert!(input.len() >= in_lane_count * LANE_BYTES);
        debug_assert!(output.len() >= out_lane_count * LANE_BYTES);

        let mut st = self.lanes;
        match (in_lane_count, out_lane_count) {
            #[cfg(feature = "fast-1344")]
            (RATE_1344_LANES, 0) => {
                let block = &input[..RATE_1344_LANES * LANE_BYTES];
                absorb_fixed::<E, RATE_1344_LANES>(&mut st, block, 0);
            }
            #[cfg(feature = "fast-1344")]
            (0, RATE_1344_LANES) => {
                let block = &mut output[..RATE_1344_LANES * LANE_BYTES];
                squeeze_fixed::<E, RATE_1344_LANES>(&mut st, block);
            }
            _ => {
                lanes::xor_into(&mut st[..in_lane_count], &input[..in_lane_count * LANE_BYTES]);
                E::permute(&mut st);
                extract_into::<E>(&st, &mut output[..out_lane_count * LANE_BYTES]);
            }
        }
        self.lanes = st;
    }

    #[inline(always)]
    fn lane(&self, lane: usize) -> u64 {
        self.lanes[lane] ^ E::MASK[lane]
    }
}

/// Writes the logical values of the leading lanes of `st` into `out`, one lane per eight bytes.
#[inline(always)]
pub(crate) fn extract_into<E: LaneEncoding>(st: &[u64; LANES], out: &mut [u8]) {
    for ((chunk, lane), mask) in out.chunks_exact_mut(LANE_BYTES).zip(st).zip(&E::MASK) {
        lanes::store(lane ^ mask, chunk);
    }
}

#[cfg(test)]
mod tests {
    use crate::encoding::{Complemented, Plain, COMPLEMENTED_LANES};

    use super::*;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 37 + 11) as u8).collect()
    }

    fn snapshot<E: LaneEncoding>(state: &KeccakState<E>) -> [u8; STATE_BYTES] {
        let mut out = [0u8; STATE_BYTES];
        state.extract_lanes(&mut out, LANES);
        out
    }

    #[test]
    fn new_state_is_logically_zero() {
        assert_eq!([0u8; STATE_BYTES], snapshot(&KeccakState::<Plain>::new()));
        assert_eq!([0u8; STATE_BYTES], snapshot(&KeccakState::<Complemented>::new()));
    }

    #[test]
    fn complemented_lanes_are_stored_inverted() {
        let state = KeccakState::<Complemented>::new();
        for (i, &lane) in state.lanes.iter().enumerate() {
            if COMPLEMENTED_LANES.contains(&i) {
                assert_eq!(u64::MAX, lane, "lane {}", i);
            } else {
                assert_eq!(0, lane, "lane {}", i);
            }
        }
    }

    #[test]
    fn initialize_resets() {
        let mut state = KeccakState::<Complemented>::new();
        state.overwrite_lanes(&pattern(STATE_BYTES), LANES);
        state.permute();
        state.initialize();
        assert_eq!(KeccakState::new(), state);
    }

    fn bytes_in_lane<E: LaneEncoding>() {
        let mut state = KeccakState::<E>::new();
        state.xor_bytes_in_lane(2, &[0xaa, 0xbb, 0xcc], 5);
        state.xor_bytes_in_lane(2, &[0x0f], 5);
        state.xor_bytes_in_lane(2, &[], 0);

        let mut out = [0u8; 8];
        state.extract_bytes_in_lane(2, &mut out, 0);
        assert_eq!([0, 0, 0, 0, 0, 0xa5, 0xbb, 0xcc], out);

        let mut out = [0u8; 2];
        state.extract_bytes_in_lane(2, &mut out, 6);
        assert_eq!([0xbb, 0xcc], out);

        state.overwrite_bytes_in_lane(2, &[0x11, 0x22], 4);
        let mut out = [0u8; 8];
        state.extract_bytes_in_lane(2, &mut out, 0);
        assert_eq!([0, 0, 0, 0, 0x11, 0x22, 0xbb, 0xcc], out);

        let mut data = [0xff, 0xff, 0xff];
        state.extract_and_xor_bytes_in_lane(2, &mut data, 4);
        assert_eq!([0xee, 0xdd, 0x44], data);
    }

    #[test]
    fn bytes_in_lane_plain() {
        bytes_in_lane::<Plain>();
    }

    #[test]
    fn bytes_in_lane_complemented() {
        bytes_in_lane::<Complemented>();
    }

    fn overwrite_then_extract<E: LaneEncoding>() {
        for lane_count in 1..=LANES {
            let data = pattern(lane_count * LANE_BYTES);
            let mut state = KeccakState::<E>::new();
            state.permute();
            state.overwrite_lanes(&data, lane_count);

            let mut out = vec![0u8; lane_count * LANE_BYTES];
            state.extract_lanes(&mut out, lane_count);
            assert_eq!(data, out, "lane_count={}", lane_count);
        }
    }

    #[test]
    fn overwrite_then_extract_plain() {
        overwrite_then_extract::<Plain>();
    }

    #[test]
    fn overwrite_then_extract_complemented() {
        overwrite_then_extract::<Complemented>();
    }

    fn overwrite_with_zeroes<E: LaneEncoding>() {
        for byte_count in [0, 1, 7, 8, 13, 64, 199, 200] {
            let mut state = KeccakState::<E>::new();
            state.overwrite_lanes(&[0xffu8; STATE_BYTES], LANES);
            state.overwrite_with_zeroes(byte_count);

            let out = snapshot(&state);
            assert!(out[..byte_count].iter().all(|&b| b == 0), "byte_count={}", byte_count);
            assert!(out[byte_count..].iter().all(|&b| b == 0xff), "byte_count={}", byte_count);
        }
    }

    #[test]
    fn overwrite_with_zeroes_plain() {
        overwrite_with_zeroes::<Plain>();
    }

    #[test]
    fn overwrite_with_zeroes_complemented() {
        overwrite_with_zeroes::<Complemented>();
    }

    #[test]
    fn complement_bit() {
        let mut state = KeccakState::<Complemented>::new();
        state.complement_bit(0);
        state.complement_bit(64 + 9);
        state.complement_bit(1599);

        let out = snapshot(&state);
        assert_eq!(0x01, out[0]);
        assert_eq!(0x02, out[9]);
        assert_eq!(0x80, out[199]);
        assert_eq!(3, out.iter().map(|b| b.count_ones()).sum::<u32>());
    }

    #[test]
    fn xor_lanes_twice_restores() {
        let data = pattern(STATE_BYTES);
        let mut state = KeccakState::<Complemented>::new();
        state.permute();
        let original = state.clone();

        state.xor_lanes(&data, 17);
        assert_ne!(original, state);
        state.xor_lanes(&data, 17);
        assert_eq!(original, state);
    }

    #[test]
    fn extract_and_xor_lanes() {
        let data = pattern(STATE_BYTES);
        let mut state = KeccakState::<Complemented>::new();
        state.overwrite_lanes(&data, LANES);

        let mut out = data.clone();
        state.extract_and_xor_lanes(&mut out, 21);
        assert!(out[..21 * LANE_BYTES].iter().all(|&b| b == 0));
        assert_eq!(data[21 * LANE_BYTES..], out[21 * LANE_BYTES..]);
    }

    #[test]
    fn xor_permute_extract_matches_separate_calls() {
        let input = pattern(STATE_BYTES);

        let mut expected = KeccakState::<Complemented>::new();
        expected.xor_lanes(&input, 9);
        expected.permute();
        let mut expected_out = [0u8; 13 * LANE_BYTES];
        expected.extract_lanes(&mut expected_out, 13);

        let mut state = KeccakState::<Complemented>::new();
        let mut out = [0u8; 13 * LANE_BYTES];
        state.xor_permute_extract(&input, 9, &mut out, 13);

        assert_eq!(expected, state);
        assert_eq!(expected_out, out);

        let mut permuted = KeccakState::<Complemented>::new();
        permuted.permute();
        let mut state = KeccakState::<Complemented>::new();
        state.xor_permute_extract(&[], 0, &mut [], 0);
        assert_eq!(permuted, state);
    }

    fn xor_permute_extract_full_1344_blocks<E: LaneEncoding>() {
        let block_len = 21 * LANE_BYTES;
        let input = pattern(block_len);

        let mut expected = KeccakState::<E>::new();
        expected.overwrite_lanes(&pattern(STATE_BYTES), LANES);
        let mut state = expected.clone();

        expected.xor_lanes(&input, 21);
        expected.permute();
        state.xor_permute_extract(&input, 21, &mut [], 0);
        assert_eq!(expected, state);

        let mut expected_out = vec![0u8; block_len];
        expected.permute();
        expected.extract_lanes(&mut expected_out, 21);
        let mut out = vec![0u8; block_len];
        state.xor_permute_extract(&[], 0, &mut out, 21);
        assert_eq!(expected, state);
        assert_eq!(expected_out, out);
    }

    #[test]
    fn xor_permute_extract_full_1344_blocks_plain() {
        xor_permute_extract_full_1344_blocks::<Plain>();
    }

    #[test]
    fn xor_permute_extract_full_1344_blocks_complemented() {
        xor_permute_extract_full_1344_blocks::<Complemented>();
    }

    #[test]
    fn debug_hides_lanes() {
        let state = KeccakState::<Plain>::new();
        assert_eq!("KeccakState { .. }", format!("{:?}", state));
    }

    #[cfg(feature = "zeroize")]
    #[test]
    fn zeroize_leaves_initialized_state() {
        use zeroize::Zeroize;

        let mut state = KeccakState::<Complemented>::new();
        state.overwrite_lanes(&pattern(STATE_BYTES), LANES);
        state.zeroize();
        assert_eq!(KeccakState::new(), state);
    }
}
