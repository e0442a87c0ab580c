#![cfg(test)]

use proptest::collection::vec;
use proptest::prelude::*;

use crate::encoding::{Complemented, LaneEncoding, Plain};
use crate::{KeccakState, LANES, LANE_BYTES, RATE_1344_LANES, STATE_BYTES};

/// An operation on a Keccak state.
#[derive(Clone, Debug, PartialEq)]
enum StateOp {
    XorBytesInLane {
        lane: usize,
        offset: usize,
        data: Vec<u8>,
    },
    XorLanes(Vec<u8>),
    OverwriteBytesInLane {
        lane: usize,
        offset: usize,
        data: Vec<u8>,
    },
    OverwriteLanes(Vec<u8>),
    OverwriteWithZeroes(usize),
    ComplementBit(usize),
    Permute,
    Absorb {
        lane_count: usize,
        data: Vec<u8>,
        trailing_bits: u8,
    },
    Squeeze {
        lane_count: usize,
        len: usize,
    },
    Wrap {
        lane_count: usize,
        data: Vec<u8>,
        trailing_bits: u8,
    },
    Unwrap {
        lane_count: usize,
        data: Vec<u8>,
        trailing_bits: u8,
    },
}

/// An observable output of a Keccak state operation.
#[derive(Clone, Debug, PartialEq)]
enum StateOutput {
    Count(usize),
    Bytes(Vec<u8>),
}

/// Applies the operations to a fresh state and returns every output, followed by the complete
/// logical state and a handful of partial reads.
fn apply_transcript<E: LaneEncoding>(ops: &[StateOp]) -> Vec<StateOutput> {
    let mut state = KeccakState::<E>::new();
    let mut outputs: Vec<StateOutput> = ops
        .iter()
        .flat_map(|op| match op {
            StateOp::XorBytesInLane { lane, offset, data } => {
                state.xor_bytes_in_lane(*lane, data, *offset);
                vec![]
            }
            StateOp::XorLanes(data) => {
                state.xor_lanes(data, data.len() / LANE_BYTES);
                vec![]
            }
            StateOp::OverwriteBytesInLane { lane, offset, data } => {
                state.overwrite_bytes_in_lane(*lane, data, *offset);
                vec![]
            }
            StateOp::OverwriteLanes(data) => {
                state.overwrite_lanes(data, data.len() / LANE_BYTES);
                vec![]
            }
            StateOp::OverwriteWithZeroes(n) => {
                state.overwrite_with_zeroes(*n);
                vec![]
            }
            StateOp::ComplementBit(position) => {
                state.complement_bit(*position);
                vec![]
            }
            StateOp::Permute => {
                state.permute();
                vec![]
            }
            StateOp::Absorb { lane_count, data, trailing_bits } => {
                vec![StateOutput::Count(state.absorb(*lane_count, data, *trailing_bits))]
            }
            StateOp::Squeeze { lane_count, len } => {
                let mut out = vec![0u8; *len];
                let n = state.squeeze(*lane_count, &mut out);
                vec![StateOutput::Count(n), StateOutput::Bytes(out)]
            }
            StateOp::Wrap { lane_count, data, trailing_bits } => {
                let mut out = vec![0u8; data.len()];
                let n = state.wrap(*lane_count, data, &mut out, *trailing_bits);
                vec![StateOutput::Count(n), StateOutput::Bytes(out)]
            }
            StateOp::Unwrap { lane_count, data, trailing_bits } => {
                let mut out = vec![0u8; data.len()];
                let n = state.unwrap(*lane_count, data, &mut out, *trailing_bits);
                vec![StateOutput::Count(n), StateOutput::Bytes(out)]
            }
        })
        .collect();

    let mut lanes = vec![0u8; STATE_BYTES];
    state.extract_lanes(&mut lanes, LANES);
    outputs.push(StateOutput::Bytes(lanes));

    for lane in [0, 1, 8, 20, 24] {
        let mut out = vec![0u8; 5];
        state.extract_bytes_in_lane(lane, &mut out, 3);
        outputs.push(StateOutput::Bytes(out));

        let mut data = vec![0x5au8; 3];
        state.extract_and_xor_bytes_in_lane(lane, &mut data, 2);
        outputs.push(StateOutput::Bytes(data));
    }

    let mut data = vec![0xa5u8; 17 * LANE_BYTES];
    state.extract_and_xor_lanes(&mut data, 17);
    outputs.push(StateOutput::Bytes(data));

    outputs
}

/// A lane count in 1..=25.
fn arb_lane_count() -> impl Strategy<Value = usize> {
    1..=LANES
}

/// A lane index, a byte offset within the lane, and 0..=8-offset bytes.
fn arb_bytes_in_lane() -> impl Strategy<Value = (usize, usize, Vec<u8>)> {
    (0..LANES, 0..=LANE_BYTES).prop_flat_map(|(lane, offset)| {
        (Just(lane), Just(offset), vec(any::<u8>(), 0..=LANE_BYTES - offset))
    })
}

/// 0..=25 whole lanes of bytes.
fn arb_lanes() -> impl Strategy<Value = Vec<u8>> {
    (0..=LANES).prop_flat_map(|n| vec(any::<u8>(), n * LANE_BYTES))
}

/// An arbitrary state operation.
fn arb_op() -> impl Strategy<Value = StateOp> {
    prop_oneof![
        arb_bytes_in_lane()
            .prop_map(|(lane, offset, data)| StateOp::XorBytesInLane { lane, offset, data }),
        arb_lanes().prop_map(StateOp::XorLanes),
        arb_bytes_in_lane()
            .prop_map(|(lane, offset, data)| StateOp::OverwriteBytesInLane { lane, offset, data }),
        arb_lanes().prop_map(StateOp::OverwriteLanes),
        (0..=STATE_BYTES).prop_map(StateOp::OverwriteWithZeroes),
        (0..STATE_BYTES * 8).prop_map(StateOp::ComplementBit),
        Just(StateOp::Permute),
        (arb_lane_count(), vec(any::<u8>(), 0..600), any::<u8>()).prop_map(
            |(lane_count, data, trailing_bits)| StateOp::Absorb { lane_count, data, trailing_bits }
        ),
        (arb_lane_count(), 0usize..600)
            .prop_map(|(lane_count, len)| StateOp::Squeeze { lane_count, len }),
        (arb_lane_count(), vec(any::<u8>(), 0..600), any::<u8>(), any::<bool>()).prop_map(
            |(lane_count, data, trailing_bits, inverse)| if inverse {
                StateOp::Unwrap { lane_count, data, trailing_bits }
            } else {
                StateOp::Wrap { lane_count, data, trailing_bits }
            }
        ),
    ]
}

/// Builds a state from 200 arbitrary bytes.
fn arb_state<E: LaneEncoding>() -> impl Strategy<Value = KeccakState<E>> {
    vec(any::<u8>(), STATE_BYTES).prop_map(|bytes| {
        let mut state = KeccakState::<E>::new();
        state.overwrite_lanes(&bytes, LANES);
        state
    })
}

proptest! {
    /// Nothing outside the state can tell which lane encoding it uses.
    #[test]
    fn encodings_are_indistinguishable(ops in vec(arb_op(), 0..32)) {
        prop_assert_eq!(apply_transcript::<Plain>(&ops), apply_transcript::<Complemented>(&ops));
    }

    /// Overwriting lanes and extracting them returns the same bytes.
    #[test]
    fn overwrite_extract_round_trip(
        mut state in arb_state::<Complemented>(),
        lane_count in arb_lane_count(),
        data in vec(any::<u8>(), STATE_BYTES),
    ) {
        let data = &data[..lane_count * LANE_BYTES];
        state.overwrite_lanes(data, lane_count);
        let mut out = vec![0u8; lane_count * LANE_BYTES];
        state.extract_lanes(&mut out, lane_count);
        prop_assert_eq!(data, &out[..]);
    }

    /// XORing the same lanes twice is a no-op.
    #[test]
    fn xor_lanes_is_an_involution(
        mut state in arb_state::<Complemented>(),
        lane_count in arb_lane_count(),
        data in vec(any::<u8>(), STATE_BYTES),
    ) {
        let original = state.clone();
        state.xor_lanes(&data, lane_count);
        state.xor_lanes(&data, lane_count);
        prop_assert_eq!(original, state);
    }

    /// The block driver handles exactly the whole blocks and permutes once per block.
    #[test]
    fn block_driver_counts(
        state in arb_state::<Complemented>(),
        lane_count in arb_lane_count(),
        data in vec(any::<u8>(), 0..1000),
        trailing_bits in any::<u8>(),
    ) {
        let block_len = lane_count * LANE_BYTES;
        let whole = (data.len() / block_len) * block_len;

        let mut expected = state.clone();
        for block in data.chunks_exact(block_len) {
            expected.xor_lanes(block, lane_count);
            if lane_count < LANES {
                expected.xor_bytes_in_lane(lane_count, &[trailing_bits], 0);
            }
            expected.permute();
        }

        let mut absorbed = state.clone();
        prop_assert_eq!(whole, absorbed.absorb(lane_count, &data, trailing_bits));
        prop_assert_eq!(&expected, &absorbed);

        let mut out = vec![0u8; data.len()];
        let mut wrapped = state.clone();
        prop_assert_eq!(whole, wrapped.wrap(lane_count, &data, &mut out, trailing_bits));

        let mut unwrapped = state.clone();
        let mut recovered = vec![0u8; data.len()];
        prop_assert_eq!(whole, unwrapped.unwrap(lane_count, &out, &mut recovered, trailing_bits));
        prop_assert_eq!(&wrapped, &unwrapped);

        let mut squeezed = state.clone();
        let mut permuted = state;
        prop_assert_eq!(whole, squeezed.squeeze(lane_count, &mut out));
        for _ in 0..whole / block_len {
            permuted.permute();
        }
        prop_assert_eq!(permuted, squeezed);
    }

    /// Unwrapping wrapped data recovers it and leaves both states equal.
    #[test]
    fn unwrap_inverts_wrap(
        state in arb_state::<Complemented>(),
        lane_count in arb_lane_count(),
        blocks in 0usize..5,
        seed in vec(any::<u8>(), STATE_BYTES * 5),
        trailing_bits in any::<u8>(),
    ) {
        let plaintext = &seed[..blocks * lane_count * LANE_BYTES];

        let mut sender = state.clone();
        let mut ciphertext = vec![0u8; plaintext.len()];
        sender.wrap(lane_count, plaintext, &mut ciphertext, trailing_bits);

        let mut receiver = state;
        let mut recovered = vec![0u8; ciphertext.len()];
        receiver.unwrap(lane_count, &ciphertext, &mut recovered, trailing_bits);

        prop_assert_eq!(plaintext, &recovered[..]);
        prop_assert_eq!(sender, receiver);
    }

    /// The 1344-bit fast path agrees with the generic driver.
    #[test]
    fn fast_path_agrees(
        state in arb_state::<Plain>(),
        data in vec(any::<u8>(), 0..2000),
        trailing_bits in any::<u8>(),
        squeeze_len in 0usize..1000,
    ) {
        let mut generic = state.clone();
        let mut fast = state;
        prop_assert_eq!(
            generic.absorb_generic(RATE_1344_LANES, &data, trailing_bits),
            fast.absorb_1344(&data, trailing_bits)
        );
        prop_assert_eq!(&generic, &fast);

        let mut generic_out = vec![0u8; squeeze_len];
        let mut fast_out = vec![0u8; squeeze_len];
        prop_assert_eq!(
            generic.squeeze_generic(RATE_1344_LANES, &mut generic_out),
            fast.squeeze_1344(&mut fast_out)
        );
        prop_assert_eq!(generic_out, fast_out);
        prop_assert_eq!(generic, fast);
    }
}
