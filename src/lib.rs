//! The Keccak-f\[1600\] permutation, lane-level access to its state, and a full-block,
//! whole-lane (FBWL) sponge/duplex driver parameterized by rate.
//!
//! This crate is a building block: it does not pick padding rules, domain separation, or output
//! lengths. Callers drive whole blocks through [`KeccakState::absorb`], [`KeccakState::squeeze`],
//! [`KeccakState::wrap`], and [`KeccakState::unwrap`], then finish any partial block with the
//! byte-granular accessors and a final [`KeccakState::permute`].
//!
//! ```
//! use keccak_fbwl::KeccakState;
//!
//! let mut state: KeccakState = KeccakState::new();
//! state.permute();
//!
//! let mut lane = [0u8; 8];
//! state.extract_lanes(&mut lane, 1);
//! assert_eq!(0xF1258F7940E1DDE7, u64::from_le_bytes(lane));
//! ```
//!
//! By default the state is held in the lane-complementing representation ([`Complemented`]),
//! which saves most of the NOTs in χ. Disable the `lane-complementing` feature, or name
//! [`Plain`] explicitly, to store every lane as-is. Either way, the accessors only ever expose
//! logical lane values.
#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![forbid(unsafe_code)]

pub use crate::encoding::{Complemented, DefaultEncoding, LaneEncoding, Plain};
pub use crate::fbwl::RATE_1344_LANES;
pub use crate::permutation::ROUNDS;
pub use crate::state::KeccakState;

pub mod encoding;
mod fbwl;
mod lanes;
mod permutation;
mod proptests;
mod state;

/// The number of 64-bit lanes in a Keccak-f\[1600\] state.
pub const LANES: usize = 25;

/// The number of bytes in a lane.
pub const LANE_BYTES: usize = 8;

/// The number of bytes in a Keccak-f\[1600\] state.
pub const STATE_BYTES: usize = LANES * LANE_BYTES;
