//! The one canonical conversion between 64-bit lanes and their little-endian byte form.
//!
//! Every state accessor goes through these, so the host byte order never leaks into lane values.

use byteorder::{ByteOrder, LittleEndian};

use crate::LANE_BYTES;

/// Reads a whole lane from the first eight bytes of `bytes`.
#[inline(always)]
pub(crate) fn load(bytes: &[u8]) -> u64 {
    LittleEndian::read_u64(bytes)
}

/// Writes a whole lane into the first eight bytes of `bytes`.
#[inline(always)]
pub(crate) fn store(lane: u64, bytes: &mut [u8]) {
    LittleEndian::write_u64(bytes, lane);
}

/// Returns a lane holding `bytes` at byte `offset` and zeroes everywhere else.
#[inline(always)]
pub(crate) fn load_partial(bytes: &[u8], offset: usize) -> u64 {
    debug_assert!(offset + bytes.len() <= LANE_BYTES);
    let mut buf = [0u8; LANE_BYTES];
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
    load(&buf)
}

/// Copies bytes `offset..offset + out.len()` of `lane` into `out`.
#[inline(always)]
pub(crate) fn store_partial(lane: u64, out: &mut [u8], offset: usize) {
    debug_assert!(offset + out.len() <= LANE_BYTES);
    let mut buf = [0u8; LANE_BYTES];
    store(lane, &mut buf);
    out.copy_from_slice(&buf[offset..offset + out.len()]);
}

/// Returns a lane with all bits of bytes `offset..offset + len` set.
#[inline(always)]
pub(crate) fn byte_mask(offset: usize, len: usize) -> u64 {
    debug_assert!(offset + len <= LANE_BYTES);
    match len {
        0 => 0,
        LANE_BYTES => u64::MAX,
        _ => ((1u64 << (len * 8)) - 1) << (offset * 8),
    }
}

/// XORs `block.len() / 8` lanes of `block` into `lanes`.
#[inline(always)]
pub(crate) fn xor_into(lanes: &mut [u64], block: &[u8]) {
    for (lane, chunk) in lanes.iter_mut().zip(block.chunks_exact(LANE_BYTES)) {
        *lane ^= load(chunk);
    }
}
