//! CS48 Davies-Meyer Compression
//!
//! `compress(m, h) = E_m(h) ^ h`, the message block acting as the Speck key.
//!
//! The chaining value enters the cipher as `[hi, lo]` and the ciphertext is
//! repacked as `c1 << 24 | c0`. A fixed point needs the whole ciphertext to be
//! zero, so it can be read straight off the inverse cipher: `h = D_m(0)`.

use crate::kernels::speck;
use crate::types::{Block, ChainingValue, MessageBlock};

/// Compress one message block into a chaining value.
#[must_use]
#[inline]
pub fn compress(block: &MessageBlock, h: ChainingValue) -> ChainingValue {
    let [c0, c1] = speck::encrypt(block, Block::from_words([h.hi(), h.lo()])).words();
    ChainingValue::from_halves(c1, c0) ^ h
}

/// The unique chaining value that `block` maps to itself.
///
/// `compress(block, fixed_point(block)) == fixed_point(block)` for every block.
#[must_use]
#[inline]
pub fn fixed_point(block: &MessageBlock) -> ChainingValue {
    let [p0, p1] = speck::decrypt(block, Block::ZERO).words();
    ChainingValue::from_halves(p0, p1)
}

// =============================================================================
// TESTS
// =============================================================================
