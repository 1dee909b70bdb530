//! Public API Layer
//!
use crate::streaming::{Cs48Hasher, Padding};
use crate::types::{ChainingValue, MessageBlock};

// =============================================================================
// HASHING
// =============================================================================

/// Hash the first `block_count` blocks of `blocks` from the IV.
///
/// With [`Padding::Length`] one extra block encoding `block_count` is
/// compressed at the end.
///
/// # Panics
/// Panics if `block_count` exceeds `blocks.len()`.
///
/// # Example
/// ```rust
/// use preimage48::{hash, ChainingValue, MessageBlock, Padding};
///
/// let blocks = [MessageBlock::ZERO];
/// assert_eq!(hash(&blocks, 0, Padding::None), ChainingValue::IV);
/// assert_ne!(hash(&blocks, 1, Padding::None), hash(&blocks, 1, Padding::Length));
/// ```
#[must_use]
pub fn hash(blocks: &[MessageBlock], block_count: u64, padding: Padding) -> ChainingValue {
    let count = usize::try_from(block_count)
        .ok()
        .filter(|&n| n <= blocks.len())
        .unwrap_or_else(|| {
            panic!(
                "block count {block_count} exceeds message length {}",
                blocks.len()
            )
        });

    let mut hasher = Cs48Hasher::new();
    hasher.update_all(&blocks[..count]);
    hasher.finalize(padding)
}

/// Unpadded hash of a whole message.
#[must_use]
#[inline]
pub fn hash_message(blocks: &[MessageBlock]) -> ChainingValue {
    let mut hasher = Cs48Hasher::new();
    hasher.update_all(blocks);
    hasher.finalize(Padding::None)
}

// =============================================================================
// TARGET MESSAGE
// =============================================================================

/// The deterministic victim message: block `j` is `[4j, 0, 0, 0]`.
///
/// The first word is the offset of the block counted in words.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn target_message(len: usize) -> Vec<MessageBlock> {
    (0..len)
        .map(|j| MessageBlock::new([(j as u32).wrapping_mul(4), 0, 0, 0]))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
