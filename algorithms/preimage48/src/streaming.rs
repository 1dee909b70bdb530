//! Streaming Hasher
//!
//! Incremental CS48 hashing, one 96-bit block at a time, plus a lazy trace of
//! the chaining values it passes through.

use core::slice;

use log::trace;

use crate::kernels::compress::compress;
use crate::types::{ChainingValue, MessageBlock};

// =============================================================================
// PADDING
// =============================================================================

/// Whether a final length block is compressed after the message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Padding {
    /// Plain Merkle-Damgard iteration, no length block.
    #[default]
    None,
    /// Append `[count_lo, count_hi, 0, 0]`, the message length in blocks.
    Length,
}

// =============================================================================
// STREAMING HASHER
// =============================================================================

/// Streaming CS48 hasher.
#[derive(Debug, Clone)]
pub struct Cs48Hasher {
    /// Current chaining value
    state: ChainingValue,
    /// Blocks absorbed so far
    count: u64,
}

impl Cs48Hasher {
    /// Create a hasher positioned at the IV.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ChainingValue::IV,
            count: 0,
        }
    }

    /// Absorb one block.
    #[inline]
    pub fn update(&mut self, block: &MessageBlock) {
        self.state = compress(block, self.state);
        self.count += 1;
    }

    /// Absorb blocks in order.
    pub fn update_all(&mut self, blocks: &[MessageBlock]) {
        for block in blocks {
            self.update(block);
        }
    }

    /// The chaining value after the blocks absorbed so far.
    #[must_use]
    pub const fn chaining_value(&self) -> ChainingValue {
        self.state
    }

    /// Number of blocks absorbed so far.
    #[must_use]
    pub const fn block_count(&self) -> u64 {
        self.count
    }

    /// Finalize and return the digest.
    #[must_use]
    pub fn finalize(self, padding: Padding) -> ChainingValue {
        match padding {
            Padding::None => self.state,
            Padding::Length => compress(&MessageBlock::padding(self.count), self.state),
        }
    }

    /// Reset hasher for reuse.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Cs48Hasher {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TRACE
// =============================================================================

/// One observed compression step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceStep {
    /// 0-based position of the block in the message.
    pub index: usize,
    /// The block that was absorbed.
    pub block: MessageBlock,
    /// Chaining value after absorbing it (`index + 1` blocks in).
    pub value: ChainingValue,
}

/// Lazy iterator over the chaining values of a message, starting at the IV.
#[derive(Debug, Clone)]
pub struct Trace<'a> {
    blocks: slice::Iter<'a, MessageBlock>,
    hasher: Cs48Hasher,
    index: usize,
}

impl Iterator for Trace<'_> {
    type Item = TraceStep;

    fn next(&mut self) -> Option<TraceStep> {
        let block = *self.blocks.next()?;
        self.hasher.update(&block);
        let step = TraceStep {
            index: self.index,
            block,
            value: self.hasher.chaining_value(),
        };
        trace!("block {}: {} -> {}", step.index, step.block, step.value);
        self.index += 1;
        Some(step)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.blocks.size_hint()
    }
}

impl ExactSizeIterator for Trace<'_> {}

/// Trace the chaining values of `blocks`, one step per block.
#[must_use]
pub fn trace(blocks: &[MessageBlock]) -> Trace<'_> {
    Trace {
        blocks: blocks.iter(),
        hasher: Cs48Hasher::new(),
        index: 0,
    }
}

// =============================================================================
// TESTS
// =============================================================================
