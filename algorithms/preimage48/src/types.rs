//! Shared types used across the preimage48 library.

use core::fmt;
use core::ops::BitXor;
use std::error;

use crate::kernels::constants::{BLOCK_MASK, IV, WORD_BITS, WORD_MASK};

// =============================================================================
// WORD
// =============================================================================

/// A 24-bit Speck48 word.
///
/// The inner value never exceeds [`WORD_MASK`]: every constructor and every
/// operation masks its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Word(u32);

impl Word {
    /// The all-zero word.
    pub const ZERO: Self = Self(0);

    /// Create a word from the low 24 bits of `value`.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value & WORD_MASK)
    }

    /// Create a word from the low 24 bits of a 64-bit value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_u64(value: u64) -> Self {
        Self((value & WORD_MASK as u64) as u32)
    }

    /// The word as a `u32` (always `< 2^24`).
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Rotate left by `n` bits within the 24-bit field (`0 < n < 24`).
    #[must_use]
    #[inline]
    pub const fn rotl(self, n: u32) -> Self {
        Self(((self.0 << n) ^ (self.0 >> (WORD_BITS - n))) & WORD_MASK)
    }

    /// Addition modulo `2^24`.
    #[must_use]
    #[inline]
    pub const fn wrapping_add(self, rhs: Self) -> Self {
        Self((self.0 + rhs.0) & WORD_MASK)
    }

    /// Subtraction modulo `2^24`.
    #[must_use]
    #[inline]
    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0) & WORD_MASK)
    }
}

impl BitXor for Word {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06X}", self.0)
    }
}

impl fmt::LowerHex for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

// =============================================================================
// CIPHER BLOCK
// =============================================================================

/// A 48-bit Speck48 plaintext or ciphertext: two words `[x, y]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Block([Word; 2]);

impl Block {
    /// The all-zero block.
    pub const ZERO: Self = Self([Word::ZERO; 2]);

    /// Create a block, masking both halves to 24 bits.
    #[must_use]
    pub const fn new(words: [u32; 2]) -> Self {
        Self([Word::new(words[0]), Word::new(words[1])])
    }

    /// Create a block from two words.
    #[must_use]
    pub const fn from_words(words: [Word; 2]) -> Self {
        Self(words)
    }

    /// The two words of the block.
    #[must_use]
    pub const fn words(self) -> [Word; 2] {
        self.0
    }
}

// =============================================================================
// MESSAGE BLOCK / KEY
// =============================================================================

/// A 96-bit message block, consumed by the compression function as the
/// Speck48/96 key `[k0, k1, k2, k3]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MessageBlock([Word; 4]);

/// A Speck48/96 key. The hash feeds message blocks straight into the key slot.
pub type Key = MessageBlock;

impl MessageBlock {
    /// The all-zero message block.
    pub const ZERO: Self = Self([Word::ZERO; 4]);

    /// Create a block, masking each word to 24 bits.
    #[must_use]
    pub const fn new(words: [u32; 4]) -> Self {
        Self([
            Word::new(words[0]),
            Word::new(words[1]),
            Word::new(words[2]),
            Word::new(words[3]),
        ])
    }

    /// Create a block from four words.
    #[must_use]
    pub const fn from_words(words: [Word; 4]) -> Self {
        Self(words)
    }

    /// Create a block carrying a 48-bit payload in its first two words; the
    /// last two words are zero.
    #[must_use]
    pub const fn from_payload(w0: Word, w1: Word) -> Self {
        Self([w0, w1, Word::ZERO, Word::ZERO])
    }

    /// Build a random candidate from a single 64-bit sample: the low 24 bits
    /// become word 0, the next 24 bits word 1.
    #[must_use]
    pub const fn from_sample(sample: u64) -> Self {
        Self::from_payload(Word::from_u64(sample), Word::from_u64(sample >> WORD_BITS))
    }

    /// The length block appended by padding: `[count_lo, count_hi, 0, 0]`,
    /// the block count being a 48-bit quantity.
    #[must_use]
    pub const fn padding(block_count: u64) -> Self {
        Self::from_payload(
            Word::from_u64(block_count),
            Word::from_u64(block_count >> WORD_BITS),
        )
    }

    /// The four words of the block.
    #[must_use]
    pub const fn words(self) -> [Word; 4] {
        self.0
    }

    /// The first two words packed as `w0 << 24 | w1`.
    #[must_use]
    pub const fn payload(self) -> u64 {
        ((self.0[0].get() as u64) << WORD_BITS) | self.0[1].get() as u64
    }
}

impl fmt::Display for MessageBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [w0, w1, w2, w3] = self.0;
        write!(f, "{w0} {w1} {w2} {w3}")
    }
}

// =============================================================================
// CHAINING VALUE
// =============================================================================

/// A 48-bit CS48 chaining value / digest.
///
/// Packed as `hi << 24 | lo` in a `u64` whose top 16 bits are always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChainingValue(u64);

impl ChainingValue {
    /// The fixed initial chaining value `0x010203040506`.
    pub const IV: Self = Self(IV);

    /// Create a chaining value from the low 48 bits of `value`.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value & BLOCK_MASK)
    }

    /// Pack two words as `hi << 24 | lo`.
    #[must_use]
    pub const fn from_halves(hi: Word, lo: Word) -> Self {
        Self(((hi.get() as u64) << WORD_BITS) | lo.get() as u64)
    }

    /// The packed value (always `< 2^48`).
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Bits 47..24.
    #[must_use]
    pub const fn hi(self) -> Word {
        Word::from_u64(self.0 >> WORD_BITS)
    }

    /// Bits 23..0.
    #[must_use]
    pub const fn lo(self) -> Word {
        Word::from_u64(self.0)
    }

    /// Big-endian digest bytes.
    #[must_use]
    pub fn to_bytes(self) -> [u8; 6] {
        let mut out = [0u8; 6];
        out.copy_from_slice(&self.0.to_be_bytes()[2..]);
        out
    }

    /// Parse big-endian digest bytes.
    #[must_use]
    pub fn from_bytes(bytes: [u8; 6]) -> Self {
        let mut wide = [0u8; 8];
        wide[2..].copy_from_slice(&bytes);
        Self(u64::from_be_bytes(wide))
    }
}

impl BitXor for ChainingValue {
    type Output = Self;

    #[inline]
    fn bitxor(self, rhs: Self) -> Self {
        Self(self.0 ^ rhs.0)
    }
}

impl fmt::Display for ChainingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:012X}", self.0)
    }
}

impl fmt::LowerHex for ChainingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Why a search or forgery did not produce a result.
///
/// The birthday searches have no notion of definitive failure; the
/// search-ending variants only say that nothing was found *so far*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// A collision table could not be allocated.
    TableAllocation {
        /// Requested slot count.
        slots: usize,
    },
    /// The cancellation token fired.
    Cancelled {
        /// Trials performed before stopping.
        trials: u64,
    },
    /// The wall-clock deadline passed.
    DeadlineExceeded {
        /// Trials performed before stopping.
        trials: u64,
    },
    /// The trial budget was spent.
    TrialsExhausted {
        /// Trials performed before stopping.
        trials: u64,
    },
    /// A target message needs at least two blocks to be attacked.
    MessageTooShort {
        /// Length of the target, in blocks.
        len: usize,
    },
    /// A collision index outside `2..=len` was handed to the forger.
    InvalidCollisionIndex {
        /// The rejected index.
        index: usize,
        /// Length of the target, in blocks.
        len: usize,
    },
}

impl SearchError {
    /// Trials spent by a search that stopped early, if any.
    #[must_use]
    pub const fn trials(&self) -> Option<u64> {
        match *self {
            Self::Cancelled { trials }
            | Self::DeadlineExceeded { trials }
            | Self::TrialsExhausted { trials } => Some(trials),
            _ => None,
        }
    }

    /// Replace the trial count of a search-ending error.
    #[must_use]
    pub(crate) const fn with_trials(self, trials: u64) -> Self {
        match self {
            Self::Cancelled { .. } => Self::Cancelled { trials },
            Self::DeadlineExceeded { .. } => Self::DeadlineExceeded { trials },
            Self::TrialsExhausted { .. } => Self::TrialsExhausted { trials },
            other => other,
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TableAllocation { slots } => {
                write!(f, "failed to allocate a collision table of {slots} slots")
            }
            Self::Cancelled { trials } => write!(f, "search cancelled after {trials} trials"),
            Self::DeadlineExceeded { trials } => {
                write!(f, "search deadline exceeded after {trials} trials")
            }
            Self::TrialsExhausted { trials } => {
                write!(f, "search budget of {trials} trials exhausted")
            }
            Self::MessageTooShort { len } => {
                write!(f, "target message of {len} blocks is too short (need at least 2)")
            }
            Self::InvalidCollisionIndex { index, len } => write!(
                f,
                "collision index {index} out of range for a {len}-block target (expected 2..={len})"
            ),
        }
    }
}

impl error::Error for SearchError {}

// =============================================================================
// TESTS
// =============================================================================
