//! Speck48/96 and CS48 Constants
//!
//! Every width in this crate derives from the 24-bit word:
//!
//! ```text
//! word  = 24 bits
//! block = 2 words = 48 bits   (plaintext, ciphertext, chaining value)
//! key   = 4 words = 96 bits   (cipher key, hash message block)
//! ```

// =============================================================================
// WORD GEOMETRY
// =============================================================================

/// Bits in a Speck48 word.
pub const WORD_BITS: u32 = 24;

/// Mask confining a value to one word.
pub const WORD_MASK: u32 = 0x00FF_FFFF;

/// Mask confining a value to one block / chaining value.
pub const BLOCK_MASK: u64 = 0x0000_FFFF_FFFF_FFFF;

// =============================================================================
// CIPHER
// =============================================================================

/// Speck48/96 runs 23 rounds, one round key each.
pub const ROUNDS: usize = 23;

/// Right-rotation of the Speck round, expressed as a 24-bit left rotation.
pub const ALPHA: u32 = 16;

/// Left-rotation of the Speck round.
pub const BETA: u32 = 3;

// =============================================================================
// HASH
// =============================================================================

/// Initial chaining value of the CS48 Merkle-Damgard iteration.
pub const IV: u64 = 0x0102_0304_0506;

// =============================================================================
// ATTACK PARAMETERS
// =============================================================================

/// Slots in the expandable-message table (`2^24`).
pub const EXPANDABLE_TABLE_BITS: u32 = 24;

/// Slots in the target chaining-value table (`2^21`).
///
/// Eight slots per stored chaining value keeps overwrites rare.
pub const BRIDGE_TABLE_BITS: u32 = 21;

/// Length of the demonstration target message, in blocks (`2^18`).
pub const TARGET_BLOCKS: usize = 1 << 18;

/// Expandable-message trials between progress reports.
pub const EXPANDABLE_PROGRESS: u64 = 1 << 23;

/// Bridge-block trials between progress reports.
pub const BRIDGE_PROGRESS: u64 = 1 << 27;
