//! Expandable Messages
//!
//! A pair `(m1, m2)` such that `compress(m1, IV)` is the fixed point of `m2`.
//! Every message `m1 || m2^k` then reaches the same chaining value, whatever
//! `k >= 0`, which lets a forger pick the length of the prefix freely.
//!
//! Found with a birthday search between chaining values reachable from the IV
//! and fixed points:
//!
//! ```text
//! phase A   2^24 random m1   table[compress(m1, IV) mod N] = m1
//! phase B   random m2        fp = fixed_point(m2); table[fp mod N] == m1 ?
//! ```

use core::num::NonZeroU64;

use log::info;
use rand::RngCore;

use crate::engine::parallel;
use crate::engine::search::{Attempt, SearchConfig, SearchStats};
use crate::engine::table::{CollisionTable, Lookup};
use crate::kernels::compress::{compress, fixed_point};
use crate::kernels::constants::{EXPANDABLE_PROGRESS, EXPANDABLE_TABLE_BITS, WORD_BITS};
use crate::types::{ChainingValue, MessageBlock, SearchError, Word};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Parameters of the expandable-message search.
#[derive(Debug, Clone)]
pub struct ExpandableConfig {
    /// `log2` of the table size; phase A also runs `2^table_bits` trials.
    pub table_bits: u32,
    /// Budget, workers and cancellation of phase B.
    pub search: SearchConfig,
}

impl Default for ExpandableConfig {
    fn default() -> Self {
        Self {
            table_bits: EXPANDABLE_TABLE_BITS,
            search: SearchConfig::default(),
        }
    }
}

// =============================================================================
// EXPANDABLE MESSAGE
// =============================================================================

/// A two-block expandable message and the chaining value it parks on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpandableMessage {
    m1: MessageBlock,
    m2: MessageBlock,
    fixed_point: ChainingValue,
}

impl ExpandableMessage {
    /// Wrap a candidate pair; use [`ExpandableMessage::verify`] to check it.
    #[must_use]
    pub fn new(m1: MessageBlock, m2: MessageBlock) -> Self {
        Self {
            m1,
            m2,
            fixed_point: fixed_point(&m2),
        }
    }

    /// The entry block, absorbed once from the IV.
    #[must_use]
    pub const fn m1(&self) -> MessageBlock {
        self.m1
    }

    /// The repeatable block.
    #[must_use]
    pub const fn m2(&self) -> MessageBlock {
        self.m2
    }

    /// Chaining value after `m1 || m2^k` for any `k`.
    #[must_use]
    pub const fn fixed_point(&self) -> ChainingValue {
        self.fixed_point
    }

    /// Whether `m1` leads from the IV onto the fixed point of `m2`.
    #[must_use]
    pub fn verify(&self) -> bool {
        compress(&self.m1, ChainingValue::IV) == self.fixed_point
            && compress(&self.m2, self.fixed_point) == self.fixed_point
    }

    /// The expansion of length `len`: `m1` followed by `len - 1` copies of `m2`.
    ///
    /// Empty for `len == 0`.
    #[must_use]
    pub fn expand(&self, len: usize) -> Vec<MessageBlock> {
        let mut blocks = Vec::with_capacity(len);
        if len > 0 {
            blocks.push(self.m1);
            blocks.resize(len, self.m2);
        }
        blocks
    }
}

// =============================================================================
// TABLE ENTRY
// =============================================================================

/// The 48-bit payload of a phase-A candidate, tagged above bit 48 so the
/// packed value is never zero and `Option<PackedBlock>` stays 8 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PackedBlock(NonZeroU64);

impl PackedBlock {
    const TAG: NonZeroU64 = NonZeroU64::MIN.saturating_add(1).saturating_pow(2 * WORD_BITS);

    fn new(block: &MessageBlock) -> Self {
        Self(Self::TAG | block.payload())
    }

    fn block(self) -> MessageBlock {
        let payload = self.0.get() & !Self::TAG.get();
        MessageBlock::from_payload(
            Word::from_u64(payload >> WORD_BITS),
            Word::from_u64(payload),
        )
    }
}

// =============================================================================
// SEARCH
// =============================================================================

/// Find an expandable message with a two-phase birthday search.
///
/// With a single worker the result is a deterministic function of `rng`.
///
/// # Errors
/// - [`SearchError::TableAllocation`] if the phase-A table cannot be allocated.
/// - [`SearchError::Cancelled`], [`SearchError::DeadlineExceeded`] or
///   [`SearchError::TrialsExhausted`] if phase B stops before a witness.
pub fn build_expandable_message<R>(
    rng: &mut R,
    config: &ExpandableConfig,
) -> Result<(ExpandableMessage, SearchStats), SearchError>
where
    R: RngCore + ?Sized,
{
    let table = populate(rng, config.table_bits)?;
    info!(
        "expandable: table of {} slots built ({} occupied, {} overwritten)",
        table.capacity(),
        table.occupied(),
        table.overwrites()
    );

    let (message, stats) = parallel::search(
        rng,
        &config.search,
        "expandable",
        EXPANDABLE_PROGRESS,
        |sample| {
            let m2 = MessageBlock::from_sample(sample);
            let fp = fixed_point(&m2);
            match table.lookup(fp, |packed| compress(&packed.block(), ChainingValue::IV) == fp) {
                Lookup::Hit(packed) => Attempt::Found(ExpandableMessage {
                    m1: packed.block(),
                    m2,
                    fixed_point: fp,
                }),
                Lookup::Mismatch => Attempt::FalsePositive,
                Lookup::Empty => Attempt::Miss,
            }
        },
    )?;

    info!(
        "expandable: m1 = {}, m2 = {} after {} trials ({} false positives)",
        message.m1, message.m2, stats.trials, stats.false_positives
    );
    Ok((message, stats))
}

/// Phase A: `2^bits` random entry blocks keyed by their chaining value.
fn populate<R>(rng: &mut R, bits: u32) -> Result<CollisionTable<PackedBlock>, SearchError>
where
    R: RngCore + ?Sized,
{
    let mut table = CollisionTable::with_bits(bits)?;
    for _ in 0..table.capacity() {
        let w0 = Word::from_u64(rng.next_u64());
        let w1 = Word::from_u64(rng.next_u64());
        let m1 = MessageBlock::from_payload(w0, w1);
        table.insert(compress(&m1, ChainingValue::IV), PackedBlock::new(&m1));
    }
    Ok(table)
}

// =============================================================================
// TESTS
// =============================================================================
