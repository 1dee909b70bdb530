//! Long-Message Second Preimage
//!
//! Given a target of `L` blocks with chaining values `h_1 .. h_L`:
//!
//! ```text
//! 1. expandable message (m1, m2), parked on fp = fixed_point(m2)
//! 2. table[h_i mod N2] = (i, h_i)          for i in 2..=L
//! 3. random cm until compress(cm, fp) == h_i for some stored i
//! 4. forged = m1 || m2^(i-2) || cm || target[i..L]
//! ```
//!
//! The forged prefix has exactly `i` blocks and ends on `h_i`, so both
//! messages share their suffix, their length and their digest.

use log::info;
use rand::RngCore;

use crate::attack::expandable::{build_expandable_message, ExpandableConfig, ExpandableMessage};
use crate::engine::parallel;
use crate::engine::search::{Attempt, SearchConfig, SearchStats};
use crate::engine::table::{CollisionTable, Lookup};
use crate::kernels::compress::compress;
use crate::kernels::constants::{BRIDGE_PROGRESS, BRIDGE_TABLE_BITS};
use crate::oneshot::hash_message;
use crate::streaming::trace;
use crate::types::{ChainingValue, MessageBlock, SearchError};

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Parameters of the full attack.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// `log2` of the table holding the target's chaining values.
    pub table_bits: u32,
    /// Expandable-message phase.
    pub expandable: ExpandableConfig,
    /// Budget, workers and cancellation of the bridge-block search.
    pub search: SearchConfig,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            table_bits: BRIDGE_TABLE_BITS,
            expandable: ExpandableConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

// =============================================================================
// RESULT TYPES
// =============================================================================

/// A block linking the expandable message's fixed point into the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bridge {
    /// The linking block `cm`.
    pub block: MessageBlock,
    /// `i` such that `compress(cm, fp)` equals the target's chaining value
    /// after its first `i` blocks.
    pub collision_index: usize,
}

/// A completed attack.
#[derive(Debug, Clone)]
pub struct SecondPreimage {
    /// The expandable message used for the prefix.
    pub expandable: ExpandableMessage,
    /// The bridge into the target.
    pub bridge: Bridge,
    /// The forged message, as long as the target.
    pub message: Vec<MessageBlock>,
    /// Counters of the bridge search.
    pub stats: SearchStats,
}

impl SecondPreimage {
    /// Unpadded digest of the forged message.
    #[must_use]
    pub fn digest(&self) -> ChainingValue {
        hash_message(&self.message)
    }

    /// Whether the forged message differs from `target` and collides with it.
    #[must_use]
    pub fn verify(&self, target: &[MessageBlock]) -> bool {
        self.message.len() == target.len()
            && self.message != target
            && hash_message(&self.message) == hash_message(target)
    }
}

// =============================================================================
// TABLE ENTRY
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ChainEntry {
    index: usize,
    value: ChainingValue,
}

// =============================================================================
// ATTACK
// =============================================================================

/// Run the full attack against `target`.
///
/// # Errors
/// - [`SearchError::MessageTooShort`] if `target` has fewer than two blocks.
/// - [`SearchError::TableAllocation`] if either table cannot be allocated.
/// - [`SearchError::Cancelled`], [`SearchError::DeadlineExceeded`] or
///   [`SearchError::TrialsExhausted`] if a search phase stops early.
pub fn second_preimage<R>(
    target: &[MessageBlock],
    rng: &mut R,
    config: &AttackConfig,
) -> Result<SecondPreimage, SearchError>
where
    R: RngCore + ?Sized,
{
    check_length(target)?;
    let (expandable, _) = build_expandable_message(rng, &config.expandable)?;
    second_preimage_with(target, &expandable, rng, config)
}

/// Run steps 2–4 with an expandable message found earlier.
///
/// # Errors
/// As [`second_preimage`], minus the expandable-message phase.
pub fn second_preimage_with<R>(
    target: &[MessageBlock],
    expandable: &ExpandableMessage,
    rng: &mut R,
    config: &AttackConfig,
) -> Result<SecondPreimage, SearchError>
where
    R: RngCore + ?Sized,
{
    let (bridge, stats) = find_bridge(target, expandable, rng, config)?;
    let message = forge(target, expandable, &bridge)?;
    Ok(SecondPreimage {
        expandable: *expandable,
        bridge,
        message,
        stats,
    })
}

/// Search a block `cm` with `compress(cm, fp)` on the target's trace.
///
/// # Errors
/// See [`second_preimage`].
pub fn find_bridge<R>(
    target: &[MessageBlock],
    expandable: &ExpandableMessage,
    rng: &mut R,
    config: &AttackConfig,
) -> Result<(Bridge, SearchStats), SearchError>
where
    R: RngCore + ?Sized,
{
    check_length(target)?;
    let table = chain_table(target, config.table_bits)?;
    info!(
        "bridge: {} chaining values of the target in {} slots ({} overwritten)",
        target.len() - 1,
        table.capacity(),
        table.overwrites()
    );

    let fp = expandable.fixed_point();
    let (bridge, stats) = parallel::search(
        rng,
        &config.search,
        "bridge",
        BRIDGE_PROGRESS,
        |sample| {
            let block = MessageBlock::from_sample(sample);
            let h = compress(&block, fp);
            match table.lookup(h, |entry| entry.value == h) {
                Lookup::Hit(entry) => Attempt::Found(Bridge {
                    block,
                    collision_index: entry.index,
                }),
                Lookup::Mismatch => Attempt::FalsePositive,
                Lookup::Empty => Attempt::Miss,
            }
        },
    )?;

    info!(
        "bridge: cm = {} hits the target after {} blocks ({} trials)",
        bridge.block, bridge.collision_index, stats.trials
    );
    Ok((bridge, stats))
}

/// Assemble `m1 || m2^(i-2) || cm || target[i..]` for collision index `i`.
///
/// # Errors
/// [`SearchError::InvalidCollisionIndex`] unless `2 <= i <= target.len()`.
pub fn forge(
    target: &[MessageBlock],
    expandable: &ExpandableMessage,
    bridge: &Bridge,
) -> Result<Vec<MessageBlock>, SearchError> {
    let index = bridge.collision_index;
    if !(2..=target.len()).contains(&index) {
        return Err(SearchError::InvalidCollisionIndex {
            index,
            len: target.len(),
        });
    }

    let mut message = expandable.expand(index - 1);
    message.reserve_exact(target.len() - message.len());
    message.push(bridge.block);
    message.extend_from_slice(&target[index..]);
    Ok(message)
}

// =============================================================================
// INTERNAL HELPERS
// =============================================================================

const fn check_length(target: &[MessageBlock]) -> Result<(), SearchError> {
    if target.len() < 2 {
        return Err(SearchError::MessageTooShort { len: target.len() });
    }
    Ok(())
}

/// Step 2: chaining values after 2..=L blocks, keyed by value.
fn chain_table(
    target: &[MessageBlock],
    bits: u32,
) -> Result<CollisionTable<ChainEntry>, SearchError> {
    let mut table = CollisionTable::with_bits(bits)?;
    // After one block the prefix would have no room for m1 and cm.
    for step in trace(target).skip(1) {
        let index = step.index + 1;
        table.insert(
            step.value,
            ChainEntry {
                index,
                value: step.value,
            },
        );
    }
    Ok(table)
}

// =============================================================================
// TESTS
// =============================================================================
