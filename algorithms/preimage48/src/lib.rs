//! # preimage48
//!
//! CS48, a toy Merkle–Damgård hash with 48-bit state (Davies–Meyer over
//! Speck48/96), and a long-message second-preimage attack against it built on
//! expandable messages from compression-function fixed points.

//! # Usage
//! ```rust
//! use preimage48::{hash, target_message, Hasher, Padding};
//!
//! // 1. One-shot hashing of the first `n` blocks
//! let target = target_message(4);
//! let digest = hash(&target, 4, Padding::None);
//! assert_eq!(digest.get(), 0xC48B_8194_00B7);
//!
//! // 2. Streaming
//! let mut hasher = Hasher::new();
//! hasher.update_all(&target);
//! assert_eq!(hasher.finalize(Padding::Length), hash(&target, 4, Padding::Length));
//! ```
//!
//! The attack itself lives in [`attack`]; see [`attack::second_preimage`].

// =============================================================================
// MODULES
// =============================================================================

pub mod attack;
pub mod engine;
pub mod kernels;
mod oneshot;
mod streaming;
pub mod types;

// =============================================================================
// EXPORTS
// =============================================================================

pub use engine::search::{Budget, CancelToken, SearchConfig, SearchStats, Trials};
pub use kernels::compress::{compress, fixed_point};
pub use kernels::speck::{decrypt, encrypt, RoundKeys};
pub use oneshot::{hash, hash_message, target_message};
pub use streaming::{trace, Cs48Hasher as Hasher, Padding, Trace, TraceStep};
pub use types::{Block, ChainingValue, Key, MessageBlock, SearchError, Word};
