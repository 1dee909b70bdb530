//! CLI Commands
//!
//! All preimage48 CLI commands organized as separate modules.

mod attack;
mod check;
mod expand;
mod hash;

use std::time::Duration;

use clap::Args;
use preimage48::{Budget, SearchConfig};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub use attack::{attack, AttackArgs};
pub use check::check_mode;
pub use expand::{expand, ExpandArgs};
pub use hash::{hash_target, HashArgs};

// =============================================================================
// SHARED SEARCH ARGUMENTS
// =============================================================================

/// Seed and limits shared by the searching commands.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Seed of the ChaCha8 generator
    #[arg(long, default_value_t = 0x2019_A1FF)]
    seed: u64,

    /// Give up after this many trials per search phase
    #[arg(long, value_name = "N")]
    max_trials: Option<u64>,

    /// Give up after this many seconds per search phase
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Run on a single worker so the result only depends on the seed
    #[arg(long)]
    deterministic: bool,
}

impl SearchArgs {
    fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }

    fn config(&self) -> SearchConfig {
        let base = if self.deterministic {
            SearchConfig::sequential()
        } else {
            SearchConfig::default()
        };
        base.with_budget(Budget {
            max_trials: self.max_trials,
            deadline: self.timeout_secs.map(Duration::from_secs),
        })
    }
}
