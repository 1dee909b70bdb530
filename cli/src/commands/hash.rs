//! Hash Command
//!
//! Digest (and optionally the full chaining trace) of the target message.

use anyhow::Result;
use clap::Args;
use preimage48::kernels::constants::TARGET_BLOCKS;
use preimage48::{hash, target_message, trace, Padding};

/// Arguments of `preimage48 hash`.
#[derive(Args, Debug)]
pub struct HashArgs {
    /// Number of target blocks to hash
    #[arg(long, default_value_t = TARGET_BLOCKS)]
    blocks: usize,

    /// Append the length block
    #[arg(long)]
    padding: bool,

    /// Print the chaining value after every block
    #[arg(long)]
    trace: bool,
}

/// Hash the first `--blocks` blocks of the target message.
pub fn hash_target(args: &HashArgs) -> Result<()> {
    let target = target_message(args.blocks);
    if args.trace {
        for step in trace(&target) {
            println!("{:>8}  {}  {}", step.index + 1, step.block, step.value);
        }
    }

    let padding = if args.padding {
        Padding::Length
    } else {
        Padding::None
    };
    let digest = hash(&target, target.len() as u64, padding);
    println!("{}  target[{}]", hex::encode(digest.to_bytes()), args.blocks);
    Ok(())
}
