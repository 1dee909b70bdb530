//! Attack Command
//!
//! Full long-message second preimage of the target message.

use anyhow::{bail, Context, Result};
use clap::Args;
use log::info;
use preimage48::attack::{second_preimage, AttackConfig, ExpandableConfig};
use preimage48::kernels::constants::{BRIDGE_TABLE_BITS, EXPANDABLE_TABLE_BITS, TARGET_BLOCKS};
use preimage48::{hash, hash_message, target_message, MessageBlock, Padding};

use super::SearchArgs;

/// Blocks of each message shown side by side.
const SHOWN: usize = 8;

/// Arguments of `preimage48 attack`.
#[derive(Args, Debug)]
pub struct AttackArgs {
    /// Length of the target message in blocks
    #[arg(long, default_value_t = TARGET_BLOCKS)]
    blocks: usize,

    /// log2 of the expandable-message table
    #[arg(long, default_value_t = EXPANDABLE_TABLE_BITS)]
    table_bits: u32,

    /// log2 of the table of target chaining values
    #[arg(long, default_value_t = BRIDGE_TABLE_BITS)]
    bridge_table_bits: u32,

    #[command(flatten)]
    search: SearchArgs,
}

/// Run the attack, print both messages' heads and digests, verify them.
pub fn attack(args: &AttackArgs) -> Result<()> {
    let target = target_message(args.blocks);
    let mut rng = args.search.rng();
    let search = args.search.config();
    let config = AttackConfig {
        table_bits: args.bridge_table_bits,
        expandable: ExpandableConfig {
            table_bits: args.table_bits,
            search: search.clone(),
        },
        search,
    };

    info!("attacking a target of {} blocks", target.len());
    let result = second_preimage(&target, &mut rng, &config).context("Attack failed")?;

    println!("m1              {}", result.expandable.m1());
    println!("m2              {}", result.expandable.m2());
    println!("fixed point     {}", result.expandable.fixed_point());
    println!("bridge          {}", result.bridge.block);
    println!("collision index {}", result.bridge.collision_index);
    println!("bridge trials   {}", result.stats.trials);
    println!();
    print_heads(&target, &result.message);
    println!();

    let len = target.len() as u64;
    let digests = [
        ("target", hash_message(&target), hash(&target, len, Padding::Length)),
        ("forged", result.digest(), hash(&result.message, len, Padding::Length)),
    ];
    for (name, plain, padded) in digests {
        println!("{name}  {plain}  (padded {padded})");
    }

    if !result.verify(&target) {
        bail!("Forged message does not collide with the target");
    }
    println!("OK: second preimage verified");
    Ok(())
}

fn print_heads(target: &[MessageBlock], forged: &[MessageBlock]) {
    println!("{:>6}  {:<27}  {:<27}", "block", "target", "forged");
    for (i, (t, f)) in target.iter().zip(forged).take(SHOWN).enumerate() {
        println!("{i:>6}  {t}  {f}");
    }
}
