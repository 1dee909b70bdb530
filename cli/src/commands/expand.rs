//! Expand Command
//!
//! Search and print an expandable message.

use anyhow::{bail, Context, Result};
use clap::Args;
use preimage48::attack::{build_expandable_message, ExpandableConfig};
use preimage48::kernels::constants::EXPANDABLE_TABLE_BITS;

use super::SearchArgs;

/// Arguments of `preimage48 expand`.
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// log2 of the phase-A table
    #[arg(long, default_value_t = EXPANDABLE_TABLE_BITS)]
    table_bits: u32,

    #[command(flatten)]
    search: SearchArgs,
}

/// Build an expandable message and check it before printing.
pub fn expand(args: &ExpandArgs) -> Result<()> {
    let mut rng = args.search.rng();
    let config = ExpandableConfig {
        table_bits: args.table_bits,
        search: args.search.config(),
    };

    let (em, stats) =
        build_expandable_message(&mut rng, &config).context("Expandable message search failed")?;
    if !em.verify() {
        bail!("Search returned a pair that is not expandable");
    }

    println!("m1          {}", em.m1());
    println!("m2          {}", em.m2());
    println!("fixed point {}", em.fixed_point());
    println!(
        "trials      {} ({} false positives)",
        stats.trials, stats.false_positives
    );
    Ok(())
}
