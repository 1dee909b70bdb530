//! preimage48 CLI
//!
//! Hashes the target message and runs the expandable-message and
//! second-preimage searches against CS48.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{attack, check_mode, expand, hash_target, AttackArgs, ExpandArgs, HashArgs};

// =============================================================================
// CLI DEFINITION
// =============================================================================

#[derive(Parser)]
#[command(name = "preimage48")]
#[command(about = "Second preimages for the 48-bit CS48 hash", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Worker threads for the searches (default: one per core)
    #[arg(long, global = true, value_name = "N")]
    threads: Option<usize>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hash a prefix of the target message
    Hash(HashArgs),
    /// Search an expandable message
    Expand(ExpandArgs),
    /// Forge a second preimage of the target message
    Attack(AttackArgs),
    /// Run the known-answer self tests
    Check,
}

// =============================================================================
// ENTRY POINT
// =============================================================================

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if let Some(threads) = cli.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("Failed to configure the worker pool")?;
    }

    match &cli.command {
        Commands::Hash(args) => hash_target(args)?,
        Commands::Expand(args) => expand(args)?,
        Commands::Attack(args) => attack(args)?,
        Commands::Check => check_mode()?,
    }

    Ok(())
}
