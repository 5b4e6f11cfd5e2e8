use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use dungeon_core::{InputJournal, ReplayResult, replay_inputs, replay_to_end};
use dungeon_tools::{init_tracing, load_catalog, load_config};
use serde_json::json;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the journal JSON file to replay
    #[arg(short, long)]
    journal: PathBuf,
    /// Session config TOML the run was recorded with
    #[arg(long)]
    config: Option<PathBuf>,
    /// Enemy race table TOML the run was recorded with
    #[arg(long)]
    races: Option<PathBuf>,
    /// Accept journals that stop before the run ends
    #[arg(long)]
    partial: bool,
    /// Print the result as one JSON object
    #[arg(long)]
    json: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let journal = InputJournal::load(&args.journal)
        .with_context(|| format!("Failed to read journal file: {}", args.journal.display()))?;
    let config = load_config(args.config.as_deref())?;
    let catalog = load_catalog(args.races.as_deref())?;

    let result: ReplayResult = if args.partial {
        replay_inputs(&config, &catalog, &journal)
    } else {
        replay_to_end(&config, &catalog, &journal)
    }
    .context("Replay failed during execution")?;

    if args.json {
        let summary = json!({
            "seed": journal.seed,
            "inputs": journal.inputs.len(),
            "final_turn": result.final_turn,
            "final_level": result.final_level,
            "outcome": result.outcome,
            "snapshot_hash": result.snapshot_hash,
        });
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Replay complete.");
    println!("Inputs: {}", journal.inputs.len());
    println!("Final Turn: {}", result.final_turn);
    println!("Final Level: {}", result.final_level);
    println!("Outcome: {:?}", result.outcome);
    println!("Snapshot Hash: {}", result.snapshot_hash);

    Ok(())
}
