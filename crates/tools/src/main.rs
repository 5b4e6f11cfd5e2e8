use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use dungeon_core::{Autopilot, DungeonSession};
use dungeon_tools::{init_tracing, load_catalog, load_config};
use tracing::info;

/// Plays a dungeon run headlessly with the autopilot
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Maximum inputs and stairs answers the autopilot may submit
    #[arg(short, long, default_value_t = 2_000)]
    decisions: u32,
    /// Percent of turns the autopilot wanders instead of heading downstairs
    #[arg(short, long, default_value_t = 20)]
    wander: u32,
    /// Session config TOML; defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Enemy race table TOML; the built-in races apply when omitted
    #[arg(long)]
    races: Option<PathBuf>,
    /// Where to write the input journal of the run
    #[arg(long)]
    journal_out: Option<PathBuf>,
    /// Print the final level as digit rows
    #[arg(long)]
    dump_map: bool,
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(args.config.as_deref())?;
    let catalog = load_catalog(args.races.as_deref())?;
    let mut session =
        DungeonSession::new(args.seed, config, catalog).context("Failed to start session")?;
    info!(seed = args.seed, decisions = args.decisions, "autopilot starting");

    let report = Autopilot::new(args.seed, args.wander)
        .drive(&mut session, args.decisions)
        .context("Autopilot drive failed")?;

    println!("Simulation complete.");
    println!("Decisions: {}", report.decisions);
    println!("Level: {}", report.level);
    println!("Turn: {}", report.turn);
    println!("Outcome: {:?}", report.outcome);
    let player = session.player();
    println!("HP: {}/{}", player.hit_point(), player.max_hit_point());
    println!("Exp: {}  Gold: {}", player.exp(), player.gold());
    println!("Snapshot Hash: {}", session.snapshot_hash());

    if args.dump_map {
        print!("{}", session.grid().dump());
    }
    if let Some(path) = &args.journal_out {
        session
            .journal()
            .write_atomic(path)
            .with_context(|| format!("Failed to write journal file: {}", path.display()))?;
        println!("Journal written to {}", path.display());
    }

    Ok(())
}
