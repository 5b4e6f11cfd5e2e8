use anyhow::{Result, bail};
use clap::Parser;
use dungeon_core::{
    AdvanceStopReason, Autopilot, DungeonSession, RaceCatalog, SessionConfig, StairsChoice,
};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 5_000)]
    phases: u32,
    /// Percent of turns the autopilot wanders
    #[arg(short, long, default_value_t = 60)]
    wander: u32,
}

fn choose<T: Copy>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p]
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting fuzz harness on seed {} for max {} phases...", args.seed, args.phases);
    let mut session =
        DungeonSession::new(args.seed, SessionConfig::default(), RaceCatalog::builtin())?;
    let mut pilot = Autopilot::new(args.seed, args.wander);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    let mut total_phases = 0;
    while total_phases < args.phases {
        let result = session.advance(10)?;
        total_phases += result.phases.max(1);

        match result.stop_reason {
            AdvanceStopReason::Finished(outcome) => {
                println!("Finished with outcome {:?} after {} phases", outcome, total_phases);
                break;
            }
            AdvanceStopReason::AwaitingInput => {
                let input = pilot.next_input(&session);
                session.submit_input(input)?;
            }
            AdvanceStopReason::StairsPrompt(_) => {
                // Bias to descend
                let choice = choose(
                    &mut rng,
                    &[StairsChoice::Confirm, StairsChoice::Confirm, StairsChoice::Cancel],
                );
                session.resolve_stairs(choice)?;
            }
            AdvanceStopReason::AwaitingPresentation => {
                session.presentation_mut().complete_all();
            }
            AdvanceStopReason::BudgetExhausted => {}
        }

        let grid = session.grid();
        let player = session.player();
        if player.hit_point() > player.max_hit_point() {
            bail!("Invariant failed: player HP > max HP at turn {}", session.turn_count());
        }
        if grid.chip(session.player_position()).is_wall() {
            bail!("Invariant failed: player inside wall at turn {}", session.turn_count());
        }
        for enemy in session.population().iter() {
            if enemy.status().hit_point() > enemy.status().max_hit_point() {
                bail!("Invariant failed: enemy HP > max HP at turn {}", session.turn_count());
            }
            if grid.chip(enemy.position()).is_wall() {
                bail!("Invariant failed: enemy inside wall at turn {}", session.turn_count());
            }
            if enemy.position() == session.player_position() {
                bail!("Invariant failed: enemy on player tile at turn {}", session.turn_count());
            }
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
