use std::collections::BTreeSet;

use dungeon_core::{
    AdvanceStopReason, Autopilot, DungeonSession, InputOutcome, RaceCatalog, SessionConfig,
};
use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};

fn violation(what: &str, map_seed: u64) -> String {
    format!("Invariant failed: {what} on map_seed {map_seed}")
}

fn run_fuzz_simulation(map_seed: u64, pilot_seed: u64, max_phases: u32) -> Result<(), String> {
    let config = SessionConfig::default();
    let deepest = config.run.deepest_level;
    let mut session = DungeonSession::new(map_seed, config, RaceCatalog::builtin())
        .map_err(|err| format!("session failed on map_seed {map_seed}: {err}"))?;
    let mut pilot = Autopilot::new(pilot_seed, 35);

    let mut total_phases = 0;
    let mut last_turn = session.turn_count();
    while total_phases < max_phases {
        let result = session.advance(10).map_err(|err| format!("advance failed: {err}"))?;
        total_phases += result.phases.max(1);

        match result.stop_reason {
            AdvanceStopReason::Finished(_) => break,
            AdvanceStopReason::BudgetExhausted => {}
            AdvanceStopReason::AwaitingPresentation => {
                session.presentation_mut().complete_all();
            }
            AdvanceStopReason::AwaitingInput => {
                let input = pilot.next_input(&session);
                let before = session.turn_count();
                let outcome = session
                    .submit_input(input)
                    .map_err(|err| format!("input rejected at turn {before}: {err}"))?;
                if outcome == InputOutcome::Blocked && session.turn_count() != before {
                    return Err(violation("blocked input spent a turn", map_seed));
                }
            }
            AdvanceStopReason::StairsPrompt(prompt) => {
                if prompt.current_level != session.level() {
                    return Err(violation("stale stairs prompt", map_seed));
                }
                session
                    .resolve_stairs(pilot.stairs_choice(&prompt))
                    .map_err(|err| format!("stairs answer rejected: {err}"))?;
            }
        }

        let grid = session.grid();
        let player = session.player();
        if player.hit_point() > player.max_hit_point() || player.hit_point() < 0 {
            return Err(violation("player HP out of range", map_seed));
        }
        if grid.chip(session.player_position()).is_wall() {
            return Err(violation("player inside wall", map_seed));
        }
        if !(1..=deepest).contains(&session.level()) {
            return Err(format!("Invariant failed: level {} out of range", session.level()));
        }
        if session.turn_count() < last_turn {
            return Err(violation("turn counter moved backwards", map_seed));
        }
        last_turn = session.turn_count();

        let mut occupied = BTreeSet::from([session.player_position()]);
        for enemy in session.population().iter() {
            let status = enemy.status();
            if status.hit_point() > status.max_hit_point() || !status.is_alive() {
                return Err(violation("enemy HP out of range", map_seed));
            }
            if grid.chip(enemy.position()).is_wall() {
                return Err(violation("enemy inside wall", map_seed));
            }
            if !occupied.insert(enemy.position()) {
                return Err(violation("two actors share a tile", map_seed));
            }
        }
    }

    Ok(())
}

#[test]
fn test_fuzz_session_simulation() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(20));
    let seeds = (any::<u64>(), any::<u64>());

    runner
        .run(&seeds, |(map_seed, pilot_seed)| {
            run_fuzz_simulation(map_seed, pilot_seed, 3_000).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("semantic fuzz simulation should preserve invariants");
}
