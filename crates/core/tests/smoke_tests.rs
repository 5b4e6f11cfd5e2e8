use dungeon_core::{
    Autopilot, DungeonSession, LogEvent, RaceCatalog, RunOutcome, SessionConfig, TurnState,
};

#[test]
fn test_focused_autopilot_reaches_deeper_levels() {
    let mut session = DungeonSession::new(31, SessionConfig::default(), RaceCatalog::builtin())
        .expect("session should start");
    let report = Autopilot::new(4, 0).drive(&mut session, 3_000).expect("drive");

    let deepest_entered = session
        .log()
        .iter()
        .filter_map(|event| match event {
            LogEvent::LevelEntered { level, .. } => Some(*level),
            _ => None,
        })
        .max()
        .unwrap_or(0);
    assert!(
        deepest_entered >= 2 || report.outcome == Some(RunOutcome::Defeat),
        "pilot should descend at least once or die trying: {report:?}"
    );
}

#[test]
fn test_finished_run_stays_finished() {
    let mut config = SessionConfig::default();
    config.run.deepest_level = 1;
    let mut session =
        DungeonSession::new(2_024, config, RaceCatalog::builtin()).expect("session should start");
    let report = Autopilot::new(1, 0).drive(&mut session, 2_000).expect("drive");
    let outcome = report.outcome.expect("single level run should end");

    let again = Autopilot::new(1, 0).drive(&mut session, 10).expect("drive");
    assert_eq!(again.decisions, 0);
    assert_eq!(again.outcome, Some(outcome));
    assert_eq!(session.log().last(), Some(&LogEvent::RunFinished { outcome }));
    if outcome == RunOutcome::Defeat {
        assert_eq!(session.scheduler().state(), TurnState::Dead);
    }
}

#[test]
fn test_wandering_autopilot_survives_many_turns_without_errors() {
    for seed in [1_u64, 2, 3] {
        let mut session =
            DungeonSession::new(seed, SessionConfig::default(), RaceCatalog::builtin())
                .expect("session should start");
        let report = Autopilot::new(seed, 100).drive(&mut session, 400).expect("drive");
        assert!(report.turn >= 1);
        assert!(report.level >= 1);
        assert!(session.journal().inputs.len() as u32 == report.decisions);
    }
}

#[test]
fn test_every_builtin_race_can_spawn_somewhere() {
    let catalog = RaceCatalog::builtin();
    let deepest = SessionConfig::default().run.deepest_level;
    for level in 1..=deepest {
        assert!(!catalog.races_for_level(level).is_empty(), "level {level} has no races");
    }
}
