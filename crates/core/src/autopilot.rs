//! Headless player used by drivers and long-running tests.
//! This module exists so tools can play full runs through the public session boundary.
//! It does not bypass the input rules; every decision goes through `submit_input`.

use std::collections::{BTreeMap, VecDeque};

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;

use crate::error::SessionError;
use crate::mapgen::MapGrid;
use crate::rng::RandomSource;
use crate::session::DungeonSession;
use crate::types::*;

const WALK_DIRECTIONS: [Direction; 4] =
    [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

/// Heads for the down stairs, wandering off course `wander_percent` of the time.
#[derive(Clone, Debug)]
pub struct Autopilot {
    rng: ChaCha8Rng,
    wander_percent: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DriveReport {
    /// Accepted inputs plus stairs answers.
    pub decisions: u32,
    pub outcome: Option<RunOutcome>,
    pub level: u32,
    pub turn: u64,
}

impl Autopilot {
    pub fn new(seed: u64, wander_percent: u32) -> Self {
        Self { rng: ChaCha8Rng::seed_from_u64(seed), wander_percent: wander_percent.min(100) }
    }

    pub fn next_input(&mut self, session: &DungeonSession) -> PlayerInput {
        let wander = self.rng.range(0, 100) < self.wander_percent as i32;
        let planned = if wander {
            None
        } else {
            session.grid().down_stairs().and_then(|goal| {
                first_step_toward(session.grid(), session.player_position(), goal)
            })
        };
        match planned {
            Some(direction) => PlayerInput::Move { direction, run: false },
            None => {
                let index = self.rng.pick_index(WALK_DIRECTIONS.len()).unwrap_or(0);
                let run = self.rng.range(0, 4) == 0;
                PlayerInput::Move { direction: WALK_DIRECTIONS[index], run }
            }
        }
    }

    pub fn stairs_choice(&self, prompt: &StairsPrompt) -> StairsChoice {
        match prompt.direction {
            StairsDirection::Down => StairsChoice::Confirm,
            StairsDirection::Up => StairsChoice::Cancel,
        }
    }

    /// Plays until the run ends or `max_decisions` submissions have been made.
    pub fn drive(
        &mut self,
        session: &mut DungeonSession,
        max_decisions: u32,
    ) -> Result<DriveReport, SessionError> {
        let mut decisions = 0;
        let mut submissions = 0;
        while submissions < max_decisions {
            let batch = session.advance(1_000)?;
            match batch.stop_reason {
                AdvanceStopReason::Finished(_) => break,
                AdvanceStopReason::BudgetExhausted => {}
                AdvanceStopReason::AwaitingPresentation => {
                    session.presentation_mut().complete_all();
                }
                AdvanceStopReason::AwaitingInput => {
                    submissions += 1;
                    let input = self.next_input(session);
                    if session.submit_input(input)? == InputOutcome::Accepted {
                        decisions += 1;
                    }
                }
                AdvanceStopReason::StairsPrompt(prompt) => {
                    submissions += 1;
                    session.resolve_stairs(self.stairs_choice(&prompt))?;
                    decisions += 1;
                }
            }
        }
        Ok(DriveReport {
            decisions,
            outcome: session.outcome(),
            level: session.level(),
            turn: session.turn_count(),
        })
    }
}

/// First orthogonal step of a shortest non-wall path, or `None` when already there or cut off.
pub fn first_step_toward(grid: &MapGrid, start: Pos, goal: Pos) -> Option<Direction> {
    if start == goal {
        return None;
    }
    let mut came_from: BTreeMap<Pos, Pos> = BTreeMap::new();
    let mut open = VecDeque::from([start]);
    while let Some(current) = open.pop_front() {
        if current == goal {
            break;
        }
        for direction in WALK_DIRECTIONS {
            let next = current.offset(direction);
            if next == start || grid.chip(next).is_wall() || came_from.contains_key(&next) {
                continue;
            }
            came_from.insert(next, current);
            open.push_back(next);
        }
    }

    let mut step = goal;
    while let Some(&previous) = came_from.get(&step) {
        if previous == start {
            let (dx, dy) = (step.column - start.column, step.row - start.row);
            return Some(Direction::from_vector(dx, dy));
        }
        step = previous;
    }
    None
}
