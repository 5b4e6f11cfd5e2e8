//! Player input boundary.

use super::*;
use crate::journal::InputPayload;
use crate::movement::{can_enter, compute_destination, is_occupied};

impl DungeonSession {
    /// Accepts one decision while the session waits in `PlayerIdle` with a settled queue.
    pub fn submit_input(&mut self, input: PlayerInput) -> Result<InputOutcome, SessionError> {
        let state = self.scheduler.state();
        if state != TurnState::PlayerIdle || self.outcome.is_some() {
            return Err(SessionError::NotAwaitingInput(state));
        }
        if !self.presentation.is_settled() {
            return Err(SessionError::PresentationPending);
        }

        let (action, run) = match input {
            PlayerInput::Move { direction, run } => {
                let destination = compute_destination(self.player_position, direction);
                if direction == Direction::None || !can_enter(&self.grid, destination) {
                    return Ok(InputOutcome::Blocked);
                }
                self.facing = direction;
                match is_occupied(&self.occupancy(), destination) {
                    Some(Occupant::Enemy(enemy)) => {
                        (QueuedAction::Attack { at: destination, target: Some(enemy) }, false)
                    }
                    _ => (QueuedAction::Move { to: destination }, run),
                }
            }
            PlayerInput::Attack => {
                let at = compute_destination(self.player_position, self.facing);
                let target = match is_occupied(&self.occupancy(), at) {
                    Some(Occupant::Enemy(enemy)) => Some(enemy),
                    _ => None,
                };
                (QueuedAction::Attack { at, target }, false)
            }
        };

        self.journal.append(self.scheduler.turn_count(), InputPayload::Player(input));
        self.queued = Some(action);
        self.run_steps = 0;
        self.scheduler.set_run(run);
        self.scheduler.advance();
        Ok(InputOutcome::Accepted)
    }
}
