//! Stairs prompt and level transitions.

use super::*;
use crate::journal::InputPayload;

impl DungeonSession {
    pub fn stairs_prompt(&self) -> StairsPrompt {
        let direction = if self.grid.chip(self.player_position) == MapChip::UpStairs {
            StairsDirection::Up
        } else {
            StairsDirection::Down
        };
        let destination_level = self.destination_level(direction);
        let destination_label = match (direction, destination_level) {
            (_, Some(level)) => format!("Level {level}"),
            (StairsDirection::Up, None) => "Leave the dungeon".to_string(),
            (StairsDirection::Down, None) => "Claim the depths".to_string(),
        };
        StairsPrompt { direction, current_level: self.level, destination_level, destination_label }
    }

    fn destination_level(&self, direction: StairsDirection) -> Option<u32> {
        match direction {
            StairsDirection::Up if self.level > 1 => Some(self.level - 1),
            StairsDirection::Down if self.level < self.config.run.deepest_level => {
                Some(self.level + 1)
            }
            _ => None,
        }
    }

    /// Answers the stairs prompt. Cancelling hands the turn to the enemies.
    pub fn resolve_stairs(&mut self, choice: StairsChoice) -> Result<(), SessionError> {
        let state = self.scheduler.state();
        if state != TurnState::OnStairs || self.outcome.is_some() {
            return Err(SessionError::NotOnStairs(state));
        }
        self.journal.append(self.scheduler.turn_count(), InputPayload::Stairs(choice));

        match choice {
            StairsChoice::Cancel => {
                self.log.push(LogEvent::StairsCancelled { level: self.level });
                self.scheduler.advance();
            }
            StairsChoice::Confirm => {
                let prompt = self.stairs_prompt();
                match (prompt.direction, prompt.destination_level) {
                    (direction, Some(level)) => self.enter_level(level, direction)?,
                    (StairsDirection::Up, None) => self.finish(RunOutcome::Escaped),
                    (StairsDirection::Down, None) => self.finish(RunOutcome::Cleared),
                }
            }
        }
        Ok(())
    }
}
