//! Enemy decision making.
//! This module exists to turn an enemy's AI state into a desired destination each turn.
//! It does not validate or commit moves; the population manager does that.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::content::AiKind;
use crate::mapgen::MapGrid;
use crate::movement::{can_enter, is_engaged};
use crate::rng::RandomSource;
use crate::types::{Direction, Pos};

const PATROL_CANDIDATES: [Direction; 4] =
    [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiState {
    /// Walks a straight line and turns around at walls.
    BackAndForth { heading: Direction },
    Stationary,
}

impl AiState {
    pub fn for_kind(kind: AiKind) -> Self {
        match kind {
            AiKind::BackAndForth => AiState::BackAndForth { heading: Direction::None },
            AiKind::Stationary => AiState::Stationary,
        }
    }
}

/// Desired destination for this turn. Returning the player's tile means "attack".
pub fn think(
    state: &mut AiState,
    grid: &MapGrid,
    position: Pos,
    player_position: Pos,
    rng: &mut impl RandomSource,
) -> Pos {
    if is_engaged(position, player_position) {
        return player_position;
    }
    match state {
        AiState::Stationary => position,
        AiState::BackAndForth { heading } => {
            if *heading == Direction::None {
                let open: Vec<Direction> = PATROL_CANDIDATES
                    .into_iter()
                    .filter(|&direction| can_enter(grid, position.offset(direction)))
                    .collect();
                let Some(index) = rng.pick_index(open.len()) else {
                    warn!(?position, "patrolling enemy is boxed in");
                    return position;
                };
                *heading = open[index];
            }
            if !can_enter(grid, position.offset(*heading)) {
                *heading = heading.inverse();
            }
            position.offset(*heading)
        }
    }
}
