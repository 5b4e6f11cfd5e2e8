use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct EnemyId;
}

/// Map coordinate. `column` grows to the right, `row` grows downwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub column: i32,
    pub row: i32,
}

impl Pos {
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.vector();
        Self { column: self.column + dx, row: self.row + dy }
    }

    pub fn chebyshev(self, other: Self) -> u32 {
        self.column.abs_diff(other.column).max(self.row.abs_diff(other.row))
    }

    pub fn orthogonal_neighbors(self) -> [Self; 4] {
        [
            Self { column: self.column, row: self.row - 1 },
            Self { column: self.column + 1, row: self.row },
            Self { column: self.column, row: self.row + 1 },
            Self { column: self.column - 1, row: self.row },
        ]
    }
}

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Direction {
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// Unit step as `(column delta, row delta)`; `Up` decreases the row.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::None => (0, 0),
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (1, 1),
        }
    }

    pub fn from_vector(column_delta: i32, row_delta: i32) -> Self {
        match (column_delta.signum(), row_delta.signum()) {
            (0, -1) => Direction::Up,
            (0, 1) => Direction::Down,
            (-1, 0) => Direction::Left,
            (1, 0) => Direction::Right,
            (-1, -1) => Direction::UpLeft,
            (1, -1) => Direction::UpRight,
            (-1, 1) => Direction::DownLeft,
            (1, 1) => Direction::DownRight,
            _ => Direction::None,
        }
    }

    /// 90 degrees counter-clockwise.
    pub fn turn_left(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Left,
            Direction::Down => Direction::Right,
            Direction::Left => Direction::Down,
            Direction::Right => Direction::Up,
            Direction::UpLeft => Direction::DownLeft,
            Direction::UpRight => Direction::UpLeft,
            Direction::DownLeft => Direction::DownRight,
            Direction::DownRight => Direction::UpRight,
        }
    }

    /// 90 degrees clockwise.
    pub fn turn_right(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Right,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Right => Direction::Down,
            Direction::UpLeft => Direction::UpRight,
            Direction::UpRight => Direction::DownRight,
            Direction::DownLeft => Direction::UpLeft,
            Direction::DownRight => Direction::DownLeft,
        }
    }

    pub fn inverse(self) -> Self {
        match self {
            Direction::None => Direction::None,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::UpLeft => Direction::DownRight,
            Direction::UpRight => Direction::DownLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::DownRight => Direction::UpLeft,
        }
    }

    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::UpLeft | Direction::UpRight | Direction::DownLeft | Direction::DownRight
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MapChip {
    Wall,
    Room,
    Corridor,
    UpStairs,
    DownStairs,
}

impl MapChip {
    pub fn is_wall(self) -> bool {
        self == MapChip::Wall
    }

    pub fn is_stairs(self) -> bool {
        matches!(self, MapChip::UpStairs | MapChip::DownStairs)
    }

    /// Room tiles including the stairs placed inside rooms.
    pub fn is_room_floor(self) -> bool {
        matches!(self, MapChip::Room | MapChip::UpStairs | MapChip::DownStairs)
    }

    pub fn digit(self) -> u8 {
        match self {
            MapChip::Wall => 0,
            MapChip::Room => 1,
            MapChip::Corridor => 2,
            MapChip::UpStairs => 3,
            MapChip::DownStairs => 4,
        }
    }

    pub fn from_digit(digit: u8) -> Option<Self> {
        match digit {
            0 => Some(MapChip::Wall),
            1 => Some(MapChip::Room),
            2 => Some(MapChip::Corridor),
            3 => Some(MapChip::UpStairs),
            4 => Some(MapChip::DownStairs),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnState {
    /// Waiting for one player decision.
    PlayerIdle,
    /// Fast-travel thinking step; mutually exclusive with `PlayerIdle`.
    PlayerRun,
    PlayerAction,
    EnemyAction,
    /// Population top-up.
    EnemyPopup,
    OnStairs,
    Dead,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StairsDirection {
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Climbed the up stairs of the first level.
    Escaped,
    /// Took the down stairs of the deepest configured level.
    Cleared,
    Defeat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    Move { direction: Direction, run: bool },
    /// Strike the tile in the facing direction.
    Attack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StairsChoice {
    Confirm,
    Cancel,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StairsPrompt {
    pub direction: StairsDirection,
    pub current_level: u32,
    /// `None` when taking these stairs ends the run.
    pub destination_level: Option<u32>,
    pub destination_label: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
    Accepted,
    /// Destination was a wall; no turn consumed.
    Blocked,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AdvanceStopReason {
    AwaitingInput,
    AwaitingPresentation,
    StairsPrompt(StairsPrompt),
    Finished(RunOutcome),
    BudgetExhausted,
}

#[derive(Clone, Debug)]
pub struct AdvanceResult {
    pub phases: u32,
    pub stop_reason: AdvanceStopReason,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunStopRule {
    OnStairs,
    RoomEntrance,
    CorridorBranch,
    HostileAhead,
    CorridorExit,
    DeadEnd,
    StepLimit,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogEvent {
    LevelEntered { level: u32, up_stairs: Pos, down_stairs: Pos },
    PlayerMoved { from: Pos, to: Pos },
    PlayerAttacked { target: Option<EnemyId>, damage: i32 },
    EnemyKilled { enemy: EnemyId, reward_exp: i32, reward_gold: i32 },
    EnemySpawned { enemy: EnemyId, race: String, pos: Pos },
    PlayerDamaged { enemy: EnemyId, damage: i32, hit_point: i32 },
    RunStopped { rule: RunStopRule, pos: Pos },
    StairsReached { direction: StairsDirection, level: u32 },
    StairsCancelled { level: u32 },
    RunFinished { outcome: RunOutcome },
}
