//! Error taxonomy for generation, scheduling, content, configuration and sessions.

use thiserror::Error;

use crate::types::{MapChip, TurnState};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("map width {0} is below the minimum of 7")]
    WidthTooSmall(usize),
    #[error("map height {0} is below the minimum of 7")]
    HeightTooSmall(usize),
    #[error("room count must be at least 1")]
    NoRooms,
    #[error("max room size {size} must be within 3..={limit}")]
    RoomSizeOutOfRange { size: usize, limit: usize },
    #[error("generated level has no {0:?} tile")]
    MissingStairs(MapChip),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnError {
    #[error("{operation} is not legal from {state:?}")]
    IllegalTransition { operation: &'static str, state: TurnState },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContentError {
    #[error("race table is not valid TOML: {0}")]
    Parse(String),
    #[error("race table is empty")]
    Empty,
    #[error("race `{race}` requests unknown AI kind `{kind}`")]
    UnknownAiKind { race: String, kind: String },
    #[error("race `{race}` has an empty {field}")]
    EmptyField { race: String, field: &'static str },
    #[error("race `{race}` has invalid {field}: {value}")]
    InvalidStat { race: String, field: &'static str, value: i32 },
    #[error("race `{race}` spawn levels {lowest}..={highest} are not a valid range")]
    SpawnRange { race: String, lowest: u32, highest: u32 },
    #[error("race key `{0}` is defined more than once")]
    DuplicateKey(String),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("config is not valid TOML: {0}")]
    Parse(String),
    #[error("failed to read config: {0}")]
    Io(String),
    #[error(transparent)]
    Map(#[from] GenerationError),
    #[error("population max_percentage {0} must be within 0.0..=1.0")]
    MaxPercentage(f64),
    #[error("population placement_attempts must be at least 1")]
    PlacementAttempts,
    #[error("run fast_travel_step_limit must be at least 1")]
    StepLimit,
    #[error("run deepest_level must be at least 1")]
    DeepestLevel,
    #[error("player max_hit_point must be positive, got {0}")]
    PlayerHitPoint(i32),
    #[error("player {field} must not be negative, got {value}")]
    PlayerStat { field: &'static str, value: i32 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("session is in {0:?}, not waiting for player input")]
    NotAwaitingInput(TurnState),
    #[error("session is in {0:?}, not on a stairs prompt")]
    NotOnStairs(TurnState),
    #[error("presentation tasks from the previous tick are still running")]
    PresentationPending,
    #[error(transparent)]
    Turn(#[from] TurnError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
