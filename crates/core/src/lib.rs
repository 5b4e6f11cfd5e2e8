pub mod ai;
pub mod autopilot;
pub mod config;
pub mod content;
pub mod error;
pub mod journal;
pub mod mapgen;
pub mod movement;
pub mod population;
pub mod presentation;
pub mod replay;
pub mod rng;
pub mod session;
pub mod status;
pub mod turn;
pub mod types;

#[cfg(test)]
mod test_support;

pub use autopilot::{Autopilot, DriveReport};
pub use config::SessionConfig;
pub use content::{AiKind, EnemyRace, RaceCatalog};
pub use error::{ConfigError, ContentError, GenerationError, SessionError, TurnError};
pub use journal::{InputJournal, InputPayload, InputRecord};
pub use mapgen::{DungeonGenerator, GeneratorParams, MapGrid};
pub use replay::*;
pub use session::DungeonSession;
pub use status::{ActorKind, ActorStatus};
pub use turn::{PhaseTransition, TurnScheduler};
pub use types::*;
