//! Procedural map generation split into grid storage, room layout and orchestration.

mod generator;
mod grid;
mod layout;

pub use generator::{DungeonGenerator, GeneratorParams, MIN_MAP_SIZE};
pub use grid::MapGrid;
