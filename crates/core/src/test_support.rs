//! Shared fixtures for unit tests across the crate.
//! This module exists to avoid repeating grid, status and RNG setup in every test module.
//! It does not own production logic.

use crate::config::PlayerConfig;
use crate::content::{AiKind, EnemyRace};
use crate::mapgen::MapGrid;
use crate::rng::RandomSource;
use crate::status::ActorStatus;

/// Replays a fixed list of draws and panics once it runs dry.
pub(crate) struct ScriptedRng {
    values: Vec<u64>,
    cursor: usize,
}

impl ScriptedRng {
    pub(crate) fn new(values: &[u64]) -> Self {
        Self { values: values.to_vec(), cursor: 0 }
    }
}

impl RandomSource for ScriptedRng {
    fn draw_u64(&mut self) -> u64 {
        let value = *self
            .values
            .get(self.cursor)
            .unwrap_or_else(|| panic!("scripted rng exhausted after {} draws", self.cursor));
        self.cursor += 1;
        value
    }
}

pub(crate) fn grid_from_rows(rows: &[&str]) -> MapGrid {
    MapGrid::from_dump_rows(rows).expect("fixture rows are well formed")
}

/// Horizontal one-wide corridor on row 1, columns 1..=5.
pub(crate) fn corridor_fixture() -> MapGrid {
    grid_from_rows(&["0000000", "0222220", "0000000"])
}

/// Vertical one-wide corridor on column 1, rows 1..=3.
pub(crate) fn vertical_corridor_fixture() -> MapGrid {
    grid_from_rows(&["000", "020", "020", "020", "000"])
}

/// 10x10 map whose 8x8 interior is one room.
pub(crate) fn open_room_fixture() -> MapGrid {
    let mut rows = vec!["0000000000".to_string()];
    rows.extend((0..8).map(|_| "0111111110".to_string()));
    rows.push("0000000000".to_string());
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
    grid_from_rows(&rows)
}

pub(crate) fn stats(max_hit_point: i32, defense: i32, attack: i32) -> ActorStatus {
    ActorStatus::player(&PlayerConfig { max_hit_point, defense, attack })
}

pub(crate) fn race(key: &str, ai: AiKind) -> EnemyRace {
    EnemyRace {
        key: key.to_string(),
        display_name: key.to_string(),
        description: String::new(),
        glyph: "e".to_string(),
        ai,
        lowest_spawn_level: 1,
        highest_spawn_level: 10,
        max_hit_point: 10,
        defense: 0,
        attack: 3,
        reward_exp: 5,
        reward_gold: 7,
    }
}
