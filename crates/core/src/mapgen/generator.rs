//! Map generation orchestration: rooms, then corridors, then room fill, then stairs.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GenerationError;
use crate::rng::RandomSource;
use crate::types::MapChip;

use super::grid::MapGrid;
use super::layout::{MIN_ROOM_SIZE, carve_corridor, fill_room, place_stairs, sample_rooms};

pub const MIN_MAP_SIZE: usize = 7;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorParams {
    pub width: usize,
    pub height: usize,
    /// Placement attempts; overlapping samples are dropped.
    pub room_count: usize,
    /// Exclusive upper bound of sampled room sides.
    pub max_room_size: usize,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self { width: 40, height: 20, room_count: 8, max_room_size: 8 }
    }
}

#[derive(Clone, Debug)]
pub struct DungeonGenerator {
    params: GeneratorParams,
}

impl DungeonGenerator {
    pub fn new(params: GeneratorParams) -> Result<Self, GenerationError> {
        if params.width < MIN_MAP_SIZE {
            return Err(GenerationError::WidthTooSmall(params.width));
        }
        if params.height < MIN_MAP_SIZE {
            return Err(GenerationError::HeightTooSmall(params.height));
        }
        if params.room_count < 1 {
            return Err(GenerationError::NoRooms);
        }
        let limit = params.width.min(params.height) - 2;
        if params.max_room_size < MIN_ROOM_SIZE as usize || params.max_room_size > limit {
            return Err(GenerationError::RoomSizeOutOfRange { size: params.max_room_size, limit });
        }
        Ok(Self { params })
    }

    pub fn params(&self) -> &GeneratorParams {
        &self.params
    }

    pub fn generate(&self, rng: &mut impl RandomSource) -> MapGrid {
        let width = self.params.width as i32;
        let height = self.params.height as i32;
        let mut grid = MapGrid::filled(self.params.width, self.params.height, MapChip::Wall);

        let rooms = sample_rooms(
            rng,
            width,
            height,
            self.params.room_count,
            self.params.max_room_size as i32,
        );
        debug!(
            accepted = rooms.len(),
            attempts = self.params.room_count,
            "sampled dungeon rooms"
        );

        for pair in rooms.windows(2) {
            carve_corridor(&mut grid, pair[0].center(), pair[1].center());
        }
        for room in &rooms {
            fill_room(&mut grid, *room);
        }

        // The first attempt never collides, so there is always at least one room.
        if let (Some(first), Some(last)) = (rooms.first(), rooms.last()) {
            place_stairs(&mut grid, rng, *first, MapChip::UpStairs);
            place_stairs(&mut grid, rng, *last, MapChip::DownStairs);
        }
        grid
    }
}
