//! Room sampling, corridor carving and stairs placement.

use crate::rng::RandomSource;
use crate::types::{MapChip, Pos};

use super::grid::MapGrid;

pub(super) const MIN_ROOM_SIZE: i32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Room {
    pub(super) x: i32,
    pub(super) y: i32,
    pub(super) width: i32,
    pub(super) height: i32,
}

impl Room {
    pub(super) fn center(self) -> Pos {
        Pos::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Edge-inclusive, so rooms that merely touch also count as overlapping.
    pub(super) fn overlaps(self, other: &Room) -> bool {
        self.x <= other.x + other.width
            && self.x + self.width >= other.x
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }

    fn tiles(self) -> impl Iterator<Item = Pos> {
        (self.y..self.y + self.height).flat_map(move |row| {
            (self.x..self.x + self.width).map(move |column| Pos::new(column, row))
        })
    }
}

/// One sample per attempt; overlapping samples are dropped.
pub(super) fn sample_rooms(
    rng: &mut impl RandomSource,
    map_width: i32,
    map_height: i32,
    attempts: usize,
    max_room_size: i32,
) -> Vec<Room> {
    let mut rooms: Vec<Room> = Vec::with_capacity(attempts);
    for _ in 0..attempts {
        let width = rng.range(MIN_ROOM_SIZE, max_room_size);
        let height = rng.range(MIN_ROOM_SIZE, max_room_size);
        let x = rng.range(1, map_width - width - 1);
        let y = rng.range(1, map_height - height - 1);
        let candidate = Room { x, y, width, height };
        if rooms.iter().any(|room| room.overlaps(&candidate)) {
            continue;
        }
        rooms.push(candidate);
    }
    rooms
}

/// Horizontal leg first, then vertical. The destination tile itself is left untouched.
pub(super) fn carve_corridor(grid: &mut MapGrid, from: Pos, to: Pos) {
    let mut cursor = from;
    while cursor.column != to.column {
        grid.set(cursor, MapChip::Corridor);
        cursor.column += (to.column - cursor.column).signum();
    }
    while cursor.row != to.row {
        grid.set(cursor, MapChip::Corridor);
        cursor.row += (to.row - cursor.row).signum();
    }
}

pub(super) fn fill_room(grid: &mut MapGrid, room: Room) {
    for pos in room.tiles() {
        grid.set(pos, MapChip::Room);
    }
}

/// Resamples until it lands on a plain Room tile of `room`.
pub(super) fn place_stairs(
    grid: &mut MapGrid,
    rng: &mut impl RandomSource,
    room: Room,
    stairs: MapChip,
) -> Pos {
    loop {
        let pos = Pos::new(
            rng.range(room.x, room.x + room.width),
            rng.range(room.y, room.y + room.height),
        );
        if grid.chip(pos) == MapChip::Room {
            grid.set(pos, stairs);
            return pos;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedRng;

    #[test]
    fn touching_rooms_overlap() {
        let left = Room { x: 1, y: 1, width: 3, height: 3 };
        let touching = Room { x: 4, y: 1, width: 3, height: 3 };
        let apart = Room { x: 5, y: 1, width: 3, height: 3 };
        assert!(left.overlaps(&touching));
        assert!(touching.overlaps(&left));
        assert!(!left.overlaps(&apart));
    }

    #[test]
    fn center_rounds_toward_origin() {
        assert_eq!(Room { x: 2, y: 3, width: 4, height: 3 }.center(), Pos::new(4, 4));
    }

    #[test]
    fn rejected_attempts_are_dropped() {
        // Draws per attempt: width, height, x, y.
        let mut rng = ScriptedRng::new(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 6, 0]);
        let rooms = sample_rooms(&mut rng, 20, 10, 3, 4);
        assert_eq!(
            rooms,
            vec![
                Room { x: 1, y: 1, width: 3, height: 3 },
                Room { x: 7, y: 1, width: 3, height: 3 },
            ]
        );
    }

    #[test]
    fn corridor_marks_every_tile_but_the_destination() {
        let mut grid = MapGrid::filled(8, 6, MapChip::Wall);
        carve_corridor(&mut grid, Pos::new(1, 1), Pos::new(4, 3));
        let marked: Vec<Pos> =
            grid.positions().filter(|&pos| grid.chip(pos) == MapChip::Corridor).collect();
        assert_eq!(
            marked,
            vec![
                Pos::new(1, 1),
                Pos::new(2, 1),
                Pos::new(3, 1),
                Pos::new(4, 1),
                Pos::new(4, 2),
            ]
        );
        assert_eq!(grid.chip(Pos::new(4, 3)), MapChip::Wall);
    }

    #[test]
    fn stairs_resample_until_a_plain_room_tile() {
        let mut grid = MapGrid::filled(6, 6, MapChip::Wall);
        let room = Room { x: 1, y: 1, width: 3, height: 3 };
        fill_room(&mut grid, room);
        grid.set(Pos::new(1, 1), MapChip::UpStairs);

        let mut rng = ScriptedRng::new(&[0, 0, 2, 1]);
        let pos = place_stairs(&mut grid, &mut rng, room, MapChip::DownStairs);
        assert_eq!(pos, Pos::new(3, 2));
        assert_eq!(grid.chip(pos), MapChip::DownStairs);
        assert_eq!(grid.chip(Pos::new(1, 1)), MapChip::UpStairs);
    }
}
