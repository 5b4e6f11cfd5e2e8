//! Auto-run continuation: decides whether the player keeps running and in which heading.

use crate::mapgen::MapGrid;
use crate::types::{Direction, MapChip, Pos, RunStopRule};

use super::{Occupant, OccupancyQuery, can_enter};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FastTravelStep {
    Continue(Direction),
    Stop(RunStopRule),
}

impl FastTravelStep {
    pub fn is_stop(self) -> bool {
        matches!(self, FastTravelStep::Stop(_))
    }
}

/// Stop rules in precedence order: stairs, room entrance, corridor branch, corridor exit,
/// then bend-following at walls, then a hostile on the tile ahead.
pub fn plan_fast_travel(
    grid: &MapGrid,
    occupancy: &impl OccupancyQuery,
    position: Pos,
    heading: Direction,
) -> FastTravelStep {
    let here = grid.chip(position);
    if here.is_stairs() {
        return FastTravelStep::Stop(RunStopRule::OnStairs);
    }
    let neighbors = position.orthogonal_neighbors();
    if here == MapChip::Room && neighbors.iter().any(|&pos| grid.chip(pos) == MapChip::Corridor) {
        return FastTravelStep::Stop(RunStopRule::RoomEntrance);
    }
    if here == MapChip::Corridor
        && neighbors.iter().filter(|&&pos| grid.chip(pos) == MapChip::Corridor).count() >= 3
    {
        return FastTravelStep::Stop(RunStopRule::CorridorBranch);
    }
    if heading == Direction::None {
        return FastTravelStep::Stop(RunStopRule::DeadEnd);
    }
    if here == MapChip::Corridor && grid.chip(position.offset(heading)).is_room_floor() {
        return FastTravelStep::Stop(RunStopRule::CorridorExit);
    }

    let Some(heading) = [heading, heading.turn_left(), heading.turn_right()]
        .into_iter()
        .find(|&candidate| can_enter(grid, position.offset(candidate)))
    else {
        return FastTravelStep::Stop(RunStopRule::DeadEnd);
    };

    let ahead = position.offset(heading);
    if here == MapChip::Corridor && grid.chip(ahead).is_room_floor() {
        return FastTravelStep::Stop(RunStopRule::CorridorExit);
    }
    if matches!(occupancy.occupant_at(ahead), Some(Occupant::Enemy(_))) {
        return FastTravelStep::Stop(RunStopRule::HostileAhead);
    }
    FastTravelStep::Continue(heading)
}

pub fn fast_travel_should_stop(
    grid: &MapGrid,
    occupancy: &impl OccupancyQuery,
    position: Pos,
    heading: Direction,
) -> bool {
    plan_fast_travel(grid, occupancy, position, heading).is_stop()
}
