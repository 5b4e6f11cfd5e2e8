//! Stateless movement and combat rules applied against the tile grid.
//! This module exists so player and enemy moves go through one set of collision rules.
//! It does not own actors; callers commit the results.

mod fast_travel;

pub use fast_travel::{FastTravelStep, fast_travel_should_stop, plan_fast_travel};

use crate::mapgen::MapGrid;
use crate::status::ActorStatus;
use crate::types::{Direction, EnemyId, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Occupant {
    Player,
    Enemy(EnemyId),
}

/// Who will stand on a tile once pending moves of the current turn commit.
pub trait OccupancyQuery {
    fn occupant_at(&self, pos: Pos) -> Option<Occupant>;
}

impl<F> OccupancyQuery for F
where
    F: Fn(Pos) -> Option<Occupant>,
{
    fn occupant_at(&self, pos: Pos) -> Option<Occupant> {
        self(pos)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    Hit { damage: i32, killed: bool },
    /// Swung at an empty tile; the turn is still spent.
    Miss,
}

pub fn compute_destination(position: Pos, direction: Direction) -> Pos {
    position.offset(direction)
}

pub fn can_enter(grid: &MapGrid, destination: Pos) -> bool {
    !grid.chip(destination).is_wall()
}

pub fn is_occupied(occupancy: &impl OccupancyQuery, destination: Pos) -> Option<Occupant> {
    occupancy.occupant_at(destination)
}

/// Returns the damage dealt; the defender's hit points never drop below zero.
pub fn attack(attacker: &ActorStatus, defender: &mut ActorStatus) -> i32 {
    defender.attacked(attacker.attack())
}

pub fn strike(attacker: &ActorStatus, defender: Option<&mut ActorStatus>) -> AttackOutcome {
    match defender {
        Some(defender) => {
            let damage = attack(attacker, defender);
            AttackOutcome::Hit { damage, killed: !defender.is_alive() }
        }
        None => AttackOutcome::Miss,
    }
}

pub fn is_engaged(a: Pos, b: Pos) -> bool {
    a.chebyshev(b) <= 1
}
