//! Live enemies of the current level.
//! This module exists to own enemy spawning, turn-ordered thinking and committing, and removal.
//! It does not own the player; attacks against the player are applied to a borrowed status.

use std::mem;

use rand_chacha::ChaCha8Rng;
use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::ai::{AiState, think};
use crate::config::PopulationConfig;
use crate::content::{EnemyRace, RaceCatalog};
use crate::mapgen::MapGrid;
use crate::movement::{attack, can_enter};
use crate::rng::RandomSource;
use crate::status::ActorStatus;
use crate::types::{EnemyId, MapChip, Pos};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pending {
    Stay,
    Move,
    Attack,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    id: EnemyId,
    status: ActorStatus,
    position: Pos,
    next_position: Pos,
    pending: Pending,
    ai: AiState,
    rng: ChaCha8Rng,
}

impl Enemy {
    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn status(&self) -> &ActorStatus {
        &self.status
    }

    pub fn position(&self) -> Pos {
        self.position
    }

    /// Equals `position` except between `think_all` and `act_all`.
    pub fn next_position(&self) -> Pos {
        self.next_position
    }

    pub fn ai(&self) -> &AiState {
        &self.ai
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyAct {
    Moved { enemy: EnemyId, from: Pos, to: Pos },
    Attacked { enemy: EnemyId, damage: i32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StrikeReport {
    pub damage: i32,
    pub killed: bool,
    /// `(exp, gold)`; zero unless `killed`.
    pub rewards: (i32, i32),
}

#[derive(Clone, Debug)]
pub struct EnemyPopulationManager {
    enemies: SlotMap<EnemyId, Enemy>,
    order: Vec<EnemyId>,
    level: u32,
    eligible: Vec<EnemyRace>,
    budget: usize,
    max_percentage: f64,
    placement_attempts: u32,
    rng: ChaCha8Rng,
}

impl EnemyPopulationManager {
    pub fn new(config: &PopulationConfig, rng: ChaCha8Rng) -> Self {
        Self {
            enemies: SlotMap::with_key(),
            order: Vec::new(),
            level: 0,
            eligible: Vec::new(),
            budget: 0,
            max_percentage: config.max_percentage,
            placement_attempts: config.placement_attempts,
            rng,
        }
    }

    /// Clears the previous level and fills the new one up to budget.
    pub fn new_level(
        &mut self,
        level: u32,
        grid: &MapGrid,
        catalog: &RaceCatalog,
        player_position: Pos,
        rng: ChaCha8Rng,
    ) -> Vec<EnemyId> {
        self.enemies.clear();
        self.order.clear();
        self.level = level;
        self.rng = rng;
        self.eligible = catalog.races_for_level(level).into_iter().cloned().collect();
        self.budget = (self.max_percentage * grid.floor_tile_count() as f64).floor() as usize;
        if self.eligible.is_empty() {
            warn!(level, "no enemy race spawns on this level");
        }

        let mut spawned = Vec::with_capacity(self.budget);
        for _ in 0..self.budget {
            if let Some(id) = self.spawn_one(grid, player_position) {
                spawned.push(id);
            }
        }
        debug!(level, budget = self.budget, spawned = spawned.len(), "populated level");
        spawned
    }

    /// At most one spawn per call.
    pub fn refill_one_if_below_budget(
        &mut self,
        grid: &MapGrid,
        player_position: Pos,
    ) -> Option<EnemyId> {
        if self.order.len() >= self.budget {
            return None;
        }
        self.spawn_one(grid, player_position)
    }

    fn spawn_one(&mut self, grid: &MapGrid, player_position: Pos) -> Option<EnemyId> {
        let index = self.rng.pick_index(self.eligible.len())?;
        let position = self.try_place(grid, player_position)?;
        let race = self.eligible[index].clone();
        Some(self.spawn_at(&race, position))
    }

    /// Random Room or Corridor tile that nobody stands on, or `None` after the configured attempts.
    pub fn try_place(&mut self, grid: &MapGrid, player_position: Pos) -> Option<Pos> {
        let (width, height) = (grid.width() as i32, grid.height() as i32);
        for _ in 0..self.placement_attempts {
            let pos = Pos::new(self.rng.range(0, width), self.rng.range(0, height));
            if !matches!(grid.chip(pos), MapChip::Room | MapChip::Corridor) {
                continue;
            }
            if pos == player_position || self.exist_enemy(pos).is_some() {
                continue;
            }
            return Some(pos);
        }
        debug!(attempts = self.placement_attempts, "enemy placement exhausted");
        None
    }

    /// Places an enemy of `race` at the current level. The caller vouches for the tile.
    pub fn spawn_at(&mut self, race: &EnemyRace, position: Pos) -> EnemyId {
        let rng = self.rng.derive();
        let status = ActorStatus::enemy_for_race(race, self.level);
        let ai = AiState::for_kind(race.ai);
        let id = self.enemies.insert_with_key(|id| Enemy {
            id,
            status,
            position,
            next_position: position,
            pending: Pending::Stay,
            ai,
            rng,
        });
        self.order.push(id);
        debug!(race = %race.key, ?position, "enemy spawned");
        id
    }

    /// Enemy whose pending destination is `pos`. The caller is not excluded.
    pub fn exist_enemy(&self, pos: Pos) -> Option<EnemyId> {
        self.order.iter().copied().find(|&id| self.enemies[id].next_position == pos)
    }

    /// Every enemy decides in creation order; moves are validated but not committed.
    pub fn think_all(&mut self, grid: &MapGrid, player_position: Pos) {
        for index in 0..self.order.len() {
            let id = self.order[index];
            let enemy = &mut self.enemies[id];
            let desired =
                think(&mut enemy.ai, grid, enemy.position, player_position, &mut enemy.rng);

            let pending = if desired == player_position {
                Pending::Attack
            } else if !can_enter(grid, desired) || self.exist_enemy(desired).is_some() {
                Pending::Stay
            } else {
                Pending::Move
            };

            let enemy = &mut self.enemies[id];
            enemy.pending = pending;
            if pending == Pending::Move {
                enemy.next_position = desired;
            }
        }
    }

    /// Commits decisions in creation order. Attacks stop landing once the player is dead.
    pub fn act_all(&mut self, player: &mut ActorStatus) -> Vec<EnemyAct> {
        let mut acts = Vec::new();
        for &id in &self.order {
            let enemy = &mut self.enemies[id];
            match mem::replace(&mut enemy.pending, Pending::Stay) {
                Pending::Stay => {}
                Pending::Move => {
                    let from = enemy.position;
                    enemy.position = enemy.next_position;
                    acts.push(EnemyAct::Moved { enemy: id, from, to: enemy.position });
                }
                Pending::Attack => {
                    if player.is_alive() {
                        let damage = attack(&enemy.status, player);
                        acts.push(EnemyAct::Attacked { enemy: id, damage });
                    }
                }
            }
            enemy.next_position = enemy.position;
        }
        acts
    }

    /// Applies a blow to `id`; a killed enemy is removed before this returns.
    pub fn strike(&mut self, id: EnemyId, attacker: &ActorStatus) -> Option<StrikeReport> {
        let enemy = self.enemies.get_mut(id)?;
        let damage = attack(attacker, &mut enemy.status);
        if enemy.status.is_alive() {
            return Some(StrikeReport { damage, killed: false, rewards: (0, 0) });
        }
        let rewards = enemy.status.rewards();
        self.remove(id);
        Some(StrikeReport { damage, killed: true, rewards })
    }

    fn remove(&mut self, id: EnemyId) {
        if self.enemies.remove(id).is_some() {
            self.order.retain(|&other| other != id);
        }
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.get(id)
    }

    /// Live enemies in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.order.iter().map(|&id| &self.enemies[id])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn level(&self) -> u32 {
        self.level
    }
}

#[cfg(test)]
mod tests;
