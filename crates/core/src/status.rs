//! Combat status shared by the player and enemies.

use serde::{Deserialize, Serialize};

use crate::config::PlayerConfig;
use crate::content::EnemyRace;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActorKind {
    Player { level: u32, exp: i32, gold: i32, turn_count: u64 },
    Enemy { race: String, level: u32, reward_exp: i32, reward_gold: i32 },
}

/// Hit points stay within `0..=max_hit_point`; zero means dead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorStatus {
    max_hit_point: i32,
    hit_point: i32,
    defense: i32,
    attack: i32,
    kind: ActorKind,
}

impl ActorStatus {
    pub fn player(config: &PlayerConfig) -> Self {
        let max_hit_point = config.max_hit_point.max(1);
        Self {
            max_hit_point,
            hit_point: max_hit_point,
            defense: config.defense,
            attack: config.attack,
            kind: ActorKind::Player { level: 1, exp: 0, gold: 0, turn_count: 0 },
        }
    }

    /// Strength scales with `level^0.5`, rewards with `level^1.5`, truncated.
    pub fn enemy_for_race(race: &EnemyRace, level: u32) -> Self {
        let level = f64::from(level.max(1));
        let strength = level.sqrt();
        let reward = level.powf(1.5);
        let scale = |base: i32, factor: f64| (f64::from(base) * factor) as i32;
        let max_hit_point = scale(race.max_hit_point, strength).max(1);
        Self {
            max_hit_point,
            hit_point: max_hit_point,
            defense: scale(race.defense, strength),
            attack: scale(race.attack, strength),
            kind: ActorKind::Enemy {
                race: race.key.clone(),
                level: level as u32,
                reward_exp: scale(race.reward_exp, reward),
                reward_gold: scale(race.reward_gold, reward),
            },
        }
    }

    pub fn max_hit_point(&self) -> i32 {
        self.max_hit_point
    }

    pub fn hit_point(&self) -> i32 {
        self.hit_point
    }

    pub fn defense(&self) -> i32 {
        self.defense
    }

    pub fn attack(&self) -> i32 {
        self.attack
    }

    pub fn kind(&self) -> &ActorKind {
        &self.kind
    }

    pub fn is_alive(&self) -> bool {
        self.hit_point > 0
    }

    /// Applies an incoming blow of `power` and returns the damage dealt.
    pub fn attacked(&mut self, power: i32) -> i32 {
        let damage = power.saturating_sub(self.defense).max(0);
        self.hit_point = self.hit_point.saturating_sub(damage).max(0);
        damage
    }

    /// `(exp, gold)` granted for defeating this actor.
    pub fn rewards(&self) -> (i32, i32) {
        match &self.kind {
            ActorKind::Enemy { reward_exp, reward_gold, .. } => (*reward_exp, *reward_gold),
            ActorKind::Player { .. } => (0, 0),
        }
    }

    pub fn add_exp(&mut self, amount: i32) {
        if let ActorKind::Player { exp, .. } = &mut self.kind {
            *exp += amount.max(0);
        }
    }

    pub fn add_gold(&mut self, amount: i32) {
        if let ActorKind::Player { gold, .. } = &mut self.kind {
            *gold += amount.max(0);
        }
    }

    pub fn increment_turn(&mut self) {
        if let ActorKind::Player { turn_count, .. } = &mut self.kind {
            *turn_count += 1;
        }
    }

    pub fn exp(&self) -> i32 {
        match self.kind {
            ActorKind::Player { exp, .. } => exp,
            ActorKind::Enemy { .. } => 0,
        }
    }

    pub fn gold(&self) -> i32 {
        match self.kind {
            ActorKind::Player { gold, .. } => gold,
            ActorKind::Enemy { .. } => 0,
        }
    }

    pub fn turn_count(&self) -> u64 {
        match self.kind {
            ActorKind::Player { turn_count, .. } => turn_count,
            ActorKind::Enemy { .. } => 0,
        }
    }

    pub fn race_key(&self) -> Option<&str> {
        match &self.kind {
            ActorKind::Enemy { race, .. } => Some(race),
            ActorKind::Player { .. } => None,
        }
    }
}
