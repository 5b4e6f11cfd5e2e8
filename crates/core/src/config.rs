//! Session tunables loaded from TOML.
//! This module exists to keep every knob a run depends on in one serializable value.
//! It does not own map generation or population rules, only their parameters.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::mapgen::{DungeonGenerator, GeneratorParams};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub map: GeneratorParams,
    pub population: PopulationConfig,
    pub player: PlayerConfig,
    pub run: RunConfig,
    pub presentation: PresentationConfig,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Share of Room and Corridor tiles that may hold an enemy.
    pub max_percentage: f64,
    pub placement_attempts: u32,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self { max_percentage: 0.03, placement_attempts: 10 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub max_hit_point: i32,
    pub defense: i32,
    pub attack: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self { max_hit_point: 40, defense: 2, attack: 8 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Consecutive fast-travel steps before the run is cut short.
    pub fast_travel_step_limit: u32,
    /// Taking the down stairs on this level clears the dungeon.
    pub deepest_level: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { fast_travel_step_limit: 64, deepest_level: 10 }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub move_millis: u32,
    pub attack_millis: u32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self { move_millis: 100, attack_millis: 150 }
    }
}

impl SessionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        DungeonGenerator::new(self.map.clone())?;
        if !(0.0..=1.0).contains(&self.population.max_percentage) {
            return Err(ConfigError::MaxPercentage(self.population.max_percentage));
        }
        if self.population.placement_attempts == 0 {
            return Err(ConfigError::PlacementAttempts);
        }
        if self.run.fast_travel_step_limit == 0 {
            return Err(ConfigError::StepLimit);
        }
        if self.run.deepest_level == 0 {
            return Err(ConfigError::DeepestLevel);
        }
        if self.player.max_hit_point <= 0 {
            return Err(ConfigError::PlayerHitPoint(self.player.max_hit_point));
        }
        for (field, value) in [("defense", self.player.defense), ("attack", self.player.attack)] {
            if value < 0 {
                return Err(ConfigError::PlayerStat { field, value });
            }
        }
        Ok(())
    }
}
