//! Static enemy race table.
//! This module exists to validate content once, before any actor is built from it.
//! It does not own spawning policy or stat scaling.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ContentError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiKind {
    BackAndForth,
    Stationary,
}

impl AiKind {
    pub fn name(self) -> &'static str {
        match self {
            AiKind::BackAndForth => "back_and_forth",
            AiKind::Stationary => "stationary",
        }
    }
}

impl fmt::Display for AiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AiKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "back_and_forth" => Ok(AiKind::BackAndForth),
            "stationary" => Ok(AiKind::Stationary),
            _ => Err(()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EnemyRace {
    pub key: String,
    pub display_name: String,
    pub description: String,
    pub glyph: String,
    pub ai: AiKind,
    pub lowest_spawn_level: u32,
    pub highest_spawn_level: u32,
    pub max_hit_point: i32,
    pub defense: i32,
    pub attack: i32,
    pub reward_exp: i32,
    pub reward_gold: i32,
}

impl EnemyRace {
    pub fn spawns_on(&self, level: u32) -> bool {
        (self.lowest_spawn_level..=self.highest_spawn_level).contains(&level)
    }
}

/// On-disk shape of one `[[race]]` entry. The AI kind stays a string until validation.
#[derive(Debug, Deserialize)]
struct RaceRecord {
    key: String,
    display_name: String,
    #[serde(default)]
    description: String,
    glyph: String,
    ai: String,
    lowest_spawn_level: u32,
    highest_spawn_level: u32,
    max_hit_point: i32,
    defense: i32,
    attack: i32,
    reward_exp: i32,
    reward_gold: i32,
}

#[derive(Debug, Deserialize)]
struct RaceTable {
    #[serde(default)]
    race: Vec<RaceRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RaceCatalog {
    races: Vec<EnemyRace>,
}

impl RaceCatalog {
    pub fn new(races: Vec<EnemyRace>) -> Result<Self, ContentError> {
        let catalog = Self { races };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn builtin() -> Self {
        Self { races: builtin_races() }
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ContentError> {
        let table: RaceTable =
            toml::from_str(text).map_err(|e| ContentError::Parse(e.to_string()))?;
        let races = table
            .race
            .into_iter()
            .map(|record| {
                let ai = record.ai.parse::<AiKind>().map_err(|()| {
                    ContentError::UnknownAiKind { race: record.key.clone(), kind: record.ai.clone() }
                })?;
                Ok(EnemyRace {
                    key: record.key,
                    display_name: record.display_name,
                    description: record.description,
                    glyph: record.glyph,
                    ai,
                    lowest_spawn_level: record.lowest_spawn_level,
                    highest_spawn_level: record.highest_spawn_level,
                    max_hit_point: record.max_hit_point,
                    defense: record.defense,
                    attack: record.attack,
                    reward_exp: record.reward_exp,
                    reward_gold: record.reward_gold,
                })
            })
            .collect::<Result<Vec<_>, ContentError>>()?;
        Self::new(races)
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.races.is_empty() {
            return Err(ContentError::Empty);
        }
        let mut seen = BTreeSet::new();
        for race in &self.races {
            validate_race(race)?;
            if !seen.insert(race.key.as_str()) {
                return Err(ContentError::DuplicateKey(race.key.clone()));
            }
        }
        Ok(())
    }

    pub fn races(&self) -> &[EnemyRace] {
        &self.races
    }

    pub fn get(&self, key: &str) -> Option<&EnemyRace> {
        self.races.iter().find(|race| race.key == key)
    }

    /// Races whose spawn range covers `level`, in table order.
    pub fn races_for_level(&self, level: u32) -> Vec<&EnemyRace> {
        self.races.iter().filter(|race| race.spawns_on(level)).collect()
    }
}

impl Default for RaceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn validate_race(race: &EnemyRace) -> Result<(), ContentError> {
    let label = if race.key.is_empty() { race.display_name.clone() } else { race.key.clone() };
    for (field, value) in [
        ("key", &race.key),
        ("display_name", &race.display_name),
        ("glyph", &race.glyph),
    ] {
        if value.trim().is_empty() {
            return Err(ContentError::EmptyField { race: label, field });
        }
    }
    if race.max_hit_point < 1 {
        return Err(ContentError::InvalidStat {
            race: label,
            field: "max_hit_point",
            value: race.max_hit_point,
        });
    }
    for (field, value) in [
        ("defense", race.defense),
        ("attack", race.attack),
        ("reward_exp", race.reward_exp),
        ("reward_gold", race.reward_gold),
    ] {
        if value < 0 {
            return Err(ContentError::InvalidStat { race: label, field, value });
        }
    }
    if race.lowest_spawn_level < 1 || race.lowest_spawn_level > race.highest_spawn_level {
        return Err(ContentError::SpawnRange {
            race: label,
            lowest: race.lowest_spawn_level,
            highest: race.highest_spawn_level,
        });
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn race(
    key: &str,
    display_name: &str,
    description: &str,
    glyph: &str,
    ai: AiKind,
    spawn_levels: (u32, u32),
    max_hit_point: i32,
    defense: i32,
    attack: i32,
    rewards: (i32, i32),
) -> EnemyRace {
    EnemyRace {
        key: key.to_string(),
        display_name: display_name.to_string(),
        description: description.to_string(),
        glyph: glyph.to_string(),
        ai,
        lowest_spawn_level: spawn_levels.0,
        highest_spawn_level: spawn_levels.1,
        max_hit_point,
        defense,
        attack,
        reward_exp: rewards.0,
        reward_gold: rewards.1,
    }
}

#[rustfmt::skip]
fn builtin_races() -> Vec<EnemyRace> {
    vec![
        race("slime", "Slime", "A quivering blob.", "s", AiKind::BackAndForth, (1, 3), 6, 0, 4, (3, 2)),
        race("cave_bat", "Cave Bat", "Flits along the corridors.", "b", AiKind::BackAndForth, (1, 5), 5, 1, 5, (5, 1)),
        race("kobold", "Kobold", "Small, sly and armed.", "k", AiKind::BackAndForth, (2, 6), 10, 2, 7, (8, 6)),
        race("mimic", "Mimic", "Waits where treasure should be.", "m", AiKind::Stationary, (3, 10), 20, 4, 10, (20, 30)),
        race("stone_golem", "Stone Golem", "Slow to anger, slower to fall.", "G", AiKind::BackAndForth, (5, 10), 30, 6, 12, (40, 20)),
        race("wraith", "Wraith", "A cold draft with a grudge.", "W", AiKind::BackAndForth, (7, 10), 26, 5, 15, (60, 25)),
    ]
}
