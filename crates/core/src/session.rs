//! Level controller that owns one run from the first level to its outcome.
//! This module exists to wire the scheduler, grid, population and presentation queue together.
//! It does not own the rules themselves; movement, AI and generation live in their own modules.

mod advance;
mod input;
mod stairs;

use std::hash::Hasher;

use tracing::info;
use xxhash_rust::xxh3::Xxh3;

use crate::config::SessionConfig;
use crate::content::RaceCatalog;
use crate::error::{GenerationError, SessionError};
use crate::journal::InputJournal;
use crate::mapgen::{DungeonGenerator, MapGrid};
use crate::movement::{Occupant, OccupancyQuery};
use crate::population::EnemyPopulationManager;
use crate::presentation::PresentationQueue;
use crate::rng::SessionRng;
use crate::status::ActorStatus;
use crate::turn::TurnScheduler;
use crate::types::*;

/// Player action decided at the input boundary, committed in `PlayerAction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QueuedAction {
    Move { to: Pos },
    Attack { at: Pos, target: Option<EnemyId> },
}

/// Player tile plus enemy pending destinations.
struct Occupancy<'a> {
    player: Pos,
    population: &'a EnemyPopulationManager,
}

impl OccupancyQuery for Occupancy<'_> {
    fn occupant_at(&self, pos: Pos) -> Option<Occupant> {
        if pos == self.player {
            return Some(Occupant::Player);
        }
        self.population.exist_enemy(pos).map(Occupant::Enemy)
    }
}

pub struct DungeonSession {
    seed: u64,
    config: SessionConfig,
    catalog: RaceCatalog,
    generator: DungeonGenerator,
    rng: SessionRng,
    scheduler: TurnScheduler,
    grid: MapGrid,
    level: u32,
    player: ActorStatus,
    player_position: Pos,
    facing: Direction,
    queued: Option<QueuedAction>,
    run_steps: u32,
    population: EnemyPopulationManager,
    presentation: PresentationQueue,
    log: Vec<LogEvent>,
    journal: InputJournal,
    outcome: Option<RunOutcome>,
}

impl DungeonSession {
    pub fn new(
        seed: u64,
        config: SessionConfig,
        catalog: RaceCatalog,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        info!(seed, "starting dungeon session");

        let generator = DungeonGenerator::new(config.map.clone())?;
        let mut rng = SessionRng::new(seed);
        let population = EnemyPopulationManager::new(&config.population, rng.population_stream());
        let grid = MapGrid::filled(config.map.width, config.map.height, MapChip::Wall);
        let player = ActorStatus::player(&config.player);

        let mut session = Self {
            seed,
            config,
            catalog,
            generator,
            rng,
            scheduler: TurnScheduler::new(),
            grid,
            level: 0,
            player,
            player_position: Pos::new(0, 0),
            facing: Direction::Down,
            queued: None,
            run_steps: 0,
            population,
            presentation: PresentationQueue::new(),
            log: Vec::new(),
            journal: InputJournal::new(seed),
            outcome: None,
        };
        session.enter_level(1, StairsDirection::Down)?;
        Ok(session)
    }

    /// Generates `level`, repopulates it and places the player on the stairs they arrived by.
    fn enter_level(&mut self, level: u32, arrived_by: StairsDirection) -> Result<(), SessionError> {
        let grid = self.generator.generate(&mut self.rng.map_stream());
        let up_stairs =
            grid.up_stairs().ok_or(GenerationError::MissingStairs(MapChip::UpStairs))?;
        let down_stairs =
            grid.down_stairs().ok_or(GenerationError::MissingStairs(MapChip::DownStairs))?;

        self.player_position = match arrived_by {
            StairsDirection::Down => up_stairs,
            StairsDirection::Up => down_stairs,
        };
        self.grid = grid;
        self.level = level;
        self.queued = None;
        self.run_steps = 0;
        self.presentation.cancel_all();
        self.scheduler.reset();
        self.log.push(LogEvent::LevelEntered { level, up_stairs, down_stairs });
        info!(level, ?up_stairs, ?down_stairs, "entered level");

        let spawned = self.population.new_level(
            level,
            &self.grid,
            &self.catalog,
            self.player_position,
            self.rng.population_stream(),
        );
        for enemy in spawned {
            self.log_spawn(enemy);
        }
        Ok(())
    }

    fn log_spawn(&mut self, enemy: EnemyId) {
        if let Some(spawned) = self.population.get(enemy) {
            self.log.push(LogEvent::EnemySpawned {
                enemy,
                race: spawned.status().race_key().unwrap_or_default().to_string(),
                pos: spawned.position(),
            });
        }
    }

    fn occupancy(&self) -> Occupancy<'_> {
        Occupancy { player: self.player_position, population: &self.population }
    }

    fn finish(&mut self, outcome: RunOutcome) {
        self.outcome = Some(outcome);
        self.log.push(LogEvent::RunFinished { outcome });
        info!(?outcome, level = self.level, turn = self.scheduler.turn_count(), "run finished");
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &MapGrid {
        &self.grid
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn player(&self) -> &ActorStatus {
        &self.player
    }

    pub fn player_position(&self) -> Pos {
        self.player_position
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn population(&self) -> &EnemyPopulationManager {
        &self.population
    }

    pub fn scheduler(&self) -> &TurnScheduler {
        &self.scheduler
    }

    /// Lets external observers subscribe to phase transitions.
    pub fn scheduler_mut(&mut self) -> &mut TurnScheduler {
        &mut self.scheduler
    }

    pub fn turn_count(&self) -> u64 {
        self.scheduler.turn_count()
    }

    pub fn presentation(&self) -> &PresentationQueue {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut PresentationQueue {
        &mut self.presentation
    }

    pub fn log(&self) -> &[LogEvent] {
        &self.log
    }

    pub fn journal(&self) -> &InputJournal {
        &self.journal
    }

    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    pub fn snapshot_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u64(self.scheduler.turn_count());
        hasher.write_u8(match self.scheduler.state() {
            TurnState::PlayerIdle => 0,
            TurnState::PlayerRun => 1,
            TurnState::PlayerAction => 2,
            TurnState::EnemyAction => 3,
            TurnState::EnemyPopup => 4,
            TurnState::OnStairs => 5,
            TurnState::Dead => 6,
        });
        hasher.write_u32(self.level);
        hasher.write_u64(self.grid.fingerprint());
        hasher.write_i32(self.player_position.column);
        hasher.write_i32(self.player_position.row);
        hasher.write_i32(self.player.hit_point());
        hasher.write_i32(self.player.exp());
        hasher.write_i32(self.player.gold());
        hasher.write_u64(self.player.turn_count());
        for enemy in self.population.iter() {
            hasher.write_i32(enemy.position().column);
            hasher.write_i32(enemy.position().row);
            hasher.write_i32(enemy.status().hit_point());
            hasher.write(enemy.status().race_key().unwrap_or_default().as_bytes());
        }
        hasher.write_u8(match self.outcome {
            None => 0,
            Some(RunOutcome::Escaped) => 1,
            Some(RunOutcome::Cleared) => 2,
            Some(RunOutcome::Defeat) => 3,
        });
        hasher.finish()
    }
}
