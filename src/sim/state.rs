//! Run state and the phase machine
//!
//! `GameState` owns everything that changes during play. Phase and score are
//! private: they only move through the transition methods below.

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::collision::Aabb;
use super::modifiers::Modifiers;
use super::obstacle::ObstacleField;
use super::pickup::{PickupField, PickupKind};
use super::spawn::SpawnScheduler;
use crate::config::{ConfigError, Difficulty, GameConfig};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for a run to start; difficulty can change here
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended by a collision
    GameOver,
    /// Win score reached; frozen until acknowledged
    Win,
}

/// Discrete things that happened during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    Scored,
    Collected(PickupKind),
    GameOver,
    Won,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Validated; replace only through [`GameState::set_config`]
    pub(crate) config: GameConfig,
    /// Seed every run starts from
    pub seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    difficulty: Difficulty,
    score: u32,
    high_score: u32,
    /// High score before the current run; a cancelled run falls back to it
    run_start_high_score: u32,
    pub actor: Actor,
    pub obstacles: ObstacleField,
    pub pickups: PickupField,
    pub spawner: SpawnScheduler,
    pub modifiers: Modifiers,
    /// Seconds since the last phase transition
    pub elapsed_since_phase_change: f64,
    /// Simulation ticks advanced over the session
    pub time_ticks: u64,
    pub runs_started: u32,
    next_id: u32,
}

impl GameState {
    /// Create a session in the menu. The config is validated here.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            seed,
            phase: GamePhase::Menu,
            difficulty: Difficulty::default(),
            score: 0,
            high_score: 0,
            run_start_high_score: 0,
            actor: Self::fresh_actor(&config),
            obstacles: ObstacleField::new(&config),
            pickups: PickupField::new(&config),
            spawner: SpawnScheduler::default(),
            modifiers: Modifiers::new(&config.modifiers),
            elapsed_since_phase_change: 0.0,
            time_ticks: 0,
            runs_started: 0,
            next_id: 1,
            config,
        })
    }

    fn fresh_actor(config: &GameConfig) -> Actor {
        Actor::new(config.actor.x, config.height / 2.0, config.actor.half_extent)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Swap in a new config and rebuild the world from it. Refused mid-run.
    pub fn set_config(&mut self, config: GameConfig) -> Result<bool, ConfigError> {
        if self.phase == GamePhase::Playing {
            return Ok(false);
        }
        config.validate()?;
        self.obstacles = ObstacleField::new(&config);
        self.pickups = PickupField::new(&config);
        self.config = config;
        self.reset_world();
        log::info!("config replaced");
        Ok(true)
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Gap height in effect right now (difficulty base × live multiplier)
    pub fn gap_height(&self) -> f64 {
        self.config.difficulties.get(self.difficulty).gap_height * self.modifiers.gap_multiplier
    }

    pub fn obstacle_interval(&self) -> f64 {
        self.config.difficulties.get(self.difficulty).obstacle_interval
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub(crate) fn spawn_obstacle(&mut self) {
        let id = self.next_entity_id();
        let gap = self.gap_height();
        self.obstacles.spawn(id, gap, &mut self.rng);
    }

    pub(crate) fn spawn_pickup(&mut self) {
        let id = self.next_entity_id();
        self.pickups.spawn(id, &mut self.rng);
    }

    fn set_phase(&mut self, phase: GamePhase) {
        log::info!("phase {:?} -> {:?} (score {})", self.phase, phase, self.score);
        self.phase = phase;
        self.elapsed_since_phase_change = 0.0;
    }

    /// Only honoured in the menu. Returns whether the difficulty changed.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != GamePhase::Menu || self.difficulty == difficulty {
            return false;
        }
        log::info!("difficulty set to {}", difficulty.as_str());
        self.difficulty = difficulty;
        true
    }

    /// Change the seed used by subsequent runs. Refused mid-run.
    pub fn reseed(&mut self, seed: u64) -> bool {
        if self.phase == GamePhase::Playing {
            return false;
        }
        self.seed = seed;
        true
    }

    /// Menu/GameOver -> Playing with a fully reset world and one seeded obstacle
    pub fn start_run(&mut self) -> bool {
        if !matches!(self.phase, GamePhase::Menu | GamePhase::GameOver) {
            return false;
        }
        self.reset_world();
        self.spawn_obstacle();
        self.run_start_high_score = self.high_score;
        self.runs_started += 1;
        self.set_phase(GamePhase::Playing);
        true
    }

    /// Playing/GameOver/Win -> Menu, discarding the world
    pub fn return_to_menu(&mut self) -> bool {
        if self.phase == GamePhase::Menu {
            return false;
        }
        if self.phase == GamePhase::Playing {
            log::info!("run abandoned at score {}", self.score);
            self.high_score = self.run_start_high_score;
        }
        self.reset_world();
        self.set_phase(GamePhase::Menu);
        true
    }

    fn reset_world(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
        self.score = 0;
        self.actor = Self::fresh_actor(&self.config);
        self.obstacles.clear();
        self.pickups.clear();
        self.spawner.reset();
        self.modifiers = Modifiers::new(&self.config.modifiers);
    }

    /// One point per passed obstacle. The high score follows along live and is
    /// rolled back if the run is abandoned.
    pub(crate) fn record_pass(&mut self) {
        self.score += 1;
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    pub fn win_reached(&self) -> bool {
        self.config.win_score.is_some_and(|target| self.score >= target)
    }

    /// Playing -> Win
    pub(crate) fn win(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.set_phase(GamePhase::Win);
        true
    }

    /// Playing -> GameOver. Repeat signals are no-ops.
    pub(crate) fn game_over(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        if self.score > self.high_score {
            self.high_score = self.score;
        }
        self.set_phase(GamePhase::GameOver);
        true
    }

    /// Immutable view for renderers and overlays
    pub fn snapshot(&self) -> Snapshot {
        let gap = self.gap_height();
        let obstacles = self
            .obstacles
            .iter()
            .map(|o| {
                let [top, bottom] = o.solid_rects(self.obstacles.width, gap, self.config.height);
                ObstacleView {
                    id: o.id,
                    x: o.x,
                    width: self.obstacles.width,
                    gap_top: o.gap_top,
                    gap_bottom: o.gap_top + gap,
                    passed: o.passed,
                    top,
                    bottom,
                }
            })
            .collect();
        let pickups = self
            .pickups
            .iter()
            .map(|p| PickupView {
                id: p.id,
                pos: p.pos,
                radius: self.pickups.radius,
                kind: p.kind,
                collected: p.collected,
            })
            .collect();

        Snapshot {
            phase: self.phase,
            difficulty: self.difficulty,
            score: self.score,
            high_score: self.high_score,
            width: self.config.width,
            height: self.config.height,
            actor: ActorPose {
                pos: self.actor.pos,
                velocity: self.actor.velocity,
                tilt: self.actor.tilt,
                bounds: self.actor.bounds(),
            },
            obstacles,
            pickups,
            scroll_speed: self.modifiers.scroll_speed(),
            gap_multiplier: self.modifiers.gap_multiplier,
            focus: self.modifiers.focus,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorPose {
    pub pos: DVec2,
    pub velocity: f64,
    pub tilt: f64,
    pub bounds: Aabb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f64,
    pub width: f64,
    pub gap_top: f64,
    pub gap_bottom: f64,
    pub passed: bool,
    pub top: Aabb,
    pub bottom: Aabb,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupView {
    pub id: u32,
    pub pos: DVec2,
    pub radius: f64,
    pub kind: PickupKind,
    pub collected: bool,
}

/// Post-tick copy of everything a renderer or overlay may read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub score: u32,
    pub high_score: u32,
    pub width: f64,
    pub height: f64,
    pub actor: ActorPose,
    pub obstacles: Vec<ObstacleView>,
    pub pickups: Vec<PickupView>,
    pub scroll_speed: f64,
    pub gap_multiplier: f64,
    pub focus: f64,
}
