//! Flap Run - a side-scrolling flap-and-dodge game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor physics, fields, collisions, run state)
//! - `config`: Data-driven game balance and variant presets
//! - `highscores`: In-process leaderboard of finished runs
//!
//! Rendering, audio, overlays and input wiring live outside this crate. They read
//! [`sim::Snapshot`] values and the per-tick [`sim::GameEvent`] list, and talk back
//! only through [`sim::TickInput`].

pub mod config;
pub mod highscores;
pub mod sim;

pub use config::{ConfigError, Difficulty, GameConfig, Variant};
pub use highscores::HighScores;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the clock will report (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Display tilt limit for the actor (radians)
    pub const MAX_TILT: f64 = std::f64::consts::FRAC_PI_4;

    /// Score that ends a run in the Win state for both presets
    pub const WIN_SCORE: u32 = 23;
}
