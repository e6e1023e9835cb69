//! Game configuration and balance tables
//!
//! Everything tunable lives in [`GameConfig`]. Two presets reproduce the two
//! shipped variants; custom tables can be loaded from JSON. A config is checked
//! once by [`GameConfig::validate`] and the simulation trusts it afterwards.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::WIN_SCORE;

/// Difficulty levels (selectable from the menu only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Built-in balance presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Timed gap/speed boosts, fixed scroll speed
    #[default]
    Classic,
    /// Focus meter that dampens flaps, speed that ramps with pickups and decays
    Focus,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Classic => "Classic",
            Variant::Focus => "Focus",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "classic" => Some(Variant::Classic),
            "focus" => Some(Variant::Focus),
            _ => None,
        }
    }
}

/// Per-difficulty obstacle parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParams {
    /// Vertical size of the open channel
    pub gap_height: f64,
    /// Seconds between obstacle spawns
    pub obstacle_interval: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTable {
    pub easy: DifficultyParams,
    pub medium: DifficultyParams,
    pub hard: DifficultyParams,
}

impl DifficultyTable {
    /// Same parameters on every difficulty
    pub fn uniform(params: DifficultyParams) -> Self {
        Self {
            easy: params,
            medium: params,
            hard: params,
        }
    }

    pub fn get(&self, difficulty: Difficulty) -> &DifficultyParams {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

/// Actor physics. Units are pixels and seconds, +y points down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorConfig {
    /// Fixed horizontal position
    pub x: f64,
    /// Downward acceleration (px/s²)
    pub gravity: f64,
    /// Velocity set by a full-strength flap (negative = up)
    pub flap_impulse: f64,
    /// Half side of the square collision box
    pub half_extent: f64,
    /// Radius used for pickup proximity
    pub pickup_reach: f64,
    /// Tilt radians per px/s of vertical velocity
    pub tilt_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleConfig {
    /// Horizontal thickness of an obstacle
    pub width: f64,
    /// Minimum solid span above and below the gap
    pub margin: f64,
    /// Spawn distance past the right edge of the playfield
    pub spawn_offset: f64,
}

/// Relative spawn odds per pickup kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PickupWeights {
    pub speed_boost: u32,
    pub focus_boost: u32,
    pub gap_widen: u32,
}

impl PickupWeights {
    /// Sum of all weights, `None` if it does not fit in a `u32`
    pub fn total(&self) -> Option<u32> {
        self.speed_boost
            .checked_add(self.focus_boost)?
            .checked_add(self.gap_widen)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupConfig {
    pub radius: f64,
    /// Distance kept from the top and bottom edges when placing a pickup
    pub margin: f64,
    /// Seconds between pickup spawns
    pub interval: f64,
    /// Pickups spawn at the right edge plus a random offset in `[0, spawn_jitter)`
    pub spawn_jitter: f64,
    pub weights: PickupWeights,
}

/// How a speed pickup changes scroll speed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SpeedRule {
    /// Multiply the base speed for a fixed time, then snap back
    Timed { multiplier: f64, duration: f64 },
    /// Add `step` up to `max`; speed decays toward base by `decay` px/s every second
    Ramp { step: f64, max: f64, decay: f64 },
}

/// Temporary gap widening
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GapRule {
    pub multiplier: f64,
    pub duration: f64,
}

/// Focus meter rules
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FocusRule {
    /// Focus added per focus pickup
    pub gain: f64,
    /// Meter ceiling
    pub max: f64,
    /// Focus lost per second
    pub decay: f64,
    /// Fraction of flap strength removed at full focus
    pub damping: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifierConfig {
    /// Baseline scroll speed (px/s)
    pub base_speed: f64,
    pub speed: SpeedRule,
    pub gap: GapRule,
    pub focus: FocusRule,
}

impl ModifierConfig {
    /// Largest gap multiplier a pickup can produce
    pub fn max_gap_multiplier(&self) -> f64 {
        self.gap.multiplier.max(1.0)
    }
}

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Playfield width
    pub width: f64,
    /// Playfield height
    pub height: f64,
    pub actor: ActorConfig,
    pub obstacles: ObstacleConfig,
    pub pickups: PickupConfig,
    pub difficulties: DifficultyTable,
    pub modifiers: ModifierConfig,
    /// Score that ends the run in the Win state (`None` = endless)
    #[serde(default)]
    pub win_score: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::preset(Variant::Classic)
    }
}

/// Configuration rejected by [`GameConfig::validate`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number (got {value})")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be a finite number (got {value})")]
    NotFinite { field: &'static str, value: f64 },
    #[error("actor x {x} lies outside the playfield width {width}")]
    ActorOutsidePlayfield { x: f64, width: f64 },
    #[error("{difficulty:?} gap of {gap} (widened) does not fit: only {available} px between margins")]
    GapDoesNotFit {
        difficulty: Difficulty,
        gap: f64,
        available: f64,
    },
    #[error("pickup margin {margin} leaves no room in a playfield {height} high")]
    NoPickupRoom { margin: f64, height: f64 },
    #[error("pickup weights sum to zero")]
    NoPickupWeights,
    #[error("pickup weights overflow when summed")]
    PickupWeightsOverflow,
    #[error("focus damping must be within [0, 1] (got {0})")]
    FocusDamping(f64),
    #[error("speed ceiling {max} is below base speed {base}")]
    SpeedCeilingBelowBase { max: f64, base: f64 },
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite { field, value })
    }
}

impl GameConfig {
    /// Balance table for a built-in variant
    pub fn preset(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Focus => Self::focus(),
        }
    }

    fn classic() -> Self {
        let width = 1280.0;
        Self {
            width,
            height: 720.0,
            actor: ActorConfig {
                x: width / 3.0,
                gravity: 800.0,
                flap_impulse: -400.0,
                half_extent: 30.0,
                pickup_reach: 15.0,
                tilt_factor: 1.0 / 1000.0,
            },
            obstacles: ObstacleConfig {
                width: 60.0,
                margin: 100.0,
                spawn_offset: 0.0,
            },
            pickups: PickupConfig {
                radius: 15.0,
                margin: 50.0,
                interval: 5.0,
                spawn_jitter: 0.0,
                weights: PickupWeights {
                    speed_boost: 1,
                    focus_boost: 0,
                    gap_widen: 2,
                },
            },
            difficulties: DifficultyTable::uniform(DifficultyParams {
                gap_height: 200.0,
                obstacle_interval: 2.0,
            }),
            modifiers: ModifierConfig {
                base_speed: 300.0,
                speed: SpeedRule::Timed {
                    multiplier: 1.5,
                    duration: 5.0,
                },
                gap: GapRule {
                    multiplier: 1.5,
                    duration: 5.0,
                },
                focus: FocusRule {
                    gain: 0.0,
                    max: 100.0,
                    decay: 0.0,
                    damping: 0.0,
                },
            },
            win_score: Some(WIN_SCORE),
        }
    }

    // The focus variant was tuned in 20 ms frames; values here are per second.
    fn focus() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
            actor: ActorConfig {
                x: 100.0,
                gravity: 2000.0,
                flap_impulse: -600.0,
                half_extent: 20.0,
                pickup_reach: 5.0,
                tilt_factor: 1.0 / 1000.0,
            },
            obstacles: ObstacleConfig {
                width: 60.0,
                margin: 50.0,
                spawn_offset: 400.0,
            },
            pickups: PickupConfig {
                radius: 25.0,
                margin: 50.0,
                interval: 0.3,
                spawn_jitter: 400.0,
                weights: PickupWeights {
                    speed_boost: 7,
                    focus_boost: 3,
                    gap_widen: 0,
                },
            },
            difficulties: DifficultyTable {
                easy: DifficultyParams {
                    gap_height: 325.0,
                    obstacle_interval: 2.0,
                },
                medium: DifficultyParams {
                    gap_height: 275.0,
                    obstacle_interval: 2.0,
                },
                hard: DifficultyParams {
                    gap_height: 200.0,
                    obstacle_interval: 2.0,
                },
            },
            modifiers: ModifierConfig {
                base_speed: 150.0,
                speed: SpeedRule::Ramp {
                    step: 25.0,
                    max: 400.0,
                    decay: 12.5,
                },
                gap: GapRule {
                    multiplier: 1.0,
                    duration: 0.0,
                },
                focus: FocusRule {
                    gain: 25.0,
                    max: 100.0,
                    decay: 15.0,
                    damping: 0.5,
                },
            },
            win_score: Some(WIN_SCORE),
        }
    }

    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject tables that would make placement impossible or physics meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("width", self.width)?;
        positive("height", self.height)?;

        let actor = &self.actor;
        finite("actor.gravity", actor.gravity)?;
        finite("actor.flap_impulse", actor.flap_impulse)?;
        finite("actor.tilt_factor", actor.tilt_factor)?;
        positive("actor.half_extent", actor.half_extent)?;
        non_negative("actor.pickup_reach", actor.pickup_reach)?;
        if !(actor.x.is_finite() && actor.x > 0.0 && actor.x < self.width) {
            return Err(ConfigError::ActorOutsidePlayfield {
                x: actor.x,
                width: self.width,
            });
        }

        positive("obstacles.width", self.obstacles.width)?;
        non_negative("obstacles.margin", self.obstacles.margin)?;
        non_negative("obstacles.spawn_offset", self.obstacles.spawn_offset)?;

        let mods = &self.modifiers;
        positive("modifiers.base_speed", mods.base_speed)?;
        match mods.speed {
            SpeedRule::Timed {
                multiplier,
                duration,
            } => {
                positive("modifiers.speed.multiplier", multiplier)?;
                non_negative("modifiers.speed.duration", duration)?;
            }
            SpeedRule::Ramp { step, max, decay } => {
                non_negative("modifiers.speed.step", step)?;
                non_negative("modifiers.speed.decay", decay)?;
                if !(max.is_finite() && max >= mods.base_speed) {
                    return Err(ConfigError::SpeedCeilingBelowBase {
                        max,
                        base: mods.base_speed,
                    });
                }
            }
        }
        positive("modifiers.gap.multiplier", mods.gap.multiplier)?;
        non_negative("modifiers.gap.duration", mods.gap.duration)?;
        non_negative("modifiers.focus.gain", mods.focus.gain)?;
        positive("modifiers.focus.max", mods.focus.max)?;
        non_negative("modifiers.focus.decay", mods.focus.decay)?;
        if !(0.0..=1.0).contains(&mods.focus.damping) {
            return Err(ConfigError::FocusDamping(mods.focus.damping));
        }

        let available = self.height - 2.0 * self.obstacles.margin;
        for difficulty in Difficulty::ALL {
            let params = self.difficulties.get(difficulty);
            positive("difficulties.gap_height", params.gap_height)?;
            positive("difficulties.obstacle_interval", params.obstacle_interval)?;
            let widest = params.gap_height * mods.max_gap_multiplier();
            if widest > available {
                return Err(ConfigError::GapDoesNotFit {
                    difficulty,
                    gap: widest,
                    available,
                });
            }
        }

        let pickups = &self.pickups;
        positive("pickups.radius", pickups.radius)?;
        positive("pickups.interval", pickups.interval)?;
        non_negative("pickups.spawn_jitter", pickups.spawn_jitter)?;
        non_negative("pickups.margin", pickups.margin)?;
        if self.height - 2.0 * pickups.margin <= 0.0 {
            return Err(ConfigError::NoPickupRoom {
                margin: pickups.margin,
                height: self.height,
            });
        }
        match pickups.weights.total() {
            None => return Err(ConfigError::PickupWeightsOverflow),
            Some(0) => return Err(ConfigError::NoPickupWeights),
            Some(_) => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for variant in [Variant::Classic, Variant::Focus] {
            let config = GameConfig::preset(variant);
            assert!(config.validate().is_ok(), "{} preset invalid", variant.as_str());
        }
    }

    #[test]
    fn test_gap_too_large_is_rejected() {
        let mut config = GameConfig::preset(Variant::Classic);
        config.difficulties.hard.gap_height = config.height;
        match config.validate() {
            Err(ConfigError::GapDoesNotFit { difficulty, .. }) => {
                assert_eq!(difficulty, Difficulty::Hard)
            }
            other => panic!("expected GapDoesNotFit, got {other:?}"),
        }
    }

    #[test]
    fn test_widened_gap_counts_toward_fit() {
        // 350 fits in 520 on its own, but not once widened by 1.5
        let mut config = GameConfig::preset(Variant::Classic);
        config.difficulties.easy.gap_height = 350.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::GapDoesNotFit { .. })
        ));
    }

    #[test]
    fn test_zero_weights_rejected() {
        let mut config = GameConfig::preset(Variant::Focus);
        config.pickups.weights = PickupWeights::default();
        assert!(matches!(config.validate(), Err(ConfigError::NoPickupWeights)));
    }

    #[test]
    fn test_overflowing_weights_rejected_from_json() {
        let mut config = GameConfig::preset(Variant::Focus);
        config.pickups.weights = PickupWeights {
            speed_boost: u32::MAX,
            focus_boost: 2,
            gap_widen: 0,
        };
        assert_eq!(config.pickups.weights.total(), None);

        let json = serde_json::to_string(&config).unwrap();
        assert!(matches!(
            GameConfig::from_json(&json),
            Err(ConfigError::PickupWeightsOverflow)
        ));
    }

    #[test]
    fn test_bad_damping_and_intervals_rejected() {
        let mut config = GameConfig::preset(Variant::Focus);
        config.modifiers.focus.damping = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::FocusDamping(_))));

        let mut config = GameConfig::preset(Variant::Focus);
        config.pickups.interval = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "pickups.interval",
                ..
            })
        ));

        let mut config = GameConfig::preset(Variant::Classic);
        config.actor.x = config.width + 1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ActorOutsidePlayfield { .. })
        ));
    }

    #[test]
    fn test_json_roundtrip_and_rejection() {
        let config = GameConfig::preset(Variant::Focus);
        let json = config.to_json().unwrap();
        let parsed = GameConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);

        let mut broken = config.clone();
        broken.height = 100.0;
        let json = serde_json::to_string(&broken).unwrap();
        assert!(GameConfig::from_json(&json).is_err());

        assert!(matches!(
            GameConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_difficulty_parse() {
        assert_eq!(Difficulty::parse("EASY"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("med"), Some(Difficulty::Medium));
        assert_eq!(Difficulty::parse("nightmare"), None);
        assert_eq!(Variant::parse("Focus"), Some(Variant::Focus));
        assert_eq!(Difficulty::default().as_str(), "Medium");
    }
}
