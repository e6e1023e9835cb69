//! Transient modifiers layered over the base parameters
//!
//! Timed effects count down explicitly each tick instead of scheduling a
//! callback, so a restart simply replaces the whole struct. A new activation
//! resets a running timer; durations never stack.

use serde::{Deserialize, Serialize};

use super::pickup::PickupKind;
use crate::config::{ModifierConfig, SpeedRule};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    /// Scroll speed before the timed multiplier (px/s)
    pub speed: f64,
    pub speed_multiplier: f64,
    pub speed_boost_remaining: f64,
    pub gap_multiplier: f64,
    pub gap_boost_remaining: f64,
    pub focus: f64,
}

impl Modifiers {
    /// Baseline values for a fresh run
    pub fn new(rules: &ModifierConfig) -> Self {
        Self {
            speed: rules.base_speed,
            speed_multiplier: 1.0,
            speed_boost_remaining: 0.0,
            gap_multiplier: 1.0,
            gap_boost_remaining: 0.0,
            focus: 0.0,
        }
    }

    /// Effective scroll speed for this tick
    #[inline]
    pub fn scroll_speed(&self) -> f64 {
        self.speed * self.speed_multiplier
    }

    /// Flap strength multiplier in `[1 - damping, 1]`
    pub fn flap_strength(&self, rules: &ModifierConfig) -> f64 {
        let focus = &rules.focus;
        1.0 - (self.focus / focus.max).clamp(0.0, 1.0) * focus.damping
    }

    /// Expire timers and decay continuous effects toward baseline
    pub fn step(&mut self, dt: f64, rules: &ModifierConfig) {
        match rules.speed {
            SpeedRule::Timed { .. } => {
                if self.speed_boost_remaining > 0.0 {
                    self.speed_boost_remaining -= dt;
                    if self.speed_boost_remaining <= 0.0 {
                        self.speed_boost_remaining = 0.0;
                        self.speed_multiplier = 1.0;
                        log::debug!("speed boost expired");
                    }
                }
            }
            SpeedRule::Ramp { decay, .. } => {
                self.speed = (self.speed - decay * dt).max(rules.base_speed);
            }
        }

        if self.gap_boost_remaining > 0.0 {
            self.gap_boost_remaining -= dt;
            if self.gap_boost_remaining <= 0.0 {
                self.gap_boost_remaining = 0.0;
                self.gap_multiplier = 1.0;
                log::debug!("gap boost expired");
            }
        }

        self.focus = (self.focus - rules.focus.decay * dt).max(0.0);
    }

    /// Apply a collected pickup
    pub fn activate(&mut self, kind: PickupKind, rules: &ModifierConfig) {
        match kind {
            PickupKind::SpeedBoost => match rules.speed {
                SpeedRule::Timed {
                    multiplier,
                    duration,
                } => {
                    self.speed_multiplier = multiplier;
                    self.speed_boost_remaining = duration;
                }
                SpeedRule::Ramp { step, max, .. } => {
                    self.speed = (self.speed + step).min(max);
                }
            },
            PickupKind::FocusBoost => {
                self.focus = (self.focus + rules.focus.gain).min(rules.focus.max);
            }
            PickupKind::GapWiden => {
                self.gap_multiplier = rules.gap.multiplier;
                self.gap_boost_remaining = rules.gap.duration;
            }
        }
        log::debug!(
            "{:?} applied: speed={:.1} gap x{:.2} focus={:.1}",
            kind,
            self.scroll_speed(),
            self.gap_multiplier,
            self.focus
        );
    }
}
