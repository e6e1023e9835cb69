//! Pickup field
//!
//! Collection flips `collected` and leaves the pickup in place for one more
//! snapshot; it is dropped on the next advance.

use glam::DVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::actor_reaches_pickup;
use crate::config::{GameConfig, PickupWeights};

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickupKind {
    /// Faster scrolling (timed multiplier or ramp, per config)
    SpeedBoost,
    /// Raises the focus meter
    FocusBoost,
    /// Temporarily widens every gap
    GapWiden,
}

impl PickupKind {
    pub const ALL: [PickupKind; 3] = [
        PickupKind::SpeedBoost,
        PickupKind::FocusBoost,
        PickupKind::GapWiden,
    ];

    pub fn weight(&self, weights: &PickupWeights) -> u32 {
        match self {
            PickupKind::SpeedBoost => weights.speed_boost,
            PickupKind::FocusBoost => weights.focus_boost,
            PickupKind::GapWiden => weights.gap_widen,
        }
    }

    /// Weighted draw over [`PickupKind::ALL`]
    pub fn roll<R: Rng>(weights: &PickupWeights, rng: &mut R) -> Self {
        let total = match weights.total() {
            Some(total) if total > 0 => total,
            _ => return PickupKind::SpeedBoost,
        };
        let mut roll = rng.random_range(0..total);
        for kind in Self::ALL {
            let weight = kind.weight(weights);
            if roll < weight {
                return kind;
            }
            roll -= weight;
        }
        PickupKind::SpeedBoost
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: DVec2,
    pub collected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PickupField {
    /// Live pickups in spawn order
    pub pickups: Vec<Pickup>,
    pub radius: f64,
    pub margin: f64,
    pub spawn_x: f64,
    pub spawn_jitter: f64,
    pub field_height: f64,
    pub weights: PickupWeights,
}

impl PickupField {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            pickups: Vec::new(),
            radius: config.pickups.radius,
            margin: config.pickups.margin,
            spawn_x: config.width,
            spawn_jitter: config.pickups.spawn_jitter,
            field_height: config.height,
            weights: config.pickups.weights,
        }
    }

    pub fn clear(&mut self) {
        self.pickups.clear();
    }

    pub fn len(&self) -> usize {
        self.pickups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter()
    }

    pub fn spawn<R: Rng>(&mut self, id: u32, rng: &mut R) -> &Pickup {
        let x = self.spawn_x + rng.random::<f64>() * self.spawn_jitter;
        let y = self.margin + rng.random::<f64>() * (self.field_height - 2.0 * self.margin);
        let kind = PickupKind::roll(&self.weights, rng);
        log::debug!("pickup {} ({:?}) spawned at ({:.1}, {:.1})", id, kind, x, y);
        self.pickups.push(Pickup {
            id,
            kind,
            pos: DVec2::new(x, y),
            collected: false,
        });
        &self.pickups[self.pickups.len() - 1]
    }

    /// Drop last tick's collections, scroll, prune past the left edge
    pub fn advance(&mut self, dt: f64, speed: f64) {
        let radius = self.radius;
        self.pickups.retain(|p| !p.collected);
        for pickup in &mut self.pickups {
            pickup.pos.x -= speed * dt;
        }
        self.pickups.retain(|p| p.pos.x + radius > 0.0);
    }

    /// Collect the first reachable pickup in spawn order, at most one per call
    pub fn check_collected(&mut self, actor_center: DVec2, actor_reach: f64) -> Option<&Pickup> {
        let radius = self.radius;
        let hit = self
            .pickups
            .iter_mut()
            .filter(|p| !p.collected)
            .find(|p| actor_reaches_pickup(actor_center, actor_reach, p.pos, radius))?;
        hit.collected = true;
        Some(&*hit)
    }
}
