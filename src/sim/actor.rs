//! The player-controlled actor
//!
//! The world scrolls past a fixed x; only `y` and `velocity` evolve.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::consts::MAX_TILT;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: DVec2,
    /// Vertical velocity (px/s, positive = falling)
    pub velocity: f64,
    /// Display-only lean derived from velocity
    pub tilt: f64,
    pub half_extent: f64,
}

impl Actor {
    pub fn new(x: f64, y: f64, half_extent: f64) -> Self {
        Self {
            pos: DVec2::new(x, y),
            velocity: 0.0,
            tilt: 0.0,
            half_extent,
        }
    }

    #[inline]
    pub fn apply_gravity(&mut self, gravity: f64, dt: f64) {
        self.velocity += gravity * dt;
    }

    /// Overwrite velocity with a (possibly damped) flap; never additive
    pub fn flap(&mut self, impulse: f64, strength: f64) {
        self.velocity = impulse * strength;
    }

    pub fn integrate(&mut self, dt: f64, tilt_factor: f64) {
        self.pos.y += self.velocity * dt;
        self.tilt = (self.velocity * tilt_factor).clamp(-MAX_TILT, MAX_TILT);
    }

    /// Collision box; never feeds back into physics
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.pos, self.half_extent)
    }
}
