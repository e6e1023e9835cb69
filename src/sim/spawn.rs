//! Spawn cadence
//!
//! Two independent accumulators. Each fires at most once per tick, so a long
//! frame never produces a burst of catch-up spawns.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnTimer {
    pub elapsed: f64,
}

impl SpawnTimer {
    /// Accumulate `dt`; returns true (and restarts from zero) once past `interval`
    pub fn step(&mut self, dt: f64, interval: f64) -> bool {
        self.elapsed += dt;
        if self.elapsed > interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.elapsed = 0.0;
    }
}

/// Which fields should materialize a new entity this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnDue {
    pub obstacle: bool,
    pub pickup: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    pub obstacles: SpawnTimer,
    pub pickups: SpawnTimer,
}

impl SpawnScheduler {
    pub fn step(&mut self, dt: f64, obstacle_interval: f64, pickup_interval: f64) -> SpawnDue {
        SpawnDue {
            obstacle: self.obstacles.step(dt, obstacle_interval),
            pickup: self.pickups.step(dt, pickup_interval),
        }
    }

    pub fn reset(&mut self) {
        self.obstacles.reset();
        self.pickups.reset();
    }
}
