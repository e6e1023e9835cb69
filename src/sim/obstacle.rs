//! Obstacle field
//!
//! Each obstacle is a vertical wall with one open channel. The gap height is
//! not stored per obstacle: it comes from the difficulty table times the live
//! gap multiplier, so a widening pickup opens every gap on screen at once.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Aabb, actor_hits_obstacle};
use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Leading (left) edge
    pub x: f64,
    /// Top of the open channel
    pub gap_top: f64,
    /// Set once, when the trailing edge moves left of the actor
    pub passed: bool,
}

impl Obstacle {
    #[inline]
    pub fn trailing_edge(&self, width: f64) -> f64 {
        self.x + width
    }

    /// Top and bottom solid rectangles for a given gap height
    pub fn solid_rects(&self, width: f64, gap_height: f64, field_height: f64) -> [Aabb; 2] {
        let gap_bottom = self.gap_top + gap_height;
        [
            Aabb::from_rect(self.x, 0.0, width, self.gap_top),
            Aabb::from_rect(self.x, gap_bottom, width, (field_height - gap_bottom).max(0.0)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleField {
    /// Live obstacles in spawn order (left to right)
    pub obstacles: Vec<Obstacle>,
    pub width: f64,
    pub margin: f64,
    pub spawn_x: f64,
    pub field_height: f64,
}

impl ObstacleField {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            obstacles: Vec::new(),
            width: config.obstacles.width,
            margin: config.obstacles.margin,
            spawn_x: config.width + config.obstacles.spawn_offset,
            field_height: config.height,
        }
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Valid `gap_top` interval for a gap height (may be empty)
    pub fn gap_top_range(&self, gap_height: f64) -> (f64, f64) {
        (self.margin, self.field_height - self.margin - gap_height)
    }

    /// Place a new obstacle at the spawn edge with a uniformly random gap
    pub fn spawn<R: Rng>(&mut self, id: u32, gap_height: f64, rng: &mut R) -> &Obstacle {
        let (lo, hi) = self.gap_top_range(gap_height);
        let gap_top = if hi > lo {
            lo + rng.random::<f64>() * (hi - lo)
        } else {
            if hi < lo {
                log::warn!(
                    "gap {} does not fit playfield {}, clamping to margin",
                    gap_height,
                    self.field_height
                );
            }
            lo
        };
        log::debug!("obstacle {} spawned at x={} gap_top={:.1}", id, self.spawn_x, gap_top);
        self.obstacles.push(Obstacle {
            id,
            x: self.spawn_x,
            gap_top,
            passed: false,
        });
        &self.obstacles[self.obstacles.len() - 1]
    }

    /// Scroll left and drop anything whose trailing edge has left the screen
    pub fn advance(&mut self, dt: f64, speed: f64) {
        let width = self.width;
        for obstacle in &mut self.obstacles {
            obstacle.x -= speed * dt;
        }
        self.obstacles.retain(|o| o.trailing_edge(width) > 0.0);
    }

    /// Mark obstacles whose trailing edge is strictly left of `actor_x`.
    /// Returns how many flipped this call; each flip is one point.
    pub fn check_passed(&mut self, actor_x: f64) -> u32 {
        let width = self.width;
        let mut newly_passed = 0;
        for obstacle in self.obstacles.iter_mut().filter(|o| !o.passed) {
            if obstacle.trailing_edge(width) < actor_x {
                obstacle.passed = true;
                newly_passed += 1;
            }
        }
        newly_passed
    }

    pub fn collides_with(&self, actor: &Aabb, gap_height: f64) -> bool {
        self.obstacles
            .iter()
            .any(|o| actor_hits_obstacle(actor, o, self.width, gap_height, self.field_height))
    }
}
