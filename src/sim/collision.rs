//! Collision predicates
//!
//! Pure geometry, no state: actor vs playfield bounds, actor vs obstacle
//! rectangles, actor vs pickup circles. Touching edges count as contact
//! everywhere.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::obstacle::Obstacle;

/// Axis-aligned box, `min` is the top-left corner (+y down)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec2,
    pub max: DVec2,
}

impl Aabb {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self { min, max }
    }

    /// Box from a top-left corner and a size
    pub fn from_rect(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            max: DVec2::new(x + width, y + height),
        }
    }

    pub fn from_center(center: DVec2, half_extent: f64) -> Self {
        let half = DVec2::splat(half_extent);
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> DVec2 {
        (self.min + self.max) * 0.5
    }

    /// Closed-interval overlap test
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// Actor box touching or leaving the top/bottom of the playfield
pub fn actor_out_of_bounds(actor: &Aabb, field_height: f64) -> bool {
    actor.min.y <= 0.0 || actor.max.y >= field_height
}

/// Actor box against both solid parts of one obstacle
pub fn actor_hits_obstacle(
    actor: &Aabb,
    obstacle: &Obstacle,
    obstacle_width: f64,
    gap_height: f64,
    field_height: f64,
) -> bool {
    let [top, bottom] = obstacle.solid_rects(obstacle_width, gap_height, field_height);
    actor.intersects(&top) || actor.intersects(&bottom)
}

/// Circle proximity between actor center and pickup center
#[inline]
pub fn actor_reaches_pickup(
    actor_center: DVec2,
    actor_reach: f64,
    pickup_center: DVec2,
    pickup_radius: f64,
) -> bool {
    let threshold = actor_reach + pickup_radius;
    actor_center.distance_squared(pickup_center) <= threshold * threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_touching_edges_intersect() {
        let a = Aabb::from_rect(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::from_rect(10.0, 0.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));

        let c = Aabb::from_rect(10.001, 0.0, 10.0, 10.0);
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_aabb_from_center() {
        let b = Aabb::from_center(DVec2::new(100.0, 50.0), 30.0);
        assert_eq!(b.min, DVec2::new(70.0, 20.0));
        assert_eq!(b.max, DVec2::new(130.0, 80.0));
        assert_eq!(b.width(), 60.0);
        assert_eq!(b.center(), DVec2::new(100.0, 50.0));
    }

    #[test]
    fn test_out_of_bounds() {
        let height = 720.0;
        assert!(!actor_out_of_bounds(
            &Aabb::from_center(DVec2::new(0.0, 360.0), 30.0),
            height
        ));
        // Touching the ceiling counts
        assert!(actor_out_of_bounds(
            &Aabb::from_center(DVec2::new(0.0, 30.0), 30.0),
            height
        ));
        assert!(actor_out_of_bounds(
            &Aabb::from_center(DVec2::new(0.0, 690.0), 30.0),
            height
        ));
        assert!(actor_out_of_bounds(
            &Aabb::from_center(DVec2::new(0.0, 800.0), 30.0),
            height
        ));
    }

    #[test]
    fn test_obstacle_hit_top_bottom_and_gap() {
        let obstacle = Obstacle {
            id: 1,
            x: 100.0,
            gap_top: 200.0,
            passed: false,
        };
        let (width, gap, height) = (60.0, 200.0, 720.0);

        // Centered in the gap: clear
        let inside = Aabb::from_center(DVec2::new(130.0, 300.0), 30.0);
        assert!(!actor_hits_obstacle(&inside, &obstacle, width, gap, height));

        // Clipping the top pipe
        let high = Aabb::from_center(DVec2::new(130.0, 220.0), 30.0);
        assert!(actor_hits_obstacle(&high, &obstacle, width, gap, height));

        // Clipping the bottom pipe
        let low = Aabb::from_center(DVec2::new(130.0, 380.0), 30.0);
        assert!(actor_hits_obstacle(&low, &obstacle, width, gap, height));

        // Same height but horizontally clear of the obstacle
        let ahead = Aabb::from_center(DVec2::new(20.0, 220.0), 30.0);
        assert!(!actor_hits_obstacle(&ahead, &obstacle, width, gap, height));
    }

    #[test]
    fn test_pickup_reach() {
        let actor = DVec2::new(100.0, 100.0);
        assert!(actor_reaches_pickup(actor, 15.0, DVec2::new(130.0, 100.0), 15.0));
        assert!(!actor_reaches_pickup(actor, 15.0, DVec2::new(130.5, 100.0), 15.0));
        assert!(actor_reaches_pickup(actor, 15.0, actor, 15.0));
    }
}
