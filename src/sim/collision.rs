//! Collision detection between the car and obstacles
//!
//! Free steering uses plain axis-aligned bounding boxes. Lane steering only
//! compares lanes and the vertical extents, so an obstacle narrower than its
//! lane still blocks the whole lane.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Car, Obstacle};
use crate::tuning::Tuning;

/// Axis-aligned box in playfield coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: boxes that only touch along an edge do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Strict overlap of the vertical ranges only
    pub fn overlaps_vertically(&self, other: &Aabb) -> bool {
        self.min.y < other.max().y && self.max().y > other.min.y
    }
}

/// Whether the car and a single obstacle collide
pub fn car_hits_obstacle(car: &Car, obstacle: &Obstacle, tuning: &Tuning) -> bool {
    let car_box = car.bounds(tuning);
    let obstacle_box = obstacle.bounds();
    match (car.lane, obstacle.lane) {
        (Some(car_lane), Some(obstacle_lane)) => {
            car_lane == obstacle_lane && car_box.overlaps_vertically(&obstacle_box)
        }
        _ => car_box.overlaps(&obstacle_box),
    }
}

/// First obstacle (by iteration order) the car collides with
pub fn first_collision<'a>(car: &Car, obstacles: &'a [Obstacle], tuning: &Tuning) -> Option<&'a Obstacle> {
    obstacles.iter().find(|o| car_hits_obstacle(car, o, tuning))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obstacle_at(x: f32, y: f32, lane: Option<u8>) -> Obstacle {
        Obstacle {
            id: 1,
            pos: Vec2::new(x, y),
            size: Vec2::new(40.0, 40.0),
            lane,
        }
    }

    #[test]
    fn test_aabb_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let a = Aabb::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let right = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        let below = Aabb::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&right));
        assert!(!a.overlaps(&below));
    }

    #[test]
    fn test_free_car_hit_and_miss() {
        let tuning = Tuning::default();
        let car = Car::new(&tuning); // x 175..225, y 700..780
        assert!(car_hits_obstacle(&car, &obstacle_at(190.0, 680.0, None), &tuning));
        // Same height, one car-width to the left
        assert!(!car_hits_obstacle(&car, &obstacle_at(100.0, 700.0, None), &tuning));
        // Directly above but not yet reaching the car
        assert!(!car_hits_obstacle(&car, &obstacle_at(190.0, 600.0, None), &tuning));
    }

    #[test]
    fn test_lane_collision_ignores_x() {
        let tuning = Tuning::lanes(3);
        let car = Car::new(&tuning); // lane 1
        // x is irrelevant once both sides have lanes
        assert!(car_hits_obstacle(&car, &obstacle_at(0.0, 720.0, Some(1)), &tuning));
        assert!(!car_hits_obstacle(&car, &obstacle_at(180.0, 720.0, Some(0)), &tuning));
        assert!(!car_hits_obstacle(&car, &obstacle_at(180.0, 300.0, Some(1)), &tuning));
    }

    #[test]
    fn test_first_collision_picks_earliest() {
        let tuning = Tuning::default();
        let car = Car::new(&tuning);
        let mut a = obstacle_at(190.0, 700.0, None);
        a.id = 4;
        let mut b = obstacle_at(180.0, 710.0, None);
        b.id = 9;
        let miss = obstacle_at(20.0, 100.0, None);
        let obstacles = vec![miss, a, b];
        assert_eq!(first_collision(&car, &obstacles, &tuning).map(|o| o.id), Some(4));
    }
}
