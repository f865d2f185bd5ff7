//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by obstacle ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Aabb, car_hits_obstacle, first_collision};
pub use state::{Car, GameEvent, GamePhase, GameState, Obstacle};
pub use tick::{TickInput, advance_obstacles, advance_score, check_collisions, maybe_spawn_obstacle, spawn_step, tick};
