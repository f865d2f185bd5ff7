//! Papa Kart - a car-dodging arcade racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacles, collisions, scoring)
//! - `input`: Drag/swipe/keyboard translation into steering
//! - `game`: Frame driver tying the simulation to wall-clock schedules
//! - `renderer`: CPU-side draw data for road, car and obstacles
//! - `ui`: HUD and game-over view models
//! - `tuning`: Data-driven game balance

pub mod feedback;
pub mod game;
pub mod highscores;
pub mod input;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use game::Game;
pub use highscores::HighScores;
pub use settings::{CarSkin, Settings};
pub use tuning::{Steering, Tuning, TuningError};

/// Engine constants that tuning cannot override
pub mod consts {
    /// Hard cap on simultaneously live obstacles
    pub const MAX_LIVE_OBSTACLES: usize = 5;
    /// Longest frame delta fed to the simulation (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum spawn steps per frame to prevent spiral of death
    pub const MAX_SPAWN_STEPS: u32 = 8;
    /// Frame rate assumed by the headless runner
    pub const DEMO_FRAME_DT: f64 = 1.0 / 60.0;
}
