//! Game state and core simulation types
//!
//! Everything a session needs to replay deterministically lives here,
//! including the RNG.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::tuning::{Steering, Tuning};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen, nothing moves yet
    Ready,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Car crashed
    GameOver,
}

/// Something that happened during a tick, drained by the driver
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Restarted,
    Paused,
    Resumed,
    ObstacleSpawned { id: u32 },
    ObstacleCleared { id: u32 },
    SpeedUp { speed: u32 },
    Crashed { obstacle_id: u32, score: u64 },
    NewHighScore { score: u64 },
}

/// The player's car
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Left edge (free steering) or derived from `lane`
    pub x: f32,
    /// Current lane (lane steering only)
    pub lane: Option<u8>,
    /// Set once the car hits an obstacle
    pub colliding: bool,
}

impl Car {
    /// Car parked at its starting spot for the given tuning
    pub fn new(tuning: &Tuning) -> Self {
        match tuning.steering {
            Steering::Free => Self {
                x: tuning.car_start_x(),
                lane: None,
                colliding: false,
            },
            Steering::Lanes { .. } => {
                let lane = tuning.start_lane();
                Self {
                    x: Self::lane_x(tuning, lane),
                    lane: Some(lane),
                    colliding: false,
                }
            }
        }
    }

    /// Left edge of a car centred in `lane`
    pub fn lane_x(tuning: &Tuning, lane: u8) -> f32 {
        tuning.lane_center(lane) - tuning.car_width / 2.0
    }

    /// Put the car in a lane, clamped to the lane range. A zero lane count
    /// behaves as a single lane.
    pub fn set_lane(&mut self, tuning: &Tuning, lane: i32) {
        if let Some(count) = tuning.steering.lane_count() {
            let last = i32::from(count.max(1)) - 1;
            let lane = lane.clamp(0, last) as u8;
            self.lane = Some(lane);
            self.x = Self::lane_x(tuning, lane);
        }
    }

    /// Move the car's left edge, clamped to the road (the left edge wins
    /// when the car is wider than the road)
    pub fn set_x(&mut self, tuning: &Tuning, x: f32) {
        self.x = x.min(tuning.car_max_x()).max(tuning.car_min_x());
    }

    pub fn bounds(&self, tuning: &Tuning) -> Aabb {
        Aabb::new(
            Vec2::new(self.x, tuning.car_top()),
            Vec2::new(tuning.car_width, tuning.car_height),
        )
    }
}

/// An obstacle scrolling down the road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Lane the obstacle occupies (lane steering only)
    pub lane: Option<u8>,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Gameplay constants this session runs with
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub car: Car,
    /// Live obstacles, sorted by id
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// Fractional points not yet credited to `score`
    pub score_carry: f32,
    /// Current obstacle advance per spawn tick
    pub speed: u32,
    /// Best score this process has seen
    pub high_score: u64,
    /// Frame ticks this session
    pub time_ticks: u64,
    /// Spawn ticks this session
    pub spawn_ticks: u64,
    /// Seconds survived this session
    pub elapsed: f32,
    /// Road scrolled this session (px), drives lane marker animation
    pub road_offset: f32,
    /// Events since the driver last drained them
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a session in the `Ready` phase
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            car: Car::new(&tuning),
            speed: tuning.base_speed,
            tuning,
            phase: GamePhase::Ready,
            obstacles: Vec::new(),
            score: 0,
            score_carry: 0.0,
            high_score: 0,
            time_ticks: 0,
            spawn_ticks: 0,
            elapsed: 0.0,
            road_offset: 0.0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Leave the start screen
    pub fn start(&mut self) {
        if self.phase == GamePhase::Ready {
            self.phase = GamePhase::Playing;
            self.events.push(GameEvent::Started);
            log::info!("Session started (seed {})", self.seed);
        }
    }

    /// Reset everything except the high score and begin playing
    pub fn restart(&mut self, seed: u64) {
        let high_score = self.high_score;
        let mut events = std::mem::take(&mut self.events);
        *self = Self::new(seed, self.tuning.clone());
        self.high_score = high_score;
        self.phase = GamePhase::Playing;
        events.push(GameEvent::Restarted);
        self.events = events;
        log::info!("Session restarted (seed {seed}, best {high_score})");
    }

    /// Pause while playing, resume while paused
    pub fn toggle_pause(&mut self) {
        match self.phase {
            GamePhase::Playing => {
                self.phase = GamePhase::Paused;
                self.events.push(GameEvent::Paused);
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Playing;
                self.events.push(GameEvent::Resumed);
            }
            GamePhase::Ready | GamePhase::GameOver => {}
        }
    }

    /// Whether the car currently accepts steering
    pub fn accepts_input(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
