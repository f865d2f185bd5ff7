//! Data-driven game balance
//!
//! Every gameplay constant lives in [`Tuning`]. Missing JSON fields fall back
//! to the defaults, so a tuning file only needs the values it changes.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LIVE_OBSTACLES;

/// How the car is steered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Steering {
    /// Continuous x position clamped to the road
    #[default]
    Free,
    /// Discrete lanes
    Lanes { count: u8 },
}

impl Steering {
    pub fn lane_count(&self) -> Option<u8> {
        match self {
            Steering::Free => None,
            Steering::Lanes { count } => Some(*count),
        }
    }
}

/// Gameplay constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub steering: Steering,

    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Width of the road edge on each side
    pub road_padding: f32,

    // === Car ===
    pub car_width: f32,
    pub car_height: f32,
    /// Distance from the bottom of the playfield to the car's top edge
    pub car_bottom_offset: f32,
    /// Keyboard step in free steering (px)
    pub keyboard_step: f32,
    /// Minimum horizontal swipe to change lane (px)
    pub swipe_threshold: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    pub obstacle_height: f32,
    pub obstacle_entry_y: f32,
    pub max_obstacles: usize,
    /// Probability of a spawn per spawn tick
    pub spawn_chance: f64,
    /// Seconds between spawn ticks
    pub spawn_interval: f32,

    // === Difficulty ===
    /// Points per second survived
    pub score_rate: f32,
    /// Obstacle advance per spawn tick at score 0
    pub base_speed: u32,
    /// Maximum number of extra speed tiers
    pub speed_cap: u32,
    /// Score needed per speed tier
    pub score_per_tier: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            steering: Steering::Free,

            playfield_width: 400.0,
            playfield_height: 800.0,
            road_padding: 8.0,

            car_width: 50.0,
            car_height: 80.0,
            car_bottom_offset: 100.0,
            keyboard_step: 15.0,
            swipe_threshold: 30.0,

            obstacle_width: 40.0,
            obstacle_height: 40.0,
            obstacle_entry_y: -50.0,
            max_obstacles: MAX_LIVE_OBSTACLES,
            spawn_chance: 0.05,
            spawn_interval: 0.1,

            score_rate: 10.0,
            base_speed: 5,
            speed_cap: 10,
            score_per_tier: 500,
        }
    }
}

/// Why a tuning could not be used
#[derive(Debug)]
pub enum TuningError {
    Parse(serde_json::Error),
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::Parse(err) => write!(f, "malformed tuning: {err}"),
            TuningError::Invalid { field, reason } => write!(f, "invalid tuning `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for TuningError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TuningError::Parse(err) => Some(err),
            TuningError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for TuningError {
    fn from(err: serde_json::Error) -> Self {
        TuningError::Parse(err)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> TuningError {
    TuningError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl Tuning {
    /// Lane steering with the default balance
    pub fn lanes(count: u8) -> Self {
        Self {
            steering: Steering::Lanes { count },
            ..Self::default()
        }
    }

    /// Parse and validate a JSON tuning document
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning ({:?} steering)", tuning.steering);
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("car_width", self.car_width),
            ("car_height", self.car_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_height", self.obstacle_height),
            ("spawn_interval", self.spawn_interval),
            ("swipe_threshold", self.swipe_threshold),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        if self.road_padding < 0.0 || self.keyboard_step < 0.0 || self.score_rate < 0.0 {
            return Err(invalid("road_padding/keyboard_step/score_rate", "must not be negative"));
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(invalid("spawn_chance", format!("{} is not a probability", self.spawn_chance)));
        }
        if self.max_obstacles == 0 || self.max_obstacles > MAX_LIVE_OBSTACLES {
            return Err(invalid(
                "max_obstacles",
                format!("must be within 1..={MAX_LIVE_OBSTACLES}"),
            ));
        }
        if self.score_per_tier == 0 {
            return Err(invalid("score_per_tier", "must be at least 1"));
        }
        if self.road_width() < self.car_width.max(self.obstacle_width) {
            return Err(invalid("playfield_width", "road is narrower than the car or obstacles"));
        }
        if self.car_bottom_offset < self.car_height || self.car_bottom_offset > self.playfield_height {
            return Err(invalid("car_bottom_offset", "car must sit fully inside the playfield"));
        }
        if let Steering::Lanes { count } = self.steering {
            if count < 2 {
                return Err(invalid("steering", "lane steering needs at least two lanes"));
            }
            if self.lane_width() < self.car_width.max(self.obstacle_width) {
                return Err(invalid("steering", "lanes are too narrow"));
            }
        }
        Ok(())
    }

    /// Drivable width between the road edges
    pub fn road_width(&self) -> f32 {
        self.playfield_width - 2.0 * self.road_padding
    }

    /// Leftmost allowed car x
    pub fn car_min_x(&self) -> f32 {
        self.road_padding
    }

    /// Rightmost allowed car x
    pub fn car_max_x(&self) -> f32 {
        (self.playfield_width - self.car_width - self.road_padding).max(self.car_min_x())
    }

    /// Car x at the start of a session
    pub fn car_start_x(&self) -> f32 {
        self.playfield_width / 2.0 - self.car_width / 2.0
    }

    /// Y of the car's top edge
    pub fn car_top(&self) -> f32 {
        self.playfield_height - self.car_bottom_offset
    }

    pub fn lane_width(&self) -> f32 {
        match self.steering {
            Steering::Free => self.road_width(),
            Steering::Lanes { count } => self.road_width() / count.max(1) as f32,
        }
    }

    /// Horizontal center of a lane
    pub fn lane_center(&self, lane: u8) -> f32 {
        self.road_padding + self.lane_width() * (lane as f32 + 0.5)
    }

    /// Middle lane (left of middle for an even count)
    pub fn start_lane(&self) -> u8 {
        match self.steering {
            Steering::Free => 0,
            Steering::Lanes { count } => (count.max(1) - 1) / 2,
        }
    }

    /// Speed for a score: base plus one per tier, capped
    pub fn speed_for_score(&self, score: u64) -> u32 {
        let tiers = (score / self.score_per_tier.max(1)).min(self.speed_cap as u64);
        self.base_speed + tiers as u32
    }

    /// Highest speed the difficulty curve reaches
    pub fn max_speed(&self) -> u32 {
        self.base_speed + self.speed_cap
    }
}
