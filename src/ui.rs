//! HUD and game-over overlay view models
//!
//! Plain data derived from the session; the host draws the text.

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// Points per metre of distance shown on the game-over card
const POINTS_PER_METRE: u64 = 10;
/// Points per second of driving time shown on the game-over card
const POINTS_PER_SECOND: u64 = 30;

/// In-game heads-up display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score_label: String,
    pub paused: bool,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score_label: format!("SCORE: {}", state.score),
            paused: state.phase == GamePhase::Paused,
        }
    }
}

/// Game-over card contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub score: u64,
    pub best: u64,
    /// This run set the best score
    pub new_high_score: bool,
    pub distance_m: u64,
    pub time_s: u64,
    /// Place on this process's leaderboard, if the run made it
    pub leaderboard_rank: Option<usize>,
}

impl GameOverSummary {
    /// None until the session is over
    pub fn from_state(state: &GameState) -> Option<Self> {
        if !state.is_over() {
            return None;
        }
        let score = state.score;
        Some(Self {
            score,
            best: state.high_score,
            new_high_score: score > 0 && score >= state.high_score,
            distance_m: rounded_div(score, POINTS_PER_METRE),
            time_s: rounded_div(score, POINTS_PER_SECOND),
            leaderboard_rank: None,
        })
    }

    pub fn with_rank(self, leaderboard_rank: Option<usize>) -> Self {
        Self {
            leaderboard_rank,
            ..self
        }
    }

    /// "#3" style label, empty when the run missed the board
    pub fn rank_label(&self) -> String {
        self.leaderboard_rank.map(|rank| format!("#{rank}")).unwrap_or_default()
    }

    pub fn distance_label(&self) -> String {
        format!("{}m", self.distance_m)
    }

    pub fn time_label(&self) -> String {
        format!("{}s", self.time_s)
    }
}

/// Integer division rounding half up
fn rounded_div(value: u64, divisor: u64) -> u64 {
    (value + divisor / 2) / divisor
}
