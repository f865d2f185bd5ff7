//! Leaderboard of finished runs
//!
//! Keeps the ten best crashes of this process, best first. Nothing is
//! written to disk; a new process starts with an empty board.

use serde::{Deserialize, Serialize};

use crate::sim::GameState;

/// Board size
pub const MAX_HIGH_SCORES: usize = 10;

/// A finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Seconds survived
    pub duration: f32,
    /// Seed the run was played with, enough to replay it
    pub seed: u64,
}

impl HighScoreEntry {
    /// Snapshot of a session at its crash
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            duration: state.elapsed,
            seed: state.seed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    /// Sorted by score, best first; equal scores keep arrival order
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a run on the board. Returns its 1-based rank, or None when the
    /// run scored nothing or falls below a full board.
    pub fn record(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if entry.score == 0 {
            return None;
        }
        let index = self.entries.partition_point(|e| e.score >= entry.score);
        if index >= MAX_HIGH_SCORES {
            log::debug!("Score {} missed the leaderboard", entry.score);
            return None;
        }

        log::info!("Run with score {} (seed {}) placed #{}", entry.score, entry.seed, index + 1);
        self.entries.insert(index, entry);
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(index + 1)
    }

    /// Entries with their 1-based ranks
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &HighScoreEntry)> {
        self.entries.iter().enumerate().map(|(i, entry)| (i + 1, entry))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn best(&self) -> Option<&HighScoreEntry> {
        self.entries.first()
    }
}
