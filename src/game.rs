//! Frame driver
//!
//! Owns a session and feeds it from two schedules: the per-frame callback
//! (score, difficulty, collisions) and the slower spawn interval (obstacle
//! spawn and advance). Both are driven from the timestamps passed to
//! [`Game::frame`], so the host only needs one animation callback.

use crate::consts::{MAX_FRAME_DT, MAX_SPAWN_STEPS};
use crate::feedback::{self, Cue};
use crate::highscores::{HighScoreEntry, HighScores};
use crate::input::{Controls, InputEvent};
use crate::renderer::{self, Vertex};
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::ui::{GameOverSummary, Hud};

/// Scheduled callbacks
#[derive(Debug, Clone, Default)]
struct Schedule {
    /// Whether frames are currently being delivered to the simulation
    armed: bool,
    /// Timestamp of the previous frame (seconds)
    last_frame: Option<f64>,
    /// Time owed to the spawn schedule (seconds)
    spawn_accumulator: f32,
}

impl Schedule {
    fn arm(&mut self, now: f64) {
        self.armed = true;
        self.last_frame = Some(now);
        self.spawn_accumulator = 0.0;
    }

    fn cancel(&mut self) {
        self.armed = false;
        self.last_frame = None;
        self.spawn_accumulator = 0.0;
    }
}

/// What happened during one call into the driver
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameReport {
    pub events: Vec<GameEvent>,
    pub cues: Vec<Cue>,
    /// Leaderboard rank earned by a crash in this call
    pub rank: Option<usize>,
}

/// Game instance holding all state
pub struct Game {
    pub state: GameState,
    pub settings: Settings,
    pub high_scores: HighScores,
    controls: Controls,
    schedule: Schedule,
    /// Leaderboard rank of the session that just ended
    last_rank: Option<usize>,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        Self {
            state: GameState::new(seed, tuning),
            settings: Settings::default(),
            high_scores: HighScores::new(),
            controls: Controls::new(),
            schedule: Schedule::default(),
            last_rank: None,
        }
    }

    /// Leave the start screen and begin delivering frames
    pub fn start(&mut self, now: f64) -> FrameReport {
        self.state.start();
        if self.state.phase == GamePhase::Playing {
            self.schedule.arm(now);
        }
        self.flush()
    }

    /// Fresh session with a new seed; the high score carries over
    pub fn restart(&mut self, seed: u64, now: f64) -> FrameReport {
        self.state.restart(seed);
        self.controls.reset();
        self.last_rank = None;
        self.schedule.arm(now);
        self.flush()
    }

    /// Pause or resume. Time spent paused is not credited on resume.
    pub fn toggle_pause(&mut self, now: f64) -> FrameReport {
        self.state.toggle_pause();
        match self.state.phase {
            GamePhase::Playing => self.schedule.arm(now),
            GamePhase::Paused => self.schedule.cancel(),
            GamePhase::Ready | GamePhase::GameOver => {}
        }
        self.controls.reset();
        self.flush()
    }

    /// Release the scheduled callbacks (host view going away)
    pub fn teardown(&mut self) {
        if self.schedule.armed {
            log::info!("Driver torn down at score {}", self.state.score);
        }
        self.schedule.cancel();
        self.controls.reset();
    }

    /// Whether frames currently reach the simulation
    pub fn is_scheduled(&self) -> bool {
        self.schedule.armed
    }

    /// Route a player input to the car. Returns true if the car moved.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.controls.handle(&mut self.state, event)
    }

    /// Animation frame callback
    pub fn frame(&mut self, now: f64) -> FrameReport {
        if !self.schedule.armed {
            return FrameReport::default();
        }

        let dt = match self.schedule.last_frame {
            Some(last) => ((now - last).max(0.0) as f32).min(MAX_FRAME_DT),
            None => 0.0,
        };
        self.schedule.last_frame = Some(now);

        let interval = self.state.tuning.spawn_interval;
        self.schedule.spawn_accumulator += dt;
        let mut spawn_steps = 0;
        while self.schedule.spawn_accumulator >= interval && spawn_steps < MAX_SPAWN_STEPS {
            self.schedule.spawn_accumulator -= interval;
            spawn_steps += 1;
        }
        if spawn_steps == MAX_SPAWN_STEPS {
            // Drop the backlog rather than catching up later
            self.schedule.spawn_accumulator %= interval;
        }

        tick(&mut self.state, &TickInput { dt, spawn_steps });

        if self.state.is_over() {
            self.schedule.cancel();
        }
        self.flush()
    }

    /// Drain session events, record finished runs, and map to cues
    fn flush(&mut self) -> FrameReport {
        let events = self.state.drain_events();
        let mut rank = None;
        if events.iter().any(|e| matches!(e, GameEvent::Crashed { .. })) {
            rank = self.high_scores.record(HighScoreEntry::from_state(&self.state));
            self.last_rank = rank;
        }
        let cues = feedback::cues_for_all(&events, &self.settings);
        FrameReport { events, cues, rank }
    }

    pub fn hud(&self) -> Hud {
        Hud::from_state(&self.state)
    }

    /// Overlay contents once the car has crashed
    pub fn game_over_summary(&self) -> Option<GameOverSummary> {
        GameOverSummary::from_state(&self.state).map(|summary| summary.with_rank(self.last_rank))
    }

    /// Draw data for the current state
    pub fn scene(&self) -> Vec<Vertex> {
        renderer::build_scene(&self.state, &self.settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::SoundEffect;
    use crate::input::Key;
    use crate::sim::Obstacle;
    use glam::Vec2;

    const FRAME: f64 = 1.0 / 60.0;

    fn block_car(game: &mut Game) {
        let id = game.state.next_entity_id();
        let x = game.state.car.x;
        game.state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(x, 690.0),
            size: Vec2::new(40.0, 40.0),
            lane: None,
        });
    }

    #[test]
    fn test_frames_ignored_before_start() {
        let mut game = Game::new(1, Tuning::default());
        assert!(!game.is_scheduled());
        assert_eq!(game.frame(10.0), FrameReport::default());
        assert_eq!(game.state.time_ticks, 0);
    }

    #[test]
    fn test_start_reports_cues() {
        let mut game = Game::new(1, Tuning::default());
        let report = game.start(0.0);
        assert_eq!(report.events, vec![GameEvent::Started]);
        assert!(report.cues.contains(&Cue::Sound(SoundEffect::EngineStart)));
        assert!(game.is_scheduled());
    }

    #[test]
    fn test_spawn_schedule_runs_at_interval() {
        let tuning = Tuning {
            spawn_chance: 0.0,
            ..Tuning::default()
        };
        let mut game = Game::new(1, tuning);
        game.start(0.0);
        // One second of frames at 60 Hz
        for i in 1..=60 {
            game.frame(i as f64 * FRAME);
        }
        assert_eq!(game.state.time_ticks, 60);
        assert!((9..=10).contains(&game.state.spawn_ticks), "spawn ticks {}", game.state.spawn_ticks);
        assert!((9..=10).contains(&game.state.score), "score {}", game.state.score);
    }

    #[test]
    fn test_long_frame_is_capped() {
        let mut game = Game::new(1, Tuning::default());
        game.start(0.0);
        game.frame(5.0);
        // A 5 s hitch counts as 0.1 s
        assert!(game.state.elapsed <= MAX_FRAME_DT + 1e-6);
        assert!(game.state.spawn_ticks <= 1);
    }

    #[test]
    fn test_crash_cancels_schedule_and_records_run() {
        let mut game = Game::new(1, Tuning::default());
        game.start(0.0);
        for i in 1..=30 {
            game.frame(i as f64 * FRAME);
        }
        block_car(&mut game);
        let report = game.frame(31.0 * FRAME);
        assert!(game.state.is_over());
        assert!(!game.is_scheduled());
        assert!(report.events.iter().any(|e| matches!(e, GameEvent::Crashed { .. })));
        assert!(report.cues.contains(&Cue::Sound(SoundEffect::Crash)));
        assert_eq!(report.rank, Some(1));
        assert_eq!(game.high_scores.entries.len(), 1);
        assert_eq!(game.high_scores.best().map(|e| e.score), Some(game.state.score));
        assert_eq!(game.high_scores.best().map(|e| e.seed), Some(1));

        // Dead session no longer ticks
        let score = game.state.score;
        assert_eq!(game.frame(40.0 * FRAME).rank, None);
        assert_eq!(game.state.score, score);
        let summary = game.game_over_summary().expect("game over");
        assert_eq!(summary.leaderboard_rank, Some(1));
    }

    #[test]
    fn test_restart_rearms_and_resets() {
        let mut game = Game::new(1, Tuning::default());
        game.start(0.0);
        for i in 1..=60 {
            game.frame(i as f64 * FRAME);
        }
        block_car(&mut game);
        game.frame(61.0 * FRAME);
        let best = game.state.high_score;
        assert!(best > 0);

        let report = game.restart(2, 2.0);
        assert_eq!(report.events, vec![GameEvent::Restarted]);
        assert!(game.is_scheduled());
        assert_eq!(game.state.score, 0);
        assert!(game.state.obstacles.is_empty());
        assert_eq!(game.state.high_score, best);
        assert!(game.game_over_summary().is_none());
    }

    #[test]
    fn test_second_crash_reports_its_rank() {
        let mut game = Game::new(1, Tuning::default());
        game.start(0.0);
        for i in 1..=60 {
            game.frame(i as f64 * FRAME);
        }
        block_car(&mut game);
        assert_eq!(game.frame(61.0 * FRAME).rank, Some(1));

        // A shorter second run ranks below the first
        game.restart(2, 2.0);
        for i in 1..=30 {
            game.frame(2.0 + i as f64 * FRAME);
        }
        block_car(&mut game);
        let report = game.frame(2.0 + 31.0 * FRAME);
        assert_eq!(report.rank, Some(2));
        let summary = game.game_over_summary().expect("game over");
        assert_eq!(summary.leaderboard_rank, Some(2));
        assert!(!summary.new_high_score);
    }

    #[test]
    fn test_scoreless_crash_has_no_rank() {
        let mut game = Game::new(1, Tuning::default());
        game.start(0.0);
        block_car(&mut game);
        let report = game.frame(FRAME);
        assert!(game.state.is_over());
        assert_eq!(report.rank, None);
        assert!(game.high_scores.is_empty());
        let summary = game.game_over_summary().expect("game over");
        assert_eq!(summary.leaderboard_rank, None);
    }

    #[test]
    fn test_pause_stops_time() {
        let mut game = Game::new(1, Tuning::default());
        game.start(0.0);
        game.frame(0.05);
        let elapsed = game.state.elapsed;

        game.toggle_pause(0.05);
        assert!(!game.is_scheduled());
        game.frame(3.0);
        assert!(!game.handle_input(InputEvent::Key(Key::Left)));

        game.toggle_pause(10.0);
        game.frame(10.05);
        assert!((game.state.elapsed - (elapsed + 0.05)).abs() < 1e-4);
        assert!(game.handle_input(InputEvent::Key(Key::Left)));
    }

    #[test]
    fn test_teardown_releases_schedule() {
        let mut game = Game::new(1, Tuning::default());
        game.start(0.0);
        game.teardown();
        assert!(!game.is_scheduled());
        game.frame(0.5);
        assert_eq!(game.state.time_ticks, 0);
    }

    #[test]
    fn test_scene_and_hud_available() {
        let mut game = Game::new(1, Tuning::default());
        game.start(0.0);
        assert!(!game.scene().is_empty());
        assert_eq!(game.hud().score_label, "SCORE: 0");
    }
}
