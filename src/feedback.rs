//! Sound and haptic cues
//!
//! The simulation only emits [`GameEvent`]s. This module decides which of
//! them deserve a sound, a vibration or a music change, honoring the
//! player's toggles. Playback itself belongs to the platform.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Engine start on session start/restart
    EngineStart,
    /// Difficulty tier increased
    SpeedUp,
    /// Car hit an obstacle
    Crash,
    /// New high score
    HighScore,
}

/// A request for the platform to play something
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cue {
    Sound(SoundEffect),
    Vibrate { millis: u32 },
    MusicPlay,
    MusicStop,
}

/// Vibration length on crash
const CRASH_VIBRATION_MS: u32 = 400;

/// Cues for one event, filtered by settings
pub fn cues_for(event: &GameEvent, settings: &Settings) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut sound = |effect| {
        if settings.sound_effects {
            cues.push(Cue::Sound(effect));
        }
    };

    match event {
        GameEvent::Started | GameEvent::Restarted => sound(SoundEffect::EngineStart),
        GameEvent::SpeedUp { .. } => sound(SoundEffect::SpeedUp),
        GameEvent::Crashed { .. } => sound(SoundEffect::Crash),
        GameEvent::NewHighScore { .. } => sound(SoundEffect::HighScore),
        GameEvent::Paused
        | GameEvent::Resumed
        | GameEvent::ObstacleSpawned { .. }
        | GameEvent::ObstacleCleared { .. } => {}
    }

    match event {
        GameEvent::Crashed { .. } => {
            if settings.vibration {
                cues.push(Cue::Vibrate {
                    millis: CRASH_VIBRATION_MS,
                });
            }
            if settings.music {
                cues.push(Cue::MusicStop);
            }
        }
        GameEvent::Paused if settings.music => cues.push(Cue::MusicStop),
        GameEvent::Started | GameEvent::Restarted | GameEvent::Resumed if settings.music => {
            cues.push(Cue::MusicPlay)
        }
        _ => {}
    }

    cues
}

/// Cues for a batch of events, in order
pub fn cues_for_all(events: &[GameEvent], settings: &Settings) -> Vec<Cue> {
    events.iter().flat_map(|e| cues_for(e, settings)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crash_with_everything_on() {
        let cues = cues_for(
            &GameEvent::Crashed {
                obstacle_id: 1,
                score: 10,
            },
            &Settings::default(),
        );
        assert_eq!(
            cues,
            vec![
                Cue::Sound(SoundEffect::Crash),
                Cue::Vibrate { millis: 400 },
                Cue::MusicStop
            ]
        );
    }

    #[test]
    fn test_toggles_suppress_cues() {
        let settings = Settings {
            vibration: false,
            ..Settings::muted()
        };
        let crash = GameEvent::Crashed {
            obstacle_id: 1,
            score: 10,
        };
        assert!(cues_for(&crash, &settings).is_empty());
        assert!(cues_for(&GameEvent::Started, &settings).is_empty());
    }

    #[test]
    fn test_obstacle_events_are_silent() {
        let settings = Settings::default();
        assert!(cues_for(&GameEvent::ObstacleSpawned { id: 3 }, &settings).is_empty());
        assert!(cues_for(&GameEvent::ObstacleCleared { id: 3 }, &settings).is_empty());
    }

    #[test]
    fn test_start_plays_engine_and_music() {
        let cues = cues_for_all(&[GameEvent::Started, GameEvent::Paused], &Settings::default());
        assert_eq!(
            cues,
            vec![Cue::Sound(SoundEffect::EngineStart), Cue::MusicPlay, Cue::MusicStop]
        );
    }
}
