//! Papa Kart headless runner
//!
//! Plays autopilot sessions against a simulated 60 Hz clock and reports the
//! results. Useful for balancing a tuning file without a device.
//!
//! Usage: papa-kart [--seed N] [--lanes N] [--runs N] [--frames N] [--tuning FILE]

use anyhow::{Context, Result};
use clap::Parser;

use papa_kart::consts::DEMO_FRAME_DT;
use papa_kart::input::autopilot;
use papa_kart::sim::GameEvent;
use papa_kart::{Game, Steering, Tuning};

/// Command line options
#[derive(Parser, Debug)]
#[command(name = "papa-kart")]
#[command(about = "Plays autopilot sessions of Papa Kart and prints the leaderboard")]
struct Options {
    /// Seed of the first run; later runs add the run index
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Switch to lane steering with this many lanes
    #[arg(long)]
    lanes: Option<u8>,

    /// Number of sessions to play
    #[arg(long, default_value_t = 3)]
    runs: u32,

    /// Frame limit per run (36000 is ten minutes at 60 Hz)
    #[arg(long = "frames", default_value_t = 36_000)]
    max_frames: u64,

    /// JSON tuning file
    #[arg(long = "tuning")]
    tuning_path: Option<String>,
}

fn load_tuning(options: &Options) -> Result<Tuning> {
    let mut tuning = match &options.tuning_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            Tuning::from_json(&json).with_context(|| format!("loading {path}"))?
        }
        None => Tuning::default(),
    };
    if let Some(count) = options.lanes {
        tuning.steering = Steering::Lanes { count };
    }
    tuning.validate()?;
    Ok(tuning)
}

/// Play one session to the crash or the frame limit
fn play_run(game: &mut Game, max_frames: u64, start_time: f64) -> f64 {
    let mut now = start_time;
    for _ in 0..max_frames {
        if let Some(event) = autopilot::next_input(&game.state) {
            game.handle_input(event);
        }
        now += DEMO_FRAME_DT;
        let report = game.frame(now);
        for event in &report.events {
            match event {
                GameEvent::SpeedUp { speed } => log::debug!("speed {speed} at {:.1}s", game.state.elapsed),
                GameEvent::NewHighScore { score } => log::info!("new best {score}"),
                _ => {}
            }
        }
        if !game.is_scheduled() {
            break;
        }
    }
    now
}

fn main() -> Result<()> {
    env_logger::init();

    let options = Options::parse();
    let tuning = load_tuning(&options)?;
    log::info!("Papa Kart (headless) starting: {:?}", options);

    let mut game = Game::new(options.seed, tuning);
    let mut now = 0.0;
    game.start(now);

    for run in 0..options.runs {
        if run > 0 {
            game.restart(options.seed.wrapping_add(run as u64), now);
        }
        now = play_run(&mut game, options.max_frames, now);

        let state = &game.state;
        let outcome = if state.is_over() { "crashed" } else { "survived" };
        println!(
            "run {:>2}: {} with score {} after {:.1}s (speed {})",
            run + 1,
            outcome,
            state.score,
            state.elapsed,
            state.speed
        );
        if let Some(summary) = game.game_over_summary() {
            let placed = match summary.leaderboard_rank {
                Some(_) => format!("  leaderboard {}", summary.rank_label()),
                None => String::new(),
            };
            println!(
                "        distance {} time {}{}{}",
                summary.distance_label(),
                summary.time_label(),
                placed,
                if summary.new_high_score { "  NEW HIGH SCORE!" } else { "" }
            );
        }
    }
    game.teardown();

    println!("\nLeaderboard:");
    if game.high_scores.is_empty() {
        println!("  (no finished runs)");
    }
    for (rank, entry) in game.high_scores.ranked() {
        println!(
            "  #{:<2} {:>6}  {:>6.1}s  seed {}",
            rank,
            entry.score,
            entry.duration,
            entry.seed
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let options =
            Options::try_parse_from(["papa-kart", "--seed", "42", "--lanes", "4", "--runs", "2"]).unwrap();
        assert_eq!(options.seed, 42);
        assert_eq!(options.lanes, Some(4));
        assert_eq!(options.runs, 2);
        assert_eq!(options.max_frames, 36_000);
        assert_eq!(options.tuning_path, None);

        let options = Options::try_parse_from(["papa-kart", "--frames", "600", "--tuning", "easy.json"]).unwrap();
        assert_eq!(options.seed, 1);
        assert_eq!(options.max_frames, 600);
        assert_eq!(options.tuning_path.as_deref(), Some("easy.json"));

        assert!(Options::try_parse_from(["papa-kart", "--bogus"]).is_err());
        assert!(Options::try_parse_from(["papa-kart", "--seed"]).is_err());
        assert!(Options::try_parse_from(["papa-kart", "--lanes", "many"]).is_err());
    }

    #[test]
    fn test_lane_override_is_validated() {
        let options = Options::try_parse_from(["papa-kart", "--lanes", "1"]).unwrap();
        assert!(load_tuning(&options).is_err());
    }

    #[test]
    fn test_autopilot_run_terminates() {
        let tuning = Tuning {
            spawn_chance: 0.5,
            ..Tuning::lanes(3)
        };
        let mut game = Game::new(9, tuning);
        game.start(0.0);
        let end = play_run(&mut game, 600, 0.0);
        assert!(end > 0.0);
        assert!(game.state.time_ticks <= 600);
    }
}
