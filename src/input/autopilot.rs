//! Demo driver
//!
//! Plays the game through the same input events a player would produce. It
//! looks a fixed distance up the road, finds the nearest position that no
//! approaching obstacle covers, and steers toward it.

use super::{InputEvent, Key};
use crate::sim::{GameState, Obstacle};

/// How far above the car the autopilot watches for obstacles (px)
const LOOKAHEAD: f32 = 260.0;
/// Extra clearance kept on each side of an obstacle (px)
const MARGIN: f32 = 6.0;
/// Largest drag the autopilot makes in one frame (px)
const MAX_DRAG: f32 = 12.0;
/// Candidate positions tried across the road (px)
const SCAN_STEP: f32 = 4.0;

/// Obstacles close enough to matter
fn threats(state: &GameState) -> impl Iterator<Item = &Obstacle> {
    let car_top = state.tuning.car_top();
    let car_bottom = car_top + state.tuning.car_height;
    state
        .obstacles
        .iter()
        .filter(move |o| o.pos.y + o.size.y > car_top - LOOKAHEAD && o.pos.y < car_bottom)
}

/// Next input the autopilot wants, if any
pub fn next_input(state: &GameState) -> Option<InputEvent> {
    if !state.accepts_input() {
        return None;
    }
    match state.car.lane {
        Some(lane) => steer_lanes(state, lane),
        None => steer_free(state),
    }
}

fn steer_lanes(state: &GameState, lane: u8) -> Option<InputEvent> {
    let count = state.tuning.steering.lane_count()?;
    let blocked = |candidate: u8| threats(state).any(|o| o.lane == Some(candidate));
    if !blocked(lane) {
        return None;
    }

    // Nearest free lane, preferring the left on a tie
    let target = (1..count as i32)
        .flat_map(|d| [lane as i32 - d, lane as i32 + d])
        .filter(|&l| (0..count as i32).contains(&l))
        .map(|l| l as u8)
        .find(|&l| !blocked(l))?;

    Some(InputEvent::Key(if target < lane { Key::Left } else { Key::Right }))
}

fn steer_free(state: &GameState) -> Option<InputEvent> {
    let tuning = &state.tuning;
    let width = tuning.car_width;
    let covered = |x: f32| {
        threats(state).any(|o| x < o.pos.x + o.size.x + MARGIN && x + width > o.pos.x - MARGIN)
    };

    let current = state.car.x;
    if !covered(current) {
        return None;
    }

    let (min_x, max_x) = (tuning.car_min_x(), tuning.car_max_x());
    let steps = ((max_x - min_x) / SCAN_STEP).ceil() as i32;
    let target = (0..=steps)
        .map(|i| (min_x + i as f32 * SCAN_STEP).min(max_x))
        .filter(|&x| !covered(x))
        .min_by(|a, b| {
            (a - current)
                .abs()
                .partial_cmp(&(b - current).abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let dx = (target - current).clamp(-MAX_DRAG, MAX_DRAG);
    (dx != 0.0).then_some(InputEvent::Drag { dx })
}
