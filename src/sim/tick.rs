//! Simulation tick
//!
//! One call per animation frame. Scoring and difficulty use the variable
//! frame delta; obstacle spawning and movement run in whole spawn steps that
//! the driver counts out on its own, slower schedule.

use glam::Vec2;
use rand::Rng;

use super::collision::first_collision;
use super::state::{GameEvent, GamePhase, GameState, Obstacle};
use crate::tuning::Steering;

/// Work for a single frame tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Spawn-schedule steps that came due since the previous frame
    pub spawn_steps: u32,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Nothing moves before start, while paused, or after a crash
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;
    let dt = input.dt.max(0.0);
    state.elapsed += dt;

    advance_score(state, dt);

    for _ in 0..input.spawn_steps {
        spawn_step(state);
    }

    check_collisions(state);
}

/// Credit elapsed time to the score and re-derive the speed tier
pub fn advance_score(state: &mut GameState, dt: f32) {
    state.score_carry += dt * state.tuning.score_rate;
    let whole = state.score_carry.floor();
    if whole >= 1.0 {
        state.score += whole as u64;
        state.score_carry -= whole;
    }

    let speed = state.tuning.speed_for_score(state.score);
    if speed > state.speed {
        state.speed = speed;
        state.events.push(GameEvent::SpeedUp { speed });
        log::info!("Speed up: {} (score {})", speed, state.score);
    }
}

/// One step of the spawn schedule: maybe spawn, then advance everything
pub fn spawn_step(state: &mut GameState) {
    state.spawn_ticks += 1;
    maybe_spawn_obstacle(state);
    advance_obstacles(state);
}

/// Roll for a new obstacle if there is room for one
pub fn maybe_spawn_obstacle(state: &mut GameState) -> Option<u32> {
    let limit = state.tuning.max_obstacles.min(crate::consts::MAX_LIVE_OBSTACLES);
    if state.obstacles.len() >= limit {
        return None;
    }
    let chance = spawn_probability(state.tuning.spawn_chance);
    if !state.rng().random_bool(chance) {
        return None;
    }

    let steering = state.tuning.steering;
    let size = Vec2::new(state.tuning.obstacle_width, state.tuning.obstacle_height);
    let entry_y = state.tuning.obstacle_entry_y;
    let (x, lane) = match steering {
        Steering::Free => {
            let span = (state.tuning.road_width() - size.x).max(0.0);
            let padding = state.tuning.road_padding;
            let roll: f32 = state.rng().random();
            (padding + roll * span, None)
        }
        Steering::Lanes { count } => {
            let lane = state.rng().random_range(0..count.max(1));
            (state.tuning.lane_center(lane) - size.x / 2.0, Some(lane))
        }
    };

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos: Vec2::new(x, entry_y),
        size,
        lane,
    });
    state.events.push(GameEvent::ObstacleSpawned { id });
    log::debug!("Spawned obstacle {} at x={:.1} lane={:?}", id, x, lane);
    Some(id)
}

/// Spawn chance as a probability: clamped to [0, 1], NaN never spawns
fn spawn_probability(chance: f64) -> f64 {
    if chance.is_nan() {
        0.0
    } else {
        chance.clamp(0.0, 1.0)
    }
}

/// Move obstacles down by the current speed and drop the ones off screen
pub fn advance_obstacles(state: &mut GameState) {
    let step = state.speed as f32;
    let bottom = state.tuning.playfield_height;
    state.road_offset += step;

    let mut cleared = Vec::new();
    state.obstacles.retain_mut(|obstacle| {
        obstacle.pos.y += step;
        let visible = obstacle.pos.y < bottom;
        if !visible {
            cleared.push(obstacle.id);
        }
        visible
    });
    state
        .events
        .extend(cleared.into_iter().map(|id| GameEvent::ObstacleCleared { id }));
}

/// End the session on the first obstacle the car touches
pub fn check_collisions(state: &mut GameState) {
    if state.phase != GamePhase::Playing {
        return;
    }
    let Some(hit) = first_collision(&state.car, &state.obstacles, &state.tuning) else {
        return;
    };
    let obstacle_id = hit.id;

    state.phase = GamePhase::GameOver;
    state.car.colliding = true;
    state.events.push(GameEvent::Crashed {
        obstacle_id,
        score: state.score,
    });
    log::info!("Crashed into obstacle {} with score {}", obstacle_id, state.score);

    if state.score > state.high_score {
        state.high_score = state.score;
        state.events.push(GameEvent::NewHighScore { score: state.score });
        log::info!("New high score: {}", state.score);
    }
}
