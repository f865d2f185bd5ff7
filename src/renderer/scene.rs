//! Scene assembly
//!
//! Converts a session into one triangle list in playfield pixels, drawn back
//! to front: road, lane markers, obstacles, car.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::settings::Settings;
use crate::sim::GameState;
use crate::tuning::Steering;

/// Lane markings painted on the road in free steering
const FREE_ROAD_LANES: u8 = 3;
const MARKER_WIDTH: f32 = 4.0;
const MARKER_DASH: f32 = 40.0;
const MARKER_GAP: f32 = 40.0;

/// Build the full frame for a session
pub fn build_scene(state: &GameState, settings: &Settings) -> Vec<Vertex> {
    let mut vertices = Vec::new();
    road(state, &mut vertices);
    for obstacle in &state.obstacles {
        let bounds = obstacle.bounds();
        vertices.extend(shapes::aabb(&bounds, colors::OBSTACLE));
        // Hazard stripe across the middle
        let stripe = Vec2::new(bounds.size.x * 0.75, bounds.size.y * 0.2);
        let stripe_min = bounds.min + (bounds.size - stripe) / 2.0;
        vertices.extend(shapes::rect(stripe_min, stripe, colors::OBSTACLE_STRIPE));
    }
    car(state, settings, &mut vertices);
    vertices
}

fn road(state: &GameState, out: &mut Vec<Vertex>) {
    let tuning = &state.tuning;
    let (width, height) = (tuning.playfield_width, tuning.playfield_height);
    let padding = tuning.road_padding;

    out.extend(shapes::rect(Vec2::ZERO, Vec2::new(width, height), colors::ROAD));
    out.extend(shapes::rect(Vec2::ZERO, Vec2::new(padding, height), colors::ROAD_EDGE));
    out.extend(shapes::rect(
        Vec2::new(width - padding, 0.0),
        Vec2::new(padding, height),
        colors::ROAD_EDGE,
    ));

    let lanes = match tuning.steering {
        Steering::Free => FREE_ROAD_LANES,
        Steering::Lanes { count } => count,
    };
    let lane_width = tuning.road_width() / lanes.max(1) as f32;
    for divider in 1..lanes {
        let x = padding + lane_width * divider as f32;
        out.extend(shapes::vertical_dashes(
            x,
            MARKER_WIDTH,
            MARKER_DASH,
            MARKER_GAP,
            state.road_offset,
            0.0,
            height,
            colors::LANE_MARKER,
        ));
    }
}

fn car(state: &GameState, settings: &Settings, out: &mut Vec<Vertex>) {
    let bounds = state.car.bounds(&state.tuning);
    let body = if state.car.colliding {
        colors::CAR_CRASHED
    } else {
        settings.car.color()
    };
    out.extend(shapes::aabb(&bounds, body));

    let windshield = Vec2::new(bounds.size.x * 0.6, bounds.size.y * 0.25);
    let windshield_min = Vec2::new(
        bounds.min.x + (bounds.size.x - windshield.x) / 2.0,
        bounds.min.y + bounds.size.y * 0.15,
    );
    out.extend(shapes::rect(windshield_min, windshield, colors::WINDSHIELD));
}
