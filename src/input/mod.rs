//! Input layer
//!
//! Turns pointer and keyboard events into car movement. Free steering moves
//! the car by the drag distance; lane steering waits until a drag or swipe
//! covers the swipe threshold and then shifts one lane.

pub mod autopilot;

use serde::{Deserialize, Serialize};

use crate::sim::GameState;
use crate::tuning::{Steering, Tuning};

/// Arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
}

/// Raw input from the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Horizontal pointer movement since the previous drag update (px)
    Drag { dx: f32 },
    /// Finger lifted
    DragEnd,
    /// A completed swipe with its total horizontal travel (px)
    Swipe { dx: f32 },
    Key(Key),
}

/// What an event asks the car to do
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Command {
    /// Shift the car's x by this many pixels
    MoveBy(f32),
    /// Shift the car by this many lanes
    ShiftLane(i32),
}

/// Per-gesture input state
#[derive(Debug, Clone, Default)]
pub struct Controls {
    /// Horizontal drag travel not yet spent on a lane change
    drag_travel: f32,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translate an event into a command without touching the car
    pub fn interpret(&mut self, event: InputEvent, tuning: &Tuning) -> Option<Command> {
        match (tuning.steering, event) {
            (_, InputEvent::Drag { dx } | InputEvent::Swipe { dx }) if !dx.is_finite() => None,
            (_, InputEvent::DragEnd) => {
                self.drag_travel = 0.0;
                None
            }
            (Steering::Free, InputEvent::Drag { dx } | InputEvent::Swipe { dx }) => Some(Command::MoveBy(dx)),
            (Steering::Free, InputEvent::Key(key)) => Some(Command::MoveBy(key_sign(key) as f32 * tuning.keyboard_step)),
            (Steering::Lanes { .. }, InputEvent::Drag { dx }) => {
                // At most one lane per update; travel past the threshold is dropped
                self.drag_travel += dx;
                if self.drag_travel.abs() >= tuning.swipe_threshold {
                    let shift = self.drag_travel.signum() as i32;
                    self.drag_travel = 0.0;
                    Some(Command::ShiftLane(shift))
                } else {
                    None
                }
            }
            (Steering::Lanes { .. }, InputEvent::Swipe { dx }) => {
                (dx.abs() >= tuning.swipe_threshold).then(|| Command::ShiftLane(dx.signum() as i32))
            }
            (Steering::Lanes { .. }, InputEvent::Key(key)) => Some(Command::ShiftLane(key_sign(key))),
        }
    }

    /// Apply an event to the session's car. Returns true if the car moved.
    pub fn handle(&mut self, state: &mut GameState, event: InputEvent) -> bool {
        if !state.accepts_input() {
            self.drag_travel = 0.0;
            return false;
        }
        let Some(command) = self.interpret(event, &state.tuning) else {
            return false;
        };
        apply_command(state, command)
    }

    /// Forget any gesture in progress
    pub fn reset(&mut self) {
        self.drag_travel = 0.0;
    }
}

fn key_sign(key: Key) -> i32 {
    match key {
        Key::Left => -1,
        Key::Right => 1,
    }
}

/// Move the car, clamped to the road or lane range
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    let before = (state.car.x, state.car.lane);
    match command {
        Command::MoveBy(dx) => {
            // Lane cars only move by whole lanes
            if state.car.lane.is_none() {
                let x = state.car.x + dx;
                state.car.set_x(&state.tuning, x);
            }
        }
        Command::ShiftLane(shift) => {
            if let Some(lane) = state.car.lane {
                state.car.set_lane(&state.tuning, lane as i32 + shift);
            }
        }
    }
    before != (state.car.x, state.car.lane)
}
