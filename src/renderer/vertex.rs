//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// Reinterpret a vertex list as bytes for upload
pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
    bytemuck::cast_slice(vertices)
}

/// Colors for game elements
pub mod colors {
    pub const ROAD: [f32; 4] = [0.2, 0.2, 0.2, 1.0];
    pub const ROAD_EDGE: [f32; 4] = [0.95, 0.95, 0.95, 1.0];
    pub const LANE_MARKER: [f32; 4] = [1.0, 0.84, 0.4, 0.8];
    pub const OBSTACLE: [f32; 4] = [0.95, 0.55, 0.15, 1.0];
    pub const OBSTACLE_STRIPE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CAR_CRASHED: [f32; 4] = [0.55, 0.1, 0.1, 1.0];
    pub const WINDSHIELD: [f32; 4] = [0.6, 0.85, 1.0, 1.0];
}
