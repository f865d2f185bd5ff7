//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;
use crate::sim::Aabb;

/// Generate vertices for a filled axis-aligned rectangle (two triangles)
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Rectangle covering a bounding box
pub fn aabb(bounds: &Aabb, color: [f32; 4]) -> Vec<Vertex> {
    rect(bounds.min, bounds.size, color)
}

/// Generate vertices for a vertical dashed line between `top` and `bottom`
///
/// `offset` scrolls the pattern downward; dashes are clipped to the range.
#[allow(clippy::too_many_arguments)]
pub fn vertical_dashes(
    center_x: f32,
    width: f32,
    dash: f32,
    gap: f32,
    offset: f32,
    top: f32,
    bottom: f32,
    color: [f32; 4],
) -> Vec<Vertex> {
    let period = dash + gap;
    if period <= 0.0 || bottom <= top {
        return Vec::new();
    }

    let mut vertices = Vec::new();
    let x = center_x - width / 2.0;
    let mut y = top - period + offset.rem_euclid(period);
    while y < bottom {
        let start = y.max(top);
        let end = (y + dash).min(bottom);
        if end > start {
            vertices.extend(rect(Vec2::new(x, start), Vec2::new(width, end - start), color));
        }
        y += period;
    }
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let vertices = rect(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), [1.0; 4]);
        assert_eq!(vertices.len(), 6);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 4.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 2.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 6.0);
    }

    #[test]
    fn test_dashes_stay_in_range() {
        let vertices = vertical_dashes(100.0, 4.0, 40.0, 40.0, 25.0, 0.0, 800.0, [1.0; 4]);
        assert!(!vertices.is_empty());
        assert_eq!(vertices.len() % 6, 0);
        for v in &vertices {
            assert!(v.position[1] >= 0.0 && v.position[1] <= 800.0);
            assert!(v.position[0] == 98.0 || v.position[0] == 102.0);
        }
    }

    #[test]
    fn test_dashes_scroll_with_offset() {
        let still = vertical_dashes(0.0, 2.0, 40.0, 40.0, 0.0, 0.0, 800.0, [1.0; 4]);
        let moved = vertical_dashes(0.0, 2.0, 40.0, 40.0, 10.0, 0.0, 800.0, [1.0; 4]);
        assert_ne!(still, moved);
        // A full period brings the pattern back
        let wrapped = vertical_dashes(0.0, 2.0, 40.0, 40.0, 80.0, 0.0, 800.0, [1.0; 4]);
        assert_eq!(still, wrapped);
    }
}
