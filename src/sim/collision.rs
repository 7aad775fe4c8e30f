//! Axis-aligned collision and edge-proximity predicates
//!
//! Rectangles are half-open: `[x, x + w) × [y, y + h)`. Touching edges
//! never count as an overlap. Every predicate here is pure.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Exclusive bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }
}

/// True iff both rectangles share a nonempty intersection on both axes
#[inline]
pub fn rects_overlap(a: Rect, b: Rect) -> bool {
    let (a_max, b_max) = (a.max(), b.max());
    a.min.x < b_max.x && b.min.x < a_max.x && a.min.y < b_max.y && b.min.y < a_max.y
}

/// Bounding-box overlap between two entities
#[inline]
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    rects_overlap(a.rect(), b.rect())
}

/// Within one step of the left wall
#[inline]
pub fn near_left_edge(e: &Entity) -> bool {
    e.pos.x < e.speed
}

/// Within one step of the right wall
#[inline]
pub fn near_right_edge(e: &Entity, arena_width: f32) -> bool {
    e.pos.x + e.size.x + e.speed > arena_width
}

/// Within one step of the ceiling and still moving up.
///
/// The velocity test keeps a ball that already bounced from flipping back.
#[inline]
pub fn near_top_edge(e: &Entity) -> bool {
    e.pos.y < e.speed && e.vel.y < 0.0
}

/// Within one step of the floor and still moving down
#[inline]
pub fn near_bottom_edge(e: &Entity, arena_height: f32) -> bool {
    e.pos.y + e.size.y + e.speed > arena_height && e.vel.y > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;

    fn ball_at(x: f32, y: f32, vel: Vec2) -> Entity {
        Entity::new(1, EntityKind::Ball, Vec2::new(x, y), Vec2::splat(50.0), 10.0).with_velocity(vel)
    }

    #[test]
    fn test_overlap_and_touching() {
        let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Rect::new(Vec2::new(5.0, 5.0), Vec2::new(10.0, 10.0));
        assert!(rects_overlap(a, b));
        assert!(rects_overlap(b, a));

        // Shared edge on x
        let c = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!rects_overlap(a, c));

        // Shared edge on y
        let d = Rect::new(Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0));
        assert!(!rects_overlap(a, d));

        // Overlap on x only
        let e = Rect::new(Vec2::new(5.0, 20.0), Vec2::new(10.0, 10.0));
        assert!(!rects_overlap(a, e));
    }

    #[test]
    fn test_side_edges() {
        let ball = ball_at(9.0, 100.0, Vec2::ZERO);
        assert!(near_left_edge(&ball));
        let ball = ball_at(10.0, 100.0, Vec2::ZERO);
        assert!(!near_left_edge(&ball));

        // 741 + 50 + 10 > 800
        let ball = ball_at(741.0, 100.0, Vec2::ZERO);
        assert!(near_right_edge(&ball, 800.0));
        let ball = ball_at(740.0, 100.0, Vec2::ZERO);
        assert!(!near_right_edge(&ball, 800.0));
    }

    #[test]
    fn test_top_edge_requires_upward_motion() {
        let rising = ball_at(100.0, 5.0, Vec2::new(0.0, -10.0));
        assert!(near_top_edge(&rising));

        let falling = ball_at(100.0, 5.0, Vec2::new(0.0, 10.0));
        assert!(!near_top_edge(&falling));
    }

    #[test]
    fn test_bottom_edge_requires_downward_motion() {
        let falling = ball_at(100.0, 595.0, Vec2::new(0.0, 10.0));
        assert!(near_bottom_edge(&falling, 600.0));

        let rising = ball_at(100.0, 595.0, Vec2::new(0.0, -10.0));
        assert!(!near_bottom_edge(&rising, 600.0));

        let clear = ball_at(100.0, 540.0, Vec2::new(0.0, 10.0));
        assert!(!near_bottom_edge(&clear, 600.0));
    }
}
