//! Simulated entities
//!
//! Every object in the arena shares one data shape. Per-kind behavior is
//! dispatched on the [`EntityKind`] tag by the tick functions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// Stable entity identifier, allocated by the world
pub type EntityId = u32;

/// Paddle input flags, mirrored from the input collaborator each frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaddleControls {
    pub move_left: bool,
    pub move_right: bool,
}

/// Entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    /// Input-driven, clamped to the arena
    Paddle(PaddleControls),
    /// Free-moving, bounces off paddle, ceiling, walls
    Ball,
    /// Static, destroyed on contact with a ball
    Block,
}

/// An entity in the arena
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    /// Fixed after construction
    pub size: Vec2,
    /// Per-tick displacement
    pub vel: Vec2,
    /// Step magnitude used by the edge-proximity checks
    pub speed: f32,
}

impl Entity {
    pub fn new(id: EntityId, kind: EntityKind, pos: Vec2, size: Vec2, speed: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            size,
            vel: Vec2::ZERO,
            speed,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    /// Base tick: integrate velocity into position
    #[inline]
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    pub fn is_paddle(&self) -> bool {
        matches!(self.kind, EntityKind::Paddle(_))
    }

    pub fn is_ball(&self) -> bool {
        self.kind == EntityKind::Ball
    }

    pub fn is_block(&self) -> bool {
        self.kind == EntityKind::Block
    }

    /// Reverse the vertical velocity component
    pub fn bounce_vertical(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Reverse the horizontal velocity component (no-op when it is zero)
    pub fn bounce_horizontal(&mut self) {
        self.vel.x = -self.vel.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_integrates_velocity() {
        let mut ball = Entity::new(1, EntityKind::Ball, Vec2::new(10.0, 20.0), Vec2::splat(50.0), 10.0)
            .with_velocity(Vec2::new(-3.0, 10.0));
        ball.advance();
        assert_eq!(ball.pos, Vec2::new(7.0, 30.0));
        ball.advance();
        assert_eq!(ball.pos, Vec2::new(4.0, 40.0));
    }

    #[test]
    fn test_bounces_flip_sign_only() {
        let mut ball = Entity::new(1, EntityKind::Ball, Vec2::ZERO, Vec2::splat(50.0), 10.0)
            .with_velocity(Vec2::new(4.0, -10.0));
        ball.bounce_vertical();
        assert_eq!(ball.vel, Vec2::new(4.0, 10.0));
        ball.bounce_horizontal();
        assert_eq!(ball.vel, Vec2::new(-4.0, 10.0));
    }

    #[test]
    fn test_kind_queries() {
        let paddle = Entity::new(
            1,
            EntityKind::Paddle(PaddleControls::default()),
            Vec2::ZERO,
            Vec2::new(200.0, 50.0),
            10.0,
        );
        assert!(paddle.is_paddle());
        assert!(!paddle.is_ball());
        assert!(!paddle.is_block());
    }
}
