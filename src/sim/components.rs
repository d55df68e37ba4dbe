//! Component types attached to game entities

use glam::Vec2;

use crate::ecs::Component;
use crate::platform::{Color, Rect};

/// Top-left corner of the entity's bounding box, screen pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Pixels per second, signed
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity(pub Vec2);

impl Velocity {
    pub fn new(vx: f32, vy: f32) -> Self {
        Self(Vec2::new(vx, vy))
    }
}

/// Render geometry and fill colour
///
/// `rect.x`/`rect.y` are overwritten from [`Position`] every frame; the size
/// doubles as the collision box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drawable {
    pub rect: Rect,
    pub color: Color,
}

impl Drawable {
    pub fn new(width: f32, height: f32, color: Color) -> Self {
        Self {
            rect: Rect::new(0, 0, width as u32, height as u32),
            color,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.rect.w as f32, self.rect.h as f32)
    }
}

/// Marks the player-controlled paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaddleTag;

/// Marks the ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BallTag;

/// A breakable block. `destroyed` only ever goes from false to true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Block {
    pub destroyed: bool,
}

impl Component for Position {}
impl Component for Velocity {}
impl Component for Drawable {}
impl Component for PaddleTag {}
impl Component for BallTag {}
impl Component for Block {}
