//! Collision detection and response
//!
//! Everything is an axis-aligned box: the ball, the paddle and the blocks.
//! Each box is the entity's position plus its [`Drawable`] size. Per ball, per frame, in order:
//! 1. Side walls flip `vx`, the ceiling flips `vy`
//! 2. Crossing the floor loses the ball and ends processing for that ball
//! 3. Paddle contact bounces according to [`BouncePolicy`]
//! 4. Live blocks touching the ball break and flip `vy`, limited by
//!    [`BlockHitMode`]

use glam::Vec2;

use crate::config::{BlockHitMode, BouncePolicy, GameConfig};
use crate::ecs::{Entity, World};

use super::components::{BallTag, Block, Drawable, PaddleTag, Position, Velocity};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box with top-left corner `pos` and extent `size`
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self {
            min: pos,
            max: pos + size,
        }
    }

    /// Strict overlap; boxes that only share an edge do not touch
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn center_x(&self) -> f32 {
        (self.min.x + self.max.x) / 2.0
    }
}

/// Result of one collision pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionOutcome {
    InPlay,
    /// A ball crossed the floor
    BallLost,
}

/// Resolve ball contacts against walls, paddles and blocks
pub fn collision_system(world: &mut World, config: &GameConfig) -> CollisionOutcome {
    let mut paddles = Vec::new();
    {
        let mut query = world.query::<(&Position, &Drawable, &PaddleTag)>();
        for entity in query.matches() {
            if let Some((pos, drawable, _)) = query.get(entity) {
                paddles.push(Aabb::new(pos.0, drawable.size()));
            }
        }
    }

    let mut balls = Vec::new();
    {
        let mut query = world.query::<(&Position, &Velocity, &Drawable, &BallTag)>();
        for entity in query.matches() {
            if let Some((pos, vel, drawable, _)) = query.get(entity) {
                balls.push((entity, pos.0, vel.0, drawable.size()));
            }
        }
    }

    let mut outcome = CollisionOutcome::InPlay;
    for (ball, mut pos, mut vel, size) in balls {
        let lost = resolve_ball(world, config, &paddles, size, &mut pos, &mut vel);

        if let Some(p) = world.get_mut::<Position>(ball) {
            p.0 = pos;
        }
        if let Some(v) = world.get_mut::<Velocity>(ball) {
            v.0 = vel;
        }

        if lost {
            log::debug!("{ball} crossed the floor at x={:.1}", pos.x);
            outcome = CollisionOutcome::BallLost;
        }
    }
    outcome
}

/// Returns true if the ball was lost
fn resolve_ball(
    world: &mut World,
    config: &GameConfig,
    paddles: &[Aabb],
    size: Vec2,
    pos: &mut Vec2,
    vel: &mut Vec2,
) -> bool {
    if pos.x < 0.0 || pos.x + size.x > config.screen_width {
        vel.x = -vel.x;
    }
    if pos.y < 0.0 {
        vel.y = -vel.y;
    }
    if pos.y + size.y > config.screen_height {
        return true;
    }

    for paddle in paddles {
        let ball_box = Aabb::new(*pos, size);
        if ball_box.overlaps(paddle) {
            match config.bounce_policy {
                BouncePolicy::Simple => {
                    vel.y = -vel.y;
                    *vel *= config.paddle_boost;
                }
                BouncePolicy::Angled => angled_bounce(config, paddle, size, pos, vel),
            }
            log::debug!("Paddle bounce, velocity now ({:.1}, {:.1})", vel.x, vel.y);
        }
    }

    let ball_box = Aabb::new(*pos, size);
    for block in hit_blocks(world, config, &ball_box) {
        vel.y = -vel.y;
        log::debug!("Destroyed {block}");
    }

    false
}

/// Re-aim the ball from where it struck the paddle and lift it onto the
/// paddle's top edge
fn angled_bounce(
    config: &GameConfig,
    paddle: &Aabb,
    size: Vec2,
    pos: &mut Vec2,
    vel: &mut Vec2,
) {
    let half_width = paddle.width() / 2.0;
    let ball_center = pos.x + size.x / 2.0;
    let normalized = if half_width > 0.0 {
        ((ball_center - paddle.center_x()) / half_width).clamp(-1.0, 1.0)
    } else {
        0.0
    };
    let angle = normalized * config.max_bounce_angle();

    *vel = Vec2::new(
        config.ball_speed * normalized,
        -config.ball_speed * angle.cos(),
    ) * config.paddle_boost;
    pos.y = paddle.min.y - size.y;
}

/// Break live blocks touching `ball_box`, in creation order
fn hit_blocks(world: &mut World, config: &GameConfig, ball_box: &Aabb) -> Vec<Entity> {
    let mut hits = Vec::new();

    let mut query = world.query::<(&Position, &Drawable, &mut Block)>();
    for entity in query.matches() {
        let Some((pos, drawable, block)) = query.get(entity) else {
            continue;
        };
        if block.destroyed || !ball_box.overlaps(&Aabb::new(pos.0, drawable.size())) {
            continue;
        }

        block.destroyed = true;
        hits.push(entity);
        if config.block_hit_mode == BlockHitMode::FirstOnly {
            break;
        }
    }
    hits
}
