//! Initial entity population
//!
//! Creation order is paddle, ball, then blocks row by row. Systems iterate
//! in creation order, so this order is also the block hit order.

use crate::config::GameConfig;
use crate::ecs::{Entity, World};

use super::components::{BallTag, Block, Drawable, PaddleTag, Position, Velocity};

/// Handles to the entities created at startup
#[derive(Debug, Clone)]
pub struct Population {
    pub paddle: Entity,
    pub ball: Entity,
    /// Row-major
    pub blocks: Vec<Entity>,
}

impl Population {
    /// Block at `row`, `column`, if inside the grid
    pub fn block_at(&self, row: u32, column: u32, config: &GameConfig) -> Option<Entity> {
        if row >= config.block_rows || column >= config.block_columns {
            return None;
        }
        self.blocks
            .get((row * config.block_columns + column) as usize)
            .copied()
    }
}

/// Spawn the paddle, the ball and the block grid
pub fn populate(world: &mut World, config: &GameConfig) -> Population {
    let (paddle_x, paddle_y) = config.paddle_start();
    let paddle = world
        .build()
        .with(Position::new(paddle_x, paddle_y))
        .with(Velocity::new(0.0, 0.0))
        .with(Drawable::new(
            config.paddle_width,
            config.paddle_height,
            config.paddle_color,
        ))
        .with(PaddleTag)
        .id();

    let (ball_x, ball_y) = config.ball_start;
    let ball = world
        .build()
        .with(Position::new(ball_x, ball_y))
        .with(Velocity::new(config.ball_speed, config.ball_speed))
        .with(Drawable::new(
            config.ball_size,
            config.ball_size,
            config.ball_color,
        ))
        .with(BallTag)
        .id();

    let block_width = config.block_width();
    let mut blocks = Vec::with_capacity(config.block_count());
    for row in 0..config.block_rows {
        for column in 0..config.block_columns {
            let block = world
                .build()
                .with(Position::new(
                    column as f32 * block_width,
                    row as f32 * config.block_height,
                ))
                .with(Drawable::new(
                    block_width,
                    config.block_height,
                    config.block_color,
                ))
                .with(Block::default())
                .id();
            blocks.push(block);
        }
    }

    log::debug!(
        "Spawned paddle {paddle}, ball {ball} and {} blocks",
        blocks.len()
    );

    Population {
        paddle,
        ball,
        blocks,
    }
}
