//! Per-frame simulation
//!
//! Systems are plain functions over the [`World`]; each borrows it for one
//! call and keeps nothing between frames. The frame loop runs them in order:
//! input, movement, collision, render sync.

pub mod collision;
pub mod components;
pub mod input;
pub mod movement;
pub mod render;
pub mod setup;

pub use collision::{Aabb, CollisionOutcome, collision_system};
pub use components::{BallTag, Block, Drawable, PaddleTag, Position, Velocity};
pub use input::input_system;
pub use movement::movement_system;
pub use render::{collect_draw_list, render_sync_system};
pub use setup::{Population, populate};

use crate::ecs::World;

/// Blocks not yet destroyed
pub fn live_block_count(world: &mut World) -> usize {
    let mut query = world.query::<&Block>();
    query
        .matches()
        .filter(|&entity| query.get(entity).is_some_and(|block| !block.destroyed))
        .count()
}
