//! Render sync and draw-list collection
//!
//! Positions are floats; drawables are whole pixels. Once per frame, before
//! drawing, every visible drawable's rectangle is moved to its entity's
//! position (truncated toward zero).

use crate::ecs::{Without, World};
use crate::platform::{Color, Rect};

use super::components::{Block, Drawable, Position};

/// Copy `Position` into `Drawable.rect` for non-block entities and for
/// blocks that are still standing
pub fn render_sync_system(world: &mut World) {
    {
        let mut query = world.query_filtered::<(&Position, &mut Drawable), Without<Block>>();
        for entity in query.matches() {
            if let Some((pos, drawable)) = query.get(entity) {
                sync(pos, drawable);
            }
        }
    }

    let mut query = world.query::<(&Position, &mut Drawable, &Block)>();
    for entity in query.matches() {
        if let Some((pos, drawable, block)) = query.get(entity) {
            if !block.destroyed {
                sync(pos, drawable);
            }
        }
    }
}

#[inline]
fn sync(pos: &Position, drawable: &mut Drawable) {
    drawable.rect.x = pos.0.x as i32;
    drawable.rect.y = pos.0.y as i32;
}

/// Rectangles to fill this frame, in draw order: paddle and ball first, then
/// live blocks. Destroyed blocks are left out.
pub fn collect_draw_list(world: &mut World) -> Vec<(Rect, Color)> {
    let mut draw_list = Vec::new();
    {
        let mut query = world.query_filtered::<&Drawable, Without<Block>>();
        for entity in query.matches() {
            if let Some(drawable) = query.get(entity) {
                draw_list.push((drawable.rect, drawable.color));
            }
        }
    }

    let mut query = world.query::<(&Drawable, &Block)>();
    for entity in query.matches() {
        if let Some((drawable, block)) = query.get(entity) {
            if !block.destroyed {
                draw_list.push((drawable.rect, drawable.color));
            }
        }
    }
    draw_list
}
