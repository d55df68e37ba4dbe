//! Velocity integration

use crate::ecs::World;

use super::components::{Position, Velocity};

/// `position += velocity * dt` for every entity that has both
pub fn movement_system(world: &mut World, dt: f32) {
    let mut query = world.query::<(&mut Position, &Velocity)>();
    for entity in query.matches() {
        if let Some((pos, vel)) = query.get(entity) {
            pos.0 += vel.0 * dt;
        }
    }
}
