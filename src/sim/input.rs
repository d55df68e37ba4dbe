//! Keyboard-driven paddle movement

use crate::config::GameConfig;
use crate::ecs::World;
use crate::platform::KeyState;

use super::components::{PaddleTag, Position};

/// Slide every paddle left/right by `paddle_speed * dt`, then clamp it to
/// `[0, screen_width - paddle_width]`
pub fn input_system(world: &mut World, keys: KeyState, dt: f32, config: &GameConfig) {
    let step = config.paddle_speed * dt;
    let max_x = config.paddle_max_x();

    let mut query = world.query::<(&mut Position, &PaddleTag)>();
    for entity in query.matches() {
        let Some((pos, _)) = query.get(entity) else {
            continue;
        };
        if keys.left {
            pos.0.x -= step;
        }
        if keys.right {
            pos.0.x += step;
        }
        pos.0.x = pos.0.x.clamp(0.0, max_x);
    }
}
