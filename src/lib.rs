//! Brick Pong - a Breakout/Pong hybrid
//!
//! Core modules:
//! - `ecs`: Entity store (entities, sparse component storage, typed queries)
//! - `sim`: Per-frame systems (input, movement, collision, render sync)
//! - `game_loop`: Frame loop state machine and frame-rate cap
//! - `platform`: Window, drawing, keyboard and clock services
//! - `config`: Gameplay constants and presets

pub mod config;
pub mod ecs;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod sim;

pub use config::{BlockHitMode, BouncePolicy, GameConfig, Preset};
pub use error::PlatformError;
pub use game_loop::{FrameGate, FrameLoop, LoopState, Outcome};

/// Default gameplay constants
pub mod consts {
    /// Playfield dimensions
    pub const SCREEN_WIDTH: f32 = 640.0;
    pub const SCREEN_HEIGHT: f32 = 480.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_BOTTOM_MARGIN: f32 = 10.0;
    pub const PADDLE_SPEED: f32 = 300.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 15.0;
    pub const BALL_SPEED: f32 = 200.0;
    pub const BALL_START: (f32, f32) = (110.0, 110.0);
    /// Speed boost when ball hits paddle (multiplicative)
    pub const PADDLE_BOOST: f32 = 1.1;
    pub const MAX_BOUNCE_ANGLE_DEG: f32 = 45.0;

    /// Block grid
    pub const BLOCK_ROWS: u32 = 5;
    pub const BLOCK_COLUMNS: u32 = 10;
    pub const BLOCK_HEIGHT: f32 = 20.0;

    /// Frame-rate cap
    pub const MAX_FPS: u32 = 60;

    pub const WINDOW_TITLE: &str = "Breakout ECS";
}
