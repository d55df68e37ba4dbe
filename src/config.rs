//! Game configuration
//!
//! Every tunable lives in one [`GameConfig`] record. Values are fixed at
//! startup; the only runtime choice is which [`Preset`] to start from.

use crate::consts::*;
use crate::platform::Color;

/// What happens to the ball's velocity when it touches the paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BouncePolicy {
    /// Reflect vertically and speed up both axes
    #[default]
    Simple,
    /// Bounce angle follows where the ball struck the paddle, and the ball is
    /// lifted back onto the paddle's top edge
    Angled,
}

/// How many blocks a ball may destroy in one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockHitMode {
    /// Every overlapping live block breaks
    #[default]
    Multi,
    /// Only the first overlapping block in iteration order breaks
    FirstOnly,
}

/// Named starting configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// Five rows, fast ball, simple reflection
    #[default]
    Classic,
    /// Three rows, slower ball, angled reflection
    Angled,
}

impl Preset {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Angled => "angled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" | "a" => Some(Preset::Classic),
            "angled" | "b" => Some(Preset::Angled),
            _ => None,
        }
    }

    pub fn config(&self) -> GameConfig {
        match self {
            Preset::Classic => GameConfig::classic(),
            Preset::Angled => GameConfig::angled(),
        }
    }
}

/// All gameplay constants in one place
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Playfield width in pixels (640)
    pub screen_width: f32,
    /// Playfield height in pixels (480)
    pub screen_height: f32,

    // === Paddle ===
    /// Paddle size (100 × 20)
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between the paddle's bottom edge and the floor (10)
    pub paddle_bottom_margin: f32,
    /// Horizontal speed while a key is held, pixels/second
    pub paddle_speed: f32,

    // === Ball ===
    /// Edge length of the square ball
    pub ball_size: f32,
    /// Base speed per axis, pixels/second
    pub ball_speed: f32,
    /// Top-left corner at spawn (110, 110)
    pub ball_start: (f32, f32),
    /// Velocity multiplier applied on every paddle contact (1.1)
    pub paddle_boost: f32,
    /// Steepest deflection of the angled bounce, degrees (45)
    pub max_bounce_angle_deg: f32,
    pub bounce_policy: BouncePolicy,

    // === Blocks ===
    pub block_rows: u32,
    pub block_columns: u32,
    /// Block height (20); width is derived from the column count
    pub block_height: f32,
    pub block_hit_mode: BlockHitMode,

    // === Timing ===
    /// Frame-rate cap (60)
    pub target_fps: u32,

    // === Colours ===
    pub background_color: Color,
    pub paddle_color: Color,
    pub ball_color: Color,
    pub block_color: Color,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl GameConfig {
    /// Five rows of blocks, simple reflection, multi-hit
    pub fn classic() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_bottom_margin: PADDLE_BOTTOM_MARGIN,
            paddle_speed: PADDLE_SPEED,

            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            ball_start: BALL_START,
            paddle_boost: PADDLE_BOOST,
            max_bounce_angle_deg: MAX_BOUNCE_ANGLE_DEG,
            bounce_policy: BouncePolicy::Simple,

            block_rows: BLOCK_ROWS,
            block_columns: BLOCK_COLUMNS,
            block_height: BLOCK_HEIGHT,
            block_hit_mode: BlockHitMode::Multi,

            target_fps: MAX_FPS,

            background_color: Color::BLACK,
            paddle_color: Color::WHITE,
            ball_color: Color::RED,
            block_color: Color::GREEN,
        }
    }

    /// Three rows of blocks, angled reflection, one block per frame
    pub fn angled() -> Self {
        Self {
            paddle_speed: 200.0,
            ball_size: 13.0,
            ball_speed: 120.0,
            bounce_policy: BouncePolicy::Angled,
            block_rows: 3,
            block_hit_mode: BlockHitMode::FirstOnly,
            ..Self::classic()
        }
    }

    /// Block width: the screen split evenly across the columns
    pub fn block_width(&self) -> f32 {
        (self.screen_width / self.block_columns.max(1) as f32).floor()
    }

    /// Total number of blocks in the grid
    pub fn block_count(&self) -> usize {
        (self.block_rows * self.block_columns) as usize
    }

    /// Paddle spawn position: centred, `paddle_bottom_margin` above the floor
    pub fn paddle_start(&self) -> (f32, f32) {
        (
            self.screen_width / 2.0 - self.paddle_width / 2.0,
            self.screen_height - self.paddle_height - self.paddle_bottom_margin,
        )
    }

    /// Largest x the paddle may reach
    pub fn paddle_max_x(&self) -> f32 {
        (self.screen_width - self.paddle_width).max(0.0)
    }

    /// Wall-clock budget per frame in milliseconds
    pub fn frame_budget_ms(&self) -> f32 {
        1000.0 / self.target_fps.max(1) as f32
    }

    pub fn max_bounce_angle(&self) -> f32 {
        self.max_bounce_angle_deg.to_radians()
    }
}
