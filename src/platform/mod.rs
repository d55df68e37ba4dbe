//! Platform abstraction layer
//!
//! The simulation never talks to a window system directly. Everything it
//! needs from the outside world goes through [`Platform`]:
//! - Time/ticks and frame-pacing sleeps
//! - Event queue (only "quit" is acted on) and keyboard state
//! - Rectangle drawing and presentation
//! - A blocking notification shown once at game over
//!
//! Backends: SDL2 on native builds (`sdl` feature) and a 2D canvas in the
//! browser.

#[cfg(all(feature = "sdl", not(target_arch = "wasm32")))]
pub mod sdl;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(test)]
pub(crate) mod scripted;

use crate::error::PlatformError;

/// RGBA fill colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const RED: Color = Color::rgb(0xFF, 0x00, 0x00);
    pub const GREEN: Color = Color::rgb(0x00, 0xFF, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// CSS `rgba()` form, for canvas fill styles
    pub fn to_css(&self) -> String {
        format!(
            "rgba({}, {}, {}, {})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

/// Integer pixel rectangle (top-left corner plus size)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
}

/// Snapshot of the keys the game reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
}

/// Events drained from the platform queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Window closed / page leaving
    Quit,
    /// Anything else; ignored by the frame loop
    Other,
}

/// Services the frame loop consumes from the host
pub trait Platform {
    /// Drain every pending event
    fn poll_events(&mut self) -> Vec<PlatformEvent>;

    fn keyboard(&self) -> KeyState;

    /// Monotonic milliseconds since an arbitrary origin
    fn ticks_ms(&self) -> u64;

    fn delay_ms(&mut self, ms: u32);

    fn clear(&mut self, color: Color) -> Result<(), PlatformError>;

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), PlatformError>;

    fn present(&mut self) -> Result<(), PlatformError>;

    /// Blocking modal notification
    fn show_message(&mut self, title: &str, body: &str);
}
