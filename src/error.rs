//! Error types
//!
//! Only platform setup can fail. Losing the ball is a game outcome, not an
//! error; see [`crate::Outcome`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("Platform initialization failed: {0}")]
    Init(String),

    #[error("Window creation failed: {0}")]
    Window(String),

    #[error("Renderer creation failed: {0}")]
    Renderer(String),

    #[error("Draw call failed: {0}")]
    Draw(String),

    #[error("No platform backend available: {0}")]
    Unsupported(&'static str),
}

impl PlatformError {
    /// Process exit status reported when setup fails
    pub fn exit_code(&self) -> i32 {
        -1
    }
}
