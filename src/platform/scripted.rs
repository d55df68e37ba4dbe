//! In-memory platform for tests
//!
//! The clock only moves when the frame loop sleeps (or when a test advances
//! it), events are queued per frame, and every draw call is recorded.

use std::collections::VecDeque;

use super::{Color, KeyState, Platform, PlatformEvent, Rect};
use crate::error::PlatformError;

#[derive(Debug, Default)]
pub struct ScriptedPlatform {
    pub now_ms: u64,
    pub keys: KeyState,
    /// Events returned by successive `poll_events` calls
    pub event_batches: VecDeque<Vec<PlatformEvent>>,
    /// Milliseconds the clock advances on every `poll_events`, standing in for frame work
    pub work_ms: u64,
    pub delays: Vec<u32>,
    pub clears: usize,
    pub presents: usize,
    /// Rectangles drawn since the last `clear`
    pub frame: Vec<(Rect, Color)>,
    pub messages: Vec<(String, String)>,
}

impl ScriptedPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_events(&mut self, events: Vec<PlatformEvent>) {
        self.event_batches.push_back(events);
    }
}

impl Platform for ScriptedPlatform {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.now_ms += self.work_ms;
        self.event_batches.pop_front().unwrap_or_default()
    }

    fn keyboard(&self) -> KeyState {
        self.keys
    }

    fn ticks_ms(&self) -> u64 {
        self.now_ms
    }

    fn delay_ms(&mut self, ms: u32) {
        self.delays.push(ms);
        self.now_ms += u64::from(ms);
    }

    fn clear(&mut self, _color: Color) -> Result<(), PlatformError> {
        self.clears += 1;
        self.frame.clear();
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), PlatformError> {
        self.frame.push((rect, color));
        Ok(())
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.presents += 1;
        Ok(())
    }

    fn show_message(&mut self, title: &str, body: &str) {
        self.messages.push((title.to_string(), body.to_string()));
    }
}
