//! Browser backend on a 2D canvas
//!
//! Keyboard and page-lifecycle events arrive through DOM listeners and are
//! buffered until the frame loop polls them. Frames are driven by
//! `requestAnimationFrame` and capped by a `FrameGate` in the entry point, so
//! `delay_ms` does nothing here.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

use super::{Color, KeyState, Platform, PlatformEvent, Rect};
use crate::error::PlatformError;

pub struct WebPlatform {
    window: web_sys::Window,
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    keys: Rc<RefCell<KeyState>>,
    events: Rc<RefCell<Vec<PlatformEvent>>>,
}

impl WebPlatform {
    /// Size the canvas with id `canvas_id` and grab its 2D context
    pub fn new(canvas_id: &str, width: u32, height: u32) -> Result<Self, PlatformError> {
        let window = web_sys::window().ok_or(PlatformError::Init("no window".to_string()))?;
        let document = window
            .document()
            .ok_or(PlatformError::Init("no document".to_string()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| PlatformError::Window(format!("no #{canvas_id} element")))?
            .dyn_into()
            .map_err(|_| PlatformError::Window(format!("#{canvas_id} is not a canvas")))?;
        canvas.set_width(width);
        canvas.set_height(height);

        let context = canvas
            .get_context("2d")
            .map_err(|e| PlatformError::Renderer(format!("{e:?}")))?
            .ok_or(PlatformError::Renderer("2d context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| PlatformError::Renderer("unexpected context type".to_string()))?;

        let platform = Self {
            window,
            context,
            width: width as f64,
            height: height as f64,
            keys: Rc::new(RefCell::new(KeyState::default())),
            events: Rc::new(RefCell::new(Vec::new())),
        };
        platform.setup_listeners()?;
        Ok(platform)
    }

    fn setup_listeners(&self) -> Result<(), PlatformError> {
        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let keys = self.keys.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut keys = keys.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => keys.left = pressed,
                    "ArrowRight" => keys.right = pressed,
                    _ => return,
                }
                event.prevent_default();
            });
            self.listen(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        let events = self.events.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            events.borrow_mut().push(PlatformEvent::Quit);
        });
        self.listen("pagehide", closure.as_ref().unchecked_ref())?;
        closure.forget();

        Ok(())
    }

    fn listen(&self, event_name: &str, callback: &js_sys::Function) -> Result<(), PlatformError> {
        self.window
            .add_event_listener_with_callback(event_name, callback)
            .map_err(|e| PlatformError::Init(format!("{event_name} listener: {e:?}")))
    }
}

impl Platform for WebPlatform {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    fn keyboard(&self) -> KeyState {
        *self.keys.borrow()
    }

    fn ticks_ms(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn delay_ms(&mut self, _ms: u32) {}

    fn clear(&mut self, color: Color) -> Result<(), PlatformError> {
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(0.0, 0.0, self.width, self.height);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), PlatformError> {
        self.context.set_fill_style_str(&color.to_css());
        self.context.fill_rect(
            rect.x as f64,
            rect.y as f64,
            rect.w as f64,
            rect.h as f64,
        );
        Ok(())
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        // The browser composites the canvas on its own
        Ok(())
    }

    fn show_message(&mut self, title: &str, body: &str) {
        if let Err(e) = self.window.alert_with_message(&format!("{title}\n\n{body}")) {
            log::warn!("Could not show alert: {e:?}");
        }
    }
}
