//! Native backend on SDL2

use sdl2::EventPump;
use sdl2::TimerSubsystem;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use sdl2::messagebox::{MessageBoxFlag, show_simple_message_box};
use sdl2::render::Canvas;
use sdl2::video::Window;

use super::{Color, KeyState, Platform, PlatformEvent, Rect};
use crate::error::PlatformError;

pub struct SdlPlatform {
    canvas: Canvas<Window>,
    event_pump: EventPump,
    timer: TimerSubsystem,
    // Dropped last; tears SDL down
    _context: sdl2::Sdl,
}

impl SdlPlatform {
    /// Open a centred window with an accelerated renderer
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, PlatformError> {
        let context = sdl2::init().map_err(PlatformError::Init)?;
        let video = context.video().map_err(PlatformError::Init)?;
        let timer = context.timer().map_err(PlatformError::Init)?;

        let window = video
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| PlatformError::Window(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| PlatformError::Renderer(e.to_string()))?;

        let event_pump = context.event_pump().map_err(PlatformError::Init)?;

        log::info!("SDL window {width}x{height} ready");

        Ok(Self {
            canvas,
            event_pump,
            timer,
            _context: context,
        })
    }
}

fn sdl_color(color: Color) -> sdl2::pixels::Color {
    sdl2::pixels::Color::RGBA(color.r, color.g, color.b, color.a)
}

impl Platform for SdlPlatform {
    fn poll_events(&mut self) -> Vec<PlatformEvent> {
        self.event_pump
            .poll_iter()
            .map(|event| match event {
                Event::Quit { .. } => PlatformEvent::Quit,
                _ => PlatformEvent::Other,
            })
            .collect()
    }

    fn keyboard(&self) -> KeyState {
        let keyboard = self.event_pump.keyboard_state();
        KeyState {
            left: keyboard.is_scancode_pressed(Scancode::Left),
            right: keyboard.is_scancode_pressed(Scancode::Right),
        }
    }

    fn ticks_ms(&self) -> u64 {
        self.timer.ticks64()
    }

    fn delay_ms(&mut self, ms: u32) {
        self.timer.delay(ms);
    }

    fn clear(&mut self, color: Color) -> Result<(), PlatformError> {
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas.clear();
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), PlatformError> {
        self.canvas.set_draw_color(sdl_color(color));
        self.canvas
            .fill_rect(sdl2::rect::Rect::new(rect.x, rect.y, rect.w, rect.h))
            .map_err(PlatformError::Draw)
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        self.canvas.present();
        Ok(())
    }

    fn show_message(&mut self, title: &str, body: &str) {
        if let Err(e) =
            show_simple_message_box(MessageBoxFlag::INFORMATION, title, body, self.canvas.window())
        {
            log::warn!("Could not show message box: {e:?}");
        }
    }
}
