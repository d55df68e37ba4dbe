//! Brick Pong entry point
//!
//! Picks a preset, opens the platform and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use brick_pong::{GameConfig, Preset};

/// Preset named by `name`, falling back to the default on anything unknown
fn select_config(name: Option<&str>) -> GameConfig {
    match name {
        None => Preset::default().config(),
        Some(name) => match Preset::from_str(name) {
            Some(preset) => {
                log::info!("Using {} preset", preset.as_str());
                preset.config()
            }
            None => {
                log::warn!(
                    "Unknown preset '{name}', using {}",
                    Preset::default().as_str()
                );
                Preset::default().config()
            }
        },
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;

    use brick_pong::consts::WINDOW_TITLE;
    use brick_pong::platform::web::WebPlatform;
    use brick_pong::{FrameGate, FrameLoop, LoopState};

    const CANVAS_ID: &str = "game-canvas";

    struct Game {
        frame_loop: FrameLoop,
        platform: WebPlatform,
        gate: FrameGate,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Logger init failed: {e}").into());
        }
        log::info!("{WINDOW_TITLE} (web) starting");

        let window = match web_sys::window() {
            Some(window) => window,
            None => {
                log::error!("No browser window");
                return;
            }
        };
        if let Some(document) = window.document() {
            document.set_title(WINDOW_TITLE);
        }

        // The canvas is sized from the preset, which comes from the page URL
        let preset = query_preset(&window);
        let config = super::select_config(preset.as_deref());

        let platform =
            match WebPlatform::new(CANVAS_ID, config.screen_width as u32, config.screen_height as u32)
            {
                Ok(platform) => platform,
                Err(e) => {
                    log::error!("Failed to start: {e}");
                    return;
                }
            };

        let gate = FrameGate::new(config.frame_budget_ms());
        let frame_loop = FrameLoop::new(config, &platform);
        let game = Rc::new(RefCell::new(Game {
            frame_loop,
            platform,
            gate,
        }));
        request_animation_frame(game);
    }

    fn query_preset(window: &web_sys::Window) -> Option<String> {
        let search = window.location().search().ok()?;
        search
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "preset")
            .map(|(_, value)| value.to_string())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("No browser window; frame loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed, frame loop stopped: {e:?}");
            return;
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let state = {
            let mut g = game.borrow_mut();
            let Game {
                frame_loop,
                platform,
                gate,
            } = &mut *g;
            // Refresh rates above the frame cap skip callbacks
            if gate.ready(time) {
                frame_loop.iterate(platform)
            } else {
                frame_loop.state()
            }
        };

        if state == LoopState::Quit {
            log::info!("Frame loop stopped");
            return;
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let preset = std::env::args().nth(1);
    let config = select_config(preset.as_deref());

    let code = run_native(config);
    std::process::exit(code);
}

#[cfg(all(not(target_arch = "wasm32"), feature = "sdl"))]
fn run_native(config: GameConfig) -> i32 {
    use brick_pong::FrameLoop;
    use brick_pong::consts::WINDOW_TITLE;
    use brick_pong::platform::sdl::SdlPlatform;

    log::info!("{WINDOW_TITLE} (native) starting");
    let mut platform = match SdlPlatform::new(
        WINDOW_TITLE,
        config.screen_width as u32,
        config.screen_height as u32,
    ) {
        Ok(platform) => platform,
        Err(e) => {
            log::error!("Failed to start: {e}");
            return e.exit_code();
        }
    };

    let outcome = FrameLoop::new(config, &platform).run(&mut platform);
    log::info!("Finished: {outcome:?}");
    0
}

#[cfg(all(not(target_arch = "wasm32"), not(feature = "sdl")))]
fn run_native(_config: GameConfig) -> i32 {
    let e = brick_pong::PlatformError::Unsupported(
        "native window needs the `sdl` feature (cargo run --features sdl)",
    );
    log::error!("Failed to start: {e}");
    e.exit_code()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
