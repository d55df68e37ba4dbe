//! Frame loop
//!
//! One iteration: measure dT, drain events, run input → movement →
//! collision → render sync, draw, then sleep off whatever is left of the
//! frame budget. dT is variable and unclamped; a long stall produces one
//! correspondingly long step. A quit event still lets its frame run to the
//! end.
//!
//! ```text
//! Running --quit event--> Quit
//! Running --ball lost--> GameOver --notification shown--> Quit
//! ```

use crate::config::GameConfig;
use crate::ecs::World;
use crate::platform::{Platform, PlatformEvent};
use crate::sim::{self, Block, CollisionOutcome, Population};

pub const GAME_OVER_TITLE: &str = "Game Over";
pub const GAME_OVER_BODY: &str = "The ball got past the paddle.";

/// Frame loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Ball lost; the final frame is drawn and the player notified
    GameOver,
    Quit,
}

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Window closed by the player
    Quit,
    /// Ball crossed the floor
    GameOver,
}

pub struct FrameLoop {
    world: World,
    population: Population,
    config: GameConfig,
    state: LoopState,
    outcome: Option<Outcome>,
    /// Start time of the previous iteration
    last_tick_ms: u64,
    frames: u64,
}

impl FrameLoop {
    /// Populate a fresh world. The first iteration measures dT from now.
    pub fn new(config: GameConfig, platform: &impl Platform) -> Self {
        let mut world = World::new();
        let population = sim::populate(&mut world, &config);
        Self {
            world,
            population,
            config,
            state: LoopState::Running,
            outcome: None,
            last_tick_ms: platform.ticks_ms(),
            frames: 0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Set once the loop reaches `Quit`
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    /// Run one iteration and return the resulting state. Does nothing once
    /// the loop has quit.
    pub fn iterate<P: Platform>(&mut self, platform: &mut P) -> LoopState {
        if self.state != LoopState::Running {
            return self.state;
        }

        let frame_start = platform.ticks_ms();
        let dt = frame_start.saturating_sub(self.last_tick_ms) as f32 / 1000.0;
        self.last_tick_ms = frame_start;
        self.frames += 1;
        log::trace!("Frame {} dt={dt:.4}s", self.frames);

        let quit_requested = platform
            .poll_events()
            .iter()
            .any(|event| *event == PlatformEvent::Quit);
        if quit_requested {
            log::info!("Quit requested in frame {}", self.frames);
        }

        let keys = platform.keyboard();
        sim::input_system(&mut self.world, keys, dt, &self.config);
        sim::movement_system(&mut self.world, dt);
        if sim::collision_system(&mut self.world, &self.config) == CollisionOutcome::BallLost {
            log::info!(
                "Game over after {} frames, {} blocks left",
                self.frames,
                sim::live_block_count(&mut self.world)
            );
            self.state = LoopState::GameOver;
        }

        sim::render_sync_system(&mut self.world);
        self.draw(platform);

        if self.state == LoopState::GameOver {
            platform.show_message(GAME_OVER_TITLE, GAME_OVER_BODY);
            self.finish(Outcome::GameOver);
            return self.state;
        }

        self.pace(platform, frame_start);
        if quit_requested {
            self.finish(Outcome::Quit);
        }
        self.state
    }

    /// Iterate until the loop quits
    pub fn run<P: Platform>(mut self, platform: &mut P) -> Outcome {
        log::info!(
            "Starting frame loop: {} entities, {} blocks, {:?} bounce, {} fps cap",
            self.world.len(),
            self.world.count::<Block>(),
            self.config.bounce_policy,
            self.config.target_fps
        );
        while self.iterate(platform) == LoopState::Running {}
        self.outcome.unwrap_or(Outcome::Quit)
    }

    fn draw<P: Platform>(&mut self, platform: &mut P) {
        let draw_list = sim::collect_draw_list(&mut self.world);
        let result = platform
            .clear(self.config.background_color)
            .and_then(|_| {
                draw_list
                    .into_iter()
                    .try_for_each(|(rect, color)| platform.fill_rect(rect, color))
            })
            .and_then(|_| platform.present());
        if let Err(e) = result {
            log::warn!("Render error: {e}");
        }
    }

    /// Sleep off the rest of the frame budget
    fn pace<P: Platform>(&self, platform: &mut P, frame_start: u64) {
        let elapsed = platform.ticks_ms().saturating_sub(frame_start) as f32;
        let budget = self.config.frame_budget_ms();
        if elapsed < budget {
            let remaining = (budget - elapsed) as u32;
            if remaining > 0 {
                platform.delay_ms(remaining);
            }
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.state = LoopState::Quit;
        self.outcome = Some(outcome);
        log::info!(
            "Session ended ({outcome:?}) after {} frames, {} blocks left",
            self.frames,
            sim::live_block_count(&mut self.world)
        );
    }
}

/// Drops display refreshes that arrive sooner than the frame budget
///
/// For hosts that call back on every refresh instead of sleeping. Accepted
/// frames keep a fixed phase, so a 144 Hz display still yields 60 frames a
/// second.
#[derive(Debug, Clone)]
pub struct FrameGate {
    budget_ms: f64,
    last_ms: Option<f64>,
}

impl FrameGate {
    /// Refreshes this much early still count as on time
    const TOLERANCE_MS: f64 = 1.0;

    pub fn new(budget_ms: f32) -> Self {
        Self {
            budget_ms: budget_ms as f64,
            last_ms: None,
        }
    }

    /// True if a frame should run at `now_ms`
    pub fn ready(&mut self, now_ms: f64) -> bool {
        let Some(last) = self.last_ms else {
            self.last_ms = Some(now_ms);
            return true;
        };

        let elapsed = now_ms - last;
        if elapsed + Self::TOLERANCE_MS < self.budget_ms {
            return false;
        }
        // After a stall, restart the phase instead of bursting to catch up
        self.last_ms = Some(if elapsed < 2.0 * self.budget_ms {
            last + self.budget_ms
        } else {
            now_ms
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::scripted::ScriptedPlatform;
    use crate::platform::{Color, KeyState, Rect};
    use crate::sim::{Block, Position, Velocity};
    use glam::Vec2;

    fn assert_vec_near(actual: Vec2, expected: Vec2) {
        assert!(
            (actual - expected).length() < 1e-3,
            "expected {expected:?}, got {actual:?}"
        );
    }

    fn ball(frame_loop: &FrameLoop) -> (Vec2, Vec2) {
        let ball = frame_loop.population().ball;
        (
            frame_loop.world().get::<Position>(ball).unwrap().0,
            frame_loop.world().get::<Velocity>(ball).unwrap().0,
        )
    }

    #[test]
    fn test_first_frame_has_zero_dt() {
        let mut platform = ScriptedPlatform::new();
        platform.now_ms = 5_000;
        let mut frame_loop = FrameLoop::new(GameConfig::classic(), &platform);

        assert_eq!(frame_loop.iterate(&mut platform), LoopState::Running);
        assert_eq!(ball(&frame_loop).0, Vec2::new(110.0, 110.0));
    }

    #[test]
    fn test_sleeps_for_remaining_budget() {
        let mut platform = ScriptedPlatform::new();
        platform.work_ms = 4;
        let mut frame_loop = FrameLoop::new(GameConfig::classic(), &platform);

        frame_loop.iterate(&mut platform);
        frame_loop.iterate(&mut platform);

        // 16.67ms budget minus 4ms of work
        assert_eq!(platform.delays, vec![12, 12]);
    }

    #[test]
    fn test_slow_frame_does_not_sleep() {
        let mut platform = ScriptedPlatform::new();
        platform.work_ms = 40;
        let mut frame_loop = FrameLoop::new(GameConfig::classic(), &platform);

        frame_loop.iterate(&mut platform);
        assert!(platform.delays.is_empty());
    }

    #[test]
    fn test_dt_follows_wall_clock() {
        let mut platform = ScriptedPlatform::new();
        let mut frame_loop = FrameLoop::new(GameConfig::classic(), &platform);

        frame_loop.iterate(&mut platform);
        // Clock advanced by the 16ms sleep, plus a 484ms stall
        platform.now_ms += 484;
        frame_loop.iterate(&mut platform);

        // Half a second at 200px/s
        assert_eq!(ball(&frame_loop).0, Vec2::new(210.0, 210.0));
    }

    #[test]
    fn test_frame_draws_paddle_ball_and_blocks() {
        let mut platform = ScriptedPlatform::new();
        let mut frame_loop = FrameLoop::new(GameConfig::angled(), &platform);

        frame_loop.iterate(&mut platform);

        assert_eq!(platform.clears, 1);
        assert_eq!(platform.presents, 1);
        assert_eq!(platform.frame.len(), 2 + 30);
        assert_eq!(platform.frame[0], (Rect::new(270, 450, 100, 20), Color::WHITE));
    }

    #[test]
    fn test_keys_move_paddle() {
        let mut platform = ScriptedPlatform::new();
        let mut frame_loop = FrameLoop::new(GameConfig::classic(), &platform);
        platform.keys = KeyState {
            left: true,
            right: false,
        };

        frame_loop.iterate(&mut platform);
        platform.now_ms += 84;
        frame_loop.iterate(&mut platform);

        let paddle = frame_loop.population().paddle;
        let x = frame_loop.world().get::<Position>(paddle).unwrap().0.x;
        // 0.1s at 300px/s
        assert!((x - 240.0).abs() < 1e-3);
    }

    #[test]
    fn test_quit_event_stops_loop() {
        let mut platform = ScriptedPlatform::new();
        platform.queue_events(vec![PlatformEvent::Other]);
        platform.queue_events(vec![PlatformEvent::Other, PlatformEvent::Quit]);
        let frame_loop = FrameLoop::new(GameConfig::classic(), &platform);

        assert_eq!(frame_loop.run(&mut platform), Outcome::Quit);
        assert!(platform.messages.is_empty());
        // The quitting frame is still drawn
        assert_eq!(platform.presents, 2);
    }

    #[test]
    fn test_quit_frame_still_simulates_and_draws() {
        let mut platform = ScriptedPlatform::new();
        let mut frame_loop = FrameLoop::new(GameConfig::classic(), &platform);
        frame_loop.iterate(&mut platform);

        platform.now_ms += 84;
        platform.queue_events(vec![PlatformEvent::Quit]);
        assert_eq!(frame_loop.iterate(&mut platform), LoopState::Quit);
        assert_eq!(frame_loop.outcome(), Some(Outcome::Quit));

        // 0.1s at 200px/s
        assert_vec_near(ball(&frame_loop).0, Vec2::new(130.0, 130.0));
        assert_eq!(platform.presents, 2);
        assert_eq!(platform.frame[1], (Rect::new(130, 130, 15, 15), Color::RED));

        frame_loop.iterate(&mut platform);
        assert_eq!(platform.presents, 2);
    }

    #[test]
    fn test_frame_gate_passes_first_frame() {
        let mut gate = FrameGate::new(1000.0 / 60.0);
        assert!(gate.ready(12_345.0));
        assert!(!gate.ready(12_350.0));
    }

    #[test]
    fn test_frame_gate_caps_fast_displays() {
        for hz in [60.0, 120.0, 144.0, 240.0] {
            let mut gate = FrameGate::new(GameConfig::classic().frame_budget_ms());
            let frames = (0..hz as u32)
                .filter(|&i| gate.ready(i as f64 * 1000.0 / hz))
                .count();
            assert!((59..=61).contains(&frames), "{hz} Hz gave {frames} frames");
        }
    }

    #[test]
    fn test_frame_gate_keeps_slow_displays() {
        let mut gate = FrameGate::new(1000.0 / 60.0);
        let frames = (0..30).filter(|&i| gate.ready(i as f64 * 1000.0 / 30.0)).count();
        assert_eq!(frames, 30);
    }

    #[test]
    fn test_frame_gate_restarts_after_stall() {
        let mut gate = FrameGate::new(1000.0 / 60.0);
        assert!(gate.ready(0.0));
        assert!(gate.ready(500.0));
        // Phase restarted at 500, so no catch-up burst
        assert!(!gate.ready(507.0));
        assert!(gate.ready(517.0));
    }

    #[test]
    fn test_ball_lost_shows_notification_once_then_quits() {
        let mut platform = ScriptedPlatform::new();
        let mut frame_loop = FrameLoop::new(GameConfig::classic(), &platform);
        let ball_entity = frame_loop.population().ball;
        frame_loop
            .world_mut()
            .get_mut::<Position>(ball_entity)
            .unwrap()
            .0 = Vec2::new(100.0, 470.0);

        assert_eq!(frame_loop.iterate(&mut platform), LoopState::Quit);
        assert_eq!(frame_loop.outcome(), Some(Outcome::GameOver));
        assert_eq!(
            platform.messages,
            vec![(GAME_OVER_TITLE.to_string(), GAME_OVER_BODY.to_string())]
        );
        // Final frame was still drawn
        assert_eq!(platform.presents, 1);

        let frozen = ball(&frame_loop);
        platform.now_ms += 1_000;
        for _ in 0..5 {
            assert_eq!(frame_loop.iterate(&mut platform), LoopState::Quit);
        }
        assert_eq!(ball(&frame_loop), frozen);
        assert_eq!(platform.messages.len(), 1);
        assert_eq!(platform.presents, 1);
    }

    #[test]
    fn test_run_reports_game_over() {
        let mut platform = ScriptedPlatform::new();
        let frame_loop = FrameLoop::new(GameConfig::classic(), &platform);

        // Left alone, the ball eventually drops past the paddle
        assert_eq!(frame_loop.run(&mut platform), Outcome::GameOver);
        assert_eq!(platform.messages.len(), 1);
    }

    #[test]
    fn test_destroyed_blocks_stay_gone_across_frames() {
        let mut platform = ScriptedPlatform::new();
        let config = GameConfig::angled();
        let mut frame_loop = FrameLoop::new(config.clone(), &platform);
        let target = frame_loop.population().block_at(1, 0, &config).unwrap();
        let ball_entity = frame_loop.population().ball;
        frame_loop
            .world_mut()
            .get_mut::<Position>(ball_entity)
            .unwrap()
            .0 = Vec2::new(10.0, 25.0);

        frame_loop.iterate(&mut platform);
        assert!(frame_loop.world().get::<Block>(target).unwrap().destroyed);
        assert_eq!(platform.frame.len(), 2 + 29);

        for _ in 0..10 {
            frame_loop.iterate(&mut platform);
            assert!(frame_loop.world().get::<Block>(target).unwrap().destroyed);
            assert!(!platform.frame.iter().any(|(rect, _)| *rect == Rect::new(0, 20, 64, 20)));
        }
    }
}
