//! Platform abstraction layer
//!
//! The simulation talks to the outside world through these seams:
//! - Arena bounds, measured every frame
//! - Input flags, read every frame
//! - Rendering of entities and the HUD
//! - Frame scheduling, stoppable with a flag

use std::collections::HashMap;

use crate::hud::Hud;
use crate::sim::{Arena, Entity, EntityId, Game, Rect, TickInput};

/// Supplies the current play surface size
pub trait ArenaBounds {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
}

impl ArenaBounds for Arena {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }
}

/// Supplies the input flags for the next frame
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Presents entities and the HUD
pub trait Renderer {
    fn draw_entity(&mut self, entity: &Entity);

    /// The entity left the world; drop its visual
    fn remove_entity(&mut self, _id: EntityId) {}

    fn draw_hud(&mut self, hud: &Hud);
}

/// Keyboard flags, toggled by key-down/key-up codes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub move_left: bool,
    pub move_right: bool,
    pub paused: bool,
}

impl KeyState {
    pub fn key_down(&mut self, code: &str) {
        match code {
            "ArrowLeft" => self.move_left = true,
            "ArrowRight" => self.move_right = true,
            "Space" | "KeyP" => self.paused = !self.paused,
            _ => {}
        }
    }

    pub fn key_up(&mut self, code: &str) {
        match code {
            "ArrowLeft" => self.move_left = false,
            "ArrowRight" => self.move_right = false,
            _ => {}
        }
    }
}

impl InputSource for KeyState {
    fn poll(&mut self) -> TickInput {
        TickInput {
            move_left: self.move_left,
            move_right: self.move_right,
            pause: self.paused,
        }
    }
}

/// Renderer that keeps the latest geometry and HUD in memory
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    rects: HashMap<EntityId, Rect>,
    last_hud: Option<Hud>,
    hud_draws: u64,
}

impl HeadlessRenderer {
    pub fn rect(&self, id: EntityId) -> Option<Rect> {
        self.rects.get(&id).copied()
    }

    pub fn is_drawn(&self, id: EntityId) -> bool {
        self.rects.contains_key(&id)
    }

    pub fn last_hud(&self) -> Option<&Hud> {
        self.last_hud.as_ref()
    }

    /// Frames that reached the HUD refresh (running frames)
    pub fn hud_draws(&self) -> u64 {
        self.hud_draws
    }
}

impl Renderer for HeadlessRenderer {
    fn draw_entity(&mut self, entity: &Entity) {
        self.rects.insert(entity.id, entity.rect());
    }

    fn remove_entity(&mut self, id: EntityId) {
        self.rects.remove(&id);
    }

    fn draw_hud(&mut self, hud: &Hud) {
        self.hud_draws += 1;
        if self.last_hud.as_ref() != Some(hud) {
            log::trace!("{}", hud);
            self.last_hud = Some(hud.clone());
        }
    }
}

/// Drives one `Game::frame` per scheduled callback until stopped
#[derive(Debug, Default)]
pub struct FrameLoop {
    stop_requested: bool,
    frames: u64,
}

impl FrameLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// No further frames run after the current one
    pub fn request_stop(&mut self) {
        self.stop_requested = true;
    }

    pub fn is_stopped(&self) -> bool {
        self.stop_requested
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run a single frame (ignored once stopped)
    pub fn step(
        &mut self,
        game: &mut Game,
        input: &TickInput,
        bounds: &dyn ArenaBounds,
        renderer: &mut dyn Renderer,
    ) {
        if self.stop_requested {
            return;
        }
        game.frame(input, bounds, renderer);
        self.frames += 1;
    }

    /// Run frames until stopped or `max_frames` total frames have run
    pub fn run(
        &mut self,
        game: &mut Game,
        input: &mut dyn InputSource,
        bounds: &dyn ArenaBounds,
        renderer: &mut dyn Renderer,
        max_frames: u64,
    ) -> u64 {
        while !self.stop_requested && self.frames < max_frames {
            let tick_input = input.poll();
            self.step(game, &tick_input, bounds, renderer);
        }
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::GamePhase;
    use glam::Vec2;

    #[test]
    fn test_key_state_flags() {
        let mut keys = KeyState::default();
        keys.key_down("ArrowLeft");
        keys.key_down("ArrowRight");
        let input = keys.poll();
        assert!(input.move_left && input.move_right && !input.pause);

        keys.key_up("ArrowLeft");
        keys.key_down("Space");
        let input = keys.poll();
        assert!(!input.move_left && input.move_right && input.pause);

        // Pause is a toggle, key-up does not clear it
        keys.key_up("Space");
        assert!(keys.poll().pause);
        keys.key_down("KeyP");
        assert!(!keys.poll().pause);

        keys.key_down("KeyQ");
        assert_eq!(keys.poll(), TickInput { move_right: true, ..Default::default() });
    }

    #[test]
    fn test_frame_loop_respects_cap_and_stop() {
        let arena = Arena::new(800.0, 600.0);
        let mut game = Game::new(Settings::default(), arena);
        let mut renderer = HeadlessRenderer::default();
        let mut keys = KeyState::default();
        let mut frame_loop = FrameLoop::new();

        assert_eq!(frame_loop.run(&mut game, &mut keys, &arena, &mut renderer, 30), 30);
        assert_eq!(renderer.hud_draws(), 30);
        assert_eq!(renderer.last_hud().map(|h| h.clock.as_str()), Some("00:00"));

        frame_loop.request_stop();
        assert_eq!(frame_loop.run(&mut game, &mut keys, &arena, &mut renderer, 100), 30);
        assert!(frame_loop.is_stopped());
    }

    #[test]
    fn test_renderer_tracks_entities() {
        let arena = Arena::new(800.0, 600.0);
        let mut game = Game::empty(Settings::default());
        let ball = game.spawn_ball(Vec2::new(100.0, 100.0), Vec2::new(0.0, 10.0));
        let block = game.spawn_block(Vec2::new(400.0, 100.0));
        let mut renderer = HeadlessRenderer::default();
        let mut frame_loop = FrameLoop::new();

        frame_loop.step(&mut game, &TickInput::default(), &arena, &mut renderer);
        assert_eq!(
            renderer.rect(ball),
            Some(Rect::new(Vec2::new(100.0, 110.0), Vec2::splat(50.0)))
        );
        assert!(renderer.is_drawn(block));
        assert_eq!(game.phase(), GamePhase::Running);
    }
}
