//! Per-frame simulation and the game controller
//!
//! One call to [`Game::frame`] is one simulation step. Each frame fully
//! completes (entity ticks, synchronous event dispatch, state mutation)
//! before the next one starts.

use glam::Vec2;

use super::collision::{near_bottom_edge, near_left_edge, near_right_edge, near_top_edge, overlaps};
use super::entity::{Entity, EntityId, EntityKind, PaddleControls};
use super::event::{EventBus, EventKind, GameEvent};
use super::layout;
use super::state::{Arena, GamePhase, GameState, World};
use crate::hud::Hud;
use crate::platform::{ArenaBounds, Renderer};
use crate::settings::Settings;

/// Input flags for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
    /// Level-triggered: the game is paused for as long as this is set
    pub pause: bool,
}

/// Move the paddle one step toward the held direction, clamped to the arena.
///
/// Left is evaluated first, so holding both keys moves left.
pub fn tick_paddle(paddle: &mut Entity, controls: PaddleControls, arena: Arena) {
    if controls.move_left {
        if near_left_edge(paddle) {
            paddle.pos.x = 0.0;
        } else {
            paddle.pos.x -= paddle.speed;
        }
    } else if controls.move_right {
        if near_right_edge(paddle, arena.width) {
            paddle.pos.x = arena.width - paddle.size.x;
        } else {
            paddle.pos.x += paddle.speed;
        }
    }
    paddle.advance();
}

/// Owns the world and the event bus, and runs the frame loop body
pub struct Game {
    world: World,
    bus: EventBus<World>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.world.state)
            .field("entities", &self.world.entities.len())
            .field("bus", &self.bus)
            .finish()
    }
}

impl Game {
    /// Standard round: paddle, ball and a block grid fitted to `arena`
    pub fn new(settings: Settings, arena: Arena) -> Self {
        let mut game = Self::empty(settings);
        layout::spawn_round(&mut game, arena);
        log::info!(
            "New round: {} blocks in a {}x{} arena (seed {})",
            game.blocks_remaining(),
            arena.width,
            arena.height,
            game.world.settings.seed
        );
        game
    }

    /// Controller with no entities, subscribed to its own state handlers
    pub fn empty(settings: Settings) -> Self {
        let mut bus: EventBus<World> = EventBus::new();
        bus.subscribe(EventKind::BlockDestroyed, |world: &mut World, event| {
            if let GameEvent::BlockDestroyed { block } = *event {
                world.on_block_destroyed(block);
            }
        });
        bus.subscribe(EventKind::PaddleHit, |world: &mut World, _| world.on_paddle_hit());
        bus.subscribe(EventKind::BallMissed, |world: &mut World, _| world.on_ball_missed());
        bus.subscribe(EventKind::PauseToggled, |world: &mut World, event| {
            if let GameEvent::PauseToggled { paused } = *event {
                world.on_pause_toggled(paused);
            }
        });

        Self {
            world: World::new(settings),
            bus,
        }
    }

    // === Spawning ===

    pub fn spawn_paddle(&mut self, pos: Vec2) -> EntityId {
        let (size, speed) = (self.world.settings.paddle_size, self.world.settings.paddle_speed);
        self.world.spawn(|id| {
            Entity::new(id, EntityKind::Paddle(PaddleControls::default()), pos, size, speed)
        })
    }

    /// Spawn a ball. It redirects itself whenever any block is destroyed.
    pub fn spawn_ball(&mut self, pos: Vec2, vel: Vec2) -> EntityId {
        let (size, speed) = (self.world.settings.ball_size, self.world.settings.ball_speed);
        let id = self
            .world
            .spawn(|id| Entity::new(id, EntityKind::Ball, pos, size, speed).with_velocity(vel));
        self.bus
            .subscribe(EventKind::BlockDestroyed, move |world: &mut World, _| world.redirect_ball(id));
        id
    }

    pub fn spawn_block(&mut self, pos: Vec2) -> EntityId {
        let size = self.world.settings.block_size;
        self.world
            .spawn(|id| Entity::new(id, EntityKind::Block, pos, size, 0.0))
    }

    // === Frame ===

    /// Advance one frame.
    ///
    /// While running: tick every entity, hand every entity to the renderer,
    /// advance the clock and refresh the HUD. Whatever the phase, the pause
    /// state is then re-evaluated from `input`.
    pub fn frame(&mut self, input: &TickInput, bounds: &dyn ArenaBounds, renderer: &mut dyn Renderer) {
        let arena = Arena::new(bounds.width(), bounds.height());

        if self.world.state.phase == GamePhase::Running {
            self.world.set_paddle_controls(input.move_left, input.move_right);
            self.tick_entities(arena);

            for id in self.world.drain_removed() {
                renderer.remove_entity(id);
            }
            for entity in &self.world.entities {
                renderer.draw_entity(entity);
            }

            let tps = self.world.settings.ticks_per_second;
            self.world.state.advance_clock(tps);
            renderer.draw_hud(&Hud::from_state(&self.world.state));
        }

        self.sync_pause(input.pause);
    }

    /// Raise an event on the bus, delivering it synchronously
    pub fn publish(&mut self, event: GameEvent) {
        self.bus.publish(&mut self.world, event);
    }

    fn sync_pause(&mut self, pause: bool) {
        let paused = match self.world.state.phase {
            GamePhase::Running => false,
            GamePhase::Paused => true,
            GamePhase::Ended => return,
        };
        if paused != pause {
            self.publish(GameEvent::PauseToggled { paused: pause });
        }
    }

    fn tick_entities(&mut self, arena: Arena) {
        for id in self.world.entity_ids() {
            // Removed earlier this frame
            let Some(kind) = self.world.entity(id).map(|e| e.kind) else {
                continue;
            };
            match kind {
                EntityKind::Paddle(controls) => {
                    if let Some(paddle) = self.world.entity_mut(id) {
                        tick_paddle(paddle, controls, arena);
                    }
                }
                EntityKind::Ball => self.tick_ball(id, arena),
                EntityKind::Block => self.tick_block(id),
            }
        }
    }

    /// Every check reads the ball as it was at the start of its tick.
    fn tick_ball(&mut self, id: EntityId, arena: Arena) {
        let Some(ball) = self.world.entity(id).cloned() else {
            return;
        };

        let paddle = self
            .world
            .entities
            .iter()
            .find(|e| e.is_paddle() && overlaps(&ball, e))
            .map(|e| e.id);
        let hit_ceiling = near_top_edge(&ball);
        let hit_wall = near_left_edge(&ball) || near_right_edge(&ball, arena.width);
        let missed = near_bottom_edge(&ball, arena.height);

        if let Some(paddle) = paddle {
            self.world.redirect_ball(id);
            log::debug!("Ball {} hit paddle {} at x={}", id, paddle, ball.pos.x);
            self.publish(GameEvent::PaddleHit { ball: id, paddle });
        }

        if let Some(entity) = self.world.entity_mut(id) {
            if hit_ceiling {
                entity.bounce_vertical();
            }
            if hit_wall {
                entity.bounce_horizontal();
            }
        }

        if missed {
            self.publish(GameEvent::BallMissed { ball: id });
        }

        if let Some(entity) = self.world.entity_mut(id) {
            entity.advance();
        }
    }

    fn tick_block(&mut self, id: EntityId) {
        let Some(block) = self.world.entity(id) else {
            return;
        };
        let hit = self
            .world
            .entities
            .iter()
            .any(|e| e.is_ball() && overlaps(block, e));
        if hit {
            self.publish(GameEvent::BlockDestroyed { block: id });
        }
    }

    // === Queries ===

    pub fn state(&self) -> &GameState {
        &self.world.state
    }

    pub fn phase(&self) -> GamePhase {
        self.world.state.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.world.settings
    }

    pub fn entities(&self) -> &[Entity] {
        &self.world.entities
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.world.entity(id)
    }

    pub fn blocks_remaining(&self) -> usize {
        self.world.count_kind(EntityKind::Block)
    }

    /// Events of a kind published since the game was created
    pub fn published(&self, kind: EventKind) -> u64 {
        self.bus.published(kind)
    }
}
