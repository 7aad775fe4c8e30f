//! Game state and the simulated world
//!
//! The [`World`] is the event bus context: it owns the entity collection,
//! the score/clock/phase state and the seeded RNG, and implements every
//! reaction to bus events.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, EntityKind};
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Entities tick every frame
    #[default]
    Running,
    /// Pause flag is set; nothing ticks
    Paused,
    /// Ball missed; terminal for this round
    Ended,
}

/// Play surface dimensions, measured fresh every frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Score, combo, clock and phase
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    /// Consecutive block destructions since the last paddle touch
    pub combo: u32,
    pub phase: GamePhase,
    /// Whole in-game seconds elapsed
    pub elapsed_secs: u64,
    /// Ticks into the current second, in [0, ticks_per_second)
    pub tick_accumulator: u32,
}

impl GameState {
    /// True unless entities are ticking. `Ended` counts as permanently paused.
    pub fn is_paused(&self) -> bool {
        self.phase != GamePhase::Running
    }

    /// Advance the fixed-rate clock by one tick
    pub fn advance_clock(&mut self, ticks_per_second: u32) {
        self.tick_accumulator += 1;
        if self.tick_accumulator >= ticks_per_second.max(1) {
            self.tick_accumulator = 0;
            self.elapsed_secs += 1;
        }
    }
}

/// Entity collection plus state, mutated by ticks and bus handlers
#[derive(Debug)]
pub struct World {
    /// Tick order is insertion order
    pub entities: Vec<Entity>,
    pub state: GameState,
    pub settings: Settings,
    rng: Pcg32,
    /// Ids removed since the last drain, for the rendering collaborator
    removed: Vec<EntityId>,
    next_id: EntityId,
}

impl World {
    pub fn new(settings: Settings) -> Self {
        Self {
            entities: Vec::new(),
            state: GameState::default(),
            rng: Pcg32::seed_from_u64(settings.seed),
            settings,
            removed: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Insert an entity built with `make(id)` and return its id
    pub fn spawn(&mut self, make: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_entity_id();
        self.entities.push(make(id));
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entities.iter().map(|e| e.id).collect()
    }

    /// Remove an entity. Absent ids are a no-op.
    pub fn remove_entity(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        self.removed.push(id);
        Some(self.entities.remove(idx))
    }

    /// Ids removed since the previous call
    pub fn drain_removed(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.removed)
    }

    pub fn count_kind(&self, kind: EntityKind) -> usize {
        self.entities.iter().filter(|e| e.kind == kind).count()
    }

    /// Copy paddle input flags onto every paddle
    pub fn set_paddle_controls(&mut self, move_left: bool, move_right: bool) {
        for entity in &mut self.entities {
            if let EntityKind::Paddle(controls) = &mut entity.kind {
                controls.move_left = move_left;
                controls.move_right = move_right;
            }
        }
    }

    // === Reactions ===

    /// Fair coin: reverse vertical only, or reverse vertical and pick a new
    /// horizontal velocity in [-jitter, jitter]. Zero is a valid pick.
    pub fn redirect_ball(&mut self, ball: EntityId) {
        let jitter = i64::from(self.settings.horizontal_jitter.unsigned_abs());
        let new_x = if self.rng.random_bool(0.5) {
            Some(self.rng.random_range(-jitter..=jitter) as f32)
        } else {
            None
        };

        if let Some(entity) = self.entity_mut(ball) {
            entity.bounce_vertical();
            if let Some(x) = new_x {
                entity.vel.x = x;
            }
        }
    }

    /// Reward is the combo count including this block, then the block leaves.
    /// Ids that do not name a live block are ignored.
    pub fn on_block_destroyed(&mut self, block: EntityId) {
        if !self.entity(block).is_some_and(Entity::is_block) {
            log::debug!("Ignoring BlockDestroyed for non-block {}", block);
            return;
        }
        let Some(removed) = self.remove_entity(block) else {
            return;
        };
        let reward = u64::from(self.state.combo) + 1;
        self.state.score += reward;
        self.state.combo += 1;
        log::debug!(
            "Block {} destroyed at ({}, {}): +{} (score {}, combo {})",
            removed.id,
            removed.pos.x,
            removed.pos.y,
            reward,
            self.state.score,
            self.state.combo
        );
    }

    pub fn on_paddle_hit(&mut self) {
        if self.state.combo > 0 {
            log::debug!("Paddle hit, combo {} reset", self.state.combo);
        }
        self.state.combo = 0;
    }

    pub fn on_ball_missed(&mut self) {
        if self.state.phase != GamePhase::Ended {
            log::info!(
                "Ball missed - game over (score {}, {}s)",
                self.state.score,
                self.state.elapsed_secs
            );
        }
        self.state.phase = GamePhase::Ended;
    }

    pub fn on_pause_toggled(&mut self, paused: bool) {
        if self.state.phase == GamePhase::Ended {
            return;
        }
        self.state.phase = if paused {
            log::info!("Paused");
            GamePhase::Paused
        } else {
            log::info!("Resumed");
            GamePhase::Running
        };
    }
}
