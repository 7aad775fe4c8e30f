//! Frame-driven simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, no wall-clock assumptions
//! - Seeded RNG only
//! - Stable iteration order (insertion order of entities)
//! - No rendering or platform dependencies beyond the collaborator traits

pub mod collision;
pub mod entity;
pub mod event;
pub mod layout;
pub mod state;
pub mod tick;

pub use collision::{
    Rect, near_bottom_edge, near_left_edge, near_right_edge, near_top_edge, overlaps, rects_overlap,
};
pub use entity::{Entity, EntityId, EntityKind, PaddleControls};
pub use event::{EventBus, EventKind, GameEvent, Handler};
pub use layout::{GridLayout, MAX_COLUMNS, spawn_round};
pub use state::{Arena, GamePhase, GameState, World};
pub use tick::{Game, TickInput, tick_paddle};
