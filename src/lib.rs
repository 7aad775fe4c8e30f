//! Breakout - A single-screen paddle, ball and block arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (entities, collisions, event bus, scoring)
//! - `platform`: Arena/input/rendering collaborator boundaries and the frame loop
//! - `hud`: Score and timer panel model
//! - `settings`: Data-driven game tuning

pub mod hud;
pub mod platform;
pub mod settings;
pub mod sim;

pub use hud::{Hud, format_clock};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation ticks per in-game second (fixed-rate, not wall-clock locked)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default arena dimensions (headless runs)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 200.0;
    pub const PADDLE_HEIGHT: f32 = 50.0;
    pub const PADDLE_SPEED: f32 = 10.0;

    /// Ball defaults
    pub const BALL_SIZE: f32 = 50.0;
    pub const BALL_SPEED: f32 = 10.0;
    /// Horizontal velocity after a redirect is drawn from [-JITTER, JITTER]
    pub const BALL_HORIZONTAL_JITTER: i32 = 5;

    /// Block defaults
    pub const BLOCK_WIDTH: f32 = 80.0;
    pub const BLOCK_HEIGHT: f32 = 30.0;
    pub const BLOCK_PADDING: f32 = 10.0;
    pub const BLOCK_ROWS: u32 = 4;
    pub const GRID_TOP: f32 = 10.0;

    /// Default RNG seed
    pub const DEFAULT_SEED: u64 = 0x5EED;
}
