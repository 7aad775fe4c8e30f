//! Game settings and tuning
//!
//! Loaded from an optional JSON file; missing fields take their defaults.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Arena;

/// Game settings/tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the redirect coin flips
    pub seed: u64,
    /// Ticks per in-game second for the clock
    pub ticks_per_second: u32,

    // === Arena (headless runs only; live runs measure the surface) ===
    pub arena: Arena,

    // === Paddle ===
    pub paddle_size: Vec2,
    pub paddle_speed: f32,

    // === Ball ===
    pub ball_size: Vec2,
    /// Vertical step per tick
    pub ball_speed: f32,
    /// Bound for the random horizontal velocity after a redirect
    pub horizontal_jitter: i32,

    // === Block grid ===
    pub block_size: Vec2,
    /// Gap between blocks and around the grid
    pub block_padding: f32,
    pub block_rows: u32,
    pub grid_top: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            ticks_per_second: TICKS_PER_SECOND,

            arena: Arena::new(ARENA_WIDTH, ARENA_HEIGHT),

            paddle_size: Vec2::new(PADDLE_WIDTH, PADDLE_HEIGHT),
            paddle_speed: PADDLE_SPEED,

            ball_size: Vec2::splat(BALL_SIZE),
            ball_speed: BALL_SPEED,
            horizontal_jitter: BALL_HORIZONTAL_JITTER,

            block_size: Vec2::new(BLOCK_WIDTH, BLOCK_HEIGHT),
            block_padding: BLOCK_PADDING,
            block_rows: BLOCK_ROWS,
            grid_top: GRID_TOP,
        }
    }
}

impl Settings {
    /// Parse settings from JSON (absent fields use defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    return settings;
                }
                Err(e) => log::warn!("Invalid settings in {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not read {}: {}", path.display(), e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Same settings with another seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
