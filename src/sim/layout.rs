//! Round layout: paddle on the floor, ball under a block grid

use glam::Vec2;

use super::state::Arena;
use super::tick::Game;
use crate::settings::Settings;

/// Upper bound on fitted columns, whatever the arena width
pub const MAX_COLUMNS: u32 = 256;

/// Block grid fitted to the arena width with fixed padding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: u32,
    pub rows: u32,
    /// Top-left corner of the first block
    pub origin: Vec2,
    pub block_size: Vec2,
    pub padding: f32,
}

impl GridLayout {
    /// As many columns as fit between padded walls, centered horizontally
    pub fn fit(arena_width: f32, settings: &Settings) -> Self {
        let padding = settings.block_padding;
        let block_size = settings.block_size;

        let stride = block_size.x + padding;
        let columns = if stride > 0.0 && block_size.x > 0.0 {
            ((arena_width - padding) / stride)
                .floor()
                .clamp(0.0, MAX_COLUMNS as f32) as u32
        } else {
            log::warn!("Block width {} with padding {} cannot form a grid", block_size.x, padding);
            0
        };
        let total_width =
            columns as f32 * block_size.x + columns.saturating_sub(1) as f32 * padding;
        let rows = if columns == 0 { 0 } else { settings.block_rows };

        Self {
            columns,
            rows,
            origin: Vec2::new((arena_width - total_width) / 2.0, settings.grid_top),
            block_size,
            padding,
        }
    }

    pub fn len(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bottom edge of the last row (grid top when empty)
    pub fn bottom(&self) -> f32 {
        if self.rows == 0 {
            return self.origin.y;
        }
        self.origin.y + self.rows as f32 * (self.block_size.y + self.padding) - self.padding
    }

    /// Block positions, row by row
    pub fn positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        let step = self.block_size + Vec2::splat(self.padding);
        (0..self.rows).flat_map(move |row| {
            (0..self.columns)
                .map(move |col| self.origin + Vec2::new(col as f32 * step.x, row as f32 * step.y))
        })
    }
}

/// Top-left corner that centers `size` horizontally at height `y`
fn centered(arena_width: f32, size: Vec2, y: f32) -> Vec2 {
    Vec2::new(arena_width / 2.0 - size.x / 2.0, y)
}

/// Spawn paddle, ball, then blocks (this is also the tick order)
pub fn spawn_round(game: &mut Game, arena: Arena) {
    let settings = game.settings().clone();
    let grid = GridLayout::fit(arena.width, &settings);
    if grid.is_empty() {
        log::warn!("Arena width {} too narrow for any blocks", arena.width);
    }

    game.spawn_paddle(centered(
        arena.width,
        settings.paddle_size,
        arena.height - settings.paddle_size.y,
    ));
    game.spawn_ball(
        centered(arena.width, settings.ball_size, grid.bottom() + settings.block_padding),
        Vec2::new(0.0, settings.ball_speed),
    );
    for pos in grid.positions() {
        game.spawn_block(pos);
    }
}
