//! Score and timer panel

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::sim::{GamePhase, GameState};

/// What the panel shows after a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u64,
    pub combo: u32,
    /// `MM:SS`
    pub clock: String,
    pub phase: GamePhase,
}

impl Hud {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            score: state.score,
            combo: state.combo,
            clock: format_clock(state.elapsed_secs),
            phase: state.phase,
        }
    }
}

impl fmt::Display for Hud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Score: {}  Time: {}", self.score, self.clock)?;
        if self.combo > 1 {
            write!(f, "  Combo: x{}", self.combo)?;
        }
        match self.phase {
            GamePhase::Running => Ok(()),
            GamePhase::Paused => write!(f, "  [PAUSED]"),
            GamePhase::Ended => write!(f, "  [GAME OVER]"),
        }
    }
}

/// Zero-padded minutes and seconds. Minutes grow past 59 rather than wrapping.
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
