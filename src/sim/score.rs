//! Score bookkeeping
//!
//! The high score lives for the process only; it survives restarts but is
//! never written to storage.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub high_score: u32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Award one point for a block hit
    pub fn record_hit(&mut self) {
        self.score = self.score.saturating_add(1);
        self.high_score = self.high_score.max(self.score);
    }

    /// Start a new game. The high score is kept.
    pub fn reset_for_new_game(&mut self) {
        self.score = 0;
    }

    /// True when the current game holds the high score (and scored at all)
    pub fn is_new_high(&self) -> bool {
        self.score > 0 && self.score == self.high_score
    }
}
