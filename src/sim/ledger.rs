//! Session ledger: score, lives, elapsed time, best score
//!
//! Fields are read through getters. Only the sim itself (collision
//! resolution, spawning, flow transitions) may write them.

use serde::{Deserialize, Serialize};

use super::state::AsteroidTier;
use crate::consts::STARTING_LIVES;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionLedger {
    score: u64,
    lives: u8,
    /// Seconds since the current session started
    elapsed_time: f32,
    /// Highest score seen at game over during this process
    best_score: u64,
}

impl Default for SessionLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionLedger {
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: STARTING_LIVES,
            elapsed_time: 0.0,
            best_score: 0,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn elapsed_time(&self) -> f32 {
        self.elapsed_time
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    /// Reset for a new session. Best score survives.
    pub(crate) fn reset_session(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.elapsed_time = 0.0;
    }

    pub(crate) fn advance(&mut self, dt: f32) {
        self.elapsed_time += dt;
    }

    /// Credit a kill and return the points awarded
    pub(crate) fn award_kill(&mut self, tier: AsteroidTier) -> u64 {
        let points = tier.kill_score();
        self.score += points;
        points
    }

    /// Remove lives (clamped at zero) and return how many remain
    pub(crate) fn apply_damage(&mut self, damage: u8) -> u8 {
        self.lives = self.lives.saturating_sub(damage);
        self.lives
    }

    /// Fold the current score into the best score
    pub(crate) fn record_best(&mut self) {
        self.best_score = self.best_score.max(self.score);
    }

    #[cfg(test)]
    pub(crate) fn set_score(&mut self, score: u64) {
        self.score = score;
    }

    #[cfg(test)]
    pub(crate) fn set_elapsed_time(&mut self, elapsed: f32) {
        self.elapsed_time = elapsed;
    }
}
