//! Data-driven game balance
//!
//! Values that hosts may want to override without touching the sim. Anything
//! missing from a JSON document falls back to `Tuning::default()`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Errors from loading or validating tuning
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    /// Tuning file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tuning document is not valid JSON for `Tuning`
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value the sim cannot run with
    #[error("Invalid value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Playfield width in world units
    pub screen_width: f32,
    /// Playfield height in world units
    pub screen_height: f32,
    /// Score at or above which a ship hit costs two lives instead of one
    pub double_damage_score: u64,
    /// Seconds between shots while fire is held
    pub fire_cooldown: f32,
    /// Run the ship update twice per tick, reproducing the shipped game's
    /// doubled drag and movement
    pub legacy_double_ship_update: bool,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            double_damage_score: DOUBLE_DAMAGE_SCORE_HIGH,
            fire_cooldown: FIRE_COOLDOWN,
            legacy_double_ship_update: false,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from a JSON string
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Reject values that would corrupt the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        if !(self.screen_width.is_finite() && self.screen_width > 0.0) {
            return Err(TuningError::Invalid {
                field: "screen_width",
                reason: "must be finite and positive",
            });
        }
        if !(self.screen_height.is_finite() && self.screen_height > 0.0) {
            return Err(TuningError::Invalid {
                field: "screen_height",
                reason: "must be finite and positive",
            });
        }
        if !(self.fire_cooldown.is_finite() && self.fire_cooldown >= 0.0) {
            return Err(TuningError::Invalid {
                field: "fire_cooldown",
                reason: "must be finite and non-negative",
            });
        }
        Ok(())
    }

    /// Center of the playfield (ship spawn point)
    pub fn screen_center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }
}
