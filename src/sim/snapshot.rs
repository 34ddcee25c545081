//! Read-only view of a frame for presentation collaborators

use glam::Vec2;
use serde::Serialize;

use super::state::{AsteroidTier, GameEvent, GamePhase, GameState};
use crate::heading_of;

#[derive(Debug, Clone, Serialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub radius: f32,
    /// Degrees
    pub heading: f32,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AsteroidView {
    pub pos: Vec2,
    pub radius: f32,
    pub tier: AsteroidTier,
    /// Direction of travel in degrees
    pub heading: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletView {
    pub pos: Vec2,
    pub radius: f32,
    /// Direction of travel in degrees
    pub heading: f32,
}

/// Everything a renderer/HUD needs after a tick
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub menu_selection: usize,
    pub score: u64,
    pub lives: u8,
    pub best_score: u64,
    pub elapsed_time: f32,
    pub bullet_fired: bool,
    pub ship: ShipView,
    pub asteroids: Vec<AsteroidView>,
    pub bullets: Vec<BulletView>,
}

impl GameState {
    /// Capture the live entities and HUD values
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            menu_selection: self.menu_selection,
            score: self.ledger.score(),
            lives: self.ledger.lives(),
            best_score: self.ledger.best_score(),
            elapsed_time: self.ledger.elapsed_time(),
            bullet_fired: self.has_event(GameEvent::BulletFired),
            ship: ShipView {
                pos: self.ship.pos,
                radius: self.ship.radius,
                heading: self.ship.heading,
                alive: self.ship.alive,
            },
            asteroids: self
                .asteroids
                .iter()
                .filter(|a| a.alive)
                .map(|a| AsteroidView {
                    pos: a.pos,
                    radius: a.radius,
                    tier: a.tier,
                    heading: heading_of(a.vel),
                })
                .collect(),
            bullets: self
                .bullets
                .iter()
                .filter(|b| b.alive)
                .map(|b| BulletView {
                    pos: b.pos,
                    radius: b.radius,
                    heading: heading_of(b.vel),
                })
                .collect(),
        }
    }
}
