//! Simulation module
//!
//! All gameplay logic lives here. No rendering, audio, or platform code:
//! - One `tick` per frame with a caller-supplied delta
//! - Seeded RNG only
//! - Entities spawned mid-pass join the world after the pass

pub mod collision;
pub mod ledger;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{ShipHit, fragment, hit_damage, overlap, resolve_bullet_hits, resolve_ship_hits};
pub use ledger::SessionLedger;
pub use snapshot::{AsteroidView, BulletView, FrameSnapshot, ShipView};
pub use spawn::{
    SpawnPlan, SpawnScheduler, difficulty_factor, random_edge_asteroid, replenish_count,
    trickle_count, trickle_interval,
};
pub use state::{
    Asteroid, AsteroidTier, Bullet, GameEvent, GamePhase, GameState, MenuOption, Ship,
};
pub use tick::{TickInput, sanitize_dt, tick};
