//! Game state and core simulation types
//!
//! Entities own their kinematics; `GameState` owns everything for a session.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ledger::SessionLedger;
use super::spawn::SpawnScheduler;
use crate::consts::*;
use crate::{Tuning, heading_vector, wrap_hard, wrap_with_margin};

/// Current phase of the game flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title menu, waiting for a selection
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended, waiting for restart or return to menu
    GameOver,
}

/// Entries of the title menu, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Play,
    Exit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 2] = [MenuOption::Play, MenuOption::Exit];

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }
}

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AsteroidTier {
    Small = 0,
    Medium = 1,
    Large = 2,
}

impl AsteroidTier {
    #[inline]
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Tier of the fragments this tier breaks into, if any
    pub fn smaller(self) -> Option<Self> {
        match self {
            AsteroidTier::Large => Some(AsteroidTier::Medium),
            AsteroidTier::Medium => Some(AsteroidTier::Small),
            AsteroidTier::Small => None,
        }
    }

    /// Points awarded for destroying an asteroid of this tier
    pub fn kill_score(self) -> u64 {
        KILL_SCORE_BASE * (self.value() as u64 + 1)
    }
}

/// Per-frame notifications for audio/presentation collaborators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The ship fired a bullet this frame
    BulletFired,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in degrees (0 = +x, -90 = up)
    pub heading: f32,
    pub radius: f32,
    pub alive: bool,
    /// Seconds since the last shot
    pub since_last_shot: f32,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            heading: SHIP_HEADING_UP,
            radius: SHIP_RADIUS,
            alive: true,
            since_last_shot: 0.0,
        }
    }

    /// Put the ship back at `pos`, stationary and facing up
    pub fn reset(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
        self.heading = SHIP_HEADING_UP;
        self.alive = true;
    }

    /// Apply held rotation/thrust signals for `dt` seconds.
    ///
    /// Speed is intentionally uncapped.
    pub fn apply_controls(&mut self, rotate_left: bool, rotate_right: bool, thrust: bool, dt: f32) {
        if rotate_left {
            self.heading -= SHIP_ROTATION_SPEED * dt;
        }
        if rotate_right {
            self.heading += SHIP_ROTATION_SPEED * dt;
        }
        if thrust {
            self.vel += heading_vector(self.heading) * SHIP_THRUST * dt;
        }
    }

    /// Drag, move, and wrap at the hard screen edge
    pub fn update(&mut self, dt: f32, extent: Vec2) {
        self.vel *= SHIP_DAMPING;
        self.pos += self.vel * dt;
        self.pos.x = wrap_hard(self.pos.x, extent.x);
        self.pos.y = wrap_hard(self.pos.y, extent.y);
    }

    /// Whether the fire cooldown has elapsed
    pub fn can_fire(&self, cooldown: f32) -> bool {
        self.alive && self.since_last_shot >= cooldown
    }

    /// Spawn a bullet from the nose and restart the cooldown
    pub fn fire(&mut self) -> Bullet {
        let dir = heading_vector(self.heading);
        self.since_last_shot = 0.0;
        Bullet::new(self.pos + dir * self.radius, self.vel + dir * BULLET_SPEED)
    }
}

/// An asteroid entity
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub tier: AsteroidTier,
    pub alive: bool,
}

impl Asteroid {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32, tier: AsteroidTier) -> Self {
        Self {
            pos,
            vel,
            radius,
            tier,
            alive: true,
        }
    }

    /// Move and wrap with a margin equal to the asteroid's own radius
    pub fn update(&mut self, dt: f32, extent: Vec2) {
        self.pos += self.vel * dt;
        self.pos.x = wrap_with_margin(self.pos.x, extent.x, self.radius);
        self.pos.y = wrap_with_margin(self.pos.y, extent.y, self.radius);
    }
}

/// A bullet entity
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds left before the bullet expires
    pub lifetime: f32,
    pub radius: f32,
    pub alive: bool,
}

impl Bullet {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            lifetime: BULLET_LIFETIME,
            radius: BULLET_RADIUS,
            alive: true,
        }
    }

    /// Move, age, and wrap with a fixed margin
    pub fn update(&mut self, dt: f32, extent: Vec2) {
        self.pos += self.vel * dt;
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            self.alive = false;
        }
        self.pos.x = wrap_with_margin(self.pos.x, extent.x, BULLET_WRAP_MARGIN);
        self.pos.y = wrap_with_margin(self.pos.y, extent.y, BULLET_WRAP_MARGIN);
    }
}

/// Complete game state for one process
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    /// Balance values in effect
    pub tuning: Tuning,
    /// Current phase
    pub phase: GamePhase,
    /// Highlighted menu entry (index into `MenuOption::ALL`)
    pub menu_selection: usize,
    /// Host should terminate the process
    pub exit_requested: bool,
    /// Score, lives, timers
    pub ledger: SessionLedger,
    /// Asteroid spawn timers
    pub spawner: SpawnScheduler,
    /// Player ship (reset in place, never recreated)
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    /// Events raised during the last tick
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game state sitting at the menu
    pub fn new(seed: u64, tuning: Tuning) -> Self {
        let center = tuning.screen_center();
        Self {
            seed,
            tuning,
            phase: GamePhase::Menu,
            menu_selection: 0,
            exit_requested: false,
            ledger: SessionLedger::new(),
            spawner: SpawnScheduler::default(),
            ship: Ship::new(center),
            asteroids: Vec::new(),
            bullets: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Playfield extent as a vector
    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.tuning.screen_width, self.tuning.screen_height)
    }

    /// Start a fresh session: ledger, timers, entities, ship, opening wave
    pub fn begin_session(&mut self) {
        self.ledger.reset_session();
        self.spawner.reset();
        self.reset_level();
        self.phase = GamePhase::Playing;
        log::info!(
            "Session started ({} asteroids, best score {})",
            self.asteroids.len(),
            self.ledger.best_score()
        );
    }

    /// Clear entities, recenter the ship, and spawn the opening asteroids
    pub fn reset_level(&mut self) {
        self.asteroids.clear();
        self.bullets.clear();
        let center = self.tuning.screen_center();
        self.ship.reset(center);
        self.spawn_asteroids(INITIAL_ASTEROIDS);
    }

    /// Spawn `count` large asteroids at the screen edges
    pub fn spawn_asteroids(&mut self, count: usize) {
        let extent = self.extent();
        let elapsed = self.ledger.elapsed_time();
        for _ in 0..count {
            let asteroid = super::spawn::random_edge_asteroid(&mut self.rng, extent, elapsed);
            self.asteroids.push(asteroid);
        }
    }

    /// Number of asteroids still alive
    pub fn live_asteroid_count(&self) -> usize {
        self.asteroids.iter().filter(|a| a.alive).count()
    }

    /// Drop entities that died this frame
    pub fn sweep_dead(&mut self) {
        self.bullets.retain(|b| b.alive);
        self.asteroids.retain(|a| a.alive);
    }

    /// Whether the given event was raised during the last tick
    pub fn has_event(&self, event: GameEvent) -> bool {
        self.events.contains(&event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EXTENT: Vec2 = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);

    #[test]
    fn test_tier_fragments_and_score() {
        assert_eq!(AsteroidTier::Large.smaller(), Some(AsteroidTier::Medium));
        assert_eq!(AsteroidTier::Medium.smaller(), Some(AsteroidTier::Small));
        assert_eq!(AsteroidTier::Small.smaller(), None);
        assert_eq!(AsteroidTier::Small.kill_score(), 100);
        assert_eq!(AsteroidTier::Medium.kill_score(), 200);
        assert_eq!(AsteroidTier::Large.kill_score(), 300);
    }

    #[test]
    fn test_menu_option_from_index_wraps() {
        assert_eq!(MenuOption::from_index(0), MenuOption::Play);
        assert_eq!(MenuOption::from_index(1), MenuOption::Exit);
        assert_eq!(MenuOption::from_index(2), MenuOption::Play);
    }

    #[test]
    fn test_ship_damping_and_move() {
        let mut ship = Ship::new(Vec2::new(100.0, 100.0));
        ship.vel = Vec2::new(100.0, 0.0);
        ship.update(0.5, EXTENT);
        assert!((ship.vel.x - 99.5).abs() < 1e-4);
        assert!((ship.pos.x - (100.0 + 99.5 * 0.5)).abs() < 1e-3);
    }

    #[test]
    fn test_ship_wraps_hard_edge() {
        let mut ship = Ship::new(Vec2::new(1279.0, 5.0));
        ship.vel = Vec2::new(200.0, -200.0);
        ship.update(0.1, EXTENT);
        assert!(ship.pos.x >= 0.0 && ship.pos.x < 30.0);
        assert!(ship.pos.y > 690.0 && ship.pos.y <= 720.0);
    }

    #[test]
    fn test_ship_controls() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.apply_controls(true, false, false, 0.5);
        assert!((ship.heading - (SHIP_HEADING_UP - 90.0)).abs() < 1e-4);
        ship.apply_controls(false, true, false, 0.5);
        assert!((ship.heading - SHIP_HEADING_UP).abs() < 1e-4);

        // Thrust while facing up accelerates toward -y
        ship.apply_controls(false, false, true, 1.0);
        assert!(ship.vel.x.abs() < 1e-3);
        assert!((ship.vel.y + SHIP_THRUST).abs() < 1e-3);
    }

    #[test]
    fn test_ship_fire_spawns_at_nose() {
        let mut ship = Ship::new(Vec2::new(640.0, 360.0));
        ship.vel = Vec2::new(10.0, 0.0);
        ship.since_last_shot = 1.0;
        assert!(ship.can_fire(FIRE_COOLDOWN));

        let bullet = ship.fire();
        assert!((bullet.pos - Vec2::new(640.0, 360.0 - SHIP_RADIUS)).length() < 1e-3);
        assert!((bullet.vel - Vec2::new(10.0, -BULLET_SPEED)).length() < 1e-2);
        assert_eq!(bullet.lifetime, BULLET_LIFETIME);
        assert_eq!(ship.since_last_shot, 0.0);
        assert!(!ship.can_fire(FIRE_COOLDOWN));
    }

    #[test]
    fn test_ship_reset_keeps_cooldown() {
        let mut ship = Ship::new(Vec2::ZERO);
        ship.vel = Vec2::new(5.0, 5.0);
        ship.heading = 45.0;
        ship.alive = false;
        ship.since_last_shot = 0.7;
        ship.reset(Vec2::new(1.0, 2.0));
        assert_eq!(ship.pos, Vec2::new(1.0, 2.0));
        assert_eq!(ship.vel, Vec2::ZERO);
        assert_eq!(ship.heading, SHIP_HEADING_UP);
        assert!(ship.alive);
        assert_eq!(ship.since_last_shot, 0.7);
    }

    #[test]
    fn test_asteroid_wraps_at_own_radius() {
        let mut a = Asteroid::new(
            Vec2::new(-39.0, 100.0),
            Vec2::new(-20.0, 0.0),
            40.0,
            AsteroidTier::Large,
        );
        a.update(0.1, EXTENT);
        assert_eq!(a.pos.x, SCREEN_WIDTH + 40.0);
    }

    #[test]
    fn test_bullet_expires_and_wraps() {
        let mut b = Bullet::new(Vec2::new(1285.0, 360.0), Vec2::new(100.0, 0.0));
        b.update(0.1, EXTENT);
        assert_eq!(b.pos.x, -BULLET_WRAP_MARGIN);
        assert!(b.alive);

        b.update(BULLET_LIFETIME, EXTENT);
        assert!(!b.alive);
    }

    #[test]
    fn test_new_state_at_menu() {
        let state = GameState::new(1, Tuning::default());
        assert_eq!(state.phase, GamePhase::Menu);
        assert_eq!(state.menu_selection, 0);
        assert!(state.asteroids.is_empty());
        assert!(state.bullets.is_empty());
        assert!(!state.exit_requested);
    }

    proptest! {
        #[test]
        fn prop_entities_stay_in_wrap_bounds(
            x in 0.0f32..1280.0,
            y in 0.0f32..720.0,
            vx in -2000.0f32..2000.0,
            vy in -2000.0f32..2000.0,
            radius in 1.0f32..60.0,
            dt in 0.0f32..5.0,
        ) {
            let pos = Vec2::new(x, y);
            let vel = Vec2::new(vx, vy);

            let mut ship = Ship::new(pos);
            ship.vel = vel;
            ship.update(dt, EXTENT);
            prop_assert!((0.0..=SCREEN_WIDTH).contains(&ship.pos.x));
            prop_assert!((0.0..=SCREEN_HEIGHT).contains(&ship.pos.y));

            let mut asteroid = Asteroid::new(pos, vel, radius, AsteroidTier::Large);
            asteroid.update(dt, EXTENT);
            prop_assert!(asteroid.pos.x >= -radius && asteroid.pos.x <= SCREEN_WIDTH + radius);
            prop_assert!(asteroid.pos.y >= -radius && asteroid.pos.y <= SCREEN_HEIGHT + radius);

            let mut bullet = Bullet::new(pos, vel);
            bullet.update(dt, EXTENT);
            let m = BULLET_WRAP_MARGIN;
            prop_assert!(bullet.pos.x >= -m && bullet.pos.x <= SCREEN_WIDTH + m);
            prop_assert!(bullet.pos.y >= -m && bullet.pos.y <= SCREEN_HEIGHT + m);
        }
    }
}
