//! Asteroids Core - simulation for a wrap-around asteroid shooter
//!
//! Core modules:
//! - `sim`: Per-frame simulation (kinematics, collisions, spawning, game flow)
//! - `tuning`: Data-driven game balance

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Longest frame delta a single tick will simulate (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 16.0;
    /// Heading that points "up" on screen (y grows downward)
    pub const SHIP_HEADING_UP: f32 = -90.0;
    /// Velocity multiplier applied every update (space drag)
    pub const SHIP_DAMPING: f32 = 0.995;
    /// Degrees per second
    pub const SHIP_ROTATION_SPEED: f32 = 180.0;
    /// Units per second squared
    pub const SHIP_THRUST: f32 = 200.0;
    /// Seconds between shots while fire is held
    pub const FIRE_COOLDOWN: f32 = 0.18;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 3.0;
    pub const BULLET_SPEED: f32 = 400.0;
    pub const BULLET_LIFETIME: f32 = 2.0;
    pub const BULLET_WRAP_MARGIN: f32 = 10.0;

    /// Asteroid fragmentation
    pub const FRAGMENT_RADIUS_SCALE: f32 = 0.6;
    pub const FRAGMENT_SPEED_MIN: f32 = 50.0;
    pub const FRAGMENT_SPEED_MAX: f32 = 150.0;
    pub const FRAGMENTS_PER_KILL: usize = 2;

    /// Points per kill are `KILL_SCORE_BASE * (tier + 1)`
    pub const KILL_SCORE_BASE: u64 = 100;

    /// Session start
    pub const STARTING_LIVES: u8 = 3;
    pub const INITIAL_ASTEROIDS: usize = 6;

    /// Score thresholds at which a ship hit costs two lives.
    /// Both values appear in the shipped game; `Tuning` picks one.
    pub const DOUBLE_DAMAGE_SCORE_LOW: u64 = 1_500;
    pub const DOUBLE_DAMAGE_SCORE_HIGH: u64 = 15_000;

    /// New asteroids (spawned by the scheduler)
    pub const SPAWN_EDGE_OFFSET: f32 = 20.0;
    pub const SPAWN_SPEED_MIN: f32 = 30.0;
    pub const SPAWN_SPEED_MAX: f32 = 110.0;
    pub const SPAWN_RADIUS_MIN: f32 = 32.0;
    pub const SPAWN_RADIUS_MAX: f32 = 48.0;

    /// Replenishment: `REPLENISH_BASE + floor(elapsed / REPLENISH_STEP_SECS)`
    pub const REPLENISH_BASE: usize = 4;
    pub const REPLENISH_STEP_SECS: f32 = 20.0;

    /// Trickle: interval `max(MIN, BASE - elapsed / RAMP)`
    pub const TRICKLE_INTERVAL_BASE: f32 = 5.0;
    pub const TRICKLE_INTERVAL_MIN: f32 = 1.0;
    /// Seconds over which difficulty curves ramp by one step
    pub const DIFFICULTY_RAMP_SECS: f32 = 60.0;
}

/// Unit vector for a heading in degrees (0 = +x, 90 = +y)
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Heading of a velocity in degrees, in [0, 360)
#[inline]
pub fn heading_of(vel: Vec2) -> f32 {
    vel.y.atan2(vel.x).to_degrees().rem_euclid(360.0)
}

/// Wrap a coordinate into [0, extent] (hard screen edge).
///
/// Values already inside are untouched, so an entity sitting exactly on the
/// far edge stays there.
#[inline]
pub fn wrap_hard(value: f32, extent: f32) -> f32 {
    if (0.0..=extent).contains(&value) {
        value
    } else {
        value.rem_euclid(extent)
    }
}

/// Wrap a coordinate within [-margin, extent + margin].
///
/// Leaving one side teleports to the opposite margin.
#[inline]
pub fn wrap_with_margin(value: f32, extent: f32, margin: f32) -> f32 {
    if value < -margin {
        extent + margin
    } else if value > extent + margin {
        -margin
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_vector_up() {
        let up = heading_vector(consts::SHIP_HEADING_UP);
        assert!(up.x.abs() < 1e-5);
        assert!((up.y + 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_heading_of_round_trips_quadrants() {
        for deg in [0.0_f32, 45.0, 135.0, 225.0, 300.0] {
            let got = heading_of(heading_vector(deg) * 10.0);
            assert!((got - deg).abs() < 1e-3, "{deg} -> {got}");
        }
    }

    #[test]
    fn test_wrap_hard() {
        assert_eq!(wrap_hard(100.0, 1280.0), 100.0);
        assert_eq!(wrap_hard(1280.0, 1280.0), 1280.0);
        assert!((wrap_hard(-5.0, 1280.0) - 1275.0).abs() < 1e-3);
        assert!((wrap_hard(1290.0, 1280.0) - 10.0).abs() < 1e-3);
        // Large overshoot still lands on screen
        let v = wrap_hard(5000.0, 1280.0);
        assert!((0.0..=1280.0).contains(&v));
    }

    #[test]
    fn test_wrap_with_margin() {
        assert_eq!(wrap_with_margin(-11.0, 720.0, 10.0), 730.0);
        assert_eq!(wrap_with_margin(731.0, 720.0, 10.0), -10.0);
        assert_eq!(wrap_with_margin(-10.0, 720.0, 10.0), -10.0);
        assert_eq!(wrap_with_margin(300.0, 720.0, 10.0), 300.0);
    }
}
