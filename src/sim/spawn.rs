//! Asteroid spawn scheduling
//!
//! Two rules run every playing tick: replenish when the field is empty, and a
//! trickle timer whose interval shrinks as the session goes on.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{Asteroid, AsteroidTier};
use crate::consts::*;
use crate::heading_vector;

/// Asteroids to spawn when the field has been cleared
pub fn replenish_count(elapsed: f32) -> usize {
    REPLENISH_BASE.saturating_add((elapsed / REPLENISH_STEP_SECS).floor() as usize)
}

/// Seconds between trickle spawns
pub fn trickle_interval(elapsed: f32) -> f32 {
    (TRICKLE_INTERVAL_BASE - elapsed / DIFFICULTY_RAMP_SECS).max(TRICKLE_INTERVAL_MIN)
}

/// Asteroids per trickle spawn
pub fn trickle_count(elapsed: f32) -> usize {
    1usize.saturating_add((elapsed / DIFFICULTY_RAMP_SECS).floor() as usize)
}

/// Speed multiplier for newly spawned asteroids (unbounded)
pub fn difficulty_factor(elapsed: f32) -> f32 {
    1.0 + elapsed / DIFFICULTY_RAMP_SECS
}

/// A large asteroid just outside a random screen edge, drifting in a random
/// direction at a speed scaled by difficulty
pub fn random_edge_asteroid<R: Rng + ?Sized>(rng: &mut R, extent: Vec2, elapsed: f32) -> Asteroid {
    let pos = match rng.random_range(0..4) {
        0 => Vec2::new(rng.random_range(0.0..extent.x), -SPAWN_EDGE_OFFSET),
        1 => Vec2::new(rng.random_range(0.0..extent.x), extent.y + SPAWN_EDGE_OFFSET),
        2 => Vec2::new(-SPAWN_EDGE_OFFSET, rng.random_range(0.0..extent.y)),
        _ => Vec2::new(extent.x + SPAWN_EDGE_OFFSET, rng.random_range(0.0..extent.y)),
    };
    let heading = rng.random_range(0.0..360.0);
    let speed = rng.random_range(SPAWN_SPEED_MIN..SPAWN_SPEED_MAX) * difficulty_factor(elapsed);
    let radius = rng.random_range(SPAWN_RADIUS_MIN..SPAWN_RADIUS_MAX);
    Asteroid::new(pos, heading_vector(heading) * speed, radius, AsteroidTier::Large)
}

/// What the scheduler decided this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnPlan {
    pub replenish: usize,
    pub trickle: usize,
}

impl SpawnPlan {
    pub fn total(&self) -> usize {
        self.replenish.saturating_add(self.trickle)
    }
}

/// Trickle timer state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Seconds since the last trickle spawn
    trickle_timer: f32,
}

impl SpawnScheduler {
    pub fn trickle_timer(&self) -> f32 {
        self.trickle_timer
    }

    pub(crate) fn reset(&mut self) {
        self.trickle_timer = 0.0;
    }

    /// Advance the trickle timer
    pub(crate) fn advance(&mut self, dt: f32) {
        self.trickle_timer += dt;
    }

    /// Evaluate both rules. The trickle timer restarts when it fires.
    pub(crate) fn plan(&mut self, live_asteroids: usize, elapsed: f32) -> SpawnPlan {
        let mut plan = SpawnPlan::default();
        if live_asteroids == 0 {
            plan.replenish = replenish_count(elapsed);
        }
        if self.trickle_timer > trickle_interval(elapsed) {
            plan.trickle = trickle_count(elapsed);
            self.trickle_timer = 0.0;
        }
        plan
    }
}

/// Number of trickle firings up to `until`, predicted from the interval
/// curve: each firing happens once the time since the previous one reaches
/// `trickle_interval(t)`. Before the curve bottoms out this solves
/// `t - prev = 5 - t/60`.
#[cfg(test)]
pub(crate) fn predicted_trickle_fires(until: f32) -> usize {
    let mut fires = 0;
    let mut prev = 0.0_f32;
    loop {
        let ramp = DIFFICULTY_RAMP_SECS;
        let mut next = (prev + TRICKLE_INTERVAL_BASE) * ramp / (ramp + 1.0);
        if next - prev < TRICKLE_INTERVAL_MIN {
            next = prev + TRICKLE_INTERVAL_MIN;
        }
        if next > until {
            return fires;
        }
        fires += 1;
        prev = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_replenish_curve() {
        assert_eq!(replenish_count(0.0), 4);
        assert_eq!(replenish_count(19.9), 4);
        assert_eq!(replenish_count(20.0), 5);
        assert_eq!(replenish_count(65.0), 7);
    }

    #[test]
    fn test_trickle_curves() {
        assert_eq!(trickle_interval(0.0), 5.0);
        assert!((trickle_interval(30.0) - 4.5).abs() < 1e-5);
        assert_eq!(trickle_interval(240.0), 1.0);
        assert_eq!(trickle_interval(1000.0), 1.0);
        assert_eq!(trickle_count(0.0), 1);
        assert_eq!(trickle_count(59.0), 1);
        assert_eq!(trickle_count(60.0), 2);
        assert_eq!(trickle_count(150.0), 3);
        assert_eq!(trickle_count(f32::MAX), usize::MAX);
        assert_eq!(replenish_count(f32::MAX), usize::MAX);
    }

    #[test]
    fn test_difficulty_factor_unbounded() {
        assert_eq!(difficulty_factor(0.0), 1.0);
        assert!((difficulty_factor(60.0) - 2.0).abs() < 1e-5);
        assert!((difficulty_factor(600.0) - 11.0).abs() < 1e-4);
    }

    #[test]
    fn test_edge_asteroid_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        let extent = Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT);
        for elapsed in [0.0, 30.0, 120.0] {
            let factor = difficulty_factor(elapsed);
            for _ in 0..200 {
                let a = random_edge_asteroid(&mut rng, extent, elapsed);
                assert_eq!(a.tier, AsteroidTier::Large);
                assert!(a.alive);
                assert!(a.radius >= SPAWN_RADIUS_MIN && a.radius < SPAWN_RADIUS_MAX);

                let speed = a.vel.length();
                assert!(speed >= SPAWN_SPEED_MIN * factor - 1e-2);
                assert!(speed < SPAWN_SPEED_MAX * factor + 1e-2);

                // Exactly one coordinate sits 20 units outside an edge
                let off_x = a.pos.x == -SPAWN_EDGE_OFFSET
                    || a.pos.x == SCREEN_WIDTH + SPAWN_EDGE_OFFSET;
                let off_y = a.pos.y == -SPAWN_EDGE_OFFSET
                    || a.pos.y == SCREEN_HEIGHT + SPAWN_EDGE_OFFSET;
                assert!(off_x ^ off_y);
                if off_x {
                    assert!((0.0..SCREEN_HEIGHT).contains(&a.pos.y));
                } else {
                    assert!((0.0..SCREEN_WIDTH).contains(&a.pos.x));
                }
            }
        }
    }

    #[test]
    fn test_plan_replenish_only_when_empty() {
        let mut scheduler = SpawnScheduler::default();
        assert_eq!(scheduler.plan(0, 0.0).replenish, 4);
        assert_eq!(scheduler.plan(1, 0.0).replenish, 0);
        assert_eq!(scheduler.plan(0, 45.0).replenish, 6);
    }

    #[test]
    fn test_plan_both_rules_same_tick() {
        let mut scheduler = SpawnScheduler::default();
        scheduler.advance(5.5);
        let plan = scheduler.plan(0, 0.0);
        assert_eq!(plan, SpawnPlan { replenish: 4, trickle: 1 });
        assert_eq!(plan.total(), 5);
        assert_eq!(scheduler.trickle_timer(), 0.0);

        let saturated = SpawnPlan {
            replenish: usize::MAX,
            trickle: 1,
        };
        assert_eq!(saturated.total(), usize::MAX);
    }

    #[test]
    fn test_trickle_requires_exceeding_interval() {
        let mut scheduler = SpawnScheduler::default();
        scheduler.advance(5.0);
        assert_eq!(scheduler.plan(3, 0.0).trickle, 0);
        scheduler.advance(0.01);
        assert_eq!(scheduler.plan(3, 0.0).trickle, 1);
    }

    #[test]
    fn test_trickle_fires_match_interval_curve() {
        let dt = 1.0 / 60.0;
        let until = 25.0;
        let mut scheduler = SpawnScheduler::default();
        let mut elapsed = 0.0_f32;
        let mut fires = 0;
        let mut fire_times = Vec::new();

        while elapsed < until {
            elapsed += dt;
            scheduler.advance(dt);
            let plan = scheduler.plan(6, elapsed);
            assert_eq!(plan.replenish, 0);
            if plan.trickle > 0 {
                assert_eq!(plan.trickle, trickle_count(elapsed));
                fires += 1;
                fire_times.push(elapsed);
            }
        }

        assert_eq!(fires, predicted_trickle_fires(until));
        // Gaps shrink as the interval curve ramps down
        for pair in fire_times.windows(3) {
            assert!(pair[2] - pair[1] <= pair[1] - pair[0] + dt);
        }
    }
}
