//! Collision detection and resolution
//!
//! Circle-vs-circle overlap with a full pairwise scan. Fragments created by a
//! kill are staged and merged after the pass, so they can't be hit in the
//! frame they appear.

use glam::Vec2;
use rand::Rng;

use super::ledger::SessionLedger;
use super::state::{Asteroid, Bullet, Ship};
use crate::consts::*;
use crate::heading_vector;

/// Whether two circles touch or overlap
#[inline]
pub fn overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    let r = radius_a + radius_b;
    pos_a.distance_squared(pos_b) <= r * r
}

/// Break a destroyed asteroid into its fragments (none for the smallest tier).
///
/// Fragments start at the parent's position, so near an edge they can sit
/// outside their own (smaller) wrap margin until their next update wraps them.
pub fn fragment<R: Rng + ?Sized>(parent: &Asteroid, rng: &mut R) -> Vec<Asteroid> {
    let Some(tier) = parent.tier.smaller() else {
        return Vec::new();
    };
    (0..FRAGMENTS_PER_KILL)
        .map(|_| {
            let heading = rng.random_range(0.0..360.0);
            let speed = rng.random_range(FRAGMENT_SPEED_MIN..FRAGMENT_SPEED_MAX);
            Asteroid::new(
                parent.pos,
                heading_vector(heading) * speed,
                parent.radius * FRAGMENT_RADIUS_SCALE,
                tier,
            )
        })
        .collect()
}

/// Test every live bullet against every live asteroid.
///
/// Each hit kills both entities and scores the asteroid. Fragments are
/// appended to `asteroids` only after the scan. Returns the number of kills.
pub fn resolve_bullet_hits<R: Rng + ?Sized>(
    bullets: &mut [Bullet],
    asteroids: &mut Vec<Asteroid>,
    ledger: &mut SessionLedger,
    rng: &mut R,
) -> usize {
    let mut staged: Vec<Asteroid> = Vec::new();
    let mut kills = 0;

    for bullet in bullets.iter_mut() {
        for asteroid in asteroids.iter_mut() {
            if !bullet.alive || !asteroid.alive {
                continue;
            }
            if overlap(bullet.pos, bullet.radius, asteroid.pos, asteroid.radius) {
                bullet.alive = false;
                asteroid.alive = false;
                let points = ledger.award_kill(asteroid.tier);
                staged.extend(fragment(asteroid, rng));
                kills += 1;
                log::debug!("Asteroid {:?} destroyed (+{})", asteroid.tier, points);
            }
        }
    }

    asteroids.append(&mut staged);
    kills
}

/// Outcome of the ship-vs-asteroid pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipHit {
    /// No contact this frame
    None,
    /// Ship was hit and put back at the center
    Respawned { damage: u8 },
    /// Ship was hit and no lives remain
    Destroyed { damage: u8 },
}

/// Lives lost per hit at the given score
#[inline]
pub fn hit_damage(score: u64, double_damage_score: u64) -> u8 {
    if score >= double_damage_score { 2 } else { 1 }
}

/// Check the ship against live asteroids; at most one hit per frame.
///
/// On the final hit the best score is recorded. The caller owns the phase
/// change to game over.
pub fn resolve_ship_hits(
    ship: &mut Ship,
    asteroids: &[Asteroid],
    ledger: &mut SessionLedger,
    double_damage_score: u64,
    respawn_at: Vec2,
) -> ShipHit {
    if !ship.alive {
        return ShipHit::None;
    }
    let hit = asteroids
        .iter()
        .any(|a| a.alive && overlap(ship.pos, ship.radius, a.pos, a.radius));
    if !hit {
        return ShipHit::None;
    }

    ship.alive = false;
    let damage = hit_damage(ledger.score(), double_damage_score);
    let lives = ledger.apply_damage(damage);
    if lives > 0 {
        ship.reset(respawn_at);
        log::info!("Ship hit (-{} lives, {} left)", damage, lives);
        ShipHit::Respawned { damage }
    } else {
        ledger.record_best();
        log::info!("Ship destroyed, final score {}", ledger.score());
        ShipHit::Destroyed { damage }
    }
}
