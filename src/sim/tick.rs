//! Per-frame simulation tick
//!
//! Interprets the input snapshot for the current phase, then (while playing)
//! runs entity update, collision resolution, and spawning in that order.

use super::collision::{ShipHit, resolve_bullet_hits, resolve_ship_hits};
use super::state::{GameEvent, GamePhase, GameState, MenuOption};
use crate::consts::MAX_FRAME_DT;

/// Discrete input signals for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held: rotate counter-clockwise
    pub rotate_left: bool,
    /// Held: rotate clockwise
    pub rotate_right: bool,
    /// Held: accelerate along heading
    pub thrust: bool,
    /// Held: fire (subject to cooldown)
    pub fire: bool,
    /// Menu: activate the highlighted entry
    pub confirm: bool,
    /// Menu: move highlight up
    pub navigate_up: bool,
    /// Menu: move highlight down
    pub navigate_down: bool,
    /// Game over: start a new session
    pub restart: bool,
    /// Game over: back to the title menu
    pub return_to_menu: bool,
    /// Any phase: quit
    pub exit: bool,
}

/// Clamp a frame delta to something physics can use.
///
/// Negative and non-finite values become zero. Long stalls are capped at
/// `MAX_FRAME_DT` so one tick never jumps the difficulty curves.
pub fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        log::warn!("Rejected frame delta {dt}, using 0");
        0.0
    } else if dt > MAX_FRAME_DT {
        log::warn!("Frame delta {dt} exceeds {MAX_FRAME_DT}, clamping");
        MAX_FRAME_DT
    } else {
        dt
    }
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = sanitize_dt(dt);
    state.events.clear();

    if input.exit {
        log::info!("Exit requested");
        state.exit_requested = true;
        return;
    }

    match state.phase {
        GamePhase::Menu => handle_menu(state, input),
        GamePhase::GameOver => handle_game_over(state, input),
        GamePhase::Playing => step_playing(state, input, dt),
    }
}

fn handle_menu(state: &mut GameState, input: &TickInput) {
    let count = MenuOption::ALL.len();
    if input.navigate_up {
        state.menu_selection = (state.menu_selection + count - 1) % count;
    }
    if input.navigate_down {
        state.menu_selection = (state.menu_selection + 1) % count;
    }
    if input.confirm {
        match MenuOption::from_index(state.menu_selection) {
            MenuOption::Play => state.begin_session(),
            MenuOption::Exit => {
                log::info!("Exit selected from menu");
                state.exit_requested = true;
            }
        }
    }
}

fn handle_game_over(state: &mut GameState, input: &TickInput) {
    if input.restart {
        state.begin_session();
    } else if input.return_to_menu {
        state.phase = GamePhase::Menu;
        state.menu_selection = 0;
        log::info!("Returned to menu");
    }
}

fn step_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    let extent = state.extent();

    // Timers
    state.ledger.advance(dt);
    state.spawner.advance(dt);
    state.ship.since_last_shot += dt;

    // Ship controls and firing
    state
        .ship
        .apply_controls(input.rotate_left, input.rotate_right, input.thrust, dt);
    if input.fire && state.ship.can_fire(state.tuning.fire_cooldown) {
        let bullet = state.ship.fire();
        state.bullets.push(bullet);
        state.events.push(GameEvent::BulletFired);
    }

    // Entity update
    state.ship.update(dt, extent);
    if state.tuning.legacy_double_ship_update {
        state.ship.update(dt, extent);
    }
    for bullet in &mut state.bullets {
        bullet.update(dt, extent);
    }
    for asteroid in &mut state.asteroids {
        asteroid.update(dt, extent);
    }
    state.sweep_dead();

    // Collisions
    resolve_bullet_hits(
        &mut state.bullets,
        &mut state.asteroids,
        &mut state.ledger,
        &mut state.rng,
    );
    let respawn_at = state.tuning.screen_center();
    let ship_hit = resolve_ship_hits(
        &mut state.ship,
        &state.asteroids,
        &mut state.ledger,
        state.tuning.double_damage_score,
        respawn_at,
    );
    state.sweep_dead();

    if let ShipHit::Destroyed { .. } = ship_hit {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {}, best {}",
            state.ledger.score(),
            state.ledger.best_score()
        );
        return;
    }

    // Spawning
    let elapsed = state.ledger.elapsed_time();
    let plan = state.spawner.plan(state.live_asteroid_count(), elapsed);
    if plan.total() > 0 {
        log::debug!(
            "Spawning {} asteroids (replenish {}, trickle {}) at t={:.1}s",
            plan.total(),
            plan.replenish,
            plan.trickle,
            elapsed
        );
        state.spawn_asteroids(plan.total());
    }
}
