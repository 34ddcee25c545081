//! Asteroids Core headless runner
//!
//! Starts a session from the menu, flies a scripted pilot for a while, and
//! prints the final frame as JSON.
//!
//! Usage: asteroids-core [--seed N] [--seconds S] [--tuning PATH]

use std::process::ExitCode;

use asteroids_core::Tuning;
use asteroids_core::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

const FRAME_DT: f32 = 1.0 / 60.0;

struct Options {
    seed: u64,
    seconds: f32,
    tuning_path: Option<String>,
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options {
        seed: 12345,
        seconds: 60.0,
        tuning_path: None,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("missing value for {arg}"));
        match arg.as_str() {
            "--seed" => {
                options.seed = value()?.parse().map_err(|e| format!("bad --seed: {e}"))?;
            }
            "--seconds" => {
                options.seconds = value()?.parse().map_err(|e| format!("bad --seconds: {e}"))?;
            }
            "--tuning" => options.tuning_path = Some(value()?),
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(options)
}

/// Spin slowly, thrust in short bursts, and keep the trigger held
fn pilot(frame: u64) -> TickInput {
    TickInput {
        rotate_right: frame % 240 < 90,
        thrust: frame % 180 < 20,
        fire: true,
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let tuning = match &options.tuning_path {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => tuning,
            Err(e) => {
                eprintln!("Failed to load tuning from {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    log::info!("Asteroids Core (headless) starting with seed {}", options.seed);
    let mut state = GameState::new(options.seed, tuning);

    // Select "Play" from the title menu
    tick(
        &mut state,
        &TickInput {
            confirm: true,
            ..Default::default()
        },
        FRAME_DT,
    );

    let frames = (options.seconds / FRAME_DT).ceil() as u64;
    let mut shots = 0u64;
    for frame in 0..frames {
        tick(&mut state, &pilot(frame), FRAME_DT);
        if state.has_event(GameEvent::BulletFired) {
            shots += 1;
        }
        if state.phase != GamePhase::Playing || state.exit_requested {
            break;
        }
    }

    log::info!(
        "Finished: phase {:?}, score {}, lives {}, {} shots, {:.1}s",
        state.phase,
        state.ledger.score(),
        state.ledger.lives(),
        shots,
        state.ledger.elapsed_time()
    );

    match serde_json::to_string_pretty(&state.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize snapshot: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}
