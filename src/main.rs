//! Headless reactor driver
//!
//! Builds a small demo core, seeds a few neutrons, and runs the simulation
//! for a fixed number of ticks, logging the population as the chain reaction
//! develops. Control rods are inserted halfway through the run.
//!
//! Usage: `reactor-grid [tuning.json]`. Without an argument the default
//! balance set is used.

use glam::Vec2;
use reactor_grid::Tuning;
use reactor_grid::sim::{ReactorState, TickInput, TileKind, tick};

const COLS: u32 = 16;
const ROWS: u32 = 10;
const SEED: u64 = 0xC0FFEE;
const RUN_TICKS: u64 = 600;
const ROD_INSERT_TICK: u64 = 300;
const REPORT_EVERY: u64 = 60;

fn main() {
    env_logger::init();

    let tuning = match std::env::args().nth(1) {
        Some(path) => load_tuning(&path),
        None => Tuning::default(),
    };

    let mut state = match ReactorState::with_tuning(COLS, ROWS, SEED, tuning) {
        Ok(state) => state,
        Err(e) => {
            log::error!("Invalid tuning: {e}");
            std::process::exit(1);
        }
    };

    build_demo_core(&mut state);
    seed_neutrons(&mut state);
    log::info!(
        "Reactor initialized: {}x{} grid, seed {}, {} neutrons",
        COLS,
        ROWS,
        SEED,
        state.population()
    );

    for t in 0..RUN_TICKS {
        let input = TickInput {
            toggle_rods: t == ROD_INSERT_TICK,
            ..Default::default()
        };
        if input.toggle_rods {
            log::info!("Inserting control rods at tick {t}");
        }

        tick(&mut state, &input);

        if state.time_ticks % REPORT_EVERY == 0 {
            log::info!(
                "tick {:4}: {:4} neutrons (births {}, deaths {}, escaped {})",
                state.time_ticks,
                state.population(),
                state.stats.total_births,
                state.stats.total_deaths,
                state.stats.total_escaped
            );
        }

        if state.population() == 0 {
            log::info!("Core went subcritical at tick {}", state.time_ticks);
            break;
        }
    }

    log::info!(
        "Run complete: {} ticks, {} births, {} deaths ({} escaped), {} neutrons left",
        state.time_ticks,
        state.stats.total_births,
        state.stats.total_deaths,
        state.stats.total_escaped,
        state.population()
    );
}

/// Load a tuning set from a JSON file, falling back to defaults on error.
fn load_tuning(path: &str) -> Tuning {
    match std::fs::read_to_string(path) {
        Ok(json) => match serde_json::from_str(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {path}");
                tuning
            }
            Err(e) => {
                log::warn!("Failed to parse {path}: {e} - using defaults");
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Failed to read {path}: {e} - using defaults");
            Tuning::default()
        }
    }
}

/// Shielded border, reflector lining, and an alternating fuel/moderator core
/// with a control-rod column through the middle.
fn build_demo_core(state: &mut ReactorState) {
    let (cols, rows) = (state.grid.cols(), state.grid.rows());

    for col in 0..cols {
        state.grid.set(col, 0, TileKind::Shielding);
        state.grid.set(col, rows - 1, TileKind::Shielding);
    }
    for row in 0..rows {
        state.grid.set(0, row, TileKind::Shielding);
        state.grid.set(cols - 1, row, TileKind::Shielding);
    }

    // Reflectors just inside the shield keep neutrons in the core.
    for col in 1..cols - 1 {
        state.grid.set(col, 1, TileKind::VerticalReflector);
        state.grid.set(col, rows - 2, TileKind::VerticalReflector);
    }
    for row in 2..rows - 2 {
        state.grid.set(1, row, TileKind::HorizontalReflector);
        state.grid.set(cols - 2, row, TileKind::HorizontalReflector);
    }

    for col in 2..cols - 2 {
        for row in 2..rows - 2 {
            let kind = if col == cols / 2 {
                TileKind::ControlRod
            } else if col % 2 == 0 {
                TileKind::Fuel
            } else {
                TileKind::Moderator
            };
            state.grid.set(col, row, kind);
        }
    }
}

fn seed_neutrons(state: &mut ReactorState) {
    let center = Vec2::new(state.grid.width() / 2.0, state.grid.height() / 2.0);
    for (dx, dy, vel) in [
        (-20.0, 0.0, Vec2::new(3.0, 1.0)),
        (20.0, 0.0, Vec2::new(-2.0, 2.0)),
        (0.0, -15.0, Vec2::new(1.5, -2.5)),
        (0.0, 15.0, Vec2::new(-1.0, 3.0)),
    ] {
        state.spawn_neutron(center + Vec2::new(dx, dy), vel);
    }
}
