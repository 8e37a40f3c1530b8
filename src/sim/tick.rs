//! Per-tick simulation update
//!
//! Advances the neutron population by exactly one tick. Externally-driven
//! edits (tile painting, grid clears, the rod toggle) ride in [`TickInput`]
//! and are applied before any neutron moves, so they are never interleaved
//! with an in-progress pass.

use super::neutron::Neutron;
use super::state::ReactorState;
use super::tile::{EnterCtx, Spawn, TileKind};

/// Between-tick commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Flip the control-rod flag
    pub toggle_rods: bool,
    /// Reset every cell to empty (applied before `paint`)
    pub clear_grid: bool,
    /// Tile placements; coordinates must be in range
    pub paint: Vec<(u32, u32, TileKind)>,
}

/// Advance the reactor by one tick.
///
/// Only neutrons alive at tick start are stepped; fission products become
/// eligible next tick. Population edits are batched: the dead are removed
/// and the newborn appended only after the whole pass completes.
pub fn tick(state: &mut ReactorState, input: &TickInput) {
    if input.clear_grid {
        state.grid.clear();
    }
    for &(col, row, kind) in &input.paint {
        state.grid.set(col, row, kind);
    }
    if input.toggle_rods {
        state.rods_inserted = !state.rods_inserted;
    }

    let mut spawned: Vec<Spawn> = Vec::new();
    let mut escaped = 0usize;

    for n in state.neutrons.iter_mut() {
        n.pos += n.vel;

        match state.grid.cell_at(n.pos) {
            // Left the reactor: no wrap, no clamp, no interaction.
            None => {
                n.dead = true;
                escaped += 1;
            }
            Some((col, row)) => {
                let ctx = EnterCtx {
                    tuning: &state.tuning,
                    rods_inserted: state.rods_inserted,
                    bounds: state.grid.cell_bounds(col, row),
                };
                state
                    .grid
                    .get(col, row)
                    .interact(n, &ctx, &mut state.rng, &mut spawned);
            }
        }
    }

    let deaths = state.neutrons.iter().filter(|n| n.dead).count();
    state.neutrons.retain(|n| !n.dead);

    let births = spawned.len();
    for spawn in spawned {
        let id = state.next_neutron_id();
        state.neutrons.push(Neutron::new(id, spawn.pos, spawn.vel));
    }

    state.stats.births_last_tick = births;
    state.stats.deaths_last_tick = deaths;
    state.stats.total_births += births;
    state.stats.total_deaths += deaths;
    state.stats.total_escaped += escaped;

    state.time_ticks += 1;
    state.normalize_order();

    log::trace!(
        "tick {}: {} live (+{} births, -{} deaths)",
        state.time_ticks,
        state.neutrons.len(),
        births,
        deaths
    );
}
