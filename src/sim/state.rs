//! Reactor state and lifecycle
//!
//! Everything the tick mutates lives here: the tile grid, the live neutron
//! collection, the rods flag, the tuning set, and the seeded RNG. One state
//! per session; `reset` returns it to the freshly-constructed condition.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::grid::Grid;
use super::neutron::Neutron;
use crate::tuning::{Tuning, TuningError};

/// Birth/death bookkeeping maintained by the tick, for HUD and experiment
/// consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Fission products added at the end of the last tick
    pub births_last_tick: usize,
    /// Neutrons removed at the end of the last tick
    pub deaths_last_tick: usize,
    pub total_births: usize,
    pub total_deaths: usize,
    /// Deaths caused by leaving the grid; also counted in `total_deaths`
    pub total_escaped: usize,
}

/// Complete simulation state (deterministic under a fixed seed)
#[derive(Debug, Clone)]
pub struct ReactorState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub grid: Grid,
    /// Live neutrons (sorted by id for determinism)
    pub neutrons: Vec<Neutron>,
    /// Control rods inserted; read by rod color and rod interactions
    pub rods_inserted: bool,
    pub tuning: Tuning,
    pub stats: Stats,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl ReactorState {
    /// Create a state with default tuning. Panics only on zero grid
    /// dimensions; default tuning always validates.
    pub fn new(cols: u32, rows: u32, seed: u64) -> Self {
        Self::with_tuning(cols, rows, seed, Tuning::default()).unwrap_or_else(|e| panic!("{e}"))
    }

    /// Create a state with the given tuning, rejecting invalid balance sets.
    pub fn with_tuning(
        cols: u32,
        rows: u32,
        seed: u64,
        tuning: Tuning,
    ) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            seed,
            grid: Grid::new(cols, rows, tuning.tile_size),
            neutrons: Vec::new(),
            rods_inserted: false,
            tuning,
            stats: Stats::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        })
    }

    /// Allocate a new neutron ID
    pub(crate) fn next_neutron_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Seed a neutron from outside the simulation (applied between ticks).
    /// Returns its id.
    pub fn spawn_neutron(&mut self, pos: Vec2, vel: Vec2) -> u32 {
        let id = self.next_neutron_id();
        self.neutrons.push(Neutron::new(id, pos, vel));
        id
    }

    pub fn set_rods_inserted(&mut self, inserted: bool) {
        self.rods_inserted = inserted;
    }

    /// Display color of the tile at a cell, honoring the rods flag.
    pub fn tile_color(&self, col: u32, row: u32) -> [u8; 3] {
        self.grid.get(col, row).color(self.rods_inserted)
    }

    /// Count of live neutrons
    pub fn population(&self) -> usize {
        self.neutrons.len()
    }

    /// Clear the grid, drop all neutrons, reseed the RNG, zero the counters.
    pub fn reset(&mut self) {
        self.grid.clear();
        self.neutrons.clear();
        self.rods_inserted = false;
        self.stats = Stats::default();
        self.time_ticks = 0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
    }

    /// Ensure neutrons are sorted by ID for deterministic iteration
    pub(crate) fn normalize_order(&mut self) {
        self.neutrons.sort_by_key(|n| n.id);
    }
}
