//! Reactor Grid - a 2D tile-based reactor sandbox
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tile behavior table, neutron transport, tick)
//! - `tuning`: Data-driven simulation balance
//!
//! Rendering, input handling, and camera placement are external collaborators;
//! the library exposes per-cell tile colors and a per-tick entry point, nothing
//! more.

pub mod sim;
pub mod tuning;

pub use tuning::{Tuning, TuningError};

use glam::Vec2;

/// Default simulation balance constants (see [`Tuning`](tuning::Tuning))
pub mod consts {
    /// Edge length of one grid cell, in world units
    pub const TILE_SIZE: f32 = 32.0;

    /// Chance per fuel-cell entry that a neutron triggers fission
    pub const FUEL_ABSORB_CHANCE: f32 = 0.4;
    /// Fission product count bounds (inclusive)
    pub const FUEL_MIN_NEUTRONS: u32 = 2;
    pub const FUEL_MAX_NEUTRONS: u32 = 3;
    /// Initial speed of fission products, units per tick
    pub const FISSION_SPEED: f32 = 6.0;

    /// Moderator speed cap, units per tick
    pub const NEUTRON_THERMAL_SPEED: f32 = 2.5;

    /// Chance per shielding entry that a neutron is absorbed
    pub const SHIELDING_ABSORB_CHANCE: f32 = 0.6;

    /// Reflector outcome chances; their sum must stay <= 1
    pub const REFLECTION_CHANCE: f32 = 0.8;
    pub const REFLECTOR_ABSORB_CHANCE: f32 = 0.1;

    /// Chance per inserted-rod entry that a neutron is absorbed
    pub const CONTROL_ROD_ABSORB_CHANCE: f32 = 0.75;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}
