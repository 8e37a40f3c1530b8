//! Deterministic simulation module
//!
//! All reactor logic lives here. This module must be pure and deterministic:
//! - One tick per external call, no internal suspension
//! - Seeded RNG only
//! - Stable iteration order (by neutron ID)
//! - No rendering or platform dependencies

pub mod grid;
pub mod neutron;
pub mod state;
pub mod tick;
pub mod tile;

pub use grid::{Grid, Rect};
pub use neutron::{Neutron, fission_velocity};
pub use state::{ReactorState, Stats};
pub use tick::{TickInput, tick};
pub use tile::{EnterCtx, Spawn, TileKind};
