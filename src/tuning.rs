//! Data-driven simulation balance
//!
//! Every probability, count, and size the tile behaviors depend on lives here
//! so a driver can load alternative balance sets from JSON without touching
//! simulation code.

use serde::{Deserialize, Serialize};
use std::{error::Error, fmt};

use crate::consts;

/// Simulation-tunable constants, supplied at construction/reset time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Chance per fuel-cell entry that a neutron triggers fission
    pub fuel_absorb_chance: f32,
    /// Minimum fission product count (inclusive)
    pub fuel_min_neutrons: u32,
    /// Maximum fission product count (inclusive)
    pub fuel_max_neutrons: u32,
    /// Initial speed of fission products, units per tick
    pub fission_speed: f32,
    /// Moderator speed cap, units per tick
    pub thermal_speed: f32,
    /// Chance per shielding entry that a neutron is absorbed
    pub shielding_absorb_chance: f32,
    /// Chance that a reflector reverses the matching velocity component
    pub reflection_chance: f32,
    /// Chance that a reflector absorbs instead of reflecting
    pub reflector_absorb_chance: f32,
    /// Chance per inserted-rod entry that a neutron is absorbed
    pub control_rod_absorb_chance: f32,
    /// Edge length of one grid cell, in world units
    pub tile_size: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fuel_absorb_chance: consts::FUEL_ABSORB_CHANCE,
            fuel_min_neutrons: consts::FUEL_MIN_NEUTRONS,
            fuel_max_neutrons: consts::FUEL_MAX_NEUTRONS,
            fission_speed: consts::FISSION_SPEED,
            thermal_speed: consts::NEUTRON_THERMAL_SPEED,
            shielding_absorb_chance: consts::SHIELDING_ABSORB_CHANCE,
            reflection_chance: consts::REFLECTION_CHANCE,
            reflector_absorb_chance: consts::REFLECTOR_ABSORB_CHANCE,
            control_rod_absorb_chance: consts::CONTROL_ROD_ABSORB_CHANCE,
            tile_size: consts::TILE_SIZE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TuningError {
    ChanceOutOfRange { name: &'static str, value: f32 },
    ReflectorChancesExceedOne { sum: f32 },
    SpawnBoundsInverted { min: u32, max: u32 },
    NonPositive { name: &'static str, value: f32 },
    NegativeThermalSpeed { value: f32 },
}

impl fmt::Display for TuningError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TuningError::ChanceOutOfRange { name, value } => {
                write!(f, "{name} ({value}) must be within [0, 1]")
            }
            TuningError::ReflectorChancesExceedOne { sum } => write!(
                f,
                "reflection_chance + reflector_absorb_chance ({sum}) must not exceed 1"
            ),
            TuningError::SpawnBoundsInverted { min, max } => write!(
                f,
                "fuel_min_neutrons ({min}) must not exceed fuel_max_neutrons ({max})"
            ),
            TuningError::NonPositive { name, value } => {
                write!(f, "{name} ({value}) must be positive")
            }
            TuningError::NegativeThermalSpeed { value } => {
                write!(f, "thermal_speed ({value}) must not be negative")
            }
        }
    }
}

impl Error for TuningError {}

impl Tuning {
    /// Check every constraint the tile behaviors rely on.
    pub fn validate(&self) -> Result<(), TuningError> {
        let chances = [
            ("fuel_absorb_chance", self.fuel_absorb_chance),
            ("shielding_absorb_chance", self.shielding_absorb_chance),
            ("reflection_chance", self.reflection_chance),
            ("reflector_absorb_chance", self.reflector_absorb_chance),
            ("control_rod_absorb_chance", self.control_rod_absorb_chance),
        ];
        for (name, value) in chances {
            if !(0.0..=1.0).contains(&value) {
                return Err(TuningError::ChanceOutOfRange { name, value });
            }
        }
        let sum = self.reflection_chance + self.reflector_absorb_chance;
        if sum > 1.0 {
            return Err(TuningError::ReflectorChancesExceedOne { sum });
        }
        if self.fuel_min_neutrons > self.fuel_max_neutrons {
            return Err(TuningError::SpawnBoundsInverted {
                min: self.fuel_min_neutrons,
                max: self.fuel_max_neutrons,
            });
        }
        if !(self.tile_size > 0.0) {
            return Err(TuningError::NonPositive {
                name: "tile_size",
                value: self.tile_size,
            });
        }
        if !(self.fission_speed > 0.0) {
            return Err(TuningError::NonPositive {
                name: "fission_speed",
                value: self.fission_speed,
            });
        }
        if self.thermal_speed < 0.0 {
            return Err(TuningError::NegativeThermalSpeed {
                value: self.thermal_speed,
            });
        }
        Ok(())
    }
}
