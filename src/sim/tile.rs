//! Material behavior table
//!
//! Each tile kind pairs a display color with an interaction applied to a
//! neutron entering a cell of that kind. Interactions are single independent
//! Bernoulli/uniform trials per neutron per entry; chain-reaction dynamics
//! emerge from these local rules rather than explicit reactor physics.
//!
//! An interaction is a pure function of (neutron state, cell bounds, tuning,
//! rods-inserted flag, random draw). Tiles carry no mutable state of their
//! own.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::grid::Rect;
use crate::tuning::Tuning;

use super::neutron::{Neutron, fission_velocity};

/// A fission product requested by a tile interaction; becomes a live neutron
/// at the start of the next tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Context for one interaction evaluation.
///
/// The rods flag is captured here once per evaluation; interactions never
/// read ambient state.
#[derive(Debug, Clone, Copy)]
pub struct EnterCtx<'a> {
    pub tuning: &'a Tuning,
    pub rods_inserted: bool,
    /// World-space bounds of the entered cell
    pub bounds: Rect,
}

/// Types of tiles within the reactor grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileKind {
    #[default]
    Empty,
    Fuel,
    Moderator,
    Shielding,
    HorizontalReflector,
    VerticalReflector,
    ControlRod,
}

impl TileKind {
    pub fn name(self) -> &'static str {
        match self {
            TileKind::Empty => "Empty Tile",
            TileKind::Fuel => "Fuel Cell",
            TileKind::Moderator => "Moderator",
            TileKind::Shielding => "Shielding",
            TileKind::HorizontalReflector | TileKind::VerticalReflector => "Reflector",
            TileKind::ControlRod => "Control Rod",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            TileKind::Empty => "Does nothing.",
            TileKind::Fuel => "Reacts with neutrons.",
            TileKind::Moderator => "Slows down neutrons.",
            TileKind::Shielding => "Absorbs neutrons.",
            TileKind::HorizontalReflector => "Reflects neutrons in the horizontal direction.",
            TileKind::VerticalReflector => "Reflects neutrons in the vertical direction.",
            TileKind::ControlRod => "Absorbs neutrons only when toggled.",
        }
    }

    /// Display color as RGB. Only the control rod varies with the rods flag.
    pub const fn color(self, rods_inserted: bool) -> [u8; 3] {
        match self {
            TileKind::Empty => [0xbb, 0xbb, 0xbb],
            TileKind::Fuel => [0x83, 0xcc, 0x14],
            TileKind::Moderator => [0xee, 0xee, 0xee],
            TileKind::Shielding => [0x88, 0x88, 0x88],
            TileKind::HorizontalReflector => [0xff, 0xbf, 0x3f],
            TileKind::VerticalReflector => [0x77, 0xcf, 0xd6],
            TileKind::ControlRod => {
                if rods_inserted {
                    [0xaa, 0x61, 0xaa]
                } else {
                    [0x3f, 0x97, 0xf4]
                }
            }
        }
    }

    /// Apply this tile's interaction to a neutron that entered it.
    ///
    /// May mark the neutron dead and may push fission products onto
    /// `spawned`. A withdrawn control rod consumes no random draw, so the
    /// rods flag affects the RNG stream.
    pub fn interact(
        self,
        n: &mut Neutron,
        ctx: &EnterCtx<'_>,
        rng: &mut Pcg32,
        spawned: &mut Vec<Spawn>,
    ) {
        let tuning = ctx.tuning;
        match self {
            TileKind::Empty => {}

            TileKind::Fuel => {
                // Randomly absorb neutrons.
                if rng.random::<f32>() < tuning.fuel_absorb_chance {
                    n.dead = true;

                    // Spawn more neutrons inside the entered cell.
                    let count =
                        rng.random_range(tuning.fuel_min_neutrons..=tuning.fuel_max_neutrons);
                    for _ in 0..count {
                        let pos = random_inside(ctx.bounds, rng);
                        let vel = fission_velocity(rng, tuning);
                        spawned.push(Spawn { pos, vel });
                    }
                }
            }

            TileKind::Moderator => {
                // Slow down neutrons, direction preserved.
                n.vel = n.vel.clamp_length_max(tuning.thermal_speed);
            }

            TileKind::Shielding => {
                if rng.random::<f32>() < tuning.shielding_absorb_chance {
                    n.dead = true;
                }
            }

            TileKind::HorizontalReflector => {
                // One draw decides reflect / absorb / pass.
                let r = rng.random::<f32>();
                if r < tuning.reflection_chance {
                    n.vel.x = -n.vel.x;
                } else if r < tuning.reflection_chance + tuning.reflector_absorb_chance {
                    n.dead = true;
                }
            }

            TileKind::VerticalReflector => {
                let r = rng.random::<f32>();
                if r < tuning.reflection_chance {
                    n.vel.y = -n.vel.y;
                } else if r < tuning.reflection_chance + tuning.reflector_absorb_chance {
                    n.dead = true;
                }
            }

            TileKind::ControlRod => {
                // Absorb only while inserted; withdrawn rods skip the draw.
                if ctx.rods_inserted && rng.random::<f32>() < tuning.control_rod_absorb_chance {
                    n.dead = true;
                }
            }
        }
    }
}

/// Uniformly random point inside a cell's bounds
fn random_inside(bounds: Rect, rng: &mut Pcg32) -> Vec2 {
    Vec2::new(
        rng.random_range(bounds.min.x..bounds.max.x),
        rng.random_range(bounds.min.y..bounds.max.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn ctx(tuning: &Tuning, rods_inserted: bool) -> EnterCtx<'_> {
        EnterCtx {
            tuning,
            rods_inserted,
            bounds: Rect {
                min: Vec2::new(32.0, 64.0),
                max: Vec2::new(64.0, 96.0),
            },
        }
    }

    fn neutron() -> Neutron {
        Neutron::new(1, Vec2::new(40.0, 70.0), Vec2::new(3.0, -4.0))
    }

    #[test]
    fn test_empty_does_nothing() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawned = Vec::new();
        let mut n = neutron();
        let before = n;
        TileKind::Empty.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
        assert_eq!(n, before);
        assert!(spawned.is_empty());
    }

    #[test]
    fn test_fuel_fission_kills_and_spawns_inside_cell() {
        let tuning = Tuning {
            fuel_absorb_chance: 1.0,
            fuel_min_neutrons: 2,
            fuel_max_neutrons: 4,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let mut spawned = Vec::new();
        let mut n = neutron();
        let c = ctx(&tuning, false);
        TileKind::Fuel.interact(&mut n, &c, &mut rng, &mut spawned);

        assert!(n.dead);
        assert!((2..=4).contains(&spawned.len()));
        for spawn in &spawned {
            assert!(c.bounds.contains(spawn.pos));
            assert!((spawn.vel.length() - tuning.fission_speed).abs() < 1e-3);
        }
    }

    #[test]
    fn test_fuel_no_fission_leaves_neutron_alone() {
        let tuning = Tuning {
            fuel_absorb_chance: 0.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(7);
        let mut spawned = Vec::new();
        let mut n = neutron();
        TileKind::Fuel.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
        assert!(!n.dead);
        assert!(spawned.is_empty());
    }

    #[test]
    fn test_moderator_clamps_speed_and_keeps_direction() {
        let tuning = Tuning {
            thermal_speed: 2.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawned = Vec::new();
        let mut n = neutron();
        let dir_before = n.vel.normalize();
        TileKind::Moderator.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);

        assert!((n.speed() - 2.0).abs() < 1e-5);
        assert!(n.vel.normalize().abs_diff_eq(dir_before, 1e-5));
    }

    #[test]
    fn test_moderator_ignores_thermal_neutrons() {
        let tuning = Tuning {
            thermal_speed: 10.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(1);
        let mut spawned = Vec::new();
        let mut n = neutron();
        let vel_before = n.vel;
        TileKind::Moderator.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
        assert_eq!(n.vel, vel_before);
    }

    #[test]
    fn test_shielding_certain_absorption() {
        let tuning = Tuning {
            shielding_absorb_chance: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawned = Vec::new();
        let mut n = neutron();
        TileKind::Shielding.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
        assert!(n.dead);
        assert!(spawned.is_empty());
    }

    #[test]
    fn test_horizontal_reflector_negates_x_only() {
        let tuning = Tuning {
            reflection_chance: 1.0,
            reflector_absorb_chance: 0.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawned = Vec::new();
        let mut n = neutron();
        TileKind::HorizontalReflector.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
        assert!(!n.dead);
        assert_eq!(n.vel, Vec2::new(-3.0, -4.0));
    }

    #[test]
    fn test_vertical_reflector_negates_y_only() {
        let tuning = Tuning {
            reflection_chance: 1.0,
            reflector_absorb_chance: 0.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawned = Vec::new();
        let mut n = neutron();
        TileKind::VerticalReflector.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
        assert!(!n.dead);
        assert_eq!(n.vel, Vec2::new(3.0, 4.0));
    }

    #[test]
    fn test_reflector_absorb_branch() {
        let tuning = Tuning {
            reflection_chance: 0.0,
            reflector_absorb_chance: 1.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawned = Vec::new();
        let mut n = neutron();
        let vel_before = n.vel;
        TileKind::HorizontalReflector.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
        assert!(n.dead);
        assert_eq!(n.vel, vel_before);
    }

    #[test]
    fn test_reflector_pass_branch() {
        let tuning = Tuning {
            reflection_chance: 0.0,
            reflector_absorb_chance: 0.0,
            ..Tuning::default()
        };
        let mut rng = Pcg32::seed_from_u64(3);
        let mut spawned = Vec::new();
        let mut n = neutron();
        let before = n;
        TileKind::VerticalReflector.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
        assert_eq!(n, before);
    }

    #[test]
    fn test_control_rod_absorbs_only_when_inserted() {
        let tuning = Tuning {
            control_rod_absorb_chance: 1.0,
            ..Tuning::default()
        };
        let mut spawned = Vec::new();

        // Withdrawn: never absorbs, whatever the draws would have been.
        for seed in 0..16 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let mut n = neutron();
            TileKind::ControlRod.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
            assert!(!n.dead);
        }

        // Inserted with certain absorption: always absorbs.
        let mut rng = Pcg32::seed_from_u64(5);
        let mut n = neutron();
        TileKind::ControlRod.interact(&mut n, &ctx(&tuning, true), &mut rng, &mut spawned);
        assert!(n.dead);
    }

    #[test]
    fn test_control_rod_color_tracks_rod_state() {
        assert_ne!(
            TileKind::ControlRod.color(true),
            TileKind::ControlRod.color(false)
        );
        // Every other kind is rod-state independent
        for kind in [
            TileKind::Empty,
            TileKind::Fuel,
            TileKind::Moderator,
            TileKind::Shielding,
            TileKind::HorizontalReflector,
            TileKind::VerticalReflector,
        ] {
            assert_eq!(kind.color(true), kind.color(false));
        }
    }

    proptest! {
        #[test]
        fn prop_moderator_never_speeds_up(vx in -50.0f32..50.0, vy in -50.0f32..50.0) {
            let tuning = Tuning::default();
            let mut rng = Pcg32::seed_from_u64(1);
            let mut spawned = Vec::new();
            let mut n = Neutron::new(0, Vec2::new(40.0, 70.0), Vec2::new(vx, vy));
            let speed_before = n.speed();
            TileKind::Moderator.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);

            prop_assert!(n.speed() <= speed_before + 1e-4);
            prop_assert!(n.speed() <= tuning.thermal_speed + 1e-4);
            if speed_before > 1e-3 {
                // Direction unchanged
                prop_assert!(n.vel.normalize().abs_diff_eq(Vec2::new(vx, vy).normalize(), 1e-3));
            }
        }

        #[test]
        fn prop_reflectors_touch_one_component(seed in 0u64..64, vx in -10.0f32..10.0, vy in -10.0f32..10.0) {
            let tuning = Tuning::default();
            let mut spawned = Vec::new();

            let mut rng = Pcg32::seed_from_u64(seed);
            let mut n = Neutron::new(0, Vec2::new(40.0, 70.0), Vec2::new(vx, vy));
            TileKind::HorizontalReflector.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
            // Whatever branch the draw took, the vertical component survives
            prop_assert_eq!(n.vel.y, vy);
            prop_assert!(n.vel.x == vx || n.vel.x == -vx);

            let mut rng = Pcg32::seed_from_u64(seed);
            let mut n = Neutron::new(0, Vec2::new(40.0, 70.0), Vec2::new(vx, vy));
            TileKind::VerticalReflector.interact(&mut n, &ctx(&tuning, false), &mut rng, &mut spawned);
            prop_assert_eq!(n.vel.x, vx);
            prop_assert!(n.vel.y == vy || n.vel.y == -vy);
        }
    }
}
