//! Neutron entity
//!
//! A neutron is ballistic: it moves by adding its velocity to its position
//! once per tick. Everything else that happens to it is the entered tile's
//! doing.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use crate::polar_to_cartesian;
use crate::tuning::Tuning;

/// A simulated neutron
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neutron {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Marked by tile interactions or the grid boundary; the carcass is
    /// removed at the end of the tick that set it.
    pub dead: bool,
}

impl Neutron {
    pub fn new(id: u32, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            pos,
            vel,
            dead: false,
        }
    }

    /// Current speed (velocity magnitude)
    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Initial velocity for a fission product: fixed speed, uniformly random
/// direction.
pub fn fission_velocity(rng: &mut Pcg32, tuning: &Tuning) -> Vec2 {
    let theta = rng.random_range(0.0..std::f32::consts::TAU);
    polar_to_cartesian(tuning.fission_speed, theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_new_neutron_is_alive() {
        let n = Neutron::new(7, Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        assert_eq!(n.id, 7);
        assert!(!n.dead);
        assert!((n.speed() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_fission_velocity_has_configured_speed() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..32 {
            let vel = fission_velocity(&mut rng, &tuning);
            assert!((vel.length() - tuning.fission_speed).abs() < 1e-3);
        }
    }

    #[test]
    fn test_fission_velocity_varies_direction() {
        let tuning = Tuning::default();
        let mut rng = Pcg32::seed_from_u64(42);
        let a = fission_velocity(&mut rng, &tuning);
        let b = fission_velocity(&mut rng, &tuning);
        assert!(a.angle_to(b).abs() > 1e-6);
    }
}
