//! Die-related types and components
//!
//! This module contains the Die component, the template new dice are
//! instantiated from, and the randomized roll commands.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::FRAC_PI_2;

/// Component attached to each placed die entity
#[derive(Component, Debug, Default)]
pub struct Die;

/// How a die's visual is produced.
#[derive(Clone, Debug)]
pub enum DieVisual {
    /// Built-in cube mesh.
    Procedural {
        mesh: Handle<Mesh>,
        material: Handle<StandardMaterial>,
    },
    /// A scene loaded from the configured asset path.
    Scene(Handle<Scene>),
}

/// Resource describing what gets spawned for every placement.
#[derive(Resource, Clone, Debug)]
pub struct DieTemplate {
    pub visual: DieVisual,
    /// Radius of the die's bounding sphere. A die resting on a plane has its
    /// center this far above the plane.
    pub bounding_radius: f32,
}

impl DieTemplate {
    /// Bounding-sphere radius of a cube with the given edge length.
    pub fn cube_bounding_radius(edge: f32) -> f32 {
        edge * 3.0_f32.sqrt() * 0.5
    }
}

/// Runtime configuration for the roll engine
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct RollConfig {
    /// Whole extra spins applied on top of the drawn quarter turns.
    pub spin_multiplier: u32,
    pub duration_secs: f32,
}

impl Default for RollConfig {
    fn default() -> Self {
        Self {
            spin_multiplier: 5,
            duration_secs: 1.0,
        }
    }
}

/// Injected random source for rolls.
#[derive(Resource)]
pub struct RollRng(pub StdRng);

impl RollRng {
    /// Seeded when a seed is given, otherwise drawn from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl Default for RollRng {
    fn default() -> Self {
        Self::new(None)
    }
}

/// One roll: quarter turns about the two horizontal axes.
///
/// Turning about the vertical axis never changes the face shown on top, so it
/// is always zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RollCommand {
    pub quarter_turns_x: u32,
    pub quarter_turns_z: u32,
    pub spin_multiplier: u32,
    pub duration_secs: f32,
}

impl RollCommand {
    pub fn draw(rng: &mut impl Rng, config: &RollConfig) -> Self {
        Self {
            quarter_turns_x: rng.gen_range(1..=4),
            quarter_turns_z: rng.gen_range(1..=4),
            spin_multiplier: config.spin_multiplier,
            duration_secs: config.duration_secs,
        }
    }

    /// Euler angles (radians) for the rotate-by animation.
    pub fn angles(&self) -> Vec3 {
        Vec3::new(
            self.quarter_turns_x as f32 * self.spin_multiplier as f32 * FRAC_PI_2,
            0.0,
            self.quarter_turns_z as f32 * self.spin_multiplier as f32 * FRAC_PI_2,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_config_default() {
        let config = RollConfig::default();
        assert_eq!(config.spin_multiplier, 5);
        assert_eq!(config.duration_secs, 1.0);
    }

    #[test]
    fn test_cube_bounding_radius() {
        let r = DieTemplate::cube_bounding_radius(2.0);
        assert!((r - 3.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_drawn_quarter_turns_stay_in_range() {
        let mut rng = RollRng::new(Some(42));
        let config = RollConfig::default();
        let mut seen = [false; 5];
        for _ in 0..500 {
            let roll = RollCommand::draw(&mut rng.0, &config);
            assert!((1..=4).contains(&roll.quarter_turns_x));
            assert!((1..=4).contains(&roll.quarter_turns_z));
            seen[roll.quarter_turns_x as usize] = true;
        }
        assert!(seen[1..].iter().all(|s| *s), "every quarter-turn count should occur");
    }

    #[test]
    fn test_angles_are_right_angle_multiples() {
        let mut rng = RollRng::new(Some(7));
        let config = RollConfig::default();
        for _ in 0..200 {
            let angles = RollCommand::draw(&mut rng.0, &config).angles();
            assert_eq!(angles.y, 0.0);
            for angle in [angles.x, angles.z] {
                let quarters = angle / FRAC_PI_2;
                let rounded = quarters.round();
                assert!((quarters - rounded).abs() < 1e-4);
                assert!((5.0..=20.0).contains(&rounded));
                assert_eq!(rounded as u32 % 5, 0);
            }
        }
    }

    #[test]
    fn test_extreme_spin_multiplier_does_not_overflow() {
        let roll = RollCommand {
            quarter_turns_x: 4,
            quarter_turns_z: 3,
            spin_multiplier: u32::MAX,
            duration_secs: 1.0,
        };
        let angles = roll.angles();
        assert!(angles.x.is_finite() && angles.z.is_finite());
        assert!(angles.x > angles.z);
    }

    #[test]
    fn test_same_seed_same_rolls() {
        let config = RollConfig::default();
        let mut a = RollRng::new(Some(99));
        let mut b = RollRng::new(Some(99));
        for _ in 0..20 {
            assert_eq!(
                RollCommand::draw(&mut a.0, &config),
                RollCommand::draw(&mut b.0, &config)
            );
        }
    }
}
