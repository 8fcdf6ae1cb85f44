//! Float/bob wrapper motion
//!
//! Adds a slow wobble and a vertical bob on top of whatever a child does.
//! The wrapper's transform is the parent of the child's own transform.

use cafe3d_math::{Mat4, Vec3};
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::transform::Transform3D;

fn one() -> f32 {
    1.0
}

fn default_floating_min() -> f32 {
    -0.1
}

fn default_floating_max() -> f32 {
    0.1
}

/// Float wrapper parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FloatParams {
    /// Animation speed multiplier
    #[serde(default = "one")]
    pub speed: f32,
    /// Scale of the wobble rotation
    #[serde(default = "one")]
    pub rotation_intensity: f32,
    /// Scale of the vertical bob
    #[serde(default = "one")]
    pub float_intensity: f32,
    /// Bob range lower end (before intensity)
    #[serde(default = "default_floating_min")]
    pub floating_min: f32,
    /// Bob range upper end (before intensity)
    #[serde(default = "default_floating_max")]
    pub floating_max: f32,
}

impl Default for FloatParams {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

impl FloatParams {
    pub fn new(speed: f32, rotation_intensity: f32, float_intensity: f32) -> Self {
        Self {
            speed,
            rotation_intensity,
            float_intensity,
            floating_min: default_floating_min(),
            floating_max: default_floating_max(),
        }
    }
}

/// Upper bound (exclusive) of the random time offset
pub const MAX_OFFSET: f32 = 10_000.0;

/// One instance of the float wrapper
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatMotion {
    pub params: FloatParams,
    /// Per-instance time offset so siblings do not move in lockstep
    pub offset: f32,
}

impl FloatMotion {
    pub fn new(params: FloatParams, offset: f32) -> Self {
        Self { params, offset }
    }

    /// Sample the time offset from `rng`
    pub fn from_rng<R: Rng + ?Sized>(params: FloatParams, rng: &mut R) -> Self {
        Self::new(params, rng.gen_range(0.0..MAX_OFFSET))
    }

    /// Wrapper transform at `elapsed` seconds
    pub fn transform_at(&self, elapsed: f32) -> Transform3D {
        let p = &self.params;
        let phase = (self.offset + elapsed) / 4.0 * p.speed;

        let rotation = Vec3::new(
            phase.cos() / 8.0 * p.rotation_intensity,
            phase.sin() / 8.0 * p.rotation_intensity,
            phase.sin() / 20.0 * p.rotation_intensity,
        );
        let bob = map_linear(phase.sin() / 10.0, -0.1, 0.1, p.floating_min, p.floating_max);

        Transform3D::from_position_rotation(Vec3::new(0.0, bob * p.float_intensity, 0.0), rotation)
    }

    pub fn matrix_at(&self, elapsed: f32) -> Mat4 {
        self.transform_at(elapsed).to_matrix()
    }
}

/// Remap `x` from `[a1, a2]` to `[b1, b2]`
pub fn map_linear(x: f32, a1: f32, a2: f32, b1: f32, b2: f32) -> f32 {
    b1 + (x - a1) * (b2 - b1) / (a2 - a1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_map_linear() {
        assert_eq!(map_linear(0.0, -0.1, 0.1, -1.0, 1.0), 0.0);
        assert!((map_linear(0.1, -0.1, 0.1, 0.0, 2.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_deterministic_for_offset_and_time() {
        let motion = FloatMotion::new(FloatParams::new(2.0, 0.3, 0.5), 123.0);
        assert_eq!(motion.transform_at(4.2), motion.transform_at(4.2));
    }

    #[test]
    fn test_formula_at_zero_phase() {
        let motion = FloatMotion::new(FloatParams::new(1.5, 0.5, 0.3), 0.0);
        let t = motion.transform_at(0.0);
        // cos(0) = 1, sin(0) = 0
        assert!((t.rotation.x - 0.5 / 8.0).abs() < 1e-6);
        assert!(t.rotation.y.abs() < 1e-6);
        assert!(t.rotation.z.abs() < 1e-6);
        assert!(t.position.y.abs() < 1e-6);
    }

    #[test]
    fn test_bob_stays_in_range() {
        let motion = FloatMotion::new(FloatParams::new(2.0, 0.3, 0.5), 7.0);
        for i in 0..200 {
            let y = motion.transform_at(i as f32 * 0.1).position.y;
            assert!(y.abs() <= 0.1 * 0.5 + 1e-6, "bob {} out of range", y);
        }
    }

    #[test]
    fn test_offset_from_rng_in_range() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let motion = FloatMotion::from_rng(FloatParams::default(), &mut rng);
            assert!((0.0..MAX_OFFSET).contains(&motion.offset));
        }
    }

    #[test]
    fn test_params_ron_defaults() {
        let params: FloatParams = ron::from_str("(speed: 1.5)").unwrap();
        assert_eq!(params.speed, 1.5);
        assert_eq!(params.rotation_intensity, 1.0);
        assert_eq!(params.floating_min, -0.1);
    }
}
