//! Orbiting coffee beans
//!
//! Each bean spins at a constant rate per frame and bobs vertically on a
//! sine of elapsed time, phase-shifted by its own x position so neighbours
//! do not move together.

use cafe3d_math::{mat4, Vec3};
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::clock::Tick;
use crate::float_motion::{FloatMotion, FloatParams};
use crate::material::{Color, Material};
use crate::producer::{DirtyFlags, DrawList, MeshDraw, Producer};
use crate::shapes::ShapeTemplate;
use crate::transform::Transform3D;

fn default_bean_scale() -> f32 {
    0.15
}

/// Placement of one bean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeanTemplate {
    pub position: Vec3,
    /// Initial XYZ Euler rotation in radians
    #[serde(default)]
    pub rotation: Vec3,
    #[serde(default = "default_bean_scale")]
    pub scale: f32,
}

impl BeanTemplate {
    pub fn new(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale: default_bean_scale(),
        }
    }
}

/// The five beans around the cup
pub fn coffee_beans() -> Vec<BeanTemplate> {
    vec![
        BeanTemplate::new(Vec3::new(-2.0, 1.0, -1.0), Vec3::new(0.5, 0.3, 0.2)),
        BeanTemplate::new(Vec3::new(2.2, 0.5, -0.5), Vec3::new(0.2, 0.8, 0.1)),
        BeanTemplate::new(Vec3::new(-1.8, -0.3, 0.8), Vec3::new(0.7, 0.1, 0.5)),
        BeanTemplate::new(Vec3::new(1.5, 1.2, 1.0), Vec3::new(0.3, 0.6, 0.4)),
        BeanTemplate::new(Vec3::new(-2.5, 0.8, 0.3), Vec3::new(0.1, 0.4, 0.7)),
    ]
}

/// Motion and look shared by every bean
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeanMotion {
    /// Rotation added per frame (radians)
    pub spin: Vec3,
    /// Height of the vertical bob
    pub bob_amplitude: f32,
    pub float: FloatParams,
    pub material: Material,
    pub shape: ShapeTemplate,
}

impl Default for BeanMotion {
    fn default() -> Self {
        Self {
            spin: Vec3::new(0.005, 0.003, 0.0),
            bob_amplitude: 0.1,
            float: FloatParams::new(1.5, 0.5, 0.3),
            material: Material::standard(Color::from_rgb8(0x2a, 0x18, 0x10), 0.6, 0.2),
            shape: ShapeTemplate::sphere(1.0, 16, 16),
        }
    }
}

/// One animated bean
#[derive(Debug, Clone)]
pub struct OrbitingBean {
    base: BeanTemplate,
    motion: BeanMotion,
    float: FloatMotion,
    phase_offset: f32,
    advances: u64,
    elapsed: f32,
}

impl OrbitingBean {
    /// Create a bean; the float wrapper's time offset comes from `rng`
    pub fn new<R: Rng + ?Sized>(base: BeanTemplate, motion: BeanMotion, rng: &mut R) -> Self {
        let float = FloatMotion::from_rng(motion.float, rng);
        Self::with_float(base, motion, float)
    }

    pub fn with_float(base: BeanTemplate, motion: BeanMotion, float: FloatMotion) -> Self {
        Self {
            base,
            motion,
            float,
            phase_offset: base.position.x,
            advances: 0,
            elapsed: 0.0,
        }
    }

    pub fn base(&self) -> &BeanTemplate {
        &self.base
    }

    pub fn phase_offset(&self) -> f32 {
        self.phase_offset
    }

    /// Number of frames this bean has been advanced
    pub fn advances(&self) -> u64 {
        self.advances
    }

    /// Current rotation: initial rotation plus one spin step per advance
    pub fn rotation(&self) -> Vec3 {
        let n = self.advances as f32;
        let initial = self.base.rotation;
        let spin = self.motion.spin;
        Vec3::new(
            initial.x + spin.x * n,
            initial.y + spin.y * n,
            initial.z + spin.z * n,
        )
    }

    /// Vertical bob at `elapsed` seconds
    pub fn vertical_offset_at(&self, elapsed: f32) -> f32 {
        (elapsed + self.phase_offset).sin() * self.motion.bob_amplitude
    }

    /// Displayed position at `elapsed` seconds (float wrapper not included)
    pub fn display_position_at(&self, elapsed: f32) -> Vec3 {
        let base = self.base.position;
        Vec3::new(base.x, base.y + self.vertical_offset_at(elapsed), base.z)
    }

    /// Displayed position as of the last advance
    pub fn display_position(&self) -> Vec3 {
        self.display_position_at(self.elapsed)
    }

    /// Local transform as of the last advance
    pub fn local_transform(&self) -> Transform3D {
        Transform3D::from_position_rotation(self.display_position(), self.rotation())
            .with_scale(self.base.scale)
    }
}

impl Producer for OrbitingBean {
    fn name(&self) -> &str {
        "bean"
    }

    fn advance(&mut self, tick: &Tick) -> DirtyFlags {
        self.advances += 1;
        self.elapsed = tick.elapsed;
        DirtyFlags::TRANSFORM
    }

    fn emit<'a>(&'a self, list: &mut DrawList<'a>) {
        let world = mat4::mul(self.float.matrix_at(self.elapsed), self.local_transform().to_matrix());
        list.push_mesh(MeshDraw {
            shape: self.motion.shape,
            world,
            material: self.motion.material,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bean(index: usize) -> OrbitingBean {
        let float = FloatMotion::new(FloatParams::default(), 0.0);
        OrbitingBean::with_float(coffee_beans()[index], BeanMotion::default(), float)
    }

    #[test]
    fn test_phase_offset_is_base_x() {
        assert_eq!(bean(1).phase_offset(), 2.2);
    }

    #[test]
    fn test_vertical_offset_formula() {
        let b = bean(0);
        let expected = (3.0f32 + -2.0).sin() * 0.1;
        assert!((b.vertical_offset_at(3.0) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_display_position_ignores_history() {
        let mut a = bean(2);
        let mut b = bean(2);
        for i in 0..100 {
            a.advance(&Tick::at(i, i as f32 * 0.01));
        }
        a.advance(&Tick::at(100, 5.0));
        b.advance(&Tick::at(1, 5.0));
        assert_eq!(a.display_position(), b.display_position());
    }

    #[test]
    fn test_rotation_after_advances() {
        let mut b = bean(3);
        for i in 0..10 {
            b.advance(&Tick::at(i, 0.0));
        }
        let r = b.rotation();
        assert!((r.x - (0.3 + 0.05)).abs() < 1e-6);
        assert!((r.y - (0.6 + 0.03)).abs() < 1e-6);
        assert_eq!(r.z, 0.4);
    }

    #[test]
    fn test_emit_one_sphere() {
        let b = bean(0);
        let mut list = DrawList::new();
        b.emit(&mut list);
        assert_eq!(list.meshes.len(), 1);
        assert_eq!(list.meshes[0].shape.kind(), "sphere");
        assert_eq!(list.meshes[0].material.roughness, 0.6);
    }

    #[test]
    fn test_default_bean_scale() {
        let t: BeanTemplate = ron::from_str("(position: (x: 1.0, y: 0.0, z: 0.0))").unwrap();
        assert_eq!(t.scale, 0.15);
        assert_eq!(t.rotation, Vec3::ZERO);
    }
}
