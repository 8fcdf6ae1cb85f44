//! Coffee cup assembly
//!
//! A static hierarchy of primitives (body, inner wall, coffee, handle and
//! saucer) placed relative to one group origin. The only animation is a slow
//! yaw oscillation of the whole group, plus the float wrapper above it.

use std::f32::consts::{FRAC_PI_2, PI};

use cafe3d_math::{mat4, Mat4, Vec3};
use rand::Rng;
use serde::{Serialize, Deserialize};

use crate::clock::Tick;
use crate::float_motion::{FloatMotion, FloatParams};
use crate::material::{Color, Material};
use crate::producer::{DirtyFlags, DrawList, MeshDraw, Producer};
use crate::shapes::ShapeTemplate;
use crate::transform::Transform3D;

/// One primitive of the cup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CupPart {
    pub name: String,
    pub shape: ShapeTemplate,
    /// Placement relative to the cup's group origin
    #[serde(default)]
    pub transform: Transform3D,
    pub material: Material,
}

impl CupPart {
    pub fn new(
        name: impl Into<String>,
        shape: ShapeTemplate,
        transform: Transform3D,
        material: Material,
    ) -> Self {
        Self {
            name: name.into(),
            shape,
            transform,
            material,
        }
    }
}

/// Yaw oscillation: `sin(t * frequency) * amplitude`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sway {
    pub frequency: f32,
    pub amplitude: f32,
}

impl Default for Sway {
    fn default() -> Self {
        Self {
            frequency: 0.3,
            amplitude: 0.1,
        }
    }
}

impl Sway {
    pub fn yaw_at(&self, elapsed: f32) -> f32 {
        (elapsed * self.frequency).sin() * self.amplitude
    }
}

/// Serializable description of the cup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CupTemplate {
    pub origin: Vec3,
    #[serde(default)]
    pub sway: Sway,
    pub float: FloatParams,
    pub parts: Vec<CupPart>,
}

impl Default for CupTemplate {
    fn default() -> Self {
        Self::coffee_cup()
    }
}

impl CupTemplate {
    /// The ceramic cup of coffee on its saucer
    pub fn coffee_cup() -> Self {
        let ceramic = Material::standard(Color::from_rgb8(0xf5, 0xf0, 0xe8), 0.3, 0.1);
        let inner = Material::standard(Color::from_rgb8(0x3d, 0x28, 0x17), 0.8, 0.0);
        let coffee = Material::transmissive(Color::from_rgb8(0x2a, 0x18, 0x10), 0.1, 0.3, 0.5);

        let at_y = |y: f32| Transform3D::from_position(Vec3::new(0.0, y, 0.0));

        Self {
            origin: Vec3::new(0.0, -0.5, 0.0),
            sway: Sway::default(),
            float: FloatParams::new(2.0, 0.3, 0.5),
            parts: vec![
                CupPart::new("body", ShapeTemplate::cylinder(0.8, 0.6, 1.4, 32), Transform3D::identity(), ceramic),
                CupPart::new("inner", ShapeTemplate::cylinder(0.75, 0.55, 1.3, 32), at_y(0.1), inner),
                CupPart::new("coffee", ShapeTemplate::cylinder(0.72, 0.72, 0.1, 32), at_y(0.4), coffee),
                CupPart::new(
                    "handle",
                    ShapeTemplate::torus_arc(0.35, 0.08, 16, 32, PI),
                    Transform3D::from_position_rotation(
                        Vec3::new(1.0, 0.0, 0.0),
                        Vec3::new(0.0, 0.0, FRAC_PI_2),
                    ),
                    ceramic,
                ),
                CupPart::new("saucer", ShapeTemplate::cylinder(1.2, 1.3, 0.12, 32), at_y(-0.85), ceramic),
            ],
        }
    }

    pub fn part(&self, name: &str) -> Option<&CupPart> {
        self.parts.iter().find(|p| p.name == name)
    }
}

/// The animated cup
#[derive(Debug, Clone)]
pub struct CupAssembly {
    template: CupTemplate,
    float: FloatMotion,
    elapsed: f32,
}

impl CupAssembly {
    /// Create the cup; the float wrapper's time offset comes from `rng`
    pub fn new<R: Rng + ?Sized>(template: CupTemplate, rng: &mut R) -> Self {
        let float = FloatMotion::from_rng(template.float, rng);
        Self::with_float(template, float)
    }

    pub fn with_float(template: CupTemplate, float: FloatMotion) -> Self {
        Self {
            template,
            float,
            elapsed: 0.0,
        }
    }

    pub fn template(&self) -> &CupTemplate {
        &self.template
    }

    /// Group yaw at `elapsed` seconds
    pub fn yaw_at(&self, elapsed: f32) -> f32 {
        self.template.sway.yaw_at(elapsed)
    }

    /// Yaw as of the last advance
    pub fn yaw(&self) -> f32 {
        self.yaw_at(self.elapsed)
    }

    /// Group-to-world matrix at `elapsed` seconds
    pub fn group_matrix_at(&self, elapsed: f32) -> Mat4 {
        let group = Transform3D::from_position_rotation(
            self.template.origin,
            Vec3::new(0.0, self.yaw_at(elapsed), 0.0),
        );
        mat4::mul(self.float.matrix_at(elapsed), group.to_matrix())
    }
}

impl Producer for CupAssembly {
    fn name(&self) -> &str {
        "cup"
    }

    fn advance(&mut self, tick: &Tick) -> DirtyFlags {
        self.elapsed = tick.elapsed;
        DirtyFlags::TRANSFORM
    }

    fn emit<'a>(&'a self, list: &mut DrawList<'a>) {
        let group = self.group_matrix_at(self.elapsed);
        for part in &self.template.parts {
            list.push_mesh(MeshDraw {
                shape: part.shape,
                world: mat4::mul(group, part.transform.to_matrix()),
                material: part.material,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cup() -> CupAssembly {
        CupAssembly::with_float(CupTemplate::coffee_cup(), FloatMotion::new(FloatParams::default(), 0.0))
    }

    #[test]
    fn test_yaw_is_zero_at_start() {
        assert_eq!(cup().yaw_at(0.0), 0.0);
    }

    #[test]
    fn test_yaw_formula() {
        let c = cup();
        for t in [0.5f32, 3.0, 10.0, 123.4] {
            assert!((c.yaw_at(t) - (t * 0.3).sin() * 0.1).abs() < 1e-6);
        }
    }

    #[test]
    fn test_yaw_is_restartable() {
        let mut c = cup();
        c.advance(&Tick::at(1, 7.0));
        let yaw = c.yaw();
        c.advance(&Tick::at(2, 9.0));
        c.advance(&Tick::at(3, 7.0));
        assert_eq!(c.yaw(), yaw);
    }

    #[test]
    fn test_coffee_cup_parts() {
        let template = CupTemplate::coffee_cup();
        let names: Vec<&str> = template.parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["body", "inner", "coffee", "handle", "saucer"]);
        assert_eq!(template.part("saucer").map(|p| p.transform.position.y), Some(-0.85));
        assert!(template.part("coffee").map(|p| p.material.is_translucent()).unwrap_or(false));
    }

    #[test]
    fn test_emit_all_parts() {
        let c = cup();
        let mut list = DrawList::new();
        c.emit(&mut list);
        assert_eq!(list.meshes.len(), 5);
        assert!(list.points.is_empty());
    }

    #[test]
    fn test_group_origin_without_float() {
        let float = FloatMotion::new(FloatParams::new(1.0, 0.0, 0.0), 0.0);
        let c = CupAssembly::with_float(CupTemplate::coffee_cup(), float);
        let m = c.group_matrix_at(0.0);
        let p = mat4::transform_point(&m, Vec3::ZERO);
        assert!((p - Vec3::new(0.0, -0.5, 0.0)).length() < 1e-6);
    }
}
