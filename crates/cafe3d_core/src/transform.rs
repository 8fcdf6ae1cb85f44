//! 3D Transform (position, Euler rotation, scale)
//!
//! A Transform3D places a part or producer relative to its parent group.

use cafe3d_math::{mat4, Mat4, Vec3};
use serde::{Serialize, Deserialize};

fn default_scale() -> f32 {
    1.0
}

/// A 3D transform with position, XYZ Euler rotation (radians) and uniform scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform3D {
    /// Position relative to the parent
    #[serde(default)]
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order
    #[serde(default)]
    pub rotation: Vec3,
    /// Uniform scale factor
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create an identity transform (no translation, rotation, or scale change)
    pub const fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Create a transform with just a position
    pub const fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }

    /// Create a transform with position and rotation
    pub const fn from_position_rotation(position: Vec3, rotation: Vec3) -> Self {
        Self {
            position,
            rotation,
            scale: 1.0,
        }
    }

    /// Set uniform scale
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Local-to-parent matrix: translate * rotate * scale
    pub fn to_matrix(&self) -> Mat4 {
        mat4::from_trs(self.position, self.rotation, Vec3::ONE * self.scale)
    }

    /// Transform a point from local space to parent space
    ///
    /// Applies scale, then rotation, then translation.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        mat4::transform_point(&self.to_matrix(), p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPSILON: f32 = 0.0001;

    fn vec_approx_eq(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn test_identity_transform() {
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert!(vec_approx_eq(Transform3D::identity().transform_point(p), p));
    }

    #[test]
    fn test_translation() {
        let t = Transform3D::from_position(Vec3::new(1.0, 2.0, 3.0));
        assert!(vec_approx_eq(t.transform_point(Vec3::ZERO), Vec3::new(1.0, 2.0, 3.0)));
    }

    #[test]
    fn test_handle_placement() {
        // The cup handle: a torus arc in the XY plane, turned a quarter about Z
        // and pushed out to x = 1. Its start point (+X of the arc) ends up above.
        let t = Transform3D::from_position_rotation(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, FRAC_PI_2),
        );
        let p = t.transform_point(Vec3::new(0.35, 0.0, 0.0));
        assert!(vec_approx_eq(p, Vec3::new(1.0, 0.35, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_transform_order() {
        let t = Transform3D::from_position_rotation(
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, FRAC_PI_2),
        )
        .with_scale(2.0);
        let p = t.transform_point(Vec3::X);
        assert!(vec_approx_eq(p, Vec3::new(10.0, 2.0, 0.0)), "got {:?}", p);
    }

    #[test]
    fn test_default() {
        let t = Transform3D::default();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.scale, 1.0);
    }

    #[test]
    fn test_ron_defaults() {
        let t: Transform3D = ron::from_str("(position: (x: 0.0, y: 0.4, z: 0.0))").unwrap();
        assert_eq!(t.position, Vec3::new(0.0, 0.4, 0.0));
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, 1.0);
    }
}
