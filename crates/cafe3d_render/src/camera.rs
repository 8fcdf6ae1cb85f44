//! Fixed perspective camera
//!
//! The hero scene is viewed from a single, still camera looking at the cup.

use cafe3d_core::{CameraLayout, Mat4, Vec3};
use cafe3d_math::mat4;

/// A look-at perspective camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_layout(&CameraLayout::default(), 0.1, 100.0)
    }
}

impl Camera {
    pub fn from_layout(layout: &CameraLayout, near: f32, far: f32) -> Self {
        Self {
            position: layout.position,
            target: layout.target,
            up: Vec3::Y,
            fov: layout.fov,
            near,
            far,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        mat4::look_at(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        mat4::perspective(self.fov.to_radians(), aspect.max(1e-4), self.near, self.far)
    }

    /// Projection * view
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        mat4::mul(self.projection_matrix(aspect), self.view_matrix())
    }
}
