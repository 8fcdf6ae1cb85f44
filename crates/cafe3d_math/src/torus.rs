//! Torus (or torus arc) lying in the XY plane

use std::f32::consts::TAU;
use serde::{Serialize, Deserialize};

use crate::shape::{Tessellate, TriangleMesh};
use crate::Vec3;

/// A torus centered at the origin, sweeping `arc` radians around +Z from +X
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    /// Distance from the center to the middle of the tube
    pub radius: f32,
    /// Tube radius
    pub tube: f32,
    /// Segments around the tube cross-section
    pub radial_segments: u32,
    /// Segments along the sweep
    pub tubular_segments: u32,
    /// Sweep angle in radians (TAU for a closed ring)
    pub arc: f32,
}

impl Torus {
    /// Create a closed torus
    pub fn new(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> Self {
        Self::with_arc(radius, tube, radial_segments, tubular_segments, TAU)
    }

    /// Create a torus swept over `arc` radians
    pub fn with_arc(
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
        arc: f32,
    ) -> Self {
        Self {
            radius,
            tube,
            radial_segments: radial_segments.max(3),
            tubular_segments: tubular_segments.max(1),
            arc,
        }
    }
}

impl Tessellate for Torus {
    fn tessellate(&self) -> TriangleMesh {
        let radial = self.radial_segments.max(3);
        let tubular = self.tubular_segments.max(1);
        let mut mesh = TriangleMesh::with_capacity(
            ((radial + 1) * (tubular + 1)) as usize,
            (6 * radial * tubular) as usize,
        );

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            for i in 0..=tubular {
                let u = i as f32 / tubular as f32 * self.arc;
                let ring = self.radius + self.tube * v.cos();
                let position = Vec3::new(ring * u.cos(), ring * u.sin(), self.tube * v.sin());
                let center = Vec3::new(self.radius * u.cos(), self.radius * u.sin(), 0.0);
                mesh.push_vertex(position, (position - center).normalized());
            }
        }

        let row = tubular + 1;
        for j in 1..=radial {
            for i in 1..=tubular {
                let a = row * j + i - 1;
                let b = row * (j - 1) + i - 1;
                let c = row * (j - 1) + i;
                let d = row * j + i;
                mesh.push_triangle(a, b, d);
                mesh.push_triangle(b, c, d);
            }
        }

        mesh
    }
}
