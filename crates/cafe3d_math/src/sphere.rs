//! UV sphere

use std::f32::consts::{PI, TAU};
use serde::{Serialize, Deserialize};

use crate::shape::{Tessellate, TriangleMesh};
use crate::Vec3;

/// A UV sphere centered at the origin
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    pub radius: f32,
    /// Segments around the Y axis
    pub width_segments: u32,
    /// Segments from pole to pole
    pub height_segments: u32,
}

impl Sphere {
    /// Create a new sphere
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self {
            radius,
            width_segments: width_segments.max(3),
            height_segments: height_segments.max(2),
        }
    }
}

impl Tessellate for Sphere {
    fn tessellate(&self) -> TriangleMesh {
        let width = self.width_segments.max(3);
        let height = self.height_segments.max(2);
        let row = width + 1;
        let mut mesh = TriangleMesh::with_capacity(
            (row * (height + 1)) as usize,
            (6 * width * (height - 1)) as usize,
        );

        for iy in 0..=height {
            let v = iy as f32 / height as f32;
            for ix in 0..=width {
                let u = ix as f32 / width as f32;
                let normal = Vec3::new(
                    -(u * TAU).cos() * (v * PI).sin(),
                    (v * PI).cos(),
                    (u * TAU).sin() * (v * PI).sin(),
                );
                mesh.push_vertex(normal * self.radius, normal.normalized());
            }
        }

        for iy in 0..height {
            for ix in 0..width {
                let a = iy * row + ix + 1;
                let b = iy * row + ix;
                let c = (iy + 1) * row + ix;
                let d = (iy + 1) * row + ix + 1;

                // The pole rows collapse to a point; skip their degenerate halves
                if iy != 0 {
                    mesh.push_triangle(a, b, d);
                }
                if iy != height - 1 {
                    mesh.push_triangle(b, c, d);
                }
            }
        }

        mesh
    }
}
