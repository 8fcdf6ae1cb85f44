//! Capped, possibly tapered cylinder
//!
//! Centered at the origin with its axis along Y, spanning `-height/2..height/2`.

use std::f32::consts::TAU;
use serde::{Serialize, Deserialize};

use crate::shape::{Tessellate, TriangleMesh};
use crate::Vec3;

/// A cylinder (or truncated cone) with top and bottom caps
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cylinder {
    /// Radius of the top rim
    pub radius_top: f32,
    /// Radius of the bottom rim
    pub radius_bottom: f32,
    /// Height along Y
    pub height: f32,
    /// Number of segments around the axis
    pub radial_segments: u32,
}

impl Cylinder {
    /// Create a new cylinder
    pub fn new(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self {
            radius_top,
            radius_bottom,
            height,
            radial_segments: radial_segments.max(3),
        }
    }

    fn build_side(&self, mesh: &mut TriangleMesh) {
        let segments = self.radial_segments.max(3);
        let half = self.height / 2.0;
        let slope = (self.radius_bottom - self.radius_top) / self.height;

        let first = mesh.vertex_count() as u32;
        let row = segments + 1;

        // Row 0 is the top rim, row 1 the bottom rim
        for (y, radius) in [(half, self.radius_top), (-half, self.radius_bottom)] {
            for x in 0..=segments {
                let theta = x as f32 / segments as f32 * TAU;
                let (sin, cos) = theta.sin_cos();
                mesh.push_vertex(
                    Vec3::new(radius * sin, y, radius * cos),
                    Vec3::new(sin, slope, cos).normalized(),
                );
            }
        }

        for x in 0..segments {
            let a = first + x;
            let b = first + row + x;
            let c = first + row + x + 1;
            let d = first + x + 1;
            mesh.push_triangle(a, b, d);
            mesh.push_triangle(b, c, d);
        }
    }

    fn build_cap(&self, mesh: &mut TriangleMesh, top: bool) {
        let segments = self.radial_segments.max(3);
        let (radius, sign) = if top {
            (self.radius_top, 1.0)
        } else {
            (self.radius_bottom, -1.0)
        };
        let y = self.height / 2.0 * sign;
        let normal = Vec3::new(0.0, sign, 0.0);

        let center = mesh.push_vertex(Vec3::new(0.0, y, 0.0), normal);
        let first = mesh.vertex_count() as u32;

        for x in 0..=segments {
            let theta = x as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            mesh.push_vertex(Vec3::new(radius * sin, y, radius * cos), normal);
        }

        for x in 0..segments {
            let i = first + x;
            if top {
                mesh.push_triangle(i, i + 1, center);
            } else {
                mesh.push_triangle(i + 1, i, center);
            }
        }
    }
}

impl Tessellate for Cylinder {
    fn tessellate(&self) -> TriangleMesh {
        let segments = self.radial_segments.max(3) as usize;
        let vertices = 2 * (segments + 1) + 2 * (segments + 2);
        let mut mesh = TriangleMesh::with_capacity(vertices, 12 * segments);

        self.build_side(&mut mesh);
        self.build_cap(&mut mesh, true);
        self.build_cap(&mut mesh, false);

        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn face_normal(mesh: &TriangleMesh, tri: [u32; 3]) -> Vec3 {
        let a = mesh.positions[tri[0] as usize];
        let b = mesh.positions[tri[1] as usize];
        let c = mesh.positions[tri[2] as usize];
        (b - a).cross(c - a)
    }

    #[test]
    fn test_counts() {
        let mesh = Cylinder::new(0.8, 0.6, 1.4, 32).tessellate();
        assert_eq!(mesh.vertex_count(), 2 * 33 + 2 * 34);
        assert_eq!(mesh.triangle_count(), 4 * 32);
    }

    #[test]
    fn test_extent() {
        let mesh = Cylinder::new(0.8, 0.6, 1.4, 32).tessellate();
        let max_y = mesh.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
        let min_y = mesh.positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
        assert!((max_y - 0.7).abs() < 1e-6);
        assert!((min_y + 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_normals_are_unit() {
        let mesh = Cylinder::new(0.75, 0.55, 1.3, 16).tessellate();
        for n in &mesh.normals {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_winding_faces_outward() {
        let mesh = Cylinder::new(1.2, 1.3, 0.12, 32).tessellate();
        for tri in mesh.triangles() {
            let n = face_normal(&mesh, tri);
            let centroid = (mesh.positions[tri[0] as usize]
                + mesh.positions[tri[1] as usize]
                + mesh.positions[tri[2] as usize])
                / 3.0;
            assert!(n.dot(centroid) > 0.0, "inward triangle {:?}", tri);
        }
    }

    #[test]
    fn test_segments_clamped() {
        let c = Cylinder::new(1.0, 1.0, 1.0, 1);
        assert_eq!(c.radial_segments, 3);
    }
}
