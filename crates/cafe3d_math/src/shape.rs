//! Triangle meshes and the tessellation trait
//!
//! Primitive shapes are pure geometric data - no colors, materials, or
//! rendering info. That information lives with the scene's producers.

use crate::Vec3;

/// An indexed triangle mesh in local space
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Per-vertex unit normals (same length as `positions`)
    pub normals: Vec<Vec3>,
    /// Triangle list, counter-clockwise when seen from outside
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Create an empty mesh with pre-allocated capacity
    pub fn with_capacity(vertex_capacity: usize, index_capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertex_capacity),
            normals: Vec::with_capacity(vertex_capacity),
            indices: Vec::with_capacity(index_capacity),
        }
    }

    /// Append a vertex, returning its index
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        index
    }

    /// Append one triangle
    #[inline]
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Get the number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get the number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate over triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

/// Trait for primitive shapes that can be turned into triangles
pub trait Tessellate {
    /// Build the triangle mesh for this shape
    fn tessellate(&self) -> TriangleMesh;
}
