//! Renderable geometry - bridges a DrawList to GPU buffers
//!
//! Every frame the draw list is flattened into world-space vertices, indices
//! and point instances on the CPU. Tessellated primitives are cached by their
//! parameters, so only the transform work is repeated per frame.

use std::collections::HashMap;

use cafe3d_core::{DrawList, Material, MeshDraw, PointsDraw, ShapeTemplate};
use cafe3d_math::{mat4, TriangleMesh};

use crate::pipeline::{MeshVertex, PointInstance};

/// Hashable identity of a shape template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ShapeKey {
    kind: u8,
    params: [u32; 5],
}

impl From<&ShapeTemplate> for ShapeKey {
    fn from(shape: &ShapeTemplate) -> Self {
        match *shape {
            ShapeTemplate::Cylinder { radius_top, radius_bottom, height, radial_segments } => Self {
                kind: 0,
                params: [radius_top.to_bits(), radius_bottom.to_bits(), height.to_bits(), radial_segments, 0],
            },
            ShapeTemplate::Torus { radius, tube, radial_segments, tubular_segments, arc } => Self {
                kind: 1,
                params: [radius.to_bits(), tube.to_bits(), radial_segments, tubular_segments, arc.to_bits()],
            },
            ShapeTemplate::Sphere { radius, width_segments, height_segments } => Self {
                kind: 2,
                params: [radius.to_bits(), width_segments, height_segments, 0, 0],
            },
        }
    }
}

/// Cache of tessellated primitives
#[derive(Default)]
pub struct MeshCache {
    meshes: HashMap<ShapeKey, TriangleMesh>,
}

impl MeshCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the mesh for `shape`, tessellating it on first use
    pub fn get(&mut self, shape: &ShapeTemplate) -> &TriangleMesh {
        self.meshes
            .entry(ShapeKey::from(shape))
            .or_insert_with(|| shape.create_mesh())
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// GPU-ready geometry for one frame
///
/// Opaque triangles come first in the index buffer, translucent ones after,
/// so the two groups can be drawn with different depth settings.
#[derive(Default)]
pub struct SceneGeometry {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    /// Number of leading indices that belong to opaque surfaces
    pub opaque_index_count: u32,
    pub points: Vec<PointInstance>,
}

impl SceneGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a draw list
    pub fn rebuild(&mut self, list: &DrawList<'_>, cache: &mut MeshCache) {
        self.clear();

        for mesh in list.meshes.iter().filter(|m| !m.material.is_translucent()) {
            self.add_mesh(mesh, cache);
        }
        self.opaque_index_count = self.indices.len() as u32;
        for mesh in list.meshes.iter().filter(|m| m.material.is_translucent()) {
            self.add_mesh(mesh, cache);
        }

        for points in &list.points {
            self.add_points(points);
        }
    }

    /// Build from a draw list in one call
    pub fn from_draw_list(list: &DrawList<'_>, cache: &mut MeshCache) -> Self {
        let mut geometry = Self::new();
        geometry.rebuild(list, cache);
        geometry
    }

    fn add_mesh(&mut self, draw: &MeshDraw, cache: &mut MeshCache) {
        let mesh = cache.get(&draw.shape);
        let base = self.vertices.len() as u32;
        let color = vertex_color(&draw.material);
        let material = [draw.material.roughness, draw.material.metalness];

        for (p, n) in mesh.positions.iter().zip(&mesh.normals) {
            let position = mat4::transform_point(&draw.world, *p);
            let normal = mat4::transform_normal(&draw.world, *n);
            self.vertices.push(MeshVertex {
                position: position.to_array(),
                normal: normal.to_array(),
                color,
                material,
            });
        }

        self.indices.extend(mesh.indices.iter().map(|i| base + i));
    }

    fn add_points(&mut self, draw: &PointsDraw<'_>) {
        let linear = draw.style.color.to_linear();
        let color = [linear[0], linear[1], linear[2], draw.style.opacity];
        let attenuation = if draw.style.size_attenuation { 1.0 } else { 0.0 };

        self.points.extend(draw.positions.iter().map(|p| PointInstance {
            position: (draw.origin + *p).to_array(),
            size: draw.style.size,
            color,
            attenuation,
            _padding: [0.0; 3],
        }));
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
        self.opaque_index_count = 0;
        self.points.clear();
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

fn vertex_color(material: &Material) -> [f32; 4] {
    let c = material.color.to_linear();
    [c[0], c[1], c[2], material.surface_alpha()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe3d_core::{
        CoffeeScene, Color, FrameLoop, PointStyle, SceneLayout, Tick, Vec3,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mesh_draw(shape: ShapeTemplate, material: Material) -> MeshDraw {
        MeshDraw { shape, world: mat4::translation(Vec3::new(1.0, 0.0, 0.0)), material }
    }

    #[test]
    fn test_cache_reuses_meshes() {
        let mut cache = MeshCache::new();
        let sphere = ShapeTemplate::sphere(1.0, 8, 8);
        cache.get(&sphere);
        cache.get(&sphere);
        cache.get(&ShapeTemplate::sphere(2.0, 8, 8));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_mesh_is_transformed() {
        let mut cache = MeshCache::new();
        let mut list = DrawList::new();
        list.push_mesh(mesh_draw(ShapeTemplate::sphere(1.0, 8, 6), Material::default()));
        let geometry = SceneGeometry::from_draw_list(&list, &mut cache);

        assert_eq!(geometry.vertex_count(), 9 * 7);
        for v in &geometry.vertices {
            let d = Vec3::from_array(v.position) - Vec3::new(1.0, 0.0, 0.0);
            assert!((d.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_translucent_after_opaque() {
        let mut cache = MeshCache::new();
        let glass = Material::transmissive(Color::WHITE, 0.1, 0.5, 0.1);
        let mut list = DrawList::new();
        list.push_mesh(mesh_draw(ShapeTemplate::cylinder(1.0, 1.0, 1.0, 8), glass));
        list.push_mesh(mesh_draw(ShapeTemplate::cylinder(1.0, 1.0, 1.0, 8), Material::default()));
        let geometry = SceneGeometry::from_draw_list(&list, &mut cache);

        let half = geometry.index_count() / 2;
        assert_eq!(geometry.opaque_index_count, half);
        // Opaque triangles reference the first half of the vertices
        let first = geometry.indices[0] as usize;
        assert_eq!(geometry.vertices[first].color[3], 1.0);
        let last = geometry.indices[geometry.indices.len() - 1] as usize;
        assert!(geometry.vertices[last].color[3] < 1.0);
    }

    #[test]
    fn test_points_are_offset_by_origin() {
        let positions = [Vec3::new(0.1, 0.5, 0.0)];
        let mut list = DrawList::new();
        list.push_points(PointsDraw {
            origin: Vec3::new(0.0, 0.2, 0.0),
            positions: &positions,
            style: PointStyle::default(),
        });
        let geometry = SceneGeometry::from_draw_list(&list, &mut MeshCache::new());
        assert_eq!(geometry.points.len(), 1);
        assert!((geometry.points[0].position[1] - 0.7).abs() < 1e-6);
        assert_eq!(geometry.points[0].color[3], 0.4);
        assert_eq!(geometry.points[0].attenuation, 1.0);
    }

    #[test]
    fn test_coffee_scene_geometry() {
        let mut frame_loop = FrameLoop::new();
        let mut rng = StdRng::seed_from_u64(1);
        CoffeeScene::mount(&SceneLayout::coffee(), &mut frame_loop, &mut rng);
        frame_loop.tick(&Tick::at(1, 0.0));

        let mut cache = MeshCache::new();
        let geometry = SceneGeometry::from_draw_list(&frame_loop.draw_list(), &mut cache);
        assert_eq!(geometry.points.len(), 50);
        // Cup body, inner, coffee, handle, saucer and one shared bean sphere
        assert_eq!(cache.len(), 6);
        assert!(geometry.opaque_index_count < geometry.index_count());
    }
}
