//! GPU-compatible data types
//!
//! These types match the shader layouts in `mesh.wgsl` and `points.wgsl`
//! exactly. All derive Pod and Zeroable so they can be copied into buffers
//! with bytemuck.

use bytemuck::{Pod, Zeroable};

/// A world-space mesh vertex
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in world space
    pub position: [f32; 3],
    /// Unit surface normal in world space
    pub normal: [f32; 3],
    /// Linear RGB color and surface alpha
    pub color: [f32; 4],
    /// Roughness and metalness
    pub material: [f32; 2],
}

impl Default for MeshVertex {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            normal: [0.0, 1.0, 0.0],
            color: [1.0; 4],
            material: [1.0, 0.0],
        }
    }
}

/// One camera-facing point quad
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    /// Center in world space
    pub position: [f32; 3],
    /// World size when attenuated, pixel size otherwise
    pub size: f32,
    /// Linear RGB color and opacity
    pub color: [f32; 4],
    /// 1.0 to shrink with distance, 0.0 for a fixed pixel size
    pub attenuation: f32,
    pub _padding: [f32; 3],
}

/// Vertices per point quad (two triangles)
pub const POINT_QUAD_VERTICES: u32 = 6;

/// Per-frame uniforms shared by the mesh and point pipelines
/// Layout: 208 bytes total (must match `Uniforms` in both shaders)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct RenderUniforms {
    /// Projection * view (64 bytes)
    pub view_projection: [[f32; 4]; 4],
    /// Camera position, w = specular strength
    pub camera_position: [f32; 4],
    /// Ambient radiance (rgb already scaled by intensity)
    pub ambient: [f32; 4],
    /// Direction towards the directional light
    pub light_direction: [f32; 4],
    /// Directional light radiance
    pub light_color: [f32; 4],
    /// Point light position, w = decay exponent
    pub point_position: [f32; 4],
    /// Point light radiance
    pub point_color: [f32; 4],
    /// Environment hemisphere, upper half
    pub sky_color: [f32; 4],
    /// Environment hemisphere, lower half
    pub ground_color: [f32; 4],
    /// Viewport width and height in pixels
    pub viewport: [f32; 4],
}

impl Default for RenderUniforms {
    fn default() -> Self {
        Self {
            view_projection: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
            camera_position: [0.0, 0.0, 5.0, 0.5],
            ambient: [0.3, 0.3, 0.3, 0.0],
            light_direction: [0.577, 0.577, 0.577, 0.0],
            light_color: [1.0, 1.0, 1.0, 0.0],
            point_position: [0.0; 4],
            point_color: [0.0; 4],
            sky_color: [0.0; 4],
            ground_color: [0.0; 4],
            viewport: [1.0, 1.0, 0.0, 0.0],
        }
    }
}
