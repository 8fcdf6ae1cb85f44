//! Lit mesh pipeline
//!
//! Draws the cup and beans from world-space vertices. Opaque surfaces write
//! depth; translucent ones (the coffee's surface) are drawn afterwards
//! without depth writes so what lies behind them stays visible.

use super::types::MeshVertex;
use super::{color_target, depth_state};

/// Render pipelines for opaque and translucent meshes
pub struct MeshPipeline {
    opaque: wgpu::RenderPipeline,
    translucent: wgpu::RenderPipeline,
}

impl MeshPipeline {
    /// Create the mesh pipelines
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        uniform_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Mesh Pipeline Layout"),
            bind_group_layouts: &[uniform_layout],
            push_constant_ranges: &[],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("../shaders/mesh.wgsl").into()),
        });

        let build = |label: &str, depth_write: bool| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[Self::vertex_buffer_layout()],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &[color_target(surface_format)],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: wgpu::FrontFace::Ccw,
                    // Open shapes (the handle arc, the cup's inside) are seen from both sides
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: wgpu::PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: depth_state(depth_write),
                multisample: wgpu::MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                multiview: None,
                cache: None,
            })
        };

        Self {
            opaque: build("Opaque Mesh Pipeline", true),
            translucent: build("Translucent Mesh Pipeline", false),
        }
    }

    /// Vertex buffer layout for [`MeshVertex`]
    pub fn vertex_buffer_layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // position: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 0,
                    shader_location: 0,
                },
                // normal: vec3<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x3,
                    offset: 12,
                    shader_location: 1,
                },
                // color: vec4<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x4,
                    offset: 24,
                    shader_location: 2,
                },
                // material: vec2<f32>
                wgpu::VertexAttribute {
                    format: wgpu::VertexFormat::Float32x2,
                    offset: 40,
                    shader_location: 3,
                },
            ],
        }
    }

    /// Record mesh draws into an open render pass
    ///
    /// Indices `0..opaque_count` are drawn with depth writes, the rest without.
    pub fn draw(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        uniforms: &wgpu::BindGroup,
        vertex_buffer: &wgpu::Buffer,
        index_buffer: &wgpu::Buffer,
        opaque_count: u32,
        index_count: u32,
    ) {
        if index_count == 0 {
            return;
        }

        pass.set_bind_group(0, uniforms, &[]);
        pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);

        if opaque_count > 0 {
            pass.set_pipeline(&self.opaque);
            pass.draw_indexed(0..opaque_count, 0, 0..1);
        }
        if index_count > opaque_count {
            pass.set_pipeline(&self.translucent);
            pass.draw_indexed(opaque_count..index_count, 0, 0..1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_buffer_layout_stride() {
        let layout = MeshPipeline::vertex_buffer_layout();
        assert_eq!(layout.array_stride, std::mem::size_of::<MeshVertex>() as u64);
    }

    #[test]
    fn test_attribute_offsets_match_struct() {
        let layout = MeshPipeline::vertex_buffer_layout();
        let last = layout.attributes[layout.attributes.len() - 1];
        // material is the final 2 floats
        assert_eq!(last.offset + 8, layout.array_stride);
    }
}
