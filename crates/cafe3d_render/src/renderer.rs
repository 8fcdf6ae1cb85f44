//! Frame renderer
//!
//! Owns the pipelines, the shared uniform buffer, the depth texture and the
//! per-frame geometry buffers. Geometry buffers grow to fit the largest frame
//! seen and are reused afterwards.

use crate::context::{RenderContext, RenderError};
use crate::pipeline::{
    uniform_bind_group_layout, MeshPipeline, MeshVertex, PointInstance, PointPipeline,
    RenderUniforms, DEPTH_FORMAT,
};
use crate::renderable::SceneGeometry;

/// A GPU buffer that is recreated only when it must grow
struct GrowableBuffer {
    label: &'static str,
    usage: wgpu::BufferUsages,
    buffer: wgpu::Buffer,
    capacity: u64,
}

impl GrowableBuffer {
    const MIN_CAPACITY: u64 = 4096;

    fn new(device: &wgpu::Device, label: &'static str, usage: wgpu::BufferUsages) -> Self {
        let usage = usage | wgpu::BufferUsages::COPY_DST;
        let buffer = Self::allocate(device, label, usage, Self::MIN_CAPACITY);
        Self { label, usage, buffer, capacity: Self::MIN_CAPACITY }
    }

    fn allocate(device: &wgpu::Device, label: &str, usage: wgpu::BufferUsages, size: u64) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size,
            usage,
            mapped_at_creation: false,
        })
    }

    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, bytes: &[u8]) {
        if bytes.is_empty() {
            return;
        }
        let needed = bytes.len() as u64;
        if needed > self.capacity {
            self.capacity = needed.next_power_of_two();
            self.buffer = Self::allocate(device, self.label, self.usage, self.capacity);
            log::debug!("Grew {} to {} bytes", self.label, self.capacity);
        }
        queue.write_buffer(&self.buffer, 0, bytes);
    }
}

/// Draws [`SceneGeometry`] into the window surface
pub struct SceneRenderer {
    mesh_pipeline: MeshPipeline,
    point_pipeline: PointPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: GrowableBuffer,
    index_buffer: GrowableBuffer,
    instance_buffer: GrowableBuffer,
    depth_texture: Option<wgpu::TextureView>,
    depth_size: (u32, u32),
}

impl SceneRenderer {
    pub fn new(context: &RenderContext) -> Self {
        let device = &context.device;
        let layout = uniform_bind_group_layout(device);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Render Uniforms"),
            size: std::mem::size_of::<RenderUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let format = context.surface_format();
        let mut renderer = Self {
            mesh_pipeline: MeshPipeline::new(device, format, &layout),
            point_pipeline: PointPipeline::new(device, format, &layout),
            uniform_buffer,
            bind_group,
            vertex_buffer: GrowableBuffer::new(device, "Mesh Vertex Buffer", wgpu::BufferUsages::VERTEX),
            index_buffer: GrowableBuffer::new(device, "Mesh Index Buffer", wgpu::BufferUsages::INDEX),
            instance_buffer: GrowableBuffer::new(device, "Point Instance Buffer", wgpu::BufferUsages::VERTEX),
            depth_texture: None,
            depth_size: (0, 0),
        };
        renderer.ensure_depth_texture(device, context.config.width, context.config.height);
        renderer
    }

    /// Ensure depth texture exists and is the right size
    pub fn ensure_depth_texture(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        let width = width.max(1);
        let height = height.max(1);
        if self.depth_texture.is_none() || self.depth_size != (width, height) {
            let depth_texture = device.create_texture(&wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width,
                    height,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: DEPTH_FORMAT,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            });

            self.depth_texture = Some(depth_texture.create_view(&wgpu::TextureViewDescriptor::default()));
            self.depth_size = (width, height);
        }
    }

    /// Render one frame
    ///
    /// With `geometry` set to `None` the frame is only cleared, which is what
    /// the hero area shows while the scene is loading or hidden.
    pub fn render(
        &mut self,
        context: &RenderContext,
        geometry: Option<&SceneGeometry>,
        uniforms: &RenderUniforms,
        clear_color: wgpu::Color,
    ) -> Result<(), RenderError> {
        let device = &context.device;
        let queue = &context.queue;
        self.ensure_depth_texture(device, context.config.width, context.config.height);

        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
        if let Some(geometry) = geometry {
            self.vertex_buffer.write(device, queue, bytemuck::cast_slice::<MeshVertex, u8>(&geometry.vertices));
            self.index_buffer.write(device, queue, bytemuck::cast_slice::<u32, u8>(&geometry.indices));
            self.instance_buffer.write(device, queue, bytemuck::cast_slice::<PointInstance, u8>(&geometry.points));
        }

        let output = context.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Render Encoder"),
        });

        let depth_view = self
            .depth_texture
            .as_ref()
            .ok_or_else(|| RenderError::Other("depth texture missing".to_string()))?;

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if let Some(geometry) = geometry {
                self.mesh_pipeline.draw(
                    &mut pass,
                    &self.bind_group,
                    &self.vertex_buffer.buffer,
                    &self.index_buffer.buffer,
                    geometry.opaque_index_count,
                    geometry.index_count(),
                );
                self.point_pipeline.draw(
                    &mut pass,
                    &self.bind_group,
                    &self.instance_buffer.buffer,
                    geometry.points.len() as u32,
                );
            }
        }

        queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// Clear color for a straight-alpha RGBA background
///
/// The surface expects premultiplied color, so RGB is scaled by alpha.
pub fn premultiplied_clear(rgba: [f32; 4]) -> wgpu::Color {
    let a = rgba[3].clamp(0.0, 1.0) as f64;
    wgpu::Color {
        r: rgba[0] as f64 * a,
        g: rgba[1] as f64 * a,
        b: rgba[2] as f64 * a,
        a,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transparent_clear_is_zero() {
        let c = premultiplied_clear([0.9, 0.8, 0.7, 0.0]);
        assert_eq!((c.r, c.g, c.b, c.a), (0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_opaque_clear_keeps_color() {
        let c = premultiplied_clear([0.5, 0.25, 1.0, 1.0]);
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.25, 1.0, 1.0));
    }
}
