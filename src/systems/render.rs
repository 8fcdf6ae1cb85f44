//! GPU rendering system
//!
//! Manages GPU rendering including:
//! - Render context and surface
//! - Mesh and point pipelines
//! - Per-frame geometry gathering from the frame loop

use std::sync::Arc;
use winit::window::Window;
use cafe3d_core::{FrameLoop, MountedScene};
use cafe3d_render::{
    premultiplied_clear, Camera, MeshCache, RenderContext, RenderError, SceneGeometry,
    SceneLighting, SceneRenderer,
};
use cafe3d_render::pipeline::RenderUniforms;
use crate::config::{CameraConfig, RenderingConfig};

/// Manages GPU rendering
pub struct RenderSystem {
    context: RenderContext,
    renderer: SceneRenderer,
    cache: MeshCache,
    geometry: SceneGeometry,
    render_config: RenderingConfig,
    camera_config: CameraConfig,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(
        window: Arc<Window>,
        render_config: RenderingConfig,
        camera_config: CameraConfig,
        vsync: bool,
        transparent: bool,
    ) -> Result<Self, RenderError> {
        let context = pollster::block_on(RenderContext::new(window, vsync, transparent))?;
        let renderer = SceneRenderer::new(&context);

        Ok(Self {
            context,
            renderer,
            cache: MeshCache::new(),
            geometry: SceneGeometry::new(),
            render_config,
            camera_config,
        })
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        self.renderer
            .ensure_depth_texture(&self.context.device, width, height);
    }

    /// Reconfigure the surface after it was lost
    pub fn reconfigure(&mut self) {
        self.context.reconfigure();
    }

    /// Render a single frame
    ///
    /// Without a mounted scene only the background is cleared, which doubles
    /// as the loading placeholder.
    pub fn render_frame(
        &mut self,
        frame_loop: &FrameLoop,
        scene: Option<&MountedScene>,
    ) -> Result<(), RenderError> {
        let clear = premultiplied_clear(self.render_config.background_color);

        let Some(scene) = scene else {
            return self
                .renderer
                .render(&self.context, None, &RenderUniforms::default(), clear);
        };

        self.geometry.rebuild(&frame_loop.draw_list(), &mut self.cache);

        let camera = Camera::from_layout(scene.camera(), self.camera_config.near, self.camera_config.far);
        let lighting = SceneLighting::from_scene(
            scene.lights(),
            scene.environment(),
            self.render_config.ambient_floor,
        );
        let uniforms = lighting.uniforms(&camera, self.size(), self.render_config.specular_strength);

        self.renderer
            .render(&self.context, Some(&self.geometry), &uniforms, clear)
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.config.width, self.context.config.height)
    }

    /// Geometry drawn in the last frame
    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }
}
