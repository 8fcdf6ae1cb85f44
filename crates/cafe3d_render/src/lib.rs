//! Coffee scene rendering
//!
//! This crate draws the producers' [`DrawList`](cafe3d_core::DrawList) with
//! wgpu: lit meshes for the cup and beans, instanced quads for the steam.
//!
//! ## Key Components
//!
//! - [`context::RenderContext`] - WGPU device, queue, and surface management
//! - [`camera::Camera`] - Fixed look-at perspective camera
//! - [`lighting::SceneLighting`] - Scene lights folded into shader uniforms
//! - [`renderable::SceneGeometry`] - Converts a draw list to GPU buffers
//! - [`renderer::SceneRenderer`] - Records and submits a frame

pub mod context;
pub mod camera;
pub mod lighting;
pub mod pipeline;
pub mod renderable;
pub mod renderer;

pub use context::{RenderContext, RenderError};
pub use camera::Camera;
pub use lighting::SceneLighting;
pub use renderable::{MeshCache, SceneGeometry};
pub use renderer::{premultiplied_clear, SceneRenderer};
