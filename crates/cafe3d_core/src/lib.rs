//! Core types for the cafe3d hero scene
//!
//! This crate holds everything that animates, independent of any GPU:
//!
//! - [`FrameClock`] / [`Tick`] - per-frame time readings
//! - [`FrameLoop`] / [`Producer`] - registration and fan-out of per-frame producers
//! - [`SteamParticleField`] - the rising steam point cloud
//! - [`OrbitingBean`] - a spinning, bobbing coffee bean
//! - [`CupAssembly`] - the cup, saucer and coffee with a slow sway
//! - [`FloatMotion`] - the float/bob wrapper shared by cup and beans
//! - [`SceneLayout`] - loadable/saveable scene description
//! - [`CoffeeScene`] / [`MountedScene`] - mounting a layout into a frame loop

mod transform;
mod material;
mod shapes;
mod lights;
mod clock;
mod producer;
mod frame_loop;
mod float_motion;
mod steam;
mod bean;
mod cup;
mod scene;
pub mod scene_validator;
pub mod scene_loader;

pub use transform::Transform3D;
pub use material::{Color, ColorParseError, Material};
pub use shapes::ShapeTemplate;
pub use lights::{coffee_lights, EnvironmentPreset, Hemisphere, LightDescriptor};
pub use clock::{FrameClock, Tick};
pub use producer::{DirtyFlags, DrawList, MeshDraw, PointStyle, PointsDraw, Producer};
pub use frame_loop::{FrameLoop, ProducerKey};
pub use float_motion::{map_linear, FloatMotion, FloatParams};
pub use steam::{Particle, SteamConfig, SteamParticleField};
pub use bean::{coffee_beans, BeanMotion, BeanTemplate, OrbitingBean};
pub use cup::{CupAssembly, CupPart, CupTemplate, Sway};
pub use scene::{CameraLayout, CoffeeScene, MountedScene, SceneLayout, SceneLoadError, SceneSaveError};
pub use scene_validator::{SceneValidator, ValidationError};
pub use scene_loader::{LoadResult, SceneLoader};

// Re-export commonly used math types for convenience
pub use cafe3d_math::{Mat4, Vec3};
