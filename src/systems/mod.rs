//! Application systems
//!
//! The window, the per-frame simulation and the GPU renderer, kept apart from
//! main.rs so they can be tested and reused.

mod render;
mod simulation;
mod window;

pub use render::RenderSystem;
pub use simulation::{SimulationResult, SimulationSystem};
pub use window::{logical_width, WindowError, WindowSystem};
