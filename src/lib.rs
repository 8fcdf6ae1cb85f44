//! Café hero scene
//!
//! Host application for the animated coffee scene: configuration, the lazy
//! hero stage and the window/simulation/render systems.

pub mod config;
pub mod stage;
pub mod systems;
