//! Host-side scene staging
//!
//! Decides when the hero scene is mounted into the frame loop.

mod hero_stage;

pub use hero_stage::{HeroStage, StageState};
