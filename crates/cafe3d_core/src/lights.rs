//! Static light descriptors and environment presets
//!
//! Lights do not animate; a mounted scene hands them to the renderer as-is.

use cafe3d_math::Vec3;
use serde::{Serialize, Deserialize};

use crate::material::Color;

fn default_decay() -> f32 {
    2.0
}

/// A light in the scene
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LightDescriptor {
    /// Uniform light from every direction
    Ambient {
        intensity: f32,
        #[serde(default)]
        color: Color,
    },
    /// Parallel light shining from `position` toward the origin
    Directional {
        position: Vec3,
        intensity: f32,
        #[serde(default)]
        color: Color,
        #[serde(default)]
        cast_shadow: bool,
    },
    /// Light radiating from a point with distance falloff
    Point {
        position: Vec3,
        intensity: f32,
        #[serde(default)]
        color: Color,
        #[serde(default = "default_decay")]
        decay: f32,
    },
}

impl LightDescriptor {
    /// White ambient light
    pub fn ambient(intensity: f32) -> Self {
        LightDescriptor::Ambient { intensity, color: Color::WHITE }
    }

    /// White directional light
    pub fn directional(position: Vec3, intensity: f32) -> Self {
        LightDescriptor::Directional {
            position,
            intensity,
            color: Color::WHITE,
            cast_shadow: false,
        }
    }

    /// Point light
    pub fn point(position: Vec3, intensity: f32, color: Color) -> Self {
        LightDescriptor::Point { position, intensity, color, decay: default_decay() }
    }

    /// Mark a directional light as shadow casting (no-op for other kinds)
    pub fn with_shadow(mut self) -> Self {
        if let LightDescriptor::Directional { cast_shadow, .. } = &mut self {
            *cast_shadow = true;
        }
        self
    }

    pub fn intensity(&self) -> f32 {
        match *self {
            LightDescriptor::Ambient { intensity, .. }
            | LightDescriptor::Directional { intensity, .. }
            | LightDescriptor::Point { intensity, .. } => intensity,
        }
    }

    pub fn color(&self) -> Color {
        match *self {
            LightDescriptor::Ambient { color, .. }
            | LightDescriptor::Directional { color, .. }
            | LightDescriptor::Point { color, .. } => color,
        }
    }
}

/// The lights of the coffee hero
pub fn coffee_lights() -> Vec<LightDescriptor> {
    vec![
        LightDescriptor::ambient(0.6),
        LightDescriptor::directional(Vec3::new(5.0, 5.0, 5.0), 1.0).with_shadow(),
        LightDescriptor::point(Vec3::new(-3.0, 3.0, -3.0), 0.5, Color::from_rgb8(0xff, 0xee, 0xdd)),
    ]
}

/// Image-based backdrop lighting, approximated as a sky/ground hemisphere
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnvironmentPreset {
    /// Soft, neutral photo-studio lighting
    #[default]
    Studio,
    /// No environment contribution
    None,
}

/// Hemisphere light derived from an environment preset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hemisphere {
    pub sky: Color,
    pub ground: Color,
    pub intensity: f32,
}

impl EnvironmentPreset {
    pub fn hemisphere(&self) -> Hemisphere {
        match self {
            EnvironmentPreset::Studio => Hemisphere {
                sky: Color::from_rgb8(0xf4, 0xf1, 0xec),
                ground: Color::from_rgb8(0x5a, 0x55, 0x50),
                intensity: 0.35,
            },
            EnvironmentPreset::None => Hemisphere {
                sky: Color::new(0.0, 0.0, 0.0),
                ground: Color::new(0.0, 0.0, 0.0),
                intensity: 0.0,
            },
        }
    }
}
