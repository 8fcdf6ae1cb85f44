//! Colors and surface materials
//!
//! Colors are authored as sRGB hex strings (`"#f5f0e8"`) in scene files and
//! converted to linear space when handed to the renderer.

use serde::{Serialize, Deserialize};

/// An sRGB color with components in 0.0-1.0
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// White
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a color from sRGB components in 0.0-1.0
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit sRGB components
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse a `#rrggbb` or `#rgb` hex string
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let digits = hex
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(hex.to_string()))?;
        if !digits.is_ascii() {
            return Err(ColorParseError::InvalidDigits(hex.to_string()));
        }

        let channel = |s: &str| {
            u8::from_str_radix(s, 16).map_err(|_| ColorParseError::InvalidDigits(hex.to_string()))
        };

        match digits.len() {
            6 => Ok(Self::from_rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #abc is shorthand for #aabbcc
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;
                Ok(Self::from_rgb8(r * 17, g * 17, b * 17))
            }
            _ => Err(ColorParseError::InvalidLength(hex.to_string())),
        }
    }

    /// Format as a `#rrggbb` hex string
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// sRGB components as an array
    pub fn to_array(&self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    /// Linear-space components (sRGB transfer function removed)
    pub fn to_linear(&self) -> [f32; 3] {
        [srgb_to_linear(self.r), srgb_to_linear(self.g), srgb_to_linear(self.b)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Error parsing a hex color
#[derive(Debug, Clone, PartialEq)]
pub enum ColorParseError {
    /// The string does not start with '#'
    MissingHash(String),
    /// Wrong number of hex digits (expected 3 or 6)
    InvalidLength(String),
    /// Non-hex characters
    InvalidDigits(String),
}

impl std::fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorParseError::MissingHash(s) => write!(f, "Color '{}' must start with '#'", s),
            ColorParseError::InvalidLength(s) => {
                write!(f, "Color '{}' must have 3 or 6 hex digits", s)
            }
            ColorParseError::InvalidDigits(s) => write!(f, "Color '{}' has invalid hex digits", s),
        }
    }
}

impl std::error::Error for ColorParseError {}

fn one() -> f32 {
    1.0
}

/// A physically-flavoured surface material
///
/// Roughness and metalness drive the specular term; transmission makes the
/// surface partly see-through (used for the coffee's surface).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Base color (sRGB)
    pub color: Color,
    /// 0.0 = mirror-like, 1.0 = fully diffuse
    #[serde(default = "one")]
    pub roughness: f32,
    /// 0.0 = dielectric, 1.0 = metal
    #[serde(default)]
    pub metalness: f32,
    /// Overall opacity
    #[serde(default = "one")]
    pub opacity: f32,
    /// Fraction of light passing through the surface
    #[serde(default)]
    pub transmission: f32,
    /// Thickness of the transmissive volume
    #[serde(default)]
    pub thickness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self::standard(Color::WHITE, 1.0, 0.0)
    }
}

impl Material {
    /// An opaque material with the given roughness and metalness
    pub fn standard(color: Color, roughness: f32, metalness: f32) -> Self {
        Self {
            color,
            roughness,
            metalness,
            opacity: 1.0,
            transmission: 0.0,
            thickness: 0.0,
        }
    }

    /// A partly transmissive material
    pub fn transmissive(color: Color, roughness: f32, transmission: f32, thickness: f32) -> Self {
        Self {
            transmission,
            thickness,
            ..Self::standard(color, roughness, 0.0)
        }
    }

    /// Alpha the surface is drawn with
    pub fn surface_alpha(&self) -> f32 {
        (self.opacity * (1.0 - self.transmission)).clamp(0.0, 1.0)
    }

    /// Whether the surface needs alpha blending
    pub fn is_translucent(&self) -> bool {
        self.surface_alpha() < 1.0
    }
}
