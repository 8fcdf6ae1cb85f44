//! Serializable shape templates
//!
//! ShapeTemplate is the serializable form of the primitives in
//! `cafe3d_math`. Each variant stores the construction parameters of one
//! primitive; the mesh is built in local space and positioned by the part's
//! transform.

use serde::{Serialize, Deserialize};
use cafe3d_math::{Cylinder, Sphere, Tessellate, Torus, TriangleMesh};
use std::f32::consts::TAU;

fn default_radial_segments() -> u32 {
    32
}

fn default_tube_segments() -> u32 {
    12
}

fn default_tubular_segments() -> u32 {
    48
}

fn default_arc() -> f32 {
    TAU
}

fn default_width_segments() -> u32 {
    32
}

fn default_height_segments() -> u32 {
    16
}

/// Serializable shape template
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeTemplate {
    /// A capped, y-centered cylinder (or truncated cone)
    Cylinder {
        radius_top: f32,
        radius_bottom: f32,
        height: f32,
        #[serde(default = "default_radial_segments")]
        radial_segments: u32,
    },
    /// A torus or torus arc in the XY plane
    Torus {
        radius: f32,
        tube: f32,
        #[serde(default = "default_tube_segments")]
        radial_segments: u32,
        #[serde(default = "default_tubular_segments")]
        tubular_segments: u32,
        #[serde(default = "default_arc")]
        arc: f32,
    },
    /// A UV sphere
    Sphere {
        radius: f32,
        #[serde(default = "default_width_segments")]
        width_segments: u32,
        #[serde(default = "default_height_segments")]
        height_segments: u32,
    },
}

impl ShapeTemplate {
    /// Create a cylinder template
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        ShapeTemplate::Cylinder { radius_top, radius_bottom, height, radial_segments }
    }

    /// Create a torus arc template
    pub fn torus_arc(
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
        arc: f32,
    ) -> Self {
        ShapeTemplate::Torus { radius, tube, radial_segments, tubular_segments, arc }
    }

    /// Create a sphere template
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        ShapeTemplate::Sphere { radius, width_segments, height_segments }
    }

    /// Build the local-space triangle mesh for this template
    pub fn create_mesh(&self) -> TriangleMesh {
        match *self {
            ShapeTemplate::Cylinder { radius_top, radius_bottom, height, radial_segments } => {
                Cylinder::new(radius_top, radius_bottom, height, radial_segments).tessellate()
            }
            ShapeTemplate::Torus { radius, tube, radial_segments, tubular_segments, arc } => {
                Torus::with_arc(radius, tube, radial_segments, tubular_segments, arc).tessellate()
            }
            ShapeTemplate::Sphere { radius, width_segments, height_segments } => {
                Sphere::new(radius, width_segments, height_segments).tessellate()
            }
        }
    }

    /// Short name of the primitive kind
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeTemplate::Cylinder { .. } => "cylinder",
            ShapeTemplate::Torus { .. } => "torus",
            ShapeTemplate::Sphere { .. } => "sphere",
        }
    }

    /// Whether every size parameter is positive and finite
    pub fn has_positive_extent(&self) -> bool {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        match *self {
            ShapeTemplate::Cylinder { radius_top, radius_bottom, height, .. } => {
                // A cone may taper to a point at one end
                radius_top >= 0.0
                    && radius_bottom >= 0.0
                    && (positive(radius_top) || positive(radius_bottom))
                    && positive(height)
            }
            ShapeTemplate::Torus { radius, tube, arc, .. } => {
                positive(radius) && positive(tube) && positive(arc)
            }
            ShapeTemplate::Sphere { radius, .. } => positive(radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_cylinder_template() {
        let mesh = ShapeTemplate::cylinder(0.8, 0.6, 1.4, 32).create_mesh();
        assert_eq!(mesh.triangle_count(), 4 * 32);
    }

    #[test]
    fn test_sphere_template() {
        let mesh = ShapeTemplate::sphere(1.0, 16, 16).create_mesh();
        assert_eq!(mesh.vertex_count(), 17 * 17);
    }

    #[test]
    fn test_torus_ron_defaults() {
        let template: ShapeTemplate =
            ron::from_str("(type: \"Torus\", radius: 0.35, tube: 0.08)").unwrap();
        match template {
            ShapeTemplate::Torus { radial_segments, tubular_segments, arc, .. } => {
                assert_eq!(radial_segments, 12);
                assert_eq!(tubular_segments, 48);
                assert_eq!(arc, TAU);
            }
            _ => panic!("Expected Torus variant"),
        }
    }

    #[test]
    fn test_half_torus_serialization() {
        let template = ShapeTemplate::torus_arc(0.35, 0.08, 16, 32, PI);
        let serialized = ron::to_string(&template).unwrap();
        let deserialized: ShapeTemplate = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized, template);
        assert_eq!(deserialized.kind(), "torus");
    }

    #[test]
    fn test_extent_checks() {
        assert!(ShapeTemplate::cylinder(0.0, 0.5, 1.0, 8).has_positive_extent());
        assert!(!ShapeTemplate::cylinder(0.5, 0.5, 0.0, 8).has_positive_extent());
        assert!(!ShapeTemplate::sphere(-1.0, 8, 8).has_positive_extent());
    }
}
