//! Folding scene lights into shader uniforms
//!
//! The shaders take one ambient term, one directional light, one point light
//! and an environment hemisphere. Ambient lights are summed; when a scene has
//! more than one directional or point light only the first of each is used.

use cafe3d_core::{EnvironmentPreset, LightDescriptor, Vec3};

use crate::camera::Camera;
use crate::pipeline::RenderUniforms;

/// Light radiance in linear space, ready for the uniform buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneLighting {
    pub ambient: [f32; 3],
    /// Unit vector towards the light
    pub light_direction: [f32; 3],
    pub light_color: [f32; 3],
    pub point_position: [f32; 3],
    pub point_color: [f32; 3],
    pub point_decay: f32,
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
}

impl Default for SceneLighting {
    fn default() -> Self {
        Self {
            ambient: [0.0; 3],
            light_direction: [0.0, 1.0, 0.0],
            light_color: [0.0; 3],
            point_position: [0.0; 3],
            point_color: [0.0; 3],
            point_decay: 2.0,
            sky_color: [0.0; 3],
            ground_color: [0.0; 3],
        }
    }
}

fn scaled(color: [f32; 3], intensity: f32) -> [f32; 3] {
    [color[0] * intensity, color[1] * intensity, color[2] * intensity]
}

impl SceneLighting {
    /// Collect lights and environment
    ///
    /// `ambient_floor` is added to the ambient term so that a scene without
    /// an ambient light is never pitch black.
    pub fn from_scene(
        lights: &[LightDescriptor],
        environment: EnvironmentPreset,
        ambient_floor: f32,
    ) -> Self {
        let mut lighting = Self {
            ambient: [ambient_floor; 3],
            ..Self::default()
        };
        let mut have_directional = false;
        let mut have_point = false;

        for light in lights {
            match *light {
                LightDescriptor::Ambient { intensity, color } => {
                    let add = scaled(color.to_linear(), intensity);
                    for (a, b) in lighting.ambient.iter_mut().zip(add) {
                        *a += b;
                    }
                }
                LightDescriptor::Directional { position, intensity, color, .. } => {
                    if have_directional {
                        log::debug!("Ignoring extra directional light");
                        continue;
                    }
                    have_directional = true;
                    let direction = if position.length_squared() > 0.0 {
                        position.normalized()
                    } else {
                        Vec3::Y
                    };
                    lighting.light_direction = direction.to_array();
                    lighting.light_color = scaled(color.to_linear(), intensity);
                }
                LightDescriptor::Point { position, intensity, color, decay } => {
                    if have_point {
                        log::debug!("Ignoring extra point light");
                        continue;
                    }
                    have_point = true;
                    lighting.point_position = position.to_array();
                    lighting.point_color = scaled(color.to_linear(), intensity);
                    lighting.point_decay = decay;
                }
            }
        }

        let hemisphere = environment.hemisphere();
        lighting.sky_color = scaled(hemisphere.sky.to_linear(), hemisphere.intensity);
        lighting.ground_color = scaled(hemisphere.ground.to_linear(), hemisphere.intensity);

        lighting
    }

    /// Pack lighting and camera state for the shaders
    pub fn uniforms(
        &self,
        camera: &Camera,
        viewport: (u32, u32),
        specular_strength: f32,
    ) -> RenderUniforms {
        let (width, height) = (viewport.0.max(1) as f32, viewport.1.max(1) as f32);
        let p = camera.position;
        let w = |v: [f32; 3], w: f32| [v[0], v[1], v[2], w];

        RenderUniforms {
            view_projection: camera.view_projection(width / height),
            camera_position: [p.x, p.y, p.z, specular_strength],
            ambient: w(self.ambient, 0.0),
            light_direction: w(self.light_direction, 0.0),
            light_color: w(self.light_color, 0.0),
            point_position: w(self.point_position, self.point_decay),
            point_color: w(self.point_color, 0.0),
            sky_color: w(self.sky_color, 0.0),
            ground_color: w(self.ground_color, 0.0),
            viewport: [width, height, 0.0, 0.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cafe3d_core::{coffee_lights, Color};

    #[test]
    fn test_coffee_lighting() {
        let lighting = SceneLighting::from_scene(&coffee_lights(), EnvironmentPreset::Studio, 0.0);
        assert!((lighting.ambient[0] - 0.6).abs() < 1e-6);
        let d = lighting.light_direction;
        let expected = 1.0 / 3.0f32.sqrt();
        assert!((d[0] - expected).abs() < 1e-5);
        assert_eq!(lighting.point_position, [-3.0, 3.0, -3.0]);
        assert!(lighting.point_color[0] > lighting.point_color[2]);
        assert!(lighting.sky_color[0] > 0.0);
    }

    #[test]
    fn test_ambient_lights_add_up() {
        let lights = [LightDescriptor::ambient(0.25), LightDescriptor::ambient(0.25)];
        let lighting = SceneLighting::from_scene(&lights, EnvironmentPreset::None, 0.1);
        assert!((lighting.ambient[1] - 0.6).abs() < 1e-6);
        assert_eq!(lighting.sky_color, [0.0; 3]);
    }

    #[test]
    fn test_first_point_light_wins() {
        let lights = [
            LightDescriptor::point(Vec3::new(1.0, 0.0, 0.0), 1.0, Color::WHITE),
            LightDescriptor::point(Vec3::new(9.0, 0.0, 0.0), 1.0, Color::WHITE),
        ];
        let lighting = SceneLighting::from_scene(&lights, EnvironmentPreset::None, 0.0);
        assert_eq!(lighting.point_position, [1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_no_lights() {
        let lighting = SceneLighting::from_scene(&[], EnvironmentPreset::None, 0.0);
        assert_eq!(lighting.light_color, [0.0; 3]);
        assert_eq!(lighting.point_color, [0.0; 3]);
    }

    #[test]
    fn test_uniforms_packing() {
        let lighting = SceneLighting::from_scene(&coffee_lights(), EnvironmentPreset::Studio, 0.0);
        let uniforms = lighting.uniforms(&Camera::default(), (800, 400), 0.5);
        assert_eq!(uniforms.viewport, [800.0, 400.0, 0.0, 0.0]);
        assert_eq!(uniforms.camera_position, [0.0, 0.0, 5.0, 0.5]);
        assert_eq!(uniforms.point_position[3], 2.0);
    }
}
