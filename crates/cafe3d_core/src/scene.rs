//! Scene layout and composition
//!
//! [`SceneLayout`] is the serializable description of the hero scene, stored
//! as RON. [`CoffeeScene::mount`] turns a layout into live producers inside a
//! [`FrameLoop`] and hands back a [`MountedScene`] that remembers their keys.

use serde::{Serialize, Deserialize};
use std::path::Path;
use std::fs;
use std::io;

use cafe3d_math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bean::{coffee_beans, BeanMotion, BeanTemplate, OrbitingBean};
use crate::cup::{CupAssembly, CupTemplate};
use crate::frame_loop::{FrameLoop, ProducerKey};
use crate::lights::{coffee_lights, EnvironmentPreset, LightDescriptor};
use crate::scene_validator::{SceneValidator, ValidationError};
use crate::steam::{SteamConfig, SteamParticleField};

fn default_fov() -> f32 {
    45.0
}

/// Where the scene is viewed from
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraLayout {
    pub position: Vec3,
    #[serde(default)]
    pub target: Vec3,
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov: f32,
}

impl Default for CameraLayout {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            target: Vec3::ZERO,
            fov: default_fov(),
        }
    }
}

/// A serializable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneLayout {
    /// Scene name (for display/debugging)
    pub name: String,
    #[serde(default)]
    pub cup: CupTemplate,
    #[serde(default)]
    pub steam: SteamConfig,
    pub beans: Vec<BeanTemplate>,
    #[serde(default)]
    pub bean_motion: BeanMotion,
    pub lights: Vec<LightDescriptor>,
    #[serde(default)]
    pub environment: EnvironmentPreset,
    #[serde(default)]
    pub camera: CameraLayout,
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self::coffee()
    }
}

impl SceneLayout {
    /// The coffee hero: cup, steam, five beans, three lights and a studio backdrop
    pub fn coffee() -> Self {
        Self {
            name: "coffee".to_string(),
            cup: CupTemplate::coffee_cup(),
            steam: SteamConfig::default(),
            beans: coffee_beans(),
            bean_motion: BeanMotion::default(),
            lights: coffee_lights(),
            environment: EnvironmentPreset::Studio,
            camera: CameraLayout::default(),
        }
    }

    /// Load and validate a layout from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    /// Parse and validate a layout from RON text
    pub fn from_ron_str(contents: &str) -> Result<Self, SceneLoadError> {
        let layout: Self = ron::from_str(contents)?;
        SceneValidator::validate_or_error(&layout).map_err(SceneLoadError::Invalid)?;
        Ok(layout)
    }

    /// Save the layout to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(false)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Number of producers a mount registers
    pub fn producer_count(&self) -> usize {
        2 + self.beans.len()
    }
}

/// Error loading a scene layout
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax or bad values such as colors)
    Parse(ron::error::SpannedError),
    /// The layout parsed but failed validation
    Invalid(Vec<ValidationError>),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneLoadError::Invalid(errors) => {
                write!(f, "Invalid scene ({} problems)", errors.len())?;
                for error in errors {
                    write!(f, "; {}", error)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene layout
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}

/// Scene composition entry point
pub struct CoffeeScene;

impl CoffeeScene {
    /// Register the cup, the steam field and every bean into `frame_loop`
    ///
    /// Each producer gets its own generator derived from `rng`, so two mounts
    /// never share random state.
    pub fn mount<R: Rng + ?Sized>(
        layout: &SceneLayout,
        frame_loop: &mut FrameLoop,
        rng: &mut R,
    ) -> MountedScene {
        let cup = frame_loop.register(CupAssembly::new(layout.cup.clone(), rng));

        let steam_rng = StdRng::seed_from_u64(rng.gen());
        let steam = frame_loop.register(SteamParticleField::initialize(layout.steam, steam_rng));

        let beans = layout
            .beans
            .iter()
            .map(|bean| frame_loop.register(OrbitingBean::new(*bean, layout.bean_motion, rng)))
            .collect::<Vec<_>>();

        log::info!(
            "Mounted scene '{}': cup, {} steam particles, {} beans",
            layout.name,
            layout.steam.count,
            beans.len()
        );

        MountedScene {
            name: layout.name.clone(),
            cup,
            steam,
            beans,
            lights: layout.lights.clone(),
            environment: layout.environment,
            camera: layout.camera,
        }
    }
}

/// A scene whose producers are live in a frame loop
#[derive(Debug)]
pub struct MountedScene {
    name: String,
    cup: ProducerKey,
    steam: ProducerKey,
    beans: Vec<ProducerKey>,
    lights: Vec<LightDescriptor>,
    environment: EnvironmentPreset,
    camera: CameraLayout,
}

impl MountedScene {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cup_key(&self) -> ProducerKey {
        self.cup
    }

    pub fn steam_key(&self) -> ProducerKey {
        self.steam
    }

    pub fn bean_keys(&self) -> &[ProducerKey] {
        &self.beans
    }

    /// Every key this scene registered
    pub fn producer_keys(&self) -> impl Iterator<Item = ProducerKey> + '_ {
        [self.cup, self.steam].into_iter().chain(self.beans.iter().copied())
    }

    pub fn lights(&self) -> &[LightDescriptor] {
        &self.lights
    }

    pub fn environment(&self) -> EnvironmentPreset {
        self.environment
    }

    pub fn camera(&self) -> &CameraLayout {
        &self.camera
    }

    /// Whether every producer of this scene is still registered in `frame_loop`
    pub fn is_mounted_in(&self, frame_loop: &FrameLoop) -> bool {
        self.producer_keys().all(|key| frame_loop.contains(key))
    }

    /// Unregister every producer, releasing their buffers
    pub fn unmount(self, frame_loop: &mut FrameLoop) {
        let removed = self
            .producer_keys()
            .filter_map(|key| frame_loop.unregister(key))
            .count();
        log::info!("Unmounted scene '{}' ({} producers)", self.name, removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coffee_layout_is_valid() {
        let layout = SceneLayout::coffee();
        assert!(SceneValidator::validate(&layout).is_empty());
        assert_eq!(layout.beans.len(), 5);
        assert_eq!(layout.producer_count(), 7);
    }

    #[test]
    fn test_ron_round_trip() {
        let layout = SceneLayout::coffee();
        let text = ron::ser::to_string_pretty(&layout, ron::ser::PrettyConfig::new()).unwrap();
        let parsed = SceneLayout::from_ron_str(&text).unwrap();
        assert_eq!(parsed, layout);
    }

    #[test]
    fn test_minimal_layout_uses_defaults() {
        let layout = SceneLayout::from_ron_str(
            r#"(
                name: "minimal",
                beans: [(position: (x: 1.0, y: 0.0, z: 0.0))],
                lights: [Ambient(intensity: 1.0)],
            )"#,
        )
        .unwrap();
        assert_eq!(layout.steam.count, 50);
        assert_eq!(layout.cup.parts.len(), 5);
        assert_eq!(layout.camera.fov, 45.0);
        assert_eq!(layout.environment, EnvironmentPreset::Studio);
    }

    #[test]
    fn test_invalid_layout_is_rejected() {
        let result = SceneLayout::from_ron_str(
            r#"(name: "bad", steam: (count: 0), beans: [], lights: [])"#,
        );
        match result {
            Err(SceneLoadError::Invalid(errors)) => {
                assert!(errors.contains(&ValidationError::ZeroParticles));
            }
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_ron_values_are_rejected() {
        for body in ["lateral_bound: inf", "rise_min: NaN", "ceiling: inf"] {
            let source = format!(r#"(name: "edge", beans: [], lights: [], steam: ({}))"#, body);
            match SceneLayout::from_ron_str(&source) {
                Err(SceneLoadError::Invalid(errors)) => {
                    assert!(
                        errors.iter().any(|e| matches!(e, ValidationError::NonFinite { .. })),
                        "{}: {:?}",
                        body,
                        errors
                    );
                }
                other => panic!("{}: expected Invalid, got {:?}", body, other),
            }
        }
    }

    #[test]
    fn test_degenerate_bean_shape_in_ron_is_rejected() {
        let result = SceneLayout::from_ron_str(
            r#"(name: "edge", beans: [], lights: [], bean_motion: (shape: (type: "Sphere", radius: 0.0)))"#,
        );
        assert!(matches!(result, Err(SceneLoadError::Invalid(_))));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            SceneLayout::from_ron_str("(name: "),
            Err(SceneLoadError::Parse(_))
        ));
    }

    #[test]
    fn test_mount_registers_every_producer() {
        let mut frame_loop = FrameLoop::new();
        let mut rng = StdRng::seed_from_u64(1);
        let scene = CoffeeScene::mount(&SceneLayout::coffee(), &mut frame_loop, &mut rng);
        assert_eq!(frame_loop.len(), 7);
        assert_eq!(scene.bean_keys().len(), 5);
        assert!(scene.is_mounted_in(&frame_loop));
        assert_eq!(scene.lights().len(), 3);

        scene.unmount(&mut frame_loop);
        assert!(frame_loop.is_empty());
    }
}
