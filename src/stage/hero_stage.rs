//! The hero area's lazy scene stage
//!
//! The coffee scene is only mounted when the viewport is at least the
//! configured minimum width. The layout comes from a background loader; until
//! it arrives (or if it fails) the stage shows an empty placeholder. A loaded
//! layout is kept, so narrowing and re-widening the viewport mounts again
//! without touching the disk.

use rand::rngs::StdRng;
use rand::SeedableRng;

use cafe3d_core::{CoffeeScene, FrameLoop, LoadResult, MountedScene, SceneLayout, SceneLoader};

use crate::config::SceneConfig;

const LOAD_LABEL: &str = "hero";

/// What the hero area currently shows
#[derive(Debug)]
pub enum StageState {
    /// Viewport too narrow, nothing is shown
    Hidden,
    /// Layout requested, placeholder shown
    Loading,
    /// Scene producers are live in the frame loop
    Mounted(MountedScene),
    /// Layout failed to load, placeholder stays
    Failed,
}

impl StageState {
    pub fn label(&self) -> &'static str {
        match self {
            StageState::Hidden => "hidden",
            StageState::Loading => "loading",
            StageState::Mounted(_) => "mounted",
            StageState::Failed => "unavailable",
        }
    }
}

/// Mounts and unmounts the coffee scene as the viewport changes
pub struct HeroStage {
    config: SceneConfig,
    loader: SceneLoader,
    layout: Option<SceneLayout>,
    state: StageState,
    load_in_flight: bool,
    load_failed: bool,
    rng: StdRng,
}

impl HeroStage {
    pub fn new(config: SceneConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            loader: SceneLoader::new(),
            layout: None,
            state: StageState::Hidden,
            load_in_flight: false,
            load_failed: false,
            rng,
        }
    }

    /// Create a stage whose layout is already available
    pub fn with_layout(config: SceneConfig, layout: SceneLayout) -> Self {
        let mut stage = Self::new(config);
        stage.layout = Some(layout);
        stage
    }

    pub fn state(&self) -> &StageState {
        &self.state
    }

    /// The live scene, if mounted
    pub fn scene(&self) -> Option<&MountedScene> {
        match &self.state {
            StageState::Mounted(scene) => Some(scene),
            _ => None,
        }
    }

    /// Whether the placeholder should be drawn in place of the scene
    pub fn shows_placeholder(&self) -> bool {
        matches!(self.state, StageState::Loading | StageState::Failed)
    }

    /// Whether a layout has been loaded and cached
    pub fn has_layout(&self) -> bool {
        self.layout.is_some()
    }

    pub fn is_wide_enough(&self, width: u32) -> bool {
        width >= self.config.min_viewport_width
    }

    /// React to a new viewport width (logical pixels)
    pub fn on_resize(&mut self, width: u32, frame_loop: &mut FrameLoop) {
        if self.is_wide_enough(width) {
            if matches!(self.state, StageState::Hidden) {
                self.show(frame_loop);
            }
            return;
        }

        match std::mem::replace(&mut self.state, StageState::Hidden) {
            StageState::Mounted(scene) => {
                log::info!("Viewport {}px below {}px, hiding scene", width, self.config.min_viewport_width);
                scene.unmount(frame_loop);
            }
            StageState::Loading => {
                log::debug!("Viewport narrowed while loading; layout will be cached on arrival");
            }
            StageState::Hidden | StageState::Failed => {}
        }
    }

    /// Pick up finished loads (non-blocking); call once per frame
    pub fn poll(&mut self, frame_loop: &mut FrameLoop) {
        while let Some(loaded) = self.loader.poll() {
            self.finish_load(loaded, frame_loop);
        }
    }

    /// Block until an outstanding load finishes
    ///
    /// Returns false when nothing was in flight.
    pub fn wait(&mut self, frame_loop: &mut FrameLoop) -> bool {
        if !self.load_in_flight {
            return false;
        }
        match self.loader.wait() {
            Some(loaded) => {
                self.finish_load(loaded, frame_loop);
                true
            }
            None => false,
        }
    }

    /// Unmount the scene, if any, and go back to hidden
    pub fn hide(&mut self, frame_loop: &mut FrameLoop) {
        if let StageState::Mounted(scene) = std::mem::replace(&mut self.state, StageState::Hidden) {
            scene.unmount(frame_loop);
        }
    }

    fn show(&mut self, frame_loop: &mut FrameLoop) {
        if let Some(layout) = &self.layout {
            let scene = CoffeeScene::mount(layout, frame_loop, &mut self.rng);
            self.state = StageState::Mounted(scene);
        } else if self.load_failed {
            self.state = StageState::Failed;
        } else {
            if !self.load_in_flight {
                log::info!("Loading scene layout from {}", self.config.path);
                self.loader.load_async(&self.config.path, LOAD_LABEL);
                self.load_in_flight = true;
            }
            self.state = StageState::Loading;
        }
    }

    fn finish_load(&mut self, loaded: LoadResult, frame_loop: &mut FrameLoop) {
        if loaded.label != LOAD_LABEL {
            return;
        }
        self.load_in_flight = false;

        match loaded.result {
            Ok(layout) => {
                log::info!("Loaded scene layout '{}' from {}", layout.name, loaded.path.display());
                self.layout = Some(layout);
                if matches!(self.state, StageState::Loading) {
                    self.show(frame_loop);
                }
            }
            Err(e) => {
                log::warn!("Failed to load scene layout {}: {}", loaded.path.display(), e);
                self.load_failed = true;
                if matches!(self.state, StageState::Loading) {
                    self.state = StageState::Failed;
                }
            }
        }
    }
}
