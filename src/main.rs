//! Café hero scene
//!
//! Opens a window standing in for the site's hero section and plays the
//! coffee scene in it once the viewport is wide enough.

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use cafe3d::config::AppConfig;
use cafe3d::stage::HeroStage;
use cafe3d::systems::{RenderSystem, SimulationSystem, WindowSystem};
use cafe3d_core::FrameLoop;
use cafe3d_render::RenderError;

/// Main application state
struct App {
    /// Application configuration
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    simulation: SimulationSystem,
    frame_loop: FrameLoop,
    stage: HeroStage,
    last_state: &'static str,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let simulation = SimulationSystem::new(config.debug.frame_stats_interval);
        let stage = HeroStage::new(config.scene.clone());

        Self {
            config,
            window: None,
            render: None,
            simulation,
            frame_loop: FrameLoop::new(),
            stage,
            last_state: "",
        }
    }

    /// Let the stage react to the current viewport width
    fn sync_viewport(&mut self) {
        if let Some(window) = &self.window {
            self.stage.on_resize(window.logical_width(), &mut self.frame_loop);
        }
    }

    fn update_title(&mut self) {
        let label = self.stage.state().label();
        if label != self.last_state {
            if let Some(window) = &self.window {
                window.update_title(label);
            }
            self.last_state = label;
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match WindowSystem::create(event_loop, &self.config.window) {
            Ok(window) => window,
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
                return;
            }
        };

        let render = RenderSystem::new(
            window.window().clone(),
            self.config.rendering.clone(),
            self.config.camera.clone(),
            self.config.window.vsync,
            self.config.window.transparent,
        );
        match render {
            Ok(render) => self.render = Some(render),
            Err(e) => {
                log::error!("Failed to initialize rendering: {}", e);
                event_loop.exit();
                return;
            }
        }

        self.window = Some(window);
        self.sync_viewport();
        self.update_title();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.stage.hide(&mut self.frame_loop);
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(render) = &mut self.render {
                    render.resize(physical_size.width, physical_size.height);
                }
                self.sync_viewport();
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                self.sync_viewport();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    match key {
                        KeyCode::Escape => event_loop.exit(),
                        KeyCode::KeyF => {
                            if let Some(window) = &self.window {
                                window.toggle_fullscreen();
                            }
                        }
                        _ => {}
                    }
                }
            }
            WindowEvent::RedrawRequested => {
                self.stage.poll(&mut self.frame_loop);
                self.simulation.update(&mut self.frame_loop);
                self.update_title();

                if let Some(render) = &mut self.render {
                    match render.render_frame(&self.frame_loop, self.stage.scene()) {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => render.reconfigure(),
                        Err(RenderError::OutOfMemory) => {
                            log::error!("GPU out of memory");
                            event_loop.exit();
                        }
                        Err(e) => log::warn!("{}", e),
                    }
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Config comes first so its log level can seed the logger
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();

    if let Some(e) = config_error {
        log::warn!("Failed to load config: {}. Using defaults.", e);
    }

    log::info!("Starting {}", config.window.title);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
