//! Window management system
//!
//! Handles window creation, fullscreen toggle, and title updates.

use std::sync::Arc;
use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Manages the hero window
pub struct WindowSystem {
    window: Arc<Window>,
    base_title: String,
}

impl WindowSystem {
    /// Create window from config
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, WindowError> {
        let mut attrs = Window::default_attributes()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ))
            .with_transparent(config.transparent);

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| WindowError::CreationFailed(e.to_string()))?,
        );

        Ok(Self {
            window,
            base_title: config.title.clone(),
        })
    }

    /// Get window reference (for RenderContext creation)
    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Width of the viewport in logical pixels
    pub fn logical_width(&self) -> u32 {
        let size = self.window.inner_size();
        logical_width(size.width, self.window.scale_factor())
    }

    /// Toggle fullscreen mode
    pub fn toggle_fullscreen(&self) {
        let new_fullscreen = if self.window.fullscreen().is_some() {
            None
        } else {
            Some(Fullscreen::Borderless(None))
        };
        self.window.set_fullscreen(new_fullscreen);
    }

    /// Show the stage state in the title
    pub fn update_title(&self, state: &str) {
        self.window.set_title(&format_title(&self.base_title, state));
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Physical width to logical pixels
pub fn logical_width(physical_width: u32, scale_factor: f64) -> u32 {
    if scale_factor > 0.0 {
        (physical_width as f64 / scale_factor).round() as u32
    } else {
        physical_width
    }
}

fn format_title(base: &str, state: &str) -> String {
    format!("{} [{}]", base, state)
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_formatting() {
        assert_eq!(format_title("Café", "loading"), "Café [loading]");
    }

    #[test]
    fn test_logical_width() {
        assert_eq!(logical_width(2048, 2.0), 1024);
        assert_eq!(logical_width(1500, 1.5), 1000);
        assert_eq!(logical_width(1280, 0.0), 1280);
    }

    #[test]
    fn test_window_error_display() {
        let e = WindowError::CreationFailed("no display".to_string());
        assert_eq!(e.to_string(), "Window creation failed: no display");
    }
}
