//! Background layout loading
//!
//! The [`SceneLoader`] owns a worker thread that reads and validates layout
//! files, so the window keeps presenting frames (the placeholder) while a
//! scene is on its way. Results come back over a channel and are picked up
//! with [`poll`](SceneLoader::poll) once per frame.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use crate::scene::{SceneLayout, SceneLoadError};

/// Request to load a layout in the background
struct LoadRequest {
    path: PathBuf,
    label: String,
}

/// Result of a background load
#[derive(Debug)]
pub struct LoadResult {
    /// Label the request was submitted with
    pub label: String,
    /// Path that was read
    pub path: PathBuf,
    /// The loaded layout or error
    pub result: Result<SceneLayout, SceneLoadError>,
}

/// Background layout loader using a dedicated worker thread
///
/// # Example
/// ```ignore
/// let loader = SceneLoader::new();
/// loader.load_async("assets/scenes/coffee.ron", "hero");
///
/// // Later, once per frame:
/// if let Some(loaded) = loader.poll() {
///     match loaded.result {
///         Ok(layout) => { /* mount it */ }
///         Err(e) => { /* keep the placeholder */ }
///     }
/// }
/// ```
pub struct SceneLoader {
    sender: Sender<LoadRequest>,
    receiver: Receiver<LoadResult>,
}

impl SceneLoader {
    /// Create a loader with its worker thread
    ///
    /// The worker exits when the loader is dropped.
    pub fn new() -> Self {
        let (request_tx, request_rx) = channel::<LoadRequest>();
        let (result_tx, result_rx) = channel::<LoadResult>();

        thread::spawn(move || {
            while let Ok(request) = request_rx.recv() {
                log::debug!("Loading layout '{}' from {}", request.label, request.path.display());
                let result = SceneLayout::load(&request.path);
                let load_result = LoadResult {
                    label: request.label,
                    path: request.path,
                    result,
                };
                if result_tx.send(load_result).is_err() {
                    break;
                }
            }
        });

        Self {
            sender: request_tx,
            receiver: result_rx,
        }
    }

    /// Queue a layout file for loading
    pub fn load_async(&self, path: impl Into<PathBuf>, label: impl Into<String>) {
        let request = LoadRequest {
            path: path.into(),
            label: label.into(),
        };
        if self.sender.send(request).is_err() {
            log::warn!("Scene loader worker has exited; load request dropped");
        }
    }

    /// Take one finished load, if any (non-blocking)
    pub fn poll(&self) -> Option<LoadResult> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Take every finished load (non-blocking)
    pub fn poll_all(&self) -> Vec<LoadResult> {
        let mut results = Vec::new();
        while let Ok(result) = self.receiver.try_recv() {
            results.push(result);
        }
        results
    }

    /// Block until the next load finishes
    pub fn wait(&self) -> Option<LoadResult> {
        self.receiver.recv().ok()
    }
}

impl Default for SceneLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_returns_none_when_empty() {
        let loader = SceneLoader::new();
        assert!(loader.poll().is_none());
        assert!(loader.poll_all().is_empty());
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let loader = SceneLoader::new();
        loader.load_async("/nonexistent/path/coffee.ron", "missing");

        let loaded = loader.wait().unwrap();
        assert_eq!(loaded.label, "missing");
        assert!(matches!(loaded.result, Err(SceneLoadError::Io(_))));
    }

    #[test]
    fn test_results_arrive_in_request_order() {
        let loader = SceneLoader::new();
        loader.load_async("/nonexistent/a.ron", "a");
        loader.load_async("/nonexistent/b.ron", "b");

        let first = loader.wait().unwrap();
        let second = loader.wait().unwrap();
        assert_eq!(first.label, "a");
        assert_eq!(second.label, "b");
    }

    #[test]
    fn test_loads_a_real_layout() {
        let dir = std::env::temp_dir().join(format!("cafe3d_loader_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("coffee.ron");
        SceneLayout::coffee().save(&path).unwrap();

        let loader = SceneLoader::new();
        loader.load_async(&path, "hero");
        let loaded = loader.wait().unwrap();
        assert_eq!(loaded.result.unwrap(), SceneLayout::coffee());

        std::fs::remove_dir_all(&dir).ok();
    }
}
