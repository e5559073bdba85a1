//! Application state management
//!
//! This module contains the shared application state that is passed
//! to all request handlers via Axum's State extractor.

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::Config;
use crate::editor::Editor;
use crate::services::Materializer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Application configuration
    config: Config,

    /// Writes problem artifacts
    materializer: Materializer,

    /// Editor collaborator
    editor: Arc<dyn Editor>,

    /// Flipped to `true` once the listener should stop
    shutdown: watch::Sender<bool>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config, editor: Arc<dyn Editor>) -> Self {
        let materializer = Materializer::new(config.materializer.clone());
        let (shutdown, _) = watch::channel(false);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                materializer,
                editor,
                shutdown,
            }),
        }
    }

    /// Get a reference to the configuration
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Get a reference to the materializer
    pub fn materializer(&self) -> &Materializer {
        &self.inner.materializer
    }

    /// Get a reference to the editor collaborator
    pub fn editor(&self) -> &dyn Editor {
        self.inner.editor.as_ref()
    }

    /// Ask the listener to stop once in-flight requests finish
    pub fn request_shutdown(&self) {
        self.inner.shutdown.send_replace(true);
    }

    /// Receiver that observes shutdown requests
    pub fn shutdown_signal(&self) -> watch::Receiver<bool> {
        self.inner.shutdown.subscribe()
    }
}
