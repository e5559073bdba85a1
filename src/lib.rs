//! Companion Hook - Competitive Companion listener
//!
//! This library receives problems pushed by the Competitive Companion
//! browser extension and turns each one into files on disk: a source file
//! created from a template (never overwritten) and a JSON file with the
//! sample tests (rewritten on every push).
//!
//! # Architecture
//!
//! - **Server**: listener lifecycle (bind, serve, graceful stop)
//! - **Handlers**: HTTP request handlers, the per-request error boundary
//! - **Services**: materialization, layouts and templates
//! - **Models**: the normalized problem and persisted test records
//! - **Editor / Settings**: narrow interfaces to the host environment

pub mod config;
pub mod constants;
pub mod editor;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod server;
pub mod services;
pub mod settings;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use server::{Listener, RunningListener};
pub use state::AppState;
