//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod problems;

use axum::Router;

use crate::state::AppState;

/// Create all routes
pub fn routes() -> Router<AppState> {
    Router::new().merge(problems::routes())
}
