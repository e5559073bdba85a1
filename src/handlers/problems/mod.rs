//! Problem ingestion handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{routing::post, Router};

use crate::state::AppState;

/// Problem routes. The request path is ignored; only the method matters.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::ingest_problem))
        .route("/{*path}", post(handler::ingest_problem))
}
