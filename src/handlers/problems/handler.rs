//! Problem handler implementations

use axum::{body::Bytes, extract::State, Json};
use chrono::Local;
use tracing::Instrument;
use uuid::Uuid;

use crate::{
    error::AppResult,
    services::Materialized,
    state::AppState,
};

use super::{request::IncomingProblem, response::IngestResponse};

/// Receive one problem and write its artifacts.
///
/// This is the per-request isolation boundary: any failure is logged here,
/// once, and answered with an error response. The listener keeps serving.
pub async fn ingest_problem(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<IngestResponse>> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("ingest", %request_id);

    async move {
        match handle(&state, &body).await {
            Ok(done) => {
                if state.config().server.one_shot {
                    tracing::info!("One-shot mode: stopping listener after this request");
                    state.request_shutdown();
                }
                Ok(Json(done.into()))
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    details = ?e,
                    body_bytes = body.len(),
                    "Failed to handle problem"
                );
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}

async fn handle(state: &AppState, body: &[u8]) -> AppResult<Materialized> {
    let incoming = IncomingProblem::parse(body)?;
    tracing::debug!(payload = ?incoming, "Received payload");

    let problem = incoming.normalize();
    tracing::info!(
        "Received \"{}\" ({}) with {} test(s)",
        problem.title,
        problem.name,
        problem.tests.len()
    );

    let today = Local::now().date_naive();
    state
        .materializer()
        .materialize(&problem, today, state.editor())
        .await
}
