//! Problem response DTOs

use serde::Serialize;

use crate::services::Materialized;

/// Acknowledgement sent back to the helper; clients do not depend on it
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub status: &'static str,
    pub identifier: String,
    pub source_path: String,
    pub source_created: bool,
    pub tests_path: String,
}

impl From<Materialized> for IngestResponse {
    fn from(done: Materialized) -> Self {
        Self {
            status: "ok",
            identifier: done.identifier,
            source_path: done.source.path.display().to_string(),
            source_created: done.source.created,
            tests_path: done.tests_path.display().to_string(),
        }
    }
}
