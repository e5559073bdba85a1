//! Problem materialization
//!
//! Turns a normalized [`Problem`] into files: a source file created from the
//! template at most once, and a test file rewritten on every request.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::{
    config::MaterializerConfig,
    constants::{DEFAULT_TEMPLATE, FALLBACK_IDENTIFIER},
    editor::Editor,
    error::{AppError, AppResult},
    models::{Problem, SampleTest, TestRecord},
    utils::slugify,
};

use super::layout::{self, OutputDirs};
use super::template;

/// Result of [`Materializer::ensure_source`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    pub path: PathBuf,
    /// False when the file already existed and was left untouched
    pub created: bool,
}

/// Everything written for one request
#[derive(Debug, Clone)]
pub struct Materialized {
    pub identifier: String,
    pub source: SourceOutcome,
    pub tests_path: PathBuf,
}

/// Writes problem artifacts according to the configured layout
#[derive(Debug, Clone)]
pub struct Materializer {
    config: MaterializerConfig,
}

impl Materializer {
    /// Create a new materializer
    pub fn new(config: MaterializerConfig) -> Self {
        Self { config }
    }

    /// Filesystem-safe identifier for `problem`, never empty
    pub fn identifier(&self, problem: &Problem) -> String {
        let slug = slugify(Some(problem.identifier_source(self.config.use_title_as_filename)));
        if slug.is_empty() {
            FALLBACK_IDENTIFIER.to_string()
        } else {
            slug
        }
    }

    /// Source and test directories for a request handled on `today`
    pub fn resolve_output_dirs(
        &self,
        today: NaiveDate,
        project_folders: &[PathBuf],
    ) -> AppResult<OutputDirs> {
        layout::resolve_output_dirs(&self.config, today, project_folders)
    }

    /// Create the source file unless it already exists.
    ///
    /// An existing file is never overwritten, whatever the payload says. The
    /// file is opened with `create_new`, so of two concurrent requests for
    /// the same identifier only the first one writes.
    pub async fn ensure_source(
        &self,
        identifier: &str,
        problem: &Problem,
        source_dir: &Path,
    ) -> AppResult<SourceOutcome> {
        let path = source_dir.join(format!("{}.{}", identifier, self.config.source_extension));

        let exists = fs::try_exists(&path)
            .await
            .map_err(|e| AppError::filesystem(&path, e))?;
        if exists {
            return Ok(SourceOutcome {
                path,
                created: false,
            });
        }

        let template =
            template::resolve_template(self.config.template_file.as_deref(), DEFAULT_TEMPLATE).await;
        let body = template::render(&template, problem);

        fs::create_dir_all(source_dir)
            .await
            .map_err(|e| AppError::filesystem(source_dir, e))?;

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Ok(SourceOutcome {
                    path,
                    created: false,
                });
            }
            Err(e) => return Err(AppError::filesystem(&path, e)),
        };

        file.write_all(body.as_bytes())
            .await
            .map_err(|e| AppError::filesystem(&path, e))?;
        file.flush()
            .await
            .map_err(|e| AppError::filesystem(&path, e))?;

        Ok(SourceOutcome {
            path,
            created: true,
        })
    }

    /// Write the test file, replacing any previous contents.
    ///
    /// The JSON is written to a temporary sibling and renamed into place, so
    /// concurrent writers for one identifier resolve to the last rename.
    pub async fn write_tests(
        &self,
        identifier: &str,
        tests: &[SampleTest],
        test_dir: &Path,
    ) -> AppResult<PathBuf> {
        let path = test_dir.join(format!("{}{}", identifier, self.config.tests_file_suffix));

        fs::create_dir_all(test_dir)
            .await
            .map_err(|e| AppError::filesystem(test_dir, e))?;

        let records: Vec<TestRecord> = tests.iter().map(TestRecord::from).collect();
        let json = serde_json::to_string_pretty(&records)?;

        let tmp = test_dir.join(format!(".{}.{}.tmp", identifier, Uuid::new_v4().simple()));
        fs::write(&tmp, json)
            .await
            .map_err(|e| AppError::filesystem(&tmp, e))?;

        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(AppError::filesystem(&path, e));
        }

        Ok(path)
    }

    /// Ask the editor to open `path`. Failures are logged, never returned.
    pub async fn notify_open(&self, editor: &dyn Editor, path: &Path) {
        if let Err(e) = editor.open_file(path).await {
            tracing::warn!(error = %e, "Failed to open {} in editor", path.display());
        }
    }

    /// Run the whole pipeline for one problem
    pub async fn materialize(
        &self,
        problem: &Problem,
        today: NaiveDate,
        editor: &dyn Editor,
    ) -> AppResult<Materialized> {
        let identifier = self.identifier(problem);
        let dirs = self.resolve_output_dirs(today, &editor.project_folders())?;

        let source = self.ensure_source(&identifier, problem, &dirs.source_dir).await?;
        if source.created {
            tracing::info!("Created source file {}", source.path.display());
        } else {
            tracing::info!("Source file {} already exists, leaving it untouched", source.path.display());
        }

        let tests_path = self.write_tests(&identifier, &problem.tests, &dirs.test_dir).await?;
        tracing::info!(
            "Wrote {} test(s) to {}",
            problem.tests.len(),
            tests_path.display()
        );

        self.notify_open(editor, &source.path).await;

        Ok(Materialized {
            identifier,
            source,
            tests_path,
        })
    }
}
