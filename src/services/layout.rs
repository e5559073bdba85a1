//! Output directory layouts

use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::config::{LayoutConfig, MaterializerConfig};
use crate::error::{AppError, AppResult};
use crate::utils::path::file_name_str;

/// Where the two artifacts of a problem go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirs {
    pub source_dir: PathBuf,
    pub test_dir: PathBuf,
}

impl LayoutConfig {
    /// Directories chosen by this layout alone, before overrides
    pub fn resolve(&self, today: NaiveDate, project_folders: &[PathBuf]) -> AppResult<OutputDirs> {
        match self {
            LayoutConfig::Dated { root } => {
                let source_dir = dated_dir(root, today);
                Ok(OutputDirs {
                    test_dir: source_dir.clone(),
                    source_dir,
                })
            }
            LayoutConfig::ProjectFolder {
                pattern,
                tests_sibling_dir,
            } => {
                let folder = project_folders
                    .iter()
                    .find(|folder| file_name_str(folder).is_some_and(|name| pattern.is_match(name)))
                    .ok_or_else(|| AppError::NoProjectFolder(pattern.as_str().to_string()))?;

                let test_dir = match folder.parent() {
                    Some(parent) => parent.join(tests_sibling_dir),
                    None => folder.join(tests_sibling_dir),
                };
                Ok(OutputDirs {
                    source_dir: folder.clone(),
                    test_dir,
                })
            }
        }
    }
}

/// Resolve source and test directories for a request handled on `today`.
///
/// Pure: no filesystem access. `tests_relative_dir`, when set, places tests
/// under the source directory regardless of layout.
pub fn resolve_output_dirs(
    config: &MaterializerConfig,
    today: NaiveDate,
    project_folders: &[PathBuf],
) -> AppResult<OutputDirs> {
    let mut dirs = config.layout.resolve(today, project_folders)?;
    if let Some(relative) = &config.tests_relative_dir {
        dirs.test_dir = dirs.source_dir.join(relative);
    }
    Ok(dirs)
}

fn dated_dir(root: &Path, today: NaiveDate) -> PathBuf {
    root.join(format!("{:04}", today.year()))
        .join(format!("{:02}", today.month()))
        .join(format!("{:02}", today.day()))
}
