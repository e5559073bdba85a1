//! Editor collaborator
//!
//! The listener never drives an editor directly. It talks to an [`Editor`],
//! which opens created files, reports which project folders are open and
//! shows status messages. [`CommandEditor`] is the shipped implementation:
//! it launches a configured command per file.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::config::EditorConfig;

/// Errors raised while handing a file to the editor
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Editor command is empty")]
    EmptyCommand,

    #[error("Failed to launch `{command}`: {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

/// Narrow interface to the editor hosting the listener
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Editor: Send + Sync {
    /// Open `path` in an editor window
    async fn open_file(&self, path: &Path) -> Result<(), EditorError>;

    /// Folders currently open as projects
    fn project_folders(&self) -> Vec<PathBuf>;

    /// Surface a short status message to the user
    fn show_message(&self, message: &str);
}

/// Opens files by spawning an external command (`code`, `subl -n`, ...)
#[derive(Debug, Clone, Default)]
pub struct CommandEditor {
    command: Option<String>,
    project_folders: Vec<PathBuf>,
}

impl CommandEditor {
    /// Create an editor from configuration
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            command: config.command.clone(),
            project_folders: config.project_folders.clone(),
        }
    }
}

#[async_trait]
impl Editor for CommandEditor {
    async fn open_file(&self, path: &Path) -> Result<(), EditorError> {
        let Some(command) = &self.command else {
            tracing::info!("No editor command configured, not opening {}", path.display());
            return Ok(());
        };

        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or(EditorError::EmptyCommand)?;

        // Fire and forget: the request never waits on the editor process.
        Command::new(program)
            .args(parts)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| EditorError::Launch {
                command: command.clone(),
                source,
            })?;

        tracing::debug!("Launched `{}` for {}", command, path.display());
        Ok(())
    }

    fn project_folders(&self) -> Vec<PathBuf> {
        self.project_folders.clone()
    }

    fn show_message(&self, message: &str) {
        tracing::info!("{}", message);
    }
}
