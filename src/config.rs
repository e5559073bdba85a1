//! Application configuration management
//!
//! This module parses settings into an immutable [`Config`]. The config is
//! built once at startup and handed to the listener and materializer
//! explicitly; nothing reads settings after that.

use std::env;
use std::path::PathBuf;

use regex::Regex;

use crate::constants::{
    layouts, log_formats, settings_keys as keys, DEFAULT_LOG_FILTER, DEFAULT_MAX_BODY_BYTES,
    DEFAULT_PROJECT_FOLDER_PATTERN, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
    DEFAULT_SOURCE_EXTENSION, DEFAULT_SOURCE_ROOT, DEFAULT_TESTS_FILE_SUFFIX,
    DEFAULT_TESTS_SIBLING_DIR,
};
use crate::settings::{EnvSettings, SettingsStore};
use crate::utils::path::expand_home;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub materializer: MaterializerConfig,
    pub editor: EditorConfig,
}

/// Listener configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    /// Emit JSON log lines instead of text
    pub log_json: bool,
    /// Stop after the first successfully handled request
    pub one_shot: bool,
    pub max_body_bytes: usize,
}

/// Artifact naming and placement
#[derive(Debug, Clone)]
pub struct MaterializerConfig {
    pub tests_file_suffix: String,
    /// Derive the identifier from `title` (true) or `name` (false)
    pub use_title_as_filename: bool,
    /// Raw template path; `~` is expanded at lookup time
    pub template_file: Option<String>,
    pub tests_relative_dir: Option<PathBuf>,
    pub source_extension: String,
    pub layout: LayoutConfig,
}

/// Which layout strategy places the artifacts
#[derive(Debug, Clone)]
pub enum LayoutConfig {
    /// `root/YYYY/MM/DD`
    Dated { root: PathBuf },
    /// First open project folder whose name matches `pattern`
    ProjectFolder {
        pattern: Regex,
        tests_sibling_dir: String,
    },
}

/// Editor collaborator configuration
#[derive(Debug, Clone, Default)]
pub struct EditorConfig {
    /// Command used to open a file, e.g. `code` or `subl -n`
    pub command: Option<String>,
    pub project_folders: Vec<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables (and `.env`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_settings(&EnvSettings::load())
    }

    /// Load configuration from any settings store
    pub fn from_settings(settings: &dyn SettingsStore) -> Result<Self, ConfigError> {
        Ok(Self {
            server: ServerConfig::from_settings(settings)?,
            materializer: MaterializerConfig::from_settings(settings)?,
            editor: EditorConfig::from_settings(settings),
        })
    }
}

impl ServerConfig {
    fn from_settings(settings: &dyn SettingsStore) -> Result<Self, ConfigError> {
        Ok(Self {
            host: settings.get(keys::HOST, DEFAULT_SERVER_HOST),
            port: parse_value(settings, keys::PORT, DEFAULT_SERVER_PORT)?,
            rust_log: settings.get(keys::RUST_LOG, DEFAULT_LOG_FILTER),
            log_json: match settings.get(keys::LOG_FORMAT, log_formats::TEXT).to_lowercase().as_str() {
                log_formats::TEXT => false,
                log_formats::JSON => true,
                _ => return Err(ConfigError::InvalidValue(keys::LOG_FORMAT.to_string())),
            },
            one_shot: parse_bool(settings, keys::ONE_SHOT, false)?,
            max_body_bytes: parse_value(settings, keys::MAX_BODY_BYTES, DEFAULT_MAX_BODY_BYTES)?,
        })
    }

    /// `host:port` as given, for binding and log lines
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl MaterializerConfig {
    fn from_settings(settings: &dyn SettingsStore) -> Result<Self, ConfigError> {
        let layout = match settings.get(keys::LAYOUT, layouts::DATED).to_lowercase().as_str() {
            layouts::DATED => LayoutConfig::Dated {
                root: expand_home(&settings.get(keys::SOURCE_ROOT, DEFAULT_SOURCE_ROOT)),
            },
            layouts::PROJECT => {
                let raw = settings.get(keys::PROJECT_FOLDER_PATTERN, DEFAULT_PROJECT_FOLDER_PATTERN);
                let pattern = Regex::new(&raw)
                    .map_err(|_| ConfigError::InvalidValue(keys::PROJECT_FOLDER_PATTERN.to_string()))?;
                LayoutConfig::ProjectFolder {
                    pattern,
                    tests_sibling_dir: settings.get(keys::TESTS_SIBLING_DIR, DEFAULT_TESTS_SIBLING_DIR),
                }
            }
            _ => return Err(ConfigError::InvalidValue(keys::LAYOUT.to_string())),
        };

        let source_extension = settings
            .get(keys::SOURCE_EXTENSION, DEFAULT_SOURCE_EXTENSION)
            .trim_start_matches('.')
            .to_string();
        if source_extension.is_empty() {
            return Err(ConfigError::InvalidValue(keys::SOURCE_EXTENSION.to_string()));
        }

        Ok(Self {
            tests_file_suffix: settings.get(keys::TESTS_FILE_SUFFIX, DEFAULT_TESTS_FILE_SUFFIX),
            use_title_as_filename: parse_bool(settings, keys::USE_TITLE_AS_FILENAME, true)?,
            template_file: settings.get_optional(keys::TEMPLATE_FILE),
            tests_relative_dir: settings.get_optional(keys::TESTS_RELATIVE_DIR).map(PathBuf::from),
            source_extension,
            layout,
        })
    }
}

impl EditorConfig {
    fn from_settings(settings: &dyn SettingsStore) -> Self {
        Self {
            command: settings.get_optional(keys::EDITOR_COMMAND),
            project_folders: settings
                .get_optional(keys::PROJECT_FOLDERS)
                .map(|raw| env::split_paths(&raw).collect())
                .unwrap_or_default(),
        }
    }
}

fn parse_value<T: std::str::FromStr>(
    settings: &dyn SettingsStore,
    key: &str,
    default: T,
) -> Result<T, ConfigError> {
    match settings.get_optional(key) {
        Some(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key.to_string())),
        None => Ok(default),
    }
}

fn parse_bool(settings: &dyn SettingsStore, key: &str, default: bool) -> Result<bool, ConfigError> {
    match settings.get_optional(key).map(|v| v.to_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue(key.to_string())),
        },
    }
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for setting: {0}")]
    InvalidValue(String),
}
