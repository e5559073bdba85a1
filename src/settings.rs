//! Settings store
//!
//! Configuration is read through [`SettingsStore`] so the same parsing code
//! serves the process environment and in-memory maps.

use std::collections::HashMap;
use std::env;

/// Key/value settings lookup
pub trait SettingsStore {
    /// Raw value for `key`, if set
    fn lookup(&self, key: &str) -> Option<String>;

    /// Value for `key`, or `default` when unset
    fn get(&self, key: &str, default: &str) -> String {
        self.lookup(key).unwrap_or_else(|| default.to_string())
    }

    /// Value for `key`, treating empty strings as unset
    fn get_optional(&self, key: &str) -> Option<String> {
        self.lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Settings backed by environment variables
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSettings;

impl EnvSettings {
    /// Load `.env` (if present) and return the environment-backed store
    pub fn load() -> Self {
        dotenvy::dotenv().ok();
        Self
    }
}

impl SettingsStore for EnvSettings {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl SettingsStore for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}
