//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default listener host address (loopback only)
pub const DEFAULT_SERVER_HOST: &str = "localhost";

/// Default listener port, the one Competitive Companion posts to
pub const DEFAULT_SERVER_PORT: u16 = 12345;

/// Default log filter when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "companion_hook=info,tower_http=info";

/// Log output formats
pub mod log_formats {
    pub const TEXT: &str = "text";
    pub const JSON: &str = "json";
}

/// Default maximum request body size in bytes (8 MiB)
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

// =============================================================================
// PROBLEM DEFAULTS
// =============================================================================

/// Time limit used when the payload carries none
pub const DEFAULT_TIME_LIMIT_MS: u64 = 1000;

/// Memory limit used when the payload carries none
pub const DEFAULT_MEMORY_LIMIT_MB: u64 = 256;

/// Substituted for a missing `title`
pub const FALLBACK_TITLE: &str = "untitled";

/// Substituted for a missing `name`
pub const FALLBACK_NAME: &str = "Unknown Problem";

/// Identifier used when slugging leaves nothing behind
pub const FALLBACK_IDENTIFIER: &str = "untitled";

/// Replacement for every character that is not alphanumeric
pub const SLUG_SEPARATOR: char = '_';

// =============================================================================
// ARTIFACT DEFAULTS
// =============================================================================

/// Default suffix appended to the identifier for the test file
pub const DEFAULT_TESTS_FILE_SUFFIX: &str = "_tests.txt";

/// Default source file extension
pub const DEFAULT_SOURCE_EXTENSION: &str = "cpp";

/// Default root for the dated layout
pub const DEFAULT_SOURCE_ROOT: &str = "~/competitive";

/// Default pattern a project folder name must match for the project layout
pub const DEFAULT_PROJECT_FOLDER_PATTERN: &str = "^(cp|competitive)";

/// Default sibling directory holding tests in the project layout
pub const DEFAULT_TESTS_SIBLING_DIR: &str = "tests";

/// Layout identifiers
pub mod layouts {
    pub const DATED: &str = "dated";
    pub const PROJECT: &str = "project";
}

// =============================================================================
// TEMPLATES
// =============================================================================

/// Placeholder names recognised inside `{...}` in a template
pub mod placeholders {
    pub const TITLE: &str = "title";
    pub const NAME: &str = "name";
    pub const URL: &str = "url";
    pub const GROUP: &str = "group";
    pub const TIME_LIMIT: &str = "time_limit";
    pub const MEMORY_LIMIT: &str = "memory_limit";
}

/// Built-in template used when no user template is available.
/// Literal braces are doubled.
pub const DEFAULT_TEMPLATE: &str = r#"/**
 * Problem: {title}
 * Group:   {group}
 * URL:     {url}
 * Limits:  {time_limit} ms, {memory_limit} MB
 */
#include <bits/stdc++.h>
using namespace std;

int main() {{
    ios::sync_with_stdio(false);
    cin.tie(nullptr);

    return 0;
}}
"#;

// =============================================================================
// SETTINGS KEYS
// =============================================================================

/// Keys looked up in the settings store
pub mod settings_keys {
    pub const HOST: &str = "HOOK_HOST";
    pub const PORT: &str = "HOOK_PORT";
    pub const ONE_SHOT: &str = "HOOK_ONE_SHOT";
    pub const MAX_BODY_BYTES: &str = "HOOK_MAX_BODY_BYTES";
    pub const RUST_LOG: &str = "RUST_LOG";
    pub const LOG_FORMAT: &str = "HOOK_LOG_FORMAT";
    pub const TESTS_FILE_SUFFIX: &str = "TESTS_FILE_SUFFIX";
    pub const USE_TITLE_AS_FILENAME: &str = "USE_TITLE_AS_FILENAME";
    pub const TEMPLATE_FILE: &str = "TEMPLATE_FILE";
    pub const TESTS_RELATIVE_DIR: &str = "TESTS_RELATIVE_DIR";
    pub const SOURCE_EXTENSION: &str = "SOURCE_EXTENSION";
    pub const LAYOUT: &str = "LAYOUT";
    pub const SOURCE_ROOT: &str = "SOURCE_ROOT";
    pub const PROJECT_FOLDER_PATTERN: &str = "PROJECT_FOLDER_PATTERN";
    pub const TESTS_SIBLING_DIR: &str = "TESTS_SIBLING_DIR";
    pub const PROJECT_FOLDERS: &str = "PROJECT_FOLDERS";
    pub const EDITOR_COMMAND: &str = "EDITOR_COMMAND";
}
