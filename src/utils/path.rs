//! Path helpers

use std::path::{Path, PathBuf};

/// Expand a leading `~` to the current user's home directory.
///
/// Only `~` on its own or followed by a separator is expanded; `~user` and
/// paths without a tilde are returned unchanged. If the home directory
/// cannot be determined the path is returned as given.
pub fn expand_home(raw: &str) -> PathBuf {
    let rest = match raw.strip_prefix('~') {
        Some(rest) => rest,
        None => return PathBuf::from(raw),
    };

    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\')) {
        return PathBuf::from(raw);
    }

    match home::home_dir() {
        Some(home) => home.join(rest.trim_start_matches(['/', '\\'])),
        None => PathBuf::from(raw),
    }
}

/// Last component of `path` as UTF-8, if any
pub fn file_name_str(path: &Path) -> Option<&str> {
    path.file_name().and_then(|name| name.to_str())
}
