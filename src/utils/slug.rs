//! Identifier derivation
//!
//! Problem titles become file stems here. Two titles that slug to the same
//! string share one identifier; that collision is accepted.

use crate::constants::{FALLBACK_TITLE, SLUG_SEPARATOR};

/// Turn free text into a filesystem-safe identifier.
///
/// Every character that is not alphanumeric is replaced by `_`, then `_` is
/// trimmed from both ends. `None` is treated as `"untitled"`. An empty or
/// all-punctuation input yields an empty string; callers needing a non-empty
/// identifier apply their own fallback.
pub fn slugify(input: Option<&str>) -> String {
    input
        .unwrap_or(FALLBACK_TITLE)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { SLUG_SEPARATOR })
        .collect::<String>()
        .trim_matches(SLUG_SEPARATOR)
        .to_string()
}
