//! Problem model

/// A problem with every fallback already applied.
///
/// Built from the wire payload by a single normalization step, so nothing
/// downstream has to check for absent fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub title: String,
    pub name: String,
    pub url: String,
    pub group: String,
    pub time_limit_ms: u64,
    pub memory_limit_mb: u64,
    /// Sample tests in the order the helper sent them
    pub tests: Vec<SampleTest>,
}

/// One sample input/output pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleTest {
    pub input: String,
    pub output: String,
}

impl Problem {
    /// Text the identifier is derived from
    pub fn identifier_source(&self, use_title: bool) -> &str {
        if use_title { &self.title } else { &self.name }
    }
}
