//! Problem request DTOs

use serde::Deserialize;
use serde_json::Number;

use crate::constants::{
    DEFAULT_MEMORY_LIMIT_MB, DEFAULT_TIME_LIMIT_MS, FALLBACK_NAME, FALLBACK_TITLE,
};
use crate::error::{AppError, AppResult};
use crate::models::{Problem, SampleTest};

/// Problem pushed by Competitive Companion.
///
/// Every field is optional on the wire. Fields the helper sends that are
/// not listed here (`interactive`, `batch`, `languages`, ...) are ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingProblem {
    pub title: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub group: Option<String>,
    /// Time limit in milliseconds. The helper computes it in floating point,
    /// so any JSON number is accepted.
    pub time_limit: Option<Number>,
    /// Memory limit in megabytes, any JSON number
    pub memory_limit: Option<Number>,
    pub tests: Option<Vec<IncomingTest>>,
}

/// Sample input/output pair as sent by the helper
#[derive(Debug, Default, Deserialize)]
pub struct IncomingTest {
    pub input: Option<String>,
    pub output: Option<String>,
}

impl IncomingProblem {
    /// Parse a raw request body
    pub fn parse(body: &[u8]) -> AppResult<Self> {
        let text = std::str::from_utf8(body)
            .map_err(|e| AppError::PayloadParse(format!("body is not UTF-8: {e}")))?;
        serde_json::from_str(text)
            .map_err(|e| AppError::PayloadParse(format!("body is not a problem object: {e}")))
    }

    /// Apply every fallback and produce the normalized problem
    pub fn normalize(self) -> Problem {
        Problem {
            title: self.title.unwrap_or_else(|| FALLBACK_TITLE.to_string()),
            name: self.name.unwrap_or_else(|| FALLBACK_NAME.to_string()),
            url: self.url.unwrap_or_default(),
            group: self.group.unwrap_or_default(),
            time_limit_ms: whole_or(self.time_limit.as_ref(), DEFAULT_TIME_LIMIT_MS),
            memory_limit_mb: whole_or(self.memory_limit.as_ref(), DEFAULT_MEMORY_LIMIT_MB),
            tests: self
                .tests
                .unwrap_or_default()
                .into_iter()
                .map(|t| SampleTest {
                    input: t.input.unwrap_or_default(),
                    output: t.output.unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Round a limit to a whole number. Negative or absent values take `default`.
fn whole_or(value: Option<&Number>, default: u64) -> u64 {
    let Some(number) = value else {
        return default;
    };
    number
        .as_u64()
        .or_else(|| {
            number
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as u64)
        })
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let body = br#"{
            "name": "A. Two Sum",
            "group": "Codeforces - Round 1",
            "url": "https://codeforces.com/contest/1/problem/A",
            "interactive": false,
            "memoryLimit": 512,
            "timeLimit": 2000,
            "tests": [{"input": "1 2\n", "output": "3\n"}, {"input": "5 5\n", "output": "10\n"}],
            "testType": "single",
            "batch": {"id": "x", "size": 1}
        }"#;

        let problem = IncomingProblem::parse(body).unwrap().normalize();
        assert_eq!(problem.title, "untitled");
        assert_eq!(problem.name, "A. Two Sum");
        assert_eq!(problem.group, "Codeforces - Round 1");
        assert_eq!(problem.time_limit_ms, 2000);
        assert_eq!(problem.memory_limit_mb, 512);
        assert_eq!(problem.tests.len(), 2);
        assert_eq!(problem.tests[1].input, "5 5\n");
    }

    #[test]
    fn test_normalize_applies_fallbacks() {
        let problem = IncomingProblem::parse(br#"{"tests": [{"input": "1"}], "url": null}"#)
            .unwrap()
            .normalize();

        assert_eq!(problem.title, "untitled");
        assert_eq!(problem.name, "Unknown Problem");
        assert_eq!(problem.url, "");
        assert_eq!(problem.group, "");
        assert_eq!(problem.time_limit_ms, 1000);
        assert_eq!(problem.memory_limit_mb, 256);
        assert_eq!(problem.tests[0].output, "");

        assert!(IncomingProblem::parse(b"{}").unwrap().normalize().tests.is_empty());
    }

    #[test]
    fn test_fractional_limits_are_rounded() {
        let body = br#"{
            "name": "B. Pairs",
            "timeLimit": 300.00000000000006,
            "memoryLimit": 62.5,
            "tests": [{"input": "2\n", "output": "1\n"}]
        }"#;

        let problem = IncomingProblem::parse(body).unwrap().normalize();
        assert_eq!(problem.time_limit_ms, 300);
        assert_eq!(problem.memory_limit_mb, 63);
        assert_eq!(problem.tests.len(), 1);
    }

    #[test]
    fn test_negative_limits_fall_back() {
        let problem = IncomingProblem::parse(br#"{"timeLimit": -1, "memoryLimit": -0.5}"#)
            .unwrap()
            .normalize();
        assert_eq!(problem.time_limit_ms, 1000);
        assert_eq!(problem.memory_limit_mb, 256);
    }

    #[test]
    fn test_parse_rejects_bad_bodies() {
        for body in [&b"not json"[..], b"", b"[1, 2]", b"\"text\"", b"{\"title\": 5}", b"\xff\xfe{}"] {
            let err = IncomingProblem::parse(body).unwrap_err();
            assert!(matches!(err, AppError::PayloadParse(_)), "accepted {body:?}");
        }
    }
}
