//! Test case record persisted in the per-problem test file

use serde::{Deserialize, Serialize};

use super::problem::SampleTest;

/// One element of the test file's JSON array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRecord {
    /// Raw input, byte for byte
    pub test: String,
    /// Accepted outputs; always a single trimmed entry here
    pub correct_answers: Vec<String>,
}

impl From<&SampleTest> for TestRecord {
    fn from(sample: &SampleTest) -> Self {
        Self {
            test: sample.input.clone(),
            correct_answers: vec![sample.output.trim().to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_trims_output_only() {
        let sample = SampleTest {
            input: "  1 2\n".to_string(),
            output: "\n3 \r\n".to_string(),
        };

        let record = TestRecord::from(&sample);
        assert_eq!(record.test, "  1 2\n");
        assert_eq!(record.correct_answers, vec!["3".to_string()]);
    }

    #[test]
    fn test_record_wire_shape() {
        let record = TestRecord {
            test: "1\n".to_string(),
            correct_answers: vec!["2".to_string()],
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, serde_json::json!({"test": "1\n", "correct_answers": ["2"]}));
    }
}
