//! Domain models
//!
//! This module contains the normalized problem and the records persisted to
//! disk.

pub mod problem;
pub mod test_case;

pub use problem::{Problem, SampleTest};
pub use test_case::TestRecord;
