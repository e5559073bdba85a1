//! Business logic services
//!
//! This module contains the logic that turns a received problem into files.

pub mod layout;
pub mod materializer;
pub mod template;

pub use layout::OutputDirs;
pub use materializer::{Materialized, Materializer, SourceOutcome};
