//! Utility functions

pub mod path;
pub mod slug;

pub use path::expand_home;
pub use slug::slugify;
