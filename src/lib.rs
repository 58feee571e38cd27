//! patx: stateless regex convenience helpers
//!
//! Replace, find and split with the `regex` crate, plus infallible extraction
//! of text before, after or between literal markers.

pub mod config;
pub mod logger;
pub mod markers;
pub mod pattern;
pub mod regex_error;

// Re-export commonly used types for convenience
pub use config::{Config, LoggingConfig, MatchOptions};
pub use markers::{find_after, find_before, find_between};
pub use pattern::{
    Matcher, escape, find_all, find_all_captures, find_first, is_match, replace, replace_first,
    split,
};
pub use regex_error::{PatternError, PatternErrorKind};
