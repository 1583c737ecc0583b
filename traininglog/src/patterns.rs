//! Shared access to the crate's compiled regular expressions
//!
//! Patterns are compiled once into `LazyLock<Option<Regex>>` statics. A
//! pattern that fails to compile surfaces as an engine error at the first
//! call that needs it instead of aborting the process.

use crate::error::LogError;
use crate::LogResult;
use regex::Regex;
use std::sync::LazyLock;

pub(crate) type Pattern = LazyLock<Option<Regex>>;

pub(crate) fn compiled(pattern: &'static Pattern, name: &str) -> LogResult<&'static Regex> {
    pattern
        .as_ref()
        .ok_or_else(|| LogError::Engine(format!("built-in pattern '{}' failed to compile", name)))
}
