//! Error types for map building

use thiserror::Error;

/// Errors that can occur when building a map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuilderError {
    /// Strict emptiness policy met a value with no notion of emptiness
    #[error("Cannot decide whether {kind} value at key '{key}' is empty")]
    UnsupportedValue { key: String, kind: &'static str },
}

/// Result type for map building
pub type BuilderResult<T> = Result<T, BuilderError>;
