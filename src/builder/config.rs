//! Configuration for map building

use serde::{Deserialize, Serialize};

/// Configuration for [`MapBuilder`](super::MapBuilder)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// How `build` treats values that have no notion of emptiness
    pub emptiness: EmptinessPolicy,
    /// What `rename` does when the old key is absent
    pub rename_missing: RenameMissing,
}

impl BuilderConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject unrecognized values and ignore renames of missing keys
    pub fn strict() -> Self {
        Self {
            emptiness: EmptinessPolicy::Strict,
            rename_missing: RenameMissing::Ignore,
        }
    }

    /// Set the emptiness policy
    pub fn with_emptiness(mut self, policy: EmptinessPolicy) -> Self {
        self.emptiness = policy;
        self
    }

    /// Set the rename-of-missing-key behavior
    pub fn with_rename_missing(mut self, behavior: RenameMissing) -> Self {
        self.rename_missing = behavior;
        self
    }
}

/// Treatment of booleans and numbers by the empty-value filter
///
/// Null, empty strings, empty arrays and empty objects are always dropped.
/// Booleans and numbers are neither empty nor non-empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptinessPolicy {
    /// Keep them
    #[default]
    Lenient,
    /// Fail the build with `BuilderError::UnsupportedValue`
    Strict,
}

impl std::fmt::Display for EmptinessPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmptinessPolicy::Lenient => write!(f, "lenient"),
            EmptinessPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl std::str::FromStr for EmptinessPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(EmptinessPolicy::Lenient),
            "strict" => Ok(EmptinessPolicy::Strict),
            _ => Err(format!("Unknown emptiness policy: {}", s)),
        }
    }
}

/// Behavior of `rename` when the old key is absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameMissing {
    /// Insert the new key with a null value (dropped again by `build`)
    #[default]
    InsertNull,
    /// Leave the map unchanged
    Ignore,
}

impl std::fmt::Display for RenameMissing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenameMissing::InsertNull => write!(f, "insert_null"),
            RenameMissing::Ignore => write!(f, "ignore"),
        }
    }
}

impl std::str::FromStr for RenameMissing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "insert_null" | "null" => Ok(RenameMissing::InsertNull),
            "ignore" | "noop" => Ok(RenameMissing::Ignore),
            _ => Err(format!("Unknown rename behavior: {}", s)),
        }
    }
}
