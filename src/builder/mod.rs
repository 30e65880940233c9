//! Fluent builder for property maps
//!
//! Entries keep insertion order. `build` drops every entry whose value is
//! null or empty and hands the map back; the builder is consumed, so no
//! operation can follow it.
//!
//! # Example
//!
//! ```rust
//! use beankit::builder::MapBuilder;
//! use serde_json::json;
//!
//! let map = MapBuilder::init()
//!     .append("a", json!([]))
//!     .append("b", "x")
//!     .append("c", ())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(serde_json::Value::Object(map), json!({"b": "x"}));
//! ```

mod config;
mod error;

pub use config::{BuilderConfig, EmptinessPolicy, RenameMissing};
pub use error::{BuilderError, BuilderResult};

use serde_json::Value;
use tracing::{debug, trace};

use crate::property::{PropertyMap, value_kind};

/// Chainable map construction with a final empty-value filter
#[derive(Debug, Clone, Default)]
pub struct MapBuilder {
    entries: PropertyMap,
    config: BuilderConfig,
}

impl MapBuilder {
    /// Start from an empty map
    pub fn init() -> Self {
        Self::default()
    }

    /// Start from a copy of `map`; `None` starts empty
    pub fn init_with(map: Option<&PropertyMap>) -> Self {
        Self {
            entries: map.cloned().unwrap_or_default(),
            config: BuilderConfig::default(),
        }
    }

    /// Replace the builder configuration
    pub fn with_config(mut self, config: BuilderConfig) -> Self {
        self.config = config;
        self
    }

    /// Insert or overwrite an entry
    pub fn append(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Remove an entry if present
    pub fn remove(mut self, key: &str) -> Self {
        self.entries.shift_remove(key);
        self
    }

    /// Move the value under `old` to `new`
    ///
    /// An existing entry under `new` is overwritten. A missing `old` key is
    /// handled according to [`RenameMissing`].
    pub fn rename(mut self, old: &str, new: impl Into<String>) -> Self {
        match self.entries.shift_remove(old) {
            Some(value) => {
                self.entries.insert(new.into(), value);
            }
            None => match self.config.rename_missing {
                RenameMissing::InsertNull => {
                    self.entries.insert(new.into(), Value::Null);
                }
                RenameMissing::Ignore => {
                    trace!(key = old, "Rename of missing key ignored");
                }
            },
        }
        self
    }

    /// Current value under `key`, before filtering
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Number of entries, before filtering
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop empty entries and return the map
    pub fn build(self) -> BuilderResult<PropertyMap> {
        let total = self.entries.len();
        let mut built = PropertyMap::new();
        for (key, value) in self.entries {
            if is_empty_or_null(&key, &value, self.config.emptiness)? {
                trace!(key = %key, "Dropping empty entry");
            } else {
                built.insert(key, value);
            }
        }

        debug!(kept = built.len(), dropped = total - built.len(), "Built map");
        Ok(built)
    }
}

fn is_empty_or_null(key: &str, value: &Value, policy: EmptinessPolicy) -> BuilderResult<bool> {
    match value {
        Value::Null => Ok(true),
        Value::String(s) => Ok(s.is_empty()),
        Value::Array(items) => Ok(items.is_empty()),
        Value::Object(entries) => Ok(entries.is_empty()),
        Value::Bool(_) | Value::Number(_) => match policy {
            EmptinessPolicy::Lenient => Ok(false),
            EmptinessPolicy::Strict => Err(BuilderError::UnsupportedValue {
                key: key.to_string(),
                kind: value_kind(value),
            }),
        },
    }
}
