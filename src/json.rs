//! JSON text helpers layered on record/map conversion
//!
//! Records serialize through [`to_map_dyn`](crate::convert::to_map_dyn), so
//! null fields are omitted from the output, and deserialize through
//! [`from_map`](crate::convert::from_map), so unknown properties are ignored.

use serde_json::Value;
use thiserror::Error;

use crate::convert::{from_map, to_map_dyn};
use crate::property::{PropertyError, PropertyMap, Record, value_kind};

/// Errors raised by the JSON helpers
#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Failed to parse JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize JSON: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Well-formed JSON of the wrong shape
    #[error("Expected a JSON {expected}, got {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },

    #[error(transparent)]
    Property(#[from] PropertyError),
}

/// Result type for JSON helpers
pub type JsonResult<T> = Result<T, JsonError>;

/// Serialize a record to compact JSON, leaving out null fields
///
/// `None` yields `None`.
pub fn to_json<R: Record>(record: Option<&R>) -> JsonResult<Option<String>> {
    let Some(record) = record else {
        return Ok(None);
    };
    serde_json::to_string(&to_map_dyn(record, true))
        .map(Some)
        .map_err(JsonError::Serialize)
}

/// Parse a JSON object into a new `R`
///
/// An empty string yields `None`.
pub fn from_json<R: Record>(json: &str) -> JsonResult<Option<R>> {
    match json_to_map(json)? {
        Some(map) => Ok(Some(from_map::<R>(Some(&map))?)),
        None => Ok(None),
    }
}

/// Parse a JSON object into a property map
///
/// An empty string yields `None`.
pub fn json_to_map(json: &str) -> JsonResult<Option<PropertyMap>> {
    if json.is_empty() {
        return Ok(None);
    }
    let value: Value = serde_json::from_str(json).map_err(JsonError::Parse)?;
    match value {
        Value::Object(map) => Ok(Some(map)),
        other => Err(JsonError::UnexpectedShape {
            expected: "object",
            found: value_kind(&other),
        }),
    }
}

/// Parse a JSON array of objects into records
///
/// An empty string yields an empty vector.
pub fn json_to_records<R: Record>(json: &str) -> JsonResult<Vec<R>> {
    if json.is_empty() {
        return Ok(Vec::new());
    }
    let value: Value = serde_json::from_str(json).map_err(JsonError::Parse)?;
    let items = match value {
        Value::Array(items) => items,
        other => {
            return Err(JsonError::UnexpectedShape {
                expected: "array",
                found: value_kind(&other),
            });
        }
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::Object(map) => Ok(from_map::<R>(Some(&map))?),
            other => Err(JsonError::UnexpectedShape {
                expected: "object",
                found: value_kind(&other),
            }),
        })
        .collect()
}
