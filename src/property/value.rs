//! Conversion between Rust field types and property values
//!
//! Property values are plain `serde_json::Value`s. Every field type a record
//! may declare implements [`PropertyType`], which names its [`FieldType`] and
//! converts to and from a value without any coercion: a string never becomes
//! a number and an out-of-range integer is rejected rather than truncated.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use super::types::FieldType;

/// Ordered string-keyed property map (insertion order is preserved)
pub type PropertyMap = serde_json::Map<String, Value>;

const DATE_FORMAT: &str = "%Y-%m-%d";

// JSON numbers cannot hold non-finite floats
const NAN: &str = "NaN";
const INFINITY: &str = "Infinity";
const NEG_INFINITY: &str = "-Infinity";

/// Short name of the JSON kind of `value`
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A value that does not fit the declared field type
#[derive(Debug, Clone, PartialEq)]
pub struct ValueMismatch {
    pub expected: FieldType,
    pub found: String,
}

impl ValueMismatch {
    pub fn new(expected: FieldType, value: &Value) -> Self {
        let found = match value {
            Value::Number(n) => format!("number {}", n),
            Value::String(s) if s.len() <= 32 => format!("string {:?}", s),
            other => value_kind(other).to_string(),
        };
        Self { expected, found }
    }

    fn rewrap(self, expected: FieldType) -> Self {
        Self {
            expected,
            found: self.found,
        }
    }
}

/// A Rust type usable as a record field
///
/// `to_value` and `from_value` are exact inverses for every value of the
/// type. `f64` is a number except for NaN and the infinities, which have no
/// JSON number form and travel as the strings `"NaN"`, `"Infinity"` and
/// `"-Infinity"`; no other string is accepted for a float.
pub trait PropertyType: Sized + Clone + Send + Sync + 'static {
    /// Declared type reported in the record descriptor
    fn field_type() -> FieldType;

    fn to_value(&self) -> Value;

    fn from_value(value: Value) -> Result<Self, ValueMismatch>;
}

impl PropertyType for bool {
    fn field_type() -> FieldType {
        FieldType::Bool
    }

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(ValueMismatch::new(Self::field_type(), &other)),
        }
    }
}

impl PropertyType for i32 {
    fn field_type() -> FieldType {
        FieldType::I32
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        value
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or_else(|| ValueMismatch::new(Self::field_type(), &value))
    }
}

impl PropertyType for i64 {
    fn field_type() -> FieldType {
        FieldType::I64
    }

    fn to_value(&self) -> Value {
        Value::from(*self)
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        value
            .as_i64()
            .ok_or_else(|| ValueMismatch::new(Self::field_type(), &value))
    }
}

impl PropertyType for f64 {
    fn field_type() -> FieldType {
        FieldType::F64
    }

    fn to_value(&self) -> Value {
        match self {
            f if f.is_nan() => Value::String(NAN.to_string()),
            f if *f == f64::INFINITY => Value::String(INFINITY.to_string()),
            f if *f == f64::NEG_INFINITY => Value::String(NEG_INFINITY.to_string()),
            f => Value::from(*f),
        }
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        let parsed = match &value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) if s == NAN => Some(f64::NAN),
            Value::String(s) if s == INFINITY => Some(f64::INFINITY),
            Value::String(s) if s == NEG_INFINITY => Some(f64::NEG_INFINITY),
            _ => None,
        };
        parsed.ok_or_else(|| ValueMismatch::new(Self::field_type(), &value))
    }
}

impl PropertyType for String {
    fn field_type() -> FieldType {
        FieldType::String
    }

    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(ValueMismatch::new(Self::field_type(), &other)),
        }
    }
}

impl PropertyType for Uuid {
    fn field_type() -> FieldType {
        FieldType::Uuid
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        value
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .ok_or_else(|| ValueMismatch::new(Self::field_type(), &value))
    }
}

impl PropertyType for DateTime<Utc> {
    fn field_type() -> FieldType {
        FieldType::DateTime
    }

    fn to_value(&self) -> Value {
        Value::String(self.to_rfc3339())
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        value
            .as_str()
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| ValueMismatch::new(Self::field_type(), &value))
    }
}

impl PropertyType for NaiveDate {
    fn field_type() -> FieldType {
        FieldType::Date
    }

    fn to_value(&self) -> Value {
        Value::String(self.format(DATE_FORMAT).to_string())
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        value
            .as_str()
            .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
            .ok_or_else(|| ValueMismatch::new(Self::field_type(), &value))
    }
}

impl PropertyType for Value {
    fn field_type() -> FieldType {
        FieldType::Json
    }

    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        Ok(value)
    }
}

impl<T: PropertyType> PropertyType for Option<T> {
    fn field_type() -> FieldType {
        FieldType::Optional(Box::new(T::field_type()))
    }

    fn to_value(&self) -> Value {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other)
                .map(Some)
                .map_err(|m| m.rewrap(Self::field_type())),
        }
    }
}

impl<T: PropertyType> PropertyType for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::List(Box::new(T::field_type()))
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(PropertyType::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(T::from_value)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|m| m.rewrap(Self::field_type())),
            other => Err(ValueMismatch::new(Self::field_type(), &other)),
        }
    }
}

impl<T: PropertyType + Ord> PropertyType for BTreeSet<T> {
    fn field_type() -> FieldType {
        FieldType::Set(Box::new(T::field_type()))
    }

    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(PropertyType::to_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Array(items) => items
                .into_iter()
                .map(T::from_value)
                .collect::<Result<BTreeSet<_>, _>>()
                .map_err(|m| m.rewrap(Self::field_type())),
            other => Err(ValueMismatch::new(Self::field_type(), &other)),
        }
    }
}

impl<T: PropertyType> PropertyType for BTreeMap<String, T> {
    fn field_type() -> FieldType {
        FieldType::Map(Box::new(T::field_type()))
    }

    fn to_value(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.to_value()))
                .collect(),
        )
    }

    fn from_value(value: Value) -> Result<Self, ValueMismatch> {
        match value {
            Value::Object(entries) => entries
                .into_iter()
                .map(|(k, v)| T::from_value(v).map(|v| (k, v)))
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map_err(|m| m.rewrap(Self::field_type())),
            other => Err(ValueMismatch::new(Self::field_type(), &other)),
        }
    }
}
