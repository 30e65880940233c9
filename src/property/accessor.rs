//! Uniform named-property view over typed records

use std::any::Any;

use serde_json::Value;
use tracing::{trace, warn};

use super::error::PropertyResult;
use super::types::RecordDescriptor;
use super::value::PropertyMap;

/// A record type exposing its fields by name
///
/// Implementations are normally generated with the [`record!`](crate::record)
/// macro. The methods taking `&self` are object safe, so converters and
/// copiers work on `&dyn Record`; the `Self: Sized` methods give the static
/// descriptor and the default construction path.
///
/// `property_ref` and `set_property_from` move field values between records
/// without a detour through [`Value`]. Hand-written impls may leave them at
/// their defaults, in which case copying goes through `get_property` and
/// `set_property`.
pub trait Record: Any + Send + Sync {
    /// Descriptor for this record type, built once per process
    fn record_descriptor() -> &'static RecordDescriptor
    where
        Self: Sized;

    /// Construct a zero-value instance
    fn instantiate() -> PropertyResult<Self>
    where
        Self: Sized;

    /// Descriptor of the runtime type of `self`
    fn descriptor(&self) -> &'static RecordDescriptor;

    /// Read a field, `None` when the record has no such field
    fn get_property(&self, name: &str) -> Option<Value>;

    /// Write a field
    ///
    /// Returns `Ok(false)` when the record has no field called `name`.
    fn set_property(&mut self, name: &str, value: Value) -> PropertyResult<bool>;

    /// Borrow a field as its Rust value
    fn property_ref(&self, _name: &str) -> Option<&dyn Any> {
        None
    }

    /// Overwrite a field with a clone of `value` when it holds the field's
    /// Rust type
    ///
    /// Returns `false`, leaving the field untouched, when there is no such
    /// field or the types differ.
    fn set_property_from(&mut self, _name: &str, _value: &dyn Any) -> bool {
        false
    }
}

/// Enumerate every readable field of `record` in declaration order
pub fn list_properties(record: &dyn Record) -> Vec<(&'static str, Value)> {
    record
        .descriptor()
        .field_names()
        .map(|name| (name, record.get_property(name).unwrap_or(Value::Null)))
        .collect()
}

/// Assign every entry of `mapping` whose key names a field of `record`
///
/// Keys with no matching field are skipped. Returns the number of fields
/// written.
pub fn apply_properties(record: &mut dyn Record, mapping: &PropertyMap) -> PropertyResult<usize> {
    let mut applied = 0;
    for (key, value) in mapping {
        match record.set_property(key, value.clone()) {
            Ok(true) => applied += 1,
            Ok(false) => {
                trace!(record = record.descriptor().name, key = %key, "No such field, skipping");
            }
            Err(e) => {
                warn!(record = record.descriptor().name, key = %key, "Rejected property value: {}", e);
                return Err(e);
            }
        }
    }
    Ok(applied)
}

/// Construct a new zero-value `R`
pub fn instantiate<R: Record>() -> PropertyResult<R> {
    R::instantiate()
}
