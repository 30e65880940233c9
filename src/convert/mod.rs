//! Conversion between records and property maps
//!
//! This module provides functionality to:
//! - Flatten a record into an ordered map of field name to value
//! - Build or update a record from a map, ignoring keys with no field
//! - Do either for a whole batch
//!
//! Absent inputs are not errors: a missing record gives an empty map and a
//! missing map gives an unpopulated record.
//!
//! # Example
//!
//! ```rust
//! use beankit::convert::{from_map, to_map};
//! use serde_json::json;
//!
//! beankit::record! {
//!     #[derive(Debug, Default, Clone, PartialEq)]
//!     pub struct Foo {
//!         pub name: Option<String>,
//!         pub age: Option<i32>,
//!     }
//! }
//!
//! let foo = Foo { name: None, age: Some(18) };
//!
//! let all = to_map(Some(&foo), false);
//! assert_eq!(all.get("name"), Some(&json!(null)));
//!
//! let non_null = to_map(Some(&foo), true);
//! assert!(!non_null.contains_key("name"));
//!
//! let back: Foo = from_map(Some(&all)).unwrap();
//! assert_eq!(back, foo);
//! ```

mod batch;

pub use batch::{from_maps, to_maps};

use crate::property::{
    PropertyMap, PropertyResult, Record, apply_properties, instantiate, list_properties,
};

/// Convert a record to a map keyed by field name
///
/// `None` yields an empty map. With `ignore_null`, fields whose value is null
/// are left out.
pub fn to_map<R: Record>(record: Option<&R>, ignore_null: bool) -> PropertyMap {
    match record {
        Some(record) => to_map_dyn(record, ignore_null),
        None => PropertyMap::new(),
    }
}

/// [`to_map`] for a record behind a trait object
pub fn to_map_dyn(record: &dyn Record, ignore_null: bool) -> PropertyMap {
    list_properties(record)
        .into_iter()
        .filter(|(_, value)| !(ignore_null && value.is_null()))
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

/// Create a new `R` and populate it from `mapping`
///
/// `None` yields a freshly constructed, unpopulated record.
pub fn from_map<R: Record>(mapping: Option<&PropertyMap>) -> PropertyResult<R> {
    let mut record = instantiate::<R>()?;
    if let Some(mapping) = mapping {
        apply_properties(&mut record, mapping)?;
    }
    Ok(record)
}

/// Populate an existing record from `mapping` in place
///
/// `None` leaves the record untouched.
pub fn from_map_into<'r, R: Record>(
    mapping: Option<&PropertyMap>,
    record: &'r mut R,
) -> PropertyResult<&'r mut R> {
    if let Some(mapping) = mapping {
        apply_properties(&mut *record, mapping)?;
    }
    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    crate::record! {
        #[derive(Debug, Default, Clone, PartialEq)]
        struct Foo {
            name: Option<String>,
            age: Option<i32>,
        }
    }

    fn foo(name: Option<&str>, age: Option<i32>) -> Foo {
        Foo {
            name: name.map(str::to_string),
            age,
        }
    }

    #[test]
    fn test_to_map_all_properties() {
        let map = to_map(Some(&foo(Some("Tom"), Some(18))), false);
        assert_eq!(map.get("name"), Some(&json!("Tom")));
        assert_eq!(map.get("age"), Some(&json!(18)));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["name", "age"]);
    }

    #[test]
    fn test_to_map_ignore_null() {
        let record = foo(None, Some(18));

        let map = to_map(Some(&record), true);
        assert!(!map.contains_key("name"));
        assert_eq!(map.get("age"), Some(&json!(18)));

        let map = to_map(Some(&record), false);
        assert_eq!(map.get("name"), Some(&Value::Null));
    }

    #[test]
    fn test_to_map_none_is_empty() {
        assert!(to_map(None::<&Foo>, false).is_empty());
        assert!(to_map(None::<&Foo>, true).is_empty());
    }

    #[test]
    fn test_from_map() {
        let mut map = PropertyMap::new();
        map.insert("name".to_string(), json!("Green"));
        map.insert("age".to_string(), json!(36));

        let record: Foo = from_map(Some(&map)).unwrap();
        assert_eq!(record, foo(Some("Green"), Some(36)));
    }

    #[test]
    fn test_from_map_none_is_default() {
        let record: Foo = from_map(None).unwrap();
        assert_eq!(record, Foo::default());
    }

    #[test]
    fn test_from_map_into_overrides() {
        let mut map = PropertyMap::new();
        map.insert("name".to_string(), json!("Polly"));
        map.insert("age".to_string(), json!(2));

        let mut record = foo(None, Some(1));
        from_map_into(Some(&map), &mut record).unwrap();
        assert_eq!(record, foo(Some("Polly"), Some(2)));
    }

    #[test]
    fn test_from_map_into_none_is_noop() {
        let mut record = foo(Some("Harry"), Some(18));
        let same = from_map_into(None, &mut record).unwrap().clone();
        assert_eq!(same, foo(Some("Harry"), Some(18)));
    }

    #[test]
    fn test_from_map_null_clears_optional_field() {
        let mut map = PropertyMap::new();
        map.insert("age".to_string(), Value::Null);

        let mut record = foo(Some("Tom"), Some(18));
        from_map_into(Some(&map), &mut record).unwrap();
        assert_eq!(record, foo(Some("Tom"), None));
    }

    #[test]
    fn test_to_map_dyn() {
        let record = foo(Some("Jack"), None);
        let erased: &dyn Record = &record;
        let map = to_map_dyn(erased, true);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("name"), Some(&json!("Jack")));
    }
}
