//! beankit - conversion and copying helpers for typed records
//!
//! Provides:
//! - A named-property view over record types ([`property`])
//! - Record to map conversion and back, single and batch ([`convert`])
//! - Record to record copying through cached per-type-pair plans ([`copier`])
//! - A fluent map builder that drops empty values ([`builder`])
//! - JSON text helpers built on the map conversion ([`json`])

pub mod builder;
pub mod convert;
pub mod copier;
pub mod json;
pub mod property;

// Re-export commonly used types
pub use builder::{BuilderConfig, BuilderError, MapBuilder};
pub use convert::{from_map, from_map_into, from_maps, to_map, to_map_dyn, to_maps};
pub use copier::{Copier, CopierCache, CopyError, copy, copy_many, copy_many_dyn};
pub use json::{JsonError, from_json, json_to_map, json_to_records, to_json};
pub use property::{
    FieldType, PropertyError, PropertyMap, PropertyType, Record, RecordDescriptor,
};

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::OnceCell;
    pub use serde_json::Value;
}
