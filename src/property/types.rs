//! Field and record descriptors

use std::any::TypeId;

use serde::{Deserialize, Serialize};

/// Declared type of a record field
///
/// Two fields are copy-compatible only when their `FieldType`s are equal.
/// There is no widening (`I32` never matches `I64`) and nullability is part
/// of the type (`I32` never matches `Optional(I32)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Bool,
    I32,
    I64,
    F64,
    String,
    Uuid,
    /// UTC timestamp, carried as RFC 3339 text
    DateTime,
    /// Calendar date, carried as `YYYY-MM-DD`
    Date,
    /// Untyped JSON value
    Json,
    Optional(Box<FieldType>),
    List(Box<FieldType>),
    Set(Box<FieldType>),
    /// String-keyed map
    Map(Box<FieldType>),
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldType::Bool => write!(f, "bool"),
            FieldType::I32 => write!(f, "i32"),
            FieldType::I64 => write!(f, "i64"),
            FieldType::F64 => write!(f, "f64"),
            FieldType::String => write!(f, "string"),
            FieldType::Uuid => write!(f, "uuid"),
            FieldType::DateTime => write!(f, "datetime"),
            FieldType::Date => write!(f, "date"),
            FieldType::Json => write!(f, "json"),
            FieldType::Optional(inner) => write!(f, "{}?", inner),
            FieldType::List(inner) => write!(f, "list<{}>", inner),
            FieldType::Set(inner) => write!(f, "set<{}>", inner),
            FieldType::Map(inner) => write!(f, "map<{}>", inner),
        }
    }
}

/// A single named, typed field of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub field_type: FieldType,
}

impl FieldDescriptor {
    pub fn new(name: &'static str, field_type: FieldType) -> Self {
        Self { name, field_type }
    }
}

/// Introspected shape of a record type
///
/// Built once per type and kept for the life of the process. Field order is
/// declaration order and is the order used when emitting maps.
#[derive(Debug, Clone)]
pub struct RecordDescriptor {
    /// Short type name used in logs and errors
    pub name: &'static str,
    /// Runtime identity of the record type
    pub type_id: TypeId,
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    /// Create a descriptor with no fields
    pub fn new(name: &'static str, type_id: TypeId) -> Self {
        Self {
            name,
            type_id,
            fields: Vec::new(),
        }
    }

    /// Create a descriptor for `T`
    pub fn of<T: 'static>(name: &'static str) -> Self {
        Self::new(name, TypeId::of::<T>())
    }

    /// Add a field; a second field with an existing name replaces the first
    pub fn with_field(mut self, name: &'static str, field_type: FieldType) -> Self {
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(existing) => existing.field_type = field_type,
            None => self.fields.push(FieldDescriptor::new(name, field_type)),
        }
        self
    }

    /// All fields in declaration order
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
