//! Field plans for copying between two record types

use std::any::TypeId;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::property::{FieldType, PropertyResult, Record, RecordDescriptor};

/// Why a field takes no part in a copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum SkipReason {
    /// Only the source declares the field
    NotInTarget,
    /// Only the target declares the field; it keeps its default
    NotInSource,
    /// Both declare it with different types
    TypeMismatch {
        source_type: FieldType,
        target_type: FieldType,
    },
}

/// A field left out of a copy plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedField {
    pub name: &'static str,
    pub reason: SkipReason,
}

/// Copy plan bound to one (source type, target type) pair
///
/// A field is copied when both types declare it under the same name with an
/// identical [`FieldType`]. Everything else is skipped silently; the skipped
/// list is kept only for diagnostics. Plans are immutable once built.
#[derive(Debug, Clone)]
pub struct Copier {
    source: &'static str,
    target: &'static str,
    source_type: TypeId,
    target_type: TypeId,
    fields: Vec<&'static str>,
    skipped: Vec<SkippedField>,
}

impl Copier {
    /// Match the fields of `source` against `target`
    pub fn build(source: &RecordDescriptor, target: &RecordDescriptor) -> Self {
        let mut fields = Vec::new();
        let mut skipped = Vec::new();

        for field in source.fields() {
            match target.field(field.name) {
                Some(t) if t.field_type == field.field_type => fields.push(field.name),
                Some(t) => skipped.push(SkippedField {
                    name: field.name,
                    reason: SkipReason::TypeMismatch {
                        source_type: field.field_type.clone(),
                        target_type: t.field_type.clone(),
                    },
                }),
                None => skipped.push(SkippedField {
                    name: field.name,
                    reason: SkipReason::NotInTarget,
                }),
            }
        }

        for field in target.fields() {
            if !source.has_field(field.name) {
                skipped.push(SkippedField {
                    name: field.name,
                    reason: SkipReason::NotInSource,
                });
            }
        }

        debug!(
            source = source.name,
            target = target.name,
            copied = fields.len(),
            skipped = skipped.len(),
            "Built copier"
        );

        Self {
            source: source.name,
            target: target.name,
            source_type: source.type_id,
            target_type: target.type_id,
            fields,
            skipped,
        }
    }

    /// Copy every planned field from `source` into `target`
    ///
    /// Null values are copied like any other value. Fields are cloned
    /// directly when both records expose their Rust values, and converted
    /// through [`Value`](serde_json::Value) otherwise.
    pub fn apply(&self, source: &dyn Record, target: &mut dyn Record) -> PropertyResult<()> {
        for name in &self.fields {
            let cloned = source
                .property_ref(name)
                .is_some_and(|value| target.set_property_from(name, value));
            if cloned {
                continue;
            }

            trace!(source = self.source, target = self.target, field = *name, "Copying through value");
            if let Some(value) = source.get_property(name) {
                target.set_property(name, value)?;
            }
        }
        Ok(())
    }

    /// Names of the fields this plan copies
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    pub fn skipped(&self) -> &[SkippedField] {
        &self.skipped
    }

    pub fn source_name(&self) -> &'static str {
        self.source
    }

    pub fn target_name(&self) -> &'static str {
        self.target
    }

    /// Cache key of this plan
    pub fn key(&self) -> (TypeId, TypeId) {
        (self.source_type, self.target_type)
    }
}
