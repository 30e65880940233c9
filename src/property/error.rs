//! Error types for property access and record construction

use thiserror::Error;

use super::types::FieldType;
use super::value::ValueMismatch;

/// Errors raised while reading, writing or constructing records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    /// The record type could not be default-constructed
    #[error("Failed to instantiate {type_name}: {reason}")]
    Instantiation {
        type_name: &'static str,
        reason: String,
    },

    /// A value could not be converted to the declared field type
    #[error("Field {record}.{field} expects {expected}, got {found}")]
    TypeMismatch {
        record: &'static str,
        field: String,
        expected: FieldType,
        found: String,
    },
}

impl PropertyError {
    /// Build an instantiation error for `type_name`
    pub fn instantiation(type_name: &'static str, reason: impl Into<String>) -> Self {
        Self::Instantiation {
            type_name,
            reason: reason.into(),
        }
    }

    /// Attach record and field context to a value mismatch
    pub fn type_mismatch(record: &'static str, field: &str, mismatch: ValueMismatch) -> Self {
        Self::TypeMismatch {
            record,
            field: field.to_string(),
            expected: mismatch.expected,
            found: mismatch.found,
        }
    }
}

/// Result type for property operations
pub type PropertyResult<T> = Result<T, PropertyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PropertyError::instantiation("Widget", "no default constructor");
        assert_eq!(
            err.to_string(),
            "Failed to instantiate Widget: no default constructor"
        );

        let err = PropertyError::TypeMismatch {
            record: "Foo",
            field: "age".to_string(),
            expected: FieldType::Optional(Box::new(FieldType::I32)),
            found: "string".to_string(),
        };
        assert!(err.to_string().contains("Foo.age"));
        assert!(err.to_string().contains("i32?"));
    }
}
