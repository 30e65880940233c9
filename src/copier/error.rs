//! Error types for record copying

use thiserror::Error;

use crate::property::PropertyError;

/// Errors that can occur while copying records
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CopyError {
    /// Constructing or writing the destination failed
    #[error(transparent)]
    Property(#[from] PropertyError),

    /// A batch mixed source types
    #[error("Source at index {index} is {found}, expected {expected} like the first element")]
    HeterogeneousSource {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

/// Result type for copy operations
pub type CopyResult<T> = Result<T, CopyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CopyError::HeterogeneousSource {
            index: 2,
            expected: "Foo",
            found: "Bar",
        };
        assert_eq!(
            err.to_string(),
            "Source at index 2 is Bar, expected Foo like the first element"
        );

        let err: CopyError = PropertyError::instantiation("Baz", "boom").into();
        assert_eq!(err.to_string(), "Failed to instantiate Baz: boom");
    }
}
