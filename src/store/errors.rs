//! # Record Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// No record with this id exists in the table
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Table file could not be read or written
    #[error("I/O error on table {table}: {message}")]
    Io { table: String, message: String },

    /// Table file exists but does not hold valid records
    #[error("Corrupt table {table}: {message}")]
    Corrupt { table: String, message: String },

    /// A lock guarding the table was poisoned by a panicking writer
    #[error("Table {0} is unavailable: lock poisoned")]
    Poisoned(String),

    /// Record could not be converted to or from JSON
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// True when the error means "no such record" rather than a backend failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StoreError::not_found("Budget", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Budget not found: abc");
    }

    #[test]
    fn test_backend_errors_are_not_not_found() {
        let err = StoreError::Io {
            table: "XmasBudgets".into(),
            message: "disk full".into(),
        };
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("XmasBudgets"));
    }
}
