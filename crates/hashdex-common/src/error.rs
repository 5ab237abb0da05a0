//! Error types for Hashdex.

use thiserror::Error;

/// Result type alias using HashdexError.
pub type Result<T> = std::result::Result<T, HashdexError>;

/// Errors that can occur in Hashdex operations.
#[derive(Debug, Error)]
pub enum HashdexError {
    /// The record source could not be opened or read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid page size: {size} (must be positive)")]
    InvalidPageSize { size: usize },

    #[error("Invalid bucket capacity: {capacity} (must be positive)")]
    InvalidBucketCapacity { capacity: usize },

    #[error("Unknown hash strategy: {0}")]
    UnknownHashStrategy(String),

    /// A query was issued before any record store was loaded.
    #[error("No record store loaded")]
    NotLoaded,

    /// An indexed search was issued before any bucket index was constructed.
    #[error("No bucket index constructed")]
    NotIndexed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_io_error_conversion() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: HashdexError = io_err.into();
        assert!(matches!(err, HashdexError::Io(_)));
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_invalid_page_size_display() {
        let err = HashdexError::InvalidPageSize { size: 0 };
        assert_eq!(err.to_string(), "Invalid page size: 0 (must be positive)");
    }

    #[test]
    fn test_invalid_bucket_capacity_display() {
        let err = HashdexError::InvalidBucketCapacity { capacity: 0 };
        assert_eq!(
            err.to_string(),
            "Invalid bucket capacity: 0 (must be positive)"
        );
    }

    #[test]
    fn test_unknown_hash_strategy_display() {
        let err = HashdexError::UnknownHashStrategy("crc32".to_string());
        assert_eq!(err.to_string(), "Unknown hash strategy: crc32");
    }

    #[test]
    fn test_state_errors_display() {
        assert_eq!(HashdexError::NotLoaded.to_string(), "No record store loaded");
        assert_eq!(
            HashdexError::NotIndexed.to_string(),
            "No bucket index constructed"
        );
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(HashdexError::NotLoaded)
        }

        assert!(returns_ok().is_ok());
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HashdexError>();
    }
}
