//! Unified error handling for the storefront engines.
//!
//! Provides a unified `AppError` type covering the three failure classes the
//! engines surface: a referenced identity is absent, a caller-supplied value
//! is malformed, or the persistence layer failed. All service operations
//! return `Result<T, AppError>`.

use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Operation referenced an identity absent from the collection.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller-supplied value was malformed (non-positive quantity,
    /// inverted price bounds).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A record failed ingress validation at the persistence boundary.
    #[error("Invalid {collection} record {id}: {reason}")]
    InvalidRecord {
        collection: &'static str,
        id: i64,
        reason: String,
    },

    /// The persistence layer could not read or write.
    #[error("Storage failure: {0}")]
    Storage(#[from] StoreError),
}

impl AppError {
    /// Shorthand for a `NotFound` error over a collection + identity pair.
    #[must_use]
    pub fn not_found(collection: &str, id: i64) -> Self {
        Self::NotFound(format!("{collection} record {id}"))
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::not_found("products", 123);
        assert_eq!(err.to_string(), "Not found: products record 123");

        let err = AppError::InvalidArgument("quantity must be >= 1".to_string());
        assert_eq!(err.to_string(), "Invalid argument: quantity must be >= 1");

        let err = AppError::InvalidRecord {
            collection: "products",
            id: 7,
            reason: "sizes must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid products record 7: sizes must not be empty"
        );
    }

    #[test]
    fn test_storage_error_conversion() {
        let store_err = StoreError::Corrupt("cart".to_string());
        let err = AppError::from(store_err);
        assert!(matches!(err, AppError::Storage(_)));
    }
}
