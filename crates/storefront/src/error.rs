//! Unified error handling.
//!
//! Each layer has its own error enum; [`StorefrontError`] gathers them for
//! callers such as the CLI that drive several layers in one operation.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront client.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Persistent storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backend API operation failed.
    #[error("Backend error: {0}")]
    Api(#[from] ApiError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A form submission was refused; the message was already shown.
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorefrontError::NotFound("product kb-01".to_string());
        assert_eq!(err.to_string(), "Not found: product kb-01");

        let err = StorefrontError::from(ConfigError::MissingEnvVar("INFPRO_STORAGE_PATH".into()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Missing environment variable: INFPRO_STORAGE_PATH"
        );
    }

    #[test]
    fn test_storage_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: StorefrontError = StorageError::from(io).into();
        assert!(matches!(err, StorefrontError::Storage(StorageError::Io(_))));
    }
}
