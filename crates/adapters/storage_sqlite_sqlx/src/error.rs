//! Storage-specific error type wrapping sqlx errors.

use jsonstore_domain::error::JsonStoreError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<StorageError> for JsonStoreError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
