//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`JsonStoreError`] via `From`.

/// Top-level error returned by application services.
#[derive(Debug, thiserror::Error)]
pub enum JsonStoreError {
    /// The request did not satisfy a domain rule.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The target record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The underlying store failed. The message is the store's own.
    #[error("{0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

/// Domain rule violations, detected before touching the store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("'name' field is required")]
    MissingName,

    #[error("'data' field is required")]
    MissingData,

    #[error("at least one of 'name' or 'data' is required")]
    NothingToUpdate,
}

/// Lookup miss for a keyed resource.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} not found")]
pub struct NotFoundError {
    /// Human readable resource kind.
    pub entity: &'static str,
    /// Key that was looked up. Diagnostic only: it is logged by callers but
    /// never part of the rendered message.
    pub id: String,
}
