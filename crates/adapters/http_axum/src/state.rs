//! Shared application state for axum handlers.

use std::sync::Arc;

use jsonstore_app::ports::RecordRepository;
use jsonstore_app::services::record_service::RecordService;

/// Application state shared across all axum handlers.
///
/// Generic over the repository type to avoid dynamic dispatch.
/// `Clone` is implemented manually so the repository itself does not
/// need to be `Clone` — only the `Arc` wrapper is cloned.
pub struct AppState<R> {
    /// Record CRUD service.
    pub record_service: Arc<RecordService<R>>,
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            record_service: Arc::clone(&self.record_service),
        }
    }
}

impl<R> AppState<R>
where
    R: RecordRepository + Send + Sync + 'static,
{
    /// Create a new application state from a service instance.
    pub fn new(record_service: RecordService<R>) -> Self {
        Self {
            record_service: Arc::new(record_service),
        }
    }
}
