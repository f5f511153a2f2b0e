//! Axum router assembly.

use axum::Router;
use axum::routing::get;
use tower_http::trace::TraceLayer;

use jsonstore_app::ports::RecordRepository;

use crate::state::AppState;

/// Text returned by `GET /`.
pub const BANNER: &str = "JSON Storage API with Name is running.";

/// Build the top-level axum [`Router`].
///
/// Serves the banner and health check, merges the record API routes, and
/// includes a [`TraceLayer`] that logs each HTTP request/response at the
/// `DEBUG` level using the `tracing` ecosystem.
pub fn build<R>(state: AppState<R>) -> Router
where
    R: RecordRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health_check))
        .merge(crate::api::routes::<R>())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn banner() -> &'static str {
    BANNER
}

async fn health_check() -> &'static str {
    "OK"
}
