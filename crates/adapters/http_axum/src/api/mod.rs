//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod records;

use axum::Router;
use axum::routing::{delete, get, post, put};

use jsonstore_app::ports::RecordRepository;

use crate::state::AppState;

/// Build the record API sub-router.
pub fn routes<R>() -> Router<AppState<R>>
where
    R: RecordRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/save", post(records::save::<R>))
        .route("/get/{id}", get(records::get::<R>))
        .route("/all", get(records::list::<R>))
        .route("/update/{id}", put(records::update::<R>))
        .route("/delete/{id}", delete(records::delete::<R>))
}
