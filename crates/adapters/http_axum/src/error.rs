//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use jsonstore_domain::error::JsonStoreError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps service errors and rejected request bodies to an HTTP response
/// with appropriate status code.
pub enum ApiError {
    /// Error returned by the record service.
    Service(JsonStoreError),
    /// The request body is not valid JSON.
    Body(serde_json::Error),
}

impl From<JsonStoreError> for ApiError {
    fn from(err: JsonStoreError) -> Self {
        Self::Service(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Body(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Service(JsonStoreError::Validation(err)) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            Self::Service(JsonStoreError::NotFound(err)) => {
                tracing::debug!(id = %err.id, "{err}");
                (StatusCode::NOT_FOUND, err.to_string())
            }
            Self::Service(JsonStoreError::Storage(err)) => {
                tracing::error!(error = %err, "storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
            Self::Body(err) => (StatusCode::BAD_REQUEST, err.to_string()),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use jsonstore_domain::error::{NotFoundError, ValidationError};

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn should_map_validation_to_bad_request() {
        let (status, body) = render(JsonStoreError::from(ValidationError::MissingData).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": "'data' field is required"}));
    }

    #[tokio::test]
    async fn should_map_not_found_to_404() {
        let err = JsonStoreError::from(NotFoundError {
            entity: "Record",
            id: "1".to_string(),
        });
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "Record not found"}));
    }

    #[tokio::test]
    async fn should_map_undecodable_body_to_bad_request() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let message = err.to_string();
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, serde_json::json!({"error": message}));
    }

    #[tokio::test]
    async fn should_pass_storage_message_through_on_500() {
        let err = JsonStoreError::Storage("database is locked".into());
        let (status, body) = render(err.into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, serde_json::json!({"error": "database is locked"}));
    }
}
