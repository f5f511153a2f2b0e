//! Helpers shared by the adapter's unit tests.

use axum::response::Response;
use http_body_util::BodyExt;
use jsonstore_app::services::record_service::RecordService;
use jsonstore_app::testing::InMemoryRecordRepo;

use crate::state::AppState;

pub fn test_state() -> AppState<InMemoryRecordRepo> {
    AppState::new(RecordService::new(InMemoryRecordRepo::default()))
}

pub async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
