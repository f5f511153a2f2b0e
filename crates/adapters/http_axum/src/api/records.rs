//! JSON REST handlers for records.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use jsonstore_app::ports::RecordRepository;
use jsonstore_domain::error::JsonStoreError;
use jsonstore_domain::id::{RecordId, RecordKey};
use jsonstore_domain::record::{NewRecord, Record, RecordPatch};

use crate::error::ApiError;
use crate::state::AppState;

/// Request body shared by the save and update endpoints.
///
/// The body is decoded from raw bytes whatever its `Content-Type`, and both
/// fields are optional at this level so that presence rules are enforced by
/// the domain and reported as `{error}` bodies.
#[derive(Debug, Default, PartialEq)]
pub struct RecordBody {
    /// `None` when the key is absent or its value is falsy (`null`, `false`,
    /// `0`, `""`).
    pub name: Option<String>,
    /// `None` when the key is absent, `Some(Value::Null)` for an explicit `null`.
    pub data: Option<Value>,
}

/// Text form of a supplied `name`. Strings are taken as-is, any other truthy
/// value is stored as its JSON text.
fn name_text(value: Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64().is_some_and(|f| f.abs() < f64::EPSILON) => None,
        Value::String(name) if name.is_empty() => None,
        Value::String(name) => Some(name),
        other => Some(other.to_string()),
    }
}

impl RecordBody {
    /// Decode a request body.
    ///
    /// An empty body, or a JSON value that is not an object, supplies no
    /// fields.
    ///
    /// # Errors
    ///
    /// Returns the decoder's error when the bytes are not valid JSON.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        let Value::Object(mut fields) = serde_json::from_slice::<Value>(bytes)? else {
            return Ok(Self::default());
        };
        Ok(Self {
            name: fields.remove("name").and_then(name_text),
            data: fields.remove("data"),
        })
    }

    /// Turn a save body into a validated [`NewRecord`].
    ///
    /// # Errors
    ///
    /// Returns [`JsonStoreError::Validation`] if `name` or `data` is missing.
    pub fn into_new_record(self) -> Result<NewRecord, JsonStoreError> {
        let mut builder = NewRecord::builder();
        if let Some(name) = self.name {
            builder = builder.name(name);
        }
        if let Some(data) = self.data {
            builder = builder.data(data);
        }
        builder.build()
    }

    /// Turn an update body into a sparse [`RecordPatch`].
    #[must_use]
    pub fn into_patch(self) -> RecordPatch {
        RecordPatch::new(self.name, self.data)
    }
}

/// Body of a successful save.
#[derive(Debug, Serialize)]
pub struct SavedBody {
    pub success: bool,
    pub id: RecordId,
}

/// Body of a successful update or delete.
#[derive(Debug, Serialize)]
pub struct SuccessBody {
    pub success: bool,
}

/// Possible responses from the save endpoint.
pub enum SaveResponse {
    Ok(Json<SavedBody>),
}

impl IntoResponse for SaveResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Record>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the list endpoint.
pub enum ListResponse {
    Ok(Json<Vec<Record>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the update and delete endpoints.
pub enum SuccessResponse {
    Ok,
}

impl IntoResponse for SuccessResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok => Json(SuccessBody { success: true }).into_response(),
        }
    }
}

/// `POST /save`
pub async fn save<R>(
    State(state): State<AppState<R>>,
    body: Bytes,
) -> Result<SaveResponse, ApiError>
where
    R: RecordRepository + Send + Sync + 'static,
{
    let record = RecordBody::from_slice(&body)?.into_new_record()?;
    let id = state.record_service.create_record(record).await?;
    Ok(SaveResponse::Ok(Json(SavedBody { success: true, id })))
}

/// `GET /get/{id}`
pub async fn get<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    R: RecordRepository + Send + Sync + 'static,
{
    let record = state.record_service.get_record(RecordKey::new(id)).await?;
    Ok(GetResponse::Ok(Json(record)))
}

/// `GET /all`
pub async fn list<R>(State(state): State<AppState<R>>) -> Result<ListResponse, ApiError>
where
    R: RecordRepository + Send + Sync + 'static,
{
    let records = state.record_service.list_records().await?;
    Ok(ListResponse::Ok(Json(records)))
}

/// `PUT /update/{id}`
pub async fn update<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<SuccessResponse, ApiError>
where
    R: RecordRepository + Send + Sync + 'static,
{
    let patch = RecordBody::from_slice(&body)?.into_patch();
    state
        .record_service
        .update_record(RecordKey::new(id), patch)
        .await?;
    Ok(SuccessResponse::Ok)
}

/// `DELETE /delete/{id}`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<SuccessResponse, ApiError>
where
    R: RecordRepository + Send + Sync + 'static,
{
    state
        .record_service
        .delete_record(RecordKey::new(id))
        .await?;
    Ok(SuccessResponse::Ok)
}
