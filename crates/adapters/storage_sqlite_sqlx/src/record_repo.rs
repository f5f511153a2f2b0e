//! `SQLite` implementation of [`RecordRepository`].

use serde_json::Value;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Row, Sqlite, SqlitePool};

use jsonstore_app::ports::RecordRepository;
use jsonstore_domain::error::{JsonStoreError, ValidationError};
use jsonstore_domain::id::{RecordId, RecordKey};
use jsonstore_domain::payload;
use jsonstore_domain::record::{NewRecord, Record, RecordPatch};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without polluting
/// domain structs with database concerns.
struct Wrapper(Record);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Record> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let data: Option<String> = row.try_get("data")?;

        let data = match data {
            Some(text) => {
                let (value, err) = payload::decode_or_null(&text);
                if let Some(err) = err {
                    tracing::warn!(id, error = %err, "stored payload is not valid JSON, returning null");
                }
                value
            }
            None => Value::Null,
        };

        Ok(Self(Record {
            id: RecordId::new(id),
            name,
            data,
        }))
    }
}

const INSERT: &str = "INSERT INTO json_data (name, data) VALUES (?, ?)";
const SELECT_BY_ID: &str = "SELECT id, name, data FROM json_data WHERE id = ?";
const SELECT_ALL: &str = "SELECT id, name, data FROM json_data";
const UPDATE_PREFIX: &str = "UPDATE json_data SET ";
const DELETE_BY_ID: &str = "DELETE FROM json_data WHERE id = ?";

/// Column assignments for a patch, in a fixed column order.
///
/// Only supplied fields produce an entry; payloads are already encoded.
fn assignments(patch: RecordPatch) -> Vec<(&'static str, String)> {
    let RecordPatch { name, data } = patch;
    [("name", name), ("data", data.as_ref().map(payload::encode))]
        .into_iter()
        .filter_map(|(column, value)| value.map(|value| (column, value)))
        .collect()
}

/// `SQLite`-backed record repository.
pub struct SqliteRecordRepository {
    pool: SqlitePool,
}

impl SqliteRecordRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl RecordRepository for SqliteRecordRepository {
    async fn create(&self, record: NewRecord) -> Result<RecordId, JsonStoreError> {
        let result = sqlx::query(INSERT)
            .bind(&record.name)
            .bind(payload::encode(&record.data))
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(RecordId::new(result.last_insert_rowid()))
    }

    async fn get_by_id(&self, key: RecordKey) -> Result<Option<Record>, JsonStoreError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_ID)
            .bind(key.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn get_all(&self) -> Result<Vec<Record>, JsonStoreError> {
        let rows: Vec<Wrapper> = sqlx::query_as(SELECT_ALL)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn update(&self, key: RecordKey, patch: RecordPatch) -> Result<u64, JsonStoreError> {
        let assignments = assignments(patch);
        if assignments.is_empty() {
            return Err(ValidationError::NothingToUpdate.into());
        }

        let mut query = QueryBuilder::<Sqlite>::new(UPDATE_PREFIX);
        let mut set = query.separated(", ");
        for (column, value) in assignments {
            set.push(format_args!("{column} = "));
            set.push_bind_unseparated(value);
        }
        query.push(" WHERE id = ").push_bind(key.as_str());

        let result = query
            .build()
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, key: RecordKey) -> Result<u64, JsonStoreError> {
        let result = sqlx::query(DELETE_BY_ID)
            .bind(key.as_str())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(result.rows_affected())
    }
}
