//! Storage port — repository trait for record persistence.

use std::future::Future;

use jsonstore_domain::error::JsonStoreError;
use jsonstore_domain::id::{RecordId, RecordKey};
use jsonstore_domain::record::{NewRecord, Record, RecordPatch};

/// Repository for persisting and querying [`Record`]s.
///
/// Every method maps to exactly one store statement. Write methods report
/// the number of affected rows and leave "nothing matched" to the caller.
pub trait RecordRepository {
    /// Insert a new record and return the id the store assigned.
    fn create(
        &self,
        record: NewRecord,
    ) -> impl Future<Output = Result<RecordId, JsonStoreError>> + Send;

    /// Get a record by key.
    fn get_by_id(
        &self,
        key: RecordKey,
    ) -> impl Future<Output = Result<Option<Record>, JsonStoreError>> + Send;

    /// Get every record, in whatever order the store returns them.
    fn get_all(&self) -> impl Future<Output = Result<Vec<Record>, JsonStoreError>> + Send;

    /// Write the supplied fields of `patch` and return the affected row count.
    fn update(
        &self,
        key: RecordKey,
        patch: RecordPatch,
    ) -> impl Future<Output = Result<u64, JsonStoreError>> + Send;

    /// Delete a record and return the affected row count.
    fn delete(&self, key: RecordKey) -> impl Future<Output = Result<u64, JsonStoreError>> + Send;
}
