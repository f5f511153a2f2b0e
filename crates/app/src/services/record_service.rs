//! Record service — use-cases for managing records.

use jsonstore_domain::error::{JsonStoreError, NotFoundError};
use jsonstore_domain::id::{RecordId, RecordKey};
use jsonstore_domain::record::{NewRecord, Record, RecordPatch};

use crate::ports::RecordRepository;

const ENTITY: &str = "Record";

fn not_found(key: &RecordKey) -> JsonStoreError {
    NotFoundError {
        entity: ENTITY,
        id: key.to_string(),
    }
    .into()
}

/// Application service for record CRUD operations.
pub struct RecordService<R> {
    repo: R,
}

impl<R: RecordRepository> RecordService<R> {
    /// Create a new service backed by the given repository.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Store a new record after validating domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`JsonStoreError::Validation`] if invariants fail, or a
    /// storage error propagated from the repository.
    pub async fn create_record(&self, record: NewRecord) -> Result<RecordId, JsonStoreError> {
        record.validate()?;
        let id = self.repo.create(record).await?;
        tracing::debug!(%id, "record created");
        Ok(id)
    }

    /// Look up a record by key, returning an error if not found.
    ///
    /// # Errors
    ///
    /// Returns [`JsonStoreError::NotFound`] when no record matches `key`,
    /// or a storage error from the repository.
    pub async fn get_record(&self, key: RecordKey) -> Result<Record, JsonStoreError> {
        self.repo
            .get_by_id(key.clone())
            .await?
            .ok_or_else(|| not_found(&key))
    }

    /// List all records.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list_records(&self) -> Result<Vec<Record>, JsonStoreError> {
        self.repo.get_all().await
    }

    /// Apply a partial update to an existing record.
    ///
    /// # Errors
    ///
    /// Returns [`JsonStoreError::Validation`] if the patch is empty or
    /// invalid, [`JsonStoreError::NotFound`] if no row was affected, or a
    /// storage error from the repository.
    pub async fn update_record(
        &self,
        key: RecordKey,
        patch: RecordPatch,
    ) -> Result<(), JsonStoreError> {
        patch.validate()?;
        let affected = self.repo.update(key.clone(), patch).await?;
        if affected == 0 {
            return Err(not_found(&key));
        }
        tracing::debug!(%key, "record updated");
        Ok(())
    }

    /// Delete a record by key.
    ///
    /// # Errors
    ///
    /// Returns [`JsonStoreError::NotFound`] if no row was affected, or a
    /// storage error from the repository.
    pub async fn delete_record(&self, key: RecordKey) -> Result<(), JsonStoreError> {
        let affected = self.repo.delete(key.clone()).await?;
        if affected == 0 {
            return Err(not_found(&key));
        }
        tracing::debug!(%key, "record deleted");
        Ok(())
    }
}
