//! In-memory [`RecordRepository`] for tests in this and downstream crates.
//!
//! Enabled for this crate's own tests, and for other crates through the
//! `test-support` feature.

use std::collections::BTreeMap;
use std::sync::Mutex;

use jsonstore_domain::error::JsonStoreError;
use jsonstore_domain::id::{RecordId, RecordKey};
use jsonstore_domain::record::{NewRecord, Record, RecordPatch};

use crate::ports::RecordRepository;

/// Map-backed repository. Ids come from a counter and are never reused,
/// matching an `AUTOINCREMENT` table.
#[derive(Debug, Default)]
pub struct InMemoryRecordRepo {
    store: Mutex<BTreeMap<i64, Record>>,
    last_id: Mutex<i64>,
}

impl InMemoryRecordRepo {
    fn lookup(key: &RecordKey) -> Option<i64> {
        key.as_str().parse().ok()
    }
}

fn apply(patch: RecordPatch, record: &mut Record) {
    if let Some(name) = patch.name {
        record.name = name;
    }
    if let Some(data) = patch.data {
        record.data = data;
    }
}

impl RecordRepository for InMemoryRecordRepo {
    async fn create(&self, record: NewRecord) -> Result<RecordId, JsonStoreError> {
        let id = {
            let mut last_id = self.last_id.lock().unwrap();
            *last_id += 1;
            RecordId::new(*last_id)
        };
        self.store.lock().unwrap().insert(
            id.as_i64(),
            Record {
                id,
                name: record.name,
                data: record.data,
            },
        );
        Ok(id)
    }

    async fn get_by_id(&self, key: RecordKey) -> Result<Option<Record>, JsonStoreError> {
        let store = self.store.lock().unwrap();
        Ok(Self::lookup(&key).and_then(|id| store.get(&id).cloned()))
    }

    async fn get_all(&self) -> Result<Vec<Record>, JsonStoreError> {
        Ok(self.store.lock().unwrap().values().cloned().collect())
    }

    async fn update(&self, key: RecordKey, patch: RecordPatch) -> Result<u64, JsonStoreError> {
        let mut store = self.store.lock().unwrap();
        match Self::lookup(&key).and_then(|id| store.get_mut(&id)) {
            Some(record) => {
                apply(patch, record);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, key: RecordKey) -> Result<u64, JsonStoreError> {
        let mut store = self.store.lock().unwrap();
        let removed = Self::lookup(&key).and_then(|id| store.remove(&id));
        Ok(u64::from(removed.is_some()))
    }
}
