//! In-memory store backend for tests and ephemeral sessions.

use std::collections::HashMap;

use serde_json::Value;
use tokio::sync::Mutex;

use super::{RecordStore, StoreError, max_record_id};

#[derive(Debug, Default)]
struct CollectionState {
    next_id: i64,
    records: Vec<Value>,
}

impl CollectionState {
    fn counter(&mut self) -> &mut i64 {
        if self.next_id < 1 {
            self.next_id = max_record_id(&self.records) + 1;
        }
        &mut self.next_id
    }
}

/// Store backend holding all collections in process memory.
///
/// Same contract as the file backend, minus durability. Used as the test
/// fake.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<HashMap<String, CollectionState>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    async fn load(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        let state = self.state.lock().await;
        Ok(state
            .get(collection)
            .map(|c| c.records.clone())
            .unwrap_or_default())
    }

    async fn save(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let entry = state.entry(collection.to_string()).or_default();
        let current = *entry.counter();
        entry.next_id = current.max(max_record_id(&records) + 1);
        entry.records = records;
        Ok(())
    }

    async fn next_id(&self, collection: &str) -> Result<i64, StoreError> {
        let mut state = self.state.lock().await;
        let counter = state.entry(collection.to_string()).or_default().counter();
        let id = *counter;
        *counter += 1;
        Ok(id)
    }
}
