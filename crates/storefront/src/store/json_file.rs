//! File-backed store: one JSON document per collection.
//!
//! Each document carries the record sequence plus the identity counter, so
//! the counter survives deletion of the highest-numbered record. Writes go
//! through a temp file + rename, so a reader never observes a partial
//! document.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::debug;

use super::{RecordStore, StoreError, max_record_id};

/// On-disk document for one collection.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CollectionDocument {
    /// Next identity to hand out. 0 means "not yet seeded"; normalized to
    /// max existing identity + 1 on first read.
    #[serde(default)]
    next_id: i64,
    #[serde(default)]
    records: Vec<Value>,
}

impl CollectionDocument {
    fn normalized(mut self) -> Self {
        if self.next_id < 1 {
            self.next_id = max_record_id(&self.records) + 1;
        }
        self
    }
}

/// Store backend keeping one `<collection>.json` document per collection
/// under a data directory.
pub struct JsonFileStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles on the documents.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn document_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    async fn read_document(&self, collection: &str) -> Result<CollectionDocument, StoreError> {
        let path = self.document_path(collection);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let document: CollectionDocument = serde_json::from_slice(&bytes)?;
                Ok(document.normalized())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(collection, "collection document absent, initializing empty");
                Ok(CollectionDocument::default().normalized())
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn write_document(
        &self,
        collection: &str,
        document: &CollectionDocument,
    ) -> Result<(), StoreError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let bytes = serde_json::to_vec_pretty(document)?;
        let path = self.document_path(collection);
        let tmp = temp_path(&path);
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &path).await?;
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[async_trait::async_trait]
impl RecordStore for JsonFileStore {
    async fn load(&self, collection: &str) -> Result<Vec<Value>, StoreError> {
        Ok(self.read_document(collection).await?.records)
    }

    async fn save(&self, collection: &str, records: Vec<Value>) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document(collection).await?;
        // Keep the counter ahead of externally supplied identities (seeding).
        document.next_id = document.next_id.max(max_record_id(&records) + 1);
        document.records = records;
        self.write_document(collection, &document).await
    }

    async fn next_id(&self, collection: &str) -> Result<i64, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.read_document(collection).await?;
        let id = document.next_id;
        document.next_id = id + 1;
        self.write_document(collection, &document).await?;
        Ok(id)
    }
}
