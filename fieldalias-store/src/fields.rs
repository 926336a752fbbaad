//! Field store backends
//!
//! A field store holds the named string values attached to each record. Reads
//! of a missing record yield an empty map rather than an error; writing a field
//! creates the record document if it does not exist yet. Record documents are
//! never deleted, only individual fields.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::Result;
use crate::fsutil::atomic_write;
use crate::types::{RecordDoc, RecordId, RecordSummary};

/// Storage abstraction for record fields
#[async_trait]
pub trait FieldStore: Send + Sync {
    /// All fields on a record. Empty if the record is absent.
    async fn fields(&self, record: RecordId) -> Result<BTreeMap<String, String>>;

    /// A single field value, or `None` if the record or field is absent.
    async fn field(&self, record: RecordId, name: &str) -> Result<Option<String>>;

    /// Create or overwrite a field value.
    async fn set_field(&self, record: RecordId, name: &str, value: &str) -> Result<()>;

    /// Remove a field. No-op when the record or field is absent.
    async fn delete_field(&self, record: RecordId, name: &str) -> Result<()>;
}

/// Read-only record enumeration for the selection control
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// All known records, ordered by id.
    async fn list_records(&self) -> Result<Vec<RecordSummary>>;
}

/// YAML-based field store: one `<id>.yaml` document per record.
pub struct YamlFieldStore {
    records_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl YamlFieldStore {
    /// Create new storage with the given directory
    pub fn new(records_dir: PathBuf) -> Self {
        Self {
            records_dir,
            write_lock: Mutex::new(()),
        }
    }

    fn record_path(&self, record: RecordId) -> PathBuf {
        self.records_dir.join(format!("{record}.yaml"))
    }

    async fn load_doc(&self, record: RecordId) -> Result<Option<RecordDoc>> {
        let path = self.record_path(record);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).await?;
        Ok(Some(serde_yaml::from_str(&content)?))
    }

    async fn store_doc(&self, doc: &RecordDoc) -> Result<()> {
        fs::create_dir_all(&self.records_dir).await?;
        let yaml = serde_yaml::to_string(doc)?;
        atomic_write(&self.record_path(doc.id), yaml.as_bytes()).await
    }

    /// Seed a record document with a title. Existing documents are preserved.
    pub async fn insert_record(&self, record: RecordId, title: &str) -> Result<()> {
        let _lock = self.write_lock.lock().await;
        if self.load_doc(record).await?.is_none() {
            self.store_doc(&RecordDoc::new(record, title)).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl FieldStore for YamlFieldStore {
    async fn fields(&self, record: RecordId) -> Result<BTreeMap<String, String>> {
        Ok(self
            .load_doc(record)
            .await?
            .map(|doc| doc.fields)
            .unwrap_or_default())
    }

    async fn field(&self, record: RecordId, name: &str) -> Result<Option<String>> {
        Ok(self
            .load_doc(record)
            .await?
            .and_then(|doc| doc.fields.get(name).cloned()))
    }

    async fn set_field(&self, record: RecordId, name: &str, value: &str) -> Result<()> {
        let _lock = self.write_lock.lock().await;
        let mut doc = self
            .load_doc(record)
            .await?
            .unwrap_or_else(|| RecordDoc::new(record, ""));
        doc.fields.insert(name.to_string(), value.to_string());
        self.store_doc(&doc).await
    }

    async fn delete_field(&self, record: RecordId, name: &str) -> Result<()> {
        let _lock = self.write_lock.lock().await;
        if let Some(mut doc) = self.load_doc(record).await? {
            if doc.fields.remove(name).is_some() {
                self.store_doc(&doc).await?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RecordSource for YamlFieldStore {
    async fn list_records(&self) -> Result<Vec<RecordSummary>> {
        let mut records = Vec::new();
        if !self.records_dir.exists() {
            return Ok(records);
        }
        let mut entries = fs::read_dir(&self.records_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path).await?;
            match serde_yaml::from_str::<RecordDoc>(&content) {
                Ok(doc) => records.push(RecordSummary {
                    id: doc.id,
                    title: doc.title,
                }),
                Err(e) => {
                    warn!(?path, %e, "skipping invalid record document");
                }
            }
        }
        records.sort_by_key(|r| r.id);
        Ok(records)
    }
}

/// In-memory field store for tests and embedding hosts.
#[derive(Default)]
pub struct MemoryFieldStore {
    records: Mutex<HashMap<RecordId, RecordDoc>>,
}

impl MemoryFieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record with a title. Existing records are preserved.
    pub async fn insert_record(&self, record: RecordId, title: &str) {
        self.records
            .lock()
            .await
            .entry(record)
            .or_insert_with(|| RecordDoc::new(record, title));
    }
}

#[async_trait]
impl FieldStore for MemoryFieldStore {
    async fn fields(&self, record: RecordId) -> Result<BTreeMap<String, String>> {
        Ok(self
            .records
            .lock()
            .await
            .get(&record)
            .map(|doc| doc.fields.clone())
            .unwrap_or_default())
    }

    async fn field(&self, record: RecordId, name: &str) -> Result<Option<String>> {
        Ok(self
            .records
            .lock()
            .await
            .get(&record)
            .and_then(|doc| doc.fields.get(name).cloned()))
    }

    async fn set_field(&self, record: RecordId, name: &str, value: &str) -> Result<()> {
        self.records
            .lock()
            .await
            .entry(record)
            .or_insert_with(|| RecordDoc::new(record, ""))
            .fields
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    async fn delete_field(&self, record: RecordId, name: &str) -> Result<()> {
        if let Some(doc) = self.records.lock().await.get_mut(&record) {
            doc.fields.remove(name);
        }
        Ok(())
    }
}

#[async_trait]
impl RecordSource for MemoryFieldStore {
    async fn list_records(&self) -> Result<Vec<RecordSummary>> {
        let records = self.records.lock().await;
        let mut out: Vec<RecordSummary> = records
            .values()
            .map(|doc| RecordSummary {
                id: doc.id,
                title: doc.title.clone(),
            })
            .collect();
        out.sort_by_key(|r| r.id);
        Ok(out)
    }
}
