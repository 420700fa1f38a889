//! In-memory catalogue source

use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use dex_core::{CatalogError, CatalogRecord, RemoteCatalog};

use crate::DataError;

/// Serves records from memory, optionally after a simulated latency.
///
/// Used for demo mode and for offline catalogues exported to JSON.
pub struct StaticCatalog {
    name: String,
    records: HashMap<u32, CatalogRecord>,
    latency: Duration,
}

impl StaticCatalog {
    /// Create an empty catalogue
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            records: HashMap::new(),
            latency: Duration::ZERO,
        }
    }

    pub fn with_records(mut self, records: impl IntoIterator<Item = CatalogRecord>) -> Self {
        for record in records {
            self.insert(record);
        }
        self
    }

    /// Delay every lookup by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Load a JSON array of records
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let records: Vec<CatalogRecord> = serde_json::from_str(&contents)?;

        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("static")
            .to_string();
        Ok(Self::new(name).with_records(records))
    }

    pub fn insert(&mut self, record: CatalogRecord) {
        self.records.insert(record.key, record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RemoteCatalog for StaticCatalog {
    async fn lookup(&self, key: u32) -> Result<CatalogRecord, CatalogError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.records
            .get(&key)
            .cloned()
            .ok_or_else(|| DataError::NotFound(key).into())
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}
