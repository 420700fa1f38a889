//! Scripted catalogue used by the content tests

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use crate::catalog::{CatalogRecord, DescriptionEntry, RemoteCatalog, StatValue};
use crate::error::CatalogError;

pub(crate) fn record(key: u32) -> CatalogRecord {
    let name = match key {
        1 => "bulbasaur".to_string(),
        2 => "ivysaur".to_string(),
        3 => "venusaur".to_string(),
        122 => "mr-mime".to_string(),
        other => format!("entry-{other}"),
    };

    CatalogRecord {
        key,
        name,
        descriptions: vec![
            DescriptionEntry {
                text: "Une graine".to_string(),
                language: "fr".to_string(),
                version: None,
            },
            DescriptionEntry {
                text: "A strange seed was\nplanted on its\u{c}back at birth.".to_string(),
                language: "en".to_string(),
                version: Some("red".to_string()),
            },
        ],
        categories: vec!["grass".to_string(), "poison".to_string()],
        height: 7,
        weight: 69,
        stats: vec![StatValue { name: "hp".to_string(), value: 45 }],
    }
}

/// In-memory catalogue with per-key latency, failure injection and a call log
pub(crate) struct ScriptedCatalog {
    latency: Duration,
    slow: Mutex<HashMap<u32, Duration>>,
    failing: Mutex<HashMap<u32, CatalogError>>,
    calls: Mutex<Vec<u32>>,
}

impl ScriptedCatalog {
    pub(crate) fn new(latency: Duration) -> Self {
        Self {
            latency,
            slow: Mutex::new(HashMap::new()),
            failing: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_latency(self, key: u32, latency: Duration) -> Self {
        self.slow.lock().insert(key, latency);
        self
    }

    pub(crate) fn with_failure(self, key: u32, error: CatalogError) -> Self {
        self.failing.lock().insert(key, error);
        self
    }

    pub(crate) fn calls(&self) -> Vec<u32> {
        self.calls.lock().clone()
    }
}

#[async_trait::async_trait]
impl RemoteCatalog for ScriptedCatalog {
    async fn lookup(&self, key: u32) -> Result<CatalogRecord, CatalogError> {
        self.calls.lock().push(key);
        let latency = self.slow.lock().get(&key).copied().unwrap_or(self.latency);
        tokio::time::sleep(latency).await;

        if let Some(err) = self.failing.lock().get(&key).cloned() {
            return Err(err);
        }
        Ok(record(key))
    }

    fn source_name(&self) -> &str {
        "scripted"
    }
}
