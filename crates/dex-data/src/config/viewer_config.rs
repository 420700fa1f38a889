//! Viewer configuration file

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use dex_core::{ControllerSettings, RevealUnit, DEFAULT_CATALOG_SIZE};
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::sources::http_source::DEFAULT_BASE_URL;
use crate::DataError;

/// Where catalogue records come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceKind {
    /// Remote HTTP API at `base_url`
    Http,
    /// Built-in demo records, no network
    Demo,
    /// JSON array of records on disk
    File { path: PathBuf },
}

/// Configuration for the viewer, loaded from JSON.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Number of entries; navigation wraps between 1 and this value
    pub catalog_size: u32,

    /// Quiet period after navigation before a lookup is issued
    pub debounce_ms: u64,

    /// Delay between typewriter frames
    pub reveal_interval_ms: u64,

    /// How long a slide direction stays set after a move
    pub transition_ms: u64,

    pub reveal_unit: RevealUnit,

    pub source: SourceKind,

    pub base_url: String,

    pub request_timeout_ms: u64,

    /// Shown in the name slot when a lookup fails
    pub name_fallback: String,

    /// Shown in the description slot when a lookup fails
    pub description_fallback: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            catalog_size: DEFAULT_CATALOG_SIZE,
            debounce_ms: 250,
            reveal_interval_ms: 25,
            transition_ms: 300,
            reveal_unit: RevealUnit::Char,
            source: SourceKind::Http,
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_ms: 10_000,
            name_fallback: "???".to_string(),
            description_fallback: "No description available.".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load and validate a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: ViewerConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise fall back to the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, DataError> {
        match path {
            Some(path) if path.exists() => {
                info!(path = %path.display(), "Loading viewer configuration");
                Self::load(path)
            }
            Some(path) => {
                info!(path = %path.display(), "Configuration file not found, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.catalog_size == 0 {
            return Err(DataError::Config("catalog_size must be at least 1".to_string()));
        }
        if self.reveal_interval_ms == 0 {
            return Err(DataError::Config("reveal_interval_ms must be positive".to_string()));
        }
        if self.source == SourceKind::Http && self.base_url.trim().is_empty() {
            return Err(DataError::Config("base_url is required for the http source".to_string()));
        }
        Ok(())
    }

    /// Controller settings derived from this configuration
    pub fn controller_settings(&self) -> Result<ControllerSettings, DataError> {
        let catalog_size = NonZeroU32::new(self.catalog_size)
            .ok_or_else(|| DataError::Config("catalog_size must be at least 1".to_string()))?;

        Ok(ControllerSettings {
            catalog_size,
            debounce: Duration::from_millis(self.debounce_ms),
            reveal_interval: Duration::from_millis(self.reveal_interval_ms),
            transition: Duration::from_millis(self.transition_ms),
            reveal_unit: self.reveal_unit,
            name_fallback: self.name_fallback.clone(),
            description_fallback: self.description_fallback.clone(),
        })
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), DataError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
