//! Remote catalogue abstraction and the records it returns

use serde::{Serialize, Deserialize};

use crate::error::CatalogError;

/// Language tag of the description entries shown in the viewer
pub const DISPLAY_LANGUAGE: &str = "en";

/// Read-only lookup of catalogue entries by key
#[async_trait::async_trait]
pub trait RemoteCatalog: Send + Sync {
    /// Fetch the full record for `key`
    async fn lookup(&self, key: u32) -> Result<CatalogRecord, CatalogError>;

    /// Get the source name (base URL, demo label, ...)
    fn source_name(&self) -> &str;
}

/// One catalogue entry as returned by a source, before any normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub key: u32,
    pub name: String,
    pub descriptions: Vec<DescriptionEntry>,
    pub categories: Vec<String>,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    pub stats: Vec<StatValue>,
}

/// A description in one language, from one game version
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionEntry {
    pub text: String,
    pub language: String,
    pub version: Option<String>,
}

/// Named numeric attribute (hp, attack, ...)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatValue {
    pub name: String,
    pub value: u32,
}

/// The non-animated part of a record, published next to the name slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryDetails {
    pub key: u32,
    pub categories: Vec<String>,
    pub height: u32,
    pub weight: u32,
    pub stats: Vec<StatValue>,
}

impl CatalogRecord {
    /// First description tagged with the display language
    pub fn english_description(&self) -> Option<&DescriptionEntry> {
        self.descriptions
            .iter()
            .find(|entry| entry.language == DISPLAY_LANGUAGE)
    }

    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    pub fn details(&self) -> EntryDetails {
        EntryDetails {
            key: self.key,
            categories: self.categories.clone(),
            height: self.height,
            weight: self.weight,
            stats: self.stats.clone(),
        }
    }
}

impl EntryDetails {
    pub fn primary_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    /// Height in metres
    pub fn height_m(&self) -> f32 {
        self.height as f32 / 10.0
    }

    /// Weight in kilograms
    pub fn weight_kg(&self) -> f32 {
        self.weight as f32 / 10.0
    }

    pub fn stat(&self, name: &str) -> Option<u32> {
        self.stats.iter().find(|s| s.name == name).map(|s| s.value)
    }

    pub fn stat_total(&self) -> u32 {
        self.stats.iter().map(|s| s.value).sum()
    }
}
