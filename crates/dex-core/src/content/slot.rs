//! Content slots and what each one shows

use serde::{Serialize, Deserialize};

use crate::catalog::{CatalogRecord, EntryDetails};
use crate::error::CatalogError;
use crate::text::{display_name, normalize_text};

/// A named view region with single-writer ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentSlot {
    Name,
    Description,
}

impl ContentSlot {
    pub const ALL: [ContentSlot; 2] = [ContentSlot::Name, ContentSlot::Description];

    pub fn label(&self) -> &'static str {
        match self {
            ContentSlot::Name => "name",
            ContentSlot::Description => "description",
        }
    }

    /// Extract and normalize this slot's text from a fetched record
    pub fn project(&self, record: &CatalogRecord) -> Result<ContentRecord, CatalogError> {
        let (source_text, display_text) = match self {
            ContentSlot::Name => (record.name.clone(), display_name(&record.name)),
            ContentSlot::Description => {
                let entry = record.english_description().ok_or_else(|| {
                    CatalogError::NotFound(format!("no English description for #{}", record.key))
                })?;
                (entry.text.clone(), normalize_text(&entry.text))
            }
        };

        if display_text.is_empty() {
            return Err(CatalogError::NotFound(format!(
                "empty {} for #{}",
                self.label(),
                record.key
            )));
        }

        Ok(ContentRecord {
            display_text,
            source_text,
            details: record.details(),
        })
    }
}

/// Normalized result of a successful lookup, handed to the revealer
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub display_text: String,
    pub source_text: String,
    pub details: EntryDetails,
}

/// One fetched record, projected into every slot.
///
/// A projection can fail for one slot only (a record without English text
/// still has a name), so each slot carries its own result.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedEntry {
    key: u32,
    details: EntryDetails,
    name: Result<ContentRecord, CatalogError>,
    description: Result<ContentRecord, CatalogError>,
}

impl LoadedEntry {
    pub fn from_record(record: &CatalogRecord) -> Self {
        Self {
            key: record.key,
            details: record.details(),
            name: ContentSlot::Name.project(record),
            description: ContentSlot::Description.project(record),
        }
    }

    pub fn key(&self) -> u32 {
        self.key
    }

    pub fn details(&self) -> &EntryDetails {
        &self.details
    }

    pub fn content(&self, slot: ContentSlot) -> Result<&ContentRecord, &CatalogError> {
        match slot {
            ContentSlot::Name => self.name.as_ref(),
            ContentSlot::Description => self.description.as_ref(),
        }
    }
}

/// Lifecycle phase of a content slot.
///
/// A failed load goes straight back to `Idle`; the view shows the fallback
/// text with [`SlotView::failure`] set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SlotPhase {
    #[default]
    Idle,
    Debouncing,
    Fetching,
    Revealing,
}

/// What the view renders for one slot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotView {
    /// Key the slot is showing (or loading)
    pub key: u32,
    pub phase: SlotPhase,
    /// Currently visible text: a reveal prefix, the full text, or the fallback
    pub text: String,
    /// Set when the last load for `key` failed and `text` is the fallback
    pub failure: Option<CatalogError>,
}

impl SlotView {
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            SlotPhase::Debouncing | SlotPhase::Fetching | SlotPhase::Revealing
        )
    }

    pub fn is_fallback(&self) -> bool {
        self.failure.is_some()
    }
}
