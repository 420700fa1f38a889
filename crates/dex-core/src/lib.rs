//! Core functionality for the catalogue viewer
//!
//! This crate provides circular navigation over the catalogue, the remote
//! lookup abstraction, and the animated content controller that turns
//! bursts of navigation into debounced loads and typewriter reveals.

pub mod catalog;
pub mod content;
pub mod error;
pub mod navigation;
pub mod text;

// Re-export commonly used types
pub use catalog::{CatalogRecord, DescriptionEntry, EntryDetails, RemoteCatalog, StatValue};
pub use content::{
    AnimatedContentController, CancellableLoader, ContentRecord, ContentSlot,
    ControllerSettings, LoadHandle, LoadOutcome, LoadedEntry, RevealHandle, RevealSequence,
    RevealState, RevealUnit, SlotPhase, SlotView, TypewriterRevealer,
};
pub use error::CatalogError;
pub use navigation::{
    CircularIndex, NavigationDirection, NavigationStep, NavigationView,
    DEFAULT_CATALOG_SIZE,
};
