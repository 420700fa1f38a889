//! egui presentation layer for the dex viewer

pub mod assets;
pub mod entry_panel;
pub mod theme;

pub use entry_panel::{navigation_from_keys, parse_lookup, slide_offset, EntryPanel, EntryPanelConfig};
pub use theme::{apply_theme, category_color, entry_background, Theme};
