//! Animated sequential content
//!
//! A content slot is a named region of the view (name, description) with a
//! single writer. The slots share one [`CancellableLoader`], so each key is
//! fetched once, and each slot owns at most one running reveal; the
//! [`AnimatedContentController`] cancels both before starting work for a
//! newer key.

mod controller;
mod loader;
mod reveal;
mod slot;

#[cfg(test)]
pub(crate) mod test_support;

pub use controller::{AnimatedContentController, ControllerSettings};
pub use loader::{CancellableLoader, LoadHandle, LoadOutcome};
pub use reveal::{RevealHandle, RevealSequence, RevealState, RevealUnit, TypewriterRevealer};
pub use slot::{ContentRecord, ContentSlot, LoadedEntry, SlotPhase, SlotView};
