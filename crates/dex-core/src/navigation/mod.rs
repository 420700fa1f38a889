use serde::{Serialize, Deserialize};

mod index;

pub use index::CircularIndex;

/// Default number of entries in the catalogue
pub const DEFAULT_CATALOG_SIZE: u32 = 1025;

/// Direction of the most recent move, consumed by the view to pick a transition
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationDirection {
    /// No move in progress (initial state, direct lookup, or window elapsed)
    #[default]
    None,
    /// Moved to the next entry
    Forward,
    /// Moved to the previous entry
    Backward,
}

/// A relative navigation request, from on-screen arrows or the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigationStep {
    Forward,
    Backward,
}

/// Navigation snapshot published to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationView {
    pub index: u32,
    pub direction: NavigationDirection,
    pub catalog_size: u32,
}
