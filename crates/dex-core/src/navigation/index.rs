//! Circular index over the catalogue range

use std::num::NonZeroU32;

use super::{NavigationDirection, NavigationStep, NavigationView};
use crate::error::CatalogError;

/// Current position in `[1, size]` plus the direction of the last move.
///
/// Moving past either end wraps around. Nothing here triggers loads; the
/// controller observes the index and does that.
#[derive(Debug, Clone)]
pub struct CircularIndex {
    current: u32,
    size: u32,
    direction: NavigationDirection,
}

impl CircularIndex {
    /// Create an index positioned at the first entry
    pub fn new(size: NonZeroU32) -> Self {
        Self {
            current: 1,
            size: size.get(),
            direction: NavigationDirection::None,
        }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn direction(&self) -> NavigationDirection {
        self.direction
    }

    /// Move to the next entry, wrapping from the last entry to 1
    pub fn advance(&mut self) -> (u32, NavigationDirection) {
        self.current = if self.current >= self.size { 1 } else { self.current + 1 };
        self.direction = NavigationDirection::Forward;
        (self.current, self.direction)
    }

    /// Move to the previous entry, wrapping from 1 to the last entry
    pub fn retreat(&mut self) -> (u32, NavigationDirection) {
        self.current = if self.current <= 1 { self.size } else { self.current - 1 };
        self.direction = NavigationDirection::Backward;
        (self.current, self.direction)
    }

    pub fn step(&mut self, step: NavigationStep) -> (u32, NavigationDirection) {
        match step {
            NavigationStep::Forward => self.advance(),
            NavigationStep::Backward => self.retreat(),
        }
    }

    /// Jump directly to an entry.
    ///
    /// Values outside `[1, size]` are rejected and leave the index untouched.
    pub fn jump_to(&mut self, value: i64) -> Result<(u32, NavigationDirection), CatalogError> {
        if value < 1 || value > i64::from(self.size) {
            return Err(CatalogError::OutOfRange { value, max: self.size });
        }

        self.current = value as u32;
        self.direction = NavigationDirection::None;
        Ok((self.current, self.direction))
    }

    /// Clear the direction once the transition window has elapsed
    pub fn reset_direction(&mut self) {
        self.direction = NavigationDirection::None;
    }

    pub fn view(&self) -> NavigationView {
        NavigationView {
            index: self.current,
            direction: self.direction,
            catalog_size: self.size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(size: u32) -> CircularIndex {
        CircularIndex::new(NonZeroU32::new(size).unwrap())
    }

    #[test]
    fn test_wrap_around() {
        let mut idx = index(1025);
        assert_eq!(idx.retreat(), (1025, NavigationDirection::Backward));
        assert_eq!(idx.advance(), (1, NavigationDirection::Forward));
    }

    #[test]
    fn test_step_sequence() {
        let mut idx = index(151);
        idx.step(NavigationStep::Forward);
        idx.step(NavigationStep::Forward);
        idx.step(NavigationStep::Backward);
        assert_eq!(idx.current(), 2);
        assert_eq!(idx.direction(), NavigationDirection::Backward);
    }

    #[test]
    fn test_jump_rejects_out_of_range() {
        let mut idx = index(1025);
        idx.jump_to(25).unwrap();

        assert_eq!(
            idx.jump_to(0),
            Err(CatalogError::OutOfRange { value: 0, max: 1025 })
        );
        assert!(idx.jump_to(1026).is_err());
        assert!(idx.jump_to(-3).is_err());
        assert_eq!(idx.current(), 25);
    }

    #[test]
    fn test_jump_clears_direction() {
        let mut idx = index(10);
        idx.advance();
        assert_eq!(idx.jump_to(10), Ok((10, NavigationDirection::None)));
        assert_eq!(idx.view().direction, NavigationDirection::None);
    }

    #[test]
    fn test_single_entry_catalogue() {
        let mut idx = index(1);
        assert_eq!(idx.advance().0, 1);
        assert_eq!(idx.retreat().0, 1);
    }
}
