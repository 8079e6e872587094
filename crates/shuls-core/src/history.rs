//! Back/forward history of selected locations.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ShulsError};
use crate::location::Location;

/// Linear, branchable undo/redo log of locations, like browser history.
///
/// Never empty: it is created with a seed entry and entries are only ever
/// removed by truncating the forward branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationHistory {
    entries: Vec<Location>,
    current_index: usize,
}

impl LocationHistory {
    pub fn new(seed: Location) -> Self {
        Self {
            entries: vec![seed],
            current_index: 0,
        }
    }

    /// Drops every entry after the current one, then appends `location` and
    /// makes it current.
    pub fn record_new_location(&mut self, location: Location) {
        self.entries.truncate(self.current_index + 1);
        self.entries.push(location);
        self.current_index = self.entries.len() - 1;
    }

    /// Steps back one entry. Returns `false` at the oldest entry.
    pub fn go_back(&mut self) -> bool {
        if !self.can_go_back() {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Steps forward one entry. Returns `false` at the newest entry.
    pub fn go_forward(&mut self) -> bool {
        if !self.can_go_forward() {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Jumps to `index` without touching the entries.
    pub fn go_to(&mut self, index: usize) -> Result<()> {
        if index >= self.entries.len() {
            return Err(ShulsError::HistoryIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.current_index = index;
        Ok(())
    }

    /// Discards everything but the seed.
    pub fn reset_to_seed(&mut self) {
        self.entries.truncate(1);
        self.current_index = 0;
    }

    pub fn current(&self) -> &Location {
        &self.entries[self.current_index]
    }

    pub fn seed(&self) -> &Location {
        &self.entries[0]
    }

    pub fn can_go_back(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.current_index + 1 < self.entries.len()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn entries(&self) -> &[Location] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Coordinates;

    fn loc(name: &str) -> Location {
        Location::new(name, Coordinates::new(1.0, 1.0), None, 16)
    }

    #[test]
    fn test_new_history_has_only_seed() {
        let history = LocationHistory::new(loc("A"));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_index(), 0);
        assert_eq!(history.current(), &loc("A"));
        assert!(!history.can_go_back());
        assert!(!history.can_go_forward());
    }

    #[test]
    fn test_record_after_go_back_truncates_forward_branch() {
        let mut history = LocationHistory::new(loc("A"));
        history.record_new_location(loc("B"));
        history.record_new_location(loc("C"));
        assert_eq!(history.current_index(), 2);

        assert!(history.go_back());
        assert_eq!(history.current_index(), 1);

        history.record_new_location(loc("D"));
        let names: Vec<&str> = history
            .entries()
            .iter()
            .map(|l| l.display_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B", "D"]);
        assert_eq!(history.current_index(), 2);
        assert_eq!(history.current(), &loc("D"));
    }

    #[test]
    fn test_boundaries_are_silent_no_ops() {
        let mut history = LocationHistory::new(loc("A"));
        assert!(!history.go_back());
        assert!(!history.go_forward());
        assert_eq!(history.current_index(), 0);

        history.record_new_location(loc("B"));
        assert!(!history.go_forward());
        assert_eq!(history.current_index(), 1);
    }

    #[test]
    fn test_go_to_validates_index() {
        let mut history = LocationHistory::new(loc("A"));
        history.record_new_location(loc("B"));

        history.go_to(0).unwrap();
        assert_eq!(history.current(), &loc("A"));
        assert!(history.can_go_forward());

        let err = history.go_to(5).unwrap_err();
        assert_eq!(err, ShulsError::HistoryIndexOutOfRange { index: 5, len: 2 });
        assert_eq!(history.current_index(), 0);
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_reset_to_seed() {
        let mut history = LocationHistory::new(loc("A"));
        history.record_new_location(loc("B"));
        history.record_new_location(loc("C"));
        history.reset_to_seed();
        assert_eq!(history.len(), 1);
        assert_eq!(history.current(), &loc("A"));
    }

    #[test]
    fn test_index_stays_in_bounds_under_interleaving() {
        // Deterministic pseudo-random walk over record/back/forward.
        let mut history = LocationHistory::new(loc("seed"));
        let mut state: u32 = 0x2545_f491;
        for step in 0..500 {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            match state % 3 {
                0 => history.record_new_location(loc(&format!("L{}", step))),
                1 => {
                    history.go_back();
                }
                _ => {
                    history.go_forward();
                }
            }
            assert!(history.current_index() < history.len());
            assert_eq!(
                history.current(),
                &history.entries()[history.current_index()]
            );
            assert_eq!(history.seed(), &loc("seed"));
        }
    }
}
