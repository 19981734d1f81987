//! Mill detection and new-mill tracking.
//!
//! A mill only entitles its owner to a capture on the action that forms
//! it. [`MillManager`] keeps the list seen on the previous scan and
//! reports a mill only when it was absent from that list.

use std::fmt;

use tracing::debug;

use crate::board::Board;
use crate::position::{Color, Point};

/// Three same-color pieces in a line: `[before, center, after]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mill {
    pub positions: [Point; 3],
    pub color: Color,
}

impl Mill {
    pub const fn new(positions: [Point; 3], color: Color) -> Self {
        Self { positions, color }
    }

    pub fn contains(&self, pt: Point) -> bool {
        self.positions.contains(&pt)
    }
}

impl fmt::Display for Mill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.positions;
        write!(f, "{} {a}-{b}-{c}", self.color)
    }
}

/// Remembers the last mill scan so that only newly formed mills count.
#[derive(Debug, Clone, Default)]
pub struct MillManager {
    mills: Vec<Mill>,
}

impl MillManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mills recorded by the most recent scan.
    pub fn last_seen(&self) -> &[Mill] {
        &self.mills
    }

    /// Compare `mills` with the previous scan and return the first one
    /// that was not there before. `mills` becomes the new baseline either
    /// way.
    pub fn compare_mills(&mut self, mills: Vec<Mill>) -> Option<Mill> {
        let new_mill = mills.iter().find(|m| !self.mills.contains(m)).copied();
        self.mills = mills;
        new_mill
    }

    /// Scan `board` and report a newly formed mill, if any.
    pub fn get_new_mill(&mut self, board: &Board) -> Option<Mill> {
        let new_mill = self.compare_mills(board.mills());
        if let Some(mill) = &new_mill {
            debug!(%mill, "new mill");
        }
        new_mill
    }

    /// Forget every previously seen mill.
    pub fn reset(&mut self) {
        self.mills.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_mill_reported_once() {
        let mut board = Board::new();
        let mut manager = MillManager::new();
        for i in [0, 1, 2] {
            board.place(i, Color::Green);
        }
        let mill = manager.get_new_mill(&board).map(|m| m.positions);
        assert_eq!(mill, Some([0, 1, 2]));
        assert_eq!(manager.get_new_mill(&board), None);
        assert_eq!(manager.last_seen().len(), 1);
    }

    #[test]
    fn test_reformed_mill_counts_again() {
        let mut board = Board::new();
        let mut manager = MillManager::new();
        for i in [0, 1, 2] {
            board.place(i, Color::Blue);
        }
        assert!(manager.get_new_mill(&board).is_some());

        // Open the mill, then close it again.
        board.move_piece(1, 4);
        assert_eq!(manager.get_new_mill(&board), None);
        board.move_piece(4, 1);
        assert_eq!(
            manager.get_new_mill(&board),
            Some(Mill::new([0, 1, 2], Color::Blue))
        );
    }

    #[test]
    fn test_compare_returns_first_new_mill() {
        let mut manager = MillManager::new();
        let a = Mill::new([0, 1, 2], Color::Green);
        let b = Mill::new([0, 9, 21], Color::Green);
        assert_eq!(manager.compare_mills(vec![a]), Some(a));
        // Both present, only `b` is new.
        assert_eq!(manager.compare_mills(vec![a, b]), Some(b));
        assert_eq!(manager.compare_mills(vec![]), None);
        assert!(manager.last_seen().is_empty());
    }

    #[test]
    fn test_reset_forgets_baseline() {
        let mut board = Board::new();
        let mut manager = MillManager::new();
        for i in [21, 22, 23] {
            board.place(i, Color::Green);
        }
        assert!(manager.get_new_mill(&board).is_some());
        manager.reset();
        assert!(manager.get_new_mill(&board).is_some());
    }
}
