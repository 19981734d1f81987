//! Action phases and their legal-move generation.
//!
//! Each turn the mover is in exactly one phase. [`ActionHandler`] is the
//! phase together with the rule for which positions it accepts;
//! [`ActionController`] holds the active handler and the origin selected
//! during a two-step move.

use std::fmt;

use crate::board::Board;
use crate::constants::FLY_THRESHOLD;
use crate::position::{Color, Point};

/// Kind of action the mover has to make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveType {
    Place,
    Move,
    Fly,
    Remove,
}

impl fmt::Display for MoveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveType::Place => "place",
            MoveType::Move => "move",
            MoveType::Fly => "fly",
            MoveType::Remove => "remove",
        };
        write!(f, "{name}")
    }
}

/// The active phase handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionHandler {
    /// Put a piece from hand on any empty position.
    Place,
    /// Slide the selected piece to an adjacent empty position.
    Move,
    /// Jump the selected piece to any empty position.
    Fly,
    /// Take one of the opponent's pieces after forming a mill.
    Remove,
}

impl ActionHandler {
    /// Handler for `mover` at the start of a normal turn.
    pub fn for_turn(board: &Board, mover: Color) -> Self {
        if !board.is_pieces_placed() {
            ActionHandler::Place
        } else if board.pieces_on_board(mover) <= FLY_THRESHOLD {
            ActionHandler::Fly
        } else {
            ActionHandler::Move
        }
    }

    pub fn move_type(self) -> MoveType {
        match self {
            ActionHandler::Place => MoveType::Place,
            ActionHandler::Move => MoveType::Move,
            ActionHandler::Fly => MoveType::Fly,
            ActionHandler::Remove => MoveType::Remove,
        }
    }

    /// Whether this handler works in two steps: pick a piece, then a target.
    pub fn needs_origin(self) -> bool {
        matches!(self, ActionHandler::Move | ActionHandler::Fly)
    }

    /// Legal targets for `mover`, in ascending index order.
    ///
    /// `selected` is the origin picked for a move or fly; without one
    /// those handlers have no legal targets.
    pub fn available_moves(
        self,
        board: &Board,
        mover: Color,
        selected: Option<Point>,
    ) -> Vec<Point> {
        match self {
            ActionHandler::Place => board.empty_positions(),
            ActionHandler::Move => {
                let Some(origin) = selected else {
                    return Vec::new();
                };
                let mut moves: Vec<Point> = board
                    .position(origin)
                    .adjacent()
                    .filter(|&n| board.is_empty_at(n))
                    .collect();
                moves.sort_unstable();
                moves
            }
            ActionHandler::Fly => {
                if selected.is_none() {
                    return Vec::new();
                }
                board.empty_positions()
            }
            ActionHandler::Remove => removable_pieces(board, mover.opponent()),
        }
    }
}

/// Pieces of `victim` that may be captured.
///
/// Pieces standing in a mill are protected unless every piece of that
/// side is in one.
pub fn removable_pieces(board: &Board, victim: Color) -> Vec<Point> {
    let mills = board.mills();
    let pieces = board.positions_of_color(victim);
    let unprotected: Vec<Point> = pieces
        .iter()
        .copied()
        .filter(|&pt| !mills.iter().any(|m| m.contains(pt)))
        .collect();
    if unprotected.is_empty() { pieces } else { unprotected }
}

/// Active handler plus the transient origin selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionController {
    handler: ActionHandler,
    selected: Option<Point>,
}

impl Default for ActionController {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionController {
    pub fn new() -> Self {
        Self {
            handler: ActionHandler::Place,
            selected: None,
        }
    }

    pub fn handler(&self) -> ActionHandler {
        self.handler
    }

    pub fn move_type(&self) -> MoveType {
        self.handler.move_type()
    }

    pub fn selected(&self) -> Option<Point> {
        self.selected
    }

    pub fn select(&mut self, pt: Option<Point>) {
        self.selected = pt;
    }

    /// Pick the handler for a fresh turn of `mover`, dropping any selection.
    pub fn update_action_handler(&mut self, board: &Board, mover: Color) {
        self.selected = None;
        self.handler = ActionHandler::for_turn(board, mover);
    }

    /// Switch to the capture step after a new mill.
    pub fn initiate_remove(&mut self) {
        self.selected = None;
        self.handler = ActionHandler::Remove;
    }

    /// Legal targets of the active handler for the current selection.
    pub fn available_moves(&self, board: &Board, mover: Color) -> Vec<Point> {
        self.handler.available_moves(board, mover, self.selected)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_lists_empty_positions() {
        let mut board = Board::new();
        board.place(5, Color::Green);
        let moves = ActionHandler::Place.available_moves(&board, Color::Blue, None);
        assert_eq!(moves.len(), 23);
        assert!(!moves.contains(&5));
    }

    #[test]
    fn test_move_requires_origin() {
        let board = Board::with_pieces(&[4], &[]);
        assert!(ActionHandler::Move.available_moves(&board, Color::Green, None).is_empty());
        assert!(ActionHandler::Fly.available_moves(&board, Color::Green, None).is_empty());
    }

    #[test]
    fn test_move_only_to_empty_neighbours() {
        let board = Board::with_pieces(&[4], &[1]);
        let moves = ActionHandler::Move.available_moves(&board, Color::Green, Some(4));
        assert_eq!(moves, vec![3, 5, 7]);
    }

    #[test]
    fn test_fly_reaches_every_empty_position() {
        let board = Board::with_pieces(&[0, 1, 2], &[3, 4, 5, 6]);
        let moves = ActionHandler::Fly.available_moves(&board, Color::Green, Some(0));
        assert_eq!(moves, board.empty_positions());
        assert_eq!(moves.len(), 17);
    }

    #[test]
    fn test_handler_for_turn() {
        assert_eq!(
            ActionHandler::for_turn(&Board::new(), Color::Green),
            ActionHandler::Place
        );

        let board = Board::with_pieces(&[0, 1, 2, 3], &[9, 10, 11]);
        assert_eq!(
            ActionHandler::for_turn(&board, Color::Green),
            ActionHandler::Move
        );
        assert_eq!(
            ActionHandler::for_turn(&board, Color::Blue),
            ActionHandler::Fly
        );
    }

    #[test]
    fn test_remove_skips_pieces_in_mills() {
        // Blue has a mill on the top row and a loose piece at 23.
        let board = Board::with_pieces(&[9, 10], &[0, 1, 2, 23]);
        let moves = ActionHandler::Remove.available_moves(&board, Color::Green, None);
        assert_eq!(moves, vec![23]);
    }

    #[test]
    fn test_remove_allows_mills_when_nothing_else() {
        let board = Board::with_pieces(&[9, 10], &[0, 1, 2]);
        let moves = ActionHandler::Remove.available_moves(&board, Color::Green, None);
        assert_eq!(moves, vec![0, 1, 2]);
    }

    #[test]
    fn test_controller_selection_cleared_on_update() {
        let board = Board::with_pieces(&[0, 1, 2, 3], &[9, 10, 11, 12]);
        let mut controller = ActionController::new();
        controller.update_action_handler(&board, Color::Green);
        controller.select(Some(3));
        assert_eq!(controller.available_moves(&board, Color::Green), vec![4]);

        controller.update_action_handler(&board, Color::Blue);
        assert_eq!(controller.selected(), None);
        assert_eq!(controller.move_type(), MoveType::Move);

        controller.initiate_remove();
        assert_eq!(controller.move_type(), MoveType::Remove);
    }
}
