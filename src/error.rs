//! Errors reported by the rule engine.

use thiserror::Error;

use crate::action::MoveType;
use crate::position::Color;

/// Recoverable failures of a requested action.
///
/// Broken board invariants (placing onto an occupied position, moving from
/// an empty one) are bugs in the caller and panic instead.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RuleError {
    /// The index does not name one of the 24 board positions.
    #[error("invalid position index {0}")]
    InvalidIndex(usize),

    /// The position is not in the legal set of the active action handler.
    #[error("illegal {move_type} at position {index}")]
    IllegalAction { index: usize, move_type: MoveType },

    /// The side to move is played by the computer.
    #[error("{0} is played by the computer")]
    ComputerTurn(Color),

    /// The game already has a winner and accepts no more actions.
    #[error("game is over, {0} has won")]
    GameOver(Color),
}
