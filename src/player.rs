//! The two players: a side color, a display name, and who controls it.
//!
//! Piece counters live on the [`Board`](crate::board::Board) so that the
//! board mutators keep them in step with occupancy.

use crate::computer::Computer;
use crate::position::Color;

/// Who makes the decisions for a side.
#[derive(Debug, Clone)]
pub enum PlayerKind {
    /// Actions arrive from outside through `Game::handle_action`.
    Human,
    /// Actions are chosen at random when the game is ticked.
    Computer(Computer),
}

#[derive(Debug, Clone)]
pub struct Player {
    pub name: String,
    pub color: Color,
    pub kind: PlayerKind,
}

impl Player {
    pub fn human(color: Color, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color,
            kind: PlayerKind::Human,
        }
    }

    pub fn computer(color: Color, name: impl Into<String>, computer: Computer) -> Self {
        Self {
            name: name.into(),
            color,
            kind: PlayerKind::Computer(computer),
        }
    }

    pub fn is_computer(&self) -> bool {
        matches!(self.kind, PlayerKind::Computer(_))
    }

    /// The computer state, if this side is computer controlled.
    pub fn computer_mut(&mut self) -> Option<&mut Computer> {
        match &mut self.kind {
            PlayerKind::Computer(c) => Some(c),
            PlayerKind::Human => None,
        }
    }
}

/// Default line-up: two humans, "Player 1" on green and "Player 2" on blue.
pub fn default_players() -> [Player; 2] {
    [
        Player::human(Color::Green, "Player 1"),
        Player::human(Color::Blue, "Player 2"),
    ]
}
