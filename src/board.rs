use std::fmt;

use crate::constants::{GRID_SIZE, NUM_POSITIONS, PIECES_PER_PLAYER};
use crate::error::RuleError;
use crate::mill::Mill;
use crate::position::{create_positions, Color, Direction, Piece, Point, Position};

/// Per-side piece counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceCount {
    /// Pieces still in hand, waiting to be placed.
    pub left: u8,
    /// Pieces currently standing on the board.
    pub on_board: u8,
}

impl Default for PieceCount {
    fn default() -> Self {
        Self {
            left: PIECES_PER_PLAYER,
            on_board: 0,
        }
    }
}

/// The 24 positions and the piece counters of both sides.
#[derive(Debug, Clone)]
pub struct Board {
    positions: [Position; NUM_POSITIONS],
    counts: [PieceCount; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            positions: create_positions(),
            counts: [PieceCount::default(); 2],
        }
    }

    /// A board with every piece already placed and the given positions
    /// occupied.
    ///
    /// Used to set up middle-game and endgame positions directly.
    ///
    /// # Panics
    /// If a side is given more pieces than it owns or a position is listed
    /// twice.
    pub fn with_pieces(green: &[Point], blue: &[Point]) -> Self {
        let mut board = Self::new();
        for (color, points) in [(Color::Green, green), (Color::Blue, blue)] {
            assert!(points.len() <= usize::from(PIECES_PER_PLAYER));
            for &pt in points {
                board.place(pt, color);
            }
            board.counts[color.index()].left = 0;
        }
        board
    }

    /// Position at `index`.
    ///
    /// # Panics
    /// If `index` is not in `0..24`. Use [`Board::try_position`] for
    /// untrusted input.
    pub fn position(&self, index: Point) -> &Position {
        assert!(index < NUM_POSITIONS, "invalid position index {index}");
        &self.positions[index]
    }

    /// Checked variant of [`Board::position`].
    pub fn try_position(&self, index: Point) -> Result<&Position, RuleError> {
        self.positions.get(index).ok_or(RuleError::InvalidIndex(index))
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn color_at(&self, index: Point) -> Option<Color> {
        self.position(index).color()
    }

    pub fn is_empty_at(&self, index: Point) -> bool {
        !self.position(index).is_occupied()
    }

    pub fn empty_positions(&self) -> Vec<Point> {
        self.indices_where(|p| !p.is_occupied())
    }

    pub fn occupied_positions(&self) -> Vec<Point> {
        self.indices_where(Position::is_occupied)
    }

    pub fn positions_of_color(&self, color: Color) -> Vec<Point> {
        self.indices_where(|p| p.color() == Some(color))
    }

    fn indices_where(&self, keep: impl Fn(&Position) -> bool) -> Vec<Point> {
        self.positions
            .iter()
            .filter(|&p| keep(p))
            .map(Position::index)
            .collect()
    }

    pub fn counts(&self, color: Color) -> PieceCount {
        self.counts[color.index()]
    }

    pub fn pieces_left(&self, color: Color) -> u8 {
        self.counts(color).left
    }

    pub fn pieces_on_board(&self, color: Color) -> u8 {
        self.counts(color).on_board
    }

    /// True once neither side has anything left in hand.
    pub fn is_pieces_placed(&self) -> bool {
        Color::ALL.iter().all(|&c| self.pieces_left(c) == 0)
    }

    /// Put a new piece of `color` on an empty position.
    ///
    /// # Panics
    /// If the position is occupied or the side has nothing left in hand.
    pub fn place(&mut self, index: Point, color: Color) {
        assert!(
            self.is_empty_at(index),
            "place onto occupied position {index}"
        );
        let count = &mut self.counts[color.index()];
        assert!(count.left > 0, "{color} has no pieces left to place");
        count.left -= 1;
        count.on_board += 1;
        self.positions[index].set_piece(Some(Piece::new(color)));
    }

    /// Move the piece on `source` to the empty `destination`.
    ///
    /// # Panics
    /// If `source` is empty or `destination` is occupied.
    pub fn move_piece(&mut self, source: Point, destination: Point) {
        let piece = self.position(source).piece();
        assert!(piece.is_some(), "move from empty position {source}");
        assert!(
            self.is_empty_at(destination),
            "move onto occupied position {destination}"
        );
        self.positions[source].set_piece(None);
        self.positions[destination].set_piece(piece);
    }

    /// Take the piece off `index` and return its color.
    ///
    /// The owner's on-board counter is decremented, whoever is to move.
    ///
    /// # Panics
    /// If the position is empty.
    pub fn remove_piece(&mut self, index: Point) -> Color {
        let Some(piece) = self.position(index).piece() else {
            panic!("remove from empty position {index}");
        };
        self.positions[index].set_piece(None);
        self.counts[piece.color.index()].on_board -= 1;
        piece.color
    }

    /// All mills currently on the board.
    ///
    /// Scans occupied positions in index order, vertical axis before
    /// horizontal, and records each line once from its middle position.
    pub fn mills(&self) -> Vec<Mill> {
        let mut mills = Vec::new();
        for center in &self.positions {
            let Some(color) = center.color() else {
                continue;
            };
            for (before, after) in Direction::AXES {
                let (Some(b), Some(a)) = (center.neighbour(before), center.neighbour(after))
                else {
                    continue;
                };
                if self.color_at(b) == Some(color) && self.color_at(a) == Some(color) {
                    mills.push(Mill::new([b, center.index(), a], color));
                }
            }
        }
        mills
    }
}

/// Diagram template; `*` marks a position, filled in from its coordinates.
const DIAGRAM: [&str; GRID_SIZE] = [
    "*-----*-----*",
    "|     |     |",
    "| *---*---* |",
    "| |   |   | |",
    "| | *-*-* | |",
    "| | |   | | |",
    "*-*-*   *-*-*",
    "| | |   | | |",
    "| | *-*-* | |",
    "| |   |   | |",
    "| *---*---* |",
    "|     |     |",
    "*-----*-----*",
];

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut grid: Vec<Vec<char>> = DIAGRAM.iter().map(|l| l.chars().collect()).collect();
        for pos in &self.positions {
            let (col, row) = pos.coords();
            grid[row][col] = pos.color().map_or('.', Color::glyph);
        }
        for row in grid {
            let line: String = row.into_iter().collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_positions().len(), NUM_POSITIONS);
        assert!(board.occupied_positions().is_empty());
        for color in Color::ALL {
            assert_eq!(board.pieces_left(color), PIECES_PER_PLAYER);
            assert_eq!(board.pieces_on_board(color), 0);
        }
        assert!(!board.is_pieces_placed());
    }

    #[test]
    fn test_place_updates_counters() {
        let mut board = Board::new();
        board.place(4, Color::Green);
        assert_eq!(board.color_at(4), Some(Color::Green));
        assert_eq!(board.pieces_left(Color::Green), PIECES_PER_PLAYER - 1);
        assert_eq!(board.pieces_on_board(Color::Green), 1);
        assert_eq!(board.pieces_left(Color::Blue), PIECES_PER_PLAYER);
    }

    #[test]
    #[should_panic(expected = "occupied")]
    fn test_place_on_occupied_panics() {
        let mut board = Board::new();
        board.place(4, Color::Green);
        board.place(4, Color::Blue);
    }

    #[test]
    #[should_panic(expected = "invalid position index")]
    fn test_position_out_of_range_panics() {
        let board = Board::new();
        board.position(24);
    }

    #[test]
    fn test_try_position() {
        let board = Board::new();
        assert_eq!(board.try_position(23).map(Position::index), Ok(23));
        assert_eq!(
            board.try_position(24).map(Position::index),
            Err(RuleError::InvalidIndex(24))
        );
    }

    #[test]
    fn test_move_piece() {
        let mut board = Board::new();
        board.place(0, Color::Blue);
        board.move_piece(0, 1);
        assert!(board.is_empty_at(0));
        assert_eq!(board.color_at(1), Some(Color::Blue));
        assert_eq!(board.pieces_on_board(Color::Blue), 1);
    }

    #[test]
    fn test_remove_decrements_owner() {
        let mut board = Board::new();
        board.place(0, Color::Green);
        board.place(1, Color::Blue);
        assert_eq!(board.remove_piece(0), Color::Green);
        assert_eq!(board.pieces_on_board(Color::Green), 0);
        assert_eq!(board.pieces_on_board(Color::Blue), 1);
        // Placement is not reversible for the in-hand counter.
        assert_eq!(board.pieces_left(Color::Green), PIECES_PER_PLAYER - 1);
    }

    #[test]
    fn test_filtered_views_are_sorted() {
        let mut board = Board::new();
        board.place(17, Color::Green);
        board.place(3, Color::Blue);
        board.place(9, Color::Green);
        assert_eq!(board.occupied_positions(), vec![3, 9, 17]);
        assert_eq!(board.positions_of_color(Color::Green), vec![9, 17]);
        assert_eq!(board.positions_of_color(Color::Blue), vec![3]);
    }

    #[test]
    fn test_mills_horizontal_and_vertical() {
        let mut board = Board::new();
        for i in [0, 1, 2] {
            board.place(i, Color::Green);
        }
        for i in [9, 21] {
            board.place(i, Color::Green);
        }
        let mills = board.mills();
        let lines: Vec<[Point; 3]> = mills.iter().map(|m| m.positions).collect();
        // Index 1 is the center of the top row; index 9 the center of the
        // left column.
        assert_eq!(lines, vec![[0, 1, 2], [0, 9, 21]]);
    }

    #[test]
    fn test_mixed_colors_are_not_a_mill() {
        let mut board = Board::new();
        board.place(0, Color::Green);
        board.place(1, Color::Blue);
        board.place(2, Color::Green);
        assert!(board.mills().is_empty());
    }

    #[test]
    fn test_no_mill_across_center_gap() {
        let mut board = Board::new();
        // 7 and 16 face each other across the empty middle.
        for i in [4, 7, 16] {
            board.place(i, Color::Blue);
        }
        assert!(board.mills().is_empty());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.place(0, Color::Green);
        board.place(23, Color::Blue);
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), GRID_SIZE);
        assert_eq!(lines[0], "G-----.-----.");
        assert_eq!(lines[6], ".-.-.   .-.-.");
        assert_eq!(lines[12], ".-----.-----B");
    }
}
