//! Board positions, pieces, and the fixed neighbour topology.
//!
//! The board has 24 positions arranged in three concentric squares. Each
//! position records up to four orthogonal neighbours. Positions are
//! addressed by index; nothing holds a reference back to the board.

use std::fmt;

use crate::constants::{COORDS, NEIGHBOURS, NUM_POSITIONS};

/// An index into the board's position array (0..24).
pub type Point = usize;

/// The two sides. Green moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Green,
    Blue,
}

impl Color {
    /// Both colors in turn order.
    pub const ALL: [Color; 2] = [Color::Green, Color::Blue];

    /// Returns the other side.
    pub const fn opponent(self) -> Color {
        match self {
            Color::Green => Color::Blue,
            Color::Blue => Color::Green,
        }
    }

    /// Slot of this color in per-side arrays.
    pub const fn index(self) -> usize {
        match self {
            Color::Green => 0,
            Color::Blue => 1,
        }
    }

    /// Single-character glyph used in board diagrams.
    pub const fn glyph(self) -> char {
        match self {
            Color::Green => 'G',
            Color::Blue => 'B',
        }
    }

    /// Parses a color name or glyph, case-insensitively.
    pub fn parse(s: &str) -> Option<Color> {
        match s.to_ascii_lowercase().as_str() {
            "green" | "g" => Some(Color::Green),
            "blue" | "b" => Some(Color::Blue),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Green => write!(f, "green"),
            Color::Blue => write!(f, "blue"),
        }
    }
}

/// A piece on the board. Pieces are fungible apart from their color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
}

impl Piece {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

/// Neighbour slots of a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Top,
    Bottom,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Bottom,
        Direction::Left,
        Direction::Right,
    ];

    /// Axes scanned for mills, vertical first.
    pub const AXES: [(Direction, Direction); 2] = [
        (Direction::Top, Direction::Bottom),
        (Direction::Left, Direction::Right),
    ];

    /// The direction pointing back the other way.
    pub const fn reverse(self) -> Direction {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    const fn slot(self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::Bottom => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }
}

/// A single board position.
///
/// The coordinates are only used to draw the board; the rule engine works
/// purely on indices and the neighbour graph.
#[derive(Debug, Clone)]
pub struct Position {
    index: Point,
    coords: (usize, usize),
    neighbours: [Option<Point>; 4],
    piece: Option<Piece>,
}

impl Position {
    fn new(index: Point) -> Self {
        Self {
            index,
            coords: COORDS[index],
            neighbours: NEIGHBOURS[index],
            piece: None,
        }
    }

    pub fn index(&self) -> Point {
        self.index
    }

    /// Grid coordinates (column, row) in the text diagram.
    pub fn coords(&self) -> (usize, usize) {
        self.coords
    }

    /// Neighbour in the given direction, if the board has one there.
    pub fn neighbour(&self, dir: Direction) -> Option<Point> {
        self.neighbours[dir.slot()]
    }

    /// Indices of all existing neighbours in top, bottom, left, right order.
    pub fn adjacent(&self) -> impl Iterator<Item = Point> + '_ {
        self.neighbours.iter().flatten().copied()
    }

    pub fn piece(&self) -> Option<Piece> {
        self.piece
    }

    /// Color of the occupant, if any.
    pub fn color(&self) -> Option<Color> {
        self.piece.map(|p| p.color)
    }

    pub fn is_occupied(&self) -> bool {
        self.piece.is_some()
    }

    pub(crate) fn set_piece(&mut self, piece: Option<Piece>) {
        self.piece = piece;
    }
}

/// Build the 24 empty positions from the static topology table.
pub fn create_positions() -> [Position; NUM_POSITIONS] {
    std::array::from_fn(Position::new)
}
