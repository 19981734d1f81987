//! Constants for the board geometry, piece counts, and computer timing.
//!
//! Nine Men's Morris has a single fixed board, so everything here is a
//! compile-time constant rather than a runtime option.

// =============================================================================
// Board Geometry
// =============================================================================

/// Number of playable positions (three concentric squares of eight).
pub const NUM_POSITIONS: usize = 24;

/// Width and height of the text diagram in characters.
pub const GRID_SIZE: usize = 13;

/// Grid coordinates (column, row) of each position in the text diagram.
///
/// Positions are numbered in reading order: top to bottom, left to right.
pub const COORDS: [(usize, usize); NUM_POSITIONS] = [
    (0, 0),
    (6, 0),
    (12, 0),
    (2, 2),
    (6, 2),
    (10, 2),
    (4, 4),
    (6, 4),
    (8, 4),
    (0, 6),
    (2, 6),
    (4, 6),
    (8, 6),
    (10, 6),
    (12, 6),
    (4, 8),
    (6, 8),
    (8, 8),
    (2, 10),
    (6, 10),
    (10, 10),
    (0, 12),
    (6, 12),
    (12, 12),
];

/// Neighbour table: `[top, bottom, left, right]` for each position.
pub const NEIGHBOURS: [[Option<usize>; 4]; NUM_POSITIONS] = [
    [None, Some(9), None, Some(1)],
    [None, Some(4), Some(0), Some(2)],
    [None, Some(14), Some(1), None],
    [None, Some(10), None, Some(4)],
    [Some(1), Some(7), Some(3), Some(5)],
    [None, Some(13), Some(4), None],
    [None, Some(11), None, Some(7)],
    [Some(4), None, Some(6), Some(8)],
    [None, Some(12), Some(7), None],
    [Some(0), Some(21), None, Some(10)],
    [Some(3), Some(18), Some(9), Some(11)],
    [Some(6), Some(15), Some(10), None],
    [Some(8), Some(17), None, Some(13)],
    [Some(5), Some(20), Some(12), Some(14)],
    [Some(2), Some(23), Some(13), None],
    [Some(11), None, None, Some(16)],
    [None, Some(19), Some(15), Some(17)],
    [Some(12), None, Some(16), None],
    [Some(10), None, None, Some(19)],
    [Some(16), Some(22), Some(18), Some(20)],
    [Some(13), None, Some(19), None],
    [Some(9), None, None, Some(22)],
    [Some(19), None, Some(21), Some(23)],
    [Some(14), None, Some(22), None],
];

// =============================================================================
// Piece Counts
// =============================================================================

/// Pieces each side starts with in hand.
pub const PIECES_PER_PLAYER: u8 = 9;

/// A side with this many pieces or fewer on the board may fly.
pub const FLY_THRESHOLD: u8 = 3;

/// A side with this many pieces or fewer on the board (after placement) loses.
pub const LOSS_THRESHOLD: u8 = 2;

// =============================================================================
// Computer Player Timing
// =============================================================================

/// Minimum think delay before the computer plays, in milliseconds.
pub const AI_DELAY_MIN_MS: u64 = 1000;

/// Random spread added on top of the minimum delay, in milliseconds.
pub const AI_DELAY_SPREAD_MS: u64 = 2000;

/// Default turn cap for self-play so a shuffling endgame still terminates.
pub const MAX_SELFPLAY_TURNS: usize = 500;
