//! Morris-Rust: a Nine Men's Morris rule engine.
//!
//! The crate holds the rules of the game and nothing about how it is drawn:
//! front ends resolve clicks to position indices, feed them to a
//! [`game::Game`], and animate the [`game::GameEvent`]s it reports.
//!
//! ## Modules
//!
//! - [`constants`] - Board topology table, piece counts, and timing
//! - [`position`] - Positions, pieces, colors, and neighbour directions
//! - [`board`] - Occupancy, piece counters, mutators, and mill scanning
//! - [`mill`] - New-mill detection against the previous scan
//! - [`action`] - Phase handlers and their legal targets
//! - [`player`] - Player identity and control
//! - [`computer`] - Random move policy with a think delay
//! - [`game`] - Turn orchestration and the win evaluator
//! - [`protocol`] - Text protocol for external front ends
//! - [`error`] - Rule errors
//!
//! ## Example
//!
//! ```
//! use morris_rust::game::Game;
//! use morris_rust::action::MoveType;
//! use morris_rust::position::Color;
//!
//! let mut game = Game::default();
//! for pt in [0, 9, 1, 10, 2] {
//!     game.handle_action(pt).unwrap();
//! }
//!
//! // Green closed the top row and now removes a blue piece.
//! assert_eq!(game.mover(), Color::Green);
//! assert_eq!(game.move_type(), MoveType::Remove);
//! assert_eq!(game.available_moves(), vec![9, 10]);
//! ```

pub mod action;
pub mod board;
pub mod computer;
pub mod constants;
pub mod error;
pub mod game;
pub mod mill;
pub mod player;
pub mod position;
pub mod protocol;
