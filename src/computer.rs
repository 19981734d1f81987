//! Random computer player.
//!
//! The computer picks uniformly among the legal targets of the active
//! phase. Before playing it waits a randomized think delay, kept as a
//! deadline that the game loop polls on every tick.

use std::time::{Duration, Instant};

use crate::action::ActionHandler;
use crate::board::Board;
use crate::constants::{AI_DELAY_MIN_MS, AI_DELAY_SPREAD_MS};
use crate::position::{Color, Point};

/// A fully specified action, ready to be applied to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionChoice {
    Place(Point),
    Move { from: Point, to: Point },
    Fly { from: Point, to: Point },
    Remove(Point),
}

/// Pick a uniformly random legal action for `mover` under `handler`.
///
/// For moves and flights the mover's pieces are shuffled and the first one
/// with somewhere to go becomes the origin. Returns `None` when nothing is
/// legal, which only happens once the game is already decided.
pub fn choose_action(
    rng: &mut fastrand::Rng,
    board: &Board,
    handler: ActionHandler,
    mover: Color,
) -> Option<ActionChoice> {
    match handler {
        ActionHandler::Place => {
            pick(rng, &handler.available_moves(board, mover, None)).map(ActionChoice::Place)
        }
        ActionHandler::Remove => {
            pick(rng, &handler.available_moves(board, mover, None)).map(ActionChoice::Remove)
        }
        ActionHandler::Move | ActionHandler::Fly => {
            let mut origins = board.positions_of_color(mover);
            rng.shuffle(&mut origins);
            origins.into_iter().find_map(|from| {
                let targets = handler.available_moves(board, mover, Some(from));
                let to = pick(rng, &targets)?;
                Some(if handler == ActionHandler::Fly {
                    ActionChoice::Fly { from, to }
                } else {
                    ActionChoice::Move { from, to }
                })
            })
        }
    }
}

fn pick(rng: &mut fastrand::Rng, moves: &[Point]) -> Option<Point> {
    if moves.is_empty() {
        None
    } else {
        Some(moves[rng.usize(..moves.len())])
    }
}

/// Computer player state: its random source and pending move deadline.
#[derive(Debug, Clone)]
pub struct Computer {
    rng: fastrand::Rng,
    move_time: Option<Instant>,
    think_delay: bool,
}

impl Default for Computer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Computer {
    /// Create a computer player, seeded for reproducible games if `seed`
    /// is given.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        Self {
            rng,
            move_time: None,
            think_delay: true,
        }
    }

    /// Play as soon as asked instead of waiting out the think delay.
    pub fn without_delay(mut self) -> Self {
        self.think_delay = false;
        self
    }

    /// Pending deadline, if a decision has been scheduled.
    pub fn move_time(&self) -> Option<Instant> {
        self.move_time
    }

    /// Schedule the next move, unless one is already pending.
    pub fn set_move_time(&mut self, now: Instant) {
        if self.move_time.is_some() {
            return;
        }
        let delay = if self.think_delay {
            Duration::from_millis(AI_DELAY_MIN_MS + self.rng.u64(0..=AI_DELAY_SPREAD_MS))
        } else {
            Duration::ZERO
        };
        self.move_time = Some(now + delay);
    }

    /// True once the deadline has passed. Consumes the deadline.
    pub fn is_time_to_move(&mut self, now: Instant) -> bool {
        match self.move_time {
            Some(t) if now >= t => {
                self.move_time = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending deadline.
    pub fn cancel(&mut self) {
        self.move_time = None;
    }

    pub fn choose(
        &mut self,
        board: &Board,
        handler: ActionHandler,
        mover: Color,
    ) -> Option<ActionChoice> {
        choose_action(&mut self.rng, board, handler, mover)
    }
}
