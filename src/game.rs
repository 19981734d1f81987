//! Game orchestration: turns, mills, captures, and the end of the game.
//!
//! [`Game`] owns the board and everything derived from it. Front ends feed
//! it position indices (`handle_action`) or fully specified actions
//! (`create_*_action`), poll it with `tick` so computer players can move,
//! and drain [`GameEvent`]s to animate what happened.
//!
//! A completed place, move or fly triggers a mill scan. A newly formed
//! mill keeps the turn with the mover and switches to the remove phase;
//! otherwise, and after every removal, the turn passes to the opponent.

use std::time::Instant;

use tracing::{debug, info};

use crate::action::{removable_pieces, ActionController, ActionHandler, MoveType};
use crate::board::Board;
use crate::computer::{choose_action, ActionChoice};
use crate::constants::LOSS_THRESHOLD;
use crate::error::RuleError;
use crate::mill::{Mill, MillManager};
use crate::player::{default_players, Player};
use crate::position::{Color, Point};

/// Something that happened on the board, for presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Placed { to: Point, color: Color },
    Moved { from: Point, to: Point, color: Color, flying: bool },
    /// `color` is the owner of the captured piece.
    Removed { at: Point, color: Color },
    MillFormed(Mill),
    GameOver { winner: Color },
}

/// Result of feeding a position into [`Game::handle_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action was carried out.
    Applied(GameEvent),
    /// One of the mover's own pieces became the origin of a move or fly.
    Selected(Point),
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    mill_manager: MillManager,
    controller: ActionController,
    players: [Player; 2],
    mover: Color,
    winner: Option<Color>,
    events: Vec<GameEvent>,
    turns: usize,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(default_players())
    }
}

impl Game {
    /// Start a new game. `players[0]` plays green and moves first.
    pub fn new(players: [Player; 2]) -> Self {
        Self::from_board(players, Board::new(), Color::Green)
    }

    /// Continue from an arbitrary board with `mover` to play.
    ///
    /// Mills already standing on `board` are taken as seen, so they do not
    /// grant a capture.
    pub fn from_board(players: [Player; 2], board: Board, mover: Color) -> Self {
        debug_assert_eq!(players[0].color, Color::Green);
        debug_assert_eq!(players[1].color, Color::Blue);
        let mut mill_manager = MillManager::new();
        mill_manager.compare_mills(board.mills());
        let mut controller = ActionController::new();
        controller.update_action_handler(&board, mover);
        Self {
            board,
            mill_manager,
            controller,
            players,
            mover,
            winner: None,
            events: Vec::new(),
            turns: 0,
        }
    }

    /// Back to the opening position with the same players.
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.mill_manager.reset();
        self.controller.reset();
        self.mover = Color::Green;
        self.winner = None;
        self.events.clear();
        self.turns = 0;
        self.cancel_computer_timers();
        info!("new game");
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side to act. Stays with the capturing side during a removal.
    pub fn mover(&self) -> Color {
        self.mover
    }

    pub fn player(&self, color: Color) -> &Player {
        &self.players[color.index()]
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.mover)
    }

    pub fn is_ai_turn(&self) -> bool {
        self.current_player().is_computer()
    }

    pub fn action_handler(&self) -> ActionHandler {
        self.controller.handler()
    }

    pub fn move_type(&self) -> MoveType {
        self.controller.move_type()
    }

    pub fn selected_position(&self) -> Option<Point> {
        self.controller.selected()
    }

    /// Number of completed turns (a mill and its capture count as one).
    pub fn turns(&self) -> usize {
        self.turns
    }

    /// The latched winner, if [`Game::check_game_over`] has found one.
    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// All mills currently on the board.
    pub fn mills(&self) -> Vec<Mill> {
        self.board.mills()
    }

    /// Legal targets for the active handler and current selection.
    pub fn available_moves(&self) -> Vec<Point> {
        self.controller.available_moves(&self.board, self.mover)
    }

    /// Legal targets of the active handler as if `origin` were selected.
    ///
    /// Empty unless `origin` holds one of the mover's pieces.
    pub fn available_moves_from(&self, origin: Point) -> Vec<Point> {
        if self.board.color_at(origin) != Some(self.mover) {
            return Vec::new();
        }
        self.controller
            .handler()
            .available_moves(&self.board, self.mover, Some(origin))
    }

    /// Every target reachable by any of the mover's pieces under the active
    /// handler, deduplicated and sorted.
    pub fn all_available_moves(&self) -> Vec<Point> {
        let handler = self.controller.handler();
        let mut moves: Vec<Point> = self
            .board
            .positions_of_color(self.mover)
            .into_iter()
            .flat_map(|origin| handler.available_moves(&self.board, self.mover, Some(origin)))
            .collect();
        moves.sort_unstable();
        moves.dedup();
        moves
    }

    /// Take the events recorded since the last call.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // End of game
    // -------------------------------------------------------------------------

    /// Decide whether the game is over, without side effects.
    ///
    /// Only applies once both sides have placed everything: a side with two
    /// or fewer pieces loses, and so does a mover with no legal target.
    pub fn evaluate(&self) -> Option<Color> {
        if !self.board.is_pieces_placed() {
            return None;
        }
        if self.board.pieces_on_board(Color::Green) <= LOSS_THRESHOLD {
            Some(Color::Blue)
        } else if self.board.pieces_on_board(Color::Blue) <= LOSS_THRESHOLD {
            Some(Color::Green)
        } else if self.all_available_moves().is_empty() {
            Some(self.mover.opponent())
        } else {
            None
        }
    }

    /// Evaluate and latch the result. The first winner found sticks.
    pub fn check_game_over(&mut self) -> Option<Color> {
        if self.winner.is_none() {
            if let Some(winner) = self.evaluate() {
                info!(%winner, turns = self.turns, "game over");
                self.winner = Some(winner);
                self.events.push(GameEvent::GameOver { winner });
            }
        }
        self.winner
    }

    fn ensure_running(&self) -> Result<(), RuleError> {
        match self.winner {
            Some(w) => Err(RuleError::GameOver(w)),
            None => Ok(()),
        }
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Act on a clicked or typed position.
    ///
    /// For moves and flights, picking one of the mover's own pieces selects
    /// it as the origin; picking a legal target then moves it.
    ///
    /// Clicks are refused while a computer player is to move.
    ///
    /// # Panics
    /// If `index` is not a board position.
    pub fn handle_action(&mut self, index: Point) -> Result<ActionOutcome, RuleError> {
        self.ensure_running()?;
        if self.is_ai_turn() {
            return Err(RuleError::ComputerTurn(self.mover));
        }
        let occupant = self.board.color_at(index);
        let handler = self.controller.handler();
        let legal = self.available_moves().contains(&index);
        let event = match (handler, self.controller.selected()) {
            (ActionHandler::Place, _) if legal => self.create_place_action(index)?,
            (ActionHandler::Remove, _) if legal => self.create_remove_action(index)?,
            (ActionHandler::Move, Some(origin)) if legal => self.create_move_action(origin, index)?,
            (ActionHandler::Fly, Some(origin)) if legal => self.create_fly_action(origin, index)?,
            (h, _) if h.needs_origin() && occupant == Some(self.mover) => {
                debug!(index, "origin selected");
                self.controller.select(Some(index));
                return Ok(ActionOutcome::Selected(index));
            }
            _ => {
                return Err(RuleError::IllegalAction {
                    index,
                    move_type: handler.move_type(),
                });
            }
        };
        Ok(ActionOutcome::Applied(event))
    }

    fn check_legal(
        &self,
        expected: ActionHandler,
        origin: Option<Point>,
        target: Point,
    ) -> Result<(), RuleError> {
        self.ensure_running()?;
        let handler = self.controller.handler();
        let illegal = RuleError::IllegalAction {
            index: target,
            move_type: handler.move_type(),
        };
        if handler != expected {
            return Err(illegal);
        }
        if let Some(o) = origin {
            if self.board.color_at(o) != Some(self.mover) {
                return Err(illegal);
            }
        }
        if handler
            .available_moves(&self.board, self.mover, origin)
            .contains(&target)
        {
            Ok(())
        } else {
            Err(illegal)
        }
    }

    pub fn create_place_action(&mut self, to: Point) -> Result<GameEvent, RuleError> {
        self.check_legal(ActionHandler::Place, None, to)?;
        let color = self.mover;
        self.board.place(to, color);
        debug!(%color, to, "place");
        Ok(self.finish_piece_action(GameEvent::Placed { to, color }))
    }

    pub fn create_move_action(&mut self, from: Point, to: Point) -> Result<GameEvent, RuleError> {
        self.check_legal(ActionHandler::Move, Some(from), to)?;
        Ok(self.relocate(from, to, false))
    }

    pub fn create_fly_action(&mut self, from: Point, to: Point) -> Result<GameEvent, RuleError> {
        self.check_legal(ActionHandler::Fly, Some(from), to)?;
        Ok(self.relocate(from, to, true))
    }

    pub fn create_remove_action(&mut self, at: Point) -> Result<GameEvent, RuleError> {
        self.check_legal(ActionHandler::Remove, None, at)?;
        let color = self.board.remove_piece(at);
        debug!(by = %self.mover, %color, at, "remove");
        let event = GameEvent::Removed { at, color };
        self.events.push(event);
        // Refresh the baseline so a broken mill can be re-formed later.
        self.mill_manager.get_new_mill(&self.board);
        self.end_turn();
        Ok(event)
    }

    /// Apply an action picked by a computer policy.
    pub fn play_choice(&mut self, choice: ActionChoice) -> Result<GameEvent, RuleError> {
        match choice {
            ActionChoice::Place(to) => self.create_place_action(to),
            ActionChoice::Move { from, to } => self.create_move_action(from, to),
            ActionChoice::Fly { from, to } => self.create_fly_action(from, to),
            ActionChoice::Remove(at) => self.create_remove_action(at),
        }
    }

    /// Play a uniformly random legal action for the mover, whoever controls
    /// it. Returns `None` if the game is over or nothing is legal.
    pub fn play_random(&mut self, rng: &mut fastrand::Rng) -> Option<GameEvent> {
        if self.check_game_over().is_some() {
            return None;
        }
        let choice = choose_action(rng, &self.board, self.controller.handler(), self.mover)?;
        self.play_choice(choice).ok()
    }

    /// Advance computer players. Call once per frame or loop iteration.
    ///
    /// Checks for the end of the game, then, if a computer is to move,
    /// schedules its think delay and plays once the delay has passed.
    pub fn tick(&mut self, now: Instant) -> Option<GameEvent> {
        if self.check_game_over().is_some() {
            return None;
        }
        let Game {
            board,
            controller,
            players,
            mover,
            ..
        } = self;
        let ai = players[mover.index()].computer_mut()?;
        ai.set_move_time(now);
        if !ai.is_time_to_move(now) {
            return None;
        }
        let choice = ai.choose(board, controller.handler(), *mover)?;
        self.play_choice(choice).ok()
    }

    fn relocate(&mut self, from: Point, to: Point, flying: bool) -> GameEvent {
        let color = self.mover;
        self.board.move_piece(from, to);
        debug!(%color, from, to, flying, "move");
        self.finish_piece_action(GameEvent::Moved {
            from,
            to,
            color,
            flying,
        })
    }

    /// Record `event`, then either start a capture or pass the turn.
    fn finish_piece_action(&mut self, event: GameEvent) -> GameEvent {
        self.events.push(event);
        if let Some(mill) = self.mill_manager.get_new_mill(&self.board) {
            info!(%mill, "mill formed");
            self.events.push(GameEvent::MillFormed(mill));
            if removable_pieces(&self.board, self.mover.opponent()).is_empty() {
                debug!("nothing to capture");
            } else {
                self.controller.initiate_remove();
                self.cancel_computer_timers();
                return event;
            }
        }
        self.end_turn();
        event
    }

    fn end_turn(&mut self) {
        self.mover = self.mover.opponent();
        self.turns += 1;
        self.controller.update_action_handler(&self.board, self.mover);
        self.cancel_computer_timers();
        self.check_game_over();
    }

    /// Each decision point starts with a fresh think delay.
    fn cancel_computer_timers(&mut self) {
        for player in &mut self.players {
            if let Some(ai) = player.computer_mut() {
                ai.cancel();
            }
        }
    }
}
