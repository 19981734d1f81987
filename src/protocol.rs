//! Line-based text protocol for driving the engine from a front end.
//!
//! The framing follows GTP: each command is one line, optionally prefixed
//! by a numeric id. A successful response starts with `=`, a failure with
//! `?`, followed by the id (if any), the response text, and a blank line.
//!
//! ## Supported Commands
//!
//! - `name`, `version`, `protocol_version` - Engine identity
//! - `list_commands`, `known_command <cmd>` - Command discovery
//! - `quit` - Exit the loop
//! - `clear_board` / `new_game` - Reset to the opening position
//! - `play <index>` - Act on a position (place, select, move, or remove)
//! - `genmove` - Let the random policy play one action for the mover
//! - `legal` - Legal targets for the current phase and selection
//! - `phase` - Current phase and mover
//! - `showboard` - Board diagram
//! - `mills` - Mills on the board
//! - `counts` - Pieces in hand and on the board for both sides
//! - `winner` - Winning color, or `none`
//!
//! ## Example
//!
//! ```ignore
//! use morris_rust::protocol::ProtocolEngine;
//! let mut engine = ProtocolEngine::new(None);
//! engine.run(std::io::stdin().lock(), std::io::stdout())?;
//! ```

use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::game::{ActionOutcome, Game, GameEvent};
use crate::position::{Color, Point};

/// The list of known protocol commands.
const KNOWN_COMMANDS: &[&str] = &[
    "clear_board",
    "counts",
    "genmove",
    "known_command",
    "legal",
    "list_commands",
    "mills",
    "name",
    "new_game",
    "phase",
    "play",
    "protocol_version",
    "quit",
    "showboard",
    "version",
    "winner",
];

/// Protocol engine state.
#[derive(Debug)]
pub struct ProtocolEngine {
    game: Game,
    /// Random source for `genmove`
    rng: fastrand::Rng,
}

impl ProtocolEngine {
    /// Create an engine with two externally controlled sides.
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_game(Game::default(), seed)
    }

    pub fn with_game(game: Game, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => fastrand::Rng::with_seed(s),
            None => fastrand::Rng::new(),
        };
        Self { game, rng }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Run the command loop until `quit` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        for line in input.lines() {
            let line = line?;

            // Skip empty lines and comments
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let (id, command_line) = Self::parse_id(line);

            let parts: Vec<&str> = command_line.split_whitespace().collect();
            let Some((command, args)) = parts.split_first() else {
                continue;
            };
            let command = command.to_lowercase();

            let (success, message) = self.execute(&command, args);
            if !success {
                debug!(%command, %message, "command failed");
            }

            let prefix = if success { '=' } else { '?' };
            let id_str = id.map(|i| i.to_string()).unwrap_or_default();
            writeln!(output, "{prefix}{id_str} {message}\n")?;
            output.flush()?;

            if command == "quit" {
                break;
            }
        }
        Ok(())
    }

    /// Parse an optional numeric command ID from the beginning of the line.
    fn parse_id(line: &str) -> (Option<u32>, &str) {
        let trimmed = line.trim();
        let end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        match trimmed[..end].parse::<u32>() {
            Ok(id) => (Some(id), trimmed[end..].trim()),
            Err(_) => (None, trimmed),
        }
    }

    /// Parse a position argument, rejecting anything off the board.
    fn parse_point(&self, arg: &str) -> Result<Point, String> {
        let index: usize = arg
            .parse()
            .map_err(|_| format!("invalid position '{arg}'"))?;
        self.game
            .board()
            .try_position(index)
            .map(|p| p.index())
            .map_err(|e| e.to_string())
    }

    /// Execute a command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "name" => (true, "morris-rust".to_string()),

            "version" => (true, env!("CARGO_PKG_VERSION").to_string()),

            "protocol_version" => (true, "1".to_string()),

            "list_commands" => (true, KNOWN_COMMANDS.join("\n")),

            "known_command" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let known = KNOWN_COMMANDS.contains(&arg.to_lowercase().as_str());
                (true, known.to_string())
            }

            "quit" => (true, String::new()),

            "clear_board" | "new_game" => {
                self.game.reset();
                (true, String::new())
            }

            "play" => {
                let Some(arg) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                let index = match self.parse_point(arg) {
                    Ok(i) => i,
                    Err(e) => return (false, e),
                };
                let result = self.game.handle_action(index);
                self.game.check_game_over();
                match result {
                    Ok(ActionOutcome::Selected(pt)) => (true, format!("selected {pt}")),
                    Ok(ActionOutcome::Applied(event)) => (true, describe(&event)),
                    Err(e) => (false, e.to_string()),
                }
            }

            "genmove" => match self.game.play_random(&mut self.rng) {
                Some(event) => {
                    self.game.check_game_over();
                    (true, describe(&event))
                }
                None => match self.game.winner() {
                    Some(w) => (false, format!("game is over, {w} has won")),
                    None => {
                        warn!("no legal action for {}", self.game.mover());
                        (false, "no legal action".to_string())
                    }
                },
            },

            "legal" => (true, join_points(&self.game.available_moves())),

            "phase" => (
                true,
                format!("{} {}", self.game.move_type(), self.game.mover()),
            ),

            "showboard" => (true, format!("\n{}", self.game.board())),

            "mills" => {
                let mills: Vec<String> =
                    self.game.mills().iter().map(ToString::to_string).collect();
                (true, mills.join("\n"))
            }

            "counts" => {
                let board = self.game.board();
                let lines: Vec<String> = Color::ALL
                    .iter()
                    .map(|&c| {
                        let count = board.counts(c);
                        format!("{c} left {} on_board {}", count.left, count.on_board)
                    })
                    .collect();
                (true, lines.join("\n"))
            }

            "winner" => match self.game.check_game_over() {
                Some(w) => (true, w.to_string()),
                None => (true, "none".to_string()),
            },

            _ => (false, format!("unknown command: {command}")),
        }
    }
}

fn join_points(points: &[Point]) -> String {
    points
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Short text form of an action event.
fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::Placed { to, .. } => format!("placed {to}"),
        GameEvent::Moved {
            from, to, flying, ..
        } => {
            let verb = if *flying { "flew" } else { "moved" };
            format!("{verb} {from} {to}")
        }
        GameEvent::Removed { at, .. } => format!("removed {at}"),
        GameEvent::MillFormed(mill) => format!("mill {mill}"),
        GameEvent::GameOver { winner } => format!("winner {winner}"),
    }
}
