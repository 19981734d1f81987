//! Morris-Rust: a Nine Men's Morris rule engine.
//!
//! ## Usage
//!
//! - `morris-rust` - Show a demo
//! - `morris-rust protocol` - Start the text protocol server for a front end
//! - `morris-rust selfplay` - Let two random computer players fight it out
//! - `morris-rust demo` - Walk through a short scripted game

use std::io;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use morris_rust::computer::Computer;
use morris_rust::constants::MAX_SELFPLAY_TURNS;
use morris_rust::game::{Game, GameEvent};
use morris_rust::player::Player;
use morris_rust::position::Color;
use morris_rust::protocol::ProtocolEngine;

/// Morris-Rust: Nine Men's Morris rule engine
#[derive(Parser)]
#[command(name = "morris-rust")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log filter used when RUST_LOG is not set (e.g. "debug")
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the text protocol server on stdin/stdout
    Protocol {
        /// Seed for `genmove`
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play computer against computer and print the result
    Selfplay {
        /// Seed for reproducible games
        #[arg(long)]
        seed: Option<u64>,
        /// Number of games to play
        #[arg(long, default_value_t = 1)]
        games: usize,
        /// Give up (draw) after this many turns
        #[arg(long, default_value_t = MAX_SELFPLAY_TURNS)]
        max_turns: usize,
        /// Wait out the computer think delay between moves
        #[arg(long)]
        delay: bool,
        /// Print every event and the final board
        #[arg(long, short)]
        verbose: bool,
    },
    /// Run a short scripted game
    Demo,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Some(Commands::Protocol { seed }) => {
            let mut engine = ProtocolEngine::new(seed);
            engine.run(io::stdin().lock(), io::stdout())?;
        }
        Some(Commands::Selfplay {
            seed,
            games,
            max_turns,
            delay,
            verbose,
        }) => {
            let mut wins = [0usize; 2];
            let mut draws = 0;
            for n in 0..games {
                let game_seed = seed.map(|s| s.wrapping_add(n as u64 * 2));
                match run_selfplay(game_seed, max_turns, delay, verbose)? {
                    Some(winner) => wins[winner.index()] += 1,
                    None => draws += 1,
                }
            }
            println!(
                "green {} blue {} draws {draws}",
                wins[Color::Green.index()],
                wins[Color::Blue.index()]
            );
        }
        Some(Commands::Demo) | None => run_demo()?,
    }
    Ok(())
}

fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(f) => f,
        Err(_) => EnvFilter::try_new(level)
            .with_context(|| format!("invalid log level '{level}'"))?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
    Ok(())
}

/// Play one computer-vs-computer game. Returns the winner, or `None` if
/// the turn cap was hit.
fn run_selfplay(
    seed: Option<u64>,
    max_turns: usize,
    delay: bool,
    verbose: bool,
) -> anyhow::Result<Option<Color>> {
    let computer = |offset: u64| {
        let ai = Computer::new(seed.map(|s| s.wrapping_add(offset)));
        if delay { ai } else { ai.without_delay() }
    };
    let mut game = Game::new([
        Player::computer(Color::Green, "CPU 1", computer(0)),
        Player::computer(Color::Blue, "CPU 2", computer(1)),
    ]);

    loop {
        let event = game.tick(Instant::now());
        if verbose {
            for e in game.drain_events() {
                println!("{}: {}", game.turns(), format_event(&e));
            }
        }
        if let Some(winner) = game.winner() {
            if verbose {
                println!("{}", game.board());
            }
            return Ok(Some(winner));
        }
        if game.turns() >= max_turns {
            warn!(max_turns, "turn cap reached, scoring as a draw");
            return Ok(None);
        }
        if event.is_none() {
            if !delay {
                bail!("computer found no action for {}", game.mover());
            }
            thread::sleep(Duration::from_millis(20));
        }
    }
}

fn format_event(event: &GameEvent) -> String {
    match event {
        GameEvent::Placed { to, color } => format!("{color} places at {to}"),
        GameEvent::Moved {
            from,
            to,
            color,
            flying,
        } => {
            let verb = if *flying { "flies" } else { "moves" };
            format!("{color} {verb} {from} -> {to}")
        }
        GameEvent::Removed { at, color } => format!("{color} piece at {at} removed"),
        GameEvent::MillFormed(mill) => format!("mill {mill}"),
        GameEvent::GameOver { winner } => format!("{winner} wins"),
    }
}

fn run_demo() -> anyhow::Result<()> {
    println!("Morris-Rust: Nine Men's Morris rule engine\n");

    println!("=== Placement and a mill ===");
    let mut game = Game::default();
    // Green builds the top row while blue plays on the left column.
    for pt in [0, 9, 1, 21, 2] {
        game.handle_action(pt)?;
    }
    for e in game.drain_events() {
        println!("{}", format_event(&e));
    }
    println!("{}", game.board());
    println!(
        "{} must {}; choices: {:?}",
        game.mover(),
        game.move_type(),
        game.available_moves()
    );
    game.handle_action(21)?;
    for e in game.drain_events() {
        println!("{}", format_event(&e));
    }
    println!("{}", game.board());

    println!("=== Random self-play ===");
    match run_selfplay(Some(7), MAX_SELFPLAY_TURNS, false, false)? {
        Some(winner) => println!("{winner} wins"),
        None => println!("draw by turn cap"),
    }
    Ok(())
}
