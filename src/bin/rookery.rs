/*
  Rookery, a chess rules engine and game-tree search agent.
  Copyright (C) 2024 The Rookery Authors.

  Rookery is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Rookery is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/

//! The Rookery command-line front end.
//!
//! This is a thin text interface over the library: it can ask the agent for a move, print a static
//! evaluation, let the agent play itself, or play an interactive game against a human on the
//! terminal.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]

use std::{
    error::Error,
    io::{stdin, BufRead},
    path::PathBuf,
    time::Instant,
};

use clap::{Parser, Subcommand};
use rookery::{
    base::{parse_move, Board, Color, PieceKind},
    config::Config,
    engine::{evaluate::evaluate, Agent},
    fens::BOARD_START_FEN,
    game::{Game, MoveStatus, Outcome},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rookery", version)]
#[command(about = "A chess rules engine with an alpha-beta search agent", long_about = None)]
/// Command-line arguments.
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, such as `debug` or `rookery=trace`. Overrides `RUST_LOG`
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
/// The things this program can do.
enum Command {
    /// Print the agent's move for the side to move
    Bestmove {
        /// The position to search, in FEN
        #[arg(short, long, default_value = BOARD_START_FEN)]
        fen: String,

        /// Search depth, overriding the configuration
        #[arg(short, long)]
        depth: Option<u8>,
    },
    /// Print the static evaluation of a position
    Eval {
        /// The position to evaluate, in FEN
        #[arg(short, long, default_value = BOARD_START_FEN)]
        fen: String,

        /// The side whose point of view is used
        #[arg(long, default_value = "white")]
        color: Color,
    },
    /// Let the agent play both sides from the starting position
    Selfplay {
        /// Search depth, overriding the configuration
        #[arg(short, long)]
        depth: Option<u8>,

        /// Stop after this many plies even if the game is not over
        #[arg(long, default_value_t = 200)]
        max_plies: usize,
    },
    /// Play against the agent, entering moves such as `e2e4` or `e7e8n`
    Play,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = match &cli.log {
        Some(directives) => EnvFilter::try_new(directives)?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    info!(?config, "starting");

    match cli.command {
        Command::Bestmove { fen, depth } => {
            let board = Board::from_fen(&fen)?;
            let agent = Agent::new(board.current_turn(), depth.unwrap_or(config.search_depth));
            match agent.search(&board).and_then(|info| info.best_move.map(|m| (m, info))) {
                Some(((start, end), info)) => {
                    println!("bestmove {start}{end}");
                    println!(
                        "info score {} nodes {} time {}ms",
                        info.score,
                        info.nodes,
                        info.elapsed.as_millis()
                    );
                }
                None => println!("bestmove (none)"),
            }
        }
        Command::Eval { fen, color } => {
            let board = Board::from_fen(&fen)?;
            println!("{}", evaluate(&board, color));
        }
        Command::Selfplay { depth, max_plies } => {
            selfplay(depth.unwrap_or(config.search_depth), max_plies);
        }
        Command::Play => play(&config)?,
    }

    Ok(())
}

/// Let two agents play each other from the starting position, printing every move.
fn selfplay(depth: u8, max_plies: usize) {
    let mut board = Board::new();
    for ply in 0..max_plies {
        if let Some(outcome) = Outcome::from_board(&board) {
            println!("{outcome}");
            return;
        }
        let agent = Agent::new(board.current_turn(), depth);
        let Some((start, end)) = agent.get_best_move(&board) else {
            break;
        };
        if board.move_piece(start, end) {
            board.promote_pawn(end, PieceKind::Queen);
        }
        println!("{}. {start}{end}", ply / 2 + 1);
    }
    match Outcome::from_board(&board) {
        Some(outcome) => println!("{outcome}"),
        None => println!("stopped after {max_plies} plies"),
    }
    println!("{board}");
}

/// Play an interactive game against the agent on the terminal.
fn play(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut game = Game::new(config);
    let mut lines = stdin().lock().lines();
    println!("You play {}. Enter moves like e2e4, or `undo` or `quit`.", config.player_color);

    while !game.is_over() {
        if game.is_agent_turn() {
            let tic = Instant::now();
            let result = game.spawn_agent_search().join()?;
            game.spend_time(game.agent().color, tic.elapsed().as_secs_f64());
            if let Some((start, end)) = result.and_then(|info| info.best_move) {
                game.apply_search_result((start, end));
                println!("agent plays {start}{end}");
            }
            game.check_outcome();
            continue;
        }

        println!("{}", game.board());
        println!(
            "{:.0}s left for you, {:.0}s for the agent",
            game.remaining_time(game.player_color()),
            game.remaining_time(game.agent().color)
        );

        let tic = Instant::now();
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let line = line?;
        game.spend_time(game.player_color(), tic.elapsed().as_secs_f64());
        if game.check_outcome().is_some() {
            break;
        }

        match line.trim() {
            "quit" => return Ok(()),
            "undo" => {
                // take back the agent's reply and our own move
                game.undo_move();
                game.undo_move();
                continue;
            }
            _ => {}
        }

        let (start, end, promotion) = match parse_move(&line) {
            Ok(m) => m,
            Err(e) => {
                eprintln!("{e}");
                continue;
            }
        };
        match game.try_move(start, end) {
            MoveStatus::Rejected => println!("illegal move"),
            MoveStatus::Played => {}
            MoveStatus::PromotionPending => {
                game.promote(promotion.unwrap_or(PieceKind::Queen));
            }
        }
    }

    if let Some(outcome) = game.outcome() {
        println!("{outcome}");
    }
    println!("{}", game.board());
    Ok(())
}
