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

//! A game session between a human and the agent.
//!
//! A `Game` wraps a [`Board`] with everything an interface needs to run a game: whose side the
//! human is on, the agent playing the other side, the players' clocks, a pending pawn promotion,
//! and the outcome once the game ends.
//!
//! The game does not keep time by itself. The caller measures elapsed time however it likes and
//! charges it to a player with [`Game::spend_time`].

use std::fmt::{Display, Formatter};

use tracing::{info, warn};

use crate::{
    base::{Board, Color, PieceKind, Square},
    config::Config,
    engine::{
        search::{Agent, MovePair},
        thread::{spawn_search, SearchHandle},
    },
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The ways a game can end.
pub enum EndReason {
    /// The loser's king is in check and they have no legal move.
    Checkmate,
    /// The player to move is not in check but has no legal move.
    Stalemate,
    /// Only the two kings are left.
    InsufficientMaterial,
    /// The loser ran out of time.
    Timeout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The result of a finished game.
pub struct Outcome {
    /// The winner, or `None` for a draw.
    pub winner: Option<Color>,
    /// How the game ended.
    pub reason: EndReason,
}

impl Outcome {
    #[must_use]
    /// Get the outcome of the game on `board`, ignoring clocks.
    /// Returns `None` if the game is not over.
    pub fn from_board(board: &Board) -> Option<Outcome> {
        for loser in Color::ALL {
            if board.is_checkmate(loser) {
                return Some(Outcome {
                    winner: Some(!loser),
                    reason: EndReason::Checkmate,
                });
            }
        }
        if board.is_stalemate() {
            return Some(Outcome {
                winner: None,
                reason: EndReason::Stalemate,
            });
        }
        if board.is_insufficient_material() {
            return Some(Outcome {
                winner: None,
                reason: EndReason::InsufficientMaterial,
            });
        }
        None
    }

    #[must_use]
    /// Determine whether the game ended by checkmate.
    pub fn is_checkmate(&self) -> bool {
        self.reason == EndReason::Checkmate
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let reason = match self.reason {
            EndReason::Checkmate => "checkmate",
            EndReason::Stalemate => "stalemate",
            EndReason::InsufficientMaterial => "insufficient material",
            EndReason::Timeout => "timeout",
        };
        match self.winner {
            Some(color) => write!(f, "{color} wins by {reason}"),
            None => write!(f, "draw by {reason}"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// The result of asking a game to make a move.
pub enum MoveStatus {
    /// The move was illegal, or the game could not accept a move right now. Nothing changed.
    Rejected,
    /// The move was made.
    Played,
    /// The move was made and a pawn is waiting to be promoted with [`Game::promote`].
    PromotionPending,
}

#[derive(Clone, Debug)]
/// A game in progress between a human player and the agent.
pub struct Game {
    /// The board the game is played on.
    board: Board,
    /// The color the human plays.
    player_color: Color,
    /// The agent, which plays the other color.
    agent: Agent,
    /// The remaining time of each player in seconds, indexed by color.
    clocks: [f64; 2],
    /// The square of a pawn which has reached its last row and awaits promotion.
    pending_promotion: Option<Square>,
    /// The outcome, once the game is over.
    outcome: Option<Outcome>,
}

impl Game {
    #[must_use]
    /// Start a new game from the standard starting position.
    pub fn new(config: &Config) -> Game {
        Game::with_board(config, Board::new())
    }

    #[must_use]
    /// Start a game from an arbitrary position.
    pub fn with_board(config: &Config, board: Board) -> Game {
        let clock = config.clock_seconds();
        let mut game = Game {
            board,
            player_color: config.player_color,
            agent: config.agent(),
            clocks: [clock; 2],
            pending_promotion: None,
            outcome: None,
        };
        game.check_outcome();
        game
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn player_color(&self) -> Color {
        self.player_color
    }

    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    #[must_use]
    /// Get the color of the player to move.
    pub fn current_turn(&self) -> Color {
        self.board.current_turn()
    }

    #[must_use]
    /// Determine whether it is the agent's turn to move.
    pub fn is_agent_turn(&self) -> bool {
        self.board.current_turn() == self.agent.color
    }

    #[must_use]
    /// Get the remaining time of `color`, in seconds.
    pub fn remaining_time(&self, color: Color) -> f64 {
        self.clocks[color as usize]
    }

    /// Charge `seconds` of thinking time to `color`. A clock never goes below zero.
    /// Call [`Game::check_outcome`] afterwards to find out whether a flag fell.
    pub fn spend_time(&mut self, color: Color, seconds: f64) {
        let clock = &mut self.clocks[color as usize];
        *clock = (*clock - seconds.max(0.0)).max(0.0);
    }

    #[must_use]
    /// Get the square of the pawn waiting to be promoted, if any.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending_promotion
    }

    #[must_use]
    /// Get the outcome of the game, if it has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Determine whether the game can accept a move right now.
    fn accepts_moves(&self) -> bool {
        self.outcome.is_none() && self.pending_promotion.is_none()
    }

    #[must_use]
    /// Get the legal destinations of the piece on `square`.
    /// Empty if the game is over or a promotion is pending.
    pub fn valid_moves(&self, square: Square) -> Vec<Square> {
        if self.accepts_moves() {
            self.board.get_valid_moves(square)
        } else {
            Vec::new()
        }
    }

    /// Make the move from `start` to `end` for the player to move, if it is legal.
    ///
    /// If a pawn reaches its last row, the game waits for [`Game::promote`] before accepting any
    /// other move.
    pub fn try_move(&mut self, start: Square, end: Square) -> MoveStatus {
        if !self.accepts_moves() || !self.board.is_valid_move(start, end) {
            return MoveStatus::Rejected;
        }
        if self.board.move_piece(start, end) {
            self.pending_promotion = Some(end);
            return MoveStatus::PromotionPending;
        }
        self.check_outcome();
        MoveStatus::Played
    }

    /// Complete a pending promotion with a piece of kind `kind`.
    /// Kinds which a pawn cannot become are replaced by a queen.
    /// Returns `false` if no promotion was pending.
    pub fn promote(&mut self, kind: PieceKind) -> bool {
        let Some(square) = self.pending_promotion.take() else {
            return false;
        };
        self.board.promote_pawn(square, kind);
        self.check_outcome();
        true
    }

    /// Undo the most recent move, reopening the game if it had ended.
    /// A pending promotion is abandoned along with the move that caused it.
    pub fn undo_move(&mut self) {
        self.board.undo_move();
        self.pending_promotion = None;
        self.outcome = None;
        self.check_outcome();
    }

    /// Let the agent search the current position and play its move.
    /// Returns the move played, or `None` if it is not the agent's turn or the game cannot accept
    /// a move.
    pub fn play_agent_move(&mut self) -> Option<MovePair> {
        if !self.accepts_moves() || !self.is_agent_turn() {
            return None;
        }
        let best = self.agent.get_best_move(&self.board)?;
        self.apply_search_result(best).then_some(best)
    }

    #[must_use]
    /// Start the agent searching the current position on another thread.
    /// Apply the result with [`Game::apply_search_result`].
    pub fn spawn_agent_search(&self) -> SearchHandle {
        spawn_search(self.agent, &self.board)
    }

    /// Play a move found by the agent, after checking that it is still legal on the live board.
    /// A pawn reaching its last row is promoted to a queen.
    /// Returns `false`, changing nothing, if the move is no longer acceptable.
    pub fn apply_search_result(&mut self, (start, end): MovePair) -> bool {
        if !self.accepts_moves()
            || !self.is_agent_turn()
            || !self.board.is_valid_move(start, end)
        {
            warn!(%start, %end, "discarding stale search result");
            return false;
        }
        if self.board.move_piece(start, end) {
            self.board.promote_pawn(end, PieceKind::Queen);
        }
        self.check_outcome();
        true
    }

    /// Check whether the game has ended, recording the outcome if so.
    ///
    /// Checkmates are checked first, then the clocks (the human's before the agent's), then
    /// stalemate, then insufficient material. Once the game is over, the outcome never changes.
    pub fn check_outcome(&mut self) -> Option<Outcome> {
        if self.outcome.is_some() || self.pending_promotion.is_some() {
            return self.outcome;
        }

        let mut outcome = None;
        for loser in Color::ALL {
            if self.board.is_checkmate(loser) {
                outcome = Some(Outcome {
                    winner: Some(!loser),
                    reason: EndReason::Checkmate,
                });
                break;
            }
        }
        if outcome.is_none() {
            outcome = [self.player_color, self.agent.color]
                .into_iter()
                .find(|&c| self.remaining_time(c) <= 0.0)
                .map(|loser| Outcome {
                    winner: Some(!loser),
                    reason: EndReason::Timeout,
                });
        }
        if outcome.is_none() {
            outcome = Outcome::from_board(&self.board);
        }

        if let Some(o) = outcome {
            info!(outcome = %o, plies = self.board.history().len(), "game over");
        }
        self.outcome = outcome;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fens;

    fn config(player_color: Color, search_depth: u8) -> Config {
        Config {
            player_color,
            time_control_minutes: 10,
            search_depth,
        }
    }

    #[test]
    fn new_game() {
        let game = Game::new(&Config::default());
        assert_eq!(game.player_color(), Color::White);
        assert_eq!(game.agent().color, Color::Black);
        assert!((game.remaining_time(Color::White) - 600.0).abs() < f64::EPSILON);
        assert!((game.remaining_time(Color::Black) - 600.0).abs() < f64::EPSILON);
        assert!(!game.is_over());
        assert!(!game.is_agent_turn());
    }

    #[test]
    fn human_then_agent() {
        let mut game = Game::new(&config(Color::White, 2));
        assert_eq!(game.try_move(Square::E2, Square::E4), MoveStatus::Played);
        assert!(game.is_agent_turn());
        // white cannot move twice in a row
        assert_eq!(game.try_move(Square::D2, Square::D4), MoveStatus::Rejected);

        let (start, end) = game.play_agent_move().unwrap();
        assert_eq!(game.board().color_at(end), Some(Color::Black));
        assert!(game.board().piece_at(start).is_none());
        assert_eq!(game.current_turn(), Color::White);
        assert_eq!(game.board().history().len(), 2);
        assert_eq!(game.play_agent_move(), None);
    }

    #[test]
    fn illegal_moves_change_nothing() {
        let mut game = Game::new(&Config::default());
        let before = game.board().clone();
        assert_eq!(game.try_move(Square::E2, Square::E5), MoveStatus::Rejected);
        assert_eq!(game.try_move(Square::E4, Square::E5), MoveStatus::Rejected);
        assert_eq!(game.try_move(Square::E7, Square::E5), MoveStatus::Rejected);
        assert_eq!(game.board(), &before);
    }

    #[test]
    fn promotion_flow() {
        let board = Board::from_fen(fens::WHITE_READY_TO_PROMOTE_FEN).unwrap();
        let mut game = Game::with_board(&config(Color::White, 1), board);
        assert_eq!(
            game.try_move(Square::F7, Square::F8),
            MoveStatus::PromotionPending
        );
        assert_eq!(game.pending_promotion(), Some(Square::F8));
        // nothing else happens until the promotion is chosen
        assert!(game.valid_moves(Square::C6).is_empty());
        assert_eq!(game.play_agent_move(), None);

        assert!(game.promote(PieceKind::Rook));
        assert_eq!(
            game.board().piece_data(Square::F8),
            Some((PieceKind::Rook, Color::White))
        );
        assert_eq!(game.pending_promotion(), None);
        assert!(!game.promote(PieceKind::Queen));
        assert!(game.play_agent_move().is_some());
    }

    #[test]
    fn agent_promotes_to_queen() {
        let board = Board::from_fen("8/8/8/8/8/2K5/5p2/k7 b - - 0 1").unwrap();
        let mut game = Game::with_board(&config(Color::White, 1), board);
        assert_eq!(game.play_agent_move(), Some((Square::F2, Square::F1)));
        assert_eq!(
            game.board().piece_data(Square::F1),
            Some((PieceKind::Queen, Color::Black))
        );
    }

    #[test]
    fn timeout() {
        let mut game = Game::new(&Config::default());
        game.spend_time(Color::White, 599.5);
        assert_eq!(game.check_outcome(), None);
        game.spend_time(Color::White, 1.0);
        assert!(game.remaining_time(Color::White).abs() < f64::EPSILON);
        assert_eq!(
            game.check_outcome(),
            Some(Outcome {
                winner: Some(Color::Black),
                reason: EndReason::Timeout,
            })
        );
        assert_eq!(game.try_move(Square::E2, Square::E4), MoveStatus::Rejected);
    }

    #[test]
    /// Test that checkmate takes priority over a fallen flag.
    fn checkmate_before_timeout() {
        let board = Board::from_fen(fens::MATE_IN_1_FEN).unwrap();
        let mut game = Game::with_board(&config(Color::White, 1), board);
        game.spend_time(Color::White, 10_000.0);
        assert_eq!(game.try_move(Square::B6, Square::B8), MoveStatus::Played);
        let outcome = game.outcome().unwrap();
        assert!(outcome.is_checkmate());
        assert_eq!(outcome.winner, Some(Color::White));
        assert_eq!(outcome.to_string(), "white wins by checkmate");
    }

    #[test]
    fn insufficient_material_is_a_draw() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4q3/4K3 w - - 0 1").unwrap();
        let mut game = Game::with_board(&Config::default(), board);
        assert_eq!(game.try_move(Square::E1, Square::E2), MoveStatus::Played);
        assert_eq!(
            game.outcome(),
            Some(Outcome {
                winner: None,
                reason: EndReason::InsufficientMaterial,
            })
        );
    }

    #[test]
    fn stalemate_is_a_draw() {
        let board = Board::from_fen(fens::STALEMATE_FEN).unwrap();
        let game = Game::with_board(&Config::default(), board);
        assert_eq!(
            game.outcome(),
            Some(Outcome {
                winner: None,
                reason: EndReason::Stalemate,
            })
        );
    }

    #[test]
    /// Test that a search result is rejected if the board moved on while it was running.
    fn stale_search_result() {
        let mut game = Game::new(&config(Color::Black, 2));
        assert!(game.is_agent_turn());
        let handle = game.spawn_agent_search();
        let best = handle.join().unwrap().unwrap().best_move.unwrap();

        // meanwhile, somebody else moved for White
        assert_eq!(game.try_move(Square::A2, Square::A3), MoveStatus::Played);
        assert!(!game.apply_search_result(best));
        assert_eq!(game.board().history().len(), 1);
    }

    #[test]
    fn undo_reopens_game() {
        let board = Board::from_fen(fens::MATE_IN_1_FEN).unwrap();
        let mut game = Game::with_board(&config(Color::White, 1), board);
        game.try_move(Square::B6, Square::B8);
        assert!(game.is_over());
        game.undo_move();
        assert!(!game.is_over());
        assert_eq!(game.current_turn(), Color::White);
    }
}
