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

//! Primary search algorithms.
//!
//! The agent uses fixed-depth minimax search with alpha-beta pruning.
//! Every candidate move is tried on a fresh clone of the position, so the board handed to the
//! search is never modified.
//!
//! Moves are tried in a fixed order: by start square, then by end square, both in row-major order
//! from the eighth rank down.
//! When two moves are equally good, the one found first wins, which makes the agent fully
//! deterministic.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::base::{Board, Color, PieceKind, Square};

use super::evaluate::evaluate;

/// The score of a position where the agent has been checkmated, negated.
pub const CHECKMATE_SCORE: i32 = 12_000;

/// The score of a stalemated position.
pub const STALEMATE_SCORE: i32 = 0;

/// The depth the agent searches to if none is given.
pub const DEFAULT_DEPTH: u8 = 3;

/// A move, as a pair of start and end squares.
pub type MovePair = (Square, Square);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
/// A search agent, which picks moves for one side of the game.
pub struct Agent {
    /// The color this agent plays for.
    pub color: Color,
    /// The number of plies the agent looks ahead.
    pub depth: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The information returned by a search.
pub struct SearchInfo {
    /// The best move found, or `None` if the position was already over.
    pub best_move: Option<MovePair>,
    /// The score of the best move, from the agent's point of view.
    pub score: i32,
    /// The number of positions visited.
    pub nodes: u64,
    /// The time the search took.
    pub elapsed: Duration,
}

impl Agent {
    #[must_use]
    /// Construct a new agent which plays for `color`, searching to `depth` plies.
    pub const fn new(color: Color, depth: u8) -> Agent {
        Agent { color, depth }
    }

    #[must_use]
    /// Get the best move for this agent on `board`.
    ///
    /// Returns `None` if it is not this agent's turn, or if the game on `board` is already over.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use rookery::base::{Board, Color, Square};
    /// use rookery::engine::search::Agent;
    ///
    /// // White can mate with Rb8
    /// let board = Board::from_fen("3k4/R7/1R6/5K2/8/8/8/8 w - - 0 1")?;
    /// let agent = Agent::new(Color::White, 2);
    /// assert_eq!(agent.get_best_move(&board), Some((Square::B6, Square::B8)));
    /// assert_eq!(Agent::new(Color::Black, 2).get_best_move(&board), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_best_move(&self, board: &Board) -> Option<MovePair> {
        self.search(board).and_then(|info| info.best_move)
    }

    #[must_use]
    /// Run an alpha-beta search on `board`.
    /// Returns `None` if it is not this agent's turn.
    pub fn search(&self, board: &Board) -> Option<SearchInfo> {
        self.run(board, true)
    }

    #[must_use]
    /// Run a plain minimax search with no pruning on `board`.
    /// This visits every node of the tree, so it is only practical at small depths. It always
    /// agrees with [`Agent::search`] on the score.
    /// Returns `None` if it is not this agent's turn.
    pub fn search_exhaustive(&self, board: &Board) -> Option<SearchInfo> {
        self.run(board, false)
    }

    /// Search `board`, pruning if `prune` is set.
    fn run(&self, board: &Board, prune: bool) -> Option<SearchInfo> {
        if board.current_turn() != self.color {
            return None;
        }

        let tic = Instant::now();
        let mut searcher = Searcher {
            color: self.color,
            prune,
            nodes: 0,
        };
        let (score, best_move) = searcher.minimax(board, self.depth, i32::MIN, i32::MAX, true);
        let info = SearchInfo {
            best_move,
            score,
            nodes: searcher.nodes,
            elapsed: tic.elapsed(),
        };

        debug!(
            color = %self.color,
            depth = self.depth,
            best_move = ?info.best_move.map(|(s, e)| format!("{s}{e}")),
            score = info.score,
            nodes = info.nodes,
            elapsed_ms = info.elapsed.as_millis(),
            prune,
            "search finished"
        );
        Some(info)
    }
}

impl Default for Agent {
    fn default() -> Self {
        Agent::new(Color::Black, DEFAULT_DEPTH)
    }
}

/// The state of a single search.
struct Searcher {
    /// The color of the agent, whose score is maximized.
    color: Color,
    /// Whether to prune with alpha-beta bounds.
    prune: bool,
    /// The number of nodes visited so far.
    nodes: u64,
}

impl Searcher {
    /// Get the score of a finished game, from the agent's point of view.
    /// Returns `None` if the game on `board` is not over.
    fn terminal_score(&self, board: &Board) -> Option<i32> {
        for mated in Color::ALL {
            if board.is_checkmate(mated) {
                return Some(if mated == self.color {
                    -CHECKMATE_SCORE
                } else {
                    CHECKMATE_SCORE
                });
            }
        }
        board.is_stalemate().then_some(STALEMATE_SCORE)
    }

    /// Score `board` by searching `depth` plies deeper.
    ///
    /// `alpha` is the best score the maximizer is guaranteed so far, and `beta` is the best the
    /// minimizer is guaranteed. Returns the score and the best move at this node.
    /// A finished game is scored before the depth cutoff, so a mate on the last ply is seen as a
    /// mate.
    fn minimax(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> (i32, Option<MovePair>) {
        self.nodes += 1;

        if let Some(score) = self.terminal_score(board) {
            return (score, None);
        }
        if depth == 0 {
            return (evaluate(board, self.color), None);
        }

        let moves = board.all_legal_moves();
        debug_assert!(
            !moves.is_empty(),
            "no moves in a position which is not over:\n{board}"
        );
        if moves.is_empty() {
            return (STALEMATE_SCORE, None);
        }

        let mut best_move = None;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };
        for (start, end) in moves {
            let mut child = board.clone();
            if child.move_piece(start, end) {
                child.promote_pawn(end, PieceKind::Queen);
            }
            let (score, _) = self.minimax(&child, depth - 1, alpha, beta, !maximizing);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_move = Some((start, end));
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_move = Some((start, end));
                }
                beta = beta.min(best_score);
            }

            if self.prune && beta <= alpha {
                break;
            }
        }

        (best_score, best_move)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fens;

    /// Search `fen` with an agent for the player to move, and check that the alpha-beta search and
    /// the exhaustive search agree.
    fn agreement_helper(fen: &str, depth: u8) -> SearchInfo {
        let board = Board::from_fen(fen).unwrap();
        let agent = Agent::new(board.current_turn(), depth);
        let pruned = agent.search(&board).unwrap();
        let full = agent.search_exhaustive(&board).unwrap();
        assert_eq!(pruned.score, full.score, "{fen}");
        assert_eq!(pruned.best_move, full.best_move, "{fen}");
        assert!(pruned.nodes <= full.nodes);
        pruned
    }

    #[test]
    fn only_on_own_turn() {
        let board = Board::new();
        assert!(Agent::new(Color::Black, 2).search(&board).is_none());
        assert!(Agent::new(Color::White, 1).search(&board).is_some());
    }

    #[test]
    fn mate_in_one() {
        for depth in 1..=2 {
            let board = Board::from_fen(fens::MATE_IN_1_FEN).unwrap();
            let info = Agent::new(Color::White, depth).search(&board).unwrap();
            assert_eq!(info.best_move, Some((Square::B6, Square::B8)));
            assert_eq!(info.score, CHECKMATE_SCORE);
        }
    }

    #[test]
    /// Test that a black agent scores its own mating move as a win.
    fn black_finds_fools_mate() {
        let board =
            Board::from_fen("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq g3 0 2")
                .unwrap();
        let info = Agent::new(Color::Black, 1).search(&board).unwrap();
        assert_eq!(info.best_move, Some((Square::D8, Square::H4)));
        assert_eq!(info.score, CHECKMATE_SCORE);
    }

    #[test]
    fn capture_hanging_queen() {
        let info = agreement_helper(fens::HANGING_QUEEN_FEN, 2);
        assert_eq!(info.best_move, Some((Square::C3, Square::D5)));
    }

    #[test]
    /// Test that a finished game yields no move, and is scored as finished even with no depth
    /// left.
    fn finished_game() {
        let mated =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        for depth in [0, 2] {
            let info = Agent::new(Color::White, depth).search(&mated).unwrap();
            assert_eq!(info.best_move, None);
            assert_eq!(info.score, -CHECKMATE_SCORE);
            assert_eq!(info.nodes, 1);
        }

        let stalemate = Board::from_fen(fens::STALEMATE_FEN).unwrap();
        let info = Agent::new(Color::Black, 3).search(&stalemate).unwrap();
        assert_eq!(info.best_move, None);
        assert_eq!(info.score, STALEMATE_SCORE);
    }

    #[test]
    fn depth_zero_is_static_evaluation() {
        let board = Board::from_fen(fens::KIWIPETE_FEN).unwrap();
        let info = Agent::new(Color::White, 0).search(&board).unwrap();
        assert_eq!(info.best_move, None);
        assert_eq!(info.score, evaluate(&board, Color::White));
    }

    #[test]
    fn pruning_agrees_with_exhaustive_search() {
        agreement_helper(fens::BOARD_START_FEN, 2);
        agreement_helper(fens::MATE_IN_1_FEN, 2);
        agreement_helper(fens::WHITE_READY_TO_PROMOTE_FEN, 2);
        agreement_helper("4k3/8/8/8/8/8/4P3/4K3 b - - 0 1", 3);
    }

    #[test]
    fn deterministic() {
        let board = Board::from_fen(fens::FRIED_LIVER_FEN).unwrap();
        let agent = Agent::new(Color::White, 2);
        let first = agent.search(&board).unwrap();
        for _ in 0..3 {
            let again = agent.search(&board).unwrap();
            assert_eq!(again.best_move, first.best_move);
            assert_eq!(again.score, first.score);
            assert_eq!(again.nodes, first.nodes);
        }
    }

    #[test]
    fn search_leaves_board_untouched() {
        let board = Board::from_fen(fens::KIWIPETE_FEN).unwrap();
        let copy = board.clone();
        let _ = Agent::new(Color::White, 2).get_best_move(&board);
        assert_eq!(board, copy);
    }

    #[test]
    /// Test that the agent promotes when it can, and that the search treats the new piece as a
    /// queen.
    fn promotes_pawn() {
        let board = Board::from_fen(fens::WHITE_READY_TO_PROMOTE_FEN).unwrap();
        let info = Agent::new(Color::White, 1).search(&board).unwrap();
        assert_eq!(info.best_move, Some((Square::F7, Square::F8)));
    }
}
