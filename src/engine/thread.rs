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

//! Background searches.
//!
//! A search can take a while, so a caller with other things to do (such as keeping a clock or a
//! display up to date) can run it on its own thread.
//! The thread owns a clone of the board it was given, so the caller's board can keep changing
//! while the search runs.
//! The caller is responsible for checking that the returned move is still legal before applying
//! it, since the live board may have moved on.
//! There is no way to cancel a search once it has started.

use std::thread::{self, JoinHandle};

use crate::base::{Board, Error};

use super::search::{Agent, SearchInfo};

#[derive(Debug)]
/// A handle to a search running on another thread.
pub struct SearchHandle {
    /// The thread running the search.
    thread: JoinHandle<Option<SearchInfo>>,
    /// The position being searched, as a FEN string.
    fen: String,
}

#[must_use]
/// Start a search by `agent` on a snapshot of `board`, running on a new thread.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use rookery::base::{Board, Color};
/// use rookery::engine::{search::Agent, thread::spawn_search};
///
/// let board = Board::new();
/// let handle = spawn_search(Agent::new(Color::White, 2), &board);
/// let info = handle.join()?.expect("it is White's turn");
/// assert!(info.best_move.is_some());
/// # Ok(())
/// # }
/// ```
pub fn spawn_search(agent: Agent, board: &Board) -> SearchHandle {
    let snapshot = board.clone();
    let fen = board.to_fen();
    let thread = thread::spawn(move || agent.search(&snapshot));
    SearchHandle { thread, fen }
}

impl SearchHandle {
    #[must_use]
    /// Determine whether the search has finished, without waiting for it.
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    #[must_use]
    /// Get the FEN of the position this search was started on.
    pub fn fen(&self) -> &str {
        &self.fen
    }

    /// Wait for the search to finish and get its result.
    /// The result is `None` if it was not the agent's turn on the searched board.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the search thread panicked.
    pub fn join(self) -> Result<Option<SearchInfo>, Error> {
        self.thread.join().map_err(|_| Error::SearchPanicked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{Color, Square};

    #[test]
    /// Test that a background search gives the same answer as a search on this thread.
    fn same_as_foreground() {
        let board = Board::from_fen(crate::fens::HANGING_QUEEN_FEN).unwrap();
        let agent = Agent::new(Color::White, 2);
        let handle = spawn_search(agent, &board);
        let background = handle.join().unwrap().unwrap();
        let foreground = agent.search(&board).unwrap();
        assert_eq!(background.best_move, foreground.best_move);
        assert_eq!(background.score, foreground.score);
    }

    #[test]
    /// Test that the live board may change while a search runs on its snapshot.
    fn live_board_moves_on() {
        let mut board = Board::new();
        let handle = spawn_search(Agent::new(Color::White, 2), &board);
        assert_eq!(handle.fen(), Board::new().to_fen());
        board.move_piece(Square::E2, Square::E4);
        let info = handle.join().unwrap().unwrap();
        // the result is for the start position, whatever happened to the live board
        let (start, end) = info.best_move.unwrap();
        assert!(Board::new().is_valid_move(start, end));
    }

    #[test]
    fn not_agents_turn() {
        let handle = spawn_search(Agent::new(Color::Black, 2), &Board::new());
        assert!(handle.join().unwrap().is_none());
    }
}
