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
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! The rules of chess: pieces, squares, the board, and move records.

// Many module elements are re-exported to make names more ergonomic to access.

mod board;
pub use board::Board;

mod color;
pub use color::Color;

pub mod error;
pub use error::Error;

mod moves;
pub use moves::{format_move, parse_move, MoveRecord};

mod piece;
pub use piece::{Piece, PieceKind};

mod square;
pub use square::Square;
