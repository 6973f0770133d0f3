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

//! Errors raised at the text boundary of the engine.
//!
//! The rules engine itself never fails: an illegal request simply returns `false`, an empty list,
//! or does nothing. Only input which arrives as text (square names, FENs, move strings and
//! configuration files) can be malformed, and that is what this error type describes. The one
//! exception is a background search whose thread dies.

use thiserror::Error;

/// Errors that can occur while reading engine input.
#[derive(Error, Debug)]
pub enum Error {
    /// A square name which is not a file letter followed by a rank digit.
    #[error("invalid square name `{0}`")]
    BadSquare(String),

    /// A move string which is not of the form `e2e4` or `e7e8q`.
    #[error("invalid move string `{0}`")]
    BadMove(String),

    /// A character which does not name any piece kind.
    #[error("unknown piece code `{0}`")]
    BadPiece(char),

    /// A string which does not name a color.
    #[error("unknown color `{0}`")]
    BadColor(String),

    /// A malformed Forsyth-Edwards Notation string.
    #[error("invalid FEN: {0}")]
    Fen(&'static str),

    /// A background search thread panicked before producing a result.
    #[error("search thread panicked")]
    SearchPanicked,

    /// The configuration file could not be read.
    #[error("could not read configuration: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration file was not valid TOML for the expected fields.
    #[error("could not parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

/// Result type alias for fallible engine input.
pub type Result<T> = std::result::Result<T, Error>;
