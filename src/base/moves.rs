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

//! Move records and move strings.

use super::{Color, Error, Piece, PieceKind, Square};

use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A single entry in the history of a game.
///
/// The record keeps the moving piece exactly as it was before the move, so undoing a move can
/// restore its square, kind and moved-flag in one step.
pub struct MoveRecord {
    /// The square the piece left.
    start: Square,
    /// The square the piece arrived on.
    end: Square,
    /// A snapshot of the mover before the move was made.
    piece: Piece,
}

impl MoveRecord {
    #[must_use]
    /// Construct a new record of `piece` moving from `start` to `end`.
    pub const fn new(start: Square, end: Square, piece: Piece) -> MoveRecord {
        MoveRecord { start, end, piece }
    }

    #[must_use]
    pub const fn start(&self) -> Square {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Square {
        self.end
    }

    #[must_use]
    /// Get the snapshot of the moving piece, taken before it moved.
    pub const fn piece(&self) -> &Piece {
        &self.piece
    }

    #[must_use]
    /// Get the kind of the piece which moved.
    /// For a promotion, this is always a pawn.
    pub const fn kind(&self) -> PieceKind {
        self.piece.kind
    }

    #[must_use]
    /// Get the color of the player who made this move.
    pub const fn color(&self) -> Color {
        self.piece.color
    }

    #[must_use]
    /// Determine whether this move was a castle, i.e. a king moving two columns.
    pub fn is_castle(&self) -> bool {
        self.piece.kind == PieceKind::King && self.start.col().abs_diff(self.end.col()) == 2
    }

    #[must_use]
    /// Determine whether this move was a pawn advancing two rows.
    pub fn is_double_step(&self) -> bool {
        self.piece.kind == PieceKind::Pawn && self.start.row().abs_diff(self.end.row()) == 2
    }
}

impl Display for MoveRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.start, self.end)
    }
}

/// Parse a move string in coordinate notation, such as `e2e4` or `e7e8q`.
///
/// The optional fifth character names the promotion kind.
///
/// # Errors
///
/// Returns `Err` if the string is not two square names optionally followed by a piece letter, or if
/// the piece letter does not name a piece.
pub fn parse_move(s: &str) -> Result<(Square, Square, Option<PieceKind>), Error> {
    let s = s.trim();
    if !s.is_ascii() || !(4..=5).contains(&s.len()) {
        return Err(Error::BadMove(s.to_string()));
    }

    let start = Square::from_algebraic(&s[0..2]).map_err(|_| Error::BadMove(s.to_string()))?;
    let end = Square::from_algebraic(&s[2..4]).map_err(|_| Error::BadMove(s.to_string()))?;
    let promotion = match s[4..].chars().next() {
        Some(c) => Some(PieceKind::try_from(c)?),
        None => None,
    };

    Ok((start, end, promotion))
}

#[must_use]
/// Write a move in coordinate notation. This is the inverse of [`parse_move`].
pub fn format_move(start: Square, end: Square, promotion: Option<PieceKind>) -> String {
    match promotion {
        Some(kind) => format!("{start}{end}{}", kind.code().to_ascii_lowercase()),
        None => format!("{start}{end}"),
    }
}
