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

//! Material values for each piece.
//!
//! Every piece is assigned a value in centipawns, separately for the midgame and the endgame.
//! These are the values of the PeSTO evaluation function.
//! Kings have no material value, since they can never be traded off.

use crate::base::{Board, Color, PieceKind};

use super::Score;

#[must_use]
/// Get the value of one piece by its kind.
pub const fn value(kind: PieceKind) -> Score {
    match kind {
        PieceKind::Pawn => Score::new(82, 94),
        PieceKind::Knight => Score::new(337, 281),
        PieceKind::Bishop => Score::new(365, 297),
        PieceKind::Rook => Score::new(477, 512),
        PieceKind::Queen => Score::new(1025, 936),
        PieceKind::King => Score::ZERO,
    }
}

#[must_use]
/// Get the amount that one piece of this kind contributes to the phase of the game.
pub const fn phase_increment(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::Pawn | PieceKind::King => 0,
        PieceKind::Knight | PieceKind::Bishop => 1,
        PieceKind::Rook => 2,
        PieceKind::Queen => 4,
    }
}

#[must_use]
/// Evaluate a position solely by the amount of material available.
/// The result is White's material minus Black's.
pub fn evaluate(board: &Board) -> Score {
    let mut score = Score::ZERO;
    for piece in board.pieces() {
        match piece.color {
            Color::White => score += value(piece.kind),
            Color::Black => score -= value(piece.kind),
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        assert_eq!(evaluate(&Board::new()), Score::ZERO);
    }

    #[test]
    /// Test that the material values are ordered the way every chess player expects.
    fn values_are_ordered() {
        let order = [
            PieceKind::Pawn,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Rook,
            PieceKind::Queen,
        ];
        for pair in order.windows(2) {
            assert!(value(pair[0]).mg < value(pair[1]).mg);
        }
    }

    #[test]
    fn starting_phase_is_full() {
        let total: i32 = Board::new()
            .pieces()
            .map(|p| phase_increment(p.kind))
            .sum();
        assert_eq!(total, crate::engine::evaluate::MAX_PHASE);
    }
}
