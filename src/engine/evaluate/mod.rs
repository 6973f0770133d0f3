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

//! Static evaluation of positions.
//!
//! Every leaf of the search is statically evaluated, and the search compares those evaluations to
//! pick a move.
//!
//! The evaluation is "tapered": every piece contributes a midgame and an endgame value, made of
//! its material worth plus a bonus for the square it stands on.
//! The two totals are then blended according to how much material is left on the board, so that
//! incentives such as king centralization fade in as the game simplifies.

use std::{
    fmt::{Display, Formatter},
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use crate::base::{Board, Color};

pub mod material;
pub mod pst;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// A `Score` is a pair of two evaluations: one for the midgame and one for the endgame.
/// Both are measured in centipawns, from White's point of view.
pub struct Score {
    /// The midgame-only evaluation of a position.
    pub mg: i32,
    /// The endgame-only evaluation of a position.
    pub eg: i32,
}

/// The phase of a position with all of its non-pawn material still on the board.
pub const MAX_PHASE: i32 = 24;

impl Score {
    /// The score of a position where neither side is better.
    pub const ZERO: Score = Score::new(0, 0);

    #[must_use]
    /// Create a new `Score` by composing two evaluations together.
    pub const fn new(mg: i32, eg: i32) -> Score {
        Score { mg, eg }
    }

    #[must_use]
    /// Blend the midgame and endgame halves of this score.
    ///
    /// `phase` is clamped to `0..=MAX_PHASE`. A phase of `MAX_PHASE` uses only the midgame value,
    /// and a phase of 0 uses only the endgame value.
    /// Division rounds toward zero, so negating a score negates its blend.
    ///
    /// # Examples
    ///
    /// ```
    /// use rookery::engine::evaluate::{Score, MAX_PHASE};
    ///
    /// let score = Score::new(100, 40);
    /// assert_eq!(score.blend(MAX_PHASE), 100);
    /// assert_eq!(score.blend(0), 40);
    /// assert_eq!(score.blend(12), 70);
    /// assert_eq!((-score).blend(5), -score.blend(5));
    /// ```
    pub fn blend(self, phase: i32) -> i32 {
        let mg_phase = phase.clamp(0, MAX_PHASE);
        let eg_phase = MAX_PHASE - mg_phase;
        (self.mg * mg_phase + self.eg * eg_phase) / MAX_PHASE
    }
}

#[must_use]
/// Evaluate `board` from the point of view of `color`.
/// Higher values are better for `color`; 0 means the position is even.
///
/// # Examples
///
/// ```
/// use rookery::base::{Board, Color};
/// use rookery::engine::evaluate::evaluate;
///
/// let board = Board::new();
/// assert_eq!(evaluate(&board, Color::White), 0);
/// assert_eq!(evaluate(&board, Color::Black), 0);
/// ```
pub fn evaluate(board: &Board, color: Color) -> i32 {
    let score = (material::evaluate(board) + pst::evaluate(board)).blend(phase_of(board));
    match color {
        Color::White => score,
        Color::Black => -score,
    }
}

#[must_use]
/// Get the phase of the game, from 0 (only kings and pawns) to `MAX_PHASE` (all the non-pawn
/// material of the opening, or more).
pub fn phase_of(board: &Board) -> i32 {
    board
        .pieces()
        .map(|p| material::phase_increment(p.kind))
        .sum::<i32>()
        .min(MAX_PHASE)
}

impl Display for Score {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.mg, self.eg)
    }
}

impl AddAssign<Score> for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.mg += rhs.mg;
        self.eg += rhs.eg;
    }
}

impl SubAssign<Score> for Score {
    fn sub_assign(&mut self, rhs: Score) {
        self.mg -= rhs.mg;
        self.eg -= rhs.eg;
    }
}

impl Add<Score> for Score {
    type Output = Self;

    fn add(self, rhs: Score) -> Self::Output {
        Score::new(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}

impl Sub<Score> for Score {
    type Output = Self;

    fn sub(self, rhs: Score) -> Self::Output {
        Score::new(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}

impl Neg for Score {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Score::new(-self.mg, -self.eg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        base::{PieceKind, Square},
        fens,
    };

    /// Swap the colors of every piece on `board` and reflect it across the middle of the board.
    fn mirror(board: &Board) -> Board {
        let mut mirrored = Board::empty();
        for piece in board.pieces() {
            mirrored.put_piece(piece.square().flip_row(), piece.kind, !piece.color);
        }
        mirrored.set_turn(!board.current_turn());
        mirrored
    }

    #[test]
    /// Test that the evaluation of a mirrored position is the negation of the original.
    fn mirror_negates() {
        for fen in [
            fens::BOARD_START_FEN,
            fens::KIWIPETE_FEN,
            fens::FRIED_LIVER_FEN,
            fens::EN_PASSANT_READY_FEN,
            fens::WHITE_READY_TO_PROMOTE_FEN,
            fens::HANGING_QUEEN_FEN,
            fens::MATE_IN_1_FEN,
        ] {
            let board = Board::from_fen(fen).unwrap();
            let mirrored = mirror(&board);
            for color in Color::ALL {
                assert_eq!(evaluate(&mirrored, color), -evaluate(&board, color), "{fen}");
            }
        }
    }

    #[test]
    fn perspectives_are_opposite() {
        let board = Board::from_fen(fens::KIWIPETE_FEN).unwrap();
        assert_eq!(
            evaluate(&board, Color::Black),
            -evaluate(&board, Color::White)
        );
    }

    #[test]
    /// Test the evaluation of two bare kings, where only the endgame tables count.
    fn bare_kings_use_endgame_tables() {
        let board = Board::from_fen(fens::TWO_KINGS_BOARD_FEN).unwrap();
        assert_eq!(phase_of(&board), 0);
        // white king on a1 (-53) against black king on h8 (-43)
        assert_eq!(evaluate(&board, Color::White), -10);
        assert_eq!(evaluate(&board, Color::Black), 10);
    }

    #[test]
    fn phase() {
        assert_eq!(phase_of(&Board::new()), MAX_PHASE);

        let mut crowded = Board::new();
        crowded.put_piece(Square::E4, PieceKind::Queen, Color::White);
        crowded.put_piece(Square::D5, PieceKind::Queen, Color::Black);
        assert_eq!(phase_of(&crowded), MAX_PHASE);

        let board = Board::from_fen("4k3/8/8/3q4/8/2N5/8/4KR2 w - - 0 1").unwrap();
        assert_eq!(phase_of(&board), 1 + 4 + 2);
    }

    #[test]
    fn extra_material_is_better() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(evaluate(&board, Color::White) > 0);

        let board = Board::from_fen(fens::HANGING_QUEEN_FEN).unwrap();
        assert!(evaluate(&board, Color::Black) > 500);
    }
}
