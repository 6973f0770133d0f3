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

//! Squares on the board and their algebraic names.

use super::Error;

use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// A square on the board, identified by its row and column.
///
/// Row 0 is Black's back rank (rank 8) and row 7 is White's back rank (rank 1).
/// Column 0 is the A file.
/// Internally the square is stored as `row * 8 + col`, so the natural ordering of squares is
/// row-major, which is also the order in which the board is scanned everywhere.
pub struct Square(u8);

impl nohash_hasher::IsEnabled for Square {}

impl Square {
    #[must_use]
    #[inline]
    /// Create a square from a row and a column.
    /// Returns `None` if either coordinate is outside of `[0, 8)`.
    pub const fn new(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    #[must_use]
    #[inline]
    /// Get the row of this square. Row 0 is rank 8.
    pub const fn row(self) -> u8 {
        self.0 >> 3
    }

    #[must_use]
    #[inline]
    /// Get the column of this square. Column 0 is the A file.
    pub const fn col(self) -> u8 {
        self.0 & 7
    }

    #[must_use]
    #[inline]
    /// Get the row-major index of this square, from 0 to 63.
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[must_use]
    #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
    /// Get the square which is `d_row` rows and `d_col` columns away from this one, if it is on
    /// the board.
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Square> {
        let row = self.row() as i8 + d_row;
        let col = self.col() as i8 + d_col;
        if row < 0 || col < 0 {
            return None;
        }
        Square::new(row as u8, col as u8)
    }

    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    /// Get the signed `(rows, cols)` displacement needed to travel from this square to `target`.
    pub const fn delta(self, target: Square) -> (i8, i8) {
        (
            target.row() as i8 - self.row() as i8,
            target.col() as i8 - self.col() as i8,
        )
    }

    #[must_use]
    /// Get the square in the same column on the opposite side of the board.
    /// This is the rank mirror used when comparing a position against its color-swapped twin.
    pub const fn flip_row(self) -> Square {
        Square((7 - self.row()) * 8 + self.col())
    }

    /// Iterate over every square on the board in row-major order, starting with A8.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + Clone {
        (0..64).map(Square)
    }

    /// Convert an algebraic string (such as `e7`) to a square.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the string is not a lowercase file letter followed by a rank digit.
    pub fn from_algebraic(s: &str) -> Result<Square, Error> {
        let bad = || Error::BadSquare(s.to_string());
        let mut chars = s.chars();
        let (Some(file_chr), Some(rank_chr), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(bad());
        };
        let col = "abcdefgh".find(file_chr).ok_or_else(bad)?;
        let rank = rank_chr
            .to_digit(10)
            .filter(|r| (1..=8).contains(r))
            .ok_or_else(bad)?;

        let row = u8::try_from(8 - rank).map_err(|_| bad())?;
        let col = u8::try_from(col).map_err(|_| bad())?;
        Square::new(row, col).ok_or_else(bad)
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let file = char::from(b'a' + self.col());
        let rank = 8 - self.row();
        write!(f, "{file}{rank}")
    }
}

#[allow(missing_docs)]
impl Square {
    pub const A8: Square = Square(0);
    pub const B8: Square = Square(1);
    pub const C8: Square = Square(2);
    pub const D8: Square = Square(3);
    pub const E8: Square = Square(4);
    pub const F8: Square = Square(5);
    pub const G8: Square = Square(6);
    pub const H8: Square = Square(7);
    pub const A7: Square = Square(8);
    pub const B7: Square = Square(9);
    pub const C7: Square = Square(10);
    pub const D7: Square = Square(11);
    pub const E7: Square = Square(12);
    pub const F7: Square = Square(13);
    pub const G7: Square = Square(14);
    pub const H7: Square = Square(15);
    pub const A6: Square = Square(16);
    pub const B6: Square = Square(17);
    pub const C6: Square = Square(18);
    pub const D6: Square = Square(19);
    pub const E6: Square = Square(20);
    pub const F6: Square = Square(21);
    pub const G6: Square = Square(22);
    pub const H6: Square = Square(23);
    pub const A5: Square = Square(24);
    pub const B5: Square = Square(25);
    pub const C5: Square = Square(26);
    pub const D5: Square = Square(27);
    pub const E5: Square = Square(28);
    pub const F5: Square = Square(29);
    pub const G5: Square = Square(30);
    pub const H5: Square = Square(31);
    pub const A4: Square = Square(32);
    pub const B4: Square = Square(33);
    pub const C4: Square = Square(34);
    pub const D4: Square = Square(35);
    pub const E4: Square = Square(36);
    pub const F4: Square = Square(37);
    pub const G4: Square = Square(38);
    pub const H4: Square = Square(39);
    pub const A3: Square = Square(40);
    pub const B3: Square = Square(41);
    pub const C3: Square = Square(42);
    pub const D3: Square = Square(43);
    pub const E3: Square = Square(44);
    pub const F3: Square = Square(45);
    pub const G3: Square = Square(46);
    pub const H3: Square = Square(47);
    pub const A2: Square = Square(48);
    pub const B2: Square = Square(49);
    pub const C2: Square = Square(50);
    pub const D2: Square = Square(51);
    pub const E2: Square = Square(52);
    pub const F2: Square = Square(53);
    pub const G2: Square = Square(54);
    pub const H2: Square = Square(55);
    pub const A1: Square = Square(56);
    pub const B1: Square = Square(57);
    pub const C1: Square = Square(58);
    pub const D1: Square = Square(59);
    pub const E1: Square = Square(60);
    pub const F1: Square = Square(61);
    pub const G1: Square = Square(62);
    pub const H1: Square = Square(63);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// Test that named constants line up with their rows and columns.
    fn constants_match_coordinates() {
        assert_eq!(Square::A8, Square::new(0, 0).unwrap());
        assert_eq!(Square::E1, Square::new(7, 4).unwrap());
        assert_eq!(Square::H1.index(), 63);
        assert_eq!(Square::E2.row(), 6);
        assert_eq!(Square::E2.col(), 4);
    }

    #[test]
    fn out_of_bounds() {
        assert_eq!(Square::new(8, 0), None);
        assert_eq!(Square::new(0, 8), None);
        assert_eq!(Square::A8.offset(-1, 0), None);
        assert_eq!(Square::H1.offset(0, 1), None);
        assert_eq!(Square::E2.offset(-2, 0), Some(Square::E4));
    }

    #[test]
    fn algebraic_round_trip() {
        for sq in Square::all() {
            assert_eq!(Square::from_algebraic(&sq.to_string()).unwrap(), sq);
        }
        assert_eq!(Square::from_algebraic("e4").unwrap(), Square::E4);
        assert!(Square::from_algebraic("i1").is_err());
        assert!(Square::from_algebraic("a9").is_err());
        assert!(Square::from_algebraic("a0").is_err());
        assert!(Square::from_algebraic("e44").is_err());
        assert!(Square::from_algebraic("").is_err());
    }

    #[test]
    /// Test that the board scan order is row-major, from A8 to H1.
    fn scan_order() {
        let squares: Vec<Square> = Square::all().collect();
        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square::A8);
        assert_eq!(squares[1], Square::B8);
        assert_eq!(squares[8], Square::A7);
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn flip_and_delta() {
        assert_eq!(Square::E2.flip_row(), Square::E7);
        assert_eq!(Square::A8.flip_row(), Square::A1);
        assert_eq!(Square::E2.delta(Square::E4), (-2, 0));
        assert_eq!(Square::G8.delta(Square::F6), (2, -1));
    }
}
