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

//! Forsyth-Edwards Notation (FEN) strings for well-known positions, used in tests and
//! demonstrations.

/// The FEN of the official starting position for any chess game.
pub const BOARD_START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// A board with a black king on H8 and white king on A1, and nothing else.
/// White to move.
pub const TWO_KINGS_BOARD_FEN: &str = "7k/8/8/8/8/8/8/K7 w - - 0 1";

/// A board where White can play exf6 as en passant.
pub const EN_PASSANT_READY_FEN: &str =
    "rnbqkb1r/ppppp1pp/7n/4Pp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";

/// A board where White is ready to castle on the kingside.
pub const WHITE_KINGSIDE_CASTLE_READY_FEN: &str =
    "r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4";

/// A board where White is ready to promote the f7-pawn.
pub const WHITE_READY_TO_PROMOTE_FEN: &str = "8/5P2/2k5/4K3/8/8/8/8 w - - 0 1";

/// A board where White has played the Fried Liver Attack and the black king has been drawn out.
pub const FRIED_LIVER_FEN: &str = "r1bq1b1r/ppp2kpp/2n5/3np3/2B5/8/PPPP1PPP/RNBQK2R w KQ - 0 7";

/// A board where White can mate in 1 with Rb8#.
pub const MATE_IN_1_FEN: &str = "3k4/R7/1R6/5K2/8/8/8/8 w - - 0 1";

/// A busy position with both castles, en passant chances and pins available.
pub const KIWIPETE_FEN: &str =
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

/// A board where Black, to move, is stalemated by a queen and king.
pub const STALEMATE_FEN: &str = "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1";

/// A board where White can win the black queen, which is hanging on d5.
pub const HANGING_QUEEN_FEN: &str = "4k3/8/8/3q4/8/2N5/8/4K3 w - - 0 1";
