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

//! Pieces and the geometric rules for moving them.
//!
//! Each piece answers a single question: "could I move to this square, ignoring the safety of my
//! own king?" Everything beyond that (whose turn it is, and whether a move would expose the king)
//! is layered on top by the [`Board`].

use super::{Board, Color, Error, Square};

use std::fmt::{Display, Formatter};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
/// The kind of a piece.
pub enum PieceKind {
    /// A pawn.
    Pawn = 0,
    /// A knight.
    Knight,
    /// A bishop.
    Bishop,
    /// A rook.
    Rook,
    /// A queen.
    Queen,
    /// A king.
    King,
}

impl PieceKind {
    /// Total number of piece kinds.
    pub const NUM: usize = 6;

    /// Every piece kind, in order of increasing index.
    pub const ALL: [PieceKind; PieceKind::NUM] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// The kinds that a pawn may promote to.
    pub const PROMOTE_KINDS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[must_use]
    /// Get the FEN code of this kind as an uppercase character.
    pub const fn code(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    #[must_use]
    /// Given a FEN character, convert it to a piece kind. Must be uppercase.
    pub const fn from_code(c: char) -> Option<PieceKind> {
        match c {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    #[must_use]
    /// Get the lowercase English name of this kind.
    pub const fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    #[must_use]
    /// Interpret a promotion choice.
    /// Accepts full names (`"knight"`) or codes (`"n"`) in either case.
    /// Anything which is not a legal promotion kind becomes a queen.
    pub fn promotion_from_name(name: &str) -> PieceKind {
        let name = name.trim().to_ascii_lowercase();
        match name.as_str() {
            "rook" | "r" => PieceKind::Rook,
            "bishop" | "b" => PieceKind::Bishop,
            "knight" | "n" => PieceKind::Knight,
            _ => PieceKind::Queen,
        }
    }

    #[must_use]
    /// Get the kind a pawn would actually become when asked to promote to `self`.
    /// Pawns and kings are not promotion targets, so they fall back to a queen.
    pub const fn promotion_target(self) -> PieceKind {
        match self {
            PieceKind::Pawn | PieceKind::King => PieceKind::Queen,
            kind => kind,
        }
    }
}

impl Display for PieceKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl TryFrom<char> for PieceKind {
    type Error = Error;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        PieceKind::from_code(c.to_ascii_uppercase()).ok_or(Error::BadPiece(c))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// A piece standing on the board.
///
/// A piece is owned by the board that holds it.
/// Moving it updates its square and marks it as moved, but it keeps its identity.
/// It never refers back to the board; every rules query takes the board as a parameter.
pub struct Piece {
    /// The kind of this piece.
    pub kind: PieceKind,
    /// The color of the player who owns this piece.
    pub color: Color,
    /// The square this piece stands on.
    square: Square,
    /// Whether this piece has moved at least once.
    /// Kings and rooks use this to gate castling.
    has_moved: bool,
}

impl Piece {
    #[must_use]
    /// Construct a new piece which has not moved yet.
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Piece {
        Piece {
            kind,
            color,
            square,
            has_moved: false,
        }
    }

    #[must_use]
    /// Get the square this piece currently stands on.
    pub const fn square(&self) -> Square {
        self.square
    }

    #[must_use]
    /// Determine whether this piece has moved before.
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Move this piece to `square` and mark it as moved.
    pub(crate) fn relocate(&mut self, square: Square) {
        self.square = square;
        self.has_moved = true;
    }

    /// Overwrite the moved-flag of this piece.
    pub(crate) fn set_moved(&mut self, has_moved: bool) {
        self.has_moved = has_moved;
    }

    #[must_use]
    /// Determine whether this piece is a pawn standing on its promotion row.
    pub fn can_promote(&self) -> bool {
        self.kind == PieceKind::Pawn && self.square.row() == self.color.promote_row()
    }

    #[must_use]
    /// Determine whether this piece could move to `target` on `board`.
    ///
    /// This only checks the movement pattern of the piece, blocking pieces, and whether the
    /// target may be captured or entered. It does not check whose turn it is, nor whether the
    /// move would leave this piece's own king in check; the board handles both.
    pub fn is_valid_move(&self, board: &Board, target: Square) -> bool {
        if target == self.square {
            return false;
        }
        if board.piece_at(target).is_some_and(|p| p.color == self.color) {
            return false;
        }

        match self.kind {
            PieceKind::Pawn => self.pawn_move(board, target),
            PieceKind::Knight => knight_jump(self.square, target),
            PieceKind::Bishop => slides_diagonally(board, self.square, target),
            PieceKind::Rook => slides_straight(board, self.square, target),
            PieceKind::Queen => {
                slides_straight(board, self.square, target)
                    || slides_diagonally(board, self.square, target)
            }
            PieceKind::King => self.king_move(board, target),
        }
    }

    #[must_use]
    /// Determine whether this piece attacks `target`, regardless of what stands there.
    ///
    /// This is the raw attack pattern: pawns only attack diagonally forward, and kings attack
    /// every neighboring square without regard to their own safety.
    /// It never consults any legality rule, so it is safe to call from inside one.
    pub fn attacks(&self, board: &Board, target: Square) -> bool {
        if target == self.square {
            return false;
        }
        let (d_row, d_col) = self.square.delta(target);
        match self.kind {
            PieceKind::Pawn => d_row == self.color.pawn_direction() && d_col.abs() == 1,
            PieceKind::Knight => knight_jump(self.square, target),
            PieceKind::Bishop => slides_diagonally(board, self.square, target),
            PieceKind::Rook => slides_straight(board, self.square, target),
            PieceKind::Queen => {
                slides_straight(board, self.square, target)
                    || slides_diagonally(board, self.square, target)
            }
            PieceKind::King => d_row.abs() <= 1 && d_col.abs() <= 1,
        }
    }

    /// Pawn movement: pushes, double pushes from the start row, captures, and en passant.
    fn pawn_move(&self, board: &Board, target: Square) -> bool {
        let dir = self.color.pawn_direction();
        let (d_row, d_col) = self.square.delta(target);
        let occupant = board.piece_at(target);

        if d_col == 0 {
            if occupant.is_some() {
                return false;
            }
            if d_row == dir {
                return true;
            }
            // double push: the square in between must be empty too
            return d_row == 2 * dir
                && self.square.row() == self.color.pawn_start_row()
                && self
                    .square
                    .offset(dir, 0)
                    .is_some_and(|mid| board.piece_at(mid).is_none());
        }

        if d_col.abs() != 1 || d_row != dir {
            return false;
        }

        match occupant {
            Some(victim) => victim.color != self.color,
            None => self.can_capture_en_passant(board, target),
        }
    }

    /// Determine whether a diagonal step onto the empty square `target` is an en passant capture.
    /// Only the most recent move of the game can make this possible.
    fn can_capture_en_passant(&self, board: &Board, target: Square) -> bool {
        board.last_move().is_some_and(|last| {
            let pusher = last.piece();
            pusher.kind == PieceKind::Pawn
                && pusher.color != self.color
                && last.start().row().abs_diff(last.end().row()) == 2
                && last.end().row() == self.square.row()
                && last.end().col() == target.col()
        })
    }

    /// King movement: a single step onto an unattacked square, or a castle.
    fn king_move(&self, board: &Board, target: Square) -> bool {
        let (d_row, d_col) = self.square.delta(target);
        if d_row.abs() <= 1 && d_col.abs() <= 1 {
            return !board.is_square_under_attack(target, self.color);
        }

        d_row == 0 && d_col.abs() == 2 && self.can_castle(board, target)
    }

    /// Determine whether this king may castle toward `target`, which is two columns away on the
    /// same row.
    fn can_castle(&self, board: &Board, target: Square) -> bool {
        let row = self.color.back_row();
        if self.has_moved || self.square.row() != row || self.square.col() != 4 {
            return false;
        }

        let step: i8 = if target.col() > self.square.col() { 1 } else { -1 };
        let rook_col = if step > 0 { 7 } else { 0 };
        let Some(rook_sq) = Square::new(row, rook_col) else {
            return false;
        };
        let rook_ready = board.piece_at(rook_sq).is_some_and(|rook| {
            rook.kind == PieceKind::Rook && rook.color == self.color && !rook.has_moved
        });
        if !rook_ready {
            return false;
        }

        // everything between the king and the rook must be empty
        let mut sq = self.square.offset(0, step);
        while let Some(s) = sq {
            if s == rook_sq {
                break;
            }
            if board.piece_at(s).is_some() {
                return false;
            }
            sq = s.offset(0, step);
        }

        if board.is_check(self.color) {
            return false;
        }

        // the king may not start on, pass through, or land on an attacked square
        let mut sq = Some(self.square);
        while let Some(s) = sq {
            if board.is_square_under_attack(s, self.color) {
                return false;
            }
            if s == target {
                break;
            }
            sq = s.offset(0, step);
        }

        true
    }
}

/// Determine whether `from` and `to` are a knight's jump apart.
fn knight_jump(from: Square, to: Square) -> bool {
    let (d_row, d_col) = from.delta(to);
    matches!((d_row.abs(), d_col.abs()), (2, 1) | (1, 2))
}

/// Determine whether a diagonal slide from `from` to `to` is unobstructed.
fn slides_diagonally(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = from.delta(to);
    d_row != 0 && d_row.abs() == d_col.abs() && path_is_clear(board, from, to)
}

/// Determine whether a straight slide along a row or column from `from` to `to` is unobstructed.
fn slides_straight(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = from.delta(to);
    (d_row == 0) != (d_col == 0) && path_is_clear(board, from, to)
}

/// Determine whether every square strictly between `from` and `to` is empty.
/// The two squares must lie on a common row, column, or diagonal.
fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    let (d_row, d_col) = from.delta(to);
    let (step_row, step_col) = (d_row.signum(), d_col.signum());
    let mut sq = from.offset(step_row, step_col);
    while let Some(s) = sq {
        if s == to {
            return true;
        }
        if board.piece_at(s).is_some() {
            return false;
        }
        sq = s.offset(step_row, step_col);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fens;

    /// Get the destinations which the piece on `from` accepts geometrically, ignoring turn order
    /// and king safety.
    fn geometric_moves(board: &Board, from: Square) -> Vec<Square> {
        let piece = board.piece_at(from).unwrap();
        Square::all()
            .filter(|&t| piece.is_valid_move(board, t))
            .collect()
    }

    #[test]
    /// Test that no piece in a busy position ever accepts a square held by its own side.
    fn never_onto_own_piece() {
        for fen in [fens::BOARD_START_FEN, fens::FRIED_LIVER_FEN, fens::KIWIPETE_FEN] {
            let board = Board::from_fen(fen).unwrap();
            for piece in board.pieces() {
                for target in Square::all() {
                    if board.color_at(target) == Some(piece.color) {
                        assert!(!piece.is_valid_move(&board, target), "{fen}: {target}");
                    }
                }
            }
        }
    }

    #[test]
    fn pawn_pushes_from_start() {
        let board = Board::new();
        assert_eq!(
            geometric_moves(&board, Square::E2),
            vec![Square::E4, Square::E3]
        );
        assert_eq!(
            geometric_moves(&board, Square::D7),
            vec![Square::D6, Square::D5]
        );
    }

    #[test]
    /// Test that a pawn cannot push through or onto a blocker, and cannot double-push once it has
    /// left its start row.
    fn pawn_blocked() {
        let board = Board::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
        assert!(geometric_moves(&board, Square::E2).is_empty());

        let board = Board::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
        assert_eq!(geometric_moves(&board, Square::E2), vec![Square::E3]);

        let board = Board::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
        assert_eq!(geometric_moves(&board, Square::E3), vec![Square::E4]);
    }

    #[test]
    fn pawn_captures_diagonally() {
        let board = Board::from_fen("4k3/8/8/3p1b2/4P3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            geometric_moves(&board, Square::E4),
            vec![Square::D5, Square::E5, Square::F5]
        );
    }

    #[test]
    /// Test that en passant is only offered right after the enemy double push.
    fn en_passant_window() {
        let board = Board::from_fen(fens::EN_PASSANT_READY_FEN).unwrap();
        let pawn = board.piece_at(Square::E5).unwrap();
        assert!(pawn.is_valid_move(&board, Square::F6));
        assert!(!pawn.is_valid_move(&board, Square::D6));

        // same placement, but the double push was not the last move
        let board = Board::from_fen("rnbqkb1r/ppppp1pp/7n/4Pp2/8/8/PPPP1PPP/RNBQKBNR w KQkq - 0 3")
            .unwrap();
        let pawn = board.piece_at(Square::E5).unwrap();
        assert!(!pawn.is_valid_move(&board, Square::F6));
    }

    #[test]
    fn knight_jumps_over_pieces() {
        let board = Board::new();
        assert_eq!(
            geometric_moves(&board, Square::G1),
            vec![Square::F3, Square::H3]
        );
    }

    #[test]
    fn sliders_stop_at_blockers() {
        let board = Board::from_fen("4k3/8/8/8/1p6/8/3B4/R3K3 w - - 0 1").unwrap();
        // rook: up the A file and along the first rank until the king
        assert_eq!(
            geometric_moves(&board, Square::A1),
            vec![
                Square::A8,
                Square::A7,
                Square::A6,
                Square::A5,
                Square::A4,
                Square::A3,
                Square::A2,
                Square::B1,
                Square::C1,
                Square::D1
            ]
        );
        // bishop: capture on b4 but not beyond it
        let bishop = geometric_moves(&board, Square::D2);
        assert!(bishop.contains(&Square::B4));
        assert!(!bishop.contains(&Square::A5));
        assert!(bishop.contains(&Square::H6));
        assert!(bishop.contains(&Square::C1));
        assert!(!bishop.contains(&Square::D3));
    }

    #[test]
    /// Test that a queen moves exactly like a rook and a bishop combined.
    fn queen_is_rook_plus_bishop() {
        let board = Board::from_fen("4k3/8/2p5/8/4Q3/8/8/4K3 w - - 0 1").unwrap();
        let queen_moves = geometric_moves(&board, Square::E4);
        let queen = *board.piece_at(Square::E4).unwrap();
        let as_rook = Piece {
            kind: PieceKind::Rook,
            ..queen
        };
        let as_bishop = Piece {
            kind: PieceKind::Bishop,
            ..queen
        };
        for target in Square::all() {
            assert_eq!(
                queen_moves.contains(&target),
                as_rook.is_valid_move(&board, target) || as_bishop.is_valid_move(&board, target)
            );
        }
        assert!(queen_moves.contains(&Square::C6));
        assert!(!queen_moves.contains(&Square::B7));
    }

    #[test]
    /// Test that the king refuses to step onto attacked squares.
    fn king_avoids_attacked_squares() {
        let board = Board::from_fen("4k3/8/8/8/8/8/r7/4K3 w - - 0 1").unwrap();
        assert_eq!(
            geometric_moves(&board, Square::E1),
            vec![Square::D1, Square::F1]
        );
    }

    #[test]
    fn castling_requirements() {
        let board = Board::from_fen(fens::WHITE_KINGSIDE_CASTLE_READY_FEN).unwrap();
        let king = board.piece_at(Square::E1).unwrap();
        assert!(king.is_valid_move(&board, Square::G1));
        assert!(!king.is_valid_move(&board, Square::C1));

        // the rook on h1 has moved (no K right)
        let board =
            Board::from_fen("r1bqk1nr/pppp1ppp/2n5/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w Qkq - 4 4")
                .unwrap();
        let king = board.piece_at(Square::E1).unwrap();
        assert!(!king.is_valid_move(&board, Square::G1));
    }

    #[test]
    /// Test that a king may not castle out of, through, or into check.
    fn castling_through_attack() {
        // f1 is covered by the bishop on c4
        let board = Board::from_fen("4k3/8/8/8/2b5/8/8/4K2R w K - 0 1").unwrap();
        let king = board.piece_at(Square::E1).unwrap();
        assert!(!king.is_valid_move(&board, Square::G1));

        // g1 is covered by the rook on g8
        let board = Board::from_fen("4k1r1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let king = board.piece_at(Square::E1).unwrap();
        assert!(!king.is_valid_move(&board, Square::G1));

        // the king is in check from e8
        let board = Board::from_fen("4r1k1/8/8/8/8/8/8/4K2R w K - 0 1").unwrap();
        let king = board.piece_at(Square::E1).unwrap();
        assert!(!king.is_valid_move(&board, Square::G1));

        // only b1 is attacked, which the king does not cross on the queenside
        let board = Board::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
        let king = board.piece_at(Square::E1).unwrap();
        assert!(king.is_valid_move(&board, Square::C1));
    }

    #[test]
    fn promotion_rows() {
        let white = Piece::new(PieceKind::Pawn, Color::White, Square::F8);
        let black = Piece::new(PieceKind::Pawn, Color::Black, Square::F1);
        let early = Piece::new(PieceKind::Pawn, Color::White, Square::F7);
        let rook = Piece::new(PieceKind::Rook, Color::White, Square::F8);
        assert!(white.can_promote());
        assert!(black.can_promote());
        assert!(!early.can_promote());
        assert!(!rook.can_promote());
    }

    #[test]
    fn promotion_names_default_to_queen() {
        assert_eq!(PieceKind::promotion_from_name("knight"), PieceKind::Knight);
        assert_eq!(PieceKind::promotion_from_name("R"), PieceKind::Rook);
        assert_eq!(PieceKind::promotion_from_name("bishop"), PieceKind::Bishop);
        assert_eq!(PieceKind::promotion_from_name("queen"), PieceKind::Queen);
        assert_eq!(PieceKind::promotion_from_name("dragon"), PieceKind::Queen);
        assert_eq!(PieceKind::King.promotion_target(), PieceKind::Queen);
    }
}
