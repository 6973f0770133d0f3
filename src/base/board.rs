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

//! The board: the position, whose turn it is, and the history of the game.

use super::{Color, Error, MoveRecord, Piece, PieceKind, Square};

use nohash_hasher::IntMap;
use std::fmt::{Display, Formatter};
use tracing::{debug, trace};

#[derive(Clone, Debug, PartialEq, Eq)]
/// A representation of a game in progress.
///
/// The board is the single source of truth for a game. Pieces answer whether a move fits their
/// pattern; the board layers turn order and king safety on top of that, executes moves, and keeps
/// the history needed for undo and en passant.
///
/// Cloning a board produces a fully independent copy, which is how the search explores
/// hypothetical lines.
pub struct Board {
    /// The occupied squares. Empty squares have no entry.
    squares: IntMap<Square, Piece>,
    /// The color of the player to move.
    current_turn: Color,
    /// Every move made on this board, oldest first.
    history: Vec<MoveRecord>,
    /// Cached location of each side's king, indexed by color.
    /// `None` if that side does not have exactly one king.
    kings: [Option<Square>; 2],
}

/// The order of pieces on each back rank, from the A file to the H file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

impl Board {
    #[must_use]
    /// Create a board set up in the standard starting position, with White to move.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for color in Color::ALL {
            for (col, kind) in (0..8).zip(BACK_RANK) {
                if let Some(sq) = Square::new(color.back_row(), col) {
                    board.squares.insert(sq, Piece::new(kind, color, sq));
                }
                if let Some(sq) = Square::new(color.pawn_start_row(), col) {
                    board.squares.insert(sq, Piece::new(PieceKind::Pawn, color, sq));
                }
            }
        }
        board.refresh_status();
        board
    }

    #[must_use]
    /// Create a board with no pieces on it, White to move, and no history.
    pub fn empty() -> Board {
        Board {
            squares: IntMap::default(),
            current_turn: Color::White,
            history: Vec::new(),
            kings: [None; 2],
        }
    }

    /// Create a board from a position in Forsyth-Edwards Notation.
    ///
    /// The castling field decides whether kings and rooks on their home squares count as unmoved.
    /// The en passant field is turned into a synthetic history entry for the double step which
    /// allowed it, so the pawn rules can see it. Move clocks are accepted but ignored.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the FEN is malformed, or if either side does not have exactly one king.
    pub fn from_fen(fen: &str) -> Result<Board, Error> {
        let mut board = Board::empty();
        let mut fields = fen.split_whitespace();

        let placement = fields
            .next()
            .ok_or(Error::Fen("missing piece placement"))?;
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(Error::Fen("piece placement must have 8 ranks"));
        }
        for (row, rank) in (0u8..).zip(ranks) {
            let mut col = 0u8;
            for chr in rank.chars() {
                if let Some(blanks) = chr.to_digit(10) {
                    col += u8::try_from(blanks)
                        .ok()
                        .filter(|b| (1..=8).contains(b))
                        .ok_or(Error::Fen("expected number of blanks"))?;
                    if col > 8 {
                        return Err(Error::Fen("rank has too many squares"));
                    }
                    continue;
                }

                let kind = PieceKind::try_from(chr)?;
                let color = if chr.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let sq = Square::new(row, col).ok_or(Error::Fen("rank has too many squares"))?;
                let mut piece = Piece::new(kind, color, sq);
                // castling rights are applied afterwards; assume everything else is settled
                piece.set_moved(match kind {
                    PieceKind::Pawn => row != color.pawn_start_row(),
                    PieceKind::King | PieceKind::Rook => true,
                    _ => false,
                });
                board.squares.insert(sq, piece);
                col += 1;
            }
            if col != 8 {
                return Err(Error::Fen("rank does not have 8 squares"));
            }
        }

        board.current_turn = match fields.next() {
            Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(_) => return Err(Error::Fen("unrecognized player to move")),
            None => return Err(Error::Fen("missing player to move")),
        };

        let castling = fields.next().unwrap_or("-");
        if castling != "-" {
            for chr in castling.chars() {
                let (color, rook_col) = match chr {
                    'K' => (Color::White, 7),
                    'Q' => (Color::White, 0),
                    'k' => (Color::Black, 7),
                    'q' => (Color::Black, 0),
                    _ => return Err(Error::Fen("unrecognized castle rights character")),
                };
                board.grant_castle_right(color, rook_col)?;
            }
        }

        let en_passant = fields.next().unwrap_or("-");
        if en_passant != "-" {
            let target = Square::from_algebraic(en_passant)?;
            board.synthesize_double_step(target)?;
        }

        // halfmove and fullmove clocks are not tracked

        board.refresh_status();
        if board.kings.iter().any(Option::is_none) {
            return Err(Error::Fen("each side must have exactly one king"));
        }
        Ok(board)
    }

    /// Mark the king of `color` and its rook in column `rook_col` as unmoved.
    fn grant_castle_right(&mut self, color: Color, rook_col: u8) -> Result<(), Error> {
        let row = color.back_row();
        let squares = Square::new(row, 4).zip(Square::new(row, rook_col));
        let Some((king_sq, rook_sq)) = squares else {
            return Err(Error::Fen("castle rights on a missing square"));
        };

        for (sq, kind) in [(king_sq, PieceKind::King), (rook_sq, PieceKind::Rook)] {
            match self.squares.get_mut(&sq) {
                Some(p) if p.kind == kind && p.color == color => p.set_moved(false),
                _ => return Err(Error::Fen("castle rights without king and rook at home")),
            }
        }
        Ok(())
    }

    /// Record the double step which makes `target` capturable en passant as the last move.
    fn synthesize_double_step(&mut self, target: Square) -> Result<(), Error> {
        let pusher = !self.current_turn;
        let dir = pusher.pawn_direction();
        let (Some(start), Some(end)) = (target.offset(-dir, 0), target.offset(dir, 0)) else {
            return Err(Error::Fen("en passant square on the edge of the board"));
        };
        if start.row() != pusher.pawn_start_row() {
            return Err(Error::Fen("en passant square on the wrong rank"));
        }
        match self.squares.get(&end) {
            Some(p) if p.kind == PieceKind::Pawn && p.color == pusher => {}
            _ => return Err(Error::Fen("no pawn in front of the en passant square")),
        }
        if self.squares.contains_key(&start) || self.squares.contains_key(&target) {
            return Err(Error::Fen("en passant path is not empty"));
        }

        self.history.push(MoveRecord::new(
            start,
            end,
            Piece::new(PieceKind::Pawn, pusher, start),
        ));
        Ok(())
    }

    #[must_use]
    /// Write this position in Forsyth-Edwards Notation.
    /// Move clocks are always written as `0 1`.
    pub fn to_fen(&self) -> String {
        let mut fen = String::new();
        for row in 0..8 {
            let mut blanks = 0;
            for col in 0..8 {
                match Square::new(row, col).and_then(|sq| self.piece_at(sq)) {
                    Some(p) => {
                        if blanks > 0 {
                            fen.push_str(&blanks.to_string());
                            blanks = 0;
                        }
                        fen.push(piece_char(p));
                    }
                    None => blanks += 1,
                }
            }
            if blanks > 0 {
                fen.push_str(&blanks.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.current_turn {
            Color::White => 'w',
            Color::Black => 'b',
        });

        let mut castling = String::new();
        for (color, rook_col, chr) in [
            (Color::White, 7, 'K'),
            (Color::White, 0, 'Q'),
            (Color::Black, 7, 'k'),
            (Color::Black, 0, 'q'),
        ] {
            if self.castle_pieces_ready(color, rook_col) {
                castling.push(chr);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }
        fen.push(' ');
        fen.push_str(&castling);

        fen.push(' ');
        match self.last_move().filter(|m| m.is_double_step()) {
            Some(m) => match m.start().offset(m.color().pawn_direction(), 0) {
                Some(passed) => fen.push_str(&passed.to_string()),
                None => fen.push('-'),
            },
            None => fen.push('-'),
        }

        fen.push_str(" 0 1");
        fen
    }

    /// Determine whether the king of `color` and the rook in column `rook_col` are both unmoved on
    /// their home squares.
    fn castle_pieces_ready(&self, color: Color, rook_col: u8) -> bool {
        let row = color.back_row();
        let unmoved = |col, kind| {
            Square::new(row, col)
                .and_then(|sq| self.piece_at(sq))
                .is_some_and(|p| p.kind == kind && p.color == color && !p.has_moved())
        };
        unmoved(4, PieceKind::King) && unmoved(rook_col, PieceKind::Rook)
    }

    /// Place a new, unmoved piece on `square`, replacing anything already there.
    pub fn put_piece(&mut self, square: Square, kind: PieceKind, color: Color) {
        self.squares.insert(square, Piece::new(kind, color, square));
        self.refresh_status();
    }

    /// Remove the piece on `square` from the board, returning it if there was one.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let removed = self.squares.remove(&square);
        self.refresh_status();
        removed
    }

    /// Set the player to move.
    pub fn set_turn(&mut self, color: Color) {
        self.current_turn = color;
    }

    #[inline(always)]
    #[must_use]
    /// Get the piece on `square`, if any.
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares.get(&square)
    }

    #[must_use]
    /// Get the kind and color of the piece on `square`, if any.
    pub fn piece_data(&self, square: Square) -> Option<(PieceKind, Color)> {
        self.piece_at(square).map(|p| (p.kind, p.color))
    }

    #[must_use]
    /// Get the color of the piece on `square`, if any.
    pub fn color_at(&self, square: Square) -> Option<Color> {
        self.piece_at(square).map(|p| p.color)
    }

    /// Iterate over every piece on the board, in row-major order of their squares.
    pub fn pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        Square::all().filter_map(|sq| self.piece_at(sq))
    }

    #[must_use]
    /// Get the color of the player to move.
    pub const fn current_turn(&self) -> Color {
        self.current_turn
    }

    #[must_use]
    /// Get every move made so far, oldest first.
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    #[must_use]
    /// Get the most recent move, if any.
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    #[must_use]
    /// Get the square of the king of `color`.
    /// Returns `None` if that side has no king or more than one.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color as usize]
    }

    /// Recompute the cached king locations.
    fn refresh_status(&mut self) {
        let mut kings = [None; 2];
        let mut counts = [0u8; 2];
        for piece in self.squares.values() {
            if piece.kind == PieceKind::King {
                let i = piece.color as usize;
                kings[i] = Some(piece.square());
                counts[i] += 1;
            }
        }
        for i in 0..2 {
            if counts[i] != 1 {
                kings[i] = None;
            }
        }
        self.kings = kings;
    }

    #[must_use]
    /// Determine whether moving the piece on `start` to `end` is legal.
    ///
    /// A move is legal when there is a piece on `start` belonging to the player to move, the piece
    /// accepts `end` under its own rules, and making the move does not leave the mover's king in
    /// check.
    pub fn is_valid_move(&self, start: Square, end: Square) -> bool {
        match self.piece_at(start) {
            Some(piece) if piece.color == self.current_turn => self.is_legal_for(piece, end),
            Some(_) => {
                trace!(%start, %end, "rejected move: out of turn");
                false
            }
            None => false,
        }
    }

    /// Determine whether `piece` may legally move to `end`, regardless of whose turn it is.
    fn is_legal_for(&self, piece: &Piece, end: Square) -> bool {
        if !piece.is_valid_move(self, end) {
            trace!(start = %piece.square(), %end, kind = piece.kind.name(), "rejected move: pattern");
            return false;
        }

        let safe = !self.trial(piece, end).is_check(piece.color);
        if !safe {
            trace!(start = %piece.square(), %end, "rejected move: king left in check");
        }
        safe
    }

    /// Make a copy of this position with `piece` moved to `end`, capturing whatever it lands on
    /// (including en passant). The copy has no history.
    fn trial(&self, piece: &Piece, end: Square) -> Board {
        let mut trial = Board {
            squares: self.squares.clone(),
            current_turn: self.current_turn,
            history: Vec::new(),
            kings: self.kings,
        };
        let start = piece.square();
        if let Some(victim) = self.en_passant_victim(piece, end) {
            trial.squares.remove(&victim);
        }
        let mut moved = *piece;
        moved.relocate(end);
        trial.squares.remove(&start);
        trial.squares.insert(end, moved);
        if piece.kind == PieceKind::King {
            trial.kings[piece.color as usize] = Some(end);
        }
        trial
    }

    /// Get the square of the pawn which `piece` would capture en passant by moving to `end`.
    fn en_passant_victim(&self, piece: &Piece, end: Square) -> Option<Square> {
        let start = piece.square();
        if piece.kind == PieceKind::Pawn
            && start.col() != end.col()
            && !self.squares.contains_key(&end)
        {
            Square::new(start.row(), end.col())
        } else {
            None
        }
    }

    #[must_use]
    /// Get every legal destination for the piece on `square`, in row-major order.
    /// Returns an empty list if the square is empty or holds a piece of the player not to move.
    pub fn get_valid_moves(&self, square: Square) -> Vec<Square> {
        match self.piece_at(square) {
            Some(p) if p.color == self.current_turn => Square::all()
                .filter(|&end| self.is_legal_for(p, end))
                .collect(),
            _ => Vec::new(),
        }
    }

    #[must_use]
    /// Get every legal move for the player to move.
    /// Moves are ordered by start square, then by end square, both in row-major order.
    pub fn all_legal_moves(&self) -> Vec<(Square, Square)> {
        Square::all()
            .flat_map(|start| {
                self.get_valid_moves(start)
                    .into_iter()
                    .map(move |end| (start, end))
            })
            .collect()
    }

    /// Determine whether any piece of `color` has a legal move, regardless of whose turn it is.
    fn has_legal_move(&self, color: Color) -> bool {
        self.pieces()
            .filter(|p| p.color == color)
            .any(|p| Square::all().any(|end| self.is_legal_for(p, end)))
    }

    /// Execute a move which has already been validated.
    ///
    /// Handles en passant captures and moves the rook along with a castling king. Returns `true`
    /// if the moved piece is a pawn which has reached its last row; the caller must then call
    /// [`Board::promote_pawn`]. If `start` is empty, nothing happens and `false` is returned.
    pub fn move_piece(&mut self, start: Square, end: Square) -> bool {
        let Some(&piece) = self.piece_at(start) else {
            return false;
        };

        if let Some(victim) = self.en_passant_victim(&piece, end) {
            self.squares.remove(&victim);
        }

        self.history.push(MoveRecord::new(start, end, piece));

        let mut moved = piece;
        moved.relocate(end);
        self.squares.remove(&start);
        self.squares.insert(end, moved);

        let needs_promotion = moved.can_promote();

        if piece.kind == PieceKind::King && start.col().abs_diff(end.col()) == 2 {
            if let Some((rook_from, rook_to)) = castle_rook_squares(start, end) {
                if let Some(mut rook) = self.squares.remove(&rook_from) {
                    rook.relocate(rook_to);
                    self.squares.insert(rook_to, rook);
                }
            }
        }

        self.refresh_status();
        self.current_turn = !self.current_turn;

        debug!(
            %start,
            %end,
            kind = piece.kind.name(),
            color = %piece.color,
            needs_promotion,
            "move"
        );
        needs_promotion
    }

    /// Replace the pawn on `square` with a piece of kind `kind`, keeping its color.
    /// A pawn or king requested as the new kind becomes a queen.
    /// Does nothing if there is no pawn on `square`.
    pub fn promote_pawn(&mut self, square: Square, kind: PieceKind) {
        let Some(pawn) = self.squares.get_mut(&square) else {
            return;
        };
        if pawn.kind != PieceKind::Pawn {
            return;
        }
        pawn.kind = kind.promotion_target();
        pawn.set_moved(true);
        debug!(%square, kind = pawn.kind.name(), "promote");
        self.refresh_status();
    }

    /// Undo the most recent move. Does nothing if no moves have been made.
    ///
    /// The mover is restored exactly as it was before the move, which also undoes a promotion. A
    /// castling rook is moved back and marked unmoved. Captured pieces are not restored.
    pub fn undo_move(&mut self) {
        let Some(record) = self.history.pop() else {
            return;
        };

        self.squares.remove(&record.end());
        self.squares.insert(record.start(), *record.piece());

        let rook_squares = castle_rook_squares(record.start(), record.end());
        if let Some((rook_home, rook_castled)) = rook_squares.filter(|_| record.is_castle()) {
            if let Some(mut rook) = self.squares.remove(&rook_castled) {
                rook.relocate(rook_home);
                rook.set_moved(false);
                self.squares.insert(rook_home, rook);
            }
        }

        self.refresh_status();
        self.current_turn = record.color();
        debug!(start = %record.start(), end = %record.end(), "undo");
    }

    #[must_use]
    /// Determine whether the king of `color` is attacked by any enemy piece.
    ///
    /// The board must contain exactly one king of `color`.
    pub fn is_check(&self, color: Color) -> bool {
        let king_sq = self.king_square(color);
        debug_assert!(
            king_sq.is_some(),
            "check query for {color}, which does not have exactly one king"
        );
        let Some(king_sq) = king_sq else {
            return false;
        };
        self.is_square_under_attack(king_sq, color)
    }

    #[must_use]
    /// Determine whether any piece not of `color` attacks `square`.
    ///
    /// This is a raw attack scan: it does not check whether the attacking move would be legal.
    pub fn is_square_under_attack(&self, square: Square, color: Color) -> bool {
        self.squares
            .values()
            .any(|p| p.color != color && p.attacks(self, square))
    }

    #[must_use]
    /// Determine whether `color` is checkmated: in check with no legal move.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_check(color) && !self.has_legal_move(color)
    }

    #[must_use]
    /// Determine whether the player to move is stalemated: not in check, but with no legal move.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check(self.current_turn) && !self.has_legal_move(self.current_turn)
    }

    #[must_use]
    /// Determine whether only the two kings are left on the board.
    pub fn is_insufficient_material(&self) -> bool {
        self.squares.values().all(|p| p.kind == PieceKind::King)
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Display for Board {
    /// Display this board in a console-ready format: 8 lines, with the 8th rank on top. White
    /// pieces are represented with capital letters, while black pieces have lowercase.
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                match Square::new(row, col).and_then(|sq| self.piece_at(sq)) {
                    Some(p) => write!(f, "{}", piece_char(p))?,
                    None => write!(f, ".")?,
                }
                if col < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Get the FEN character for a piece.
fn piece_char(piece: &Piece) -> char {
    match piece.color {
        Color::White => piece.kind.code(),
        Color::Black => piece.kind.code().to_ascii_lowercase(),
    }
}

/// Get the home square and the castled square of the rook, for a king castling from `king_start`
/// to `king_end`.
fn castle_rook_squares(king_start: Square, king_end: Square) -> Option<(Square, Square)> {
    let row = king_start.row();
    let (home_col, castled_col) = if king_end.col() > king_start.col() {
        (7, 5)
    } else {
        (0, 3)
    };
    Square::new(row, home_col).zip(Square::new(row, castled_col))
}
