// Pseudo-legal move generation: occupancy and board edges only, no pins or checks.

use crate::board::{Piece, PieceKind, Square};
use crate::castling::CastleSide;
use crate::moves::Move;
use crate::position::Position;
use crate::utils::{self, DIAGONAL, ORTHOGONAL};

impl Position {
    /// Pseudo-legal moves for the side to move, in board scan order. Castling is not
    /// included; see [`Position::generate_castle_moves`].
    pub fn generate_pseudo_moves(&self, out: &mut Vec<Move>) {
        for (from, piece) in self.board.pieces() {
            if piece.color == self.side {
                self.generate_piece_moves(from, piece, out);
            }
        }
    }

    pub(crate) fn generate_piece_moves(&self, from: Square, piece: Piece, out: &mut Vec<Move>) {
        match piece.kind {
            PieceKind::Pawn => self.generate_pawn_moves(from, piece, out),
            PieceKind::Knight => {
                self.generate_jump_moves(from, piece, utils::knight_targets(from), out)
            }
            PieceKind::Bishop => self.generate_slider_moves(from, piece, &DIAGONAL, out),
            PieceKind::Rook => self.generate_slider_moves(from, piece, &ORTHOGONAL, out),
            PieceKind::Queen => {
                self.generate_slider_moves(from, piece, &ORTHOGONAL, out);
                self.generate_slider_moves(from, piece, &DIAGONAL, out);
            }
            PieceKind::King => {
                self.generate_jump_moves(from, piece, utils::king_targets(from), out)
            }
        }
    }

    fn generate_pawn_moves(&self, from: Square, pawn: Piece, out: &mut Vec<Move>) {
        let dir = pawn.color.forward();

        // Pushes: one square if empty, two from the starting row if both are empty
        if let Some(one) = from.offset(dir, 0) {
            if self.board.is_empty(one) {
                out.push(Move::normal(from, one, pawn, &self.board));
                if from.row() == pawn.color.pawn_row() {
                    if let Some(two) = one.offset(dir, 0) {
                        if self.board.is_empty(two) {
                            out.push(Move::normal(from, two, pawn, &self.board));
                        }
                    }
                }
            }
        }

        // Captures, left then right; an empty diagonal only counts if it is the en-passant target
        for dc in [-1, 1] {
            let Some(to) = from.offset(dir, dc) else {
                continue;
            };
            match self.board.color_at(to) {
                Some(color) if color != pawn.color => {
                    out.push(Move::normal(from, to, pawn, &self.board));
                }
                None if self.ep == Some(to) => {
                    out.push(Move::en_passant(from, to, pawn));
                }
                _ => {}
            }
        }
    }

    fn generate_slider_moves(
        &self,
        from: Square,
        piece: Piece,
        dirs: &[(i8, i8)],
        out: &mut Vec<Move>,
    ) {
        for &dir in dirs {
            for to in utils::ray(from, dir) {
                match self.board.color_at(to) {
                    None => out.push(Move::normal(from, to, piece, &self.board)),
                    Some(color) => {
                        if color != piece.color {
                            out.push(Move::normal(from, to, piece, &self.board));
                        }
                        break;
                    }
                }
            }
        }
    }

    fn generate_jump_moves(
        &self,
        from: Square,
        piece: Piece,
        targets: impl Iterator<Item = Square>,
        out: &mut Vec<Move>,
    ) {
        for to in targets {
            if self.board.color_at(to) != Some(piece.color) {
                out.push(Move::normal(from, to, piece, &self.board));
            }
        }
    }

    /// Castling moves for the side to move: king not in check, right still held, squares
    /// between king and rook empty, and the king's transit and landing squares safe.
    pub fn generate_castle_moves(&self, out: &mut Vec<Move>) {
        let king_sq = self.king_sq[self.side as usize];
        if !self.castling.any(self.side) || self.square_under_attack(king_sq) {
            return;
        }
        for side in [CastleSide::King, CastleSide::Queen] {
            if self.castling.has(self.side, side) {
                if let Some(mv) = self.castle_move(king_sq, side) {
                    out.push(mv);
                }
            }
        }
    }

    fn castle_move(&self, king_sq: Square, side: CastleSide) -> Option<Move> {
        let king = self.board.piece_at(king_sq)?;
        let rook = Piece::new(king.color, PieceKind::Rook);
        if self.board.piece_at(Square::new(king_sq.row(), side.rook_col())) != Some(rook) {
            return None;
        }

        let step: i8 = match side {
            CastleSide::King => 1,
            CastleSide::Queen => -1,
        };
        let between = king_sq.col().abs_diff(side.rook_col()) as i8 - 1;
        for i in 1..=between {
            if !self.board.is_empty(king_sq.offset(0, step * i)?) {
                return None;
            }
        }
        // only the two squares the king crosses and lands on must be safe
        for i in 1..=2 {
            if self.square_under_attack(king_sq.offset(0, step * i)?) {
                return None;
            }
        }
        Some(Move::castle(king_sq, king_sq.offset(0, step * 2)?, king))
    }
}
