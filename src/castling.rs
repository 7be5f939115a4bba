//! Castling-rights snapshot and the rules that revoke it.

use std::fmt;

use crate::board::{Color, Piece, PieceKind, Square};
use crate::moves::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

impl CastleSide {
    /// Column of this side's rook home square.
    pub fn rook_col(self) -> u8 {
        match self {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        }
    }
}

pub const KING_HOME_COL: u8 = 4;

/// Four independent flags. Once revoked within a line of play a flag only comes back
/// by undoing past the revoking move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CastlingRights {
    pub white_king_side: bool,
    pub white_queen_side: bool,
    pub black_king_side: bool,
    pub black_queen_side: bool,
}

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights {
        white_king_side: true,
        white_queen_side: true,
        black_king_side: true,
        black_queen_side: true,
    };

    pub const NONE: CastlingRights = CastlingRights {
        white_king_side: false,
        white_queen_side: false,
        black_king_side: false,
        black_queen_side: false,
    };

    pub fn has(&self, color: Color, side: CastleSide) -> bool {
        match (color, side) {
            (Color::White, CastleSide::King) => self.white_king_side,
            (Color::White, CastleSide::Queen) => self.white_queen_side,
            (Color::Black, CastleSide::King) => self.black_king_side,
            (Color::Black, CastleSide::Queen) => self.black_queen_side,
        }
    }

    pub fn revoke(&mut self, color: Color, side: CastleSide) {
        let flag = match (color, side) {
            (Color::White, CastleSide::King) => &mut self.white_king_side,
            (Color::White, CastleSide::Queen) => &mut self.white_queen_side,
            (Color::Black, CastleSide::King) => &mut self.black_king_side,
            (Color::Black, CastleSide::Queen) => &mut self.black_queen_side,
        };
        *flag = false;
    }

    pub fn revoke_all(&mut self, color: Color) {
        self.revoke(color, CastleSide::King);
        self.revoke(color, CastleSide::Queen);
    }

    pub fn any(&self, color: Color) -> bool {
        self.has(color, CastleSide::King) || self.has(color, CastleSide::Queen)
    }

    /// Rights after `mv` is played: a king move drops both of its color's flags; a rook
    /// leaving or being captured on its home square drops the matching flag.
    pub fn after_move(mut self, mv: &Move) -> CastlingRights {
        let moved = mv.piece_moved();
        match moved.kind {
            PieceKind::King => self.revoke_all(moved.color),
            PieceKind::Rook => {
                if let Some(side) = rook_home_side(moved, mv.from()) {
                    self.revoke(moved.color, side);
                }
            }
            _ => {}
        }
        if let Some(captured) = mv.piece_captured() {
            if captured.kind == PieceKind::Rook {
                if let Some(side) = rook_home_side(captured, mv.to()) {
                    self.revoke(captured.color, side);
                }
            }
        }
        self
    }
}

// KQkq, "-" when empty
impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flags = [
            (self.white_king_side, 'K'),
            (self.white_queen_side, 'Q'),
            (self.black_king_side, 'k'),
            (self.black_queen_side, 'q'),
        ];
        let mut any = false;
        for (on, ch) in flags {
            if on {
                write!(f, "{}", ch)?;
                any = true;
            }
        }
        if !any {
            write!(f, "-")?;
        }
        Ok(())
    }
}

/// Which side's rights a rook on `sq` guards, if `sq` is its home square.
pub fn rook_home_side(rook: Piece, sq: Square) -> Option<CastleSide> {
    if sq.row() != rook.color.back_row() {
        return None;
    }
    match sq.col() {
        c if c == CastleSide::King.rook_col() => Some(CastleSide::King),
        c if c == CastleSide::Queen.rook_col() => Some(CastleSide::Queen),
        _ => None,
    }
}
