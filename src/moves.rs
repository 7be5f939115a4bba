//! One ply: origin/destination, pieces involved, special-move flags.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::board::{Board, Piece, PieceKind, Square};
use crate::castling::CastleSide;

pub const FLAG_NONE: u8 = 0;
pub const FLAG_PROMOTION: u8 = 1 << 0;
pub const FLAG_EN_PASSANT: u8 = 1 << 1;
pub const FLAG_CASTLE: u8 = 1 << 2;

/// An immutable move built from a concrete board snapshot.
///
/// The captured piece is read from the board when the move is built. En passant is the
/// exception: its captured piece is always the opposing pawn, whatever sits on `to`.
///
/// Equality and hashing use [`Move::id`], a function of the four coordinates only, so a
/// caller-built (origin, destination) pair matches the generated move it names.
#[derive(Debug, Clone, Copy)]
pub struct Move {
    from: Square,
    to: Square,
    piece_moved: Piece,
    piece_captured: Option<Piece>,
    flags: u8,
    promotion: PieceKind,
}

impl Move {
    /// Build a plain move from whatever is on `board`. `None` if `from` is empty.
    pub fn new(from: Square, to: Square, board: &Board) -> Option<Self> {
        let piece = board.piece_at(from)?;
        Some(Self::normal(from, to, piece, board))
    }

    pub(crate) fn normal(from: Square, to: Square, piece: Piece, board: &Board) -> Self {
        let mut flags = FLAG_NONE;
        if piece.kind == PieceKind::Pawn && to.row() == piece.color.promotion_row() {
            flags |= FLAG_PROMOTION;
        }
        Self {
            from,
            to,
            piece_moved: piece,
            piece_captured: board.piece_at(to),
            flags,
            promotion: PieceKind::Queen,
        }
    }

    pub(crate) fn en_passant(from: Square, to: Square, pawn: Piece) -> Self {
        Self {
            from,
            to,
            piece_moved: pawn,
            piece_captured: Some(Piece::new(pawn.color.opposite(), PieceKind::Pawn)),
            flags: FLAG_EN_PASSANT,
            promotion: PieceKind::Queen,
        }
    }

    pub(crate) fn castle(from: Square, to: Square, king: Piece) -> Self {
        Self {
            from,
            to,
            piece_moved: king,
            piece_captured: None,
            flags: FLAG_CASTLE,
            promotion: PieceKind::Queen,
        }
    }

    /// Choose the promotion piece for a promotion move taken from the legal list.
    /// Generation always offers the queen; non-promotions and non-promotable kinds
    /// (pawn, king) return the move unchanged.
    pub fn promote_to(mut self, kind: PieceKind) -> Self {
        if self.is_promotion() && !matches!(kind, PieceKind::Pawn | PieceKind::King) {
            self.promotion = kind;
        }
        self
    }

    #[inline]
    pub fn from(&self) -> Square {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Square {
        self.to
    }

    #[inline]
    pub fn piece_moved(&self) -> Piece {
        self.piece_moved
    }

    #[inline]
    pub fn piece_captured(&self) -> Option<Piece> {
        self.piece_captured
    }

    #[inline]
    pub fn has_flag(&self, flag: u8) -> bool {
        self.flags & flag != 0
    }

    pub fn is_promotion(&self) -> bool {
        self.has_flag(FLAG_PROMOTION)
    }

    pub fn is_en_passant(&self) -> bool {
        self.has_flag(FLAG_EN_PASSANT)
    }

    pub fn is_castle(&self) -> bool {
        self.has_flag(FLAG_CASTLE)
    }

    pub fn is_capture(&self) -> bool {
        self.piece_captured.is_some()
    }

    /// Piece that ends up on `to` (the promotion piece for promotions).
    pub fn piece_placed(&self) -> Piece {
        if self.is_promotion() {
            Piece::new(self.piece_moved.color, self.promotion)
        } else {
            self.piece_moved
        }
    }

    pub fn promotion(&self) -> Option<PieceKind> {
        self.is_promotion().then_some(self.promotion)
    }

    pub fn is_double_pawn_push(&self) -> bool {
        self.piece_moved.kind == PieceKind::Pawn && self.from.row().abs_diff(self.to.row()) == 2
    }

    /// Square skipped over by a two-square pawn advance.
    pub fn skipped_square(&self) -> Option<Square> {
        self.is_double_pawn_push()
            .then(|| Square::new((self.from.row() + self.to.row()) / 2, self.from.col()))
    }

    /// Square of the pawn removed by an en-passant capture: same rank as origin,
    /// same file as destination.
    pub fn en_passant_victim(&self) -> Option<Square> {
        self.is_en_passant()
            .then(|| Square::new(self.from.row(), self.to.col()))
    }

    pub fn castle_side(&self) -> Option<CastleSide> {
        if !self.is_castle() {
            return None;
        }
        if self.to.col() > self.from.col() {
            Some(CastleSide::King)
        } else {
            Some(CastleSide::Queen)
        }
    }

    /// (rook origin, rook destination) for a castle. Kingside: corner to the square just
    /// left of the king's landing square. Queenside: corner to the square just right of it.
    pub fn castle_rook_squares(&self) -> Option<(Square, Square)> {
        let row = self.to.row();
        let col = self.to.col();
        match self.castle_side()? {
            CastleSide::King => Some((Square::new(row, col + 1), Square::new(row, col - 1))),
            CastleSide::Queen => Some((Square::new(row, col - 2), Square::new(row, col + 1))),
        }
    }

    /// Identity over the four coordinates.
    pub fn id(&self) -> u16 {
        self.from.row() as u16 * 1000
            + self.from.col() as u16 * 100
            + self.to.row() as u16 * 10
            + self.to.col() as u16
    }

    /// Two-square notation such as "e2e4". Output only.
    pub fn notation(&self) -> String {
        self.to_string()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Color;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn captured_piece_read_at_construction() {
        let mut board = Board::standard();
        let mv = Move::new(sq("e2"), sq("e4"), &board).unwrap();
        assert_eq!(mv.piece_moved(), Piece::new(Color::White, PieceKind::Pawn));
        assert_eq!(mv.piece_captured(), None);
        assert_eq!(mv.notation(), "e2e4");
        assert!(mv.is_double_pawn_push());
        assert_eq!(mv.skipped_square(), Some(sq("e3")));

        // later board changes do not alter an already built move
        board.set(sq("e4"), Some(Piece::new(Color::Black, PieceKind::Knight)));
        assert_eq!(mv.piece_captured(), None);
        assert!(Move::new(sq("e5"), sq("e6"), &board).is_none());
    }

    #[test]
    fn identity_ignores_flags_and_pieces() {
        let board = Board::standard();
        let a = Move::new(sq("g1"), sq("f3"), &board).unwrap();
        let b = Move::castle(sq("g1"), sq("f3"), Piece::new(Color::White, PieceKind::King));
        assert_eq!(a, b);
        assert_eq!(a.id(), 7 * 1000 + 6 * 100 + 5 * 10 + 5);
        let c = Move::new(sq("g1"), sq("h3"), &board).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn en_passant_captures_opposing_pawn() {
        let pawn = Piece::new(Color::White, PieceKind::Pawn);
        let mv = Move::en_passant(sq("e5"), sq("d6"), pawn);
        assert_eq!(
            mv.piece_captured(),
            Some(Piece::new(Color::Black, PieceKind::Pawn))
        );
        assert_eq!(mv.en_passant_victim(), Some(sq("d5")));
        assert!(!mv.is_double_pawn_push());
    }

    #[test]
    fn promotion_defaults_to_queen() {
        let mut board = Board::empty();
        let pawn = Piece::new(Color::Black, PieceKind::Pawn);
        board.set(sq("b2"), Some(pawn));
        let mv = Move::new(sq("b2"), sq("b1"), &board).unwrap();
        assert!(mv.is_promotion());
        assert_eq!(mv.promotion(), Some(PieceKind::Queen));
        assert_eq!(
            mv.piece_placed(),
            Piece::new(Color::Black, PieceKind::Queen)
        );
        let under = mv.promote_to(PieceKind::Knight);
        assert_eq!(under.promotion(), Some(PieceKind::Knight));
        assert_eq!(under, mv);
        assert_eq!(mv.promote_to(PieceKind::King).promotion(), Some(PieceKind::Queen));
    }

    #[test]
    fn castle_rook_squares() {
        let king = Piece::new(Color::White, PieceKind::King);
        let ks = Move::castle(sq("e1"), sq("g1"), king);
        assert_eq!(ks.castle_side(), Some(CastleSide::King));
        assert_eq!(ks.castle_rook_squares(), Some((sq("h1"), sq("f1"))));
        let qs = Move::castle(sq("e1"), sq("c1"), king);
        assert_eq!(qs.castle_side(), Some(CastleSide::Queen));
        assert_eq!(qs.castle_rook_squares(), Some((sq("a1"), sq("d1"))));
    }
}
