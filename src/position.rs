//! Mutable game state with make/undo and exact history.

use std::fmt;

use crate::board::{Board, Color, Piece, PieceKind, Square};
use crate::castling::{CastleSide, CastlingRights, KING_HOME_COL};
use crate::error::SetupError;
use crate::moves::Move;

pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

// Undo entry: one per applied ply, holding everything the move overwrote
#[derive(Debug, Clone)]
struct Undo {
    mv: Move,
    prev_castling: CastlingRights,
    prev_ep: Option<Square>,
    prev_king_sq: Square,
}

/// Authoritative game state.
///
/// Invariants: exactly one king per color, always on `king_sq`; one undo record per
/// applied move; `ep` is set only for the ply right after a two-square pawn advance.
#[derive(Debug, Clone)]
pub struct Position {
    pub(crate) board: Board,
    pub(crate) side: Color,
    pub(crate) king_sq: [Square; 2],
    pub(crate) ep: Option<Square>,
    pub(crate) castling: CastlingRights,
    history: Vec<Undo>,
    pub(crate) checkmate: bool,
    pub(crate) stalemate: bool,
}

impl Position {
    /// Standard initial position, white to move.
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            side: Color::White,
            king_sq: [Square::new(7, KING_HOME_COL), Square::new(0, KING_HOME_COL)],
            ep: None,
            castling: CastlingRights::ALL,
            history: Vec::with_capacity(256),
            checkmate: false,
            stalemate: false,
        }
    }

    /// Back to the initial position, dropping all history.
    pub fn reset(&mut self) {
        log::debug!("resetting position ({} plies discarded)", self.history.len());
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    pub fn side_to_move(&self) -> Color {
        self.side
    }

    pub fn king_square(&self, color: Color) -> Square {
        self.king_sq[color as usize]
    }

    pub fn en_passant(&self) -> Option<Square> {
        self.ep
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling
    }

    /// Valid only right after [`Position::generate_moves`].
    pub fn is_checkmate(&self) -> bool {
        self.checkmate
    }

    /// Valid only right after [`Position::generate_moves`].
    pub fn is_stalemate(&self) -> bool {
        self.stalemate
    }

    /// Applied moves, oldest first.
    pub fn move_log(&self) -> impl Iterator<Item = &Move> + '_ {
        self.history.iter().map(|u| &u.mv)
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.history.last().map(|u| &u.mv)
    }

    pub fn ply_count(&self) -> usize {
        self.history.len()
    }

    /// Rights snapshots from before the first move up to the current ones; always one
    /// longer than the move log.
    pub fn castling_history(&self) -> impl Iterator<Item = CastlingRights> + '_ {
        self.history
            .iter()
            .map(|u| u.prev_castling)
            .chain(std::iter::once(self.castling))
    }

    /// Apply `mv`, which must come from this position's own current legal list.
    /// Legality is not re-checked; see [`Position::try_make_move`] for the checked path.
    pub fn make_move(&mut self, mv: Move) {
        let piece = mv.piece_moved();
        let mover = piece.color;
        self.history.push(Undo {
            mv,
            prev_castling: self.castling,
            prev_ep: self.ep,
            prev_king_sq: self.king_sq[mover as usize],
        });

        self.board.set(mv.from(), None);
        self.board.set(mv.to(), Some(piece));
        self.side = self.side.opposite();

        if piece.kind == PieceKind::King {
            self.king_sq[mover as usize] = mv.to();
        }
        if mv.is_promotion() {
            self.board.set(mv.to(), Some(mv.piece_placed()));
        }
        if let Some(victim) = mv.en_passant_victim() {
            self.board.set(victim, None);
        }
        self.ep = mv.skipped_square();
        if let Some((rook_from, rook_to)) = mv.castle_rook_squares() {
            let rook = self.board.take(rook_from);
            self.board.set(rook_to, rook);
        }
        self.castling = self.castling.after_move(&mv);

        self.checkmate = false;
        self.stalemate = false;
    }

    /// Take back the last applied move. `None` (and no change) when nothing was played.
    pub fn undo_move(&mut self) -> Option<Move> {
        let undo = self.history.pop()?;
        let mv = undo.mv;
        let mover = mv.piece_moved().color;

        self.board.set(mv.from(), Some(mv.piece_moved()));
        match mv.en_passant_victim() {
            Some(victim) => {
                self.board.set(mv.to(), None);
                self.board.set(victim, mv.piece_captured());
                // the capture was only possible onto the target, so it comes back
                debug_assert_eq!(undo.prev_ep, Some(mv.to()));
            }
            None => self.board.set(mv.to(), mv.piece_captured()),
        }
        self.side = self.side.opposite();

        if mv.piece_moved().kind == PieceKind::King {
            self.king_sq[mover as usize] = undo.prev_king_sq;
        }
        self.ep = undo.prev_ep;
        self.castling = undo.prev_castling;
        if let Some((rook_from, rook_to)) = mv.castle_rook_squares() {
            let rook = self.board.take(rook_to);
            self.board.set(rook_from, rook);
        }

        self.checkmate = false;
        self.stalemate = false;
        Some(mv)
    }

    /// Load a FEN-style setup: placement, side, castling, en-passant. Trailing move
    /// counters are accepted and ignored. Castling flags whose king or rook is not on
    /// its home square are dropped. An en-passant square needs the pawn that skipped it,
    /// and the side not to move must not be in check.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let mut parts = fen.split_whitespace();
        let placement = parts.next().ok_or(SetupError::MissingField("placement"))?;
        let side_part = parts.next().ok_or(SetupError::MissingField("side"))?;
        let castle_part = parts.next().ok_or(SetupError::MissingField("castling"))?;
        let ep_part = parts.next().ok_or(SetupError::MissingField("en-passant"))?;

        let board = parse_placement(placement)?;

        let mut king_sq = [Square::new(0, 0); 2];
        for color in [Color::White, Color::Black] {
            let kings: Vec<Square> = board.find(Piece::new(color, PieceKind::King)).collect();
            if kings.len() != 1 {
                return Err(SetupError::KingCount(color, kings.len()));
            }
            king_sq[color as usize] = kings[0];
        }

        let side = match side_part {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(SetupError::InvalidSide(other.to_string())),
        };

        let mut castling = CastlingRights::NONE;
        for ch in castle_part.chars() {
            match ch {
                'K' => castling.white_king_side = true,
                'Q' => castling.white_queen_side = true,
                'k' => castling.black_king_side = true,
                'q' => castling.black_queen_side = true,
                '-' => {}
                other => return Err(SetupError::InvalidCastling(other)),
            }
        }
        for color in [Color::White, Color::Black] {
            for side in [CastleSide::King, CastleSide::Queen] {
                if castling.has(color, side) && !pieces_at_home(&board, color, side) {
                    log::debug!("dropping {:?} {:?}-side castling: not at home", color, side);
                    castling.revoke(color, side);
                }
            }
        }

        let ep = match ep_part {
            "-" => None,
            s => {
                let sq: Square = s.parse()?;
                // row 2 is rank 6 (white captures), row 5 is rank 3 (black captures)
                let expected_row = match side {
                    Color::White => 2,
                    Color::Black => 5,
                };
                if sq.row() != expected_row {
                    return Err(SetupError::EnPassantRank(sq));
                }
                // the target is empty and the pawn that skipped it sits one step further on
                let victim = sq.offset(-side.forward(), 0);
                let pawn = Piece::new(side.opposite(), PieceKind::Pawn);
                if !board.is_empty(sq) || victim.and_then(|v| board.piece_at(v)) != Some(pawn) {
                    return Err(SetupError::EnPassantNoPawn(sq));
                }
                Some(sq)
            }
        };

        let pos = Self {
            board,
            side,
            king_sq,
            ep,
            castling,
            history: Vec::with_capacity(256),
            checkmate: false,
            stalemate: false,
        };
        let waiting = side.opposite();
        if pos.attacked_by(pos.king_sq[waiting as usize], side) {
            return Err(SetupError::OpponentInCheck(waiting));
        }

        log::debug!("loaded setup {}", fen.trim());
        Ok(pos)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_placement(placement: &str) -> Result<Board, SetupError> {
    let mut board = Board::empty();
    let ranks: Vec<&str> = placement.split('/').collect();
    if ranks.len() != 8 {
        return Err(SetupError::RankCount(ranks.len()));
    }
    for (row, rank) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for ch in rank.chars() {
            if let Some(skip) = ch.to_digit(10) {
                col += skip as usize;
                continue;
            }
            let piece = Piece::from_char(ch).ok_or(SetupError::InvalidPiece(ch))?;
            if col >= 8 {
                return Err(SetupError::BadRankLength(8 - row));
            }
            board.set(Square::new(row as u8, col as u8), Some(piece));
            col += 1;
        }
        if col != 8 {
            return Err(SetupError::BadRankLength(8 - row));
        }
    }
    Ok(board)
}

fn pieces_at_home(board: &Board, color: Color, side: CastleSide) -> bool {
    let row = color.back_row();
    board.piece_at(Square::new(row, KING_HOME_COL)) == Some(Piece::new(color, PieceKind::King))
        && board.piece_at(Square::new(row, side.rook_col()))
            == Some(Piece::new(color, PieceKind::Rook))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.board)?;
        let side = match self.side {
            Color::White => "white",
            Color::Black => "black",
        };
        write!(f, "{} to move, castling {}", side, self.castling)?;
        if let Some(ep) = self.ep {
            write!(f, ", en passant {}", ep)?;
        }
        writeln!(f)
    }
}
