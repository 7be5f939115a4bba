// Attack detection and the make/test/undo legality filter

use crate::board::{Color, PieceKind, Square};
use crate::error::MoveError;
use crate::moves::Move;
use crate::position::Position;

impl Position {
    /// Is `sq` attacked by the side not to move? Pure query.
    pub fn square_under_attack(&self, sq: Square) -> bool {
        self.attacked_by(sq, self.side.opposite())
    }

    /// Is `sq` attacked by any piece of `attacker`?
    ///
    /// Runs the attacker's pseudo-legal generators and looks for a destination equal to
    /// `sq`. Pawns are the exception: they attack their two forward diagonals whether or
    /// not anything stands there, and their pushes attack nothing.
    pub fn attacked_by(&self, sq: Square, attacker: Color) -> bool {
        let mut moves = Vec::with_capacity(32);
        for (from, piece) in self.board.pieces() {
            if piece.color != attacker {
                continue;
            }
            if piece.kind == PieceKind::Pawn {
                let dir = attacker.forward();
                if from.offset(dir, -1) == Some(sq) || from.offset(dir, 1) == Some(sq) {
                    return true;
                }
                continue;
            }
            moves.clear();
            self.generate_piece_moves(from, piece, &mut moves);
            if moves.iter().any(|m| m.to() == sq) {
                return true;
            }
        }
        false
    }

    /// Is the side to move's king attacked?
    pub fn in_check(&self) -> bool {
        self.square_under_attack(self.king_sq[self.side as usize])
    }

    /// Fully legal moves for the side to move, and the checkmate/stalemate flags.
    ///
    /// Every pseudo-legal candidate (castling included) is applied, the mover's king is
    /// tested for attack, and the move is taken back before the next candidate, whatever
    /// the outcome. The en-passant target and castling rights are snapshotted first and
    /// restored last so nothing leaks out of the trial loop. Order is scan order.
    pub fn generate_moves(&mut self) -> Vec<Move> {
        let saved_ep = self.ep;
        let saved_castling = self.castling;

        let mut moves: Vec<Move> = Vec::with_capacity(64);
        self.generate_pseudo_moves(&mut moves);
        self.generate_castle_moves(&mut moves);

        let mover = self.side;
        moves.retain(|&mv| {
            self.make_move(mv);
            self.side = self.side.opposite();
            let exposed = self.square_under_attack(self.king_sq[mover as usize]);
            self.side = self.side.opposite();
            self.undo_move();
            !exposed
        });

        if moves.is_empty() {
            if self.in_check() {
                log::debug!("checkmate: {:?} to move has no legal reply", mover);
                self.checkmate = true;
            } else {
                log::debug!("stalemate: {:?} to move has no legal move", mover);
                self.stalemate = true;
            }
        } else {
            self.checkmate = false;
            self.stalemate = false;
        }

        self.ep = saved_ep;
        self.castling = saved_castling;
        moves
    }

    /// The legal move with this origin and destination, if any.
    pub fn find_move(&mut self, from: Square, to: Square) -> Option<Move> {
        self.generate_moves()
            .into_iter()
            .find(|m| m.from() == from && m.to() == to)
    }

    /// Apply `mv` only if it is in the current legal list (matched by identity).
    /// A promotion choice carried by `mv` is kept. Returns the move actually applied.
    pub fn try_make_move(&mut self, mv: Move) -> Result<Move, MoveError> {
        let Some(legal) = self.generate_moves().into_iter().find(|m| *m == mv) else {
            log::debug!("rejected {}: not in the legal list", mv);
            return Err(MoveError::Illegal {
                notation: mv.notation(),
            });
        };
        let chosen = match mv.promotion() {
            Some(kind) => legal.promote_to(kind),
            None => legal,
        };
        self.make_move(chosen);
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    fn names(moves: &[Move]) -> Vec<String> {
        let mut v: Vec<String> = moves.iter().map(|m| m.to_string()).collect();
        v.sort();
        v
    }

    #[test]
    fn initial_position_has_twenty_legal_moves() {
        let mut pos = Position::new();
        assert_eq!(pos.generate_moves().len(), 20);
        assert!(!pos.is_checkmate());
        assert!(!pos.is_stalemate());
    }

    #[test]
    fn pawn_attacks_empty_diagonals() {
        let pos = Position::from_fen("4k3/8/8/8/8/8/6p1/4K3 w - - 0 1").unwrap();
        assert!(pos.attacked_by(sq("f1"), Color::Black));
        assert!(pos.attacked_by(sq("h1"), Color::Black));
        // a push is not an attack
        assert!(!pos.attacked_by(sq("g1"), Color::Black));
    }

    #[test]
    fn castling_blocked_by_pawn_attacked_transit_square() {
        // black pawn on g2 covers f1
        let mut pos = Position::from_fen("4k3/8/8/8/8/8/6p1/4K2R w K - 0 1").unwrap();
        let moves = pos.generate_moves();
        assert!(!moves.iter().any(|m| m.is_castle()));
    }

    #[test]
    fn attack_query_is_pure() {
        let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/R3K2R w KQ d6 0 1").unwrap();
        let before = pos.clone();
        for s in Square::all() {
            pos.attacked_by(s, Color::Black);
            pos.attacked_by(s, Color::White);
        }
        assert_eq!(pos.board(), before.board());
        assert_eq!(pos.en_passant(), before.en_passant());
        assert_eq!(pos.castling_rights(), before.castling_rights());
        assert_eq!(pos.side_to_move(), before.side_to_move());
    }

    #[test]
    fn pinned_piece_may_only_move_along_pin() {
        // bishop e2 pinned by the rook on e8 cannot move at all
        let mut pos = Position::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").unwrap();
        let moves = pos.generate_moves();
        assert!(!moves.iter().any(|m| m.from() == sq("e2")));
        // rook e2 pinned along the file can slide on it and capture the pinner
        let mut pos = Position::from_fen("4r1k1/8/8/8/8/8/4R3/4K3 w - - 0 1").unwrap();
        let rook: Vec<String> = names(&pos.generate_moves())
            .into_iter()
            .filter(|m| m.starts_with("e2"))
            .collect();
        assert_eq!(rook, vec!["e2e3", "e2e4", "e2e5", "e2e6", "e2e7", "e2e8"]);
    }

    #[test]
    fn en_passant_exposing_king_is_illegal() {
        // capturing d5 would open the fifth rank to the rook on h5
        let mut pos = Position::from_fen("8/8/8/K2pP2r/8/8/8/4k3 w - d6 0 1").unwrap();
        let moves = pos.generate_moves();
        assert!(!moves.iter().any(|m| m.is_en_passant()));
    }

    #[test]
    fn back_rank_mate() {
        let mut pos = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1").unwrap();
        assert!(pos.in_check());
        assert!(pos.generate_moves().is_empty());
        assert!(pos.is_checkmate());
        assert!(!pos.is_stalemate());
    }

    #[test]
    fn stalemate_without_check() {
        let mut pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!pos.in_check());
        assert!(pos.generate_moves().is_empty());
        assert!(pos.is_stalemate());
        assert!(!pos.is_checkmate());
    }

    #[test]
    fn flags_cleared_by_undo() {
        let mut pos = Position::new();
        for (from, to) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
            let mv = pos.find_move(sq(from), sq(to)).unwrap();
            pos.make_move(mv);
        }
        assert!(pos.generate_moves().is_empty());
        assert!(pos.is_checkmate());
        pos.undo_move();
        assert!(!pos.is_checkmate());
        assert!(!pos.generate_moves().is_empty());
    }

    #[test]
    fn try_make_move_rejects_foreign_moves() {
        let mut pos = Position::new();
        let bogus = Move::new(sq("e2"), sq("e5"), pos.board()).unwrap();
        assert_eq!(
            pos.try_make_move(bogus),
            Err(MoveError::Illegal {
                notation: "e2e5".to_string()
            })
        );
        assert_eq!(pos.ply_count(), 0);

        let ok = Move::new(sq("e2"), sq("e4"), pos.board()).unwrap();
        let applied = pos.try_make_move(ok).unwrap();
        assert_eq!(applied.to_string(), "e2e4");
        assert_eq!(pos.en_passant(), Some(sq("e3")));
    }

    #[test]
    fn try_make_move_keeps_promotion_choice() {
        let mut pos = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let mv = pos
            .find_move(sq("b7"), sq("b8"))
            .unwrap()
            .promote_to(PieceKind::Knight);
        pos.try_make_move(mv).unwrap();
        assert_eq!(
            pos.piece_at(sq("b8")),
            Some(Piece::new(Color::White, PieceKind::Knight))
        );
        pos.undo_move();
        assert_eq!(
            pos.piece_at(sq("b7")),
            Some(Piece::new(Color::White, PieceKind::Pawn))
        );
        assert_eq!(pos.piece_at(sq("b8")), None);
    }

    #[test]
    fn auto_promotion_to_queen() {
        let mut pos = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let promos: Vec<Move> = pos
            .generate_moves()
            .into_iter()
            .filter(|m| m.is_promotion())
            .collect();
        assert_eq!(promos.len(), 1);
        pos.make_move(promos[0]);
        assert_eq!(
            pos.piece_at(sq("b8")),
            Some(Piece::new(Color::White, PieceKind::Queen))
        );
    }

    #[test]
    fn find_move_matches_by_squares() {
        let mut pos = Position::new();
        assert!(pos.find_move(sq("g1"), sq("f3")).is_some());
        assert!(pos.find_move(sq("g1"), sq("g3")).is_none());
    }
}
