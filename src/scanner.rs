//! Pin and check scan outward from the king.
//!
//! Walks the eight rays and the knight offsets from the side to move's king and
//! classifies what it finds. It answers the same "is the king attacked" question as
//! [`Position::in_check`] without generating any moves, and additionally reports pins.
//! The legality filter does not depend on it.

use crate::board::{Color, Piece, PieceKind, Square};
use crate::position::Position;
use crate::utils::{self, DIAGONAL, ORTHOGONAL};

/// A friendly piece that would expose its king if it left the line `direction`
/// (king-to-pinner, as a unit step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pin {
    pub square: Square,
    pub direction: (i8, i8),
}

/// An enemy piece giving check; `direction` is the ray or knight offset from the king.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check {
    pub square: Square,
    pub direction: (i8, i8),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KingSafety {
    pub in_check: bool,
    pub pins: Vec<Pin>,
    pub checks: Vec<Check>,
}

impl KingSafety {
    pub fn is_double_check(&self) -> bool {
        self.checks.len() > 1
    }

    pub fn pin_on(&self, sq: Square) -> Option<&Pin> {
        self.pins.iter().find(|p| p.square == sq)
    }
}

impl Position {
    pub fn king_safety(&self) -> KingSafety {
        let ally = self.side;
        let enemy = ally.opposite();
        let king = self.king_sq[ally as usize];
        let mut report = KingSafety::default();

        let rays = ORTHOGONAL
            .iter()
            .map(|d| (*d, true))
            .chain(DIAGONAL.iter().map(|d| (*d, false)));
        for (dir, orthogonal) in rays {
            let mut possible_pin: Option<Square> = None;
            for (i, sq) in utils::ray(king, dir).enumerate() {
                let Some(piece) = self.board.piece_at(sq) else {
                    continue;
                };
                if piece.color == ally {
                    if possible_pin.is_some() {
                        // second friendly blocker: nothing behind it matters
                        break;
                    }
                    possible_pin = Some(sq);
                    continue;
                }
                if attacks_along_ray(piece, enemy, dir, orthogonal, i + 1) {
                    match possible_pin {
                        None => report.checks.push(Check {
                            square: sq,
                            direction: dir,
                        }),
                        Some(pinned) => report.pins.push(Pin {
                            square: pinned,
                            direction: dir,
                        }),
                    }
                }
                break;
            }
        }

        for to in utils::knight_targets(king) {
            if self.board.piece_at(to) == Some(Piece::new(enemy, PieceKind::Knight)) {
                let dir = (
                    to.row() as i8 - king.row() as i8,
                    to.col() as i8 - king.col() as i8,
                );
                report.checks.push(Check { square: to, direction: dir });
            }
        }

        report.in_check = !report.checks.is_empty();
        report
    }
}

// Can `piece`, found `distance` squares from the king along `dir`, hit the king?
fn attacks_along_ray(
    piece: Piece,
    enemy: Color,
    dir: (i8, i8),
    orthogonal: bool,
    distance: usize,
) -> bool {
    match piece.kind {
        PieceKind::Queen => true,
        PieceKind::Rook => orthogonal,
        PieceKind::Bishop => !orthogonal,
        PieceKind::King => distance == 1,
        // the pawn sits one step diagonally, on the side it advances from
        PieceKind::Pawn => !orthogonal && distance == 1 && dir.0 == -enemy.forward(),
        PieceKind::Knight => false,
    }
}
