// Direction and offset constants for move generation, plus precomputed jump targets

use std::sync::OnceLock;

use crate::board::Square;

// (row, col) deltas. Row 0 is rank 8, so "up" is toward black's side.
pub const UP: (i8, i8) = (-1, 0);
pub const DOWN: (i8, i8) = (1, 0);
pub const LEFT: (i8, i8) = (0, -1);
pub const RIGHT: (i8, i8) = (0, 1);

// up, left, down, right
pub const ORTHOGONAL: [(i8, i8); 4] = [UP, LEFT, DOWN, RIGHT];
// up-right, up-left, down-right, down-left
pub const DIAGONAL: [(i8, i8); 4] = [(-1, 1), (-1, -1), (1, 1), (1, -1)];

pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (1, -2),
    (-2, 1),
    (-1, 2),
    (-1, -2),
    (-2, -1),
    (2, -1),
];

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, 1),
    (-1, -1),
    (1, -1),
    (1, 1),
];

/// On-board targets of a fixed offset set, in offset order. Unused slots are `None`.
pub type JumpTable = [[Option<Square>; 8]; 64];

static KNIGHT_TARGETS: OnceLock<JumpTable> = OnceLock::new();
static KING_TARGETS: OnceLock<JumpTable> = OnceLock::new();

fn build_jump_table(offsets: &[(i8, i8); 8]) -> JumpTable {
    let mut table = [[None; 8]; 64];
    for sq in Square::all() {
        let mut n = 0;
        for &(dr, dc) in offsets {
            if let Some(to) = sq.offset(dr, dc) {
                table[sq.index()][n] = Some(to);
                n += 1;
            }
        }
    }
    table
}

pub fn init_attack_tables() {
    KNIGHT_TARGETS.get_or_init(|| build_jump_table(&KNIGHT_OFFSETS));
    KING_TARGETS.get_or_init(|| build_jump_table(&KING_OFFSETS));
}

#[inline]
pub fn knight_targets(sq: Square) -> impl Iterator<Item = Square> {
    let table = KNIGHT_TARGETS.get_or_init(|| build_jump_table(&KNIGHT_OFFSETS));
    table[sq.index()].into_iter().map_while(|t| t)
}

#[inline]
pub fn king_targets(sq: Square) -> impl Iterator<Item = Square> {
    let table = KING_TARGETS.get_or_init(|| build_jump_table(&KING_OFFSETS));
    table[sq.index()].into_iter().map_while(|t| t)
}

/// Squares from `from` (exclusive) outward along `dir` until the board edge.
pub fn ray(from: Square, dir: (i8, i8)) -> impl Iterator<Item = Square> {
    std::iter::successors(from.offset(dir.0, dir.1), move |sq| sq.offset(dir.0, dir.1))
}
