//! Leaf counting over the legal move tree.
//!
//! Drives the position strictly depth-first: fresh legal moves at every node, one
//! `make_move` per child, and an `undo_move` before the next sibling.

use crate::moves::Move;
use crate::position::Position;

pub fn perft(pos: &mut Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = pos.generate_moves();
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0u64;
    for mv in moves {
        pos.make_move(mv);
        nodes += perft(pos, depth - 1);
        pos.undo_move();
    }
    nodes
}

/// Per root move leaf counts, in generation order. Empty at depth 0.
pub fn divide(pos: &mut Position, depth: u32) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let moves = pos.generate_moves();
    let mut out = Vec::with_capacity(moves.len());
    for mv in moves {
        pos.make_move(mv);
        out.push((mv, perft(pos, depth - 1)));
        pos.undo_move();
    }
    out
}
