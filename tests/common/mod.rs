#![allow(dead_code)]

use chess_rules::{Board, CastlingRights, Color, Move, Position, Square};
use shakmaty::fen::Fen;
use shakmaty::{CastlingMode, Chess, Position as _, Role};

pub const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
pub const ENDGAME_EP: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
pub const PROMOTIONS: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
pub const MIDGAME: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

pub fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

pub fn setup(fen: &str) -> Position {
    Position::from_fen(fen).expect("valid setup")
}

/// Find the legal move with this notation and apply it.
pub fn play(pos: &mut Position, notation: &str) -> Move {
    let mv = pos
        .generate_moves()
        .into_iter()
        .find(|m| m.to_string() == notation)
        .unwrap_or_else(|| panic!("{notation} is not legal here:\n{pos}"));
    pos.make_move(mv);
    mv
}

pub fn legal_names(pos: &mut Position) -> Vec<String> {
    let mut v: Vec<String> = pos.generate_moves().iter().map(|m| m.to_string()).collect();
    v.sort();
    v
}

/// Everything make/undo must restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub side: Color,
    pub kings: [Square; 2],
    pub ep: Option<Square>,
    pub castling: CastlingRights,
    pub plies: usize,
}

impl Snapshot {
    pub fn of(pos: &Position) -> Self {
        Self {
            board: pos.board().clone(),
            side: pos.side_to_move(),
            kings: [pos.king_square(Color::White), pos.king_square(Color::Black)],
            ep: pos.en_passant(),
            castling: pos.castling_rights(),
            plies: pos.ply_count(),
        }
    }
}

pub fn oracle(fen: &str) -> Chess {
    let fen: Fen = fen.parse().unwrap();
    fen.into_position(CastlingMode::Standard)
        .expect("shakmaty should accept FEN")
}

// Under-promotions are skipped on the oracle side: our generator only offers the queen.
fn queen_or_no_promotion(m: &shakmaty::Move) -> bool {
    !matches!(m.promotion(), Some(role) if role != Role::Queen)
}

pub fn perft_shakmaty(pos: &Chess, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0u64;
    for m in pos.legal_moves() {
        if !queen_or_no_promotion(&m) {
            continue;
        }
        let mut new_pos = pos.clone();
        new_pos.play_unchecked(&m);
        nodes += perft_shakmaty(&new_pos, depth - 1);
    }
    nodes
}

/// Oracle legal moves as two-square notation, sorted.
pub fn shakmaty_names(pos: &Chess) -> Vec<String> {
    let mut v: Vec<String> = pos
        .legal_moves()
        .iter()
        .filter(|m| queen_or_no_promotion(m))
        .map(|m| {
            let mut uci = m.to_uci(CastlingMode::Standard).to_string();
            uci.truncate(4);
            uci
        })
        .collect();
    v.sort();
    v
}
