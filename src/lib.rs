pub mod board;
pub mod castling;
pub mod error;
pub mod legality;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod position;
pub mod scanner;
pub mod utils;

pub use board::{Board, Color, Piece, PieceKind, Square};
pub use castling::{CastleSide, CastlingRights};
pub use error::{MoveError, SetupError, SquareError};
pub use moves::Move;
pub use position::{Position, START_FEN};
pub use scanner::{Check, KingSafety, Pin};

pub fn init() {
    utils::init_attack_tables();
}
