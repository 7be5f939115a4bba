//! Error types for position setup and checked move application.

use crate::board::{Color, Square};

/// Malformed square text, e.g. "i9".
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid square {0:?}")]
pub struct SquareError(pub String);

/// Failures while loading a setup string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("missing {0} field")]
    MissingField(&'static str),

    #[error("invalid piece char {0:?}")]
    InvalidPiece(char),

    #[error("placement must have 8 ranks, found {0}")]
    RankCount(usize),

    #[error("rank {0} does not have 8 squares")]
    BadRankLength(usize),

    #[error("expected exactly one {0:?} king, found {1}")]
    KingCount(Color, usize),

    #[error("invalid side to move {0:?}")]
    InvalidSide(String),

    #[error("invalid castling char {0:?}")]
    InvalidCastling(char),

    #[error("invalid en-passant square: {0}")]
    InvalidEnPassant(#[from] SquareError),

    #[error("en-passant square {0} is on the wrong rank for the side to move")]
    EnPassantRank(Square),

    #[error("en-passant square {0} is not behind a pawn that just advanced two squares")]
    EnPassantNoPawn(Square),

    #[error("{0:?} is in check but it is not {0:?}'s move")]
    OpponentInCheck(Color),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The move is not in the legal list of the current position.
    #[error("move {notation} is not legal in the current position")]
    Illegal { notation: String },
}
