//! Errors used throughout the board engine.
//!
//! Core board operations never fail: moving from an empty square, resolving a
//! castle for a non-king or asking for destinations of an empty square all
//! degrade to "no effect". `BoardError` is reserved for the input boundaries
//! (square and index parsing, strict placement parsing, configuration) and for
//! the store invariant check.

use thiserror::Error;

use crate::board_state::chess_types::PieceIndex;
use crate::board_state::square::Square;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Text that is not a square in `[a-h][1-8]` form.
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    /// A character that is neither a piece letter, a digit nor `/`.
    #[error("invalid piece character {0:?} in placement")]
    InvalidPieceChar(char),

    /// Placement text with the wrong shape.
    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    /// Text that is not a piece index.
    #[error("invalid piece index: {0:?}")]
    InvalidIndex(String),

    /// The board map and the index map disagree.
    #[error("store invariant broken at {square}, index {index}: {reason}")]
    BrokenInvariant {
        square: Square,
        index: PieceIndex,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, BoardError>;
