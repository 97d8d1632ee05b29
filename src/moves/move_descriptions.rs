//! Move and move-descriptor types handed to the presentation layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board_state::square::Square;

/// An origin/destination pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}

/// One step of a move sequence.
///
/// Steps with `render == false` only keep sequences of different moves the
/// same length and must never touch a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct MoveDescriptor {
    pub from: Square,
    pub to: Square,
    pub render: bool,
}

impl MoveDescriptor {
    #[inline]
    pub const fn play(mv: ChessMove) -> Self {
        Self {
            from: mv.from,
            to: mv.to,
            render: true,
        }
    }

    /// Placeholder step that keeps a piece where it is.
    #[inline]
    pub const fn hold(square: Square) -> Self {
        Self {
            from: square,
            to: square,
            render: false,
        }
    }

    #[inline]
    pub const fn as_move(&self) -> ChessMove {
        ChessMove::new(self.from, self.to)
    }
}

impl From<ChessMove> for MoveDescriptor {
    fn from(mv: ChessMove) -> Self {
        MoveDescriptor::play(mv)
    }
}
