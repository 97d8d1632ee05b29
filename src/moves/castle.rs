//! Castle resolution.
//!
//! Decides whether a king move is a castle and, if so, which rook moves with
//! it. Two gestures are recognised: the king moved to the `c`/`g` file, or
//! the king dropped on its own corner rook. Only occupancy is consulted;
//! castling rights, attacked squares and check are the rules engine's job.

use serde::Serialize;
use tracing::debug;

use crate::board_state::chess_rules::*;
use crate::board_state::chess_types::{Color, Role};
use crate::board_state::piece_store::PieceStore;
use crate::board_state::square::Square;
use crate::moves::move_descriptions::{ChessMove, MoveDescriptor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CastleSide {
    Queenside,
    Kingside,
}

impl CastleSide {
    pub const fn rook_file(self) -> u8 {
        match self {
            CastleSide::Queenside => QUEENSIDE_ROOK_FILE,
            CastleSide::Kingside => KINGSIDE_ROOK_FILE,
        }
    }

    pub const fn king_target_file(self) -> u8 {
        match self {
            CastleSide::Queenside => QUEENSIDE_KING_TARGET_FILE,
            CastleSide::Kingside => KINGSIDE_KING_TARGET_FILE,
        }
    }

    pub const fn rook_target_file(self) -> u8 {
        match self {
            CastleSide::Queenside => QUEENSIDE_ROOK_TARGET_FILE,
            CastleSide::Kingside => KINGSIDE_ROOK_TARGET_FILE,
        }
    }

    /// Files that must be empty for the two-square king gesture.
    const fn transit_files(self) -> [u8; 2] {
        match self {
            CastleSide::Queenside => [QUEENSIDE_ROOK_TARGET_FILE, QUEENSIDE_KING_TARGET_FILE],
            CastleSide::Kingside => [KINGSIDE_ROOK_TARGET_FILE, KINGSIDE_KING_TARGET_FILE],
        }
    }

    fn from_king_target(file: u8) -> Option<CastleSide> {
        match file {
            QUEENSIDE_KING_TARGET_FILE => Some(CastleSide::Queenside),
            KINGSIDE_KING_TARGET_FILE => Some(CastleSide::Kingside),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CastleResult {
    pub king_move: ChessMove,
    /// `Some` exactly when `is_castle` is set.
    pub rook_move: Option<ChessMove>,
    pub is_castle: bool,
}

impl CastleResult {
    const fn plain(from: Square, to: Square) -> Self {
        Self {
            king_move: ChessMove::new(from, to),
            rook_move: None,
            is_castle: false,
        }
    }

    /// Steps to play: `[king, hold, hold, rook]` for a castle, `[move]` otherwise.
    ///
    /// The two placeholders keep castles as long as the multi-move sequences
    /// the presentation layer animates step by step.
    pub fn steps(&self) -> Vec<MoveDescriptor> {
        match self.rook_move {
            Some(rook_move) if self.is_castle => vec![
                MoveDescriptor::play(self.king_move),
                MoveDescriptor::hold(self.king_move.to),
                MoveDescriptor::hold(self.king_move.to),
                MoveDescriptor::play(rook_move),
            ],
            _ => vec![MoveDescriptor::play(self.king_move)],
        }
    }
}

pub fn resolve_castle(from: Square, to: Square, store: &PieceStore) -> CastleResult {
    let Some(king) = store.get(from) else {
        return CastleResult::plain(from, to);
    };
    if king.piece.role != Role::King {
        return CastleResult::plain(from, to);
    }
    let color = king.piece.color;

    if let Some(side) = CastleSide::from_king_target(to.file()) {
        let path_clear = side
            .transit_files()
            .iter()
            .all(|file| from.with_file(*file).map_or(false, |sq| !store.is_occupied(sq)));
        if let Some(corner) = from.with_file(side.rook_file()) {
            if path_clear && is_own_rook(store, corner, color) {
                return castle(from, side, corner);
            }
        }
    }

    let on_corner_file = to.file() == QUEENSIDE_ROOK_FILE || to.file() == KINGSIDE_ROOK_FILE;
    if on_corner_file && is_own_rook(store, to, color) {
        let side = if to.file() < from.file() {
            CastleSide::Queenside
        } else {
            CastleSide::Kingside
        };
        return castle(from, side, to);
    }

    CastleResult::plain(from, to)
}

fn is_own_rook(store: &PieceStore, square: Square, color: Color) -> bool {
    store
        .get(square)
        .map_or(false, |entry| entry.piece.is(color, Role::Rook))
}

fn castle(from: Square, side: CastleSide, rook_from: Square) -> CastleResult {
    let king_to = from.with_file(side.king_target_file());
    let rook_to = from.with_file(side.rook_target_file());
    match (king_to, rook_to) {
        (Some(king_to), Some(rook_to)) => {
            debug!(%from, %king_to, %rook_from, %rook_to, ?side, "castle resolved");
            CastleResult {
                king_move: ChessMove::new(from, king_to),
                rook_move: Some(ChessMove::new(rook_from, rook_to)),
                is_castle: true,
            }
        }
        _ => CastleResult::plain(from, rook_from),
    }
}
