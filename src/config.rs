//! Board configuration.
//!
//! Every field has a default so partial configurations deserialize; callers
//! pick the serde format.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::board_state::chess_rules::STARTING_POSITION_FEN;
use crate::board_state::chess_types::Color;
use crate::board_state::square::Square;
use crate::moves::move_descriptions::ChessMove;
use crate::utils::fen_parser::CheckState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Position to start from; only the placement field is read.
    pub fen: String,
    /// Side to move.
    pub turn_color: Color,
    /// `true` for "side to move is in check", or the colour in check.
    pub check: Option<CheckState>,
    pub last_move: Option<ChessMove>,
    pub selected: Option<Square>,
    /// Rewrite king gestures into king+rook castles.
    pub auto_castle: bool,
    pub movable: MovableConfig,
    pub premove: PremoveConfig,
}

/// Which colours the user may move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovableColor {
    White,
    Black,
    Both,
}

impl MovableColor {
    /// Exactly `color`; `Both` is not a match.
    #[inline]
    pub fn is(self, color: Color) -> bool {
        matches!(
            (self, color),
            (MovableColor::White, Color::White) | (MovableColor::Black, Color::Black)
        )
    }
}

/// Which user moves the board accepts.
///
/// A free board accepts any move. Otherwise the piece's colour must be
/// movable and the move must be listed in `dests`, which is emptied after
/// every played move until the caller supplies the next set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovableConfig {
    pub free: bool,
    pub color: MovableColor,
    pub dests: BTreeMap<Square, Vec<Square>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PremoveConfig {
    pub enabled: bool,
    /// Offer castling destinations for a king premove.
    pub castle: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            fen: STARTING_POSITION_FEN.to_owned(),
            turn_color: Color::White,
            check: None,
            last_move: None,
            selected: None,
            auto_castle: true,
            movable: MovableConfig::default(),
            premove: PremoveConfig::default(),
        }
    }
}

impl Default for MovableConfig {
    fn default() -> Self {
        MovableConfig {
            free: true,
            color: MovableColor::Both,
            dests: BTreeMap::new(),
        }
    }
}

impl Default for PremoveConfig {
    fn default() -> Self {
        PremoveConfig {
            enabled: true,
            castle: true,
        }
    }
}
