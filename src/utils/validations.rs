//! Input validators for squares, move lists and piece indices.
//!
//! These sit in front of the engine for callers that receive untrusted text;
//! the codec and reconciler do not call them.

use crate::board_state::chess_types::PieceIndex;
use crate::board_state::square::Square;
use crate::errors::{BoardError, Result};
use crate::moves::move_descriptions::ChessMove;

/// The square named by `text`, or `None` unless it matches `[a-h][1-8]`.
pub fn validate_square(text: &str) -> Option<Square> {
    text.parse().ok()
}

/// Keep only the entries written as `[a-h][1-8][a-h][1-8]`.
pub fn validate_moves<S: AsRef<str>>(moves: &[S]) -> Vec<ChessMove> {
    moves
        .iter()
        .filter_map(|text| parse_long_move(text.as_ref()))
        .collect()
}

pub fn parse_index(text: &str) -> Result<PieceIndex> {
    text.trim()
        .parse::<PieceIndex>()
        .map_err(|_| BoardError::InvalidIndex(text.to_owned()))
}

fn parse_long_move(text: &str) -> Option<ChessMove> {
    if text.len() != 4 || !text.is_ascii() {
        return None;
    }
    let from = validate_square(&text[..2])?;
    let to = validate_square(&text[2..])?;
    Some(ChessMove::new(from, to))
}
