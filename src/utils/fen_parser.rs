//! Placement-text parser.
//!
//! Only the piece-placement field (everything before the first space) is
//! read. The walk is left-to-right, top rank first: `/` moves to the next rank,
//! a digit skips that many files, anything else is a piece letter.
//!
//! The lenient entry points (`decode`, `decode_placement`, `locate`) never
//! fail. Unknown letters still occupy a file so the rest of the rank keeps its
//! geometry; squares that fall off the board are dropped.
//! `try_decode_placement` is the strict variant.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::board_state::chess_types::{Color, Piece, PieceIndex, Role};
use crate::board_state::piece_store::{PieceStore, PositionMap};
use crate::board_state::square::Square;
use crate::errors::{BoardError, Result};
use crate::utils::algebraic::{coords_to_square, Coords};

/// A freshly decoded store and the number of identities it used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedPosition {
    pub store: PieceStore,
    /// Identities `0..piece_count` are assigned; this is the next fresh one.
    pub piece_count: PieceIndex,
}

/// How the caller describes a check: `true` means the side to move is in
/// check, a colour names the side directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckState {
    Flag(bool),
    Side(Color),
}

/// Decode placement text into a store with identities `0..N` in encounter order.
pub fn decode(text: &str) -> DecodedPosition {
    let mut store = PieceStore::new();
    let mut piece_count: PieceIndex = 0;

    for (square, ch) in placement_walk(placement_field(text)) {
        let Some(piece) = lenient_piece(square, ch) else {
            continue;
        };
        store.place(square, piece, piece_count);
        piece_count += 1;
    }

    DecodedPosition { store, piece_count }
}

/// Decode placement text into a position map without identities.
pub fn decode_placement(text: &str) -> PositionMap {
    let mut position = PositionMap::new();
    for (square, ch) in placement_walk(placement_field(text)) {
        if let Some(piece) = lenient_piece(square, ch) {
            position.insert(square, piece);
        }
    }
    position
}

/// Strictly parse placement text: exactly 8 ranks of exactly 8 files, only
/// known piece letters and digits `1..=8`.
pub fn try_decode_placement(text: &str) -> Result<PositionMap> {
    let field = placement_field(text);
    let ranks: Vec<&str> = field.split('/').collect();
    if ranks.len() != 8 {
        return Err(BoardError::InvalidPlacement(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut position = PositionMap::new();
    for (row, rank_text) in ranks.iter().enumerate() {
        let mut col = 0usize;
        for ch in rank_text.chars() {
            if let Some(step) = ch.to_digit(10) {
                if !(1..=8).contains(&step) {
                    return Err(BoardError::InvalidPlacement(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                col += step as usize;
                continue;
            }

            let piece = piece_from_char(ch).ok_or(BoardError::InvalidPieceChar(ch))?;
            let square = coords_to_square(Coords {
                col: col.min(8) as i8,
                row: row as i8,
            })
            .ok_or_else(|| {
                BoardError::InvalidPlacement(format!("rank {} has too many files", 8 - row))
            })?;
            position.insert(square, piece);
            col += 1;
        }

        if col != 8 {
            return Err(BoardError::InvalidPlacement(format!(
                "rank {} spans {col} files",
                8 - row
            )));
        }
    }

    Ok(position)
}

/// First square whose literal letter is `letter` (case-sensitive).
pub fn locate(text: &str, letter: char) -> Option<Square> {
    placement_walk(placement_field(text))
        .find(|(_, ch)| *ch == letter)
        .map(|(square, _)| square)
}

/// Square of the king that is in check, if any.
pub fn resolve_checked_square(
    check: Option<CheckState>,
    turn_color: Color,
    text: &str,
) -> Option<Square> {
    let color = match check? {
        CheckState::Side(color) => color,
        CheckState::Flag(true) => turn_color,
        CheckState::Flag(false) => return None,
    };

    match color {
        Color::White => locate(text, 'K'),
        Color::Black => locate(text, 'k'),
    }
}

pub fn piece_from_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::White
    } else if ch.is_ascii_lowercase() {
        Color::Black
    } else {
        return None;
    };

    let role = match ch.to_ascii_lowercase() {
        'p' => Role::Pawn,
        'n' => Role::Knight,
        'b' => Role::Bishop,
        'r' => Role::Rook,
        'q' => Role::Queen,
        'k' => Role::King,
        _ => return None,
    };

    Some(Piece::new(color, role))
}

fn placement_field(text: &str) -> &str {
    text.split(' ').next().unwrap_or("")
}

fn lenient_piece(square: Square, ch: char) -> Option<Piece> {
    let piece = piece_from_char(ch);
    if piece.is_none() {
        warn!(%square, letter = %ch, "unrecognised piece letter in placement");
    }
    piece
}

/// Every on-board (square, letter) pair in encounter order.
fn placement_walk(field: &str) -> impl Iterator<Item = (Square, char)> + '_ {
    let mut row: i32 = 0;
    let mut col: i32 = 0;

    field.chars().filter_map(move |ch| {
        if ch == '/' {
            row += 1;
            col = 0;
            return None;
        }
        if let Some(step) = ch.to_digit(10) {
            col += step as i32;
            return None;
        }

        let coords = Coords {
            col: col.clamp(-1, 8) as i8,
            row: row.clamp(-1, 8) as i8,
        };
        col += 1;
        coords_to_square(coords).map(|square| (square, ch))
    })
}
