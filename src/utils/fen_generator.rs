//! Placement-text generator.
//!
//! Inverse of the placement grammar read by `fen_parser`: ranks 8 down to 1,
//! files a to h, runs of empty squares collapsed into a digit, ranks joined
//! with `/`. Only the placement field is produced.

use crate::board_state::chess_types::{Color, Piece, Role};
use crate::board_state::piece_store::PieceLookup;
use crate::board_state::square::Square;

pub fn encode<P: PieceLookup + ?Sized>(position: &P) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let piece = Square::from_file_rank(file, rank).and_then(|sq| position.piece_at(sq));
            if let Some(piece) = piece {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_to_char(piece));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

pub fn piece_to_char(piece: Piece) -> char {
    let base = match piece.role {
        Role::Pawn => 'p',
        Role::Knight => 'n',
        Role::Bishop => 'b',
        Role::Rook => 'r',
        Role::Queen => 'q',
        Role::King => 'k',
    };

    match piece.color {
        Color::White => base.to_ascii_uppercase(),
        Color::Black => base,
    }
}
