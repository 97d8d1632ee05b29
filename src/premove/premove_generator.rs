//! Pseudo-legal destination generator for premove highlighting.

use crate::board_state::chess_types::{Color, Role};
use crate::board_state::piece_store::PieceStore;
use crate::board_state::square::Square;
use crate::premove::mobility::{reaches, CastleContext};
use crate::utils::algebraic::{pos_to_square, square_to_pos, Pos};

/// Squares the piece on `from` could move to by shape alone.
///
/// Candidates are visited file by file (`a1, a2, ... a8, b1, ...`). An empty
/// origin yields no destinations.
pub fn generate_destinations(store: &PieceStore, from: Square, allow_castle: bool) -> Vec<Square> {
    let Some(entry) = store.get(from) else {
        return Vec::new();
    };
    let piece = entry.piece;
    let origin = square_to_pos(from);

    let castle = if piece.role == Role::King {
        castle_context(store, piece.color, allow_castle)
    } else {
        CastleContext {
            allow_castle: false,
            queenside_rook: false,
            kingside_rook: false,
        }
    };

    let mut destinations = Vec::new();
    for x in 0..8i8 {
        for y in 0..8i8 {
            let candidate = Pos { x, y };
            if candidate == origin {
                continue;
            }
            if !reaches(piece.role, piece.color, castle, origin, candidate) {
                continue;
            }
            if let Some(square) = pos_to_square(candidate) {
                destinations.push(square);
            }
        }
    }

    destinations
}

fn castle_context(store: &PieceStore, color: Color, allow_castle: bool) -> CastleContext {
    let rook_on = |file: u8| {
        Square::from_file_rank(file, color.back_rank())
            .and_then(|square| store.get(square))
            .map_or(false, |entry| entry.piece.is(color, Role::Rook))
    };

    CastleContext {
        allow_castle,
        queenside_rook: rook_on(0),
        kingside_rook: rook_on(7),
    }
}

#[cfg(test)]
mod tests {
    use super::generate_destinations;
    use crate::board_state::chess_rules::STARTING_POSITION_FEN;
    use crate::board_state::square::Square;
    use crate::utils::fen_parser::decode;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    fn names(squares: &[Square]) -> Vec<String> {
        squares.iter().map(|square| square.to_string()).collect()
    }

    #[test]
    fn rook_sees_through_pieces() {
        let store = decode("8/3p4/8/8/1P1R2p1/8/8/8").store;
        let destinations = generate_destinations(&store, sq("d4"), false);

        assert_eq!(destinations.len(), 14);
        assert!(destinations.iter().all(|square| square.file() == 3 || square.rank() == 3));
        assert!(!destinations.contains(&sq("d4")));
        assert!(destinations.contains(&sq("d8")));
        assert!(destinations.contains(&sq("a4")));
    }

    #[test]
    fn knight_from_corner_file_order() {
        let store = decode(STARTING_POSITION_FEN).store;
        assert_eq!(
            names(&generate_destinations(&store, sq("b1"), false)),
            vec!["a3", "c3", "d2"]
        );
    }

    #[test]
    fn queen_in_the_centre() {
        let store = decode("8/8/8/8/3Q4/8/8/8").store;
        assert_eq!(generate_destinations(&store, sq("d4"), false).len(), 27);
    }

    #[test]
    fn pawn_on_home_rank() {
        let store = decode(STARTING_POSITION_FEN).store;
        assert_eq!(
            names(&generate_destinations(&store, sq("e2"), false)),
            vec!["d3", "e3", "e4", "f3"]
        );
        assert_eq!(
            names(&generate_destinations(&store, sq("a7"), false)),
            vec!["a5", "a6", "b6"]
        );
    }

    #[test]
    fn king_castle_destinations_follow_flag() {
        let store = decode("r3k2r/8/8/8/8/8/8/R3K2R").store;

        let plain = names(&generate_destinations(&store, sq("e1"), false));
        assert_eq!(plain, vec!["d1", "d2", "e2", "f1", "f2"]);

        let castling = names(&generate_destinations(&store, sq("e1"), true));
        assert_eq!(castling, vec!["a1", "c1", "d1", "d2", "e2", "f1", "f2", "g1", "h1"]);

        let only_kingside = decode("4k3/8/8/8/8/8/8/4K2R").store;
        assert_eq!(
            names(&generate_destinations(&only_kingside, sq("e1"), true)),
            vec!["d1", "d2", "e2", "f1", "f2", "g1", "h1"]
        );
    }

    #[test]
    fn empty_square_has_no_destinations() {
        let store = decode(STARTING_POSITION_FEN).store;
        assert!(generate_destinations(&store, sq("e4"), true).is_empty());
    }
}
