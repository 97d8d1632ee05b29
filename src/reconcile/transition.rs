//! Per-identity difference between two stores.
//!
//! The presentation layer animates `moved` pieces from `from` to `to`, fades
//! `appeared` pieces in and `vanished` pieces out. Identities that keep their
//! square are left out.

use serde::Serialize;

use crate::board_state::chess_types::{Piece, PieceIndex};
use crate::board_state::piece_store::PieceStore;
use crate::board_state::square::Square;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceMotion {
    pub index: PieceIndex,
    pub piece: Piece,
    pub from: Square,
    pub to: Square,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PieceSighting {
    pub index: PieceIndex,
    pub piece: Piece,
    pub square: Square,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub moved: Vec<PieceMotion>,
    pub appeared: Vec<PieceSighting>,
    pub vanished: Vec<PieceSighting>,
}

impl Transition {
    pub fn is_empty(&self) -> bool {
        self.moved.is_empty() && self.appeared.is_empty() && self.vanished.is_empty()
    }
}

/// Compare two stores identity by identity, in index order.
///
/// An identity that changed piece between the stores was released and
/// reassigned, so it is reported as vanished and appeared.
pub fn transition(before: &PieceStore, after: &PieceStore) -> Transition {
    let mut out = Transition::default();

    for (index, old) in before.iter_indices() {
        match after.by_index(index) {
            Some(new) if new.piece == old.piece => {
                if new.square != old.square {
                    out.moved.push(PieceMotion {
                        index,
                        piece: old.piece,
                        from: old.square,
                        to: new.square,
                    });
                }
            }
            _ => out.vanished.push(PieceSighting {
                index,
                piece: old.piece,
                square: old.square,
            }),
        }
    }

    for (index, new) in after.iter_indices() {
        let carried = before
            .by_index(index)
            .map_or(false, |old| old.piece == new.piece);
        if !carried {
            out.appeared.push(PieceSighting {
                index,
                piece: new.piece,
                square: new.square,
            });
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_state::chess_rules::STARTING_POSITION_FEN;
    use crate::board_state::piece_store::IndexAllocator;
    use crate::reconcile::identity_reconciler::reconcile;
    use crate::utils::fen_parser::{decode, decode_placement};

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn identical_stores_have_no_transition() {
        let store = decode(STARTING_POSITION_FEN).store;
        assert!(transition(&store, &store).is_empty());
    }

    #[test]
    fn reconciled_capture_sequence_reports_motion_and_disappearance() {
        let decoded = decode(STARTING_POSITION_FEN);
        let mut allocator = IndexAllocator::new(decoded.piece_count);
        // 1. e4 d5 2. exd5
        let target = decode_placement("rnbqkbnr/ppp1pppp/8/3P4/8/8/PPPP1PPP/RNBQKBNR");

        let result = reconcile(&decoded.store, &mut allocator, &target);
        let diff = transition(&decoded.store, &result.store);

        assert!(diff.appeared.is_empty());
        assert_eq!(diff.vanished.len(), 1);
        assert_eq!(diff.vanished[0].square, sq("d7"));
        assert_eq!(diff.moved.len(), 1);
        assert_eq!(diff.moved[0].from, sq("e2"));
        assert_eq!(diff.moved[0].to, sq("d5"));
    }
}
