//! Store mutation primitives.
//!
//! These are the only functions that edit an existing `PieceStore`. None of
//! them checks legality, and all of them are no-ops when the origin square is
//! empty.

use tracing::{debug, trace};

use crate::board_state::chess_types::{IndexedPiece, Piece, PieceIndex};
use crate::board_state::piece_store::{FreeIndexPool, PieceStore};
use crate::board_state::square::Square;
use crate::moves::move_descriptions::MoveDescriptor;

/// Move the occupant of `from` to `to`, releasing the identity of anything
/// standing on `to`.
///
/// Nothing about the capture is returned; read `to` before calling if you
/// need it.
pub fn apply_move(store: &mut PieceStore, pool: &mut FreeIndexPool, from: Square, to: Square) {
    let Some(moving) = store.get(from).copied() else {
        trace!(%from, %to, "no piece on origin square; move ignored");
        return;
    };
    if from == to {
        return;
    }

    if let Some(captured) = store.take(to) {
        pool.insert(captured.index);
        debug!(%to, index = captured.index, "captured piece released its identity");
    }

    store.take(from);
    store.place(to, moving.piece, moving.index);
    trace!(%from, %to, index = moving.index, "piece moved");
}

/// Apply every rendered step of `steps` in order.
pub fn apply_sequence(store: &mut PieceStore, pool: &mut FreeIndexPool, steps: &[MoveDescriptor]) {
    for step in steps.iter().filter(|step| step.render) {
        apply_move(store, pool, step.from, step.to);
    }
}

/// Take a piece off the board and release its identity.
pub fn remove_piece(
    store: &mut PieceStore,
    pool: &mut FreeIndexPool,
    square: Square,
) -> Option<IndexedPiece> {
    let removed = store.take(square)?;
    pool.insert(removed.index);
    debug!(%square, index = removed.index, "piece removed from board");
    Some(removed)
}

/// Put a new piece carrying `index` on `square`, releasing the identity of
/// any piece it replaces.
pub fn put_piece(
    store: &mut PieceStore,
    pool: &mut FreeIndexPool,
    square: Square,
    piece: Piece,
    index: PieceIndex,
) {
    if let Some(replaced) = store.take(square) {
        pool.insert(replaced.index);
    }
    store.place(square, piece, index);
    debug!(%square, index, "piece added to board");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_state::chess_rules::STARTING_POSITION_FEN;
    use crate::board_state::chess_types::{Color, Role};
    use crate::utils::fen_parser::decode;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn pawn_push_moves_identity_without_capture() {
        let mut store = decode(STARTING_POSITION_FEN).store;
        let mut pool = FreeIndexPool::new();
        let pawn_index = store.get(sq("e2")).unwrap().index;

        apply_move(&mut store, &mut pool, sq("e2"), sq("e4"));

        assert!(store.get(sq("e2")).is_none());
        assert_eq!(store.get(sq("e4")).unwrap().index, pawn_index);
        assert_eq!(store.by_index(pawn_index).unwrap().square, sq("e4"));
        assert!(pool.is_empty());
        assert!(store.verify().is_ok());
    }

    #[test]
    fn capture_releases_only_the_captured_identity() {
        let mut store = decode("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR").store;
        let mut pool = FreeIndexPool::new();
        let before = store.clone();
        let captured = store.get(sq("e5")).unwrap().index;
        let capturer = store.get(sq("e4")).unwrap().index;

        apply_move(&mut store, &mut pool, sq("e4"), sq("e5"));

        assert_eq!(pool.iter().collect::<Vec<_>>(), vec![captured]);
        assert_eq!(store.len(), 31);
        assert!(store.by_index(captured).is_none());
        assert_eq!(store.by_index(capturer).unwrap().square, sq("e5"));

        let survivors = before
            .iter_indices()
            .filter(|(index, _)| store.by_index(*index).is_some())
            .count();
        assert_eq!(survivors, 31);
        let unmoved = before
            .iter_indices()
            .filter(|(_, placed)| store.get(placed.square).map(|e| e.piece) == Some(placed.piece))
            .filter(|(index, _)| *index != captured && *index != capturer)
            .count();
        assert_eq!(unmoved, 30);
        assert!(store.verify().is_ok());
    }

    #[test]
    fn empty_origin_and_null_move_are_no_ops() {
        let mut store = decode(STARTING_POSITION_FEN).store;
        let mut pool = FreeIndexPool::new();
        let before = store.clone();

        apply_move(&mut store, &mut pool, sq("e4"), sq("e5"));
        apply_move(&mut store, &mut pool, sq("e2"), sq("e2"));

        assert_eq!(store, before);
        assert!(pool.is_empty());
    }

    #[test]
    fn placeholder_steps_are_skipped() {
        let mut store = decode("4k3/8/8/8/8/8/8/R3K2R").store;
        let mut pool = FreeIndexPool::new();
        let steps = [
            MoveDescriptor {
                from: sq("e1"),
                to: sq("g1"),
                render: true,
            },
            MoveDescriptor::hold(sq("g1")),
            MoveDescriptor {
                from: sq("a1"),
                to: sq("b1"),
                render: false,
            },
            MoveDescriptor {
                from: sq("h1"),
                to: sq("f1"),
                render: true,
            },
        ];

        apply_sequence(&mut store, &mut pool, &steps);

        assert!(store.get(sq("g1")).unwrap().piece.is(Color::White, Role::King));
        assert!(store.get(sq("f1")).unwrap().piece.is(Color::White, Role::Rook));
        assert!(store.get(sq("a1")).is_some());
        assert!(store.get(sq("b1")).is_none());
    }

    #[test]
    fn putting_a_piece_replaces_the_occupant() {
        let mut store = decode("4k3/8/8/8/8/8/8/4K3").store;
        let mut pool = FreeIndexPool::new();

        put_piece(&mut store, &mut pool, sq("e8"), Piece::new(Color::Black, Role::Queen), 2);

        assert!(store.get(sq("e8")).unwrap().piece.is(Color::Black, Role::Queen));
        assert!(pool.contains(0));
        assert!(store.by_index(0).is_none());
        assert!(store.verify().is_ok());
    }

    #[test]
    fn removal_releases_identity() {
        let mut store = decode(STARTING_POSITION_FEN).store;
        let mut pool = FreeIndexPool::new();

        let removed = remove_piece(&mut store, &mut pool, sq("d1")).expect("queen on d1");
        assert!(removed.piece.is(Color::White, Role::Queen));
        assert!(pool.contains(removed.index));
        assert!(remove_piece(&mut store, &mut pool, sq("d1")).is_none());
        assert_eq!(store.len(), 31);
        assert!(store.verify().is_ok());
    }
}
