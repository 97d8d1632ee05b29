//! Property-based tests for the board-state engine.
//!
//! Random placements and random move lists check the codec round trip, the
//! dual-map invariant of the piece store and identity uniqueness after
//! reconciliation.

use std::collections::BTreeSet;

use plum_board::board_state::chess_rules::STARTING_POSITION_FEN;
use plum_board::board_state::chess_types::{Color, Piece, PieceIndex, Role};
use plum_board::board_state::piece_store::{FreeIndexPool, IndexAllocator, PositionMap};
use plum_board::board_state::square::Square;
use plum_board::moves::apply_move::apply_move;
use plum_board::premove::premove_generator::generate_destinations;
use plum_board::reconcile::identity_reconciler::reconcile;
use plum_board::utils::fen_generator::encode;
use plum_board::utils::fen_parser::{decode, decode_placement, try_decode_placement};
use proptest::prelude::*;

fn arb_square() -> impl Strategy<Value = Square> {
    (0u8..64).prop_map(|index| Square::from_index(index).expect("index below 64"))
}

fn arb_piece() -> impl Strategy<Value = Piece> {
    let color = prop_oneof![Just(Color::White), Just(Color::Black)];
    let role = prop_oneof![
        Just(Role::Pawn),
        Just(Role::Knight),
        Just(Role::Bishop),
        Just(Role::Rook),
        Just(Role::Queen),
        Just(Role::King),
    ];
    (color, role).prop_map(|(color, role)| Piece::new(color, role))
}

fn arb_position() -> impl Strategy<Value = PositionMap> {
    proptest::collection::btree_map(arb_square(), arb_piece(), 0..40)
}

proptest! {
    #[test]
    fn codec_round_trip(position in arb_position()) {
        let text = encode(&position);
        prop_assert_eq!(&decode_placement(&text), &position);
        prop_assert_eq!(&try_decode_placement(&text).expect("encoded text is strict"), &position);

        let decoded = decode(&text);
        prop_assert_eq!(decoded.piece_count as usize, position.len());
        prop_assert_eq!(decoded.store.position(), decode(&encode(&decoded.store)).store.position());
        prop_assert!(decoded.store.verify().is_ok());
    }

    #[test]
    fn store_invariant_survives_any_move_list(
        moves in proptest::collection::vec((arb_square(), arb_square()), 0..80)
    ) {
        let decoded = decode(STARTING_POSITION_FEN);
        let mut store = decoded.store;
        let mut pool = FreeIndexPool::new();

        for (from, to) in moves {
            let occupied_before = store.len();
            let capture = from != to && store.is_occupied(from) && store.is_occupied(to);

            apply_move(&mut store, &mut pool, from, to);

            prop_assert!(store.verify().is_ok());
            prop_assert_eq!(store.len() + capture as usize, occupied_before);
            prop_assert_eq!(store.len() + pool.len(), decoded.piece_count as usize);
            for index in pool.iter() {
                prop_assert!(store.by_index(index).is_none());
            }
        }
    }

    #[test]
    fn reconciliation_never_duplicates_identities(
        current in arb_position(),
        target in arb_position(),
        released in proptest::collection::vec(0u32..80, 0..6),
    ) {
        let decoded = decode(&encode(&current));
        let mut allocator = IndexAllocator::new(decoded.piece_count);
        allocator.release_all(released.iter().copied());
        let next_before = allocator.next_index();

        let result = reconcile(&decoded.store, &mut allocator, &target);

        prop_assert!(result.store.verify().is_ok());
        prop_assert_eq!(result.store.position(), target.clone());

        let assigned: Vec<PieceIndex> = result.store.iter().map(|(_, entry)| entry.index).collect();
        let unique: BTreeSet<PieceIndex> = assigned.iter().copied().collect();
        prop_assert_eq!(unique.len(), assigned.len());

        for index in &result.orphaned {
            prop_assert!(!unique.contains(index));
            prop_assert!(decoded.store.by_index(*index).is_some());
        }
        for (square, entry) in result.store.iter() {
            match decoded.store.by_index(entry.index) {
                Some(old) => prop_assert_eq!(old.piece, entry.piece),
                None => prop_assert!(
                    released.contains(&entry.index) || entry.index >= next_before,
                    "identity {} on {} came from nowhere", entry.index, square
                ),
            }
        }
    }

    #[test]
    fn mobility_never_includes_the_origin(position in arb_position(), allow_castle in any::<bool>()) {
        let decoded = decode(&encode(&position));
        for (square, _) in decoded.store.iter() {
            let destinations = generate_destinations(&decoded.store, square, allow_castle);
            prop_assert!(!destinations.contains(&square));
            let unique: BTreeSet<Square> = destinations.iter().copied().collect();
            prop_assert_eq!(unique.len(), destinations.len());
        }
    }
}
