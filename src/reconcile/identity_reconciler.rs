//! Identity reconciliation.
//!
//! Given the store currently shown and a target position without identities,
//! build a store over exactly the target's squares that keeps as many of the
//! current identities as possible, so every surviving piece can be animated
//! from its old square to its new one.
//!
//! The assignment is greedy and runs in two passes over a working copy of the
//! current board map (the "pool"), both in square order:
//!
//! 1. a target square whose pool entry has the same colour and role keeps
//!    that identity;
//! 2. every other target square takes the first pool entry of the same colour
//!    and role, wherever it stands, or a new identity from the allocator.
//!
//! This is not a minimum-displacement matching. With several interchangeable
//! pieces moving at once the pairing follows pool order. Identities left in
//! the pool are returned as `orphaned` and are *not* released here.

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::board_state::chess_types::{IndexedPiece, PieceIndex};
use crate::board_state::piece_store::{IndexAllocator, PieceStore, PositionMap};
use crate::board_state::square::Square;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Store over exactly the target's squares.
    pub store: PieceStore,
    /// Current identities with no counterpart in the target, in square order.
    pub orphaned: Vec<PieceIndex>,
}

pub fn reconcile(
    current: &PieceStore,
    allocator: &mut IndexAllocator,
    target: &PositionMap,
) -> Reconciliation {
    let mut pool: BTreeMap<Square, IndexedPiece> =
        current.iter().map(|(square, entry)| (square, *entry)).collect();
    let mut resolved: BTreeMap<Square, IndexedPiece> = BTreeMap::new();

    for (square, piece) in target {
        if pool.get(square).map_or(false, |entry| entry.piece == *piece) {
            if let Some(entry) = pool.remove(square) {
                resolved.insert(*square, entry);
            }
        }
    }
    let retained = resolved.len();

    let mut reused = 0usize;
    let mut allocated = 0usize;
    for (square, piece) in target {
        if resolved.contains_key(square) {
            continue;
        }

        let donor = pool
            .iter()
            .find(|(_, entry)| entry.piece == *piece)
            .map(|(donor_square, _)| *donor_square);

        let entry = match donor.and_then(|donor_square| pool.remove(&donor_square)) {
            Some(entry) => {
                trace!(%square, index = entry.index, "identity reused across squares");
                reused += 1;
                entry
            }
            None => {
                allocated += 1;
                IndexedPiece {
                    piece: *piece,
                    index: allocate_unassigned(current, allocator),
                }
            }
        };
        resolved.insert(*square, entry);
    }

    let mut store = PieceStore::new();
    for (square, entry) in resolved {
        store.place(square, entry.piece, entry.index);
    }
    let orphaned: Vec<PieceIndex> = pool.values().map(|entry| entry.index).collect();

    debug!(
        retained,
        reused,
        allocated,
        orphaned = orphaned.len(),
        "position reconciled"
    );

    Reconciliation { store, orphaned }
}

/// Next identity from the allocator that `current` is not using.
///
/// A free pool entry still assigned in `current` is stale and is dropped.
fn allocate_unassigned(current: &PieceStore, allocator: &mut IndexAllocator) -> PieceIndex {
    loop {
        let index = allocator.allocate();
        if current.by_index(index).is_none() {
            return index;
        }
        debug!(index, "skipping stale free identity");
    }
}
