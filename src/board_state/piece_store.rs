//! Piece-identity store.
//!
//! `PieceStore` keeps two maps that must stay exact inverses of each other:
//! the board map (square -> piece + index) and the index map
//! (index -> piece + square). Neither map is exposed for editing; the only
//! mutation paths are the crate-internal `place`/`take` pair used by the
//! codec, the reconciler and `moves::apply_move`.
//!
//! Identities are handed out by an [`IndexAllocator`], which prefers released
//! identities from its [`FreeIndexPool`] over fresh ones.

use std::collections::{BTreeMap, VecDeque};

use tracing::warn;

use crate::board_state::chess_types::{IndexedPiece, Piece, PieceIndex, PlacedPiece};
use crate::board_state::square::Square;
use crate::errors::{BoardError, Result};

/// A position without identities: square -> piece.
pub type PositionMap = BTreeMap<Square, Piece>;

/// Read access to "which piece stands on this square", shared by stores and
/// plain position maps.
pub trait PieceLookup {
    fn piece_at(&self, square: Square) -> Option<Piece>;
}

impl PieceLookup for PositionMap {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.get(&square).copied()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PieceStore {
    board: BTreeMap<Square, IndexedPiece>,
    indices: BTreeMap<PieceIndex, PlacedPiece>,
}

impl PieceStore {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<&IndexedPiece> {
        self.board.get(&square)
    }

    #[inline]
    pub fn by_index(&self, index: PieceIndex) -> Option<&PlacedPiece> {
        self.indices.get(&index)
    }

    #[inline]
    pub fn is_occupied(&self, square: Square) -> bool {
        self.board.contains_key(&square)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.board.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.board.is_empty()
    }

    /// Board map entries in square order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, &IndexedPiece)> {
        self.board.iter().map(|(square, piece)| (*square, piece))
    }

    /// Index map entries in index order.
    pub fn iter_indices(&self) -> impl Iterator<Item = (PieceIndex, &PlacedPiece)> {
        self.indices.iter().map(|(index, piece)| (*index, piece))
    }

    /// The position with identities stripped.
    pub fn position(&self) -> PositionMap {
        self.board
            .iter()
            .map(|(square, entry)| (*square, entry.piece))
            .collect()
    }

    /// Check that the board map and the index map are exact inverses.
    pub fn verify(&self) -> Result<()> {
        for (square, entry) in &self.board {
            let broken = |reason| BoardError::BrokenInvariant {
                square: *square,
                index: entry.index,
                reason,
            };
            let placed = self
                .indices
                .get(&entry.index)
                .ok_or_else(|| broken("index missing from index map"))?;
            if placed.square != *square {
                return Err(broken("index map points at another square"));
            }
            if placed.piece != entry.piece {
                return Err(broken("maps disagree on the piece"));
            }
        }

        if let Some((index, placed)) = self
            .indices
            .iter()
            .find(|(index, placed)| self.board.get(&placed.square).map(|e| e.index) != Some(**index))
        {
            return Err(BoardError::BrokenInvariant {
                square: placed.square,
                index: *index,
                reason: "index map entry has no board map counterpart",
            });
        }

        Ok(())
    }

    /// Put `piece` with `index` on `square` in both maps.
    ///
    /// Callers guarantee that neither the square nor the index is in use.
    pub(crate) fn place(&mut self, square: Square, piece: Piece, index: PieceIndex) {
        debug_assert!(!self.board.contains_key(&square));
        debug_assert!(!self.indices.contains_key(&index));
        self.board.insert(square, IndexedPiece { piece, index });
        self.indices.insert(index, PlacedPiece { piece, square });
    }

    /// Remove whatever stands on `square` from both maps.
    pub(crate) fn take(&mut self, square: Square) -> Option<IndexedPiece> {
        let entry = self.board.remove(&square)?;
        self.indices.remove(&entry.index);
        Some(entry)
    }
}

impl PieceLookup for PieceStore {
    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.get(&square).map(|entry| entry.piece)
    }
}

/// Released identities, reused earliest-first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FreeIndexPool {
    queue: VecDeque<PieceIndex>,
}

impl FreeIndexPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if the identity was already free.
    pub fn insert(&mut self, index: PieceIndex) -> bool {
        if self.queue.contains(&index) {
            return false;
        }
        self.queue.push_back(index);
        true
    }

    pub fn pop_earliest(&mut self) -> Option<PieceIndex> {
        self.queue.pop_front()
    }

    pub fn remove(&mut self, index: PieceIndex) -> bool {
        match self.queue.iter().position(|free| *free == index) {
            Some(at) => {
                self.queue.remove(at);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, index: PieceIndex) -> bool {
        self.queue.contains(&index)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Free identities in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = PieceIndex> + '_ {
        self.queue.iter().copied()
    }
}

/// Free pool plus the counter for never-allocated identities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexAllocator {
    free: FreeIndexPool,
    next: PieceIndex,
}

impl IndexAllocator {
    /// Allocator whose fresh identities start at `next`.
    pub fn new(next: PieceIndex) -> Self {
        Self {
            free: FreeIndexPool::new(),
            next,
        }
    }

    /// Earliest released identity, else a fresh one.
    pub fn allocate(&mut self) -> PieceIndex {
        if let Some(index) = self.free.pop_earliest() {
            return index;
        }
        let index = self.next;
        self.next += 1;
        index
    }

    /// Return `index` to the free pool. Identities at or past the fresh
    /// counter were never handed out and are ignored.
    pub fn release(&mut self, index: PieceIndex) -> bool {
        if index >= self.next {
            warn!(index, next = self.next, "release of unallocated identity ignored");
            return false;
        }
        self.free.insert(index)
    }

    pub fn release_all(&mut self, indices: impl IntoIterator<Item = PieceIndex>) {
        for index in indices {
            self.release(index);
        }
    }

    #[inline]
    pub fn next_index(&self) -> PieceIndex {
        self.next
    }

    #[inline]
    pub fn free_pool(&self) -> &FreeIndexPool {
        &self.free
    }

    #[inline]
    pub fn free_pool_mut(&mut self) -> &mut FreeIndexPool {
        &mut self.free
    }
}
