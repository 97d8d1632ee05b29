//! Board session: the state behind one on-screen board.
//!
//! `ChessBoard` owns two stores that share one identity allocator:
//!
//! * `future` is the committed position. Moves, edits and new positions are
//!   applied to it immediately.
//! * `current` is what the presentation layer is showing. It catches up with
//!   `future` through [`ChessBoard::settle`] once an animation finishes or is
//!   cancelled, and is replaced together with `future` by
//!   [`ChessBoard::set_position`].
//!
//! Move legality is not checked here. The caller supplies the allowed moves
//! through [`MovableConfig`] (or leaves the board free) and this type only
//! records what passes that gate.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::{debug, info};

use crate::board_state::chess_types::{Color, Piece, PieceIndex, Role, ALL_ROLES};
use crate::board_state::piece_store::{IndexAllocator, PieceLookup, PieceStore};
use crate::board_state::square::Square;
use crate::config::{BoardConfig, MovableColor, MovableConfig, PremoveConfig};
use crate::moves::apply_move::{apply_sequence, put_piece, remove_piece};
use crate::moves::castle::resolve_castle;
use crate::moves::move_descriptions::{ChessMove, MoveDescriptor};
use crate::premove::premove_generator::generate_destinations;
use crate::reconcile::identity_reconciler::reconcile;
use crate::reconcile::transition::{transition, Transition};
use crate::utils::fen_generator::encode;
use crate::utils::fen_parser::{decode, decode_placement, resolve_checked_square, CheckState};

/// What `play_move` did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayedMove {
    /// The move as requested.
    pub mv: ChessMove,
    /// Steps applied to the future store, placeholders included.
    pub steps: Vec<MoveDescriptor>,
    /// Piece that stood on the destination; `None` for castles.
    pub captured: Option<Piece>,
}

/// Material balance per colour: for every role, how many more pieces of it
/// this side has. Roles where a side is not ahead are left out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaterialDiff {
    pub white: BTreeMap<Role, u32>,
    pub black: BTreeMap<Role, u32>,
}

#[derive(Debug, Clone)]
pub struct ChessBoard {
    current: PieceStore,
    future: PieceStore,
    allocator: IndexAllocator,
    turn_color: Color,
    check: Option<Square>,
    last_move: Option<ChessMove>,
    selected: Option<Square>,
    auto_castle: bool,
    movable: MovableConfig,
    premove_config: PremoveConfig,
    premove_origin: Option<Square>,
    premove_dests: Vec<Square>,
    premove: Option<ChessMove>,
    premove_color: Option<Color>,
}

impl ChessBoard {
    pub fn new(config: BoardConfig) -> Self {
        let decoded = decode(&config.fen);
        let check = resolve_checked_square(config.check, config.turn_color, &config.fen);
        let selected = config
            .selected
            .filter(|square| decoded.store.is_occupied(*square));

        debug!(
            pieces = decoded.piece_count,
            turn = config.turn_color.name(),
            "board created"
        );

        ChessBoard {
            current: decoded.store.clone(),
            future: decoded.store,
            allocator: IndexAllocator::new(decoded.piece_count),
            turn_color: config.turn_color,
            check,
            last_move: config.last_move,
            selected,
            auto_castle: config.auto_castle,
            movable: config.movable,
            premove_config: config.premove,
            premove_origin: None,
            premove_dests: Vec::new(),
            premove: None,
            premove_color: None,
        }
    }

    /// Whether a user move `from -> to` passes the movable gate.
    ///
    /// Dropping a piece back on its own square is never a move.
    pub fn can_move(&self, from: Square, to: Square) -> bool {
        if from == to {
            return false;
        }
        let Some(entry) = self.future.get(from) else {
            return false;
        };
        if self.movable.free {
            return true;
        }

        let color = entry.piece.color;
        let movable_color = self.movable.color == MovableColor::Both
            || (self.movable.color.is(color) && self.turn_color == color);
        movable_color
            && self
                .movable
                .dests
                .get(&from)
                .map_or(false, |dests| dests.contains(&to))
    }

    /// Play `from -> to` on the future store.
    ///
    /// Returns `None`, changing nothing, when the move does not pass
    /// [`ChessBoard::can_move`]. A king gesture that resolves to a castle is
    /// played as `[king, hold, hold, rook]` when auto-castling is on. The
    /// movable destinations are used up by the move.
    pub fn play_move(&mut self, from: Square, to: Square) -> Option<PlayedMove> {
        if !self.can_move(from, to) {
            debug!(%from, %to, "move refused");
            return None;
        }

        let mv = ChessMove::new(from, to);
        let castle = resolve_castle(from, to, &self.future);
        let (steps, captured) = if self.auto_castle && castle.is_castle {
            (castle.steps(), None)
        } else {
            (vec![MoveDescriptor::play(mv)], self.future.piece_at(to))
        };

        apply_sequence(&mut self.future, self.allocator.free_pool_mut(), &steps);

        self.turn_color = self.turn_color.opposite();
        self.last_move = Some(mv);
        self.check = None;
        self.selected = None;
        self.movable.dests.clear();
        self.clear_premove_destinations();

        info!(%mv, castle = castle.is_castle && self.auto_castle, captured = captured.is_some(), "move played");

        Some(PlayedMove {
            mv,
            steps,
            captured,
        })
    }

    /// Bring the rendered store up to the committed one.
    pub fn settle(&mut self) {
        self.current.clone_from(&self.future);
    }

    /// Replace the whole position, keeping as many identities as possible.
    ///
    /// Identities with no counterpart in the new position are released.
    /// Returns what changed relative to the rendered store.
    pub fn set_position(&mut self, fen: &str) -> Transition {
        let target = decode_placement(fen);
        let result = reconcile(&self.future, &mut self.allocator, &target);
        self.allocator.release_all(result.orphaned.iter().copied());

        let diff = transition(&self.current, &result.store);
        self.current.clone_from(&result.store);
        self.future = result.store;

        if self.selected.map_or(false, |square| !self.future.is_occupied(square)) {
            self.selected = None;
        }
        self.premove = None;
        self.premove_color = None;
        self.clear_premove_destinations();

        debug!(
            moved = diff.moved.len(),
            appeared = diff.appeared.len(),
            vanished = diff.vanished.len(),
            "position replaced"
        );
        diff
    }

    /// Recompute the checked king square from the committed position.
    pub fn set_check(&mut self, check: Option<CheckState>) {
        self.check = resolve_checked_square(check, self.turn_color, &self.fen());
    }

    pub fn set_turn_color(&mut self, color: Color) {
        self.turn_color = color;
    }

    /// Moves the user may play next, keyed by origin.
    pub fn set_movable_dests(&mut self, dests: BTreeMap<Square, Vec<Square>>) {
        self.movable.dests = dests;
    }

    pub fn set_movable(&mut self, movable: MovableConfig) {
        self.movable = movable;
    }

    /// Select `square` if it holds a piece; `None` clears the selection.
    pub fn select(&mut self, square: Option<Square>) {
        self.selected = square.filter(|square| self.future.is_occupied(*square));
    }

    /// Premove destinations for the piece on `square`.
    ///
    /// Only pieces of the side *not* to move get destinations, and only when
    /// premoves are enabled and the piece's colour is exactly the movable one
    /// (`Both` does not count). The result also becomes the active destination
    /// set checked by [`ChessBoard::set_premove`].
    pub fn premove_destinations(&mut self, square: Square) -> Vec<Square> {
        self.clear_premove_destinations();
        if !self.premove_config.enabled {
            return Vec::new();
        }
        let Some(entry) = self.future.get(square) else {
            return Vec::new();
        };
        let color = entry.piece.color;
        if color == self.turn_color || !self.movable.color.is(color) {
            return Vec::new();
        }

        let dests = generate_destinations(&self.future, square, self.premove_config.castle);
        self.premove_origin = Some(square);
        self.premove_dests.clone_from(&dests);
        dests
    }

    /// Queue `from -> to` if it is one of the active premove destinations.
    pub fn set_premove(&mut self, from: Square, to: Square) -> bool {
        if self.premove_origin != Some(from) || !self.premove_dests.contains(&to) {
            return false;
        }
        let mv = ChessMove::new(from, to);
        debug!(%mv, "premove set");
        self.premove = Some(mv);
        self.premove_color = self.future.get(from).map(|entry| entry.piece.color);
        self.clear_premove_destinations();
        true
    }

    pub fn clear_premove(&mut self) {
        self.premove = None;
        self.premove_color = None;
        self.clear_premove_destinations();
    }

    /// Play the queued premove once its side is to move.
    ///
    /// The premove stays queued while the other side is still to move. It is
    /// dropped if its origin no longer holds a piece of the colour that
    /// queued it, or if [`ChessBoard::can_move`] refuses it.
    pub fn play_premove(&mut self) -> Option<PlayedMove> {
        let mv = self.premove?;
        let color = self.premove_color?;
        if self.turn_color != color {
            return None;
        }

        self.premove = None;
        self.premove_color = None;
        let still_there = self
            .future
            .get(mv.from)
            .map_or(false, |entry| entry.piece.color == color);
        if !still_there {
            debug!(%mv, "premove dropped; its piece is gone");
            return None;
        }
        self.play_move(mv.from, mv.to)
    }

    /// Drop-off deletion: take the piece on `square` off both stores.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        let future = remove_piece(&mut self.future, self.allocator.free_pool_mut(), square);
        let current = self.current.take(square);
        if let Some(entry) = current {
            self.release_if_unused(entry.index);
        }
        if self.selected == Some(square) {
            self.selected = None;
        }
        future.or(current).map(|entry| entry.piece)
    }

    /// Put a new piece on `square` in both stores, replacing any occupant.
    pub fn new_piece(&mut self, piece: Piece, square: Square) -> PieceIndex {
        let index = self.fresh_index();
        put_piece(&mut self.future, self.allocator.free_pool_mut(), square, piece, index);
        if let Some(replaced) = self.current.take(square) {
            self.release_if_unused(replaced.index);
        }
        self.current.place(square, piece, index);
        index
    }

    /// Apply a batch of edits: `Some` puts a piece, `None` clears the square.
    pub fn set_pieces(&mut self, changes: impl IntoIterator<Item = (Square, Option<Piece>)>) {
        for (square, change) in changes {
            match change {
                Some(piece) if self.future.piece_at(square) == Some(piece) => {}
                Some(piece) => {
                    self.new_piece(piece, square);
                }
                None => {
                    self.remove_piece(square);
                }
            }
        }
    }

    pub fn material_diff(&self) -> MaterialDiff {
        let mut counts = [[0i64; 6]; 2];
        for (_, entry) in self.future.iter() {
            counts[entry.piece.color.index()][entry.piece.role.index()] += 1;
        }

        let mut diff = MaterialDiff::default();
        for role in ALL_ROLES {
            let balance =
                counts[Color::White.index()][role.index()] - counts[Color::Black.index()][role.index()];
            if balance > 0 {
                diff.white.insert(role, balance as u32);
            } else if balance < 0 {
                diff.black.insert(role, (-balance) as u32);
            }
        }
        diff
    }

    /// Placement text of the committed position.
    pub fn fen(&self) -> String {
        encode(&self.future)
    }

    pub fn current(&self) -> &PieceStore {
        &self.current
    }

    pub fn future(&self) -> &PieceStore {
        &self.future
    }

    pub fn allocator(&self) -> &IndexAllocator {
        &self.allocator
    }

    pub fn turn_color(&self) -> Color {
        self.turn_color
    }

    pub fn check(&self) -> Option<Square> {
        self.check
    }

    pub fn last_move(&self) -> Option<ChessMove> {
        self.last_move
    }

    pub fn selected(&self) -> Option<Square> {
        self.selected
    }

    pub fn premove(&self) -> Option<ChessMove> {
        self.premove
    }

    pub fn movable(&self) -> &MovableConfig {
        &self.movable
    }

    pub fn active_premove_destinations(&self) -> &[Square] {
        &self.premove_dests
    }

    fn clear_premove_destinations(&mut self) {
        self.premove_origin = None;
        self.premove_dests.clear();
    }

    /// Release an identity dropped from the rendered store unless the
    /// committed store still carries it elsewhere.
    fn release_if_unused(&mut self, index: PieceIndex) {
        if self.future.by_index(index).is_none() {
            self.allocator.release(index);
        }
    }

    /// An identity used by neither store.
    ///
    /// Free identities still shown by an unsettled `current` go back to the
    /// pool; they become usable once the board settles.
    fn fresh_index(&mut self) -> PieceIndex {
        let mut shown = Vec::new();
        let index = loop {
            let index = self.allocator.allocate();
            if self.future.by_index(index).is_some() {
                continue;
            }
            if self.current.by_index(index).is_some() {
                shown.push(index);
                continue;
            }
            break index;
        };
        self.allocator.release_all(shown);
        index
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        ChessBoard::new(BoardConfig::default())
    }
}
