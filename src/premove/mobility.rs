//! Piece-shape predicates for premove destinations.
//!
//! Each predicate answers "could this piece reach `to` from `from` on an empty
//! board?" in geometric (`Pos`) space. Sliders are not blocked by pieces in
//! between: a premove is re-validated by the rules engine when it is played.

use crate::board_state::chess_rules::{
    KINGSIDE_KING_TARGET_FILE, KINGSIDE_ROOK_FILE, KING_START_FILE, QUEENSIDE_KING_TARGET_FILE,
    QUEENSIDE_ROOK_FILE,
};
use crate::board_state::chess_types::{Color, Role};
use crate::utils::algebraic::Pos;

/// Geometry facts about the king's side that the king predicate needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleContext {
    pub allow_castle: bool,
    /// Same-colour rook on the back rank's `a` file.
    pub queenside_rook: bool,
    /// Same-colour rook on the back rank's `h` file.
    pub kingside_rook: bool,
}

#[inline]
fn diff(a: i8, b: i8) -> i8 {
    (a - b).abs()
}

pub fn pawn(color: Color, from: Pos, to: Pos) -> bool {
    if diff(from.x, to.x) > 1 {
        return false;
    }
    match color {
        Color::White => to.y == from.y + 1 || (from.y <= 1 && to.y == from.y + 2 && from.x == to.x),
        Color::Black => to.y == from.y - 1 || (from.y >= 6 && to.y == from.y - 2 && from.x == to.x),
    }
}

pub fn knight(from: Pos, to: Pos) -> bool {
    let dx = diff(from.x, to.x);
    let dy = diff(from.y, to.y);
    (dx == 1 && dy == 2) || (dx == 2 && dy == 1)
}

pub fn bishop(from: Pos, to: Pos) -> bool {
    diff(from.x, to.x) == diff(from.y, to.y)
}

pub fn rook(from: Pos, to: Pos) -> bool {
    from.x == to.x || from.y == to.y
}

pub fn queen(from: Pos, to: Pos) -> bool {
    bishop(from, to) || rook(from, to)
}

pub fn king(color: Color, castle: CastleContext, from: Pos, to: Pos) -> bool {
    if diff(from.x, to.x) < 2 && diff(from.y, to.y) < 2 {
        return true;
    }
    if !castle.allow_castle || from.y != to.y || from.y != color.back_rank() as i8 {
        return false;
    }

    let two_square = from.x == KING_START_FILE as i8
        && ((to.x == QUEENSIDE_KING_TARGET_FILE as i8 && castle.queenside_rook)
            || (to.x == KINGSIDE_KING_TARGET_FILE as i8 && castle.kingside_rook));
    let rook_square = (to.x == QUEENSIDE_ROOK_FILE as i8 && castle.queenside_rook)
        || (to.x == KINGSIDE_ROOK_FILE as i8 && castle.kingside_rook);

    two_square || rook_square
}

/// Dispatch to the predicate for `role`.
pub fn reaches(role: Role, color: Color, castle: CastleContext, from: Pos, to: Pos) -> bool {
    match role {
        Role::Pawn => pawn(color, from, to),
        Role::Knight => knight(from, to),
        Role::Bishop => bishop(from, to),
        Role::Rook => rook(from, to),
        Role::Queen => queen(from, to),
        Role::King => king(color, castle, from, to),
    }
}
