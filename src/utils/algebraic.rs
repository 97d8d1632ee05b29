//! Coordinate conventions for squares.
//!
//! Two zero-based conventions are in use and are kept as separate types:
//!
//! * [`Coords`] follows the placement text: `col = file - 'a'`,
//!   `row = 8 - rank`, so row 0 is rank 8 (top of a white-oriented board).
//! * [`Pos`] follows geometry: `x = file - 'a'`, `y = rank - 1`, so y grows
//!   towards black. The mobility predicates work in this space.

use crate::board_state::square::Square;

/// Placement-text coordinates (`row == 0` is rank 8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coords {
    pub col: i8,
    pub row: i8,
}

/// Geometric position (`y == 0` is rank 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i8,
    pub y: i8,
}

#[inline]
pub fn square_to_coords(square: Square) -> Coords {
    Coords {
        col: square.file() as i8,
        row: 7 - square.rank() as i8,
    }
}

#[inline]
pub fn coords_to_square(coords: Coords) -> Option<Square> {
    if !(0..8).contains(&coords.col) || !(0..8).contains(&coords.row) {
        return None;
    }
    Square::from_file_rank(coords.col as u8, (7 - coords.row) as u8)
}

#[inline]
pub fn square_to_pos(square: Square) -> Pos {
    Pos {
        x: square.file() as i8,
        y: square.rank() as i8,
    }
}

#[inline]
pub fn pos_to_square(pos: Pos) -> Option<Square> {
    if !(0..8).contains(&pos.x) || !(0..8).contains(&pos.y) {
        return None;
    }
    Square::from_file_rank(pos.x as u8, pos.y as u8)
}

/// Convert placement-text coordinates to geometric ones.
#[inline]
pub fn coords_to_pos(coords: Coords) -> Pos {
    Pos {
        x: coords.col,
        y: 7 - coords.row,
    }
}
