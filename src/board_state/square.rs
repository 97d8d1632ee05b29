//! Board squares.
//!
//! A square is packed into a single `u8` with `a1 == 0`, `h1 == 7` and
//! `h8 == 63`. The derived ordering is therefore `a1, b1, ... h1, a2, ... h8`,
//! which is the iteration order of every square-keyed map in the crate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Build a square from zero-based file and rank indices.
    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Option<Square> {
        if file > 7 || rank > 7 {
            None
        } else {
            Some(Square(rank * 8 + file))
        }
    }

    /// Build a square from a raw index (`0..=63`).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Square> {
        if index > 63 {
            None
        } else {
            Some(Square(index))
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Zero-based file (`0 == a`).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Zero-based rank (`0 == rank 1`).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub fn file_char(self) -> char {
        char::from(b'a' + self.file())
    }

    #[inline]
    pub fn rank_char(self) -> char {
        char::from(b'1' + self.rank())
    }

    /// Same rank, different file.
    #[inline]
    pub const fn with_file(self, file: u8) -> Option<Square> {
        Square::from_file_rank(file, self.rank())
    }

    /// All 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for Square {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(BoardError::InvalidSquare(s.to_owned()));
        }

        let file = bytes[0];
        let rank = bytes[1];

        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(BoardError::InvalidSquare(s.to_owned()));
        }

        Ok(Square((rank - b'1') * 8 + (file - b'a')))
    }
}

impl Serialize for Square {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}
