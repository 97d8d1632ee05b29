//! Canonical chess-rule constants.
//!
//! Static literals used to initialize boards and to shape castling.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Zero-based file indices used when castling.
pub const QUEENSIDE_ROOK_FILE: u8 = 0;
pub const QUEENSIDE_ROOK_TARGET_FILE: u8 = 3;
pub const QUEENSIDE_KING_TARGET_FILE: u8 = 2;
pub const KING_START_FILE: u8 = 4;
pub const KINGSIDE_ROOK_TARGET_FILE: u8 = 5;
pub const KINGSIDE_KING_TARGET_FILE: u8 = 6;
pub const KINGSIDE_ROOK_FILE: u8 = 7;
