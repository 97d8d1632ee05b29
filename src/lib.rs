//! Crate root module declarations for the Plum board-state engine.
//!
//! This file exposes the board model (squares, pieces, the piece-identity
//! store), the move primitives and castle resolver, the premove destination
//! generator, identity reconciliation, the board session and the text
//! utilities so presentation layers, tests, and benches can import stable
//! module paths.

pub mod config;
pub mod errors;

pub mod board_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod piece_store;
    pub mod square;
}

pub mod moves {
    pub mod apply_move;
    pub mod castle;
    pub mod move_descriptions;
}

pub mod premove {
    pub mod mobility;
    pub mod premove_generator;
}

pub mod reconcile {
    pub mod identity_reconciler;
    pub mod transition;
}

pub mod session {
    pub mod chess_board;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod render_board_state;
    pub mod validations;
}
