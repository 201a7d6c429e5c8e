//! Crate root module declarations for the Plum Draughts rules engine.
//!
//! This file exposes the top-level subsystems (board geometry, positions,
//! move generation, moves and their notation, interactive move picking,
//! piece traces and utility helpers) so binaries, tests and benchmarks can
//! import stable module paths.

pub mod geometry {
    pub mod bitboard;
    pub mod direction;
    pub mod square;
}

pub mod game_state {
    pub mod draughts_rules;
    pub mod draughts_types;
    pub mod position;
}

pub mod moves {
    pub mod draughts_move;
    pub mod move_notation;
    pub mod move_path;
}

pub mod move_generation {
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_man;
    pub mod perft;
}

pub mod interaction {
    pub mod move_picker;
}

pub mod trace {
    pub mod piece_trace;
    pub mod trace;
}

pub mod utils {
    pub mod position_notation;
    pub mod random_game;
    pub mod render_position;
}
