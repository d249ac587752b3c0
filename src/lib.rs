//! Crate root module declarations for the tile chess rules and look-ahead engine.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! search, engines, the threaded play session, and utility helpers) so the
//! binary, tests, and benchmarks can import stable module paths.

pub mod game_state {
    pub mod board;
    pub mod castling_record;
    pub mod chess_errors;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_manager;
    pub mod metrics;
    pub mod piece;
}

pub mod moves {
    pub mod chess_move;
    pub mod move_descriptions;
}

pub mod move_generation {
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod perft;
}

pub mod search {
    pub mod alpha_beta;
    pub mod board_scoring;
    pub mod minimax;
    pub mod search_state;
}

pub mod engines {
    pub mod engine_random;
    pub mod engine_search;
    pub mod engine_trait;
}

pub mod session {
    pub mod human_player;
    pub mod shared_game;
    pub mod turn_scheduler;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
    pub mod render_game_state;
}
