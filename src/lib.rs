//! Crate root module declarations for the autoplay chess project.
//!
//! Exposes the rules engine (game state, move generation, outcome
//! detection), the move policies, the game session state machine, and the
//! notation helpers so the binary, tests, and benches share stable paths.

pub mod errors;

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
}

pub mod moves {
    pub mod attack_tables;
    pub mod chess_move;
    pub mod move_record;
}

pub mod move_generation {
    pub mod game_outcome;
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_king;
    pub mod legal_moves_pawn;
    pub mod legal_moves_pieces;
    pub mod perft;
}

pub mod engines {
    pub mod engine_greedy;
    pub mod engine_random;
    pub mod engine_trait;
}

pub mod session {
    pub mod game_session;
    pub mod session_config;
    pub mod session_runner;
    pub mod snapshot;
    pub mod tick_queue;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
    pub mod pgn;
    pub mod render_game_state;
    pub mod san;
}
