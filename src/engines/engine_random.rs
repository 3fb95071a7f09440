//! Uniform random policy.
//!
//! Selects uniformly from legal moves; useful as a weaker opponent and for
//! stress-testing the rules engine with arbitrary playouts.

use rand::prelude::IndexedRandom;
use rand::Rng;

use crate::engines::engine_trait::MovePolicy;
use crate::errors::{GameError, GameResult};
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

pub struct UniformRandomPolicy<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformRandomPolicy<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng + Send> MovePolicy for UniformRandomPolicy<R> {
    fn name(&self) -> &str {
        "random"
    }

    fn choose_move(&mut self, legal_moves: &[Move], _game_state: &GameState) -> GameResult<Move> {
        legal_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::EmptyMoveSet)
    }
}
