//! Shallow greedy policy: take something if possible, otherwise lean toward
//! the center some of the time, otherwise play anything.
//!
//! No lookahead and no evaluation; ties inside a tier are broken uniformly.

use rand::prelude::IndexedRandom;
use rand::Rng;
use tracing::trace;

use crate::engines::engine_trait::MovePolicy;
use crate::errors::{GameError, GameResult};
use crate::game_state::chess_rules::CENTER_SQUARES;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

/// Probability of restricting a quiet move to the center squares.
pub const DEFAULT_CENTER_BIAS: f64 = 0.3;

pub struct GreedyCapturePolicy<R: Rng> {
    rng: R,
    center_bias: f64,
}

impl<R: Rng> GreedyCapturePolicy<R> {
    pub fn new(rng: R) -> Self {
        Self::with_center_bias(rng, DEFAULT_CENTER_BIAS)
    }

    /// `center_bias` is clamped to `0.0..=1.0`; NaN falls back to the default.
    pub fn with_center_bias(rng: R, center_bias: f64) -> Self {
        let center_bias = if center_bias.is_nan() {
            DEFAULT_CENTER_BIAS
        } else {
            center_bias.clamp(0.0, 1.0)
        };
        Self { rng, center_bias }
    }
}

impl<R: Rng + Send> MovePolicy for GreedyCapturePolicy<R> {
    fn name(&self) -> &str {
        "greedy"
    }

    fn choose_move(&mut self, legal_moves: &[Move], _game_state: &GameState) -> GameResult<Move> {
        if legal_moves.is_empty() {
            return Err(GameError::EmptyMoveSet);
        }

        let captures: Vec<Move> = legal_moves.iter().copied().filter(Move::is_capture).collect();
        if let Some(mv) = captures.choose(&mut self.rng) {
            trace!(candidates = captures.len(), "greedy policy: capture tier");
            return Ok(*mv);
        }

        if self.rng.random_bool(self.center_bias) {
            let central: Vec<Move> = legal_moves
                .iter()
                .copied()
                .filter(|mv| CENTER_SQUARES.contains(&mv.to))
                .collect();
            if let Some(mv) = central.choose(&mut self.rng) {
                trace!(candidates = central.len(), "greedy policy: center tier");
                return Ok(*mv);
            }
        }

        legal_moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(GameError::EmptyMoveSet)
    }
}
