//! Move policy abstraction used by the game session.
//!
//! A policy picks one move from a non-empty legal move list. Policies are
//! swappable at runtime behind `Box<dyn MovePolicy>`.

use std::fmt;
use std::str::FromStr;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::engines::engine_greedy::GreedyCapturePolicy;
use crate::engines::engine_random::UniformRandomPolicy;
use crate::errors::GameResult;
use crate::game_state::game_state::GameState;
use crate::moves::chess_move::Move;

pub trait MovePolicy: Send {
    fn name(&self) -> &str;

    /// Pick one of `legal_moves`. Returns `GameError::EmptyMoveSet` when the
    /// list is empty; never returns a move outside the list.
    fn choose_move(&mut self, legal_moves: &[Move], game_state: &GameState) -> GameResult<Move>;
}

/// Built-in policies selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyKind {
    #[default]
    Greedy,
    Random,
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(PolicyKind::Greedy),
            "random" => Ok(PolicyKind::Random),
            other => Err(format!("unknown policy '{other}', expected greedy or random")),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyKind::Greedy => write!(f, "greedy"),
            PolicyKind::Random => write!(f, "random"),
        }
    }
}

/// Construct a policy, seeded when `seed` is given and from OS entropy otherwise.
pub fn build_policy(kind: PolicyKind, seed: Option<u64>) -> Box<dyn MovePolicy> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    match kind {
        PolicyKind::Greedy => Box::new(GreedyCapturePolicy::new(rng)),
        PolicyKind::Random => Box::new(UniformRandomPolicy::new(rng)),
    }
}

#[cfg(test)]
mod tests {
    use super::{build_policy, PolicyKind};
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_generator::legal_moves;

    #[test]
    fn parses_policy_names() {
        assert_eq!("greedy".parse::<PolicyKind>(), Ok(PolicyKind::Greedy));
        assert_eq!("Random".parse::<PolicyKind>(), Ok(PolicyKind::Random));
        assert!("minimax".parse::<PolicyKind>().is_err());
    }

    #[test]
    fn seeded_policies_are_reproducible() {
        let game = GameState::new_game();
        let moves = legal_moves(&game);
        for kind in [PolicyKind::Greedy, PolicyKind::Random] {
            let mut a = build_policy(kind, Some(99));
            let mut b = build_policy(kind, Some(99));
            for _ in 0..10 {
                assert_eq!(
                    a.choose_move(&moves, &game).expect("non-empty"),
                    b.choose_move(&moves, &game).expect("non-empty")
                );
            }
        }
    }
}
