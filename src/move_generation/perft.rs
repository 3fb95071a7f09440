//! Perft node counting for validating the legal move generator.
//!
//! Leaf statistics are tallied per move kind so a mismatch against published
//! tables points at the faulty rule (captures, en-passant, castling,
//! promotions, checks).

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::MoveGenerator;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
}

pub fn perft<G: MoveGenerator>(generator: &G, game_state: &GameState, depth: u8) -> PerftCounts {
    let mut counts = PerftCounts::default();
    if depth == 0 {
        counts.nodes = 1;
        return counts;
    }
    perft_recurse(generator, game_state, depth, &mut counts);
    counts
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
    counts: &mut PerftCounts,
) {
    for mv in generator.generate_legal_moves(game_state) {
        let next = apply_move(game_state, mv);
        if depth > 1 {
            perft_recurse(generator, &next, depth - 1, counts);
            continue;
        }

        counts.nodes += 1;
        if mv.is_capture() {
            counts.captures += 1;
        }
        if mv.en_passant {
            counts.en_passant += 1;
        }
        if mv.castle.is_some() {
            counts.castles += 1;
        }
        if mv.promotion.is_some() {
            counts.promotions += 1;
        }
        if next.is_in_check() {
            counts.checks += 1;
        }
    }
}
