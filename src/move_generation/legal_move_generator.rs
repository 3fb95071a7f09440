//! Full legal move generation pipeline.
//!
//! Runs piece-wise pseudo-legal generation, applies each candidate to a
//! scratch board, and drops any that leave the mover's own king attacked.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_pieces::{
    generate_bishop_moves, generate_knight_moves, generate_queen_moves, generate_rook_moves,
};
use crate::moves::chess_move::Move;

/// Source of legal moves for a position. An empty result is a terminal
/// signal (checkmate or stalemate), never an error.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<Move>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, game_state: &GameState) -> Vec<Move> {
        let pseudo = generate_pseudo_legal_moves(game_state);
        let mover = game_state.side_to_move;

        pseudo
            .into_iter()
            .filter(|mv| !is_king_in_check(&apply_move(game_state, *mv), mover))
            .collect()
    }
}

/// Legal moves for the side to move.
#[inline]
pub fn legal_moves(game_state: &GameState) -> Vec<Move> {
    LegalMoveGenerator.generate_legal_moves(game_state)
}

pub fn generate_pseudo_legal_moves(game_state: &GameState) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(64);

    generate_pawn_moves(game_state, &mut pseudo);
    generate_knight_moves(game_state, &mut pseudo);
    generate_bishop_moves(game_state, &mut pseudo);
    generate_rook_moves(game_state, &mut pseudo);
    generate_queen_moves(game_state, &mut pseudo);
    generate_king_moves(game_state, &mut pseudo);

    pseudo
}

#[cfg(test)]
mod tests {
    use super::{generate_pseudo_legal_moves, legal_moves};
    use crate::game_state::game_state::GameState;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    #[test]
    fn start_position_has_twenty_moves() {
        assert_eq!(legal_moves(&GameState::new_game()).len(), 20);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        // Bishop e2 is pinned to the king by the rook on e8.
        let game = GameState::from_fen("4r1k1/8/8/8/8/8/4B3/4K3 w - - 0 1").expect("fen");
        let moves = legal_moves(&game);
        assert!(moves.iter().all(|m| m.from != 12));
        assert!(generate_pseudo_legal_moves(&game).iter().any(|m| m.from == 12));
    }

    #[test]
    fn in_check_only_evasions_remain() {
        // Fool's mate: queen h4 checks e1 and nothing can interpose.
        let game = GameState::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
            .expect("fen");
        assert!(legal_moves(&game).is_empty());

        let game = GameState::from_fen("4k3/8/8/8/7q/8/8/4K3 w - - 0 1").expect("fen");
        let moves = legal_moves(&game);
        assert!(!moves.is_empty());
        for mv in &moves {
            let next = crate::move_generation::legal_move_apply::apply_move(&game, *mv);
            assert!(!crate::move_generation::legal_move_checks::is_king_in_check(
                &next,
                crate::game_state::chess_types::Color::Light
            ));
        }
    }

    #[test]
    fn en_passant_that_exposes_king_is_rejected() {
        // Capturing e.p. would clear the fifth rank between Ka5 and the rook on h5.
        let game = GameState::from_fen("8/8/8/KPp4r/8/8/8/6k1 w - c6 0 2").expect("fen");
        assert!(legal_moves(&game).iter().all(|m| !m.en_passant));
        assert!(long_algebraic_to_move("b5c6", &game).is_err());
    }
}
