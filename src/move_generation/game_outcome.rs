//! Terminal-state detection.
//!
//! Derived from the legal move list of the position plus, for repetition,
//! the keys of every position reached so far in the game.

use serde::Serialize;

use crate::game_state::chess_rules::{FIFTY_MOVE_RULE_HALFMOVES, REPETITION_DRAW_COUNT};
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::{GameState, PositionKey};
use crate::moves::chess_move::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DrawReason {
    FiftyMoveRule,
    InsufficientMaterial,
    ThreefoldRepetition,
}

/// Status of a position from the point of view of the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PositionStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
    Draw(DrawReason),
}

impl PositionStatus {
    #[inline]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            PositionStatus::Checkmate | PositionStatus::Stalemate | PositionStatus::Draw(_)
        )
    }
}

/// Classify `game_state` given its legal moves.
///
/// `position_history` holds the keys of all positions reached in the game,
/// the current one included; pass an empty slice to skip repetition.
/// Checkmate and stalemate take priority over the draw rules.
pub fn evaluate_position(
    game_state: &GameState,
    legal_moves: &[Move],
    position_history: &[PositionKey],
) -> PositionStatus {
    let in_check = game_state.is_in_check();

    if legal_moves.is_empty() {
        return if in_check {
            PositionStatus::Checkmate
        } else {
            PositionStatus::Stalemate
        };
    }

    if let Some(reason) = draw_reason(game_state, position_history) {
        return PositionStatus::Draw(reason);
    }

    if in_check {
        PositionStatus::Check
    } else {
        PositionStatus::Ongoing
    }
}

pub fn draw_reason(game_state: &GameState, position_history: &[PositionKey]) -> Option<DrawReason> {
    if game_state.halfmove_clock >= FIFTY_MOVE_RULE_HALFMOVES {
        return Some(DrawReason::FiftyMoveRule);
    }
    if is_insufficient_material(game_state) {
        return Some(DrawReason::InsufficientMaterial);
    }
    if repetition_count(game_state, position_history) >= REPETITION_DRAW_COUNT {
        return Some(DrawReason::ThreefoldRepetition);
    }
    None
}

#[inline]
pub fn repetition_count(game_state: &GameState, position_history: &[PositionKey]) -> usize {
    let current = game_state.position_key();
    position_history.iter().filter(|key| **key == current).count()
}

/// King versus king, or king and one minor piece versus a bare king.
pub fn is_insufficient_material(game_state: &GameState) -> bool {
    let heavy_or_pawn = [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen];
    let has_mating_force = Color::ALL.iter().any(|color| {
        heavy_or_pawn
            .iter()
            .any(|kind| game_state.count(*color, *kind) > 0)
    });
    if has_mating_force {
        return false;
    }

    let minors: u32 = Color::ALL
        .iter()
        .map(|color| {
            game_state.count(*color, PieceKind::Knight) + game_state.count(*color, PieceKind::Bishop)
        })
        .sum();
    minors <= 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::move_generation::legal_move_generator::legal_moves;

    fn status_of(fen: &str) -> PositionStatus {
        let game = GameState::from_fen(fen).expect("fen should parse");
        evaluate_position(&game, &legal_moves(&game), &[])
    }

    #[test]
    fn distinguishes_checkmate_stalemate_and_check() {
        assert_eq!(
            status_of("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
            PositionStatus::Checkmate
        );
        assert_eq!(status_of("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1"), PositionStatus::Stalemate);
        assert_eq!(status_of("4k3/8/8/8/7q/8/8/4K3 w - - 0 1"), PositionStatus::Check);
        assert_eq!(
            status_of(crate::game_state::chess_rules::STARTING_POSITION_FEN),
            PositionStatus::Ongoing
        );
    }

    #[test]
    fn fifty_move_rule_triggers_at_one_hundred_halfmoves() {
        assert_eq!(
            status_of("4k3/8/8/8/8/8/8/R3K3 w - - 100 80"),
            PositionStatus::Draw(DrawReason::FiftyMoveRule)
        );
        assert_eq!(status_of("4k3/8/8/8/8/8/8/R3K3 w - - 99 80"), PositionStatus::Ongoing);
    }

    #[test]
    fn mate_on_the_hundredth_halfmove_is_still_mate() {
        assert_eq!(
            status_of("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 90"),
            PositionStatus::Checkmate
        );
    }

    #[test]
    fn insufficient_material_cases() {
        let draw = PositionStatus::Draw(DrawReason::InsufficientMaterial);
        assert_eq!(status_of("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), draw);
        assert_eq!(status_of("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1"), draw);
        assert_eq!(status_of("4k3/8/8/2n5/8/8/8/4K3 w - - 0 1"), draw);
        assert_eq!(status_of("4k3/8/8/2n5/8/8/8/2B1K3 w - - 0 1"), PositionStatus::Ongoing);
        assert_eq!(status_of("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1"), PositionStatus::Ongoing);
    }

    #[test]
    fn repetition_counts_matching_keys() {
        let game = GameState::new_game();
        let key = game.position_key();
        let history = vec![key, GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").expect("fen").position_key(), key];
        assert_eq!(repetition_count(&game, &history), 2);
        assert_eq!(draw_reason(&game, &history), None);

        let history = vec![key, key, key];
        assert_eq!(
            draw_reason(&game, &history),
            Some(DrawReason::ThreefoldRepetition)
        );
    }
}
