//! Knight and sliding-piece move generation.
//!
//! Bishops, rooks and queens share one loop over occupancy-aware rays; rays
//! include the first blocker, and own-piece squares are masked off afterwards.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{push_target_moves, squares_of};
use crate::moves::attack_tables::{bishop_attacks, knight_attacks, queen_attacks, rook_attacks};
use crate::moves::chess_move::Move;

pub fn generate_knight_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_piece_moves(game_state, PieceKind::Knight, |sq, _| knight_attacks(sq), out);
}

pub fn generate_bishop_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_piece_moves(game_state, PieceKind::Bishop, bishop_attacks, out);
}

pub fn generate_rook_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_piece_moves(game_state, PieceKind::Rook, rook_attacks, out);
}

pub fn generate_queen_moves(game_state: &GameState, out: &mut Vec<Move>) {
    generate_piece_moves(game_state, PieceKind::Queen, queen_attacks, out);
}

fn generate_piece_moves(
    game_state: &GameState,
    kind: PieceKind,
    attacks: impl Fn(Square, u64) -> u64,
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move;
    let own_occ = game_state.occupancy_by_color[side.index()];

    for from in squares_of(game_state.pieces[side.index()][kind.index()]) {
        let targets = attacks(from, game_state.occupancy_all) & !own_occ;
        push_target_moves(game_state, from, kind, targets, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(fen: &str, generate: fn(&GameState, &mut Vec<Move>)) -> Vec<Move> {
        let game = GameState::from_fen(fen).expect("fen should parse");
        let mut out = Vec::new();
        generate(&game, &mut out);
        out
    }

    #[test]
    fn start_position_knights_have_four_moves() {
        let moves = collect(
            crate::game_state::chess_rules::STARTING_POSITION_FEN,
            generate_knight_moves,
        );
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn rook_ray_stops_on_capture_and_before_own_piece() {
        // Rook a1, own pawn a3, enemy knight d1.
        let moves = collect("4k3/8/8/8/8/P7/8/R2nK3 w - - 0 1", generate_rook_moves);
        let targets: Vec<u8> = moves.iter().map(|m| m.to).collect();
        assert!(targets.contains(&8)); // a2
        assert!(!targets.contains(&16)); // a3 own pawn
        assert!(targets.contains(&3)); // d1 capture
        assert!(!targets.contains(&4));
        let capture = moves.iter().find(|m| m.to == 3).expect("capture on d1");
        assert_eq!(capture.captured_piece, Some(PieceKind::Knight));
        assert_eq!(moves.len(), 4);
    }

    #[test]
    fn lone_queen_in_center_has_twenty_seven_moves() {
        let moves = collect("k7/8/8/8/3Q4/8/8/7K w - - 0 1", generate_queen_moves);
        // d4 queen: a7 diagonal is open (a7 empty), king on a8 is not on a d4 ray.
        assert_eq!(moves.len(), 27);
    }

    #[test]
    fn bishop_moves_from_corner() {
        let moves = collect("4k3/8/8/8/8/8/8/B3K3 w - - 0 1", generate_bishop_moves);
        assert_eq!(moves.len(), 7);
    }
}
