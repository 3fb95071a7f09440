use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::{
    bishop_attacks, king_attacks, knight_attacks, pawn_attacks, rook_attacks,
};

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> Option<Square> {
    let kings = game_state.pieces[color.index()][PieceKind::King.index()];
    if kings == 0 {
        None
    } else {
        Some(kings.trailing_zeros() as Square)
    }
}

#[inline]
pub fn is_king_in_check(game_state: &GameState, color: Color) -> bool {
    let Some(king_sq) = king_square(game_state, color) else {
        return false;
    };
    is_square_attacked(game_state, king_sq, color.opposite())
}

/// Attack test by reverse lookup: a piece of `attacker_color` attacks
/// `square` iff the same piece type standing on `square` would attack it.
/// Pawns are the one asymmetric case and use the defender's capture pattern.
pub fn is_square_attacked(game_state: &GameState, square: Square, attacker_color: Color) -> bool {
    let attacker = &game_state.pieces[attacker_color.index()];

    if pawn_attacks(attacker_color.opposite(), square) & attacker[PieceKind::Pawn.index()] != 0 {
        return true;
    }
    if knight_attacks(square) & attacker[PieceKind::Knight.index()] != 0 {
        return true;
    }
    if king_attacks(square) & attacker[PieceKind::King.index()] != 0 {
        return true;
    }

    let queens = attacker[PieceKind::Queen.index()];
    let diagonal = attacker[PieceKind::Bishop.index()] | queens;
    if diagonal != 0 && bishop_attacks(square, game_state.occupancy_all) & diagonal != 0 {
        return true;
    }
    let orthogonal = attacker[PieceKind::Rook.index()] | queens;
    if orthogonal != 0 && rook_attacks(square, game_state.occupancy_all) & orthogonal != 0 {
        return true;
    }

    false
}
