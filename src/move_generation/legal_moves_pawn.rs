use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::{enemy_piece_on, squares_of};
use crate::moves::attack_tables::pawn_attacks;
use crate::moves::chess_move::Move;

pub fn generate_pawn_moves(game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let our_pawns = game_state.pieces[side.index()][PieceKind::Pawn.index()];
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let empty = !game_state.occupancy_all;
    let forward: i8 = if side == Color::Light { 1 } else { -1 };

    for from in squares_of(our_pawns) {
        if let Some(to) = offset_square(from, 0, forward) {
            if (1u64 << to) & empty != 0 {
                push_with_promotions(side, Move::quiet(from, to, PieceKind::Pawn), out);

                if square_rank(from) == side.pawn_start_rank() {
                    if let Some(two_step) = offset_square(to, 0, forward) {
                        if (1u64 << two_step) & empty != 0 {
                            out.push(Move {
                                double_pawn_push: true,
                                ..Move::quiet(from, two_step, PieceKind::Pawn)
                            });
                        }
                    }
                }
            }
        }

        let attacks = pawn_attacks(side, from);
        for to in squares_of(attacks & enemy_occ) {
            if let Some(captured) = enemy_piece_on(game_state, to) {
                push_with_promotions(side, Move::capture(from, to, PieceKind::Pawn, captured), out);
            }
        }

        if let Some(ep) = game_state.en_passant_square {
            if attacks & (1u64 << ep) != 0 && is_en_passant_victim_present(game_state, from, ep) {
                out.push(Move {
                    en_passant: true,
                    ..Move::capture(from, ep, PieceKind::Pawn, PieceKind::Pawn)
                });
            }
        }
    }
}

fn push_with_promotions(side: Color, mv: Move, out: &mut Vec<Move>) {
    if square_rank(mv.to) == side.promotion_rank() {
        for promo in PieceKind::PROMOTIONS {
            out.push(mv.with_promotion(promo));
        }
    } else {
        out.push(mv);
    }
}

/// The pawn that double-stepped must sit beside the capturer, on the
/// capturer's rank and the target's file.
fn is_en_passant_victim_present(game_state: &GameState, from: Square, ep: Square) -> bool {
    let victim = make_square(square_file(ep), square_rank(from));
    enemy_piece_on(game_state, victim) == Some(PieceKind::Pawn)
}
