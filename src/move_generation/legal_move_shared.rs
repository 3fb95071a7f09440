use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::chess_move::Move;

#[inline]
pub fn piece_on_square_for_color(
    game_state: &GameState,
    color: Color,
    square: Square,
) -> Option<PieceKind> {
    let mask = 1u64 << square;
    PieceKind::ALL
        .into_iter()
        .find(|piece| game_state.pieces[color.index()][piece.index()] & mask != 0)
}

#[inline]
pub fn enemy_piece_on(game_state: &GameState, square: Square) -> Option<PieceKind> {
    piece_on_square_for_color(game_state, game_state.side_to_move.opposite(), square)
}

/// Iterate the set bits of a bitboard as squares, lowest first.
#[inline]
pub fn squares_of(mut bitboard: u64) -> impl Iterator<Item = Square> {
    std::iter::from_fn(move || {
        if bitboard == 0 {
            return None;
        }
        let sq = bitboard.trailing_zeros() as Square;
        bitboard &= bitboard - 1;
        Some(sq)
    })
}

/// Emit a move from `from` to each square in `targets`, tagging captures.
/// `targets` must already exclude squares held by the side to move.
pub fn push_target_moves(
    game_state: &GameState,
    from: Square,
    moved_piece: PieceKind,
    targets: u64,
    out: &mut Vec<Move>,
) {
    for to in squares_of(targets) {
        out.push(match enemy_piece_on(game_state, to) {
            Some(captured) => Move::capture(from, to, moved_piece, captured),
            None => Move::quiet(from, to, moved_piece),
        });
    }
}
