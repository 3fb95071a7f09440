use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::{is_square_attacked, king_square};
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::attack_tables::king_attacks;
use crate::moves::chess_move::Move;

/// Squares involved in one castling move, for a given color.
struct CastlePath {
    side: CastleSide,
    king_from: Square,
    king_to: Square,
    /// Must be empty: everything strictly between king and rook.
    between: &'static [Square],
    /// Must not be attacked: the square the king crosses and the one it lands on.
    king_path: [Square; 2],
}

const LIGHT_CASTLES: [CastlePath; 2] = [
    CastlePath {
        side: CastleSide::KingSide,
        king_from: 4,
        king_to: 6,
        between: &[5, 6],
        king_path: [5, 6],
    },
    CastlePath {
        side: CastleSide::QueenSide,
        king_from: 4,
        king_to: 2,
        between: &[1, 2, 3],
        king_path: [3, 2],
    },
];

const DARK_CASTLES: [CastlePath; 2] = [
    CastlePath {
        side: CastleSide::KingSide,
        king_from: 60,
        king_to: 62,
        between: &[61, 62],
        king_path: [61, 62],
    },
    CastlePath {
        side: CastleSide::QueenSide,
        king_from: 60,
        king_to: 58,
        between: &[57, 58, 59],
        king_path: [59, 58],
    },
];

/// Rook origin and destination for a castling move by `color` on `side`.
pub fn castling_rook_squares(color: Color, side: CastleSide) -> (Square, Square) {
    match (color, side) {
        (Color::Light, CastleSide::KingSide) => (7, 5),
        (Color::Light, CastleSide::QueenSide) => (0, 3),
        (Color::Dark, CastleSide::KingSide) => (63, 61),
        (Color::Dark, CastleSide::QueenSide) => (56, 59),
    }
}

pub fn generate_king_moves(game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let Some(from) = king_square(game_state, side) else {
        return;
    };

    let own_occ = game_state.occupancy_by_color[side.index()];
    push_target_moves(game_state, from, PieceKind::King, king_attacks(from) & !own_occ, out);

    generate_castling_moves(game_state, from, out);
}

fn generate_castling_moves(game_state: &GameState, king_from: Square, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();

    // Rights encode "king and rook unmoved".
    let candidates = match side {
        Color::Light => &LIGHT_CASTLES,
        Color::Dark => &DARK_CASTLES,
    };
    let available: Vec<&CastlePath> = candidates
        .iter()
        .filter(|path| game_state.castling_rights & castling_flag(side, path.side) != 0)
        .filter(|path| path.king_from == king_from)
        .collect();
    if available.is_empty() {
        return;
    }

    // Cannot castle out of check.
    if is_square_attacked(game_state, king_from, enemy) {
        return;
    }

    for path in available {
        let (rook_from, _) = castling_rook_squares(side, path.side);
        let rook_present =
            game_state.pieces[side.index()][PieceKind::Rook.index()] & (1u64 << rook_from) != 0;
        let clear = path
            .between
            .iter()
            .all(|sq| game_state.occupancy_all & (1u64 << sq) == 0);
        let safe = path
            .king_path
            .iter()
            .all(|sq| !is_square_attacked(game_state, *sq, enemy));

        if rook_present && clear && safe {
            out.push(Move {
                castle: Some(path.side),
                ..Move::quiet(king_from, path.king_to, PieceKind::King)
            });
        }
    }
}
