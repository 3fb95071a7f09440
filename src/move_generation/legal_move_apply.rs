//! Move application.
//!
//! `apply_move` is the raw successor function used on scratch boards during
//! generation. `apply_legal_move` is the checked entry point used by the
//! session: it refuses moves outside the legal set and returns a
//! `MoveRecord` alongside the successor board.

use tracing::trace;

use crate::errors::{GameError, GameResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::game_outcome::evaluate_position;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::move_generation::legal_moves_king::castling_rook_squares;
use crate::moves::chess_move::Move;
use crate::moves::move_record::MoveRecord;
use crate::utils::san::move_to_san;

/// Successor position for a move generated from `game_state`.
///
/// The input is never mutated. Callers are responsible for passing a move
/// produced for this exact position.
pub fn apply_move(game_state: &GameState, mv: Move) -> GameState {
    let moving_color = game_state.side_to_move;
    let enemy_color = moving_color.opposite();

    let mut next = game_state.clone();

    next.clear_square(mv.from);
    if mv.is_capture() {
        next.clear_square(mv.capture_square());
    }

    let placed = mv.promotion.unwrap_or(mv.moved_piece);
    next.put_piece(mv.to, Piece::new(moving_color, placed));

    if let Some(side) = mv.castle {
        let (rook_from, rook_to) = castling_rook_squares(moving_color, side);
        next.clear_square(rook_from);
        next.put_piece(rook_to, Piece::new(moving_color, PieceKind::Rook));
    }

    update_castling_rights(&mut next, moving_color, mv);

    next.en_passant_square = if mv.double_pawn_push {
        Some((mv.from + mv.to) / 2)
    } else {
        None
    };

    if mv.moved_piece == PieceKind::Pawn || mv.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy_color;
    next
}

/// Apply a move after checking it against the position's legal set.
///
/// The record's status covers the conditions visible from the successor
/// board alone; repetition needs the game history and is folded in by the
/// session.
pub fn apply_legal_move(game_state: &GameState, mv: Move) -> GameResult<(GameState, MoveRecord)> {
    let legal = legal_moves(game_state);
    if !legal.contains(&mv) {
        return Err(GameError::IllegalMove {
            mv: mv.to_string(),
            fen: game_state.get_fen(),
        });
    }

    let next = apply_move(game_state, mv);
    let replies = legal_moves(&next);
    let status = evaluate_position(&next, &replies, &[]);
    let san = move_to_san(game_state, mv, &legal, &next, status);
    trace!(%san, fen = %next.get_fen(), "applied move");

    let record = MoveRecord {
        mv,
        san,
        moved: Piece::new(game_state.side_to_move, mv.moved_piece),
        captured: mv
            .captured_piece
            .map(|kind| Piece::new(game_state.side_to_move.opposite(), kind)),
        side_to_move_after: next.side_to_move,
        status,
    };

    Ok((next, record))
}

fn update_castling_rights(game_state: &mut GameState, moving_color: Color, mv: Move) {
    if mv.moved_piece == PieceKind::King {
        game_state.castling_rights &= !(castling_flag(moving_color, CastleSide::KingSide)
            | castling_flag(moving_color, CastleSide::QueenSide));
    }

    // A rook leaving its corner, or anything landing on one, ends that right.
    for square in [mv.from, mv.to] {
        game_state.castling_rights &= !match square {
            0 => CASTLE_LIGHT_QUEENSIDE,
            7 => CASTLE_LIGHT_KINGSIDE,
            56 => CASTLE_DARK_QUEENSIDE,
            63 => CASTLE_DARK_KINGSIDE,
            _ => 0,
        };
    }
}
