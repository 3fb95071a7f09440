//! Long algebraic (UCI-style) move text, e.g. `e2e4`, `e7e8q`.
//!
//! Text is resolved against the position's legal move list, so the returned
//! `Move` carries the capture, castling and en-passant markers the generator
//! assigned.

use crate::errors::{GameError, GameResult};
use crate::game_state::{chess_types::PieceKind, game_state::GameState};
use crate::move_generation::legal_move_generator::legal_moves;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::algebraic_to_square;

pub fn long_algebraic_to_move(long_algebraic: &str, game_state: &GameState) -> GameResult<Move> {
    let text = long_algebraic.trim();
    let invalid = || GameError::InvalidMoveText(text.to_owned());

    if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
        return Err(invalid());
    }

    let from = algebraic_to_square(&text[0..2]).map_err(|_| invalid())?;
    let to = algebraic_to_square(&text[2..4]).map_err(|_| invalid())?;
    let promotion = match text.as_bytes().get(4) {
        None => None,
        Some(b'q') => Some(PieceKind::Queen),
        Some(b'r') => Some(PieceKind::Rook),
        Some(b'b') => Some(PieceKind::Bishop),
        Some(b'n') => Some(PieceKind::Knight),
        Some(_) => return Err(invalid()),
    };

    legal_moves(game_state)
        .into_iter()
        .find(|mv| mv.from == from && mv.to == to && mv.promotion == promotion)
        .ok_or_else(|| GameError::IllegalMove {
            mv: text.to_owned(),
            fen: game_state.get_fen(),
        })
}

/// Play a sequence of long algebraic moves from `game_state`.
pub fn play_long_algebraic_line(game_state: &GameState, line: &[&str]) -> GameResult<GameState> {
    line.iter().try_fold(game_state.clone(), |state, text| {
        let mv = long_algebraic_to_move(text, &state)?;
        Ok(crate::move_generation::legal_move_apply::apply_move(&state, mv))
    })
}
