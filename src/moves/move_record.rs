use serde::Serialize;

use crate::game_state::chess_types::{Color, Piece};
use crate::move_generation::game_outcome::PositionStatus;
use crate::moves::chess_move::Move;

/// One entry of a game's move history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub mv: Move,
    /// Standard algebraic notation, with `+`/`#` suffixes.
    pub san: String,
    pub moved: Piece,
    pub captured: Option<Piece>,
    pub side_to_move_after: Color,
    /// Status of the resulting position for the side now to move.
    pub status: PositionStatus,
}
