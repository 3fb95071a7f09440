//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and internal
//! square indices reused by FEN, SAN, PGN and long-algebraic parsing.

use crate::errors::{GameError, GameResult};
use crate::game_state::chess_types::{make_square, square_file, square_rank, Square};

/// Convert an algebraic square (for example: "e4") to a square index.
pub fn algebraic_to_square(square: &str) -> GameResult<Square> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(GameError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(GameError::InvalidSquare(square.to_owned()));
    }

    Ok(make_square(file - b'a', rank - b'1'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
pub fn square_to_algebraic(square: Square) -> String {
    debug_assert!(square < 64, "square index out of bounds: {square}");
    let mut out = String::with_capacity(2);
    out.push(file_char(square));
    out.push(char::from(b'1' + square_rank(square)));
    out
}

#[inline]
pub fn file_char(square: Square) -> char {
    char::from(b'a' + square_file(square))
}

#[inline]
pub fn rank_char(square: Square) -> char {
    char::from(b'1' + square_rank(square))
}
