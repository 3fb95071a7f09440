//! Primitive value types shared by every layer of the engine.
//!
//! Squares are plain indices (`0 == a1`, `7 == h1`, `63 == h8`); pieces are
//! split into color and kind so bitboards can be indexed `[color][kind]`.

use serde::Serialize;

pub use crate::game_state::game_state::GameState;

/// Side to move. `Light` plays white, `Dark` plays black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::Light, Color::Dark];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank a pawn of this color promotes on.
    #[inline]
    pub const fn promotion_rank(self) -> u8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    /// Rank a pawn of this color may double-push from.
    #[inline]
    pub const fn pawn_start_rank(self) -> u8 {
        match self {
            Color::Light => 1,
            Color::Dark => 6,
        }
    }
}

/// Piece kind (color is represented separately for cache-friendly layouts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices, strongest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Uppercase letter used by SAN and FEN (pawns use `P` in FEN only).
    #[inline]
    pub const fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

/// Castling rights bitmask; each flag is revoked permanently once lost.
pub type CastlingRights = u8;
pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;

#[inline]
pub const fn castling_flag(color: Color, side: CastleSide) -> CastlingRights {
    match (color, side) {
        (Color::Light, CastleSide::KingSide) => CASTLE_LIGHT_KINGSIDE,
        (Color::Light, CastleSide::QueenSide) => CASTLE_LIGHT_QUEENSIDE,
        (Color::Dark, CastleSide::KingSide) => CASTLE_DARK_KINGSIDE,
        (Color::Dark, CastleSide::QueenSide) => CASTLE_DARK_QUEENSIDE,
    }
}

/// Board square index (`0..=63`).
pub type Square = u8;

#[inline]
pub const fn square_file(square: Square) -> u8 {
    square % 8
}

#[inline]
pub const fn square_rank(square: Square) -> u8 {
    square / 8
}

#[inline]
pub const fn make_square(file: u8, rank: u8) -> Square {
    rank * 8 + file
}

/// Signed offset from a square, `None` when it would leave the board.
#[inline]
pub fn offset_square(square: Square, file_delta: i8, rank_delta: i8) -> Option<Square> {
    let file = square_file(square) as i8 + file_delta;
    let rank = square_rank(square) as i8 + rank_delta;
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some(make_square(file as u8, rank as u8))
    } else {
        None
    }
}
