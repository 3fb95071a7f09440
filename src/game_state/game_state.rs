//! Core board state representation.
//!
//! `GameState` is an immutable-per-ply value: piece bitboards, occupancy
//! caches, side/rights flags and clocks. Applying a move always produces a
//! new value, so every position kept in a game's history stays valid on its
//! own.

use crate::errors::GameResult;
use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks;
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    // [color][piece_kind]
    pub pieces: [[u64; 6]; 2],

    // Occupancy caches, kept in sync by `recalc_occupancy`.
    pub occupancy_by_color: [u64; 2],
    pub occupancy_all: u64,

    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,

    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

/// The part of a position that decides repetition: placement, side to move,
/// castling rights and en-passant target. Clocks are excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PositionKey {
    pieces: [[u64; 6]; 2],
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_square: Option<Square>,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,

            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,

            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl GameState {
    #[inline]
    pub fn new_empty() -> Self {
        Self::default()
    }

    pub fn new_game() -> Self {
        let mut state = Self::new_empty();
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (file, kind) in back_rank.into_iter().enumerate() {
            let file = file as u8;
            state.put_piece(make_square(file, 0), Piece::new(Color::Light, kind));
            state.put_piece(make_square(file, 1), Piece::new(Color::Light, PieceKind::Pawn));
            state.put_piece(make_square(file, 6), Piece::new(Color::Dark, PieceKind::Pawn));
            state.put_piece(make_square(file, 7), Piece::new(Color::Dark, kind));
        }
        state.castling_rights = CASTLE_LIGHT_KINGSIDE
            | CASTLE_LIGHT_QUEENSIDE
            | CASTLE_DARK_KINGSIDE
            | CASTLE_DARK_QUEENSIDE;
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> GameResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn get_fen(&self) -> String {
        generate_fen(self)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        let mask = 1u64 << square;
        if self.occupancy_all & mask == 0 {
            return None;
        }
        for color in Color::ALL {
            if self.occupancy_by_color[color.index()] & mask == 0 {
                continue;
            }
            for kind in PieceKind::ALL {
                if self.pieces[color.index()][kind.index()] & mask != 0 {
                    return Some(Piece::new(color, kind));
                }
            }
        }
        None
    }

    /// Whether any piece of `by_color` attacks `square` in this position.
    #[inline]
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        legal_move_checks::is_square_attacked(self, square, by_color)
    }

    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        legal_move_checks::king_square(self, color)
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        legal_move_checks::is_king_in_check(self, self.side_to_move)
    }

    pub fn position_key(&self) -> PositionKey {
        PositionKey {
            pieces: self.pieces,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
        }
    }

    /// Count of pieces of one color and kind.
    #[inline]
    pub fn count(&self, color: Color, kind: PieceKind) -> u32 {
        self.pieces[color.index()][kind.index()].count_ones()
    }

    pub(crate) fn put_piece(&mut self, square: Square, piece: Piece) {
        let mask = 1u64 << square;
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
    }

    pub(crate) fn clear_square(&mut self, square: Square) {
        let mask = !(1u64 << square);
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                self.pieces[color.index()][kind.index()] &= mask;
            }
            self.occupancy_by_color[color.index()] &= mask;
        }
        self.occupancy_all &= mask;
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in Color::ALL {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .copied()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::Light.index()]
            | self.occupancy_by_color[Color::Dark.index()];
    }
}
