//! Move value type produced by the generator and consumed by the applier.

use std::fmt;

use serde::Serialize;

use crate::game_state::chess_types::{CastleSide, PieceKind, Square};
use crate::utils::algebraic::square_to_algebraic;

/// A move relative to the position that generated it.
///
/// Besides the from/to squares and special-move markers, the generator fills
/// in the moved and captured piece kinds so policies can rank moves without
/// going back to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub moved_piece: PieceKind,
    pub captured_piece: Option<PieceKind>,
    pub promotion: Option<PieceKind>,
    pub castle: Option<CastleSide>,
    pub en_passant: bool,
    pub double_pawn_push: bool,
}

impl Move {
    #[inline]
    pub const fn quiet(from: Square, to: Square, moved_piece: PieceKind) -> Self {
        Self {
            from,
            to,
            moved_piece,
            captured_piece: None,
            promotion: None,
            castle: None,
            en_passant: false,
            double_pawn_push: false,
        }
    }

    #[inline]
    pub const fn capture(
        from: Square,
        to: Square,
        moved_piece: PieceKind,
        captured_piece: PieceKind,
    ) -> Self {
        Self {
            captured_piece: Some(captured_piece),
            ..Self::quiet(from, to, moved_piece)
        }
    }

    #[inline]
    pub const fn with_promotion(self, promotion: PieceKind) -> Self {
        Self {
            promotion: Some(promotion),
            ..self
        }
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured_piece.is_some()
    }

    /// Square the captured piece stands on; differs from `to` only for en-passant.
    #[inline]
    pub const fn capture_square(&self) -> Square {
        if self.en_passant {
            // Victim shares the destination file and the mover's origin rank.
            (self.from / 8) * 8 + self.to % 8
        } else {
            self.to
        }
    }
}

/// Long algebraic (UCI) form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_to_algebraic(self.from), square_to_algebraic(self.to))?;
        if let Some(promo) = self.promotion {
            write!(f, "{}", promo.letter().to_ascii_lowercase())?;
        }
        Ok(())
    }
}
