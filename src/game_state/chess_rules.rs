//! Canonical chess-rule constants.
//!
//! Static literals for initializing positions and for the draw rules the
//! session enforces.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Halfmove clock value at which the fifty-move rule draws the game.
pub const FIFTY_MOVE_RULE_HALFMOVES: u16 = 100;

/// Number of occurrences of one position that draws by repetition.
pub const REPETITION_DRAW_COUNT: usize = 3;

/// d4, e4, d5, e5.
pub const CENTER_SQUARES: [u8; 4] = [27, 28, 35, 36];
