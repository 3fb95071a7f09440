//! Terminal-oriented Unicode board renderer.
//!
//! Used by the command-line front end to draw the board after each move.

use crate::game_state::{chess_types::*, game_state::GameState};

/// Render the board to a Unicode string, white at the bottom.
pub fn render_game_state(game_state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        let rank_label = char::from(b'1' + rank);
        out.push(rank_label);
        out.push(' ');

        let row: Vec<String> = (0..8u8)
            .map(|file| {
                game_state
                    .piece_at(make_square(file, rank))
                    .map(piece_to_unicode)
                    .unwrap_or('·')
                    .to_string()
            })
            .collect();
        out.push_str(&row.join(" "));

        out.push(' ');
        out.push(rank_label);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

/// Unicode glyph for a piece.
pub fn piece_to_unicode(piece: Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}
