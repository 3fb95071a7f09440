use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::square_to_algebraic;

pub fn generate_fen(game_state: &GameState) -> String {
    let side_to_move = match game_state.side_to_move {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let en_passant = game_state
        .en_passant_square
        .map(square_to_algebraic)
        .unwrap_or_else(|| "-".to_owned());

    format!(
        "{} {} {} {} {} {}",
        generate_board_field(game_state),
        side_to_move,
        generate_castling_field(game_state.castling_rights),
        en_passant,
        game_state.halfmove_clock,
        game_state.fullmove_number
    )
}

fn generate_board_field(game_state: &GameState) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            match game_state.piece_at(make_square(file, rank)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece_to_fen_char(piece));
                }
                None => empty_count += 1,
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn piece_to_fen_char(piece: Piece) -> char {
    let upper = piece.kind.letter();
    match piece.color {
        Color::Light => upper,
        Color::Dark => upper.to_ascii_lowercase(),
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let out: String = [
        (CASTLE_LIGHT_KINGSIDE, 'K'),
        (CASTLE_LIGHT_QUEENSIDE, 'Q'),
        (CASTLE_DARK_KINGSIDE, 'k'),
        (CASTLE_DARK_QUEENSIDE, 'q'),
    ]
    .iter()
    .filter(|(flag, _)| rights & flag != 0)
    .map(|(_, ch)| *ch)
    .collect();

    if out.is_empty() {
        "-".to_owned()
    } else {
        out
    }
}
