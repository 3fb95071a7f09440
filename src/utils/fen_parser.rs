//! FEN-to-GameState parser.
//!
//! Builds a fully-populated board from a Forsyth-Edwards Notation string,
//! including piece bitboards, rights, clocks, and occupancies.

use crate::errors::{GameError, GameResult};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> GameResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side-to-move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en-passant square"))?;
    // Clocks are optional; many tools emit four-field FEN.
    let halfmove_part = parts.next().unwrap_or("0");
    let fullmove_part = parts.next().unwrap_or("1");

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let mut game_state = GameState::new_empty();

    parse_board(board_part, &mut game_state)?;
    game_state.side_to_move = parse_side_to_move(side_part)?;
    game_state.castling_rights = parse_castling_rights(castling_part)?;
    game_state.en_passant_square = parse_en_passant_square(en_passant_part)?;
    game_state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("invalid halfmove clock '{halfmove_part}'")))?;
    game_state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("invalid fullmove number '{fullmove_part}'")))?;

    game_state.recalc_occupancy();

    for color in Color::ALL {
        if game_state.count(color, PieceKind::King) != 1 {
            return Err(invalid(&format!("{color:?} must have exactly one king")));
        }
    }

    Ok(game_state)
}

fn invalid(reason: &str) -> GameError {
    GameError::InvalidFen(reason.to_owned())
}

fn parse_board(board_part: &str, game_state: &mut GameState) -> GameResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("invalid empty-square count '{ch}'")));
                }
                if u32::from(file) + empty_count > 8 {
                    return Err(invalid("board rank has too many files"));
                }
                file += empty_count as u8;
                continue;
            }

            let piece = piece_from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid("board rank has too many files"));
            }

            game_state.pieces[piece.color.index()][piece.kind.index()] |=
                1u64 << make_square(file, board_rank);
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> GameResult<Color> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(invalid(&format!("invalid side-to-move '{side_part}'"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> GameResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_LIGHT_KINGSIDE,
            'Q' => rights |= CASTLE_LIGHT_QUEENSIDE,
            'k' => rights |= CASTLE_DARK_KINGSIDE,
            'q' => rights |= CASTLE_DARK_QUEENSIDE,
            _ => return Err(invalid(&format!("invalid castling character '{ch}'"))),
        }
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> GameResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let square = algebraic_to_square(en_passant_part)
        .map_err(|_| invalid(&format!("invalid en-passant square '{en_passant_part}'")))?;
    match square_rank(square) {
        2 | 5 => Ok(Some(square)),
        _ => Err(invalid("en-passant square must be on rank 3 or 6")),
    }
}

fn piece_from_fen_char(ch: char) -> Option<Piece> {
    let color = if ch.is_ascii_uppercase() {
        Color::Light
    } else {
        Color::Dark
    };

    let kind = match ch.to_ascii_lowercase() {
        'p' => PieceKind::Pawn,
        'n' => PieceKind::Knight,
        'b' => PieceKind::Bishop,
        'r' => PieceKind::Rook,
        'q' => PieceKind::Queen,
        'k' => PieceKind::King,
        _ => return None,
    };

    Some(Piece::new(color, kind))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::GameError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Color;

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move, Color::Light);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.occupancy_all.count_ones(), 32);
    }

    #[test]
    fn four_field_fen_defaults_clocks() {
        let game_state = parse_fen("4k3/8/8/8/8/8/8/4K3 b - -").expect("short FEN should parse");
        assert_eq!(game_state.halfmove_clock, 0);
        assert_eq!(game_state.fullmove_number, 1);
        assert_eq!(game_state.side_to_move, Color::Dark);
    }

    #[test]
    fn rejects_malformed_layouts() {
        assert!(parse_fen("8/8/8/8/8/8/8 w - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K2 w - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w X - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3 w - e4 0 1").is_err());
        // Missing black king.
        assert!(parse_fen("8/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
        // Runs of empty squares past the h-file.
        assert!(matches!(
            parse_fen("88888888888888888888888888888888/8/8/8/8/8/8/8 w - - 0 1"),
            Err(GameError::InvalidFen(_))
        ));
        assert!(parse_fen("4k3/8/8/8/8/8/8/4K3/ w - - 0 1").is_err());
        assert!(parse_fen("4k3/8/8/8/8/8/8/K44 w - - 0 1").is_err());
    }
}
