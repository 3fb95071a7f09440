//! Standard algebraic notation (SAN) for the move history feed.
//!
//! Disambiguation follows the usual order: file, then rank, then both.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::game_outcome::PositionStatus;
use crate::moves::chess_move::Move;
use crate::utils::algebraic::{file_char, rank_char, square_to_algebraic};

/// Render `mv`, played from `game_state`, as SAN.
///
/// `legal_moves` is the legal set of `game_state` (used for disambiguation);
/// `after` and `status` describe the resulting position (used for `+`/`#`).
pub fn move_to_san(
    game_state: &GameState,
    mv: Move,
    legal_moves: &[Move],
    after: &GameState,
    status: PositionStatus,
) -> String {
    let mut out = match mv.castle {
        Some(CastleSide::KingSide) => "O-O".to_owned(),
        Some(CastleSide::QueenSide) => "O-O-O".to_owned(),
        None => piece_move_text(game_state, mv, legal_moves),
    };

    if status == PositionStatus::Checkmate {
        out.push('#');
    } else if after.is_in_check() {
        out.push('+');
    }

    out
}

fn piece_move_text(game_state: &GameState, mv: Move, legal_moves: &[Move]) -> String {
    let mut out = String::new();

    if mv.moved_piece == PieceKind::Pawn {
        if mv.is_capture() {
            out.push(file_char(mv.from));
            out.push('x');
        }
        out.push_str(&square_to_algebraic(mv.to));
        if let Some(promo) = mv.promotion {
            out.push('=');
            out.push(promo.letter());
        }
        return out;
    }

    out.push(mv.moved_piece.letter());

    let rivals: Vec<&Move> = legal_moves
        .iter()
        .filter(|other| {
            other.moved_piece == mv.moved_piece && other.to == mv.to && other.from != mv.from
        })
        .collect();
    if !rivals.is_empty() {
        let shares_file = rivals
            .iter()
            .any(|other| square_file(other.from) == square_file(mv.from));
        let shares_rank = rivals
            .iter()
            .any(|other| square_rank(other.from) == square_rank(mv.from));
        if !shares_file {
            out.push(file_char(mv.from));
        } else if !shares_rank {
            out.push(rank_char(mv.from));
        } else {
            out.push_str(&square_to_algebraic(mv.from));
        }
    }

    if mv.is_capture() {
        out.push('x');
    }
    out.push_str(&square_to_algebraic(mv.to));

    debug_assert_eq!(
        game_state.piece_at(mv.from).map(|p| p.kind),
        Some(mv.moved_piece)
    );
    out
}

#[cfg(test)]
mod tests {
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_legal_move;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn san_of(fen: &str, lan: &str) -> String {
        let game = GameState::from_fen(fen).expect("fen should parse");
        let mv = long_algebraic_to_move(lan, &game).expect("legal move");
        apply_legal_move(&game, mv).expect("legal").1.san
    }

    #[test]
    fn pawn_and_piece_moves() {
        let start = crate::game_state::chess_rules::STARTING_POSITION_FEN;
        assert_eq!(san_of(start, "e2e4"), "e4");
        assert_eq!(san_of(start, "g1f3"), "Nf3");
    }

    #[test]
    fn castling_promotion_and_mate_suffix() {
        assert_eq!(san_of("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "e1c1"), "O-O-O");
        assert_eq!(san_of("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7a8q"), "a8=Q+");
        assert_eq!(
            san_of("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2", "d8h4"),
            "Qh4#"
        );
    }

    #[test]
    fn disambiguates_by_file_then_rank() {
        // Knights b1 and f1 can both reach d2.
        assert_eq!(san_of("4k3/8/8/8/8/8/8/1N2KN2 w - - 0 1", "b1d2"), "Nbd2");
        // Rooks a1 and a5 share a file and both reach a3.
        assert_eq!(san_of("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1", "a1a3"), "R1a3");
    }
}
