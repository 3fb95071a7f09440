//! PGN export for a finished or in-progress game.
//!
//! Movetext is built from the SAN already stored in each `MoveRecord`, so
//! writing never has to replay the game.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

use crate::game_state::chess_rules::STARTING_POSITION_FEN;
use crate::game_state::chess_types::Color;
use crate::moves::move_record::MoveRecord;

/// PGN result token for the game's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PgnResult {
    WhiteWins,
    BlackWins,
    Draw,
    Unfinished,
}

impl PgnResult {
    pub const fn token(self) -> &'static str {
        match self {
            PgnResult::WhiteWins => "1-0",
            PgnResult::BlackWins => "0-1",
            PgnResult::Draw => "1/2-1/2",
            PgnResult::Unfinished => "*",
        }
    }

    pub const fn win_for(color: Color) -> Self {
        match color {
            Color::Light => PgnResult::WhiteWins,
            Color::Dark => PgnResult::BlackWins,
        }
    }
}

/// Write a PGN document for a game that started from `initial_fen`.
///
/// `date` stamps the `[Date]` tag; the seven-tag roster is always present.
pub fn write_pgn(
    initial_fen: &str,
    first_mover: Color,
    first_move_number: u16,
    history: &[MoveRecord],
    result: PgnResult,
    date: DateTime<Local>,
) -> String {
    let mut headers = BTreeMap::<&str, String>::new();
    headers.insert("Event", "Autoplay Chess Game".to_owned());
    headers.insert("Site", "Local".to_owned());
    headers.insert("Date", date.format("%Y.%m.%d").to_string());
    headers.insert("Round", "-".to_owned());
    headers.insert("White", "Autoplay".to_owned());
    headers.insert("Black", "Autoplay".to_owned());
    headers.insert("Result", result.token().to_owned());
    if initial_fen != STARTING_POSITION_FEN {
        headers.insert("SetUp", "1".to_owned());
        headers.insert("FEN", initial_fen.to_owned());
    }

    let mut out = String::new();
    for (key, value) in &headers {
        out.push_str(&format!("[{} \"{}\"]\n", key, escape_pgn_value(value)));
    }
    out.push('\n');

    let mut parts = Vec::<String>::with_capacity(history.len() + 2);
    let mut move_number = first_move_number;
    let mut mover = first_mover;
    for (ply, record) in history.iter().enumerate() {
        match mover {
            Color::Light => parts.push(format!("{}. {}", move_number, record.san)),
            Color::Dark if ply == 0 => parts.push(format!("{}... {}", move_number, record.san)),
            Color::Dark => parts.push(record.san.clone()),
        }
        if mover == Color::Dark {
            move_number += 1;
        }
        mover = record.side_to_move_after;
    }
    parts.push(result.token().to_owned());

    out.push_str(&parts.join(" "));
    out.push('\n');
    out
}

fn escape_pgn_value(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::{write_pgn, PgnResult};
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::Color;
    use crate::game_state::game_state::GameState;
    use crate::move_generation::legal_move_apply::apply_legal_move;
    use crate::moves::move_record::MoveRecord;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    fn records(fen: &str, line: &[&str]) -> Vec<MoveRecord> {
        let mut game = GameState::from_fen(fen).expect("fen");
        let mut out = Vec::new();
        for text in line {
            let mv = long_algebraic_to_move(text, &game).expect("legal");
            let (next, record) = apply_legal_move(&game, mv).expect("legal");
            out.push(record);
            game = next;
        }
        out
    }

    #[test]
    fn writes_fools_mate() {
        let history = records(STARTING_POSITION_FEN, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        let date = Local.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).single().expect("valid date");
        let pgn = write_pgn(
            STARTING_POSITION_FEN,
            Color::Light,
            1,
            &history,
            PgnResult::BlackWins,
            date,
        );

        assert!(pgn.contains("[Date \"2024.03.09\"]"));
        assert!(pgn.contains("[Result \"0-1\"]"));
        assert!(!pgn.contains("[FEN"));
        assert!(pgn.ends_with("1. f3 e5 2. g4 Qh4# 0-1\n"));
    }

    #[test]
    fn black_to_move_start_uses_ellipsis_and_fen_tag() {
        let fen = "4k3/8/8/8/8/8/4p3/4K3 b - - 0 30";
        let history = records(fen, &["e8d7", "e1e2"]);
        let date = Local.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("valid date");
        let pgn = write_pgn(fen, Color::Dark, 30, &history, PgnResult::Unfinished, date);

        assert!(pgn.contains("[SetUp \"1\"]"));
        assert!(pgn.contains(&format!("[FEN \"{fen}\"]")));
        assert!(pgn.ends_with("30... Kd7 31. Kxe2 *\n"));
    }
}
