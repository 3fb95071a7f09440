use serde::Serialize;

use crate::game_state::chess_types::{Color, PieceKind};
use crate::session::game_session::SessionStatus;

/// Read-only view of a session handed to presentation code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub fen: String,
    pub status: SessionStatus,
    pub side_to_move: Color,
    pub fullmove_number: u16,
    /// SAN of every move played so far.
    pub history: Vec<String>,
    pub captured_by_white: Vec<PieceKind>,
    pub captured_by_black: Vec<PieceKind>,
    pub delay_ms: u64,
}

#[cfg(test)]
mod tests {
    use crate::session::game_session::GameSession;
    use crate::session::session_config::SessionConfig;

    #[test]
    fn fresh_session_snapshot_serializes_to_json() {
        let session = GameSession::new(SessionConfig {
            seed: Some(4),
            ..SessionConfig::default()
        })
        .expect("valid config");
        let snapshot = session.snapshot();
        assert_eq!(
            snapshot.fen,
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
        );
        assert_eq!(snapshot.fullmove_number, 1);
        assert!(snapshot.history.is_empty());

        let json = serde_json::to_value(&snapshot).expect("serializable");
        assert_eq!(json["status"], "Idle");
        assert_eq!(json["side_to_move"], "Light");
        assert_eq!(json["delay_ms"], 1000);
        assert_eq!(json["captured_by_white"], serde_json::json!([]));
    }
}
