//! Game progression state machine.
//!
//! `GameSession` owns the current board, the append-only move history, the
//! position keys used for repetition, and the per-color capture lists. It is
//! driven by `PendingTick` values: each one carries the generation it was
//! scheduled under, and `start`, `pause` and `reset` bump the generation so
//! any tick scheduled earlier is discarded when it fires.

use std::time::Duration;

use chrono::{DateTime, Local};
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::engines::engine_trait::{build_policy, MovePolicy};
use crate::errors::GameResult;
use crate::game_state::chess_rules::REPETITION_DRAW_COUNT;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::game_state::game_state::{GameState, PositionKey};
use crate::move_generation::game_outcome::{draw_reason, repetition_count, DrawReason, PositionStatus};
use crate::move_generation::legal_move_apply::apply_legal_move;
use crate::move_generation::legal_move_generator::{LegalMoveGenerator, MoveGenerator};
use crate::moves::move_record::MoveRecord;
use crate::session::session_config::{validate_delay, SessionConfig};
use crate::session::snapshot::GameSnapshot;
use crate::utils::pgn::{write_pgn, PgnResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FinishReason {
    Checkmate { winner: Color },
    Stalemate,
    Draw(DrawReason),
}

impl FinishReason {
    fn from_status(status: PositionStatus, side_to_move: Color) -> Option<Self> {
        match status {
            PositionStatus::Checkmate => Some(FinishReason::Checkmate {
                winner: side_to_move.opposite(),
            }),
            PositionStatus::Stalemate => Some(FinishReason::Stalemate),
            PositionStatus::Draw(reason) => Some(FinishReason::Draw(reason)),
            PositionStatus::Ongoing | PositionStatus::Check => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionStatus {
    Idle,
    Active,
    Paused,
    Finished(FinishReason),
}

/// A scheduled move, valid only while the session's generation matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTick {
    pub generation: u64,
    pub delay: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// The tick belonged to an older generation or the session is not active.
    Stale,
    /// A move was applied. `next` is the follow-up tick unless the move ended the game.
    Moved {
        record: MoveRecord,
        next: Option<PendingTick>,
    },
    /// The position was already terminal; no move was made.
    Finished(FinishReason),
}

pub struct GameSession {
    config: SessionConfig,
    initial: GameState,
    board: GameState,
    history: Vec<MoveRecord>,
    positions: Vec<PositionKey>,
    captured_by: [Vec<PieceKind>; 2],
    status: SessionStatus,
    delay: Duration,
    generation: u64,
    generator: LegalMoveGenerator,
    policy: Box<dyn MovePolicy>,
    /// Whether `policy` was built from `config`, so a reset can rebuild it.
    owns_policy_config: bool,
}

impl GameSession {
    /// Build an idle session with the policy named in `config`.
    pub fn new(config: SessionConfig) -> GameResult<Self> {
        let policy = build_policy(config.policy, config.seed);
        let mut session = Self::with_policy(config, policy)?;
        session.owns_policy_config = true;
        Ok(session)
    }

    /// Build an idle session starting from `fen` instead of the configured position.
    pub fn from_fen(fen: &str, config: SessionConfig) -> GameResult<Self> {
        Self::new(SessionConfig {
            initial_fen: Some(fen.to_owned()),
            ..config
        })
    }

    /// Build an idle session around a caller-supplied policy.
    pub fn with_policy(config: SessionConfig, policy: Box<dyn MovePolicy>) -> GameResult<Self> {
        let delay = validate_delay(config.delay_ms)?;
        let initial = match &config.initial_fen {
            Some(fen) => GameState::from_fen(fen)?,
            None => GameState::new_game(),
        };
        Ok(Self {
            config,
            positions: vec![initial.position_key()],
            board: initial.clone(),
            initial,
            history: Vec::new(),
            captured_by: [Vec::new(), Vec::new()],
            status: SessionStatus::Idle,
            delay,
            generation: 0,
            generator: LegalMoveGenerator,
            policy,
            owns_policy_config: false,
        })
    }

    /// Enter (or resume) the active state and return the first tick to schedule.
    ///
    /// Returns `None` when already active or finished.
    pub fn start(&mut self) -> Option<PendingTick> {
        match self.status {
            SessionStatus::Idle | SessionStatus::Paused => {
                self.status = SessionStatus::Active;
                self.generation += 1;
                info!(generation = self.generation, ply = self.history.len(), "session started");
                Some(self.pending_tick())
            }
            SessionStatus::Active | SessionStatus::Finished(_) => None,
        }
    }

    /// Freeze an active session; any scheduled tick becomes stale.
    pub fn pause(&mut self) -> bool {
        if self.status != SessionStatus::Active {
            return false;
        }
        self.status = SessionStatus::Paused;
        self.generation += 1;
        info!(generation = self.generation, ply = self.history.len(), "session paused");
        true
    }

    /// Return to a fresh idle game on the same starting position.
    ///
    /// A policy built from the config is rebuilt with the configured seed, so
    /// a reset game replays like a new session. Caller-supplied policies are
    /// kept as they are. The generation keeps counting up so ticks from
    /// before the reset stay stale.
    pub fn reset(&mut self) {
        if self.owns_policy_config {
            self.policy = build_policy(self.config.policy, self.config.seed);
        }
        self.generation += 1;
        self.board = self.initial.clone();
        self.history.clear();
        self.positions = vec![self.initial.position_key()];
        self.captured_by = [Vec::new(), Vec::new()];
        self.status = SessionStatus::Idle;
        info!(generation = self.generation, "session reset");
    }

    /// Change the inter-move delay for ticks scheduled from now on.
    pub fn set_delay(&mut self, ms: u64) -> GameResult<()> {
        self.delay = validate_delay(ms)?;
        self.config.delay_ms = ms;
        debug!(delay_ms = ms, "delay updated");
        Ok(())
    }

    /// Advance the game by one move if `tick` is still current.
    ///
    /// Board, history, captures and status are committed together, after the
    /// move has been fully computed.
    pub fn tick(&mut self, tick: PendingTick) -> GameResult<TickOutcome> {
        if tick.generation != self.generation || self.status != SessionStatus::Active {
            trace!(
                tick_generation = tick.generation,
                generation = self.generation,
                "discarding stale tick"
            );
            return Ok(TickOutcome::Stale);
        }

        let legal = self.generator.generate_legal_moves(&self.board);
        let side = self.board.side_to_move;

        let already_over = if legal.is_empty() {
            FinishReason::from_status(
                if self.board.is_in_check() {
                    PositionStatus::Checkmate
                } else {
                    PositionStatus::Stalemate
                },
                side,
            )
        } else {
            draw_reason(&self.board, &self.positions).map(FinishReason::Draw)
        };
        if let Some(reason) = already_over {
            self.finish(reason);
            return Ok(TickOutcome::Finished(reason));
        }

        let mv = self.policy.choose_move(&legal, &self.board)?;
        let (next_board, mut record) = apply_legal_move(&self.board, mv)?;

        let next_key = next_board.position_key();
        if !record.status.is_terminal()
            && repetition_count(&next_board, &self.positions) + 1 >= REPETITION_DRAW_COUNT
        {
            record.status = PositionStatus::Draw(DrawReason::ThreefoldRepetition);
        }

        self.board = next_board;
        self.positions.push(next_key);
        if let Some(captured) = record.captured {
            self.captured_by[side.index()].push(captured.kind);
        }
        self.history.push(record.clone());
        debug!(
            ply = self.history.len(),
            san = %record.san,
            policy = self.policy.name(),
            "move played"
        );

        let next = match FinishReason::from_status(record.status, self.board.side_to_move) {
            Some(reason) => {
                self.finish(reason);
                None
            }
            None => Some(self.pending_tick()),
        };

        Ok(TickOutcome::Moved { record, next })
    }

    /// Play moves back to back, ignoring the delay, until the game ends or
    /// `max_plies` moves have been made. Starts the session if needed.
    pub fn run_to_completion(&mut self, max_plies: usize) -> GameResult<SessionStatus> {
        let Some(mut pending) = self.start().or_else(|| {
            (self.status == SessionStatus::Active).then(|| self.pending_tick())
        }) else {
            return Ok(self.status);
        };

        for _ in 0..max_plies {
            match self.tick(pending)? {
                TickOutcome::Moved { next: Some(next), .. } => pending = next,
                TickOutcome::Moved { next: None, .. }
                | TickOutcome::Finished(_)
                | TickOutcome::Stale => break,
            }
        }

        Ok(self.status)
    }

    fn finish(&mut self, reason: FinishReason) {
        self.status = SessionStatus::Finished(reason);
        info!(?reason, ply = self.history.len(), fen = %self.board.get_fen(), "game finished");
    }

    #[inline]
    fn pending_tick(&self) -> PendingTick {
        PendingTick {
            generation: self.generation,
            delay: self.delay,
        }
    }

    #[inline]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[inline]
    pub fn board(&self) -> &GameState {
        &self.board
    }

    #[inline]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Kinds captured by `color`, in capture order.
    #[inline]
    pub fn captured_by(&self, color: Color) -> &[PieceKind] {
        &self.captured_by[color.index()]
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn policy_name(&self) -> &str {
        self.policy.name()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            fen: self.board.get_fen(),
            status: self.status,
            side_to_move: self.board.side_to_move,
            fullmove_number: self.board.fullmove_number,
            history: self.history.iter().map(|r| r.san.clone()).collect(),
            captured_by_white: self.captured_by(Color::Light).to_vec(),
            captured_by_black: self.captured_by(Color::Dark).to_vec(),
            delay_ms: self.delay.as_millis() as u64,
        }
    }

    pub fn to_pgn(&self, date: DateTime<Local>) -> String {
        let result = match self.status {
            SessionStatus::Finished(FinishReason::Checkmate { winner }) => PgnResult::win_for(winner),
            SessionStatus::Finished(_) => PgnResult::Draw,
            _ => PgnResult::Unfinished,
        };
        write_pgn(
            &self.initial.get_fen(),
            self.initial.side_to_move,
            self.initial.fullmove_number,
            &self.history,
            result,
            date,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::GameError;
    use crate::moves::chess_move::Move;
    use crate::utils::long_algebraic::long_algebraic_to_move;

    /// Plays a fixed list of long algebraic moves.
    struct ScriptedPolicy {
        line: Vec<&'static str>,
        next: usize,
    }

    impl MovePolicy for ScriptedPolicy {
        fn name(&self) -> &str {
            "scripted"
        }

        fn choose_move(&mut self, _legal: &[Move], game_state: &GameState) -> GameResult<Move> {
            let text = self.line.get(self.next).ok_or(GameError::EmptyMoveSet)?;
            self.next += 1;
            long_algebraic_to_move(text, game_state)
        }
    }

    fn scripted(line: &[&'static str]) -> GameSession {
        GameSession::with_policy(
            SessionConfig::default(),
            Box::new(ScriptedPolicy {
                line: line.to_vec(),
                next: 0,
            }),
        )
        .expect("default config is valid")
    }

    fn play(session: &mut GameSession, plies: usize) -> Vec<TickOutcome> {
        let mut pending = session.start();
        let mut outcomes = Vec::new();
        while let Some(tick) = pending {
            if session.history().len() >= plies {
                break;
            }
            let outcome = session.tick(tick).expect("scripted move is legal");
            pending = match &outcome {
                TickOutcome::Moved { next, .. } => *next,
                _ => None,
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    #[test]
    fn lifecycle_transitions() {
        let mut session = GameSession::new(SessionConfig {
            seed: Some(1),
            ..SessionConfig::default()
        })
        .expect("valid config");
        assert_eq!(session.status(), SessionStatus::Idle);
        assert!(!session.pause());

        let first = session.start().expect("idle session starts");
        assert_eq!(session.status(), SessionStatus::Active);
        assert_eq!(session.start(), None);

        assert!(session.pause());
        assert_eq!(session.status(), SessionStatus::Paused);

        let resumed = session.start().expect("paused session resumes");
        assert!(resumed.generation > first.generation);
        assert_eq!(session.status(), SessionStatus::Active);
    }

    #[test]
    fn fools_mate_finishes_with_checkmate() {
        let mut session = scripted(&["f2f3", "e7e5", "g2g4", "d8h4"]);
        let outcomes = play(&mut session, 4);

        assert_eq!(outcomes.len(), 4);
        assert_eq!(
            session.status(),
            SessionStatus::Finished(FinishReason::Checkmate {
                winner: Color::Dark
            })
        );
        let last = session.history().last().expect("four moves played");
        assert_eq!(last.san, "Qh4#");
        assert_eq!(last.status, PositionStatus::Checkmate);
        assert!(LegalMoveGenerator.generate_legal_moves(session.board()).is_empty());

        // Finished sessions ignore further starts.
        assert_eq!(session.start(), None);
    }

    #[test]
    fn threefold_repetition_finishes_with_draw() {
        let shuffle = [
            "g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1", "f6g8",
        ];
        let mut session = scripted(&shuffle);
        play(&mut session, shuffle.len());

        assert_eq!(
            session.status(),
            SessionStatus::Finished(FinishReason::Draw(DrawReason::ThreefoldRepetition))
        );
        // Start position occurs after plies 0, 4 and 8.
        assert_eq!(session.history().len(), 8);
        assert_eq!(
            session.history().last().map(|r| r.status),
            Some(PositionStatus::Draw(DrawReason::ThreefoldRepetition))
        );
    }

    #[test]
    fn captures_are_attributed_to_the_capturing_color() {
        let mut session = scripted(&["e2e4", "d7d5", "e4d5", "d8d5", "b1c3"]);
        play(&mut session, 5);

        assert_eq!(session.captured_by(Color::Light), &[PieceKind::Pawn]);
        assert_eq!(session.captured_by(Color::Dark), &[PieceKind::Pawn]);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.history, vec!["e4", "d5", "exd5", "Qxd5", "Nc3"]);
        assert_eq!(snapshot.captured_by_white, vec![PieceKind::Pawn]);
    }

    #[test]
    fn pause_invalidates_pending_tick_and_resume_continues_same_game() {
        let mut session = scripted(&["e2e4", "e7e5"]);
        let first = session.start().expect("starts");
        let TickOutcome::Moved { next: Some(second), .. } = session.tick(first).expect("legal") else {
            panic!("expected a follow-up tick");
        };

        let before_pause = session.board().clone();
        assert!(session.pause());
        assert_eq!(session.tick(second).expect("no error"), TickOutcome::Stale);
        assert_eq!(session.board(), &before_pause);

        let resumed = session.start().expect("resumes");
        assert!(matches!(
            session.tick(resumed).expect("legal"),
            TickOutcome::Moved { .. }
        ));
        assert_eq!(session.history().len(), 2);
    }

    #[test]
    fn reset_during_delay_discards_pending_move() {
        let mut session = scripted(&["e2e4"]);
        let pending = session.start().expect("starts");

        session.reset();
        assert_eq!(session.status(), SessionStatus::Idle);
        assert_eq!(session.tick(pending).expect("no error"), TickOutcome::Stale);
        assert_eq!(session.board(), &GameState::new_game());
        assert!(session.history().is_empty());

        // Restarting after reset must not revive the pre-reset tick either.
        let fresh = session.start().expect("starts again");
        assert_ne!(fresh.generation, pending.generation);
        assert_eq!(session.tick(pending).expect("no error"), TickOutcome::Stale);
    }

    #[test]
    fn reset_discards_history_and_captures() {
        let mut session = scripted(&["e2e4", "d7d5", "e4d5"]);
        play(&mut session, 3);
        assert_eq!(session.history().len(), 3);

        session.reset();
        assert!(session.history().is_empty());
        assert!(session.captured_by(Color::Light).is_empty());
        assert_eq!(session.board(), &GameState::new_game());
    }

    #[test]
    fn reset_replays_the_seeded_game_from_scratch() {
        let config = SessionConfig {
            seed: Some(77),
            ..SessionConfig::default()
        };
        let mut fresh = GameSession::new(config.clone()).expect("valid config");
        fresh.run_to_completion(30).expect("runs");

        let mut reused = GameSession::new(config).expect("valid config");
        reused.run_to_completion(30).expect("runs");
        reused.reset();
        reused.run_to_completion(30).expect("runs");

        assert_eq!(reused.snapshot().history, fresh.snapshot().history);
        assert_eq!(reused.board(), fresh.board());
    }

    #[test]
    fn set_delay_validates_and_applies_to_new_ticks() {
        let mut session = scripted(&[]);
        assert!(session.set_delay(300).is_err());
        assert_eq!(session.delay(), Duration::from_millis(1000));

        session.set_delay(2500).expect("valid delay");
        assert_eq!(session.config().delay_ms, 2500);
        let tick = session.start().expect("starts");
        assert_eq!(tick.delay, Duration::from_millis(2500));
    }

    #[test]
    fn policy_errors_propagate_without_touching_state() {
        let mut session = scripted(&[]);
        let tick = session.start().expect("starts");
        assert_eq!(session.tick(tick), Err(GameError::EmptyMoveSet));
        assert!(session.history().is_empty());
        assert_eq!(session.board(), &GameState::new_game());
    }

    #[test]
    fn terminal_start_position_finishes_without_moving() {
        let mut session = GameSession::from_fen(
            "7k/5Q2/6K1/8/8/8/8/8 b - - 0 1",
            SessionConfig {
                seed: Some(2),
                ..SessionConfig::default()
            },
        )
        .expect("valid config");
        let tick = session.start().expect("starts");
        assert_eq!(
            session.tick(tick).expect("no error"),
            TickOutcome::Finished(FinishReason::Stalemate)
        );
        assert!(session.history().is_empty());
    }

    #[test]
    fn seeded_greedy_game_runs_to_a_result() {
        let mut session = GameSession::new(SessionConfig {
            seed: Some(2024),
            ..SessionConfig::default()
        })
        .expect("valid config");
        let status = session.run_to_completion(6000).expect("policy never errs");
        assert!(matches!(status, SessionStatus::Finished(_)));
        assert!(!session.history().is_empty());
    }
}
