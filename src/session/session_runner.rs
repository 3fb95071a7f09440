//! Channel-driven loop that owns a `GameSession` and fires its ticks on time.
//!
//! Commands arrive on an `mpsc` receiver; the loop sleeps in `recv_timeout`
//! until either the next tick deadline or the next command, whichever is first.

use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::time::Instant;

use chrono::Local;
use tracing::{debug, warn};

use crate::errors::GameResult;
use crate::moves::move_record::MoveRecord;
use crate::session::game_session::{GameSession, TickOutcome};
use crate::session::snapshot::GameSnapshot;
use crate::session::tick_queue::TickQueue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    Reset,
    SetDelay(u64),
    Show,
    Pgn,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    Moved {
        record: MoveRecord,
        snapshot: GameSnapshot,
    },
    /// Emitted after start, pause, reset, delay changes and game end.
    StateChanged(GameSnapshot),
    Snapshot(GameSnapshot),
    Pgn(String),
    Rejected(String),
}

/// Parse one line of terminal input.
pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(cmd) = parts.next() else {
        return Err("empty command".to_owned());
    };

    match cmd.to_ascii_lowercase().as_str() {
        "start" | "resume" => Ok(SessionCommand::Start),
        "pause" => Ok(SessionCommand::Pause),
        "reset" | "new" => Ok(SessionCommand::Reset),
        "delay" => {
            let value = parts.next().ok_or("delay requires a value in ms")?;
            value
                .parse::<u64>()
                .map(SessionCommand::SetDelay)
                .map_err(|_| format!("invalid delay '{value}'"))
        }
        "show" | "status" => Ok(SessionCommand::Show),
        "pgn" => Ok(SessionCommand::Pgn),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        other => Err(format!("unknown command '{other}'")),
    }
}

/// Run until `Quit` arrives or the command sender is dropped.
///
/// Returns the session so callers can inspect the final state. Events are
/// best-effort: a dropped event receiver does not stop the loop.
pub fn run_session_loop(
    mut session: GameSession,
    commands: Receiver<SessionCommand>,
    events: Sender<SessionEvent>,
) -> GameResult<GameSession> {
    let mut queue = TickQueue::new();

    loop {
        while let Some(tick) = queue.pop_due(Instant::now()) {
            match session.tick(tick)? {
                TickOutcome::Stale => {}
                TickOutcome::Moved { record, next } => {
                    let _ = events.send(SessionEvent::Moved {
                        record,
                        snapshot: session.snapshot(),
                    });
                    match next {
                        Some(next) => queue.schedule(next, Instant::now()),
                        None => {
                            let _ = events.send(SessionEvent::StateChanged(session.snapshot()));
                        }
                    }
                }
                TickOutcome::Finished(_) => {
                    let _ = events.send(SessionEvent::StateChanged(session.snapshot()));
                }
            }
        }

        let received = match queue.next_deadline() {
            Some(deadline) => {
                match commands.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
                    Ok(command) => Some(command),
                    Err(RecvTimeoutError::Timeout) => None,
                    Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            None => match commands.recv() {
                Ok(command) => Some(command),
                Err(_) => break,
            },
        };

        let Some(command) = received else {
            continue;
        };
        debug!(?command, "session command");

        match command {
            SessionCommand::Start => {
                if let Some(tick) = session.start() {
                    queue.schedule(tick, Instant::now());
                }
                let _ = events.send(SessionEvent::StateChanged(session.snapshot()));
            }
            SessionCommand::Pause => {
                session.pause();
                queue.cancel_stale(session.generation());
                let _ = events.send(SessionEvent::StateChanged(session.snapshot()));
            }
            SessionCommand::Reset => {
                session.reset();
                queue.cancel_stale(session.generation());
                let _ = events.send(SessionEvent::StateChanged(session.snapshot()));
            }
            SessionCommand::SetDelay(ms) => match session.set_delay(ms) {
                Ok(()) => {
                    let _ = events.send(SessionEvent::StateChanged(session.snapshot()));
                }
                Err(err) => {
                    warn!(%err, "delay change refused");
                    let _ = events.send(SessionEvent::Rejected(err.to_string()));
                }
            },
            SessionCommand::Show => {
                let _ = events.send(SessionEvent::Snapshot(session.snapshot()));
            }
            SessionCommand::Pgn => {
                let _ = events.send(SessionEvent::Pgn(session.to_pgn(Local::now())));
            }
            SessionCommand::Quit => break,
        }
    }

    Ok(session)
}
