use std::error::Error;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::channel;
use std::thread;

use autoplay_chess::engines::engine_trait::PolicyKind;
use autoplay_chess::game_state::game_state::GameState;
use autoplay_chess::session::game_session::GameSession;
use autoplay_chess::session::session_config::{SessionConfig, DEFAULT_DELAY_MS};
use autoplay_chess::session::session_runner::{
    parse_command, run_session_loop, SessionCommand, SessionEvent,
};
use autoplay_chess::session::snapshot::GameSnapshot;
use autoplay_chess::utils::render_game_state::render_game_state;
use chrono::Local;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Upper bound on plies for `--headless` runs.
const HEADLESS_MAX_PLIES: usize = 2000;

/// Watch a move policy play both sides of a chess game.
///
/// Commands on stdin: start, pause, reset, delay <ms>, show, pgn, quit.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Delay between moves in milliseconds (500..=5000, steps of 250).
    #[arg(long, default_value_t = DEFAULT_DELAY_MS)]
    delay_ms: u64,

    /// Seed for the policy's random source.
    #[arg(long)]
    seed: Option<u64>,

    /// Move policy: greedy or random.
    #[arg(long, default_value_t = PolicyKind::Greedy)]
    policy: PolicyKind,

    /// Start from this FEN instead of the standard position.
    #[arg(long)]
    fen: Option<String>,

    /// Start playing immediately.
    #[arg(long, default_value_t = false)]
    autostart: bool,

    /// Print snapshots as JSON lines.
    #[arg(long, default_value_t = false)]
    json: bool,

    /// Play the whole game without delays, then print the PGN.
    #[arg(long, default_value_t = false)]
    headless: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let mut session = GameSession::new(SessionConfig {
        delay_ms: cli.delay_ms,
        seed: cli.seed,
        policy: cli.policy,
        initial_fen: cli.fen.clone(),
    })?;
    info!(policy = session.policy_name(), delay_ms = cli.delay_ms, "session created");

    if cli.headless {
        session.run_to_completion(HEADLESS_MAX_PLIES)?;
        print_snapshot(&session.snapshot(), cli.json)?;
        println!("{}", session.to_pgn(Local::now()));
        return Ok(());
    }

    let (command_tx, command_rx) = channel::<SessionCommand>();
    let (event_tx, event_rx) = channel::<SessionEvent>();

    print_snapshot(&session.snapshot(), cli.json)?;
    if cli.autostart {
        command_tx.send(SessionCommand::Start)?;
    }

    let session_thread = thread::spawn(move || run_session_loop(session, command_rx, event_tx));

    // Dropping the sender on EOF or `quit` ends the session loop.
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line.trim().is_empty() {
                continue;
            }
            match parse_command(&line) {
                Ok(command) => {
                    if command_tx.send(command).is_err() || command == SessionCommand::Quit {
                        break;
                    }
                }
                Err(msg) => eprintln!("{msg}"),
            }
        }
    });

    for event in event_rx {
        match event {
            SessionEvent::Moved { record, snapshot } => {
                if !cli.json {
                    println!("{}. {}", snapshot.history.len(), record.san);
                }
                print_snapshot(&snapshot, cli.json)?;
            }
            SessionEvent::StateChanged(snapshot) | SessionEvent::Snapshot(snapshot) => {
                print_snapshot(&snapshot, cli.json)?;
            }
            SessionEvent::Pgn(pgn) => println!("{pgn}"),
            SessionEvent::Rejected(reason) => eprintln!("{reason}"),
        }
        io::stdout().flush()?;
    }

    let session = session_thread
        .join()
        .map_err(|_| "session loop panicked")??;
    info!(plies = session.history().len(), status = ?session.status(), "session closed");
    Ok(())
}

fn print_snapshot(snapshot: &GameSnapshot, json: bool) -> Result<(), Box<dyn Error>> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        return Ok(());
    }

    let board = GameState::from_fen(&snapshot.fen)?;
    println!("{}", render_game_state(&board));
    println!(
        "status: {:?}  to move: {:?}  move: {}  delay: {} ms",
        snapshot.status, snapshot.side_to_move, snapshot.fullmove_number, snapshot.delay_ms
    );
    Ok(())
}
