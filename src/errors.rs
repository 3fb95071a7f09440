//! Error types shared by the rules engine and the game session.

use thiserror::Error;

/// Errors surfaced by parsing, move application, policies, and session commands.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    #[error("invalid square: {0}")]
    InvalidSquare(String),

    #[error("invalid long algebraic move: {0}")]
    InvalidMoveText(String),

    /// The move is not a member of the position's legal move set.
    #[error("illegal move {mv} in position {fen}")]
    IllegalMove { mv: String, fen: String },

    /// A policy was asked to choose from an empty move list.
    #[error("move policy invoked with no legal moves")]
    EmptyMoveSet,

    #[error("delay {ms} ms rejected: must be {min}..={max} in steps of {step}")]
    DelayOutOfRange { ms: u64, min: u64, max: u64, step: u64 },
}

pub type GameResult<T> = Result<T, GameError>;
