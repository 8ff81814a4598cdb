//! Error types for the game state, the agent and configuration

use std::path::PathBuf;

use crate::board::{Coord, Player};

/// Errors raised at the game-state mutation boundary and by the agent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("coordinate ({r}, {q}) is outside the {size}x{size} board")]
    InvalidCoordinate { r: i32, q: i32, size: u8 },

    #[error("board size {0} is not supported")]
    InvalidBoardSize(u8),

    #[error("illegal mutation: {0}")]
    IllegalMutation(#[from] IllegalMutation),

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("invalid agent configuration: {0}")]
    InvalidConfig(String),
}

/// Mutations that contradict the tracked game state.
///
/// Seeing one of these means the agent and the referee disagree about the
/// board; it is not recoverable locally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IllegalMutation {
    #[error("cell {0} is not available")]
    Unavailable(Coord),

    #[error("steal is only allowed as the second player's first move")]
    StealOutOfWindow,

    #[error("swap rule does not allow stealing the opening at {0}")]
    StealNotEligible(Coord),

    #[error("expected {expected} to move, got {actual}")]
    OutOfTurn { expected: Player, actual: Player },
}

/// Errors from parsing the text form of an action.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseActionError {
    #[error("empty action")]
    Empty,

    #[error("unknown action keyword '{0}'")]
    UnknownKeyword(String),

    #[error("malformed action '{0}', expected 'PLACE r q' or 'STEAL'")]
    Malformed(String),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
