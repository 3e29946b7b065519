//! Engine and configuration errors.
//!
//! The engine distinguishes three kinds of failure:
//! - `OutOfBounds`: a coordinate fell outside the board. Rejected before any
//!   mutation, never fatal.
//! - `IllegalMove`: the move breaks the active game's rules. The move is a
//!   no-op and the turn does not advance.
//! - `InvariantViolation`: the board reached a state a precondition assumed
//!   impossible. The operation aborts and committed state is left untouched.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::coord::Coord;

/// Why a move was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    /// Target cell already holds a disc.
    Occupied,
    /// Placing here would not bracket any opponent line.
    NoCaptures,
    /// Swap targets are not orthogonal neighbors.
    NotAdjacent,
    /// Swap target holds no token.
    EmptyCell,
    /// Swap is legal in shape but forms no match; it must be reversed.
    NullSwap { from: Coord, to: Coord },
    /// Destination is a wall.
    Blocked,
    /// The token in the way cannot be pushed (wall, token or board edge behind it).
    PushBlocked,
    /// Recolor would not change the origin region.
    SameColor,
    /// Color index is outside the palette.
    UnknownColor,
    /// Move variant does not belong to this game.
    WrongMoveKind,
    /// Move submitted for an actor who does not hold the turn.
    WrongActor,
    /// Game already ended.
    GameOver,
}

impl std::fmt::Display for Rejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rejection::Occupied => write!(f, "cell is occupied"),
            Rejection::NoCaptures => write!(f, "move captures nothing"),
            Rejection::NotAdjacent => write!(f, "cells are not adjacent"),
            Rejection::EmptyCell => write!(f, "cell holds no token"),
            Rejection::NullSwap { from, to } => write!(f, "swap {} <-> {} makes no match", from, to),
            Rejection::Blocked => write!(f, "destination is a wall"),
            Rejection::PushBlocked => write!(f, "token cannot be pushed"),
            Rejection::SameColor => write!(f, "origin already has that color"),
            Rejection::UnknownColor => write!(f, "color is not in the palette"),
            Rejection::WrongMoveKind => write!(f, "move kind not used by this game"),
            Rejection::WrongActor => write!(f, "not this actor's turn"),
            Rejection::GameOver => write!(f, "game is over"),
        }
    }
}

/// Errors raised by board and rule operations.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} board")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("illegal move: {0}")]
    IllegalMove(Rejection),

    #[error("invariant violated: {message}")]
    InvariantViolation { message: String },
}

impl EngineError {
    /// Build an `InvariantViolation` from anything printable.
    pub fn invariant(message: impl Into<String>) -> Self {
        EngineError::InvariantViolation {
            message: message.into(),
        }
    }

    /// The rejection reason, if this is an `IllegalMove`.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            EngineError::IllegalMove(reason) => Some(*reason),
            _ => None,
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Validation(String),
}
