//! Core engine types: coordinates, boards, actors, moves, turn state, RNG,
//! configuration and errors.
//!
//! Everything here is game-agnostic. Rule sets in `games` build on these
//! types rather than extending them.

pub mod board;
pub mod config;
pub mod coord;
pub mod error;
pub mod moves;
pub mod rng;
pub mod side;
pub mod state;

pub use board::{Board, Glyph};
pub use config::{
    Difficulty, EngineConfig, FlipConfig, GemConfig, InkConfig, InkPreset, Scoring, StartingSide,
};
pub use coord::{Coord, Direction, COMPASS};
pub use error::{ConfigError, EngineError, EngineResult, Rejection};
pub use moves::{InkColor, Move};
pub use rng::{GameRng, GameRngState};
pub use side::{Actor, Side, SideMap};
pub use state::TurnState;
