//! # rust-grid
//!
//! A turn-based grid-game state engine.
//!
//! ## Design Principles
//!
//! 1. **One Loop, Many Games**: Each game is a `RuleSet`. The session runs
//!    the same validate, resolve, commit, check cycle for all of them.
//!
//! 2. **Atomic Turns**: Moves resolve on scratch copies and commit only on
//!    success. A rejected or failed move leaves the game untouched.
//!
//! 3. **Deterministic**: All randomness comes from a seeded `GameRng`, so the
//!    same seed and moves replay the same game.
//!
//! ## Architecture
//!
//! - **Persistent Boards**: Cells live in `im-rs` vectors, so speculative
//!   copies cost O(1) until written.
//!
//! - **Explicit Stacks**: Flood fill never recurses, so region size is
//!   bounded by the board rather than the call stack.
//!
//! ## Modules
//!
//! - `core`: Coordinates, boards, actors, moves, turn state, RNG, config, errors
//! - `rules`: `RuleSet` and `Policy` traits
//! - `regions`: Flood fill and connected regions
//! - `matching`: Run detection and match-three cascades
//! - `session`: The turn controller
//! - `games`: Capture, match-three, ink and pusher rule sets

pub mod core;
pub mod games;
pub mod matching;
pub mod regions;
pub mod rules;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Actor, Board, ConfigError, Coord, Direction, EngineConfig, EngineError, EngineResult,
    GameRng, GameRngState, InkColor, Move, Rejection, Side, SideMap, TurnState,
};

pub use crate::rules::{GameResult, Outcome, Policy, RuleSet};

pub use crate::session::{Phase, Session, StepReport};

pub use crate::regions::{flood_fill, region, Region};

pub use crate::matching::{find_matches, Axis, MatchGroup};

pub use crate::games::flip::{FlipRules, GreedyCornerPolicy};
pub use crate::games::gems::{GemRules, TokenId};
pub use crate::games::ink::InkRules;
pub use crate::games::pusher::{Level, PusherRules, Tile};
