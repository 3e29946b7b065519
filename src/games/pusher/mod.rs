//! Sokoban-style token pushing.
//!
//! The pusher walks one cell per move and pushes any token in its way, as
//! long as the cell behind the token is open floor. The level is solved when
//! every goal holds a token.

pub mod game;
pub mod level;

pub use game::{PushEffects, PushReport, PusherRules, PusherState};
pub use level::{classify_floor, FloorClass, Level, Tile};
