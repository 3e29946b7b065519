//! Flood-recolor puzzle.
//!
//! The board starts as random color patches. Each move recolors the region
//! connected to the top-left cell, which then absorbs neighbors of the new
//! color. The puzzle is solved when the board is one color and lost when the
//! move budget runs out first.

pub mod game;

pub use game::{generate_board, InkReport, InkRules, InkState, RecolorEffects};
