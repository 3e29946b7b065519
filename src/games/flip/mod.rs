//! Bracket-capture game on an 8x8 board (Othello rules).
//!
//! Two sides alternate placing discs. A placement is legal only if it
//! brackets at least one straight line of opposing discs between the new disc
//! and another of the mover's discs; every bracketed disc flips. A side with
//! no legal placement passes. The game ends when neither side can move.

pub mod game;
pub mod policy;

pub use game::{bracket_flips, flip_cells, FlipEffects, FlipReport, FlipRules, FlipState};
pub use policy::GreedyCornerPolicy;
