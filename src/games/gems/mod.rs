//! Match-three swap game.
//!
//! The player swaps two adjacent gems. A swap that lines up three or more
//! identical gems clears them, scores, lets the column fall and refills from
//! the top; the cascade repeats until nothing matches. A swap that matches
//! nothing is reversed. The game ends when no single swap can make a match.

pub mod game;

pub use game::{GemReport, GemRules, GemState, SwapEffects, TokenId};
