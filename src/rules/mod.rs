//! Rule-set traits for game implementations.
//!
//! Games implement `RuleSet` to define:
//! - The initial board and turn state
//! - Which moves are legal and what they induce
//! - How accepted moves mutate state
//! - Terminal conditions
//!
//! The session calls into `RuleSet` but never interprets game-specific
//! concepts directly.

pub mod engine;
pub mod policy;

pub use engine::{GameResult, Outcome, RuleSet};
pub use policy::{FirstLegal, Policy};
