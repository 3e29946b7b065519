//! Runs of three or more identical tokens.
//!
//! ## Resolver
//!
//! `find_matches` reports every maximal horizontal or vertical run of length
//! three or more, once per run.
//!
//! ## Cascade
//!
//! Clearing, gravity, refill and scoring, plus the loop that repeats them
//! until the board settles.

pub mod cascade;
pub mod resolver;

pub use cascade::{
    apply_gravity, clear_groups, has_possible_swap, refill, run_cascade, score_groups,
    swap_forms_match, CascadeReport, CascadeStep,
};
pub use resolver::{find_matches, Axis, MatchGroup};
