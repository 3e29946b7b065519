//! Turn controller.
//!
//! `Session` owns one game's state and drives every round through the same
//! phases: validate the move, resolve it on scratch copies, commit, hand the
//! turn on, and check for the end of the game.

pub mod controller;

pub use controller::{Phase, Session, StepReport};
