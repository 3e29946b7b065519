//! Rule-set trait for game implementations.
//!
//! Games implement `RuleSet` to define their rules:
//! - What moves are legal, and the effects they induce
//! - How accepted moves modify state
//! - Who moves next and when the game is over

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::core::error::{EngineResult, Rejection};
use crate::core::moves::Move;
use crate::core::rng::GameRng;
use crate::core::side::Side;
use crate::core::state::TurnState;

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// One side finished with strictly more discs.
    Winner(Side),
    /// Both sides finished with the same disc count.
    Tie,
    /// A solo puzzle was completed.
    Solved,
    /// A solo game ran out of moves or life.
    Exhausted,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: Side) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Verdict of move validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome<E> {
    /// The move breaks a rule; nothing may change.
    Rejected(Rejection),
    /// The move is legal and induces these effects.
    Accepted(E),
}

impl<E> Outcome<E> {
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Outcome::Accepted(_))
    }

    /// The effects of an accepted move.
    pub fn accepted(self) -> Option<E> {
        match self {
            Outcome::Accepted(effects) => Some(effects),
            Outcome::Rejected(_) => None,
        }
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            Outcome::Rejected(reason) => Some(*reason),
            Outcome::Accepted(_) => None,
        }
    }
}

/// Rule-set trait.
///
/// One implementation per game; the session drives all of them through the
/// same loop.
///
/// ## Implementation Notes
///
/// - `validate`: Must not mutate anything. Off-board coordinates are
///   `Err(OutOfBounds)`, rule failures are `Ok(Outcome::Rejected(_))`.
/// - `resolve`: Called on scratch copies; an error discards them.
/// - `end_turn`: Hands the turn on. Default keeps the current actor.
/// - `check_terminal`: Return `None` if the game continues.
pub trait RuleSet {
    /// Game-specific state (board plus extras).
    type State: Clone + Debug;
    /// What an accepted move induces, computed during validation.
    type Effects: Clone + Debug;
    /// What resolution did, for the renderer.
    type Resolution: Clone + Debug;

    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Build the initial state.
    fn setup(&self, rng: &mut GameRng) -> EngineResult<(Self::State, TurnState)>;

    /// Decide whether `mv` is legal for the active actor.
    fn validate(
        &self,
        state: &Self::State,
        turn: &TurnState,
        mv: &Move,
    ) -> EngineResult<Outcome<Self::Effects>>;

    /// Apply the effects of an accepted move.
    fn resolve(
        &self,
        state: &mut Self::State,
        turn: &mut TurnState,
        effects: Self::Effects,
        rng: &mut GameRng,
    ) -> EngineResult<Self::Resolution>;

    /// Pick the actor for the next turn.
    fn end_turn(&self, _state: &Self::State, _turn: &mut TurnState) {}

    /// Check if the game is over.
    fn check_terminal(&self, state: &Self::State, turn: &TurnState) -> Option<GameResult>;

    /// All moves the active actor could legally make.
    fn legal_moves(&self, state: &Self::State, turn: &TurnState) -> Vec<Move>;

    /// Advance timers between moves. Default does nothing.
    fn tick(&self, _state: &Self::State, _turn: &mut TurnState) {}
}
