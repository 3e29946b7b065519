//! Automated move selection.
//!
//! A `Policy` picks a move for whoever holds the turn. Policies are
//! trait-based so each game can ship its own heuristic.

use crate::core::moves::Move;
use crate::core::rng::GameRng;
use crate::core::state::TurnState;

use super::engine::RuleSet;

/// Chooses a move for the active actor.
pub trait Policy<R: RuleSet> {
    /// Pick a legal move, or `None` if the actor has none.
    fn choose(&self, rules: &R, state: &R::State, turn: &TurnState, rng: &mut GameRng)
        -> Option<Move>;
}

/// Plays the first legal move in the rule set's enumeration order.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstLegal;

impl<R: RuleSet> Policy<R> for FirstLegal {
    fn choose(&self, rules: &R, state: &R::State, turn: &TurnState, _rng: &mut GameRng) -> Option<Move> {
        rules.legal_moves(state, turn).into_iter().next()
    }
}
