//! Actor and turn state.
//!
//! `TurnState` is the part of a session every game shares: who holds the
//! turn and the counters the renderer displays (turn number, steps, score,
//! remaining life). Game-specific data (the board, goal sets, the pusher's
//! position) lives in each rule set's own state type.

use serde::{Deserialize, Serialize};

use super::side::Actor;

/// Whose turn it is plus per-game counters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    /// Actor expected to move next.
    pub active: Actor,

    /// Turn number (starts at 1, advances on every accepted move).
    pub turn_number: u32,

    /// Accepted moves so far.
    pub steps: u32,

    /// Points scored (match games).
    pub score: i64,

    /// Moves left before the game is lost, for games with a move budget.
    pub life: Option<u32>,
}

impl TurnState {
    /// Turn state for a game starting with `active`.
    #[must_use]
    pub fn new(active: Actor) -> Self {
        Self {
            active,
            turn_number: 1,
            steps: 0,
            score: 0,
            life: None,
        }
    }

    /// Set a move budget.
    #[must_use]
    pub fn with_life(mut self, life: u32) -> Self {
        self.life = Some(life);
        self
    }

    /// Record an accepted move.
    pub fn advance(&mut self) {
        self.turn_number += 1;
        self.steps += 1;
    }

    /// Hand the turn to `actor`.
    pub fn set_active(&mut self, actor: Actor) {
        self.active = actor;
    }

    /// Add points to the score, saturating at the `i64` bounds.
    pub fn add_score(&mut self, points: i64) {
        self.score = self.score.saturating_add(points);
    }

    /// Spend one unit of life. Returns the remaining life, if tracked.
    pub fn spend_life(&mut self) -> Option<u32> {
        if let Some(life) = self.life.as_mut() {
            *life = life.saturating_sub(1);
        }
        self.life
    }

    /// True once a tracked life budget reaches zero.
    #[must_use]
    pub fn is_out_of_life(&self) -> bool {
        self.life == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::side::Side;

    #[test]
    fn test_new_turn_state() {
        let turn = TurnState::new(Actor::Side(Side::Black));

        assert_eq!(turn.turn_number, 1);
        assert_eq!(turn.steps, 0);
        assert_eq!(turn.score, 0);
        assert_eq!(turn.life, None);
        assert!(!turn.is_out_of_life());
    }

    #[test]
    fn test_advance_and_score() {
        let mut turn = TurnState::new(Actor::Solo);

        turn.advance();
        turn.advance();
        turn.add_score(30);

        assert_eq!(turn.turn_number, 3);
        assert_eq!(turn.steps, 2);
        assert_eq!(turn.score, 30);
    }

    #[test]
    fn test_score_saturates() {
        let mut turn = TurnState::new(Actor::Solo);
        turn.add_score(i64::MAX);
        turn.add_score(10);
        assert_eq!(turn.score, i64::MAX);
    }

    #[test]
    fn test_life_saturates() {
        let mut turn = TurnState::new(Actor::Solo).with_life(1);

        assert_eq!(turn.spend_life(), Some(0));
        assert!(turn.is_out_of_life());
        assert_eq!(turn.spend_life(), Some(0));
    }

    #[test]
    fn test_untracked_life() {
        let mut turn = TurnState::new(Actor::Solo);
        assert_eq!(turn.spend_life(), None);
        assert!(!turn.is_out_of_life());
    }
}
