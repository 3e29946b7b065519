//! Push rules.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::coord::{Coord, Direction};
use crate::core::error::{EngineResult, Rejection};
use crate::core::moves::Move;
use crate::core::rng::GameRng;
use crate::core::side::Actor;
use crate::core::state::TurnState;
use crate::rules::{GameResult, Outcome, RuleSet};

use super::level::Level;

/// Positions that change during play.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PusherState {
    pub actor: Coord,
    pub tokens: FxHashSet<Coord>,
}

impl PusherState {
    /// Goals currently holding a token.
    #[must_use]
    pub fn covered(&self, level: &Level) -> usize {
        level.goals().iter().filter(|g| self.tokens.contains(g)).count()
    }
}

/// A validated step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PushEffects {
    pub dir: Direction,
    pub from: Coord,
    pub to: Coord,
    /// Token moved from the first cell to the second.
    pub pushed: Option<(Coord, Coord)>,
}

/// What a step did.
pub type PushReport = PushEffects;

/// Rules for one level.
#[derive(Clone, Debug)]
pub struct PusherRules {
    level: Level,
}

impl PusherRules {
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    #[must_use]
    pub fn level(&self) -> &Level {
        &self.level
    }

    fn is_open(&self, state: &PusherState, at: Coord) -> bool {
        self.level.map().in_bounds(at) && !self.level.is_wall(at) && !state.tokens.contains(&at)
    }
}

impl RuleSet for PusherRules {
    type State = PusherState;
    type Effects = PushEffects;
    type Resolution = PushReport;

    fn name(&self) -> &'static str {
        "pusher"
    }

    fn setup(&self, _rng: &mut GameRng) -> EngineResult<(PusherState, TurnState)> {
        let state = PusherState {
            actor: self.level.start(),
            tokens: self.level.tokens().clone(),
        };
        Ok((state, TurnState::new(Actor::Solo)))
    }

    fn validate(&self, state: &PusherState, _turn: &TurnState, mv: &Move) -> EngineResult<Outcome<PushEffects>> {
        let Move::Step(dir) = *mv else {
            return Ok(Outcome::Rejected(Rejection::WrongMoveKind));
        };
        let from = state.actor;
        let to = from.step(dir);
        self.level.map().check(to)?;

        if self.level.is_wall(to) {
            return Ok(Outcome::Rejected(Rejection::Blocked));
        }

        let pushed = if state.tokens.contains(&to) {
            let beyond = to.step(dir);
            if !self.is_open(state, beyond) {
                return Ok(Outcome::Rejected(Rejection::PushBlocked));
            }
            Some((to, beyond))
        } else {
            None
        };

        Ok(Outcome::Accepted(PushEffects { dir, from, to, pushed }))
    }

    fn resolve(
        &self,
        state: &mut PusherState,
        _turn: &mut TurnState,
        effects: PushEffects,
        _rng: &mut GameRng,
    ) -> EngineResult<PushReport> {
        if let Some((token_from, token_to)) = effects.pushed {
            state.tokens.remove(&token_from);
            state.tokens.insert(token_to);
        }
        state.actor = effects.to;
        Ok(effects)
    }

    fn check_terminal(&self, state: &PusherState, _turn: &TurnState) -> Option<GameResult> {
        if self.level.goals().iter().all(|g| state.tokens.contains(g)) {
            Some(GameResult::Solved)
        } else {
            None
        }
    }

    fn legal_moves(&self, state: &PusherState, turn: &TurnState) -> Vec<Move> {
        Direction::ALL
            .into_iter()
            .map(Move::Step)
            .filter(|mv| matches!(self.validate(state, turn, mv), Ok(Outcome::Accepted(_))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::board::Board;
    use crate::core::error::EngineError;
    use crate::games::pusher::level::Tile;

    /// `#` wall, `@` start, `$` token, `.` goal, `*` token on goal.
    fn level(rows: &[&str]) -> Level {
        let mut start = Coord::default();
        let mut goals = Vec::new();
        let mut tokens = Vec::new();
        let mut tiles = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            let mut line = Vec::new();
            for (x, c) in row.chars().enumerate() {
                let at = Coord::new(x as i32, y as i32);
                match c {
                    '@' => start = at,
                    '$' => tokens.push(at),
                    '.' => goals.push(at),
                    '*' => {
                        tokens.push(at);
                        goals.push(at);
                    }
                    _ => {}
                }
                line.push(if c == '#' { Tile::Wall } else { Tile::Floor });
            }
            tiles.push(line);
        }
        Level::new(Board::from_rows(tiles).unwrap(), start, goals, tokens).unwrap()
    }

    #[test]
    fn test_walk_and_push() {
        let rules = PusherRules::new(level(&["#####", "#@$.#", "#####"]));
        let (state, turn) = rules.setup(&mut GameRng::new(0)).unwrap();

        let outcome = rules.validate(&state, &turn, &Move::Step(Direction::Right)).unwrap();
        let effects = outcome.accepted().unwrap();
        assert_eq!(effects.pushed, Some((Coord::new(2, 1), Coord::new(3, 1))));
    }

    #[test]
    fn test_wall_blocks() {
        let rules = PusherRules::new(level(&["#####", "#@$.#", "#####"]));
        let (state, turn) = rules.setup(&mut GameRng::new(0)).unwrap();

        let up = rules.validate(&state, &turn, &Move::Step(Direction::Up)).unwrap();
        assert_eq!(up.rejection(), Some(Rejection::Blocked));
    }

    #[test]
    fn test_push_into_token_is_blocked() {
        let rules = PusherRules::new(level(&["######", "#@$$.#", "######"]));
        let (state, turn) = rules.setup(&mut GameRng::new(0)).unwrap();

        let right = rules.validate(&state, &turn, &Move::Step(Direction::Right)).unwrap();
        assert_eq!(right.rejection(), Some(Rejection::PushBlocked));
    }

    #[test]
    fn test_edge_of_board() {
        let rules = PusherRules::new(level(&["@$.", "   "]));
        let (state, turn) = rules.setup(&mut GameRng::new(0)).unwrap();

        let left = rules.validate(&state, &turn, &Move::Step(Direction::Left));
        assert!(matches!(left, Err(EngineError::OutOfBounds { x: -1, y: 0, .. })));
        assert_eq!(rules.legal_moves(&state, &turn), vec![Move::Step(Direction::Right), Move::Step(Direction::Down)]);
    }

    #[test]
    fn test_token_on_goal_counts() {
        let rules = PusherRules::new(level(&["#####", "#@*$.", "#####"]));
        let (state, turn) = rules.setup(&mut GameRng::new(0)).unwrap();

        assert_eq!(state.covered(rules.level()), 1);
        assert_eq!(rules.check_terminal(&state, &turn), None);
    }
}
