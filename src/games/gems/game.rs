//! Match-three rules.

use serde::{Deserialize, Serialize};

use crate::core::board::{Board, Glyph};
use crate::core::config::GemConfig;
use crate::core::coord::{Coord, Direction};
use crate::core::error::{ConfigError, EngineResult, Rejection};
use crate::core::moves::Move;
use crate::core::rng::GameRng;
use crate::core::side::Actor;
use crate::core::state::TurnState;
use crate::matching::{has_possible_swap, refill, run_cascade, swap_forms_match, CascadeReport};
use crate::rules::{GameResult, Outcome, RuleSet};

/// Gem kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub u8);

impl Glyph for TokenId {
    fn glyph(&self) -> char {
        char::from(b'a' + self.0 % 26)
    }
}

/// Match game state. `None` cells only appear mid-cascade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GemState {
    pub board: Board<Option<TokenId>>,
}

/// A validated swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapEffects {
    pub from: Coord,
    pub to: Coord,
}

/// What a swap did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GemReport {
    pub from: Coord,
    pub to: Coord,
    pub cascade: CascadeReport,
}

/// Match-three rules.
#[derive(Clone, Debug)]
pub struct GemRules {
    config: GemConfig,
    kinds: Vec<TokenId>,
}

impl Default for GemRules {
    fn default() -> Self {
        Self::from_valid(GemConfig::default())
    }
}

impl GemRules {
    pub fn new(config: GemConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    fn from_valid(config: GemConfig) -> Self {
        let kinds = (0..config.kinds).map(TokenId).collect();
        Self { config, kinds }
    }

    #[must_use]
    pub fn config(&self) -> &GemConfig {
        &self.config
    }

    #[must_use]
    pub fn kinds(&self) -> &[TokenId] {
        &self.kinds
    }
}

impl RuleSet for GemRules {
    type State = GemState;
    type Effects = SwapEffects;
    type Resolution = GemReport;

    fn name(&self) -> &'static str {
        "gems"
    }

    fn setup(&self, rng: &mut GameRng) -> EngineResult<(GemState, TurnState)> {
        let mut board = Board::new(self.config.width, self.config.height, None);
        refill(&mut board, &self.kinds, rng)?;
        run_cascade(&mut board, &self.kinds, &self.config.scoring, rng)?;
        Ok((GemState { board }, TurnState::new(Actor::Solo)))
    }

    fn validate(&self, state: &GemState, _turn: &TurnState, mv: &Move) -> EngineResult<Outcome<SwapEffects>> {
        let Move::Swap { from, to } = *mv else {
            return Ok(Outcome::Rejected(Rejection::WrongMoveKind));
        };
        state.board.check(from)?;
        state.board.check(to)?;

        if !from.is_adjacent(to) {
            return Ok(Outcome::Rejected(Rejection::NotAdjacent));
        }
        if state.board.get(from).flatten().is_none() || state.board.get(to).flatten().is_none() {
            return Ok(Outcome::Rejected(Rejection::EmptyCell));
        }
        if !swap_forms_match(&state.board, from, to)? {
            return Ok(Outcome::Rejected(Rejection::NullSwap { from, to }));
        }
        Ok(Outcome::Accepted(SwapEffects { from, to }))
    }

    fn resolve(
        &self,
        state: &mut GemState,
        turn: &mut TurnState,
        effects: SwapEffects,
        rng: &mut GameRng,
    ) -> EngineResult<GemReport> {
        state.board.swap(effects.from, effects.to)?;
        let cascade = run_cascade(&mut state.board, &self.kinds, &self.config.scoring, rng)?;
        turn.add_score(cascade.points);
        Ok(GemReport {
            from: effects.from,
            to: effects.to,
            cascade,
        })
    }

    fn check_terminal(&self, state: &GemState, _turn: &TurnState) -> Option<GameResult> {
        if has_possible_swap(&state.board) {
            None
        } else {
            Some(GameResult::Exhausted)
        }
    }

    fn legal_moves(&self, state: &GemState, _turn: &TurnState) -> Vec<Move> {
        let mut moves = Vec::new();
        for from in state.board.coords() {
            for dir in [Direction::Right, Direction::Down] {
                let to = from.step(dir);
                if !state.board.in_bounds(to) {
                    continue;
                }
                if swap_forms_match(&state.board, from, to).unwrap_or(false) {
                    moves.push(Move::Swap { from, to });
                }
            }
        }
        moves
    }

    /// Score drains while the player thinks.
    fn tick(&self, _state: &GemState, turn: &mut TurnState) {
        if turn.score > 0 {
            turn.score = turn.score.saturating_sub(self.config.decay_per_tick).max(0);
        }
    }
}
