//! Capture rules.

use serde::{Deserialize, Serialize};

use crate::core::board::{Board, Glyph};
use crate::core::config::FlipConfig;
use crate::core::coord::{Coord, COMPASS};
use crate::core::error::{ConfigError, EngineError, EngineResult, Rejection};
use crate::core::moves::Move;
use crate::core::rng::GameRng;
use crate::core::side::{Actor, Side, SideMap};
use crate::core::state::TurnState;
use crate::rules::{GameResult, Outcome, RuleSet};

impl Glyph for Side {
    fn glyph(&self) -> char {
        match self {
            Side::Black => 'X',
            Side::White => 'O',
        }
    }
}

/// Capture game state: one optional disc per cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipState {
    pub board: Board<Option<Side>>,
}

impl FlipState {
    /// Disc count per side.
    #[must_use]
    pub fn counts(&self) -> SideMap<usize> {
        SideMap::new(|side| self.board.count(Some(side)))
    }

    /// Legal placements for `side`, row-major.
    #[must_use]
    pub fn placements(&self, side: Side) -> Vec<Coord> {
        self.board
            .coords()
            .filter(|&at| !bracket_flips(&self.board, at, side).is_empty())
            .collect()
    }

    #[must_use]
    pub fn has_placement(&self, side: Side) -> bool {
        self.board
            .coords()
            .any(|at| !bracket_flips(&self.board, at, side).is_empty())
    }

    /// Place `side`'s disc at `at` and flip `flips`.
    pub fn apply(&mut self, at: Coord, side: Side, flips: &[Coord]) -> EngineResult<()> {
        self.board.set(at, Some(side))?;
        flip_cells(&mut self.board, flips)
    }
}

/// Every opposing disc bracketed by a `side` disc placed at `at`.
///
/// All eight directions are probed independently. An occupied or off-board
/// `at` brackets nothing.
#[must_use]
pub fn bracket_flips(board: &Board<Option<Side>>, at: Coord, side: Side) -> Vec<Coord> {
    if board.get(at) != Some(None) {
        return Vec::new();
    }

    let opponent = Some(Some(side.opponent()));
    let mut flips = Vec::new();
    for (dx, dy) in COMPASS {
        let mut line = Vec::new();
        let mut cursor = at.offset(dx, dy);
        while board.get(cursor) == opponent {
            line.push(cursor);
            cursor = cursor.offset(dx, dy);
        }
        if !line.is_empty() && board.get(cursor) == Some(Some(side)) {
            flips.extend(line);
        }
    }
    flips
}

/// Invert the owner of every disc in `cells`. Applying the same list twice
/// restores the board.
pub fn flip_cells(board: &mut Board<Option<Side>>, cells: &[Coord]) -> EngineResult<()> {
    for &at in cells {
        match board.get(at) {
            Some(Some(side)) => {
                board.set(at, Some(side.opponent()))?;
            }
            Some(None) => {
                return Err(EngineError::invariant(format!("no disc to flip at {}", at)));
            }
            None => board.check(at)?,
        }
    }
    Ok(())
}

/// A validated placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlipEffects {
    pub at: Coord,
    pub side: Side,
    pub flips: Vec<Coord>,
}

/// What a placement did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FlipReport {
    pub placed: Coord,
    pub side: Side,
    pub flipped: Vec<Coord>,
    /// Disc counts after the move.
    pub counts: SideMap<usize>,
}

/// Bracket-capture rules.
#[derive(Clone, Debug, Default)]
pub struct FlipRules {
    config: FlipConfig,
}

impl FlipRules {
    pub fn new(config: FlipConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &FlipConfig {
        &self.config
    }

    /// Empty board with the four center discs.
    #[must_use]
    pub fn starting_board(&self) -> Board<Option<Side>> {
        let mut board = Board::new(self.config.width, self.config.height, None);
        let cx = (self.config.width / 2) as i32;
        let cy = (self.config.height / 2) as i32;
        for (at, side) in [
            (Coord::new(cx - 1, cy - 1), Side::White),
            (Coord::new(cx, cy), Side::White),
            (Coord::new(cx - 1, cy), Side::Black),
            (Coord::new(cx, cy - 1), Side::Black),
        ] {
            // Always on board: validated configs are at least 4x4
            let _ = board.set(at, Some(side));
        }
        board
    }
}

impl RuleSet for FlipRules {
    type State = FlipState;
    type Effects = FlipEffects;
    type Resolution = FlipReport;

    fn name(&self) -> &'static str {
        "flip"
    }

    fn setup(&self, rng: &mut GameRng) -> EngineResult<(FlipState, TurnState)> {
        let first = self
            .config
            .first
            .fixed()
            .unwrap_or_else(|| if rng.gen_bool(0.5) { Side::Black } else { Side::White });
        let state = FlipState {
            board: self.starting_board(),
        };
        Ok((state, TurnState::new(Actor::Side(first))))
    }

    fn validate(&self, state: &FlipState, turn: &TurnState, mv: &Move) -> EngineResult<Outcome<FlipEffects>> {
        let Move::Place(at) = *mv else {
            return Ok(Outcome::Rejected(Rejection::WrongMoveKind));
        };
        let Some(side) = turn.active.side() else {
            return Ok(Outcome::Rejected(Rejection::WrongActor));
        };
        state.board.check(at)?;

        if state.board.get(at) != Some(None) {
            return Ok(Outcome::Rejected(Rejection::Occupied));
        }
        let flips = bracket_flips(&state.board, at, side);
        if flips.is_empty() {
            return Ok(Outcome::Rejected(Rejection::NoCaptures));
        }
        Ok(Outcome::Accepted(FlipEffects { at, side, flips }))
    }

    fn resolve(
        &self,
        state: &mut FlipState,
        _turn: &mut TurnState,
        effects: FlipEffects,
        _rng: &mut GameRng,
    ) -> EngineResult<FlipReport> {
        state.apply(effects.at, effects.side, &effects.flips)?;
        Ok(FlipReport {
            placed: effects.at,
            side: effects.side,
            flipped: effects.flips,
            counts: state.counts(),
        })
    }

    /// The opponent moves next if it can; otherwise it passes.
    fn end_turn(&self, state: &FlipState, turn: &mut TurnState) {
        if let Some(side) = turn.active.side() {
            let opponent = side.opponent();
            if state.has_placement(opponent) {
                turn.set_active(Actor::Side(opponent));
            } else {
                tracing::debug!(%opponent, "no legal placement, passing");
            }
        }
    }

    fn check_terminal(&self, state: &FlipState, _turn: &TurnState) -> Option<GameResult> {
        if Side::BOTH.iter().any(|&side| state.has_placement(side)) {
            return None;
        }
        let counts = state.counts();
        let (black, white) = (counts[Side::Black], counts[Side::White]);
        Some(match black.cmp(&white) {
            std::cmp::Ordering::Greater => GameResult::Winner(Side::Black),
            std::cmp::Ordering::Less => GameResult::Winner(Side::White),
            std::cmp::Ordering::Equal => GameResult::Tie,
        })
    }

    fn legal_moves(&self, state: &FlipState, turn: &TurnState) -> Vec<Move> {
        match turn.active.side() {
            Some(side) => state.placements(side).into_iter().map(Move::Place).collect(),
            None => Vec::new(),
        }
    }
}
