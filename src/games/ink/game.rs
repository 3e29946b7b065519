//! Ink spill rules.

use serde::{Deserialize, Serialize};

use crate::core::board::{Board, Glyph};
use crate::core::config::InkConfig;
use crate::core::coord::Coord;
use crate::core::error::{ConfigError, EngineError, EngineResult, Rejection};
use crate::core::moves::{InkColor, Move};
use crate::core::rng::GameRng;
use crate::core::side::Actor;
use crate::core::state::TurnState;
use crate::regions::flood_fill;
use crate::rules::{GameResult, Outcome, RuleSet};

/// The cell every spill starts from.
pub const ORIGIN: Coord = Coord::new(0, 0);

impl Glyph for InkColor {
    fn glyph(&self) -> char {
        char::from_digit(u32::from(self.0) % 10, 10).unwrap_or('?')
    }
}

/// Ink game state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InkState {
    pub board: Board<InkColor>,
}

impl InkState {
    /// Color of the origin region.
    #[must_use]
    pub fn origin_color(&self) -> Option<InkColor> {
        self.board.get(ORIGIN)
    }
}

/// A validated recolor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecolorEffects {
    pub from: InkColor,
    pub to: InkColor,
}

/// What a recolor did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InkReport {
    pub color: InkColor,
    /// Cells relabeled by the flood fill.
    pub recolored: usize,
    pub life: Option<u32>,
}

/// Random board smoothed into patches.
///
/// Each smoothing pass picks an interior cell and copies its color onto two
/// of its neighbors. Boards narrower than three cells skip smoothing.
pub fn generate_board(config: &InkConfig, rng: &mut GameRng) -> EngineResult<Board<InkColor>> {
    let palette = usize::from(config.palette);
    if palette == 0 {
        return Err(EngineError::invariant("ink palette is empty"));
    }

    let mut board = Board::new(config.width, config.height, InkColor(0));
    for at in board.coords().collect::<Vec<_>>() {
        board.set(at, InkColor(rng.gen_range_usize(0..palette) as u8))?;
    }

    if config.width < 3 || config.height < 3 {
        return Ok(board);
    }
    for _ in 0..config.smoothing_passes() {
        let x = rng.gen_range_usize(1..config.width - 1) as i32;
        let y = rng.gen_range_usize(1..config.height - 1) as i32;
        let at = Coord::new(x, y);
        let Some(color) = board.get(at) else {
            continue;
        };

        let (dx, dy) = match rng.gen_range_usize(0..4) {
            0 => (-1, -1),
            1 => (1, 1),
            2 => (1, -1),
            _ => (-1, 1),
        };
        board.set(at.offset(dx, 0), color)?;
        board.set(at.offset(0, dy), color)?;
    }
    Ok(board)
}

/// Ink spill rules.
#[derive(Clone, Debug, Default)]
pub struct InkRules {
    config: InkConfig,
}

impl InkRules {
    pub fn new(config: InkConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &InkConfig {
        &self.config
    }
}

impl RuleSet for InkRules {
    type State = InkState;
    type Effects = RecolorEffects;
    type Resolution = InkReport;

    fn name(&self) -> &'static str {
        "ink"
    }

    fn setup(&self, rng: &mut GameRng) -> EngineResult<(InkState, TurnState)> {
        let mut board_rng = rng.for_context("ink.board");
        let board = generate_board(&self.config, &mut board_rng)?;
        let turn = TurnState::new(Actor::Solo).with_life(self.config.max_life);
        Ok((InkState { board }, turn))
    }

    fn validate(&self, state: &InkState, _turn: &TurnState, mv: &Move) -> EngineResult<Outcome<RecolorEffects>> {
        let Move::Recolor(to) = *mv else {
            return Ok(Outcome::Rejected(Rejection::WrongMoveKind));
        };
        if to.0 >= self.config.palette {
            return Ok(Outcome::Rejected(Rejection::UnknownColor));
        }
        state.board.check(ORIGIN)?;
        let from = state
            .origin_color()
            .ok_or_else(|| EngineError::invariant("origin cell missing"))?;
        if from == to {
            return Ok(Outcome::Rejected(Rejection::SameColor));
        }
        Ok(Outcome::Accepted(RecolorEffects { from, to }))
    }

    fn resolve(
        &self,
        state: &mut InkState,
        turn: &mut TurnState,
        effects: RecolorEffects,
        _rng: &mut GameRng,
    ) -> EngineResult<InkReport> {
        let recolored = flood_fill(&mut state.board, ORIGIN, effects.to)?;
        let life = turn.spend_life();
        Ok(InkReport {
            color: effects.to,
            recolored,
            life,
        })
    }

    fn check_terminal(&self, state: &InkState, turn: &TurnState) -> Option<GameResult> {
        if state.board.is_uniform() {
            Some(GameResult::Solved)
        } else if turn.is_out_of_life() {
            Some(GameResult::Exhausted)
        } else {
            None
        }
    }

    fn legal_moves(&self, state: &InkState, _turn: &TurnState) -> Vec<Move> {
        let origin = state.origin_color();
        (0..self.config.palette)
            .map(InkColor)
            .filter(|&c| Some(c) != origin)
            .map(Move::Recolor)
            .collect()
    }
}
