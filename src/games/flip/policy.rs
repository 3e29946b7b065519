//! Automated play for the capture game.

use crate::core::config::FlipConfig;
use crate::core::coord::Coord;
use crate::core::moves::Move;
use crate::core::rng::GameRng;
use crate::core::state::TurnState;
use crate::rules::Policy;

use super::game::{bracket_flips, FlipRules, FlipState};

/// Take a corner if one is available, otherwise the placement that leaves
/// the mover with the most discs.
///
/// Candidates are taken row-major, so ties go to the first found. With
/// `shuffle` set, candidates are shuffled with the session RNG first.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyCornerPolicy {
    pub shuffle: bool,
}

impl GreedyCornerPolicy {
    #[must_use]
    pub fn new(shuffle: bool) -> Self {
        Self { shuffle }
    }

    #[must_use]
    pub fn from_config(config: &FlipConfig) -> Self {
        Self::new(config.shuffle_candidates)
    }
}

fn is_corner(at: Coord, width: usize, height: usize) -> bool {
    let (right, bottom) = (width as i32 - 1, height as i32 - 1);
    (at.x == 0 || at.x == right) && (at.y == 0 || at.y == bottom)
}

impl Policy<FlipRules> for GreedyCornerPolicy {
    fn choose(&self, _rules: &FlipRules, state: &FlipState, turn: &TurnState, rng: &mut GameRng) -> Option<Move> {
        let side = turn.active.side()?;
        let mut candidates = state.placements(side);
        if self.shuffle {
            rng.shuffle(&mut candidates);
        }

        let (width, height) = (state.board.width(), state.board.height());
        if let Some(&corner) = candidates.iter().find(|&&at| is_corner(at, width, height)) {
            return Some(Move::Place(corner));
        }

        let mut best: Option<(Coord, usize)> = None;
        for at in candidates {
            let mut scratch = state.clone();
            let flips = bracket_flips(&scratch.board, at, side);
            if scratch.apply(at, side, &flips).is_err() {
                continue;
            }
            let discs = scratch.board.count(Some(side));
            if best.map_or(true, |(_, most)| discs > most) {
                best = Some((at, discs));
            }
        }
        best.map(|(at, _)| Move::Place(at))
    }
}
