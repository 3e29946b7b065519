//! Clear, drop, refill, repeat.
//!
//! One cascade pass finds every match, scores and clears it, lets the
//! remaining tokens fall, and refills the holes. Passes repeat until a scan
//! finds nothing. A settled board never needs more than `width * height`
//! passes; hitting that cap means the refill keeps producing matches and is
//! reported as an invariant violation.

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::config::Scoring;
use crate::core::coord::{Coord, Direction};
use crate::core::error::{EngineError, EngineResult};
use crate::core::rng::GameRng;

use super::resolver::{find_matches, MatchGroup};

/// One pass of the cascade.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeStep {
    pub groups: Vec<MatchGroup>,
    pub points: i64,
    /// Cells filled with new tokens after gravity.
    pub refilled: Vec<Coord>,
}

/// Every pass of one cascade.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CascadeReport {
    pub steps: Vec<CascadeStep>,
    pub points: i64,
}

impl CascadeReport {
    #[must_use]
    pub fn passes(&self) -> usize {
        self.steps.len()
    }
}

/// Points for a set of groups; each group scores on its own length.
#[must_use]
pub fn score_groups(groups: &[MatchGroup], scoring: &Scoring) -> i64 {
    groups
        .iter()
        .fold(0, |total: i64, g| total.saturating_add(scoring.points_for(g.len())))
}

/// Empty every cell in `groups`. Returns the number of tokens removed;
/// cells shared by crossing groups count once.
pub fn clear_groups<T: Copy + Eq>(board: &mut Board<Option<T>>, groups: &[MatchGroup]) -> EngineResult<usize> {
    let mut cleared = 0;
    for group in groups {
        for &at in &group.cells {
            if board.set(at, None)?.is_some() {
                cleared += 1;
            }
        }
    }
    Ok(cleared)
}

/// Let tokens fall to the bottom of their column, keeping their order.
pub fn apply_gravity<T: Copy + Eq>(board: &mut Board<Option<T>>) -> EngineResult<()> {
    let height = board.height();
    for x in 0..board.width() {
        let tokens: Vec<T> = board.column(x).into_iter().flatten().collect();
        let gap = height - tokens.len();

        for y in 0..height {
            let cell = if y < gap { None } else { Some(tokens[y - gap]) };
            board.set(Coord::new(x as i32, y as i32), cell)?;
        }
    }
    Ok(())
}

/// Fill every empty cell, bottom-up per column.
///
/// Each new token differs from its already-placed orthogonal neighbors. If a
/// cell's neighbors exclude every kind, any kind is allowed.
pub fn refill<T: Copy + Eq>(
    board: &mut Board<Option<T>>,
    kinds: &[T],
    rng: &mut GameRng,
) -> EngineResult<Vec<Coord>> {
    if kinds.is_empty() {
        return Err(EngineError::invariant("refill needs at least one token kind"));
    }

    let mut filled = Vec::new();
    for x in 0..board.width() as i32 {
        for y in (0..board.height() as i32).rev() {
            let at = Coord::new(x, y);
            if board.get(at).flatten().is_some() {
                continue;
            }

            let allowed: Vec<T> = kinds
                .iter()
                .copied()
                .filter(|&kind| {
                    !Direction::ALL
                        .iter()
                        .any(|&dir| board.get(at.step(dir)).flatten() == Some(kind))
                })
                .collect();

            let pick = if allowed.is_empty() {
                tracing::warn!(%at, kinds = kinds.len(), "every kind excluded by neighbors, relaxing refill");
                rng.choose(kinds).copied()
            } else {
                rng.choose(&allowed).copied()
            };
            let Some(token) = pick else {
                return Err(EngineError::invariant("refill drew from an empty pool"));
            };

            board.set(at, Some(token))?;
            filled.push(at);
        }
    }
    Ok(filled)
}

/// True if swapping the tokens at `a` and `b` leaves a match anywhere on the
/// board. Both cells must hold a token.
pub fn swap_forms_match<T: Copy + Eq>(board: &Board<Option<T>>, a: Coord, b: Coord) -> EngineResult<bool> {
    board.check(a)?;
    board.check(b)?;
    if board.get(a).flatten().is_none() || board.get(b).flatten().is_none() {
        return Ok(false);
    }
    let mut scratch = board.clone();
    scratch.swap(a, b)?;
    Ok(!find_matches(&scratch).is_empty())
}

/// True if some swap of adjacent tokens passes `swap_forms_match`.
#[must_use]
pub fn has_possible_swap<T: Copy + Eq>(board: &Board<Option<T>>) -> bool {
    board.coords().any(|at| {
        [Direction::Right, Direction::Down]
            .into_iter()
            .map(|dir| at.step(dir))
            .filter(|&other| board.in_bounds(other))
            .any(|other| swap_forms_match(board, at, other).unwrap_or(false))
    })
}

/// Resolve matches until the board settles.
pub fn run_cascade<T: Copy + Eq>(
    board: &mut Board<Option<T>>,
    kinds: &[T],
    scoring: &Scoring,
    rng: &mut GameRng,
) -> EngineResult<CascadeReport> {
    let cap = board.len();
    let mut report = CascadeReport::default();

    loop {
        let groups = find_matches(board);
        if groups.is_empty() {
            return Ok(report);
        }
        if report.steps.len() >= cap {
            return Err(EngineError::invariant(format!(
                "cascade did not settle within {} passes",
                cap
            )));
        }

        let points = score_groups(&groups, scoring);
        let cleared = clear_groups(board, &groups)?;
        apply_gravity(board)?;
        let refilled = refill(board, kinds, rng)?;

        tracing::trace!(
            pass = report.steps.len() + 1,
            groups = groups.len(),
            cleared,
            points,
            "cascade pass"
        );

        report.points = report.points.saturating_add(points);
        report.steps.push(CascadeStep {
            groups,
            points,
            refilled,
        });
    }
}
