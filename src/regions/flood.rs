//! Explicit-stack flood fill.

use rustc_hash::FxHashSet;

use crate::core::board::Board;
use crate::core::coord::Coord;
use crate::core::error::EngineResult;

/// A set of coordinates sharing a property.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Region {
    cells: FxHashSet<Coord>,
}

impl Region {
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.iter().copied()
    }

    /// Coordinates in row-major order.
    #[must_use]
    pub fn sorted(&self) -> Vec<Coord> {
        let mut cells: Vec<_> = self.cells.iter().copied().collect();
        cells.sort_by_key(|c| (c.y, c.x));
        cells
    }
}

impl FromIterator<Coord> for Region {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

/// Relabel the 4-connected component containing `seed` to `relabel`.
///
/// A cell joins the component if its state equals the seed's state at the
/// time of the call. Returns the number of relabeled cells; relabeling to the
/// seed's own state is a no-op returning 0.
pub fn flood_fill<C: Copy + Eq>(board: &mut Board<C>, seed: Coord, relabel: C) -> EngineResult<usize> {
    board.check(seed)?;
    let Some(target) = board.get(seed) else {
        return Ok(0);
    };
    if target == relabel {
        return Ok(0);
    }

    let mut count = 0;
    let mut stack = vec![seed];
    while let Some(at) = stack.pop() {
        // Already relabeled cells no longer match
        if board.get(at) != Some(target) {
            continue;
        }
        board.set(at, relabel)?;
        count += 1;

        for next in board.neighbors4(at) {
            if board.get(next) == Some(target) {
                stack.push(next);
            }
        }
    }

    Ok(count)
}

/// The 4-connected component containing `seed`, without mutating the board.
pub fn region<C: Copy + Eq>(board: &Board<C>, seed: Coord) -> EngineResult<Region> {
    board.check(seed)?;
    let mut cells = FxHashSet::default();
    let Some(target) = board.get(seed) else {
        return Ok(Region { cells });
    };

    let mut stack = vec![seed];
    while let Some(at) = stack.pop() {
        if !cells.insert(at) {
            continue;
        }
        for next in board.neighbors4(at) {
            if !cells.contains(&next) && board.get(next) == Some(target) {
                stack.push(next);
            }
        }
    }

    Ok(Region { cells })
}
