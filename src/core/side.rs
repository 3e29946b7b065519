//! Actors and per-side data storage.
//!
//! ## Side
//!
//! The two competing colors of a capture game.
//!
//! ## Actor
//!
//! Whoever holds the turn: one of the two sides, or the single player of a
//! solo puzzle.
//!
//! ## SideMap
//!
//! Fixed two-entry storage indexed by `Side`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two colors in a capture game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Black,
    White,
}

impl Side {
    /// Both sides, Black first.
    pub const BOTH: [Side; 2] = [Side::Black, Side::White];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Storage index (Black = 0, White = 1).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Side::Black => 0,
            Side::White => 1,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Black => write!(f, "Black"),
            Side::White => write!(f, "White"),
        }
    }
}

/// The actor holding the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Actor {
    /// The only player of a solo puzzle.
    Solo,
    /// One side of a two-player game.
    Side(Side),
}

impl Actor {
    /// The side, if this is a two-player actor.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Actor::Solo => None,
            Actor::Side(side) => Some(side),
        }
    }
}

impl From<Side> for Actor {
    fn from(side: Side) -> Self {
        Actor::Side(side)
    }
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Actor::Solo => write!(f, "Player"),
            Actor::Side(side) => write!(f, "{}", side),
        }
    }
}

/// Per-side data with O(1) access.
///
/// ```
/// use rust_grid::core::{Side, SideMap};
///
/// let mut discs: SideMap<usize> = SideMap::new(|_| 2);
/// discs[Side::Black] += 3;
/// assert_eq!(discs[Side::Black], 5);
/// assert_eq!(discs[Side::White], 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    data: [T; 2],
}

impl<T> SideMap<T> {
    /// Create with values from a factory function.
    pub fn new(factory: impl Fn(Side) -> T) -> Self {
        Self {
            data: [factory(Side::Black), factory(Side::White)],
        }
    }

    /// Get a reference to a side's data.
    #[must_use]
    pub fn get(&self, side: Side) -> &T {
        &self.data[side.index()]
    }

    /// Get a mutable reference to a side's data.
    pub fn get_mut(&mut self, side: Side) -> &mut T {
        &mut self.data[side.index()]
    }

    /// Iterate over `(Side, &T)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        Side::BOTH.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &Self::Output {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut Self::Output {
        self.get_mut(side)
    }
}
