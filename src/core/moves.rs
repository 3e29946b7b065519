//! Move representation.
//!
//! A move is a small tagged record decoded by the input collaborator:
//! - "Place a disc at (x, y)" = `Place(coord)`
//! - "Swap two gems" = `Swap { from, to }`
//! - "Walk one step" = `Step(direction)`
//! - "Spill a color" = `Recolor(color)`
//!
//! Each rule set accepts exactly one variant and rejects the others with
//! `Rejection::WrongMoveKind`.

use serde::{Deserialize, Serialize};

use super::coord::{Coord, Direction};

/// Palette index of an ink color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InkColor(pub u8);

impl InkColor {
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    /// Put the actor's disc on an empty cell.
    Place(Coord),
    /// Exchange two adjacent tokens.
    Swap { from: Coord, to: Coord },
    /// Walk the pusher one cell, pushing a token if one is in the way.
    Step(Direction),
    /// Flood the origin region with a palette color.
    Recolor(InkColor),
}

impl Move {
    /// Short name of the variant, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Move::Place(_) => "place",
            Move::Swap { .. } => "swap",
            Move::Step(_) => "step",
            Move::Recolor(_) => "recolor",
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Place(at) => write!(f, "place {}", at),
            Move::Swap { from, to } => write!(f, "swap {} <-> {}", from, to),
            Move::Step(dir) => write!(f, "step {:?}", dir),
            Move::Recolor(color) => write!(f, "recolor {}", color.0),
        }
    }
}
