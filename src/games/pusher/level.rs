//! Pre-parsed level data.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::board::{Board, Glyph};
use crate::core::coord::{Coord, Direction};
use crate::core::error::{EngineError, EngineResult};
use crate::regions::{flood_fill, Region};

/// Static map cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    Wall,
    Floor,
}

impl Glyph for Tile {
    fn glyph(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => ' ',
        }
    }
}

/// Floor classification used by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FloorClass {
    Wall,
    /// Wall joined to walls on two perpendicular sides.
    CornerWall,
    /// Floor reachable from the start.
    Inside,
    /// Floor outside the walls.
    Outside,
}

impl Glyph for FloorClass {
    fn glyph(&self) -> char {
        match self {
            FloorClass::Wall => '#',
            FloorClass::CornerWall => 'x',
            FloorClass::Inside => 'o',
            FloorClass::Outside => ' ',
        }
    }
}

/// Split a map into inside and outside floor and mark corner walls.
///
/// Inside floor is the region connected to `start`. Fails with
/// `InvariantViolation` if `start` is not floor.
pub fn classify_floor(map: &Board<Tile>, start: Coord) -> EngineResult<Board<FloorClass>> {
    map.check(start)?;
    if map.get(start) != Some(Tile::Floor) {
        return Err(EngineError::invariant(format!("start {} is not on floor", start)));
    }

    let mut classes = map.map(|tile| match tile {
        Tile::Wall => FloorClass::Wall,
        Tile::Floor => FloorClass::Outside,
    });
    flood_fill(&mut classes, start, FloorClass::Inside)?;

    let is_wall = |at: Coord| map.get(at) == Some(Tile::Wall);
    let corners: Vec<Coord> = map
        .coords()
        .filter(|&at| is_wall(at))
        .filter(|&at| {
            [
                (Direction::Up, Direction::Right),
                (Direction::Right, Direction::Down),
                (Direction::Down, Direction::Left),
                (Direction::Left, Direction::Up),
            ]
            .iter()
            .any(|&(a, b)| is_wall(at.step(a)) && is_wall(at.step(b)))
        })
        .collect();
    for at in corners {
        classes.set(at, FloorClass::CornerWall)?;
    }

    Ok(classes)
}

/// A validated level: map, goals, starting tokens and start position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    map: Board<Tile>,
    goals: FxHashSet<Coord>,
    tokens: FxHashSet<Coord>,
    start: Coord,
}

impl Level {
    /// Validate and build a level.
    ///
    /// The start, every goal and every token must be on floor; there must be
    /// at least one goal and at least as many tokens as goals, and no token
    /// may sit on the start.
    pub fn new(
        map: Board<Tile>,
        start: Coord,
        goals: impl IntoIterator<Item = Coord>,
        tokens: impl IntoIterator<Item = Coord>,
    ) -> EngineResult<Self> {
        let goals: FxHashSet<Coord> = goals.into_iter().collect();
        let tokens: FxHashSet<Coord> = tokens.into_iter().collect();

        let on_floor = |what: &str, at: Coord| -> EngineResult<()> {
            map.check(at)?;
            if map.get(at) == Some(Tile::Floor) {
                Ok(())
            } else {
                Err(EngineError::invariant(format!("{} at {} is not on floor", what, at)))
            }
        };

        on_floor("start", start)?;
        for &at in &goals {
            on_floor("goal", at)?;
        }
        for &at in &tokens {
            on_floor("token", at)?;
        }
        if goals.is_empty() {
            return Err(EngineError::invariant("level has no goals"));
        }
        if tokens.len() < goals.len() {
            return Err(EngineError::invariant(format!(
                "level has {} goals but only {} tokens",
                goals.len(),
                tokens.len()
            )));
        }
        if tokens.contains(&start) {
            return Err(EngineError::invariant(format!("token on start {}", start)));
        }

        Ok(Self {
            map,
            goals,
            tokens,
            start,
        })
    }

    #[must_use]
    pub fn map(&self) -> &Board<Tile> {
        &self.map
    }

    #[must_use]
    pub fn start(&self) -> Coord {
        self.start
    }

    #[must_use]
    pub fn goals(&self) -> &FxHashSet<Coord> {
        &self.goals
    }

    #[must_use]
    pub fn tokens(&self) -> &FxHashSet<Coord> {
        &self.tokens
    }

    #[must_use]
    pub fn is_wall(&self, at: Coord) -> bool {
        self.map.get(at) == Some(Tile::Wall)
    }

    /// Floor connected to the start.
    pub fn interior(&self) -> EngineResult<Region> {
        let classes = classify_floor(&self.map, self.start)?;
        Ok(classes
            .iter()
            .filter(|&(_, class)| class == FloorClass::Inside)
            .map(|(at, _)| at)
            .collect())
    }
}
