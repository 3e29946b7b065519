//! Fixed-size rectangular grid of cell states.
//!
//! Cells live in an `im::Vector` in row-major order, so cloning a board for a
//! speculative move is O(1) and the clone diverges from the original only in
//! the cells it writes.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::coord::{Coord, Direction};
use super::error::{EngineError, EngineResult};

/// One-character rendering of a cell, used by `Board`'s `Display`.
pub trait Glyph {
    fn glyph(&self) -> char;
}

impl Glyph for char {
    fn glyph(&self) -> char {
        *self
    }
}

impl Glyph for bool {
    fn glyph(&self) -> char {
        if *self { '#' } else { '.' }
    }
}

impl Glyph for u8 {
    fn glyph(&self) -> char {
        char::from_digit(u32::from(*self) % 36, 36).unwrap_or('?')
    }
}

impl<T: Glyph> Glyph for Option<T> {
    fn glyph(&self) -> char {
        self.as_ref().map_or('.', Glyph::glyph)
    }
}

/// A `width` x `height` grid of `C` cells.
///
/// Every access is checked against `[0, width) x [0, height)`. Writes outside
/// the board fail with `OutOfBounds` and leave the board untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "C: Serialize + Clone",
    deserialize = "C: Deserialize<'de> + Clone"
))]
pub struct Board<C: Clone> {
    width: usize,
    height: usize,
    cells: Vector<C>,
}

impl<C: Copy + Eq> Board<C> {
    /// Create a board with every cell set to `fill`.
    #[must_use]
    pub fn new(width: usize, height: usize, fill: C) -> Self {
        assert!(width > 0 && height > 0, "Board must have at least one cell");
        assert!(
            width <= i32::MAX as usize && height <= i32::MAX as usize,
            "Board dimensions must fit in i32 coordinates"
        );

        Self {
            width,
            height,
            cells: std::iter::repeat(fill).take(width * height).collect(),
        }
    }

    /// Build a board from rows (`rows[y][x]`).
    ///
    /// Fails if there are no rows, no columns, or the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<C>>) -> EngineResult<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(EngineError::invariant("board needs at least one row and one column"));
        }
        if let Some((y, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(EngineError::invariant(format!(
                "row {} has {} cells, expected {}",
                y,
                row.len(),
                width
            )));
        }

        Ok(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of columns.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Boards always have at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// True if `coord` lies on the board.
    #[must_use]
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.y as usize * self.width + coord.x as usize)
        } else {
            None
        }
    }

    /// `Ok(())` if `coord` is on the board, otherwise `OutOfBounds`.
    pub fn check(&self, coord: Coord) -> EngineResult<()> {
        if self.in_bounds(coord) {
            Ok(())
        } else {
            Err(EngineError::OutOfBounds {
                x: coord.x,
                y: coord.y,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Cell at `coord`, or `None` off the board.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<C> {
        self.index(coord).and_then(|i| self.cells.get(i).copied())
    }

    /// Overwrite the cell at `coord`, returning the previous state.
    pub fn set(&mut self, coord: Coord, cell: C) -> EngineResult<C> {
        self.check(coord)?;
        let i = coord.y as usize * self.width + coord.x as usize;
        Ok(self.cells.set(i, cell))
    }

    /// Exchange two cells. Both coordinates are checked before either is written.
    pub fn swap(&mut self, a: Coord, b: Coord) -> EngineResult<()> {
        self.check(a)?;
        self.check(b)?;
        let (ia, ib) = (
            a.y as usize * self.width + a.x as usize,
            b.y as usize * self.width + b.x as usize,
        );
        self.cells.swap(ia, ib);
        Ok(())
    }

    /// All coordinates in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> {
        let width = self.width as i32;
        let height = self.height as i32;
        (0..height).flat_map(move |y| (0..width).map(move |x| Coord::new(x, y)))
    }

    /// `(coord, cell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, C)> + '_ {
        self.coords().zip(self.cells.iter().copied())
    }

    /// Number of cells equal to `cell`.
    #[must_use]
    pub fn count(&self, cell: C) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Number of cells satisfying `pred`.
    pub fn count_where(&self, pred: impl Fn(C) -> bool) -> usize {
        self.cells.iter().filter(|&&c| pred(c)).count()
    }

    /// True if every cell holds the same state.
    #[must_use]
    pub fn is_uniform(&self) -> bool {
        match self.cells.front() {
            Some(&first) => self.cells.iter().all(|&c| c == first),
            None => true,
        }
    }

    /// Set every cell to `cell`.
    pub fn fill(&mut self, cell: C) {
        for slot in self.cells.iter_mut() {
            *slot = cell;
        }
    }

    /// Orthogonal neighbors of `coord` that lie on the board.
    pub fn neighbors4(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        Direction::ALL
            .into_iter()
            .map(move |dir| coord.step(dir))
            .filter(move |&c| self.in_bounds(c))
    }

    /// Convert every cell, keeping the shape.
    pub fn map<D: Copy + Eq>(&self, f: impl Fn(C) -> D) -> Board<D> {
        Board {
            width: self.width,
            height: self.height,
            cells: self.cells.iter().map(|&c| f(c)).collect(),
        }
    }

    /// Cells of column `x` from top to bottom.
    #[must_use]
    pub fn column(&self, x: usize) -> Vec<C> {
        if x >= self.width {
            return Vec::new();
        }
        (0..self.height)
            .filter_map(|y| self.cells.get(y * self.width + x).copied())
            .collect()
    }

    /// Render one character per cell, one line per row.
    pub fn render(&self, glyph: impl Fn(C) -> char) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for (i, &cell) in self.cells.iter().enumerate() {
            if i > 0 && i % self.width == 0 {
                out.push('\n');
            }
            out.push(glyph(cell));
        }
        out
    }
}

impl<C: Copy + Eq + Glyph> std::fmt::Display for Board<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(|c| c.glyph()))
    }
}
