//! Match detection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::board::Board;
use crate::core::coord::Coord;

/// Minimum run length that counts as a match.
pub const MIN_RUN: usize = 3;

/// Orientation of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    const fn delta(self) -> (i32, i32) {
        match self {
            Axis::Horizontal => (1, 0),
            Axis::Vertical => (0, 1),
        }
    }
}

/// One maximal run of identical tokens.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchGroup {
    pub axis: Axis,
    /// Cells from the run's start (left or top) to its end.
    pub cells: SmallVec<[Coord; 8]>,
}

impl MatchGroup {
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
}

/// Every maximal run of three or more identical non-empty tokens.
///
/// Horizontal runs come first (top to bottom), then vertical runs (left to
/// right). An L or T shape yields one group per axis.
pub fn find_matches<T: Copy + Eq>(board: &Board<Option<T>>) -> Vec<MatchGroup> {
    let mut groups = Vec::new();
    let (w, h) = (board.width() as i32, board.height() as i32);

    for y in 0..h {
        scan_line(board, Coord::new(0, y), Axis::Horizontal, &mut groups);
    }
    for x in 0..w {
        scan_line(board, Coord::new(x, 0), Axis::Vertical, &mut groups);
    }

    groups
}

fn scan_line<T: Copy + Eq>(
    board: &Board<Option<T>>,
    start: Coord,
    axis: Axis,
    out: &mut Vec<MatchGroup>,
) {
    let (dx, dy) = axis.delta();
    let mut at = start;
    while board.in_bounds(at) {
        let Some(token) = board.get(at).flatten() else {
            at = at.offset(dx, dy);
            continue;
        };

        let mut run: SmallVec<[Coord; 8]> = SmallVec::new();
        let mut cursor = at;
        while board.get(cursor).flatten() == Some(token) {
            run.push(cursor);
            cursor = cursor.offset(dx, dy);
        }

        if run.len() >= MIN_RUN {
            out.push(MatchGroup { axis, cells: run });
        }
        at = cursor;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(rows: &[&str]) -> Board<Option<char>> {
        Board::from_rows(
            rows.iter()
                .map(|r| r.chars().map(|c| if c == '.' { None } else { Some(c) }).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_no_matches() {
        let b = board(&["ABAB", "BABA", "ABAB"]);
        assert!(find_matches(&b).is_empty());
    }

    #[test]
    fn test_run_of_five_is_one_group() {
        let b = board(&["AAAAA", "BCBCB"]);
        let groups = find_matches(&b);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].axis, Axis::Horizontal);
        assert_eq!(groups[0].len(), 5);
        assert_eq!(groups[0].cells[0], Coord::new(0, 0));
    }

    #[test]
    fn test_two_runs_in_one_row() {
        let b = board(&["AAABBB"]);
        let groups = find_matches(&b);

        assert_eq!(groups.len(), 2);
        assert!(groups.iter().all(|g| g.len() == 3));
    }

    #[test]
    fn test_crossing_runs_one_group_per_axis() {
        let b = board(&["AAA", "BAB", "CAC"]);
        let groups = find_matches(&b);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].axis, Axis::Horizontal);
        assert_eq!(groups[1].axis, Axis::Vertical);
        assert!(groups[0].contains(Coord::new(1, 0)));
        assert!(groups[1].contains(Coord::new(1, 0)));
    }

    #[test]
    fn test_empty_cells_break_runs() {
        let b = board(&["AA.AA", "....."]);
        assert!(find_matches(&b).is_empty());
    }
}
