//! Cells, orientations and dominoes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Side;

/// Board coordinate. Column grows rightwards, row grows downwards.
///
/// Ordered by column, then row, giving piece sets a canonical order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub column: i32,
    pub row: i32,
}

impl Cell {
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Shift by the given amounts. Wraps on overflow, which can only happen
    /// for cells far outside any board, so bounds checks still reject them.
    #[must_use]
    pub const fn offset(self, columns: i32, rows: i32) -> Self {
        Self::new(
            self.column.wrapping_add(columns),
            self.row.wrapping_add(rows),
        )
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Placement axis of a domino.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Covers `anchor` and the cell below it. Left's pieces.
    Vertical,
    /// Covers `anchor` and the cell to its right. Right's pieces.
    Horizontal,
}

impl Orientation {
    /// The orientation a side is allowed to place.
    #[must_use]
    pub const fn for_side(side: Side) -> Self {
        match side {
            Side::Left => Orientation::Vertical,
            Side::Right => Orientation::Horizontal,
        }
    }
}

/// A placed two-cell piece.
///
/// The anchor is the top cell of a vertical domino and the left cell of a
/// horizontal one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Domino {
    pub orientation: Orientation,
    pub anchor: Cell,
}

impl Domino {
    #[must_use]
    pub const fn new(orientation: Orientation, anchor: Cell) -> Self {
        Self { orientation, anchor }
    }

    /// The two cells this domino covers.
    #[must_use]
    pub fn cells(&self) -> [Cell; 2] {
        match self.orientation {
            Orientation::Vertical => [self.anchor, self.anchor.offset(0, 1)],
            Orientation::Horizontal => [self.anchor, self.anchor.offset(1, 0)],
        }
    }

    /// The six orthogonal neighbours of the footprint, in clockwise order
    /// from above the anchor. May lie outside the board.
    #[must_use]
    pub fn neighbours(&self) -> SmallVec<[Cell; 6]> {
        let a = self.anchor;
        match self.orientation {
            Orientation::Vertical => smallvec::smallvec![
                a.offset(0, -1),
                a.offset(1, 0),
                a.offset(1, 1),
                a.offset(0, 2),
                a.offset(-1, 1),
                a.offset(-1, 0),
            ],
            Orientation::Horizontal => smallvec::smallvec![
                a.offset(0, -1),
                a.offset(1, -1),
                a.offset(2, 0),
                a.offset(1, 1),
                a.offset(0, 1),
                a.offset(-1, 0),
            ],
        }
    }

    /// Check whether the two footprints share a cell.
    #[must_use]
    pub fn overlaps(&self, other: &Domino) -> bool {
        let mine = self.cells();
        other.cells().iter().any(|cell| mine.contains(cell))
    }
}

impl std::fmt::Display for Domino {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind = match self.orientation {
            Orientation::Vertical => "vertical",
            Orientation::Horizontal => "horizontal",
        };
        write!(f, "{kind} domino at {}", self.anchor)
    }
}
