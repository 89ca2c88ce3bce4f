//! NoCanDo positions.

use im::OrdSet;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::domino::{Cell, Domino, Orientation};
use crate::core::{dedup_options, Position, PositionFactory, Side};
use crate::error::{FactoryError, IllegalPositionError, Violation};

/// Side length of the standard board.
pub const STANDARD_SIZE: i32 = 8;

/// A NoCanDo board: fixed dimensions plus the set of placed dominoes.
///
/// Uses `im` ordered sets, so cloning is O(1) and deriving a successor
/// shares structure with its parent. Equality compares dimensions and the
/// two piece sets, independent of insertion order.
///
/// Deserialization goes through [`NoCanDo::with_pieces`], so an illegal
/// payload is rejected rather than smuggled in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawNoCanDo")]
pub struct NoCanDo {
    height: i32,
    width: i32,
    /// Top cells of vertical dominoes.
    verticals: OrdSet<Cell>,
    /// Left cells of horizontal dominoes.
    horizontals: OrdSet<Cell>,
}

/// Unvalidated wire form of [`NoCanDo`].
#[derive(Deserialize)]
struct RawNoCanDo {
    height: i32,
    width: i32,
    verticals: Vec<Cell>,
    horizontals: Vec<Cell>,
}

impl TryFrom<RawNoCanDo> for NoCanDo {
    type Error = IllegalPositionError;

    fn try_from(raw: RawNoCanDo) -> Result<Self, Self::Error> {
        Self::with_pieces(raw.height, raw.width, raw.verticals, raw.horizontals)
    }
}

impl NoCanDo {
    /// Create an empty board.
    pub fn empty(height: i32, width: i32) -> Result<Self, IllegalPositionError> {
        Self::with_pieces(height, width, None, None)
    }

    /// The empty 8x8 board.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            height: STANDARD_SIZE,
            width: STANDARD_SIZE,
            verticals: OrdSet::new(),
            horizontals: OrdSet::new(),
        }
    }

    /// Build a board from vertical tops and horizontal lefts.
    ///
    /// Fails if any piece is out of bounds, overlaps another, or has no
    /// liberty.
    pub fn with_pieces(
        height: i32,
        width: i32,
        verticals: impl IntoIterator<Item = Cell>,
        horizontals: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, IllegalPositionError> {
        let board = Self {
            height,
            width,
            verticals: verticals.into_iter().collect(),
            horizontals: horizontals.into_iter().collect(),
        };
        board.check()?;
        Ok(board)
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Top cells of the vertical dominoes.
    #[must_use]
    pub fn verticals(&self) -> &OrdSet<Cell> {
        &self.verticals
    }

    /// Left cells of the horizontal dominoes.
    #[must_use]
    pub fn horizontals(&self) -> &OrdSet<Cell> {
        &self.horizontals
    }

    /// Number of placed dominoes.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.verticals.len() + self.horizontals.len()
    }

    /// Iterate over every placed domino, verticals first.
    pub fn dominoes(&self) -> impl Iterator<Item = Domino> + '_ {
        let verticals = self
            .verticals
            .iter()
            .map(|&cell| Domino::new(Orientation::Vertical, cell));
        let horizontals = self
            .horizontals
            .iter()
            .map(|&cell| Domino::new(Orientation::Horizontal, cell));
        verticals.chain(horizontals)
    }

    /// Check whether a cell lies on the board.
    #[must_use]
    pub fn in_bounds(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.column) && (0..self.height).contains(&cell.row)
    }

    /// The successor with `side`'s domino anchored at `anchor`.
    ///
    /// Returns `None` if the result would be illegal or identical to
    /// `self`.
    #[must_use]
    pub fn place(&self, side: Side, anchor: Cell) -> Option<Self> {
        let mut next = self.clone();
        let set = match Orientation::for_side(side) {
            Orientation::Vertical => &mut next.verticals,
            Orientation::Horizontal => &mut next.horizontals,
        };
        if set.insert(anchor).is_some() {
            return None;
        }
        next.check().ok().map(|()| next)
    }

    /// Validate bounds, overlaps and liberties, in that order.
    pub fn check(&self) -> Result<(), Violation> {
        if self.height <= 0 || self.width <= 0 {
            return Err(Violation::InvalidDimensions {
                height: self.height,
                width: self.width,
            });
        }

        for piece in self.dominoes() {
            if !piece.cells().iter().all(|&cell| self.in_bounds(cell)) {
                return Err(Violation::OutOfBounds { piece });
            }
        }

        let mut covered: FxHashMap<Cell, Domino> = FxHashMap::default();
        for piece in self.dominoes() {
            for cell in piece.cells() {
                if let Some(first) = covered.insert(cell, piece) {
                    return Err(Violation::Overlap {
                        first,
                        second: piece,
                    });
                }
            }
        }

        for piece in self.dominoes() {
            let has_liberty = piece
                .neighbours()
                .iter()
                .any(|&cell| self.in_bounds(cell) && !covered.contains_key(&cell));
            if !has_liberty {
                return Err(Violation::NoLiberty { piece });
            }
        }

        Ok(())
    }
}

impl Default for NoCanDo {
    fn default() -> Self {
        Self::standard()
    }
}

impl Position for NoCanDo {
    fn name() -> &'static str {
        "NoCanDo"
    }

    fn options(&self, side: Side) -> Vec<Self> {
        let mut options = Vec::new();
        for column in 0..self.width {
            for row in 0..self.height {
                if let Some(option) = self.place(side, Cell::new(column, row)) {
                    options.push(option);
                }
            }
        }
        dedup_options(options)
    }

    fn is_legal(&self) -> bool {
        self.check().is_ok()
    }
}

/// Text grid: `.` empty, `|` vertical, `-` horizontal.
impl std::fmt::Display for NoCanDo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut marks: FxHashMap<Cell, char> = FxHashMap::default();
        for piece in self.dominoes() {
            let mark = match piece.orientation {
                Orientation::Vertical => '|',
                Orientation::Horizontal => '-',
            };
            for cell in piece.cells() {
                marks.insert(cell, mark);
            }
        }
        for row in 0..self.height {
            for column in 0..self.width {
                let mark = marks.get(&Cell::new(column, row)).copied().unwrap_or('.');
                write!(f, "{mark}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Creates empty boards of a fixed size. Defaults to 8x8.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoCanDoFactory {
    pub height: i32,
    pub width: i32,
}

impl NoCanDoFactory {
    pub fn new(height: i32, width: i32) -> Self {
        Self { height, width }
    }
}

impl Default for NoCanDoFactory {
    fn default() -> Self {
        Self::new(STANDARD_SIZE, STANDARD_SIZE)
    }
}

impl PositionFactory<NoCanDo> for NoCanDoFactory {
    fn create(&mut self) -> Result<NoCanDo, FactoryError> {
        Ok(NoCanDo::empty(self.height, self.width)?)
    }
}
