#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Board coordinates.

use std::fmt::{Display, Formatter};

/// A `(row, column)` coordinate on the board, 0-indexed.
///
/// Cells are plain values: they are compared, hashed and ordered by their
/// coordinates, which lets them key the sets the knowledge base is built on.
/// Ordering is row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Cell {
    /// Row, counted from the top.
    pub row: usize,
    /// Column, counted from the left.
    pub col: usize,
}

impl Cell {
    /// Creates the cell at `row`, `col`.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
